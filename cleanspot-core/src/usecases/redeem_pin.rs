use super::prelude::*;

/// Redeems a pin code: marks it used exactly once.
///
/// Fails with [`Error::InvalidCode`] for unknown or malformed codes,
/// [`Error::AlreadyUsed`] for spent pins and [`Error::Expired`] for
/// pins at or past their expiry (the boundary is inclusive).
pub fn redeem_pin<R>(repo: &R, code: &str) -> Result<RewardPin>
where
    R: RewardPinRepo,
{
    let code: PinCode = code.parse()?;
    let Some(mut pin) = repo.try_get_pin_by_code(&code)? else {
        return Err(Error::InvalidCode);
    };

    let now = Timestamp::now();
    if pin.used {
        return Err(Error::AlreadyUsed);
    }
    if pin.is_expired(now) {
        return Err(Error::Expired);
    }

    // Cannot fail after the checks above, but keep the state change in
    // the entity so the terminal transition has a single owner.
    let marked = pin.mark_used(now);
    debug_assert!(marked);
    repo.update_pin(&pin)?;

    log::info!("Pin {} redeemed for reward {}", pin.code.masked(), pin.reward_id);
    Ok(pin)
}
