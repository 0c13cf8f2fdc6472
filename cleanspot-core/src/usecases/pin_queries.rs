use super::prelude::*;

/// Read model of an issued pin.
///
/// The code is only ever shown in full at issuance; every later read
/// goes through this view and exposes the masked form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PinView {
    pub reward_id: Id,
    pub masked_code: String,
    pub issued_at: Timestamp,
    pub expires_at: Timestamp,
    pub used: bool,
    pub used_at: Option<Timestamp>,
    pub available: bool,
}

impl PinView {
    fn from_pin(pin: RewardPin, now: Timestamp) -> Self {
        let available = pin.is_available(now);
        let RewardPin {
            reward_id,
            code,
            issued_at,
            expires_at,
            used,
            used_at,
            ..
        } = pin;
        Self {
            reward_id,
            masked_code: code.masked(),
            issued_at,
            expires_at,
            used,
            used_at,
            available,
        }
    }
}

pub fn pins_of_user<R: RewardPinRepo>(repo: &R, user_id: &Id) -> Result<Vec<PinView>> {
    let now = Timestamp::now();
    Ok(repo
        .pins_by_user(user_id)?
        .into_iter()
        .map(|pin| PinView::from_pin(pin, now))
        .collect())
}

pub fn available_pins_of_user<R: RewardPinRepo>(repo: &R, user_id: &Id) -> Result<Vec<PinView>> {
    Ok(pins_of_user(repo, user_id)?
        .into_iter()
        .filter(|pin| pin.available)
        .collect())
}

pub fn used_pins_of_user<R: RewardPinRepo>(repo: &R, user_id: &Id) -> Result<Vec<PinView>> {
    Ok(pins_of_user(repo, user_id)?
        .into_iter()
        .filter(|pin| pin.used)
        .collect())
}

pub fn pin_of_reward<R: RewardPinRepo>(repo: &R, reward_id: &Id) -> Result<Option<PinView>> {
    let now = Timestamp::now();
    Ok(repo
        .try_get_pin_by_reward(reward_id)?
        .map(|pin| PinView::from_pin(pin, now)))
}
