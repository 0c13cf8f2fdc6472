use super::prelude::*;

/// Debits points from a user's ledger.
///
/// The available balance is recomputed by replaying the ledger, not
/// read from the cache: debits gate real payouts and must not trust
/// the redundant counter.
pub fn debit_points<R>(repo: &R, user_id: &Id, amount: i64, reason: String) -> Result<PointHistory>
where
    R: UserRepo + PointHistoryRepo,
{
    if amount <= 0 {
        return Err(Error::InvalidPoints);
    }

    let mut user = repo.get_user(user_id)?;
    let available = repo.sum_point_deltas(&user.id)?;
    if amount > available {
        return Err(Error::InsufficientBalance {
            available,
            requested: amount,
        });
    }

    let entry = PointHistory::used(user.id.clone(), amount, reason, Timestamp::now());
    repo.append_point_entry(&entry)?;

    user.points -= amount;
    repo.update_user(&user)?;

    log::info!(
        "Debited {amount} points from user {} (balance: {})",
        user.id,
        user.points
    );
    Ok(entry)
}
