use super::prelude::*;
use super::PointPolicy;

/// Credits cleanup points to the uploader of a verified photo.
///
/// The award is a flat base plus a confidence bonus per [`PointPolicy`].
/// Appends an immutable ledger entry and increments the cached balance.
pub fn credit_cleanup_points<R>(
    repo: &R,
    user_id: &Id,
    photo_id: &Id,
    confidence: Option<f64>,
    policy: &PointPolicy,
) -> Result<PointHistory>
where
    R: UserRepo + PointHistoryRepo,
{
    let mut user = repo.get_user(user_id)?;
    let points = policy.award_for(confidence);
    let reason = format!(
        "Cleanup verified (confidence: {:.0}%)",
        confidence.unwrap_or(0.0) * 100.0
    );

    let entry = PointHistory::earned(
        user.id.clone(),
        points,
        reason,
        Some(photo_id.clone()),
        Timestamp::now(),
    );
    repo.append_point_entry(&entry)?;

    user.points += points;
    repo.update_user(&user)?;

    log::info!(
        "Credited {points} points to user {} for photo {photo_id} (balance: {})",
        user.id,
        user.points
    );
    Ok(entry)
}
