use super::prelude::*;
use time::{Date, Month, OffsetDateTime, Time};

/// Aggregated view over a user's ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointStatistics {
    pub total_earned: i64,
    pub total_used: i64,
    pub current_balance: i64,
}

pub fn point_history_of_user<R: PointHistoryRepo>(
    repo: &R,
    user_id: &Id,
) -> Result<Vec<PointHistory>> {
    Ok(repo.point_entries_by_user(user_id)?)
}

pub fn point_history_of_user_by_kind<R: PointHistoryRepo>(
    repo: &R,
    user_id: &Id,
    kind: PointKind,
) -> Result<Vec<PointHistory>> {
    Ok(repo.point_entries_by_user_and_kind(user_id, kind)?)
}

pub fn point_history_of_user_between<R: PointHistoryRepo>(
    repo: &R,
    user_id: &Id,
    since: Timestamp,
    until: Timestamp,
) -> Result<Vec<PointHistory>> {
    Ok(repo.point_entries_by_user_between(user_id, since, until)?)
}

pub fn recent_point_history_of_user<R: PointHistoryRepo>(
    repo: &R,
    user_id: &Id,
    limit: u64,
) -> Result<Vec<PointHistory>> {
    Ok(repo.recent_point_entries(user_id, limit)?)
}

/// The balance derived by replaying the ledger. Authoritative; the
/// cached `User::points` must always agree with it.
pub fn replayed_balance<R: PointHistoryRepo>(repo: &R, user_id: &Id) -> Result<i64> {
    Ok(repo.sum_point_deltas(user_id)?)
}

pub fn point_statistics<R>(repo: &R, user_id: &Id) -> Result<PointStatistics>
where
    R: UserRepo + PointHistoryRepo,
{
    let user = repo.get_user(user_id)?;
    let mut total_earned = 0;
    let mut total_used = 0;
    for entry in repo.point_entries_by_user(user_id)? {
        match entry.kind {
            PointKind::Earned => total_earned += entry.delta,
            PointKind::Used => total_used += entry.absolute_points(),
        }
    }
    Ok(PointStatistics {
        total_earned,
        total_used,
        current_balance: user.points,
    })
}

/// Signed point total of one calendar month (UTC).
pub fn monthly_points_of_user<R: PointHistoryRepo>(
    repo: &R,
    user_id: &Id,
    year: i32,
    month: u8,
    kind: PointKind,
) -> Result<i64> {
    let (since, until) = month_range(year, month)?;
    Ok(repo
        .point_entries_by_user_between(user_id, since, until)?
        .iter()
        .filter(|e| e.kind == kind)
        .map(|e| e.absolute_points())
        .sum())
}

fn month_range(year: i32, month: u8) -> Result<(Timestamp, Timestamp)> {
    let month = Month::try_from(month).map_err(|_| Error::Month)?;
    let start = Date::from_calendar_date(year, month, 1).map_err(|_| Error::Month)?;
    let (next_year, next_month) = match month {
        Month::December => (year + 1, Month::January),
        _ => (year, month.next()),
    };
    let end = Date::from_calendar_date(next_year, next_month, 1).map_err(|_| Error::Month)?;
    let to_ts = |d: Date| Timestamp::from(OffsetDateTime::new_utc(d, Time::MIDNIGHT));
    Ok((to_ts(start), to_ts(end)))
}
