use super::*;
use cleanspot_core::usecases::{MarkerVerificationStatus, PinView, PointStatistics};

// Read-only queries exposed to the surrounding CRUD layer. All of them
// run on shared connections and never mutate state.

pub fn marker_verification_status(
    connections: &sqlite::Connections,
    marker_id: &Id,
) -> Result<MarkerVerificationStatus> {
    let db = connections.shared()?;
    Ok(usecases::marker_verification_status(&db, marker_id)?)
}

pub fn point_statistics(
    connections: &sqlite::Connections,
    user_id: &Id,
) -> Result<PointStatistics> {
    let db = connections.shared()?;
    Ok(usecases::point_statistics(&db, user_id)?)
}

pub fn point_history(connections: &sqlite::Connections, user_id: &Id) -> Result<Vec<PointHistory>> {
    let db = connections.shared()?;
    Ok(usecases::point_history_of_user(&db, user_id)?)
}

pub fn point_history_by_kind(
    connections: &sqlite::Connections,
    user_id: &Id,
    kind: PointKind,
) -> Result<Vec<PointHistory>> {
    let db = connections.shared()?;
    Ok(usecases::point_history_of_user_by_kind(&db, user_id, kind)?)
}

pub fn point_history_between(
    connections: &sqlite::Connections,
    user_id: &Id,
    since: Timestamp,
    until: Timestamp,
) -> Result<Vec<PointHistory>> {
    let db = connections.shared()?;
    Ok(usecases::point_history_of_user_between(
        &db, user_id, since, until,
    )?)
}

pub fn recent_point_history(
    connections: &sqlite::Connections,
    user_id: &Id,
    limit: u64,
) -> Result<Vec<PointHistory>> {
    let db = connections.shared()?;
    Ok(usecases::recent_point_history_of_user(&db, user_id, limit)?)
}

/// The ledger-derived balance, for reconciliation against the cached
/// one.
pub fn replayed_balance(connections: &sqlite::Connections, user_id: &Id) -> Result<i64> {
    let db = connections.shared()?;
    Ok(usecases::replayed_balance(&db, user_id)?)
}

pub fn rewards_of_user(connections: &sqlite::Connections, user_id: &Id) -> Result<Vec<Reward>> {
    let db = connections.shared()?;
    Ok(usecases::rewards_of_user(&db, user_id)?)
}

pub fn pins_of_user(connections: &sqlite::Connections, user_id: &Id) -> Result<Vec<PinView>> {
    let db = connections.shared()?;
    Ok(usecases::pins_of_user(&db, user_id)?)
}

pub fn available_pins_of_user(
    connections: &sqlite::Connections,
    user_id: &Id,
) -> Result<Vec<PinView>> {
    let db = connections.shared()?;
    Ok(usecases::available_pins_of_user(&db, user_id)?)
}
