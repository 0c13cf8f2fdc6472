use super::*;

/// Redeems a pin code, marking it used exactly once.
pub fn redeem_pin(connections: &sqlite::Connections, code: &str) -> Result<RewardPin> {
    Ok(connections
        .exclusive()?
        .transaction(|conn| usecases::redeem_pin(conn, code))?)
}
