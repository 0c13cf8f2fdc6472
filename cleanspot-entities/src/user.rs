use crate::{id::*, time::*};

/// An account that reports markers, uploads photos and collects points.
///
/// `points` is a redundant cache of the ledger balance. The point history
/// is authoritative; the cache exists for O(1) balance reads.
#[rustfmt::skip]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id         : Id,
    pub username   : String,
    pub points     : i64,
    pub created_at : Timestamp,
}

impl User {
    pub fn has_enough_points(&self, required: i64) -> bool {
        self.points >= required
    }
}
