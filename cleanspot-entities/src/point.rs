use num_derive::{FromPrimitive, ToPrimitive};
use num_traits::*;
use strum::EnumString;
use thiserror::Error;

use crate::{id::*, time::*};

pub type PointKindPrimitive = i16;

/// Direction of a ledger entry.
#[rustfmt::skip]
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromPrimitive, ToPrimitive, EnumString)]
#[strum(ascii_case_insensitive)]
pub enum PointKind {
    Earned = 0,
    Used   = 1,
}

#[derive(Debug, Error)]
#[error("Invalid point kind primitive: {0}")]
pub struct InvalidPointKindPrimitive(PointKindPrimitive);

impl TryFrom<PointKindPrimitive> for PointKind {
    type Error = InvalidPointKindPrimitive;
    fn try_from(from: PointKindPrimitive) -> Result<Self, Self::Error> {
        Self::from_i16(from).ok_or(InvalidPointKindPrimitive(from))
    }
}

impl From<PointKind> for PointKindPrimitive {
    fn from(from: PointKind) -> Self {
        from.to_i16().expect("Point kind primitive")
    }
}

/// An immutable, signed entry of the point ledger.
///
/// Entries are append-only; the current balance of a user is the signed
/// sum over their entries.
#[rustfmt::skip]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PointHistory {
    pub id               : Id,
    pub user_id          : Id,
    /// Positive for earned points, negative for used points.
    pub delta            : i64,
    pub kind             : PointKind,
    pub reason           : String,
    pub related_photo_id : Option<Id>,
    pub created_at       : Timestamp,
}

impl PointHistory {
    pub fn earned(
        user_id: Id,
        points: i64,
        reason: String,
        related_photo_id: Option<Id>,
        at: Timestamp,
    ) -> Self {
        debug_assert!(points > 0);
        Self {
            id: Id::new(),
            user_id,
            delta: points,
            kind: PointKind::Earned,
            reason,
            related_photo_id,
            created_at: at,
        }
    }

    pub fn used(user_id: Id, points: i64, reason: String, at: Timestamp) -> Self {
        debug_assert!(points > 0);
        Self {
            id: Id::new(),
            user_id,
            // Stored negated so that balances are plain signed sums.
            delta: -points,
            kind: PointKind::Used,
            reason,
            related_photo_id: None,
            created_at: at,
        }
    }

    pub fn absolute_points(&self) -> i64 {
        self.delta.abs()
    }
}
