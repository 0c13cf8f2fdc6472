use num_derive::{FromPrimitive, ToPrimitive};
use num_traits::*;
use strum::EnumString;
use thiserror::Error;

use crate::{id::*, time::*};

pub type RewardStatusPrimitive = i16;

/// Review state of a points-to-voucher exchange.
///
/// The immediate-exchange flow creates rewards already `Approved`;
/// `Pending` and `Rejected` remain for interface compatibility with
/// deployments that still run a manual review queue.
#[rustfmt::skip]
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromPrimitive, ToPrimitive, EnumString)]
#[strum(ascii_case_insensitive)]
pub enum RewardStatus {
    Pending  = 0,
    Approved = 1,
    Rejected = 2,
}

#[derive(Debug, Error)]
#[error("Invalid reward status primitive: {0}")]
pub struct InvalidRewardStatusPrimitive(RewardStatusPrimitive);

impl TryFrom<RewardStatusPrimitive> for RewardStatus {
    type Error = InvalidRewardStatusPrimitive;
    fn try_from(from: RewardStatusPrimitive) -> Result<Self, Self::Error> {
        Self::from_i16(from).ok_or(InvalidRewardStatusPrimitive(from))
    }
}

impl From<RewardStatus> for RewardStatusPrimitive {
    fn from(from: RewardStatus) -> Self {
        from.to_i16().expect("Reward status primitive")
    }
}

/// An approved exchange of points for a voucher.
#[rustfmt::skip]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reward {
    pub id           : Id,
    pub user_id      : Id,
    pub points_used  : i64,
    pub reward_type  : String,
    pub status       : RewardStatus,
    pub created_at   : Timestamp,
    pub processed_at : Option<Timestamp>,
}

impl Reward {
    /// Creates a reward in the immediate-exchange flow: approved on the
    /// spot, `processed_at` set to creation time.
    pub fn approved(user_id: Id, points_used: i64, reward_type: String, at: Timestamp) -> Self {
        Self {
            id: Id::new(),
            user_id,
            points_used,
            reward_type,
            status: RewardStatus::Approved,
            created_at: at,
            processed_at: Some(at),
        }
    }

    pub fn is_approved(&self) -> bool {
        self.status == RewardStatus::Approved
    }
}
