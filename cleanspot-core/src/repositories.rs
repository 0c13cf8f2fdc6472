// Low-level database access traits.
// Each repository is responsible for a single entity and
// its relationships. Related entities are only referenced
// by their id and never modified or loaded by another
// repository.

use crate::entities::*;
use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("The requested object could not be found")]
    NotFound,
    #[error("The object already exists")]
    AlreadyExists,
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

type Result<T> = std::result::Result<T, Error>;

#[derive(Clone, Debug, Copy, Default, PartialEq, Eq, Hash)]
pub struct Pagination {
    pub offset: Option<u64>,
    pub limit: Option<u64>,
}

pub trait UserRepo {
    fn create_user(&self, user: &User) -> Result<()>;
    fn update_user(&self, user: &User) -> Result<()>;

    fn get_user(&self, id: &Id) -> Result<User>;
    fn try_get_user(&self, id: &Id) -> Result<Option<User>>;

    fn count_users(&self) -> Result<usize>;
}

pub trait MarkerRepo {
    fn create_marker(&self, marker: &Marker) -> Result<()>;
    fn update_marker(&self, marker: &Marker) -> Result<()>;

    fn get_marker(&self, id: &Id) -> Result<Marker>;

    fn all_active_markers(&self) -> Result<Vec<Marker>>;
    fn markers_by_reporter(&self, user_id: &Id) -> Result<Vec<Marker>>;
    fn count_markers(&self) -> Result<usize>;
}

pub trait PhotoRepo {
    fn create_photo(&self, photo: &Photo) -> Result<()>;
    fn update_photo(&self, photo: &Photo) -> Result<()>;

    fn get_photo(&self, id: &Id) -> Result<Photo>;

    // Ordered by insertion, oldest first: index 0 is the
    // representative photo of its kind.
    fn photos_of_marker(&self, marker_id: &Id) -> Result<Vec<Photo>>;
    fn photos_of_marker_by_kind(&self, marker_id: &Id, kind: PhotoKind) -> Result<Vec<Photo>>;

    fn delete_photos_of_marker(&self, marker_id: &Id) -> Result<usize>;
}

// The ledger is append-only: entries are immutable once created and
// there is deliberately no update or delete operation.
pub trait PointHistoryRepo {
    fn append_point_entry(&self, entry: &PointHistory) -> Result<()>;

    // Newest first
    fn point_entries_by_user(&self, user_id: &Id) -> Result<Vec<PointHistory>>;
    fn point_entries_by_user_and_kind(
        &self,
        user_id: &Id,
        kind: PointKind,
    ) -> Result<Vec<PointHistory>>;
    fn point_entries_by_user_between(
        &self,
        user_id: &Id,
        since: Timestamp,
        until: Timestamp,
    ) -> Result<Vec<PointHistory>>;
    fn recent_point_entries(&self, user_id: &Id, limit: u64) -> Result<Vec<PointHistory>>;

    /// Signed sum over all entries of a user, i.e. the authoritative
    /// balance derived by replaying the ledger.
    fn sum_point_deltas(&self, user_id: &Id) -> Result<i64>;
}

pub trait RewardRepo {
    fn create_reward(&self, reward: &Reward) -> Result<()>;
    fn delete_reward(&self, id: &Id) -> Result<()>;

    fn get_reward(&self, id: &Id) -> Result<Reward>;

    // Newest first
    fn rewards_by_user(&self, user_id: &Id) -> Result<Vec<Reward>>;
    fn rewards_by_user_and_status(
        &self,
        user_id: &Id,
        status: RewardStatus,
    ) -> Result<Vec<Reward>>;
    fn rewards_by_status(&self, status: RewardStatus) -> Result<Vec<Reward>>;
    fn rewards_between(&self, since: Timestamp, until: Timestamp) -> Result<Vec<Reward>>;

    /// Sum of `points_used` over a user's approved rewards.
    fn total_points_used_by_user(&self, user_id: &Id) -> Result<i64>;
}

pub trait RewardPinRepo {
    /// Fails with [`Error::AlreadyExists`] if the code or the reward
    /// reference collides with an existing pin.
    fn create_pin(&self, pin: &RewardPin) -> Result<()>;
    fn update_pin(&self, pin: &RewardPin) -> Result<()>;

    fn try_get_pin_by_code(&self, code: &PinCode) -> Result<Option<RewardPin>>;
    fn try_get_pin_by_reward(&self, reward_id: &Id) -> Result<Option<RewardPin>>;

    // Newest first, joined over the owning rewards
    fn pins_by_user(&self, user_id: &Id) -> Result<Vec<RewardPin>>;
    fn count_pins_by_user(&self, user_id: &Id) -> Result<u64>;
}
