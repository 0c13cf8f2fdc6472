use crate::entities::*;

mod add_photo;
mod credit_points;
mod debit_points;
mod error;
mod exchange_reward;
mod pin_queries;
mod point_queries;
mod policy;
mod redeem_pin;
mod register_marker;
mod remove_marker;
mod verification_status;
mod verify_photo;

#[cfg(test)]
pub mod tests;

type Result<T> = std::result::Result<T, Error>;

pub use self::{
    add_photo::*, credit_points::*, debit_points::*, error::Error, exchange_reward::*,
    pin_queries::*, point_queries::*, policy::*, redeem_pin::*, register_marker::*,
    remove_marker::*, verification_status::*, verify_photo::*,
};

mod prelude {
    pub use super::error::Error;
    pub type Result<T> = std::result::Result<T, Error>;
    pub use crate::{entities::*, gateways::*, repositories::*};
}
use self::prelude::*;

pub fn get_marker<R: MarkerRepo>(repo: &R, id: &Id) -> Result<Marker> {
    Ok(repo.get_marker(id)?)
}

pub fn get_user<R: UserRepo>(repo: &R, id: &Id) -> Result<User> {
    Ok(repo.get_user(id)?)
}

pub fn active_markers<R: MarkerRepo>(repo: &R) -> Result<Vec<Marker>> {
    Ok(repo.all_active_markers()?)
}

pub fn markers_reported_by<R: MarkerRepo>(repo: &R, user_id: &Id) -> Result<Vec<Marker>> {
    Ok(repo.markers_by_reporter(user_id)?)
}

pub fn rewards_of_user<R: RewardRepo>(repo: &R, user_id: &Id) -> Result<Vec<Reward>> {
    Ok(repo.rewards_by_user(user_id)?)
}

pub fn rewards_of_user_by_status<R: RewardRepo>(
    repo: &R,
    user_id: &Id,
    status: RewardStatus,
) -> Result<Vec<Reward>> {
    Ok(repo.rewards_by_user_and_status(user_id, status)?)
}
