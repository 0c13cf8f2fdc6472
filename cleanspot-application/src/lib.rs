#[macro_use]
extern crate log;

mod exchange_reward;
mod queries;
mod redeem_pin;
mod remove_marker;
mod upload_photo;
mod verify_marker;

pub mod prelude {
    pub use super::{
        exchange_reward::*, queries::*, redeem_pin::*, remove_marker::*, upload_photo::*,
        verify_marker::*,
    };
}

pub mod error;

pub type Result<T> = std::result::Result<T, error::AppError>;

pub(crate) use cleanspot_core::{entities::*, repositories::*, usecases};

#[cfg(test)]
pub(crate) mod tests;

pub(crate) mod sqlite {
    pub use cleanspot_db_sqlite::Connections;
}
