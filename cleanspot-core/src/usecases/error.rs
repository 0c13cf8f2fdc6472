use crate::repositories;
use cleanspot_entities::pin::PinCodeParseError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("The points amount must be positive")]
    InvalidPoints,
    #[error("The reward type must not be empty")]
    RewardType,
    #[error("Invalid calendar month")]
    Month,
    #[error("This is not allowed")]
    Forbidden,
    #[error("Insufficient point balance: available {available}, requested {requested}")]
    InsufficientBalance { available: i64, requested: i64 },
    #[error("Could not generate a unique pin code within {attempts} attempts")]
    CodeGenerationExhausted { attempts: u32 },
    #[error("Invalid pin code")]
    InvalidCode,
    #[error("The pin code has already been used")]
    AlreadyUsed,
    #[error("The pin code has expired")]
    Expired,
    #[error(transparent)]
    Repo(#[from] repositories::Error),
}

impl From<PinCodeParseError> for Error {
    fn from(_: PinCodeParseError) -> Self {
        Self::InvalidCode
    }
}
