// NOTE:
// All timestamps with the `_at` postfix are stored
// as unix timestamp in seconds.

use anyhow::anyhow;
use diesel::{
    self,
    prelude::*,
    result::{DatabaseErrorKind, Error as DieselError},
};

use cleanspot_core::{
    entities::*,
    repositories::{self as repo, *},
};

use super::*;

mod marker;
mod photo;
mod point_history;
mod reward;
mod reward_pin;
mod user;

type Result<T> = std::result::Result<T, repo::Error>;

pub fn from_diesel_err(err: DieselError) -> repo::Error {
    match err {
        DieselError::NotFound => repo::Error::NotFound,
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
            repo::Error::AlreadyExists
        }
        _ => repo::Error::Other(err.into()),
    }
}

fn load_marker_status(status: i16) -> Result<MarkerStatus> {
    MarkerStatus::try_from(status)
        .map_err(|_| anyhow!("Invalid marker status: {}", status).into())
}

fn load_photo_kind(kind: i16) -> Result<PhotoKind> {
    PhotoKind::try_from(kind).map_err(|_| anyhow!("Invalid photo kind: {}", kind).into())
}

fn load_verification_status(status: i16) -> Result<VerificationStatus> {
    VerificationStatus::try_from(status)
        .map_err(|_| anyhow!("Invalid verification status: {}", status).into())
}

fn load_point_kind(kind: i16) -> Result<PointKind> {
    PointKind::try_from(kind).map_err(|_| anyhow!("Invalid point kind: {}", kind).into())
}

fn load_reward_status(status: i16) -> Result<RewardStatus> {
    RewardStatus::try_from(status)
        .map_err(|_| anyhow!("Invalid reward status: {}", status).into())
}

fn load_marker(entity: models::MarkerEntity) -> Result<Marker> {
    let models::MarkerEntity {
        id,
        lat,
        lng,
        description,
        address,
        status,
        reported_by,
        created_at,
        updated_at,
    } = entity;
    Ok(Marker {
        id: id.into(),
        coordinates: Coordinates { lat, lng },
        description,
        address,
        status: load_marker_status(status)?,
        reported_by: reported_by.into(),
        created_at: Timestamp::from_seconds(created_at),
        updated_at: Timestamp::from_seconds(updated_at),
    })
}

fn load_photo(entity: models::PhotoEntity) -> Result<Photo> {
    let models::PhotoEntity {
        rowid: _,
        id,
        marker_id,
        uploader_id,
        image_ref,
        kind,
        verification,
        judge_output,
        confidence,
        verified_at,
        created_at,
    } = entity;
    Ok(Photo {
        id: id.into(),
        marker_id: marker_id.into(),
        uploader_id: uploader_id.into(),
        image_ref,
        kind: load_photo_kind(kind)?,
        verification: load_verification_status(verification)?,
        judge_output,
        confidence,
        verified_at: verified_at.map(Timestamp::from_seconds),
        created_at: Timestamp::from_seconds(created_at),
    })
}

fn load_point_entry(entity: models::PointHistoryEntity) -> Result<PointHistory> {
    let models::PointHistoryEntity {
        rowid: _,
        id,
        user_id,
        delta,
        kind,
        reason,
        related_photo_id,
        created_at,
    } = entity;
    Ok(PointHistory {
        id: id.into(),
        user_id: user_id.into(),
        delta,
        kind: load_point_kind(kind)?,
        reason,
        related_photo_id: related_photo_id.map(Into::into),
        created_at: Timestamp::from_seconds(created_at),
    })
}

fn load_reward(entity: models::RewardEntity) -> Result<Reward> {
    let models::RewardEntity {
        id,
        user_id,
        points_used,
        reward_type,
        status,
        created_at,
        processed_at,
    } = entity;
    Ok(Reward {
        id: id.into(),
        user_id: user_id.into(),
        points_used,
        reward_type,
        status: load_reward_status(status)?,
        created_at: Timestamp::from_seconds(created_at),
        processed_at: processed_at.map(Timestamp::from_seconds),
    })
}

fn load_pin(entity: models::RewardPinEntity) -> Result<RewardPin> {
    let models::RewardPinEntity {
        id,
        reward_id,
        code,
        issued_at,
        expires_at,
        used,
        used_at,
    } = entity;
    let code = code
        .parse::<PinCode>()
        .map_err(|_| anyhow!("Invalid pin code in database: {}", code))?;
    Ok(RewardPin {
        id: id.into(),
        reward_id: reward_id.into(),
        code,
        issued_at: Timestamp::from_seconds(issued_at),
        expires_at: Timestamp::from_seconds(expires_at),
        used,
        used_at: used_at.map(Timestamp::from_seconds),
    })
}
