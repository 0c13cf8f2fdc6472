#![allow(clippy::extra_unused_lifetimes)]

// NOTE:
// All timestamps with the `_at` postfix are stored
// as unix timestamp in seconds.

use super::schema::*;

use cleanspot_core::entities::*;

#[derive(Insertable, AsChangeset)]
#[diesel(table_name = users)]
pub struct NewUser<'a> {
    pub id: &'a str,
    pub username: &'a str,
    pub points: i64,
    pub created_at: i64,
}

impl<'a> From<&'a User> for NewUser<'a> {
    fn from(from: &'a User) -> Self {
        let User {
            id,
            username,
            points,
            created_at,
        } = from;
        Self {
            id: id.as_str(),
            username,
            points: *points,
            created_at: created_at.into_seconds(),
        }
    }
}

#[derive(Queryable)]
pub struct UserEntity {
    pub id: String,
    pub username: String,
    pub points: i64,
    pub created_at: i64,
}

impl From<UserEntity> for User {
    fn from(from: UserEntity) -> Self {
        let UserEntity {
            id,
            username,
            points,
            created_at,
        } = from;
        Self {
            id: id.into(),
            username,
            points,
            created_at: Timestamp::from_seconds(created_at),
        }
    }
}

#[derive(Insertable, AsChangeset)]
#[diesel(table_name = markers)]
#[diesel(treat_none_as_null = true)]
pub struct NewMarker<'a> {
    pub id: &'a str,
    pub lat: f64,
    pub lng: f64,
    pub description: &'a str,
    pub address: Option<&'a str>,
    pub status: i16,
    pub reported_by: &'a str,
    pub created_at: i64,
    pub updated_at: i64,
}

impl<'a> From<&'a Marker> for NewMarker<'a> {
    fn from(from: &'a Marker) -> Self {
        let Marker {
            id,
            coordinates,
            description,
            address,
            status,
            reported_by,
            created_at,
            updated_at,
        } = from;
        Self {
            id: id.as_str(),
            lat: coordinates.lat,
            lng: coordinates.lng,
            description,
            address: address.as_deref(),
            status: (*status).into(),
            reported_by: reported_by.as_str(),
            created_at: created_at.into_seconds(),
            updated_at: updated_at.into_seconds(),
        }
    }
}

#[derive(Queryable)]
pub struct MarkerEntity {
    pub id: String,
    pub lat: f64,
    pub lng: f64,
    pub description: String,
    pub address: Option<String>,
    pub status: i16,
    pub reported_by: String,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Insertable, AsChangeset)]
#[diesel(table_name = photos)]
#[diesel(treat_none_as_null = true)]
pub struct NewPhoto<'a> {
    pub id: &'a str,
    pub marker_id: &'a str,
    pub uploader_id: &'a str,
    pub image_ref: &'a str,
    pub kind: i16,
    pub verification: i16,
    pub judge_output: Option<&'a str>,
    pub confidence: Option<f64>,
    pub verified_at: Option<i64>,
    pub created_at: i64,
}

impl<'a> From<&'a Photo> for NewPhoto<'a> {
    fn from(from: &'a Photo) -> Self {
        let Photo {
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
        } = from;
        Self {
            id: id.as_str(),
            marker_id: marker_id.as_str(),
            uploader_id: uploader_id.as_str(),
            image_ref,
            kind: (*kind).into(),
            verification: (*verification).into(),
            judge_output: judge_output.as_deref(),
            confidence: *confidence,
            verified_at: verified_at.map(Timestamp::into_seconds),
            created_at: created_at.into_seconds(),
        }
    }
}

#[derive(Queryable)]
pub struct PhotoEntity {
    pub rowid: i64,
    pub id: String,
    pub marker_id: String,
    pub uploader_id: String,
    pub image_ref: String,
    pub kind: i16,
    pub verification: i16,
    pub judge_output: Option<String>,
    pub confidence: Option<f64>,
    pub verified_at: Option<i64>,
    pub created_at: i64,
}

#[derive(Insertable)]
#[diesel(table_name = point_history)]
pub struct NewPointHistory<'a> {
    pub id: &'a str,
    pub user_id: &'a str,
    pub delta: i64,
    pub kind: i16,
    pub reason: &'a str,
    pub related_photo_id: Option<&'a str>,
    pub created_at: i64,
}

impl<'a> From<&'a PointHistory> for NewPointHistory<'a> {
    fn from(from: &'a PointHistory) -> Self {
        let PointHistory {
            id,
            user_id,
            delta,
            kind,
            reason,
            related_photo_id,
            created_at,
        } = from;
        Self {
            id: id.as_str(),
            user_id: user_id.as_str(),
            delta: *delta,
            kind: (*kind).into(),
            reason,
            related_photo_id: related_photo_id.as_ref().map(Id::as_str),
            created_at: created_at.into_seconds(),
        }
    }
}

#[derive(Queryable)]
pub struct PointHistoryEntity {
    pub rowid: i64,
    pub id: String,
    pub user_id: String,
    pub delta: i64,
    pub kind: i16,
    pub reason: String,
    pub related_photo_id: Option<String>,
    pub created_at: i64,
}

#[derive(Insertable)]
#[diesel(table_name = rewards)]
pub struct NewReward<'a> {
    pub id: &'a str,
    pub user_id: &'a str,
    pub points_used: i64,
    pub reward_type: &'a str,
    pub status: i16,
    pub created_at: i64,
    pub processed_at: Option<i64>,
}

impl<'a> From<&'a Reward> for NewReward<'a> {
    fn from(from: &'a Reward) -> Self {
        let Reward {
            id,
            user_id,
            points_used,
            reward_type,
            status,
            created_at,
            processed_at,
        } = from;
        Self {
            id: id.as_str(),
            user_id: user_id.as_str(),
            points_used: *points_used,
            reward_type,
            status: (*status).into(),
            created_at: created_at.into_seconds(),
            processed_at: processed_at.map(Timestamp::into_seconds),
        }
    }
}

#[derive(Queryable)]
pub struct RewardEntity {
    pub id: String,
    pub user_id: String,
    pub points_used: i64,
    pub reward_type: String,
    pub status: i16,
    pub created_at: i64,
    pub processed_at: Option<i64>,
}

#[derive(Insertable, AsChangeset)]
#[diesel(table_name = reward_pins)]
#[diesel(treat_none_as_null = true)]
pub struct NewRewardPin<'a> {
    pub id: &'a str,
    pub reward_id: &'a str,
    pub code: &'a str,
    pub issued_at: i64,
    pub expires_at: i64,
    pub used: bool,
    pub used_at: Option<i64>,
}

impl<'a> From<&'a RewardPin> for NewRewardPin<'a> {
    fn from(from: &'a RewardPin) -> Self {
        let RewardPin {
            id,
            reward_id,
            code,
            issued_at,
            expires_at,
            used,
            used_at,
        } = from;
        Self {
            id: id.as_str(),
            reward_id: reward_id.as_str(),
            code: code.as_str(),
            issued_at: issued_at.into_seconds(),
            expires_at: expires_at.into_seconds(),
            used: *used,
            used_at: used_at.map(Timestamp::into_seconds),
        }
    }
}

#[derive(Queryable)]
pub struct RewardPinEntity {
    pub id: String,
    pub reward_id: String,
    pub code: String,
    pub issued_at: i64,
    pub expires_at: i64,
    pub used: bool,
    pub used_at: Option<i64>,
}
