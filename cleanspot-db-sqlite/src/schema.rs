///////////////////////////////////////////////////////////////////////
// Users
///////////////////////////////////////////////////////////////////////

table! {
    users (id) {
        id -> Text,
        username -> Text,
        points -> BigInt,
        created_at -> BigInt,
    }
}

///////////////////////////////////////////////////////////////////////
// Markers
///////////////////////////////////////////////////////////////////////

table! {
    markers (id) {
        id -> Text,
        lat -> Double,
        lng -> Double,
        description -> Text,
        address -> Nullable<Text>,
        status -> SmallInt,
        reported_by -> Text,
        created_at -> BigInt,
        updated_at -> BigInt,
    }
}

joinable!(markers -> users (reported_by));

///////////////////////////////////////////////////////////////////////
// Photos
///////////////////////////////////////////////////////////////////////

// The implicit rowid is exposed to give photos a stable insertion
// order: the first photo of a kind is the representative one.
table! {
    photos (rowid) {
        rowid -> BigInt,
        id -> Text,
        marker_id -> Text,
        uploader_id -> Text,
        image_ref -> Text,
        kind -> SmallInt,
        verification -> SmallInt,
        judge_output -> Nullable<Text>,
        confidence -> Nullable<Double>,
        verified_at -> Nullable<BigInt>,
        created_at -> BigInt,
    }
}

joinable!(photos -> markers (marker_id));

///////////////////////////////////////////////////////////////////////
// Point history
///////////////////////////////////////////////////////////////////////

table! {
    point_history (rowid) {
        rowid -> BigInt,
        id -> Text,
        user_id -> Text,
        delta -> BigInt,
        kind -> SmallInt,
        reason -> Text,
        related_photo_id -> Nullable<Text>,
        created_at -> BigInt,
    }
}

joinable!(point_history -> users (user_id));

///////////////////////////////////////////////////////////////////////
// Rewards
///////////////////////////////////////////////////////////////////////

table! {
    rewards (id) {
        id -> Text,
        user_id -> Text,
        points_used -> BigInt,
        reward_type -> Text,
        status -> SmallInt,
        created_at -> BigInt,
        processed_at -> Nullable<BigInt>,
    }
}

joinable!(rewards -> users (user_id));

table! {
    reward_pins (id) {
        id -> Text,
        reward_id -> Text,
        code -> Text,
        issued_at -> BigInt,
        expires_at -> BigInt,
        used -> Bool,
        used_at -> Nullable<BigInt>,
    }
}

joinable!(reward_pins -> rewards (reward_id));

allow_tables_to_appear_in_same_query!(users, markers, photos, point_history, rewards, reward_pins);
