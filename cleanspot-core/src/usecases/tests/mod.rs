use std::cell::RefCell;

use super::prelude::*;
use crate::{
    gateways::pin_source::PinCodeSource,
    repositories::Error as RepoError,
    usecases::{self, ExchangeOutcome, ExchangeRequest, PointPolicy, VerdictApplication},
};

type Result<T> = std::result::Result<T, RepoError>;

/// In-memory repository for use-case tests.
#[derive(Debug, Default)]
pub struct MockDb {
    pub users: RefCell<Vec<User>>,
    pub markers: RefCell<Vec<Marker>>,
    pub photos: RefCell<Vec<Photo>>,
    pub point_entries: RefCell<Vec<PointHistory>>,
    pub rewards: RefCell<Vec<Reward>>,
    pub pins: RefCell<Vec<RewardPin>>,
}

impl UserRepo for MockDb {
    fn create_user(&self, user: &User) -> Result<()> {
        if self.users.borrow().iter().any(|u| u.id == user.id) {
            return Err(RepoError::AlreadyExists);
        }
        self.users.borrow_mut().push(user.clone());
        Ok(())
    }
    fn update_user(&self, user: &User) -> Result<()> {
        let mut users = self.users.borrow_mut();
        let existing = users
            .iter_mut()
            .find(|u| u.id == user.id)
            .ok_or(RepoError::NotFound)?;
        *existing = user.clone();
        Ok(())
    }
    fn get_user(&self, id: &Id) -> Result<User> {
        self.try_get_user(id)?.ok_or(RepoError::NotFound)
    }
    fn try_get_user(&self, id: &Id) -> Result<Option<User>> {
        Ok(self.users.borrow().iter().find(|u| u.id == *id).cloned())
    }
    fn count_users(&self) -> Result<usize> {
        Ok(self.users.borrow().len())
    }
}

impl MarkerRepo for MockDb {
    fn create_marker(&self, marker: &Marker) -> Result<()> {
        self.markers.borrow_mut().push(marker.clone());
        Ok(())
    }
    fn update_marker(&self, marker: &Marker) -> Result<()> {
        let mut markers = self.markers.borrow_mut();
        let existing = markers
            .iter_mut()
            .find(|m| m.id == marker.id)
            .ok_or(RepoError::NotFound)?;
        *existing = marker.clone();
        Ok(())
    }
    fn get_marker(&self, id: &Id) -> Result<Marker> {
        self.markers
            .borrow()
            .iter()
            .find(|m| m.id == *id)
            .cloned()
            .ok_or(RepoError::NotFound)
    }
    fn all_active_markers(&self) -> Result<Vec<Marker>> {
        Ok(self
            .markers
            .borrow()
            .iter()
            .filter(|m| m.is_active())
            .cloned()
            .collect())
    }
    fn markers_by_reporter(&self, user_id: &Id) -> Result<Vec<Marker>> {
        Ok(self
            .markers
            .borrow()
            .iter()
            .filter(|m| m.reported_by == *user_id)
            .cloned()
            .collect())
    }
    fn count_markers(&self) -> Result<usize> {
        Ok(self.markers.borrow().len())
    }
}

impl PhotoRepo for MockDb {
    fn create_photo(&self, photo: &Photo) -> Result<()> {
        self.photos.borrow_mut().push(photo.clone());
        Ok(())
    }
    fn update_photo(&self, photo: &Photo) -> Result<()> {
        let mut photos = self.photos.borrow_mut();
        let existing = photos
            .iter_mut()
            .find(|p| p.id == photo.id)
            .ok_or(RepoError::NotFound)?;
        *existing = photo.clone();
        Ok(())
    }
    fn get_photo(&self, id: &Id) -> Result<Photo> {
        self.photos
            .borrow()
            .iter()
            .find(|p| p.id == *id)
            .cloned()
            .ok_or(RepoError::NotFound)
    }
    fn photos_of_marker(&self, marker_id: &Id) -> Result<Vec<Photo>> {
        Ok(self
            .photos
            .borrow()
            .iter()
            .filter(|p| p.marker_id == *marker_id)
            .cloned()
            .collect())
    }
    fn photos_of_marker_by_kind(&self, marker_id: &Id, kind: PhotoKind) -> Result<Vec<Photo>> {
        Ok(self
            .photos_of_marker(marker_id)?
            .into_iter()
            .filter(|p| p.kind == kind)
            .collect())
    }
    fn delete_photos_of_marker(&self, marker_id: &Id) -> Result<usize> {
        let mut photos = self.photos.borrow_mut();
        let before = photos.len();
        photos.retain(|p| p.marker_id != *marker_id);
        Ok(before - photos.len())
    }
}

impl PointHistoryRepo for MockDb {
    fn append_point_entry(&self, entry: &PointHistory) -> Result<()> {
        self.point_entries.borrow_mut().push(entry.clone());
        Ok(())
    }
    fn point_entries_by_user(&self, user_id: &Id) -> Result<Vec<PointHistory>> {
        let mut entries: Vec<_> = self
            .point_entries
            .borrow()
            .iter()
            .filter(|e| e.user_id == *user_id)
            .cloned()
            .collect();
        entries.reverse();
        Ok(entries)
    }
    fn point_entries_by_user_and_kind(
        &self,
        user_id: &Id,
        kind: PointKind,
    ) -> Result<Vec<PointHistory>> {
        Ok(self
            .point_entries_by_user(user_id)?
            .into_iter()
            .filter(|e| e.kind == kind)
            .collect())
    }
    fn point_entries_by_user_between(
        &self,
        user_id: &Id,
        since: Timestamp,
        until: Timestamp,
    ) -> Result<Vec<PointHistory>> {
        Ok(self
            .point_entries_by_user(user_id)?
            .into_iter()
            .filter(|e| e.created_at >= since && e.created_at < until)
            .collect())
    }
    fn recent_point_entries(&self, user_id: &Id, limit: u64) -> Result<Vec<PointHistory>> {
        Ok(self
            .point_entries_by_user(user_id)?
            .into_iter()
            .take(limit as usize)
            .collect())
    }
    fn sum_point_deltas(&self, user_id: &Id) -> Result<i64> {
        Ok(self
            .point_entries
            .borrow()
            .iter()
            .filter(|e| e.user_id == *user_id)
            .map(|e| e.delta)
            .sum())
    }
}

impl RewardRepo for MockDb {
    fn create_reward(&self, reward: &Reward) -> Result<()> {
        self.rewards.borrow_mut().push(reward.clone());
        Ok(())
    }
    fn delete_reward(&self, id: &Id) -> Result<()> {
        let mut rewards = self.rewards.borrow_mut();
        let before = rewards.len();
        rewards.retain(|r| r.id != *id);
        if rewards.len() == before {
            return Err(RepoError::NotFound);
        }
        Ok(())
    }
    fn get_reward(&self, id: &Id) -> Result<Reward> {
        self.rewards
            .borrow()
            .iter()
            .find(|r| r.id == *id)
            .cloned()
            .ok_or(RepoError::NotFound)
    }
    fn rewards_by_user(&self, user_id: &Id) -> Result<Vec<Reward>> {
        let mut rewards: Vec<_> = self
            .rewards
            .borrow()
            .iter()
            .filter(|r| r.user_id == *user_id)
            .cloned()
            .collect();
        rewards.reverse();
        Ok(rewards)
    }
    fn rewards_by_user_and_status(
        &self,
        user_id: &Id,
        status: RewardStatus,
    ) -> Result<Vec<Reward>> {
        Ok(self
            .rewards_by_user(user_id)?
            .into_iter()
            .filter(|r| r.status == status)
            .collect())
    }
    fn rewards_by_status(&self, status: RewardStatus) -> Result<Vec<Reward>> {
        Ok(self
            .rewards
            .borrow()
            .iter()
            .filter(|r| r.status == status)
            .cloned()
            .collect())
    }
    fn rewards_between(&self, since: Timestamp, until: Timestamp) -> Result<Vec<Reward>> {
        Ok(self
            .rewards
            .borrow()
            .iter()
            .filter(|r| r.created_at >= since && r.created_at < until)
            .cloned()
            .collect())
    }
    fn total_points_used_by_user(&self, user_id: &Id) -> Result<i64> {
        Ok(self
            .rewards_by_user_and_status(user_id, RewardStatus::Approved)?
            .iter()
            .map(|r| r.points_used)
            .sum())
    }
}

impl RewardPinRepo for MockDb {
    fn create_pin(&self, pin: &RewardPin) -> Result<()> {
        let mut pins = self.pins.borrow_mut();
        if pins
            .iter()
            .any(|p| p.code == pin.code || p.reward_id == pin.reward_id)
        {
            return Err(RepoError::AlreadyExists);
        }
        pins.push(pin.clone());
        Ok(())
    }
    fn update_pin(&self, pin: &RewardPin) -> Result<()> {
        let mut pins = self.pins.borrow_mut();
        let existing = pins
            .iter_mut()
            .find(|p| p.id == pin.id)
            .ok_or(RepoError::NotFound)?;
        *existing = pin.clone();
        Ok(())
    }
    fn try_get_pin_by_code(&self, code: &PinCode) -> Result<Option<RewardPin>> {
        Ok(self.pins.borrow().iter().find(|p| p.code == *code).cloned())
    }
    fn try_get_pin_by_reward(&self, reward_id: &Id) -> Result<Option<RewardPin>> {
        Ok(self
            .pins
            .borrow()
            .iter()
            .find(|p| p.reward_id == *reward_id)
            .cloned())
    }
    fn pins_by_user(&self, user_id: &Id) -> Result<Vec<RewardPin>> {
        let rewards = self.rewards_by_user(user_id)?;
        Ok(self
            .pins
            .borrow()
            .iter()
            .filter(|p| rewards.iter().any(|r| r.id == p.reward_id))
            .cloned()
            .collect())
    }
    fn count_pins_by_user(&self, user_id: &Id) -> Result<u64> {
        Ok(self.pins_by_user(user_id)?.len() as u64)
    }
}

/// Hands out a fixed sequence of codes and repeats the last one forever.
#[derive(Debug)]
pub struct ScriptedPinSource {
    codes: RefCell<Vec<PinCode>>,
}

impl ScriptedPinSource {
    pub fn new(mut codes: Vec<PinCode>) -> Self {
        codes.reverse();
        Self {
            codes: RefCell::new(codes),
        }
    }
}

impl PinCodeSource for ScriptedPinSource {
    fn next_code(&self) -> PinCode {
        let mut codes = self.codes.borrow_mut();
        if codes.len() > 1 {
            codes.pop().unwrap()
        } else {
            codes.last().expect("at least one scripted code").clone()
        }
    }
}

pub fn new_user(points: i64) -> User {
    User {
        id: Id::new(),
        username: "tester".into(),
        points,
        created_at: Timestamp::now(),
    }
}

pub fn seed_balance(db: &MockDb, user: &User) {
    if user.points > 0 {
        db.append_point_entry(&PointHistory::earned(
            user.id.clone(),
            user.points,
            "seed".into(),
            None,
            Timestamp::now(),
        ))
        .unwrap();
    }
}

fn approved_verdict(confidence: f64) -> Verdict {
    Verdict {
        result: VerdictResult::Approved,
        confidence: Some(confidence),
        reason: "visible improvement".into(),
        raw: "{\"result\":\"APPROVED\"}".into(),
    }
}

#[test]
fn exchange_issues_reward_and_debits_ledger() {
    let db = MockDb::default();
    let user = new_user(4000);
    db.create_user(&user).unwrap();
    seed_balance(&db, &user);

    let pins = ScriptedPinSource::new(vec![PinCode::from_groups([1, 2, 3, 4])]);
    let outcome = usecases::exchange_reward(
        &db,
        &pins,
        ExchangeRequest {
            user_id: user.id.clone(),
            points: 3000,
            reward_type: "THREE_THOUSAND".into(),
        },
    )
    .unwrap();

    let issued = match outcome {
        ExchangeOutcome::Issued(issued) => issued,
        ExchangeOutcome::Compensated { .. } => panic!("expected issued reward"),
    };
    assert!(issued.reward.is_approved());
    assert_eq!(issued.pin.code.as_str(), "0001-0002-0003-0004");
    assert_eq!(db.sum_point_deltas(&user.id).unwrap(), 1000);
    assert_eq!(db.get_user(&user.id).unwrap().points, 1000);
}

#[test]
fn exchange_fails_on_insufficient_balance() {
    let db = MockDb::default();
    let user = new_user(4000);
    db.create_user(&user).unwrap();
    seed_balance(&db, &user);

    let pins = ScriptedPinSource::new(vec![PinCode::from_groups([1, 2, 3, 4])]);
    let err = usecases::exchange_reward(
        &db,
        &pins,
        ExchangeRequest {
            user_id: user.id.clone(),
            points: 5000,
            reward_type: "FIVE_THOUSAND".into(),
        },
    )
    .unwrap_err();

    assert!(matches!(
        err,
        Error::InsufficientBalance {
            available: 4000,
            requested: 5000
        }
    ));
    assert!(db.rewards.borrow().is_empty());
    assert!(db.pins.borrow().is_empty());
    assert_eq!(db.get_user(&user.id).unwrap().points, 4000);
}

#[test]
fn exchange_validates_input() {
    let db = MockDb::default();
    let user = new_user(100);
    db.create_user(&user).unwrap();
    seed_balance(&db, &user);
    let pins = ScriptedPinSource::new(vec![PinCode::from_groups([1, 2, 3, 4])]);

    let err = usecases::exchange_reward(
        &db,
        &pins,
        ExchangeRequest {
            user_id: user.id.clone(),
            points: 0,
            reward_type: "X".into(),
        },
    )
    .unwrap_err();
    assert!(matches!(err, Error::InvalidPoints));

    let err = usecases::exchange_reward(
        &db,
        &pins,
        ExchangeRequest {
            user_id: user.id.clone(),
            points: 50,
            reward_type: "  ".into(),
        },
    )
    .unwrap_err();
    assert!(matches!(err, Error::RewardType));
}

#[test]
fn exchange_compensates_when_codes_exhaust() {
    let db = MockDb::default();
    let user = new_user(4000);
    db.create_user(&user).unwrap();
    seed_balance(&db, &user);

    // Occupy the only code the source will ever produce.
    let colliding = PinCode::from_groups([9, 9, 9, 9]);
    let other_reward = Reward::approved(Id::new(), 1, "OTHER".into(), Timestamp::now());
    db.create_reward(&other_reward).unwrap();
    db.create_pin(&RewardPin::issue(
        other_reward.id.clone(),
        colliding.clone(),
        Timestamp::now(),
    ))
    .unwrap();

    let pins = ScriptedPinSource::new(vec![colliding]);
    let outcome = usecases::exchange_reward(
        &db,
        &pins,
        ExchangeRequest {
            user_id: user.id.clone(),
            points: 3000,
            reward_type: "THREE_THOUSAND".into(),
        },
    )
    .unwrap();

    assert!(matches!(
        outcome,
        ExchangeOutcome::Compensated { attempts: 10 }
    ));
    // Balance unchanged, no reward left behind for the user.
    assert_eq!(db.get_user(&user.id).unwrap().points, 4000);
    assert_eq!(db.sum_point_deltas(&user.id).unwrap(), 4000);
    assert!(db.rewards_by_user(&user.id).unwrap().is_empty());
    // The ledger keeps the audit trail of the failed exchange.
    let entries = db.point_entries_by_user(&user.id).unwrap();
    assert_eq!(entries.len(), 3);
    assert_eq!(entries[0].delta, 3000);
    assert_eq!(entries[1].delta, -3000);
}

#[test]
fn verdict_application_is_idempotent() {
    let db = MockDb::default();
    let reporter = new_user(0);
    let cleaner = new_user(0);
    db.create_user(&reporter).unwrap();
    db.create_user(&cleaner).unwrap();

    let marker = usecases::register_marker(
        &db,
        usecases::NewMarker {
            lat: 37.56,
            lng: 126.97,
            description: "overflowing bin".into(),
            address: None,
            reported_by: reporter.id.clone(),
        },
    )
    .unwrap();
    let after = usecases::add_photo(
        &db,
        usecases::NewPhoto {
            marker_id: marker.id.clone(),
            uploader_id: cleaner.id.clone(),
            image_ref: "images/after.jpg".into(),
            kind: PhotoKind::After,
        },
    )
    .unwrap();

    let verdict = approved_verdict(0.85);
    let first = usecases::apply_photo_verdict(&db, &after.id, &verdict).unwrap();
    let VerdictApplication::Applied {
        photo,
        marker_cleaned,
    } = first
    else {
        panic!("expected applied verdict");
    };
    assert!(photo.is_approved());
    assert!(marker_cleaned);
    assert!(db.get_marker(&marker.id).unwrap().is_cleaned());

    // A redundant delivery of the same event converges to a no-op.
    let second = usecases::apply_photo_verdict(&db, &after.id, &verdict).unwrap();
    assert_eq!(second, VerdictApplication::AlreadyVerified);
}

#[test]
fn credit_applies_confidence_bonus() {
    let db = MockDb::default();
    let user = new_user(0);
    db.create_user(&user).unwrap();
    let policy = PointPolicy::default();

    let entry =
        usecases::credit_cleanup_points(&db, &user.id, &Id::new(), Some(0.85), &policy).unwrap();
    assert_eq!(entry.delta, 120);
    assert_eq!(db.get_user(&user.id).unwrap().points, 120);

    let entry =
        usecases::credit_cleanup_points(&db, &user.id, &Id::new(), Some(0.4), &policy).unwrap();
    assert_eq!(entry.delta, 100);
    assert_eq!(db.get_user(&user.id).unwrap().points, 220);
    assert_eq!(db.sum_point_deltas(&user.id).unwrap(), 220);
}

#[test]
fn redeem_pin_round_trip() {
    let db = MockDb::default();
    let user = new_user(0);
    db.create_user(&user).unwrap();
    let reward = Reward::approved(user.id.clone(), 100, "HUNDRED".into(), Timestamp::now());
    db.create_reward(&reward).unwrap();
    let code = PinCode::from_groups([1234, 5678, 9012, 3456]);
    db.create_pin(&RewardPin::issue(
        reward.id.clone(),
        code.clone(),
        Timestamp::now(),
    ))
    .unwrap();

    let redeemed = usecases::redeem_pin(&db, code.as_str()).unwrap();
    assert!(redeemed.used);
    assert!(redeemed.used_at.is_some());

    let err = usecases::redeem_pin(&db, code.as_str()).unwrap_err();
    assert!(matches!(err, Error::AlreadyUsed));

    let err = usecases::redeem_pin(&db, "0000-0000-0000-0000").unwrap_err();
    assert!(matches!(err, Error::InvalidCode));
    let err = usecases::redeem_pin(&db, "garbage").unwrap_err();
    assert!(matches!(err, Error::InvalidCode));
}

#[test]
fn redeem_rejects_expired_pins() {
    let db = MockDb::default();
    let reward = Reward::approved(Id::new(), 100, "HUNDRED".into(), Timestamp::now());
    db.create_reward(&reward).unwrap();

    let code = PinCode::from_groups([1, 1, 1, 1]);
    let issued_at = Timestamp::now() - RewardPin::VALIDITY - time::Duration::seconds(1);
    db.create_pin(&RewardPin::issue(reward.id.clone(), code.clone(), issued_at))
        .unwrap();

    let err = usecases::redeem_pin(&db, code.as_str()).unwrap_err();
    assert!(matches!(err, Error::Expired));
}

#[test]
fn remove_marker_is_reporter_only() {
    let db = MockDb::default();
    let reporter = new_user(0);
    let stranger = new_user(0);
    db.create_user(&reporter).unwrap();
    db.create_user(&stranger).unwrap();

    let marker = usecases::register_marker(
        &db,
        usecases::NewMarker {
            lat: 0.0,
            lng: 0.0,
            description: "litter".into(),
            address: None,
            reported_by: reporter.id.clone(),
        },
    )
    .unwrap();
    usecases::add_photo(
        &db,
        usecases::NewPhoto {
            marker_id: marker.id.clone(),
            uploader_id: reporter.id.clone(),
            image_ref: "images/before.jpg".into(),
            kind: PhotoKind::Before,
        },
    )
    .unwrap();

    let err = usecases::remove_marker(&db, &marker.id, &stranger.id).unwrap_err();
    assert!(matches!(err, Error::Forbidden));
    assert!(db.get_marker(&marker.id).unwrap().is_active());

    let removed = usecases::remove_marker(&db, &marker.id, &reporter.id).unwrap();
    assert_eq!(removed.deleted_photos, 1);
    assert_eq!(removed.image_refs, vec!["images/before.jpg".to_string()]);
    let marker = db.get_marker(&marker.id).unwrap();
    assert!(marker.is_removed());
    assert!(db.photos_of_marker(&marker.id).unwrap().is_empty());
}
