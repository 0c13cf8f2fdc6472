pub mod prelude {

    use std::{
        cell::{Cell, RefCell},
        collections::HashMap,
    };

    use anyhow::anyhow;

    pub use cleanspot_core::{
        entities::*,
        gateways::{
            image_store::ImageStore,
            judge::{JudgeRequest, JudgeUnavailable, VerificationJudge},
            pin_source::PinCodeSource,
        },
        repositories::{Error as RepoError, *},
        usecases,
    };

    pub mod sqlite {
        pub use super::super::super::sqlite::*;
    }

    pub use crate::{
        error::{AppError, BError},
        prelude as flows,
    };

    #[derive(Debug, Clone)]
    pub enum ScriptedJudgement {
        Verdict(Verdict),
        Unavailable,
    }

    /// Judge double that replays a scripted sequence of judgements and
    /// repeats the last one. Records how often it was consulted.
    pub struct MockJudge {
        script: RefCell<Vec<ScriptedJudgement>>,
        pub calls: Cell<usize>,
    }

    impl MockJudge {
        pub fn scripted(mut script: Vec<ScriptedJudgement>) -> Self {
            script.reverse();
            Self {
                script: RefCell::new(script),
                calls: Cell::new(0),
            }
        }

        pub fn approving(confidence: f64) -> Self {
            Self::scripted(vec![ScriptedJudgement::Verdict(Verdict {
                result: VerdictResult::Approved,
                confidence: Some(confidence),
                reason: "major litter removed".into(),
                raw: format!(
                    "{{\"result\":\"APPROVED\",\"confidence\":{confidence},\"reason\":\"major litter removed\"}}"
                ),
            })])
        }

        pub fn rejecting(confidence: f64) -> Self {
            Self::scripted(vec![ScriptedJudgement::Verdict(Verdict {
                result: VerdictResult::Rejected,
                confidence: Some(confidence),
                reason: "no visible difference".into(),
                raw: format!(
                    "{{\"result\":\"REJECTED\",\"confidence\":{confidence},\"reason\":\"no visible difference\"}}"
                ),
            })])
        }

        pub fn unavailable() -> Self {
            Self::scripted(vec![ScriptedJudgement::Unavailable])
        }
    }

    impl VerificationJudge for MockJudge {
        fn judge(&self, _: &JudgeRequest) -> Result<Verdict, JudgeUnavailable> {
            self.calls.set(self.calls.get() + 1);
            let mut script = self.script.borrow_mut();
            let judgement = if script.len() > 1 {
                script.pop().expect("scripted judgement")
            } else {
                script.last().expect("scripted judgement").clone()
            };
            match judgement {
                ScriptedJudgement::Verdict(verdict) => Ok(verdict),
                ScriptedJudgement::Unavailable => Err(anyhow!("scripted outage").into()),
            }
        }
    }

    /// In-memory image store that records deletions.
    #[derive(Default)]
    pub struct MemImageStore {
        images: RefCell<HashMap<String, Vec<u8>>>,
        pub deleted: RefCell<Vec<String>>,
        counter: Cell<usize>,
    }

    impl ImageStore for MemImageStore {
        fn store_image(&self, bytes: &[u8]) -> anyhow::Result<String> {
            let n = self.counter.get();
            self.counter.set(n + 1);
            let image_ref = format!("img-{n}.jpg");
            self.images
                .borrow_mut()
                .insert(image_ref.clone(), bytes.to_vec());
            Ok(image_ref)
        }
        fn fetch_image(&self, image_ref: &str) -> anyhow::Result<Vec<u8>> {
            self.images
                .borrow()
                .get(image_ref)
                .cloned()
                .ok_or_else(|| anyhow!("no such image: {image_ref}"))
        }
        fn delete_image(&self, image_ref: &str) -> bool {
            let removed = self.images.borrow_mut().remove(image_ref).is_some();
            if removed {
                self.deleted.borrow_mut().push(image_ref.to_owned());
            }
            removed
        }
    }

    /// Deterministic pin-code source: replays the given codes and
    /// repeats the last one.
    pub struct SeqPinSource {
        codes: RefCell<Vec<PinCode>>,
    }

    impl SeqPinSource {
        pub fn new(mut codes: Vec<PinCode>) -> Self {
            codes.reverse();
            Self {
                codes: RefCell::new(codes),
            }
        }

        pub fn single(code: PinCode) -> Self {
            Self::new(vec![code])
        }
    }

    impl PinCodeSource for SeqPinSource {
        fn next_code(&self) -> PinCode {
            let mut codes = self.codes.borrow_mut();
            if codes.len() > 1 {
                codes.pop().expect("scripted pin code")
            } else {
                codes.last().expect("scripted pin code").clone()
            }
        }
    }

    pub struct BackendFixture {
        pub db_connections: sqlite::Connections,
        pub images: MemImageStore,
        pub policy: usecases::PointPolicy,
    }

    impl BackendFixture {
        pub fn new() -> Self {
            let db_connections = sqlite::Connections::init(":memory:", 1).unwrap();
            cleanspot_db_sqlite::run_embedded_database_migrations(
                db_connections.exclusive().unwrap(),
            );
            Self {
                db_connections,
                images: MemImageStore::default(),
                policy: usecases::PointPolicy::default(),
            }
        }

        /// Creates a user. A non-zero starting balance is seeded through
        /// the ledger so that cache and replay agree from the start.
        pub fn create_user(&self, username: &str, points: i64) -> User {
            let user = User {
                id: Id::new(),
                username: username.into(),
                points,
                created_at: Timestamp::now(),
            };
            let db = self.db_connections.exclusive().unwrap();
            db.create_user(&user).unwrap();
            if points > 0 {
                db.append_point_entry(&PointHistory::earned(
                    user.id.clone(),
                    points,
                    "Initial grant".into(),
                    None,
                    Timestamp::now(),
                ))
                .unwrap();
            }
            user
        }

        pub fn create_marker(&self, reporter: &User) -> Marker {
            flows::register_marker(
                &self.db_connections,
                usecases::NewMarker {
                    lat: 37.5665,
                    lng: 126.978,
                    description: "litter next to the bus stop".into(),
                    address: None,
                    reported_by: reporter.id.clone(),
                },
            )
            .unwrap()
        }

        pub fn upload_photo(
            &self,
            marker: &Marker,
            uploader: &User,
            kind: PhotoKind,
        ) -> (Photo, PhotoUploaded) {
            flows::upload_photo(
                &self.db_connections,
                &self.images,
                &marker.id,
                &uploader.id,
                kind,
                b"jpeg bytes",
            )
            .unwrap()
        }

        /// Shorthand for the reported-and-cleaned setup: one marker,
        /// one BEFORE photo by the reporter, one AFTER photo by the
        /// cleaner.
        pub fn marker_with_photo_pair(
            &self,
            reporter: &User,
            cleaner: &User,
        ) -> (Marker, Photo, Photo) {
            let marker = self.create_marker(reporter);
            let (before, _) = self.upload_photo(&marker, reporter, PhotoKind::Before);
            let (after, _) = self.upload_photo(&marker, cleaner, PhotoKind::After);
            (marker, before, after)
        }

        pub fn verify(
            &self,
            judge: &MockJudge,
            marker_id: &Id,
            uploader_id: &Id,
        ) -> flows::VerifyOutcome {
            flows::verify_marker(
                &self.db_connections,
                judge,
                &self.images,
                &self.policy,
                marker_id,
                uploader_id,
            )
            .unwrap()
        }

        pub fn get_user(&self, id: &Id) -> User {
            self.db_connections.shared().unwrap().get_user(id).unwrap()
        }

        pub fn get_marker(&self, id: &Id) -> Marker {
            self.db_connections
                .shared()
                .unwrap()
                .get_marker(id)
                .unwrap()
        }

        pub fn get_photo(&self, id: &Id) -> Photo {
            self.db_connections.shared().unwrap().get_photo(id).unwrap()
        }

        pub fn ledger_of(&self, user_id: &Id) -> Vec<PointHistory> {
            self.db_connections
                .shared()
                .unwrap()
                .point_entries_by_user(user_id)
                .unwrap()
        }
    }
}
