use num_derive::{FromPrimitive, ToPrimitive};
use num_traits::*;
use strum::EnumString;
use thiserror::Error;

use crate::{id::*, time::*, verdict::Verdict};

pub type PhotoKindPrimitive = i16;

/// Role of a photo within a marker's lifecycle.
#[rustfmt::skip]
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromPrimitive, ToPrimitive, EnumString)]
#[strum(ascii_case_insensitive)]
pub enum PhotoKind {
    Before = 0,
    After  = 1,
}

#[derive(Debug, Error)]
#[error("Invalid photo kind primitive: {0}")]
pub struct InvalidPhotoKindPrimitive(PhotoKindPrimitive);

impl TryFrom<PhotoKindPrimitive> for PhotoKind {
    type Error = InvalidPhotoKindPrimitive;
    fn try_from(from: PhotoKindPrimitive) -> Result<Self, Self::Error> {
        Self::from_i16(from).ok_or(InvalidPhotoKindPrimitive(from))
    }
}

impl From<PhotoKind> for PhotoKindPrimitive {
    fn from(from: PhotoKind) -> Self {
        from.to_i16().expect("Photo kind primitive")
    }
}

pub type VerificationStatusPrimitive = i16;

/// Verification lifecycle of an AFTER photo.
///
/// `Pending` transitions exactly once to `Approved` or `Rejected`.
/// Both target states are terminal.
#[rustfmt::skip]
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromPrimitive, ToPrimitive, EnumString)]
#[strum(ascii_case_insensitive)]
pub enum VerificationStatus {
    Pending  = 0,
    Approved = 1,
    Rejected = 2,
}

impl VerificationStatus {
    pub const fn default() -> Self {
        Self::Pending
    }
}

#[derive(Debug, Error)]
#[error("Invalid verification status primitive: {0}")]
pub struct InvalidVerificationStatusPrimitive(VerificationStatusPrimitive);

impl TryFrom<VerificationStatusPrimitive> for VerificationStatus {
    type Error = InvalidVerificationStatusPrimitive;
    fn try_from(from: VerificationStatusPrimitive) -> Result<Self, Self::Error> {
        Self::from_i16(from).ok_or(InvalidVerificationStatusPrimitive(from))
    }
}

impl From<VerificationStatus> for VerificationStatusPrimitive {
    fn from(from: VerificationStatus) -> Self {
        from.to_i16().expect("Verification status primitive")
    }
}

/// An uploaded photo attached to a marker.
#[rustfmt::skip]
#[derive(Debug, Clone, PartialEq)]
pub struct Photo {
    pub id           : Id,
    pub marker_id    : Id,
    pub uploader_id  : Id,
    pub image_ref    : String,
    pub kind         : PhotoKind,
    pub verification : VerificationStatus,
    /// Raw output of the visual-comparison judge, stored verbatim.
    pub judge_output : Option<String>,
    pub confidence   : Option<f64>,
    pub verified_at  : Option<Timestamp>,
    pub created_at   : Timestamp,
}

impl Photo {
    pub fn is_pending(&self) -> bool {
        self.verification == VerificationStatus::Pending
    }

    pub fn is_approved(&self) -> bool {
        self.verification == VerificationStatus::Approved
    }

    pub fn is_rejected(&self) -> bool {
        self.verification == VerificationStatus::Rejected
    }

    /// Applies a judge verdict to a pending photo.
    ///
    /// Returns `false` without modifying anything if the photo is no
    /// longer pending. The transition is terminal.
    pub fn apply_verdict(&mut self, verdict: &Verdict, at: Timestamp) -> bool {
        if !self.is_pending() {
            return false;
        }
        self.verification = if verdict.is_approved() {
            VerificationStatus::Approved
        } else {
            VerificationStatus::Rejected
        };
        self.judge_output = Some(verdict.raw.clone());
        self.confidence = verdict.confidence;
        self.verified_at = Some(at);
        true
    }
}
