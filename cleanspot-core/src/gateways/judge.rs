use cleanspot_entities::verdict::Verdict;
use thiserror::Error;

/// One visual-comparison request: the raw bytes of the before/after
/// pair plus a textual hint describing the location.
#[derive(Debug, Clone)]
pub struct JudgeRequest {
    pub before_image: Vec<u8>,
    pub after_image: Vec<u8>,
    pub location_hint: String,
}

/// The judge could not be reached or did not answer in time.
///
/// This is deliberately the only error of the gateway: a malformed
/// answer is mapped to a rejected [`Verdict`] by the implementation
/// (fail closed), so callers can always distinguish "the judge said no"
/// from "the judge could not be reached".
#[derive(Debug, Error)]
#[error("Visual judge unavailable")]
pub struct JudgeUnavailable {
    #[from]
    pub source: anyhow::Error,
}

pub trait VerificationJudge {
    fn judge(&self, request: &JudgeRequest) -> Result<Verdict, JudgeUnavailable>;
}
