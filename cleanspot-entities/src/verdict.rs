use std::str::FromStr;

use thiserror::Error;

/// Binary outcome of the external visual-comparison judge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerdictResult {
    Approved,
    Rejected,
}

#[derive(Debug, Error)]
#[error("Invalid verdict result: {0}")]
pub struct VerdictResultParseError(String);

impl FromStr for VerdictResult {
    type Err = VerdictResultParseError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "APPROVED" => Ok(Self::Approved),
            "REJECTED" => Ok(Self::Rejected),
            other => Err(VerdictResultParseError(other.to_owned())),
        }
    }
}

/// Structured output of a visual-comparison judgement.
///
/// `raw` preserves the judge's reply verbatim for audit purposes,
/// independent of how well it parsed.
#[derive(Debug, Clone, PartialEq)]
pub struct Verdict {
    pub result: VerdictResult,
    /// Self-reported confidence in `[0.0, 1.0]`, if the judge provided one.
    pub confidence: Option<f64>,
    pub reason: String,
    pub raw: String,
}

impl Verdict {
    pub fn is_approved(&self) -> bool {
        self.result == VerdictResult::Approved
    }
}
