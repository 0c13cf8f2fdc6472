use super::prelude::*;

/// Read model for the verification progress of a marker.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerVerificationStatus {
    pub marker_status: MarkerStatus,
    pub before_count: usize,
    pub after_count: usize,
    /// Verification state of the representative AFTER photo, if any.
    pub verification: Option<VerificationStatus>,
    /// Raw judge output of the representative AFTER photo.
    pub rationale: Option<String>,
    pub verified_at: Option<Timestamp>,
}

pub fn marker_verification_status<R>(repo: &R, marker_id: &Id) -> Result<MarkerVerificationStatus>
where
    R: MarkerRepo + PhotoRepo,
{
    let marker = repo.get_marker(marker_id)?;
    let before = repo.photos_of_marker_by_kind(marker_id, PhotoKind::Before)?;
    let after = repo.photos_of_marker_by_kind(marker_id, PhotoKind::After)?;

    // The pipeline always judges the first AFTER photo, so its state is
    // the verification state of the marker.
    let representative = after.first();
    Ok(MarkerVerificationStatus {
        marker_status: marker.status,
        before_count: before.len(),
        after_count: after.len(),
        verification: representative.map(|p| p.verification),
        rationale: representative.and_then(|p| p.judge_output.clone()),
        verified_at: representative.and_then(|p| p.verified_at),
    })
}
