use super::prelude::*;

/// Result of applying a verdict to a photo.
#[derive(Debug, Clone, PartialEq)]
pub enum VerdictApplication {
    /// The verdict has been persisted. `marker_cleaned` reports whether
    /// the owning marker advanced to `Cleaned` as part of it.
    Applied {
        photo: Photo,
        marker_cleaned: bool,
    },
    /// The photo was no longer pending; nothing has been changed.
    ///
    /// This guard makes redundant pipeline runs converge: at-least-once
    /// event delivery may invoke the handler twice for the same marker,
    /// but only the first verdict ever takes effect.
    AlreadyVerified,
}

/// Applies a judge verdict to the given AFTER photo and, on approval,
/// advances the owning marker to `Cleaned`.
///
/// Must run inside a single transaction together with the pending check
/// so concurrent duplicate events cannot both pass the guard.
pub fn apply_photo_verdict<R>(
    repo: &R,
    photo_id: &Id,
    verdict: &Verdict,
) -> Result<VerdictApplication>
where
    R: PhotoRepo + MarkerRepo,
{
    let mut photo = repo.get_photo(photo_id)?;
    let now = Timestamp::now();

    if !photo.apply_verdict(verdict, now) {
        log::debug!(
            "Photo {} is already {:?}, skipping verdict",
            photo.id,
            photo.verification
        );
        return Ok(VerdictApplication::AlreadyVerified);
    }
    repo.update_photo(&photo)?;
    log::info!(
        "Verified photo {} of marker {}: {:?} (confidence: {:?})",
        photo.id,
        photo.marker_id,
        photo.verification,
        verdict.confidence
    );

    let mut marker_cleaned = false;
    if photo.is_approved() {
        let mut marker = repo.get_marker(&photo.marker_id)?;
        if marker.mark_cleaned(now) {
            repo.update_marker(&marker)?;
            marker_cleaned = true;
            log::info!("Marker {} is now cleaned", marker.id);
        }
    }

    Ok(VerdictApplication::Applied {
        photo,
        marker_cleaned,
    })
}
