use super::*;
use cleanspot_core::{
    gateways::{
        image_store::ImageStore,
        judge::{JudgeRequest, VerificationJudge},
    },
    usecases::{PointPolicy, VerdictApplication},
};

/// Outcome of one verification run.
///
/// Only `Verified` and `AwardFailed` changed state; everything else is
/// a normal, non-exceptional no-op that the at-least-once event
/// delivery may produce.
#[derive(Debug, Clone, PartialEq)]
pub enum VerifyOutcome {
    Verified {
        photo_id: Id,
        approved: bool,
        marker_cleaned: bool,
        awarded_points: Option<i64>,
    },
    /// No BEFORE or no AFTER photo yet; nothing to verify.
    NothingToVerify,
    /// The representative AFTER photo already left the pending state.
    AlreadyVerified,
    /// The judge could not be reached; a redelivery of the event (or a
    /// manual re-trigger) retries the run.
    JudgeUnavailable,
    /// The verdict has been persisted but crediting the points failed.
    /// The verdict stands; the missing award needs manual
    /// reconciliation.
    AwardFailed { photo_id: Id },
}

/// Runs the verification pipeline for one marker: picks the
/// representative BEFORE/AFTER photo pair, asks the judge, applies the
/// verdict and credits points on approval.
///
/// The handler is safe to run more than once for the same marker; the
/// pending-only transition guard turns duplicate runs into no-ops.
pub fn verify_marker(
    connections: &sqlite::Connections,
    judge: &dyn VerificationJudge,
    images: &dyn ImageStore,
    policy: &PointPolicy,
    marker_id: &Id,
    uploader_id: &Id,
) -> Result<VerifyOutcome> {
    let (before_photo, after_photo) = {
        let db = connections.shared()?;
        let mut before = db.photos_of_marker_by_kind(marker_id, PhotoKind::Before)?;
        if before.is_empty() {
            debug!("Marker {marker_id} has no BEFORE photo yet, nothing to verify");
            return Ok(VerifyOutcome::NothingToVerify);
        }
        let mut after = db.photos_of_marker_by_kind(marker_id, PhotoKind::After)?;
        if after.is_empty() {
            debug!("Marker {marker_id} has no AFTER photo yet, nothing to verify");
            return Ok(VerifyOutcome::NothingToVerify);
        }
        // The pipeline judges one representative pair: the first photo
        // of each kind.
        (before.remove(0), after.remove(0))
    };

    if !after_photo.is_pending() {
        debug!(
            "Photo {} of marker {marker_id} is already {:?}",
            after_photo.id, after_photo.verification
        );
        return Ok(VerifyOutcome::AlreadyVerified);
    }

    let location_hint = {
        let db = connections.shared()?;
        db.get_marker(marker_id)?.description
    };

    let request = JudgeRequest {
        before_image: images.fetch_image(&before_photo.image_ref)?,
        after_image: images.fetch_image(&after_photo.image_ref)?,
        location_hint,
    };
    // The external call happens outside of any database transaction.
    let verdict = match judge.judge(&request) {
        Ok(verdict) => verdict,
        Err(err) => {
            warn!("Judge unavailable for marker {marker_id}: {err:#}");
            return Ok(VerifyOutcome::JudgeUnavailable);
        }
    };

    // The pending guard and the verdict application form one atomic
    // unit against the photo row.
    let application = connections
        .exclusive()?
        .transaction(|conn| usecases::apply_photo_verdict(conn, &after_photo.id, &verdict))?;
    let (photo, marker_cleaned) = match application {
        VerdictApplication::AlreadyVerified => return Ok(VerifyOutcome::AlreadyVerified),
        VerdictApplication::Applied {
            photo,
            marker_cleaned,
        } => (photo, marker_cleaned),
    };

    if !photo.is_approved() {
        return Ok(VerifyOutcome::Verified {
            photo_id: photo.id,
            approved: false,
            marker_cleaned,
            awarded_points: None,
        });
    }

    // The verdict is committed at this point. A failing award must not
    // roll it back; it is logged and reported for reconciliation.
    let credit = connections.exclusive()?.transaction(|conn| {
        usecases::credit_cleanup_points(conn, uploader_id, &photo.id, photo.confidence, policy)
    });
    match credit {
        Ok(entry) => Ok(VerifyOutcome::Verified {
            photo_id: photo.id,
            approved: true,
            marker_cleaned,
            awarded_points: Some(entry.delta),
        }),
        Err(err) => {
            error!(
                "Failed to credit cleanup points to user {uploader_id} \
                 for photo {} of marker {marker_id}: {err}",
                photo.id
            );
            Ok(VerifyOutcome::AwardFailed { photo_id: photo.id })
        }
    }
}
