use cleanspot_application::prelude::{verify_marker, VerifyOutcome};
use cleanspot_core::{
    entities::{PhotoKind, PhotoUploaded},
    gateways::{image_store::ImageStore, judge::VerificationJudge},
    usecases::PointPolicy,
};
use cleanspot_db_sqlite::Connections;
use tokio::sync::mpsc;

pub type EventSender = mpsc::UnboundedSender<PhotoUploaded>;
pub type EventReceiver = mpsc::UnboundedReceiver<PhotoUploaded>;

/// Channel carrying upload-commit events from the upload layer to the
/// verification worker. The sender side must only be used after the
/// upload transaction has durably committed.
pub fn event_channel() -> (EventSender, EventReceiver) {
    mpsc::unbounded_channel()
}

/// Long-running consumer of upload-commit events.
///
/// Delivery is at-least-once and the handler is idempotent, so neither
/// duplicates nor reordering need special treatment here. On a judge
/// outage the event is dropped from this queue; redelivery (or a
/// manual re-trigger) retries the marker.
pub async fn run<J, S>(
    connections: Connections,
    judge: J,
    images: S,
    policy: PointPolicy,
    mut events: EventReceiver,
) where
    J: VerificationJudge,
    S: ImageStore,
{
    while let Some(event) = events.recv().await {
        let PhotoUploaded {
            marker_id,
            uploader_id,
            kind,
        } = event;
        if kind != PhotoKind::After {
            continue;
        }
        log::info!("Verification event received for marker {marker_id}");
        match verify_marker(
            &connections,
            &judge,
            &images,
            &policy,
            &marker_id,
            &uploader_id,
        ) {
            Ok(VerifyOutcome::JudgeUnavailable) => {
                log::warn!(
                    "Judge unavailable, verification of marker {marker_id} \
                     awaits redelivery"
                );
            }
            Ok(outcome) => {
                log::debug!("Verification of marker {marker_id} finished: {outcome:?}");
            }
            Err(err) => {
                log::warn!("Verification of marker {marker_id} failed: {err}");
            }
        }
    }
    log::info!("Verification event channel closed, worker exits");
}
