use super::*;
use cleanspot_core::gateways::image_store::ImageStore;

/// Removes a marker on behalf of its reporter and cleans up the stored
/// images of its photos.
///
/// The image deletes run after the removal has been committed and are
/// best-effort: failures are logged without failing the removal.
pub fn remove_marker(
    connections: &sqlite::Connections,
    images: &dyn ImageStore,
    marker_id: &Id,
    user_id: &Id,
) -> Result<usize> {
    let removed = connections
        .exclusive()?
        .transaction(|conn| usecases::remove_marker(conn, marker_id, user_id))?;

    let mut deleted_images = 0;
    for image_ref in &removed.image_refs {
        if images.delete_image(image_ref) {
            deleted_images += 1;
        } else {
            warn!("Could not delete image {image_ref} of removed marker {marker_id}");
        }
    }
    info!(
        "Removed marker {marker_id}: {} photos deleted, {deleted_images} of {} images removed",
        removed.deleted_photos,
        removed.image_refs.len()
    );
    Ok(removed.deleted_photos)
}
