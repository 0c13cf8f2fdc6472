use super::*;
use cleanspot_core::gateways::image_store::ImageStore;

pub fn register_marker(
    connections: &sqlite::Connections,
    new_marker: usecases::NewMarker,
) -> Result<Marker> {
    Ok(connections
        .exclusive()?
        .transaction(|conn| usecases::register_marker(conn, new_marker))?)
}

/// Stores the uploaded image bytes and attaches the photo to its
/// marker.
///
/// The returned [`PhotoUploaded`] event must only be enqueued after
/// this call returned, i.e. after the upload transaction has durably
/// committed: the verification worker's first read of the AFTER photo
/// has to observe it.
pub fn upload_photo(
    connections: &sqlite::Connections,
    images: &dyn ImageStore,
    marker_id: &Id,
    uploader_id: &Id,
    kind: PhotoKind,
    bytes: &[u8],
) -> Result<(Photo, PhotoUploaded)> {
    let image_ref = images.store_image(bytes)?;
    let new_photo = usecases::NewPhoto {
        marker_id: marker_id.clone(),
        uploader_id: uploader_id.clone(),
        image_ref,
        kind,
    };
    let photo = connections
        .exclusive()?
        .transaction(|conn| usecases::add_photo(conn, new_photo))?;
    let event = PhotoUploaded {
        marker_id: photo.marker_id.clone(),
        uploader_id: photo.uploader_id.clone(),
        kind,
    };
    Ok((photo, event))
}
