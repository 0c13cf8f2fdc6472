use super::prelude::*;

/// Result of a marker removal: what was deleted from the database and
/// which stored images still need a best-effort cleanup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemovedMarker {
    pub deleted_photos: usize,
    /// Image references of the deleted photos. The caller deletes them
    /// from the image store after the removal has been committed;
    /// individual failures are logged, never fatal.
    pub image_refs: Vec<String>,
}

/// Removes a marker on behalf of its reporter.
///
/// The marker row stays behind as a `Removed` tombstone; all attached
/// photo rows are deleted.
pub fn remove_marker<R>(repo: &R, marker_id: &Id, user_id: &Id) -> Result<RemovedMarker>
where
    R: MarkerRepo + PhotoRepo,
{
    let mut marker = repo.get_marker(marker_id)?;
    if marker.reported_by != *user_id {
        return Err(Error::Forbidden);
    }

    let image_refs: Vec<_> = repo
        .photos_of_marker(marker_id)?
        .into_iter()
        .map(|photo| photo.image_ref)
        .collect();
    let deleted_photos = repo.delete_photos_of_marker(marker_id)?;

    marker.status = MarkerStatus::Removed;
    marker.updated_at = Timestamp::now();
    repo.update_marker(&marker)?;

    log::info!("Removed marker {marker_id} with {deleted_photos} photos");
    Ok(RemovedMarker {
        deleted_photos,
        image_refs,
    })
}
