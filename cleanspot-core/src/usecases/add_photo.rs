use super::prelude::*;

#[derive(Debug, Clone)]
pub struct NewPhoto {
    pub marker_id: Id,
    pub uploader_id: Id,
    pub image_ref: String,
    pub kind: PhotoKind,
}

/// Attaches an uploaded photo to a marker. AFTER photos start out
/// pending verification.
pub fn add_photo<R>(repo: &R, new_photo: NewPhoto) -> Result<Photo>
where
    R: MarkerRepo + PhotoRepo + UserRepo,
{
    let NewPhoto {
        marker_id,
        uploader_id,
        image_ref,
        kind,
    } = new_photo;

    let marker = repo.get_marker(&marker_id)?;
    let uploader = repo.get_user(&uploader_id)?;

    let photo = Photo {
        id: Id::new(),
        marker_id: marker.id,
        uploader_id: uploader.id,
        image_ref,
        kind,
        verification: VerificationStatus::default(),
        judge_output: None,
        confidence: None,
        verified_at: None,
        created_at: Timestamp::now(),
    };
    repo.create_photo(&photo)?;
    log::debug!(
        "Added {kind:?} photo {} to marker {}",
        photo.id,
        photo.marker_id
    );
    Ok(photo)
}
