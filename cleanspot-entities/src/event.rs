use crate::{id::*, photo::PhotoKind};

/// Message emitted after a photo-upload transaction has durably
/// committed. Delivery is at-least-once; consumers must tolerate
/// duplicates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhotoUploaded {
    pub marker_id: Id,
    pub uploader_id: Id,
    pub kind: PhotoKind,
}
