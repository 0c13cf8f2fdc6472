use anyhow::Result as Fallible;

/// Persists uploaded image bytes and hands out stable reference paths.
pub trait ImageStore {
    fn store_image(&self, bytes: &[u8]) -> Fallible<String>;
    fn fetch_image(&self, image_ref: &str) -> Fallible<Vec<u8>>;

    /// Best-effort removal. Returns `true` if the image was deleted.
    /// Failures are reported through the return value and must not
    /// abort the calling operation.
    fn delete_image(&self, image_ref: &str) -> bool;
}
