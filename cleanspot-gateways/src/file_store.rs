use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{ensure, Context, Result as Fallible};
use uuid::Uuid;

use cleanspot_core::gateways::image_store::ImageStore;

/// Stores uploaded images as files below a single uploads directory.
///
/// References handed out to callers are bare file names, so the layout
/// on disk stays an implementation detail of this gateway.
#[derive(Debug, Clone)]
pub struct FsImageStore {
    root: PathBuf,
}

impl FsImageStore {
    pub fn new(root: impl Into<PathBuf>) -> Fallible<Self> {
        let root = root.into();
        fs::create_dir_all(&root)
            .with_context(|| format!("Failed to create image directory {}", root.display()))?;
        Ok(Self { root })
    }

    fn resolve(&self, image_ref: &str) -> Fallible<PathBuf> {
        // References are single file names issued by this store.
        ensure!(
            !image_ref.is_empty() && Path::new(image_ref).file_name() == Some(image_ref.as_ref()),
            "Invalid image reference: {image_ref}"
        );
        Ok(self.root.join(image_ref))
    }
}

impl ImageStore for FsImageStore {
    fn store_image(&self, bytes: &[u8]) -> Fallible<String> {
        let image_ref = format!("{}.jpg", Uuid::new_v4().as_simple());
        let path = self.root.join(&image_ref);
        fs::write(&path, bytes)
            .with_context(|| format!("Failed to write image {}", path.display()))?;
        log::debug!("Stored image {image_ref} ({} bytes)", bytes.len());
        Ok(image_ref)
    }

    fn fetch_image(&self, image_ref: &str) -> Fallible<Vec<u8>> {
        let path = self.resolve(image_ref)?;
        fs::read(&path).with_context(|| format!("Failed to read image {}", path.display()))
    }

    fn delete_image(&self, image_ref: &str) -> bool {
        let path = match self.resolve(image_ref) {
            Ok(path) => path,
            Err(err) => {
                log::warn!("Refusing to delete image: {err}");
                return false;
            }
        };
        match fs::remove_file(&path) {
            Ok(()) => true,
            Err(err) => {
                log::warn!("Failed to delete image {}: {err}", path.display());
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_store() -> FsImageStore {
        let dir = std::env::temp_dir().join(format!("cleanspot-test-{}", Uuid::new_v4()));
        FsImageStore::new(dir).unwrap()
    }

    #[test]
    fn store_fetch_delete_round_trip() {
        let store = temp_store();
        let bytes = b"not really a jpeg";
        let image_ref = store.store_image(bytes).unwrap();
        assert_eq!(store.fetch_image(&image_ref).unwrap(), bytes);
        assert!(store.delete_image(&image_ref));
        assert!(store.fetch_image(&image_ref).is_err());
        // Deleting twice reports failure but does not panic.
        assert!(!store.delete_image(&image_ref));
    }

    #[test]
    fn rejects_path_traversal_references() {
        let store = temp_store();
        assert!(store.fetch_image("../etc/passwd").is_err());
        assert!(!store.delete_image("../etc/passwd"));
    }
}
