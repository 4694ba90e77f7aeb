// Stage backdrop: an optional operator-chosen background image.

use std::path::{Path, PathBuf};

use tracing::info;

use super::{check_extension, file_size, MediaError};

/// Image file extensions accepted as a backdrop.
pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "bmp", "webp", "svg"];

/// Default upper bound on backdrop file size (10 MiB).
pub const DEFAULT_MAX_IMAGE_BYTES: u64 = 10 * 1024 * 1024;

#[derive(Debug, Clone)]
pub struct Backdrop {
    image: Option<PathBuf>,
    max_bytes: u64,
}

impl Default for Backdrop {
    fn default() -> Self {
        Backdrop::new(DEFAULT_MAX_IMAGE_BYTES)
    }
}

impl Backdrop {
    pub fn new(max_bytes: u64) -> Self {
        Backdrop {
            image: None,
            max_bytes,
        }
    }

    /// Use the image at `path` as the backdrop. The previous backdrop is kept
    /// when validation fails.
    pub fn set_image(&mut self, path: &Path) -> Result<&Path, MediaError> {
        check_extension(path, "image", IMAGE_EXTENSIONS)?;
        let size = file_size(path)?;
        if size > self.max_bytes {
            return Err(MediaError::TooLarge {
                path: path.to_path_buf(),
                size,
                max: self.max_bytes,
            });
        }
        info!("Backdrop set to {} ({} bytes)", path.display(), size);
        let stored = self.image.insert(path.to_path_buf());
        Ok(stored.as_path())
    }

    /// Restore the default backdrop.
    pub fn clear(&mut self) {
        self.image = None;
    }

    pub fn image(&self) -> Option<&Path> {
        self.image.as_deref()
    }

    /// File name of the custom image, for display.
    pub fn label(&self) -> Option<String> {
        self.image
            .as_ref()
            .and_then(|p| p.file_name())
            .map(|n| n.to_string_lossy().into_owned())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
