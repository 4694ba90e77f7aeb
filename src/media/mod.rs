// Media collaborators: background music playback and the stage backdrop.
//
// Both are thin wrappers around user-supplied files. Validation failures are
// reported as `MediaError` and leave the previous track or backdrop in place.

pub mod audio;
pub mod image;

use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum MediaError {
    #[error("unsupported {kind} file: {path} (expected one of: {expected})")]
    UnsupportedType {
        kind: &'static str,
        path: PathBuf,
        expected: String,
    },

    #[error("image {path} is {size} bytes, larger than the {max} byte limit")]
    TooLarge { path: PathBuf, size: u64, max: u64 },

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("no music loaded")]
    NoTrack,

    #[error("playback failed: {0}")]
    Playback(String),
}

/// Lower-cased extension of `path`, if any.
pub(crate) fn extension_of(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
}

/// Check `path` has one of `allowed` extensions.
pub(crate) fn check_extension(
    path: &Path,
    kind: &'static str,
    allowed: &[&str],
) -> Result<(), MediaError> {
    match extension_of(path) {
        Some(ext) if allowed.contains(&ext.as_str()) => Ok(()),
        _ => Err(MediaError::UnsupportedType {
            kind,
            path: path.to_path_buf(),
            expected: allowed.join(", "),
        }),
    }
}

/// Size of the file at `path`, failing if it is missing or not a file.
pub(crate) fn file_size(path: &Path) -> Result<u64, MediaError> {
    let meta = std::fs::metadata(path).map_err(|e| MediaError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    if !meta.is_file() {
        return Err(MediaError::Io {
            path: path.to_path_buf(),
            source: std::io::Error::new(std::io::ErrorKind::InvalidInput, "not a regular file"),
        });
    }
    Ok(meta.len())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
