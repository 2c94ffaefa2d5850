//! Whole-document JSON persistence for the file backends.
//!
//! A collection is loaded once at startup and rewritten in full on every
//! mutation. Writes go to a sibling `.tmp` file that is then renamed over the
//! target, so a crash mid-write leaves the previous document intact.

use std::ffi::OsString;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error_handling::StoreError;

/// Loads the document at `path`.
///
/// Returns `Ok(None)` when the file does not exist yet.
pub async fn load_document<T: DeserializeOwned>(path: &Path) -> Result<Option<T>, StoreError> {
    let bytes = match tokio::fs::read(path).await {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(StoreError::Io {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    serde_json::from_slice(&bytes)
        .map(Some)
        .map_err(|source| StoreError::Corrupt {
            path: path.to_path_buf(),
            source,
        })
}

/// Replaces the document at `path` with `document`.
pub async fn write_document<T: Serialize + ?Sized>(
    path: &Path,
    document: &T,
) -> Result<(), StoreError> {
    let bytes = serde_json::to_vec_pretty(document).map_err(StoreError::Serialize)?;
    let io_err = |source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await.map_err(io_err)?;
    }

    let tmp = temp_path(path);
    tokio::fs::write(&tmp, &bytes).await.map_err(io_err)?;
    tokio::fs::rename(&tmp, path).await.map_err(io_err)?;
    Ok(())
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(".tmp");
    PathBuf::from(name)
}
