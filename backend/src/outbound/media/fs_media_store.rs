//! Filesystem media store confined to one directory.
//!
//! Photos are written under random names through a `cap_std` directory
//! handle, so references can never address files outside the media root.
//! Writes go to a staging name first and are renamed into place.

use std::io;
use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use cap_std::{ambient_authority, fs::Dir};
use tracing::debug;
use uuid::Uuid;

use crate::domain::ImageReference;
use crate::domain::ports::{MediaStore, MediaStoreError};

const EXTENSION: &str = "img";

/// Photo storage rooted at a single directory.
#[derive(Clone)]
pub struct FsMediaStore {
    root: Arc<Dir>,
}

impl FsMediaStore {
    /// Open `path` as the media root, creating it when missing.
    pub fn open(path: &Path) -> Result<Self, MediaStoreError> {
        Dir::create_ambient_dir_all(path, ambient_authority()).map_err(io_error)?;
        let root = Dir::open_ambient_dir(path, ambient_authority()).map_err(io_error)?;
        Ok(Self {
            root: Arc::new(root),
        })
    }

    async fn with_root<T, F>(&self, operation: F) -> Result<T, MediaStoreError>
    where
        T: Send + 'static,
        F: FnOnce(&Dir) -> Result<T, MediaStoreError> + Send + 'static,
    {
        let root = Arc::clone(&self.root);
        tokio::task::spawn_blocking(move || operation(&root))
            .await
            .map_err(|err| MediaStoreError::io(format!("media task failed: {err}")))?
    }
}

fn io_error(error: io::Error) -> MediaStoreError {
    debug!(%error, "media store i/o failed");
    MediaStoreError::io(error.to_string())
}

/// File name for a reference, refusing anything that is not a bare name.
fn file_name(reference: &ImageReference) -> Result<String, MediaStoreError> {
    let name = reference.as_ref();
    let is_bare = !name.is_empty()
        && !name.starts_with('.')
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '.');
    if is_bare {
        Ok(name.to_owned())
    } else {
        Err(MediaStoreError::not_found(name))
    }
}

/// Write `contents` under `staging`, then move it to `final_name`. The
/// staging file is removed when the move fails.
fn write_staged(
    root: &Dir,
    staging: &str,
    final_name: &str,
    contents: &[u8],
) -> Result<(), MediaStoreError> {
    root.write(staging, contents).map_err(io_error)?;
    root.rename(staging, root, final_name).map_err(|err| {
        if let Err(cleanup) = root.remove_file(staging) {
            debug!(error = %cleanup, staging, "failed to remove staging file");
        }
        io_error(err)
    })
}

#[async_trait]
impl MediaStore for FsMediaStore {
    async fn store(&self, bytes: &[u8]) -> Result<ImageReference, MediaStoreError> {
        let contents = bytes.to_vec();
        let name = format!("{}.{EXTENSION}", Uuid::new_v4().simple());
        let staging = format!(".tmp-{name}");
        let final_name = name.clone();
        self.with_root(move |root| write_staged(root, &staging, &final_name, &contents))
            .await?;
        ImageReference::new(name).map_err(|err| MediaStoreError::io(err.to_string()))
    }

    async fn retrieve(&self, reference: &ImageReference) -> Result<Vec<u8>, MediaStoreError> {
        let name = file_name(reference)?;
        self.with_root(move |root| match root.read(&name) {
            Ok(bytes) => Ok(bytes),
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                Err(MediaStoreError::not_found(name))
            }
            Err(err) => Err(io_error(err)),
        })
        .await
    }

    async fn delete(&self, reference: &ImageReference) -> Result<(), MediaStoreError> {
        let Ok(name) = file_name(reference) else {
            return Ok(());
        };
        self.with_root(move |root| match root.remove_file(&name) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(io_error(err)),
        })
        .await
    }
}
