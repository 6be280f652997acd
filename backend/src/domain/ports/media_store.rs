//! Port for storing report photos.
use async_trait::async_trait;

use crate::domain::ImageReference;

use super::define_port_error;

define_port_error! {
    /// Errors raised by media store adapters.
    pub enum MediaStoreError {
        /// Reading or writing the underlying storage failed.
        Io { message: String } => "media store i/o failed: {message}",
        /// No media is stored under the reference.
        NotFound { reference: String } => "media {reference} not found",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MediaStore: Send + Sync {
    /// Persist `bytes` and return an opaque handle for them.
    async fn store(&self, bytes: &[u8]) -> Result<ImageReference, MediaStoreError>;

    async fn retrieve(&self, reference: &ImageReference) -> Result<Vec<u8>, MediaStoreError>;

    /// Release the media. Releasing an unknown reference succeeds.
    async fn delete(&self, reference: &ImageReference) -> Result<(), MediaStoreError>;
}
