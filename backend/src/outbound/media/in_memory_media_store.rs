//! Media store kept in process memory.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::ImageReference;
use crate::domain::ports::{MediaStore, MediaStoreError};

#[derive(Default)]
pub struct InMemoryMediaStore {
    items: Mutex<HashMap<String, Vec<u8>>>,
}

impl InMemoryMediaStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored items.
    pub fn len(&self) -> usize {
        self.items.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl MediaStore for InMemoryMediaStore {
    async fn store(&self, bytes: &[u8]) -> Result<ImageReference, MediaStoreError> {
        let key = Uuid::new_v4().simple().to_string();
        let reference =
            ImageReference::new(key.clone()).map_err(|err| MediaStoreError::io(err.to_string()))?;
        self.items
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key, bytes.to_vec());
        Ok(reference)
    }

    async fn retrieve(&self, reference: &ImageReference) -> Result<Vec<u8>, MediaStoreError> {
        self.items
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(reference.as_ref())
            .cloned()
            .ok_or_else(|| MediaStoreError::not_found(reference.as_ref()))
    }

    async fn delete(&self, reference: &ImageReference) -> Result<(), MediaStoreError> {
        self.items
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(reference.as_ref());
        Ok(())
    }
}
