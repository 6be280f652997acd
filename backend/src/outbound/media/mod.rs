//! Media store adapters for report photos.

mod fs_media_store;
mod in_memory_media_store;

pub use fs_media_store::FsMediaStore;
pub use in_memory_media_store::InMemoryMediaStore;
