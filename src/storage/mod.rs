//! Storage module for mirrored documents
//!
//! This module handles everything the crawler knows about the output
//! directory:
//! - Deriving the target identity (file name) of an article
//! - Presence checks used as the resume/stop marker
//! - Atomic document writes

mod fs;
mod identity;
mod traits;

pub use fs::FsDocumentStore;
pub use identity::{sanitize_filename, TargetIdentity, MAX_FILENAME_BYTES, MAX_FILENAME_CHARS};
pub use traits::{DocumentStore, StorageError, StorageResult};

use std::path::Path;

/// Opens (creating if needed) a filesystem document store
///
/// # Arguments
///
/// * `path` - The output directory
///
/// # Returns
///
/// * `Ok(FsDocumentStore)` - Directory exists and is ready
/// * `Err(StorageError)` - Directory could not be created
pub fn open_storage(path: &Path) -> StorageResult<FsDocumentStore> {
    FsDocumentStore::open(path)
}
