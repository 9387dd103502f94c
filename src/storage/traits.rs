//! Storage traits and error types
//!
//! This module defines the trait interface for document stores and
//! associated error types.

use crate::storage::TargetIdentity;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid target identity: {0}")]
    InvalidIdentity(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Trait for document store implementations
///
/// A store maps a [`TargetIdentity`] to one persisted document. Presence of
/// an identity is what the crawler uses to decide that everything older has
/// already been mirrored.
pub trait DocumentStore {
    /// Returns true if a document for this identity is already persisted
    fn exists(&self, identity: &TargetIdentity) -> bool;

    /// Persists a rendered document
    ///
    /// Readers must never observe a partially written document.
    ///
    /// # Returns
    ///
    /// The location the document was written to
    fn write(&mut self, identity: &TargetIdentity, content: &str) -> StorageResult<PathBuf>;

    /// Location a given identity maps to
    fn locate(&self, identity: &TargetIdentity) -> PathBuf;
}
