//! Filesystem document store

use crate::storage::{DocumentStore, StorageError, StorageResult, TargetIdentity};
use std::fs;
use std::path::{Path, PathBuf};

const TEMP_SUFFIX: &str = ".tmp";

/// Stores each document as a file in one output directory
#[derive(Debug, Clone)]
pub struct FsDocumentStore {
    root: PathBuf,
}

impl FsDocumentStore {
    /// Opens the store, creating the directory if it does not exist
    pub fn open(root: impl AsRef<Path>) -> StorageResult<Self> {
        let root = root.as_ref().to_path_buf();
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl DocumentStore for FsDocumentStore {
    fn exists(&self, identity: &TargetIdentity) -> bool {
        self.locate(identity).exists()
    }

    /// Writes to `<name>.tmp` next to the target, then renames over it
    fn write(&mut self, identity: &TargetIdentity, content: &str) -> StorageResult<PathBuf> {
        if identity.file_name().is_empty() {
            return Err(StorageError::InvalidIdentity(
                "empty file name".to_string(),
            ));
        }

        let target = self.locate(identity);
        let temp = self
            .root
            .join(format!("{}{}", identity.file_name(), TEMP_SUFFIX));

        fs::write(&temp, content)?;
        if let Err(e) = fs::rename(&temp, &target) {
            let _ = fs::remove_file(&temp);
            return Err(e.into());
        }

        Ok(target)
    }

    fn locate(&self, identity: &TargetIdentity) -> PathBuf {
        self.root.join(identity.file_name())
    }
}
