use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors that abort a single build attempt
#[derive(Debug, Error)]
pub enum BuildError {
    /// A fragment is missing or unreadable; nothing was written
    #[error("failed to read fragment {}: {source}", path.display())]
    ReadFragment { path: PathBuf, source: io::Error },

    #[error("failed to create output directory {}: {source}", path.display())]
    CreateDir { path: PathBuf, source: io::Error },

    /// An output could not be written; previous outputs are left in place
    #[error("failed to write {}: {source}", path.display())]
    WriteOutput { path: PathBuf, source: io::Error },
}

impl BuildError {
    /// Path involved in the failure
    pub fn path(&self) -> &PathBuf {
        match self {
            BuildError::ReadFragment { path, .. }
            | BuildError::CreateDir { path, .. }
            | BuildError::WriteOutput { path, .. } => path,
        }
    }
}
