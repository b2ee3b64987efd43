// SPDX-License-Identifier: AGPL-3.0
// Copyright (C) 2026 Gitview Contributors

//! Error types for repository operations

use std::path::PathBuf;
use thiserror::Error;

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

/// Error types for repository operations
///
/// Every variant is terminal for the call that produced it: it signals a
/// malformed request or a definitive absence, never a transient condition.
#[derive(Debug, Error)]
pub enum RepoError {
    /// Revision expression did not resolve to a commit
    #[error("Revision not found: {0}")]
    RevisionNotFound(String),

    /// Path does not exist at the given revision, or does not name the
    /// expected kind of object
    #[error("Path not found: {0}")]
    PathNotFound(String),

    /// Path names a directory where a file was required
    #[error("Path is a directory: {0}")]
    IsADirectory(String),

    /// No blob with the given hash in the object store
    #[error("Blob not found: {0}")]
    BlobNotFound(String),

    /// Repository could not be opened at the given location
    #[error("Failed to open repository at {path}: {source}")]
    Open {
        /// Location that was attempted
        path: PathBuf,
        /// Underlying libgit2 failure
        source: git2::Error,
    },

    /// Lower-level object store decode failure
    #[error("Object store error: {0}")]
    Backing(#[from] git2::Error),

    /// IO error while reading content
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
