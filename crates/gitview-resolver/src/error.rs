// SPDX-License-Identifier: AGPL-3.0
// Copyright (C) 2026 Gitview Contributors

//! Error types for resolver dispatch

use std::path::PathBuf;
use thiserror::Error;

/// Result type for resolver operations
pub type ResolveResult<T> = Result<T, ResolveError>;

/// Error types for resolver dispatch and sandbox enforcement
#[derive(Debug, Error)]
pub enum ResolveError {
    /// Wrong number of arguments for the selected resolver
    #[error("{resolver} requires {expected} argument(s), got {got}")]
    Arity {
        /// Resolver that rejected the invocation
        resolver: &'static str,
        /// Number of arguments the resolver accepts
        expected: usize,
        /// Number of arguments supplied
        got: usize,
    },

    /// Path escapes the project root
    #[error("Invalid path: {0}")]
    InvalidPath(String),

    /// Normalized path matches no whitelisted prefix
    #[error("Path is not in the whitelist: {0}")]
    NotWhitelisted(PathBuf),

    /// Leading scheme argument names no registered sub-resolver
    #[error("Resolver '{0}' not found")]
    UnknownScheme(String),

    /// Failure from the underlying repository layer
    #[error(transparent)]
    Repo(#[from] gitview_repo::RepoError),
}
