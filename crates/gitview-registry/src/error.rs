// SPDX-License-Identifier: AGPL-3.0
// Copyright (C) 2026 Gitview Contributors

//! Error types for registry lookups

use thiserror::Error;

/// Lookup failures, distinguishing which level of the tenant tree was
/// missing so the boundary layer can emit an accurate 404
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// No such site
    #[error("Site not found: {0}")]
    SiteNotFound(String),

    /// Site exists but has no such user
    #[error("User not found: {site}/{user}")]
    UserNotFound {
        /// Site that was searched
        site: String,
        /// Missing user name
        user: String,
    },

    /// Site and user exist but no such repository
    #[error("Repository not found: {site}/{user}/{repo}")]
    RepoNotFound {
        /// Site that was searched
        site: String,
        /// User that was searched
        user: String,
        /// Missing repository name
        repo: String,
    },
}
