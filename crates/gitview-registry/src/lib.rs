// SPDX-License-Identifier: AGPL-3.0
// Copyright (C) 2026 Gitview Contributors

//! # Gitview Tenant Registry
//!
//! A three-level mapping site → user → repository name → [`RepoHandle`],
//! built once at startup and immutable thereafter. Construction merges two
//! ordered sources: filesystem discovery first, then explicit
//! configuration entries, which overwrite discovered entries sharing the
//! same key triple. Lookups after [`RegistryBuilder::build`] are pure map
//! reads and need no synchronization.

pub mod discover;
pub mod error;

pub use discover::{discover, split_tenant, DiscoveredRepo};
pub use error::RegistryError;

use std::collections::HashMap;
use std::path::Path;

use tracing::{info, warn};

use gitview_repo::RepoHandle;

type SiteTable = HashMap<String, HashMap<String, HashMap<String, RepoHandle>>>;

/// Immutable tenant registry
///
/// Obtained from [`Registry::builder`]; there is no dynamic add or remove
/// after construction.
#[derive(Debug, Default)]
pub struct Registry {
    sites: SiteTable,
}

impl Registry {
    /// Start accumulating registry entries
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::default()
    }

    /// Look a repository up by its key triple
    ///
    /// The error names the first level of the tenant tree that was
    /// missing.
    pub fn lookup(&self, site: &str, user: &str, repo: &str) -> Result<&RepoHandle, RegistryError> {
        let users = self
            .sites
            .get(site)
            .ok_or_else(|| RegistryError::SiteNotFound(site.to_string()))?;
        let repos = users.get(user).ok_or_else(|| RegistryError::UserNotFound {
            site: site.to_string(),
            user: user.to_string(),
        })?;
        repos.get(repo).ok_or_else(|| RegistryError::RepoNotFound {
            site: site.to_string(),
            user: user.to_string(),
            repo: repo.to_string(),
        })
    }

    /// Total number of registered repositories
    pub fn len(&self) -> usize {
        self.sites
            .values()
            .flat_map(|users| users.values())
            .map(|repos| repos.len())
            .sum()
    }

    /// Whether the registry holds no repositories at all
    pub fn is_empty(&self) -> bool {
        self.sites
            .values()
            .flat_map(|users| users.values())
            .all(|repos| repos.is_empty())
    }
}

/// Accumulates (site, user, repo) → handle pairs from ordered sources
///
/// Insertion order is significant: the last writer for a key triple wins,
/// which is how explicit configuration overrides discovery.
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    sites: SiteTable,
}

impl RegistryBuilder {
    /// Insert one entry, replacing any previous entry under the same key
    pub fn insert(&mut self, site: &str, user: &str, repo: &str, handle: RepoHandle) {
        self.sites
            .entry(site.to_string())
            .or_default()
            .entry(user.to_string())
            .or_default()
            .insert(repo.to_string(), handle);
    }

    /// Discover repositories under `root` and insert them for `site`
    ///
    /// Entries that cannot be keyed (single-component names) or opened are
    /// skipped with a warning; discovery is best-effort.
    pub fn add_discovery_root(&mut self, site: &str, root: &Path) {
        let mut count = 0usize;
        for repo in discover(root) {
            let Some((user, name)) = split_tenant(&repo.name) else {
                warn!(
                    "Skipping discovered repository '{}': name has no user component",
                    repo.name
                );
                continue;
            };
            match RepoHandle::open(&repo.path) {
                Ok(handle) => {
                    self.insert(site, user, name, handle);
                    count += 1;
                }
                Err(err) => {
                    warn!("Skipping discovered repository '{}': {}", repo.name, err);
                }
            }
        }
        info!(
            "Discovered {} repositories for site '{}' under {}",
            count,
            site,
            root.display()
        );
    }

    /// Freeze the accumulated entries into an immutable [`Registry`]
    pub fn build(self) -> Registry {
        Registry { sites: self.sites }
    }
}
