// SPDX-License-Identifier: AGPL-3.0
// Copyright (C) 2026 Gitview Contributors

//! Shared application state

use std::path::PathBuf;

use tracing::info;

use gitview_config::Config;
use gitview_registry::Registry;
use gitview_repo::{RepoHandle, RepoResult};

/// Shared application state
///
/// Built once before the listener starts; read-only while serving.
pub struct AppState {
    /// Tenant registry, immutable after construction
    pub registry: Registry,

    /// Default bound for recursive tree enumeration; 0 means unbounded
    pub max_find_depth: usize,

    /// Prefixes readable through the external resolver
    pub external_whitelist: Vec<PathBuf>,
}

impl AppState {
    /// Assemble state from an already-built registry
    pub fn new(registry: Registry, config: &Config) -> Self {
        Self {
            registry,
            max_find_depth: config.browse.max_find_depth,
            external_whitelist: config.browse.external_whitelist.clone(),
        }
    }

    /// Build the registry from configuration and wrap it into state
    ///
    /// Discovery roots are walked first; explicit tenant entries are
    /// inserted afterwards and override discovered repositories sharing
    /// the same key triple. A discovery failure is logged and skipped; an
    /// explicit entry that cannot be opened is a startup error.
    pub fn from_config(config: &Config) -> RepoResult<Self> {
        let mut builder = Registry::builder();
        for root in &config.roots {
            builder.add_discovery_root(&root.site, &root.path);
        }
        for (site, site_config) in &config.sites {
            for (user, user_config) in &site_config.users {
                for (repo, repo_config) in &user_config.repos {
                    let handle = RepoHandle::open(&repo_config.path)?;
                    builder.insert(site, user, repo, handle);
                }
            }
        }
        let registry = builder.build();
        info!("Registry built with {} repositories", registry.len());
        Ok(Self::new(registry, config))
    }
}
