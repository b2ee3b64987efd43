// SPDX-License-Identifier: AGPL-3.0
// Copyright (C) 2026 Gitview Contributors

//! Configuration schema

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

use crate::error::{ConfigError, ConfigResult};

/// Top-level configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Config {
    /// HTTP server settings
    pub server: ServerConfig,

    /// Browsing limits and the external-read whitelist
    pub browse: BrowseConfig,

    /// Discovery roots walked at startup, in order
    #[serde(default)]
    pub roots: Vec<RootConfig>,

    /// Explicit tenant tree; entries override discovered repositories
    /// sharing the same (site, user, repo) triple
    #[serde(default)]
    pub sites: HashMap<String, SiteConfig>,
}

impl Config {
    /// Check semantic constraints the serde layer cannot express
    pub fn validate(&self) -> ConfigResult<()> {
        for prefix in &self.browse.external_whitelist {
            if !prefix.is_absolute() {
                return Err(ConfigError::validation(format!(
                    "external whitelist prefix must be absolute: {}",
                    prefix.display()
                )));
            }
        }
        for root in &self.roots {
            if root.site.is_empty() {
                return Err(ConfigError::validation(format!(
                    "discovery root {} has an empty site name",
                    root.path.display()
                )));
            }
        }
        for (site, site_config) in &self.sites {
            for (user, user_config) in &site_config.users {
                for (repo, repo_config) in &user_config.repos {
                    if repo_config.path.as_os_str().is_empty() {
                        return Err(ConfigError::validation(format!(
                            "repository {site}/{user}/{repo} has an empty path"
                        )));
                    }
                }
            }
        }
        Ok(())
    }
}

/// HTTP server settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ServerConfig {
    /// Listen address
    pub host: String,
    /// Listen port
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
        }
    }
}

impl ServerConfig {
    /// Socket address string for the listener
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Browsing limits and external-read whitelist
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct BrowseConfig {
    /// Default bound for recursive tree enumeration; 0 means unbounded
    pub max_find_depth: usize,
    /// Absolute path prefixes readable through the external resolver;
    /// empty admits nothing
    pub external_whitelist: Vec<PathBuf>,
}

/// One discovery root: a site name and the directory walked for it
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RootConfig {
    /// Site the discovered repositories are registered under
    pub site: String,
    /// Directory to walk
    pub path: PathBuf,
}

/// Users of one explicitly-configured site
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct SiteConfig {
    /// User name → repositories
    pub users: HashMap<String, UserConfig>,
}

/// Repositories of one user
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct UserConfig {
    /// Repository name → location
    pub repos: HashMap<String, RepoConfig>,
}

/// One explicitly-configured repository
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RepoConfig {
    /// Backing store location: a working tree containing `.git` or a git
    /// directory itself
    pub path: PathBuf,
}
