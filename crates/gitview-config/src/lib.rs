// SPDX-License-Identifier: AGPL-3.0
// Copyright (C) 2026 Gitview Contributors

//! # Gitview Configuration
//!
//! Configuration loading for the Gitview service: discovery roots, the
//! explicit tenant tree, browsing limits and the external-read whitelist,
//! in TOML, YAML or JSON (format detected from the file extension).
//!
//! ## Usage
//!
//! ```rust,no_run
//! use gitview_config::{ConfigFormat, ConfigLoader};
//!
//! # fn main() -> Result<(), gitview_config::ConfigError> {
//! let loader = ConfigLoader::new();
//! let config = loader.load_from_string(
//!     "[server]\nport = 9000\n",
//!     ConfigFormat::Toml,
//! )?;
//! assert_eq!(config.server.port, 9000);
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod loader;
pub mod schema;

pub use error::{ConfigError, ConfigResult};
pub use loader::{ConfigFormat, ConfigLoader};
pub use schema::{
    BrowseConfig, Config, RepoConfig, RootConfig, ServerConfig, SiteConfig, UserConfig,
};
