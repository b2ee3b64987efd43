// SPDX-License-Identifier: AGPL-3.0
// Copyright (C) 2026 Gitview Contributors

//! Error types for configuration loading

use std::path::PathBuf;
use thiserror::Error;

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Error types for configuration loading and validation
#[derive(Error, Debug)]
pub enum ConfigError {
    /// IO failure while reading a configuration file
    #[error("IO error reading configuration file: {0}")]
    Io(#[from] std::io::Error),

    /// TOML syntax or shape error
    #[error("Failed to parse TOML configuration: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// YAML syntax or shape error
    #[error("Failed to parse YAML configuration: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    /// JSON syntax or shape error
    #[error("Failed to parse JSON configuration: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// Semantically invalid configuration
    #[error("Configuration validation failed: {0}")]
    Validation(String),

    /// File extension names no supported format
    #[error("Unsupported configuration format: {0}. Supported formats: toml, yaml, json")]
    UnsupportedFormat(String),

    /// Configuration file missing on disk
    #[error("Configuration file not found at path: {}", .0.display())]
    FileNotFound(PathBuf),

    /// Path without a usable extension
    #[error("Invalid configuration path: {}", .0.display())]
    InvalidPath(PathBuf),
}

impl ConfigError {
    /// Shorthand for a [`ConfigError::Validation`]
    pub fn validation(message: impl Into<String>) -> Self {
        ConfigError::Validation(message.into())
    }
}
