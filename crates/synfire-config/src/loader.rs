// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Configuration file loading with override support
//!
//! Two-tier loading: a TOML file (explicit path, `SYNFIRE_CONFIG_PATH`, or
//! `./synfire.toml`) provides the base values, then environment variables
//! override individual fields. Having no file at all is fine since every
//! field carries a default.

use crate::{validate_config, ConfigError, ConfigResult, SynfireConfig};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Find the synfire configuration file
///
/// Search order:
/// 1. `SYNFIRE_CONFIG_PATH` environment variable
/// 2. Current working directory: `./synfire.toml`
///
/// Returns `Ok(None)` when neither names a file; the caller falls back to
/// built-in defaults.
///
/// # Errors
///
/// Returns `ConfigError::FileNotFound` if `SYNFIRE_CONFIG_PATH` points at a
/// missing file.
pub fn find_config_file() -> ConfigResult<Option<PathBuf>> {
    if let Ok(env_path) = env::var("SYNFIRE_CONFIG_PATH") {
        let path = PathBuf::from(env_path);
        if path.exists() {
            return Ok(Some(path));
        }
        return Err(ConfigError::FileNotFound(format!(
            "Config file specified by SYNFIRE_CONFIG_PATH not found: {}",
            path.display()
        )));
    }

    if let Ok(cwd) = env::current_dir() {
        let candidate = cwd.join("synfire.toml");
        if candidate.exists() {
            return Ok(Some(candidate));
        }
    }

    Ok(None)
}

/// Load configuration from TOML file
///
/// # Arguments
///
/// * `config_path` - Optional path to config file. If `None`, searches via
///   [`find_config_file`] and falls back to defaults when nothing exists.
///
/// # Returns
///
/// Complete `SynfireConfig` with environment overrides applied and all
/// values validated
///
/// # Errors
///
/// Returns an error if an explicitly named file is missing or unreadable,
/// contains invalid TOML, or fails validation
pub fn load_config(config_path: Option<&Path>) -> ConfigResult<SynfireConfig> {
    let config_file = match config_path {
        Some(path) => Some(path.to_path_buf()),
        None => find_config_file()?,
    };

    let mut config = match config_file {
        Some(path) => {
            let content = fs::read_to_string(&path)?;
            toml::from_str(&content)?
        }
        None => SynfireConfig::default(),
    };

    apply_environment_overrides(&mut config);
    validate_config(&config)?;

    Ok(config)
}

/// Apply environment variable overrides to configuration
///
/// Supported environment variables:
/// - `SYNFIRE_LOG_LEVEL` -> `logging.level`
/// - `SYNFIRE_RESOLUTION_MS` -> `simulation.resolution_ms`
pub fn apply_environment_overrides(config: &mut SynfireConfig) {
    if let Ok(value) = env::var("SYNFIRE_LOG_LEVEL") {
        config.logging.level = value;
    }
    if let Ok(value) = env::var("SYNFIRE_RESOLUTION_MS") {
        if let Ok(resolution) = value.parse::<f64>() {
            config.simulation.resolution_ms = resolution;
        }
    }
}
