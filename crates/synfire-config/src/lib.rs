// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # Synfire Configuration System
//!
//! Type-safe configuration loader for the synfire workspace:
//! - TOML file parsing with built-in defaults for every field
//! - Environment variable overrides
//! - Range validation before values reach the engine
//!
//! ## Usage
//!
//! ```rust,no_run
//! use synfire_config::load_config;
//!
//! // Load configuration with automatic file discovery and overrides
//! let config = load_config(None).expect("Failed to load config");
//!
//! println!("Resolution: {} ms", config.simulation.resolution_ms);
//! let params = config.stdp.parameters();
//! ```

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod loader;
pub mod types;
pub mod validation;

pub use loader::{apply_environment_overrides, find_config_file, load_config};
pub use types::*;
pub use validation::{validate_config, ConfigValidationError};

/// Configuration error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Config file not found: {0}")]
    FileNotFound(String),

    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Invalid TOML syntax: {0}")]
    ParseError(String),

    #[error("Validation failed: {0}")]
    ValidationError(String),
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_types_compile() {
        // Smoke test to ensure types are properly defined
        let config = SynfireConfig::default();
        assert!(config.simulation.resolution_ms > 0.0);
    }
}
