//! Configuration validation
//!
//! Range checks applied after loading, before any values reach the engine.

use crate::{ConfigError, ConfigResult, SynfireConfig};

/// Validation errors that can occur during config validation
#[derive(Debug, Clone)]
pub enum ConfigValidationError {
    InvalidValue { field: String, reason: String },
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidValue { field, reason } => {
                write!(f, "Invalid configuration value for {}: {}", field, reason)
            }
        }
    }
}

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Validate the complete configuration
///
/// Checks that the simulation grid, the plasticity parameters, and the
/// neuron defaults are usable, and that the log level names a real level.
///
/// # Errors
///
/// Returns `ConfigError::ValidationError` with details if validation fails
pub fn validate_config(config: &SynfireConfig) -> ConfigResult<()> {
    let mut errors = Vec::new();

    if !(config.simulation.resolution_ms.is_finite() && config.simulation.resolution_ms > 0.0) {
        errors.push(ConfigValidationError::InvalidValue {
            field: "simulation.resolution_ms".to_string(),
            reason: "must be a positive number of milliseconds".to_string(),
        });
    }

    if let Err(reason) = config.stdp.parameters().validate() {
        errors.push(ConfigValidationError::InvalidValue {
            field: "stdp".to_string(),
            reason: reason.to_string(),
        });
    }
    if !(config.stdp.weight.is_finite() && config.stdp.weight >= 0.0) {
        errors.push(ConfigValidationError::InvalidValue {
            field: "stdp.weight".to_string(),
            reason: "must be a finite non-negative number".to_string(),
        });
    }

    if !(config.neuron.tau_minus.is_finite() && config.neuron.tau_minus > 0.0) {
        errors.push(ConfigValidationError::InvalidValue {
            field: "neuron.tau_minus".to_string(),
            reason: "must be a positive number of milliseconds".to_string(),
        });
    }
    if config.neuron.receptors == 0 {
        errors.push(ConfigValidationError::InvalidValue {
            field: "neuron.receptors".to_string(),
            reason: "at least one receptor port is required".to_string(),
        });
    }

    if !LOG_LEVELS.contains(&config.logging.level.to_lowercase().as_str()) {
        errors.push(ConfigValidationError::InvalidValue {
            field: "logging.level".to_string(),
            reason: format!("expected one of {:?}", LOG_LEVELS),
        });
    }

    if !errors.is_empty() {
        let error_messages = errors
            .iter()
            .map(|e| format!("  - {}", e))
            .collect::<Vec<_>>()
            .join("\n");

        return Err(ConfigError::ValidationError(format!(
            "Configuration validation failed:\n{}",
            error_messages
        )));
    }

    Ok(())
}
