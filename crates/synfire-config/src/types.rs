// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Configuration type definitions
//!
//! This module defines the configuration structs that map to sections in
//! `synfire.toml`. Every field has a default, so a missing file or a
//! partial file is always usable.

use serde::{Deserialize, Serialize};

use synfire_neural::plasticity::StdpParameters;
use synfire_neural::types::DEFAULT_RESOLUTION_MS;

/// Root configuration structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct SynfireConfig {
    pub simulation: SimulationConfig,
    pub stdp: StdpConfig,
    pub neuron: NeuronConfig,
    pub logging: LoggingConfig,
}

/// Simulation grid configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Step size of the simulation grid in milliseconds
    pub resolution_ms: f64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            resolution_ms: DEFAULT_RESOLUTION_MS,
        }
    }
}

/// Plastic synapse defaults applied at wiring time
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct StdpConfig {
    pub weight: f64,
    pub tau_plus: f64,
    pub lambda: f64,
    pub alpha: f64,
    pub mu_plus: f64,
    pub mu_minus: f64,
    pub w_max: f64,
}

impl Default for StdpConfig {
    fn default() -> Self {
        Self {
            weight: 1.0,
            tau_plus: 20.0,
            lambda: 0.01,
            alpha: 1.0,
            mu_plus: 1.0,
            mu_minus: 1.0,
            w_max: 100.0,
        }
    }
}

impl StdpConfig {
    /// Weight-rule parameters for synapses built from this configuration.
    pub fn parameters(&self) -> StdpParameters {
        StdpParameters {
            tau_plus: self.tau_plus,
            lambda: self.lambda,
            alpha: self.alpha,
            mu_plus: self.mu_plus,
            mu_minus: self.mu_minus,
            w_max: self.w_max,
        }
    }
}

/// Archiving neuron defaults
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct NeuronConfig {
    /// Post-synaptic trace time constant in milliseconds
    pub tau_minus: f64,
    /// Number of receptor ports each neuron exposes
    pub receptors: u16,
}

impl Default for NeuronConfig {
    fn default() -> Self {
        Self {
            tau_minus: 20.0,
            receptors: 1,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stdp_section_matches_rule_parameters() {
        let section = StdpConfig::default();
        assert_eq!(section.parameters(), StdpParameters::default());
        assert!((section.weight - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_partial_file_fills_from_defaults() {
        let config: SynfireConfig = toml::from_str("[stdp]\nlambda = 0.02\n").unwrap();
        assert!((config.stdp.lambda - 0.02).abs() < 1e-12);
        assert!((config.stdp.tau_plus - 20.0).abs() < 1e-12);
        assert_eq!(config.neuron.receptors, 1);
        assert_eq!(config.logging.level, "info");
    }
}
