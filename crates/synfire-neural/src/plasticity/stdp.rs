// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*
 * Copyright 2025 Neuraville Inc.
 *
 * Licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License.
 */

//! # Power-Law STDP Weight Rule
//!
//! Spike-timing-dependent plasticity with weight-dependent step sizes.
//!
//! ## Rule Dynamics
//!
//! ```text
//! Facilitation (pre spike arrives after a post spike, Δt < 0 on the
//! pre-synaptic clock):
//!     w_norm' = w_norm + λ × (1 - w_norm)^μ+ × K+
//!
//! Depression (pre spike arrives before the next post spike):
//!     w_norm' = w_norm - α × λ × w_norm^μ- × K-
//!
//!     Where:
//!     - w_norm = w / w_max, the weight normalized to [0, 1]
//!     - λ      = learning step scale
//!     - α      = asymmetry between depression and facilitation
//!     - μ+, μ- = weight-dependence exponents
//!     - K+, K- = pre/post exponential traces sampled at the pairing
//!
//! Exponent corners:
//!     μ = 0          additive updates (step independent of w)
//!     μ = 1          multiplicative updates
//!     0 < μ < 1      the intermediate power-law regime
//! ```
//!
//! Both updates saturate: facilitation never lifts the weight above `w_max`,
//! depression never pushes it below zero. The comparisons are strict, so a
//! normalized weight landing exactly on 1.0 or 0.0 snaps to the bound.

use serde::{Deserialize, Serialize};

/// Parameters of the power-law STDP rule.
///
/// The post-synaptic trace time constant is deliberately absent: it belongs
/// to the target neuron's archive, not to the synapse.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StdpParameters {
    /// Pre-synaptic trace time constant (ms)
    pub tau_plus: f64,

    /// Learning step scale
    pub lambda: f64,

    /// Depression amplitude relative to facilitation
    pub alpha: f64,

    /// Weight-dependence exponent for facilitation
    pub mu_plus: f64,

    /// Weight-dependence exponent for depression
    pub mu_minus: f64,

    /// Upper weight bound; the lower bound is always 0
    pub w_max: f64,
}

impl StdpParameters {
    /// Create new STDP parameters with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Sanity-check the parameter set.
    ///
    /// Advisory only: the update functions below stay total for any inputs,
    /// degenerate values degrade the numbers rather than the process.
    pub fn validate(&self) -> Result<(), &'static str> {
        if !self.tau_plus.is_finite() || self.tau_plus <= 0.0 {
            return Err("STDP: tau_plus must be finite and positive");
        }
        if !self.w_max.is_finite() || self.w_max <= 0.0 {
            return Err("STDP: w_max must be finite and positive");
        }
        if !self.lambda.is_finite() || self.lambda < 0.0 {
            return Err("STDP: lambda must be finite and non-negative");
        }
        if !self.alpha.is_finite() {
            return Err("STDP: alpha must be finite");
        }
        if !self.mu_plus.is_finite() || self.mu_plus < 0.0 {
            return Err("STDP: mu_plus must be finite and non-negative");
        }
        if !self.mu_minus.is_finite() || self.mu_minus < 0.0 {
            return Err("STDP: mu_minus must be finite and non-negative");
        }
        Ok(())
    }
}

impl Default for StdpParameters {
    fn default() -> Self {
        Self {
            tau_plus: 20.0, // Pre-trace time constant (ms)
            lambda: 0.01,   // 1% of the remaining headroom per pairing
            alpha: 1.0,     // Symmetric depression
            mu_plus: 1.0,   // Multiplicative facilitation
            mu_minus: 1.0,  // Multiplicative depression
            w_max: 100.0,   // Weight ceiling
        }
    }
}

/// Facilitation step: move `weight` toward `w_max` by the trace-weighted
/// power-law increment.
///
/// `k` is the pre-synaptic trace decayed to the pairing.
///
/// # Example
/// ```
/// use synfire_neural::plasticity::{facilitate, StdpParameters};
///
/// let p = StdpParameters::default();
/// // 50/100 + 0.01 * (1 - 0.5) * 1.0 = 0.505, scaled back by w_max
/// assert!((facilitate(50.0, 1.0, &p) - 50.5).abs() < 1e-12);
/// // Saturated weight stays at the bound
/// assert!((facilitate(100.0, 5.0, &p) - 100.0).abs() < 1e-12);
/// ```
#[inline]
pub fn facilitate(weight: f64, k: f64, p: &StdpParameters) -> f64 {
    let norm_w = (weight / p.w_max) + p.lambda * (1.0 - weight / p.w_max).powf(p.mu_plus) * k;
    if norm_w < 1.0 {
        norm_w * p.w_max
    } else {
        p.w_max
    }
}

/// Depression step: move `weight` toward zero by the trace-weighted
/// power-law decrement.
///
/// `k` is the post-synaptic trace decayed to the pairing.
///
/// # Example
/// ```
/// use synfire_neural::plasticity::{depress, StdpParameters};
///
/// let p = StdpParameters::default();
/// // 50/100 - 1.0 * 0.01 * 0.5 * 1.0 = 0.495, scaled back by w_max
/// assert!((depress(50.0, 1.0, &p) - 49.5).abs() < 1e-12);
/// // Oversized decrements stop at zero
/// assert!(depress(50.0, 200.0, &p) == 0.0);
/// ```
#[inline]
pub fn depress(weight: f64, k: f64, p: &StdpParameters) -> f64 {
    let norm_w = (weight / p.w_max) - p.alpha * p.lambda * (weight / p.w_max).powf(p.mu_minus) * k;
    if norm_w > 0.0 {
        norm_w * p.w_max
    } else {
        0.0
    }
}
