// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Simulation time helpers
//!
//! All timestamps in the workspace are `f64` milliseconds on the host's
//! simulation clock. Step counts only appear where events cross process
//! boundaries (event stamping, compact target addressing) and are derived
//! through the grid resolution below.

/// Default simulation grid resolution in milliseconds.
pub const DEFAULT_RESOLUTION_MS: f64 = 0.1;

/// Converts a millisecond interval to a step count on the given grid.
///
/// Rounds to the nearest step; intervals shorter than half a step map to 0.
#[inline]
pub fn ms_to_steps(ms: f64, resolution_ms: f64) -> u32 {
    if ms <= 0.0 || resolution_ms <= 0.0 {
        return 0;
    }
    (ms / resolution_ms).round() as u32
}

/// Converts a step count back to milliseconds on the given grid.
#[inline]
pub fn steps_to_ms(steps: u32, resolution_ms: f64) -> f64 {
    steps as f64 * resolution_ms
}
