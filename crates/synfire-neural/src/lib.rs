// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*
 * Copyright 2025 Neuraville Inc.
 *
 * Licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License.
 */

//! # Synfire Neural Computation (Platform-Agnostic)
//!
//! The numeric core shared by every synfire crate:
//! - **Types**: Core type definitions (NeuronId, SpikeEvent, HistoryEntry, etc.)
//! - **Plasticity**: The power-law STDP weight rule and its parameters
//!
//! Everything in this crate is plain data plus pure functions. There is no
//! clock, no storage, and no I/O here; those live in `synfire-engine`.

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// Core type definitions
pub mod types;

// STDP weight rule
pub mod plasticity;

// Re-export commonly used types
pub use types::{
    steps_to_ms, ms_to_steps, DEFAULT_RESOLUTION_MS,
    EventKind, EventSink, HistoryEntry, NeuronId, PostsynapticHistory, ReceptorPort, SpikeEvent,
    SynapseId, SynfireError,
};
pub use types::Result;

pub use plasticity::{depress, facilitate, StdpParameters};
