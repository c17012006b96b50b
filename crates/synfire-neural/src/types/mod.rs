// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*
 * Copyright 2025 Neuraville Inc.
 *
 * Licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License.
 */

//! # Neural Types Module
//!
//! Core type definitions shared across the synfire workspace.

pub mod error;
pub mod events;
pub mod history;
pub mod ids;
pub mod time;

// Re-export commonly used types
pub use error::{Result, SynfireError};
pub use events::{EventKind, EventSink, SpikeEvent};
pub use history::{HistoryEntry, PostsynapticHistory};
pub use ids::{NeuronId, ReceptorPort, SynapseId};
pub use time::{ms_to_steps, steps_to_ms, DEFAULT_RESOLUTION_MS};
