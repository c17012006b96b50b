// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*
 * Copyright 2025 Neuraville Inc.
 *
 * Licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License.
 */

//! # Synfire Engine
//!
//! Event-driven synapse engine built on the `synfire-neural` core:
//! - **Archive**: per-neuron spike history with access-counted pruning
//! - **Neuron**: archiving targets and the dense neuron arena
//! - **Target**: target addressing strategies (direct id, compact slot)
//! - **Synapse**: plastic and static synapses with the delivery protocol
//! - **Network**: minimal single-threaded host wiring it all together
//!
//! The engine performs no event scheduling. Hosts decide when spikes happen
//! and in what order; the engine guarantees what each delivery does.

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod archive;
pub mod network;
pub mod neuron;
pub mod synapse;
pub mod target;

// Re-export commonly used types
pub use archive::SpikeArchive;
pub use network::Network;
pub use neuron::{ArchivingNeuron, NeuronArena};
pub use synapse::{
    ConnectionFields, Delivery, StaticSynapse, StdpSynapse, SynapseSnapshot, KEY_ALPHA,
    KEY_LAMBDA, KEY_MU_MINUS, KEY_MU_PLUS, KEY_SIZE_OF, KEY_TAU_PLUS, KEY_WEIGHT, KEY_W_MAX,
};
pub use target::{CompactTarget, DirectTarget, TargetRef};

// The neural core is part of this crate's public API surface
pub use synfire_neural::{
    depress, facilitate, EventKind, EventSink, HistoryEntry, NeuronId, PostsynapticHistory,
    ReceptorPort, Result, SpikeEvent, StdpParameters, SynapseId, SynfireError,
};
