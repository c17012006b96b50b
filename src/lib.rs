//! # Synfire - Event-Driven Spiking Synapse Engine
//!
//! Synfire models chemical synapses whose weights change with the relative
//! timing of pre- and post-synaptic spikes (STDP). Nothing is polled on a
//! clock: all plasticity state advances lazily, at the moment a spike is
//! delivered across a synapse.
//!
//! ## Quick Start
//!
//! ```toml
//! [dependencies]
//! synfire = "0.1"
//! ```
//!
//! ```rust
//! use synfire::prelude::*;
//!
//! let mut net = Network::new();
//! net.add_neuron(NeuronId(1), 20.0, 1)?;
//! net.add_neuron(NeuronId(2), 20.0, 1)?;
//! let syn = net.connect(NeuronId(1), NeuronId(2), 1.0, ReceptorPort(0))?;
//!
//! // Post fires, then pre: the pairing is depressing.
//! net.record_post_spike(NeuronId(2), 5.0)?;
//! let delivery = net.deliver_pre_spike(syn, 10.0)?;
//!
//! assert!(delivery.weight < 1.0);
//! let forwarded = net.drain_outbox();
//! assert_eq!(forwarded[0].receiver, Some(NeuronId(2)));
//! # Ok::<(), SynfireError>(())
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │  Foundation: synfire-neural                             │
//! │  (ids, events, history contract, the STDP weight rule)  │
//! └─────────────────────────────────────────────────────────┘
//!                         ↓
//! ┌─────────────────────────────────────────────────────────┐
//! │  Engine: synfire-engine                                 │
//! │  (spike archives, synapses, delivery, network wiring)   │
//! └─────────────────────────────────────────────────────────┘
//!                         ↓
//! ┌─────────────────────────────────────────────────────────┐
//! │  Host: synfire-config + tools                           │
//! │  (TOML configuration, pairing-protocol sweeps)          │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Notes
//!
//! - Weights follow the Guetig power-law rule; the update functions are
//!   total and clamp to `[0, Wmax]`, so the numeric path never fails.
//! - Post-synaptic spike archives prune themselves once every registered
//!   synapse has read an entry.
//! - Synapse parameters move through a key-value status surface, imported
//!   atomically.
//!
//! ## License
//!
//! Apache-2.0

// Re-export foundation
pub use synfire_neural as neural;

// Re-export engine
pub use synfire_engine as engine;

// Re-export configuration
pub use synfire_config as config;

/// Prelude - commonly used types and traits
pub mod prelude {
    pub use crate::neural::{
        depress, facilitate, EventKind, EventSink, HistoryEntry, NeuronId, PostsynapticHistory,
        ReceptorPort, SpikeEvent, StdpParameters, SynapseId, SynfireError,
    };

    pub use crate::engine::{
        ArchivingNeuron, Delivery, Network, NeuronArena, SpikeArchive, StaticSynapse, StdpSynapse,
    };

    pub use crate::config::{load_config, SynfireConfig};
}
