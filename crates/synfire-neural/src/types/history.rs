// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Post-synaptic spike history contract
//!
//! Plastic synapses never own their target. Everything they need from it
//! at delivery time goes through [`PostsynapticHistory`]: identity, receptor
//! compatibility, and the recorded spike history with its decaying trace.
//! `synfire-engine` ships the concrete provider; tests are free to substitute
//! hand-rolled ones.

use super::events::EventKind;
use super::ids::{NeuronId, ReceptorPort};

/// One recorded post-synaptic spike.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HistoryEntry {
    /// Spike time in ms.
    pub timestamp: f64,
    /// Post trace at this spike, including the spike's own increment.
    pub trace: f64,
    /// Number of reads by registered plastic connections.
    pub access_count: u32,
}

impl HistoryEntry {
    pub fn new(timestamp: f64, trace: f64) -> Self {
        Self {
            timestamp,
            trace,
            access_count: 0,
        }
    }
}

/// Target-side contract consumed by synapse delivery and wiring.
pub trait PostsynapticHistory {
    /// Neuron whose history this is; stamped as receiver on forwarded events.
    fn owner(&self) -> NeuronId;

    /// Entries with `after < timestamp <= through`, ascending.
    ///
    /// Every call increments the access count of each returned entry, so a
    /// caller must query a given window exactly once per delivery.
    fn spike_history(&mut self, after: f64, through: f64) -> &[HistoryEntry];

    /// Post trace decayed to `at`, counting spikes strictly before `at`.
    fn decayed_trace(&self, at: f64) -> f64;

    /// One-time registration of a plastic connection. Entries at or before
    /// `first_read_time` count as already read by it.
    fn register_plastic_connection(&mut self, first_read_time: f64);

    /// Whether this target accepts events of the given kind. Checked once at
    /// wiring time, never on the delivery path.
    fn supports_event_kind(&self, kind: EventKind) -> bool;

    /// Whether `port` addresses an existing receptor on this target.
    fn valid_receptor(&self, port: ReceptorPort) -> bool;
}
