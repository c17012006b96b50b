// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Spike events and the dispatch boundary
//!
//! A `SpikeEvent` starts life on the pre-synaptic side carrying only sender
//! and timestamp. Delivery through a synapse stamps the routing metadata
//! (receiver, post-update weight, delay in steps, receptor port) and hands
//! the stamped copy to an [`EventSink`]. Everything past the sink (queueing,
//! scheduling, transport) is the host's business.

use core::fmt;

use serde::{Deserialize, Serialize};

use super::ids::{NeuronId, ReceptorPort};

/// Kinds of events a neuron may accept.
///
/// Synapse wiring checks the target against the kind it will deliver;
/// plastic synapses only ever deliver `Spike`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    Spike,
    Current,
    Rate,
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EventKind::Spike => "spike",
            EventKind::Current => "current",
            EventKind::Rate => "rate",
        };
        write!(f, "{name}")
    }
}

/// A spike travelling from one neuron toward another.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpikeEvent {
    /// Emitting neuron.
    pub sender: NeuronId,
    /// Target neuron; `None` until a synapse stamps the event.
    pub receiver: Option<NeuronId>,
    /// Emission time in ms on the simulation clock.
    pub timestamp: f64,
    /// Synaptic efficacy applied on arrival.
    pub weight: f64,
    /// Dendritic delay in grid steps.
    pub delay_steps: u32,
    /// Receptor port on the target.
    pub port: ReceptorPort,
}

impl SpikeEvent {
    /// A freshly emitted pre-synaptic spike, not yet routed anywhere.
    pub fn emitted(sender: NeuronId, timestamp: f64) -> Self {
        Self {
            sender,
            receiver: None,
            timestamp,
            weight: 0.0,
            delay_steps: 0,
            port: ReceptorPort::default(),
        }
    }

    /// Copy of this event carrying the routing metadata a synapse stamps on
    /// forwarding. The emission timestamp is preserved.
    pub fn stamped(
        &self,
        receiver: NeuronId,
        weight: f64,
        delay_steps: u32,
        port: ReceptorPort,
    ) -> Self {
        Self {
            sender: self.sender,
            receiver: Some(receiver),
            timestamp: self.timestamp,
            weight,
            delay_steps,
            port,
        }
    }
}

/// Forwarding boundary between synapse delivery and the host's event plumbing.
pub trait EventSink {
    fn dispatch(&mut self, event: SpikeEvent);
}

/// Plain collection sink; used by the network outbox and by tests.
impl EventSink for Vec<SpikeEvent> {
    fn dispatch(&mut self, event: SpikeEvent) {
        self.push(event);
    }
}
