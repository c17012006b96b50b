// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*
 * Copyright 2025 Neuraville Inc.
 *
 * Licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License.
 */

//! Single-threaded network host.
//!
//! [`Network`] owns the neuron arena, the plastic connection table, and the
//! outbox of forwarded events. It drives the per-synapse protocol: it tracks
//! each connection's previous pre-synaptic spike time, feeds it into
//! [`StdpSynapse::deliver`], and advances it afterwards. Callers announce
//! spikes with [`Network::deliver_pre_spike`] and
//! [`Network::record_post_spike`] and pull stamped events out of the outbox.

use tracing::{debug, trace};

use synfire_neural::types::{NeuronId, ReceptorPort, Result, SpikeEvent, SynapseId, SynfireError};
use synfire_neural::StdpParameters;

use crate::neuron::{ArchivingNeuron, NeuronArena};
use crate::synapse::{Delivery, StdpSynapse};
use crate::target::{DirectTarget, TargetRef};

struct Connection {
    sender: NeuronId,
    synapse: StdpSynapse<DirectTarget>,
    /// Timestamp of the previous delivered pre spike, 0.0 before the first.
    last_pre_spike: f64,
}

/// Container wiring archiving neurons together through plastic synapses.
#[derive(Default)]
pub struct Network {
    arena: NeuronArena,
    connections: Vec<Connection>,
    outbox: Vec<SpikeEvent>,
}

impl Network {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn num_neurons(&self) -> usize {
        self.arena.len()
    }

    pub fn num_synapses(&self) -> usize {
        self.connections.len()
    }

    /// Add an archiving neuron with the given trace time constant and
    /// receptor count.
    pub fn add_neuron(&mut self, id: NeuronId, tau_minus: f64, receptors: u16) -> Result<()> {
        self.arena
            .insert(ArchivingNeuron::new(id, tau_minus, receptors))?;
        debug!(target: "network", neuron = %id, tau_minus, receptors, "neuron added");
        Ok(())
    }

    /// Wire a plastic connection with default parameters and weight 1.0.
    pub fn connect(
        &mut self,
        pre: NeuronId,
        post: NeuronId,
        delay_ms: f64,
        port: ReceptorPort,
    ) -> Result<SynapseId> {
        self.connect_with(pre, post, delay_ms, port, StdpParameters::default(), 1.0)
    }

    /// Wire a plastic connection with explicit parameters and weight.
    ///
    /// Runs the compatibility checks against the target and registers the
    /// connection with its spike archive, so history retention starts here.
    pub fn connect_with(
        &mut self,
        pre: NeuronId,
        post: NeuronId,
        delay_ms: f64,
        port: ReceptorPort,
        params: StdpParameters,
        weight: f64,
    ) -> Result<SynapseId> {
        if !self.arena.contains(pre) {
            return Err(SynfireError::UnknownNeuron(pre));
        }
        let target = DirectTarget::new(post, delay_ms, port);
        let synapse = StdpSynapse::with_parameters(target, params, weight);

        let neuron = self
            .arena
            .get_mut(post)
            .ok_or(SynfireError::UnknownNeuron(post))?;
        synapse.check_connection(neuron, 0.0)?;

        let id = SynapseId(self.connections.len() as u32);
        self.connections.push(Connection {
            sender: pre,
            synapse,
            last_pre_spike: 0.0,
        });
        debug!(target: "network", %pre, %post, synapse = %id, delay_ms, "connection wired");
        Ok(id)
    }

    /// Deliver a pre-synaptic spike through one synapse at time `t` (ms).
    ///
    /// Spike times must be non-decreasing per synapse. The stamped event
    /// lands in the outbox; the returned [`Delivery`] reports the updated
    /// weight and trace.
    pub fn deliver_pre_spike(&mut self, id: SynapseId, t: f64) -> Result<Delivery> {
        let conn = self
            .connections
            .get_mut(id.0 as usize)
            .ok_or(SynfireError::UnknownSynapse(id))?;
        if t < conn.last_pre_spike {
            return Err(SynfireError::NonMonotonicSpike {
                last: conn.last_pre_spike,
                requested: t,
            });
        }

        let neuron = conn
            .synapse
            .target()
            .resolve_mut(&mut self.arena)
            .ok_or(SynfireError::UnresolvedTarget)?;

        let event = SpikeEvent::emitted(conn.sender, t);
        let delivery = conn
            .synapse
            .deliver(&event, conn.last_pre_spike, neuron, &mut self.outbox);
        conn.last_pre_spike = t;

        trace!(
            target: "network",
            synapse = %id,
            t,
            weight = delivery.weight,
            "pre spike delivered"
        );
        Ok(delivery)
    }

    /// Record a post-synaptic spike in the neuron's archive at time `t` (ms).
    pub fn record_post_spike(&mut self, post: NeuronId, t: f64) -> Result<()> {
        let neuron = self
            .arena
            .get_mut(post)
            .ok_or(SynfireError::UnknownNeuron(post))?;
        neuron.record_spike(t)
    }

    pub fn neuron(&self, id: NeuronId) -> Option<&ArchivingNeuron> {
        self.arena.get(id)
    }

    pub fn neuron_mut(&mut self, id: NeuronId) -> Option<&mut ArchivingNeuron> {
        self.arena.get_mut(id)
    }

    pub fn synapse(&self, id: SynapseId) -> Option<&StdpSynapse<DirectTarget>> {
        self.connections.get(id.0 as usize).map(|c| &c.synapse)
    }

    pub fn synapse_mut(&mut self, id: SynapseId) -> Option<&mut StdpSynapse<DirectTarget>> {
        self.connections
            .get_mut(id.0 as usize)
            .map(|c| &mut c.synapse)
    }

    /// Previous delivered pre spike time for a synapse.
    pub fn last_pre_spike(&self, id: SynapseId) -> Option<f64> {
        self.connections.get(id.0 as usize).map(|c| c.last_pre_spike)
    }

    pub fn outbox(&self) -> &[SpikeEvent] {
        &self.outbox
    }

    /// Take all stamped events accumulated so far.
    pub fn drain_outbox(&mut self) -> Vec<SpikeEvent> {
        std::mem::take(&mut self.outbox)
    }
}
