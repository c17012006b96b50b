// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*
 * Copyright 2025 Neuraville Inc.
 *
 * Licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License.
 */

//! Archiving neurons and the dense neuron arena.
//!
//! An [`ArchivingNeuron`] is the post-synaptic endpoint of plastic wiring:
//! it owns a [`SpikeArchive`] and answers the target-side contract synapses
//! consume. Membrane dynamics live with the host; from the engine's point of
//! view a neuron is its identity, its receptors, and its spike record.

use ahash::AHashMap;

use synfire_neural::types::{
    EventKind, HistoryEntry, NeuronId, PostsynapticHistory, ReceptorPort, Result, SynfireError,
};

use crate::archive::SpikeArchive;

/// Post-synaptic neuron endpoint: identity, receptors, spike archive.
#[derive(Debug, Clone)]
pub struct ArchivingNeuron {
    id: NeuronId,
    archive: SpikeArchive,
    /// Receptor ports are contiguous: valid ports are `0..receptors`.
    receptors: u16,
}

impl ArchivingNeuron {
    pub fn new(id: NeuronId, tau_minus: f64, receptors: u16) -> Self {
        Self {
            id,
            archive: SpikeArchive::new(tau_minus),
            receptors,
        }
    }

    pub fn id(&self) -> NeuronId {
        self.id
    }

    pub fn receptors(&self) -> u16 {
        self.receptors
    }

    pub fn archive(&self) -> &SpikeArchive {
        &self.archive
    }

    /// Record an emitted spike at `t` (ms) in the archive.
    pub fn record_spike(&mut self, t: f64) -> Result<()> {
        self.archive.record_spike(t)
    }
}

impl PostsynapticHistory for ArchivingNeuron {
    fn owner(&self) -> NeuronId {
        self.id
    }

    fn spike_history(&mut self, after: f64, through: f64) -> &[HistoryEntry] {
        self.archive.spike_history(after, through)
    }

    fn decayed_trace(&self, at: f64) -> f64 {
        self.archive.decayed_trace(at)
    }

    fn register_plastic_connection(&mut self, first_read_time: f64) {
        self.archive.register_plastic_connection(first_read_time);
    }

    fn supports_event_kind(&self, kind: EventKind) -> bool {
        matches!(kind, EventKind::Spike)
    }

    fn valid_receptor(&self, port: ReceptorPort) -> bool {
        port.0 < self.receptors
    }
}

/// Dense neuron storage with id-keyed lookup.
///
/// Slots are stable for the arena's lifetime; compact target addressing
/// relies on that.
#[derive(Debug, Default)]
pub struct NeuronArena {
    neurons: Vec<ArchivingNeuron>,
    index: AHashMap<NeuronId, u32>,
}

impl NeuronArena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            neurons: Vec::with_capacity(capacity),
            index: AHashMap::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.neurons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.neurons.is_empty()
    }

    pub fn contains(&self, id: NeuronId) -> bool {
        self.index.contains_key(&id)
    }

    /// Insert a neuron, returning its slot.
    pub fn insert(&mut self, neuron: ArchivingNeuron) -> Result<u32> {
        let id = neuron.id();
        if self.index.contains_key(&id) {
            return Err(SynfireError::DuplicateNeuron(id));
        }
        let slot = self.neurons.len() as u32;
        self.index.insert(id, slot);
        self.neurons.push(neuron);
        Ok(slot)
    }

    pub fn slot_of(&self, id: NeuronId) -> Option<u32> {
        self.index.get(&id).copied()
    }

    pub fn get(&self, id: NeuronId) -> Option<&ArchivingNeuron> {
        self.slot_of(id).and_then(|s| self.neurons.get(s as usize))
    }

    pub fn get_mut(&mut self, id: NeuronId) -> Option<&mut ArchivingNeuron> {
        let slot = self.slot_of(id)?;
        self.neurons.get_mut(slot as usize)
    }

    pub fn by_slot(&self, slot: u32) -> Option<&ArchivingNeuron> {
        self.neurons.get(slot as usize)
    }

    pub fn by_slot_mut(&mut self, slot: u32) -> Option<&mut ArchivingNeuron> {
        self.neurons.get_mut(slot as usize)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ArchivingNeuron> {
        self.neurons.iter()
    }
}
