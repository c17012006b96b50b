// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*
 * Copyright 2025 Neuraville Inc.
 *
 * Licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License.
 */

//! Target addressing strategies.
//!
//! A synapse never holds a reference into the arena; it holds a [`TargetRef`]
//! value that can be resolved against one. Two strategies ship:
//!
//! - [`DirectTarget`]: id-keyed lookup with an explicit receptor port and an
//!   exact millisecond delay. The flexible default.
//! - [`CompactTarget`]: dense-slot addressing on the default grid with the
//!   implicit port 0. Half the footprint, for bulk wiring.
//!
//! The strategy is a plain generic parameter on the synapse types, so the
//! choice is made per connection table and costs nothing at delivery time.

use serde::{Deserialize, Serialize};

use synfire_neural::types::{
    ms_to_steps, steps_to_ms, NeuronId, ReceptorPort, DEFAULT_RESOLUTION_MS,
};

use crate::neuron::{ArchivingNeuron, NeuronArena};

/// Where a connection terminates, and with what delay/port.
pub trait TargetRef {
    fn resolve<'a>(&self, arena: &'a NeuronArena) -> Option<&'a ArchivingNeuron>;

    fn resolve_mut<'a>(&self, arena: &'a mut NeuronArena) -> Option<&'a mut ArchivingNeuron>;

    /// Dendritic delay in ms.
    fn delay_ms(&self) -> f64;

    /// Dendritic delay in grid steps.
    fn delay_steps(&self) -> u32;

    /// Receptor port on the target.
    fn port(&self) -> ReceptorPort;
}

/// Id-keyed target with explicit port and exact millisecond delay.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DirectTarget {
    neuron: NeuronId,
    delay_ms: f64,
    port: ReceptorPort,
}

impl DirectTarget {
    pub fn new(neuron: NeuronId, delay_ms: f64, port: ReceptorPort) -> Self {
        Self {
            neuron,
            delay_ms,
            port,
        }
    }

    pub fn neuron(&self) -> NeuronId {
        self.neuron
    }
}

impl TargetRef for DirectTarget {
    fn resolve<'a>(&self, arena: &'a NeuronArena) -> Option<&'a ArchivingNeuron> {
        arena.get(self.neuron)
    }

    fn resolve_mut<'a>(&self, arena: &'a mut NeuronArena) -> Option<&'a mut ArchivingNeuron> {
        arena.get_mut(self.neuron)
    }

    fn delay_ms(&self) -> f64 {
        self.delay_ms
    }

    fn delay_steps(&self) -> u32 {
        ms_to_steps(self.delay_ms, DEFAULT_RESOLUTION_MS)
    }

    fn port(&self) -> ReceptorPort {
        self.port
    }
}

/// Slot-addressed target on the default grid, port fixed to 0.
///
/// Slots come from [`NeuronArena::insert`] and stay stable for the arena's
/// lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompactTarget {
    slot: u32,
    delay_steps: u16,
}

impl CompactTarget {
    pub fn new(slot: u32, delay_steps: u16) -> Self {
        Self { slot, delay_steps }
    }

    pub fn slot(&self) -> u32 {
        self.slot
    }
}

impl TargetRef for CompactTarget {
    fn resolve<'a>(&self, arena: &'a NeuronArena) -> Option<&'a ArchivingNeuron> {
        arena.by_slot(self.slot)
    }

    fn resolve_mut<'a>(&self, arena: &'a mut NeuronArena) -> Option<&'a mut ArchivingNeuron> {
        arena.by_slot_mut(self.slot)
    }

    fn delay_ms(&self) -> f64 {
        steps_to_ms(self.delay_steps as u32, DEFAULT_RESOLUTION_MS)
    }

    fn delay_steps(&self) -> u32 {
        self.delay_steps as u32
    }

    fn port(&self) -> ReceptorPort {
        ReceptorPort(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn arena_with_one() -> NeuronArena {
        let mut arena = NeuronArena::new();
        arena
            .insert(ArchivingNeuron::new(NeuronId(42), 20.0, 1))
            .unwrap();
        arena
    }

    #[test]
    fn both_strategies_resolve_the_same_neuron() {
        let arena = arena_with_one();
        let direct = DirectTarget::new(NeuronId(42), 1.0, ReceptorPort(0));
        let compact = CompactTarget::new(0, 10);

        assert_eq!(direct.resolve(&arena).unwrap().id(), NeuronId(42));
        assert_eq!(compact.resolve(&arena).unwrap().id(), NeuronId(42));
    }

    #[test]
    fn delays_agree_across_representations() {
        let direct = DirectTarget::new(NeuronId(42), 1.0, ReceptorPort(0));
        let compact = CompactTarget::new(0, 10);

        assert_eq!(direct.delay_steps(), 10);
        assert!((compact.delay_ms() - 1.0).abs() < 1e-12);
        assert_eq!(direct.delay_steps(), compact.delay_steps());
    }

    #[test]
    fn unresolvable_targets_yield_none() {
        let arena = arena_with_one();
        assert!(DirectTarget::new(NeuronId(7), 1.0, ReceptorPort(0))
            .resolve(&arena)
            .is_none());
        assert!(CompactTarget::new(3, 10).resolve(&arena).is_none());
    }

    #[test]
    fn compact_representation_is_smaller() {
        use std::mem::size_of;
        assert!(size_of::<CompactTarget>() < size_of::<DirectTarget>());
        assert!(size_of::<CompactTarget>() <= 8);
    }
}
