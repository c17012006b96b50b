// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*
 * Copyright 2025 Neuraville Inc.
 *
 * Licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License.
 */

//! Synapse models and the spike delivery protocol.
//!
//! [`StdpSynapse`] is the plastic connection: a weight, a decaying trace of
//! delivered pre-synaptic spikes, and the power-law update parameters. All
//! mutation of weight and trace happens inside [`StdpSynapse::deliver`],
//! which both forwards the stamped event and returns the updated values, so
//! every weight change is observable at the call site.
//!
//! [`StaticSynapse`] shares the same wiring fields but never learns; it
//! exists for non-plastic edges and keeps the connection tables uniform.

use serde::Serialize;
use serde_json::{Map, Value};
use tracing::debug;

use synfire_neural::plasticity::{depress, facilitate, StdpParameters};
use synfire_neural::types::{
    EventKind, EventSink, PostsynapticHistory, ReceptorPort, Result, SpikeEvent, SynfireError,
};

use crate::target::{DirectTarget, TargetRef};

/// Status keys understood by [`StdpSynapse::import_status`].
pub const KEY_WEIGHT: &str = "weight";
pub const KEY_TAU_PLUS: &str = "tau_plus";
pub const KEY_LAMBDA: &str = "lambda";
pub const KEY_ALPHA: &str = "alpha";
pub const KEY_MU_PLUS: &str = "mu_plus";
pub const KEY_MU_MINUS: &str = "mu_minus";
pub const KEY_W_MAX: &str = "Wmax";
/// Read-only diagnostic reported by [`StdpSynapse::export_status`].
pub const KEY_SIZE_OF: &str = "size_of";

/// Wiring bookkeeping common to every synapse model.
///
/// Owns the target strategy and nothing else; synapse models embed it and
/// delegate their delay/port accessors here.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConnectionFields<T> {
    target: T,
}

impl<T: TargetRef> ConnectionFields<T> {
    pub fn new(target: T) -> Self {
        Self { target }
    }

    pub fn target(&self) -> &T {
        &self.target
    }

    pub fn delay_ms(&self) -> f64 {
        self.target.delay_ms()
    }

    pub fn delay_steps(&self) -> u32 {
        self.target.delay_steps()
    }

    pub fn port(&self) -> ReceptorPort {
        self.target.port()
    }
}

/// Values a delivery left behind: the post-update weight and pre trace.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Delivery {
    pub weight: f64,
    pub trace: f64,
}

/// Side-effect-free view of a synapse's current state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SynapseSnapshot {
    pub weight: f64,
    pub trace: f64,
    pub parameters: StdpParameters,
}

/// Plastic synapse with power-law spike-timing-dependent plasticity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StdpSynapse<T = DirectTarget> {
    base: ConnectionFields<T>,
    weight: f64,
    /// Pre-synaptic trace, sampled at the previous delivered spike.
    kplus: f64,
    params: StdpParameters,
}

impl<T: TargetRef> StdpSynapse<T> {
    /// New synapse with default parameters: weight 1.0, fresh trace.
    pub fn new(target: T) -> Self {
        Self {
            base: ConnectionFields::new(target),
            weight: 1.0,
            kplus: 0.0,
            params: StdpParameters::default(),
        }
    }

    pub fn with_parameters(target: T, params: StdpParameters, weight: f64) -> Self {
        Self {
            base: ConnectionFields::new(target),
            weight,
            kplus: 0.0,
            params,
        }
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }

    /// Pre trace as of the previous delivered spike.
    pub fn trace(&self) -> f64 {
        self.kplus
    }

    pub fn parameters(&self) -> &StdpParameters {
        &self.params
    }

    pub fn set_parameters(&mut self, params: StdpParameters) {
        self.params = params;
    }

    pub fn set_weight(&mut self, weight: f64) {
        self.weight = weight;
    }

    pub fn target(&self) -> &T {
        self.base.target()
    }

    pub fn delay_ms(&self) -> f64 {
        self.base.delay_ms()
    }

    pub fn delay_steps(&self) -> u32 {
        self.base.delay_steps()
    }

    pub fn port(&self) -> ReceptorPort {
        self.base.port()
    }

    pub fn snapshot(&self) -> SynapseSnapshot {
        SynapseSnapshot {
            weight: self.weight,
            trace: self.kplus,
            parameters: self.params,
        }
    }

    /// Verify compatibility with the target and register with its history.
    ///
    /// Must run once before the first delivery. `t_lastspike` is 0.0 for a
    /// fresh connection; the registration reference is shifted back by the
    /// dendritic delay, matching the earliest window edge the first delivery
    /// can query.
    pub fn check_connection<H: PostsynapticHistory>(
        &self,
        target: &mut H,
        t_lastspike: f64,
    ) -> Result<()> {
        if !target.supports_event_kind(EventKind::Spike) {
            return Err(SynfireError::UnsupportedEventKind {
                neuron: target.owner(),
                kind: EventKind::Spike,
            });
        }
        if !target.valid_receptor(self.base.port()) {
            return Err(SynfireError::InvalidReceptor {
                neuron: target.owner(),
                port: self.base.port(),
            });
        }
        target.register_plastic_connection(t_lastspike - self.base.delay_ms());
        debug!(target: "synapse", neuron = %target.owner(), "plastic connection established");
        Ok(())
    }

    /// Deliver one pre-synaptic spike: the only mutation point for weight
    /// and trace.
    ///
    /// Given the incoming `event` (emitted at `t_spike`) and the previous
    /// delivered pre spike `t_lastspike` (0.0 on the first delivery), with
    /// `d` the dendritic delay:
    ///
    /// 1. Query post spikes in the window `(t_lastspike - d, t_spike - d]`.
    /// 2. Facilitate once per returned entry, oldest first, with the pre
    ///    trace decayed from `t_lastspike` to the entry's arrival; an entry
    ///    whose arrival coincides exactly with `t_lastspike` is consumed
    ///    without facilitation.
    /// 3. Depress once with the target's trace decayed to `t_spike - d`.
    /// 4. Stamp the event (receiver, new weight, delay steps, port) and hand
    ///    it to the sink.
    /// 5. Decay the pre trace to `t_spike` and add this spike's increment.
    ///
    /// Each facilitation folds over the weight left by the previous one;
    /// the window is consumed in order, exactly once.
    pub fn deliver<H, S>(
        &mut self,
        event: &SpikeEvent,
        t_lastspike: f64,
        history: &mut H,
        sink: &mut S,
    ) -> Delivery
    where
        H: PostsynapticHistory,
        S: EventSink,
    {
        let t_spike = event.timestamp;
        let d = self.base.delay_ms();

        for entry in history.spike_history(t_lastspike - d, t_spike - d) {
            let minus_dt = t_lastspike - (entry.timestamp + d);
            if minus_dt == 0.0 {
                continue;
            }
            self.weight = facilitate(
                self.weight,
                self.kplus * (minus_dt / self.params.tau_plus).exp(),
                &self.params,
            );
        }

        self.weight = depress(
            self.weight,
            history.decayed_trace(t_spike - d),
            &self.params,
        );

        sink.dispatch(event.stamped(
            history.owner(),
            self.weight,
            self.base.delay_steps(),
            self.base.port(),
        ));

        self.kplus = self.kplus * ((t_lastspike - t_spike) / self.params.tau_plus).exp() + 1.0;

        Delivery {
            weight: self.weight,
            trace: self.kplus,
        }
    }

    /// Export the writable parameter set plus the `size_of` diagnostic.
    pub fn export_status(&self) -> Map<String, Value> {
        let mut status = Map::new();
        status.insert(KEY_WEIGHT.to_string(), Value::from(self.weight));
        status.insert(KEY_TAU_PLUS.to_string(), Value::from(self.params.tau_plus));
        status.insert(KEY_LAMBDA.to_string(), Value::from(self.params.lambda));
        status.insert(KEY_ALPHA.to_string(), Value::from(self.params.alpha));
        status.insert(KEY_MU_PLUS.to_string(), Value::from(self.params.mu_plus));
        status.insert(KEY_MU_MINUS.to_string(), Value::from(self.params.mu_minus));
        status.insert(KEY_W_MAX.to_string(), Value::from(self.params.w_max));
        status.insert(
            KEY_SIZE_OF.to_string(),
            Value::from(std::mem::size_of::<Self>() as u64),
        );
        status
    }

    /// Apply any subset of the writable keys.
    ///
    /// Imports are atomic: an unknown key or a non-numeric value rejects the
    /// whole map and leaves the synapse untouched. `size_of` is accepted and
    /// ignored, so a full exported map re-imports cleanly.
    pub fn import_status(&mut self, status: &Map<String, Value>) -> Result<()> {
        for (key, value) in status {
            if key == KEY_SIZE_OF {
                continue;
            }
            let recognized = matches!(
                key.as_str(),
                KEY_WEIGHT | KEY_TAU_PLUS | KEY_LAMBDA | KEY_ALPHA | KEY_MU_PLUS | KEY_MU_MINUS
                    | KEY_W_MAX
            );
            if !recognized {
                return Err(SynfireError::UnknownParameter { name: key.clone() });
            }
            if !value.as_f64().is_some_and(f64::is_finite) {
                return Err(SynfireError::InvalidParameterValue { name: key.clone() });
            }
        }

        for (key, value) in status {
            let Some(v) = value.as_f64() else { continue };
            match key.as_str() {
                KEY_WEIGHT => self.weight = v,
                KEY_TAU_PLUS => self.params.tau_plus = v,
                KEY_LAMBDA => self.params.lambda = v,
                KEY_ALPHA => self.params.alpha = v,
                KEY_MU_PLUS => self.params.mu_plus = v,
                KEY_MU_MINUS => self.params.mu_minus = v,
                KEY_W_MAX => self.params.w_max = v,
                _ => {}
            }
        }
        debug!(target: "synapse", keys = status.len(), "status imported");
        Ok(())
    }
}

/// Fixed-weight synapse: stamps and forwards, never learns.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StaticSynapse<T = DirectTarget> {
    base: ConnectionFields<T>,
    weight: f64,
}

impl<T: TargetRef> StaticSynapse<T> {
    pub fn new(target: T, weight: f64) -> Self {
        Self {
            base: ConnectionFields::new(target),
            weight,
        }
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }

    pub fn set_weight(&mut self, weight: f64) {
        self.weight = weight;
    }

    pub fn target(&self) -> &T {
        self.base.target()
    }

    pub fn delay_ms(&self) -> f64 {
        self.base.delay_ms()
    }

    pub fn delay_steps(&self) -> u32 {
        self.base.delay_steps()
    }

    pub fn port(&self) -> ReceptorPort {
        self.base.port()
    }

    /// Verify compatibility with the target. Static edges read no history,
    /// so no registration happens.
    pub fn check_connection<H: PostsynapticHistory>(&self, target: &H) -> Result<()> {
        if !target.supports_event_kind(EventKind::Spike) {
            return Err(SynfireError::UnsupportedEventKind {
                neuron: target.owner(),
                kind: EventKind::Spike,
            });
        }
        if !target.valid_receptor(self.base.port()) {
            return Err(SynfireError::InvalidReceptor {
                neuron: target.owner(),
                port: self.base.port(),
            });
        }
        Ok(())
    }

    /// Stamp and forward; no state changes anywhere.
    pub fn deliver<H, S>(&self, event: &SpikeEvent, history: &H, sink: &mut S)
    where
        H: PostsynapticHistory,
        S: EventSink,
    {
        sink.dispatch(event.stamped(
            history.owner(),
            self.weight,
            self.base.delay_steps(),
            self.base.port(),
        ));
    }
}
