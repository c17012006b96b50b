// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Error types for synfire operations
//!
//! Failures only exist at setup time (wiring, registration, parameter
//! import). The numeric delivery path is total and never returns these.

use thiserror::Error;

use super::events::EventKind;
use super::ids::{NeuronId, ReceptorPort, SynapseId};

/// Errors reported by setup-time operations across the workspace.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SynfireError {
    #[error("unknown parameter key: {name}")]
    UnknownParameter { name: String },

    #[error("parameter {name} expects a finite number")]
    InvalidParameterValue { name: String },

    #[error("{neuron} does not accept {kind} events")]
    UnsupportedEventKind { neuron: NeuronId, kind: EventKind },

    #[error("{neuron} rejects connections on {port}")]
    InvalidReceptor { neuron: NeuronId, port: ReceptorPort },

    #[error("non-monotonic spike record: last={last}, requested={requested}")]
    NonMonotonicSpike { last: f64, requested: f64 },

    #[error("{0} already exists")]
    DuplicateNeuron(NeuronId),

    #[error("{0} not found")]
    UnknownNeuron(NeuronId),

    #[error("{0} not found")]
    UnknownSynapse(SynapseId),

    #[error("connection target cannot be resolved")]
    UnresolvedTarget,
}

/// Result alias used across the workspace.
pub type Result<T> = core::result::Result<T, SynfireError>;
