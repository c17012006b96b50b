// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*
 * Copyright 2025 Neuraville Inc.
 *
 * Licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License.
 */

//! # Plasticity Module
//!
//! Pure synaptic learning math. State and delivery live in `synfire-engine`.

pub mod stdp;

pub use stdp::{depress, facilitate, StdpParameters};
