// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*
 * Copyright 2025 Neuraville Inc.
 *
 * Licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License.
 */

//! SpikeArchive - access-counted post-synaptic spike history for STDP.
//!
//! Key semantics:
//! - Lazy: entries accumulate only while at least one plastic connection is
//!   registered; non-plastic targets keep nothing but their last spike time.
//! - Access-counted: every windowed read bumps the returned entries' counters;
//!   registration pre-bumps everything at or before the connection's initial
//!   reference time, so old entries never wait on a latecomer.
//! - Pruned on write: recording a spike drops leading entries every registered
//!   connection has already read, always keeping the newest one.
//! - Deterministic: out-of-order records are rejected, never reordered.

use std::collections::VecDeque;

use synfire_neural::types::{HistoryEntry, Result, SynfireError};

/// Per-neuron spike history and post trace.
#[derive(Debug, Clone)]
pub struct SpikeArchive {
    entries: VecDeque<HistoryEntry>,
    /// Post trace time constant (ms); a property of the neuron, not the synapse.
    tau_minus: f64,
    /// Running post trace, sampled at `last_spike`.
    kminus: f64,
    last_spike: f64,
    /// Plastic connections reading this history.
    registered: u32,
}

impl SpikeArchive {
    pub fn new(tau_minus: f64) -> Self {
        Self {
            entries: VecDeque::new(),
            tau_minus,
            kminus: 0.0,
            last_spike: 0.0,
            registered: 0,
        }
    }

    pub fn tau_minus(&self) -> f64 {
        self.tau_minus
    }

    pub fn last_spike(&self) -> f64 {
        self.last_spike
    }

    /// Registered plastic connection count.
    pub fn registered(&self) -> u32 {
        self.registered
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Read-only walk over the retained entries, oldest first. Does not touch
    /// access counters.
    pub fn entries(&self) -> impl Iterator<Item = &HistoryEntry> + '_ {
        self.entries.iter()
    }

    /// Record a post-synaptic spike at `t` (ms).
    ///
    /// Spikes must arrive in non-decreasing time order; duplicates at the
    /// same timestamp are allowed and accumulate trace.
    pub fn record_spike(&mut self, t: f64) -> Result<()> {
        if t < self.last_spike {
            return Err(SynfireError::NonMonotonicSpike {
                last: self.last_spike,
                requested: t,
            });
        }

        if self.registered == 0 {
            // Nobody reads history; tracking the last spike time is enough.
            self.last_spike = t;
            return Ok(());
        }

        // Drop leading entries every registered connection has consumed.
        let before = self.entries.len();
        while self.entries.len() > 1
            && self
                .entries
                .front()
                .is_some_and(|e| e.access_count >= self.registered)
        {
            self.entries.pop_front();
        }
        let pruned = before - self.entries.len();
        if pruned > 0 {
            tracing::trace!(target: "archive", pruned, retained = self.entries.len(), "pruned consumed history");
        }

        self.kminus = self.kminus * ((self.last_spike - t) / self.tau_minus).exp() + 1.0;
        self.last_spike = t;
        self.entries.push_back(HistoryEntry::new(t, self.kminus));
        Ok(())
    }

    /// Entries with `after < timestamp <= through`, oldest first.
    ///
    /// Bumps the access counter of every returned entry; the window is
    /// considered consumed by one registered connection per call.
    pub fn spike_history(&mut self, after: f64, through: f64) -> &[HistoryEntry] {
        let entries = self.entries.make_contiguous();

        let mut start = 0;
        while start < entries.len() && entries[start].timestamp <= after {
            start += 1;
        }
        let mut end = start;
        while end < entries.len() && entries[end].timestamp <= through {
            entries[end].access_count += 1;
            end += 1;
        }

        &entries[start..end]
    }

    /// Post trace decayed to `at`, counting spikes strictly before `at`.
    ///
    /// Falls back to the running trace when no entries are retained; with
    /// registration preceding the first recorded spike that value is 0.0.
    pub fn decayed_trace(&self, at: f64) -> f64 {
        if self.entries.is_empty() {
            return self.kminus;
        }
        for entry in self.entries.iter().rev() {
            if at > entry.timestamp {
                return entry.trace * ((entry.timestamp - at) / self.tau_minus).exp();
            }
        }
        0.0
    }

    /// One-time registration of a plastic connection.
    ///
    /// Entries at or before `first_read_time` are marked as already read by
    /// the new connection so they stay prunable.
    pub fn register_plastic_connection(&mut self, first_read_time: f64) {
        for entry in self.entries.iter_mut() {
            if entry.timestamp > first_read_time {
                break;
            }
            entry.access_count += 1;
        }
        self.registered += 1;
        tracing::debug!(
            target: "archive",
            registered = self.registered,
            first_read_time,
            "plastic connection registered"
        );
    }
}

impl Default for SpikeArchive {
    fn default() -> Self {
        Self::new(20.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn archive_with_spikes(times: &[f64]) -> SpikeArchive {
        let mut archive = SpikeArchive::new(20.0);
        archive.register_plastic_connection(0.0);
        for &t in times {
            archive.record_spike(t).unwrap();
        }
        archive
    }

    #[test]
    fn window_is_half_open() {
        let mut archive = archive_with_spikes(&[5.0, 10.0, 15.0]);

        let window = archive.spike_history(5.0, 15.0);
        let times: Vec<f64> = window.iter().map(|e| e.timestamp).collect();
        assert_eq!(times, vec![10.0, 15.0]);
    }

    #[test]
    fn reads_bump_access_counters() {
        let mut archive = archive_with_spikes(&[5.0, 10.0, 15.0]);

        archive.spike_history(0.0, 10.0);
        let counts: Vec<u32> = archive.entries().map(|e| e.access_count).collect();
        assert_eq!(counts, vec![1, 1, 0]);

        archive.spike_history(0.0, 20.0);
        let counts: Vec<u32> = archive.entries().map(|e| e.access_count).collect();
        assert_eq!(counts, vec![2, 2, 1]);
    }

    #[test]
    fn registration_prebumps_entries_at_or_before_reference() {
        let mut archive = archive_with_spikes(&[5.0, 10.0]);

        // Second connection attaches with an initial reference of 7.0; the
        // entry at 5.0 counts as read by it, the one at 10.0 does not.
        archive.register_plastic_connection(7.0);
        let counts: Vec<u32> = archive.entries().map(|e| e.access_count).collect();
        assert_eq!(counts, vec![1, 0]);
        assert_eq!(archive.registered(), 2);
    }

    #[test]
    fn pruning_waits_for_unread_entries() {
        let mut archive = archive_with_spikes(&[1.0, 2.0, 3.0, 4.0, 5.0]);

        // No reads yet: recording keeps everything.
        archive.record_spike(6.0).unwrap();
        assert_eq!(archive.len(), 6);

        // Consume everything, then record once more: leading consumed
        // entries go away, the newest pre-record entry stays.
        archive.spike_history(0.0, 6.0);
        archive.record_spike(7.0).unwrap();
        let times: Vec<f64> = archive.entries().map(|e| e.timestamp).collect();
        assert_eq!(times, vec![6.0, 7.0]);
    }

    #[test]
    fn trace_decays_between_spikes() {
        let archive = archive_with_spikes(&[25.0]);

        // Entry trace is 1.0 at 25.0; four ms later it has decayed by e^(-4/20).
        let expected = 1.0 * (-4.0f64 / 20.0).exp();
        assert!((archive.decayed_trace(29.0) - expected).abs() < 1e-12);
    }

    #[test]
    fn trace_accumulates_across_spikes() {
        let archive = archive_with_spikes(&[10.0, 20.0]);

        // Second entry carries 1.0 * e^(-10/20) + 1.0.
        let at_second = 1.0 * (-10.0f64 / 20.0).exp() + 1.0;
        let expected = at_second * (-1.0f64 / 20.0).exp();
        assert!((archive.decayed_trace(21.0) - expected).abs() < 1e-12);
    }

    #[test]
    fn trace_ignores_entries_at_or_after_the_query() {
        let archive = archive_with_spikes(&[10.0, 29.0]);

        // The entry at exactly 29.0 is invisible to a query at 29.0.
        let expected = 1.0 * ((10.0 - 29.0) / 20.0f64).exp();
        assert!((archive.decayed_trace(29.0) - expected).abs() < 1e-12);

        // Nothing strictly earlier: trace is zero.
        assert!(archive.decayed_trace(10.0) == 0.0);
    }

    #[test]
    fn empty_archive_reports_running_trace() {
        let mut archive = SpikeArchive::new(20.0);
        archive.register_plastic_connection(0.0);
        assert!(archive.decayed_trace(100.0) == 0.0);
    }

    #[test]
    fn unregistered_archive_keeps_no_entries() {
        let mut archive = SpikeArchive::new(20.0);
        archive.record_spike(5.0).unwrap();
        archive.record_spike(9.0).unwrap();

        assert!(archive.is_empty());
        assert!((archive.last_spike() - 9.0).abs() < 1e-12);
    }

    #[test]
    fn out_of_order_records_are_rejected() {
        let mut archive = archive_with_spikes(&[10.0]);

        let err = archive.record_spike(5.0).unwrap_err();
        assert!(matches!(err, SynfireError::NonMonotonicSpike { .. }));

        // Equal timestamps are fine (multiplicity).
        archive.record_spike(10.0).unwrap();
        assert_eq!(archive.len(), 2);
    }
}
