// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*!
End-to-end STDP protocol tests.

These tests validate:
- The full pairing protocol against a real spike archive
- The delivery arithmetic against a hand-scripted history provider
- Parameter transport through the status surface, across JSON text
- Archive retention and wiring rejection at the network level
*/

use synfire::engine::DirectTarget;
use synfire::prelude::*;

fn two_neuron_circuit(weight: f64) -> (Network, SynapseId) {
    let mut net = Network::new();
    net.add_neuron(NeuronId(1), 20.0, 1).expect("pre neuron");
    net.add_neuron(NeuronId(2), 20.0, 1).expect("post neuron");
    let synapse = net
        .connect_with(
            NeuronId(1),
            NeuronId(2),
            1.0,
            ReceptorPort(0),
            StdpParameters::default(),
            weight,
        )
        .expect("wiring");
    (net, synapse)
}

#[test]
fn test_pairing_protocol_end_to_end() {
    let (mut net, synapse) = two_neuron_circuit(50.0);

    // First pre spike at 10 ms: the archive is empty, nothing changes.
    let first = net.deliver_pre_spike(synapse, 10.0).expect("first delivery");
    assert!((first.weight - 50.0).abs() < 1e-12);
    assert!((first.trace - 1.0).abs() < 1e-12);

    // Post fires at 25 ms, inside the next delivery's window (9, 29].
    net.record_post_spike(NeuronId(2), 25.0).expect("post spike");

    // Second pre spike at 30 ms: facilitate once against the post spike
    // (arrival 26 ms), then depress against the trace decayed to 29 ms.
    let second = net.deliver_pre_spike(synapse, 30.0).expect("second delivery");

    let p = StdpParameters::default();
    let k_fac = 1.0 * (-16.0f64 / 20.0).exp();
    let after_fac = facilitate(50.0, k_fac, &p);
    let k_dep = 1.0 * (-4.0f64 / 20.0).exp();
    let expected = depress(after_fac, k_dep, &p);

    assert!((second.weight - expected).abs() < 1e-12);
    assert!(after_fac > 50.0);
    assert!(second.weight < after_fac);

    // The pre trace decayed over 20 ms and gained this spike's increment.
    let expected_trace = 1.0 * (-20.0f64 / 20.0).exp() + 1.0;
    assert!((second.trace - expected_trace).abs() < 1e-12);

    // Both deliveries were stamped and forwarded.
    let events = net.drain_outbox();
    assert_eq!(events.len(), 2);
    assert!(events.iter().all(|e| e.receiver == Some(NeuronId(2))));
    assert!((events[0].weight - 50.0).abs() < 1e-12);
    assert!((events[1].weight - second.weight).abs() < 1e-12);
}

/// History provider with one post spike at 25.0 ms and its trace pinned to
/// 0.2 at any query from that spike onward.
struct ScriptedHistory {
    entries: Vec<HistoryEntry>,
}

impl ScriptedHistory {
    fn new() -> Self {
        Self {
            entries: vec![HistoryEntry::new(25.0, 1.0)],
        }
    }
}

impl PostsynapticHistory for ScriptedHistory {
    fn owner(&self) -> NeuronId {
        NeuronId(9)
    }

    fn spike_history(&mut self, after: f64, through: f64) -> &[HistoryEntry] {
        let lo = self
            .entries
            .iter()
            .position(|e| e.timestamp > after)
            .unwrap_or(self.entries.len());
        let hi = self
            .entries
            .iter()
            .rposition(|e| e.timestamp <= through)
            .map_or(lo, |i| i + 1);
        let hi = hi.max(lo);
        for entry in &mut self.entries[lo..hi] {
            entry.access_count += 1;
        }
        &self.entries[lo..hi]
    }

    fn decayed_trace(&self, at: f64) -> f64 {
        if at >= 25.0 {
            0.2
        } else {
            0.0
        }
    }

    fn register_plastic_connection(&mut self, _first_read_time: f64) {}

    fn supports_event_kind(&self, kind: EventKind) -> bool {
        kind == EventKind::Spike
    }

    fn valid_receptor(&self, port: ReceptorPort) -> bool {
        port == ReceptorPort(0)
    }
}

#[test]
fn test_delivery_arithmetic_against_scripted_history() {
    let target = DirectTarget::new(NeuronId(9), 1.0, ReceptorPort(0));
    let mut synapse = StdpSynapse::with_parameters(target, StdpParameters::default(), 50.0);
    let mut history = ScriptedHistory::new();
    let mut sink: Vec<SpikeEvent> = Vec::new();

    synapse
        .check_connection(&mut history, 0.0)
        .expect("compatible target");

    // 10 ms: empty window, zero trace, weight untouched; pre trace becomes 1.
    let first = synapse.deliver(&SpikeEvent::emitted(NeuronId(1), 10.0), 0.0, &mut history, &mut sink);
    assert!((first.weight - 50.0).abs() < 1e-12);
    assert!((first.trace - 1.0).abs() < 1e-12);

    // 30 ms: one facilitation with k = exp(-16/20), one depression with 0.2.
    let second = synapse.deliver(&SpikeEvent::emitted(NeuronId(1), 30.0), 10.0, &mut history, &mut sink);
    assert!((second.weight - 50.12421515309449).abs() < 1e-9);

    // Same numbers, composed from the update rules directly.
    let p = StdpParameters::default();
    let expected = depress(facilitate(50.0, (-0.8f64).exp(), &p), 0.2, &p);
    assert!((second.weight - expected).abs() < 1e-12);

    // The post entry was consumed exactly once.
    assert_eq!(history.entries[0].access_count, 1);
    assert_eq!(sink.len(), 2);
    assert_eq!(sink[1].receiver, Some(NeuronId(9)));
}

#[test]
fn test_status_survives_json_round_trip() {
    let target = DirectTarget::new(NeuronId(9), 1.0, ReceptorPort(0));
    let mut synapse = StdpSynapse::with_parameters(
        target,
        StdpParameters {
            tau_plus: 17.5,
            lambda: 0.025,
            alpha: 1.1,
            mu_plus: 0.4,
            mu_minus: 0.7,
            w_max: 250.0,
        },
        42.125,
    );

    let json = serde_json::to_string(&synapse.export_status()).expect("serialize");
    let parsed: serde_json::Map<String, serde_json::Value> =
        serde_json::from_str(&json).expect("parse");

    let mut restored = StdpSynapse::new(target);
    restored.import_status(&parsed).expect("import");

    assert_eq!(synapse.weight(), restored.weight());
    assert_eq!(synapse.parameters(), restored.parameters());
}

#[test]
fn test_rejected_wiring_leaves_no_trace() {
    let mut net = Network::new();
    net.add_neuron(NeuronId(1), 20.0, 1).expect("pre neuron");
    net.add_neuron(NeuronId(2), 20.0, 1).expect("post neuron");

    let err = net
        .connect(NeuronId(1), NeuronId(2), 1.0, ReceptorPort(7))
        .expect_err("receptor out of range");
    assert!(err.to_string().contains("rejects connections"));
    assert_eq!(net.num_synapses(), 0);

    // The failed attempt did not register a reader: with one real synapse,
    // entries are reclaimed as soon as that synapse has seen them.
    let synapse = net
        .connect(NeuronId(1), NeuronId(2), 1.0, ReceptorPort(0))
        .expect("valid wiring");

    net.record_post_spike(NeuronId(2), 5.0).expect("post spike");
    net.deliver_pre_spike(synapse, 20.0).expect("delivery");
    net.record_post_spike(NeuronId(2), 30.0).expect("post spike");
    net.record_post_spike(NeuronId(2), 50.0).expect("post spike");

    let times: Vec<f64> = net
        .neuron(NeuronId(2))
        .expect("post neuron")
        .archive()
        .entries()
        .map(|e| e.timestamp)
        .collect();
    assert_eq!(times, vec![30.0, 50.0]);
}

#[test]
fn test_weight_stays_bounded_over_long_runs() {
    let params = StdpParameters {
        lambda: 0.5,
        alpha: 5.0,
        ..StdpParameters::default()
    };

    let mut net = Network::new();
    net.add_neuron(NeuronId(1), 20.0, 1).expect("pre neuron");
    net.add_neuron(NeuronId(2), 20.0, 1).expect("post neuron");
    let synapse = net
        .connect_with(NeuronId(1), NeuronId(2), 1.0, ReceptorPort(0), params, 50.0)
        .expect("wiring");

    for k in 0..200 {
        let base = (k as f64 + 1.0) * 40.0;
        let delivery = net.deliver_pre_spike(synapse, base).expect("delivery");
        net.record_post_spike(NeuronId(2), base + 5.0).expect("post spike");

        assert!(delivery.weight >= 0.0);
        assert!(delivery.weight <= params.w_max);
        assert!(delivery.weight.is_finite());
    }
}

#[test]
fn test_parameters_are_per_connection() {
    let frozen = StdpParameters {
        lambda: 0.0,
        ..StdpParameters::default()
    };

    let mut net = Network::new();
    net.add_neuron(NeuronId(1), 20.0, 1).expect("pre a");
    net.add_neuron(NeuronId(2), 20.0, 1).expect("pre b");
    net.add_neuron(NeuronId(3), 20.0, 1).expect("post");
    let plastic = net
        .connect_with(
            NeuronId(1),
            NeuronId(3),
            1.0,
            ReceptorPort(0),
            StdpParameters::default(),
            50.0,
        )
        .expect("plastic wiring");
    let inert = net
        .connect_with(NeuronId(2), NeuronId(3), 1.0, ReceptorPort(0), frozen, 50.0)
        .expect("frozen wiring");

    // Prime both pre traces, then pair against the same post spike.
    net.deliver_pre_spike(plastic, 10.0).expect("prime plastic");
    net.deliver_pre_spike(inert, 10.0).expect("prime inert");
    net.record_post_spike(NeuronId(3), 25.0).expect("post spike");

    let plastic_result = net.deliver_pre_spike(plastic, 30.0).expect("plastic delivery");
    let inert_result = net.deliver_pre_spike(inert, 30.0).expect("inert delivery");

    assert!((plastic_result.weight - 50.0).abs() > 1e-6);
    assert!((inert_result.weight - 50.0).abs() < 1e-12);
}
