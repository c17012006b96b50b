// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! STDP pairing-protocol sweep.
//!
//! For each spike-timing offset in a grid, drives a fresh two-neuron circuit
//! through repeated pre/post pairings and prints the synaptic weight it ends
//! up with. The output table is the classic STDP curve: weight change as a
//! function of `dt = t_post - t_pre`. Pass `--json` for a machine-readable
//! dump instead of the table.

use std::env;
use std::path::PathBuf;
use std::process;

use anyhow::{Context, Result};
use rayon::prelude::*;
use serde_json::json;
use tracing::info;
use tracing_subscriber::EnvFilter;

use synfire::prelude::*;

struct SweepArgs {
    config: Option<PathBuf>,
    pairs: u32,
    interval_ms: f64,
    delay_ms: f64,
    dt_max: f64,
    dt_step: f64,
    json: bool,
}

struct SweepPoint {
    dt: f64,
    weight: f64,
    delta: f64,
}

fn usage_and_exit() -> ! {
    eprintln!(
        "Usage: pairing_sweep [--config <path>] [--pairs <n>] [--interval <ms>]\n\
         \x20                    [--delay <ms>] [--dt-max <ms>] [--dt-step <ms>] [--json]\n\n\
         Defaults:\n\
         - pairs: 60 pre/post pairings per offset\n\
         - interval: 1000 ms between pairings\n\
         - delay: 1 ms dendritic delay\n\
         - dt grid: -50..=50 ms in 5 ms steps\n\
         - output: aligned table (use --json for machine-readable output)\n"
    );
    process::exit(2);
}

fn parse_value<T: std::str::FromStr>(value: Option<String>, flag: &str) -> T {
    let Some(raw) = value else { usage_and_exit() };
    raw.parse().unwrap_or_else(|_| {
        eprintln!("Invalid value for {flag}: {raw}");
        usage_and_exit();
    })
}

fn parse_args() -> SweepArgs {
    let mut parsed = SweepArgs {
        config: None,
        pairs: 60,
        interval_ms: 1000.0,
        delay_ms: 1.0,
        dt_max: 50.0,
        dt_step: 5.0,
        json: false,
    };

    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" => {
                let v: String = parse_value(args.next(), "--config");
                parsed.config = Some(PathBuf::from(v));
            }
            "--pairs" => parsed.pairs = parse_value(args.next(), "--pairs"),
            "--interval" => parsed.interval_ms = parse_value(args.next(), "--interval"),
            "--delay" => parsed.delay_ms = parse_value(args.next(), "--delay"),
            "--dt-max" => parsed.dt_max = parse_value(args.next(), "--dt-max"),
            "--dt-step" => parsed.dt_step = parse_value(args.next(), "--dt-step"),
            "--json" => parsed.json = true,
            "-h" | "--help" => usage_and_exit(),
            other => {
                eprintln!("Unknown argument: {other}");
                usage_and_exit();
            }
        }
    }

    if parsed.pairs == 0 || parsed.dt_step <= 0.0 || parsed.interval_ms <= parsed.dt_max.abs() {
        eprintln!("Pairings must overlap: need pairs > 0, dt-step > 0, interval > dt-max");
        usage_and_exit();
    }

    parsed
}

/// Run one pairing protocol: `pairs` pre/post spike pairs at offset `dt`,
/// one final unpaired pre spike to fold in the last post, final weight out.
fn run_protocol(config: &SynfireConfig, dt: f64, args: &SweepArgs) -> Result<SweepPoint> {
    let pre = NeuronId(1);
    let post = NeuronId(2);

    let mut net = Network::new();
    net.add_neuron(pre, config.neuron.tau_minus, config.neuron.receptors)?;
    net.add_neuron(post, config.neuron.tau_minus, config.neuron.receptors)?;
    let synapse = net.connect_with(
        pre,
        post,
        args.delay_ms,
        ReceptorPort(0),
        config.stdp.parameters(),
        config.stdp.weight,
    )?;

    for k in 0..args.pairs {
        let base = (k as f64 + 1.0) * args.interval_ms;
        if dt < 0.0 {
            net.record_post_spike(post, base + dt)?;
            net.deliver_pre_spike(synapse, base)?;
        } else {
            net.deliver_pre_spike(synapse, base)?;
            net.record_post_spike(post, base + dt)?;
        }
    }
    let tail = (args.pairs as f64 + 1.0) * args.interval_ms;
    let last = net.deliver_pre_spike(synapse, tail)?;

    Ok(SweepPoint {
        dt,
        weight: last.weight,
        delta: last.weight - config.stdp.weight,
    })
}

fn main() -> Result<()> {
    let args = parse_args();

    let config = load_config(args.config.as_deref()).context("loading configuration")?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    info!(
        pairs = args.pairs,
        interval_ms = args.interval_ms,
        delay_ms = args.delay_ms,
        "starting pairing sweep"
    );

    let steps = (args.dt_max / args.dt_step).round() as i64;
    let grid: Vec<f64> = (-steps..=steps).map(|i| i as f64 * args.dt_step).collect();

    let mut points = grid
        .par_iter()
        .map(|&dt| run_protocol(&config, dt, &args))
        .collect::<Result<Vec<SweepPoint>>>()?;
    points.sort_by(|a, b| a.dt.total_cmp(&b.dt));

    if args.json {
        let rows: Vec<serde_json::Value> = points
            .iter()
            .map(|p| json!({ "dt_ms": p.dt, "weight": p.weight, "delta": p.delta }))
            .collect();
        let doc = json!({
            "pairs": args.pairs,
            "interval_ms": args.interval_ms,
            "delay_ms": args.delay_ms,
            "start_weight": config.stdp.weight,
            "points": rows,
        });
        println!("{}", serde_json::to_string_pretty(&doc)?);
        return Ok(());
    }

    println!(
        "# {} pairings per offset, {} ms apart, {} ms dendritic delay, start weight {}",
        args.pairs, args.interval_ms, args.delay_ms, config.stdp.weight
    );
    println!("{:>10} {:>14} {:>14}", "dt_ms", "weight", "delta");
    for point in &points {
        println!(
            "{:>10.2} {:>14.6} {:>+14.6}",
            point.dt, point.weight, point.delta
        );
    }

    Ok(())
}
