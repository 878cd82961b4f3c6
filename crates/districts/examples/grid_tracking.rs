//! Grid tracking probe.
//!
//! Purpose
//! - Build a jittered grid plan, walk a tracker across it and report how many
//!   moves needed a full rescan versus the local fast path.
//! - Give a concrete timing for decomposition at a realistic network size.
//!
//! Run: `cargo run -p districts --example grid_tracking --release`

use std::time::Instant;

use districts::api::{grid_specs, GridCfg, Plan, Tracker};
use nalgebra::Vector3;

fn main() {
    let cfg = GridCfg {
        cols: 40,
        rows: 40,
        spacing: 10.0,
        jitter: 0.3,
        seed: 7,
    };
    let specs = grid_specs(cfg);

    let build_start = Instant::now();
    let plan = Plan::new(&specs).expect("grid plans close into districts");
    let build_ms = build_start.elapsed().as_secs_f64() * 1e3;

    let extent = (cfg.cols - 1) as f64 * cfg.spacing;
    let mut tracker =
        Tracker::new(&plan, Vector3::new(1.0, 1.0, 0.0)).expect("plan has roads");
    let steps = 5_000;
    let mut changes = 0usize;
    let mut last = tracker.closest().district;
    let walk_start = Instant::now();
    for k in 0..steps {
        let s = k as f64 / steps as f64;
        let p = Vector3::new(
            extent * s,
            extent * (0.5 + 0.45 * (s * std::f64::consts::TAU * 3.0).sin()),
            0.0,
        );
        let c = tracker.move_to(p).expect("tracked plan has roads");
        if c.district != last {
            changes += 1;
            last = c.district;
        }
    }
    let walk_ms = walk_start.elapsed().as_secs_f64() * 1e3;

    println!(
        "nodes={} roads={} districts={} bounded={}",
        plan.nodes().len(),
        plan.roads().len(),
        plan.districts().len(),
        plan.bounded_districts().count()
    );
    println!("decompose_time_ms={build_ms:.3}");
    println!(
        "moves={steps} district_changes={changes} full_scans={} walk_time_ms={walk_ms:.3}",
        tracker.full_scans()
    );
}
