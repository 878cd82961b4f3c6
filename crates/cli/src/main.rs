use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use districts::api::{grid_specs, GridCfg, Tracker};
use districts::Vec3;
use serde::Serialize;
use serde_json::json;
use std::path::{Path, PathBuf};
use tracing::Level;
use tracing_subscriber::fmt::SubscriberBuilder;

mod plan_file;
mod provenance;

use plan_file::{decomposition, route_summary, PlanFile, TrackStep};
use provenance::{write_sidecar, Payload};

#[derive(Parser)]
#[command(name = "cli")]
#[command(about = "District decomposition runner")]
struct Cmd {
    /// Raise log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Write a jittered grid plan file
    Grid {
        #[arg(long, default_value_t = 4)]
        cols: usize,
        #[arg(long, default_value_t = 4)]
        rows: usize,
        #[arg(long, default_value_t = 10.0)]
        spacing: f64,
        #[arg(long, default_value_t = 0.25)]
        jitter: f64,
        #[arg(long, default_value_t = 0)]
        seed: u64,
        #[arg(long)]
        out: PathBuf,
    },
    /// Build a plan and summarise its districts
    Decompose {
        #[arg(long)]
        input: PathBuf,
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Enumerate routes between two named nodes
    Routes {
        #[arg(long)]
        input: PathBuf,
        #[arg(long)]
        from: String,
        #[arg(long)]
        to: String,
        #[arg(long)]
        max_nodes: Option<usize>,
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Track a sequence of positions, one `--at x,y[,z]` each
    Track {
        #[arg(long)]
        input: PathBuf,
        #[arg(long = "at", value_parser = parse_point, required = true)]
        at: Vec<Vec3<f64>>,
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Print a small provenance JSON block
    Report,
}

fn main() -> Result<()> {
    let cmd = Cmd::parse();
    let level = match cmd.verbose {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    SubscriberBuilder::default()
        .with_target(false)
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
    match cmd.action {
        Action::Grid {
            cols,
            rows,
            spacing,
            jitter,
            seed,
            out,
        } => grid(
            GridCfg {
                cols,
                rows,
                spacing,
                jitter,
                seed,
            },
            &out,
        ),
        Action::Decompose { input, out } => decompose(&input, out.as_deref()),
        Action::Routes {
            input,
            from,
            to,
            max_nodes,
            out,
        } => routes(&input, &from, &to, max_nodes, out.as_deref()),
        Action::Track { input, at, out } => track(&input, &at, out.as_deref()),
        Action::Report => report(),
    }
}

fn grid(cfg: GridCfg, out: &Path) -> Result<()> {
    if cfg.cols < 2 || cfg.rows < 2 {
        bail!("a grid needs at least 2 columns and 2 rows");
    }
    tracing::info!(cols = cfg.cols, rows = cfg.rows, seed = cfg.seed, "grid");
    let file = PlanFile::from_specs(&grid_specs(cfg));
    let params = json!({
        "cols": cfg.cols,
        "rows": cfg.rows,
        "spacing": cfg.spacing,
        "jitter": cfg.jitter,
        "seed": cfg.seed,
    });
    emit(&file, Some(out), Payload::new("grid", params))
}

fn decompose(input: &Path, out: Option<&Path>) -> Result<()> {
    let plan = PlanFile::load(input)?.build()?;
    tracing::info!(
        nodes = plan.nodes().len(),
        roads = plan.roads().len(),
        districts = plan.districts().len(),
        "decompose"
    );
    let summary = decomposition(&plan)?;
    let params = json!({ "input": input.to_string_lossy() });
    emit(&summary, out, Payload::new("decompose", params))
}

fn routes(
    input: &Path,
    from: &str,
    to: &str,
    max_nodes: Option<usize>,
    out: Option<&Path>,
) -> Result<()> {
    let plan = PlanFile::load(input)?.build()?;
    let a = plan.node_id(from)?;
    let b = plan.node_id(to)?;
    let found = plan.all_routes(a, b, max_nodes)?;
    tracing::info!(from, to, routes = found.len(), "routes");
    let summaries = found
        .iter()
        .map(|r| route_summary(&plan, r))
        .collect::<Result<Vec<_>>>()?;
    let params = json!({
        "input": input.to_string_lossy(),
        "from": from,
        "to": to,
        "max_nodes": max_nodes,
    });
    emit(&summaries, out, Payload::new("routes", params))
}

fn track(input: &Path, at: &[Vec3<f64>], out: Option<&Path>) -> Result<()> {
    let plan = PlanFile::load(input)?.build()?;
    let Some((first, rest)) = at.split_first() else {
        bail!("track needs at least one position");
    };
    let mut tracker = Tracker::new(&plan, *first)?;
    let mut steps = vec![step(&plan, *first, tracker.closest())?];
    for p in rest {
        let c = tracker.move_to(*p)?;
        steps.push(step(&plan, *p, c)?);
    }
    tracing::info!(
        moves = at.len(),
        full_scans = tracker.full_scans(),
        "track"
    );
    let params = json!({
        "input": input.to_string_lossy(),
        "positions": at.iter().map(|p| [p.x, p.y, p.z]).collect::<Vec<_>>(),
    });
    emit(&steps, out, Payload::new("track", params))
}

fn step(plan: &districts::api::Plan, at: Vec3<f64>, c: districts::api::Closest) -> Result<TrackStep> {
    Ok(TrackStep {
        at: [at.x, at.y, at.z],
        road: plan.road(c.road)?.name.clone(),
        side: format!("{:?}", c.side),
        point: [c.point.x, c.point.y, c.point.z],
        district: c.district.0,
    })
}

fn report() -> Result<()> {
    println!("{}", serde_json::to_string_pretty(&provenance::summary())?);
    Ok(())
}

/// Print `value` to stdout, or write it to `out` with a provenance sidecar.
fn emit<T: Serialize>(value: &T, out: Option<&Path>, payload: Payload) -> Result<()> {
    let bytes = serde_json::to_vec_pretty(value)?;
    let Some(out) = out else {
        println!("{}", String::from_utf8_lossy(&bytes));
        return Ok(());
    };
    if let Some(parent) = out.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(out, bytes).with_context(|| format!("writing {}", out.display()))?;
    let sidecar = write_sidecar(out, payload)?;
    tracing::info!(out = %out.display(), sidecar = %sidecar.display(), "wrote");
    Ok(())
}

fn parse_point(s: &str) -> Result<Vec3<f64>, String> {
    let parts = s
        .split(',')
        .map(|t| t.trim().parse::<f64>().map_err(|e| format!("`{t}`: {e}")))
        .collect::<Result<Vec<_>, _>>()?;
    match parts.as_slice() {
        [x, y] => Ok(Vec3::new(*x, *y, 0.0)),
        [x, y, z] => Ok(Vec3::new(*x, *y, *z)),
        _ => Err(format!("expected `x,y` or `x,y,z`, got `{s}`")),
    }
}
