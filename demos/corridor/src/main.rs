//! `corridor` — an SIR epidemic among pedestrians crossing a corridor.
//!
//! A crowd starts scattered over a 40 m × 6 m corridor and a source on the
//! left edge keeps feeding new pedestrians in.  Everyone walks right and
//! leaves at the far edge.  Group traces and compartment counts are written
//! as CSV.
//!
//! Run with:
//!   cargo run -p corridor --release -- [run.json] [output-dir]
//!
//! Log verbosity follows `RUST_LOG` (default `info`).

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result, ensure};
use serde::Deserialize;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use sir_agent::{TopographyAttributes, TopographyBuilder};
use sir_core::{Point, Rect, SimConfig, SimRng, SourceId};
use sir_model::{SirGroupModel, SirParams};
use sir_output::{CsvWriter, SimOutputObserver};
use sir_sim::{CorridorFlow, SimBuilder};

// ── Run file ──────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct CorridorSpec {
    width:               f64,
    height:              f64,
    initial_pedestrians: usize,
    spawn_every_ticks:   u64,
    /// Metres per second.
    speed:               f64,
}

impl Default for CorridorSpec {
    fn default() -> Self {
        Self {
            width:               40.0,
            height:              6.0,
            initial_pedestrians: 60,
            spawn_every_ticks:   4,
            speed:               1.2,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RunFile {
    sim:        SimConfig,
    topography: TopographyAttributes,
    #[serde(rename = "attributesSIRG")]
    sir:        SirParams,
    corridor:   CorridorSpec,
}

fn load_run_file(path: Option<&PathBuf>) -> Result<RunFile> {
    let Some(path) = path else {
        return Ok(RunFile::default());
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading run file {}", path.display()))?;
    let run: RunFile = serde_json::from_str(&text)
        .with_context(|| format!("parsing run file {}", path.display()))?;
    Ok(run)
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .try_init();
}

// ── Main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    init_tracing();

    let mut args = std::env::args().skip(1);
    let run_path = args.next().map(PathBuf::from);
    let out_dir = args.next().map_or_else(|| PathBuf::from("output"), PathBuf::from);

    let run = load_run_file(run_path.as_ref())?;
    run.sir.validate().context("invalid SIR attributes")?;
    let corridor = &run.corridor;
    ensure!(
        corridor.width > 0.0 && corridor.height > 0.0,
        "corridor must have a positive size, got {} x {}",
        corridor.width,
        corridor.height
    );

    // Scatter the starting crowd with a stream of its own so the layout does
    // not depend on the model's draws.
    let mut placement = SimRng::new(run.sim.seed).child(0xC0FF);
    let start_positions: Vec<Point> = (0..corridor.initial_pedestrians)
        .map(|_| {
            Point::new(
                placement.gen_range(0.0..corridor.width * 0.5),
                placement.gen_range(0.0..=corridor.height),
            )
        })
        .collect();

    let topography = TopographyBuilder::new(Rect::new(0.0, 0.0, corridor.width, corridor.height))
        .attributes(run.topography.clone())
        .pedestrians(start_positions)
        .build()
        .context("building topography")?;

    info!(
        pedestrians = topography.len(),
        ticks = run.sim.total_ticks,
        step_secs = run.sim.step_secs,
        "corridor scenario ready"
    );

    let mover = CorridorFlow::new(SourceId(0), corridor.spawn_every_ticks, corridor.speed);
    let mut sim = SimBuilder::new(run.sim.clone(), topography, SirGroupModel::new(), run.sir.clone())
        .mover(mover)
        .build()?;

    std::fs::create_dir_all(&out_dir)
        .with_context(|| format!("creating output directory {}", out_dir.display()))?;
    let writer = CsvWriter::new(&out_dir)?;
    let mut observer = SimOutputObserver::new(writer);

    let started = Instant::now();
    sim.run(&mut observer)?;
    if let Some(e) = observer.take_error() {
        warn!(error = %e, "output incomplete");
    }

    let counts = sim.model.counts();
    info!(
        elapsed_ms = started.elapsed().as_millis() as u64,
        present = sim.topography.len(),
        susceptible = counts.susceptible,
        infected = counts.infected,
        recovered = counts.recovered,
        output = %out_dir.display(),
        "done"
    );
    Ok(())
}
