//! Headless Life
//!
//! Runs the play loop without a display, then rewinds it.
//! - Configuration loaded from a RON file (optional first argument)
//! - Stamps a glider next to an R-pentomino and saves a snapshot
//! - Plays a fixed number of ticks, steps back, restores the snapshot
//!
//! Set `RUST_LOG=debug` to see every step.

use lifeline_engine::{EngineConfig, EngineEvent, SimulationEngine};
use std::fs;
use std::path::Path;
use std::thread;
use std::time::Instant;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Ticks to play before stopping
const PLAY_TICKS: u64 = 60;
/// Steps to rewind after stopping
const REWIND_STEPS: usize = 10;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(true)
        .init();

    let config = load_config(std::env::args().nth(1))?;
    info!(
        history_size = config.history_size,
        interval_ms = config.interval_ms,
        seed = config.seed,
        "configuration loaded"
    );

    let mut engine = SimulationEngine::with_config(config)?;
    engine.on_reset(|_: &EngineEvent| info!("board cleared"));

    engine.add_pattern("Glider", 0, 0)?;
    engine.add_pattern("R-pentomino", 20, 10)?;
    let start = engine.save_snapshot_named("glider and r-pentomino");
    info!(population = engine.population_count(), "board drawn");

    play(&mut engine, PLAY_TICKS);
    info!(
        generation = engine.generation_count(),
        population = engine.population_count(),
        history_depth = engine.history_depth(),
        "play loop finished"
    );

    let mut rewound = 0;
    while rewound < REWIND_STEPS && engine.step_backward() {
        rewound += 1;
    }
    info!(
        rewound,
        generation = engine.generation_count(),
        population = engine.population_count(),
        "rewound"
    );

    engine.restore_snapshot(start)?;
    info!(
        population = engine.population_count(),
        cells = ?engine.live_cells(),
        "snapshot restored"
    );

    engine.randomize();
    info!(population = engine.population_count(), "random board drawn");

    Ok(())
}

/// Load the engine configuration from a RON file, or use the defaults
fn load_config(path: Option<String>) -> Result<EngineConfig, Box<dyn std::error::Error>> {
    let Some(path) = path else {
        return Ok(EngineConfig::default());
    };
    let source = fs::read_to_string(Path::new(&path))?;
    Ok(EngineConfig::from_ron(&source)?)
}

/// Drive the play loop until `ticks` steps have run
fn play(engine: &mut SimulationEngine, ticks: u64) {
    engine.start();
    let mut played = 0;
    while played < ticks {
        let Some(due) = engine.next_tick_due() else {
            break;
        };
        let now = Instant::now();
        if due > now {
            thread::sleep(due - now);
        }
        if let Some(report) = engine.poll() {
            played += 1;
            if report.population == 0 {
                info!(generation = report.generation, "population died out");
                break;
            }
        }
    }
    engine.stop();
}
