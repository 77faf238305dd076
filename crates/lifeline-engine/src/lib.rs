//! Lifeline Engine - Time-travelling Game of Life
//!
//! This crate drives the lifeline-core primitives: it applies the B3/S23
//! rule, records every birth and death so steps can be undone, and runs a
//! play loop that a host event loop polls.
//!
//! ## Architecture
//!
//! ```text
//! SimulationEngine
//!  │
//!  ├── Population ← live cells only
//!  ├── Generation ← diff since the last committed step
//!  ├── GenerationHistory (trait) ← committed generations, bounded
//!  │    └── HistoryBuffer (default)
//!  ├── SnapshotStore ← named copies of the population
//!  ├── PlayTimer ← cancellable periodic trigger
//!  └── Listeners ← change notifications
//! ```
//!
//! ## Key Components
//!
//! - [`SimulationEngine`]: Owns all state; every operation is synchronous
//! - [`EngineConfig`]: History bound, play interval, RNG seed, randomize window
//! - [`transition::compute`]: One B3/S23 step against a frozen view
//! - [`PlayTimer`]: Play-loop trigger with stale-firing detection
//! - [`Listeners`]: Observer registry for [`EngineEvent`]s

mod config;
mod engine;
mod error;
mod observer;
mod snapshots;
mod timer;
pub mod transition;

pub use config::{
    EngineConfig, RandomizeConfig, DEFAULT_HISTORY_SIZE, DEFAULT_INTERVAL_MS, DEFAULT_SEED,
};
pub use engine::{SimulationEngine, Status, StepReport};
pub use error::{Error, Result};
pub use observer::{EngineEvent, ListenerId, Listeners};
pub use snapshots::SnapshotStore;
pub use timer::{PlayTimer, TimerId};
pub use transition::Transition;

// Re-export the core types that appear in the engine's API
pub use lifeline_core::{
    CellAddress, CellKey, Generation, GenerationHistory, MutationEvent, Pattern, PatternLibrary,
    Population, Snapshot, SnapshotSummary,
};
pub use lifeline_history::{HistoryBuffer, HistoryStats};
