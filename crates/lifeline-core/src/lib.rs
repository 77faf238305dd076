//! Lifeline Core - Sparse Game of Life primitives with reversible diffs
//!
//! This crate provides the value types the engine is built from:
//! - Cell addresses and canonical `"x,y"` keys (`CellAddress`, `CellKey`)
//! - The live cell set and its frozen per-step view (`Population`, `PopulationView`)
//! - Generation diff logs with the manual-edit cancellation rule (`Generation`)
//! - The `GenerationHistory` trait that step-back storage implements
//! - Stamping templates and the built-in catalog (`Pattern`, `PatternLibrary`)
//! - Point-in-time population copies (`Snapshot`)
//! - Deterministic RNG for reproducible random boards (`LifeRng`)
//!
//! The grid is unbounded: only live cells are stored, and a step costs time
//! proportional to the live cells plus their neighbors.

mod cell;
mod error;
mod generation;
mod history;
mod pattern;
mod population;
mod rng;
mod snapshot;

pub use cell::{CellAddress, CellKey, NEIGHBOR_OFFSETS};
pub use error::{Error, Result};
pub use generation::{DiffEntry, Generation, MutationEvent};
pub use history::GenerationHistory;
pub use pattern::{Pattern, PatternLibrary};
pub use population::{Population, PopulationView};
pub use rng::LifeRng;
pub use snapshot::{Snapshot, SnapshotSummary};

// Re-export for downstream crates that surface snapshot timestamps
pub use chrono::{DateTime, Utc};
