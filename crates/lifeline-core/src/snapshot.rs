//! Point-in-time copies of a population

use crate::{CellAddress, CellKey, Population};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// An immutable copy of a population
///
/// The captured cells are owned by the snapshot; later mutation of the
/// population it was taken from does not affect it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    name: String,
    population: Population,
    created: DateTime<Utc>,
    total_cells: usize,
}

impl Snapshot {
    /// Capture a population now
    pub fn capture(name: impl Into<String>, population: &Population) -> Self {
        Self::capture_at(name, population, Utc::now())
    }

    /// Capture a population with an explicit creation time
    pub fn capture_at(
        name: impl Into<String>,
        population: &Population,
        created: DateTime<Utc>,
    ) -> Self {
        Self {
            name: name.into(),
            population: population.clone(),
            created,
            total_cells: population.count(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn created(&self) -> DateTime<Utc> {
        self.created
    }

    /// Cell count at capture time
    pub fn total_cells(&self) -> usize {
        self.total_cells
    }

    /// Captured cells in capture order
    pub fn cells(&self) -> impl Iterator<Item = &CellAddress> {
        self.population.iter()
    }

    pub fn contains(&self, key: &CellKey) -> bool {
        self.population.contains(key)
    }

    pub fn population(&self) -> &Population {
        &self.population
    }

    pub fn summary(&self) -> SnapshotSummary {
        SnapshotSummary {
            name: self.name.clone(),
            created: self.created,
            total_cells: self.total_cells,
        }
    }
}

/// What a snapshot list shows: name, timestamp and count
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SnapshotSummary {
    pub name: String,
    pub created: DateTime<Utc>,
    pub total_cells: usize,
}
