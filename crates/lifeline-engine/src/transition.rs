//! The B3/S23 transition over a sparse population
//!
//! Only live cells and their dead neighbors are examined, so the cost of a
//! step follows the population, not the extent of the grid. Every count is
//! taken against one frozen [`PopulationView`]; applying the result cannot
//! influence the counts it was derived from.

use lifeline_core::{CellAddress, CellKey, PopulationView};
use std::collections::HashSet;

/// Cells to flip for one step
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Transition {
    /// Dead cells with exactly three live neighbors
    pub births: Vec<CellAddress>,
    /// Live cells with fewer than two or more than three live neighbors
    pub deaths: Vec<CellAddress>,
}

impl Transition {
    pub fn is_empty(&self) -> bool {
        self.births.is_empty() && self.deaths.is_empty()
    }
}

/// A live cell with this many live neighbors stays alive
fn survives(live_neighbors: usize) -> bool {
    live_neighbors == 2 || live_neighbors == 3
}

/// A dead cell with this many live neighbors is born
fn is_born(live_neighbors: usize) -> bool {
    live_neighbors == 3
}

/// Compute the next generation's births and deaths from a frozen view
pub fn compute(view: &PopulationView) -> Transition {
    let mut transition = Transition::default();
    // Dead neighbors already evaluated this step
    let mut visited: HashSet<&CellKey> = HashSet::new();

    for cell in view.iter() {
        if !survives(view.count_live(cell.neighbor_keys())) {
            transition.deaths.push(cell.clone());
        }

        for ((x, y), key) in cell.neighbors() {
            if view.contains(key) || !visited.insert(key) {
                continue;
            }
            let candidate = CellAddress::new(x, y);
            if is_born(view.count_live(candidate.neighbor_keys())) {
                transition.births.push(candidate);
            }
        }
    }

    transition
}
