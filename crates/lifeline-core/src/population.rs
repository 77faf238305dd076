//! The set of live cells

use crate::{CellAddress, CellKey};
use indexmap::IndexMap;
use serde::Serialize;

/// Sparse set of live cells, keyed by canonical key
///
/// A key is present iff the cell is alive. Removal swaps the last cell into
/// the hole, so it costs O(1) and enumeration order is not insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Population {
    cells: IndexMap<CellKey, CellAddress>,
}

impl Population {
    /// Create an empty population
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a cell alive
    ///
    /// Returns `true` if the cell was not alive before.
    pub fn insert(&mut self, cell: CellAddress) -> bool {
        self.cells.insert(cell.key().clone(), cell).is_none()
    }

    /// Mark a cell dead, returning it if it was alive
    pub fn remove(&mut self, key: &CellKey) -> Option<CellAddress> {
        self.cells.swap_remove(key)
    }

    pub fn contains(&self, key: &CellKey) -> bool {
        self.cells.contains_key(key)
    }

    pub fn get(&self, key: &CellKey) -> Option<&CellAddress> {
        self.cells.get(key)
    }

    /// Number of live cells
    pub fn count(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CellAddress> {
        self.cells.values()
    }

    /// Live cell coordinates, sorted by row then column
    pub fn coordinates(&self) -> Vec<(i64, i64)> {
        let mut coords: Vec<_> = self.cells.values().map(CellAddress::coords).collect();
        coords.sort_by_key(|&(x, y)| (y, x));
        coords
    }

    pub fn clear(&mut self) {
        self.cells.clear();
    }

    /// Capture an independent view of the current cells
    ///
    /// The view does not change when the population is mutated afterwards,
    /// so every neighbor count of a step can be taken against it.
    pub fn snapshot_view(&self) -> PopulationView {
        PopulationView {
            cells: self.cells.clone(),
        }
    }
}

impl FromIterator<CellAddress> for Population {
    fn from_iter<I: IntoIterator<Item = CellAddress>>(iter: I) -> Self {
        let mut population = Population::new();
        for cell in iter {
            population.insert(cell);
        }
        population
    }
}

impl Extend<CellAddress> for Population {
    fn extend<I: IntoIterator<Item = CellAddress>>(&mut self, iter: I) {
        for cell in iter {
            self.insert(cell);
        }
    }
}

/// Read-only copy of a population taken at one instant
#[derive(Debug, Clone)]
pub struct PopulationView {
    cells: IndexMap<CellKey, CellAddress>,
}

impl PopulationView {
    pub fn contains(&self, key: &CellKey) -> bool {
        self.cells.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CellAddress> {
        self.cells.values()
    }

    /// Count how many of the given keys are alive in this view
    pub fn count_live<'a>(&self, keys: impl IntoIterator<Item = &'a CellKey>) -> usize {
        keys.into_iter().filter(|key| self.contains(key)).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_is_idempotent() {
        let mut population = Population::new();
        assert!(population.insert(CellAddress::new(1, 1)));
        assert!(!population.insert(CellAddress::new(1, 1)));
        assert_eq!(population.count(), 1);
    }

    #[test]
    fn test_remove_absent_is_noop() {
        let mut population = Population::new();
        assert!(population.remove(&CellKey::from_coords(0, 0)).is_none());

        population.insert(CellAddress::new(0, 0));
        let removed = population.remove(&CellKey::from_coords(0, 0));
        assert_eq!(removed, Some(CellAddress::new(0, 0)));
        assert!(population.is_empty());
    }

    #[test]
    fn test_remove_moves_only_last_cell() {
        let mut population: Population = [(0, 0), (1, 0), (2, 0), (3, 0)]
            .into_iter()
            .map(CellAddress::from)
            .collect();

        population.remove(&CellKey::from_coords(0, 0));

        // The last cell fills the hole; the ones in between stay put
        let order: Vec<_> = population.iter().map(CellAddress::coords).collect();
        assert_eq!(order, vec![(3, 0), (1, 0), (2, 0)]);
    }

    #[test]
    fn test_view_is_independent() {
        let mut population: Population =
            [(0, 0), (1, 0)].into_iter().map(CellAddress::from).collect();
        let view = population.snapshot_view();

        population.insert(CellAddress::new(5, 5));
        population.remove(&CellKey::from_coords(0, 0));

        assert_eq!(view.len(), 2);
        assert!(view.contains(&CellKey::from_coords(0, 0)));
        assert!(!view.contains(&CellKey::from_coords(5, 5)));
    }

    #[test]
    fn test_count_live() {
        let population: Population = [(0, 0), (1, 0), (0, 1)]
            .into_iter()
            .map(CellAddress::from)
            .collect();
        let view = population.snapshot_view();
        let center = CellAddress::new(1, 1);
        assert_eq!(view.count_live(center.neighbor_keys()), 3);
    }

    #[test]
    fn test_coordinates_sorted() {
        let population: Population = [(2, 1), (0, 1), (5, 0)]
            .into_iter()
            .map(CellAddress::from)
            .collect();
        assert_eq!(population.coordinates(), vec![(5, 0), (0, 1), (2, 1)]);
    }
}
