//! Stamping templates
//!
//! A [`Pattern`] is a named list of relative offsets. The
//! [`PatternLibrary::standard`] catalog is built once per process and shared;
//! custom catalogs can be loaded from RON:
//!
//! ```ron
//! [
//!     (name: "Glider", cells: [(1, 0), (2, 1), (0, 2), (1, 2), (2, 2)]),
//! ]
//! ```

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::{Arc, OnceLock};

/// A named set of cell offsets
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pattern {
    name: String,
    cells: Vec<(i64, i64)>,
}

impl Pattern {
    pub fn new(name: impl Into<String>, cells: Vec<(i64, i64)>) -> Self {
        Self {
            name: name.into(),
            cells,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Offsets relative to the stamping origin, in declaration order
    pub fn cells(&self) -> &[(i64, i64)] {
        &self.cells
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Get the `(min, max)` corners of the offsets, or `None` if empty
    pub fn bounds(&self) -> Option<((i64, i64), (i64, i64))> {
        let (&(x0, y0), rest) = self.cells.split_first()?;
        Some(rest.iter().fold(
            ((x0, y0), (x0, y0)),
            |((min_x, min_y), (max_x, max_y)), &(x, y)| {
                ((min_x.min(x), min_y.min(y)), (max_x.max(x), max_y.max(y)))
            },
        ))
    }
}

/// Immutable catalog of patterns with unique names
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PatternLibrary {
    patterns: Vec<Pattern>,
}

impl PatternLibrary {
    /// Build a catalog, rejecting empty names, empty patterns and duplicates
    pub fn new(patterns: Vec<Pattern>) -> Result<Self> {
        let mut seen = HashSet::new();
        for pattern in &patterns {
            if pattern.name.trim().is_empty() {
                return Err(Error::InvalidPattern("pattern name is empty".to_string()));
            }
            if pattern.is_empty() {
                return Err(Error::InvalidPattern(format!(
                    "pattern {:?} has no cells",
                    pattern.name
                )));
            }
            if !seen.insert(pattern.name.as_str()) {
                return Err(Error::InvalidPattern(format!(
                    "duplicate pattern name {:?}",
                    pattern.name
                )));
            }
        }
        Ok(Self { patterns })
    }

    /// Parse a catalog from a RON list of patterns
    pub fn from_ron(source: &str) -> Result<Self> {
        let patterns: Vec<Pattern> = ron::from_str(source)?;
        Self::new(patterns)
    }

    /// The built-in catalog, shared process-wide
    pub fn standard() -> Arc<PatternLibrary> {
        static STANDARD: OnceLock<Arc<PatternLibrary>> = OnceLock::new();
        Arc::clone(STANDARD.get_or_init(|| {
            Arc::new(Self {
                patterns: standard_patterns(),
            })
        }))
    }

    /// Look up a pattern by exact name
    pub fn get(&self, name: &str) -> Option<&Pattern> {
        self.patterns.iter().find(|p| p.name == name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.patterns.iter().map(|p| p.name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Pattern> {
        self.patterns.iter()
    }

    pub fn as_slice(&self) -> &[Pattern] {
        &self.patterns
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

fn standard_patterns() -> Vec<Pattern> {
    vec![
        Pattern::new(
            "Aircraft Carrier",
            vec![(1, 0), (2, 0), (1, 1), (4, 1), (3, 2), (4, 2)],
        ),
        Pattern::new("Block", vec![(0, 0), (1, 0), (0, 1), (1, 1)]),
        Pattern::new(
            "Beehive",
            vec![(1, 0), (2, 0), (0, 1), (3, 1), (1, 2), (2, 2)],
        ),
        Pattern::new(
            "Loaf",
            vec![(1, 0), (2, 0), (0, 1), (3, 1), (1, 2), (3, 2), (2, 3)],
        ),
        Pattern::new("Boat", vec![(0, 0), (1, 0), (0, 1), (2, 1), (1, 2)]),
        Pattern::new("Blinker", vec![(0, 1), (1, 1), (2, 1)]),
        Pattern::new(
            "Toad",
            vec![(1, 0), (2, 0), (3, 0), (0, 1), (1, 1), (2, 1)],
        ),
        Pattern::new(
            "Beacon",
            vec![(0, 0), (1, 0), (0, 1), (3, 2), (2, 3), (3, 3)],
        ),
        Pattern::new("Glider", vec![(1, 0), (2, 1), (0, 2), (1, 2), (2, 2)]),
        Pattern::new(
            "Lightweight Spaceship",
            vec![
                (1, 0),
                (4, 0),
                (0, 1),
                (0, 2),
                (4, 2),
                (0, 3),
                (1, 3),
                (2, 3),
                (3, 3),
            ],
        ),
        Pattern::new("R-pentomino", vec![(1, 0), (2, 0), (0, 1), (1, 1), (1, 2)]),
        Pattern::new(
            "Diehard",
            vec![(6, 0), (0, 1), (1, 1), (1, 2), (5, 2), (6, 2), (7, 2)],
        ),
        Pattern::new(
            "Acorn",
            vec![(1, 0), (3, 1), (0, 2), (1, 2), (4, 2), (5, 2), (6, 2)],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_catalog_is_valid() {
        let standard = PatternLibrary::standard();
        let rebuilt = PatternLibrary::new(standard.as_slice().to_vec()).unwrap();
        assert_eq!(rebuilt.len(), standard.len());
        assert!(standard.get("Aircraft Carrier").is_some());
        assert!(standard.get("Glider").is_some());
        assert!(standard.get("glider").is_none());
    }

    #[test]
    fn test_standard_is_shared() {
        let a = PatternLibrary::standard();
        let b = PatternLibrary::standard();
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn test_bounds() {
        let standard = PatternLibrary::standard();
        let glider = standard.get("Glider").unwrap();
        assert_eq!(glider.bounds(), Some(((0, 0), (2, 2))));
        assert_eq!(glider.len(), 5);
        assert_eq!(Pattern::new("empty", vec![]).bounds(), None);
    }

    #[test]
    fn test_from_ron() {
        let source = r#"[
            (name: "Pair", cells: [(0, 0), (1, 0)]),
            (name: "Dot", cells: [(0, 0)]),
        ]"#;
        let library = PatternLibrary::from_ron(source).unwrap();
        assert_eq!(library.names().collect::<Vec<_>>(), vec!["Pair", "Dot"]);
        assert_eq!(library.get("Pair").unwrap().cells(), &[(0i64, 0i64), (1, 0)][..]);
    }

    #[test]
    fn test_from_ron_syntax_error() {
        let result = PatternLibrary::from_ron("[(name: \"Broken\", cells: [(0, 0)]");
        assert!(matches!(result, Err(Error::Ron(_))));
    }

    #[test]
    fn test_rejects_duplicates_and_empty() {
        let duplicate = PatternLibrary::new(vec![
            Pattern::new("A", vec![(0, 0)]),
            Pattern::new("A", vec![(1, 1)]),
        ]);
        assert!(matches!(duplicate, Err(Error::InvalidPattern(_))));

        let empty = PatternLibrary::new(vec![Pattern::new("Nothing", vec![])]);
        assert!(matches!(empty, Err(Error::InvalidPattern(_))));

        let unnamed = PatternLibrary::new(vec![Pattern::new("  ", vec![(0, 0)])]);
        assert!(matches!(unnamed, Err(Error::InvalidPattern(_))));
    }
}
