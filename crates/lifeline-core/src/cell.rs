//! Cell addresses and their canonical keys

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;
use std::sync::Arc;

/// Offsets of the Moore neighborhood, in the order neighbor keys are stored.
pub const NEIGHBOR_OFFSETS: [(i64, i64); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// Canonical key of a cell, encoded as `"x,y"`
///
/// The encoding is injective: every coordinate pair has exactly one key and
/// every key decodes to exactly one pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CellKey(String);

impl CellKey {
    /// Encode a coordinate pair
    pub fn from_coords(x: i64, y: i64) -> Self {
        Self(format!("{x},{y}"))
    }

    /// Get the key as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Decode the key back into `(x, y)`
    pub fn coords(&self) -> Result<(i64, i64)> {
        parse_key(&self.0)
    }
}

impl fmt::Display for CellKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for CellKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let (x, y) = parse_key(s)?;
        let key = Self::from_coords(x, y);
        // "01,2" and "+1,2" decode fine but are not what we would have produced
        if key.0 != s {
            return Err(Error::malformed_key(s, "not in canonical form"));
        }
        Ok(key)
    }
}

fn parse_key(key: &str) -> Result<(i64, i64)> {
    let (x, y) = key
        .split_once(',')
        .ok_or_else(|| Error::malformed_key(key, "missing ',' separator"))?;
    let x = x
        .parse::<i64>()
        .map_err(|e| Error::malformed_key(key, format!("bad x coordinate: {e}")))?;
    let y = y
        .parse::<i64>()
        .map_err(|e| Error::malformed_key(key, format!("bad y coordinate: {e}")))?;
    Ok((x, y))
}

/// An immutable grid coordinate
///
/// The canonical key and the eight neighbor keys are computed once at
/// construction; clones share the neighbor keys. Equality and hashing go
/// through the key.
///
/// The grid is unbounded. Neighbors of cells on the `i64` edge wrap around.
#[derive(Clone, Serialize, Deserialize)]
#[serde(from = "(i64, i64)", into = "(i64, i64)")]
pub struct CellAddress {
    x: i64,
    y: i64,
    key: CellKey,
    neighbors: Arc<[CellKey; 8]>,
}

impl CellAddress {
    /// Create a cell address at `(x, y)`
    pub fn new(x: i64, y: i64) -> Self {
        let neighbors = NEIGHBOR_OFFSETS
            .map(|(dx, dy)| CellKey::from_coords(x.wrapping_add(dx), y.wrapping_add(dy)));
        Self {
            x,
            y,
            key: CellKey::from_coords(x, y),
            neighbors: Arc::new(neighbors),
        }
    }

    /// Rebuild an address from its canonical key
    pub fn from_key(key: &CellKey) -> Result<Self> {
        let (x, y) = key.coords()?;
        Ok(Self::new(x, y))
    }

    pub fn x(&self) -> i64 {
        self.x
    }

    pub fn y(&self) -> i64 {
        self.y
    }

    /// Get `(x, y)`
    pub fn coords(&self) -> (i64, i64) {
        (self.x, self.y)
    }

    /// Get the canonical key
    pub fn key(&self) -> &CellKey {
        &self.key
    }

    /// Get the keys of the Moore neighborhood, ordered like [`NEIGHBOR_OFFSETS`]
    pub fn neighbor_keys(&self) -> &[CellKey; 8] {
        &self.neighbors
    }

    /// Iterate over neighbor coordinates paired with their keys
    pub fn neighbors(&self) -> impl Iterator<Item = ((i64, i64), &CellKey)> + '_ {
        NEIGHBOR_OFFSETS
            .iter()
            .zip(self.neighbors.iter())
            .map(move |(&(dx, dy), key)| {
                ((self.x.wrapping_add(dx), self.y.wrapping_add(dy)), key)
            })
    }

    /// Get a new address shifted by `(dx, dy)`
    pub fn translate(&self, dx: i64, dy: i64) -> Self {
        Self::new(self.x.wrapping_add(dx), self.y.wrapping_add(dy))
    }
}

impl PartialEq for CellAddress {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for CellAddress {}

impl Hash for CellAddress {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key.hash(state);
    }
}

impl fmt::Debug for CellAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CellAddress({}, {})", self.x, self.y)
    }
}

impl fmt::Display for CellAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl From<(i64, i64)> for CellAddress {
    fn from((x, y): (i64, i64)) -> Self {
        Self::new(x, y)
    }
}

impl From<CellAddress> for (i64, i64) {
    fn from(cell: CellAddress) -> Self {
        cell.coords()
    }
}
