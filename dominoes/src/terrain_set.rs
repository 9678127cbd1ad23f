use std::iter::FusedIterator;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{Terrain, TerrainFromStrErr, TERRAINS};

/// A compact set of [`Terrain`]s.
///
/// A half drawn from the supply always has exactly one terrain, but seeded
/// halves may carry several (a castle accepting every terrain is `FWC`).
///
/// It serializes as the string of its letters, in alphabet order.
/// ```
/// use dominoes::{Terrain, TerrainSet};
/// let set = TerrainSet::new().insert(Terrain::Crag).insert(Terrain::Forest);
/// assert_eq!(set.to_string(), "FC");
/// assert!(set.contains(Terrain::Crag));
/// assert!(!set.contains(Terrain::Water));
/// ```
///
/// # Note on immutability
///
/// Like the other small value types in this crate, "mutating" methods
/// return a new value instead of changing `self`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct TerrainSet {
    // Only the low 3 bits are used.
    bits: u8,
}

impl TerrainSet {
    /// Creates a new, empty set.
    pub fn new() -> Self {
        Self { bits: 0 }
    }

    pub fn single(terrain: Terrain) -> Self {
        Self::new().insert(terrain)
    }

    pub fn len(self) -> u32 {
        self.bits.count_ones()
    }

    pub fn is_empty(self) -> bool {
        self.bits == 0
    }

    pub fn contains(self, terrain: Terrain) -> bool {
        (self.bits & (1u8 << terrain.to_index())) != 0
    }

    /// Whether every terrain of `other` is also in `self`.
    ///
    /// This is the matching rule between a placed half and a tile half: the
    /// placed half accepts the tile half if it lists all of its terrains.
    /// An empty `other` is never accepted.
    pub fn accepts(self, other: TerrainSet) -> bool {
        !other.is_empty() && (self.bits & other.bits) == other.bits
    }

    #[must_use] // Because users might expect this to be a mutating method
    pub fn insert(self, terrain: Terrain) -> Self {
        Self {
            bits: self.bits | (1u8 << terrain.to_index()),
        }
    }
}

impl FromIterator<Terrain> for TerrainSet {
    fn from_iter<T: IntoIterator<Item = Terrain>>(iter: T) -> Self {
        let mut set = TerrainSet::new();
        for terrain in iter {
            set = set.insert(terrain);
        }
        set
    }
}

impl IntoIterator for TerrainSet {
    type Item = Terrain;
    type IntoIter = TerrainSetIter;

    fn into_iter(self) -> Self::IntoIter {
        TerrainSetIter { bits: self.bits }
    }
}

pub struct TerrainSetIter {
    bits: u8,
}

impl Iterator for TerrainSetIter {
    type Item = Terrain;

    fn next(&mut self) -> Option<Self::Item> {
        if self.bits == 0 {
            return None;
        }
        let idx = self.bits.trailing_zeros() as u8;
        self.bits &= self.bits - 1;
        Terrain::from_index(idx)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.bits.count_ones() as usize;
        (n, Some(n))
    }
}

impl ExactSizeIterator for TerrainSetIter {}

impl FusedIterator for TerrainSetIter {}

impl std::fmt::Display for TerrainSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for terrain in *self {
            write!(f, "{}", terrain)?;
        }
        Ok(())
    }
}

impl FromStr for TerrainSet {
    type Err = TerrainFromStrErr;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(TerrainFromStrErr::Empty);
        }
        s.chars()
            .map(Terrain::try_from)
            .collect::<Result<TerrainSet, _>>()
    }
}

impl From<TerrainSet> for String {
    fn from(set: TerrainSet) -> String {
        set.to_string()
    }
}

impl TryFrom<String> for TerrainSet {
    type Error = TerrainFromStrErr;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

/// Every terrain of the alphabet.
pub fn all_terrains() -> TerrainSet {
    TerrainSet::from_iter(TERRAINS)
}
