use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{Terrain, TerrainFromStrErr, TerrainSet};

/// The kinds of pieces a cell can accept.
///
/// Every piece in this game is a domino, but cells carry an accept-set so
/// that a blocked cell can be expressed as one accepting nothing.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TileType {
    #[serde(rename = "D")]
    Domino,
}

/// A reference to the image a half is drawn with.
///
/// The engine never looks inside; it is carried along for the renderer and
/// the persisted snapshots.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImageRef(String);

impl ImageRef {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ImageRef {
    fn from(s: &str) -> Self {
        ImageRef(String::from(s))
    }
}

impl From<String> for ImageRef {
    fn from(s: String) -> Self {
        ImageRef(s)
    }
}

/// One terrain-bearing half of a domino, either on the board or on the
/// tile currently offered to the player.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Half {
    #[serde(rename = "firstname")]
    pub terrain: TerrainSet,
    #[serde(rename = "img")]
    pub image: ImageRef,
}

impl Half {
    pub fn new(terrain: TerrainSet, image: ImageRef) -> Self {
        Self { terrain, image }
    }

    /// A half of a single terrain, drawn with that terrain's image.
    pub fn of(terrain: Terrain) -> Self {
        Self {
            terrain: TerrainSet::single(terrain),
            image: ImageRef::from(terrain.image()),
        }
    }
}

impl std::fmt::Display for Half {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.terrain)
    }
}

/// Parses the terrain letters of a half. The image is the one of the first
/// terrain in alphabet order.
impl FromStr for Half {
    type Err = TerrainFromStrErr;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let terrain: TerrainSet = s.parse()?;
        let first = terrain.into_iter().next().ok_or(TerrainFromStrErr::Empty)?;
        Ok(Self {
            terrain,
            image: ImageRef::from(first.image()),
        })
    }
}

/// A domino: two halves that always land on two edge-adjacent cells.
///
/// `first` goes to the anchor cell (the one the player points at), `second`
/// to the fill cell derived from the current orientation.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tile {
    pub first: Half,
    pub second: Half,
}

impl Tile {
    pub fn new(first: Half, second: Half) -> Self {
        Self { first, second }
    }

    /// The same tile with its halves swapped, terrains and images alike.
    #[must_use]
    pub fn mirrored(self) -> Self {
        Self {
            first: self.second,
            second: self.first,
        }
    }

    pub fn mirror(&mut self) {
        std::mem::swap(&mut self.first, &mut self.second);
    }
}

impl std::fmt::Display for Tile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}|{}]", self.first, self.second)
    }
}
