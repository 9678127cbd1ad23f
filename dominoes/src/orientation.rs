use serde::{Deserialize, Serialize};

use crate::{Direction, GridConfig};

/// How the offered domino lies relative to the anchor cell, named after the
/// side the first half is on.
///
/// In the starting orientation `Left`, the first half is on the anchor and
/// the second half on the cell to its right.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    Left,
    Top,
    Right,
    Bottom,
}

impl Orientation {
    /// In the order a left turn goes through them.
    pub const ALL: [Orientation; 4] = [
        Orientation::Left,
        Orientation::Top,
        Orientation::Right,
        Orientation::Bottom,
    ];

    /// The direction from the anchor cell to the fill cell.
    pub fn direction(self) -> Direction {
        match self {
            Orientation::Left => Direction::Right,
            Orientation::Top => Direction::Down,
            Orientation::Right => Direction::Left,
            Orientation::Bottom => Direction::Up,
        }
    }

    /// One quarter turn counter-clockwise.
    pub fn counter_clockwise(self) -> Self {
        match self {
            Orientation::Left => Orientation::Top,
            Orientation::Top => Orientation::Right,
            Orientation::Right => Orientation::Bottom,
            Orientation::Bottom => Orientation::Left,
        }
    }

    /// One quarter turn clockwise.
    pub fn clockwise(self) -> Self {
        match self {
            Orientation::Left => Orientation::Bottom,
            Orientation::Bottom => Orientation::Right,
            Orientation::Right => Orientation::Top,
            Orientation::Top => Orientation::Left,
        }
    }

    /// Number of left turns needed to get here from [`Orientation::Left`].
    pub fn turn_count(self) -> u8 {
        match self {
            Orientation::Left => 0,
            Orientation::Top => 1,
            Orientation::Right => 2,
            Orientation::Bottom => 3,
        }
    }
}

impl std::fmt::Display for Orientation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Orientation::Left => "left",
            Orientation::Top => "top",
            Orientation::Right => "right",
            Orientation::Bottom => "bottom",
        };
        write!(f, "{}", name)
    }
}

/// The result of a rotation step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rotation {
    pub orientation: Orientation,
    /// Whether the halves of the offered tile must be swapped, so that a
    /// full turn of four steps leaves the tile as it was.
    pub mirror: bool,
}

/// Tracks how the offered domino is turned.
///
/// The turn count is fully determined by the orientation, so only the
/// orientation is stored.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OrientationController {
    orientation: Orientation,
}

impl OrientationController {
    pub fn new() -> Self {
        Self {
            orientation: Orientation::Left,
        }
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn turn_count(&self) -> u8 {
        self.orientation.turn_count()
    }

    /// Turns counter-clockwise. Mirrors on the steps leaving turn count 0 and 2.
    pub fn rotate_left(&mut self) -> Rotation {
        let mirror = self.turn_count() % 2 == 0;
        self.orientation = self.orientation.counter_clockwise();
        Rotation {
            orientation: self.orientation,
            mirror,
        }
    }

    /// Turns clockwise. Mirrors on the steps leaving turn count 1 and 3.
    pub fn rotate_right(&mut self) -> Rotation {
        let mirror = self.turn_count() % 2 == 1;
        self.orientation = self.orientation.clockwise();
        Rotation {
            orientation: self.orientation,
            mirror,
        }
    }

    /// The cell the second half lands on when the first half is put on
    /// `anchor`, or `None` if that would leave the grid or wrap into
    /// another row.
    pub fn fill_index(&self, config: GridConfig, anchor: usize) -> Option<usize> {
        config.neighbor(anchor, self.orientation.direction())
    }
}

impl Default for OrientationController {
    fn default() -> Self {
        Self::new()
    }
}
