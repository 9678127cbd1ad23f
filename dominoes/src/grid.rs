use std::collections::BTreeSet;
use std::fs::File;
use std::io::BufReader;
use std::ops::Deref;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{ConfigError, Half, OutOfRange, TileType};

/// The dimensions of a board.
///
/// The grid is stored row-major, so these two numbers are all the index
/// arithmetic needs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawGridConfig")]
pub struct GridConfig {
    row_length: usize,
    total_cells: usize,
}

#[derive(Deserialize)]
struct RawGridConfig {
    row_length: usize,
    total_cells: usize,
}

impl TryFrom<RawGridConfig> for GridConfig {
    type Error = ConfigError;

    fn try_from(raw: RawGridConfig) -> Result<Self, Self::Error> {
        GridConfig::new(raw.row_length, raw.total_cells)
    }
}

impl GridConfig {
    /// The 8 x 8 board.
    pub const EIGHT_BY_EIGHT: GridConfig = GridConfig {
        row_length: 8,
        total_cells: 64,
    };

    /// The 7 x 7 board.
    pub const SEVEN_BY_SEVEN: GridConfig = GridConfig {
        row_length: 7,
        total_cells: 49,
    };

    pub fn new(row_length: usize, total_cells: usize) -> Result<Self, ConfigError> {
        if row_length == 0 {
            return Err(ConfigError::ZeroRowLength);
        }
        if total_cells == 0 {
            return Err(ConfigError::ZeroCells);
        }
        if total_cells % row_length != 0 {
            return Err(ConfigError::RaggedLastRow {
                row_length,
                total_cells,
            });
        }
        Ok(Self {
            row_length,
            total_cells,
        })
    }

    /// Reads a config like `{"row_length": 8, "total_cells": 64}` from a JSON file.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let reader = BufReader::new(File::open(path)?);
        Ok(serde_json::from_reader(reader)?)
    }

    pub fn row_length(&self) -> usize {
        self.row_length
    }

    pub fn total_cells(&self) -> usize {
        self.total_cells
    }

    pub fn contains(&self, index: usize) -> bool {
        index < self.total_cells
    }

    /// The cell next to `index` in the given direction, if there is one.
    ///
    /// Never wraps: the left neighbor of a cell in the first column does not
    /// exist, even though `index - 1` is a valid index.
    pub fn neighbor(&self, index: usize, direction: Direction) -> Option<usize> {
        if !self.contains(index) {
            return None;
        }
        let column = index % self.row_length;
        match direction {
            Direction::Left => (column > 0).then(|| index - 1),
            Direction::Right => (column + 1 < self.row_length).then(|| index + 1),
            Direction::Up => index.checked_sub(self.row_length),
            Direction::Down => Some(index + self.row_length).filter(|&i| self.contains(i)),
        }
    }

    /// `(row, column)` of a cell.
    pub fn coordinates(&self, index: usize) -> (usize, usize) {
        (index / self.row_length, index % self.row_length)
    }
}

/// One step on the grid along a row or a column.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Left,
    Up,
    Right,
    Down,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Left,
        Direction::Up,
        Direction::Right,
        Direction::Down,
    ];
}

/// A single square of the board.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cell {
    /// Which pieces may be put here. Empty for blocked cells.
    ///
    /// Placing a half never changes this.
    pub accepts: BTreeSet<TileType>,
    pub placed_half: Option<Half>,
    pub has_star: bool,
}

impl Cell {
    fn open() -> Self {
        Self {
            accepts: BTreeSet::from([TileType::Domino]),
            placed_half: None,
            has_star: false,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.placed_half.is_none()
    }

    pub fn is_blocked(&self) -> bool {
        self.accepts.is_empty()
    }

    pub fn accepts(&self, tile_type: TileType) -> bool {
        self.accepts.contains(&tile_type)
    }
}

/// The cells of a board, row-major.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    config: GridConfig,
    cells: Vec<Cell>,
}

impl Grid {
    /// Creates a grid where every cell is empty and accepts dominoes.
    pub fn new(config: GridConfig) -> Self {
        Self {
            config,
            cells: vec![Cell::open(); config.total_cells()],
        }
    }

    pub fn config(&self) -> GridConfig {
        self.config
    }

    pub fn at(&self, index: usize) -> Result<&Cell, OutOfRange> {
        self.cells.get(index).ok_or(OutOfRange {
            index,
            total_cells: self.cells.len(),
        })
    }

    /// The placed half on the neighbor of `index` in `direction`, if any.
    pub fn neighbor_half(&self, index: usize, direction: Direction) -> Option<&Half> {
        let neighbor = self.config.neighbor(index, direction)?;
        self.cells[neighbor].placed_half.as_ref()
    }

    /// Returns a copy of this grid with `half` put on the cell at `index`.
    ///
    /// Panics if the cell already holds a half: callers must have checked that.
    pub fn with_half_placed(&self, index: usize, half: Half) -> Result<Grid, OutOfRange> {
        let mut grid = self.clone();
        grid.place_half(index, half)?;
        Ok(grid)
    }

    /// In-place version of [`Self::with_half_placed()`].
    pub fn place_half(&mut self, index: usize, half: Half) -> Result<(), OutOfRange> {
        let total_cells = self.cells.len();
        let cell = self.cells.get_mut(index).ok_or(OutOfRange { index, total_cells })?;
        assert!(
            cell.placed_half.is_none(),
            "Tried to place {} on cell {}, which already holds {:?}",
            half,
            index,
            cell.placed_half
        );
        cell.placed_half = Some(half);
        Ok(())
    }

    /// Mutable access for stamping the initial layout. Out-of-range indices give `None`.
    pub(crate) fn cell_mut(&mut self, index: usize) -> Option<&mut Cell> {
        self.cells.get_mut(index)
    }
}

impl Deref for Grid {
    type Target = [Cell];

    fn deref(&self) -> &Self::Target {
        &self.cells
    }
}
