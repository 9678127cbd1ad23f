use crate::Orientation;

/// A cell index outside of `[0, total_cells)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OutOfRange {
    pub index: usize,
    pub total_cells: usize,
}

impl std::error::Error for OutOfRange {}

impl std::fmt::Display for OutOfRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Cell index {} is outside of the grid of {} cells",
            self.index, self.total_cells
        )
    }
}

/// The error type for [`Board::place()`](crate::Board::place), i.e. why a
/// domino cannot be put down where the player dropped it.
///
/// All of these are expected outcomes of a drop, not failures of the engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlacementError {
    OutOfRange(OutOfRange),
    /// The second half would leave the grid or wrap around into another row.
    OrientationBoundary {
        anchor: usize,
        orientation: Orientation,
    },
    AcceptSetEmpty { index: usize },
    CellOccupied { index: usize },
    TerrainMismatch { anchor: usize, fill: usize },
}

impl std::error::Error for PlacementError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PlacementError::OutOfRange(err) => Some(err),
            _ => None,
        }
    }
}

impl std::fmt::Display for PlacementError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlacementError::OutOfRange(_) => {
                write!(f, "Domino was dropped outside of the grid")
            }
            PlacementError::OrientationBoundary {
                anchor,
                orientation,
            } => write!(
                f,
                "Domino at cell {} in orientation {} would cross the edge of the grid",
                anchor, orientation
            ),
            PlacementError::AcceptSetEmpty { index } => {
                write!(f, "Cell {} is blocked and does not accept dominoes", index)
            }
            PlacementError::CellOccupied { index } => {
                write!(f, "Cell {} already holds a half", index)
            }
            PlacementError::TerrainMismatch { anchor, fill } => write!(
                f,
                "Domino on cells {} and {} touches no matching terrain",
                anchor, fill
            ),
        }
    }
}

impl From<OutOfRange> for PlacementError {
    fn from(err: OutOfRange) -> Self {
        PlacementError::OutOfRange(err)
    }
}

/// The error type for [`GridConfig::new()`](crate::GridConfig::new).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConfigError {
    ZeroRowLength,
    ZeroCells,
    RaggedLastRow {
        row_length: usize,
        total_cells: usize,
    },
}

impl std::error::Error for ConfigError {}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::ZeroRowLength => write!(f, "The row length must be positive"),
            ConfigError::ZeroCells => write!(f, "The grid must have at least one cell"),
            ConfigError::RaggedLastRow {
                row_length,
                total_cells,
            } => write!(
                f,
                "{} cells cannot be split into rows of {}",
                total_cells, row_length
            ),
        }
    }
}
