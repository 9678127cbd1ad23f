use crate::{Direction, Grid, Orientation, OutOfRange, PlacementError, TerrainSet, TileType};

/// Which kinds of edges of a candidate domino touch a matching half.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EdgeMatches {
    pub vertical: bool,
    pub horizontal: bool,
}

impl EdgeMatches {
    pub fn any(self) -> bool {
        self.vertical || self.horizontal
    }
}

/// Decides whether a domino with terrains `first` and `second` may be put
/// with its first half on `anchor`, lying in `orientation`.
///
/// On success, returns the fill cell, i.e. where the second half goes.
///
/// This is the only implementation of the placement rules; the hover preview
/// and the drop both go through it. It never mutates anything.
///
/// The rules:
/// 1. Both cells exist, accept dominoes and are empty, and the fill cell is
///    the neighbor of the anchor in `orientation.direction()` within
///    the same row or column.
/// 2. At least one of the up to eight cells edge-adjacent to the domino holds
///    a half whose terrains include the terrain of the domino half it touches.
///    Neighbors are looked up without wrapping around the grid's edges, so a
///    half at the end of one row never counts as touching the start of the
///    next one.
pub fn check_placement(
    grid: &Grid,
    anchor: usize,
    orientation: Orientation,
    first: TerrainSet,
    second: TerrainSet,
) -> Result<usize, PlacementError> {
    let config = grid.config();
    if !config.contains(anchor) {
        return Err(PlacementError::OutOfRange(OutOfRange {
            index: anchor,
            total_cells: config.total_cells(),
        }));
    }
    let fill = config
        .neighbor(anchor, orientation.direction())
        .ok_or(PlacementError::OrientationBoundary {
            anchor,
            orientation,
        })?;

    for index in [anchor, fill] {
        if !grid[index].accepts(TileType::Domino) {
            return Err(PlacementError::AcceptSetEmpty { index });
        }
    }
    for index in [anchor, fill] {
        if !grid[index].is_empty() {
            return Err(PlacementError::CellOccupied { index });
        }
    }

    if edge_matches(grid, anchor, fill, first, second).any() {
        Ok(fill)
    } else {
        Err(PlacementError::TerrainMismatch { anchor, fill })
    }
}

/// Boolean form of [`check_placement()`], taking the fill cell instead of
/// an orientation.
///
/// A `fill` that is not an edge neighbor of `anchor` is never legal.
pub fn is_legal(
    grid: &Grid,
    anchor: usize,
    fill: usize,
    first: TerrainSet,
    second: TerrainSet,
) -> bool {
    let config = grid.config();
    Orientation::ALL
        .into_iter()
        .find(|o| config.neighbor(anchor, o.direction()) == Some(fill))
        .is_some_and(|orientation| {
            check_placement(grid, anchor, orientation, first, second).is_ok()
        })
}

/// Looks at the neighbors of both cells of a domino and reports which kinds
/// of edges touch a compatible half.
///
/// Does not check whether the domino's own cells are free.
pub fn edge_matches(
    grid: &Grid,
    anchor: usize,
    fill: usize,
    first: TerrainSet,
    second: TerrainSet,
) -> EdgeMatches {
    let mut matches = EdgeMatches::default();
    for (index, terrain) in [(anchor, first), (fill, second)] {
        for direction in Direction::ALL {
            let touches = grid
                .neighbor_half(index, direction)
                .is_some_and(|half| half.terrain.accepts(terrain));
            if !touches {
                continue;
            }
            match direction {
                Direction::Up | Direction::Down => matches.vertical = true,
                Direction::Left | Direction::Right => matches.horizontal = true,
            }
        }
    }
    matches
}
