use tracing::trace;

use crate::{half, Grid, GridConfig, Half};

/// The fixed starting arrangement of a board: pre-placed halves, star cells
/// and blocked cells.
///
/// Indices are row-major cell indices. A layout is written once and may be
/// used with grids of different sizes, so indices outside the grid are
/// skipped when stamping instead of being treated as errors.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BoardLayout {
    pub seeds: Vec<(usize, Half)>,
    pub stars: Vec<usize>,
    pub blocked: Vec<usize>,
}

impl BoardLayout {
    /// A layout with nothing on it.
    pub fn empty() -> Self {
        Self {
            seeds: Vec::new(),
            stars: Vec::new(),
            blocked: Vec::new(),
        }
    }

    /// The map every session starts from.
    pub fn reference() -> Self {
        Self {
            seeds: vec![
                (4, half!("F", "/kep1.png")),
                (25, half!("W", "/kep2.jpg")),
                (55, half!("C", "/kep3.jpg")),
                (28, half!("FWC", "/br.jpg")),
            ],
            stars: vec![10, 49, 61],
            blocked: vec![60, 62, 63, 60, 59, 43],
        }
    }

    /// Stamps the layout onto a fresh grid.
    pub fn stamp(&self, config: GridConfig) -> Grid {
        let mut grid = Grid::new(config);
        for (index, half) in &self.seeds {
            match grid.cell_mut(*index) {
                Some(cell) => cell.placed_half = Some(half.clone()),
                None => trace!(index, "Seed outside of the grid skipped"),
            }
        }
        for &index in &self.stars {
            match grid.cell_mut(index) {
                Some(cell) => cell.has_star = true,
                None => trace!(index, "Star outside of the grid skipped"),
            }
        }
        for &index in &self.blocked {
            match grid.cell_mut(index) {
                Some(cell) => cell.accepts.clear(),
                None => trace!(index, "Blocked cell outside of the grid skipped"),
            }
        }
        grid
    }
}

impl Default for BoardLayout {
    fn default() -> Self {
        Self::reference()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Terrain, TileType};

    #[test]
    fn stamps_reference_layout_on_eight_by_eight() {
        let grid = BoardLayout::reference().stamp(GridConfig::EIGHT_BY_EIGHT);
        assert!(grid.at(4).unwrap().placed_half.as_ref().unwrap().terrain.contains(Terrain::Forest));
        assert_eq!(grid.at(28).unwrap().placed_half.as_ref().unwrap().terrain.len(), 3);
        assert_eq!(
            grid.iter().filter(|cell| cell.has_star).count(),
            3,
        );
        let blocked: Vec<usize> = (0..64).filter(|&i| grid[i].is_blocked()).collect();
        assert_eq!(blocked, vec![43, 59, 60, 62, 63]);
        assert!(grid[0].accepts(TileType::Domino));
    }

    #[test]
    fn skips_indices_outside_of_a_smaller_grid() {
        let grid = BoardLayout::reference().stamp(GridConfig::SEVEN_BY_SEVEN);
        assert_eq!(grid.len(), 49);
        // Seeds at 4, 25 and 28 fit, 55 doesn't.
        assert_eq!(grid.iter().filter(|cell| !cell.is_empty()).count(), 3);
        // Only the star at 10 fits.
        assert_eq!(grid.iter().filter(|cell| cell.has_star).count(), 1);
        assert_eq!(grid.iter().filter(|cell| cell.is_blocked()).count(), 1);
        assert!(grid[43].is_blocked());
    }

    #[test]
    fn seeds_keep_their_images() {
        let grid = BoardLayout::reference().stamp(GridConfig::EIGHT_BY_EIGHT);
        assert_eq!(
            grid[55].placed_half.as_ref().unwrap().image.as_str(),
            "/kep3.jpg"
        );
    }
}
