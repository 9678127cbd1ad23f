use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::{
    check_placement, score, total_stars, BoardLayout, Cell, Grid, GridConfig, Half, Orientation,
    OrientationController, PersistedBoard, PlacementError, Tile, TileSupply,
};

/// One successful placement: the cells the first and the second half went to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "(usize, usize)", into = "(usize, usize)")]
pub struct Placement {
    pub anchor: usize,
    pub fill: usize,
}

impl From<(usize, usize)> for Placement {
    fn from((anchor, fill): (usize, usize)) -> Self {
        Self { anchor, fill }
    }
}

impl From<Placement> for (usize, usize) {
    fn from(placement: Placement) -> Self {
        (placement.anchor, placement.fill)
    }
}

/// What a successful [`Board::place()`] changed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BoardDelta {
    pub placement: Placement,
    /// The half now on the anchor cell.
    pub first: Half,
    /// The half now on the fill cell.
    pub second: Half,
    pub score: u32,
    /// Stars covered by this placement.
    pub score_gained: u32,
    /// The tile offered next.
    pub next_tile: Tile,
}

/// Live placement feedback for the cell under the cursor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Preview {
    pub anchor: usize,
    /// `None` if the second half would be off the grid.
    pub fill: Option<usize>,
    pub legal: bool,
}

/// Read-only view handed to the renderer.
#[derive(Clone, Copy, Debug)]
pub struct Snapshot<'a> {
    pub cells: &'a [Cell],
    pub score: u32,
    pub current_tile: &'a Tile,
    pub orientation: Orientation,
    pub preview: Option<Preview>,
}

/// The state of one player's board during a session.
///
/// The grid only changes through [`Self::place()`]. Hovering, rotating and
/// mirroring only touch the offered tile and the preview state.
#[derive(Clone, Debug)]
pub struct Board {
    grid: Grid,
    placements: Vec<Placement>,
    supply: TileSupply,
    /// The offered tile, as turned and mirrored by the player.
    tile: Tile,
    /// The number of placements `tile` was derived for.
    tile_drawn_at: usize,
    orientation: OrientationController,
    hover: Option<usize>,
    score: u32,
}

impl Board {
    /// Creates a board with the given layout stamped on it.
    pub fn new(config: GridConfig, layout: &BoardLayout, supply: TileSupply) -> Self {
        let grid = layout.stamp(config);
        let score = score(&grid);
        Self {
            tile: supply.derive_tile(0),
            tile_drawn_at: 0,
            grid,
            placements: Vec::new(),
            supply,
            orientation: OrientationController::new(),
            hover: None,
            score,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn config(&self) -> GridConfig {
        self.grid.config()
    }

    pub fn placements(&self) -> &[Placement] {
        &self.placements
    }

    pub fn current_tile(&self) -> &Tile {
        &self.tile
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation.orientation()
    }

    pub fn turn_count(&self) -> u8 {
        self.orientation.turn_count()
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn total_stars(&self) -> u32 {
        total_stars(&self.grid)
    }

    pub fn hover(&self) -> Option<usize> {
        self.hover
    }

    /// Turns the offered tile a quarter counter-clockwise.
    pub fn rotate_left(&mut self) -> Orientation {
        let rotation = self.orientation.rotate_left();
        if rotation.mirror {
            self.tile.mirror();
        }
        trace!(orientation = %rotation.orientation, tile = %self.tile, "Rotated left");
        rotation.orientation
    }

    /// Turns the offered tile a quarter clockwise.
    pub fn rotate_right(&mut self) -> Orientation {
        let rotation = self.orientation.rotate_right();
        if rotation.mirror {
            self.tile.mirror();
        }
        trace!(orientation = %rotation.orientation, tile = %self.tile, "Rotated right");
        rotation.orientation
    }

    /// Rotates left until the tile lies in `orientation`.
    pub fn turn_to(&mut self, orientation: Orientation) {
        while self.orientation() != orientation {
            self.rotate_left();
        }
    }

    /// Swaps the halves of the offered tile without turning it.
    pub fn mirror(&mut self) {
        self.tile.mirror();
        trace!(tile = %self.tile, "Mirrored");
    }

    /// The offered tile as it would be after turning it to `orientation`.
    pub fn tile_for(&self, orientation: Orientation) -> Tile {
        let mut controller = self.orientation;
        let mut tile = self.tile.clone();
        while controller.orientation() != orientation {
            if controller.rotate_left().mirror {
                tile.mirror();
            }
        }
        tile
    }

    /// Where the second half goes for this anchor with the current orientation.
    pub fn fill_index(&self, anchor: usize) -> Option<usize> {
        self.orientation.fill_index(self.grid.config(), anchor)
    }

    /// Checks whether `tile` may be put with its first half on `anchor`,
    /// using the current orientation. Returns the fill cell.
    pub fn check(&self, anchor: usize, tile: &Tile) -> Result<usize, PlacementError> {
        check_placement(
            &self.grid,
            anchor,
            self.orientation(),
            tile.first.terrain,
            tile.second.terrain,
        )
    }

    /// Whether the offered tile could be dropped on `cell` right now.
    pub fn preview_legality(&self, cell: usize) -> bool {
        self.check(cell, &self.tile).is_ok()
    }

    /// The cursor entered `cell`.
    pub fn on_hover(&mut self, cell: usize) -> Option<Preview> {
        if self.hover != Some(cell) {
            trace!(cell, "Hover");
        }
        self.hover = self.grid.config().contains(cell).then_some(cell);
        self.preview()
    }

    /// The cursor left the board, or the drag was cancelled.
    pub fn on_hover_end(&mut self) {
        self.hover = None;
    }

    /// Feedback for the hovered cell, derived from the current grid on
    /// every call so that it can never be stale.
    pub fn preview(&self) -> Option<Preview> {
        let anchor = self.hover?;
        Some(Preview {
            anchor,
            fill: self.fill_index(anchor),
            legal: self.preview_legality(anchor),
        })
    }

    /// The tile was dropped on `cell`. Ends the hover and attempts the placement.
    pub fn on_drop(&mut self, cell: usize, tile: &Tile) -> Result<BoardDelta, PlacementError> {
        self.hover = None;
        self.place(cell, tile)
    }

    /// Puts `tile` on the board with its first half on `anchor` and its second
    /// half on the fill cell given by the current orientation.
    ///
    /// Legality is always checked again against the current grid. On failure
    /// nothing changes. On success, the placement is recorded, the score is
    /// recomputed and the next tile is drawn, unmirrored.
    pub fn place(&mut self, anchor: usize, tile: &Tile) -> Result<BoardDelta, PlacementError> {
        let fill = match self.check(anchor, tile) {
            Ok(fill) => fill,
            Err(err) => {
                trace!(anchor, %tile, %err, "Placement rejected");
                return Err(err);
            }
        };

        for (index, half) in [(anchor, &tile.first), (fill, &tile.second)] {
            if let Err(err) = self.grid.place_half(index, half.clone()) {
                panic!("Validator accepted a placement the grid cannot take: {}", err);
            }
        }
        let placement = Placement { anchor, fill };
        self.placements.push(placement);

        let score_before = self.score;
        self.score = score(&self.grid);
        assert!(self.score >= score_before, "Score decreased after a placement");
        self.refresh_tile();

        debug!(anchor, fill, %tile, score = self.score, "Placed domino");
        Ok(BoardDelta {
            placement,
            first: tile.first.clone(),
            second: tile.second.clone(),
            score: self.score,
            score_gained: self.score - score_before,
            next_tile: self.tile.clone(),
        })
    }

    /// Every anchor and orientation at which the offered tile, turned
    /// accordingly, could be placed.
    pub fn legal_placements(&self) -> Vec<(usize, Orientation)> {
        let mut result = Vec::new();
        for orientation in Orientation::ALL {
            let tile = self.tile_for(orientation);
            for anchor in 0..self.grid.len() {
                let legal = check_placement(
                    &self.grid,
                    anchor,
                    orientation,
                    tile.first.terrain,
                    tile.second.terrain,
                )
                .is_ok();
                if legal {
                    result.push((anchor, orientation));
                }
            }
        }
        result
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            cells: &self.grid,
            score: self.score,
            current_tile: &self.tile,
            orientation: self.orientation(),
            preview: self.preview(),
        }
    }

    pub fn persisted(&self) -> PersistedBoard {
        PersistedBoard::new(&self.grid, &self.placements, self.score)
    }

    // Only draws when the number of placements changed since the last draw.
    fn refresh_tile(&mut self) {
        let count = self.placements.len();
        if count != self.tile_drawn_at {
            self.tile = self.supply.derive_tile(count);
            self.tile_drawn_at = count;
        }
    }
}

#[cfg(test)]
mod tests {
    use quickcheck::quickcheck;

    use super::*;
    use crate::arbitrary::PlacementScript;
    use crate::{half, is_legal};

    fn board_7x7() -> Board {
        Board::new(
            GridConfig::SEVEN_BY_SEVEN,
            &BoardLayout::reference(),
            TileSupply::new(1),
        )
    }

    fn board_8x8() -> Board {
        Board::new(
            GridConfig::EIGHT_BY_EIGHT,
            &BoardLayout::reference(),
            TileSupply::new(1),
        )
    }

    quickcheck! {
        fn placed_domino_cannot_be_placed_again(script: PlacementScript) -> bool {
            let mut board = script.board();
            for step in &script.steps {
                board.turn_to(step.orientation);
                let tile = board.current_tile().clone();
                if let Ok(delta) = board.place(step.anchor, &tile) {
                    let Placement { anchor, fill } = delta.placement;
                    if is_legal(board.grid(), anchor, fill, tile.first.terrain, tile.second.terrain) {
                        return false;
                    }
                    if board.check(anchor, &tile).is_ok() {
                        return false;
                    }
                }
            }
            true
        }

        fn score_is_bounded_and_never_decreases(script: PlacementScript) -> bool {
            let mut board = script.board();
            let total = board.total_stars();
            let mut last = board.score();
            for step in &script.steps {
                board.turn_to(step.orientation);
                let tile = board.current_tile().clone();
                let _ = board.place(step.anchor, &tile);
                if board.score() < last || board.score() > total {
                    return false;
                }
                last = board.score();
            }
            true
        }

        fn four_left_turns_restore_tile_and_orientation(script: PlacementScript) -> bool {
            let mut board = script.board();
            for step in &script.steps {
                board.turn_to(step.orientation);
                let tile = board.current_tile().clone();
                let _ = board.place(step.anchor, &tile);
            }
            let orientation = board.orientation();
            let tile = board.current_tile().clone();
            for _ in 0..4 {
                board.rotate_left();
            }
            board.orientation() == orientation && *board.current_tile() == tile
        }

        fn hover_preview_agrees_with_drop(script: PlacementScript) -> bool {
            let mut board = script.board();
            for step in &script.steps {
                board.turn_to(step.orientation);
                let previewed = board.on_hover(step.anchor).map(|p| p.legal).unwrap_or(false);
                let by_fill = board.fill_index(step.anchor).is_some_and(|fill| {
                    let tile = board.current_tile();
                    is_legal(board.grid(), step.anchor, fill, tile.first.terrain, tile.second.terrain)
                });
                let tile = board.current_tile().clone();
                let dropped = board.on_drop(step.anchor, &tile).is_ok();
                if previewed != dropped || by_fill != dropped {
                    return false;
                }
            }
            true
        }

        fn rejected_drop_changes_nothing(script: PlacementScript) -> bool {
            let mut board = script.board();
            for step in &script.steps {
                board.turn_to(step.orientation);
                let before = (board.grid().clone(), board.placements().to_vec(), board.current_tile().clone());
                let tile = board.current_tile().clone();
                if board.place(step.anchor, &tile).is_err() {
                    let after = (board.grid().clone(), board.placements().to_vec(), board.current_tile().clone());
                    if before != after {
                        return false;
                    }
                }
            }
            true
        }
    }

    #[test]
    fn starting_orientation_fills_to_the_right() {
        let board = board_7x7();
        assert_eq!(board.orientation(), Orientation::Left);
        assert_eq!(board.fill_index(3), Some(4));
        assert_eq!(board.fill_index(6), None);
    }

    #[test]
    fn forest_next_to_forest_seed_on_7x7() {
        let mut board = board_7x7();
        let tile = Tile::new(half!("C"), half!("F"));
        let score = board.score();

        // 4 holds the forest seed, so the domino goes on 2 and 3.
        assert_eq!(
            board.check(3, &tile),
            Err(PlacementError::CellOccupied { index: 4 })
        );
        let delta = board.place(2, &tile).unwrap();

        assert_eq!(delta.placement, Placement { anchor: 2, fill: 3 });
        assert_eq!(board.grid()[2].placed_half, Some(half!("C")));
        assert_eq!(board.grid()[3].placed_half, Some(half!("F")));
        assert_eq!(
            board.grid()[4].placed_half.as_ref().map(|h| h.terrain.to_string()),
            Some(String::from("F"))
        );
        assert_eq!(board.score(), score);
        assert_eq!(delta.score_gained, 0);
        assert_eq!(board.placements(), &[Placement { anchor: 2, fill: 3 }]);
    }

    #[test]
    fn one_left_turn_fills_downwards() {
        let mut board = board_7x7();
        board.rotate_left();
        assert_eq!(board.orientation(), Orientation::Top);
        assert_eq!(board.turn_count(), 1);
        assert_eq!(board.fill_index(3), Some(10));
    }

    #[test]
    fn drop_on_blocked_cell_is_rejected() {
        let mut board = board_8x8();
        let tile = Tile::new(half!("F"), half!("F"));
        let grid_before = board.grid().clone();
        assert_eq!(
            board.place(43, &tile),
            Err(PlacementError::AcceptSetEmpty { index: 43 })
        );
        assert_eq!(*board.grid(), grid_before);
        assert!(board.placements().is_empty());
    }

    #[test]
    fn last_column_filling_rightwards_is_rejected() {
        let mut board = board_8x8();
        board.turn_to(Orientation::Left);
        // Forest on 5 and 6, so that 7 has a matching neighbor.
        board.place(5, &Tile::new(half!("F"), half!("F"))).unwrap();
        let tile = Tile::new(half!("F"), half!("W"));
        assert_eq!(
            board.place(7, &tile),
            Err(PlacementError::OrientationBoundary {
                anchor: 7,
                orientation: Orientation::Left
            })
        );
        assert_eq!(
            board.place(15, &tile),
            Err(PlacementError::OrientationBoundary {
                anchor: 15,
                orientation: Orientation::Left
            })
        );
    }

    #[test]
    fn tile_only_changes_after_a_placement() {
        let mut board = board_8x8();
        let offered = board.current_tile().clone();
        assert_eq!(board.current_tile(), &offered);

        let _ = board.place(43, &offered);
        assert_eq!(board.current_tile(), &offered);

        board.turn_to(Orientation::Left);
        let tile = Tile::new(half!("F"), half!("F"));
        board.place(5, &tile).unwrap();
        assert_eq!(
            board.current_tile(),
            &TileSupply::new(1).derive_tile(1),
            "the new tile comes unmirrored"
        );
    }

    #[test]
    fn star_covering_scores() {
        let mut board = board_8x8();
        board.turn_to(Orientation::Left);
        // 10 is a star. Nothing next to it holds a half yet.
        board.place(3, &Tile::new(half!("W"), half!("F"))).unwrap_err();
        board.turn_to(Orientation::Top);
        let err = board.place(3, &Tile::new(half!("C"), half!("W"))).unwrap_err();
        assert_eq!(err, PlacementError::TerrainMismatch { anchor: 3, fill: 11 });

        // 12 sits below the forest seed; a forest half there matches.
        board.turn_to(Orientation::Right);
        let delta = board.place(12, &Tile::new(half!("F"), half!("C"))).unwrap();
        assert_eq!(delta.placement, Placement { anchor: 12, fill: 11 });
        // 11 now holds crag, so a crag half on 10 matches and covers the star.
        let delta = board.place(10, &Tile::new(half!("C"), half!("W"))).unwrap();
        assert_eq!(delta.placement, Placement { anchor: 10, fill: 9 });
        assert_eq!(delta.score_gained, 1);
        assert_eq!(board.score(), 1);
        assert_eq!(board.persisted().score, 1);
        assert_eq!(board.persisted().placements.len(), 2);
    }

    #[test]
    fn hover_end_clears_the_preview() {
        let mut board = board_7x7();
        let preview = board.on_hover(2).unwrap();
        assert_eq!(preview.anchor, 2);
        assert_eq!(preview.fill, Some(3));
        assert!(board.preview().is_some());
        board.on_hover_end();
        assert_eq!(board.preview(), None);
        assert_eq!(board.on_hover(49), None);
    }

    #[test]
    fn preview_is_recomputed_from_the_grid() {
        let mut board = board_7x7();
        board.mirror();
        // Only the second half, on 3, touches a placed half: the seed on 4.
        let forest_second = board.current_tile().second.terrain.contains(crate::Terrain::Forest);
        board.on_hover(2);
        let legal = board.preview().unwrap().legal;
        assert_eq!(legal, board.preview_legality(2));
        assert_eq!(legal, forest_second);

        // Take the cell away under the cursor: the preview follows immediately.
        board.place(2, &Tile::new(half!("C"), half!("F"))).unwrap();
        board.on_hover(2);
        assert!(!board.preview().unwrap().legal);
    }

    #[test]
    fn mirror_and_rotation_only_touch_the_tile() {
        let mut board = board_8x8();
        let grid = board.grid().clone();
        let tile = board.current_tile().clone();
        board.mirror();
        assert_eq!(*board.current_tile(), tile.clone().mirrored());
        board.rotate_right();
        board.rotate_left();
        board.mirror();
        assert_eq!(*board.current_tile(), tile);
        assert_eq!(*board.grid(), grid);
    }

    #[test]
    fn tile_for_matches_turning() {
        let board = board_8x8();
        for orientation in Orientation::ALL {
            let mut turned = board.clone();
            turned.turn_to(orientation);
            assert_eq!(board.tile_for(orientation), *turned.current_tile());
        }
    }

    #[test]
    fn legal_placements_are_placeable() {
        let board = board_8x8();
        let placements = board.legal_placements();
        assert!(!placements.is_empty());
        for (anchor, orientation) in placements {
            let mut board = board.clone();
            board.turn_to(orientation);
            let tile = board.current_tile().clone();
            assert!(board.place(anchor, &tile).is_ok());
        }
    }

    #[test]
    fn snapshot_reflects_state() {
        let mut board = board_8x8();
        board.on_hover(12);
        let snapshot = board.snapshot();
        assert_eq!(snapshot.cells.len(), 64);
        assert_eq!(snapshot.orientation, Orientation::Left);
        assert_eq!(snapshot.preview.map(|p| p.anchor), Some(12));
        assert_eq!(snapshot.score, 0);
    }
}
