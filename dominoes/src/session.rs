use std::sync::{Arc, Mutex};

use crate::{Board, BoardDelta, Orientation, PlacementError, Preview, RoomKey, SyncSink, Tile};

/// A board wired to the persistence layer: every successful placement is
/// published to the sink under this session's room key.
pub struct Session<S: SyncSink> {
    board: Board,
    key: RoomKey,
    sink: S,
}

/// A session shared between threads.
///
/// The board and the sink sit behind one lock, so a hover preview can never
/// observe a half-applied placement.
pub type SharedSession<S> = Arc<Mutex<Session<S>>>;

impl<S: SyncSink> Session<S> {
    pub fn new(board: Board, key: RoomKey, sink: S) -> Self {
        Self { board, key, sink }
    }

    pub fn shared(self) -> SharedSession<S> {
        Arc::new(Mutex::new(self))
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn key(&self) -> &RoomKey {
        &self.key
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn into_parts(self) -> (Board, S) {
        (self.board, self.sink)
    }

    pub fn on_hover(&mut self, cell: usize) -> Option<Preview> {
        self.board.on_hover(cell)
    }

    pub fn on_hover_end(&mut self) {
        self.board.on_hover_end()
    }

    pub fn preview_legality(&self, cell: usize) -> bool {
        self.board.preview_legality(cell)
    }

    pub fn rotate_left(&mut self) -> Orientation {
        self.board.rotate_left()
    }

    pub fn rotate_right(&mut self) -> Orientation {
        self.board.rotate_right()
    }

    pub fn turn_to(&mut self, orientation: Orientation) {
        self.board.turn_to(orientation)
    }

    pub fn mirror(&mut self) {
        self.board.mirror()
    }

    /// Drops the tile on `cell`, publishing the new board if it was placed.
    pub fn on_drop(&mut self, cell: usize, tile: &Tile) -> Result<BoardDelta, PlacementError> {
        self.board.on_hover_end();
        self.place(cell, tile)
    }

    /// See [`Board::place()`]. Publishes the new board on success.
    pub fn place(&mut self, anchor: usize, tile: &Tile) -> Result<BoardDelta, PlacementError> {
        let delta = self.board.place(anchor, tile)?;
        self.sink.publish(&self.key, &self.board.persisted());
        Ok(delta)
    }

    /// Drops the tile currently offered.
    pub fn drop_current(&mut self, cell: usize) -> Result<BoardDelta, PlacementError> {
        let tile = self.board.current_tile().clone();
        self.on_drop(cell, &tile)
    }
}

#[cfg(test)]
mod tests {
    use std::thread;

    use super::*;
    use crate::{half, BoardLayout, GridConfig, MemorySink, Placement, TileSupply};

    fn session() -> Session<MemorySink> {
        let board = Board::new(
            GridConfig::SEVEN_BY_SEVEN,
            &BoardLayout::reference(),
            TileSupply::new(3),
        );
        Session::new(board, RoomKey::new("lobby", "p1"), MemorySink::new())
    }

    #[test]
    fn publishes_only_successful_placements() {
        let mut session = session();
        let tile = Tile::new(half!("C"), half!("F"));

        session.on_hover(2);
        assert_eq!(session.board().check(2, &tile), Ok(3));
        session.on_drop(2, &tile).unwrap();
        assert_eq!(session.board().hover(), None);
        assert_eq!(session.sink().published.len(), 1);

        assert!(session.on_drop(2, &tile).is_err());
        assert_eq!(session.sink().published.len(), 1);

        let (key, persisted) = &session.sink().published[0];
        assert_eq!(key, &RoomKey::new("lobby", "p1"));
        assert_eq!(persisted.placements, vec![Placement { anchor: 2, fill: 3 }]);
        assert_eq!(
            persisted.cells[3].last_dropped_item.as_ref().map(|h| h.to_string()),
            Some(String::from("F"))
        );
    }

    #[test]
    fn shared_session_serializes_drops() {
        let shared = session().shared();
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let shared = Arc::clone(&shared);
                thread::spawn(move || {
                    let mut session = shared.lock().unwrap();
                    session.on_drop(2, &Tile::new(half!("C"), half!("F"))).is_ok()
                })
            })
            .collect();
        let successes = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|&ok| ok)
            .count();
        assert_eq!(successes, 1);
        let session = shared.lock().unwrap();
        assert_eq!(session.board().placements().len(), 1);
        assert_eq!(session.sink().published.len(), 1);
    }
}
