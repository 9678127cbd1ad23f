use serde::{Deserialize, Serialize};

use crate::{Cell, Grid, Half, Placement, TileType};

/// Identifies where a board's snapshots are stored: one board per player
/// in a room.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RoomKey {
    pub room: String,
    pub player: String,
}

impl RoomKey {
    pub fn new(room: &str, player: &str) -> Self {
        Self {
            room: String::from(room),
            player: String::from(player),
        }
    }
}

impl std::fmt::Display for RoomKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.room, self.player)
    }
}

/// A cell as stored by the persistence layer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedCell {
    pub accepts: Vec<TileType>,
    pub last_dropped_item: Option<Half>,
    pub has_star: bool,
}

impl From<&Cell> for PersistedCell {
    fn from(cell: &Cell) -> Self {
        Self {
            accepts: cell.accepts.iter().copied().collect(),
            last_dropped_item: cell.placed_half.clone(),
            has_star: cell.has_star,
        }
    }
}

/// Everything the persistence layer receives after a placement.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedBoard {
    pub cells: Vec<PersistedCell>,
    /// As `[anchor, fill]` pairs, oldest first.
    pub placements: Vec<Placement>,
    pub score: u32,
}

impl PersistedBoard {
    pub fn new(grid: &Grid, placements: &[Placement], score: u32) -> Self {
        Self {
            cells: grid.iter().map(PersistedCell::from).collect(),
            placements: placements.to_vec(),
            score,
        }
    }
}

/// Receives a snapshot of the board after every successful placement.
///
/// Publishing is fire-and-forget: the engine never learns whether the write
/// went through, and does not retry. Implementations must not block for
/// long, since they are called from the input handling path.
pub trait SyncSink {
    fn publish(&mut self, key: &RoomKey, board: &PersistedBoard);
}

impl<S: SyncSink + ?Sized> SyncSink for Box<S> {
    fn publish(&mut self, key: &RoomKey, board: &PersistedBoard) {
        (**self).publish(key, board)
    }
}

impl<S: SyncSink + ?Sized> SyncSink for &mut S {
    fn publish(&mut self, key: &RoomKey, board: &PersistedBoard) {
        (**self).publish(key, board)
    }
}

/// Drops every snapshot.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullSink;

impl SyncSink for NullSink {
    fn publish(&mut self, _key: &RoomKey, _board: &PersistedBoard) {}
}

/// Keeps every snapshot in memory, oldest first.
#[derive(Clone, Debug, Default)]
pub struct MemorySink {
    pub published: Vec<(RoomKey, PersistedBoard)>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last(&self) -> Option<&PersistedBoard> {
        self.published.last().map(|(_, board)| board)
    }
}

impl SyncSink for MemorySink {
    fn publish(&mut self, key: &RoomKey, board: &PersistedBoard) {
        self.published.push((key.clone(), board.clone()));
    }
}
