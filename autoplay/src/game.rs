use dominoes::{Session, SyncSink};
use tracing::{debug, trace};

use crate::player::Player;

/// Why a session ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionEnd {
    /// The offered tile fits nowhere.
    Stuck,
    /// As many dominoes as the grid has room for were placed.
    BoardFull,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionResult {
    pub placements: usize,
    pub score: u32,
    pub total_stars: u32,
    pub end: SessionEnd,
}

/// Lets `player` place tiles until it cannot anymore.
///
/// Every placement goes through the same hover, turn and drop sequence a
/// human would produce. Returns an error only if a placement the player
/// chose among the legal ones is rejected, which means the engine is broken.
pub fn play_session<S: SyncSink>(
    player: &mut dyn Player,
    session: &mut Session<S>,
) -> anyhow::Result<SessionResult> {
    let max_placements = session.board().config().total_cells() / 2;
    let end = loop {
        if session.board().placements().len() >= max_placements {
            break SessionEnd::BoardFull;
        }
        let Some((anchor, orientation)) = player.choose_placement(session.board()) else {
            break SessionEnd::Stuck;
        };
        session.turn_to(orientation);
        session.on_hover(anchor);
        let delta = session.drop_current(anchor).map_err(|err| {
            anyhow::anyhow!(
                "Player {} chose a legal placement at {} in orientation {}, but it was rejected: {}",
                player.name(),
                anchor,
                orientation,
                err
            )
        })?;
        trace!(
            anchor,
            fill = delta.placement.fill,
            score = delta.score,
            next_tile = %delta.next_tile,
            "Placed"
        );
    };

    let board = session.board();
    let result = SessionResult {
        placements: board.placements().len(),
        score: board.score(),
        total_stars: board.total_stars(),
        end,
    };
    debug!(
        room = %session.key(),
        placements = result.placements,
        score = result.score,
        end = ?result.end,
        "Session over"
    );
    Ok(result)
}
