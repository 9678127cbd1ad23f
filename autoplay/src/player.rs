use clap::ValueEnum;
use dominoes::{Board, Orientation};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

/// Picks where the offered tile goes next.
pub trait Player {
    fn name(&self) -> &str;

    /// Returns an anchor and the orientation to turn the tile to before
    /// dropping it there, or `None` if the tile fits nowhere.
    fn choose_placement(&mut self, board: &Board) -> Option<(usize, Orientation)>;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Strategy {
    /// Any legal placement, uniformly.
    Random,
    /// Placements covering the most uncovered stars first.
    Greedy,
}

impl Strategy {
    pub fn player(self, rng: StdRng) -> Box<dyn Player> {
        match self {
            Strategy::Random => Box::new(RandomPlayer { rng }),
            Strategy::Greedy => Box::new(GreedyPlayer { rng }),
        }
    }
}

pub struct RandomPlayer {
    rng: StdRng,
}

impl RandomPlayer {
    pub fn new(rng: StdRng) -> Self {
        Self { rng }
    }
}

impl Player for RandomPlayer {
    fn name(&self) -> &str {
        "random"
    }

    fn choose_placement(&mut self, board: &Board) -> Option<(usize, Orientation)> {
        board.legal_placements().choose(&mut self.rng).copied()
    }
}

pub struct GreedyPlayer {
    rng: StdRng,
}

impl GreedyPlayer {
    pub fn new(rng: StdRng) -> Self {
        Self { rng }
    }
}

/// How many uncovered stars a placement would cover.
fn stars_covered(board: &Board, anchor: usize, orientation: Orientation) -> usize {
    let grid = board.grid();
    let fill = grid.config().neighbor(anchor, orientation.direction());
    [Some(anchor), fill]
        .into_iter()
        .flatten()
        .filter(|&index| grid[index].has_star && grid[index].is_empty())
        .count()
}

impl Player for GreedyPlayer {
    fn name(&self) -> &str {
        "greedy"
    }

    fn choose_placement(&mut self, board: &Board) -> Option<(usize, Orientation)> {
        let mut top_choices: Vec<(usize, Orientation)> = Vec::new();
        let mut top_score = 0;
        for (anchor, orientation) in board.legal_placements() {
            let score = stars_covered(board, anchor, orientation);
            match score.cmp(&top_score) {
                std::cmp::Ordering::Less => {}
                std::cmp::Ordering::Equal => {
                    top_choices.push((anchor, orientation));
                }
                std::cmp::Ordering::Greater => {
                    top_choices = vec![(anchor, orientation)];
                    top_score = score;
                }
            }
        }
        top_choices.choose(&mut self.rng).copied()
    }
}
