use quickcheck::{Arbitrary, Gen};

use crate::{Board, BoardLayout, GridConfig, Orientation, TileSupply};

/// A drop attempted by a simulated player: turn the offered tile towards
/// `orientation`, then drop it on `anchor`.
#[derive(Clone, Debug)]
pub struct Step {
    pub anchor: usize,
    pub orientation: Orientation,
}

/// A reference board plus a sequence of drops, most of them on the grid.
#[derive(Clone, Debug)]
pub struct PlacementScript {
    pub config: GridConfig,
    pub seed: u64,
    pub steps: Vec<Step>,
}

impl PlacementScript {
    pub fn board(&self) -> Board {
        Board::new(
            self.config,
            &BoardLayout::reference(),
            TileSupply::new(self.seed),
        )
    }
}

impl Arbitrary for Orientation {
    fn arbitrary(g: &mut Gen) -> Self {
        *g.choose(&Orientation::ALL).unwrap()
    }
}

impl Arbitrary for PlacementScript {
    fn arbitrary(g: &mut Gen) -> Self {
        let config = *g
            .choose(&[GridConfig::SEVEN_BY_SEVEN, GridConfig::EIGHT_BY_EIGHT])
            .unwrap();
        // Slightly past the end, so that out-of-range drops show up too.
        let max_anchor = config.total_cells() + 2;
        let num_steps = usize::arbitrary(g) % 60;
        let steps = (0..num_steps)
            .map(|_| Step {
                anchor: usize::from(u8::arbitrary(g)) % max_anchor,
                orientation: Orientation::arbitrary(g),
            })
            .collect();
        PlacementScript {
            config,
            seed: u64::arbitrary(g),
            steps,
        }
    }

    fn shrink(&self) -> Box<dyn Iterator<Item = Self>> {
        let config = self.config;
        let seed = self.seed;
        let steps = self.steps.clone();
        Box::new((0..steps.len()).rev().map(move |len| PlacementScript {
            config,
            seed,
            steps: steps[..len].to_vec(),
        }))
    }
}
