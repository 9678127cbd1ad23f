use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::{Half, Terrain, Tile, TERRAINS};

// Spreads consecutive placement counts over the seed space.
const COUNT_MIX: u64 = 0x9E37_79B9_7F4A_7C15;

/// Produces the domino offered to the player.
///
/// The offered tile is a pure function of the seed and the number of
/// placements made so far, so asking again without placing anything yields
/// the same tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TileSupply {
    seed: u64,
}

impl TileSupply {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    /// The tile offered after `placement_count` successful placements.
    ///
    /// Both terrains are drawn independently and uniformly from [`TERRAINS`],
    /// and the tile comes unmirrored: `first` is the first terrain drawn.
    pub fn derive_tile(&self, placement_count: usize) -> Tile {
        let mut rng =
            StdRng::seed_from_u64(self.seed ^ (placement_count as u64).wrapping_mul(COUNT_MIX));
        let first = draw_terrain(&mut rng);
        let second = draw_terrain(&mut rng);
        Tile::new(Half::of(first), Half::of(second))
    }
}

fn draw_terrain(rng: &mut StdRng) -> Terrain {
    TERRAINS[rng.gen_range(0..TERRAINS.len())]
}
