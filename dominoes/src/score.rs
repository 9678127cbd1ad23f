use crate::Grid;

/// The number of star cells covered by a half.
pub fn score(grid: &Grid) -> u32 {
    grid.iter()
        .filter(|cell| cell.has_star && !cell.is_empty())
        .count() as u32
}

/// The highest score reachable on this grid.
pub fn total_stars(grid: &Grid) -> u32 {
    grid.iter().filter(|cell| cell.has_star).count() as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{half, BoardLayout, GridConfig};

    #[test]
    fn counts_only_covered_stars() {
        let grid = BoardLayout::reference().stamp(GridConfig::EIGHT_BY_EIGHT);
        assert_eq!(score(&grid), 0);
        assert_eq!(total_stars(&grid), 3);

        let grid = grid.with_half_placed(10, half!("F")).unwrap();
        assert_eq!(score(&grid), 1);
        let grid = grid.with_half_placed(11, half!("F")).unwrap();
        assert_eq!(score(&grid), 1);
        let grid = grid.with_half_placed(61, half!("W")).unwrap();
        assert_eq!(score(&grid), 2);
    }

    #[test]
    fn seeded_star_counts_from_the_start() {
        let mut layout = BoardLayout::empty();
        layout.seeds.push((5, half!("C")));
        layout.stars.push(5);
        layout.stars.push(6);
        let grid = layout.stamp(GridConfig::SEVEN_BY_SEVEN);
        assert_eq!(score(&grid), 1);
        assert_eq!(total_stars(&grid), 2);
    }
}
