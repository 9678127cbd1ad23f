use crate::{Cell, Grid};

/// Renders the grid as text, one row per line.
///
/// Every cell is two characters wide: the terrain letters of its half (a
/// castle shows as `+`), `*` for an uncovered star, `#` for a blocked cell
/// and `.` for an empty one.
/// ```
/// # use dominoes::{visualize_grid, BoardLayout, GridConfig};
/// let grid = BoardLayout::reference().stamp(GridConfig::SEVEN_BY_SEVEN);
/// assert!(visualize_grid(&grid).starts_with("     0"));
/// ```
pub fn visualize_grid(grid: &Grid) -> String {
    let config = grid.config();
    // Draw the top of the box
    let mut result = String::from("    ");
    for column in 0..config.row_length() {
        result += &format!("{:>2}", column);
    }
    result += "\n    ╭";
    for _ in 0..config.row_length() {
        result += "──";
    }
    result += "╮\n";

    for (row, cells) in grid.chunks(config.row_length()).enumerate() {
        result += &format!("{:>3} │", row * config.row_length());
        for cell in cells {
            result += &format!("{} ", cell_symbol(cell));
        }
        result += "│\n";
    }

    // Draw the bottom of the box
    result += "    ╰";
    for _ in 0..config.row_length() {
        result += "──";
    }
    result += "╯";
    result
}

/// The single character used for a cell by [`visualize_grid()`].
pub fn cell_symbol(cell: &Cell) -> char {
    match &cell.placed_half {
        Some(half) if half.terrain.len() == 1 => {
            half.terrain.into_iter().next().map_or('?', |t| t.letter())
        }
        Some(_) => '+',
        None if cell.is_blocked() => '#',
        None if cell.has_star => '*',
        None => '.',
    }
}
