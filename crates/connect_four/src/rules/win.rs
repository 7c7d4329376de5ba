//! Win detection logic for four-in-a-row.
//!
//! Detection is incremental: only the lines through the most recently
//! placed tile are examined, so a check costs O(COLS + ROWS).

use crate::grid::Grid;
use crate::types::{Player, Tile, WIN_LENGTH};
use tracing::{debug, instrument};

/// Step vectors for the four lines through a cell: horizontal, vertical,
/// rising diagonal and falling diagonal.
const DIRECTIONS: [(isize, isize); 4] = [(1, 0), (0, 1), (1, -1), (1, 1)];

/// Checks whether `player` has four in a row on any line through the anchor.
///
/// The anchor must hold a tile of `player`; an anchor outside the grid,
/// empty, or owned by the opponent never wins.
#[instrument(skip(grid))]
pub fn completes_run(grid: &Grid, column: usize, row: usize, player: Player) -> bool {
    if grid.tile(column, row) != Some(Tile::Occupied(player)) {
        return false;
    }
    let (Ok(column), Ok(row)) = (isize::try_from(column), isize::try_from(row)) else {
        return false;
    };

    let won = DIRECTIONS
        .iter()
        .any(|&(dc, dr)| line_has_run(grid, column, row, dc, dr, player));
    if won {
        debug!(%player, "Winning line found");
    }
    won
}

/// Walks the full line through the anchor along `(dc, dr)`, counting
/// consecutive tiles of `player` and resetting on anything else.
fn line_has_run(grid: &Grid, column: isize, row: isize, dc: isize, dr: isize, player: Player) -> bool {
    // Rewind to the edge of the grid
    let (mut c, mut r) = (column, row);
    while grid.tile_at(c - dc, r - dr).is_some() {
        c -= dc;
        r -= dr;
    }

    let target = Tile::Occupied(player);
    let mut run = 0;
    while let Some(tile) = grid.tile_at(c, r) {
        if tile == target {
            run += 1;
            if run == WIN_LENGTH {
                return true;
            }
        } else {
            run = 0;
        }
        c += dc;
        r += dr;
    }
    false
}
