//! The 7x6 grid that tiles are dropped into.

use crate::error::GridError;
use crate::rules;
use crate::types::{COLS, Player, ROWS, Tile};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, instrument};

/// Where a tile landed after a placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Placement {
    /// Column the tile was dropped into.
    pub column: usize,
    /// Row the tile came to rest in (0 is the top row).
    pub row: usize,
}

/// Four-in-a-row grid.
///
/// Cells are stored column-major. Row 0 is the top row, so a column fills
/// from row `ROWS - 1` upward.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Grid {
    cells: [[Tile; ROWS]; COLS],
}

impl Grid {
    /// Creates a new empty grid.
    pub fn new() -> Self {
        Self {
            cells: [[Tile::Empty; ROWS]; COLS],
        }
    }

    /// Gets the tile at the given cell, or `None` outside the grid.
    pub fn tile(&self, column: usize, row: usize) -> Option<Tile> {
        self.cells.get(column)?.get(row).copied()
    }

    /// Signed variant of [`Grid::tile`] used by direction walks.
    pub(crate) fn tile_at(&self, column: isize, row: isize) -> Option<Tile> {
        let column = usize::try_from(column).ok()?;
        let row = usize::try_from(row).ok()?;
        self.tile(column, row)
    }

    /// Returns all cells, one array per column.
    pub fn columns(&self) -> &[[Tile; ROWS]; COLS] {
        &self.cells
    }

    /// Validates a column index.
    pub(crate) fn column_index(column: isize) -> Result<usize, GridError> {
        usize::try_from(column)
            .ok()
            .filter(|&c| c < COLS)
            .ok_or(GridError::InvalidColumn { column })
    }

    /// Drops a tile for `player` into `column`.
    ///
    /// The tile lands in the lowest empty cell of the column. The grid is
    /// left untouched when the column is out of range or already full.
    #[instrument(skip(self))]
    pub fn place(&mut self, column: isize, player: Player) -> Result<Placement, GridError> {
        let column = Self::column_index(column)?;
        let cells = &mut self.cells[column];

        let row = (0..ROWS)
            .rev()
            .find(|&row| cells[row].is_empty())
            .ok_or(GridError::ColumnFull { column })?;

        cells[row] = Tile::Occupied(player);
        debug!(column, row, "Tile placed");
        Ok(Placement { column, row })
    }

    /// Checks whether the tile at the anchor completes four in a row for `player`.
    pub fn check_win(&self, column: usize, row: usize, player: Player) -> bool {
        rules::completes_run(self, column, row, player)
    }

    /// Checks whether no empty cell remains.
    ///
    /// Only meaningful after [`Grid::check_win`] has come back false: a full
    /// grid containing a winning line is a win.
    pub fn check_draw(&self) -> bool {
        rules::is_full(self)
    }

    /// Clears every cell.
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..ROWS {
            for column in 0..COLS {
                let symbol = match self.cells[column][row] {
                    Tile::Empty => '.',
                    Tile::Occupied(player) => player.symbol(),
                };
                if column > 0 {
                    f.write_str(" ")?;
                }
                write!(f, "{symbol}")?;
            }
            writeln!(f)?;
        }
        let labels: Vec<String> = (0..COLS).map(|c| c.to_string()).collect();
        write!(f, "{}", labels.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_grid_is_empty() {
        let grid = Grid::new();
        assert!(grid.columns().iter().flatten().all(|t| t.is_empty()));
    }

    #[test]
    fn test_place_fills_bottom_up() {
        let mut grid = Grid::new();
        for expected_row in (0..ROWS).rev() {
            let placement = grid.place(2, Player::Red).unwrap();
            assert_eq!(placement, Placement { column: 2, row: expected_row });
            assert_eq!(grid.tile(2, expected_row), Some(Tile::Occupied(Player::Red)));
        }
    }

    #[test]
    fn test_place_full_column_leaves_grid_unchanged() {
        let mut grid = Grid::new();
        for _ in 0..ROWS {
            grid.place(0, Player::Yellow).unwrap();
        }
        let before = grid.clone();
        assert_eq!(
            grid.place(0, Player::Red),
            Err(GridError::ColumnFull { column: 0 })
        );
        assert_eq!(grid, before);
    }

    #[test]
    fn test_place_rejects_out_of_range_columns() {
        let mut grid = Grid::new();
        assert_eq!(
            grid.place(-1, Player::Red),
            Err(GridError::InvalidColumn { column: -1 })
        );
        assert_eq!(
            grid.place(COLS as isize, Player::Red),
            Err(GridError::InvalidColumn { column: COLS as isize })
        );
        assert_eq!(grid, Grid::new());
    }

    #[test]
    fn test_column_index_bounds() {
        assert_eq!(Grid::column_index(0), Ok(0));
        assert_eq!(Grid::column_index(COLS as isize - 1), Ok(COLS - 1));
        assert_eq!(
            Grid::column_index(isize::MIN),
            Err(GridError::InvalidColumn { column: isize::MIN })
        );
    }

    #[test]
    fn test_tile_out_of_range_is_none() {
        let grid = Grid::new();
        assert_eq!(grid.tile(COLS, 0), None);
        assert_eq!(grid.tile(0, ROWS), None);
        assert_eq!(grid.tile_at(-1, 0), None);
    }

    #[test]
    fn test_reset_clears_cells() {
        let mut grid = Grid::new();
        grid.place(3, Player::Red).unwrap();
        grid.place(3, Player::Yellow).unwrap();
        grid.reset();
        assert_eq!(grid, Grid::new());
    }

    #[test]
    fn test_display_renders_bottom_row() {
        let mut grid = Grid::new();
        grid.place(0, Player::Red).unwrap();
        grid.place(1, Player::Yellow).unwrap();
        let text = grid.to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), ROWS + 1);
        assert_eq!(lines[ROWS - 1], "R Y . . . . .");
        assert_eq!(lines[ROWS], "0 1 2 3 4 5 6");
    }
}
