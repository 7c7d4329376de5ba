//! Error types for grid placement and turn handling.

use crate::types::Player;
use derive_more::{Display, Error, From};

/// Errors that can occur when placing a tile on the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum GridError {
    /// Column index is outside the grid.
    #[display("Invalid column: {column}")]
    InvalidColumn {
        /// The rejected column index.
        column: isize,
    },
    /// Column has no empty cell left.
    #[display("Column {column} is full")]
    ColumnFull {
        /// The full column.
        column: usize,
    },
}

/// Errors that can occur when applying a move to a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error, From)]
pub enum GameError {
    /// Placement was rejected by the grid.
    #[display("{_0}")]
    #[from]
    Grid(#[error(source)] GridError),
    /// The acting player is not the player to move.
    #[display("Not your turn: waiting for {expected}, got {actual}")]
    NotYourTurn {
        /// Player whose turn it is.
        expected: Player,
        /// Player who attempted the move.
        actual: Player,
    },
}
