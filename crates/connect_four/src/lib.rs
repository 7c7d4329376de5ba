//! Four-in-a-row game logic.
//!
//! Two players take turns dropping tiles into the columns of a 7x6 grid.
//! A tile falls to the lowest empty cell of its column. Four tiles of one
//! player in a line (horizontal, vertical or diagonal) win; a full grid
//! with no such line is a draw.
//!
//! # Architecture
//!
//! - **Grid**: fixed tile array, placement and reset
//! - **Rules**: incremental win detection and draw detection
//! - **Game**: one match, turn state machine and activity tracking
//!
//! # Example
//!
//! ```
//! use connect_four::{Game, MoveOutcome, Player};
//!
//! let mut game = Game::new("demo".to_string());
//! assert_eq!(game.apply_move(3, Player::Red), Ok(MoveOutcome::NoWinnerYet));
//! assert_eq!(*game.to_move(), Player::Yellow);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod error;
mod game;
mod grid;
pub mod rules;
mod types;

pub use error::{GameError, GridError};
pub use game::{Game, GameView, MoveOutcome};
pub use grid::{Grid, Placement};
pub use types::{COLS, Player, ROWS, Tile, WIN_LENGTH};
