//! Turn state machine for a single four-in-a-row match.

use crate::error::GameError;
use crate::grid::Grid;
use crate::types::Player;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::time::Instant;
use tracing::{info, instrument, warn};

/// Result of a successful move.
///
/// A finished game is reset in the same move that finishes it. The
/// terminal variants carry the grid as it stood on the finishing move so
/// callers can still show it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "outcome")]
pub enum MoveOutcome {
    /// Game continues with the other player to move.
    NoWinnerYet,
    /// The mover completed four in a row.
    Won {
        /// Winning player.
        winner: Player,
        /// Grid including the winning tile.
        final_grid: Grid,
    },
    /// The grid filled up without a winner.
    Drawn {
        /// The full grid.
        final_grid: Grid,
    },
}

impl MoveOutcome {
    /// Checks if the move ended the game.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, MoveOutcome::NoWinnerYet)
    }
}

/// Externally visible snapshot of a game.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct GameView {
    /// Game identifier.
    id: String,
    /// Grid contents.
    grid: Grid,
    /// Player to move.
    to_move: Player,
}

/// One four-in-a-row match.
#[derive(Debug, Clone, Getters)]
pub struct Game {
    /// Game identifier.
    id: String,
    /// Current grid.
    grid: Grid,
    /// Player to move. Never anything but Red or Yellow.
    to_move: Player,
    /// Last time anyone touched this game.
    last_activity: Instant,
}

impl Game {
    /// Creates a new game with an empty grid and Red to move.
    #[instrument]
    pub fn new(id: String) -> Self {
        Self {
            id,
            grid: Grid::new(),
            to_move: Player::Red,
            last_activity: Instant::now(),
        }
    }

    /// Applies one move for `player` in `column`.
    ///
    /// The activity timestamp is refreshed even when the move is rejected.
    /// On a win or draw the game is reset before returning.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::NotYourTurn`] if `player` is not to move, or the
    /// grid's placement error if the column is invalid or full. A rejected
    /// move leaves the grid and turn untouched.
    #[instrument(skip(self), fields(game_id = %self.id, to_move = %self.to_move))]
    pub fn apply_move(&mut self, column: isize, player: Player) -> Result<MoveOutcome, GameError> {
        self.touch();

        if player != self.to_move {
            warn!(%player, "Player tried to move out of turn");
            return Err(GameError::NotYourTurn {
                expected: self.to_move,
                actual: player,
            });
        }

        let placement = self.grid.place(column, player).inspect_err(|e| {
            warn!(error = %e, "Invalid move");
        })?;

        if self.grid.check_win(placement.column, placement.row, player) {
            info!(winner = %player, "Game won");
            let final_grid = self.grid.clone();
            self.reset();
            return Ok(MoveOutcome::Won {
                winner: player,
                final_grid,
            });
        }

        if self.grid.check_draw() {
            info!("Game drawn");
            let final_grid = self.grid.clone();
            self.reset();
            return Ok(MoveOutcome::Drawn { final_grid });
        }

        self.to_move = player.opponent();
        Ok(MoveOutcome::NoWinnerYet)
    }

    /// Restarts the game: empty grid, Red to move.
    #[instrument(skip(self), fields(game_id = %self.id))]
    pub fn reset(&mut self) {
        self.touch();
        self.grid.reset();
        self.to_move = Player::Red;
    }

    /// Time elapsed between the last activity and `now`.
    pub fn idle_for(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.last_activity)
    }

    /// Returns a snapshot for callers outside the engine.
    pub fn view(&self) -> GameView {
        GameView {
            id: self.id.clone(),
            grid: self.grid.clone(),
            to_move: self.to_move,
        }
    }

    fn touch(&mut self) {
        self.last_activity = Instant::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GridError;
    use crate::types::{ROWS, Tile};

    #[test]
    fn test_new_game_red_to_move() {
        let game = Game::new("abcd0123".to_string());
        assert_eq!(*game.to_move(), Player::Red);
        assert_eq!(*game.grid(), Grid::new());
    }

    #[test]
    fn test_turns_alternate() {
        let mut game = Game::new("g".to_string());
        let mut player = Player::Red;
        for n in 0..5 {
            assert_eq!(game.apply_move(n, player), Ok(MoveOutcome::NoWinnerYet));
            player = player.opponent();
            assert_eq!(*game.to_move(), player);
        }
        assert_eq!(*game.to_move(), Player::Yellow);
    }

    #[test]
    fn test_wrong_player_rejected_without_mutation() {
        let mut game = Game::new("g".to_string());
        assert_eq!(
            game.apply_move(0, Player::Yellow),
            Err(GameError::NotYourTurn {
                expected: Player::Red,
                actual: Player::Yellow,
            })
        );
        assert_eq!(*game.grid(), Grid::new());
        assert_eq!(*game.to_move(), Player::Red);
    }

    #[test]
    fn test_grid_errors_propagate_and_keep_turn() {
        let mut game = Game::new("g".to_string());
        assert_eq!(
            game.apply_move(9, Player::Red),
            Err(GameError::Grid(GridError::InvalidColumn { column: 9 }))
        );
        assert_eq!(*game.to_move(), Player::Red);
    }

    #[test]
    fn test_win_resets_game() {
        let mut game = Game::new("g".to_string());
        for _ in 0..3 {
            game.apply_move(0, Player::Red).unwrap();
            game.apply_move(1, Player::Yellow).unwrap();
        }
        let outcome = game.apply_move(0, Player::Red).unwrap();

        let MoveOutcome::Won { winner, final_grid } = outcome else {
            panic!("expected a win, got {outcome:?}");
        };
        assert_eq!(winner, Player::Red);
        assert_eq!(final_grid.tile(0, ROWS - 4), Some(Tile::Occupied(Player::Red)));
        assert_eq!(*game.grid(), Grid::new());
        assert_eq!(*game.to_move(), Player::Red);
    }

    #[tokio::test(start_paused = true)]
    async fn test_rejected_move_refreshes_activity() {
        let mut game = Game::new("g".to_string());
        tokio::time::advance(Duration::from_secs(30)).await;
        assert_eq!(game.idle_for(Instant::now()), Duration::from_secs(30));

        let _ = game.apply_move(-1, Player::Red);
        assert_eq!(game.idle_for(Instant::now()), Duration::ZERO);
    }

    #[test]
    fn test_view_snapshot() {
        let mut game = Game::new("feed".to_string());
        game.apply_move(3, Player::Red).unwrap();
        let view = game.view();
        assert_eq!(view.id(), "feed");
        assert_eq!(*view.to_move(), Player::Yellow);
        assert_eq!(view.grid(), game.grid());
    }
}
