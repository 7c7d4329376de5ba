//! Core domain types for four-in-a-row.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Number of columns on the grid.
pub const COLS: usize = 7;

/// Number of rows on the grid.
pub const ROWS: usize = 6;

/// Length of a run that wins the game.
pub const WIN_LENGTH: usize = 4;

/// Player in the game.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Player {
    /// Red player (moves first).
    Red,
    /// Yellow player (moves second).
    Yellow,
}

impl Player {
    /// Returns the opponent player.
    pub fn opponent(self) -> Self {
        match self {
            Player::Red => Player::Yellow,
            Player::Yellow => Player::Red,
        }
    }

    /// Single-character marker used in text rendering.
    pub fn symbol(self) -> char {
        match self {
            Player::Red => 'R',
            Player::Yellow => 'Y',
        }
    }
}

/// A cell on the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tile {
    /// Empty cell.
    #[default]
    Empty,
    /// Cell occupied by a player.
    Occupied(Player),
}

impl Tile {
    /// Returns the occupying player, if any.
    pub fn player(self) -> Option<Player> {
        match self {
            Tile::Empty => None,
            Tile::Occupied(player) => Some(player),
        }
    }

    /// Checks if the cell is empty.
    pub fn is_empty(self) -> bool {
        self == Tile::Empty
    }
}

impl From<Player> for Tile {
    fn from(player: Player) -> Self {
        Tile::Occupied(player)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    #[test]
    fn test_opponent_flips() {
        for player in Player::iter() {
            assert_ne!(player, player.opponent());
            assert_eq!(player, player.opponent().opponent());
        }
    }

    #[test]
    fn test_player_parses_case_insensitively() {
        assert_eq!(Player::from_str("red"), Ok(Player::Red));
        assert_eq!(Player::from_str("YELLOW"), Ok(Player::Yellow));
        assert!(Player::from_str("draw").is_err());
    }

    #[test]
    fn test_tile_player() {
        assert_eq!(Tile::Empty.player(), None);
        assert_eq!(Tile::from(Player::Yellow).player(), Some(Player::Yellow));
        assert!(Tile::default().is_empty());
    }
}
