//! Registry error types.

use connect_four::{GameError, GridError};
use derive_more::{Display, Error, From};

/// Errors surfaced by the session registry.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error, From)]
pub enum RegistryError {
    /// The move was rejected by the game.
    #[display("{_0}")]
    #[from]
    Game(#[error(source)] GameError),
    /// No live game has this identifier.
    #[display("Game not found: {id}")]
    NotFound {
        /// The identifier that was looked up.
        id: String,
    },
    /// No unused identifier was found within the attempt bound.
    #[display("Could not generate a unique game ID after {attempts} attempts")]
    IdExhausted {
        /// Number of identifiers tried.
        attempts: u32,
    },
}

impl From<GridError> for RegistryError {
    fn from(err: GridError) -> Self {
        Self::Game(GameError::from(err))
    }
}
