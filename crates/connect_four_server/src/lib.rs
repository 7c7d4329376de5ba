//! Session registry for four-in-a-row games.
//!
//! Holds many simultaneous games behind opaque identifiers and evicts the
//! ones nobody has touched for a while.
//!
//! # Architecture
//!
//! - **Registry**: concurrent map from identifier to game, one lock per game
//! - **Ids**: pluggable identifier generation (random hex by default)
//! - **Sweep**: cancellable background task that evicts inactive games
//! - **Config**: TOML-backed tuning for timeouts and retry bounds
//!
//! # Example
//!
//! ```
//! use connect_four::{MoveOutcome, Player};
//! use connect_four_server::{RegistryConfig, SessionRegistry};
//!
//! # async fn example() -> Result<(), connect_four_server::RegistryError> {
//! let registry = SessionRegistry::new(RegistryConfig::default());
//! let (id, _view) = registry.create()?;
//! let (outcome, view) = registry.apply_move_and_store(&id, 3, Player::Red).await?;
//! assert_eq!(outcome, MoveOutcome::NoWinnerYet);
//! assert_eq!(*view.to_move(), Player::Yellow);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod config;
mod error;
mod ids;
mod registry;
mod sweep;

pub use config::{ConfigError, RegistryConfig};
pub use error::RegistryError;
pub use ids::{IdGenerator, RandomHexIds};
pub use registry::SessionRegistry;
pub use sweep::SweepHandle;
