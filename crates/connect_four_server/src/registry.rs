//! Concurrent registry of live games.

use crate::config::RegistryConfig;
use crate::error::RegistryError;
use crate::ids::{IdGenerator, RandomHexIds};
use connect_four::{Game, GameView, MoveOutcome, Player};
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::{debug, info, instrument, warn};

/// Shared handle to one game. The mutex serializes moves on that game.
type GameSlot = Arc<Mutex<Game>>;

/// Manages all live games.
///
/// Map operations are individually atomic. Every game additionally sits
/// behind its own lock, so a read-modify-write on one game never races
/// another move on the same game, while different games proceed in
/// parallel. Cloning the registry yields another handle to the same games.
#[derive(Debug, Clone)]
pub struct SessionRegistry {
    games: Arc<DashMap<String, GameSlot>>,
    ids: Arc<dyn IdGenerator>,
    config: RegistryConfig,
    sweep_guard: Arc<Mutex<()>>,
}

impl SessionRegistry {
    /// Creates an empty registry with random hex identifiers.
    pub fn new(config: RegistryConfig) -> Self {
        Self::with_id_generator(config, RandomHexIds)
    }

    /// Creates an empty registry drawing identifiers from `ids`.
    #[instrument(skip(ids))]
    pub fn with_id_generator(config: RegistryConfig, ids: impl IdGenerator + 'static) -> Self {
        info!("Creating session registry");
        Self {
            games: Arc::new(DashMap::new()),
            ids: Arc::new(ids),
            config,
            sweep_guard: Arc::new(Mutex::new(())),
        }
    }

    /// Returns the registry configuration.
    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// Creates a new game under a fresh identifier.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::IdExhausted`] if every candidate identifier
    /// within the configured attempt bound was already taken.
    #[instrument(skip(self))]
    pub fn create(&self) -> Result<(String, GameView), RegistryError> {
        // A deserialized config may carry zero; always try at least once
        let attempts = self.config.id_attempts().max(1);

        for attempt in 1..=attempts {
            match self.games.entry(self.ids.generate()) {
                Entry::Occupied(entry) => {
                    warn!(game_id = %entry.key(), attempt, "Game ID already exists");
                }
                Entry::Vacant(entry) => {
                    let game = Game::new(entry.key().clone());
                    let view = game.view();
                    entry.insert(Arc::new(Mutex::new(game)));
                    info!(game_id = %view.id(), "Created new game");
                    return Ok((view.id().clone(), view));
                }
            }
        }

        warn!(attempts, "Could not generate a unique game ID");
        Err(RegistryError::IdExhausted { attempts })
    }

    /// Gets a snapshot of the game with the given identifier.
    #[instrument(skip(self))]
    pub async fn get(&self, id: &str) -> Result<Game, RegistryError> {
        let slot = self.slot(id)?;
        let game = slot.lock().await;
        Ok(game.clone())
    }

    /// Gets the externally visible view of a game.
    #[instrument(skip(self))]
    pub async fn view(&self, id: &str) -> Result<GameView, RegistryError> {
        let slot = self.slot(id)?;
        let game = slot.lock().await;
        Ok(game.view())
    }

    /// Stores `game` under its own identifier.
    ///
    /// Only live games can be replaced: an identifier that was never issued
    /// or has been evicted yields [`RegistryError::NotFound`].
    #[instrument(skip(self, game), fields(game_id = %game.id()))]
    pub async fn put(&self, game: Game) -> Result<(), RegistryError> {
        let slot = self.slot(game.id())?;
        *slot.lock().await = game;
        debug!("Game updated");
        Ok(())
    }

    /// Applies one move to a stored game.
    ///
    /// The move runs while holding the game's lock, so the stored game
    /// reflects it as soon as this returns.
    ///
    /// # Errors
    ///
    /// [`RegistryError::NotFound`] for unknown games, otherwise the game's
    /// own rejection wrapped in [`RegistryError::Game`].
    #[instrument(skip(self))]
    pub async fn apply_move_and_store(
        &self,
        id: &str,
        column: isize,
        player: Player,
    ) -> Result<(MoveOutcome, GameView), RegistryError> {
        let slot = self.slot(id)?;
        let mut game = slot.lock().await;
        let outcome = game.apply_move(column, player)?;
        debug!(?outcome, "Move stored");
        Ok((outcome, game.view()))
    }

    /// Runs one eviction pass and returns how many games were removed.
    ///
    /// A game whose lock is held has a move in flight and is kept. If
    /// another pass is already running this one does nothing.
    #[instrument(skip(self))]
    pub fn sweep_once(&self) -> usize {
        let Ok(_pass) = self.sweep_guard.try_lock() else {
            debug!("Sweep already in progress");
            return 0;
        };

        let now = Instant::now();
        let timeout = self.config.inactivity_timeout();
        let mut evicted = 0;

        self.games.retain(|id, slot| match slot.try_lock() {
            Ok(game) => {
                let idle = game.idle_for(now);
                if idle > timeout {
                    info!(game_id = %id, idle_secs = idle.as_secs(), "Evicting inactive game");
                    evicted += 1;
                    false
                } else {
                    true
                }
            }
            Err(_) => true,
        });

        debug!(evicted, remaining = self.games.len(), "Sweep complete");
        evicted
    }

    /// Checks if a game with this identifier is live.
    pub fn contains(&self, id: &str) -> bool {
        self.games.contains_key(id)
    }

    /// Number of live games.
    pub fn len(&self) -> usize {
        self.games.len()
    }

    /// Checks if there are no live games.
    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }

    fn slot(&self, id: &str) -> Result<GameSlot, RegistryError> {
        self.games
            .get(id)
            .map(|entry| Arc::clone(entry.value()))
            .ok_or_else(|| {
                debug!(game_id = id, "Game not found");
                RegistryError::NotFound { id: id.to_string() }
            })
    }
}

impl Default for SessionRegistry {
    fn default() -> Self {
        Self::new(RegistryConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test(start_paused = true)]
    async fn test_sweep_keeps_game_with_move_in_flight() {
        let registry = SessionRegistry::default();
        let (id, _) = registry.create().unwrap();

        let slot = registry.slot(&id).unwrap();
        let _guard = slot.lock().await;
        tokio::time::advance(Duration::from_secs(3600)).await;

        assert_eq!(registry.sweep_once(), 0);
        assert!(registry.contains(&id));
    }

    #[test]
    fn test_unvalidated_zero_attempts_still_creates() {
        let config: RegistryConfig = toml::from_str("id_attempts = 0").unwrap();
        let registry = SessionRegistry::new(config);
        assert!(registry.create().is_ok());
    }

    #[tokio::test(start_paused = true)]
    async fn test_overlapping_sweep_is_skipped() {
        let registry = SessionRegistry::default();
        let (id, _) = registry.create().unwrap();
        tokio::time::advance(Duration::from_secs(3600)).await;

        {
            let _pass = registry.sweep_guard.lock().await;
            assert_eq!(registry.sweep_once(), 0);
            assert!(registry.contains(&id));
        }

        assert_eq!(registry.sweep_once(), 1);
        assert!(!registry.contains(&id));
    }
}
