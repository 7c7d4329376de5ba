//! Background eviction of inactive games.

use crate::registry::SessionRegistry;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument, warn};

/// Shortest period the sweeper will run at.
const MIN_SWEEP_INTERVAL: Duration = Duration::from_secs(1);

/// Handle to a running sweeper task.
#[derive(Debug)]
pub struct SweepHandle {
    token: CancellationToken,
    task: JoinHandle<()>,
}

impl SweepHandle {
    /// Signals the sweeper to stop and waits for it to finish.
    #[instrument(skip(self))]
    pub async fn stop(self) {
        self.token.cancel();
        if let Err(e) = self.task.await {
            warn!(error = %e, "Sweeper task ended abnormally");
        }
    }

    /// Checks if the sweeper task has exited.
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

impl SessionRegistry {
    /// Spawns the periodic sweeper on the current tokio runtime.
    ///
    /// The first pass runs immediately, then once per configured interval,
    /// until `token` is cancelled. A zero interval, only reachable through a
    /// config that skipped validation, is raised to one second.
    pub fn spawn_sweeper(&self, token: CancellationToken) -> SweepHandle {
        let mut period = self.config().sweep_interval();
        if period.is_zero() {
            warn!("Sweep interval is zero, using {:?}", MIN_SWEEP_INTERVAL);
            period = MIN_SWEEP_INTERVAL;
        }
        let task = tokio::spawn(run_sweeper(self.clone(), period, token.clone()));
        SweepHandle { token, task }
    }
}

#[instrument(skip(registry, token))]
async fn run_sweeper(registry: SessionRegistry, period: Duration, token: CancellationToken) {
    info!(
        timeout_secs = registry.config().inactivity_timeout().as_secs(),
        "Sweeper started"
    );

    let mut ticker = tokio::time::interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            biased;
            _ = token.cancelled() => break,
            _ = ticker.tick() => {}
        }

        let evicted = registry.sweep_once();
        debug!(evicted, live = registry.len(), "Sweep pass finished");
    }

    info!("Sweeper stopped");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RegistryConfig;

    #[tokio::test(start_paused = true)]
    async fn test_unvalidated_zero_interval_does_not_kill_sweeper() {
        let config: RegistryConfig =
            toml::from_str("sweep_interval_secs = 0\ninactivity_timeout_secs = 60").unwrap();
        let registry = SessionRegistry::new(config);
        let (id, _) = registry.create().unwrap();

        let sweeper = registry.spawn_sweeper(CancellationToken::new());
        tokio::time::sleep(Duration::from_secs(30)).await;
        assert!(!sweeper.is_finished());
        assert!(registry.contains(&id));

        tokio::time::sleep(Duration::from_secs(32)).await;
        assert!(!registry.contains(&id));

        sweeper.stop().await;
    }
}
