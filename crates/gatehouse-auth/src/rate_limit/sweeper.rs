//! Periodic removal of expired rate-limit counters.

use std::time::Duration;

use tokio::sync::watch;
use tokio::time;
use tracing::{debug, info};

use super::limiter::RateLimiter;

/// Background task bounding the limiter's memory.
#[derive(Debug, Clone)]
pub struct RateLimitSweeper {
    /// Counters to sweep.
    limiter: RateLimiter,
    /// Pause between sweeps.
    interval: Duration,
}

impl RateLimitSweeper {
    /// Creates a sweeper for `limiter` running every `interval`.
    pub fn new(limiter: RateLimiter, interval: Duration) -> Self {
        Self { limiter, interval }
    }

    /// Runs a single sweep, returning the number of counters removed.
    pub fn run_once(&self) -> usize {
        let removed = self.limiter.sweep();
        if removed > 0 {
            debug!(removed, remaining = self.limiter.len(), "Swept rate-limit counters");
        }
        removed
    }

    /// Sweeps on every tick until `cancel` flips to `true`.
    pub async fn run(&self, mut cancel: watch::Receiver<bool>) {
        info!(
            interval_seconds = self.interval.as_secs(),
            "Rate-limit sweeper started"
        );

        let mut ticker = time::interval(self.interval);
        ticker.set_missed_tick_behavior(time::MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                changed = cancel.changed() => {
                    if changed.is_err() || *cancel.borrow() {
                        info!("Rate-limit sweeper received shutdown signal");
                        break;
                    }
                }
                _ = ticker.tick() => {
                    self.run_once();
                }
            }
        }
    }
}
