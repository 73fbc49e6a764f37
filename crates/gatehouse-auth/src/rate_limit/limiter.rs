//! Fixed-window counters keyed by client identity.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;

/// Counter state for one key within its current window.
#[derive(Debug, Clone, Copy)]
struct WindowCounter {
    /// Requests admitted in this window.
    count: u32,
    /// Instant after which the window is over.
    reset_at: DateTime<Utc>,
}

/// Result of a single rate-limit check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitDecision {
    /// Whether the request may proceed.
    pub allowed: bool,
    /// The cap for this window.
    pub limit: u32,
    /// Requests still available in this window.
    pub remaining: u32,
    /// When the current window ends.
    pub reset_at: DateTime<Utc>,
    /// Whole seconds until the window ends (at least 1 when denied).
    pub retry_after_seconds: u64,
}

/// In-memory fixed-window rate limiter.
///
/// Each check takes the key's shard lock for the read-compare-increment,
/// so concurrent requests for one key cannot both pass at the cap.
#[derive(Debug, Clone, Default)]
pub struct RateLimiter {
    /// Key → counter.
    counters: Arc<DashMap<String, WindowCounter>>,
}

impl RateLimiter {
    /// Creates an empty limiter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts one request for `key` against `max_requests` per `window`.
    pub fn check(&self, key: &str, max_requests: u32, window: Duration) -> RateLimitDecision {
        self.check_at(key, max_requests, window, Utc::now())
    }

    /// Same as [`RateLimiter::check`] with an explicit clock reading.
    pub fn check_at(
        &self,
        key: &str,
        max_requests: u32,
        window: Duration,
        now: DateTime<Utc>,
    ) -> RateLimitDecision {
        let mut entry = self
            .counters
            .entry(key.to_string())
            .or_insert(WindowCounter {
                count: 0,
                reset_at: window_end(now, window),
            });
        let counter = entry.value_mut();

        if now > counter.reset_at {
            counter.count = 0;
            counter.reset_at = window_end(now, window);
        }

        let allowed = counter.count < max_requests;
        if allowed {
            counter.count += 1;
        }

        let secs_left = (counter.reset_at - now).num_milliseconds().max(0) as u64;
        let retry_after_seconds = secs_left.div_ceil(1000);

        RateLimitDecision {
            allowed,
            limit: max_requests,
            remaining: max_requests.saturating_sub(counter.count),
            reset_at: counter.reset_at,
            retry_after_seconds: if allowed {
                retry_after_seconds
            } else {
                retry_after_seconds.max(1)
            },
        }
    }

    /// Boolean form of [`RateLimiter::check`].
    pub fn allow(&self, key: &str, max_requests: u32, window: Duration) -> bool {
        self.check(key, max_requests, window).allowed
    }

    /// Removes counters whose window has ended. Returns how many were removed.
    pub fn sweep(&self) -> usize {
        self.sweep_at(Utc::now())
    }

    /// Same as [`RateLimiter::sweep`] with an explicit clock reading.
    pub fn sweep_at(&self, now: DateTime<Utc>) -> usize {
        let before = self.counters.len();
        self.counters.retain(|_, counter| counter.reset_at >= now);
        before.saturating_sub(self.counters.len())
    }

    /// Number of tracked keys.
    pub fn len(&self) -> usize {
        self.counters.len()
    }

    /// Whether no keys are tracked.
    pub fn is_empty(&self) -> bool {
        self.counters.is_empty()
    }
}

/// End of a window opened at `now`, saturating at the latest representable instant.
fn window_end(now: DateTime<Utc>, window: Duration) -> DateTime<Utc> {
    now.checked_add_signed(window).unwrap_or(DateTime::<Utc>::MAX_UTC)
}
