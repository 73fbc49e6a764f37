//! Path-based selection of rate-limit rules.

use chrono::Duration;

use gatehouse_core::config::{RateLimitConfig, RateLimitRule};

use super::limiter::{RateLimitDecision, RateLimiter};
use crate::policy::table::{covers, normalize};

/// The default rule plus prefix-scoped overrides.
#[derive(Debug, Clone)]
pub struct RateLimitRules {
    default: RateLimitRule,
    /// `(prefix, rule index)` sorted by descending prefix length.
    prefixes: Vec<(String, usize)>,
    rules: Vec<RateLimitRule>,
}

impl RateLimitRules {
    /// Builds the rule set from configuration.
    pub fn new(default: RateLimitRule, rules: Vec<RateLimitRule>) -> Self {
        let mut prefixes: Vec<(String, usize)> = rules
            .iter()
            .enumerate()
            .flat_map(|(idx, rule)| {
                rule.prefixes
                    .iter()
                    .map(move |prefix| (normalize(prefix).to_string(), idx))
            })
            .collect();
        prefixes.sort_by(|a, b| b.0.len().cmp(&a.0.len()));

        Self {
            default,
            prefixes,
            rules,
        }
    }

    /// Returns the rule governing `path`.
    pub fn rule_for(&self, path: &str) -> &RateLimitRule {
        let path = normalize(path);
        self.prefixes
            .iter()
            .find(|(prefix, _)| covers(prefix, path))
            .map(|(_, idx)| &self.rules[*idx])
            .unwrap_or(&self.default)
    }
}

/// Applies the matching rule's cap to a client on a path.
#[derive(Debug, Clone)]
pub struct RequestThrottle {
    enabled: bool,
    rules: RateLimitRules,
    limiter: RateLimiter,
}

impl RequestThrottle {
    /// Creates a throttle from configuration, sharing `limiter` with its sweeper.
    pub fn new(config: &RateLimitConfig, limiter: RateLimiter) -> Self {
        Self {
            enabled: config.enabled,
            rules: RateLimitRules::new(config.default.clone(), config.rules.clone()),
            limiter,
        }
    }

    /// Whether limiting is switched on.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// The underlying counter store.
    pub fn limiter(&self) -> &RateLimiter {
        &self.limiter
    }

    /// Counts a request from `client` to `path`. Returns `None` when disabled.
    pub fn check(&self, path: &str, client: &str) -> Option<RateLimitDecision> {
        if !self.enabled {
            return None;
        }
        let rule = self.rules.rule_for(path);
        let key = format!("{}:{}", rule.name, client);
        let decision = self.limiter.check(
            &key,
            rule.max_requests,
            Duration::seconds(rule.window_seconds as i64),
        );
        if !decision.allowed {
            tracing::warn!(
                rule = %rule.name,
                path,
                retry_after = decision.retry_after_seconds,
                "Rate limit exceeded"
            );
        }
        Some(decision)
    }
}
