//! Static mapping from protected path prefixes to their policies.

use gatehouse_core::types::RoutePolicy;

/// Read-only route policy table, built once at start-up.
///
/// Patterns match on path-segment boundaries: `/admin` covers `/admin` and
/// `/admin/users` but not `/administrator`. When several patterns cover a
/// path the longest one wins. Paths no pattern covers are unprotected.
#[derive(Debug, Clone, Default)]
pub struct RoutePolicyTable {
    /// Policies sorted by descending pattern length.
    policies: Vec<RoutePolicy>,
}

impl RoutePolicyTable {
    /// Builds a table from configured policies.
    pub fn new(policies: impl IntoIterator<Item = RoutePolicy>) -> Self {
        let mut policies: Vec<RoutePolicy> = policies
            .into_iter()
            .map(|mut policy| {
                policy.pattern = normalize(&policy.pattern).to_string();
                policy
            })
            .collect();
        policies.sort_by(|a, b| b.pattern.len().cmp(&a.pattern.len()));
        Self { policies }
    }

    /// Returns the policy protecting `path`, or `None` if it is unprotected.
    pub fn lookup(&self, path: &str) -> Option<&RoutePolicy> {
        let path = normalize(path);
        self.policies
            .iter()
            .find(|policy| covers(&policy.pattern, path))
    }

    /// Number of protected patterns.
    pub fn len(&self) -> usize {
        self.policies.len()
    }

    /// Whether the table protects nothing.
    pub fn is_empty(&self) -> bool {
        self.policies.is_empty()
    }

    /// Iterates over the policies, longest pattern first.
    pub fn iter(&self) -> impl Iterator<Item = &RoutePolicy> {
        self.policies.iter()
    }
}

/// Strips a trailing slash except on the root path.
pub(crate) fn normalize(path: &str) -> &str {
    if path.len() > 1 {
        path.trim_end_matches('/')
    } else {
        path
    }
}

/// Whether `pattern` covers `path` on a segment boundary.
pub(crate) fn covers(pattern: &str, path: &str) -> bool {
    if pattern == "/" {
        return true;
    }
    match path.strip_prefix(pattern) {
        Some(rest) => rest.is_empty() || rest.starts_with('/'),
        None => false,
    }
}
