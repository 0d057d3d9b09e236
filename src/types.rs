use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The one status code treated as success.
///
/// The check is exact equality: redirects and every other 2xx code are
/// errors, not near-misses.
pub const OK: StatusCode = StatusCode::OK;

/// Ordered set of request headers keyed by name.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HeaderSet(pub BTreeMap<String, String>);

impl HeaderSet {
    pub fn empty() -> Self {
        Self(BTreeMap::new())
    }
    pub fn with(mut self, k: &str, v: &str) -> Self {
        self.0.insert(k.to_string(), v.to_string());
        self
    }
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Options for a single GET.
///
/// The exact set of accepted knobs: extra request headers only. They are
/// merged on top of the fixed header set and win on name collision.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GetOptions {
    pub headers: HeaderSet,
}

impl GetOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one extra request header.
    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.headers = self.headers.with(name, value);
        self
    }
}
