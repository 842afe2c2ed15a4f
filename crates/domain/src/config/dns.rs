use serde::{Deserialize, Serialize};

use super::routing::ResolverConfig;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DnsConfig {
    /// Upstream exchange timeout in seconds.
    #[serde(default = "default_query_timeout")]
    pub query_timeout: u64,

    /// Optional strategy consulted when no routing entry matches. Without
    /// it, unmatched queries get the synthetic name-not-found answer.
    #[serde(default)]
    pub default_resolver: Option<ResolverConfig>,
}

impl Default for DnsConfig {
    fn default() -> Self {
        Self {
            query_timeout: default_query_timeout(),
            default_resolver: None,
        }
    }
}

fn default_query_timeout() -> u64 {
    5
}

impl DnsConfig {
    pub fn timeout_ms(&self) -> u64 {
        self.query_timeout * 1000
    }
}
