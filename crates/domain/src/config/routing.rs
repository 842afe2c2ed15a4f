use serde::{Deserialize, Serialize};

/// Tagged description of a resolution strategy. The set is closed: a
/// `type` value outside these five tags fails deserialization, which is a
/// fatal configuration error at startup.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ResolverConfig {
    /// Plain UDP relay to an upstream server.
    Basic { server: String },

    /// DNS-over-TLS relay. The host part of `server` doubles as the TLS
    /// server name unless it is a literal address.
    Dot { server: String },

    /// In-memory authoritative zone.
    Static {
        domains_to_ips: std::collections::BTreeMap<String, String>,
        base: String,
    },

    /// Suffix-rewriting relay: queries for `new_suffix` names are sent
    /// upstream under `old_suffix` and answers rewritten back.
    Suffix {
        server: String,
        new_suffix: String,
        old_suffix: String,
    },

    /// Sequential fallback over an ordered list of child strategies.
    Merge { resolvers: Vec<ResolverConfig> },
}

/// One routing table entry: a match rule plus the strategy that serves it.
/// Exactly one of `domain` / `network` must be present.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RouteConfig {
    #[serde(default)]
    pub domain: Option<String>,

    #[serde(default)]
    pub network: Option<String>,

    pub resolver: ResolverConfig,
}
