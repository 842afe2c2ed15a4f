use crate::ports::DnsResolver;
use split_dns_domain::rule::normalize_for_routing;
use split_dns_domain::{DnsQuery, MatchRule};
use std::sync::Arc;
use tracing::debug;

/// One (match rule, strategy) pair.
pub struct RouteEntry {
    pub rule: MatchRule,
    pub resolver: Arc<dyn DnsResolver>,
}

impl RouteEntry {
    pub fn new(rule: MatchRule, resolver: Arc<dyn DnsResolver>) -> Self {
        Self { rule, resolver }
    }
}

/// Ordered routing table. Built once from configuration and never changed
/// afterwards: no entry is added, removed or reordered at runtime, and
/// table order is exactly configuration order.
pub struct RoutingTable {
    entries: Vec<RouteEntry>,
}

impl RoutingTable {
    pub fn new(entries: Vec<RouteEntry>) -> Self {
        debug!(entries = entries.len(), "Routing table built");
        Self { entries }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Select the strategy for a query. First match wins.
    ///
    /// The query name is normalized once: reverse-lookup names become
    /// their forward address form. If that form parses as an address the
    /// scan considers network rules only, otherwise domain rules only —
    /// a query is never matched against both rule kinds. Domain rules are
    /// evaluated against the original query name.
    ///
    /// Pure decision function over immutable state: deterministic, no
    /// side effects.
    pub fn route(&self, query: &DnsQuery) -> Option<&Arc<dyn DnsResolver>> {
        let address_form = normalize_for_routing(&query.domain);

        for (position, entry) in self.entries.iter().enumerate() {
            if entry.rule.matches(&query.domain, address_form) {
                debug!(
                    domain = %query.domain,
                    record_type = %query.record_type,
                    position,
                    "Routing rule matched"
                );
                return Some(&entry.resolver);
            }
        }

        None
    }
}
