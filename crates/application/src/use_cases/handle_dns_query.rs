use crate::ports::DnsResolver;
use crate::routing::RoutingTable;
use split_dns_domain::{DnsAnswer, DnsQuery};
use std::sync::Arc;
use tracing::{debug, warn};

/// The query router: selects a strategy from the routing table, invokes
/// it, and turns every failure mode into a well-formed answer. The
/// transport layer never sees an error and never leaves a request
/// unanswered.
pub struct HandleDnsQueryUseCase {
    table: RoutingTable,
    default_resolver: Option<Arc<dyn DnsResolver>>,
}

impl HandleDnsQueryUseCase {
    pub fn new(table: RoutingTable) -> Self {
        Self {
            table,
            default_resolver: None,
        }
    }

    /// Configure a strategy consulted when no table entry matches.
    /// Without one, unmatched queries get the synthetic miss answer.
    pub fn with_default_resolver(mut self, resolver: Arc<dyn DnsResolver>) -> Self {
        self.default_resolver = Some(resolver);
        self
    }

    pub async fn execute(&self, query: &DnsQuery) -> DnsAnswer {
        let resolver = match self.table.route(query) {
            Some(resolver) => resolver,
            None => match &self.default_resolver {
                Some(default) => {
                    debug!(domain = %query.domain, "No route matched, using default resolver");
                    default
                }
                None => {
                    debug!(domain = %query.domain, "No route matched");
                    return DnsAnswer::routing_miss();
                }
            },
        };

        match resolver.resolve(query).await {
            Ok(answer) => {
                debug!(
                    domain = %query.domain,
                    record_type = %query.record_type,
                    status = answer.status.as_str(),
                    records = answer.records.len(),
                    "Query resolved"
                );
                answer
            }
            Err(e) => {
                warn!(domain = %query.domain, error = %e, "Resolution failed");
                DnsAnswer::routing_miss()
            }
        }
    }
}
