//! Sequential fallback over an ordered list of child strategies.
//!
//! Children are tried in configuration order; the first that answers
//! without error and with at least one record wins. Child failures are
//! absorbed, so a fallback chain never surfaces an error to its caller.

use async_trait::async_trait;
use split_dns_application::ports::DnsResolver;
use split_dns_domain::{DnsAnswer, DnsQuery, DomainError};
use std::sync::Arc;
use tracing::{debug, warn};

pub struct MergeResolver {
    children: Vec<Arc<dyn DnsResolver>>,
}

impl MergeResolver {
    pub fn new(children: Vec<Arc<dyn DnsResolver>>) -> Self {
        Self { children }
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}

#[async_trait]
impl DnsResolver for MergeResolver {
    async fn resolve(&self, query: &DnsQuery) -> Result<DnsAnswer, DomainError> {
        for (position, child) in self.children.iter().enumerate() {
            match child.resolve(query).await {
                Ok(answer) if !answer.is_empty() => {
                    debug!(
                        domain = %query.domain,
                        position,
                        records = answer.records.len(),
                        "Fallback child answered"
                    );
                    return Ok(answer);
                }
                Ok(_) => {
                    debug!(domain = %query.domain, position, "Fallback child empty, trying next");
                }
                Err(e) => {
                    warn!(
                        domain = %query.domain,
                        position,
                        error = %e,
                        "Fallback child failed, trying next"
                    );
                }
            }
        }

        Ok(DnsAnswer::routing_miss())
    }
}
