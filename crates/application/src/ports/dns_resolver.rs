use async_trait::async_trait;
use split_dns_domain::{DnsAnswer, DnsQuery, DomainError};

/// One algorithm for turning a query into an answer.
///
/// Implementations own their configuration (upstream address, static map,
/// suffix pair, child list) and are immutable after construction, so a
/// single instance serves concurrent queries without locking. Transport
/// failures come back as errors; strategies never retry.
#[async_trait]
pub trait DnsResolver: Send + Sync {
    async fn resolve(&self, query: &DnsQuery) -> Result<DnsAnswer, DomainError>;
}
