//! DNS-over-TLS relay (RFC 7858).
//!
//! Same contract as the plain relay, but the exchange rides a persistent
//! TLS session owned by this resolver instance.

use crate::dns::codec::{MessageBuilder, ResponseParser};
use crate::dns::transport::{DnsTransport, TlsTransport};
use async_trait::async_trait;
use split_dns_application::ports::DnsResolver;
use split_dns_domain::{DnsAnswer, DnsQuery, DomainError};
use std::net::SocketAddr;
use std::time::Duration;
use tracing::debug;

pub struct DotResolver {
    transport: TlsTransport,
    timeout: Duration,
}

impl DotResolver {
    pub fn new(server_addr: SocketAddr, hostname: String, timeout: Duration) -> Self {
        Self {
            transport: TlsTransport::new(server_addr, hostname),
            timeout,
        }
    }

    pub fn server(&self) -> String {
        self.transport.server_addr().to_string()
    }
}

#[async_trait]
impl DnsResolver for DotResolver {
    async fn resolve(&self, query: &DnsQuery) -> Result<DnsAnswer, DomainError> {
        let query_bytes = MessageBuilder::build_query(query)?;

        let response = self.transport.send(&query_bytes, self.timeout).await?;
        let answer = ResponseParser::parse(&response.bytes)?;

        debug!(
            domain = %query.domain,
            record_type = %query.record_type,
            server = %self.transport.server_addr(),
            hostname = self.transport.hostname(),
            status = answer.status.as_str(),
            "Encrypted upstream exchange complete"
        );

        Ok(answer)
    }
}
