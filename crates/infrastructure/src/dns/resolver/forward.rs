//! Plain UDP relay to a single upstream server.

use crate::dns::codec::{MessageBuilder, ResponseParser};
use crate::dns::transport::{DnsTransport, UdpTransport};
use async_trait::async_trait;
use split_dns_application::ports::DnsResolver;
use split_dns_domain::{DnsAnswer, DnsQuery, DomainError};
use std::net::SocketAddr;
use std::time::Duration;
use tracing::debug;

pub struct ForwardResolver {
    transport: UdpTransport,
    server: String,
    timeout: Duration,
}

impl ForwardResolver {
    pub fn new(server_addr: SocketAddr, timeout: Duration) -> Self {
        Self {
            transport: UdpTransport::new(server_addr),
            server: server_addr.to_string(),
            timeout,
        }
    }

    pub fn server(&self) -> &str {
        &self.server
    }
}

#[async_trait]
impl DnsResolver for ForwardResolver {
    async fn resolve(&self, query: &DnsQuery) -> Result<DnsAnswer, DomainError> {
        let query_bytes = MessageBuilder::build_query(query)?;

        let response = self.transport.send(&query_bytes, self.timeout).await?;
        let answer = ResponseParser::parse(&response.bytes)?;

        debug!(
            domain = %query.domain,
            record_type = %query.record_type,
            server = %self.server,
            status = answer.status.as_str(),
            records = answer.records.len(),
            "Upstream exchange complete"
        );

        Ok(answer)
    }
}
