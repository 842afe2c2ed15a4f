pub mod framing;
pub mod tls;
pub mod udp;

use async_trait::async_trait;
use split_dns_domain::DomainError;
use std::time::Duration;

pub use tls::TlsTransport;
pub use udp::UdpTransport;

#[derive(Debug)]
pub struct TransportResponse {
    pub bytes: Vec<u8>,

    pub protocol_used: &'static str,
}

/// Request/response exchange with one upstream server. Implementations
/// perform exactly one attempt per call, bounded by the timeout.
#[async_trait]
pub trait DnsTransport: Send + Sync {
    async fn send(
        &self,
        message_bytes: &[u8],
        timeout: Duration,
    ) -> Result<TransportResponse, DomainError>;

    fn protocol_name(&self) -> &'static str;
}
