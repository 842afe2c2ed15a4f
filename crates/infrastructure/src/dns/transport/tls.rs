//! DNS-over-TLS transport (RFC 7858)
//!
//! The `ClientConfig` is built once and shared process-wide; each
//! transport instance owns its connection pool, so the persistent TLS
//! session state lives and dies with the strategy that configured it.
//! Idle connections are reused across queries to amortize the handshake,
//! and the pool tolerates concurrent in-flight queries by handing each
//! caller its own connection.

use super::framing::{read_with_length_prefix, send_with_length_prefix};
use super::{DnsTransport, TransportResponse};
use async_trait::async_trait;
use rustls::pki_types::ServerName;
use split_dns_domain::DomainError;
use std::net::SocketAddr;
use std::sync::{Arc, LazyLock};
use std::time::Duration;
use tokio::net::TcpStream;
use tokio::sync::Mutex;
use tokio_rustls::client::TlsStream;
use tracing::debug;

/// Maximum idle connections kept for reuse.
const MAX_IDLE_CONNECTIONS: usize = 2;

/// Shared TLS config — built once, reused for all DoT upstreams.
/// Session resumption (session tickets) comes with the rustls session
/// cache automatically.
static SHARED_TLS_CONFIG: LazyLock<Arc<rustls::ClientConfig>> = LazyLock::new(|| {
    let mut root_store = rustls::RootCertStore::empty();
    root_store.extend(webpki_roots::TLS_SERVER_ROOTS.iter().cloned());

    let config = rustls::ClientConfig::builder()
        .with_root_certificates(root_store)
        .with_no_client_auth();

    Arc::new(config)
});

pub struct TlsTransport {
    server_addr: SocketAddr,
    hostname: String,
    idle: Mutex<Vec<TlsStream<TcpStream>>>,
}

impl TlsTransport {
    pub fn new(server_addr: SocketAddr, hostname: String) -> Self {
        Self {
            server_addr,
            hostname,
            idle: Mutex::new(Vec::new()),
        }
    }

    pub fn server_addr(&self) -> SocketAddr {
        self.server_addr
    }

    pub fn hostname(&self) -> &str {
        &self.hostname
    }

    async fn take_pooled(&self) -> Option<TlsStream<TcpStream>> {
        self.idle.lock().await.pop()
    }

    async fn return_to_pool(&self, stream: TlsStream<TcpStream>) {
        let mut idle = self.idle.lock().await;
        if idle.len() < MAX_IDLE_CONNECTIONS {
            idle.push(stream);
        }
        // A full pool simply drops (closes) the connection.
    }

    /// Establish a new TLS connection (TCP connect + TLS handshake).
    async fn connect_new(&self, timeout: Duration) -> Result<TlsStream<TcpStream>, DomainError> {
        let connector = tokio_rustls::TlsConnector::from(SHARED_TLS_CONFIG.clone());

        let server_name = ServerName::try_from(self.hostname.clone()).map_err(|e| {
            DomainError::InvalidDomainName(format!(
                "Invalid TLS hostname '{}': {}",
                self.hostname, e
            ))
        })?;

        let tcp_stream = tokio::time::timeout(timeout, TcpStream::connect(self.server_addr))
            .await
            .map_err(|_| DomainError::TransportTimeout {
                server: self.server_addr.to_string(),
            })?
            .map_err(|_| DomainError::TransportConnectionRefused {
                server: self.server_addr.to_string(),
            })?;

        let tls_stream = tokio::time::timeout(timeout, connector.connect(server_name, tcp_stream))
            .await
            .map_err(|_| DomainError::TransportTimeout {
                server: self.server_addr.to_string(),
            })?
            .map_err(|_| DomainError::TransportHandshakeFailed {
                server: self.server_addr.to_string(),
            })?;

        debug!(server = %self.server_addr, hostname = %self.hostname, "TLS connection established");
        Ok(tls_stream)
    }

    /// Whether a pooled-connection failure looks like a dead keepalive
    /// (reset/EOF on the idle stream) rather than an upstream fault. Only
    /// these warrant retrying on a fresh connection; a timeout means the
    /// exchange itself ran, and retrying would send the query twice.
    fn is_stale_connection_error(error: &DomainError) -> bool {
        matches!(
            error,
            DomainError::IoError(_) | DomainError::TransportConnectionReset { .. }
        )
    }

    async fn send_on_stream(
        &self,
        stream: &mut TlsStream<TcpStream>,
        message_bytes: &[u8],
        timeout: Duration,
    ) -> Result<Vec<u8>, DomainError> {
        tokio::time::timeout(timeout, send_with_length_prefix(stream, message_bytes))
            .await
            .map_err(|_| DomainError::TransportTimeout {
                server: self.server_addr.to_string(),
            })??;

        let response_bytes = tokio::time::timeout(timeout, read_with_length_prefix(stream))
            .await
            .map_err(|_| DomainError::TransportTimeout {
                server: self.server_addr.to_string(),
            })??;

        Ok(response_bytes)
    }
}

#[async_trait]
impl DnsTransport for TlsTransport {
    async fn send(
        &self,
        message_bytes: &[u8],
        timeout: Duration,
    ) -> Result<TransportResponse, DomainError> {
        // Reuse an idle connection when one is available.
        if let Some(mut stream) = self.take_pooled().await {
            match self
                .send_on_stream(&mut stream, message_bytes, timeout)
                .await
            {
                Ok(response_bytes) => {
                    debug!(server = %self.server_addr, "TLS query via pooled connection");
                    self.return_to_pool(stream).await;
                    return Ok(TransportResponse {
                        bytes: response_bytes,
                        protocol_used: "TLS",
                    });
                }
                Err(e) if Self::is_stale_connection_error(&e) => {
                    // Dead keepalive — fall through to a fresh connection.
                    debug!(server = %self.server_addr, error = %e, "Pooled TLS connection stale, reconnecting");
                }
                Err(e) => return Err(e),
            }
        }

        let mut stream = self.connect_new(timeout).await?;

        let response_bytes = self
            .send_on_stream(&mut stream, message_bytes, timeout)
            .await?;

        debug!(
            server = %self.server_addr,
            response_len = response_bytes.len(),
            "TLS response received"
        );

        self.return_to_pool(stream).await;

        Ok(TransportResponse {
            bytes: response_bytes,
            protocol_used: "TLS",
        })
    }

    fn protocol_name(&self) -> &'static str {
        "TLS"
    }
}
