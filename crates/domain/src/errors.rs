use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum DomainError {
    #[error("Invalid domain name: {0}")]
    InvalidDomainName(String),

    #[error("Invalid IP address: {0}")]
    InvalidIpAddress(String),

    #[error("Invalid CIDR format: {0}")]
    InvalidCidr(String),

    #[error("Invalid DNS response: {0}")]
    InvalidDnsResponse(String),

    #[error("Query timeout")]
    QueryTimeout,

    #[error("Transport timeout connecting to {server}")]
    TransportTimeout { server: String },

    #[error("Transport connection refused by {server}")]
    TransportConnectionRefused { server: String },

    #[error("Transport connection reset by {server}")]
    TransportConnectionReset { server: String },

    #[error("TLS handshake failed with {server}")]
    TransportHandshakeFailed { server: String },

    #[error("I/O error: {0}")]
    IoError(String),
}

impl DomainError {
    /// Transport-level failures are the ones a sequential fallback absorbs
    /// by moving on to its next child.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            DomainError::QueryTimeout
                | DomainError::TransportTimeout { .. }
                | DomainError::TransportConnectionRefused { .. }
                | DomainError::TransportConnectionReset { .. }
                | DomainError::TransportHandshakeFailed { .. }
                | DomainError::IoError(_)
        )
    }
}
