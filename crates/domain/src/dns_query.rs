use super::RecordType;
use std::sync::Arc;

/// A name-resolution request as received from the wire. The domain keeps
/// the trailing dot so reverse-lookup suffix handling sees the FQDN form.
#[derive(Debug, Clone)]
pub struct DnsQuery {
    pub domain: Arc<str>,
    pub record_type: RecordType,
}

impl DnsQuery {
    pub fn new(domain: impl Into<Arc<str>>, record_type: RecordType) -> Self {
        Self {
            domain: domain.into(),
            record_type,
        }
    }

    /// Copy of this query with a different name, same record type.
    /// Used by rewriting resolvers; the original query is never mutated.
    pub fn with_domain(&self, domain: impl Into<Arc<str>>) -> Self {
        Self {
            domain: domain.into(),
            record_type: self.record_type,
        }
    }
}
