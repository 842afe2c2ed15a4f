//! Suffix-rewriting relay.
//!
//! Presents an upstream zone under a different name: queries arriving for
//! the external suffix are forwarded under the internal suffix, and the
//! answer is rewritten back before it leaves. Callers never observe the
//! internal suffix.

use async_trait::async_trait;
use split_dns_application::ports::DnsResolver;
use split_dns_domain::{DnsAnswer, DnsQuery, DnsRecord, DomainError, RecordData, RecordType};
use std::sync::Arc;
use tracing::debug;

pub struct SuffixResolver {
    upstream: Arc<dyn DnsResolver>,
    /// Suffix the callers use (`new_suffix` in configuration).
    external_suffix: String,
    /// Suffix the upstream knows (`old_suffix` in configuration).
    internal_suffix: String,
}

impl SuffixResolver {
    pub fn new(
        upstream: Arc<dyn DnsResolver>,
        external_suffix: String,
        internal_suffix: String,
    ) -> Self {
        Self {
            upstream,
            external_suffix,
            internal_suffix,
        }
    }

    fn rewrite(name: &str, from: &str, to: &str) -> String {
        match name.strip_suffix(from) {
            Some(prefix) => format!("{}{}", prefix, to),
            None => name.to_string(),
        }
    }

    fn rewrite_record(&self, record: DnsRecord) -> DnsRecord {
        // PTR answers carry the name in the data, everything else in the
        // owner name.
        if record.record_type == RecordType::PTR {
            if let RecordData::Name(target) = &record.data {
                let rewritten =
                    Self::rewrite(target, &self.internal_suffix, &self.external_suffix);
                return DnsRecord::new(
                    record.name,
                    record.record_type,
                    record.ttl,
                    RecordData::Name(rewritten),
                );
            }
            return record;
        }

        let owner = Self::rewrite(&record.name, &self.internal_suffix, &self.external_suffix);
        DnsRecord::new(owner, record.record_type, record.ttl, record.data)
    }
}

#[async_trait]
impl DnsResolver for SuffixResolver {
    async fn resolve(&self, query: &DnsQuery) -> Result<DnsAnswer, DomainError> {
        let internal_name = Self::rewrite(
            &query.domain,
            &self.external_suffix,
            &self.internal_suffix,
        );

        debug!(
            external = %query.domain,
            internal = %internal_name,
            "Suffix rewrite outgoing"
        );

        let internal_query = query.with_domain(internal_name);
        let answer = self.upstream.resolve(&internal_query).await?;

        let records = answer
            .records
            .into_iter()
            .map(|record| self.rewrite_record(record))
            .collect();

        Ok(DnsAnswer::new(answer.status, answer.authoritative, records))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use split_dns_domain::ResponseStatus;
    use std::sync::Mutex;

    /// Inner resolver that records the query it saw and returns a fixed
    /// answer.
    struct RecordingResolver {
        seen: Mutex<Vec<String>>,
        answer: DnsAnswer,
    }

    impl RecordingResolver {
        fn new(answer: DnsAnswer) -> Self {
            Self {
                seen: Mutex::new(Vec::new()),
                answer,
            }
        }
    }

    #[async_trait]
    impl DnsResolver for RecordingResolver {
        async fn resolve(&self, query: &DnsQuery) -> Result<DnsAnswer, DomainError> {
            self.seen.lock().unwrap().push(query.domain.to_string());
            Ok(self.answer.clone())
        }
    }

    fn suffix_over(inner: Arc<RecordingResolver>) -> SuffixResolver {
        SuffixResolver::new(inner, "corp.example.com.".to_string(), "lan.".to_string())
    }

    #[tokio::test]
    async fn test_outgoing_query_uses_internal_suffix() {
        let inner = Arc::new(RecordingResolver::new(DnsAnswer::routing_miss()));
        let resolver = suffix_over(inner.clone());

        let query = DnsQuery::new("www.corp.example.com.", RecordType::A);
        resolver.resolve(&query).await.unwrap();

        assert_eq!(inner.seen.lock().unwrap().as_slice(), &["www.lan."]);
    }

    #[tokio::test]
    async fn test_answer_owner_names_are_rewritten_back() {
        let record = DnsRecord::address("www.lan.".to_string(), 300, "10.0.0.8".parse().unwrap());
        let inner = Arc::new(RecordingResolver::new(DnsAnswer::new(
            ResponseStatus::NoError,
            false,
            vec![record],
        )));
        let resolver = suffix_over(inner);

        let query = DnsQuery::new("www.corp.example.com.", RecordType::A);
        let answer = resolver.resolve(&query).await.unwrap();

        assert_eq!(answer.records[0].name, "www.corp.example.com.");
    }

    #[tokio::test]
    async fn test_ptr_target_is_rewritten_in_data() {
        let record = DnsRecord::ptr(
            "8.0.0.10.in-addr.arpa.".to_string(),
            300,
            "www.lan.".to_string(),
        );
        let inner = Arc::new(RecordingResolver::new(DnsAnswer::new(
            ResponseStatus::NoError,
            false,
            vec![record],
        )));
        let resolver = suffix_over(inner);

        let query = DnsQuery::new("8.0.0.10.in-addr.arpa.", RecordType::PTR);
        let answer = resolver.resolve(&query).await.unwrap();

        // Owner stays, data carries the external name.
        assert_eq!(answer.records[0].name, "8.0.0.10.in-addr.arpa.");
        assert_eq!(
            answer.records[0].data,
            RecordData::Name("www.corp.example.com.".to_string())
        );
    }

    #[tokio::test]
    async fn test_name_without_external_suffix_passes_through() {
        let inner = Arc::new(RecordingResolver::new(DnsAnswer::routing_miss()));
        let resolver = suffix_over(inner.clone());

        let query = DnsQuery::new("unrelated.example.org.", RecordType::A);
        resolver.resolve(&query).await.unwrap();

        assert_eq!(
            inner.seen.lock().unwrap().as_slice(),
            &["unrelated.example.org."]
        );
    }

    #[tokio::test]
    async fn test_transport_errors_propagate() {
        struct FailingResolver;

        #[async_trait]
        impl DnsResolver for FailingResolver {
            async fn resolve(&self, _query: &DnsQuery) -> Result<DnsAnswer, DomainError> {
                Err(DomainError::QueryTimeout)
            }
        }

        let resolver = SuffixResolver::new(
            Arc::new(FailingResolver),
            "corp.example.com.".to_string(),
            "lan.".to_string(),
        );

        let query = DnsQuery::new("www.corp.example.com.", RecordType::A);
        assert!(resolver.resolve(&query).await.is_err());
    }
}
