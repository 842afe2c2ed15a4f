//! In-memory authoritative zone.
//!
//! Serves a fixed name→address mapping under a single zone base, both
//! forward (A/AAAA) and reverse (PTR). Never forwards, never errors:
//! names outside the mapping get an empty authoritative answer.

use async_trait::async_trait;
use split_dns_application::ports::DnsResolver;
use split_dns_domain::reverse_name::to_forward_address;
use split_dns_domain::{DnsAnswer, DnsQuery, DnsRecord, DomainError, RecordType};
use std::net::IpAddr;
use tracing::debug;

/// Fixed TTL for zone records. The zone is static for the process
/// lifetime, so a short TTL only costs repeat queries.
const STATIC_ZONE_TTL: u32 = 60;

pub struct StaticZoneResolver {
    /// Name→address pairs in sorted order, so reverse lookups that hit
    /// multiple names resolve the same way on every query.
    entries: Vec<(String, IpAddr)>,
    base: String,
}

impl StaticZoneResolver {
    pub fn new(entries: Vec<(String, IpAddr)>, base: String) -> Self {
        Self { entries, base }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn resolve_address(&self, query: &DnsQuery) -> DnsAnswer {
        let zone_suffix = format!(".{}.", self.base);
        let Some(host) = query.domain.strip_suffix(zone_suffix.as_str()) else {
            debug!(domain = %query.domain, base = %self.base, "Name outside zone");
            return DnsAnswer::empty_authoritative();
        };

        let wants_v4 = query.record_type == RecordType::A;
        for (name, addr) in &self.entries {
            if name == host && addr.is_ipv4() == wants_v4 {
                let record =
                    DnsRecord::address(query.domain.to_string(), STATIC_ZONE_TTL, *addr);
                return DnsAnswer::authoritative_records(vec![record]);
            }
        }

        DnsAnswer::empty_authoritative()
    }

    fn resolve_pointer(&self, query: &DnsQuery) -> DnsAnswer {
        let forward = to_forward_address(&query.domain);
        let Ok(target_addr) = forward.trim_end_matches('.').parse::<IpAddr>() else {
            debug!(domain = %query.domain, "Reverse name does not encode an address");
            return DnsAnswer::empty_authoritative();
        };

        // First entry wins when several names share an address.
        for (name, addr) in &self.entries {
            if *addr == target_addr {
                let target = format!("{}.{}.", name, self.base);
                let record =
                    DnsRecord::ptr(query.domain.to_string(), STATIC_ZONE_TTL, target);
                return DnsAnswer::authoritative_records(vec![record]);
            }
        }

        DnsAnswer::empty_authoritative()
    }
}

#[async_trait]
impl DnsResolver for StaticZoneResolver {
    async fn resolve(&self, query: &DnsQuery) -> Result<DnsAnswer, DomainError> {
        let answer = match query.record_type {
            RecordType::A | RecordType::AAAA => self.resolve_address(query),
            RecordType::PTR => self.resolve_pointer(query),
            _ => DnsAnswer::empty_authoritative(),
        };

        debug!(
            domain = %query.domain,
            record_type = %query.record_type,
            records = answer.records.len(),
            "Static zone lookup"
        );

        Ok(answer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use split_dns_domain::RecordData;

    fn zone() -> StaticZoneResolver {
        StaticZoneResolver::new(
            vec![
                ("db".to_string(), "10.0.0.7".parse().unwrap()),
                ("host".to_string(), "10.0.0.5".parse().unwrap()),
                ("host6".to_string(), "fd00::5".parse().unwrap()),
            ],
            "internal".to_string(),
        )
    }

    #[tokio::test]
    async fn test_a_lookup_hits() {
        let query = DnsQuery::new("host.internal.", RecordType::A);
        let answer = zone().resolve(&query).await.unwrap();

        assert!(answer.authoritative);
        assert_eq!(answer.records.len(), 1);
        assert_eq!(answer.records[0].name, "host.internal.");
        assert_eq!(answer.records[0].ttl, 60);
        assert_eq!(
            answer.records[0].data,
            RecordData::Address("10.0.0.5".parse().unwrap())
        );
    }

    #[tokio::test]
    async fn test_a_lookup_does_not_return_v6() {
        let query = DnsQuery::new("host6.internal.", RecordType::A);
        let answer = zone().resolve(&query).await.unwrap();
        assert!(answer.is_empty());
        assert!(answer.authoritative);
    }

    #[tokio::test]
    async fn test_aaaa_lookup_hits() {
        let query = DnsQuery::new("host6.internal.", RecordType::AAAA);
        let answer = zone().resolve(&query).await.unwrap();
        assert_eq!(
            answer.records[0].data,
            RecordData::Address("fd00::5".parse().unwrap())
        );
    }

    #[tokio::test]
    async fn test_unknown_name_is_empty_authoritative() {
        let query = DnsQuery::new("missing.internal.", RecordType::A);
        let answer = zone().resolve(&query).await.unwrap();
        assert!(answer.is_empty());
        assert!(answer.authoritative);
        assert!(answer.status.is_success());
    }

    #[tokio::test]
    async fn test_name_outside_zone_is_empty() {
        let query = DnsQuery::new("host.example.com.", RecordType::A);
        let answer = zone().resolve(&query).await.unwrap();
        assert!(answer.is_empty());
    }

    #[tokio::test]
    async fn test_ptr_round_trip() {
        // Forward then reverse must agree.
        let forward = DnsQuery::new("host.internal.", RecordType::A);
        let addr = zone().resolve(&forward).await.unwrap().records[0]
            .data
            .address()
            .unwrap();
        assert_eq!(addr.to_string(), "10.0.0.5");

        let reverse = DnsQuery::new("5.0.0.10.in-addr.arpa.", RecordType::PTR);
        let answer = zone().resolve(&reverse).await.unwrap();
        assert_eq!(answer.records.len(), 1);
        assert_eq!(
            answer.records[0].data,
            RecordData::Name("host.internal.".to_string())
        );
    }

    #[tokio::test]
    async fn test_ptr_unknown_address_is_empty() {
        let query = DnsQuery::new("9.9.9.9.in-addr.arpa.", RecordType::PTR);
        let answer = zone().resolve(&query).await.unwrap();
        assert!(answer.is_empty());
        assert!(answer.authoritative);
    }

    #[tokio::test]
    async fn test_malformed_reverse_name_is_empty() {
        let query = DnsQuery::new("not.an.address.in-addr.arpa.", RecordType::PTR);
        let answer = zone().resolve(&query).await.unwrap();
        assert!(answer.is_empty());
    }

    #[tokio::test]
    async fn test_unsupported_type_is_empty() {
        let query = DnsQuery::new("host.internal.", RecordType::MX);
        let answer = zone().resolve(&query).await.unwrap();
        assert!(answer.is_empty());
        assert!(answer.authoritative);
    }
}
