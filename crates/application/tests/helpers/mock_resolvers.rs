#![allow(dead_code)]

use async_trait::async_trait;
use split_dns_application::ports::DnsResolver;
use split_dns_domain::{DnsAnswer, DnsQuery, DnsRecord, DomainError};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// Resolver that always returns the same outcome.
pub struct FixedResolver {
    outcome: Result<DnsAnswer, DomainError>,
}

impl FixedResolver {
    pub fn answer(answer: DnsAnswer) -> Self {
        Self {
            outcome: Ok(answer),
        }
    }

    pub fn error(error: DomainError) -> Self {
        Self {
            outcome: Err(error),
        }
    }

    pub fn single_address(domain: &str, ip: &str) -> Self {
        let record = DnsRecord::address(domain.to_string(), 60, ip.parse().unwrap());
        Self::answer(DnsAnswer::authoritative_records(vec![record]))
    }
}

#[async_trait]
impl DnsResolver for FixedResolver {
    async fn resolve(&self, _query: &DnsQuery) -> Result<DnsAnswer, DomainError> {
        self.outcome.clone()
    }
}

/// Resolver that records each query it sees and answers from a canned
/// outcome, for asserting what was forwarded.
pub struct MockResolver {
    outcome: Result<DnsAnswer, DomainError>,
    pub seen: Mutex<Vec<DnsQuery>>,
}

impl MockResolver {
    pub fn new(outcome: Result<DnsAnswer, DomainError>) -> Self {
        Self {
            outcome,
            seen: Mutex::new(vec![]),
        }
    }

    pub fn seen_domains(&self) -> Vec<String> {
        self.seen
            .lock()
            .unwrap()
            .iter()
            .map(|q| q.domain.to_string())
            .collect()
    }
}

#[async_trait]
impl DnsResolver for MockResolver {
    async fn resolve(&self, query: &DnsQuery) -> Result<DnsAnswer, DomainError> {
        self.seen.lock().unwrap().push(query.clone());
        self.outcome.clone()
    }
}

/// Resolver that counts invocations, for short-circuit assertions.
pub struct CountingResolver {
    outcome: Result<DnsAnswer, DomainError>,
    pub calls: AtomicUsize,
}

impl CountingResolver {
    pub fn new(outcome: Result<DnsAnswer, DomainError>) -> Self {
        Self {
            outcome,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DnsResolver for CountingResolver {
    async fn resolve(&self, _query: &DnsQuery) -> Result<DnsAnswer, DomainError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.outcome.clone()
    }
}
