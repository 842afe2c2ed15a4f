use super::RecordType;
use std::net::IpAddr;

/// Type-specific value carried by a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordData {
    /// A / AAAA payload.
    Address(IpAddr),
    /// Target name payload (PTR, CNAME, NS).
    Name(String),
}

impl RecordData {
    pub fn address(&self) -> Option<IpAddr> {
        match self {
            RecordData::Address(addr) => Some(*addr),
            RecordData::Name(_) => None,
        }
    }

    pub fn name(&self) -> Option<&str> {
        match self {
            RecordData::Name(name) => Some(name),
            RecordData::Address(_) => None,
        }
    }
}

/// One fact within an answer: owner name, type, TTL and value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DnsRecord {
    pub name: String,
    pub record_type: RecordType,
    pub ttl: u32,
    pub data: RecordData,
}

impl DnsRecord {
    pub fn new(name: String, record_type: RecordType, ttl: u32, data: RecordData) -> Self {
        Self {
            name,
            record_type,
            ttl,
            data,
        }
    }

    pub fn address(name: String, ttl: u32, addr: IpAddr) -> Self {
        let record_type = if addr.is_ipv4() {
            RecordType::A
        } else {
            RecordType::AAAA
        };
        Self::new(name, record_type, ttl, RecordData::Address(addr))
    }

    pub fn ptr(name: String, ttl: u32, target: String) -> Self {
        Self::new(name, RecordType::PTR, ttl, RecordData::Name(target))
    }
}
