use super::DnsRecord;

/// Status code of an answer, mirroring the DNS RCODEs the router produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseStatus {
    NoError,
    NxDomain,
    ServFail,
    Refused,
}

impl ResponseStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResponseStatus::NoError => "NOERROR",
            ResponseStatus::NxDomain => "NXDOMAIN",
            ResponseStatus::ServFail => "SERVFAIL",
            ResponseStatus::Refused => "REFUSED",
        }
    }

    pub fn to_rcode(&self) -> u8 {
        match self {
            ResponseStatus::NoError => 0,
            ResponseStatus::ServFail => 2,
            ResponseStatus::NxDomain => 3,
            ResponseStatus::Refused => 5,
        }
    }

    pub fn from_rcode(code: u8) -> Self {
        match code {
            0 => ResponseStatus::NoError,
            3 => ResponseStatus::NxDomain,
            5 => ResponseStatus::Refused,
            _ => ResponseStatus::ServFail,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ResponseStatus::NoError)
    }
}

/// The structured result of resolving a query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DnsAnswer {
    pub status: ResponseStatus,
    pub authoritative: bool,
    pub records: Vec<DnsRecord>,
}

impl DnsAnswer {
    pub fn new(status: ResponseStatus, authoritative: bool, records: Vec<DnsRecord>) -> Self {
        Self {
            status,
            authoritative,
            records,
        }
    }

    /// Synthetic failure answer returned when no routing entry matches and
    /// when every fallback child comes up empty. Zero records, name-not-found.
    pub fn routing_miss() -> Self {
        Self {
            status: ResponseStatus::NxDomain,
            authoritative: false,
            records: vec![],
        }
    }

    /// Empty but successful answer from an authoritative source: the name
    /// is known territory, it just has no matching records.
    pub fn empty_authoritative() -> Self {
        Self {
            status: ResponseStatus::NoError,
            authoritative: true,
            records: vec![],
        }
    }

    pub fn authoritative_records(records: Vec<DnsRecord>) -> Self {
        Self {
            status: ResponseStatus::NoError,
            authoritative: true,
            records,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
