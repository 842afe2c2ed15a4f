//! Conversions between our closed record-type set and hickory's.

use hickory_proto::rr::RecordType as HickoryType;
use split_dns_domain::RecordType;

pub struct RecordTypeMapper;

impl RecordTypeMapper {
    pub fn to_hickory(record_type: &RecordType) -> HickoryType {
        match record_type {
            RecordType::A => HickoryType::A,
            RecordType::AAAA => HickoryType::AAAA,
            RecordType::CNAME => HickoryType::CNAME,
            RecordType::MX => HickoryType::MX,
            RecordType::TXT => HickoryType::TXT,
            RecordType::PTR => HickoryType::PTR,
            RecordType::NS => HickoryType::NS,
            RecordType::SOA => HickoryType::SOA,
            RecordType::SRV => HickoryType::SRV,
        }
    }

    pub fn from_hickory(record_type: HickoryType) -> Option<RecordType> {
        match record_type {
            HickoryType::A => Some(RecordType::A),
            HickoryType::AAAA => Some(RecordType::AAAA),
            HickoryType::CNAME => Some(RecordType::CNAME),
            HickoryType::MX => Some(RecordType::MX),
            HickoryType::TXT => Some(RecordType::TXT),
            HickoryType::PTR => Some(RecordType::PTR),
            HickoryType::NS => Some(RecordType::NS),
            HickoryType::SOA => Some(RecordType::SOA),
            HickoryType::SRV => Some(RecordType::SRV),
            _ => None,
        }
    }
}
