//! Parses upstream wire responses into domain answers.

use super::record_type_map::RecordTypeMapper;
use hickory_proto::op::{Message, ResponseCode};
use hickory_proto::rr::RData;
use split_dns_domain::{
    DnsAnswer, DnsRecord, DomainError, RecordData, ResponseStatus,
};
use std::net::IpAddr;
use tracing::debug;

pub struct ResponseParser;

impl ResponseParser {
    pub fn parse(response_bytes: &[u8]) -> Result<DnsAnswer, DomainError> {
        let message = Message::from_vec(response_bytes).map_err(|e| {
            DomainError::InvalidDnsResponse(format!("Failed to parse DNS response: {}", e))
        })?;

        let status = Self::status_from_rcode(message.response_code());
        let authoritative = message.authoritative();

        let mut records = Vec::new();
        for record in message.answers() {
            let Some(record_type) = RecordTypeMapper::from_hickory(record.record_type()) else {
                debug!(record_type = ?record.record_type(), "Skipping unsupported record type");
                continue;
            };

            let data = match record.data() {
                RData::A(a) => RecordData::Address(IpAddr::V4(a.0)),
                RData::AAAA(aaaa) => RecordData::Address(IpAddr::V6(aaaa.0)),
                RData::PTR(target) => RecordData::Name(target.to_utf8()),
                RData::CNAME(target) => RecordData::Name(target.to_utf8()),
                RData::NS(target) => RecordData::Name(target.to_utf8()),
                other => {
                    debug!(data = ?other, "Skipping unsupported record data");
                    continue;
                }
            };

            records.push(DnsRecord::new(
                record.name().to_utf8(),
                record_type,
                record.ttl(),
                data,
            ));
        }

        debug!(
            status = status.as_str(),
            records = records.len(),
            authoritative,
            "DNS response parsed"
        );

        Ok(DnsAnswer::new(status, authoritative, records))
    }

    fn status_from_rcode(rcode: ResponseCode) -> ResponseStatus {
        match rcode {
            ResponseCode::NoError => ResponseStatus::NoError,
            ResponseCode::NXDomain => ResponseStatus::NxDomain,
            ResponseCode::Refused => ResponseStatus::Refused,
            _ => ResponseStatus::ServFail,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hickory_proto::op::{Message, MessageType, OpCode};
    use hickory_proto::rr::rdata::{A, PTR};
    use hickory_proto::rr::{Name, Record};
    use hickory_proto::serialize::binary::{BinEncodable, BinEncoder};
    use split_dns_domain::RecordType;
    use std::str::FromStr;

    fn encode(message: &Message) -> Vec<u8> {
        let mut buf = Vec::new();
        let mut encoder = BinEncoder::new(&mut buf);
        message.emit(&mut encoder).unwrap();
        buf
    }

    fn response_with(records: Vec<Record>) -> Message {
        let mut message = Message::new(0x1234, MessageType::Response, OpCode::Query);
        for record in records {
            message.add_answer(record);
        }
        message
    }

    #[test]
    fn test_parse_a_record() {
        let name = Name::from_str("host.example.com.").unwrap();
        let record = Record::from_rdata(name, 300, RData::A(A("10.0.0.5".parse().unwrap())));
        let bytes = encode(&response_with(vec![record]));

        let answer = ResponseParser::parse(&bytes).unwrap();

        assert_eq!(answer.status, ResponseStatus::NoError);
        assert_eq!(answer.records.len(), 1);
        assert_eq!(answer.records[0].name, "host.example.com.");
        assert_eq!(answer.records[0].record_type, RecordType::A);
        assert_eq!(
            answer.records[0].data.address().unwrap().to_string(),
            "10.0.0.5"
        );
    }

    #[test]
    fn test_parse_ptr_record() {
        let name = Name::from_str("5.0.0.10.in-addr.arpa.").unwrap();
        let target = Name::from_str("host.example.com.").unwrap();
        let record = Record::from_rdata(name, 60, RData::PTR(PTR(target)));
        let bytes = encode(&response_with(vec![record]));

        let answer = ResponseParser::parse(&bytes).unwrap();

        assert_eq!(answer.records.len(), 1);
        assert_eq!(answer.records[0].record_type, RecordType::PTR);
        assert_eq!(
            answer.records[0].data.name().unwrap(),
            "host.example.com."
        );
    }

    #[test]
    fn test_parse_nxdomain_status() {
        let mut message = Message::new(0x1234, MessageType::Response, OpCode::Query);
        message.set_response_code(ResponseCode::NXDomain);
        let bytes = encode(&message);

        let answer = ResponseParser::parse(&bytes).unwrap();

        assert_eq!(answer.status, ResponseStatus::NxDomain);
        assert!(answer.records.is_empty());
    }

    #[test]
    fn test_garbage_bytes_are_an_error() {
        assert!(ResponseParser::parse(&[0xff, 0x00, 0x01]).is_err());
    }
}
