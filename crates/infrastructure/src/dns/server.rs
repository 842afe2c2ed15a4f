use crate::dns::codec::RecordTypeMapper;
use hickory_proto::op::ResponseCode;
use hickory_proto::rr::rdata::{A, AAAA, CNAME, NS, PTR};
use hickory_proto::rr::{Name, RData, Record};
use hickory_server::authority::MessageResponseBuilder;
use hickory_server::server::{Request, RequestHandler, ResponseHandler, ResponseInfo};
use split_dns_application::use_cases::HandleDnsQueryUseCase;
use split_dns_domain::{DnsQuery, DnsRecord, RecordData, RecordType, ResponseStatus};
use std::net::IpAddr;
use std::str::FromStr;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

pub struct DnsServerHandler {
    use_case: Arc<HandleDnsQueryUseCase>,
}

impl DnsServerHandler {
    pub fn new(use_case: Arc<HandleDnsQueryUseCase>) -> Self {
        Self { use_case }
    }

    fn to_response_code(status: ResponseStatus) -> ResponseCode {
        match status {
            ResponseStatus::NoError => ResponseCode::NoError,
            ResponseStatus::NxDomain => ResponseCode::NXDomain,
            ResponseStatus::ServFail => ResponseCode::ServFail,
            ResponseStatus::Refused => ResponseCode::Refused,
        }
    }

    fn to_wire_record(record: &DnsRecord) -> Option<Record> {
        let owner = match Name::from_str(&record.name) {
            Ok(name) => name,
            Err(e) => {
                warn!(name = %record.name, error = %e, "Skipping record with invalid owner name");
                return None;
            }
        };

        let rdata = match (&record.data, record.record_type) {
            (RecordData::Address(IpAddr::V4(addr)), _) => RData::A(A(*addr)),
            (RecordData::Address(IpAddr::V6(addr)), _) => RData::AAAA(AAAA(*addr)),
            (RecordData::Name(target), record_type) => {
                let target_name = match Name::from_str(target) {
                    Ok(name) => name,
                    Err(e) => {
                        warn!(target = %target, error = %e, "Skipping record with invalid target");
                        return None;
                    }
                };
                match record_type {
                    RecordType::PTR => RData::PTR(PTR(target_name)),
                    RecordType::CNAME => RData::CNAME(CNAME(target_name)),
                    RecordType::NS => RData::NS(NS(target_name)),
                    other => {
                        warn!(record_type = %other, "Skipping name record of unsupported type");
                        return None;
                    }
                }
            }
        };

        Some(Record::from_rdata(owner, record.ttl, rdata))
    }
}

#[async_trait::async_trait]
impl RequestHandler for DnsServerHandler {
    async fn handle_request<R: ResponseHandler>(
        &self,
        request: &Request,
        mut response_handle: R,
    ) -> ResponseInfo {
        let request_info = match request.request_info() {
            Ok(info) => info,
            Err(e) => {
                error!(error = %e, "Failed to parse request info");
                return send_error_response(request, &mut response_handle, ResponseCode::FormErr)
                    .await;
            }
        };

        let wire_query = &request_info.query;
        let domain = wire_query.name().to_utf8();
        let hickory_record_type = wire_query.query_type();
        let client_ip = request.src().ip();

        info!(domain = %domain, record_type = ?hickory_record_type, client = %client_ip, "DNS query received");

        let record_type = match RecordTypeMapper::from_hickory(hickory_record_type) {
            Some(rt) => rt,
            None => {
                warn!(record_type = ?hickory_record_type, "Unsupported record type");
                return send_error_response(request, &mut response_handle, ResponseCode::NotImp)
                    .await;
            }
        };

        let query = DnsQuery::new(domain.as_str(), record_type);
        let answer = self.use_case.execute(&query).await;

        let answers: Vec<Record> = answer
            .records
            .iter()
            .filter_map(DnsServerHandler::to_wire_record)
            .collect();

        debug!(
            domain = %domain,
            status = answer.status.as_str(),
            answers = answers.len(),
            "Sending response"
        );

        let builder = MessageResponseBuilder::from_message_request(request);
        let mut header = *request.header();
        header.set_response_code(Self::to_response_code(answer.status));
        header.set_authoritative(answer.authoritative);
        header.set_recursion_available(true);
        let response = builder.build(header, answers.iter(), &[], &[], &[]);

        match response_handle.send_response(response).await {
            Ok(info) => info,
            Err(e) => {
                error!(error = %e, "Failed to send response");
                ResponseInfo::from(*request.header())
            }
        }
    }
}

async fn send_error_response<R: ResponseHandler>(
    request: &Request,
    response_handle: &mut R,
    code: ResponseCode,
) -> ResponseInfo {
    debug!(code = ?code, "Sending error response");
    let builder = MessageResponseBuilder::from_message_request(request);
    let mut header = *request.header();
    header.set_response_code(code);
    header.set_recursion_available(true);
    let response = builder.build(header, &[], &[], &[], &[]);

    match response_handle.send_response(response).await {
        Ok(info) => info,
        Err(e) => {
            error!(error = %e, "Failed to send error response");
            ResponseInfo::from(*request.header())
        }
    }
}
