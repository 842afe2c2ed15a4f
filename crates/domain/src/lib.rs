//! Split DNS Domain Layer
pub mod config;
pub mod dns_answer;
pub mod dns_query;
pub mod dns_record;
pub mod errors;
pub mod reverse_name;
pub mod rule;

pub use config::{CliOverrides, Config, ConfigError, ResolverConfig, RouteConfig};
pub use dns_answer::{DnsAnswer, ResponseStatus};
pub use dns_query::DnsQuery;
pub use dns_record::{DnsRecord, RecordData, RecordType};
pub use errors::DomainError;
pub use rule::MatchRule;
