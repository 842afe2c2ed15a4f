use crate::reverse_name::to_forward_address;
use ipnetwork::IpNetwork;
use std::net::IpAddr;

/// Routing match rule. Each routing entry carries exactly one kind,
/// decided at configuration time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchRule {
    /// Literal substring that must occur in the original query name.
    Domain(String),
    /// CIDR block that must contain the query's address. Only evaluated
    /// when the query name parses as a reverse-lookup address.
    Network(IpNetwork),
}

impl MatchRule {
    /// Evaluate this rule against a query name.
    ///
    /// The name is normalized once per query (reverse suffix stripped,
    /// labels reordered) and parsed as an address; a rule whose kind does
    /// not match the query's form is skipped without evaluation, so an
    /// address-form query can never hit a domain rule and vice versa.
    pub fn matches(&self, original_name: &str, address_form: Option<IpAddr>) -> bool {
        match (self, address_form) {
            (MatchRule::Network(network), Some(addr)) => network.contains(addr),
            (MatchRule::Domain(pattern), None) => original_name.contains(pattern.as_str()),
            _ => false,
        }
    }

    pub fn is_network(&self) -> bool {
        matches!(self, MatchRule::Network(_))
    }
}

/// Normalize a query name for routing: reverse-lookup names become their
/// forward address string, anything else passes through untouched. Returns
/// the parsed address when the normalized form is a literal address.
///
/// Only a reverse-lookup name can yield an address: a plain query name
/// keeps its trailing dot (`"1.2.3.4."`), which never parses, so
/// dotted-quad-looking names still match domain rules.
pub fn normalize_for_routing(name: &str) -> Option<IpAddr> {
    to_forward_address(name).parse::<IpAddr>().ok()
}
