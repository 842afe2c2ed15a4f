//! Transforms between reverse-lookup names and forward address strings.
//!
//! A PTR query for 10.0.0.5 arrives as "5.0.0.10.in-addr.arpa." — the
//! octets in reverse order under the reverse-lookup zone. The router and
//! the static zone both need the forward dotted-quad form.

/// Reverse-lookup zone for IPv4 addresses (RFC 1035 §3.5).
pub const REVERSE_SUFFIX: &str = ".in-addr.arpa.";

/// Convert a reverse-lookup name into its forward address string.
///
/// Names that do not carry the reverse-lookup suffix are returned
/// unchanged. Pure and total: malformed label sequences simply produce a
/// string that will not parse as an address downstream.
pub fn to_forward_address(name: &str) -> String {
    let Some(stripped) = name.strip_suffix(REVERSE_SUFFIX) else {
        return name.to_string();
    };
    let mut labels: Vec<&str> = stripped.split('.').collect();
    labels.reverse();
    labels.join(".")
}

/// Inverse of [`to_forward_address`]: build the reverse-lookup name for a
/// forward address string under the given zone suffix.
pub fn to_reverse_name(address: &str, zone_suffix: &str) -> String {
    let mut labels: Vec<&str> = address.split('.').collect();
    labels.reverse();
    format!("{}{}", labels.join("."), zone_suffix)
}

/// True if the name lies under the IPv4 reverse-lookup zone.
pub fn is_reverse_name(name: &str) -> bool {
    name.ends_with(REVERSE_SUFFIX)
}
