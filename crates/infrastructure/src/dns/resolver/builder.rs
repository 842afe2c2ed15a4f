//! Builds resolution strategies and the routing table from configuration.
//!
//! Single factory over the closed strategy enum; nested fallback lists
//! recurse through the same function. Upstream addresses are resolved
//! once here, at startup, so a bad server string is a fatal
//! configuration error rather than a per-query failure.

use super::dot::DotResolver;
use super::forward::ForwardResolver;
use super::merge::MergeResolver;
use super::static_zone::StaticZoneResolver;
use super::suffix::SuffixResolver;
use split_dns_application::ports::DnsResolver;
use split_dns_application::routing::{RouteEntry, RoutingTable};
use split_dns_domain::{ConfigError, MatchRule, ResolverConfig, RouteConfig};
use std::net::{IpAddr, SocketAddr, ToSocketAddrs};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

const DEFAULT_DNS_PORT: u16 = 53;
const DEFAULT_DOT_PORT: u16 = 853;

/// Resolve a `host[:port]` server string to a socket address.
fn parse_server_addr(server: &str, default_port: u16) -> Result<SocketAddr, ConfigError> {
    if let Ok(addr) = server.parse::<SocketAddr>() {
        return Ok(addr);
    }

    let with_port = if server.contains(':') {
        server.to_string()
    } else {
        format!("{}:{}", server, default_port)
    };

    with_port
        .to_socket_addrs()
        .map_err(|e| {
            ConfigError::Validation(format!("Cannot resolve upstream server '{}': {}", server, e))
        })?
        .next()
        .ok_or_else(|| {
            ConfigError::Validation(format!("Upstream server '{}' has no addresses", server))
        })
}

/// Host part of a `host[:port]` server string, used as the TLS server name.
fn host_part(server: &str) -> &str {
    let host = match server.rsplit_once(':') {
        Some((host, port)) if port.chars().all(|c| c.is_ascii_digit()) => host,
        _ => server,
    };
    host.trim_start_matches('[').trim_end_matches(']')
}

/// Build one resolution strategy from its tagged description.
pub fn build_resolver(
    config: &ResolverConfig,
    timeout: Duration,
) -> Result<Arc<dyn DnsResolver>, ConfigError> {
    match config {
        ResolverConfig::Basic { server } => {
            let addr = parse_server_addr(server, DEFAULT_DNS_PORT)?;
            info!(server = %addr, "Configured plain upstream");
            Ok(Arc::new(ForwardResolver::new(addr, timeout)))
        }

        ResolverConfig::Dot { server } => {
            let addr = parse_server_addr(server, DEFAULT_DOT_PORT)?;
            let hostname = host_part(server).to_string();
            info!(server = %addr, hostname = %hostname, "Configured DNS-over-TLS upstream");
            Ok(Arc::new(DotResolver::new(addr, hostname, timeout)))
        }

        ResolverConfig::Static {
            domains_to_ips,
            base,
        } => {
            // BTreeMap iteration is sorted, which fixes the reverse-lookup
            // tie-break order. Keys may be written relative ("host") or as
            // the full zone name ("host.zone"); both are stored relative.
            let zone_suffix = format!(".{}", base.trim_end_matches('.'));
            let mut entries = Vec::with_capacity(domains_to_ips.len());
            for (name, address) in domains_to_ips {
                let addr: IpAddr = address.parse().map_err(|e| {
                    ConfigError::Validation(format!(
                        "Invalid address '{}' for static zone entry '{}': {}",
                        address, name, e
                    ))
                })?;
                let host = name.trim_end_matches('.');
                let host = host.strip_suffix(zone_suffix.as_str()).unwrap_or(host);
                entries.push((host.to_string(), addr));
            }
            info!(base = %base, entries = entries.len(), "Configured static zone");
            Ok(Arc::new(StaticZoneResolver::new(entries, base.clone())))
        }

        ResolverConfig::Suffix {
            server,
            new_suffix,
            old_suffix,
        } => {
            let addr = parse_server_addr(server, DEFAULT_DNS_PORT)?;
            let upstream: Arc<dyn DnsResolver> = Arc::new(ForwardResolver::new(addr, timeout));
            info!(
                server = %addr,
                external = %new_suffix,
                internal = %old_suffix,
                "Configured suffix-rewriting upstream"
            );
            Ok(Arc::new(SuffixResolver::new(
                upstream,
                new_suffix.clone(),
                old_suffix.clone(),
            )))
        }

        ResolverConfig::Merge { resolvers } => {
            let mut children = Vec::with_capacity(resolvers.len());
            for child_config in resolvers {
                children.push(build_resolver(child_config, timeout)?);
            }
            info!(children = children.len(), "Configured fallback chain");
            Ok(Arc::new(MergeResolver::new(children)))
        }
    }
}

/// Build the routing table from the configured routes, in order.
pub fn build_routing_table(
    routes: &[RouteConfig],
    timeout: Duration,
) -> Result<RoutingTable, ConfigError> {
    let mut entries = Vec::with_capacity(routes.len());

    for (position, route) in routes.iter().enumerate() {
        let rule = match (&route.domain, &route.network) {
            (Some(domain), None) => MatchRule::Domain(domain.clone()),
            (None, Some(network)) => {
                let cidr = network.parse().map_err(|e| {
                    ConfigError::Validation(format!(
                        "Route {}: invalid network '{}': {}",
                        position, network, e
                    ))
                })?;
                MatchRule::Network(cidr)
            }
            (Some(_), Some(_)) => {
                return Err(ConfigError::Validation(format!(
                    "Route {}: specify either 'domain' or 'network', not both",
                    position
                )))
            }
            (None, None) => {
                return Err(ConfigError::Validation(format!(
                    "Route {}: one of 'domain' or 'network' is required",
                    position
                )))
            }
        };

        let resolver = build_resolver(&route.resolver, timeout)?;
        entries.push(RouteEntry::new(rule, resolver));
    }

    Ok(RoutingTable::new(entries))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn timeout() -> Duration {
        Duration::from_secs(5)
    }

    #[test]
    fn test_parse_server_addr_with_port() {
        let addr = parse_server_addr("10.0.0.1:5353", DEFAULT_DNS_PORT).unwrap();
        assert_eq!(addr.to_string(), "10.0.0.1:5353");
    }

    #[test]
    fn test_parse_server_addr_defaults_port() {
        let addr = parse_server_addr("10.0.0.1", DEFAULT_DNS_PORT).unwrap();
        assert_eq!(addr.port(), 53);
    }

    #[test]
    fn test_host_part_strips_port() {
        assert_eq!(host_part("dns.example.com:853"), "dns.example.com");
        assert_eq!(host_part("dns.example.com"), "dns.example.com");
        assert_eq!(host_part("1.1.1.1:853"), "1.1.1.1");
    }

    #[test]
    fn test_build_basic_resolver() {
        let config = ResolverConfig::Basic {
            server: "8.8.8.8:53".to_string(),
        };
        assert!(build_resolver(&config, timeout()).is_ok());
    }

    #[tokio::test]
    async fn test_static_zone_accepts_full_name_keys() {
        use split_dns_domain::{DnsQuery, RecordType};

        // Both spellings of a mapping key serve the same query.
        for key in ["host.zone", "host"] {
            let mut domains = BTreeMap::new();
            domains.insert(key.to_string(), "10.0.0.5".to_string());
            let config = ResolverConfig::Static {
                domains_to_ips: domains,
                base: "zone".to_string(),
            };
            let resolver = build_resolver(&config, timeout()).unwrap();

            let query = DnsQuery::new("host.zone.", RecordType::A);
            let answer = resolver.resolve(&query).await.unwrap();
            assert_eq!(answer.records.len(), 1, "key '{}' did not resolve", key);
            assert_eq!(
                answer.records[0].data.address().unwrap().to_string(),
                "10.0.0.5"
            );
        }
    }

    #[test]
    fn test_build_static_resolver_rejects_bad_address() {
        let mut domains = BTreeMap::new();
        domains.insert("host".to_string(), "not-an-address".to_string());
        let config = ResolverConfig::Static {
            domains_to_ips: domains,
            base: "internal".to_string(),
        };
        assert!(matches!(
            build_resolver(&config, timeout()),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn test_build_nested_merge() {
        let config = ResolverConfig::Merge {
            resolvers: vec![
                ResolverConfig::Basic {
                    server: "10.0.0.1:53".to_string(),
                },
                ResolverConfig::Merge {
                    resolvers: vec![ResolverConfig::Basic {
                        server: "10.0.0.2:53".to_string(),
                    }],
                },
            ],
        };
        assert!(build_resolver(&config, timeout()).is_ok());
    }

    #[test]
    fn test_routing_table_preserves_order() {
        let routes = vec![
            RouteConfig {
                domain: Some("internal".to_string()),
                network: None,
                resolver: ResolverConfig::Basic {
                    server: "10.0.0.1:53".to_string(),
                },
            },
            RouteConfig {
                domain: None,
                network: Some("10.0.0.0/8".to_string()),
                resolver: ResolverConfig::Basic {
                    server: "10.0.0.2:53".to_string(),
                },
            },
        ];

        let table = build_routing_table(&routes, timeout()).unwrap();
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_route_with_both_rules_is_rejected() {
        let routes = vec![RouteConfig {
            domain: Some("internal".to_string()),
            network: Some("10.0.0.0/8".to_string()),
            resolver: ResolverConfig::Basic {
                server: "10.0.0.1:53".to_string(),
            },
        }];
        assert!(matches!(
            build_routing_table(&routes, timeout()),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn test_route_with_no_rule_is_rejected() {
        let routes = vec![RouteConfig {
            domain: None,
            network: None,
            resolver: ResolverConfig::Basic {
                server: "10.0.0.1:53".to_string(),
            },
        }];
        assert!(build_routing_table(&routes, timeout()).is_err());
    }

    #[test]
    fn test_route_with_bad_cidr_is_rejected() {
        let routes = vec![RouteConfig {
            domain: None,
            network: Some("10.0.0.0/99".to_string()),
            resolver: ResolverConfig::Basic {
                server: "10.0.0.1:53".to_string(),
            },
        }];
        assert!(build_routing_table(&routes, timeout()).is_err());
    }
}
