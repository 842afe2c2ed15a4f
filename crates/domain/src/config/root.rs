use serde::{Deserialize, Serialize};

use super::dns::DnsConfig;
use super::errors::ConfigError;
use super::logging::LoggingConfig;
use super::routing::RouteConfig;
use super::server::ServerConfig;

/// Main configuration structure for Split DNS
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// Server configuration (port, bind address)
    #[serde(default)]
    pub server: ServerConfig,

    /// Resolution configuration (timeouts, default strategy)
    #[serde(default)]
    pub dns: DnsConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Ordered routing table. Order is significant: first match wins.
    #[serde(default)]
    pub routes: Vec<RouteConfig>,
}

impl Config {
    /// Load configuration from file or use defaults
    ///
    /// Priority order:
    /// 1. Explicitly provided path
    /// 2. split-dns.toml in current directory
    /// 3. /etc/split-dns/config.toml
    /// 4. Default configuration
    pub fn load(path: Option<&str>, cli_overrides: CliOverrides) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = path {
            Self::from_file(path)?
        } else if std::path::Path::new("split-dns.toml").exists() {
            Self::from_file("split-dns.toml")?
        } else if std::path::Path::new("/etc/split-dns/config.toml").exists() {
            Self::from_file("/etc/split-dns/config.toml")?
        } else {
            Self::default()
        };

        config.apply_cli_overrides(cli_overrides);
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileRead(path.to_string(), e.to_string()))?;
        toml::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    fn apply_cli_overrides(&mut self, overrides: CliOverrides) {
        if let Some(port) = overrides.dns_port {
            self.server.dns_port = port;
        }
        if let Some(bind) = overrides.bind_address {
            self.server.bind_address = bind;
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.dns_port == 0 {
            return Err(ConfigError::Validation("DNS port cannot be 0".to_string()));
        }

        if self.routes.is_empty() && self.dns.default_resolver.is_none() {
            return Err(ConfigError::Validation(
                "No routes configured and no default resolver".to_string(),
            ));
        }

        for (index, route) in self.routes.iter().enumerate() {
            match (&route.domain, &route.network) {
                (Some(_), Some(_)) => {
                    return Err(ConfigError::Validation(format!(
                        "Route {} has both a domain and a network rule",
                        index
                    )));
                }
                (None, None) => {
                    return Err(ConfigError::Validation(format!(
                        "Route {} has neither a domain nor a network rule",
                        index
                    )));
                }
                _ => {}
            }
        }

        Ok(())
    }
}

/// Command-line overrides for configuration
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub dns_port: Option<u16>,
    pub bind_address: Option<String>,
    pub log_level: Option<String>,
}
