pub mod dns;
pub mod errors;
pub mod logging;
pub mod root;
pub mod routing;
pub mod server;

pub use dns::DnsConfig;
pub use errors::ConfigError;
pub use logging::LoggingConfig;
pub use root::{CliOverrides, Config};
pub use routing::{ResolverConfig, RouteConfig};
pub use server::ServerConfig;
