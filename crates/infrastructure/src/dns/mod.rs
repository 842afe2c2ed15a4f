pub mod codec;
pub mod resolver;
pub mod server;
pub mod transport;

pub use resolver::{build_resolver, build_routing_table};
pub use server::DnsServerHandler;
