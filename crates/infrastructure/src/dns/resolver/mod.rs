pub mod builder;
pub mod dot;
pub mod forward;
pub mod merge;
pub mod static_zone;
pub mod suffix;

pub use builder::{build_resolver, build_routing_table};
pub use dot::DotResolver;
pub use forward::ForwardResolver;
pub use merge::MergeResolver;
pub use static_zone::StaticZoneResolver;
pub use suffix::SuffixResolver;
