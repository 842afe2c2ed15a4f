pub mod table;

pub use table::{RouteEntry, RoutingTable};
