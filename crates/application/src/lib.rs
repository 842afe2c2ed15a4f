//! Split DNS Application Layer
pub mod ports;
pub mod routing;
pub mod use_cases;
