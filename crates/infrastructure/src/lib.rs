//! Split DNS Infrastructure Layer
//!
//! Resolution strategy implementations, wire codec adapters over
//! hickory-proto, upstream transports, and the hickory-server request
//! handler.
pub mod dns;
