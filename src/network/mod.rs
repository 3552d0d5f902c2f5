//! Network Module
//!
//! TCP client side of the hook protocol.
//!
//! ## Architecture
//! - One fresh connection per call, no pooling
//! - Request written in a single send
//! - Response read until the hook closes its end
//! - No retries; errors go straight back to the caller

mod client;
mod connection;

pub use client::Client;
pub use connection::Connection;
