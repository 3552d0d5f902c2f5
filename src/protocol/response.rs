//! Response definitions
//!
//! Represents successful replies from the hook. Failures never become a
//! `Reply`; they come back as [`HookError::Remote`](crate::HookError::Remote).

use bytes::Bytes;

/// Response codes
pub mod code {
    /// Write or control command succeeded
    pub const ACK: i64 = 0;
    /// Raw byte read succeeded
    pub const BYTES: i64 = 1;
    /// Integer read succeeded
    pub const INTEGER: i64 = 2;
    /// Float read succeeded
    pub const FLOAT: i64 = 3;
}

/// A successful reply
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    /// Write or control command succeeded, no payload
    Ack,

    /// Raw bytes of a byte read, starting at (and including) the `_`
    /// delimiter of the original response
    Bytes(Bytes),

    /// Integer read result
    Integer(i64),

    /// Float read result
    Float(f64),
}

impl Reply {
    /// Short name for log and error messages
    pub fn kind_name(&self) -> &'static str {
        match self {
            Reply::Ack => "ack",
            Reply::Bytes(_) => "bytes",
            Reply::Integer(_) => "integer",
            Reply::Float(_) => "float",
        }
    }
}
