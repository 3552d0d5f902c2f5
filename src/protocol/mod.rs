//! Protocol Module
//!
//! Defines the wire protocol spoken with the emulator hook.
//!
//! ## Protocol Format
//!
//! One request and one response per TCP connection. Both are short text,
//! except byte-read responses which carry raw bytes.
//!
//! ### Request Format
//! ```text
//! DOMAIN/ADDRESS/TSLE/VALUE
//! ```
//!
//! ### Response Format
//! ```text
//! CODE_MESSAGE          (connection close ends the response)
//! ```
//!
//! ### Response Codes
//! - 0: ACK     - write or control command succeeded
//! - 1: BYTES   - raw byte read
//! - 2: INTEGER - decimal integer
//! - 3: FLOAT   - float literal
//! - other: error, MESSAGE is the hook's diagnostic

mod operation;
mod command;
mod response;
mod codec;

pub use operation::{
    ByteOrder, MemoryOp, Signedness, Tsle, Value, ValueKind, FLOAT_WIDTH, MAX_WIDTH, MIN_WIDTH,
};
pub use command::{Command, CommandType};
pub use response::{code, Reply};
pub use codec::{
    decode_response, decode_tsle, encode_command, encode_memory_op, encode_query, encode_tsle,
    read_until_close, write_query, FIELD_DELIMITER, READ_CHUNK_SIZE, RESPONSE_DELIMITER,
};
