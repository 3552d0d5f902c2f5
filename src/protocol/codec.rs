//! Protocol codec
//!
//! Encoding and decoding functions for the wire protocol.
//!
//! ## Wire Format
//!
//! ### Memory Query
//! ```text
//! DOMAIN / ADDRESS / TSLE / VALUE
//!
//! TSLE = [b|i|f] [u|s] [1-4] [l|b]
//!         type    sign  width endianness
//! ```
//! VALUE is empty for reads. Nothing terminates the query.
//!
//! ### Control Queries
//! ```text
//! 0 / BUTTON / True|False /     input
//! 3 / 0 / FRAMES /              advance frames
//! 3 / 1 /                       save state
//! 3 / 2 /                       load state
//! ```
//!
//! ### Response
//! ```text
//! CODE _ MESSAGE
//! ```
//! Split at the first `_` only. The hook closes the connection after writing,
//! and that close is the only framing: a response cut short by a network fault
//! looks exactly like a short complete one.

use std::io::{ErrorKind, Read, Write};

use bytes::{Bytes, BytesMut};

use super::response::code;
use super::{ByteOrder, Command, MemoryOp, Reply, Signedness, Tsle, Value, ValueKind};
use crate::error::{HookError, Result};

/// Field separator in queries
pub const FIELD_DELIMITER: char = '/';

/// Separator between CODE and MESSAGE in responses
pub const RESPONSE_DELIMITER: u8 = b'_';

/// Size of each read while draining a response
pub const READ_CHUNK_SIZE: usize = 4096;

// =============================================================================
// Query Encoding
// =============================================================================

/// Encode the 4-character TSLE code
///
/// Fails with `InvalidParameter` if width is outside 1-4.
pub fn encode_tsle(
    kind: ValueKind,
    signedness: Signedness,
    width: u8,
    order: ByteOrder,
) -> Result<String> {
    Ok(Tsle::new(kind, signedness, width, order)?.to_string())
}

/// Parse a TSLE code back into its four axes
pub fn decode_tsle(code: &str) -> Result<Tsle> {
    code.parse()
}

/// Encode a memory query: `domain/address/TSLE/value`
///
/// `value` of `None` leaves the last field empty, which makes it a read.
pub fn encode_query(
    domain: &str,
    address: u64,
    kind: ValueKind,
    signedness: Signedness,
    width: u8,
    order: ByteOrder,
    value: Option<Value>,
) -> Result<String> {
    let tsle = encode_tsle(kind, signedness, width, order)?;

    let value = match value {
        None => String::new(),
        Some(Value::Float(v)) if !v.is_finite() => {
            return Err(HookError::InvalidParameter(format!(
                "float value must be finite, got {}",
                v
            )))
        }
        Some(v) => v.to_string(),
    };

    Ok(format!(
        "{domain}{d}{address}{d}{tsle}{d}{value}",
        d = FIELD_DELIMITER
    ))
}

/// Encode a memory operation descriptor
pub fn encode_memory_op(op: &MemoryOp) -> Result<String> {
    encode_query(
        &op.domain,
        op.address,
        op.kind,
        op.signedness,
        op.width,
        op.order,
        op.value,
    )
}

/// Encode any command to its query string
pub fn encode_command(command: &Command) -> Result<String> {
    let d = FIELD_DELIMITER;
    match command {
        Command::Memory(op) => encode_memory_op(op),
        Command::Input { button, pressed } => {
            if button.is_empty() || button.contains(d) {
                return Err(HookError::InvalidParameter(format!(
                    "button name must be non-empty and free of '{}', got '{}'",
                    d, button
                )));
            }
            let state = if *pressed { "True" } else { "False" };
            Ok(format!("0{d}{button}{d}{state}{d}"))
        }
        Command::Advance { frames } => Ok(format!("3{d}0{d}{frames}{d}")),
        Command::SaveState => Ok(format!("3{d}1{d}")),
        Command::LoadState => Ok(format!("3{d}2{d}")),
    }
}

// =============================================================================
// Response Decoding
// =============================================================================

/// Decode a raw response buffer
///
/// Pure: the same buffer always decodes to the same result.
pub fn decode_response(raw: &[u8]) -> Result<Reply> {
    let delim = raw
        .iter()
        .position(|&b| b == RESPONSE_DELIMITER)
        .ok_or_else(|| {
            HookError::MalformedResponse(format!(
                "no '{}' delimiter in {} byte response",
                RESPONSE_DELIMITER as char,
                raw.len()
            ))
        })?;

    let code = parse_code(&raw[..delim])?;
    let message = &raw[delim + 1..];

    match code {
        code::ACK => Ok(Reply::Ack),
        // Sliced from the original buffer so binary payloads survive untouched
        code::BYTES => Ok(Reply::Bytes(Bytes::copy_from_slice(&raw[delim..]))),
        code::INTEGER => {
            let text = message_text(message, "integer")?;
            text.parse::<i64>().map(Reply::Integer).map_err(|e| {
                HookError::MalformedResponse(format!("invalid integer '{}': {}", text, e))
            })
        }
        code::FLOAT => {
            let text = message_text(message, "float")?;
            text.parse::<f64>().map(Reply::Float).map_err(|e| {
                HookError::MalformedResponse(format!("invalid float '{}': {}", text, e))
            })
        }
        _ => Err(HookError::Remote {
            code,
            message: String::from_utf8_lossy(message).into_owned(),
        }),
    }
}

/// Parse the CODE field
fn parse_code(field: &[u8]) -> Result<i64> {
    let text = std::str::from_utf8(field)
        .map_err(|_| HookError::MalformedResponse("response code is not ASCII".to_string()))?
        .trim();

    if let Ok(code) = text.parse::<i64>() {
        return Ok(code);
    }

    // All digits but too large: still a hook error code, saturated to fit
    let (negative, digits) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };
    if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) {
        return Ok(if negative { i64::MIN } else { i64::MAX });
    }

    Err(HookError::MalformedResponse(format!(
        "response code '{}' is not an integer",
        text
    )))
}

/// MESSAGE as trimmed text, for numeric replies
fn message_text<'a>(message: &'a [u8], expected: &str) -> Result<&'a str> {
    std::str::from_utf8(message)
        .map(str::trim)
        .map_err(|_| HookError::MalformedResponse(format!("{} reply is not valid UTF-8", expected)))
}

// =============================================================================
// Stream-based I/O helpers
// =============================================================================

/// Write a query to a stream in one piece
pub fn write_query<W: Write>(writer: &mut W, query: &str) -> std::io::Result<()> {
    writer.write_all(query.as_bytes())?;
    writer.flush()
}

/// Read until the peer closes the stream
///
/// Chunks are concatenated in arrival order. Any error other than an
/// interrupted read ends the exchange.
pub fn read_until_close<R: Read>(reader: &mut R) -> std::io::Result<BytesMut> {
    let mut buffer = BytesMut::new();
    let mut chunk = [0u8; READ_CHUNK_SIZE];

    loop {
        match reader.read(&mut chunk) {
            Ok(0) => return Ok(buffer),
            Ok(n) => buffer.extend_from_slice(&chunk[..n]),
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
}
