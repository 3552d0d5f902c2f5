//! Hook Client
//!
//! Typed memory, input and emulator-control calls over the hook protocol.

use bytes::Bytes;

use crate::config::ClientConfig;
use crate::error::{HookError, Result};
use crate::protocol::{
    decode_response, encode_command, ByteOrder, Command, MemoryOp, Reply, Signedness, ValueKind,
    FLOAT_WIDTH,
};

use super::Connection;

/// Client for one memory domain of a running emulator
///
/// Holds only immutable configuration, so it can be cloned or shared across
/// threads freely. Every call opens its own connection.
#[derive(Debug, Clone)]
pub struct Client {
    config: ClientConfig,
}

impl Client {
    /// Create a client; no I/O happens until the first call
    pub fn new(config: ClientConfig) -> Self {
        Self { config }
    }

    /// Client for `domain` on the default host and port
    pub fn for_domain(domain: impl Into<String>) -> Self {
        Self::new(ClientConfig::new(domain))
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    // =========================================================================
    // Request Path
    // =========================================================================

    /// Send a raw query string and decode the reply
    ///
    /// Network failures are not retried.
    pub fn perform(&self, query: &str) -> Result<Reply> {
        let connection = Connection::open(&self.config)?;
        let raw = connection.exchange(query)?;

        match decode_response(&raw) {
            Err(HookError::Remote { code, message }) => {
                tracing::warn!("Hook rejected '{}': [{}] {}", query, code, message);
                Err(HookError::Remote { code, message })
            }
            other => other,
        }
    }

    /// Encode and send a command
    pub fn execute(&self, command: &Command) -> Result<Reply> {
        let query = encode_command(command)?;
        tracing::trace!("Executing {:?} command", command.command_type());
        self.perform(&query)
    }

    /// Build a descriptor against this client's domain
    fn memory_op(
        &self,
        address: u64,
        kind: ValueKind,
        signedness: Signedness,
        width: u8,
        order: ByteOrder,
    ) -> MemoryOp {
        MemoryOp::read(&self.config.domain, address, kind, signedness, width, order)
    }

    /// Run a command that must come back as a plain ack
    fn expect_ack(&self, command: Command) -> Result<()> {
        match self.execute(&command)? {
            Reply::Ack => Ok(()),
            other => Err(HookError::MalformedResponse(format!(
                "expected ack to {:?} command, got {}",
                command.command_type(),
                other.kind_name()
            ))),
        }
    }

    // =========================================================================
    // Raw Bytes
    // =========================================================================

    /// Read one byte
    ///
    /// The returned buffer starts with the `_` delimiter, followed by the
    /// bytes exactly as the hook sent them.
    pub fn read_byte(&self, address: u64) -> Result<Bytes> {
        let op = self.memory_op(
            address,
            ValueKind::RawByte,
            Signedness::Unsigned,
            1,
            self.config.default_order,
        );
        match self.execute(&op.into())? {
            Reply::Bytes(bytes) => Ok(bytes),
            other => Err(unexpected_reply("bytes", &other)),
        }
    }

    /// Write one byte
    pub fn write_byte(&self, address: u64, value: u8) -> Result<()> {
        let op = self
            .memory_op(
                address,
                ValueKind::RawByte,
                Signedness::Unsigned,
                1,
                self.config.default_order,
            )
            .with_value(i64::from(value));
        self.expect_ack(op.into())
    }

    // =========================================================================
    // Integers
    // =========================================================================

    /// Read an integer; unset parameters fall back to the configured defaults
    pub fn read_integer(
        &self,
        address: u64,
        signedness: Option<Signedness>,
        width: Option<u8>,
        order: Option<ByteOrder>,
    ) -> Result<i64> {
        let op = self.integer_op(address, signedness, width, order);
        match self.execute(&op.into())? {
            Reply::Integer(value) => Ok(value),
            other => Err(unexpected_reply("integer", &other)),
        }
    }

    /// Write an integer; unset parameters fall back to the configured defaults
    pub fn write_integer(
        &self,
        address: u64,
        value: i64,
        signedness: Option<Signedness>,
        width: Option<u8>,
        order: Option<ByteOrder>,
    ) -> Result<()> {
        let op = self
            .integer_op(address, signedness, width, order)
            .with_value(value);
        self.expect_ack(op.into())
    }

    /// Resolve `None` against the config by presence, so an explicit
    /// `Unsigned` or `Little` is never mistaken for "unset"
    fn integer_op(
        &self,
        address: u64,
        signedness: Option<Signedness>,
        width: Option<u8>,
        order: Option<ByteOrder>,
    ) -> MemoryOp {
        self.memory_op(
            address,
            ValueKind::Integer,
            signedness.unwrap_or(self.config.default_signedness),
            width.unwrap_or(self.config.default_width),
            order.unwrap_or(self.config.default_order),
        )
    }

    // =========================================================================
    // Floats
    // =========================================================================

    /// Read a float
    pub fn read_float(&self, address: u64, order: Option<ByteOrder>) -> Result<f64> {
        let op = self.float_op(address, order);
        match self.execute(&op.into())? {
            Reply::Float(value) => Ok(value),
            other => Err(unexpected_reply("float", &other)),
        }
    }

    /// Write a float; non-finite values are rejected before any I/O
    pub fn write_float(&self, address: u64, value: f64, order: Option<ByteOrder>) -> Result<()> {
        let op = self.float_op(address, order).with_value(value);
        self.expect_ack(op.into())
    }

    fn float_op(&self, address: u64, order: Option<ByteOrder>) -> MemoryOp {
        self.memory_op(
            address,
            ValueKind::Float,
            Signedness::Signed,
            FLOAT_WIDTH,
            order.unwrap_or(self.config.default_order),
        )
    }

    // =========================================================================
    // Input & Emulator Control
    // =========================================================================

    /// Press or release a controller button
    pub fn send_input(&self, button: &str, pressed: bool) -> Result<()> {
        self.expect_ack(Command::Input {
            button: button.to_string(),
            pressed,
        })
    }

    /// Advance the emulator by `frames` frames
    pub fn advance_frame(&self, frames: u32) -> Result<()> {
        self.expect_ack(Command::Advance { frames })
    }

    /// Save the emulator state
    pub fn save_state(&self) -> Result<()> {
        self.expect_ack(Command::SaveState)
    }

    /// Load the emulator state
    pub fn load_state(&self) -> Result<()> {
        self.expect_ack(Command::LoadState)
    }
}

// =============================================================================
// Fixed-width Shorthands
// =============================================================================

/// Generates a read/write pair with fixed signedness, width and byte order
macro_rules! integer_preset {
    ($read:ident, $write:ident, $name:literal, $signedness:expr, $width:expr, $order:expr) => {
        #[doc = concat!("Read a ", $name, " integer")]
        pub fn $read(&self, address: u64) -> Result<i64> {
            self.read_integer(address, Some($signedness), Some($width), Some($order))
        }

        #[doc = concat!("Write a ", $name, " integer")]
        pub fn $write(&self, address: u64, value: i64) -> Result<()> {
            self.write_integer(address, value, Some($signedness), Some($width), Some($order))
        }
    };
}

impl Client {
    /// Read an unsigned byte as an integer
    pub fn read_u8(&self, address: u64) -> Result<i64> {
        self.read_integer(address, Some(Signedness::Unsigned), Some(1), None)
    }

    pub fn write_u8(&self, address: u64, value: i64) -> Result<()> {
        self.write_integer(address, value, Some(Signedness::Unsigned), Some(1), None)
    }

    /// Read a signed byte as an integer
    pub fn read_s8(&self, address: u64) -> Result<i64> {
        self.read_integer(address, Some(Signedness::Signed), Some(1), None)
    }

    pub fn write_s8(&self, address: u64, value: i64) -> Result<()> {
        self.write_integer(address, value, Some(Signedness::Signed), Some(1), None)
    }

    integer_preset!(read_u16_le, write_u16_le, "little-endian unsigned 16-bit", Signedness::Unsigned, 2, ByteOrder::Little);
    integer_preset!(read_u16_be, write_u16_be, "big-endian unsigned 16-bit", Signedness::Unsigned, 2, ByteOrder::Big);
    integer_preset!(read_u24_le, write_u24_le, "little-endian unsigned 24-bit", Signedness::Unsigned, 3, ByteOrder::Little);
    integer_preset!(read_u24_be, write_u24_be, "big-endian unsigned 24-bit", Signedness::Unsigned, 3, ByteOrder::Big);
    integer_preset!(read_u32_le, write_u32_le, "little-endian unsigned 32-bit", Signedness::Unsigned, 4, ByteOrder::Little);
    integer_preset!(read_u32_be, write_u32_be, "big-endian unsigned 32-bit", Signedness::Unsigned, 4, ByteOrder::Big);

    integer_preset!(read_s16_le, write_s16_le, "little-endian signed 16-bit", Signedness::Signed, 2, ByteOrder::Little);
    integer_preset!(read_s16_be, write_s16_be, "big-endian signed 16-bit", Signedness::Signed, 2, ByteOrder::Big);
    integer_preset!(read_s24_le, write_s24_le, "little-endian signed 24-bit", Signedness::Signed, 3, ByteOrder::Little);
    integer_preset!(read_s24_be, write_s24_be, "big-endian signed 24-bit", Signedness::Signed, 3, ByteOrder::Big);
    integer_preset!(read_s32_le, write_s32_le, "little-endian signed 32-bit", Signedness::Signed, 4, ByteOrder::Little);
    integer_preset!(read_s32_be, write_s32_be, "big-endian signed 32-bit", Signedness::Signed, 4, ByteOrder::Big);
}

/// A successful reply of the wrong kind means the hook and client disagree
/// about the query
fn unexpected_reply(expected: &str, got: &Reply) -> HookError {
    HookError::MalformedResponse(format!(
        "expected {} reply, got {}",
        expected,
        got.kind_name()
    ))
}
