//! Configuration for bizhook
//!
//! Connection parameters and per-client numeric defaults, with sensible
//! defaults matching the hook's stock listen address.

use crate::error::{HookError, Result};
use crate::protocol::{ByteOrder, Signedness, MAX_WIDTH, MIN_WIDTH};

/// Address the hook listens on unless told otherwise
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Port the hook listens on unless told otherwise
pub const DEFAULT_PORT: u16 = 16154;

/// Client configuration
///
/// Read-only once built. Every call on a [`Client`](crate::Client) reads it
/// without locking.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    // -------------------------------------------------------------------------
    // Memory Configuration
    // -------------------------------------------------------------------------
    /// Memory domain every query targets (e.g. "WRAM", "VRAM")
    pub domain: String,

    /// Signedness used when an integer call leaves it unset
    pub default_signedness: Signedness,

    /// Width in bytes used when an integer call leaves it unset
    pub default_width: u8,

    /// Byte order used when a call leaves it unset
    pub default_order: ByteOrder,

    // -------------------------------------------------------------------------
    // Network Configuration
    // -------------------------------------------------------------------------
    /// Hook host
    pub host: String,

    /// Hook port
    pub port: u16,

    /// Connect timeout (milliseconds, 0 = block forever)
    pub connect_timeout_ms: u64,

    /// Read timeout (milliseconds, 0 = block forever)
    pub read_timeout_ms: u64,

    /// Write timeout (milliseconds, 0 = block forever)
    pub write_timeout_ms: u64,
}

impl ClientConfig {
    /// Config for `domain` with every other field at its default
    pub fn new(domain: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
            default_signedness: Signedness::Unsigned,
            default_width: 1,
            default_order: ByteOrder::Big,
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            connect_timeout_ms: 5000,
            read_timeout_ms: 5000,
            write_timeout_ms: 5000,
        }
    }

    /// Create a new config builder
    pub fn builder(domain: impl Into<String>) -> ClientConfigBuilder {
        ClientConfigBuilder {
            config: Self::new(domain),
        }
    }

    /// `host:port` as handed to the resolver
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Builder for ClientConfig
#[derive(Debug, Clone)]
pub struct ClientConfigBuilder {
    config: ClientConfig,
}

impl ClientConfigBuilder {
    /// Set the hook host
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.config.host = host.into();
        self
    }

    /// Set the hook port
    pub fn port(mut self, port: u16) -> Self {
        self.config.port = port;
        self
    }

    /// Set the default signedness for integer calls
    pub fn default_signedness(mut self, signedness: Signedness) -> Self {
        self.config.default_signedness = signedness;
        self
    }

    /// Set the default integer width (1-4 bytes)
    pub fn default_width(mut self, width: u8) -> Self {
        self.config.default_width = width;
        self
    }

    /// Set the default byte order
    pub fn default_order(mut self, order: ByteOrder) -> Self {
        self.config.default_order = order;
        self
    }

    /// Set the connect timeout (in milliseconds)
    pub fn connect_timeout_ms(mut self, ms: u64) -> Self {
        self.config.connect_timeout_ms = ms;
        self
    }

    /// Set the read timeout (in milliseconds)
    pub fn read_timeout_ms(mut self, ms: u64) -> Self {
        self.config.read_timeout_ms = ms;
        self
    }

    /// Set the write timeout (in milliseconds)
    pub fn write_timeout_ms(mut self, ms: u64) -> Self {
        self.config.write_timeout_ms = ms;
        self
    }

    pub fn build(self) -> Result<ClientConfig> {
        let width = self.config.default_width;
        if !(MIN_WIDTH..=MAX_WIDTH).contains(&width) {
            return Err(HookError::InvalidParameter(format!(
                "default width must be {}-{} bytes, got {}",
                MIN_WIDTH, MAX_WIDTH, width
            )));
        }
        Ok(self.config)
    }
}
