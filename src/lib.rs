//! # bizhook
//!
//! Client for a BizHawk-style emulator hook:
//! - Read and write memory as raw bytes, integers or floats
//! - Inject controller input
//! - Advance frames and save/load state
//! - Line-oriented text protocol over one TCP connection per call
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        Client                                │
//! │      (typed calls, defaults resolved from ClientConfig)      │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │ Command
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                    Protocol Codec                            │
//! │     encode: DOMAIN/ADDRESS/TSLE/VALUE   decode: CODE_MSG     │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │ query string / raw bytes
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                     Connection                               │
//! │      connect → send → read until close → shutdown            │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │ TCP
//!                       ▼
//!                ┌─────────────┐
//!                │    Hook     │
//!                │ (emulator)  │
//!                └─────────────┘
//! ```
//!
//! ## Example
//!
//! ```no_run
//! use bizhook::{Client, ClientConfig, ByteOrder};
//!
//! let config = ClientConfig::builder("WRAM")
//!     .default_order(ByteOrder::Little)
//!     .build()?;
//! let client = Client::new(config);
//!
//! let hp = client.read_u16_le(0x0100)?;
//! client.write_u16_le(0x0100, hp + 1)?;
//! client.advance_frame(1)?;
//! # Ok::<(), bizhook::HookError>(())
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod protocol;
pub mod network;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{HookError, Result};
pub use config::{ClientConfig, ClientConfigBuilder, DEFAULT_HOST, DEFAULT_PORT};
pub use network::Client;
pub use protocol::{ByteOrder, Command, MemoryOp, Reply, Signedness, Value, ValueKind};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of bizhook
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
