//! Command definitions
//!
//! Represents every request the hook understands.

use super::MemoryOp;

/// Command types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandType {
    Memory,
    Input,
    Advance,
    SaveState,
    LoadState,
}

/// A request to the hook
///
/// Control commands get their own variants and their own grammar; they never
/// ride on the TSLE memory query.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Read or write memory
    Memory(MemoryOp),

    /// Press or release a controller button
    Input { button: String, pressed: bool },

    /// Run the emulator forward
    Advance { frames: u32 },

    /// Save the emulator state
    SaveState,

    /// Load the emulator state
    LoadState,
}

impl Command {
    /// Get the command type
    pub fn command_type(&self) -> CommandType {
        match self {
            Command::Memory(_) => CommandType::Memory,
            Command::Input { .. } => CommandType::Input,
            Command::Advance { .. } => CommandType::Advance,
            Command::SaveState => CommandType::SaveState,
            Command::LoadState => CommandType::LoadState,
        }
    }
}

impl From<MemoryOp> for Command {
    fn from(op: MemoryOp) -> Self {
        Command::Memory(op)
    }
}
