//! Memory operation definitions
//!
//! The typed side of a memory query: what kind of value, how wide, which byte
//! order, and the optional payload of a write.

use std::fmt;
use std::str::FromStr;

use crate::error::{HookError, Result};

/// Narrowest integer the hook can read or write, in bytes
pub const MIN_WIDTH: u8 = 1;

/// Widest integer the hook can read or write, in bytes
pub const MAX_WIDTH: u8 = 4;

/// Width the hook uses for floats regardless of what is requested
pub const FLOAT_WIDTH: u8 = 4;

// =============================================================================
// TSLE Axes
// =============================================================================

/// What kind of value a query reads or writes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    RawByte,
    Integer,
    Float,
}

impl ValueKind {
    /// Tag letter in the TSLE code
    pub fn tag(self) -> char {
        match self {
            ValueKind::RawByte => 'b',
            ValueKind::Integer => 'i',
            ValueKind::Float => 'f',
        }
    }

    pub fn from_tag(tag: char) -> Result<Self> {
        match tag {
            'b' => Ok(ValueKind::RawByte),
            'i' => Ok(ValueKind::Integer),
            'f' => Ok(ValueKind::Float),
            other => Err(HookError::InvalidParameter(format!(
                "unknown value kind tag '{}'",
                other
            ))),
        }
    }
}

impl FromStr for ValueKind {
    type Err = HookError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "b" | "byte" | "bytes" | "raw" => Ok(ValueKind::RawByte),
            "i" | "int" | "integer" => Ok(ValueKind::Integer),
            "f" | "float" => Ok(ValueKind::Float),
            _ => Err(HookError::InvalidParameter(format!(
                "unknown value kind '{}'",
                s
            ))),
        }
    }
}

/// Integer signedness
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Signedness {
    Unsigned,
    Signed,
}

impl Signedness {
    /// Tag letter in the TSLE code
    pub fn tag(self) -> char {
        match self {
            Signedness::Unsigned => 'u',
            Signedness::Signed => 's',
        }
    }

    pub fn from_tag(tag: char) -> Result<Self> {
        match tag {
            'u' => Ok(Signedness::Unsigned),
            's' => Ok(Signedness::Signed),
            other => Err(HookError::InvalidParameter(format!(
                "unknown signedness tag '{}'",
                other
            ))),
        }
    }

    pub fn is_signed(self) -> bool {
        self == Signedness::Signed
    }
}

impl From<bool> for Signedness {
    fn from(signed: bool) -> Self {
        if signed {
            Signedness::Signed
        } else {
            Signedness::Unsigned
        }
    }
}

/// Byte order of a multi-byte value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ByteOrder {
    Little,
    Big,
}

impl ByteOrder {
    /// Tag letter in the TSLE code
    pub fn tag(self) -> char {
        match self {
            ByteOrder::Little => 'l',
            ByteOrder::Big => 'b',
        }
    }

    pub fn from_tag(tag: char) -> Result<Self> {
        match tag {
            'l' => Ok(ByteOrder::Little),
            'b' => Ok(ByteOrder::Big),
            other => Err(HookError::InvalidParameter(format!(
                "unknown byte order tag '{}'",
                other
            ))),
        }
    }
}

impl FromStr for ByteOrder {
    type Err = HookError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "l" | "little" => Ok(ByteOrder::Little),
            "b" | "big" => Ok(ByteOrder::Big),
            _ => Err(HookError::InvalidParameter(format!(
                "byte order must be 'little' or 'big', got '{}'",
                s
            ))),
        }
    }
}

// =============================================================================
// TSLE Code
// =============================================================================

/// Type/signedness/length/endianness code, e.g. `iu4b`
///
/// `Display` produces the 4-character wire form, `FromStr` parses it back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tsle {
    pub kind: ValueKind,
    pub signedness: Signedness,
    pub width: u8,
    pub order: ByteOrder,
}

impl Tsle {
    /// Build a code, rejecting widths outside 1-4
    pub fn new(kind: ValueKind, signedness: Signedness, width: u8, order: ByteOrder) -> Result<Self> {
        if !(MIN_WIDTH..=MAX_WIDTH).contains(&width) {
            return Err(HookError::InvalidParameter(format!(
                "width must be {}-{} bytes, got {}",
                MIN_WIDTH, MAX_WIDTH, width
            )));
        }
        Ok(Self {
            kind,
            signedness,
            width,
            order,
        })
    }
}

impl fmt::Display for Tsle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}{}{}",
            self.kind.tag(),
            self.signedness.tag(),
            self.width,
            self.order.tag()
        )
    }
}

impl FromStr for Tsle {
    type Err = HookError;

    fn from_str(s: &str) -> Result<Self> {
        let chars: Vec<char> = s.chars().collect();
        if chars.len() != 4 {
            return Err(HookError::InvalidParameter(format!(
                "TSLE code must be 4 characters, got '{}'",
                s
            )));
        }

        let kind = ValueKind::from_tag(chars[0])?;
        let signedness = Signedness::from_tag(chars[1])?;
        let width = chars[2]
            .to_digit(10)
            .ok_or_else(|| {
                HookError::InvalidParameter(format!("TSLE width '{}' is not a digit", chars[2]))
            })? as u8;
        let order = ByteOrder::from_tag(chars[3])?;

        Tsle::new(kind, signedness, width, order)
    }
}

// =============================================================================
// Operation Descriptor
// =============================================================================

/// Payload of a write
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value {
    Integer(i64),
    Float(f64),
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // f64's Display is the shortest literal that parses back to the same value
        match self {
            Value::Integer(v) => write!(f, "{}", v),
            Value::Float(v) => write!(f, "{}", v),
        }
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Integer(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

/// One read or write against a memory domain
#[derive(Debug, Clone, PartialEq)]
pub struct MemoryOp {
    pub domain: String,
    pub address: u64,
    pub kind: ValueKind,
    /// Only meaningful for integers
    pub signedness: Signedness,
    /// Ignored by the hook for floats
    pub width: u8,
    pub order: ByteOrder,
    /// `None` for reads
    pub value: Option<Value>,
}

impl MemoryOp {
    /// A read with no payload
    pub fn read(
        domain: impl Into<String>,
        address: u64,
        kind: ValueKind,
        signedness: Signedness,
        width: u8,
        order: ByteOrder,
    ) -> Self {
        Self {
            domain: domain.into(),
            address,
            kind,
            signedness,
            width,
            order,
            value: None,
        }
    }

    /// Attach a payload, turning the read into a write
    pub fn with_value(mut self, value: impl Into<Value>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn is_write(&self) -> bool {
        self.value.is_some()
    }

    /// The TSLE code for this operation
    pub fn tsle(&self) -> Result<Tsle> {
        Tsle::new(self.kind, self.signedness, self.width, self.order)
    }
}
