//! Typed values and their byte encoding
//!
//! Numbers are stored little-endian at the column's native width. Text is
//! stored as at most `width - 1` bytes followed by a NUL terminator and zero
//! padding.

use std::cmp::Ordering;
use std::fmt;

use super::ColumnType;

/// A single cell value
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Bool(bool),
    Byte(u8),
    Float(f32),
    Int(i16),
    Long(i32),
    UInt(u16),
    ULong(u32),
    Char(u8),
    Text(String),
}

impl Value {
    /// Name of the column type this value belongs to
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Bool(_) => "BOOL",
            Value::Byte(_) => "BYTE",
            Value::Float(_) => "FLOAT",
            Value::Int(_) => "INT",
            Value::Long(_) => "LONG",
            Value::UInt(_) => "UINT",
            Value::ULong(_) => "ULONG",
            Value::Char(_) => "CHAR",
            Value::Text(_) => "CHARn",
        }
    }

    /// Whether this value can be stored in a column of type `ty`
    pub fn fits(&self, ty: ColumnType) -> bool {
        matches!(
            (self, ty),
            (Value::Bool(_), ColumnType::Bool)
                | (Value::Byte(_), ColumnType::Byte)
                | (Value::Float(_), ColumnType::Float)
                | (Value::Int(_), ColumnType::Int)
                | (Value::Long(_), ColumnType::Long)
                | (Value::UInt(_), ColumnType::UInt)
                | (Value::ULong(_), ColumnType::ULong)
                | (Value::Char(_), ColumnType::Char)
                | (Value::Text(_), ColumnType::CharArray(_))
        )
    }

    /// Encode into exactly `ty.width()` bytes
    ///
    /// A value of another type encodes as zeros; callers check `fits` first.
    pub fn encode(&self, ty: ColumnType) -> Vec<u8> {
        let mut out = vec![0u8; ty.width()];

        let bytes: Vec<u8> = match self {
            Value::Bool(v) => vec![u8::from(*v)],
            Value::Byte(v) | Value::Char(v) => vec![*v],
            Value::Float(v) => v.to_le_bytes().to_vec(),
            Value::Int(v) => v.to_le_bytes().to_vec(),
            Value::Long(v) => v.to_le_bytes().to_vec(),
            Value::UInt(v) => v.to_le_bytes().to_vec(),
            Value::ULong(v) => v.to_le_bytes().to_vec(),
            Value::Text(s) => truncate_text(s, out.len().saturating_sub(1)).to_vec(),
        };

        if self.fits(ty) {
            out[..bytes.len()].copy_from_slice(&bytes);
        }
        out
    }

    /// Decode a value of type `ty` from `bytes` (at least `ty.width()` long)
    pub fn decode(ty: ColumnType, bytes: &[u8]) -> Value {
        let mut raw = [0u8; 4];
        let n = ty.width().min(4).min(bytes.len());
        raw[..n].copy_from_slice(&bytes[..n]);

        match ty {
            ColumnType::Bool => Value::Bool(raw[0] != 0),
            ColumnType::Byte => Value::Byte(raw[0]),
            ColumnType::Char => Value::Char(raw[0]),
            ColumnType::Float => Value::Float(f32::from_le_bytes(raw)),
            ColumnType::Int => Value::Int(i16::from_le_bytes([raw[0], raw[1]])),
            ColumnType::Long => Value::Long(i32::from_le_bytes(raw)),
            ColumnType::UInt => Value::UInt(u16::from_le_bytes([raw[0], raw[1]])),
            ColumnType::ULong => Value::ULong(u32::from_le_bytes(raw)),
            ColumnType::CharArray(len) => {
                let field = &bytes[..(len as usize).min(bytes.len())];
                let end = field.iter().position(|&b| b == 0).unwrap_or(field.len());
                Value::Text(String::from_utf8_lossy(&field[..end]).into_owned())
            }
        }
    }

    /// Parse the textual form of a value for a column of type `ty`
    pub fn parse(ty: ColumnType, text: &str) -> Option<Value> {
        let value = match ty {
            ColumnType::Bool => match text {
                "true" | "1" => Value::Bool(true),
                "false" | "0" => Value::Bool(false),
                _ => return None,
            },
            ColumnType::Byte => Value::Byte(text.parse().ok()?),
            ColumnType::Float => Value::Float(text.parse().ok()?),
            ColumnType::Int => Value::Int(text.parse().ok()?),
            ColumnType::Long => Value::Long(text.parse().ok()?),
            ColumnType::UInt => Value::UInt(text.parse().ok()?),
            ColumnType::ULong => Value::ULong(text.parse().ok()?),
            ColumnType::Char => {
                let mut bytes = text.bytes();
                match (bytes.next(), bytes.next()) {
                    (Some(b), None) => Value::Char(b),
                    _ => return None,
                }
            }
            ColumnType::CharArray(_) => Value::Text(text.to_string()),
        };
        Some(value)
    }

    /// Order two values of the same type; `None` across types or for NaN
    pub fn compare(&self, other: &Value) -> Option<Ordering> {
        match (self, other) {
            (Value::Bool(a), Value::Bool(b)) => Some(a.cmp(b)),
            (Value::Byte(a), Value::Byte(b)) => Some(a.cmp(b)),
            (Value::Char(a), Value::Char(b)) => Some(a.cmp(b)),
            (Value::Float(a), Value::Float(b)) => a.partial_cmp(b),
            (Value::Int(a), Value::Int(b)) => Some(a.cmp(b)),
            (Value::Long(a), Value::Long(b)) => Some(a.cmp(b)),
            (Value::UInt(a), Value::UInt(b)) => Some(a.cmp(b)),
            (Value::ULong(a), Value::ULong(b)) => Some(a.cmp(b)),
            (Value::Text(a), Value::Text(b)) => Some(a.cmp(b)),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Integer payload widened to i64 (for BYTE, INT, LONG, UINT, ULONG)
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Byte(v) => Some(i64::from(*v)),
            Value::Int(v) => Some(i64::from(*v)),
            Value::Long(v) => Some(i64::from(*v)),
            Value::UInt(v) => Some(i64::from(*v)),
            Value::ULong(v) => Some(i64::from(*v)),
            _ => None,
        }
    }
}

/// Longest prefix of `s` that fits in `max` bytes without splitting a char
fn truncate_text(s: &str, max: usize) -> &[u8] {
    if s.len() <= max {
        return s.as_bytes();
    }
    let mut end = max;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    &s.as_bytes()[..end]
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bool(v) => write!(f, "{}", v),
            Value::Byte(v) => write!(f, "{}", v),
            Value::Float(v) => write!(f, "{}", v),
            Value::Int(v) => write!(f, "{}", v),
            Value::Long(v) => write!(f, "{}", v),
            Value::UInt(v) => write!(f, "{}", v),
            Value::ULong(v) => write!(f, "{}", v),
            Value::Char(v) => write!(f, "{}", char::from(*v)),
            Value::Text(v) => write!(f, "{}", v),
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<u8> for Value {
    fn from(v: u8) -> Self {
        Value::Byte(v)
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Value::Float(v)
    }
}

impl From<i16> for Value {
    fn from(v: i16) -> Self {
        Value::Int(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Long(v)
    }
}

impl From<u16> for Value {
    fn from(v: u16) -> Self {
        Value::UInt(v)
    }
}

impl From<u32> for Value {
    fn from(v: u32) -> Self {
        Value::ULong(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}
