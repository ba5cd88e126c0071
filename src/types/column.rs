//! Column type registry and declarations

use std::fmt;

/// Code of the single-character type; array codes start above it
const CHAR_CODE: u8 = 9;

/// Map a declared type name to its catalog code
///
/// `CHAR` followed by a decimal length `n` maps to `9 + n`. Anything
/// unrecognized maps to `0`.
pub fn type_code(name: &str) -> u8 {
    match name {
        "BOOL" => 1,
        "BYTE" => 2,
        "FLOAT" => 3,
        "INT" => 4,
        "LONG" => 5,
        "UINT" => 7,
        "ULONG" => 8,
        _ => match name.strip_prefix("CHAR") {
            Some("") => CHAR_CODE,
            Some(suffix) if suffix.bytes().all(|b| b.is_ascii_digit()) => suffix
                .parse::<u16>()
                .ok()
                .and_then(|len| u8::try_from(u16::from(CHAR_CODE) + len).ok())
                .unwrap_or(0),
            _ => 0,
        },
    }
}

/// Bytes occupied by one value of the type with `code`
///
/// Reserved (`6`) and unknown (`0`) codes have width 0.
pub fn byte_width(code: u8) -> u8 {
    match code {
        1 | 2 => 1,
        3 => 4,
        4 => 2,
        5 => 4,
        7 => 2,
        8 => 4,
        CHAR_CODE => 1,
        c if c > CHAR_CODE => c - CHAR_CODE,
        _ => 0,
    }
}

/// Storable column type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    Bool,
    Byte,
    Float,
    Int,
    Long,
    UInt,
    ULong,
    /// A single character byte
    Char,
    /// NUL-terminated text in a fixed number of bytes
    CharArray(u8),
}

impl ColumnType {
    /// Decode a catalog code; `None` for reserved and unknown codes
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(ColumnType::Bool),
            2 => Some(ColumnType::Byte),
            3 => Some(ColumnType::Float),
            4 => Some(ColumnType::Int),
            5 => Some(ColumnType::Long),
            7 => Some(ColumnType::UInt),
            8 => Some(ColumnType::ULong),
            CHAR_CODE => Some(ColumnType::Char),
            c if c > CHAR_CODE => Some(ColumnType::CharArray(c - CHAR_CODE)),
            _ => None,
        }
    }

    /// Parse a declared type name
    pub fn parse(name: &str) -> Option<Self> {
        Self::from_code(type_code(name))
    }

    pub fn code(self) -> u8 {
        match self {
            ColumnType::Bool => 1,
            ColumnType::Byte => 2,
            ColumnType::Float => 3,
            ColumnType::Int => 4,
            ColumnType::Long => 5,
            ColumnType::UInt => 7,
            ColumnType::ULong => 8,
            ColumnType::Char => CHAR_CODE,
            ColumnType::CharArray(len) => CHAR_CODE + len,
        }
    }

    /// Bytes per stored value
    pub fn width(self) -> usize {
        byte_width(self.code()) as usize
    }

    /// Character arrays are stored as raw text and cannot be filtered
    pub fn is_char_array(self) -> bool {
        matches!(self, ColumnType::CharArray(_))
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnType::Bool => write!(f, "BOOL"),
            ColumnType::Byte => write!(f, "BYTE"),
            ColumnType::Float => write!(f, "FLOAT"),
            ColumnType::Int => write!(f, "INT"),
            ColumnType::Long => write!(f, "LONG"),
            ColumnType::UInt => write!(f, "UINT"),
            ColumnType::ULong => write!(f, "ULONG"),
            ColumnType::Char => write!(f, "CHAR"),
            ColumnType::CharArray(len) => write!(f, "CHAR{}", len),
        }
    }
}

/// A column as declared by the caller of `create_table`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnDef {
    pub name: String,
    pub type_name: String,
}

impl ColumnDef {
    pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
        }
    }

    /// Parse a `name:TYPE` declaration
    pub fn parse(decl: &str) -> Option<Self> {
        let (name, type_name) = decl.split_once(':')?;
        Some(Self::new(name.trim(), type_name.trim()))
    }
}
