//! Column types and values
//!
//! Every column is declared with a type name that maps to a one-byte code
//! stored in the catalog. The code also fixes the column's width:
//!
//! | Name    | Code    | Width   | Rust value |
//! |---------|---------|---------|------------|
//! | `BOOL`  | 1       | 1       | `bool`     |
//! | `BYTE`  | 2       | 1       | `u8`       |
//! | `FLOAT` | 3       | 4       | `f32`      |
//! | `INT`   | 4       | 2       | `i16`      |
//! | `LONG`  | 5       | 4       | `i32`      |
//! | `UINT`  | 7       | 2       | `u16`      |
//! | `ULONG` | 8       | 4       | `u32`      |
//! | `CHAR`  | 9       | 1       | `u8`       |
//! | `CHARn` | 9 + n   | n       | `String`   |
//!
//! Code 6 is reserved and code 0 marks an unknown name; neither can be stored.

mod column;
mod value;

pub use column::{byte_width, type_code, ColumnDef, ColumnType};
pub use value::Value;
