//! Table Module
//!
//! Row storage and the per-table session API.
//!
//! ## Responsibilities
//! - Column-major address arithmetic for a table's data region
//! - Ring-buffer inserts with an index cursor for logical row order
//! - Filtering, positional select/update, and delete with compaction
//!
//! ## Ring Buffer
//! ```text
//! capacity 3, after inserting 1, 2, 3, 4 (size counter = 4)
//!
//!  slot:     0     1     2
//!          ┌─────┬─────┬─────┐
//!          │  4  │  2  │  3  │     write cursor = 4 % 3 = 1
//!          └─────┴─────┴─────┘
//!  cursor:  [1, 2, 0]              logical 0 = oldest = 2
//! ```
//!
//! The size counter runs from `0` to `2 * capacity - 1` and folds back to
//! `capacity` when it would reach `2 * capacity`. Once it is at least
//! `capacity` the ring is full and `size % capacity` is both the next slot
//! to overwrite and the oldest row.

mod cursor;
mod filter;
mod layout;
mod row;
mod session;

pub use cursor::IndexCursor;
pub use filter::Predicate;
pub use layout::RowLayout;
pub use row::RowWriter;
pub use session::{PendingAction, TableSession};
