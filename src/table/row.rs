//! Whole-row inserts

use tracing::debug;

use crate::error::Result;
use crate::storage::StorageDevice;
use crate::types::Value;

use super::TableSession;

/// Buffers the columns of one new row and writes them together
///
/// Nothing reaches the device until `commit`, and only if every value
/// names a known column and matches its type. Columns never `set` are
/// zeroed. Dropping the writer discards the row.
#[must_use = "a row is only written on commit"]
pub struct RowWriter<'s, 'db, D: StorageDevice> {
    session: &'s mut TableSession<'db, D>,
    values: Vec<(String, Value)>,
}

impl<'s, 'db, D: StorageDevice> RowWriter<'s, 'db, D> {
    pub(super) fn new(session: &'s mut TableSession<'db, D>) -> Self {
        Self {
            session,
            values: Vec::new(),
        }
    }

    /// Set one column; a later value for the same column wins
    pub fn set(mut self, column: &str, value: impl Into<Value>) -> Self {
        self.values.push((column.to_string(), value.into()));
        self
    }

    /// Validate the buffered values, write the row and finalize it
    pub fn commit(self) -> Result<()> {
        let session = self.session;

        let mut row: Vec<Option<Value>> = vec![None; session.columns().len()];
        for (column, value) in self.values {
            let index = session.column_index(&column)?;
            session.check_type(index, &value)?;
            row[index] = Some(value);
        }

        let slot = session.write_cursor();
        for (index, value) in row.iter().enumerate() {
            match value {
                Some(value) => session.write_value(index, slot, value),
                None => session.clear_value(index, slot),
            }
        }

        debug!(table = %session.name(), slot, "row written");
        session.mark_insert();
        session.finalize()
    }
}
