//! Table session
//!
//! The stateful view of one open table. Rows are addressed through the
//! index cursor, so a filter narrows every later select, update and delete
//! until `finalize` resets it.

use tracing::{debug, trace};

use crate::catalog::{ColumnMeta, TableRecord};
use crate::database::Database;
use crate::error::{Result, TinyDbError};
use crate::storage::StorageDevice;
use crate::types::{ColumnType, Value};

use super::{IndexCursor, Predicate, RowLayout, RowWriter};

/// Last operation issued on a session; decides what `finalize` commits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingAction {
    Idle,
    Insert,
    Update,
    Filter,
    Delete,
}

/// An open table
///
/// Holds the database mutably, so only one table can be open at a time and
/// a session cannot outlive the database it came from.
///
/// ## Operation Chains
/// ```text
/// insert(a) ─► insert(b) ─► finalize()      one new row
/// filter(..) ─► update(.., n) ─► finalize() edit matching rows
/// filter(..) ─► delete_all() ─► finalize()  remove matching rows
/// ```
pub struct TableSession<'db, D: StorageDevice> {
    db: &'db mut Database<D>,
    record: TableRecord,
    layout: RowLayout,
    cursor: IndexCursor,
    pending: PendingAction,
}

impl<'db, D: StorageDevice> TableSession<'db, D> {
    pub(crate) fn new(db: &'db mut Database<D>, record: TableRecord) -> Self {
        let layout = RowLayout::new(
            record.start,
            record.capacity as usize,
            record.columns.iter().map(ColumnMeta::width),
        );
        let mut cursor = IndexCursor::new(record.capacity);
        cursor.reset(record.size);

        Self {
            db,
            record,
            layout,
            cursor,
            pending: PendingAction::Idle,
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn name(&self) -> &str {
        &self.record.name
    }

    /// Maximum rows the table holds
    pub fn capacity(&self) -> usize {
        self.record.capacity as usize
    }

    /// Rows reachable right now (narrowed by a live filter)
    pub fn count(&self) -> usize {
        self.cursor.active_count()
    }

    /// Persisted size counter
    pub fn size(&self) -> u16 {
        self.record.size
    }

    /// Physical slot the next insert writes to
    pub fn write_cursor(&self) -> usize {
        match self.capacity() {
            0 => 0,
            capacity => self.record.size as usize % capacity,
        }
    }

    pub fn columns(&self) -> &[ColumnMeta] {
        &self.record.columns
    }

    pub fn record(&self) -> &TableRecord {
        &self.record
    }

    pub fn pending_action(&self) -> PendingAction {
        self.pending
    }

    /// Position of `column` in the table's column list
    pub fn column_index(&self, column: &str) -> Result<usize> {
        self.record
            .columns
            .iter()
            .position(|c| c.name == column)
            .ok_or_else(|| TinyDbError::ColumnNotFound {
                table: self.record.name.clone(),
                column: column.to_string(),
            })
    }

    // =========================================================================
    // Row Operations
    // =========================================================================

    /// Write one column of the row at the write cursor
    ///
    /// The row only counts once `finalize` runs.
    pub fn insert(&mut self, column: &str, value: impl Into<Value>) -> Result<&mut Self> {
        let index = self.column_index(column)?;
        let value = value.into();
        self.check_type(index, &value)?;

        let slot = self.write_cursor();
        self.write_value(index, slot, &value);
        self.pending = PendingAction::Insert;

        debug!(table = %self.record.name, column, slot, "insert");
        Ok(self)
    }

    /// Start a row that is written in one go on `commit`
    pub fn begin_row(&mut self) -> RowWriter<'_, 'db, D> {
        RowWriter::new(self)
    }

    /// Overwrite `column` of logical row `n`
    pub fn update(&mut self, column: &str, value: impl Into<Value>, n: usize) -> Result<&mut Self> {
        let index = self.column_index(column)?;
        let value = value.into();
        self.check_type(index, &value)?;

        let slot = self.map_logical(n)?;
        self.write_value(index, slot, &value);
        self.pending = PendingAction::Update;

        debug!(table = %self.record.name, column, n, slot, "update");
        Ok(self)
    }

    /// Read `column` of logical row `n`
    pub fn select(&self, column: &str, n: usize) -> Result<Value> {
        let index = self.column_index(column)?;
        let slot = self.map_logical(n)?;
        Ok(self.read_value(index, slot))
    }

    /// Read `column` of every active row, in logical order
    pub fn select_all(&self, column: &str) -> Result<Vec<Value>> {
        let index = self.column_index(column)?;
        Ok(self
            .cursor
            .active()
            .map(|slot| self.read_value(index, slot))
            .collect())
    }

    /// Narrow the active rows to those whose `column` compares true
    /// against `threshold`
    ///
    /// Applies to the currently active rows, so chained filters AND together.
    pub fn filter(
        &mut self,
        column: &str,
        predicate: Predicate,
        threshold: impl Into<Value>,
    ) -> Result<&mut Self> {
        let index = self.column_index(column)?;
        let column_type = self.record.columns[index].column_type;
        if column_type.is_char_array() {
            return Err(TinyDbError::UnsupportedFilter {
                column: column.to_string(),
            });
        }

        let threshold = threshold.into();
        self.check_type(index, &threshold)?;

        let device = &self.db.device;
        let layout = &self.layout;
        self.cursor.retain(|slot| {
            let value = read_value(device, layout, column_type, index, slot);
            predicate.matches(value.compare(&threshold))
        });
        self.pending = PendingAction::Filter;

        debug!(
            table = %self.record.name,
            column,
            predicate = %predicate,
            threshold = %threshold,
            matched = self.cursor.active_count(),
            "filter"
        );
        Ok(self)
    }

    /// Delete logical row `n`, compacting the rows behind it
    pub fn delete_at(&mut self, n: usize) -> Result<&mut Self> {
        if self.cursor.active_count() == 0 {
            return Err(self.empty());
        }

        self.delete_one(n);
        self.pending = PendingAction::Delete;
        self.trace_cursor();
        self.db.commit_point()?;

        Ok(self)
    }

    /// Delete every active row; returns how many were deleted
    pub fn delete_all(&mut self) -> Result<usize> {
        let total = self.cursor.active_count();
        for _ in 0..total {
            self.delete_one(0);
        }

        if total > 0 {
            self.pending = PendingAction::Delete;
            self.trace_cursor();
            self.db.commit_point()?;
        }

        debug!(table = %self.record.name, deleted = total, "delete all");
        Ok(total)
    }

    /// Close the current operation chain
    ///
    /// After an insert the size counter advances; reaching `2 * capacity`
    /// folds it back to `capacity`. Any filter is discarded.
    pub fn finalize(&mut self) -> Result<()> {
        let wrote = matches!(self.pending, PendingAction::Insert | PendingAction::Update);

        if self.pending == PendingAction::Insert {
            let capacity = u16::from(self.record.capacity);
            let mut size = self.record.size.saturating_add(1);
            if size >= 2 * capacity {
                size = capacity;
            }
            self.set_size(size);
            debug!(table = %self.record.name, size, "row committed");
        }

        self.pending = PendingAction::Idle;
        self.cursor.reset(self.record.size);

        if wrote {
            self.db.commit_point()?;
        }
        Ok(())
    }

    // =========================================================================
    // Helpers shared with RowWriter
    // =========================================================================

    pub(super) fn check_type(&self, index: usize, value: &Value) -> Result<()> {
        let column = &self.record.columns[index];
        if value.fits(column.column_type) {
            return Ok(());
        }
        Err(TinyDbError::TypeMismatch {
            column: column.name.clone(),
            expected: column.column_type.to_string(),
            found: value.type_name().to_string(),
        })
    }

    pub(super) fn write_value(&mut self, index: usize, slot: usize, value: &Value) {
        let column_type = self.record.columns[index].column_type;
        let addr = self.layout.offset(index, slot);
        self.db.device.write_bytes(addr, &value.encode(column_type));
    }

    pub(super) fn clear_value(&mut self, index: usize, slot: usize) {
        let addr = self.layout.offset(index, slot);
        let width = self.layout.width(index);
        self.db.device.fill(addr, width, 0);
    }

    pub(super) fn mark_insert(&mut self) {
        self.pending = PendingAction::Insert;
    }

    // =========================================================================
    // Private Helpers
    // =========================================================================

    fn read_value(&self, index: usize, slot: usize) -> Value {
        let column_type: ColumnType = self.record.columns[index].column_type;
        read_value(&self.db.device, &self.layout, column_type, index, slot)
    }

    fn map_logical(&self, n: usize) -> Result<usize> {
        self.cursor.map(n).ok_or_else(|| self.empty())
    }

    fn empty(&self) -> TinyDbError {
        TinyDbError::EmptyResult {
            table: self.record.name.clone(),
        }
    }

    fn set_size(&mut self, size: u16) {
        self.record.size = size;
        TableRecord::write_size(&mut self.db.device, self.record.base, size);
    }

    /// Remove one row without committing
    fn delete_one(&mut self, n: usize) {
        self.normalize_ring();

        let active = self.cursor.active_count();
        if active == 0 {
            return;
        }
        let position = n % active;
        let slot = match self.cursor.map(position) {
            Some(slot) => slot,
            None => return,
        };

        self.erase_row(slot);
        self.shift_rows_down(slot);
        self.cursor.remove(position);

        let size = (self.record.size as usize)
            .min(self.capacity())
            .saturating_sub(1);
        self.set_size(size as u16);

        debug!(table = %self.record.name, position, slot, size, "delete");
    }

    /// Rotate a wrapped ring so the oldest row sits at slot 0
    ///
    /// Compaction shifts rows toward slot 0, which only keeps insertion
    /// order when physical order already matches it.
    fn normalize_ring(&mut self) {
        let capacity = self.capacity();
        let size = self.record.size as usize;
        if capacity == 0 || size <= capacity {
            return;
        }

        let shift = size % capacity;
        if shift != 0 {
            for column in 0..self.layout.column_count() {
                let base = self.layout.column_base(column);
                let width = self.layout.width(column);
                let mut bytes = vec![0u8; capacity * width];
                self.db.device.read_bytes(base, &mut bytes);
                bytes.rotate_left(shift * width);
                self.db.device.write_bytes(base, &bytes);
            }
            self.cursor.rotate(shift);
        }

        self.set_size(capacity as u16);
        debug!(table = %self.record.name, shift, "ring normalized");
    }

    fn erase_row(&mut self, slot: usize) {
        for column in 0..self.layout.column_count() {
            self.clear_value(column, slot);
        }
    }

    /// Move every row after `slot` down by one, zeroing each source byte
    fn shift_rows_down(&mut self, slot: usize) {
        for from in slot + 1..self.capacity() {
            for column in 0..self.layout.column_count() {
                let src = self.layout.offset(column, from);
                let dst = self.layout.offset(column, from - 1);
                for i in 0..self.layout.width(column) {
                    let byte = self.db.device.read_byte(src + i);
                    self.db.device.write_byte(dst + i, byte);
                    self.db.device.write_byte(src + i, 0);
                }
            }
        }
    }

    fn trace_cursor(&self) {
        if self.db.config().trace_index {
            trace!(table = %self.record.name, index = %self.cursor, "index cursor");
        }
    }
}

fn read_value<D: StorageDevice>(
    device: &D,
    layout: &RowLayout,
    column_type: ColumnType,
    column: usize,
    slot: usize,
) -> Value {
    let mut bytes = vec![0u8; layout.width(column)];
    device.read_bytes(layout.offset(column, slot), &mut bytes);
    Value::decode(column_type, &bytes)
}
