//! Column-major row layout
//!
//! Column `i` owns `capacity * width_i` contiguous bytes starting at
//! `start + capacity * (width_0 + .. + width_{i-1})`; slot `p` of that column
//! sits `p * width_i` bytes further in.

/// Address arithmetic for one table's row data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowLayout {
    start: usize,
    capacity: usize,
    /// (first address, width) per column
    columns: Vec<(usize, usize)>,
}

impl RowLayout {
    pub fn new(start: usize, capacity: usize, widths: impl IntoIterator<Item = usize>) -> Self {
        let mut next = start;
        let columns = widths
            .into_iter()
            .map(|width| {
                let base = next;
                next += capacity * width;
                (base, width)
            })
            .collect();

        Self {
            start,
            capacity,
            columns,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// First address of column `column`'s slot array
    pub fn column_base(&self, column: usize) -> usize {
        self.columns[column].0
    }

    /// Bytes per value in column `column`
    pub fn width(&self, column: usize) -> usize {
        self.columns[column].1
    }

    /// Address of physical slot `slot` in column `column`
    pub fn offset(&self, column: usize, slot: usize) -> usize {
        let (base, width) = self.columns[column];
        base + slot * width
    }

    /// Bytes of one row across all columns
    pub fn row_width(&self) -> usize {
        self.columns.iter().map(|&(_, width)| width).sum()
    }

    /// Total bytes reserved for the table
    pub fn region_len(&self) -> usize {
        self.capacity * self.row_width()
    }

    /// One past the last reserved address
    pub fn end(&self) -> usize {
        self.start + self.region_len()
    }
}
