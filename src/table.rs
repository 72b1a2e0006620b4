use crate::types::{Column, Entry, SortDirection};

/// Rows of the folder view plus the per-column sort flags.
#[derive(Debug, Default)]
pub struct EntryTable {
    rows: Vec<Entry>,
    directions: [SortDirection; 3],
    last_sorted: Option<Column>,
}

impl EntryTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace all rows, keeping the given order, and reset every column to
    /// ascending.
    pub fn replace(&mut self, rows: Vec<Entry>) {
        self.rows = rows;
        self.directions = [SortDirection::default(); 3];
        self.last_sorted = None;
    }

    /// Stable sort by `column` in its current direction, then flip that
    /// column's direction for the next call. An empty table is left as is.
    pub fn sort(&mut self, column: Column) {
        if self.rows.is_empty() {
            return;
        }

        let direction = self.directions[column.index()];
        log::debug!("Sorting {} rows by {column} ({direction:?})", self.rows.len());

        // Ties stay Equal in both directions, so their order is kept
        self.rows.sort_by(|a, b| {
            let ord = a.field(column).cmp(b.field(column));
            match direction {
                SortDirection::Ascending => ord,
                SortDirection::Descending => ord.reverse(),
            }
        });

        self.directions[column.index()] = direction.flipped();
        self.last_sorted = Some(column);
    }

    /// Direction the next `sort(column)` will use.
    #[must_use]
    pub fn direction(&self, column: Column) -> SortDirection {
        self.directions[column.index()]
    }

    #[must_use]
    pub fn last_sorted(&self) -> Option<Column> {
        self.last_sorted
    }

    #[must_use]
    pub fn rows(&self) -> &[Entry] {
        &self.rows
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
