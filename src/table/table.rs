use tracing::debug;

use crate::common::{ColumnId, ForeignKey, PoolConfig, Result, SqlviewError, TableId};
use crate::memory::{Arena, ArenaSpan, Vector};

use super::{Cell, Column, ColumnRef, Value, ValueKind};

/// The arenas backing one table.
///
/// Payloads of unrelated sizes are kept apart so they do not interleave:
/// raw cell payloads, cell display strings, and metadata such as names.
#[derive(Debug)]
pub struct TableMemory {
    bin: Arena,
    text: Arena,
    meta: Arena,
}

impl TableMemory {
    fn new(config: &PoolConfig) -> Self {
        Self {
            bin: Arena::new(config.bin_page_size),
            text: Arena::new(config.str_page_size),
            meta: Arena::new(config.meta_page_size),
        }
    }

    /// Arena holding raw integer, float and blob payloads.
    pub fn bin(&self) -> &Arena {
        &self.bin
    }

    /// Arena holding cell display strings.
    pub fn text(&self) -> &Arena {
        &self.text
    }

    /// Arena holding table and column names.
    pub fn meta(&self) -> &Arena {
        &self.meta
    }

    /// Writes both payloads of `value` and returns the cell pointing at them.
    fn encode(&mut self, value: &Value) -> Cell {
        let raw = value.raw_bytes().map(|bytes| self.bin.alloc_bytes(&bytes));
        let text = self.text.alloc_str(&value.display_text());
        Cell::new(value.kind(), raw, text)
    }
}

/// A named collection of columns representing one result set.
///
/// Data is stored column by column: each column owns a vector of cells, and
/// the cells point into the table's arenas. Rows are appended with
/// `append_row`, which writes exactly one cell per column in column order.
#[derive(Debug)]
pub struct Table {
    id: TableId,
    name: ArenaSpan,
    col_count: usize,
    row_count: usize,
    cells_per_page: usize,
    columns: Vector<Column>,
    memory: TableMemory,
}

impl Table {
    pub(crate) fn new(id: TableId, name: &str, col_count: usize, config: &PoolConfig) -> Self {
        let mut memory = TableMemory::new(config);
        let name = memory.meta.alloc_str(name);
        Self {
            id,
            name,
            col_count,
            row_count: 0,
            cells_per_page: config.cells_per_page,
            columns: Vector::new(config.columns_per_page),
            memory,
        }
    }

    /// Returns the table's position in its pool.
    pub fn id(&self) -> TableId {
        self.id
    }

    pub fn name(&self) -> &str {
        self.memory.meta.str(self.name)
    }

    /// Returns the declared column count.
    pub fn col_count(&self) -> usize {
        self.col_count
    }

    /// Returns the number of rows ingested.
    pub fn row_count(&self) -> usize {
        self.row_count
    }

    /// Returns the arenas backing this table.
    pub fn memory(&self) -> &TableMemory {
        &self.memory
    }

    /// Appends an empty column and copies its name into the metadata arena.
    pub fn new_column(&mut self, name: &str, kind: ValueKind) -> ColumnId {
        let id = ColumnId::new(self.columns.len());
        let name = self.memory.meta.alloc_str(name);
        self.columns
            .push(Column::new(id, name, kind, self.cells_per_page));
        debug!(table = self.name(), column = %id, %kind, "column created");
        id
    }

    /// Returns the column with the given id.
    pub fn column(&self, id: ColumnId) -> Option<&Column> {
        self.columns.get(id.as_usize())
    }

    /// Returns the column with the given id, bundled with this table.
    pub fn column_ref(&self, id: ColumnId) -> Option<ColumnRef<'_>> {
        self.column(id).map(|column| ColumnRef::new(self, column))
    }

    /// Returns all columns in order.
    pub fn columns(&self) -> impl Iterator<Item = ColumnRef<'_>> + '_ {
        self.columns
            .iter()
            .map(move |column| ColumnRef::new(self, column))
    }

    /// Returns the name of a column.
    pub fn column_name(&self, column: &Column) -> &str {
        self.meta_str(column.name_span())
    }

    /// Finds the first column named `name`.
    ///
    /// Column names are expected to be unique within a table.
    pub fn column_by_name(&self, name: &str) -> Option<ColumnId> {
        let mut iter = self.columns.cursor();
        let mut column = iter.current();

        while let Some(candidate) = column {
            if self.column_name(candidate) == name {
                return Some(candidate.id());
            }
            column = iter.advance();
        }

        None
    }

    /// Records the nullability and key flags of a column.
    ///
    /// # Panics
    /// Panics if the column does not exist.
    pub fn set_constraints(&mut self, column: ColumnId, not_null: bool, primary_key: bool) {
        self.columns
            .seek_mut(column.as_usize())
            .set_constraints(not_null, primary_key);
    }

    /// Links a column to a column of another pooled table.
    ///
    /// # Panics
    /// Panics if the column does not exist.
    pub fn set_foreign_key(&mut self, column: ColumnId, foreign_key: ForeignKey) {
        self.columns
            .seek_mut(column.as_usize())
            .set_foreign_key(foreign_key);
    }

    /// Appends one cell holding `value` to a column.
    ///
    /// This does not touch the row count; use `append_row` to ingest whole
    /// rows.
    ///
    /// # Panics
    /// Panics if the column does not exist.
    pub fn new_cell(&mut self, column: ColumnId, value: &Value) -> &Cell {
        let cell = self.memory.encode(value);
        self.columns.seek_mut(column.as_usize()).push_cell(cell)
    }

    /// Ingests one row: one value per column, in column order.
    pub fn append_row(&mut self, values: &[Value]) -> Result<()> {
        if values.len() != self.col_count || values.len() != self.columns.len() {
            return Err(SqlviewError::RowWidthMismatch {
                table: self.name().to_string(),
                expected: self.col_count,
                found: values.len(),
            });
        }

        for (idx, value) in values.iter().enumerate() {
            self.new_cell(ColumnId::new(idx), value);
        }
        self.row_count += 1;

        Ok(())
    }

    /// Returns the cell at `row` of a column.
    pub fn cell(&self, column: ColumnId, row: usize) -> Option<&Cell> {
        self.column(column).and_then(|c| c.cell(row))
    }

    /// Returns the display string at `row` of a column.
    pub fn cell_text(&self, column: ColumnId, row: usize) -> Option<&str> {
        self.cell(column, row).map(|cell| self.text(cell))
    }

    /// Returns the display string of a cell.
    pub fn text(&self, cell: &Cell) -> &str {
        self.memory.text.str(cell.text_span())
    }

    /// Returns the raw payload of a cell, if it has one.
    pub fn cell_raw(&self, cell: &Cell) -> Option<&[u8]> {
        cell.raw_span().map(|span| self.memory.bin.bytes(span))
    }

    /// Decodes a cell back into the value it was created from.
    pub fn cell_value(&self, cell: &Cell) -> Option<Value> {
        Value::decode(cell.kind(), self.cell_raw(cell), self.text(cell))
    }

    pub(crate) fn meta_str(&self, span: ArenaSpan) -> &str {
        self.memory.meta.str(span)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_table() -> Table {
        let mut table = Table::new(TableId::new(0), "people", 3, &PoolConfig::compact());
        let id = table.new_column("id", ValueKind::Int);
        table.new_column("name", ValueKind::Text);
        table.new_column("score", ValueKind::Float);
        table.set_constraints(id, true, true);
        table
    }

    #[test]
    fn test_new_column_copies_name() {
        let table = sample_table();
        let names: Vec<_> = table.columns().map(|c| c.name()).collect();
        assert_eq!(names, vec!["id", "name", "score"]);
        assert_eq!(table.name(), "people");
    }

    #[test]
    fn test_read_only_derivation() {
        let mut table = sample_table();
        assert!(table.column(ColumnId::new(0)).unwrap().is_read_only());

        // A text primary key is editable
        let code = table.new_column("code", ValueKind::Text);
        table.set_constraints(code, true, true);
        assert!(!table.column(code).unwrap().is_read_only());

        // So is a nullable integer key
        let alt = table.new_column("alt", ValueKind::Int);
        table.set_constraints(alt, false, true);
        assert!(!table.column(alt).unwrap().is_read_only());
    }

    #[test]
    fn test_append_row_writes_one_cell_per_column() {
        let mut table = sample_table();
        table
            .append_row(&[Value::Int(1), "ada".into(), Value::Float(9.5)])
            .unwrap();
        table
            .append_row(&[Value::Int(2), Value::Null, Value::Float(7.0)])
            .unwrap();

        assert_eq!(table.row_count(), 2);
        assert_eq!(table.cell_text(ColumnId::new(1), 0), Some("ada"));
        assert_eq!(table.cell_text(ColumnId::new(1), 1), Some("NULL"));
        assert_eq!(table.cell_text(ColumnId::new(2), 1), Some("7.0"));
        for column in table.columns() {
            assert_eq!(column.cell_count(), 2);
        }
    }

    #[test]
    fn test_append_row_rejects_wrong_width() {
        let mut table = sample_table();
        let err = table.append_row(&[Value::Int(1)]).unwrap_err();

        assert!(matches!(
            err,
            SqlviewError::RowWidthMismatch {
                expected: 3,
                found: 1,
                ..
            }
        ));
        assert_eq!(table.row_count(), 0);
        assert!(table.columns().all(|c| c.cell_count() == 0));
    }

    #[test]
    fn test_column_by_name_scans_pages() {
        let table = sample_table();
        // Compact config holds two columns per page
        assert_eq!(table.column_by_name("score"), Some(ColumnId::new(2)));
        assert_eq!(table.column_by_name("id"), Some(ColumnId::new(0)));
        assert_eq!(table.column_by_name("missing"), None);
    }

    #[test]
    fn test_column_by_name_returns_first_match() {
        let mut table = Table::new(TableId::new(0), "dup", 2, &PoolConfig::compact());
        table.new_column("x", ValueKind::Int);
        table.new_column("x", ValueKind::Text);
        assert_eq!(table.column_by_name("x"), Some(ColumnId::new(0)));
    }

    #[test]
    fn test_display_width() {
        let mut table = sample_table();
        table
            .append_row(&[Value::Int(100000), "bo".into(), Value::Float(0.5)])
            .unwrap();

        let widths: Vec<_> = table.columns().map(|c| c.display_width()).collect();
        assert_eq!(widths, vec![6, 4, 5]);
    }
}
