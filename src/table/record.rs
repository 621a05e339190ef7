use crate::common::{Result, SqlviewError, RECORD_DATA_PAGE_SIZE};
use crate::memory::{Arena, ArenaSpan, Vector};

use super::{Table, ValueKind};

/// One field of a record: a column name and the display string of its value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field {
    name: ArenaSpan,
    value: ArenaSpan,
    kind: ValueKind,
}

impl Field {
    pub fn kind(&self) -> ValueKind {
        self.kind
    }
}

/// A single row of a table viewed as name/value pairs.
///
/// The record copies everything it shows into its own arena, so it stays
/// valid independently of the table it was built from.
#[derive(Debug)]
pub struct Record {
    fields: Vector<Field>,
    data: Arena,
}

impl Record {
    /// Builds a record from row `row` of `table`.
    pub fn from_row(table: &Table, row: usize) -> Result<Self> {
        if row >= table.row_count() {
            return Err(SqlviewError::RowOutOfRange {
                table: table.name().to_string(),
                row,
                row_count: table.row_count(),
            });
        }

        let mut record = Record {
            fields: Vector::new(table.col_count().max(1)),
            data: Arena::new(RECORD_DATA_PAGE_SIZE),
        };

        for column in table.columns() {
            let text = column.cell_text(row).unwrap_or_default();
            let name = record.data.alloc_str(column.name());
            let value = record.data.alloc_str(text);
            record.fields.push(Field {
                name,
                value,
                kind: column.kind(),
            });
        }

        Ok(record)
    }

    /// Returns the number of fields.
    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    /// Returns `(name, value)` pairs in column order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.fields
            .iter()
            .map(move |field| (self.data.str(field.name), self.data.str(field.value)))
    }

    /// Returns the value of the first field named `name`.
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields()
            .find(|(field, _)| *field == name)
            .map(|(_, value)| value)
    }

    /// Returns the field at `idx`.
    pub fn field_at(&self, idx: usize) -> Option<&Field> {
        self.fields.get(idx)
    }
}
