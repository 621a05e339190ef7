use std::ops::Deref;

use crate::common::{ColumnId, ForeignKey};
use crate::memory::{ArenaSpan, Vector};

use super::{Cell, Table, ValueKind};

/// A named, typed series of cells plus its schema metadata.
///
/// The name lives in the owning table's metadata arena, so it is read through
/// a `ColumnRef` (see `Table::columns`).
#[derive(Debug)]
pub struct Column {
    id: ColumnId,
    name: ArenaSpan,
    kind: ValueKind,
    not_null: bool,
    primary_key: bool,
    read_only: bool,
    foreign_key: Option<ForeignKey>,
    cells: Vector<Cell>,
}

impl Column {
    pub(crate) fn new(id: ColumnId, name: ArenaSpan, kind: ValueKind, cells_per_page: usize) -> Self {
        Self {
            id,
            name,
            kind,
            not_null: false,
            primary_key: false,
            read_only: false,
            foreign_key: None,
            cells: Vector::new(cells_per_page),
        }
    }

    /// Returns the column's position in its table.
    pub fn id(&self) -> ColumnId {
        self.id
    }

    /// Location of the name in the table's metadata arena.
    pub fn name_span(&self) -> ArenaSpan {
        self.name
    }

    /// Returns the declared kind.
    pub fn kind(&self) -> ValueKind {
        self.kind
    }

    pub fn is_not_null(&self) -> bool {
        self.not_null
    }

    pub fn is_primary_key(&self) -> bool {
        self.primary_key
    }

    /// Returns true for columns that look like auto-increment keys:
    /// a non-null integer primary key.
    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    /// Returns the column this one references, if any.
    pub fn foreign_key(&self) -> Option<ForeignKey> {
        self.foreign_key
    }

    /// Returns the number of cells.
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Returns the cells in row order.
    pub fn cells(&self) -> &Vector<Cell> {
        &self.cells
    }

    /// Returns the cell of `row`.
    pub fn cell(&self, row: usize) -> Option<&Cell> {
        self.cells.get(row)
    }

    pub(crate) fn set_constraints(&mut self, not_null: bool, primary_key: bool) {
        self.not_null = not_null;
        self.primary_key = primary_key;
        self.read_only = primary_key && not_null && self.kind == ValueKind::Int;
    }

    pub(crate) fn set_foreign_key(&mut self, foreign_key: ForeignKey) {
        self.foreign_key = Some(foreign_key);
    }

    pub(crate) fn push_cell(&mut self, cell: Cell) -> &Cell {
        self.cells.push(cell)
    }
}

/// A column together with the table owning its arenas.
#[derive(Debug, Clone, Copy)]
pub struct ColumnRef<'a> {
    table: &'a Table,
    column: &'a Column,
}

impl<'a> ColumnRef<'a> {
    pub(crate) fn new(table: &'a Table, column: &'a Column) -> Self {
        Self { table, column }
    }

    pub fn name(&self) -> &'a str {
        self.table.meta_str(self.column.name)
    }

    /// Returns the owning table.
    pub fn table(&self) -> &'a Table {
        self.table
    }

    /// Returns the underlying column.
    pub fn column(&self) -> &'a Column {
        self.column
    }

    /// Returns the display string of the cell at `row`.
    pub fn cell_text(&self, row: usize) -> Option<&'a str> {
        self.column.cell(row).map(|cell| self.table.text(cell))
    }

    /// Returns the display strings of all cells in row order.
    pub fn texts(&self) -> impl Iterator<Item = &'a str> + 'a {
        let (table, column) = (self.table, self.column);
        column.cells.iter().map(move |cell| table.text(cell))
    }

    /// Returns the widest display string, header included, in characters.
    pub fn display_width(&self) -> usize {
        self.texts()
            .map(|text| text.chars().count())
            .chain(std::iter::once(self.name().chars().count()))
            .max()
            .unwrap_or(0)
    }
}

impl Deref for ColumnRef<'_> {
    type Target = Column;

    fn deref(&self) -> &Column {
        self.column
    }
}
