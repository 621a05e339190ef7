use tracing::debug;

use crate::common::{PoolConfig, TableId};
use crate::memory::Vector;

use super::{Column, Table};

/// Owns every loaded table.
///
/// Tables are pushed into a paged vector and live until the pool is dropped;
/// a table is never released on its own. Foreign keys between tables are
/// `TableId`/`ColumnId` pairs resolved through the pool, so no table owns
/// another.
#[derive(Debug)]
pub struct TablePool {
    config: PoolConfig,
    tables: Vector<Table>,
}

impl TablePool {
    /// Creates an empty pool with the default page sizes.
    pub fn new() -> Self {
        Self::with_config(PoolConfig::default())
    }

    /// Creates an empty pool whose tables use the given page sizes.
    pub fn with_config(config: PoolConfig) -> Self {
        let tables = Vector::new(config.tables_per_page);
        Self { config, tables }
    }

    pub fn config(&self) -> &PoolConfig {
        &self.config
    }

    /// Returns the number of tables in the pool.
    pub fn table_count(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// Pushes an empty table with its arenas into the pool.
    pub fn new_table(&mut self, name: &str, col_count: usize) -> &mut Table {
        let id = TableId::new(self.tables.len());
        debug!(table = name, %id, col_count, "table created");
        self.tables.push(Table::new(id, name, col_count, &self.config))
    }

    /// Returns the table with the given id.
    pub fn table(&self, id: TableId) -> Option<&Table> {
        self.tables.get(id.as_usize())
    }

    pub fn table_mut(&mut self, id: TableId) -> Option<&mut Table> {
        self.tables.get_mut(id.as_usize())
    }

    /// Finds the table named `name`.
    pub fn find(&self, name: &str) -> Option<TableId> {
        self.tables
            .iter()
            .find(|table| table.name() == name)
            .map(Table::id)
    }

    /// Returns all tables in load order.
    pub fn tables(&self) -> impl Iterator<Item = &Table> + '_ {
        self.tables.iter()
    }

    /// Resolves the foreign key of `column` to the referenced table and column.
    pub fn foreign_target(&self, column: &Column) -> Option<(&Table, &Column)> {
        let foreign_key = column.foreign_key()?;
        let table = self.table(foreign_key.table)?;
        let target = table.column(foreign_key.column)?;
        Some((table, target))
    }

    /// Drops the most recently created table.
    ///
    /// Used to discard a table whose load failed part-way, before anything
    /// else was pushed.
    pub(crate) fn discard_last(&mut self) -> Option<Table> {
        let table = self.tables.pop();
        if let Some(table) = &table {
            debug!(table = table.name(), "table discarded");
        }
        table
    }
}

impl Default for TablePool {
    fn default() -> Self {
        Self::new()
    }
}
