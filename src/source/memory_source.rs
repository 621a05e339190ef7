use crate::common::{Result, SqlviewError};
use crate::table::Value;

use super::{TableSchema, TableSource};

#[derive(Debug, Clone)]
struct MemoryTable {
    schema: TableSchema,
    rows: Vec<Vec<Value>>,
}

/// A `TableSource` holding its tables in memory.
///
/// Rows are stored as given; their width is checked by the table they are
/// loaded into, not here.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    tables: Vec<MemoryTable>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a table, replacing any previous table with the same name.
    pub fn add_table(&mut self, schema: TableSchema) -> &mut Self {
        let table = MemoryTable {
            schema,
            rows: Vec::new(),
        };
        match self.position(&table.schema.name) {
            Some(idx) => self.tables[idx] = table,
            None => self.tables.push(table),
        }
        self
    }

    /// Appends a row to `table`.
    pub fn insert_row(&mut self, table: &str, row: Vec<Value>) -> Result<&mut Self> {
        let idx = self
            .position(table)
            .ok_or_else(|| SqlviewError::TableNotFound(table.to_string()))?;
        self.tables[idx].rows.push(row);
        Ok(self)
    }

    /// Adds a table together with its rows.
    pub fn with_table(mut self, schema: TableSchema, rows: Vec<Vec<Value>>) -> Self {
        let name = schema.name.clone();
        self.add_table(schema);
        if let Some(idx) = self.position(&name) {
            self.tables[idx].rows = rows;
        }
        self
    }

    /// Returns the number of rows stored for `table`.
    pub fn row_count(&self, table: &str) -> Option<usize> {
        self.get(table).map(|t| t.rows.len())
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.tables.iter().position(|t| t.schema.name == name)
    }

    fn get(&self, name: &str) -> Option<&MemoryTable> {
        self.tables.iter().find(|t| t.schema.name == name)
    }

    fn lookup(&self, name: &str) -> Result<&MemoryTable> {
        self.get(name)
            .ok_or_else(|| SqlviewError::TableNotFound(name.to_string()))
    }
}

impl TableSource for MemorySource {
    fn table_names(&self) -> Result<Vec<String>> {
        Ok(self.tables.iter().map(|t| t.schema.name.clone()).collect())
    }

    fn describe(&self, table: &str) -> Result<TableSchema> {
        Ok(self.lookup(table)?.schema.clone())
    }

    fn for_each_row(
        &self,
        table: &str,
        visit: &mut dyn FnMut(&[Value]) -> Result<()>,
    ) -> Result<()> {
        for row in &self.lookup(table)?.rows {
            visit(row)?;
        }
        Ok(())
    }
}
