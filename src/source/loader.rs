use std::collections::HashSet;

use tracing::{info, warn};

use crate::common::{ColumnId, ForeignKey, Result, SqlviewError, TableId, TABLE_LIST_NAME};
use crate::table::{TablePool, Value, ValueKind};

use super::{TableSchema, TableSource};

/// A described table waiting for its referenced tables to load.
struct Pending {
    schema: TableSchema,
    next_fk: usize,
}

impl Pending {
    fn new(schema: TableSchema) -> Self {
        Self { schema, next_fk: 0 }
    }

    fn next_dependency(&mut self) -> Option<String> {
        let fk = self.schema.foreign_keys.get(self.next_fk)?;
        self.next_fk += 1;
        Some(fk.table.clone())
    }
}

/// Loads tables from a `TableSource` into a `TablePool`.
///
/// A table is loaded at most once per pool. Tables referenced through
/// foreign keys are loaded before the table that references them, so every
/// link can be resolved to a pooled column when it is recorded.
pub struct Loader<'a, S: TableSource + ?Sized> {
    source: &'a S,
}

impl<'a, S: TableSource + ?Sized> Loader<'a, S> {
    pub fn new(source: &'a S) -> Self {
        Self { source }
    }

    pub fn source(&self) -> &'a S {
        self.source
    }

    /// Loads `name` and every table it references.
    ///
    /// Returns the id of the pooled table; a table already in the pool is
    /// returned as is. If any table fails to build, tables loaded before it
    /// stay in the pool and the failing one is discarded.
    pub fn load_table(&self, pool: &mut TablePool, name: &str) -> Result<TableId> {
        if let Some(id) = pool.find(name) {
            return Ok(id);
        }

        let mut stack = vec![Pending::new(self.source.describe(name)?)];
        let mut loading: HashSet<String> = HashSet::new();
        loading.insert(name.to_string());

        while let Some(top) = stack.last_mut() {
            match top.next_dependency() {
                Some(dependency) => {
                    if pool.find(&dependency).is_some() {
                        continue;
                    }
                    if loading.contains(&dependency) {
                        let path = cycle_path(&stack, &dependency);
                        warn!(table = name, %path, "foreign key cycle");
                        return Err(SqlviewError::ForeignKeyCycle { path });
                    }

                    let schema = self.source.describe(&dependency)?;
                    loading.insert(dependency);
                    stack.push(Pending::new(schema));
                }
                None => {
                    let Some(pending) = stack.pop() else { break };
                    loading.remove(&pending.schema.name);
                    let id = self.build(pool, &pending.schema)?;
                    if stack.is_empty() {
                        return Ok(id);
                    }
                }
            }
        }

        Err(SqlviewError::TableNotFound(name.to_string()))
    }

    /// Loads every table the source lists, in source order.
    pub fn load_all(&self, pool: &mut TablePool) -> Result<Vec<TableId>> {
        self.source
            .table_names()?
            .iter()
            .map(|name| self.load_table(pool, name))
            .collect()
    }

    /// Builds the listing of user tables: one TEXT column `name`, one row
    /// per table the source reports.
    pub fn load_table_list(&self, pool: &mut TablePool) -> Result<TableId> {
        if let Some(id) = pool.find(TABLE_LIST_NAME) {
            return Ok(id);
        }

        let names = self.source.table_names()?;
        let table = pool.new_table(TABLE_LIST_NAME, 1);
        table.new_column("name", ValueKind::Text);
        let id = table.id();

        let loaded = names
            .into_iter()
            .try_for_each(|name| table.append_row(&[Value::Text(name)]))
            .map(|()| table.row_count());

        match loaded {
            Ok(rows) => {
                info!(table = TABLE_LIST_NAME, rows, "table list loaded");
                Ok(id)
            }
            Err(err) => {
                pool.discard_last();
                Err(err)
            }
        }
    }

    /// Creates one table from its schema and streams its rows in.
    ///
    /// The schema and its foreign keys are checked before the table is
    /// created; a failure while reading rows discards the table.
    fn build(&self, pool: &mut TablePool, schema: &TableSchema) -> Result<TableId> {
        if let Some(column) = schema.duplicate_column() {
            warn!(table = %schema.name, column, "duplicate column");
            return Err(SqlviewError::DuplicateColumn {
                table: schema.name.clone(),
                column: column.to_string(),
            });
        }

        let links = self.resolve_links(pool, schema)?;

        let table = pool.new_table(&schema.name, schema.col_count());
        for column in &schema.columns {
            let id = table.new_column(&column.name, column.kind);
            table.set_constraints(id, column.not_null, column.primary_key);
        }
        for (column, foreign_key) in links {
            table.set_foreign_key(column, foreign_key);
        }
        let id = table.id();

        let loaded = self
            .source
            .for_each_row(&schema.name, &mut |row| table.append_row(row))
            .map(|()| table.row_count());

        match loaded {
            Ok(rows) => {
                info!(
                    table = %schema.name,
                    %id,
                    rows,
                    columns = schema.col_count(),
                    "table loaded"
                );
                Ok(id)
            }
            Err(err) => {
                warn!(table = %schema.name, error = %err, "table load failed");
                pool.discard_last();
                Err(err)
            }
        }
    }

    /// Maps each foreign key of `schema` to a column position in the table
    /// about to be built and a column of an already pooled table.
    fn resolve_links(
        &self,
        pool: &TablePool,
        schema: &TableSchema,
    ) -> Result<Vec<(ColumnId, ForeignKey)>> {
        let mut links = Vec::with_capacity(schema.foreign_keys.len());

        for fk in &schema.foreign_keys {
            let from = schema
                .columns
                .iter()
                .position(|c| c.name == fk.from)
                .ok_or_else(|| SqlviewError::ColumnNotFound {
                    table: schema.name.clone(),
                    column: fk.from.clone(),
                })?;

            let target_id = pool
                .find(&fk.table)
                .ok_or_else(|| SqlviewError::TableNotFound(fk.table.clone()))?;
            let to = pool
                .table(target_id)
                .and_then(|target| target.column_by_name(&fk.to))
                .ok_or_else(|| SqlviewError::ColumnNotFound {
                    table: fk.table.clone(),
                    column: fk.to.clone(),
                })?;

            links.push((ColumnId::new(from), ForeignKey::new(target_id, to)));
        }

        Ok(links)
    }
}

/// Renders the chain of tables from `dependency` back to itself.
fn cycle_path(stack: &[Pending], dependency: &str) -> String {
    let start = stack
        .iter()
        .position(|p| p.schema.name == dependency)
        .unwrap_or(0);

    let mut names: Vec<&str> = stack[start..]
        .iter()
        .map(|p| p.schema.name.as_str())
        .collect();
    names.push(dependency);
    names.join(" -> ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::PoolConfig;
    use crate::source::MemorySource;

    fn chain_source() -> MemorySource {
        MemorySource::new()
            .with_table(
                TableSchema::builder("c").primary_key("id", ValueKind::Int).build(),
                vec![vec![Value::Int(1)]],
            )
            .with_table(
                TableSchema::builder("b")
                    .primary_key("id", ValueKind::Int)
                    .column("c_id", ValueKind::Int)
                    .foreign_key("c_id", "c", "id")
                    .build(),
                vec![vec![Value::Int(10), Value::Int(1)]],
            )
            .with_table(
                TableSchema::builder("a")
                    .primary_key("id", ValueKind::Int)
                    .column("b_id", ValueKind::Int)
                    .foreign_key("b_id", "b", "id")
                    .build(),
                vec![vec![Value::Int(100), Value::Int(10)]],
            )
    }

    #[test]
    fn test_dependencies_load_first() {
        let source = chain_source();
        let mut pool = TablePool::with_config(PoolConfig::compact());

        let id = Loader::new(&source).load_table(&mut pool, "a").unwrap();

        let order: Vec<_> = pool.tables().map(|t| t.name().to_string()).collect();
        assert_eq!(order, vec!["c", "b", "a"]);
        assert_eq!(id, TableId::new(2));
    }

    #[test]
    fn test_cycle_path_starts_at_repeated_table() {
        let source = MemorySource::new()
            .with_table(
                TableSchema::builder("root")
                    .column("x", ValueKind::Int)
                    .foreign_key("x", "a", "y")
                    .build(),
                vec![],
            )
            .with_table(
                TableSchema::builder("a")
                    .column("y", ValueKind::Int)
                    .foreign_key("y", "b", "z")
                    .build(),
                vec![],
            )
            .with_table(
                TableSchema::builder("b")
                    .column("z", ValueKind::Int)
                    .foreign_key("z", "a", "y")
                    .build(),
                vec![],
            );
        let mut pool = TablePool::with_config(PoolConfig::compact());

        let err = Loader::new(&source).load_table(&mut pool, "root").unwrap_err();
        match err {
            SqlviewError::ForeignKeyCycle { path } => assert_eq!(path, "a -> b -> a"),
            other => panic!("unexpected error: {other}"),
        }
        assert!(pool.is_empty());
    }

    #[test]
    fn test_missing_target_column() {
        let source = MemorySource::new()
            .with_table(
                TableSchema::builder("parent").column("id", ValueKind::Int).build(),
                vec![],
            )
            .with_table(
                TableSchema::builder("child")
                    .column("parent_id", ValueKind::Int)
                    .foreign_key("parent_id", "parent", "uid")
                    .build(),
                vec![],
            );
        let mut pool = TablePool::with_config(PoolConfig::compact());

        let err = Loader::new(&source).load_table(&mut pool, "child").unwrap_err();
        assert!(matches!(
            err,
            SqlviewError::ColumnNotFound { ref table, ref column } if table == "parent" && column == "uid"
        ));
        // The referenced table was loaded and stays pooled
        assert_eq!(pool.table_count(), 1);
        assert!(pool.find("parent").is_some());
    }
}
