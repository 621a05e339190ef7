use crate::table::ValueKind;

/// Declaration of a single column as reported by a source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSchema {
    /// Column name
    pub name: String,

    /// Declared value kind
    pub kind: ValueKind,

    /// Whether the column rejects NULL values
    pub not_null: bool,

    /// Whether the column is part of the primary key
    pub primary_key: bool,
}

impl ColumnSchema {
    /// Creates a nullable, non-key column.
    pub fn new(name: impl Into<String>, kind: ValueKind) -> Self {
        Self {
            name: name.into(),
            kind,
            not_null: false,
            primary_key: false,
        }
    }
}

/// A foreign key: `from` in the described table references `to` in `table`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForeignKeySchema {
    pub from: String,
    pub table: String,
    pub to: String,
}

impl ForeignKeySchema {
    pub fn new(from: impl Into<String>, table: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            table: table.into(),
            to: to.into(),
        }
    }
}

/// Everything a source reports about one table before its rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSchema {
    pub name: String,
    pub columns: Vec<ColumnSchema>,
    pub foreign_keys: Vec<ForeignKeySchema>,
}

impl TableSchema {
    /// Creates a schema builder for fluent construction.
    pub fn builder(name: impl Into<String>) -> TableSchemaBuilder {
        TableSchemaBuilder::new(name)
    }

    /// Returns the number of columns.
    pub fn col_count(&self) -> usize {
        self.columns.len()
    }

    /// Returns the column named `name`.
    pub fn column(&self, name: &str) -> Option<&ColumnSchema> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Returns the referenced table names, in declaration order, without
    /// repeats.
    pub fn referenced_tables(&self) -> Vec<&str> {
        let mut tables: Vec<&str> = Vec::new();
        for fk in &self.foreign_keys {
            if !tables.contains(&fk.table.as_str()) {
                tables.push(&fk.table);
            }
        }
        tables
    }

    /// Returns the first column name that appears more than once.
    pub fn duplicate_column(&self) -> Option<&str> {
        self.columns.iter().enumerate().find_map(|(i, col)| {
            self.columns[..i]
                .iter()
                .any(|prev| prev.name == col.name)
                .then_some(col.name.as_str())
        })
    }
}

/// Builder for constructing table schemas fluently.
pub struct TableSchemaBuilder {
    schema: TableSchema,
}

impl TableSchemaBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            schema: TableSchema {
                name: name.into(),
                columns: Vec::new(),
                foreign_keys: Vec::new(),
            },
        }
    }

    /// Adds a nullable column.
    pub fn column(mut self, name: impl Into<String>, kind: ValueKind) -> Self {
        self.schema.columns.push(ColumnSchema::new(name, kind));
        self
    }

    /// Adds a non-nullable column.
    pub fn not_null_column(mut self, name: impl Into<String>, kind: ValueKind) -> Self {
        let mut column = ColumnSchema::new(name, kind);
        column.not_null = true;
        self.schema.columns.push(column);
        self
    }

    /// Adds a non-nullable primary key column.
    pub fn primary_key(mut self, name: impl Into<String>, kind: ValueKind) -> Self {
        let mut column = ColumnSchema::new(name, kind);
        column.not_null = true;
        column.primary_key = true;
        self.schema.columns.push(column);
        self
    }

    /// Adds a column with explicit flags.
    pub fn add_column(mut self, column: ColumnSchema) -> Self {
        self.schema.columns.push(column);
        self
    }

    /// Declares that `from` references column `to` of `table`.
    pub fn foreign_key(
        mut self,
        from: impl Into<String>,
        table: impl Into<String>,
        to: impl Into<String>,
    ) -> Self {
        self.schema
            .foreign_keys
            .push(ForeignKeySchema::new(from, table, to));
        self
    }

    pub fn build(self) -> TableSchema {
        self.schema
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn orders_schema() -> TableSchema {
        TableSchema::builder("orders")
            .primary_key("id", ValueKind::Int)
            .not_null_column("customer_id", ValueKind::Int)
            .column("seller_id", ValueKind::Int)
            .column("note", ValueKind::Text)
            .foreign_key("customer_id", "customers", "id")
            .foreign_key("seller_id", "customers", "id")
            .build()
    }

    #[test]
    fn test_builder_flags() {
        let schema = orders_schema();
        assert_eq!(schema.col_count(), 4);

        let id = schema.column("id").unwrap();
        assert!(id.primary_key && id.not_null);

        let note = schema.column("note").unwrap();
        assert!(!note.primary_key && !note.not_null);
    }

    #[test]
    fn test_referenced_tables_are_deduplicated() {
        assert_eq!(orders_schema().referenced_tables(), vec!["customers"]);
    }

    #[test]
    fn test_duplicate_column() {
        assert_eq!(orders_schema().duplicate_column(), None);

        let schema = TableSchema::builder("t")
            .column("a", ValueKind::Int)
            .column("b", ValueKind::Int)
            .column("a", ValueKind::Text)
            .build();
        assert_eq!(schema.duplicate_column(), Some("a"));
    }
}
