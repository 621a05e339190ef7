//! Sqlview - The in-memory data model of a read-only SQL table browser
//!
//! This crate holds query results in memory so a terminal front end can show
//! them column by column. Tables are loaded once from a source, never edited
//! in place, and live until their pool is dropped.
//!
//! # Architecture
//!
//! The crate is organized into several layers:
//!
//! - **Memory** (`memory`): Paged storage that never moves what it holds
//!   - `Arena`: Bump allocator over a chain of fixed-size byte pages
//!   - `Vector`: Growable sequence of fixed-capacity pages with seek and a cursor
//!   - `VectorIter`: Forward cursor over a `Vector`
//!
//! - **Tables** (`table`): The column-oriented data model
//!   - `TablePool`: Owns every loaded table
//!   - `Table`: Named columns plus the arenas their cells point into
//!   - `Column`/`Cell`: Per-column metadata and per-value display strings
//!   - `Record`: One row viewed as name/value pairs
//!
//! - **Sources** (`source`): Where tables come from
//!   - `TableSource`: Describes tables and pushes their rows
//!   - `Loader`: Loads tables and the tables they reference, in dependency order
//!   - `MemorySource`: A source backed by in-memory rows
//!
//! # Example
//!
//! ```rust
//! use sqlview::source::{Loader, MemorySource, TableSchema};
//! use sqlview::table::{TablePool, Value, ValueKind};
//!
//! let source = MemorySource::new().with_table(
//!     TableSchema::builder("users")
//!         .primary_key("id", ValueKind::Int)
//!         .column("name", ValueKind::Text)
//!         .build(),
//!     vec![vec![Value::Int(1), "ada".into()]],
//! );
//!
//! let mut pool = TablePool::new();
//! let id = Loader::new(&source).load_table(&mut pool, "users").unwrap();
//!
//! let table = pool.table(id).unwrap();
//! assert_eq!(table.row_count(), 1);
//! let names: Vec<_> = table.columns().map(|c| c.name()).collect();
//! assert_eq!(names, vec!["id", "name"]);
//! ```

pub mod common;
pub mod memory;
pub mod source;
pub mod table;

// Re-export commonly used types at the crate root
pub use common::{ColumnId, ForeignKey, PoolConfig, Result, SqlviewError, TableId};
