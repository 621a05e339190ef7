mod loader;
mod memory_source;
mod schema;

pub use loader::*;
pub use memory_source::*;
pub use schema::*;

use crate::common::Result;
use crate::table::Value;

/// Supplier of table metadata and rows.
///
/// A source describes a table before any of its rows are read, then pushes
/// the rows one at a time in source order. Each row holds one value per
/// described column, in column order.
pub trait TableSource {
    /// Returns the names of the user tables, in source order.
    fn table_names(&self) -> Result<Vec<String>>;

    /// Describes the columns and foreign keys of `table`.
    fn describe(&self, table: &str) -> Result<TableSchema>;

    /// Calls `visit` for each row of `table`, stopping at the first error.
    fn for_each_row(
        &self,
        table: &str,
        visit: &mut dyn FnMut(&[Value]) -> Result<()>,
    ) -> Result<()>;
}
