mod cell;
mod column;
mod pool;
mod record;
mod table;
mod value;

pub use cell::Cell;
pub use column::{Column, ColumnRef};
pub use pool::TablePool;
pub use record::{Field, Record};
pub use table::{Table, TableMemory};
pub use value::{Value, ValueKind};
