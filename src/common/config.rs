/// One kilobyte, decimal
pub const KB: usize = 1000;

/// One megabyte, decimal
pub const MB: usize = 1000 * KB;

/// Default page size of a table's binary payload arena (2 MB)
pub const BIN_DATA_PAGE_SIZE: usize = 2 * MB;

/// Default page size of a table's string payload arena (2 MB)
pub const STR_DATA_PAGE_SIZE: usize = 2 * MB;

/// Default page size of a table's metadata arena (1 KB)
pub const META_DATA_PAGE_SIZE: usize = KB;

/// Default page size of a record's data arena (128 KB)
pub const RECORD_DATA_PAGE_SIZE: usize = 128 * KB;

/// Tables per page of the table pool vector
pub const TABLES_PER_PAGE: usize = 3;

/// Columns per page of a table's column vector
pub const COLUMNS_PER_PAGE: usize = 10;

/// Cells per page of a column's cell vector
pub const CELLS_PER_PAGE: usize = 200;

/// Name of the table listing the tables available in a source
pub const TABLE_LIST_NAME: &str = "Available tables";

/// Sizing of the pages backing every table created by a `TablePool`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolConfig {
    /// Page size in bytes of the binary payload arena
    pub bin_page_size: usize,
    /// Page size in bytes of the string payload arena
    pub str_page_size: usize,
    /// Page size in bytes of the metadata arena
    pub meta_page_size: usize,
    /// Elements per page of the pool's table vector
    pub tables_per_page: usize,
    /// Elements per page of each table's column vector
    pub columns_per_page: usize,
    /// Elements per page of each column's cell vector
    pub cells_per_page: usize,
}

impl PoolConfig {
    /// A configuration with tiny pages, handy for exercising page chaining.
    pub fn compact() -> Self {
        Self {
            bin_page_size: 64,
            str_page_size: 64,
            meta_page_size: 32,
            tables_per_page: 2,
            columns_per_page: 2,
            cells_per_page: 4,
        }
    }
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            bin_page_size: BIN_DATA_PAGE_SIZE,
            str_page_size: STR_DATA_PAGE_SIZE,
            meta_page_size: META_DATA_PAGE_SIZE,
            tables_per_page: TABLES_PER_PAGE,
            columns_per_page: COLUMNS_PER_PAGE,
            cells_per_page: CELLS_PER_PAGE,
        }
    }
}
