//! Integration tests for tables, columns and cells

use bytes::Bytes;

use sqlview::common::{ColumnId, PoolConfig};
use sqlview::table::{TablePool, Value, ValueKind};

#[test]
fn test_cell_round_trip_by_kind() {
    let mut pool = TablePool::with_config(PoolConfig::compact());
    let table = pool.new_table("mixed", 5);
    let columns = [
        table.new_column("int", ValueKind::Int),
        table.new_column("text", ValueKind::Text),
        table.new_column("null", ValueKind::Null),
        table.new_column("blob", ValueKind::Blob),
        table.new_column("float", ValueKind::Float),
    ];

    let blob = Bytes::from_static(&[0x00, 0xff, 0x10]);
    let row = [
        Value::Int(42),
        Value::from("hello"),
        Value::Null,
        Value::Blob(blob.clone()),
        Value::Float(3.5),
    ];
    table.append_row(&row).unwrap();

    let texts: Vec<_> = columns
        .iter()
        .map(|&c| table.cell_text(c, 0).unwrap())
        .collect();
    assert_eq!(texts, vec!["42", "hello", "NULL", "BLOB", "3.5"]);

    // Raw payloads decode back to the values they came from
    for (&column, value) in columns.iter().zip(&row) {
        let cell = table.cell(column, 0).unwrap();
        assert_eq!(cell.kind(), value.kind());
        assert_eq!(table.cell_value(cell).as_ref(), Some(value));
    }

    let blob_cell = table.cell(columns[3], 0).unwrap();
    assert_eq!(table.cell_raw(blob_cell), Some(&blob[..]));
    assert_eq!(blob_cell.raw_size(), 3);

    let null_cell = table.cell(columns[2], 0).unwrap();
    assert!(null_cell.is_null());
    assert_eq!(table.cell_raw(null_cell), None);
}

#[test]
fn test_counts_after_many_rows() {
    const ROWS: usize = 250;
    const COLS: usize = 4;

    let mut pool = TablePool::with_config(PoolConfig::compact());
    let table = pool.new_table("grid", COLS);
    for c in 0..COLS {
        table.new_column(&format!("c{c}"), ValueKind::Int);
    }

    for r in 0..ROWS {
        let row: Vec<Value> = (0..COLS).map(|c| Value::Int((r * COLS + c) as i64)).collect();
        table.append_row(&row).unwrap();
    }

    assert_eq!(table.row_count(), ROWS);
    assert_eq!(table.col_count(), COLS);
    for column in table.columns() {
        assert_eq!(column.cell_count(), ROWS);
    }

    assert_eq!(table.cell_text(ColumnId::new(2), 100), Some("402"));
    assert_eq!(table.cell_text(ColumnId::new(3), ROWS - 1), Some("999"));
}

#[test]
fn test_column_metadata() {
    let mut pool = TablePool::new();
    let table = pool.new_table("accounts", 2);
    let id = table.new_column("id", ValueKind::from_decltype("INTEGER"));
    let email = table.new_column("email", ValueKind::from_decltype("TEXT"));
    table.set_constraints(id, true, true);
    table.set_constraints(email, true, false);

    let id = table.column_ref(id).unwrap();
    assert_eq!(id.name(), "id");
    assert_eq!(id.kind(), ValueKind::Int);
    assert!(id.is_primary_key() && id.is_not_null() && id.is_read_only());

    let email = table.column_ref(email).unwrap();
    assert_eq!(email.kind(), ValueKind::Text);
    assert!(!email.is_primary_key() && email.is_not_null() && !email.is_read_only());
    assert!(email.foreign_key().is_none());
}

#[test]
fn test_names_live_in_meta_arena() {
    let mut pool = TablePool::with_config(PoolConfig::compact());
    let table = pool.new_table("t", 1);
    table.new_column("a_long_column_name", ValueKind::Text);

    // Name storage does not spill into the cell arenas
    assert_eq!(table.memory().text().used_bytes(), 0);
    assert_eq!(table.memory().bin().used_bytes(), 0);
    assert!(table.memory().meta().used_bytes() >= "t".len() + "a_long_column_name".len());
}
