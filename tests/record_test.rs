//! Integration tests for records built from table rows

use sqlview::common::{PoolConfig, SqlviewError};
use sqlview::source::{Loader, MemorySource, TableSchema};
use sqlview::table::{Record, TablePool, Value, ValueKind};

fn load_people(pool: &mut TablePool) -> sqlview::TableId {
    let source = MemorySource::new().with_table(
        TableSchema::builder("people")
            .primary_key("id", ValueKind::Int)
            .column("name", ValueKind::Text)
            .column("height", ValueKind::Float)
            .column("photo", ValueKind::Blob)
            .build(),
        vec![
            vec![Value::Int(1), "Grace".into(), Value::Float(1.6), Value::Null],
            vec![Value::Int(2), Value::Null, Value::Float(2.0), vec![1u8, 2, 3].into()],
        ],
    );
    Loader::new(&source).load_table(pool, "people").unwrap()
}

#[test]
fn test_record_mirrors_row() {
    let mut pool = TablePool::with_config(PoolConfig::compact());
    let id = load_people(&mut pool);
    let table = pool.table(id).unwrap();

    let record = Record::from_row(table, 1).unwrap();
    assert_eq!(record.field_count(), 4);

    let fields: Vec<_> = record.fields().collect();
    assert_eq!(
        fields,
        vec![
            ("id", "2"),
            ("name", "NULL"),
            ("height", "2.0"),
            ("photo", "BLOB")
        ]
    );
    assert_eq!(record.field("name"), Some("NULL"));
    assert_eq!(record.field("missing"), None);
    assert_eq!(record.field_at(3).unwrap().kind(), ValueKind::Blob);
}

#[test]
fn test_record_outlives_pool() {
    let record = {
        let mut pool = TablePool::new();
        let id = load_people(&mut pool);
        Record::from_row(pool.table(id).unwrap(), 0).unwrap()
    };

    assert_eq!(record.field("name"), Some("Grace"));
    assert_eq!(record.field("height"), Some("1.6"));
}

#[test]
fn test_record_row_out_of_range() {
    let mut pool = TablePool::with_config(PoolConfig::compact());
    let id = load_people(&mut pool);

    let err = Record::from_row(pool.table(id).unwrap(), 2).unwrap_err();
    assert!(matches!(
        err,
        SqlviewError::RowOutOfRange {
            row: 2,
            row_count: 2,
            ..
        }
    ));
}
