use std::process::ExitCode;

use tracing_subscriber::EnvFilter;

use sqlview::source::{Loader, MemorySource, TableSchema};
use sqlview::table::{Record, Table, TablePool, Value, ValueKind};
use sqlview::Result;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    println!("Sqlview - A read-only SQL table browser");
    println!("=======================================\n");

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    let source = demo_source()?;
    let loader = Loader::new(&source);
    let mut pool = TablePool::new();

    // The browser opens on the list of user tables
    let list = loader.load_table_list(&mut pool)?;
    if let Some(table) = pool.table(list) {
        print_table(&pool, table);
    }

    // Loading orders pulls in customers first through its foreign key
    let orders = loader.load_table(&mut pool, "orders")?;
    for table in pool.tables().skip(1) {
        print_table(&pool, table);
    }

    if let Some(table) = pool.table(orders) {
        println!("Record 0 of '{}':", table.name());
        let record = Record::from_row(table, 0)?;
        for (name, value) in record.fields() {
            println!("  {name:>12}: {value}");
        }
    }

    println!("\nLoaded {} tables", pool.table_count());
    Ok(())
}

fn demo_source() -> Result<MemorySource> {
    let mut source = MemorySource::new();

    source.add_table(
        TableSchema::builder("customers")
            .primary_key("id", ValueKind::Int)
            .not_null_column("name", ValueKind::Text)
            .column("balance", ValueKind::Float)
            .build(),
    );
    source.add_table(
        TableSchema::builder("orders")
            .primary_key("id", ValueKind::Int)
            .not_null_column("customer_id", ValueKind::Int)
            .column("note", ValueKind::Text)
            .column("receipt", ValueKind::Blob)
            .foreign_key("customer_id", "customers", "id")
            .build(),
    );

    source
        .insert_row("customers", vec![Value::Int(1), "Ada".into(), Value::Float(120.5)])?
        .insert_row("customers", vec![Value::Int(2), "Brendan".into(), Value::Null])?
        .insert_row("orders", vec![Value::Int(10), Value::Int(1), "first".into(), Value::Null])?
        .insert_row(
            "orders",
            vec![Value::Int(11), Value::Int(2), Value::Null, vec![0xde_u8, 0xad].into()],
        )?;

    Ok(source)
}

fn print_table(pool: &TablePool, table: &Table) {
    println!(
        "{} ({} columns, {} rows)",
        table.name(),
        table.col_count(),
        table.row_count()
    );

    let widths: Vec<usize> = table.columns().map(|c| c.display_width()).collect();

    let header: Vec<String> = table
        .columns()
        .zip(&widths)
        .map(|(column, width)| format!("{:width$}", column.name(), width = width))
        .collect();
    println!("  {}", header.join(" | "));

    for row in 0..table.row_count() {
        let cells: Vec<String> = table
            .columns()
            .zip(&widths)
            .map(|(column, width)| {
                format!("{:width$}", column.cell_text(row).unwrap_or(""), width = width)
            })
            .collect();
        println!("  {}", cells.join(" | "));
    }

    for column in table.columns() {
        if let Some((target, target_column)) = pool.foreign_target(column.column()) {
            println!(
                "  {} -> {}.{}",
                column.name(),
                target.name(),
                target.column_name(target_column)
            );
        }
    }
    println!();
}
