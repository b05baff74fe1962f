//! The `scotrack dump` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::Table;

use scotrack_conn::FileConnection;

pub fn execute(store: PathBuf) -> Result<()> {
    let connection = FileConnection::open(&store)?;

    if connection.values().is_empty() {
        println!("Store {} is empty.", store.display());
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec!["Element", "Value"]);
    for (path, value) in connection.values() {
        table.add_row(vec![path.as_str(), value.as_str()]);
    }

    println!("{table}");
    println!("{} elements", connection.values().len());

    Ok(())
}
