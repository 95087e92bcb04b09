use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use rusqlite::Connection;

/// SQLite file name stored inside the application data directory.
pub const DB_FILE_NAME: &str = "contacts.sqlite";

/// Ensure the database file exists beneath `data_dir`, create the key/value
/// table, and return a live connection.
pub fn open_database(data_dir: &Path) -> Result<Connection> {
    fs::create_dir_all(data_dir).context("failed to create data directory")?;

    let conn = Connection::open(data_dir.join(DB_FILE_NAME))
        .context("failed to open SQLite database")?;
    ensure_schema(&conn)?;
    Ok(conn)
}

/// Fresh in-memory database with the schema applied.
pub fn open_in_memory() -> Result<Connection> {
    let conn = Connection::open_in_memory().context("failed to open in-memory database")?;
    ensure_schema(&conn)?;
    Ok(conn)
}

/// Lazily create the single table we need. The whole contact list lives in
/// one row as a JSON document, keyed by name.
pub fn ensure_schema(conn: &Connection) -> Result<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS kv (
            key TEXT PRIMARY KEY,
            value TEXT NOT NULL
        )",
        [],
    )
    .context("failed to create kv table")?;
    Ok(())
}
