use rusqlite::Connection;

use crate::error::{Result, StatsError};
use crate::stats::HEADER;

const SCHEMA_VERSION: i64 = 1;

/// `"Date" TEXT NOT NULL, "Mainnet 28 DAU" INTEGER NOT NULL, ...`
fn summary_columns() -> String {
    HEADER
        .iter()
        .enumerate()
        .map(|(i, name)| {
            let ty = if i == 0 { "TEXT" } else { "INTEGER" };
            format!("\"{name}\" {ty} NOT NULL")
        })
        .collect::<Vec<_>>()
        .join(",\n            ")
}

/// Column names double as the sheet header, in sheet order.
pub fn run_migrations(conn: &Connection) -> Result<()> {
    conn.execute_batch(&format!(
        r#"
        CREATE TABLE IF NOT EXISTS schema_version (version INTEGER PRIMARY KEY);
        INSERT OR IGNORE INTO schema_version VALUES (1);

        CREATE TABLE IF NOT EXISTS summary_rows (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            {}
        );
        "#,
        summary_columns()
    ))?;

    let version: i64 = conn.query_row(
        "SELECT version FROM schema_version ORDER BY version DESC LIMIT 1",
        [],
        |row| row.get(0),
    )?;

    tracing::debug!(schema_version = version, "Database initialized");
    if version != SCHEMA_VERSION {
        return Err(StatsError::SchemaVersion {
            found: version,
            expected: SCHEMA_VERSION,
        });
    }

    Ok(())
}
