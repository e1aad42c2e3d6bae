use rusqlite::{params, Connection};

use crate::error::Result;
use crate::stats::{SummaryRow, HEADER};

fn quoted_header() -> String {
    HEADER
        .iter()
        .map(|name| format!("\"{name}\""))
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn insert_summary_row(conn: &Connection, row: &SummaryRow) -> Result<i64> {
    let [m28, mq, mall, t28, tq, tall] = row.counts().map(|c| c as i64);
    conn.execute(
        &format!(
            "INSERT INTO summary_rows ({}) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            quoted_header()
        ),
        params![row.label, m28, mq, mall, t28, tq, tall],
    )?;
    Ok(conn.last_insert_rowid())
}

#[cfg(test)]
pub fn list_summary_rows(conn: &Connection) -> Result<Vec<super::models::StoredRow>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT id, {} FROM summary_rows ORDER BY id",
        quoted_header()
    ))?;

    let rows = stmt
        .query_map([], |r| {
            let mut counts = [0u64; 6];
            for (i, count) in counts.iter_mut().enumerate() {
                *count = r.get::<_, i64>(i + 2)?.max(0) as u64;
            }
            Ok(super::models::StoredRow {
                id: r.get(0)?,
                row: SummaryRow::build(r.get::<_, String>(1)?, counts),
            })
        })?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(rows)
}

pub fn count_summary_rows(conn: &Connection) -> Result<i64> {
    Ok(conn.query_row("SELECT COUNT(*) FROM summary_rows", [], |row| row.get(0))?)
}
