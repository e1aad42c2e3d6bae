use std::sync::Arc;

use crate::db::queries::{count_summary_rows, insert_summary_row};
use crate::db::{create_pool, DbPool};
use crate::error::Result;
use crate::report::Reporter;
use crate::stats::SummaryRow;

use super::Sink;

/// SQLite copy of the summary sheet. The table is created on first open and
/// rows are appended on every run.
pub struct DatabaseSink {
    pool: DbPool,
    path: String,
    reporter: Arc<dyn Reporter>,
}

impl DatabaseSink {
    pub fn open(path: &str, reporter: Arc<dyn Reporter>) -> Result<Self> {
        if std::path::Path::new(path).exists() {
            reporter.info(&format!("Database {path} exists. Opening..."));
        } else {
            reporter.info(&format!("Database {path} not found. Creating..."));
        }

        Ok(Self {
            pool: create_pool(path)?,
            path: path.to_string(),
            reporter,
        })
    }

    #[cfg(test)]
    pub fn pool(&self) -> &DbPool {
        &self.pool
    }
}

impl Sink for DatabaseSink {
    async fn append(&self, row: &SummaryRow) -> Result<()> {
        self.reporter
            .info(&format!("Appending new data row for date: {}", row.label));

        let conn = self.pool.get()?;
        insert_summary_row(&conn, row)?;
        let total = count_summary_rows(&conn)?;

        self.reporter.success(&format!(
            "Database updated successfully at {} ({total} row(s)).",
            self.path
        ));
        Ok(())
    }
}
