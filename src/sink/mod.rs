use std::future::Future;
use std::sync::Arc;

use crate::config::{Config, SinkKind};
use crate::error::{Result, StatsError};
use crate::report::Reporter;
use crate::stats::SummaryRow;

pub mod database;
pub mod sheets;
pub mod workbook;

pub use database::DatabaseSink;
pub use sheets::SheetsSink;
pub use workbook::WorkbookSink;

/// Destination of summary rows. Appends only; nothing is read back to
/// influence later counts.
pub trait Sink {
    fn append(&self, row: &SummaryRow) -> impl Future<Output = Result<()>> + Send;
}

/// The sink selected for this deployment.
pub enum AnySink {
    Workbook(WorkbookSink),
    Database(DatabaseSink),
    Sheets(SheetsSink),
}

impl AnySink {
    pub fn from_config(config: &Config, reporter: Arc<dyn Reporter>) -> Result<Self> {
        match config.sink {
            SinkKind::Workbook => Ok(Self::Workbook(WorkbookSink::new(
                &config.workbook_path,
                reporter,
            ))),
            SinkKind::Database => Ok(Self::Database(DatabaseSink::open(
                &config.database_path,
                reporter,
            )?)),
            SinkKind::Sheets => {
                let sheets = config.sheets.as_ref().ok_or_else(|| {
                    StatsError::Config("sheets sink selected without sheets settings".into())
                })?;
                Ok(Self::Sheets(SheetsSink::new(
                    sheets,
                    config.api.request_timeout,
                    reporter,
                )?))
            }
        }
    }
}

impl Sink for AnySink {
    async fn append(&self, row: &SummaryRow) -> Result<()> {
        match self {
            AnySink::Workbook(sink) => sink.append(row).await,
            AnySink::Database(sink) => sink.append(row).await,
            AnySink::Sheets(sink) => sink.append(row).await,
        }
    }
}
