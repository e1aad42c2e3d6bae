use std::path::PathBuf;
use std::sync::Arc;

use umya_spreadsheet::{Spreadsheet, Worksheet};

use crate::error::{Result, StatsError};
use crate::report::Reporter;
use crate::stats::{SummaryRow, HEADER};

use super::Sink;

pub const SHEET_NAME: &str = "Sheet1";

/// Local `.xlsx` workbook. Loaded if it exists, otherwise created with the
/// header row; each append adds one row and writes the file back.
pub struct WorkbookSink {
    path: PathBuf,
    reporter: Arc<dyn Reporter>,
}

impl WorkbookSink {
    pub fn new(path: impl Into<PathBuf>, reporter: Arc<dyn Reporter>) -> Self {
        Self {
            path: path.into(),
            reporter,
        }
    }

    fn load(&self) -> Result<Spreadsheet> {
        if self.path.exists() {
            self.reporter.info("Excel file exists. Loading workbook...");
            umya_spreadsheet::reader::xlsx::read(&self.path)
                .map_err(|e| StatsError::Workbook(format!("reading {}: {e}", self.path.display())))
        } else {
            self.reporter
                .info("Excel file not found. Creating new workbook...");
            Ok(umya_spreadsheet::new_file_empty_worksheet())
        }
    }

    fn save(&self, book: &Spreadsheet) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .map_err(|e| StatsError::Workbook(format!("creating {}: {e}", parent.display())))?;
        }
        umya_spreadsheet::writer::xlsx::write(book, &self.path)
            .map_err(|e| StatsError::Workbook(format!("writing {}: {e}", self.path.display())))
    }
}

fn sheet_mut(book: &mut Spreadsheet) -> Result<&mut Worksheet> {
    if book.get_sheet_by_name(SHEET_NAME).is_none() {
        book.new_sheet(SHEET_NAME)
            .map_err(|e| StatsError::Workbook(e.to_string()))?;
    }
    book.get_sheet_by_name_mut(SHEET_NAME)
        .ok_or_else(|| StatsError::Workbook(format!("missing worksheet {SHEET_NAME}")))
}

fn write_header(sheet: &mut Worksheet) {
    for (col, name) in (1u32..).zip(HEADER) {
        sheet.get_cell_mut((col, 1)).set_value_string(name);
    }
}

fn write_row(sheet: &mut Worksheet, row_index: u32, row: &SummaryRow) {
    sheet
        .get_cell_mut((1, row_index))
        .set_value_string(row.label.as_str());
    for (col, count) in (2u32..).zip(row.counts()) {
        sheet
            .get_cell_mut((col, row_index))
            .set_value_number(count as f64);
    }
}

impl Sink for WorkbookSink {
    async fn append(&self, row: &SummaryRow) -> Result<()> {
        let mut book = self.load()?;
        let sheet = sheet_mut(&mut book)?;

        if sheet.get_highest_row() == 0 {
            write_header(sheet);
        }
        let next = sheet.get_highest_row() + 1;

        self.reporter
            .info(&format!("Appending new data row for date: {}", row.label));
        write_row(sheet, next, row);

        self.save(&book)?;
        self.reporter.success(&format!(
            "Excel sheet updated successfully and saved to {}.",
            self.path.display()
        ));
        Ok(())
    }
}
