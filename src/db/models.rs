use crate::stats::SummaryRow;

pub struct StoredRow {
    pub id: i64,
    pub row: SummaryRow,
}
