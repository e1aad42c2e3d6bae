use chrono::{DateTime, Utc};
use serde_json::Value;

pub const HEADER: [&str; 7] = [
    "Date",
    "Mainnet 28 DAU",
    "Mainnet Quarter",
    "Mainnet All Time",
    "Testnet 28 DAU",
    "Testnet Quarter",
    "Testnet All Time",
];

/// Counts of one network across the three windows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NetworkCounts {
    pub last_28: u64,
    pub quarter: u64,
    pub all_time: u64,
}

/// One appended line of the summary sheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryRow {
    pub label: String,
    pub mainnet: NetworkCounts,
    pub testnet: NetworkCounts,
}

impl SummaryRow {
    /// Counts in sheet order: mainnet 28d, quarter, all time, then testnet.
    pub fn build(label: impl Into<String>, counts: [u64; 6]) -> Self {
        let [m28, mq, mall, t28, tq, tall] = counts;
        Self {
            label: label.into(),
            mainnet: NetworkCounts {
                last_28: m28,
                quarter: mq,
                all_time: mall,
            },
            testnet: NetworkCounts {
                last_28: t28,
                quarter: tq,
                all_time: tall,
            },
        }
    }

    pub fn counts(&self) -> [u64; 6] {
        [
            self.mainnet.last_28,
            self.mainnet.quarter,
            self.mainnet.all_time,
            self.testnet.last_28,
            self.testnet.quarter,
            self.testnet.all_time,
        ]
    }

    pub fn cells(&self) -> Vec<Value> {
        std::iter::once(Value::from(self.label.as_str()))
            .chain(self.counts().into_iter().map(Value::from))
            .collect()
    }
}

pub fn label_for(reference: DateTime<Utc>) -> String {
    reference.format("%Y-%m-%d %H:%M:%S").to_string()
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use serde_json::json;

    use super::*;

    #[test]
    fn build_keeps_positional_order() {
        let row = SummaryRow::build("2024-05-15 00:03:04", [1, 2, 3, 4, 5, 6]);
        assert_eq!(row.mainnet.quarter, 2);
        assert_eq!(row.testnet.last_28, 4);
        assert_eq!(row.counts(), [1, 2, 3, 4, 5, 6]);
        assert_eq!(
            Value::Array(row.cells()),
            json!(["2024-05-15 00:03:04", 1, 2, 3, 4, 5, 6])
        );
        assert_eq!(row.cells().len(), HEADER.len());
    }

    #[test]
    fn label_is_utc_date_time() {
        let reference = Utc.with_ymd_and_hms(2025, 2, 10, 0, 3, 4).unwrap();
        assert_eq!(label_for(reference), "2025-02-10 00:03:04");
    }
}
