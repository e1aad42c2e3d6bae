pub mod counter;
pub mod messages;
pub mod row;
pub mod windows;

pub use counter::{ContractCounter, Network};
pub use row::{label_for, NetworkCounts, SummaryRow, HEADER};
pub use windows::{at_run_time, windows, TimeRange, Windows};
