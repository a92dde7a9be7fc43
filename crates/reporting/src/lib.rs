//! Party reporting: date windows and aggregate reports.

pub mod range;
pub mod report;

pub use range::DateRange;
pub use report::{build_report, DurationBucket, RangeCounts, Report, ReportTotals};
