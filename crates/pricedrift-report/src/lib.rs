//! pricedrift-report
//!
//! CSV report streams and run counters for affected subscriptions.

pub mod aggregator;
pub mod error;
pub mod rows;

pub use crate::aggregator::{Aggregator, RowNumbers, RunCounters, RunSummary};
pub use crate::error::ReportError;

pub const ALL_ISSUES_FILE: &str = "all-subscriptions-with-unit-price-change.csv";
pub const OVERCHARGE_FILE: &str = "subscriptions-with-overcharge-2022-issue.csv";
pub const VAT_INCLUSIVE_FILE: &str = "subscriptions-with-VAT-inclusive-issue.csv";

/// Every report file, in the order they are announced.
pub const REPORT_FILES: [&str; 3] = [ALL_ISSUES_FILE, OVERCHARGE_FILE, VAT_INCLUSIVE_FILE];
