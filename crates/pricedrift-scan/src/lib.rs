//! pricedrift-scan
//!
//! Drives the audit across the whole subscription population:
//! count → page listing (oldest page first) → order histories →
//! classification → reports.

pub mod driver;
pub mod error;

pub use crate::driver::{ScanOptions, page_count, run_scan};
pub use crate::error::ScanError;
