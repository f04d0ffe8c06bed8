//! pricedrift-core
//!
//! Pure domain types and the unit-price drift classifier.
//! No HTTP or file I/O — this is the shared vocabulary of the audit.

pub mod classify;
pub mod error;
pub mod links;
pub mod models;
pub mod money;

pub use crate::classify::{ClassifyOptions, classify};
pub use crate::error::CoreError;
