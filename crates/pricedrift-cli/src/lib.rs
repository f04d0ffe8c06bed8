//! pricedrift-cli library root.
//!
//! Exposes argument parsing so integration tests can exercise it without
//! spawning the binary.

pub mod args;
