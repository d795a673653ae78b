//! # Sheaf Common
//!
//! Shared functionality for the sheaf crates.
//!
//! This crate provides the logging setup used by applications embedding the
//! sheaf error reporting crates, plus test helpers shared by their test
//! suites behind the `testing` feature.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod logging;

#[cfg(any(test, feature = "testing"))]
pub mod test_utils;

pub use logging::{init_logging, LogFormat, LoggingConfig, LoggingError};
