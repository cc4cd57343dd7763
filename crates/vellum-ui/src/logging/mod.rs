//! Logging utilities.
//!
//! Logger initialization lives here; everything else in the crate logs
//! through the `log` facade and never assumes a backend.

mod init;

pub use init::{DEFAULT_FILTER, LoggingConfig, init_logging};
