//! Logging utilities.
//!
//! Centralizes logger initialization over the standard `log` facade.

mod init;

pub use init::{init_logging, LoggingConfig};
