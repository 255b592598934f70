//! Logging utilities.
//!
//! Centralizes logger initialization for binaries using this crate. The
//! library itself only speaks through the `log` facade; no backend is
//! imposed on hosts that bring their own.

mod init;

pub use init::{init_logging, LoggingConfig};
