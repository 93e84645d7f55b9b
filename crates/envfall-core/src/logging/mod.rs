//! Logging abstractions
//!
//! `Logger` is injected into the resolver; `file_logger` is a global debug log
//! used by code paths that have no logger handle (file store load failures).

mod traits;
mod console;
pub mod file_logger;

pub use traits::{Logger, NoOpLogger, SharedLogger};
pub use console::ConsoleLogger;

pub use file_logger::{
    log, trace, debug, info, warn, error,
    log_file_path, clear_log, LogLevel,
};
