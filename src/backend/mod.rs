//! Backend logging capability
//!
//! The adapter never formats or routes messages itself. It hands template and
//! arguments to a backend through two narrow traits:
//!
//! - `BackendFactory`: hands out one backend logger per `TypeKey`
//! - `BackendLog`: the leveled-format calls on that logger
//!
//! Implementations shipped here:
//! - `TracingBackend`: production backend that emits `tracing` events
//! - `RecordingBackend`: captures every call, for tests

mod recording;
mod template;
mod tracing_backend;

use crate::error::BackendError;
use crate::key::TypeKey;
use std::error::Error;
use std::fmt;
use std::sync::Arc;

pub use recording::{LogRecord, RecordingBackend};
pub use template::{TemplateError, render_template};
pub use tracing_backend::{TracingBackend, TracingLog};

/// Template arguments, passed through to the backend untouched
pub type LogArgs<'a> = &'a [&'a dyn fmt::Display];

/// Severity of a leveled call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LogLevel {
    Debug,
    Info,
    Warning,
    Error,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warning => "warning",
            LogLevel::Error => "error",
        };
        f.write_str(s)
    }
}

/// A logger instance owned by the backend and bound to one key.
///
/// # Thread Safety
///
/// Handles are shared across threads, so implementations must be
/// `Send + Sync`.
pub trait BackendLog: Send + Sync {
    /// Whether debug output is currently enabled. Must reflect the live
    /// backend state.
    fn is_debug_enabled(&self) -> bool;

    fn debug_format(&self, template: &str, args: LogArgs<'_>);

    fn info_format(&self, template: &str, args: LogArgs<'_>);

    fn warn_format(&self, template: &str, args: LogArgs<'_>);

    fn error_format(&self, template: &str, args: LogArgs<'_>);

    fn error_format_with_cause(
        &self,
        cause: &(dyn Error + 'static),
        template: &str,
        args: LogArgs<'_>,
    );
}

/// Entry point the backend exposes for constructing loggers.
pub trait BackendFactory: Send + Sync {
    fn create_logger(&self, key: &TypeKey) -> Result<Arc<dyn BackendLog>, BackendError>;
}
