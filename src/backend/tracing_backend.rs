//! Tracing library backend

use crate::backend::{BackendFactory, BackendLog, LogArgs, LogLevel, render_template};
use crate::error::BackendError;
use crate::key::TypeKey;
use std::error::Error;
use std::sync::Arc;
use tracing::level_filters::LevelFilter;
use tracing_log::AsTrace;
use tracing_log::log;

/// Backend factory that delegates to the `tracing` crate.
///
/// Each logger emits events whose target is its key name, so host filters
/// select loggers by type path the same way they select modules:
/// `info,my_app::net=debug` turns on debug output for every logger keyed
/// under `my_app::net`, and `is_debug_enabled` answers accordingly.
///
/// Events travel as `log` records handed straight to the current `tracing`
/// dispatcher (no global `log` logger is needed). `tracing-subscriber`'s fmt
/// layer shows them under their original target.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingBackend;

impl TracingBackend {
    pub fn new() -> Self {
        Self
    }
}

impl BackendFactory for TracingBackend {
    fn create_logger(&self, key: &TypeKey) -> Result<Arc<dyn BackendLog>, BackendError> {
        Ok(Arc::new(TracingLog::new(key.as_str())))
    }
}

/// A `tracing`-backed logger bound to one key.
#[derive(Debug, Clone)]
pub struct TracingLog {
    name: String,
}

impl TracingLog {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether the current subscriber accepts `level` for this logger's target
    fn enabled(&self, level: log::Level) -> bool {
        let metadata = log::Metadata::builder()
            .level(level)
            .target(&self.name)
            .build();
        let metadata = metadata.as_trace();

        if *metadata.level() > LevelFilter::current() {
            return false;
        }
        tracing::dispatcher::get_default(|dispatch| dispatch.enabled(&metadata))
    }

    fn emit(
        &self,
        level: LogLevel,
        cause: Option<&(dyn Error + 'static)>,
        template: &str,
        args: LogArgs<'_>,
    ) {
        let level = to_log_level(level);
        if !self.enabled(level) {
            return;
        }

        // Bad templates are still logged, raw, so the event is not lost
        let mut message = match render_template(template, args) {
            Ok(message) => message,
            Err(e) => format!("{} [format error: {}]", template, e),
        };

        let mut source = cause;
        while let Some(err) = source {
            message.push_str(": ");
            message.push_str(&err.to_string());
            source = err.source();
        }

        let _ = tracing_log::format_trace(
            &log::Record::builder()
                .args(format_args!("{}", message))
                .level(level)
                .target(&self.name)
                .build(),
        );
    }
}

fn to_log_level(level: LogLevel) -> log::Level {
    match level {
        LogLevel::Debug => log::Level::Debug,
        LogLevel::Info => log::Level::Info,
        LogLevel::Warning => log::Level::Warn,
        LogLevel::Error => log::Level::Error,
    }
}

impl BackendLog for TracingLog {
    fn is_debug_enabled(&self) -> bool {
        self.enabled(log::Level::Debug)
    }

    fn debug_format(&self, template: &str, args: LogArgs<'_>) {
        self.emit(LogLevel::Debug, None, template, args);
    }

    fn info_format(&self, template: &str, args: LogArgs<'_>) {
        self.emit(LogLevel::Info, None, template, args);
    }

    fn warn_format(&self, template: &str, args: LogArgs<'_>) {
        self.emit(LogLevel::Warning, None, template, args);
    }

    fn error_format(&self, template: &str, args: LogArgs<'_>) {
        self.emit(LogLevel::Error, None, template, args);
    }

    fn error_format_with_cause(
        &self,
        cause: &(dyn Error + 'static),
        template: &str,
        args: LogArgs<'_>,
    ) {
        self.emit(LogLevel::Error, Some(cause), template, args);
    }
}
