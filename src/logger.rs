//! Leveled call adapter and the host-facing logging contract

use crate::backend::{BackendLog, LogArgs};
use crate::key::TypeKey;
use std::error::Error;
use std::fmt;
use std::sync::Arc;

/// Shared handle to a cached logger
pub type LoggerHandle = Arc<TypedLogger>;

/// Logging interface host code depends on.
///
/// Templates and arguments are handed to the backend untouched; how they are
/// rendered is the backend's business.
///
/// # Example
///
/// ```
/// use typed_logger::{Logger, LoggerRegistry, LoggerSource, RecordingBackend, log_info};
///
/// struct Uploader;
///
/// let backend = RecordingBackend::new();
/// let registry = LoggerRegistry::new(backend.clone());
/// let logger = registry.for_type::<Uploader>().unwrap();
/// log_info!(logger, "uploaded {} bytes", 512);
///
/// assert_eq!(backend.records()[0].args, vec!["512".to_string()]);
/// ```
pub trait Logger: Send + Sync {
    fn is_debug_enabled(&self) -> bool;

    fn debug(&self, template: &str, args: LogArgs<'_>);

    fn info(&self, template: &str, args: LogArgs<'_>);

    fn warning(&self, template: &str, args: LogArgs<'_>);

    fn error(&self, template: &str, args: LogArgs<'_>);

    /// Log an error caused by `cause`
    fn error_with_cause(&self, cause: &(dyn Error + 'static), template: &str, args: LogArgs<'_>);
}

/// A logger bound to one key, wrapping exactly one backend logger.
pub struct TypedLogger {
    key: TypeKey,
    backend: Arc<dyn BackendLog>,
}

impl TypedLogger {
    pub fn new(key: TypeKey, backend: Arc<dyn BackendLog>) -> Self {
        Self { key, backend }
    }

    pub fn key(&self) -> &TypeKey {
        &self.key
    }
}

impl fmt::Debug for TypedLogger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypedLogger").field("key", &self.key).finish()
    }
}

impl Logger for TypedLogger {
    fn is_debug_enabled(&self) -> bool {
        self.backend.is_debug_enabled()
    }

    fn debug(&self, template: &str, args: LogArgs<'_>) {
        self.backend.debug_format(template, args);
    }

    fn info(&self, template: &str, args: LogArgs<'_>) {
        self.backend.info_format(template, args);
    }

    fn warning(&self, template: &str, args: LogArgs<'_>) {
        self.backend.warn_format(template, args);
    }

    fn error(&self, template: &str, args: LogArgs<'_>) {
        self.backend.error_format(template, args);
    }

    fn error_with_cause(&self, cause: &(dyn Error + 'static), template: &str, args: LogArgs<'_>) {
        self.backend.error_format_with_cause(cause, template, args);
    }
}

/// Convenience macros that collect trailing arguments into the slice the
/// leveled calls take.
#[macro_export]
macro_rules! log_debug {
    ($logger:expr, $template:expr $(, $arg:expr)* $(,)?) => {
        $crate::Logger::debug(&*$logger, $template, &[$(&$arg as &dyn ::std::fmt::Display),*])
    };
}

#[macro_export]
macro_rules! log_info {
    ($logger:expr, $template:expr $(, $arg:expr)* $(,)?) => {
        $crate::Logger::info(&*$logger, $template, &[$(&$arg as &dyn ::std::fmt::Display),*])
    };
}

#[macro_export]
macro_rules! log_warning {
    ($logger:expr, $template:expr $(, $arg:expr)* $(,)?) => {
        $crate::Logger::warning(&*$logger, $template, &[$(&$arg as &dyn ::std::fmt::Display),*])
    };
}

/// `log_error!(logger, "template", args..)` or
/// `log_error!(logger, cause = err, "template", args..)`
#[macro_export]
macro_rules! log_error {
    ($logger:expr, cause = $cause:expr, $template:expr $(, $arg:expr)* $(,)?) => {
        $crate::Logger::error_with_cause(
            &*$logger,
            $cause,
            $template,
            &[$(&$arg as &dyn ::std::fmt::Display),*],
        )
    };
    ($logger:expr, $template:expr $(, $arg:expr)* $(,)?) => {
        $crate::Logger::error(&*$logger, $template, &[$(&$arg as &dyn ::std::fmt::Display),*])
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{BackendFactory, LogLevel, RecordingBackend};

    fn logger_for(backend: &RecordingBackend, name: &'static str) -> TypedLogger {
        let key = TypeKey::named(name);
        let log = backend.create_logger(&key).unwrap();
        TypedLogger::new(key, log)
    }

    #[test]
    fn test_typed_logger_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<TypedLogger>();
    }

    #[test]
    fn test_debug_forwards_template_and_args_verbatim() {
        let backend = RecordingBackend::new();
        let logger = logger_for(&backend, "fmt");

        logger.debug("x=%d", &[&5]);

        let records = backend.records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].level, LogLevel::Debug);
        assert_eq!(records[0].template, "x=%d");
        assert_eq!(records[0].args, vec!["5".to_string()]);
        assert_eq!(records[0].cause, None);
    }

    #[test]
    fn test_each_level_maps_to_its_backend_call() {
        let backend = RecordingBackend::new();
        let logger = logger_for(&backend, "levels");

        logger.debug("d", &[]);
        logger.info("i", &[]);
        logger.warning("w", &[]);
        logger.error("e", &[]);

        let levels: Vec<LogLevel> = backend.records().iter().map(|r| r.level).collect();
        assert_eq!(
            levels,
            vec![LogLevel::Debug, LogLevel::Info, LogLevel::Warning, LogLevel::Error]
        );
    }

    #[test]
    fn test_error_with_cause_forwards_same_cause_object() {
        let backend = RecordingBackend::new();
        let logger = logger_for(&backend, "cause");
        let cause = std::io::Error::other("connection reset");

        logger.error_with_cause(&cause, "request {} failed", &[&42]);

        let records = backend.records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].level, LogLevel::Error);
        assert_eq!(records[0].template, "request {} failed");
        assert_eq!(records[0].args, vec!["42".to_string()]);
        assert_eq!(records[0].cause.as_deref(), Some("connection reset"));
        assert_eq!(records[0].cause_addr, Some(&cause as *const _ as *const () as usize));
    }

    #[test]
    fn test_debug_enabled_is_not_cached() {
        let backend = RecordingBackend::new();
        let logger = logger_for(&backend, "toggle");

        assert!(!logger.is_debug_enabled());
        backend.set_debug_enabled(true);
        assert!(logger.is_debug_enabled());
        backend.set_debug_enabled(false);
        assert!(!logger.is_debug_enabled());
    }

    #[test]
    fn test_macros_build_argument_slices() {
        let backend = RecordingBackend::new();
        let logger = Arc::new(logger_for(&backend, "macros"));
        let cause = std::io::Error::other("eof");

        crate::log_debug!(logger, "no args");
        crate::log_info!(logger, "{} + {}", 1, 2);
        crate::log_warning!(logger, "{}", "slow",);
        crate::log_error!(logger, "bad {}", 'x');
        crate::log_error!(logger, cause = &cause, "read {}", "config.toml");

        let records = backend.records();
        assert_eq!(records.len(), 5);
        assert!(records[0].args.is_empty());
        assert_eq!(records[1].args, vec!["1".to_string(), "2".to_string()]);
        assert_eq!(records[2].args, vec!["slow".to_string()]);
        assert_eq!(records[3].cause, None);
        assert_eq!(records[4].cause.as_deref(), Some("eof"));
    }

    #[test]
    fn test_usable_as_trait_object() {
        let backend = RecordingBackend::new();
        let logger: Box<dyn Logger> = Box::new(logger_for(&backend, "dyn"));
        logger.info("via dyn", &[]);
        assert_eq!(backend.records()[0].logger, "dyn");
    }
}
