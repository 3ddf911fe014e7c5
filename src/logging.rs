//! Crate diagnostics and subscriber setup

use crate::config::{LogFormat, LogSettings};
use crate::error::{LoggerError, Result};
use std::fmt::Display;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

/// Measures one operation on one key, logged at debug level when dropped.
///
/// Creating the timer emits nothing, so it can be started under a lock and
/// dropped once the lock is gone.
pub struct Timer {
    start: Instant,
    operation: &'static str,
    key: String,
}

impl Timer {
    pub fn new(operation: &'static str, key: impl Into<String>) -> Self {
        Self {
            start: Instant::now(),
            operation,
            key: key.into(),
        }
    }
}

impl Drop for Timer {
    fn drop(&mut self) {
        let duration_ms = self.start.elapsed().as_millis() as u64;
        tracing::debug!(
            operation = self.operation,
            key = %self.key,
            duration_ms = duration_ms,
            "Operation completed"
        );
    }
}

/// Log a failed operation on `key` with structured context
pub fn log_error(operation: &str, key: &dyn Display, error: &impl std::error::Error) {
    tracing::error!(
        operation = %operation,
        key = %key,
        error = %error,
        error_kind = std::any::type_name_of_val(error),
        "Operation failed"
    );
}

/// Install the global `tracing` subscriber described by `settings`.
///
/// Fails if the filter directive does not parse or a global subscriber is
/// already set.
pub fn init_tracing(settings: &LogSettings) -> Result<()> {
    let filter = EnvFilter::try_new(&settings.filter)
        .map_err(|e| LoggerError::Config(format!("Invalid log filter: {}", e)))?;

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(settings.with_target)
        .with_line_number(settings.with_line_number);

    let result = match settings.format {
        LogFormat::Pretty => builder.try_init(),
        LogFormat::Json => builder.json().try_init(),
    };

    result.map_err(|e| LoggerError::Subscriber(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use std::fmt;
    use std::sync::{Arc, Mutex};
    use tracing::field::{Field, Visit};
    use tracing::{Event, Subscriber};
    use tracing_subscriber::layer::{Context, Layer, SubscriberExt};

    type Fields = BTreeMap<String, String>;

    /// Layer that keeps the fields of every event
    #[derive(Clone, Default)]
    struct FieldCapture {
        events: Arc<Mutex<Vec<Fields>>>,
    }

    struct FieldVisitor<'a>(&'a mut Fields);

    impl Visit for FieldVisitor<'_> {
        fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
            self.0.insert(field.name().to_string(), format!("{:?}", value));
        }

        fn record_str(&mut self, field: &Field, value: &str) {
            self.0.insert(field.name().to_string(), value.to_string());
        }
    }

    impl<S: Subscriber> Layer<S> for FieldCapture {
        fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
            let mut fields = Fields::new();
            event.record(&mut FieldVisitor(&mut fields));
            self.events.lock().unwrap().push(fields);
        }
    }

    fn captured(f: impl FnOnce()) -> Vec<Fields> {
        let capture = FieldCapture::default();
        let subscriber = tracing_subscriber::registry()
            .with(EnvFilter::new("debug"))
            .with(capture.clone());
        tracing::subscriber::with_default(subscriber, f);
        let events = capture.events.lock().unwrap().clone();
        events
    }

    #[test]
    fn test_timer_logs_operation_and_key_on_drop() {
        let events = captured(|| {
            let _timer = Timer::new("test_operation", "some::Type");
        });

        assert_eq!(events.len(), 1);
        assert_eq!(events[0]["operation"], "test_operation");
        assert_eq!(events[0]["key"], "some::Type");
        assert!(events[0].contains_key("duration_ms"));
    }

    #[test]
    fn test_timer_is_silent_until_dropped() {
        let events = captured(|| {
            let timer = Timer::new("test_operation", "some::Type");
            std::mem::forget(timer);
        });
        assert!(events.is_empty());
    }

    #[test]
    fn test_log_error_carries_key_and_error() {
        let err = std::io::Error::other("boom");
        let events = captured(|| log_error("create_logger", &"some::Type", &err));

        assert_eq!(events.len(), 1);
        assert_eq!(events[0]["operation"], "create_logger");
        assert_eq!(events[0]["key"], "some::Type");
        assert_eq!(events[0]["error"], "boom");
        assert_eq!(events[0]["error_kind"], "std::io::error::Error");
    }

    #[test]
    fn test_init_tracing_rejects_bad_filter() {
        let settings = LogSettings {
            filter: "typed_logger=notalevel".to_string(),
            ..LogSettings::default()
        };
        let err = init_tracing(&settings).unwrap_err();
        assert!(matches!(err, LoggerError::Config(_)));
    }
}
