//! Recording backend for tests

use crate::backend::{BackendFactory, BackendLog, LogArgs, LogLevel};
use crate::error::BackendError;
use crate::key::TypeKey;
use dashmap::DashMap;
use std::error::Error;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

/// One captured leveled call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRecord {
    pub logger: String,
    pub level: LogLevel,
    pub template: String,
    pub args: Vec<String>,
    pub cause: Option<String>,
    /// Address of the cause object, to check it arrived without being copied
    pub cause_addr: Option<usize>,
}

#[derive(Debug, Default)]
struct Shared {
    records: Mutex<Vec<LogRecord>>,
    debug_enabled: AtomicBool,
}

/// A backend that captures every call instead of writing anywhere.
///
/// Cloning shares the captured state, so a test can keep one clone and hand
/// another to a registry.
#[derive(Debug, Clone, Default)]
pub struct RecordingBackend {
    shared: Arc<Shared>,
    constructions: Arc<DashMap<TypeKey, usize>>,
    total_constructions: Arc<AtomicUsize>,
    pending_failures: Arc<DashMap<TypeKey, usize>>,
    construction_delay: Option<Duration>,
}

impl RecordingBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sleep inside `create_logger`, widening any construction race
    pub fn with_construction_delay(mut self, delay: Duration) -> Self {
        self.construction_delay = Some(delay);
        self
    }

    /// Make the next `times` constructions for `key` fail
    pub fn fail_times(&self, key: TypeKey, times: usize) {
        self.pending_failures.insert(key, times);
    }

    pub fn set_debug_enabled(&self, enabled: bool) {
        self.shared.debug_enabled.store(enabled, Ordering::SeqCst);
    }

    /// Construction attempts for `key`, failed ones included
    pub fn constructions_for(&self, key: &TypeKey) -> usize {
        self.constructions.get(key).map(|c| *c).unwrap_or(0)
    }

    pub fn total_constructions(&self) -> usize {
        self.total_constructions.load(Ordering::SeqCst)
    }

    pub fn records(&self) -> Vec<LogRecord> {
        match self.shared.records.lock() {
            Ok(records) => records.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn clear(&self) {
        match self.shared.records.lock() {
            Ok(mut records) => records.clear(),
            Err(poisoned) => poisoned.into_inner().clear(),
        }
    }
}

impl BackendFactory for RecordingBackend {
    fn create_logger(&self, key: &TypeKey) -> Result<Arc<dyn BackendLog>, BackendError> {
        *self.constructions.entry(key.clone()).or_insert(0) += 1;
        self.total_constructions.fetch_add(1, Ordering::SeqCst);

        if let Some(delay) = self.construction_delay {
            thread::sleep(delay);
        }

        if let Some(mut remaining) = self.pending_failures.get_mut(key)
            && *remaining > 0
        {
            *remaining -= 1;
            return Err(BackendError::Unavailable(format!(
                "injected failure for {}",
                key
            )));
        }

        Ok(Arc::new(RecordingLog {
            logger: key.as_str().to_string(),
            shared: self.shared.clone(),
        }))
    }
}

struct RecordingLog {
    logger: String,
    shared: Arc<Shared>,
}

impl RecordingLog {
    fn record(
        &self,
        level: LogLevel,
        cause: Option<&(dyn Error + 'static)>,
        template: &str,
        args: LogArgs<'_>,
    ) {
        let record = LogRecord {
            logger: self.logger.clone(),
            level,
            template: template.to_string(),
            args: args.iter().map(|a| a.to_string()).collect(),
            cause: cause.map(|c| c.to_string()),
            cause_addr: cause.map(|c| c as *const dyn Error as *const () as usize),
        };
        match self.shared.records.lock() {
            Ok(mut records) => records.push(record),
            Err(poisoned) => poisoned.into_inner().push(record),
        }
    }
}

impl BackendLog for RecordingLog {
    fn is_debug_enabled(&self) -> bool {
        self.shared.debug_enabled.load(Ordering::SeqCst)
    }

    fn debug_format(&self, template: &str, args: LogArgs<'_>) {
        self.record(LogLevel::Debug, None, template, args);
    }

    fn info_format(&self, template: &str, args: LogArgs<'_>) {
        self.record(LogLevel::Info, None, template, args);
    }

    fn warn_format(&self, template: &str, args: LogArgs<'_>) {
        self.record(LogLevel::Warning, None, template, args);
    }

    fn error_format(&self, template: &str, args: LogArgs<'_>) {
        self.record(LogLevel::Error, None, template, args);
    }

    fn error_format_with_cause(
        &self,
        cause: &(dyn Error + 'static),
        template: &str,
        args: LogArgs<'_>,
    ) {
        self.record(LogLevel::Error, Some(cause), template, args);
    }
}
