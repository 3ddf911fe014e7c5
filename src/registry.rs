//! Process-wide logger registry

use crate::backend::{BackendFactory, TracingBackend};
use crate::cache::{CacheStats, LoggerCache};
use crate::error::{LoggerError, Result};
use crate::key::TypeKey;
use crate::logger::{LoggerHandle, TypedLogger};
use crate::logging::log_error;
use std::sync::{Arc, OnceLock};

static GLOBAL: OnceLock<LoggerRegistry> = OnceLock::new();

/// Factory side of the host logging contract: hands out loggers by key.
pub trait LoggerSource {
    /// Logger associated with `key`, created on first request
    fn for_key(&self, key: TypeKey) -> Result<LoggerHandle>;

    /// Logger associated with type `T`
    fn for_type<T: ?Sized + 'static>(&self) -> Result<LoggerHandle>
    where
        Self: Sized,
    {
        self.for_key(TypeKey::of::<T>())
    }
}

/// Owns the per-key logger cache and the backend that fills it.
///
/// Most code goes through the process-wide instance ([`LoggerRegistry::global`]
/// or the crate-level [`for_type`]). Standalone registries are useful in
/// tests and when one component wants its own backend.
pub struct LoggerRegistry {
    cache: LoggerCache<TypeKey, TypedLogger>,
    factory: Arc<dyn BackendFactory>,
}

impl LoggerRegistry {
    pub fn new(factory: impl BackendFactory + 'static) -> Self {
        Self::with_factory(Arc::new(factory))
    }

    pub fn with_factory(factory: Arc<dyn BackendFactory>) -> Self {
        Self {
            cache: LoggerCache::new(),
            factory,
        }
    }

    /// The process-wide registry, created over [`TracingBackend`] on first use
    /// unless [`install`](Self::install) ran earlier.
    pub fn global() -> &'static LoggerRegistry {
        GLOBAL.get_or_init(|| {
            tracing::debug!("Initializing global logger registry with tracing backend");
            LoggerRegistry::new(TracingBackend::new())
        })
    }

    /// Make a registry over `factory` the process-wide one.
    ///
    /// Must run before anything touches [`global`](Self::global); afterwards
    /// it returns [`LoggerError::AlreadyInitialized`].
    pub fn install(factory: impl BackendFactory + 'static) -> Result<&'static LoggerRegistry> {
        let mut installed = false;
        let registry = GLOBAL.get_or_init(|| {
            installed = true;
            LoggerRegistry::new(factory)
        });

        if installed {
            tracing::info!("Installed global logger registry");
            Ok(registry)
        } else {
            Err(LoggerError::AlreadyInitialized)
        }
    }

    pub fn is_global_initialized() -> bool {
        GLOBAL.get().is_some()
    }

    /// Number of distinct loggers handed out so far
    pub fn logger_count(&self) -> usize {
        self.cache.len()
    }

    pub fn stats(&self) -> CacheStats {
        self.cache.stats()
    }

    pub fn log_stats(&self) {
        self.cache.log_stats();
    }
}

impl LoggerSource for LoggerRegistry {
    fn for_key(&self, key: TypeKey) -> Result<LoggerHandle> {
        self.cache
            .get_or_create(key, |key| {
                let backend = self.factory.create_logger(key).map_err(|source| {
                    LoggerError::Construction {
                        key: key.to_string(),
                        source,
                    }
                })?;
                Ok(TypedLogger::new(key.clone(), backend))
            })
            .inspect_err(|e| {
                if let LoggerError::Construction { key, source } = e {
                    log_error("create_logger", key, source);
                }
            })
    }
}

/// Logger for type `T` from the process-wide registry
pub fn for_type<T: ?Sized + 'static>() -> Result<LoggerHandle> {
    LoggerRegistry::global().for_type::<T>()
}

/// Logger for `key` from the process-wide registry
pub fn for_key(key: impl Into<TypeKey>) -> Result<LoggerHandle> {
    LoggerRegistry::global().for_key(key.into())
}
