//! Per-type cached loggers over a pluggable logging backend.
//!
//! Ask the registry for a logger scoped to a type and log through it:
//!
//! ```
//! use typed_logger::{log_info, log_warning};
//!
//! struct Downloader;
//!
//! let logger = typed_logger::for_type::<Downloader>().unwrap();
//! log_info!(logger, "fetched {} tiles in {}ms", 12, 340);
//! log_warning!(logger, "retrying {}", "tile 7");
//!
//! // The same instance comes back on every request
//! let again = typed_logger::for_type::<Downloader>().unwrap();
//! assert!(std::sync::Arc::ptr_eq(&logger, &again));
//! ```
//!
//! Message rendering and output belong to the backend. The default backend
//! forwards to `tracing`; tests usually plug in a [`RecordingBackend`].

pub mod backend;
pub mod cache;
pub mod config;
pub mod error;
pub mod key;
pub mod logger;
pub mod logging;
pub mod registry;

pub use backend::{BackendFactory, BackendLog, LogArgs, LogLevel, RecordingBackend, TracingBackend};
pub use cache::{CacheStats, LoggerCache};
pub use error::{BackendError, LoggerError, Result};
pub use key::TypeKey;
pub use logger::{Logger, LoggerHandle, TypedLogger};
pub use registry::{LoggerRegistry, LoggerSource, for_key, for_type};
