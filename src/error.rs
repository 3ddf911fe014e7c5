use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoggerError {
    #[error("Failed to construct logger for {key}: {source}")]
    Construction {
        key: String,
        #[source]
        source: BackendError,
    },

    #[error("Global logger registry already initialized")]
    AlreadyInitialized,

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Tracing subscriber error: {0}")]
    Subscriber(String),
}

/// Error raised by a backend when it cannot hand out a logger.
#[derive(Debug, Clone, Error)]
pub enum BackendError {
    #[error("Backend unavailable: {0}")]
    Unavailable(String),

    #[error("Logger rejected: {0}")]
    Rejected(String),
}

pub type Result<T> = std::result::Result<T, LoggerError>;
