use crate::error::{LoggerError, Result};
use std::collections::HashMap;
use std::path::Path;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl FromStr for LogFormat {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pretty" | "text" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            other => Err(LoggerError::Config(format!("Invalid LOG_FORMAT: {}", other))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogSettings {
    pub filter: String,
    pub format: LogFormat,
    pub with_target: bool,
    pub with_line_number: bool,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
            format: LogFormat::Pretty,
            with_target: true,
            with_line_number: true,
        }
    }
}

/// Load settings from the process environment (and `.env` if present)
pub fn load_settings() -> Result<LogSettings> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    load_settings_with(|key| std::env::var(key).ok())
}

/// Load settings from a dotenv file without touching the process environment
pub fn load_settings_from_file(path: impl AsRef<Path>) -> Result<LogSettings> {
    let path = path.as_ref();
    let iter = dotenvy::from_path_iter(path).map_err(|e| {
        LoggerError::Config(format!("Cannot read {}: {}", path.display(), e))
    })?;

    let mut vars = HashMap::new();
    for item in iter {
        let (key, value) =
            item.map_err(|e| LoggerError::Config(format!("Invalid dotenv entry: {}", e)))?;
        vars.insert(key, value);
    }

    load_settings_with(|key| vars.get(key).cloned())
}

/// Load settings through an arbitrary variable lookup
pub fn load_settings_with<F>(lookup: F) -> Result<LogSettings>
where
    F: Fn(&str) -> Option<String>,
{
    let defaults = LogSettings::default();

    let filter = lookup("LOG_FILTER")
        .or_else(|| lookup("RUST_LOG"))
        .unwrap_or(defaults.filter);

    let format = match lookup("LOG_FORMAT") {
        Some(value) => value.parse()?,
        None => defaults.format,
    };

    let with_target = parse_bool(&lookup, "LOG_WITH_TARGET", defaults.with_target)?;
    let with_line_number =
        parse_bool(&lookup, "LOG_WITH_LINE_NUMBER", defaults.with_line_number)?;

    Ok(LogSettings {
        filter,
        format,
        with_target,
        with_line_number,
    })
}

fn parse_bool<F>(lookup: &F, key: &str, default: bool) -> Result<bool>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => Ok(default),
        Some(value) => match value.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" => Ok(false),
            _ => Err(LoggerError::Config(format!("Invalid {}", key))),
        },
    }
}
