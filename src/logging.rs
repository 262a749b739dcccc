//! Structured logging through `tracing`.
//!
//! `RUST_LOG` wins over the configured filter when set. Initialization is
//! idempotent: the first call installs the subscriber, later calls are ignored.

use serde::{Deserialize, Serialize};
use std::sync::Once;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub default_level: LogLevel,
    pub module_filters: Vec<(String, LogLevel)>,
    pub show_targets: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            default_level: LogLevel::Info,
            module_filters: vec![
                ("haunted_castle_lib::audio::cache".to_string(), LogLevel::Info),
                ("haunted_castle_lib::ai".to_string(), LogLevel::Warn),
            ],
            show_targets: true,
        }
    }
}

impl LoggingConfig {
    pub fn to_env_filter_string(&self) -> String {
        let mut parts = vec![self.default_level.as_str().to_string()];
        for (module, level) in &self.module_filters {
            parts.push(format!("{}={}", module, level.as_str()));
        }
        parts.join(",")
    }
}

static TRACING_INIT: Once = Once::new();

pub fn init_tracing_default() {
    init_tracing(&LoggingConfig::default());
}

/// First call wins
pub fn init_tracing(config: &LoggingConfig) {
    let filter_str = config.to_env_filter_string();
    let show_targets = config.show_targets;
    TRACING_INIT.call_once(move || {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&filter_str));

        let subscriber = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(show_targets)
            .with_thread_ids(false)
            .compact();

        // A host application may already own the global subscriber
        let _ = subscriber.try_init();
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_filter_string() {
        let config = LoggingConfig {
            default_level: LogLevel::Debug,
            module_filters: vec![("haunted_castle_lib::ai".into(), LogLevel::Error)],
            show_targets: false,
        };
        assert_eq!(
            config.to_env_filter_string(),
            "debug,haunted_castle_lib::ai=error"
        );
    }

    #[test]
    fn test_init_is_idempotent() {
        init_tracing_default();
        init_tracing(&LoggingConfig::default());
    }
}
