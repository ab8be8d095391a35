//! Structured logging setup.
//!
//! `LOG_FORMAT` selects `json` (default) or `text`; `RUST_LOG` sets the
//! filter (default `info`).

use serde::{Deserialize, Serialize};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Json,
    Text,
}

impl LogFormat {
    /// Accepts "json", "text" or "pretty". Anything else is JSON.
    pub fn parse(value: &str) -> Self {
        match value.to_lowercase().as_str() {
            "text" | "pretty" => LogFormat::Text,
            _ => LogFormat::Json,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub format: LogFormat,
    pub level: String,
    pub service: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            format: LogFormat::Json,
            level: "info".to_string(),
            service: None,
        }
    }
}

impl LoggingConfig {
    pub fn from_env() -> Self {
        let format = std::env::var("LOG_FORMAT")
            .map(|value| LogFormat::parse(&value))
            .unwrap_or_default();
        let level = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
        let service = std::env::var("SERVICE_NAME").ok();

        Self {
            format,
            level,
            service,
        }
    }

    pub fn with_service(mut self, service: impl Into<String>) -> Self {
        self.service = Some(service.into());
        self
    }
}

/// Install the global subscriber. Call once at startup.
pub fn init_logging(config: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));
    let registry = tracing_subscriber::registry().with(filter);

    match config.format {
        LogFormat::Text => registry.with(fmt::layer().pretty()).init(),
        LogFormat::Json => registry
            .with(
                fmt::layer()
                    .json()
                    .with_current_span(false)
                    .with_span_list(false),
            )
            .init(),
    }
}
