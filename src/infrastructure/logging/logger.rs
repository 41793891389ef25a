use anyhow::Result;
use std::io;
use tracing::{Level, Subscriber};
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

use crate::domain::models::config::LogConfig;

/// Output format selected by `logging.format`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// One JSON object per line
    Json,
    /// Multi-line human format
    Pretty,
    /// Single-line text
    Compact,
}

impl LogFormat {
    /// Interpret a configured format name; unknown names fall back to compact text
    pub fn parse(format: &str) -> Self {
        match format.trim().to_lowercase().as_str() {
            "json" => Self::Json,
            "pretty" => Self::Pretty,
            _ => Self::Compact,
        }
    }
}

/// Install the global subscriber described by `config`.
///
/// `RUST_LOG` directives refine the configured level. Fails if a global
/// subscriber is already installed.
pub fn init(config: &LogConfig) -> Result<()> {
    let default_level = parse_log_level(&config.level)?;

    let env_filter = EnvFilter::builder()
        .with_default_directive(default_level.into())
        .from_env_lossy();

    let format = LogFormat::parse(&config.format);
    match format {
        LogFormat::Json => {
            let layer = tracing_subscriber::fmt::layer()
                .json()
                .with_writer(io::stderr)
                .with_current_span(true)
                .with_span_list(true)
                .with_target(true)
                .with_filter(env_filter);

            tracing_subscriber::registry().with(layer).try_init()?;
        }
        LogFormat::Pretty => {
            let layer = tracing_subscriber::fmt::layer()
                .pretty()
                .with_writer(io::stderr)
                .with_target(true)
                .with_file(true)
                .with_line_number(true)
                .with_span_events(FmtSpan::CLOSE)
                .with_filter(env_filter);

            tracing_subscriber::registry().with(layer).try_init()?;
        }
        LogFormat::Compact => {
            let layer = tracing_subscriber::fmt::layer()
                .compact()
                .with_writer(io::stderr)
                .with_target(true)
                .with_filter(env_filter);

            tracing_subscriber::registry().with(layer).try_init()?;
        }
    }

    tracing::debug!(level = %default_level, format = ?format, "logger initialized");
    Ok(())
}

/// Stderr subscriber used before configuration is available
pub fn bootstrap_subscriber() -> impl Subscriber + Send + Sync {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
}

/// Parse log level string to Level; empty means `info`
fn parse_log_level(level: &str) -> Result<Level> {
    match level.trim().to_lowercase().as_str() {
        "" | "info" => Ok(Level::INFO),
        "trace" => Ok(Level::TRACE),
        "debug" => Ok(Level::DEBUG),
        "warn" => Ok(Level::WARN),
        "error" => Ok(Level::ERROR),
        _ => anyhow::bail!("Invalid log level: {level}"),
    }
}
