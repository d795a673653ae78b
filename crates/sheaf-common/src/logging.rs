//! Structured logging setup for applications embedding the sheaf crates.
//!
//! The library crates only emit `tracing` events; installing a subscriber is
//! left to the application, which can use [`init_logging`] for a sensible
//! default.

use std::fs::OpenOptions;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;

use thiserror::Error;
use tracing_subscriber::{
    fmt::{self, format::FmtSpan, writer::BoxMakeWriter},
    layer::SubscriberExt,
    util::{SubscriberInitExt, TryInitError},
    EnvFilter,
};

/// Errors raised while installing the global subscriber.
#[derive(Error, Debug)]
pub enum LoggingError {
    /// The level directive could not be parsed
    #[error("invalid log filter directive '{directive}': {source}")]
    InvalidFilter {
        directive: String,
        #[source]
        source: tracing_subscriber::filter::ParseError,
    },

    /// The log file could not be opened
    #[error("failed to open log file {path:?}: {source}")]
    LogFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A global subscriber is already installed
    #[error("failed to install subscriber: {0}")]
    Init(#[from] TryInitError),
}

/// Output format of the fmt layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Multi-line, human oriented output
    #[default]
    Pretty,
    /// Single-line output
    Compact,
    /// Newline delimited JSON objects
    Json,
}

/// Configuration for the logging system
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Log level filter used when `RUST_LOG` is not set (e.g. "info", "sheaf_i18n=debug")
    pub level: String,
    /// Output format
    pub format: LogFormat,
    /// Optional file to append to instead of stdout
    pub file_path: Option<PathBuf>,
    /// Whether to log span open and close events
    pub include_spans: bool,
    /// Whether to include the target module of each event
    pub include_targets: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::default(),
            file_path: None,
            include_spans: false,
            include_targets: true,
        }
    }
}

impl LoggingConfig {
    /// Development preset: pretty output at debug level.
    #[must_use]
    pub fn development() -> Self {
        Self {
            level: "debug".to_string(),
            include_spans: true,
            ..Self::default()
        }
    }

    /// Production preset: JSON lines appended to `log_file`.
    #[must_use]
    pub fn production(log_file: impl Into<PathBuf>) -> Self {
        Self {
            format: LogFormat::Json,
            file_path: Some(log_file.into()),
            ..Self::default()
        }
    }

    fn env_filter(&self) -> Result<EnvFilter, LoggingError> {
        if let Ok(filter) = EnvFilter::try_from_default_env() {
            return Ok(filter);
        }
        EnvFilter::try_new(&self.level).map_err(|source| LoggingError::InvalidFilter {
            directive: self.level.clone(),
            source,
        })
    }

    fn writer(&self) -> Result<BoxMakeWriter, LoggingError> {
        match &self.file_path {
            Some(path) => {
                let file = OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(path)
                    .map_err(|source| LoggingError::LogFile {
                        path: path.clone(),
                        source,
                    })?;
                Ok(BoxMakeWriter::new(Mutex::new(file)))
            }
            None => Ok(BoxMakeWriter::new(io::stdout)),
        }
    }
}

/// Initialize the global tracing subscriber with the given configuration.
///
/// `RUST_LOG` takes precedence over [`LoggingConfig::level`]. Fails if a
/// global subscriber has already been installed.
pub fn init_logging(config: &LoggingConfig) -> Result<(), LoggingError> {
    let filter = config.env_filter()?;
    let writer = config.writer()?;
    let ansi = config.file_path.is_none();

    let span_events = if config.include_spans {
        FmtSpan::NEW | FmtSpan::CLOSE
    } else {
        FmtSpan::NONE
    };

    let registry = tracing_subscriber::registry().with(filter);

    match config.format {
        LogFormat::Json => registry
            .with(
                fmt::layer()
                    .json()
                    .with_writer(writer)
                    .with_span_events(span_events)
                    .with_target(config.include_targets),
            )
            .try_init()?,
        LogFormat::Pretty => registry
            .with(
                fmt::layer()
                    .pretty()
                    .with_writer(writer)
                    .with_ansi(ansi)
                    .with_span_events(span_events)
                    .with_target(config.include_targets),
            )
            .try_init()?,
        LogFormat::Compact => registry
            .with(
                fmt::layer()
                    .compact()
                    .with_writer(writer)
                    .with_ansi(ansi)
                    .with_span_events(span_events)
                    .with_target(config.include_targets),
            )
            .try_init()?,
    }

    Ok(())
}
