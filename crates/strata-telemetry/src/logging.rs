//! Logging configuration and setup.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing_subscriber::{
    EnvFilter, Layer, Registry,
    filter::{Directive, ParseError},
    fmt::{self, format::FmtSpan, writer::BoxMakeWriter},
    layer::{Layered, SubscriberExt},
    util::SubscriberInitExt,
};

use crate::error::{TelemetryError, TelemetryResult};

/// File name prefix for file logging (`strata.log`).
pub const LOG_FILE_PREFIX: &str = "strata";

/// Subscriber stack the formatting layer sits on.
type Filtered = Layered<EnvFilter, Registry>;

/// Log format options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable multi-line format.
    #[default]
    Pretty,
    /// Compact single-line format.
    Compact,
    /// JSON format for structured logging.
    Json,
    /// Default single-line format with all fields.
    Full,
}

/// Log output target.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogTarget {
    /// Log to stdout.
    Stdout,
    /// Log to stderr.
    #[default]
    Stderr,
    /// Log to `strata.log` inside the given directory.
    File(PathBuf),
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
#[allow(clippy::struct_excessive_bools)]
pub struct LogConfig {
    /// Log level filter (e.g., "info", "debug", "trace").
    pub level: String,
    /// Log format.
    pub format: LogFormat,
    /// Log target.
    pub target: LogTarget,
    /// Whether to include timestamps.
    pub timestamps: bool,
    /// Whether to use ANSI colors.
    pub ansi: bool,
    /// Whether to include file/line info.
    pub file_info: bool,
    /// Whether to include thread IDs.
    pub thread_ids: bool,
    /// Whether to log span open/close.
    pub span_events: bool,
    /// Directive overrides (e.g., `strata_events=trace`).
    pub directives: Vec<String>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::default(),
            target: LogTarget::default(),
            timestamps: true,
            ansi: true,
            file_info: false,
            thread_ids: false,
            span_events: false,
            directives: Vec::new(),
        }
    }
}

impl LogConfig {
    /// Create a new log config with the specified level.
    #[must_use]
    pub fn new(level: impl Into<String>) -> Self {
        Self {
            level: level.into(),
            ..Default::default()
        }
    }

    /// Set the log format.
    #[must_use]
    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    /// Set the log target.
    #[must_use]
    pub fn with_target(mut self, target: LogTarget) -> Self {
        self.target = target;
        self
    }

    /// Log to a file in `directory`. Disables ANSI colors.
    #[must_use]
    pub fn with_file_logging(mut self, directory: impl Into<PathBuf>) -> Self {
        self.target = LogTarget::File(directory.into());
        self.ansi = false;
        self
    }

    /// Add a directive override.
    #[must_use]
    pub fn with_directive(mut self, directive: impl Into<String>) -> Self {
        self.directives.push(directive.into());
        self
    }

    /// Disable timestamps.
    #[must_use]
    pub fn without_timestamps(mut self) -> Self {
        self.timestamps = false;
        self
    }

    /// Disable ANSI colors.
    #[must_use]
    pub fn without_ansi(mut self) -> Self {
        self.ansi = false;
        self
    }

    /// Build the env filter from config.
    ///
    /// # Errors
    ///
    /// Returns [`TelemetryError::InvalidLevel`] or
    /// [`TelemetryError::InvalidDirective`] naming the string that does not
    /// parse.
    pub fn build_filter(&self) -> TelemetryResult<EnvFilter> {
        let mut filter =
            EnvFilter::try_new(&self.level).map_err(|e| TelemetryError::InvalidLevel {
                level: self.level.clone(),
                reason: e.to_string(),
            })?;

        for raw in &self.directives {
            let directive: Directive = raw.parse().map_err(|e: ParseError| {
                TelemetryError::InvalidDirective {
                    directive: raw.clone(),
                    reason: e.to_string(),
                }
            })?;
            filter = filter.add_directive(directive);
        }

        Ok(filter)
    }

    fn span_events(&self) -> FmtSpan {
        if self.span_events {
            FmtSpan::NEW | FmtSpan::CLOSE
        } else {
            FmtSpan::NONE
        }
    }

    fn make_writer(&self) -> TelemetryResult<BoxMakeWriter> {
        Ok(match &self.target {
            LogTarget::Stdout => BoxMakeWriter::new(std::io::stdout),
            LogTarget::Stderr => BoxMakeWriter::new(std::io::stderr),
            LogTarget::File(dir) => {
                std::fs::create_dir_all(dir).map_err(|source| TelemetryError::LogDirectory {
                    path: dir.clone(),
                    source,
                })?;
                let file_name = format!("{LOG_FILE_PREFIX}.log");
                BoxMakeWriter::new(tracing_appender::rolling::never(dir, file_name))
            },
        })
    }

    fn fmt_layer(&self, writer: BoxMakeWriter) -> Box<dyn Layer<Filtered> + Send + Sync> {
        let layer = fmt::layer()
            .with_writer(writer)
            .with_ansi(self.ansi)
            .with_file(self.file_info)
            .with_line_number(self.file_info)
            .with_thread_ids(self.thread_ids)
            .with_span_events(self.span_events());

        match (self.format, self.timestamps) {
            (LogFormat::Pretty, true) => layer.pretty().boxed(),
            (LogFormat::Pretty, false) => layer.pretty().without_time().boxed(),
            (LogFormat::Compact, true) => layer.compact().boxed(),
            (LogFormat::Compact, false) => layer.compact().without_time().boxed(),
            (LogFormat::Json, true) => layer.json().boxed(),
            (LogFormat::Json, false) => layer.json().without_time().boxed(),
            (LogFormat::Full, true) => layer.boxed(),
            (LogFormat::Full, false) => layer.without_time().boxed(),
        }
    }
}

/// Set up logging with the given configuration.
///
/// # Errors
///
/// Returns an error if the configuration is invalid, the log directory cannot
/// be created, or a global subscriber is already installed.
pub fn setup_logging(config: &LogConfig) -> TelemetryResult<()> {
    let filter = config.build_filter()?;
    let layer = config.fmt_layer(config.make_writer()?);

    tracing_subscriber::registry()
        .with(filter)
        .with(layer)
        .try_init()
        .map_err(|e| TelemetryError::AlreadyInitialized(e.to_string()))
}

/// Set up default logging (info level, stderr, pretty format).
///
/// # Errors
///
/// Returns an error if logging cannot be initialized.
pub fn setup_default_logging() -> TelemetryResult<()> {
    setup_logging(&LogConfig::default())
}
