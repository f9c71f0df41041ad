//! Structured logging for table operations
//!
//! The library emits `tracing` events on its own: `debug` for shape changes
//! (reshape, concatenate, CSV parsing, file I/O) and `warn` when a decoded
//! record carries stale annotations. Nothing is printed until a subscriber
//! is installed. With the `tracing` feature enabled, [`init_tracing`]
//! installs a `tracing-subscriber` formatter configured by [`TracingConfig`].
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: filter directives (e.g., `RUST_LOG=varplus_core=debug`)
//! - `VARPLUS_LOG_FORMAT`: output format (`pretty`, `json` or `compact`;
//!   default `pretty`)
//!
//! # Example
//!
//! ```
//! use varplus_core::tracing_support::{init_tracing, TracingConfig, TracingFormat};
//!
//! let config = TracingConfig {
//!     format: TracingFormat::Compact,
//!     ..TracingConfig::default()
//! }
//! .with_filter("varplus_core=debug");
//! init_tracing(config).unwrap();
//! ```

use anyhow::Result;
#[cfg(feature = "tracing")]
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Environment variable selecting the output format
pub const LOG_FORMAT_ENV: &str = "VARPLUS_LOG_FORMAT";

/// Filter used when `RUST_LOG` is unset
pub const DEFAULT_FILTER: &str = "varplus_core=info,warn";

/// Tracing output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TracingFormat {
    /// Multi-line human-readable format
    Pretty,
    /// One JSON object per event
    Json,
    /// Single line per event
    Compact,
}

impl TracingFormat {
    /// Parse a format name; unknown names fall back to `Pretty`
    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "json" => TracingFormat::Json,
            "compact" => TracingFormat::Compact,
            _ => TracingFormat::Pretty,
        }
    }
}

/// Subscriber configuration
#[derive(Debug, Clone)]
pub struct TracingConfig {
    pub format: TracingFormat,
    /// `EnvFilter` directive string
    pub filter: String,
    pub with_ansi: bool,
    pub with_target: bool,
    pub with_file: bool,
    pub with_line_number: bool,
}

impl Default for TracingConfig {
    fn default() -> Self {
        let format = std::env::var(LOG_FORMAT_ENV)
            .map(|s| TracingFormat::parse(&s))
            .unwrap_or(TracingFormat::Pretty);
        let filter = std::env::var("RUST_LOG").unwrap_or_else(|_| DEFAULT_FILTER.to_string());

        Self {
            format,
            filter,
            with_ansi: true,
            with_target: true,
            with_file: false,
            with_line_number: false,
        }
    }
}

impl TracingConfig {
    /// Replace the filter directives
    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = filter.into();
        self
    }
}

/// Install a global subscriber for the given configuration
///
/// Call once at application startup. A second call fails because a global
/// subscriber is already set.
///
/// # Errors
///
/// Returns an error for invalid filter directives or when a global
/// subscriber is already installed.
#[cfg(feature = "tracing")]
pub fn init_tracing(config: TracingConfig) -> Result<()> {
    let filter = EnvFilter::try_new(&config.filter)?;

    match config.format {
        TracingFormat::Pretty => {
            let fmt_layer = fmt::layer()
                .pretty()
                .with_ansi(config.with_ansi)
                .with_target(config.with_target)
                .with_file(config.with_file)
                .with_line_number(config.with_line_number)
                .with_filter(filter);
            tracing_subscriber::registry().with(fmt_layer).try_init()?;
        }
        TracingFormat::Json => {
            let fmt_layer = fmt::layer()
                .json()
                .with_target(config.with_target)
                .with_file(config.with_file)
                .with_line_number(config.with_line_number)
                .with_filter(filter);
            tracing_subscriber::registry().with(fmt_layer).try_init()?;
        }
        TracingFormat::Compact => {
            let fmt_layer = fmt::layer()
                .compact()
                .with_ansi(config.with_ansi)
                .with_target(config.with_target)
                .with_file(config.with_file)
                .with_line_number(config.with_line_number)
                .with_filter(filter);
            tracing_subscriber::registry().with(fmt_layer).try_init()?;
        }
    }

    tracing::debug!(format = ?config.format, filter = %config.filter, "tracing initialized");
    Ok(())
}

/// No-op when the `tracing` feature is disabled
#[cfg(not(feature = "tracing"))]
pub fn init_tracing(_config: TracingConfig) -> Result<()> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tracing_format_parse() {
        assert_eq!(TracingFormat::parse("json"), TracingFormat::Json);
        assert_eq!(TracingFormat::parse(" JSON "), TracingFormat::Json);
        assert_eq!(TracingFormat::parse("compact"), TracingFormat::Compact);
        assert_eq!(TracingFormat::parse("unknown"), TracingFormat::Pretty);
    }

    #[test]
    fn test_with_filter() {
        let config = TracingConfig::default().with_filter("debug");
        assert_eq!(config.filter, "debug");
        assert!(config.with_target);
    }

    #[cfg(not(feature = "tracing"))]
    #[test]
    fn test_stub_is_noop() {
        assert!(init_tracing(TracingConfig::default()).is_ok());
        assert!(init_tracing(TracingConfig::default()).is_ok());
    }
}
