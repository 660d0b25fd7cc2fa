//! Strata Telemetry - Logging setup for hosts embedding the event registry.
//!
//! The registry itself only emits `tracing` events (`debug` for subscription
//! changes, `trace` for lookups and cache behaviour). This crate installs a
//! subscriber that renders them.
//!
//! # Example
//!
//! ```rust,no_run
//! use strata_telemetry::{LogConfig, LogFormat, setup_logging};
//!
//! # fn main() -> Result<(), strata_telemetry::TelemetryError> {
//! let config = LogConfig::new("info")
//!     .with_format(LogFormat::Compact)
//!     .with_directive("strata_events=trace");
//!
//! setup_logging(&config)?;
//! tracing::info!("Logging ready");
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

mod error;
mod logging;

pub use error::{TelemetryError, TelemetryResult};
pub use logging::{
    LOG_FILE_PREFIX, LogConfig, LogFormat, LogTarget, setup_default_logging, setup_logging,
};
