//! # Observability
//!
//! Structured logging through `tracing`. Library code only emits events
//! and spans; the binary installs the subscriber once at startup with
//! [`init_logging`].

mod config;
mod errors;
mod logger;

pub use config::LoggingConfig;
pub use errors::{LoggingError, LoggingResult};
pub use logger::{build_env_filter, init_logging};
