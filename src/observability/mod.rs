//! # Observability
//!
//! Structured logging for the bootstrap run.
//!
//! - `logging`: tracing subscriber setup and build information

pub mod logging;

pub use logging::{init_logging, log_build_info};
