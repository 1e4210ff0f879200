//! Tracing subscriber setup.

use crate::config::LogFormat;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Filter applied when `RUST_LOG` is not set
pub const DEFAULT_LOG_FILTER: &str = "zitadel_init=info";

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_LOG_FILTER.into())
}

/// Install the global tracing subscriber
///
/// Returns an error when a subscriber is already installed.
pub fn init_logging(format: LogFormat) -> Result<(), tracing_subscriber::util::TryInitError> {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let registry = tracing_subscriber::registry().with(env_filter());
    match format {
        LogFormat::Json => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_current_span(true)
                    .with_span_list(false),
            )
            .try_init(),
        LogFormat::Text => registry
            .with(tracing_subscriber::fmt::layer().with_target(false))
            .try_init(),
    }
}

/// Log version and build information
pub fn log_build_info() {
    info!(
        version = env!("CARGO_PKG_VERSION"),
        git_hash = env!("BUILD_GIT_HASH"),
        build_time = env!("BUILD_DATETIME"),
        "Starting zitadel-init"
    );
}
