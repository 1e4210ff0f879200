//! # Initialization
//!
//! Process-wide setup that must happen before any client is built.

use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Install ring as the rustls crypto provider
///
/// Required for rustls 0.23+ before the first TLS connection of kube or
/// reqwest. Installing twice is harmless.
pub fn install_crypto_provider() {
    if rustls::crypto::ring::default_provider()
        .install_default()
        .is_err()
    {
        debug!("rustls crypto provider already installed");
    }
}

/// Cancel `token` on SIGINT or SIGTERM
pub fn spawn_shutdown_listener(token: CancellationToken) {
    tokio::spawn(async move {
        let signal = shutdown_signal().await;
        info!(signal, "Shutdown signal received, cancelling bootstrap");
        token.cancel();
    });
}

#[cfg(unix)]
async fn shutdown_signal() -> &'static str {
    use tokio::signal::unix::{signal, SignalKind};

    let mut terminate = match signal(SignalKind::terminate()) {
        Ok(stream) => stream,
        Err(e) => {
            warn!(error = %e, "Unable to listen for SIGTERM, only SIGINT is handled");
            return ctrl_c().await;
        }
    };

    tokio::select! {
        name = ctrl_c() => name,
        _ = terminate.recv() => "SIGTERM",
    }
}

#[cfg(not(unix))]
async fn shutdown_signal() -> &'static str {
    ctrl_c().await
}

async fn ctrl_c() -> &'static str {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Unable to listen for SIGINT");
        std::future::pending::<()>().await;
    }
    "SIGINT"
}
