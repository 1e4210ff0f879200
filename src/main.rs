//! # zitadel-init
//!
//! One-shot bootstrap of ZITADEL for a deployment: ensures the project, the
//! OIDC application, static users and external identity providers, then
//! stores the client credentials in a Kubernetes secret.
//!
//! Safe to run on every deployment or upgrade. See `--help` for the flags.

use clap::Parser;
use std::process::ExitCode;
use tracing::{error, info};
use zitadel_init::config::Settings;
use zitadel_init::observability::{init_logging, log_build_info};
use zitadel_init::runtime;

#[tokio::main]
async fn main() -> ExitCode {
    let settings = Settings::parse();

    if let Err(e) = init_logging(settings.log_format) {
        eprintln!("Failed to initialize logging: {e}");
        return ExitCode::FAILURE;
    }
    log_build_info();

    match runtime::run(settings).await {
        Ok(report) => {
            info!(
                project_id = %report.project_id,
                application_id = %report.application_id,
                client_id = %report.client_id,
                secret_action = ?report.secret_action,
                "ZITADEL initialized"
            );
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!(error = %format!("{err:#}"), "ZITADEL initialization failed");
            ExitCode::FAILURE
        }
    }
}
