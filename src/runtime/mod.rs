//! # Runtime
//!
//! Wires the collaborators together for one bootstrap run:
//!
//! 1. Load and validate the descriptor
//! 2. Connect to Kubernetes
//! 3. Obtain the personal access token (flag, or wait for its secret)
//! 4. Build the ZITADEL client and run the [`Bootstrapper`]

pub mod initialization;

use crate::bootstrap::waiter::{wait_for_token, TokenLocation};
use crate::bootstrap::{BootstrapReport, Bootstrapper, CredentialsTarget};
use crate::config::{BootstrapDescriptor, Settings};
use crate::identity::{RestClientConfig, SecretString, ZitadelRestClient};
use crate::store::{KubeSecretStore, SecretStore};
use anyhow::{bail, Context, Result};
use kube::Client;
use tokio_util::sync::CancellationToken;
use tracing::info;

/// Run the bootstrap once, cancelled on SIGINT or SIGTERM
pub async fn run(settings: Settings) -> Result<BootstrapReport> {
    initialization::install_crypto_provider();

    let cancel = CancellationToken::new();
    initialization::spawn_shutdown_listener(cancel.clone());

    let descriptor = BootstrapDescriptor::load(&settings.config_path)
        .context("Failed to load bootstrap descriptor")?;
    info!(
        path = %settings.config_path.display(),
        project = %descriptor.project.name,
        users = descriptor.users.len(),
        identity_providers = descriptor.identity_providers.len(),
        "Loaded bootstrap descriptor"
    );

    let client = Client::try_default()
        .await
        .context("Failed to create Kubernetes client")?;
    let store = KubeSecretStore::new(client);

    let token = resolve_token(&settings, &store, &cancel).await?;

    let identity = ZitadelRestClient::new(RestClientConfig {
        base_url: settings.base_url(),
        token,
        external_domain: settings.zitadel_external_domain.clone(),
        skip_verify_tls: settings.zitadel_skip_verify_tls,
        timeout: settings.request_timeout(),
    })
    .context("Failed to create ZITADEL client")?;
    info!(base_url = %settings.base_url(), "Connecting to ZITADEL");

    let target = CredentialsTarget {
        namespace: settings.namespace.clone(),
        name: settings.secret_name.clone(),
    };
    let bootstrapper = Bootstrapper::new(&identity, &store);

    tokio::select! {
        biased;
        () = cancel.cancelled() => bail!("Bootstrap cancelled"),
        result = bootstrapper.run(&descriptor, &target) => result.map_err(|err| {
            let step = err.step();
            anyhow::Error::new(err).context(format!("Bootstrap step '{step}' failed"))
        }),
    }
}

/// Personal access token from the flag, or from its secret once it exists
async fn resolve_token(
    settings: &Settings,
    store: &dyn SecretStore,
    cancel: &CancellationToken,
) -> Result<SecretString> {
    if let Some(pat) = settings.zitadel_pat.as_deref().map(str::trim) {
        if pat.is_empty() {
            bail!("--zitadel-pat is set but empty");
        }
        info!("Using personal access token from command line");
        return Ok(SecretString::from(pat));
    }

    let location = TokenLocation {
        namespace: settings.pat_namespace().to_string(),
        name: settings.pat_secret_name.clone(),
        key: settings.pat_secret_key.clone(),
    };
    wait_for_token(store, &location, settings.poll_interval(), cancel)
        .await
        .context("Failed to obtain personal access token")
}
