//! # Secret Reconciler
//!
//! Persists the application credentials. In order of preference:
//!
//! 1. A client secret issued in this run is written together with the client ID.
//! 2. A non-empty client secret already in the store is kept, only the client
//!    ID is written.
//! 3. Otherwise a new client secret is requested (once) and both are written.
//!
//! A stored non-empty client secret is never replaced by an empty value.

use super::application::ApplicationCredentials;
use super::BootstrapError;
use crate::constants::{CLIENT_ID_KEY, CLIENT_SECRET_KEY};
use crate::identity::{IdentityService, SecretString};
use crate::store::{Mutation, SecretData, SecretStore, SecretStoreError, WriteOutcome};
use tracing::info;

/// Secret receiving the client credentials
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CredentialsTarget {
    pub namespace: String,
    pub name: String,
}

/// How the stored client secret came about
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SecretAction {
    /// Issued when the application was created in this run
    Issued,
    /// Kept from a previous run
    Preserved,
    /// Regenerated because none was available
    Regenerated,
}

#[derive(Debug, Clone, Copy)]
pub struct SecretInput<'a> {
    pub target: &'a CredentialsTarget,
    pub project_id: &'a str,
    pub credentials: &'a ApplicationCredentials,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReconciledSecret {
    pub action: SecretAction,
    pub outcome: WriteOutcome,
}

pub async fn reconcile_secret(
    identity: &dyn IdentityService,
    store: &dyn SecretStore,
    input: SecretInput<'_>,
) -> Result<ReconciledSecret, BootstrapError> {
    let target = input.target;
    let client_id = input.credentials.client_id.as_str();

    if let Some(secret) = input
        .credentials
        .client_secret
        .as_ref()
        .filter(|secret| !secret.is_empty())
    {
        let outcome = write_both(store, target, client_id, secret).await?;
        info!(namespace = %target.namespace, secret = %target.name, ?outcome, "Stored newly issued client credentials");
        return Ok(ReconciledSecret {
            action: SecretAction::Issued,
            outcome,
        });
    }

    let keep_stored = |data: &mut SecretData| {
        let has_secret = data
            .get(CLIENT_SECRET_KEY)
            .is_some_and(|value| !value.trim().is_empty());
        if !has_secret {
            return Mutation::Abandon;
        }
        data.insert(CLIENT_ID_KEY.to_string(), client_id.to_string());
        Mutation::Commit
    };
    let outcome = store
        .create_or_update(&target.namespace, &target.name, &keep_stored)
        .await
        .map_err(|source| write_failed(target, source))?;

    if outcome != WriteOutcome::Abandoned {
        info!(namespace = %target.namespace, secret = %target.name, ?outcome, "Preserved stored client secret");
        return Ok(ReconciledSecret {
            action: SecretAction::Preserved,
            outcome,
        });
    }

    let application_id = input.credentials.application_id.as_str();
    info!(application_id, "No client secret available, regenerating it");
    let secret = identity
        .regenerate_client_secret(input.project_id, application_id)
        .await
        .map_err(|source| BootstrapError::RegenerateSecret {
            application_id: application_id.to_string(),
            source,
        })?;
    if secret.is_empty() {
        return Err(BootstrapError::EmptyRegeneratedSecret {
            application_id: application_id.to_string(),
        });
    }

    let outcome = write_both(store, target, client_id, &secret).await?;
    info!(namespace = %target.namespace, secret = %target.name, ?outcome, "Stored regenerated client credentials");
    Ok(ReconciledSecret {
        action: SecretAction::Regenerated,
        outcome,
    })
}

async fn write_both(
    store: &dyn SecretStore,
    target: &CredentialsTarget,
    client_id: &str,
    client_secret: &SecretString,
) -> Result<WriteOutcome, BootstrapError> {
    let set_both = |data: &mut SecretData| {
        data.insert(CLIENT_ID_KEY.to_string(), client_id.to_string());
        data.insert(
            CLIENT_SECRET_KEY.to_string(),
            client_secret.expose().to_string(),
        );
        Mutation::Commit
    };
    store
        .create_or_update(&target.namespace, &target.name, &set_both)
        .await
        .map_err(|source| write_failed(target, source))
}

fn write_failed(target: &CredentialsTarget, source: SecretStoreError) -> BootstrapError {
    BootstrapError::SecretWrite {
        namespace: target.namespace.clone(),
        name: target.name.clone(),
        source,
    }
}
