//! External identity provider ensurer.
//!
//! Providers are identified by name. A provider is created when no provider
//! of that name exists and updated in place when exactly one does.

use super::BootstrapError;
use crate::config::IdentityProviderSpec;
use crate::identity::{
    is_no_op_update, ConflictSignals, GenericOidcProvider, IdentityService, ResourceKind,
    SecretString,
};
use tracing::{debug, info, info_span, Instrument};

#[derive(Debug, Clone, Copy)]
pub struct ProvidersInput<'a> {
    pub providers: &'a [IdentityProviderSpec],
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnsuredProvider {
    pub name: String,
    pub id: String,
    pub created: bool,
    pub in_login_policy: bool,
}

pub async fn ensure_providers(
    identity: &dyn IdentityService,
    signals: &ConflictSignals,
    input: ProvidersInput<'_>,
) -> Result<Vec<EnsuredProvider>, BootstrapError> {
    let mut ensured = Vec::with_capacity(input.providers.len());
    for spec in input.providers {
        let span = info_span!("bootstrap.identity_provider", name = %spec.name);
        ensured.push(ensure_provider(identity, signals, spec).instrument(span).await?);
    }
    Ok(ensured)
}

async fn ensure_provider(
    identity: &dyn IdentityService,
    signals: &ConflictSignals,
    spec: &IdentityProviderSpec,
) -> Result<EnsuredProvider, BootstrapError> {
    let fail = |source| BootstrapError::IdentityProvider {
        name: spec.name.clone(),
        source,
    };

    let provider = GenericOidcProvider {
        name: spec.name.clone(),
        issuer: spec.issuer.clone(),
        client_id: spec.client_id.clone(),
        client_secret: SecretString::new(spec.client_secret.as_str()),
        scopes: spec.effective_scopes(),
    };

    let mut existing = identity
        .list_identity_providers(&spec.name)
        .await
        .map_err(fail)?;

    let (id, created) = match existing.len() {
        0 => {
            let id = identity
                .add_generic_oidc_provider(&provider)
                .await
                .map_err(fail)?;
            info!(provider_id = %id, "Created identity provider");
            (id, true)
        }
        1 => {
            let id = existing.remove(0).id;
            match identity.update_generic_oidc_provider(&id, &provider).await {
                Ok(()) => info!(provider_id = %id, "Updated identity provider"),
                Err(err) if is_no_op_update(&err) => {
                    debug!(provider_id = %id, "Identity provider is up to date");
                }
                Err(err) => return Err(fail(err)),
            }
            (id, false)
        }
        count => {
            return Err(BootstrapError::Ambiguous {
                kind: ResourceKind::IdentityProvider,
                name: spec.name.clone(),
                count,
            })
        }
    };

    if spec.add_to_login_policy {
        match identity.add_provider_to_login_policy(&id).await {
            Ok(()) => info!(provider_id = %id, "Added identity provider to login policy"),
            Err(err) if signals.is_conflict(ResourceKind::LoginPolicyProvider, &err) => {
                debug!(provider_id = %id, "Identity provider already in login policy");
            }
            Err(err) => return Err(fail(err)),
        }
    }

    Ok(EnsuredProvider {
        name: spec.name.clone(),
        id,
        created,
        in_login_policy: spec.add_to_login_policy,
    })
}
