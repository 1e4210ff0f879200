//! OIDC application ensurer.
//!
//! Creates the web application of the project or, when it already exists,
//! resolves it by name and brings its redirect URIs up to date. The client
//! secret is only known when the application is created in this run.

use super::BootstrapError;
use crate::identity::{
    is_no_op_update, ConflictSignals, CreateApplication, IdentityService, OidcSettings,
    ResourceKind, SecretString, UpdateApplication,
};
use tracing::{debug, info};

#[derive(Debug, Clone, Copy)]
pub struct ApplicationInput<'a> {
    pub project_id: &'a str,
    pub application_id: &'a str,
    pub name: &'a str,
    pub redirect_uri: &'a str,
    pub post_logout_redirect_uris: &'a [String],
}

impl ApplicationInput<'_> {
    fn oidc(&self) -> OidcSettings {
        OidcSettings {
            redirect_uris: vec![self.redirect_uri.to_string()],
            post_logout_redirect_uris: self.post_logout_redirect_uris.to_vec(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ApplicationCredentials {
    /// Authoritative ID, which may differ from the requested one
    pub application_id: String,
    pub client_id: String,
    /// Only set when the application was created in this run
    pub client_secret: Option<SecretString>,
    pub created: bool,
}

pub async fn ensure_application(
    identity: &dyn IdentityService,
    signals: &ConflictSignals,
    input: ApplicationInput<'_>,
) -> Result<ApplicationCredentials, BootstrapError> {
    let fail = |source| BootstrapError::Application {
        name: input.name.to_string(),
        source,
    };

    let request = CreateApplication {
        project_id: input.project_id.to_string(),
        application_id: input.application_id.to_string(),
        name: input.name.to_string(),
        oidc: input.oidc(),
    };

    let (application_id, client_id, client_secret, created) =
        match identity.create_application(&request).await {
            Ok(created) => {
                info!(application_id = %created.application_id, name = input.name, "Created application");
                let secret = created.client_secret.filter(|secret| !secret.is_empty());
                (created.application_id, created.client_id, secret, true)
            }
            Err(err) if signals.is_conflict(ResourceKind::Application, &err) => {
                info!(name = input.name, "Application already exists, updating it");
                let (id, client_id) = update_existing(identity, input).await?;
                (id, client_id, None, false)
            }
            Err(err) => return Err(fail(err)),
        };

    let client_id = match client_id {
        Some(client_id) => client_id,
        None => identity
            .get_application(input.project_id, &application_id)
            .await
            .map_err(fail)?
            .client_id
            .ok_or_else(|| BootstrapError::MissingClientId {
                name: input.name.to_string(),
            })?,
    };

    Ok(ApplicationCredentials {
        application_id,
        client_id,
        client_secret,
        created,
    })
}

/// Resolve an existing application by name and update its redirect URIs
async fn update_existing(
    identity: &dyn IdentityService,
    input: ApplicationInput<'_>,
) -> Result<(String, Option<String>), BootstrapError> {
    let fail = |source| BootstrapError::Application {
        name: input.name.to_string(),
        source,
    };

    let mut matches = identity
        .list_applications(input.project_id, input.name)
        .await
        .map_err(fail)?;

    let existing = match matches.len() {
        0 => {
            return Err(BootstrapError::ApplicationNotFound {
                project_id: input.project_id.to_string(),
                name: input.name.to_string(),
            })
        }
        1 => matches.remove(0),
        count => {
            return Err(BootstrapError::Ambiguous {
                kind: ResourceKind::Application,
                name: input.name.to_string(),
                count,
            })
        }
    };

    let oidc = input.oidc();
    if existing.redirect_uris == oidc.redirect_uris
        && existing.post_logout_redirect_uris == oidc.post_logout_redirect_uris
    {
        debug!(application_id = %existing.id, "Application is up to date");
        return Ok((existing.id, existing.client_id));
    }

    let update = UpdateApplication {
        project_id: input.project_id.to_string(),
        application_id: existing.id.clone(),
        oidc,
    };
    match identity.update_application(&update).await {
        Ok(()) => info!(application_id = %existing.id, "Updated application"),
        Err(err) if is_no_op_update(&err) => {
            debug!(application_id = %existing.id, "Application is up to date");
        }
        Err(err) => return Err(fail(err)),
    }

    Ok((existing.id, existing.client_id))
}
