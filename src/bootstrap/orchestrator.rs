//! # Orchestrator
//!
//! Runs the ensurers in dependency order:
//!
//! 1. Default organization lookup
//! 2. Project
//! 3. Application
//! 4. Static users
//! 5. External identity providers
//! 6. Client credentials secret
//!
//! The first failing step ends the run. Nothing is rolled back; running again
//! picks up where the failed run stopped.

use super::application::{ensure_application, ApplicationInput};
use super::project::{ensure_project, ProjectInput};
use super::providers::{ensure_providers, EnsuredProvider, ProvidersInput};
use super::secret::{reconcile_secret, CredentialsTarget, SecretAction, SecretInput};
use super::users::{ensure_users, UsersInput};
use super::BootstrapError;
use crate::config::BootstrapDescriptor;
use crate::identity::{ConflictSignals, IdentityService};
use crate::store::{SecretStore, WriteOutcome};
use tracing::{info, info_span, Instrument};

/// Summary of a successful run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BootstrapReport {
    pub organization_id: String,
    pub project_id: String,
    pub project_created: bool,
    pub application_id: String,
    pub client_id: String,
    pub application_created: bool,
    pub users_created: Vec<String>,
    pub users_updated: Vec<String>,
    pub providers: Vec<EnsuredProvider>,
    pub secret_action: SecretAction,
    pub secret_write: WriteOutcome,
}

/// Bootstrap run against one identity service and secret store
pub struct Bootstrapper<'a> {
    identity: &'a dyn IdentityService,
    store: &'a dyn SecretStore,
    signals: ConflictSignals,
}

impl std::fmt::Debug for Bootstrapper<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Bootstrapper")
            .field("signals", &self.signals)
            .finish_non_exhaustive()
    }
}

impl<'a> Bootstrapper<'a> {
    #[must_use]
    pub fn new(identity: &'a dyn IdentityService, store: &'a dyn SecretStore) -> Self {
        Self {
            identity,
            store,
            signals: ConflictSignals::zitadel(),
        }
    }

    #[must_use]
    pub fn with_signals(mut self, signals: ConflictSignals) -> Self {
        self.signals = signals;
        self
    }

    pub async fn run(
        &self,
        descriptor: &BootstrapDescriptor,
        target: &CredentialsTarget,
    ) -> Result<BootstrapReport, BootstrapError> {
        let organization = self
            .identity
            .default_organization()
            .instrument(info_span!("bootstrap.organization"))
            .await
            .map_err(BootstrapError::Organization)?
            .ok_or(BootstrapError::NoDefaultOrganization)?;
        info!(organization_id = %organization.id, name = %organization.name, "Found default organization");

        let project = ensure_project(
            self.identity,
            &self.signals,
            ProjectInput {
                organization_id: &organization.id,
                project_id: &descriptor.project.id,
                name: &descriptor.project.name,
            },
        )
        .instrument(info_span!("bootstrap.project", name = %descriptor.project.name))
        .await?;

        let app = &descriptor.application;
        let credentials = ensure_application(
            self.identity,
            &self.signals,
            ApplicationInput {
                project_id: &project.id,
                application_id: &app.id,
                name: &app.name,
                redirect_uri: &app.redirect_uri,
                post_logout_redirect_uris: &app.post_logout_redirect_uris,
            },
        )
        .instrument(info_span!("bootstrap.application", name = %app.name))
        .await?;

        let users = ensure_users(
            self.identity,
            &self.signals,
            UsersInput {
                organization_id: &organization.id,
                users: &descriptor.users,
            },
        )
        .instrument(info_span!("bootstrap.users", count = descriptor.users.len()))
        .await?;

        let providers = ensure_providers(
            self.identity,
            &self.signals,
            ProvidersInput {
                providers: &descriptor.identity_providers,
            },
        )
        .instrument(info_span!(
            "bootstrap.identity_providers",
            count = descriptor.identity_providers.len()
        ))
        .await?;

        let secret = reconcile_secret(
            self.identity,
            self.store,
            SecretInput {
                target,
                project_id: &project.id,
                credentials: &credentials,
            },
        )
        .instrument(info_span!(
            "bootstrap.secret",
            namespace = %target.namespace,
            secret = %target.name
        ))
        .await?;

        info!(
            project_id = %project.id,
            application_id = %credentials.application_id,
            users = descriptor.users.len(),
            providers = providers.len(),
            secret_action = ?secret.action,
            "Bootstrap completed"
        );

        Ok(BootstrapReport {
            organization_id: organization.id,
            project_id: project.id,
            project_created: project.created,
            application_id: credentials.application_id,
            client_id: credentials.client_id,
            application_created: credentials.created,
            users_created: users.created,
            users_updated: users.updated,
            providers,
            secret_action: secret.action,
            secret_write: secret.outcome,
        })
    }
}
