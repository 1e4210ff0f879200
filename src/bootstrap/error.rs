//! Errors of a bootstrap run, one variant family per step.

use crate::identity::{IdentityError, ResourceKind};
use crate::store::SecretStoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error("unable to look up default organization: {0}")]
    Organization(#[source] IdentityError),

    #[error("no default organization found")]
    NoDefaultOrganization,

    #[error("unable to ensure project '{name}': {source}")]
    Project {
        name: String,
        #[source]
        source: IdentityError,
    },

    #[error("unable to ensure application '{name}': {source}")]
    Application {
        name: String,
        #[source]
        source: IdentityError,
    },

    #[error("application '{name}' reported as existing but not found in project {project_id}")]
    ApplicationNotFound { project_id: String, name: String },

    #[error("application '{name}' has no client ID")]
    MissingClientId { name: String },

    #[error("unable to ensure user '{email}': {source}")]
    User {
        email: String,
        #[source]
        source: IdentityError,
    },

    #[error("user '{email}' reported as existing but no user has that username")]
    UserNotFound { email: String },

    #[error("unable to ensure identity provider '{name}': {source}")]
    IdentityProvider {
        name: String,
        #[source]
        source: IdentityError,
    },

    #[error("found {count} {kind} resources named '{name}', expected at most one")]
    Ambiguous {
        kind: ResourceKind,
        name: String,
        count: usize,
    },

    #[error("unable to regenerate client secret of application {application_id}: {source}")]
    RegenerateSecret {
        application_id: String,
        #[source]
        source: IdentityError,
    },

    #[error("regenerated client secret of application {application_id} is empty")]
    EmptyRegeneratedSecret { application_id: String },

    #[error("unable to write client credentials to secret {namespace}/{name}: {source}")]
    SecretWrite {
        namespace: String,
        name: String,
        #[source]
        source: SecretStoreError,
    },
}

impl BootstrapError {
    /// Name of the step that failed
    #[must_use]
    pub fn step(&self) -> &'static str {
        match self {
            Self::Organization(_) | Self::NoDefaultOrganization => "organization",
            Self::Project { .. } => "project",
            Self::Application { .. }
            | Self::ApplicationNotFound { .. }
            | Self::MissingClientId { .. } => "application",
            Self::User { .. } | Self::UserNotFound { .. } => "users",
            Self::IdentityProvider { .. } => "identity providers",
            Self::Ambiguous { kind, .. } => match kind {
                ResourceKind::Project => "project",
                ResourceKind::Application => "application",
                ResourceKind::User => "users",
                ResourceKind::IdentityProvider | ResourceKind::LoginPolicyProvider => {
                    "identity providers"
                }
            },
            Self::RegenerateSecret { .. }
            | Self::EmptyRegeneratedSecret { .. }
            | Self::SecretWrite { .. } => "secret",
        }
    }
}
