//! # Identity Service
//!
//! Abstract interface to the ZITADEL management APIs used by the bootstrap run.
//!
//! The ensurers only depend on this trait, so the orchestration can be tested
//! against in-memory fakes. [`ZitadelRestClient`] is the production
//! implementation on top of the ZITADEL HTTP gateway.

pub mod conflict;
mod error;
mod models;
mod rest;

use async_trait::async_trait;

pub use conflict::{is_no_op_update, ConflictSignals, ResourceKind};
pub use error::{ErrorCode, IdentityError};
pub use models::{
    Application, CreateApplication, CreateHumanUser, CreateProject, CreatedApplication,
    GenericOidcProvider, IdentityProvider, OidcSettings, Organization, Project, SecretString,
    UpdateApplication, UpdateHumanUser,
};
pub use rest::{RestClientConfig, ZitadelRestClient};

/// Operations the bootstrap run needs from the identity service
#[async_trait]
pub trait IdentityService: Send + Sync {
    /// The organization flagged as default, if any
    async fn default_organization(&self) -> Result<Option<Organization>, IdentityError>;

    async fn create_project(&self, request: &CreateProject) -> Result<Project, IdentityError>;

    /// Projects of an organization whose name matches exactly
    async fn list_projects(
        &self,
        organization_id: &str,
        name: &str,
    ) -> Result<Vec<Project>, IdentityError>;

    async fn get_project(&self, project_id: &str) -> Result<Project, IdentityError>;

    async fn create_application(
        &self,
        request: &CreateApplication,
    ) -> Result<CreatedApplication, IdentityError>;

    /// Applications of a project whose name matches exactly
    async fn list_applications(
        &self,
        project_id: &str,
        name: &str,
    ) -> Result<Vec<Application>, IdentityError>;

    async fn get_application(
        &self,
        project_id: &str,
        application_id: &str,
    ) -> Result<Application, IdentityError>;

    async fn update_application(&self, request: &UpdateApplication) -> Result<(), IdentityError>;

    /// Issue a new client secret, invalidating the previous one
    async fn regenerate_client_secret(
        &self,
        project_id: &str,
        application_id: &str,
    ) -> Result<SecretString, IdentityError>;

    /// Returns the ID of the created user
    async fn create_human_user(&self, request: &CreateHumanUser) -> Result<String, IdentityError>;

    /// IDs of the users whose username matches exactly
    async fn find_user_ids(&self, username: &str) -> Result<Vec<String>, IdentityError>;

    async fn update_human_user(&self, request: &UpdateHumanUser) -> Result<(), IdentityError>;

    /// Identity providers whose name matches exactly
    async fn list_identity_providers(
        &self,
        name: &str,
    ) -> Result<Vec<IdentityProvider>, IdentityError>;

    /// Returns the ID of the created provider
    async fn add_generic_oidc_provider(
        &self,
        provider: &GenericOidcProvider,
    ) -> Result<String, IdentityError>;

    async fn update_generic_oidc_provider(
        &self,
        provider_id: &str,
        provider: &GenericOidcProvider,
    ) -> Result<(), IdentityError>;

    /// Offer the provider on the instance login screen
    async fn add_provider_to_login_policy(&self, provider_id: &str) -> Result<(), IdentityError>;
}
