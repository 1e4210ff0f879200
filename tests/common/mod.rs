//! Common test utilities
//!
//! In-memory doubles of the identity service and the secret store. The
//! identity fake reproduces the ZITADEL behaviour the ensurers depend on:
//! conflicts on existing resources (FailedPrecondition for users), "no
//! changes" precondition failures on idempotent updates, and client secrets
//! that are only returned at creation.

#![allow(dead_code, reason = "not every test binary uses every helper")]

use async_trait::async_trait;
use std::collections::{BTreeMap, HashSet};
use std::sync::Mutex;
use zitadel_init::config::BootstrapDescriptor;
use zitadel_init::identity::{
    Application, CreateApplication, CreateHumanUser, CreateProject, CreatedApplication,
    ErrorCode, GenericOidcProvider, IdentityError, IdentityProvider, IdentityService,
    Organization, Project, SecretString, UpdateApplication, UpdateHumanUser,
};
use zitadel_init::store::{
    Mutation, SecretData, SecretMutator, SecretStore, SecretStoreError, WriteOutcome,
};

pub const ORG_ID: &str = "org-1";

#[derive(Debug, Clone)]
pub struct FakeProject {
    pub organization_id: String,
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone)]
pub struct FakeApplication {
    pub project_id: String,
    pub id: String,
    pub name: String,
    pub client_id: Option<String>,
    pub client_secret: String,
    pub redirect_uris: Vec<String>,
    pub post_logout_redirect_uris: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct FakeUser {
    pub organization_id: String,
    /// Equals the username only for users created through the API with an explicit ID
    pub id: String,
    pub username: String,
    pub given_name: String,
    pub family_name: String,
    pub password: String,
}

#[derive(Debug, Clone)]
pub struct FakeProvider {
    pub id: String,
    pub name: String,
    pub issuer: String,
    pub client_id: String,
    pub scopes: Vec<String>,
}

#[derive(Debug, Default)]
pub struct FakeState {
    pub organization: Option<Organization>,
    pub projects: Vec<FakeProject>,
    pub applications: Vec<FakeApplication>,
    pub users: Vec<FakeUser>,
    pub providers: Vec<FakeProvider>,
    pub login_policy: HashSet<String>,
    /// Emails whose creation fails with PermissionDenied
    pub failing_users: HashSet<String>,
    /// ID assigned to the next created application instead of the requested one
    pub reassigned_application_id: Option<String>,
    /// Whether application creation returns the client secret
    pub issue_client_secrets: bool,
    /// Operation names in call order
    pub calls: Vec<&'static str>,
    next_id: u32,
}

#[derive(Debug)]
pub struct FakeIdentityService {
    pub state: Mutex<FakeState>,
}

impl Default for FakeIdentityService {
    fn default() -> Self {
        Self::new()
    }
}

impl FakeIdentityService {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(FakeState {
                organization: Some(Organization {
                    id: ORG_ID.to_string(),
                    name: "ZITADEL".to_string(),
                }),
                issue_client_secrets: true,
                ..FakeState::default()
            }),
        }
    }

    pub fn with_state(self, f: impl FnOnce(&mut FakeState)) -> Self {
        f(&mut self.state.lock().unwrap());
        self
    }

    pub fn calls(&self, operation: &str) -> usize {
        self.state
            .lock()
            .unwrap()
            .calls
            .iter()
            .filter(|call| **call == operation)
            .count()
    }

    pub fn application(&self, name: &str) -> Option<FakeApplication> {
        self.state
            .lock()
            .unwrap()
            .applications
            .iter()
            .find(|app| app.name == name)
            .cloned()
    }

    pub fn user(&self, username: &str) -> Option<FakeUser> {
        self.state
            .lock()
            .unwrap()
            .users
            .iter()
            .find(|user| user.username == username)
            .cloned()
    }

    fn record(&self, operation: &'static str) -> std::sync::MutexGuard<'_, FakeState> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(operation);
        state
    }
}

impl FakeState {
    fn next_id(&mut self, prefix: &str) -> String {
        self.next_id += 1;
        format!("{prefix}-{}", self.next_id)
    }
}

fn err(operation: &'static str, code: ErrorCode, message: &str) -> IdentityError {
    IdentityError::api(operation, code, message)
}

fn no_changes(operation: &'static str) -> IdentityError {
    err(
        operation,
        ErrorCode::FailedPrecondition,
        "No changes (COMMAND-1m88i)",
    )
}

#[async_trait]
impl IdentityService for FakeIdentityService {
    async fn default_organization(&self) -> Result<Option<Organization>, IdentityError> {
        Ok(self.record("default_organization").organization.clone())
    }

    async fn create_project(&self, request: &CreateProject) -> Result<Project, IdentityError> {
        let mut state = self.record("create_project");
        let exists = state.projects.iter().any(|p| {
            p.id == request.project_id
                || (p.organization_id == request.organization_id && p.name == request.name)
        });
        if exists {
            return Err(err("create project", ErrorCode::AlreadyExists, "Project already exists"));
        }
        state.projects.push(FakeProject {
            organization_id: request.organization_id.clone(),
            id: request.project_id.clone(),
            name: request.name.clone(),
        });
        Ok(Project {
            id: request.project_id.clone(),
            name: request.name.clone(),
        })
    }

    async fn list_projects(
        &self,
        organization_id: &str,
        name: &str,
    ) -> Result<Vec<Project>, IdentityError> {
        let state = self.record("list_projects");
        Ok(state
            .projects
            .iter()
            .filter(|p| p.organization_id == organization_id && p.name == name)
            .map(|p| Project {
                id: p.id.clone(),
                name: p.name.clone(),
            })
            .collect())
    }

    async fn get_project(&self, project_id: &str) -> Result<Project, IdentityError> {
        let state = self.record("get_project");
        state
            .projects
            .iter()
            .find(|p| p.id == project_id)
            .map(|p| Project {
                id: p.id.clone(),
                name: p.name.clone(),
            })
            .ok_or_else(|| err("get project", ErrorCode::NotFound, "Project not found"))
    }

    async fn create_application(
        &self,
        request: &CreateApplication,
    ) -> Result<CreatedApplication, IdentityError> {
        let mut state = self.record("create_application");
        let exists = state.applications.iter().any(|app| {
            app.project_id == request.project_id
                && (app.id == request.application_id || app.name == request.name)
        });
        if exists {
            return Err(err(
                "create application",
                ErrorCode::AlreadyExists,
                "Application already exists",
            ));
        }

        let id = state
            .reassigned_application_id
            .take()
            .unwrap_or_else(|| request.application_id.clone());
        let client_id = format!("{id}@{}", request.project_id);
        let client_secret = state.next_id("issued-secret");
        state.applications.push(FakeApplication {
            project_id: request.project_id.clone(),
            id: id.clone(),
            name: request.name.clone(),
            client_id: Some(client_id.clone()),
            client_secret: client_secret.clone(),
            redirect_uris: request.oidc.redirect_uris.clone(),
            post_logout_redirect_uris: request.oidc.post_logout_redirect_uris.clone(),
        });

        Ok(CreatedApplication {
            application_id: id,
            client_id: Some(client_id),
            client_secret: state
                .issue_client_secrets
                .then(|| SecretString::from(client_secret)),
        })
    }

    async fn list_applications(
        &self,
        project_id: &str,
        name: &str,
    ) -> Result<Vec<Application>, IdentityError> {
        let state = self.record("list_applications");
        Ok(state
            .applications
            .iter()
            .filter(|app| app.project_id == project_id && app.name == name)
            .map(to_application)
            .collect())
    }

    async fn get_application(
        &self,
        project_id: &str,
        application_id: &str,
    ) -> Result<Application, IdentityError> {
        let state = self.record("get_application");
        state
            .applications
            .iter()
            .find(|app| app.project_id == project_id && app.id == application_id)
            .map(to_application)
            .ok_or_else(|| err("get application", ErrorCode::NotFound, "App not found"))
    }

    async fn update_application(&self, request: &UpdateApplication) -> Result<(), IdentityError> {
        let mut state = self.record("update_application");
        let app = state
            .applications
            .iter_mut()
            .find(|app| app.project_id == request.project_id && app.id == request.application_id)
            .ok_or_else(|| err("update application", ErrorCode::NotFound, "App not found"))?;
        if app.redirect_uris == request.oidc.redirect_uris
            && app.post_logout_redirect_uris == request.oidc.post_logout_redirect_uris
        {
            return Err(no_changes("update application"));
        }
        app.redirect_uris.clone_from(&request.oidc.redirect_uris);
        app.post_logout_redirect_uris
            .clone_from(&request.oidc.post_logout_redirect_uris);
        Ok(())
    }

    async fn regenerate_client_secret(
        &self,
        project_id: &str,
        application_id: &str,
    ) -> Result<SecretString, IdentityError> {
        let mut state = self.record("regenerate_client_secret");
        let secret = state.next_id("regenerated-secret");
        let app = state
            .applications
            .iter_mut()
            .find(|app| app.project_id == project_id && app.id == application_id)
            .ok_or_else(|| err("regenerate client secret", ErrorCode::NotFound, "App not found"))?;
        app.client_secret.clone_from(&secret);
        Ok(SecretString::from(secret))
    }

    async fn create_human_user(&self, request: &CreateHumanUser) -> Result<String, IdentityError> {
        let mut state = self.record("create_human_user");
        if state.failing_users.contains(&request.email) {
            return Err(err("create user", ErrorCode::PermissionDenied, "No permission"));
        }
        if state.users.iter().any(|u| u.username == request.username) {
            // ZITADEL answers FailedPrecondition, not AlreadyExists, for taken usernames
            return Err(err(
                "create user",
                ErrorCode::FailedPrecondition,
                "User already exists (V2-4n8vs)",
            ));
        }
        state.users.push(FakeUser {
            organization_id: request.organization_id.clone(),
            id: request.user_id.clone(),
            username: request.username.clone(),
            given_name: request.given_name.clone(),
            family_name: request.family_name.clone(),
            password: request.password.expose().to_string(),
        });
        Ok(request.user_id.clone())
    }

    async fn find_user_ids(&self, username: &str) -> Result<Vec<String>, IdentityError> {
        let state = self.record("find_user_ids");
        Ok(state
            .users
            .iter()
            .filter(|u| u.username == username)
            .map(|u| u.id.clone())
            .collect())
    }

    async fn update_human_user(&self, request: &UpdateHumanUser) -> Result<(), IdentityError> {
        let mut state = self.record("update_human_user");
        let user = state
            .users
            .iter_mut()
            .find(|u| u.id == request.user_id)
            .ok_or_else(|| err("update user", ErrorCode::NotFound, "User not found"))?;
        user.given_name.clone_from(&request.given_name);
        user.family_name.clone_from(&request.family_name);
        Ok(())
    }

    async fn list_identity_providers(
        &self,
        name: &str,
    ) -> Result<Vec<IdentityProvider>, IdentityError> {
        let state = self.record("list_identity_providers");
        Ok(state
            .providers
            .iter()
            .filter(|idp| idp.name == name)
            .map(|idp| IdentityProvider { id: idp.id.clone() })
            .collect())
    }

    async fn add_generic_oidc_provider(
        &self,
        provider: &GenericOidcProvider,
    ) -> Result<String, IdentityError> {
        let mut state = self.record("add_generic_oidc_provider");
        let id = state.next_id("idp");
        state.providers.push(FakeProvider {
            id: id.clone(),
            name: provider.name.clone(),
            issuer: provider.issuer.clone(),
            client_id: provider.client_id.clone(),
            scopes: provider.scopes.clone(),
        });
        Ok(id)
    }

    async fn update_generic_oidc_provider(
        &self,
        provider_id: &str,
        provider: &GenericOidcProvider,
    ) -> Result<(), IdentityError> {
        let mut state = self.record("update_generic_oidc_provider");
        let idp = state
            .providers
            .iter_mut()
            .find(|idp| idp.id == provider_id)
            .ok_or_else(|| err("update identity provider", ErrorCode::NotFound, "IDP not found"))?;
        if idp.issuer == provider.issuer
            && idp.client_id == provider.client_id
            && idp.scopes == provider.scopes
        {
            return Err(no_changes("update identity provider"));
        }
        idp.issuer.clone_from(&provider.issuer);
        idp.client_id.clone_from(&provider.client_id);
        idp.scopes.clone_from(&provider.scopes);
        Ok(())
    }

    async fn add_provider_to_login_policy(&self, provider_id: &str) -> Result<(), IdentityError> {
        let mut state = self.record("add_provider_to_login_policy");
        if !state.login_policy.insert(provider_id.to_string()) {
            return Err(err(
                "add identity provider to login policy",
                ErrorCode::AlreadyExists,
                "IDP already exists on login policy",
            ));
        }
        Ok(())
    }
}

fn to_application(app: &FakeApplication) -> Application {
    Application {
        id: app.id.clone(),
        name: app.name.clone(),
        client_id: app.client_id.clone(),
        redirect_uris: app.redirect_uris.clone(),
        post_logout_redirect_uris: app.post_logout_redirect_uris.clone(),
    }
}

/// Secrets kept in a map keyed by namespace and name
#[derive(Debug, Default)]
pub struct InMemorySecretStore {
    pub secrets: Mutex<BTreeMap<(String, String), SecretData>>,
    pub writes: Mutex<usize>,
}

impl InMemorySecretStore {
    pub fn with_secret(self, namespace: &str, name: &str, data: &[(&str, &str)]) -> Self {
        self.secrets.lock().unwrap().insert(
            (namespace.to_string(), name.to_string()),
            data.iter()
                .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
                .collect(),
        );
        self
    }

    pub fn secret(&self, namespace: &str, name: &str) -> Option<SecretData> {
        self.secrets
            .lock()
            .unwrap()
            .get(&(namespace.to_string(), name.to_string()))
            .cloned()
    }

    pub fn writes(&self) -> usize {
        *self.writes.lock().unwrap()
    }
}

#[async_trait]
impl SecretStore for InMemorySecretStore {
    async fn get(
        &self,
        namespace: &str,
        name: &str,
    ) -> Result<Option<SecretData>, SecretStoreError> {
        Ok(self.secret(namespace, name))
    }

    async fn create(
        &self,
        namespace: &str,
        name: &str,
        data: SecretData,
    ) -> Result<(), SecretStoreError> {
        let mut secrets = self.secrets.lock().unwrap();
        let key = (namespace.to_string(), name.to_string());
        if secrets.contains_key(&key) {
            return Err(SecretStoreError::AlreadyExists {
                namespace: namespace.to_string(),
                name: name.to_string(),
            });
        }
        secrets.insert(key, data);
        *self.writes.lock().unwrap() += 1;
        Ok(())
    }

    async fn create_or_update(
        &self,
        namespace: &str,
        name: &str,
        mutate: &SecretMutator<'_>,
    ) -> Result<WriteOutcome, SecretStoreError> {
        let Some(current) = self.secret(namespace, name) else {
            let mut data = SecretData::new();
            if mutate(&mut data) == Mutation::Abandon {
                return Ok(WriteOutcome::Abandoned);
            }
            self.create(namespace, name, data).await?;
            return Ok(WriteOutcome::Created);
        };

        let mut data = current.clone();
        if mutate(&mut data) == Mutation::Abandon {
            return Ok(WriteOutcome::Abandoned);
        }
        if data == current {
            return Ok(WriteOutcome::Unchanged);
        }
        self.secrets
            .lock()
            .unwrap()
            .insert((namespace.to_string(), name.to_string()), data);
        *self.writes.lock().unwrap() += 1;
        Ok(WriteOutcome::Updated)
    }
}

/// Descriptor with one user and one identity provider
pub fn descriptor(redirect_uri: &str) -> BootstrapDescriptor {
    BootstrapDescriptor::from_yaml_str(&format!(
        r#"
project:
  id: p1
  name: demo
application:
  id: app1
  name: demo-app
  redirectUri: "{redirect_uri}"
users:
  - email: admin@example.com
    firstName: Admin
    lastName: User
    password: s3cret!
identityProviders:
  - name: github
    issuer: "https://token.actions.githubusercontent.com"
    clientId: abc
    clientSecret: def
"#
    ))
    .unwrap()
}

/// Seed an existing project and application whose secret can no longer be read
pub fn seed_existing_application(state: &mut FakeState, redirect_uri: &str) {
    state.projects.push(FakeProject {
        organization_id: ORG_ID.to_string(),
        id: "p1".to_string(),
        name: "demo".to_string(),
    });
    state.applications.push(FakeApplication {
        project_id: "p1".to_string(),
        id: "app1".to_string(),
        name: "demo-app".to_string(),
        client_id: Some("seeded-client".to_string()),
        client_secret: "seeded-secret".to_string(),
        redirect_uris: vec![redirect_uri.to_string()],
        post_logout_redirect_uris: Vec::new(),
    });
}
