//! Request and response shapes exchanged with the identity service.

use std::fmt;
use zeroize::Zeroizing;

/// A credential that is wiped on drop and never printed
#[derive(Clone, Default, PartialEq, Eq)]
pub struct SecretString(Zeroizing<String>);

impl SecretString {
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(Zeroizing::new(value.into()))
    }

    #[must_use]
    pub fn expose(&self) -> &str {
        self.0.as_str()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<String> for SecretString {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl From<&str> for SecretString {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl fmt::Debug for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SecretString(<redacted>)")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Organization {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateProject {
    pub organization_id: String,
    pub project_id: String,
    pub name: String,
}

/// OIDC client parameters
///
/// The grant, app, auth and token types are fixed: authorization code flow for
/// a confidential web application that authenticates with a POSTed secret and
/// receives bearer access tokens (OIDC 1.0).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OidcSettings {
    pub redirect_uris: Vec<String>,
    pub post_logout_redirect_uris: Vec<String>,
}

impl OidcSettings {
    pub const RESPONSE_TYPE: &'static str = "OIDC_RESPONSE_TYPE_CODE";
    pub const GRANT_TYPE: &'static str = "OIDC_GRANT_TYPE_AUTHORIZATION_CODE";
    pub const APP_TYPE: &'static str = "OIDC_APP_TYPE_WEB";
    pub const AUTH_METHOD_TYPE: &'static str = "OIDC_AUTH_METHOD_TYPE_POST";
    pub const ACCESS_TOKEN_TYPE: &'static str = "OIDC_TOKEN_TYPE_BEARER";
    pub const VERSION: &'static str = "OIDC_VERSION_1_0";
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateApplication {
    pub project_id: String,
    pub application_id: String,
    pub name: String,
    pub oidc: OidcSettings,
}

/// Result of a successful application creation
#[derive(Debug, Clone, Default)]
pub struct CreatedApplication {
    /// ID assigned by the service, which is not always the requested one
    pub application_id: String,
    pub client_id: Option<String>,
    /// Only present on creation; it cannot be read back later
    pub client_secret: Option<SecretString>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Application {
    pub id: String,
    pub name: String,
    pub client_id: Option<String>,
    pub redirect_uris: Vec<String>,
    pub post_logout_redirect_uris: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateApplication {
    pub project_id: String,
    pub application_id: String,
    pub oidc: OidcSettings,
}

#[derive(Clone)]
pub struct CreateHumanUser {
    pub organization_id: String,
    pub user_id: String,
    pub username: String,
    pub email: String,
    pub given_name: String,
    pub family_name: String,
    pub password: SecretString,
    pub password_change_required: bool,
}

impl fmt::Debug for CreateHumanUser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CreateHumanUser")
            .field("organization_id", &self.organization_id)
            .field("user_id", &self.user_id)
            .field("username", &self.username)
            .field("given_name", &self.given_name)
            .field("family_name", &self.family_name)
            .field("password_change_required", &self.password_change_required)
            .finish_non_exhaustive()
    }
}

/// Profile update of an existing human user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateHumanUser {
    /// Authoritative ID, not necessarily the username
    pub user_id: String,
    pub username: String,
    pub given_name: String,
    pub family_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityProvider {
    pub id: String,
}

#[derive(Debug, Clone)]
pub struct GenericOidcProvider {
    pub name: String,
    pub issuer: String,
    pub client_id: String,
    pub client_secret: SecretString,
    pub scopes: Vec<String>,
}
