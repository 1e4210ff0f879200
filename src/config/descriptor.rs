//! Desired-state descriptor loaded from the `--config-path` file.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Errors raised while loading or validating the descriptor
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("unable to read config file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("unable to parse config file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
    #[error("unable to parse config: {0}")]
    Syntax(#[from] serde_yaml::Error),
    #[error("invalid config: {field} {reason}")]
    Invalid { field: String, reason: String },
}

impl ConfigError {
    fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Invalid {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Everything the bootstrap run should provision
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BootstrapDescriptor {
    pub project: ProjectSpec,
    pub application: ApplicationSpec,
    #[serde(default)]
    pub users: Vec<StaticUserSpec>,
    #[serde(default)]
    pub identity_providers: Vec<IdentityProviderSpec>,
}

/// Project to create in the default organization
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectSpec {
    /// Caller-chosen stable project ID
    pub id: String,
    pub name: String,
}

/// OIDC application to create inside the project
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationSpec {
    /// Requested application ID. ZITADEL may assign a different one, so the
    /// authoritative ID is always resolved by lookup.
    pub id: String,
    pub name: String,
    pub redirect_uri: String,
    #[serde(default)]
    pub post_logout_redirect_uris: Vec<String>,
}

/// Human user created with a fixed password
#[derive(Clone, Deserialize, Serialize, Zeroize, ZeroizeOnDrop)]
#[serde(rename_all = "camelCase")]
pub struct StaticUserSpec {
    /// Used as username and as user ID
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub password: String,
}

impl fmt::Debug for StaticUserSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StaticUserSpec")
            .field("email", &self.email)
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Generic OIDC identity provider federated into ZITADEL
#[derive(Clone, Deserialize, Serialize, Zeroize, ZeroizeOnDrop)]
#[serde(rename_all = "camelCase")]
pub struct IdentityProviderSpec {
    /// Unique provider name, used as the identity key
    pub name: String,
    pub issuer: String,
    pub client_id: String,
    pub client_secret: String,
    #[serde(default)]
    pub scopes: Vec<String>,
    /// Offer the provider on the login screen
    #[serde(default = "default_add_to_login_policy")]
    pub add_to_login_policy: bool,
}

fn default_add_to_login_policy() -> bool {
    true
}

impl IdentityProviderSpec {
    /// Configured scopes, or the OIDC defaults when none are given
    #[must_use]
    pub fn effective_scopes(&self) -> Vec<String> {
        if self.scopes.is_empty() {
            crate::constants::DEFAULT_IDP_SCOPES
                .iter()
                .map(|s| (*s).to_string())
                .collect()
        } else {
            self.scopes.clone()
        }
    }
}

impl fmt::Debug for IdentityProviderSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IdentityProviderSpec")
            .field("name", &self.name)
            .field("issuer", &self.issuer)
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .field("scopes", &self.scopes)
            .field("add_to_login_policy", &self.add_to_login_policy)
            .finish()
    }
}

impl BootstrapDescriptor {
    /// Read, parse and validate a descriptor file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let descriptor: Self = serde_yaml::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        descriptor.validate()?;
        debug!(
            path = %path.display(),
            users = descriptor.users.len(),
            identity_providers = descriptor.identity_providers.len(),
            "Loaded bootstrap descriptor"
        );
        Ok(descriptor)
    }

    /// Parse and validate a descriptor from a string. JSON is accepted as well.
    pub fn from_yaml_str(raw: &str) -> Result<Self, ConfigError> {
        let descriptor: Self = serde_yaml::from_str(raw)?;
        descriptor.validate()?;
        Ok(descriptor)
    }

    /// Check the invariants the ensurers rely on
    pub fn validate(&self) -> Result<(), ConfigError> {
        require("project.id", &self.project.id)?;
        require("project.name", &self.project.name)?;
        require("application.id", &self.application.id)?;
        require("application.name", &self.application.name)?;
        require("application.redirectUri", &self.application.redirect_uri)?;

        let mut emails = HashSet::new();
        for (i, user) in self.users.iter().enumerate() {
            let field = format!("users[{i}]");
            if !user.email.contains('@') {
                return Err(ConfigError::invalid(
                    format!("{field}.email"),
                    format!("'{}' is not an email address", user.email),
                ));
            }
            if !emails.insert(user.email.to_lowercase()) {
                return Err(ConfigError::invalid(
                    format!("{field}.email"),
                    format!("'{}' is listed more than once", user.email),
                ));
            }
            require(&format!("{field}.password"), &user.password)?;
        }

        let mut names = HashSet::new();
        for (i, idp) in self.identity_providers.iter().enumerate() {
            let field = format!("identityProviders[{i}]");
            require(&format!("{field}.name"), &idp.name)?;
            require(&format!("{field}.issuer"), &idp.issuer)?;
            if !names.insert(idp.name.as_str()) {
                return Err(ConfigError::invalid(
                    format!("{field}.name"),
                    format!("'{}' is listed more than once", idp.name),
                ));
            }
        }

        Ok(())
    }
}

fn require(field: &str, value: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::invalid(field, "must not be empty"));
    }
    Ok(())
}
