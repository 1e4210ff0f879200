//! # Constants
//!
//! Shared constants used throughout the bootstrap run.
//!
//! These values represent reasonable defaults and can be overridden via
//! command-line flags or environment variables where applicable.

/// Key holding the OIDC client ID in the produced credentials secret
pub const CLIENT_ID_KEY: &str = "client_id";

/// Key holding the OIDC client secret in the produced credentials secret
pub const CLIENT_SECRET_KEY: &str = "client_secret";

/// Label marking secrets written by this tool
pub const MANAGED_BY_LABEL: &str = "app.kubernetes.io/managed-by";

/// Value of [`MANAGED_BY_LABEL`]
pub const MANAGED_BY_VALUE: &str = "zitadel-init";

/// Default namespace for the produced client credentials secret
pub const DEFAULT_NAMESPACE: &str = "metal-control-plane";

/// Default name of the produced client credentials secret
pub const DEFAULT_CREDENTIALS_SECRET_NAME: &str = "zitadel-client-credentials";

/// Default name of the secret holding the bootstrap personal access token
pub const DEFAULT_PAT_SECRET_NAME: &str = "iam-admin-pat";

/// Default key of the personal access token inside its secret
pub const DEFAULT_PAT_SECRET_KEY: &str = "pat";

/// Default ZITADEL endpoint host
pub const DEFAULT_ZITADEL_ENDPOINT: &str = "localhost";

/// Default ZITADEL port
pub const DEFAULT_ZITADEL_PORT: u16 = 8080;

/// Default interval between reads of the bootstrap token secret (seconds)
pub const DEFAULT_PAT_POLL_INTERVAL_SECS: u64 = 2;

/// Default timeout for a single ZITADEL API request (seconds)
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Maximum attempts of a conditional secret write before giving up on conflicts
pub const MAX_SECRET_WRITE_ATTEMPTS: usize = 5;

/// Scopes requested from an external identity provider when none are configured
pub const DEFAULT_IDP_SCOPES: [&str; 3] = ["openid", "profile", "email"];
