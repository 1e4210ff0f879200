//! Runtime parameters taken from flags, with environment variable fallbacks.

use crate::constants::{
    DEFAULT_CREDENTIALS_SECRET_NAME, DEFAULT_NAMESPACE, DEFAULT_PAT_POLL_INTERVAL_SECS,
    DEFAULT_PAT_SECRET_KEY, DEFAULT_PAT_SECRET_NAME, DEFAULT_REQUEST_TIMEOUT_SECS,
    DEFAULT_ZITADEL_ENDPOINT, DEFAULT_ZITADEL_PORT,
};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use std::time::Duration;

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Json,
    Text,
}

/// Initialize ZITADEL with the required project, application, users and
/// identity providers
#[derive(Parser, Clone)]
#[command(name = "zitadel-init", version, long_about = None)]
pub struct Settings {
    /// ZITADEL server address
    #[arg(long, env = "ZITADEL_ENDPOINT", default_value = DEFAULT_ZITADEL_ENDPOINT)]
    pub zitadel_endpoint: String,

    /// ZITADEL server port
    #[arg(long, env = "ZITADEL_PORT", default_value_t = DEFAULT_ZITADEL_PORT)]
    pub zitadel_port: u16,

    /// If defined, overwrites the Host header (authority) sent to ZITADEL
    #[arg(long, env = "ZITADEL_EXTERNAL_DOMAIN")]
    pub zitadel_external_domain: Option<String>,

    /// Connect without TLS, do not use in production
    #[arg(
        long,
        env = "ZITADEL_INSECURE",
        default_value_t = true,
        action = clap::ArgAction::Set
    )]
    pub zitadel_insecure: bool,

    /// Accept untrusted TLS certificates
    #[arg(long, env = "ZITADEL_SKIP_VERIFY_TLS")]
    pub zitadel_skip_verify_tls: bool,

    /// Personal access token. When set, the token secret is not awaited.
    #[arg(long, env = "ZITADEL_PAT", hide_env_values = true)]
    pub zitadel_pat: Option<String>,

    /// Namespace of the client credentials secret
    #[arg(long, env = "NAMESPACE", default_value = DEFAULT_NAMESPACE)]
    pub namespace: String,

    /// Name of the client credentials secret
    #[arg(long = "secret", env = "SECRET_NAME", default_value = DEFAULT_CREDENTIALS_SECRET_NAME)]
    pub secret_name: String,

    /// Name of the secret holding the personal access token
    #[arg(long = "pat-secret", env = "PAT_SECRET_NAME", default_value = DEFAULT_PAT_SECRET_NAME)]
    pub pat_secret_name: String,

    /// Key of the personal access token inside its secret
    #[arg(long, env = "PAT_SECRET_KEY", default_value = DEFAULT_PAT_SECRET_KEY)]
    pub pat_secret_key: String,

    /// Namespace of the personal access token secret (defaults to --namespace)
    #[arg(long, env = "PAT_NAMESPACE")]
    pub pat_namespace: Option<String>,

    /// Path of the bootstrap descriptor (YAML or JSON)
    #[arg(long, env = "CONFIG_PATH")]
    pub config_path: PathBuf,

    /// Seconds between reads of the personal access token secret
    #[arg(
        long,
        env = "PAT_POLL_INTERVAL_SECS",
        default_value_t = DEFAULT_PAT_POLL_INTERVAL_SECS,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub poll_interval_secs: u64,

    /// Timeout of a single ZITADEL request in seconds
    #[arg(
        long,
        env = "REQUEST_TIMEOUT_SECS",
        default_value_t = DEFAULT_REQUEST_TIMEOUT_SECS,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub request_timeout_secs: u64,

    /// Log format
    #[arg(long, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Json)]
    pub log_format: LogFormat,
}

impl std::fmt::Debug for Settings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Settings")
            .field("zitadel_endpoint", &self.zitadel_endpoint)
            .field("zitadel_port", &self.zitadel_port)
            .field("zitadel_external_domain", &self.zitadel_external_domain)
            .field("zitadel_insecure", &self.zitadel_insecure)
            .field("zitadel_skip_verify_tls", &self.zitadel_skip_verify_tls)
            .field("zitadel_pat", &self.zitadel_pat.as_ref().map(|_| "<redacted>"))
            .field("namespace", &self.namespace)
            .field("secret_name", &self.secret_name)
            .field("pat_secret_name", &self.pat_secret_name)
            .field("pat_namespace", &self.pat_namespace())
            .field("config_path", &self.config_path)
            .finish_non_exhaustive()
    }
}

impl Settings {
    /// Base URL of the ZITADEL HTTP gateway
    #[must_use]
    pub fn base_url(&self) -> String {
        let scheme = if self.zitadel_insecure { "http" } else { "https" };
        format!("{scheme}://{}:{}", self.zitadel_endpoint, self.zitadel_port)
    }

    /// Namespace to read the personal access token from
    #[must_use]
    pub fn pat_namespace(&self) -> &str {
        self.pat_namespace.as_deref().unwrap_or(&self.namespace)
    }

    #[must_use]
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }

    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
