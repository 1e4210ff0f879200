//! # Secret Store
//!
//! Abstract access to the namespaced secrets holding the bootstrap token and
//! the issued client credentials.
//!
//! Writes go through [`SecretStore::create_or_update`], a read-modify-write
//! with a caller-supplied mutator. The mutator sees the current data (empty for
//! a missing secret) and either commits its changes or abandons the write.

mod kubernetes;

use async_trait::async_trait;
use std::collections::BTreeMap;
use thiserror::Error;

pub use kubernetes::KubeSecretStore;

/// String data of a secret, keyed by data key
pub type SecretData = BTreeMap<String, String>;

/// Mutator passed to [`SecretStore::create_or_update`]
pub type SecretMutator<'a> = dyn Fn(&mut SecretData) -> Mutation + Send + Sync + 'a;

/// Decision of a mutator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mutation {
    /// Write the mutated data
    Commit,
    /// Leave the stored secret untouched
    Abandon,
}

/// What a [`SecretStore::create_or_update`] call did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    Created,
    Updated,
    /// The mutator committed but nothing changed, so no write was sent
    Unchanged,
    Abandoned,
}

#[derive(Debug, Error)]
pub enum SecretStoreError {
    #[error("secret {namespace}/{name} already exists")]
    AlreadyExists { namespace: String, name: String },
    #[error("secret {namespace}/{name} was modified concurrently {attempts} times in a row")]
    Conflict {
        namespace: String,
        name: String,
        attempts: usize,
    },
    #[error("key '{key}' of secret {namespace}/{name} is not valid UTF-8")]
    Decode {
        namespace: String,
        name: String,
        key: String,
        #[source]
        source: std::string::FromUtf8Error,
    },
    #[error("Kubernetes API error: {0}")]
    Kube(#[from] kube::Error),
}

#[async_trait]
pub trait SecretStore: Send + Sync {
    /// Data of a secret, `None` when it does not exist
    async fn get(&self, namespace: &str, name: &str)
        -> Result<Option<SecretData>, SecretStoreError>;

    /// Create a secret, failing with [`SecretStoreError::AlreadyExists`] if present
    async fn create(
        &self,
        namespace: &str,
        name: &str,
        data: SecretData,
    ) -> Result<(), SecretStoreError>;

    /// Atomically apply `mutate` to the secret, creating it when missing
    ///
    /// Keys the mutator does not touch keep their stored values. The mutator
    /// may run more than once when the secret is modified concurrently.
    async fn create_or_update(
        &self,
        namespace: &str,
        name: &str,
        mutate: &SecretMutator<'_>,
    ) -> Result<WriteOutcome, SecretStoreError>;
}
