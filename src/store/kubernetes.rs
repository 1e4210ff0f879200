//! Kubernetes-backed [`SecretStore`].

use super::{Mutation, SecretData, SecretMutator, SecretStore, SecretStoreError, WriteOutcome};
use crate::constants::{MANAGED_BY_LABEL, MANAGED_BY_VALUE, MAX_SECRET_WRITE_ATTEMPTS};
use async_trait::async_trait;
use k8s_openapi::api::core::v1::Secret;
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use k8s_openapi::ByteString;
use kube::api::PostParams;
use kube::{Api, Client};
use std::collections::BTreeMap;
use tracing::{debug, info};

/// Secrets stored as `Opaque` Kubernetes secrets
#[derive(Clone)]
pub struct KubeSecretStore {
    client: Client,
}

impl std::fmt::Debug for KubeSecretStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KubeSecretStore").finish_non_exhaustive()
    }
}

impl KubeSecretStore {
    #[must_use]
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    fn api(&self, namespace: &str) -> Api<Secret> {
        Api::namespaced(self.client.clone(), namespace)
    }

    /// One read-modify-write round
    async fn apply_once(
        &self,
        namespace: &str,
        name: &str,
        mutate: &SecretMutator<'_>,
    ) -> Result<WriteOutcome, SecretStoreError> {
        let secrets = self.api(namespace);

        let Some(mut existing) = secrets.get_opt(name).await? else {
            let mut data = SecretData::new();
            if mutate(&mut data) == Mutation::Abandon {
                return Ok(WriteOutcome::Abandoned);
            }
            self.create(namespace, name, data).await?;
            return Ok(WriteOutcome::Created);
        };

        let current = decode(namespace, name, &existing)?;
        let mut data = current.clone();
        if mutate(&mut data) == Mutation::Abandon {
            return Ok(WriteOutcome::Abandoned);
        }
        if data == current {
            return Ok(WriteOutcome::Unchanged);
        }

        // Keeps metadata.resourceVersion, so the replace fails with 409 when
        // the secret changed since the read
        existing.data = Some(encode(data));
        existing.string_data = None;
        existing
            .metadata
            .labels
            .get_or_insert_with(BTreeMap::new)
            .insert(MANAGED_BY_LABEL.to_string(), MANAGED_BY_VALUE.to_string());
        secrets
            .replace(name, &PostParams::default(), &existing)
            .await?;
        Ok(WriteOutcome::Updated)
    }
}

fn is_conflict(err: &kube::Error) -> bool {
    matches!(err, kube::Error::Api(e) if e.code == 409)
}

fn decode(namespace: &str, name: &str, secret: &Secret) -> Result<SecretData, SecretStoreError> {
    let mut data = SecretData::new();
    for (key, value) in secret.data.iter().flatten() {
        let text = String::from_utf8(value.0.clone()).map_err(|source| SecretStoreError::Decode {
            namespace: namespace.to_string(),
            name: name.to_string(),
            key: key.clone(),
            source,
        })?;
        data.insert(key.clone(), text);
    }
    Ok(data)
}

fn encode(data: SecretData) -> BTreeMap<String, ByteString> {
    data.into_iter()
        .map(|(key, value)| (key, ByteString(value.into_bytes())))
        .collect()
}

#[async_trait]
impl SecretStore for KubeSecretStore {
    async fn get(
        &self,
        namespace: &str,
        name: &str,
    ) -> Result<Option<SecretData>, SecretStoreError> {
        match self.api(namespace).get_opt(name).await? {
            Some(secret) => decode(namespace, name, &secret).map(Some),
            None => Ok(None),
        }
    }

    async fn create(
        &self,
        namespace: &str,
        name: &str,
        data: SecretData,
    ) -> Result<(), SecretStoreError> {
        let secret = Secret {
            metadata: ObjectMeta {
                name: Some(name.to_string()),
                namespace: Some(namespace.to_string()),
                labels: Some(BTreeMap::from([(
                    MANAGED_BY_LABEL.to_string(),
                    MANAGED_BY_VALUE.to_string(),
                )])),
                ..Default::default()
            },
            type_: Some("Opaque".to_string()),
            data: Some(encode(data)),
            ..Default::default()
        };

        match self.api(namespace).create(&PostParams::default(), &secret).await {
            Ok(_) => {
                info!(namespace, name, "Created secret");
                Ok(())
            }
            Err(e) if is_conflict(&e) => Err(SecretStoreError::AlreadyExists {
                namespace: namespace.to_string(),
                name: name.to_string(),
            }),
            Err(e) => Err(e.into()),
        }
    }

    async fn create_or_update(
        &self,
        namespace: &str,
        name: &str,
        mutate: &SecretMutator<'_>,
    ) -> Result<WriteOutcome, SecretStoreError> {
        for attempt in 1..=MAX_SECRET_WRITE_ATTEMPTS {
            match self.apply_once(namespace, name, mutate).await {
                Err(SecretStoreError::AlreadyExists { .. }) => {
                    debug!(namespace, name, attempt, "Secret created concurrently, retrying");
                }
                Err(SecretStoreError::Kube(e)) if is_conflict(&e) => {
                    debug!(namespace, name, attempt, "Secret modified concurrently, retrying");
                }
                other => return other,
            }
        }
        Err(SecretStoreError::Conflict {
            namespace: namespace.to_string(),
            name: name.to_string(),
            attempts: MAX_SECRET_WRITE_ATTEMPTS,
        })
    }
}
