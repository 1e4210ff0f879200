//! # Credential Waiter
//!
//! Waits for the bootstrap personal access token to show up in its secret.
//!
//! The secret is written by ZITADEL's own setup job, which may still be
//! running when the bootstrap run starts. A missing secret is therefore
//! retried forever; every other read failure is fatal.
//!
//! The polling logic is a small state machine. [`WaiterState::on_event`] is a
//! pure transition function; [`wait_for_token`] only produces the events
//! (secret reads and cancellation) and sleeps between reads.

use crate::identity::SecretString;
use crate::store::{SecretData, SecretStore, SecretStoreError};
use std::time::Duration;
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, info_span, Instrument};

#[derive(Debug, Error)]
pub enum WaitError {
    #[error("waiting for the bootstrap token was cancelled")]
    Cancelled,
    #[error("unable to read bootstrap token secret {namespace}/{name}: {source}")]
    Read {
        namespace: String,
        name: String,
        #[source]
        source: SecretStoreError,
    },
    #[error("key '{key}' of secret {namespace}/{name} is missing or empty")]
    EmptyToken {
        namespace: String,
        name: String,
        key: String,
    },
}

/// Where the bootstrap token is stored
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenLocation {
    pub namespace: String,
    pub name: String,
    pub key: String,
}

#[derive(Debug)]
pub enum WaiterState {
    /// Secret not seen yet after `attempts` reads
    Waiting { attempts: u32 },
    Found(SecretString),
    Failed(WaitError),
    Cancelled,
}

#[derive(Debug)]
pub enum WaiterEvent {
    Read(Result<Option<SecretData>, SecretStoreError>),
    Cancelled,
}

impl WaiterState {
    #[must_use]
    pub fn on_event(self, event: WaiterEvent, location: &TokenLocation) -> Self {
        let attempts = match self {
            Self::Waiting { attempts } => attempts,
            terminal => return terminal,
        };

        match event {
            WaiterEvent::Cancelled => Self::Cancelled,
            WaiterEvent::Read(Ok(None)) => Self::Waiting {
                attempts: attempts.saturating_add(1),
            },
            WaiterEvent::Read(Ok(Some(data))) => {
                let token = data
                    .get(&location.key)
                    .map(|value| value.trim())
                    .filter(|value| !value.is_empty());
                match token {
                    Some(token) => Self::Found(SecretString::from(token)),
                    None => Self::Failed(WaitError::EmptyToken {
                        namespace: location.namespace.clone(),
                        name: location.name.clone(),
                        key: location.key.clone(),
                    }),
                }
            }
            WaiterEvent::Read(Err(source)) => Self::Failed(WaitError::Read {
                namespace: location.namespace.clone(),
                name: location.name.clone(),
                source,
            }),
        }
    }

    /// Final result of a terminal state; a waiting state is handed back
    pub fn into_outcome(self) -> Result<Result<SecretString, WaitError>, Self> {
        match self {
            Self::Found(token) => Ok(Ok(token)),
            Self::Failed(err) => Ok(Err(err)),
            Self::Cancelled => Ok(Err(WaitError::Cancelled)),
            waiting @ Self::Waiting { .. } => Err(waiting),
        }
    }
}

/// Poll the token secret every `interval` until the token is available
pub async fn wait_for_token(
    store: &dyn SecretStore,
    location: &TokenLocation,
    interval: Duration,
    cancel: &CancellationToken,
) -> Result<SecretString, WaitError> {
    let span = info_span!(
        "bootstrap.wait_for_token",
        namespace = %location.namespace,
        secret = %location.name,
    );

    async move {
        info!("Waiting for bootstrap token");
        let mut state = WaiterState::Waiting { attempts: 0 };

        loop {
            let event = tokio::select! {
                biased;
                () = cancel.cancelled() => WaiterEvent::Cancelled,
                result = store.get(&location.namespace, &location.name) => WaiterEvent::Read(result),
            };

            state = match state.on_event(event, location).into_outcome() {
                Ok(outcome) => {
                    if outcome.is_ok() {
                        info!("Bootstrap token found");
                    }
                    return outcome;
                }
                Err(waiting) => waiting,
            };

            if let WaiterState::Waiting { attempts } = state {
                debug!(attempts, retry_in = ?interval, "Bootstrap token secret not found yet");
            }

            tokio::select! {
                biased;
                () = cancel.cancelled() => return Err(WaitError::Cancelled),
                () = tokio::time::sleep(interval) => {}
            }
        }
    }
    .instrument(span)
    .await
}
