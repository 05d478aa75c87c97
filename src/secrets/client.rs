//! Create-or-update semantics on top of a [`SecretManager`].

use std::fmt;

use secrecy::ExposeSecret;

use crate::credentials::SecretRecord;
use crate::error::{PaykeysError, Result};
use crate::secrets::manager::SecretManager;

/// Which half of the upsert failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertStage {
    Serialize,
    Update,
    Create,
}

/// What happened to one secret.
#[derive(Debug)]
pub enum UpsertOutcome {
    /// An existing secret was overwritten.
    Updated(String),
    /// The secret did not exist and was created.
    Created(String),
    /// The secret was not stored. The run goes on without it.
    Failed {
        stage: UpsertStage,
        error: PaykeysError,
    },
}

impl UpsertOutcome {
    /// The stored reference, or `None` when the upsert failed.
    pub fn reference(&self) -> Option<&str> {
        match self {
            UpsertOutcome::Updated(r) | UpsertOutcome::Created(r) => Some(r),
            UpsertOutcome::Failed { .. } => None,
        }
    }

    /// One-line operator message for this outcome.
    pub fn message(&self, name: &str) -> String {
        match self {
            UpsertOutcome::Updated(_) => format!("Updated existing secret: {}", name),
            UpsertOutcome::Created(_) => format!("Created new secret: {}", name),
            UpsertOutcome::Failed { stage, error } => {
                format!("Error {} secret {}: {}", stage, name, error)
            }
        }
    }
}

impl fmt::Display for UpsertStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            UpsertStage::Serialize => "serializing",
            UpsertStage::Update => "updating",
            UpsertStage::Create => "creating",
        })
    }
}

/// A connected secret store session.
///
/// Construct one per run with [`SecretStoreClient::connect`] and pass it by
/// reference to whatever needs to store secrets.
pub struct SecretStoreClient<M> {
    manager: M,
    account: String,
}

impl<M: SecretManager> SecretStoreClient<M> {
    /// Verify the backend is reachable with the configured credentials.
    ///
    /// Any failure is fatal for the run and comes back as [`PaykeysError::Auth`].
    pub async fn connect(manager: M) -> Result<Self> {
        let account = identify(&manager).await?;
        tracing::info!(backend = manager.kind(), %account, "connected to secret store");
        Ok(Self { manager, account })
    }

    /// Account identifier captured at connect time.
    pub fn account(&self) -> &str {
        &self.account
    }

    pub fn kind(&self) -> &str {
        self.manager.kind()
    }

    /// Re-run the identity check against the backend.
    pub async fn identify(&self) -> Result<String> {
        identify(&self.manager).await
    }

    /// Store `record`, updating in place first and creating it only when the
    /// backend reports that the name does not exist.
    pub async fn upsert(&self, record: &SecretRecord) -> UpsertOutcome {
        let value = match record.value.to_secret_json() {
            Ok(value) => value,
            Err(error) => {
                return UpsertOutcome::Failed {
                    stage: UpsertStage::Serialize,
                    error,
                };
            }
        };

        let updated = self
            .manager
            .update(&record.name, value.expose_secret(), &record.description)
            .await;

        match updated {
            Ok(reference) => {
                tracing::info!(secret = %record.name, "updated existing secret");
                UpsertOutcome::Updated(reference)
            }
            Err(PaykeysError::NotFound(_)) => {
                tracing::debug!(secret = %record.name, "secret not found, creating");
                match self
                    .manager
                    .create(&record.name, value.expose_secret(), &record.description)
                    .await
                {
                    Ok(reference) => {
                        tracing::info!(secret = %record.name, "created new secret");
                        UpsertOutcome::Created(reference)
                    }
                    Err(error) => {
                        tracing::warn!(secret = %record.name, %error, "create failed");
                        UpsertOutcome::Failed {
                            stage: UpsertStage::Create,
                            error,
                        }
                    }
                }
            }
            Err(error) => {
                tracing::warn!(secret = %record.name, %error, "update failed");
                UpsertOutcome::Failed {
                    stage: UpsertStage::Update,
                    error,
                }
            }
        }
    }
}

async fn identify<M: SecretManager>(manager: &M) -> Result<String> {
    manager.identity().await.map_err(|e| match e {
        PaykeysError::Auth(_) => e,
        other => PaykeysError::auth(format!(
            "Error connecting to {}: {}",
            manager.kind(),
            other
        )),
    })
}
