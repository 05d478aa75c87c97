//! Secret store access.

mod client;
pub mod manager;
pub mod providers;

pub use client::{SecretStoreClient, UpsertOutcome, UpsertStage};
pub use manager::SecretManager;
pub use providers::AwsSecretManager;
