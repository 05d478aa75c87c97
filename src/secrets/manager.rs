use async_trait::async_trait;

use crate::error::PaykeysError;

/// A remote store of named secrets.
///
/// `update` must fail with [`PaykeysError::NotFound`] when the name does not
/// exist yet, so callers can fall back to `create`. Every other failure uses
/// a different variant.
#[async_trait]
pub trait SecretManager: Send + Sync {
    /// Short backend name for messages (e.g. "aws").
    fn kind(&self) -> &str;

    /// Who the configured credentials belong to (an account id for AWS).
    async fn identity(&self) -> Result<String, PaykeysError>;

    /// Create a new secret and return its reference.
    async fn create(
        &self,
        name: &str,
        value: &str,
        description: &str,
    ) -> Result<String, PaykeysError>;

    /// Replace the value and description of an existing secret and return its reference.
    async fn update(
        &self,
        name: &str,
        value: &str,
        description: &str,
    ) -> Result<String, PaykeysError>;
}
