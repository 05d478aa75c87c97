use async_trait::async_trait;
use aws_config::meta::region::RegionProviderChain;
use aws_config::profile::ProfileFileCredentialsProvider;
use aws_sdk_secretsmanager::Client;
use aws_sdk_secretsmanager::config::Region;
use aws_sdk_secretsmanager::error::DisplayErrorContext;

use crate::config::AwsSettings;
use crate::error::PaykeysError;
use crate::secrets::manager::SecretManager;

/// Region used when neither the config nor the environment names one.
pub const FALLBACK_REGION: &str = "us-west-2";

/// AWS Secrets Manager, with STS for the identity check.
pub struct AwsSecretManager {
    client: Client,
    sts: aws_sdk_sts::Client,
}

impl AwsSecretManager {
    pub fn new(client: Client, sts: aws_sdk_sts::Client) -> Self {
        Self { client, sts }
    }

    /// Build clients from the standard AWS environment, honouring an explicit
    /// profile and region when configured. Nothing is sent over the network
    /// until the first call.
    pub async fn from_settings(settings: &AwsSettings) -> Self {
        let region_provider = settings
            .region
            .clone()
            .map(Region::new)
            .map(RegionProviderChain::first_try)
            .unwrap_or_else(RegionProviderChain::default_provider)
            .or_else(Region::new(FALLBACK_REGION));

        let mut config_loader = aws_config::from_env().region(region_provider);

        if let Some(profile_name) = &settings.profile {
            let credentials_provider = ProfileFileCredentialsProvider::builder()
                .profile_name(profile_name)
                .build();
            config_loader = config_loader
                .profile_name(profile_name)
                .credentials_provider(credentials_provider);
        }

        let shared_config = config_loader.load().await;
        tracing::debug!(
            region = ?shared_config.region(),
            profile = ?settings.profile,
            "loaded AWS config"
        );

        Self::new(
            Client::new(&shared_config),
            aws_sdk_sts::Client::new(&shared_config),
        )
    }
}

#[async_trait]
impl SecretManager for AwsSecretManager {
    fn kind(&self) -> &str {
        "aws"
    }

    async fn identity(&self) -> Result<String, PaykeysError> {
        let resp = self
            .sts
            .get_caller_identity()
            .send()
            .await
            .map_err(|e| PaykeysError::aws_auth(DisplayErrorContext(&e)))?;

        resp.account()
            .map(str::to_string)
            .ok_or_else(|| PaykeysError::auth("AWS returned no account id for these credentials"))
    }

    async fn create(
        &self,
        name: &str,
        value: &str,
        description: &str,
    ) -> Result<String, PaykeysError> {
        let resp = self
            .client
            .create_secret()
            .name(name)
            .secret_string(value)
            .description(description)
            .send()
            .await
            .map_err(|e| PaykeysError::aws(DisplayErrorContext(&e)))?;

        Ok(resp
            .arn()
            .ok_or("Missing ARN in create response")?
            .to_string())
    }

    async fn update(
        &self,
        name: &str,
        value: &str,
        description: &str,
    ) -> Result<String, PaykeysError> {
        let result = self
            .client
            .update_secret()
            .secret_id(name)
            .secret_string(value)
            .description(description)
            .send()
            .await;

        let resp = match result {
            Ok(resp) => resp,
            Err(e)
                if e.as_service_error()
                    .is_some_and(|se| se.is_resource_not_found_exception()) =>
            {
                return Err(PaykeysError::not_found(format!(
                    "Secret '{}' does not exist",
                    name
                )));
            }
            Err(e) => return Err(PaykeysError::aws(DisplayErrorContext(&e))),
        };

        Ok(resp
            .arn()
            .ok_or("Missing ARN in update response")?
            .to_string())
    }
}
