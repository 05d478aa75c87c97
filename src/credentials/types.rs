//! Credential type definitions.

use std::fmt;

use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;

use crate::error::Result;

use super::validate::{ValidationError, validate_finix, validate_plaid};

/// A payment provider whose credentials this tool can store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provider {
    Finix,
    Plaid,
}

impl Provider {
    /// Short lowercase name used in secret names (e.g. "finix").
    pub fn slug(self) -> &'static str {
        match self {
            Provider::Finix => "finix",
            Provider::Plaid => "plaid",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Provider::Finix => "Finix",
            Provider::Plaid => "Plaid",
        }
    }

    /// Where the operator finds the credentials.
    pub fn dashboard_url(self) -> &'static str {
        match self {
            Provider::Finix => "https://dashboard.finix.com/settings/api-keys",
            Provider::Plaid => "https://dashboard.plaid.com/team/keys",
        }
    }

    pub fn note(self) -> &'static str {
        match self {
            Provider::Finix => "Note: Use PRODUCTION credentials for live payments",
            Provider::Plaid => "Note: Use PRODUCTION credentials for live bank verification",
        }
    }

    /// Labels for the two masked fields, in prompt order.
    pub fn field_labels(self) -> (&'static str, &'static str) {
        match self {
            Provider::Finix => ("Finix API Key (PK_...)", "Finix API Secret (SK_...)"),
            Provider::Plaid => ("Plaid Client ID", "Plaid Secret Key"),
        }
    }

    /// Shown when either field is left empty.
    pub fn missing_fields_message(self) -> &'static str {
        match self {
            Provider::Finix => "Both API Key and Secret are required",
            Provider::Plaid => "Both Client ID and Secret Key are required",
        }
    }

    /// Accepted environment tags; the first one is the default.
    pub fn environments(self) -> &'static [&'static str] {
        match self {
            Provider::Finix => &["sandbox", "live"],
            Provider::Plaid => &["sandbox", "development", "production"],
        }
    }

    pub fn default_environment(self) -> &'static str {
        self.environments()[0]
    }

    pub fn environment_prompt(self) -> String {
        format!(
            "Environment ({}) [{}]: ",
            self.environments().join("/"),
            self.default_environment()
        )
    }

    pub fn environment_error(self) -> String {
        let quoted: Vec<String> = self
            .environments()
            .iter()
            .map(|env| format!("'{}'", env))
            .collect();
        let choices = match quoted.as_slice() {
            [one] => one.clone(),
            [a, b] => format!("{} or {}", a, b),
            [rest @ .., last] => format!("{}, or {}", rest.join(", "), last),
            [] => String::new(),
        };
        format!("Environment must be {}", choices)
    }

    /// The yes/no gate for optional providers. `None` means mandatory.
    pub fn enable_prompt(self) -> Option<&'static str> {
        match self {
            Provider::Finix => None,
            Provider::Plaid => Some("Enable Plaid integration? (y/N): "),
        }
    }

    /// Deterministic secret name: `{project}-{provider}-keys`.
    pub fn secret_name(self, project: &str) -> String {
        format!("{}-{}-keys", project, self.slug())
    }

    pub fn secret_description(self, project: &str) -> String {
        match self {
            Provider::Finix => format!("Finix API credentials for {} payment processing", project),
            Provider::Plaid => format!("Plaid API credentials for {} bank verification", project),
        }
    }

    /// Validate the two masked fields for this provider.
    pub fn validate(self, first: &str, second: &str) -> std::result::Result<(), ValidationError> {
        match self {
            Provider::Finix => validate_finix(first, second),
            Provider::Plaid => validate_plaid(first, second),
        }
    }

    /// Assemble a credential set. Returns `None` when `environment` is not
    /// one of this provider's tags.
    pub fn credentials(
        self,
        first: SecretString,
        second: SecretString,
        environment: &str,
    ) -> Option<ProviderCredentialSet> {
        match self {
            Provider::Finix => {
                let environment = FinixEnvironment::parse(environment)?;
                Some(ProviderCredentialSet::Finix {
                    api_key: first,
                    api_secret: second,
                    environment,
                })
            }
            Provider::Plaid => {
                let environment = PlaidEnvironment::parse(environment)?;
                Some(ProviderCredentialSet::Plaid {
                    client_id: first,
                    secret: second,
                    environment,
                })
            }
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FinixEnvironment {
    Sandbox,
    Live,
}

impl FinixEnvironment {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "sandbox" => Some(Self::Sandbox),
            "live" => Some(Self::Live),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Sandbox => "sandbox",
            Self::Live => "live",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaidEnvironment {
    Sandbox,
    Development,
    Production,
}

impl PlaidEnvironment {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "sandbox" => Some(Self::Sandbox),
            "development" => Some(Self::Development),
            "production" => Some(Self::Production),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Sandbox => "sandbox",
            Self::Development => "development",
            Self::Production => "production",
        }
    }
}

/// One provider's credentials, held only for the length of a run.
///
/// Secret fields are `SecretString`, so `Debug` prints them redacted and the
/// memory is zeroed on drop.
#[derive(Debug)]
pub enum ProviderCredentialSet {
    Finix {
        api_key: SecretString,
        api_secret: SecretString,
        environment: FinixEnvironment,
    },
    Plaid {
        client_id: SecretString,
        secret: SecretString,
        environment: PlaidEnvironment,
    },
}

#[derive(Serialize)]
struct FinixPayload<'a> {
    api_key: &'a str,
    api_secret: &'a str,
    environment: FinixEnvironment,
}

#[derive(Serialize)]
struct PlaidPayload<'a> {
    client_id: &'a str,
    secret: &'a str,
    environment: PlaidEnvironment,
}

impl ProviderCredentialSet {
    pub fn provider(&self) -> Provider {
        match self {
            ProviderCredentialSet::Finix { .. } => Provider::Finix,
            ProviderCredentialSet::Plaid { .. } => Provider::Plaid,
        }
    }

    pub fn environment(&self) -> &'static str {
        match self {
            ProviderCredentialSet::Finix { environment, .. } => environment.as_str(),
            ProviderCredentialSet::Plaid { environment, .. } => environment.as_str(),
        }
    }

    /// Serialize every field into the JSON document stored in the secret.
    pub fn to_secret_json(&self) -> Result<SecretString> {
        let json = match self {
            ProviderCredentialSet::Finix {
                api_key,
                api_secret,
                environment,
            } => serde_json::to_string(&FinixPayload {
                api_key: api_key.expose_secret(),
                api_secret: api_secret.expose_secret(),
                environment: *environment,
            })?,
            ProviderCredentialSet::Plaid {
                client_id,
                secret,
                environment,
            } => serde_json::to_string(&PlaidPayload {
                client_id: client_id.expose_secret(),
                secret: secret.expose_secret(),
                environment: *environment,
            })?,
        };
        Ok(SecretString::from(json))
    }
}

/// A named secret ready to be written to the store.
#[derive(Debug)]
pub struct SecretRecord {
    pub name: String,
    pub value: ProviderCredentialSet,
    pub description: String,
}

impl SecretRecord {
    /// Build the record for `value`, deriving name and description from the project.
    pub fn new(project: &str, value: ProviderCredentialSet) -> Self {
        let provider = value.provider();
        Self {
            name: provider.secret_name(project),
            description: provider.secret_description(project),
            value,
        }
    }

    pub fn provider(&self) -> Provider {
        self.value.provider()
    }
}
