//! Interactive credential collection.
//!
//! Each provider is collected by a small state machine: an optional yes/no
//! gate, the two masked fields, then the environment tag. Bad input sends the
//! machine back to the step that produced it; only a valid answer (or a
//! declined gate) leaves the loop.

use secrecy::{ExposeSecret, SecretString};

use crate::error::{PaykeysError, Result};
use crate::prompt::Prompter;

use super::types::{Provider, ProviderCredentialSet};

/// Result of one collection session.
#[derive(Debug)]
pub enum Collection {
    Collected(ProviderCredentialSet),
    /// The operator declined an optional provider.
    Skipped,
}

impl Collection {
    pub fn into_credentials(self) -> Option<ProviderCredentialSet> {
        match self {
            Collection::Collected(creds) => Some(creds),
            Collection::Skipped => None,
        }
    }
}

enum CollectState {
    Gate(&'static str),
    Prompt,
    PromptEnvironment {
        first: SecretString,
        second: SecretString,
    },
}

/// Collect one provider's credentials, re-prompting until the input is valid.
///
/// Returns `Err(PaykeysError::Cancelled)` if the operator aborts at any prompt.
pub fn collect_credentials<P>(provider: Provider, prompter: &mut P) -> Result<Collection>
where
    P: Prompter + ?Sized,
{
    prompter.say("");
    prompter.say(&format!("{} API Credentials", provider));
    prompter.say(&format!("Get these from: {}", provider.dashboard_url()));
    prompter.say(provider.note());

    let (first_label, second_label) = provider.field_labels();
    let mut state = match provider.enable_prompt() {
        Some(question) => CollectState::Gate(question),
        None => CollectState::Prompt,
    };

    loop {
        state = match state {
            CollectState::Gate(question) => {
                let answer = prompter.ask(question)?.to_lowercase();
                if answer == "y" || answer == "yes" {
                    CollectState::Prompt
                } else {
                    tracing::debug!(provider = provider.slug(), "provider skipped");
                    return Ok(Collection::Skipped);
                }
            }
            CollectState::Prompt => {
                let first = prompter.ask_secret(&format!("{}: ", first_label))?;
                let second = prompter.ask_secret(&format!("{}: ", second_label))?;

                if first.expose_secret().is_empty() || second.expose_secret().is_empty() {
                    prompter.say(&format!("Error: {}", provider.missing_fields_message()));
                    CollectState::Prompt
                } else if let Err(reason) =
                    provider.validate(first.expose_secret(), second.expose_secret())
                {
                    tracing::debug!(provider = provider.slug(), %reason, "credentials rejected");
                    prompter.say(&format!("Error: {}", reason));
                    CollectState::Prompt
                } else {
                    CollectState::PromptEnvironment { first, second }
                }
            }
            CollectState::PromptEnvironment { first, second } => {
                let answer = prompter.ask(&provider.environment_prompt())?.to_lowercase();
                let environment = if answer.is_empty() {
                    provider.default_environment()
                } else {
                    answer.as_str()
                };

                if !provider.environments().iter().any(|env| *env == environment) {
                    prompter.say(&format!("Error: {}", provider.environment_error()));
                    CollectState::PromptEnvironment { first, second }
                } else {
                    let creds = provider
                        .credentials(first, second, environment)
                        .ok_or_else(|| PaykeysError::validation(provider.environment_error()))?;
                    tracing::debug!(
                        provider = provider.slug(),
                        environment = creds.environment(),
                        "credentials collected"
                    );
                    return Ok(Collection::Collected(creds));
                }
            }
        };
    }
}
