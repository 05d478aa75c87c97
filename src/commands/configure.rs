//! The configuration run: project name, secret store, providers, flag, report.

use std::path::PathBuf;

use crate::config::Config;
use crate::credentials::{Collection, Provider, SecretRecord, collect_credentials};
use crate::error::Result;
use crate::prompt::Prompter;
use crate::secrets::{SecretManager, SecretStoreClient, UpsertOutcome};
use crate::tfvars::{FEATURE_SECTION, flag_line, set_flag};

use super::summary::{EntryStatus, SecretEntry, Summary};

/// Feature flag that turns on the Plaid integration downstream.
pub const PLAID_FLAG: &str = "enable_plaid";

/// Providers in the order they are collected.
pub const PROVIDERS: [Provider; 2] = [Provider::Finix, Provider::Plaid];

/// Inputs for one run that do not come from the operator.
#[derive(Debug, Clone)]
pub struct ConfigureOptions {
    pub default_project: String,
    pub tfvars_path: PathBuf,
}

impl ConfigureOptions {
    pub fn from_config(config: &Config) -> Self {
        Self {
            default_project: config.project(),
            tfvars_path: config.tfvars_path(),
        }
    }
}

/// Run the whole interactive configuration.
///
/// Only a failed connection to the secret store or an operator abort is
/// returned as an error. Store and file failures are reported along the way
/// and recorded in the returned [`Summary`].
pub async fn handle_configure<M, P>(
    options: &ConfigureOptions,
    manager: M,
    prompter: &mut P,
) -> Result<Summary>
where
    M: SecretManager,
    P: Prompter + Send + ?Sized,
{
    prompter.say("Payment Provider Secrets Configuration");
    prompter.say(&"=".repeat(60));

    let project = prompt_project_name(&options.default_project, prompter)?;
    tracing::debug!(%project, "project selected");

    let client = SecretStoreClient::connect(manager).await?;
    prompter.say(&format!(
        "Connected to {} Account: {}",
        client.kind().to_uppercase(),
        client.account()
    ));

    let mut entries = Vec::with_capacity(PROVIDERS.len());
    for provider in PROVIDERS {
        entries.push(configure_provider(&client, &project, provider, prompter).await?);
    }

    let plaid_enabled = entries
        .iter()
        .any(|e| e.provider == Provider::Plaid && e.is_stored());
    let tfvars_updated = update_flag(&options.tfvars_path, plaid_enabled, prompter);

    let summary = Summary {
        project,
        account: client.account().to_string(),
        entries,
        tfvars_path: options.tfvars_path.clone(),
        tfvars_updated,
    };
    for line in summary.render() {
        prompter.say(&line);
    }

    Ok(summary)
}

fn prompt_project_name<P>(default: &str, prompter: &mut P) -> Result<String>
where
    P: Prompter + ?Sized,
{
    let answer = prompter.ask(&format!("Project name [{}]: ", default))?;
    if answer.is_empty() {
        Ok(default.to_string())
    } else {
        Ok(answer)
    }
}

/// Collect one provider and hand its credentials straight to the store.
async fn configure_provider<M, P>(
    client: &SecretStoreClient<M>,
    project: &str,
    provider: Provider,
    prompter: &mut P,
) -> Result<SecretEntry>
where
    M: SecretManager,
    P: Prompter + Send + ?Sized,
{
    let name = provider.secret_name(project);
    prompter.say("");
    prompter.say(&format!("Configuring {} API credentials...", provider));

    let creds = match collect_credentials(provider, prompter)? {
        Collection::Collected(creds) => creds,
        Collection::Skipped => {
            prompter.say(&format!("Skipping {} configuration", provider));
            return Ok(SecretEntry {
                provider,
                name,
                status: EntryStatus::Skipped,
            });
        }
    };

    let record = SecretRecord::new(project, creds);
    let outcome = client.upsert(&record).await;
    drop(record);

    prompter.say(&outcome.message(&name));
    let status = match outcome {
        UpsertOutcome::Updated(reference) | UpsertOutcome::Created(reference) => {
            EntryStatus::Stored(reference)
        }
        UpsertOutcome::Failed { .. } => EntryStatus::Failed,
    };

    Ok(SecretEntry {
        provider,
        name,
        status,
    })
}

/// Write the Plaid flag, falling back to manual instructions on failure.
fn update_flag<P>(path: &std::path::Path, enabled: bool, prompter: &mut P) -> bool
where
    P: Prompter + ?Sized,
{
    match set_flag(path, PLAID_FLAG, enabled, Some(FEATURE_SECTION)) {
        Ok(()) => {
            prompter.say(&format!("Updated {}", path.display()));
            true
        }
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "could not patch flag");
            prompter.say(&format!(
                "Warning: Could not update {}: {}",
                path.display(),
                e
            ));
            prompter.say(&format!(
                "   Please manually set: {}",
                flag_line(PLAID_FLAG, enabled)
            ));
            false
        }
    }
}
