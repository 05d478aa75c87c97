//! End-of-run report.

use std::path::PathBuf;

use crate::credentials::Provider;

const RULE_WIDTH: usize = 60;

/// What happened to one provider's secret.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryStatus {
    /// Stored; carries the backend reference (an ARN for AWS).
    Stored(String),
    /// Collected but the store rejected it.
    Failed,
    /// The operator declined the optional provider.
    Skipped,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecretEntry {
    pub provider: Provider,
    pub name: String,
    pub status: EntryStatus,
}

impl SecretEntry {
    pub fn reference(&self) -> Option<&str> {
        match &self.status {
            EntryStatus::Stored(reference) => Some(reference),
            _ => None,
        }
    }

    pub fn is_stored(&self) -> bool {
        self.reference().is_some()
    }
}

/// Result of a full configuration run.
#[derive(Debug, Clone)]
pub struct Summary {
    pub project: String,
    pub account: String,
    pub entries: Vec<SecretEntry>,
    pub tfvars_path: PathBuf,
    /// Whether the flag was written to `tfvars_path`.
    pub tfvars_updated: bool,
}

impl Summary {
    pub fn entry(&self, provider: Provider) -> Option<&SecretEntry> {
        self.entries.iter().find(|e| e.provider == provider)
    }

    /// A provider counts as enabled only when its secret was actually stored.
    pub fn is_enabled(&self, provider: Provider) -> bool {
        self.entry(provider).is_some_and(SecretEntry::is_stored)
    }

    pub fn plaid_enabled(&self) -> bool {
        self.is_enabled(Provider::Plaid)
    }

    /// Whether a collected secret failed to store.
    pub fn has_failures(&self) -> bool {
        self.entries.iter().any(|e| e.status == EntryStatus::Failed)
    }

    /// Render the final report, one line per element.
    pub fn render(&self) -> Vec<String> {
        let mut lines = vec![String::new(), "=".repeat(RULE_WIDTH)];

        if self.has_failures() {
            lines.push("Configuration completed with errors".to_string());
        } else {
            lines.push("Configuration completed successfully!".to_string());
        }

        lines.push(String::new());
        lines.push("Summary:".to_string());
        lines.push(format!("   Project: {}", self.project));
        lines.push(format!("   Account: {}", self.account));
        for entry in &self.entries {
            match entry.status {
                EntryStatus::Stored(_) => {
                    lines.push(format!("   {} Secret: {}", entry.provider, entry.name));
                }
                EntryStatus::Failed => {
                    lines.push(format!(
                        "   {} Secret: {} (not stored)",
                        entry.provider, entry.name
                    ));
                }
                EntryStatus::Skipped => {}
            }
            if entry.provider.enable_prompt().is_some() {
                let enabled = if entry.is_stored() { "Yes" } else { "No" };
                lines.push(format!("   {} Enabled: {}", entry.provider, enabled));
            }
        }

        let tfvars = self.tfvars_path.display();
        lines.extend([
            String::new(),
            "Next Steps:".to_string(),
            format!("1. Review your {} file", tfvars),
            "2. Run the deployment script: ./deploy-production.sh".to_string(),
            "3. Test your payment integration after deployment".to_string(),
            String::new(),
            "Security Notes:".to_string(),
            "- Your credentials are encrypted in AWS Secrets Manager".to_string(),
            "- Lambda functions will access secrets securely at runtime".to_string(),
            "- Never commit API keys to version control".to_string(),
            String::new(),
            "Support:".to_string(),
            "- Finix: https://docs.finix.com".to_string(),
            "- Plaid: https://plaid.com/docs".to_string(),
            "- AWS Secrets Manager: https://docs.aws.amazon.com/secretsmanager/".to_string(),
        ]);

        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(entries: Vec<SecretEntry>) -> Summary {
        Summary {
            project: "acme".to_string(),
            account: "123456789012".to_string(),
            entries,
            tfvars_path: PathBuf::from("infrastructure/terraform.tfvars"),
            tfvars_updated: true,
        }
    }

    fn finix_stored() -> SecretEntry {
        SecretEntry {
            provider: Provider::Finix,
            name: "acme-finix-keys".to_string(),
            status: EntryStatus::Stored("arn:finix".to_string()),
        }
    }

    #[test]
    fn test_render_with_plaid_skipped() {
        let summary = summary(vec![
            finix_stored(),
            SecretEntry {
                provider: Provider::Plaid,
                name: "acme-plaid-keys".to_string(),
                status: EntryStatus::Skipped,
            },
        ]);
        let lines = summary.render();

        assert!(!summary.plaid_enabled());
        assert!(lines.contains(&"Configuration completed successfully!".to_string()));
        assert!(lines.contains(&"   Account: 123456789012".to_string()));
        assert!(lines.contains(&"   Finix Secret: acme-finix-keys".to_string()));
        assert!(lines.contains(&"   Plaid Enabled: No".to_string()));
        assert!(!lines.iter().any(|l| l.contains("Plaid Secret")));
    }

    #[test]
    fn test_render_with_failure() {
        let summary = summary(vec![
            finix_stored(),
            SecretEntry {
                provider: Provider::Plaid,
                name: "acme-plaid-keys".to_string(),
                status: EntryStatus::Failed,
            },
        ]);
        let lines = summary.render();

        assert!(summary.has_failures());
        assert!(lines.contains(&"Configuration completed with errors".to_string()));
        assert!(lines.contains(&"   Plaid Secret: acme-plaid-keys (not stored)".to_string()));
        assert!(lines.contains(&"   Plaid Enabled: No".to_string()));
    }

    #[test]
    fn test_render_with_plaid_stored() {
        let summary = summary(vec![
            finix_stored(),
            SecretEntry {
                provider: Provider::Plaid,
                name: "acme-plaid-keys".to_string(),
                status: EntryStatus::Stored("arn:plaid".to_string()),
            },
        ]);

        assert!(summary.plaid_enabled());
        assert!(summary.render().contains(&"   Plaid Enabled: Yes".to_string()));
    }
}
