//! Configuration type definitions.

use knuffel::Decode;
use std::path::PathBuf;

/// Project name used when the operator leaves the prompt blank.
pub const DEFAULT_PROJECT: &str = "bogle-payment-portal";

/// Infrastructure variables file patched with the feature flag.
pub const DEFAULT_TFVARS_PATH: &str = "infrastructure/terraform.tfvars";

/// Expand tilde (~) prefix to the user's home directory.
/// Handles both "~" alone and "~/path/to/something" patterns.
pub(crate) fn expand_tilde(path: &str) -> PathBuf {
    if path == "~" {
        if let Some(home) = dirs::home_dir() {
            return home;
        }
    } else if let Some(rest) = path.strip_prefix("~/")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(rest);
    }
    PathBuf::from(path)
}

/// Main configuration structure parsed from paykeys.kdl.
#[derive(Debug, Decode, Clone, Default)]
pub struct Config {
    #[knuffel(child)]
    pub defaults: Option<Defaults>,

    #[knuffel(child)]
    pub aws: Option<AwsSettings>,
}

/// Default answers and paths.
#[derive(Debug, Decode, Clone, Default)]
pub struct Defaults {
    /// Offered at the project name prompt.
    #[knuffel(property)]
    pub project: Option<String>,

    #[knuffel(property)]
    pub tfvars: Option<String>,
}

/// How to reach AWS. Unset fields fall back to the standard AWS chain.
#[derive(Debug, Decode, Clone, Default, PartialEq, Eq)]
pub struct AwsSettings {
    #[knuffel(property)]
    pub profile: Option<String>,

    #[knuffel(property)]
    pub region: Option<String>,
}

impl Config {
    /// Get the default project name, falling back to the built-in one.
    pub fn project(&self) -> String {
        self.defaults
            .as_ref()
            .and_then(|d| d.project.clone())
            .filter(|p| !p.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_PROJECT.to_string())
    }

    /// Get the path of the infrastructure variables file.
    /// Expands ~ to the user's home directory if present.
    pub fn tfvars_path(&self) -> PathBuf {
        self.defaults
            .as_ref()
            .and_then(|d| d.tfvars.clone())
            .map(|p| expand_tilde(&p))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_TFVARS_PATH))
    }

    pub fn aws(&self) -> AwsSettings {
        self.aws.clone().unwrap_or_default()
    }
}
