use std::path::PathBuf;

use super::types::{AwsSettings, Config, Defaults};
use crate::cli::ConfigArgs;

/// Command-line values that take precedence over the config file.
#[derive(Debug, Default)]
pub struct Flags {
    pub tfvars: Option<PathBuf>,
    pub profile: Option<String>,
    pub region: Option<String>,
}

impl From<&ConfigArgs> for Flags {
    fn from(args: &ConfigArgs) -> Self {
        Self {
            tfvars: args.tfvars.clone(),
            profile: args.profile.clone(),
            region: args.region.clone(),
        }
    }
}

impl Config {
    /// Overlay command-line flags onto the loaded configuration.
    pub fn apply_flags(&mut self, flags: Flags) {
        if let Some(tfvars) = flags.tfvars {
            self.defaults.get_or_insert_with(Defaults::default).tfvars =
                Some(tfvars.to_string_lossy().into_owned());
        }
        if flags.profile.is_some() || flags.region.is_some() {
            let aws = self.aws.get_or_insert_with(AwsSettings::default);
            if flags.profile.is_some() {
                aws.profile = flags.profile;
            }
            if flags.region.is_some() {
                aws.region = flags.region;
            }
        }
    }
}
