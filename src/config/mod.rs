//! Configuration loading and management.

mod flags;
mod loader;
mod types;

pub use flags::Flags;
pub use types::{AwsSettings, Config, DEFAULT_PROJECT, DEFAULT_TFVARS_PATH, Defaults};
