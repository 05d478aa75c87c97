//! paykeys - interactively store payment provider API credentials in AWS
//! Secrets Manager and record which integrations are enabled.
//!
//! This crate provides functionality to:
//! - Collect and format-check Finix and Plaid credentials from an operator
//! - Create or update one secret per provider, named `{project}-{provider}-keys`
//! - Toggle the `enable_plaid` flag in the infrastructure variables file
//!
//! # Example
//!
//! ```no_run
//! use paykeys::commands::{ConfigureOptions, handle_configure};
//! use paykeys::prompt::TerminalPrompter;
//! use paykeys::secrets::AwsSecretManager;
//! use paykeys::Config;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load(None)?;
//!     let manager = AwsSecretManager::from_settings(&config.aws()).await;
//!     let options = ConfigureOptions::from_config(&config);
//!
//!     let summary = handle_configure(&options, manager, &mut TerminalPrompter::new()).await?;
//!     println!("Plaid enabled: {}", summary.plaid_enabled());
//!
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod credentials;
pub mod error;
pub mod interrupt;
pub mod prompt;
pub mod secrets;
pub mod tfvars;

// Re-export commonly used types at the crate root
pub use config::Config;
pub use error::{PaykeysError, Result};
pub use secrets::{SecretManager, SecretStoreClient};
