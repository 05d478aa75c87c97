//! Command handlers for the paykeys CLI.

mod configure;
mod summary;

pub use configure::{ConfigureOptions, PLAID_FLAG, PROVIDERS, handle_configure};
pub use summary::{EntryStatus, SecretEntry, Summary};
