//! Secret store backends.

mod aws;

pub use aws::{AwsSecretManager, FALLBACK_REGION};
