//! Payment provider credentials: types, validation and interactive collection.

mod collect;
mod types;
mod validate;

pub use collect::{Collection, collect_credentials};
pub use types::{
    FinixEnvironment, PlaidEnvironment, Provider, ProviderCredentialSet, SecretRecord,
};
pub use validate::{
    FINIX_MIN_LEN, PLAID_CLIENT_ID_MIN_LEN, PLAID_SECRET_MIN_LEN, ValidationError,
    normalize_phone, validate_finix, validate_plaid,
};
