//! Shape checks for operator-supplied credentials.
//!
//! These only check format (prefixes and minimum lengths). Whether the
//! credentials actually work is for the provider to decide at runtime.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

/// Minimum length for a Finix API key or secret.
pub const FINIX_MIN_LEN: usize = 20;
/// Minimum length for a Plaid client id.
pub const PLAID_CLIENT_ID_MIN_LEN: usize = 10;
/// Minimum length for a Plaid secret.
pub const PLAID_SECRET_MIN_LEN: usize = 20;

static NON_DIGIT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\D").expect("Invalid regex pattern"));

/// Why a credential pair was rejected. `Display` gives the stable reason text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    FinixKeyPrefix,
    FinixSecretPrefix,
    FinixTooShort,
    PlaidClientIdTooShort,
    PlaidSecretTooShort,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            ValidationError::FinixKeyPrefix => "API Key must start with 'PK_'",
            ValidationError::FinixSecretPrefix => "API Secret must start with 'SK_'",
            ValidationError::FinixTooShort => "Credentials appear to be too short",
            ValidationError::PlaidClientIdTooShort => "Client ID appears to be too short",
            ValidationError::PlaidSecretTooShort => "Secret Key appears to be too short",
        };
        f.write_str(reason)
    }
}

impl std::error::Error for ValidationError {}

/// Normalize a US phone number to E.164.
///
/// Every non-digit is stripped; ten digits get the `+1` country code, eleven
/// digits are accepted when they already start with `1`. Anything else is
/// rejected.
///
/// # Examples
/// ```
/// use paykeys::credentials::normalize_phone;
///
/// assert_eq!(normalize_phone("(555) 123-4567").as_deref(), Some("+15551234567"));
/// assert_eq!(normalize_phone("123"), None);
/// ```
pub fn normalize_phone(raw: &str) -> Option<String> {
    let digits = NON_DIGIT.replace_all(raw, "");
    match digits.len() {
        10 => Some(format!("+1{}", digits)),
        11 if digits.starts_with('1') => Some(format!("+{}", digits)),
        _ => None,
    }
}

/// Check a Finix key/secret pair. The first failing rule wins.
pub fn validate_finix(api_key: &str, api_secret: &str) -> Result<(), ValidationError> {
    if !api_key.starts_with("PK_") {
        return Err(ValidationError::FinixKeyPrefix);
    }
    if !api_secret.starts_with("SK_") {
        return Err(ValidationError::FinixSecretPrefix);
    }
    if api_key.chars().count() < FINIX_MIN_LEN || api_secret.chars().count() < FINIX_MIN_LEN {
        return Err(ValidationError::FinixTooShort);
    }
    Ok(())
}

/// Check a Plaid client id/secret pair. The first failing rule wins.
pub fn validate_plaid(client_id: &str, secret: &str) -> Result<(), ValidationError> {
    if client_id.chars().count() < PLAID_CLIENT_ID_MIN_LEN {
        return Err(ValidationError::PlaidClientIdTooShort);
    }
    if secret.chars().count() < PLAID_SECRET_MIN_LEN {
        return Err(ValidationError::PlaidSecretTooShort);
    }
    Ok(())
}
