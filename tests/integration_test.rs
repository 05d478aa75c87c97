//! Integration tests for the paykeys library.
//!
//! These tests verify the public API works correctly.

use std::path::PathBuf;

use paykeys::Config;
use paykeys::config::{DEFAULT_PROJECT, DEFAULT_TFVARS_PATH};
use paykeys::credentials::{Provider, normalize_phone, validate_finix, validate_plaid};
use paykeys::tfvars::{FEATURE_SECTION, patch_flag, set_flag};

#[test]
fn test_config_defaults() {
    let config = Config::default();

    assert_eq!(config.project(), DEFAULT_PROJECT);
    assert_eq!(config.tfvars_path(), PathBuf::from(DEFAULT_TFVARS_PATH));
    assert!(config.aws().profile.is_none());
}

#[test]
fn test_secret_names_are_deterministic() {
    assert_eq!(
        Provider::Finix.secret_name("bogle-payment-portal"),
        "bogle-payment-portal-finix-keys"
    );
    assert_eq!(
        Provider::Plaid.secret_name("bogle-payment-portal"),
        Provider::Plaid.secret_name("bogle-payment-portal")
    );
}

#[test]
fn test_phone_normalization() {
    assert_eq!(normalize_phone("5551234567").as_deref(), Some("+15551234567"));
    assert_eq!(normalize_phone("15551234567").as_deref(), Some("+15551234567"));
    assert_eq!(normalize_phone("123"), None);
}

#[test]
fn test_validators_report_reasons() {
    assert!(validate_finix("PK_0123456789abcdefgh", "SK_0123456789abcdefgh").is_ok());
    assert_eq!(
        validate_finix("PK_0123456789abcdefgh", "0123456789abcdefghijk")
            .unwrap_err()
            .to_string(),
        "API Secret must start with 'SK_'"
    );
    assert_eq!(
        validate_plaid("abc", "0123456789abcdefghij")
            .unwrap_err()
            .to_string(),
        "Client ID appears to be too short"
    );
}

#[test]
fn test_flag_patch_leaves_other_lines_alone() {
    let content = "# managed by hand\nenable_plaid = true\n\nlambda_memory = 512\n";
    let patched = patch_flag(content, "enable_plaid", false, Some(FEATURE_SECTION));

    assert_eq!(
        patched,
        "# managed by hand\nenable_plaid = false\n\nlambda_memory = 512\n"
    );
}

#[test]
fn test_flag_appended_exactly_once() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("terraform.tfvars");
    std::fs::write(&path, "lambda_memory = 512\n").unwrap();

    set_flag(&path, "enable_plaid", true, Some(FEATURE_SECTION)).unwrap();
    set_flag(&path, "enable_plaid", true, Some(FEATURE_SECTION)).unwrap();

    let content = std::fs::read_to_string(&path).unwrap();
    assert_eq!(content.matches("enable_plaid").count(), 1);
    assert_eq!(content.matches(FEATURE_SECTION).count(), 1);
    assert!(content.starts_with("lambda_memory = 512\n"));
}
