//! Unified error type for paykeys.
//!
//! All public APIs return `Result<T, PaykeysError>`. Most variants are handled
//! where they occur (re-prompting, warnings, a null reference in the summary);
//! only `Auth`, `Cancelled` and unexpected failures reach the process boundary.

use std::fmt;

/// Printed when the operator aborts the run.
pub const CANCELLED_MESSAGE: &str = "Configuration cancelled by user";

/// The unified error type for all paykeys operations.
#[derive(Debug)]
pub enum PaykeysError {
    // ── I/O & filesystem ───────────────────────────────────────────────
    /// Filesystem or terminal I/O failed.
    Io(std::io::Error),

    // ── Serialization ──────────────────────────────────────────────────
    /// JSON serialization error.
    Json(serde_json::Error),

    /// KDL config file parsing error.
    Config(String),

    // ── Secret store ───────────────────────────────────────────────────
    /// The secret store could not be reached or refused our credentials.
    Auth(String),

    /// An error originating from the secret store backend.
    Provider { provider: String, message: String },

    /// The named secret does not exist in the store.
    NotFound(String),

    // ── User interaction ───────────────────────────────────────────────
    /// The operator interrupted the run or closed the input stream.
    Cancelled,

    /// Operator input validation failed.
    Validation(String),

    // ── Catch-all ──────────────────────────────────────────────────────
    Other(String),
}

// ── Display ────────────────────────────────────────────────────────────

impl fmt::Display for PaykeysError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaykeysError::Io(e) => write!(f, "{}", e),
            PaykeysError::Json(e) => write!(f, "JSON error: {}", e),
            PaykeysError::Config(msg) => write!(f, "config error: {}", msg),
            PaykeysError::Auth(msg) => write!(f, "{}", msg),
            PaykeysError::Provider { provider, message } => {
                write!(f, "{}: {}", provider, message)
            }
            PaykeysError::NotFound(msg) => write!(f, "{}", msg),
            PaykeysError::Cancelled => write!(f, "cancelled"),
            PaykeysError::Validation(msg) => write!(f, "{}", msg),
            PaykeysError::Other(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for PaykeysError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PaykeysError::Io(e) => Some(e),
            PaykeysError::Json(e) => Some(e),
            _ => None,
        }
    }
}

// ── From implementations for common error types ────────────────────────

impl From<std::io::Error> for PaykeysError {
    fn from(e: std::io::Error) -> Self {
        PaykeysError::Io(e)
    }
}

impl From<serde_json::Error> for PaykeysError {
    fn from(e: serde_json::Error) -> Self {
        PaykeysError::Json(e)
    }
}

impl From<String> for PaykeysError {
    fn from(s: String) -> Self {
        PaykeysError::Other(s)
    }
}

impl From<&str> for PaykeysError {
    fn from(s: &str) -> Self {
        PaykeysError::Other(s.to_string())
    }
}

// ── Convenience constructors ───────────────────────────────────────────

impl PaykeysError {
    /// Create a backend error.
    pub fn provider(provider: impl Into<String>, message: impl Into<String>) -> Self {
        PaykeysError::Provider {
            provider: provider.into(),
            message: message.into(),
        }
    }

    /// Create a not-found error.
    pub fn not_found(message: impl Into<String>) -> Self {
        PaykeysError::NotFound(message.into())
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        PaykeysError::Validation(message.into())
    }

    /// Create a config error.
    pub fn config(message: impl Into<String>) -> Self {
        PaykeysError::Config(message.into())
    }

    /// Create a fatal setup error for the secret store connection.
    pub fn auth(message: impl Into<String>) -> Self {
        PaykeysError::Auth(message.into())
    }

    /// Create a provider error for AWS, translating common Secrets Manager
    /// and STS errors into operator-friendly messages.
    pub fn aws(e: impl fmt::Display) -> Self {
        PaykeysError::Provider {
            provider: "aws".to_string(),
            message: friendly_aws_message(&e.to_string()),
        }
    }

    /// Create a fatal connection error from a failed AWS identity check.
    pub fn aws_auth(e: impl fmt::Display) -> Self {
        let msg = e.to_string();
        if is_missing_credentials(&msg) {
            PaykeysError::Auth("AWS credentials not configured. Run 'aws configure' first.".into())
        } else {
            PaykeysError::Auth(format!(
                "Error connecting to AWS: {}",
                friendly_aws_message(&msg)
            ))
        }
    }

    /// Whether this error means the run was aborted by the operator.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, PaykeysError::Cancelled)
    }

    /// Operator-facing text for an error that reached the run boundary.
    pub fn failure_message(&self) -> String {
        match self {
            PaykeysError::Cancelled => CANCELLED_MESSAGE.to_string(),
            PaykeysError::Auth(msg) => msg.clone(),
            other => format!("Unexpected error: {}", other),
        }
    }

    /// Process exit code for an error that reached the run boundary.
    pub fn exit_code(&self) -> u8 {
        match self {
            PaykeysError::Cancelled => 130,
            _ => 1,
        }
    }
}

fn is_missing_credentials(msg: &str) -> bool {
    msg.contains("CredentialsNotLoaded")
        || msg.contains("no credentials")
        || msg.contains("failed to load credentials")
        || msg.contains("the credential provider was not enabled")
}

fn friendly_aws_message(msg: &str) -> String {
    if msg.contains("ResourceNotFoundException") {
        "Secret not found".to_string()
    } else if msg.contains("AccessDeniedException") || msg.contains("AccessDenied") {
        "Access denied (check IAM permissions)".to_string()
    } else if msg.contains("InvalidClientTokenId") || msg.contains("ExpiredToken") {
        "AWS credentials are invalid or expired".to_string()
    } else if msg.contains("InvalidParameterException") {
        "Invalid parameter".to_string()
    } else if msg.contains("InvalidRequestException") {
        "Invalid request (the secret may be scheduled for deletion)".to_string()
    } else if msg.contains("LimitExceededException") {
        "Secrets Manager limit exceeded".to_string()
    } else if msg.contains("InternalServiceError") {
        "AWS internal error (try again later)".to_string()
    } else {
        msg.to_string()
    }
}

/// Convenience type alias for Results using PaykeysError.
pub type Result<T> = std::result::Result<T, PaykeysError>;
