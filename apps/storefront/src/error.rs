//! # CLI Error Type
//!
//! What a failed command prints on stderr:
//! ```json
//! {
//!   "kind": "ORDER_SUBMISSION",
//!   "recovery": "RETRY",
//!   "message": "Order submission failed after 1 of 2 lines: ..."
//! }
//! ```

use serde::Serialize;
use wellness_client::{ClientError, ErrorKind, Recovery, StorefrontError};
use wellness_core::CoreError;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CliError {
    pub kind: ErrorKind,
    pub recovery: Recovery,
    pub message: String,
}

impl CliError {
    /// Bad command-line input that never reached the engine.
    pub fn usage(message: impl Into<String>) -> Self {
        CliError {
            kind: ErrorKind::Validation,
            recovery: Recovery::FixInput,
            message: message.into(),
        }
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| self.message.clone())
    }
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

impl From<StorefrontError> for CliError {
    fn from(err: StorefrontError) -> Self {
        CliError {
            kind: err.kind(),
            recovery: err.recovery(),
            message: err.to_string(),
        }
    }
}

impl From<ClientError> for CliError {
    fn from(err: ClientError) -> Self {
        StorefrontError::from(err).into()
    }
}

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        StorefrontError::from(err).into()
    }
}

impl From<serde_json::Error> for CliError {
    fn from(err: serde_json::Error) -> Self {
        CliError {
            kind: ErrorKind::InvalidState,
            recovery: Recovery::None,
            message: format!("Failed to render output: {}", err),
        }
    }
}

pub type CliResult<T> = Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_submission_error_keeps_kind_and_recovery() {
        let err: CliError = StorefrontError::OrderSubmission {
            committed: 1,
            total: 2,
            source: ClientError::Http {
                status: 503,
                message: "Service unavailable".into(),
            },
        }
        .into();

        assert_eq!(err.kind, ErrorKind::OrderSubmission);
        assert_eq!(err.recovery, Recovery::Retry);

        let json: serde_json::Value = serde_json::from_str(&err.to_json()).unwrap();
        assert_eq!(json["kind"], "ORDER_SUBMISSION");
        assert_eq!(json["recovery"], "RETRY");
    }

    #[test]
    fn test_auth_required_points_to_login() {
        let err = CliError::from(CoreError::AuthRequired);
        assert_eq!(err.kind, ErrorKind::AuthRequired);
        assert_eq!(err.recovery, Recovery::Login);
    }
}
