//! Wire types and result classification for the email verification endpoints.
//! Payloads carry one-time tokens, so they must never be logged.
//!
//! The server reports failures with a machine-readable `code`. A replayed
//! token (`token_already_used` / `already_verified`) proves an earlier
//! exchange succeeded, so it is classified as a success variant here rather
//! than matched as an error string at call sites.

use crate::app_lib::AppError;
use crate::features::auth::types::User;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct VerifyEmailRequest {
    pub token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct VerifyEmailResponse {
    pub success: bool,
    #[serde(default)]
    pub user: Option<User>,
    #[serde(default)]
    pub organization_token: Option<String>,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ResendVerificationRequest {
    pub email: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ResendVerificationResponse {
    pub success: bool,
    #[serde(default)]
    pub error: Option<String>,
}

/// Failure classes for a token exchange. Each class maps to one
/// human-readable message and one recovery suggestion in the UI.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VerifyFailure {
    MissingToken,
    InvalidOrExpired,
    Network,
    Unknown,
}

/// Result of one gateway exchange, after classification.
#[derive(Clone, Debug, PartialEq)]
pub enum ExchangeOutcome {
    /// First-time success. May carry a fresh user record and a session
    /// credential to adopt.
    Verified {
        user: Option<User>,
        credential: Option<String>,
    },
    /// The token was already consumed by an earlier exchange (a second tab,
    /// a duplicate effect run). Equivalent to success, minus the payload.
    AlreadyVerified,
    Failed {
        kind: VerifyFailure,
        message: String,
    },
}

const INVALID_MESSAGE: &str =
    "This verification link is invalid or has expired. Request a new one below.";
const NETWORK_MESSAGE: &str = "Unable to reach the server. Check your connection and try again.";
const UNKNOWN_MESSAGE: &str = "Verification failed. Please try again.";

/// Classifies a gateway response body into an exchange outcome.
pub fn classify_response(response: VerifyEmailResponse) -> ExchangeOutcome {
    if response.success {
        return ExchangeOutcome::Verified {
            user: response.user,
            credential: response.organization_token,
        };
    }

    match response.code.as_deref() {
        Some("token_already_used" | "already_verified") => ExchangeOutcome::AlreadyVerified,
        Some("token_expired" | "token_invalid") => ExchangeOutcome::Failed {
            kind: VerifyFailure::InvalidOrExpired,
            message: INVALID_MESSAGE.to_string(),
        },
        _ => ExchangeOutcome::Failed {
            kind: VerifyFailure::Unknown,
            message: response.error.unwrap_or_else(|| UNKNOWN_MESSAGE.to_string()),
        },
    }
}

/// Classifies a transport-level failure into an exchange outcome.
pub fn classify_transport(error: &AppError) -> ExchangeOutcome {
    match error {
        AppError::Network(_) | AppError::Timeout(_) => ExchangeOutcome::Failed {
            kind: VerifyFailure::Network,
            message: NETWORK_MESSAGE.to_string(),
        },
        other => ExchangeOutcome::Failed {
            kind: VerifyFailure::Unknown,
            message: other.to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn failure(code: &str) -> VerifyEmailResponse {
        VerifyEmailResponse {
            success: false,
            user: None,
            organization_token: None,
            code: Some(code.to_string()),
            error: None,
        }
    }

    #[test]
    fn success_carries_payload() {
        let response = VerifyEmailResponse {
            success: true,
            user: None,
            organization_token: Some("cred-1".to_string()),
            code: None,
            error: None,
        };
        match classify_response(response) {
            ExchangeOutcome::Verified { credential, .. } => {
                assert_eq!(credential.as_deref(), Some("cred-1"));
            }
            other => panic!("expected Verified, got {other:?}"),
        }
    }

    #[test]
    fn replayed_token_is_a_success_variant() {
        assert_eq!(
            classify_response(failure("token_already_used")),
            ExchangeOutcome::AlreadyVerified
        );
        assert_eq!(
            classify_response(failure("already_verified")),
            ExchangeOutcome::AlreadyVerified
        );
    }

    #[test]
    fn expired_and_invalid_share_a_class() {
        for code in ["token_expired", "token_invalid"] {
            match classify_response(failure(code)) {
                ExchangeOutcome::Failed { kind, .. } => {
                    assert_eq!(kind, VerifyFailure::InvalidOrExpired);
                }
                other => panic!("expected Failed, got {other:?}"),
            }
        }
    }

    #[test]
    fn unrecognized_code_surfaces_server_message() {
        let mut response = failure("rate_limited");
        response.error = Some("Too many attempts.".to_string());
        match classify_response(response) {
            ExchangeOutcome::Failed { kind, message } => {
                assert_eq!(kind, VerifyFailure::Unknown);
                assert_eq!(message, "Too many attempts.");
            }
            other => panic!("expected Failed, got {other:?}"),
        }
    }

    #[test]
    fn transport_failures_classify_as_network() {
        let outcome = classify_transport(&AppError::Timeout("timed out".to_string()));
        match outcome {
            ExchangeOutcome::Failed { kind, .. } => assert_eq!(kind, VerifyFailure::Network),
            other => panic!("expected Failed, got {other:?}"),
        }
    }
}
