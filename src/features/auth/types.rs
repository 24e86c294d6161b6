//! Request and response types for account and session API calls. Login
//! payloads carry credentials, so they must never be logged.

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
/// Account record as returned by `/v1/me`.
pub struct User {
    pub id: String,
    pub email: String,
    pub name: String,
    pub email_verified: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

/// Subscription tiers, lowest first. New organizations start on `Free`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Plan {
    Free,
    Standard,
    Pro,
    Enterprise,
}

impl Plan {
    /// All selectable tiers, in display order.
    pub const CHOICES: [Plan; 4] = [Plan::Free, Plan::Standard, Plan::Pro, Plan::Enterprise];

    pub fn label(self) -> &'static str {
        match self {
            Plan::Free => "Free",
            Plan::Standard => "Standard",
            Plan::Pro => "Pro",
            Plan::Enterprise => "Enterprise",
        }
    }

    pub fn is_free(self) -> bool {
        matches!(self, Plan::Free)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
/// Organization record as returned by `/v1/org`.
pub struct Organization {
    pub id: String,
    pub plan: Plan,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub requires_verification: bool,
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub user: Option<User>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub name: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RegisterResponse {
    pub requires_verification: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plan_serializes_lowercase() {
        let json = serde_json::to_string(&Plan::Enterprise).expect("Failed to serialize");
        assert_eq!(json, "\"enterprise\"");

        let plan: Plan = serde_json::from_str("\"free\"").expect("Failed to deserialize");
        assert_eq!(plan, Plan::Free);
        assert!(plan.is_free());
        assert!(!Plan::Pro.is_free());
    }

    #[test]
    fn test_user_deserializes_without_avatar() {
        let json = r#"{"id":"u1","email":"kim@vantage.dev","name":"Kim","email_verified":false}"#;
        let user: User = serde_json::from_str(json).expect("Failed to deserialize");
        assert_eq!(user.id, "u1");
        assert!(!user.email_verified);
        assert_eq!(user.avatar, None);
    }
}
