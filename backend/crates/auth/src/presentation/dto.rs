//! API DTOs (Data Transfer Objects)

use serde::{Deserialize, Serialize};

// ============================================================================
// Registration
// ============================================================================

/// Registration request. Fields are optional so absence maps to a precise error.
#[derive(Clone, Default, Deserialize)]
pub struct SignUpRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Public view of a user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: String,
    pub email: String,
}

// ============================================================================
// Connect
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectResponse {
    pub token: String,
}

// ============================================================================
// Status / Stats
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub db: bool,
    /// Session store liveness
    #[serde(rename = "redis")]
    pub sessions: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsResponse {
    pub users: i64,
    pub files: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sign_up_request_fields_are_optional() {
        let req: SignUpRequest = serde_json::from_str("{}").unwrap();
        assert!(req.email.is_none());
        assert!(req.password.is_none());

        let req: SignUpRequest =
            serde_json::from_str(r#"{"email":"alice@example.com"}"#).unwrap();
        assert_eq!(req.email.as_deref(), Some("alice@example.com"));
        assert!(req.password.is_none());
    }

    #[test]
    fn test_status_shape() {
        let json = serde_json::to_value(StatusResponse {
            db: true,
            sessions: false,
        })
        .unwrap();
        assert_eq!(json, serde_json::json!({ "db": true, "redis": false }));
    }
}
