//! Request and response bodies of the voting REST API.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::models::voter::Voter;
use crate::utils::lenient;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_id")]
    pub user_id: Option<u64>,
}

impl LoginResponse {
    /// The token, if the backend sent a non-empty one.
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref().filter(|t| !t.trim().is_empty())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoteRequest {
    pub voter_id: u64,
    pub candidate_id: u64,
}

/// Outcome of a successful vote; the backend may answer with JSON or plain text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoteReceipt {
    pub message: String,
}

/// Outcome of a successful signup. `voter` is set when the backend echoed the
/// created record as JSON; otherwise `message` holds the raw response text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignupReceipt {
    pub voter: Option<Voter>,
    pub message: Option<String>,
}

impl SignupReceipt {
    pub fn from_body(body: &str) -> Self {
        match serde_json::from_str::<Voter>(body) {
            Ok(voter) => Self { voter: Some(voter), message: None },
            Err(_) => Self {
                voter: None,
                message: ErrorBody::parse(body).message().or_else(|| non_empty(body)),
            },
        }
    }
}

/// Error payloads vary between `{"error": ...}`, `{"message": ...}` and plain text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl ErrorBody {
    pub fn parse(body: &str) -> Self {
        match serde_json::from_str::<Value>(body) {
            Ok(Value::Object(_)) => serde_json::from_str(body).unwrap_or_default(),
            Ok(Value::String(text)) => Self { error: None, message: non_empty(&text) },
            Ok(_) => Self::default(),
            Err(_) => Self { error: None, message: non_empty(body) },
        }
    }

    /// Most specific human-readable message: `error`, then `message`.
    pub fn message(&self) -> Option<String> {
        self.error
            .as_deref()
            .and_then(non_empty)
            .or_else(|| self.message.as_deref().and_then(non_empty))
    }
}

fn non_empty(text: &str) -> Option<String> {
    let trimmed = text.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_response_token() {
        let res: LoginResponse = serde_json::from_str(r#"{"token": "abc", "userId": "12"}"#).unwrap();
        assert_eq!(res.token(), Some("abc"));
        assert_eq!(res.user_id, Some(12));

        let res: LoginResponse = serde_json::from_str(r#"{"token": "", "userId": 12}"#).unwrap();
        assert_eq!(res.token(), None);

        let res: LoginResponse = serde_json::from_str(r#"{"userId": 12}"#).unwrap();
        assert_eq!(res.token(), None);
    }

    #[test]
    fn test_vote_request_wire_names() {
        let body = serde_json::to_value(VoteRequest { voter_id: 4, candidate_id: 2 }).unwrap();
        assert_eq!(body, serde_json::json!({"voterId": 4, "candidateId": 2}));
    }

    #[test]
    fn test_error_body_shapes() {
        assert_eq!(ErrorBody::parse(r#"{"error": "Voter has already voted"}"#).message().as_deref(), Some("Voter has already voted"));
        assert_eq!(ErrorBody::parse(r#"{"message": "Bad credentials"}"#).message().as_deref(), Some("Bad credentials"));
        assert_eq!(ErrorBody::parse("Internal failure").message().as_deref(), Some("Internal failure"));
        assert_eq!(ErrorBody::parse("").message(), None);
        assert_eq!(ErrorBody::parse("[1,2]").message(), None);
    }

    #[test]
    fn test_signup_receipt() {
        let receipt = SignupReceipt::from_body(r#"{"id": 5, "username": "dave"}"#);
        assert_eq!(receipt.voter.map(|v| v.id), Some(5));

        let receipt = SignupReceipt::from_body("User registered successfully");
        assert!(receipt.voter.is_none());
        assert_eq!(receipt.message.as_deref(), Some("User registered successfully"));
    }
}
