//! API Error Types
//!
//! Every failed backend call collapses into one of these; views turn them
//! into a message string.

use serde_json::Value;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiError {
    /// 401, with the server's message when it sent one
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Malformed response: {0}")]
    Decode(String),

    #[error("Storage error: {0}")]
    Storage(String),
}

impl ApiError {
    /// Map a non-success status and its body
    pub fn from_status(status: u16, body: &str) -> Self {
        let message = extract_message(body).unwrap_or_default();
        if status == 401 {
            return ApiError::Unauthorized(message);
        }
        ApiError::Http { status, message }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized(_))
    }

    /// Text shown to the user
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Unauthorized(message) if message.is_empty() => {
                "Your session has expired. Please sign in again.".to_string()
            }
            _ => self.user_message_or("Something went wrong. Please try again."),
        }
    }

    /// Server-provided message when there is one, otherwise `fallback`
    pub fn user_message_or(&self, fallback: &str) -> String {
        match self {
            ApiError::Unauthorized(message) | ApiError::Http { message, .. } if !message.is_empty() => {
                message.clone()
            }
            ApiError::Network(_) => "Unable to reach the server. Check your connection.".to_string(),
            _ => fallback.to_string(),
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ApiError::Decode(err.to_string())
        } else {
            ApiError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Decode(err.to_string())
    }
}

/// Pull `message` (or `error`) out of a JSON error body
fn extract_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    ["message", "error"]
        .iter()
        .find_map(|key| value.get(*key).and_then(Value::as_str))
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_401_is_unauthorized() {
        let err = ApiError::from_status(401, r#"{"message":"Invalid credentials"}"#);
        assert!(err.is_unauthorized());
        assert_eq!(err.user_message_or("Login failed"), "Invalid credentials");

        let bare = ApiError::from_status(401, "");
        assert_eq!(bare.user_message_or("Login failed"), "Login failed");
        assert_eq!(bare.user_message(), "Your session has expired. Please sign in again.");
    }

    #[test]
    fn test_server_message_is_surfaced() {
        let err = ApiError::from_status(400, r#"{"message":"Email already registered"}"#);
        assert_eq!(err.user_message_or("Registration failed"), "Email already registered");
    }

    #[test]
    fn test_error_key_is_accepted() {
        let err = ApiError::from_status(404, r#"{"error":"Project not found"}"#);
        assert_eq!(err.user_message(), "Project not found");
    }

    #[test]
    fn test_fallback_when_body_is_not_json() {
        let err = ApiError::from_status(500, "<html>oops</html>");
        assert_eq!(
            err,
            ApiError::Http { status: 500, message: String::new() }
        );
        assert_eq!(err.user_message_or("Login failed"), "Login failed");
    }
}
