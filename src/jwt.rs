//! Bearer Token Inspection
//!
//! Decodes the JWT payload locally (no signature check; the server does that)
//! to decide whether a stored token is worth presenting.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::{DateTime, Utc};
use serde::Deserialize;

/// Payload fields the client reads
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Claims {
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    /// Expiry, seconds since the epoch; without one the token never expires locally
    #[serde(default)]
    pub exp: Option<i64>,
}

impl Claims {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.exp.is_some_and(|exp| exp.saturating_mul(1000) < now.timestamp_millis())
    }
}

/// Outcome of looking at the stored token
#[derive(Debug, Clone, PartialEq)]
pub enum TokenState {
    Missing,
    Invalid(String),
    Expired,
    Valid(Claims),
}

pub fn decode_claims(token: &str) -> Result<Claims, String> {
    let mut segments = token.split('.');
    let payload = match (segments.next(), segments.next(), segments.next()) {
        (Some(_), Some(payload), Some(_)) if !payload.is_empty() => payload,
        _ => return Err("token is not a three-part JWT".to_string()),
    };
    let bytes = URL_SAFE_NO_PAD
        .decode(payload.trim_end_matches('='))
        .map_err(|e| format!("token payload is not base64url: {e}"))?;
    serde_json::from_slice(&bytes).map_err(|e| format!("token payload is not valid claims: {e}"))
}

pub fn inspect(token: Option<&str>, now: DateTime<Utc>) -> TokenState {
    let Some(token) = token.filter(|t| !t.trim().is_empty()) else {
        return TokenState::Missing;
    };
    match decode_claims(token) {
        Err(e) => TokenState::Invalid(e),
        Ok(claims) if claims.is_expired(now) => TokenState::Expired,
        Ok(claims) => TokenState::Valid(claims),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn make_token(payload: serde_json::Value) -> String {
        let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
        let body = URL_SAFE_NO_PAD.encode(payload.to_string());
        format!("{}.{}.signature", header, body)
    }

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(secs, 0).unwrap()
    }

    #[test]
    fn test_decode_reads_claims() {
        let token = make_token(json!({ "userId": "u1", "email": "a@b.c", "role": "admin", "exp": 2000 }));
        let claims = decode_claims(&token).unwrap();
        assert_eq!(claims.user_id.as_deref(), Some("u1"));
        assert_eq!(claims.role.as_deref(), Some("admin"));
        assert_eq!(claims.exp, Some(2000));
    }

    #[test]
    fn test_expiry_is_checked_in_milliseconds() {
        let token = make_token(json!({ "exp": 1000 }));
        assert!(matches!(inspect(Some(&token), at(999)), TokenState::Valid(_)));
        assert!(matches!(inspect(Some(&token), at(1000)), TokenState::Valid(_)));
        assert_eq!(inspect(Some(&token), at(1001)), TokenState::Expired);
    }

    #[test]
    fn test_missing_and_blank_tokens() {
        assert_eq!(inspect(None, at(0)), TokenState::Missing);
        assert_eq!(inspect(Some("  "), at(0)), TokenState::Missing);
    }

    #[test]
    fn test_garbage_is_invalid() {
        assert!(matches!(inspect(Some("not-a-jwt"), at(0)), TokenState::Invalid(_)));
        assert!(matches!(inspect(Some("a.%%%.c"), at(0)), TokenState::Invalid(_)));
    }

    #[test]
    fn test_token_without_expiry_is_valid() {
        let no_exp = make_token(json!({ "userId": "u1" }));
        assert!(matches!(inspect(Some(&no_exp), at(4_000_000_000)), TokenState::Valid(_)));
    }
}
