//! Loose-field extraction over portal API payloads
//!
//! The backend reports the same logical value under several field names
//! depending on the route and deployment generation. Each lookup here is an
//! ordered list of candidate paths evaluated to the first non-empty match.

use serde_json::Value;

/// Candidate fields for the registration identifier, in priority order
const REGISTRATION_ID_FIELDS: &[&str] =
    &["registration_id", "registrationId", "data.registration_id"];

/// Candidate fields for the bearer token returned by login
const TOKEN_FIELDS: &[&str] = &["access_token", "token", "data.access_token"];

/// Candidate fields for the registration status label
///
/// The boolean `approved` flag is handled separately by [`status_label`].
const STATUS_FIELDS: &[&str] = &["status", "data.status", "state"];

/// A response body: parsed JSON when the body is valid JSON, raw text
/// otherwise
///
/// Malformed JSON is never an error anywhere in the tooling; the raw text
/// is carried along so it can still be logged.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    Json(Value),
    Raw(String),
}

impl Payload {
    /// Parses a response body, falling back to raw text on invalid JSON
    pub fn parse(text: &str) -> Self {
        match serde_json::from_str(text) {
            Ok(value) => Self::Json(value),
            Err(_) => Self::Raw(text.to_string()),
        }
    }

    /// Looks up a dotted path (e.g. `data.status`) in the JSON form
    ///
    /// Raw bodies have no fields, so every lookup on them misses.
    pub fn lookup(&self, path: &str) -> Option<&Value> {
        let Self::Json(root) = self else {
            return None;
        };
        path.split('.').try_fold(root, |node, key| node.get(key))
    }
}

impl std::fmt::Display for Payload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Json(value) => write!(f, "{}", value),
            Self::Raw(text) => f.write_str(text),
        }
    }
}

/// First non-empty scalar among the candidate paths
///
/// Strings must be non-empty; numbers render to their decimal form.
/// Booleans, nulls, and structured values never match.
pub fn first_scalar(payload: &Payload, paths: &[&str]) -> Option<String> {
    paths.iter().find_map(|path| match payload.lookup(path)? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

/// Registration identifier assigned by the backend, if present
pub fn registration_id(payload: &Payload) -> Option<String> {
    first_scalar(payload, REGISTRATION_ID_FIELDS)
}

/// Bearer token from a login response, if present
pub fn bearer_token(payload: &Payload) -> Option<String> {
    first_scalar(payload, TOKEN_FIELDS)
}

/// Registration status label, if present
///
/// Field priority: `status`, `data.status`, `state`; as a last resort a
/// boolean `approved: true` flag is coerced to the literal `"Approved"`.
pub fn status_label(payload: &Payload) -> Option<String> {
    first_scalar(payload, STATUS_FIELDS).or_else(|| match payload.lookup("approved") {
        Some(Value::Bool(true)) => Some("Approved".to_string()),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_falls_back_to_raw_text() {
        let payload = Payload::parse("<html>502 Bad Gateway</html>");
        assert_eq!(
            payload,
            Payload::Raw("<html>502 Bad Gateway</html>".to_string())
        );
        assert!(payload.lookup("status").is_none());
    }

    #[test]
    fn test_parse_valid_json() {
        let payload = Payload::parse(r#"{"status": "Pending"}"#);
        assert!(matches!(payload, Payload::Json(_)));
    }

    #[test]
    fn test_lookup_walks_nested_paths() {
        let payload = Payload::parse(r#"{"data": {"status": "Approved"}}"#);
        assert_eq!(
            payload.lookup("data.status"),
            Some(&Value::String("Approved".to_string()))
        );
        assert!(payload.lookup("data.missing").is_none());
    }

    #[test]
    fn test_registration_id_priority_order() {
        let snake = Payload::parse(r#"{"registration_id": "a", "registrationId": "b"}"#);
        assert_eq!(registration_id(&snake), Some("a".to_string()));

        let camel = Payload::parse(r#"{"registrationId": "b"}"#);
        assert_eq!(registration_id(&camel), Some("b".to_string()));

        let nested = Payload::parse(r#"{"data": {"registration_id": "c"}}"#);
        assert_eq!(registration_id(&nested), Some("c".to_string()));
    }

    #[test]
    fn test_numeric_identifier_renders_to_decimal() {
        let payload = Payload::parse(r#"{"registration_id": 4217}"#);
        assert_eq!(registration_id(&payload), Some("4217".to_string()));
    }

    #[test]
    fn test_empty_string_does_not_match() {
        let payload = Payload::parse(r#"{"registration_id": "", "registrationId": "b"}"#);
        assert_eq!(registration_id(&payload), Some("b".to_string()));
    }

    #[test]
    fn test_structured_values_do_not_match() {
        let payload = Payload::parse(r#"{"registration_id": {"id": "a"}}"#);
        assert_eq!(registration_id(&payload), None);
    }

    #[test]
    fn test_bearer_token_priority_order() {
        let both = Payload::parse(r#"{"access_token": "at", "token": "t"}"#);
        assert_eq!(bearer_token(&both), Some("at".to_string()));

        let nested = Payload::parse(r#"{"data": {"access_token": "nested"}}"#);
        assert_eq!(bearer_token(&nested), Some("nested".to_string()));
    }

    #[test]
    fn test_status_label_priority_order() {
        let direct = Payload::parse(r#"{"status": "Pending", "state": "Active"}"#);
        assert_eq!(status_label(&direct), Some("Pending".to_string()));

        let nested = Payload::parse(r#"{"data": {"status": "Active"}, "state": "x"}"#);
        assert_eq!(status_label(&nested), Some("Active".to_string()));

        let state_only = Payload::parse(r#"{"state": "Rejected"}"#);
        assert_eq!(status_label(&state_only), Some("Rejected".to_string()));
    }

    #[test]
    fn test_approved_flag_coerces_to_literal() {
        let approved = Payload::parse(r#"{"approved": true}"#);
        assert_eq!(status_label(&approved), Some("Approved".to_string()));

        let not_approved = Payload::parse(r#"{"approved": false}"#);
        assert_eq!(status_label(&not_approved), None);
    }

    #[test]
    fn test_status_field_wins_over_approved_flag() {
        let payload = Payload::parse(r#"{"status": "Rejected", "approved": true}"#);
        assert_eq!(status_label(&payload), Some("Rejected".to_string()));
    }

    #[test]
    fn test_raw_body_yields_nothing() {
        let payload = Payload::parse("plain text");
        assert_eq!(registration_id(&payload), None);
        assert_eq!(bearer_token(&payload), None);
        assert_eq!(status_label(&payload), None);
    }
}
