use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// The only role this service cares about
pub const PLAYER_ROLE: &str = "player";

// ========== USER ==========

/// User identifier as stored upstream. Supabase tables may use either
/// uuid/text or bigint keys, so keep whatever JSON shape we were given.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(untagged)]
pub enum UserId {
    Number(i64),
    Text(String),
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UserId::Number(n) => write!(f, "{}", n),
            UserId::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for UserId {
    fn from(value: &str) -> Self {
        UserId::Text(value.to_string())
    }
}

impl From<i64> for UserId {
    fn from(value: i64) -> Self {
        UserId::Number(value)
    }
}

// Row projection: select id, role from users
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct UserRecord {
    pub id: UserId,
    pub role: String, // player | coach | admin ...
}

impl UserRecord {
    pub fn is_player(&self) -> bool {
        self.role == PLAYER_ROLE
    }
}

// ========== VERIFY PLAYER ==========

// Request body for POST /verify-player-email. Only `email` is read, and
// only when the body is a JSON object.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct VerifyPlayerRequest {
    pub email: Option<Value>,
}

impl VerifyPlayerRequest {
    pub fn from_value(body: &Value) -> Self {
        Self {
            email: body.as_object().and_then(|o| o.get("email")).cloned(),
        }
    }

    /// Email counts as supplied unless absent or falsy (null, false, 0, "")
    pub fn has_email(&self) -> bool {
        self.email.as_ref().is_some_and(is_truthy)
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map_or(true, |f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct VerifyPlayerResponse {
    pub user_id: UserId,
    pub role: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ErrorResponse {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_id_keeps_json_shape() {
        let text: UserId = serde_json::from_str("\"abc123\"").unwrap();
        assert_eq!(text, UserId::Text("abc123".to_string()));

        let number: UserId = serde_json::from_str("42").unwrap();
        assert_eq!(number, UserId::Number(42));
        assert_eq!(serde_json::to_string(&number).unwrap(), "42");
    }

    fn request(body: &str) -> VerifyPlayerRequest {
        VerifyPlayerRequest::from_value(&serde_json::from_str(body).unwrap())
    }

    #[test]
    fn test_request_email_presence() {
        assert!(request(r#"{"email":"x@y.com"}"#).has_email());
        assert!(request(r#"{"email":5}"#).has_email());
        assert!(request(r#"{"email":true}"#).has_email());
        assert!(request(r#"{"email":{}}"#).has_email());

        for body in [
            r#"{}"#,
            r#"{"email":""}"#,
            r#"{"email":null}"#,
            r#"{"email":false}"#,
            r#"{"email":0}"#,
            r#"{"email":0.0}"#,
        ] {
            assert!(!request(body).has_email(), "body: {}", body);
        }
    }

    #[test]
    fn test_non_object_body_has_no_email() {
        for body in [r#"["x@y.com"]"#, "[]", "5", "true", r#""x@y.com""#] {
            let req = request(body);
            assert_eq!(req.email, None, "body: {}", body);
            assert!(!req.has_email());
        }
    }
}
