//! Claims carried inside an access token, and the fixed token header.

use serde::{Deserialize, Serialize};

/// Every token lives exactly seven days from the moment it is issued.
pub const TOKEN_LIFETIME_SECS: i64 = 7 * 24 * 60 * 60;

/// Claims payload, serialized as `{"subjectId","email","issuedAt","expiresAt"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Claims {
    /// Identifier of the authenticated user. Opaque to the codec.
    pub subject_id: i64,
    /// Informational only; never used for authorization by the codec.
    pub email: String,
    /// Issued-at (seconds since epoch)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issued_at: Option<i64>,
    /// Expiry (seconds since epoch). A payload without one never expires.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<i64>,
}

impl Claims {
    /// Build claims issued at `now`, expiring after [`TOKEN_LIFETIME_SECS`].
    pub fn issue(subject_id: i64, email: &str, now: i64) -> Self {
        Self {
            subject_id,
            email: email.to_string(),
            issued_at: Some(now),
            expires_at: Some(now.saturating_add(TOKEN_LIFETIME_SECS)),
        }
    }

    /// True once `now` is strictly past `expiresAt`.
    pub fn is_expired_at(&self, now: i64) -> bool {
        matches!(self.expires_at, Some(exp) if exp < now)
    }
}

/// The constant JOSE header; it never varies between tokens.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Header {
    pub alg: &'static str,
    pub typ: &'static str,
}

pub const HEADER: Header = Header {
    alg: "HS256",
    typ: "JWT",
};

#[cfg(test)]
mod tests {
    use super::{Claims, HEADER, TOKEN_LIFETIME_SECS};

    #[test]
    fn test_issue_sets_seven_day_window() {
        let claims = Claims::issue(42, "a@b.com", 1000);
        assert_eq!(claims.issued_at, Some(1000));
        assert_eq!(claims.expires_at, Some(605_800));
        assert_eq!(TOKEN_LIFETIME_SECS, 604_800);
    }

    #[test]
    fn test_wire_field_names() {
        let json = serde_json::to_value(Claims::issue(7, "x@y.z", 10)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "subjectId": 7,
                "email": "x@y.z",
                "issuedAt": 10,
                "expiresAt": 604_810,
            })
        );
    }

    #[test]
    fn test_header_serializes_to_fixed_shape() {
        assert_eq!(
            serde_json::to_string(&HEADER).unwrap(),
            r#"{"alg":"HS256","typ":"JWT"}"#
        );
    }

    #[test]
    fn test_missing_timestamps_deserialize_as_none() {
        let claims: Claims = serde_json::from_str(r#"{"subjectId":1,"email":"e"}"#).unwrap();
        assert_eq!(claims.issued_at, None);
        assert!(!claims.is_expired_at(i64::MAX));
    }

    #[test]
    fn test_expiry_boundary() {
        let claims = Claims::issue(1, "e", 0);
        let exp = claims.expires_at.unwrap();
        assert!(!claims.is_expired_at(exp - 1));
        assert!(!claims.is_expired_at(exp));
        assert!(claims.is_expired_at(exp + 1));
    }
}
