//! Encoding and verification of signed, expiring access tokens.
//!
//! A token is `base64url(header).base64url(claims).base64url(hmac)`, where the
//! HMAC-SHA256 is computed over the first two segments joined by `.`. Nothing
//! is stored server-side: a token dies only by expiring or by failing
//! verification.

use std::fmt;
use std::sync::Arc;

use thiserror::Error;

use super::base64url;
use super::claims::{Claims, HEADER};
use super::clock::{Clock, SystemClock};
use super::signature::Signer;
use crate::state::security_config::SecurityConfig;

/// Why a token was refused, or why one could not be produced.
///
/// The decode-side variants exist for diagnostics only. Callers must treat
/// all of them as "not authenticated" and never echo the reason to a client.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    #[error("token is not three dot-separated segments")]
    MalformedToken,
    #[error("token signature does not match")]
    InvalidSignature,
    #[error("token payload is not valid claims")]
    MalformedPayload,
    #[error("token has expired")]
    Expired,
    #[error("failed to encode token: {0}")]
    InternalEncoding(String),
}

impl TokenError {
    /// Stable, log-friendly reason code.
    pub fn reason(&self) -> &'static str {
        match self {
            TokenError::MalformedToken => "malformed",
            TokenError::InvalidSignature => "bad_signature",
            TokenError::MalformedPayload => "malformed_payload",
            TokenError::Expired => "expired",
            TokenError::InternalEncoding(_) => "internal_encoding",
        }
    }
}

/// An encoded access token. Only [`TokenCodec::encode`] constructs one.
#[derive(Clone, PartialEq, Eq)]
pub struct Token(String);

impl Token {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// Tokens are bearer credentials; keep them out of debug logs.
impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Token(<{} bytes>)", self.0.len())
    }
}

impl AsRef<str> for Token {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Issues and verifies access tokens with a single process-wide secret.
///
/// Cheap to clone and safe to share across threads; no call mutates it.
#[derive(Clone)]
pub struct TokenCodec {
    signer: Signer,
    clock: Arc<dyn Clock>,
}

impl TokenCodec {
    /// Codec reading the system clock.
    pub fn new(security: &SecurityConfig) -> Result<Self, TokenError> {
        Self::with_clock(security, Arc::new(SystemClock))
    }

    pub fn with_clock(security: &SecurityConfig, clock: Arc<dyn Clock>) -> Result<Self, TokenError> {
        let signer = Signer::new(&security.token_secret)
            .map_err(|e| TokenError::InternalEncoding(format!("invalid signing key: {e}")))?;
        Ok(Self { signer, clock })
    }

    /// Mint a token for `subject_id`, issued now and valid for seven days.
    pub fn encode(&self, subject_id: i64, email: &str) -> Result<Token, TokenError> {
        let claims = Claims::issue(subject_id, email, self.clock.now_unix());

        let header_json = serde_json::to_vec(&HEADER)
            .map_err(|e| TokenError::InternalEncoding(format!("header: {e}")))?;
        let claims_json = serde_json::to_vec(&claims)
            .map_err(|e| TokenError::InternalEncoding(format!("claims: {e}")))?;

        let signing_input = format!(
            "{}.{}",
            base64url::encode(header_json),
            base64url::encode(claims_json)
        );
        let signature = self.signer.sign(signing_input.as_bytes());

        Ok(Token(format!("{signing_input}.{signature}")))
    }

    /// Verify `token` and return its claims.
    ///
    /// Checks run in a fixed order: shape, signature, payload, expiry. Any
    /// input, however hostile, yields `Ok` or one of the decode-side
    /// [`TokenError`]s.
    pub fn decode(&self, token: &str) -> Result<Claims, TokenError> {
        let mut segments = token.split('.');
        let (Some(header), Some(payload), Some(signature), None) = (
            segments.next(),
            segments.next(),
            segments.next(),
            segments.next(),
        ) else {
            return Err(TokenError::MalformedToken);
        };

        let signing_input = &token[..header.len() + 1 + payload.len()];
        if !self.signer.verify(signing_input.as_bytes(), signature) {
            return Err(TokenError::InvalidSignature);
        }

        let payload_json = base64url::decode(payload).map_err(|_| TokenError::MalformedPayload)?;
        let claims: Claims =
            serde_json::from_slice(&payload_json).map_err(|_| TokenError::MalformedPayload)?;

        if claims.is_expired_at(self.clock.now_unix()) {
            return Err(TokenError::Expired);
        }

        Ok(claims)
    }
}

impl fmt::Debug for TokenCodec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenCodec").finish_non_exhaustive()
    }
}
