use std::future::{ready, Ready};

use actix_web::dev::Payload;
use actix_web::http::header;
use actix_web::{FromRequest, HttpRequest};

use crate::error::AppError;

/// Name of the cookie the login route sets.
pub const TOKEN_COOKIE: &str = "token";

/// Raw access token presented by the client.
///
/// Read from `Authorization: Bearer <token>`, falling back to the `token`
/// cookie when no Authorization header is sent. A header that is present but
/// not a Bearer credential is rejected rather than ignored.
#[derive(Clone)]
pub struct AuthToken {
    pub token: String,
}

impl std::fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthToken").finish_non_exhaustive()
    }
}

impl AuthToken {
    pub fn from_http_request(req: &HttpRequest) -> Result<Self, AppError> {
        if let Some(auth_header) = req.headers().get(header::AUTHORIZATION) {
            let auth_value = auth_header.to_str().map_err(|_| AppError::unauthorized())?;
            return parse_bearer(auth_value)
                .map(|token| AuthToken {
                    token: token.to_string(),
                })
                .ok_or_else(AppError::unauthorized);
        }

        req.cookie(TOKEN_COOKIE)
            .map(|c| c.value().to_string())
            .filter(|v| !v.is_empty())
            .map(|token| AuthToken { token })
            .ok_or_else(AppError::unauthorized)
    }
}

/// `"Bearer <token>"` with exactly two whitespace-separated parts.
fn parse_bearer(value: &str) -> Option<&str> {
    let mut parts = value.split_whitespace();
    match (parts.next(), parts.next(), parts.next()) {
        (Some("Bearer"), Some(token), None) if !token.is_empty() => Some(token),
        _ => None,
    }
}

impl FromRequest for AuthToken {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(Self::from_http_request(req))
    }
}
