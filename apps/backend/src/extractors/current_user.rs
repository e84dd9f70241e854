use std::future::{ready, Ready};

use actix_web::dev::Payload;
use actix_web::{web, FromRequest, HttpRequest};
use serde::Serialize;

use super::auth_token::AuthToken;
use crate::error::AppError;
use crate::logging::security;
use crate::state::app_state::AppState;

/// The authenticated caller, taken from a verified access token.
///
/// No store lookup happens here; the subject may no longer exist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CurrentUser {
    pub id: i64,
    pub email: String,
}

impl CurrentUser {
    fn from_http_request(req: &HttpRequest) -> Result<Self, AppError> {
        let AuthToken { token } = AuthToken::from_http_request(req)?;

        let app_state = req
            .app_data::<web::Data<AppState>>()
            .ok_or_else(|| AppError::internal("AppState not available"))?;

        let claims = app_state.codec.decode(&token).map_err(|e| {
            security::token_rejected(&e);
            AppError::from(e)
        })?;

        Ok(CurrentUser {
            id: claims.subject_id,
            email: claims.email,
        })
    }
}

impl FromRequest for CurrentUser {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(Self::from_http_request(req))
    }
}
