//! Account flows that sit on top of the token codec: registration, login,
//! and owner-only profile access.

use tracing::info;

use crate::auth::{Token, TokenCodec};
use crate::error::AppError;
use crate::logging::pii::Redacted;
use crate::logging::security;
use crate::repos::users::{NewUser, PublicUser, UserStore, UserUpdate};
use crate::services::passwords::PasswordHasher;

pub const MIN_PASSWORD_CHARS: usize = 8;

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

fn invalid_credentials() -> AppError {
    AppError::Unauthorized
}

/// Create an account. Returns the stored user without its hash.
pub async fn register(
    store: &dyn UserStore,
    hasher: &dyn PasswordHasher,
    name: &str,
    email: &str,
    password: &str,
) -> Result<PublicUser, AppError> {
    if is_blank(name) || is_blank(email) || password.is_empty() {
        return Err(AppError::bad_request(
            "MISSING_FIELDS",
            "Name, email, and password are required",
        ));
    }

    if password.chars().count() < MIN_PASSWORD_CHARS {
        return Err(AppError::bad_request(
            "PASSWORD_TOO_SHORT",
            format!("Password must be at least {MIN_PASSWORD_CHARS} characters"),
        ));
    }

    if store.find_by_email(email).await?.is_some() {
        return Err(AppError::conflict("EMAIL_IN_USE", "Email already in use"));
    }

    let password_hash = hasher.hash(password).await?;
    let user = store
        .create(NewUser {
            name: name.to_string(),
            email: email.to_string(),
            password_hash,
        })
        .await?;

    info!(user_id = user.id, email = %Redacted(&user.email), "User registered");

    Ok(user.into())
}

/// Check credentials and mint an access token for the user.
///
/// Unknown email and wrong password are indistinguishable to the caller.
pub async fn login(
    store: &dyn UserStore,
    hasher: &dyn PasswordHasher,
    codec: &TokenCodec,
    email: &str,
    password: &str,
) -> Result<(PublicUser, Token), AppError> {
    if is_blank(email) || password.is_empty() {
        return Err(AppError::bad_request(
            "MISSING_FIELDS",
            "Email and password are required",
        ));
    }

    let Some(user) = store.find_by_email(email).await? else {
        hasher.verify_decoy(password).await?;
        security::login_failed("unknown_email", email);
        return Err(invalid_credentials());
    };

    if !hasher.verify(password, &user.password_hash).await? {
        security::login_failed("wrong_password", email);
        return Err(invalid_credentials());
    }

    let token = codec.encode(user.id, &user.email)?;

    info!(user_id = user.id, "Access token issued");

    Ok((user.into(), token))
}

fn ensure_owner(caller_id: i64, target_id: i64) -> Result<(), AppError> {
    if caller_id != target_id {
        security::profile_forbidden(caller_id, target_id);
        return Err(AppError::forbidden());
    }
    Ok(())
}

fn user_not_found() -> AppError {
    AppError::not_found("USER_NOT_FOUND", "User not found")
}

/// Fetch a profile. Only its owner may read it.
pub async fn get_profile(
    store: &dyn UserStore,
    caller_id: i64,
    id: i64,
) -> Result<PublicUser, AppError> {
    ensure_owner(caller_id, id)?;

    store
        .find_by_id(id)
        .await?
        .map(PublicUser::from)
        .ok_or_else(user_not_found)
}

/// Change a profile's name and email. Only its owner may do so.
pub async fn update_profile(
    store: &dyn UserStore,
    caller_id: i64,
    id: i64,
    name: &str,
    email: &str,
) -> Result<PublicUser, AppError> {
    ensure_owner(caller_id, id)?;

    if is_blank(name) || is_blank(email) {
        return Err(AppError::bad_request(
            "MISSING_FIELDS",
            "Name and email are required",
        ));
    }

    let update = UserUpdate {
        name: Some(name.to_string()),
        email: Some(email.to_string()),
    };

    store
        .update(id, update)
        .await?
        .map(PublicUser::from)
        .ok_or_else(user_not_found)
}
