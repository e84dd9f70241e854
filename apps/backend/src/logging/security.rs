use tracing::warn;

use crate::auth::TokenError;
use crate::logging::pii::Redacted;
use crate::trace_ctx;

/// A presented token was refused. The reason stays in the logs.
pub fn token_rejected(error: &TokenError) {
    let trace_id = trace_ctx::trace_id();

    warn!(
        event = "SECURITY_TOKEN_REJECTED",
        %trace_id,
        reason = error.reason(),
        "Access token rejected"
    );
}

/// A login attempt failed.
pub fn login_failed(reason: &str, email: &str) {
    let trace_id = trace_ctx::trace_id();

    warn!(
        event = "SECURITY_LOGIN_FAILED",
        %trace_id,
        email = %Redacted(email),
        reason,
        "Authentication failure"
    );
}

/// An authenticated caller tried to touch another user's profile.
pub fn profile_forbidden(caller_id: i64, target_id: i64) {
    let trace_id = trace_ctx::trace_id();

    warn!(
        event = "SECURITY_PROFILE_FORBIDDEN",
        %trace_id,
        caller_id,
        target_id,
        "Profile access denied"
    );
}
