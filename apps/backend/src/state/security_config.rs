use std::fmt;

use crate::error::AppError;

/// Environment variable holding the token signing secret.
pub const TOKEN_SECRET_VAR: &str = "JWT_SECRET";

/// Configuration for access token signing
#[derive(Clone)]
pub struct SecurityConfig {
    /// Secret key for signing and verifying tokens
    pub token_secret: Vec<u8>,
}

impl SecurityConfig {
    /// Create a new SecurityConfig with the given token secret
    pub fn new(token_secret: impl Into<Vec<u8>>) -> Self {
        Self {
            token_secret: token_secret.into(),
        }
    }

    /// Load the secret from `JWT_SECRET`.
    ///
    /// There is no fallback: a missing or empty secret is a configuration
    /// error and the process must not start.
    pub fn from_env() -> Result<Self, AppError> {
        let secret = std::env::var(TOKEN_SECRET_VAR).map_err(|_| {
            AppError::config(format!(
                "Required environment variable '{TOKEN_SECRET_VAR}' is not set"
            ))
        })?;

        if secret.trim().is_empty() {
            return Err(AppError::config(format!(
                "Environment variable '{TOKEN_SECRET_VAR}' must not be empty"
            )));
        }

        Ok(Self::new(secret.into_bytes()))
    }

    /// Config with a fixed, well-known secret. Never reachable from `main`.
    #[cfg(test)]
    pub fn for_tests() -> Self {
        Self::new(b"test_secret_key_for_testing_purposes_only".to_vec())
    }
}

impl fmt::Debug for SecurityConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecurityConfig")
            .field("token_secret", &format_args!("<{} bytes>", self.token_secret.len()))
            .finish()
    }
}
