use std::sync::Arc;

use crate::auth::{Clock, SystemClock, TokenCodec};
use crate::config::server::RuntimeEnv;
use crate::error::AppError;
use crate::repos::users::{InMemoryUserStore, UserStore};
use crate::services::passwords::{BcryptHasher, PasswordHasher};
use crate::state::app_state::AppState;
use crate::state::security_config::SecurityConfig;

/// Builder for creating AppState instances (used in both tests and main)
pub struct StateBuilder {
    security: Option<SecurityConfig>,
    clock: Arc<dyn Clock>,
    users: Option<Arc<dyn UserStore>>,
    hasher: Option<Arc<dyn PasswordHasher>>,
    runtime_env: RuntimeEnv,
}

impl StateBuilder {
    pub fn new() -> Self {
        Self {
            security: None,
            clock: Arc::new(SystemClock),
            users: None,
            hasher: None,
            runtime_env: RuntimeEnv::default(),
        }
    }

    pub fn with_security(mut self, security: SecurityConfig) -> Self {
        self.security = Some(security);
        self
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_users(mut self, users: Arc<dyn UserStore>) -> Self {
        self.users = Some(users);
        self
    }

    pub fn with_hasher(mut self, hasher: Arc<dyn PasswordHasher>) -> Self {
        self.hasher = Some(hasher);
        self
    }

    pub fn with_env(mut self, runtime_env: RuntimeEnv) -> Self {
        self.runtime_env = runtime_env;
        self
    }

    /// Fails when no security config was supplied; there is no default key.
    pub fn build(self) -> Result<AppState, AppError> {
        let security = self
            .security
            .ok_or_else(|| AppError::config("security config is required to build state"))?;
        let codec = TokenCodec::with_clock(&security, self.clock)?;

        Ok(AppState {
            codec,
            users: self
                .users
                .unwrap_or_else(|| Arc::new(InMemoryUserStore::new())),
            hasher: self
                .hasher
                .unwrap_or_else(|| Arc::new(BcryptHasher::default())),
            runtime_env: self.runtime_env,
        })
    }
}

impl Default for StateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub fn build_state() -> StateBuilder {
    StateBuilder::new()
}
