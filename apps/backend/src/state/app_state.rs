use std::fmt;
use std::sync::Arc;

use crate::auth::TokenCodec;
use crate::config::server::RuntimeEnv;
use crate::repos::users::UserStore;
use crate::services::passwords::PasswordHasher;

/// Application state containing shared resources
#[derive(Clone)]
pub struct AppState {
    /// Issues and verifies access tokens; holds the signing key
    pub codec: TokenCodec,
    pub users: Arc<dyn UserStore>,
    pub hasher: Arc<dyn PasswordHasher>,
    pub runtime_env: RuntimeEnv,
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("codec", &self.codec)
            .field("runtime_env", &self.runtime_env)
            .finish_non_exhaustive()
    }
}
