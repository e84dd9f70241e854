//! Password hashing boundary, backed by bcrypt.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::OnceCell;

use crate::error::AppError;

/// Hashes and checks passwords. Implementations must be salted and slow.
#[async_trait]
pub trait PasswordHasher: Send + Sync {
    async fn hash(&self, plain: &str) -> Result<String, AppError>;

    async fn verify(&self, plain: &str, hash: &str) -> Result<bool, AppError>;

    /// Do the work of one `verify` when there is no stored hash to check.
    async fn verify_decoy(&self, plain: &str) -> Result<(), AppError>;
}

const DECOY_PASSWORD: &str = "decoy-password-never-issued";

/// bcrypt with a configurable work factor.
#[derive(Debug, Clone)]
pub struct BcryptHasher {
    cost: u32,
    decoy: Arc<OnceCell<String>>,
}

impl BcryptHasher {
    pub const DEFAULT_COST: u32 = 10;

    pub fn new(cost: u32) -> Self {
        Self {
            cost,
            decoy: Arc::new(OnceCell::new()),
        }
    }
}

impl Default for BcryptHasher {
    fn default() -> Self {
        Self::new(Self::DEFAULT_COST)
    }
}

// bcrypt is CPU-bound, so both calls run on the blocking pool.
#[async_trait]
impl PasswordHasher for BcryptHasher {
    async fn hash(&self, plain: &str) -> Result<String, AppError> {
        let plain = plain.to_owned();
        let cost = self.cost;
        tokio::task::spawn_blocking(move || bcrypt::hash(plain, cost))
            .await
            .map_err(|e| AppError::internal(format!("password hashing task failed: {e}")))?
            .map_err(AppError::from)
    }

    async fn verify(&self, plain: &str, hash: &str) -> Result<bool, AppError> {
        let plain = plain.to_owned();
        let hash = hash.to_owned();
        tokio::task::spawn_blocking(move || bcrypt::verify(plain, &hash))
            .await
            .map_err(|e| AppError::internal(format!("password verify task failed: {e}")))?
            .map_err(AppError::from)
    }

    // The decoy is hashed at this hasher's cost so its verify takes as long
    // as a real one.
    async fn verify_decoy(&self, plain: &str) -> Result<(), AppError> {
        let decoy = self
            .decoy
            .get_or_try_init(|| self.hash(DECOY_PASSWORD))
            .await?;
        self.verify(plain, decoy).await?;
        Ok(())
    }
}
