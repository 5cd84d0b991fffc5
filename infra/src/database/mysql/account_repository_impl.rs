//! MySQL implementation of the AccountRepository trait.
//!
//! Reads the portal's `users` table, which is owned by the account
//! subsystem; this repository never writes to it.

use async_trait::async_trait;
use sqlx::{MySqlPool, Row};

use rt_core::errors::VerificationError;
use rt_core::repositories::AccountRepository;

/// Read-only account lookup against the portal's user store
pub struct MySqlAccountRepository {
    pool: MySqlPool,
}

impl MySqlAccountRepository {
    /// Create a new repository on the given connection pool
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AccountRepository for MySqlAccountRepository {
    async fn exists_by_phone(&self, phone: &str) -> Result<bool, VerificationError> {
        let query = r#"
            SELECT COUNT(*) AS cnt FROM users WHERE phone = ?
        "#;

        let row = sqlx::query(query)
            .bind(phone)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| VerificationError::Storage {
                message: format!("account lookup failed: {}", e),
            })?;

        let count: i64 = row.try_get("cnt").map_err(|e| VerificationError::Storage {
            message: format!("failed to read account lookup result: {}", e),
        })?;

        Ok(count > 0)
    }
}
