//! MySQL implementation of the VerificationCodeRepository trait.
//!
//! The backing table is append-only; the single permitted mutation is the
//! conditional `consumed` flip, expressed as one `UPDATE … WHERE consumed
//! = FALSE` statement so concurrent validations cannot double-consume.
//!
//! Expected schema:
//!
//! ```sql
//! CREATE TABLE verification_codes (
//!     id CHAR(36) PRIMARY KEY,
//!     phone VARCHAR(10) NOT NULL,
//!     code CHAR(6) NOT NULL,
//!     created_at DATETIME(6) NOT NULL,
//!     expires_at DATETIME(6) NOT NULL,
//!     consumed BOOLEAN NOT NULL DEFAULT FALSE,
//!     INDEX idx_verification_codes_phone_created (phone, created_at)
//! );
//! ```

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use rt_core::domain::entities::verification_code::VerificationCode;
use rt_core::errors::VerificationError;
use rt_core::repositories::VerificationCodeRepository;

/// MySQL-backed OTP store
pub struct MySqlVerificationCodeRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlVerificationCodeRepository {
    /// Create a new repository on the given connection pool
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn storage_error(context: &str, e: impl std::fmt::Display) -> VerificationError {
        VerificationError::Storage {
            message: format!("{}: {}", context, e),
        }
    }

    /// Convert a database row to a VerificationCode entity
    fn row_to_record(row: &sqlx::mysql::MySqlRow) -> Result<VerificationCode, VerificationError> {
        let id: String = row
            .try_get("id")
            .map_err(|e| Self::storage_error("failed to read id", e))?;

        Ok(VerificationCode {
            id: Uuid::parse_str(&id).map_err(|e| Self::storage_error("invalid record id", e))?,
            phone: row
                .try_get("phone")
                .map_err(|e| Self::storage_error("failed to read phone", e))?,
            code: row
                .try_get("code")
                .map_err(|e| Self::storage_error("failed to read code", e))?,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(|e| Self::storage_error("failed to read created_at", e))?,
            expires_at: row
                .try_get::<DateTime<Utc>, _>("expires_at")
                .map_err(|e| Self::storage_error("failed to read expires_at", e))?,
            consumed: row
                .try_get("consumed")
                .map_err(|e| Self::storage_error("failed to read consumed", e))?,
        })
    }

    /// Fetch the newest unexpired row for a phone, with an optional
    /// unconsumed restriction
    async fn latest_for_phone(
        &self,
        phone: &str,
        now: DateTime<Utc>,
        unconsumed_only: bool,
    ) -> Result<Option<VerificationCode>, VerificationError> {
        let query = if unconsumed_only {
            r#"
            SELECT id, phone, code, created_at, expires_at, consumed
            FROM verification_codes
            WHERE phone = ? AND expires_at > ? AND consumed = FALSE
            ORDER BY created_at DESC
            LIMIT 1
            "#
        } else {
            r#"
            SELECT id, phone, code, created_at, expires_at, consumed
            FROM verification_codes
            WHERE phone = ? AND expires_at > ?
            ORDER BY created_at DESC
            LIMIT 1
            "#
        };

        let row = sqlx::query(query)
            .bind(phone)
            .bind(now)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| Self::storage_error("query failed", e))?;

        match row {
            Some(row) => Ok(Some(Self::row_to_record(&row)?)),
            None => Ok(None),
        }
    }
}

#[async_trait]
impl VerificationCodeRepository for MySqlVerificationCodeRepository {
    async fn create(&self, record: VerificationCode) -> Result<(), VerificationError> {
        let query = r#"
            INSERT INTO verification_codes (id, phone, code, created_at, expires_at, consumed)
            VALUES (?, ?, ?, ?, ?, ?)
        "#;

        sqlx::query(query)
            .bind(record.id.to_string())
            .bind(&record.phone)
            .bind(&record.code)
            .bind(record.created_at)
            .bind(record.expires_at)
            .bind(record.consumed)
            .execute(&self.pool)
            .await
            .map_err(|e| Self::storage_error("insert failed", e))?;

        Ok(())
    }

    async fn find_active(
        &self,
        phone: &str,
        code: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<VerificationCode>, VerificationError> {
        // Only the newest active record is eligible for matching; the code
        // comparison happens after the latest-wins selection so a
        // superseded code cannot match its older row.
        let latest = self.latest_for_phone(phone, now, true).await?;
        Ok(latest.filter(|record| record.matches(code)))
    }

    async fn consume(
        &self,
        phone: &str,
        code: &str,
        now: DateTime<Utc>,
    ) -> Result<bool, VerificationError> {
        // Single conditional write; of concurrent callers exactly one sees
        // an unconsumed row and flips it.
        let query = r#"
            UPDATE verification_codes
            SET consumed = TRUE
            WHERE phone = ? AND code = ? AND expires_at > ? AND consumed = FALSE
        "#;

        let result = sqlx::query(query)
            .bind(phone)
            .bind(code)
            .bind(now)
            .execute(&self.pool)
            .await
            .map_err(|e| Self::storage_error("update failed", e))?;

        Ok(result.rows_affected() > 0)
    }

    async fn find_latest_valid(
        &self,
        phone: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<VerificationCode>, VerificationError> {
        self.latest_for_phone(phone, now, false).await
    }
}
