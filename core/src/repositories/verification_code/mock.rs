//! In-memory implementation of VerificationCodeRepository for testing

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::entities::verification_code::VerificationCode;
use crate::errors::VerificationError;

use super::repository::VerificationCodeRepository;

/// Mock verification code repository backed by a `Vec` behind an async lock.
///
/// `consume` runs entirely under the write guard, which gives the same
/// at-most-once guarantee the SQL conditional update gives in production.
pub struct MockVerificationCodeRepository {
    records: Arc<RwLock<Vec<VerificationCode>>>,
    fail_storage: bool,
}

impl MockVerificationCodeRepository {
    /// Create a new empty mock repository
    pub fn new() -> Self {
        Self {
            records: Arc::new(RwLock::new(Vec::new())),
            fail_storage: false,
        }
    }

    /// Create a mock repository whose every operation fails with a
    /// storage error, for exercising infrastructure fault paths
    pub fn failing() -> Self {
        Self {
            records: Arc::new(RwLock::new(Vec::new())),
            fail_storage: true,
        }
    }

    /// Number of stored records, consumed or not
    pub async fn record_count(&self) -> usize {
        self.records.read().await.len()
    }

    /// Snapshot of all records for the given phone, in insertion order
    pub async fn records_for(&self, phone: &str) -> Vec<VerificationCode> {
        self.records
            .read()
            .await
            .iter()
            .filter(|r| r.phone == phone)
            .cloned()
            .collect()
    }

    fn storage_error() -> VerificationError {
        VerificationError::Storage {
            message: "mock storage failure".to_string(),
        }
    }
}

impl Default for MockVerificationCodeRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl VerificationCodeRepository for MockVerificationCodeRepository {
    async fn create(&self, record: VerificationCode) -> Result<(), VerificationError> {
        if self.fail_storage {
            return Err(Self::storage_error());
        }
        self.records.write().await.push(record);
        Ok(())
    }

    async fn find_active(
        &self,
        phone: &str,
        code: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<VerificationCode>, VerificationError> {
        if self.fail_storage {
            return Err(Self::storage_error());
        }
        let records = self.records.read().await;
        // Only the newest active record is eligible; an older record's
        // code stops matching as soon as a fresh one is issued.
        Ok(records
            .iter()
            .filter(|r| r.phone == phone && r.is_active(now))
            .max_by_key(|r| r.created_at)
            .filter(|r| r.matches(code))
            .cloned())
    }

    async fn consume(
        &self,
        phone: &str,
        code: &str,
        now: DateTime<Utc>,
    ) -> Result<bool, VerificationError> {
        if self.fail_storage {
            return Err(Self::storage_error());
        }
        let mut records = self.records.write().await;
        let mut transitioned = false;
        for record in records
            .iter_mut()
            .filter(|r| r.phone == phone && r.matches(code) && r.is_active(now))
        {
            record.consumed = true;
            transitioned = true;
        }
        Ok(transitioned)
    }

    async fn find_latest_valid(
        &self,
        phone: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<VerificationCode>, VerificationError> {
        if self.fail_storage {
            return Err(Self::storage_error());
        }
        let records = self.records.read().await;
        Ok(records
            .iter()
            .filter(|r| r.phone == phone && !r.is_expired(now))
            .max_by_key(|r| r.created_at)
            .cloned())
    }
}
