//! Mock implementation of AccountRepository for testing

use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::errors::VerificationError;

use super::repository::AccountRepository;

/// Mock account repository holding a set of registered phone numbers
pub struct MockAccountRepository {
    phones: Arc<RwLock<HashSet<String>>>,
    fail_storage: bool,
}

impl MockAccountRepository {
    /// Create a new mock with no registered accounts
    pub fn new() -> Self {
        Self {
            phones: Arc::new(RwLock::new(HashSet::new())),
            fail_storage: false,
        }
    }

    /// Create a mock whose lookups fail with a storage error
    pub fn failing() -> Self {
        Self {
            phones: Arc::new(RwLock::new(HashSet::new())),
            fail_storage: true,
        }
    }

    /// Register a phone number as already belonging to an account
    pub async fn register_phone(&self, phone: &str) {
        self.phones.write().await.insert(phone.to_string());
    }
}

impl Default for MockAccountRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AccountRepository for MockAccountRepository {
    async fn exists_by_phone(&self, phone: &str) -> Result<bool, VerificationError> {
        if self.fail_storage {
            return Err(VerificationError::Storage {
                message: "mock storage failure".to_string(),
            });
        }
        Ok(self.phones.read().await.contains(phone))
    }
}
