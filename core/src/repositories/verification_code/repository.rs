//! Verification code repository trait defining the OTP store interface.
//!
//! The store is append-only except for the single `consumed` transition,
//! which implementations must perform as one atomic conditional write so
//! that concurrent validation attempts cannot both succeed.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::entities::verification_code::VerificationCode;
use crate::errors::VerificationError;

/// Repository contract for verification code persistence
///
/// Every query takes the current instant explicitly rather than consulting
/// a clock of its own, so expiry behavior is deterministic under test and
/// identical across storage engines.
#[async_trait]
pub trait VerificationCodeRepository: Send + Sync {
    /// Insert a new record.
    ///
    /// There is no uniqueness constraint on phone: multiple outstanding
    /// records per phone are permitted and ordered by `created_at`.
    async fn create(&self, record: VerificationCode) -> Result<(), VerificationError>;

    /// Find the most-recently-created record matching phone and code that
    /// is unexpired (`expires_at > now`) and unconsumed.
    ///
    /// Returns `None` for absent, expired, and consumed records alike; the
    /// caller must not be able to distinguish those cases.
    async fn find_active(
        &self,
        phone: &str,
        code: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<VerificationCode>, VerificationError>;

    /// Atomically mark matching unexpired, unconsumed record(s) as consumed.
    ///
    /// Returns `true` when at least one record transitioned. Safe to call
    /// when nothing matches (returns `false`). Under concurrent calls for
    /// the same record, exactly one caller observes `true`.
    async fn consume(
        &self,
        phone: &str,
        code: &str,
        now: DateTime<Utc>,
    ) -> Result<bool, VerificationError>;

    /// Find the most-recently-created unexpired record for the phone,
    /// consumed or not.
    ///
    /// The registration gate uses this to check whether the phone was
    /// verified within the current validity window.
    async fn find_latest_valid(
        &self,
        phone: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<VerificationCode>, VerificationError>;
}
