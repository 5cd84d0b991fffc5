//! Verification code entity for SMS-based phone verification.

use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Length of the verification code
pub const CODE_LENGTH: usize = 6;

/// Default expiration time for verification codes (10 minutes)
pub const DEFAULT_TTL_MINUTES: i64 = 10;

/// A one-time passcode issued for a phone number.
///
/// Records are append-only: a phone may accumulate several over time and
/// only the most recently created, unexpired, unconsumed one is eligible
/// for matching. The only permitted mutation is the one-way `consumed`
/// transition performed by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationCode {
    /// Unique identifier for the record
    pub id: Uuid,

    /// Canonical local phone number the code was issued for (09xxxxxxxx)
    pub phone: String,

    /// The 6-digit verification code
    pub code: String,

    /// Timestamp when the code was created; orders records per phone
    pub created_at: DateTime<Utc>,

    /// Timestamp after which the code no longer matches
    pub expires_at: DateTime<Utc>,

    /// Whether the code has been successfully used
    pub consumed: bool,
}

impl VerificationCode {
    /// Creates a new verification code with a fresh random 6-digit code.
    ///
    /// `now` is supplied by the caller so that creation and expiry share a
    /// single clock source.
    pub fn new(phone: String, now: DateTime<Utc>, ttl_minutes: i64) -> Self {
        Self {
            id: Uuid::new_v4(),
            phone,
            code: Self::generate_code(),
            created_at: now,
            expires_at: now + Duration::minutes(ttl_minutes),
            consumed: false,
        }
    }

    /// Generates a random 6-digit code in the range 100000..=999999.
    ///
    /// The lower bound keeps the code six characters long without relying
    /// on zero padding.
    pub fn generate_code() -> String {
        let mut rng = rand::thread_rng();
        let code: u32 = rng.gen_range(100_000..=999_999);
        code.to_string()
    }

    /// Checks whether the code has expired at the given instant
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    /// Checks whether the code is still eligible for matching:
    /// unexpired and not yet consumed
    pub fn is_active(&self, now: DateTime<Utc>) -> bool {
        !self.is_expired(now) && !self.consumed
    }

    /// Checks whether the provided input matches this record's code
    pub fn matches(&self, input_code: &str) -> bool {
        self.code == input_code
    }
}
