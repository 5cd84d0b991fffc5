//! Pre-registration phone verification check

use std::sync::Arc;

use rt_shared::utils::phone::{is_valid_mobile, mask_phone_number};

use crate::domain::clock::Clock;
use crate::errors::{VerificationError, VerificationResult};
use crate::repositories::{AccountRepository, VerificationCodeRepository};

/// Gate consulted at account-creation time when a phone number is supplied.
///
/// Account creation itself is delegated to the portal's user service; the
/// gate only answers whether this phone completed verification recently
/// enough to proceed.
pub struct RegistrationGate<R, A>
where
    R: VerificationCodeRepository,
    A: AccountRepository,
{
    codes: Arc<R>,
    accounts: Arc<A>,
    clock: Arc<dyn Clock>,
}

impl<R, A> RegistrationGate<R, A>
where
    R: VerificationCodeRepository,
    A: AccountRepository,
{
    /// Create a new registration gate
    pub fn new(codes: Arc<R>, accounts: Arc<A>, clock: Arc<dyn Clock>) -> Self {
        Self {
            codes,
            accounts,
            clock,
        }
    }

    /// Check that the phone was verified and the verification is still
    /// within its validity window.
    ///
    /// Passes only when the latest unexpired record for the phone exists
    /// and has been consumed. A record that was consumed but has since
    /// expired is rejected: the user must verify again if registration is
    /// delayed past the code's TTL.
    pub async fn check_verified_for_registration(&self, phone: &str) -> VerificationResult<()> {
        if phone.is_empty() {
            return Err(VerificationError::MissingFields);
        }
        if !is_valid_mobile(phone) {
            return Err(VerificationError::InvalidPhoneFormat {
                phone: phone.to_string(),
            });
        }

        if self.accounts.exists_by_phone(phone).await? {
            return Err(VerificationError::PhoneAlreadyRegistered);
        }

        let now = self.clock.now();
        match self.codes.find_latest_valid(phone, now).await? {
            Some(record) if record.consumed => {
                tracing::info!(
                    phone = %mask_phone_number(phone),
                    event = "registration_gate_passed",
                    record_id = %record.id,
                    "Phone verification confirmed for registration"
                );
                Ok(())
            }
            _ => {
                tracing::warn!(
                    phone = %mask_phone_number(phone),
                    event = "registration_gate_rejected",
                    "No consumed, unexpired verification record for phone"
                );
                Err(VerificationError::PhoneNotVerified)
            }
        }
    }
}
