//! Main verification service implementation

use std::sync::Arc;

use rt_shared::config::VerificationConfig;
use rt_shared::utils::phone::{is_valid_mobile, mask_phone_number, to_e164};

use crate::domain::clock::Clock;
use crate::domain::entities::verification_code::{VerificationCode, CODE_LENGTH};
use crate::errors::{VerificationError, VerificationResult};
use crate::repositories::{AccountRepository, VerificationCodeRepository};

use super::traits::SmsGateway;

/// Verification service orchestrating code issuance and validation.
///
/// The persistence, account lookup, and delivery collaborators are
/// injected so the service itself stays storage- and provider-agnostic.
pub struct VerificationService<R, A, S>
where
    R: VerificationCodeRepository,
    A: AccountRepository,
    S: SmsGateway,
{
    /// OTP store
    codes: Arc<R>,
    /// Registered account lookup
    accounts: Arc<A>,
    /// SMS delivery channel
    sms: Arc<S>,
    /// Time source for issuance and expiry comparison
    clock: Arc<dyn Clock>,
    /// Service configuration
    config: VerificationConfig,
}

impl<R, A, S> VerificationService<R, A, S>
where
    R: VerificationCodeRepository,
    A: AccountRepository,
    S: SmsGateway,
{
    /// Create a new verification service
    pub fn new(
        codes: Arc<R>,
        accounts: Arc<A>,
        sms: Arc<S>,
        clock: Arc<dyn Clock>,
        config: VerificationConfig,
    ) -> Self {
        Self {
            codes,
            accounts,
            sms,
            clock,
            config,
        }
    }

    /// Request a verification code for a phone number.
    ///
    /// Validates the phone format, rejects phones that already belong to
    /// an account, then generates, persists, and delivers a fresh code.
    /// The record is persisted before delivery is attempted: a delivery
    /// failure leaves it in place and the caller may simply re-request,
    /// which appends a newer record that supersedes this one.
    ///
    /// The code value is never returned to the caller.
    pub async fn request_code(&self, phone: &str) -> VerificationResult<()> {
        if phone.is_empty() {
            return Err(VerificationError::MissingFields);
        }
        if !is_valid_mobile(phone) {
            return Err(VerificationError::InvalidPhoneFormat {
                phone: phone.to_string(),
            });
        }

        if self.accounts.exists_by_phone(phone).await? {
            tracing::warn!(
                phone = %mask_phone_number(phone),
                event = "request_code_rejected",
                "Verification code requested for an already registered phone"
            );
            return Err(VerificationError::PhoneAlreadyRegistered);
        }

        let now = self.clock.now();
        let record = VerificationCode::new(
            phone.to_string(),
            now,
            self.config.code_ttl_minutes,
        );
        let code = record.code.clone();

        tracing::info!(
            phone = %mask_phone_number(phone),
            event = "otp_generated",
            record_id = %record.id,
            expires_at = %record.expires_at,
            "Generated new verification code"
        );

        self.codes.create(record).await?;

        // Valid format was checked above, so the conversion cannot fail
        let destination = to_e164(phone).ok_or_else(|| VerificationError::InvalidPhoneFormat {
            phone: phone.to_string(),
        })?;
        let body = self.config.render_message(&code);

        match self.sms.send(&destination, &body).await {
            Ok(message_id) => {
                tracing::info!(
                    phone = %mask_phone_number(phone),
                    event = "otp_delivered",
                    message_id = %message_id,
                    "Verification code accepted by SMS provider"
                );
                Ok(())
            }
            Err(reason) => {
                // The persisted record intentionally remains matchable;
                // codes are high-entropy and short-lived.
                tracing::error!(
                    phone = %mask_phone_number(phone),
                    event = "otp_delivery_failed",
                    reason = %reason,
                    "SMS provider did not accept the verification code"
                );
                Err(VerificationError::DeliveryFailed { reason })
            }
        }
    }

    /// Validate a submitted phone and code pair, consuming the code.
    ///
    /// Consumption is atomic at the store: of any number of concurrent
    /// calls for the same active record, exactly one succeeds and the
    /// rest fail with `InvalidOrExpiredCode`.
    pub async fn validate_code(&self, phone: &str, code: &str) -> VerificationResult<()> {
        if phone.is_empty() || code.is_empty() {
            return Err(VerificationError::MissingFields);
        }
        if !is_valid_mobile(phone) {
            return Err(VerificationError::InvalidPhoneFormat {
                phone: phone.to_string(),
            });
        }
        // A code that is not 6 digits cannot match any record; reject it
        // without touching storage, under the same undifferentiated error.
        if code.len() != CODE_LENGTH || !code.chars().all(|c| c.is_ascii_digit()) {
            return Err(VerificationError::InvalidOrExpiredCode);
        }

        let now = self.clock.now();

        if self.codes.find_active(phone, code, now).await?.is_none() {
            tracing::warn!(
                phone = %mask_phone_number(phone),
                event = "otp_validation_failed",
                "No active verification code matched"
            );
            return Err(VerificationError::InvalidOrExpiredCode);
        }

        // The conditional update is the authoritative check: a concurrent
        // validation may have consumed the record since the lookup above.
        if !self.codes.consume(phone, code, now).await? {
            tracing::warn!(
                phone = %mask_phone_number(phone),
                event = "otp_validation_lost_race",
                "Verification code was consumed by a concurrent validation"
            );
            return Err(VerificationError::InvalidOrExpiredCode);
        }

        tracing::info!(
            phone = %mask_phone_number(phone),
            event = "otp_verified",
            "Verification code validated and consumed"
        );
        Ok(())
    }
}
