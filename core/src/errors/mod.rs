//! Domain-specific error types for the phone verification flow.
//!
//! Error messages carry English and Chinese text separated by `|`; the
//! presentation layer picks the half matching the client's language.

use thiserror::Error;

/// Errors surfaced by the verification service and registration gate
#[derive(Error, Debug)]
pub enum VerificationError {
    #[error("Required fields are missing | 必填欄位不能為空")]
    MissingFields,

    #[error("Invalid phone format: {phone} | 無效的手機號碼格式: {phone}")]
    InvalidPhoneFormat { phone: String },

    #[error("Phone number already registered | 手機號碼已被註冊")]
    PhoneAlreadyRegistered,

    // Deliberately covers wrong code, expired code, and already-consumed
    // code with one message so responses reveal nothing about which it was.
    #[error("Invalid or expired verification code | 驗證碼錯誤或已過期")]
    InvalidOrExpiredCode,

    #[error("Phone number has not been verified | 手機號碼尚未完成驗證")]
    PhoneNotVerified,

    #[error("Storage error: {message} | 伺服器錯誤")]
    Storage { message: String },

    #[error("SMS delivery failed: {reason} | 簡訊發送失敗")]
    DeliveryFailed { reason: String },
}

impl VerificationError {
    /// Stable error code for programmatic handling in the HTTP layer
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::MissingFields => "MISSING_FIELDS",
            Self::InvalidPhoneFormat { .. } => "INVALID_PHONE_FORMAT",
            Self::PhoneAlreadyRegistered => "PHONE_ALREADY_REGISTERED",
            Self::InvalidOrExpiredCode => "INVALID_OR_EXPIRED_CODE",
            Self::PhoneNotVerified => "PHONE_NOT_VERIFIED",
            Self::Storage { .. } => "STORAGE_ERROR",
            Self::DeliveryFailed { .. } => "DELIVERY_FAILED",
        }
    }

    /// Whether the client may retry the same request unchanged
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Storage { .. } | Self::DeliveryFailed { .. })
    }
}

pub type VerificationResult<T> = Result<T, VerificationError>;
