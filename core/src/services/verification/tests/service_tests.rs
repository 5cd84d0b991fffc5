//! Verification service tests

use std::sync::Arc;

use chrono::Duration;

use rt_shared::config::VerificationConfig;

use crate::domain::clock::ManualClock;
use crate::errors::VerificationError;
use crate::repositories::{MockAccountRepository, MockVerificationCodeRepository};
use crate::services::verification::VerificationService;

use super::mocks::MockSmsGateway;

const PHONE: &str = "0912345678";

struct TestHarness {
    service: VerificationService<
        MockVerificationCodeRepository,
        MockAccountRepository,
        MockSmsGateway,
    >,
    codes: Arc<MockVerificationCodeRepository>,
    accounts: Arc<MockAccountRepository>,
    sms: Arc<MockSmsGateway>,
    clock: Arc<ManualClock>,
}

fn harness() -> TestHarness {
    harness_with(
        MockVerificationCodeRepository::new(),
        MockSmsGateway::new(),
    )
}

fn harness_with(codes: MockVerificationCodeRepository, sms: MockSmsGateway) -> TestHarness {
    let codes = Arc::new(codes);
    let accounts = Arc::new(MockAccountRepository::new());
    let sms = Arc::new(sms);
    let clock = Arc::new(ManualClock::starting_now());
    let service = VerificationService::new(
        codes.clone(),
        accounts.clone(),
        sms.clone(),
        clock.clone(),
        VerificationConfig::default(),
    );
    TestHarness {
        service,
        codes,
        accounts,
        sms,
        clock,
    }
}

/// Pull the code most recently issued for a phone out of the store
async fn issued_code(codes: &MockVerificationCodeRepository, phone: &str) -> String {
    codes
        .records_for(phone)
        .await
        .last()
        .expect("a code should have been issued")
        .code
        .clone()
}

#[tokio::test]
async fn test_request_code_happy_path() {
    let h = harness();

    h.service.request_code(PHONE).await.unwrap();

    assert_eq!(h.codes.record_count().await, 1);
    let (destination, body) = h.sms.last_message().unwrap();
    assert_eq!(destination, "+886912345678");
    let code = issued_code(&h.codes, PHONE).await;
    assert!(body.contains(&code));
}

#[tokio::test]
async fn test_request_code_rejects_malformed_phones() {
    let h = harness();

    for phone in ["0812345678", "09123456", "091234567890", "09abcdefgh", "912345678"] {
        let err = h.service.request_code(phone).await.unwrap_err();
        assert!(
            matches!(err, VerificationError::InvalidPhoneFormat { .. }),
            "expected format rejection for {phone}"
        );
    }

    // Nothing persisted, nothing delivered
    assert_eq!(h.codes.record_count().await, 0);
    assert_eq!(h.sms.sent_count(), 0);
}

#[tokio::test]
async fn test_request_code_rejects_empty_phone() {
    let h = harness();

    let err = h.service.request_code("").await.unwrap_err();
    assert!(matches!(err, VerificationError::MissingFields));
}

#[tokio::test]
async fn test_request_code_rejects_registered_phone() {
    let h = harness();
    h.accounts.register_phone(PHONE).await;

    let err = h.service.request_code(PHONE).await.unwrap_err();
    assert!(matches!(err, VerificationError::PhoneAlreadyRegistered));
    assert_eq!(h.codes.record_count().await, 0);
    assert_eq!(h.sms.sent_count(), 0);
}

#[tokio::test]
async fn test_request_code_storage_failure_skips_delivery() {
    let h = harness_with(
        MockVerificationCodeRepository::failing(),
        MockSmsGateway::new(),
    );

    let err = h.service.request_code(PHONE).await.unwrap_err();
    assert!(matches!(err, VerificationError::Storage { .. }));
    assert_eq!(h.sms.sent_count(), 0);
}

#[tokio::test]
async fn test_request_code_delivery_failure_keeps_record() {
    let h = harness_with(
        MockVerificationCodeRepository::new(),
        MockSmsGateway::failing(),
    );

    let err = h.service.request_code(PHONE).await.unwrap_err();
    assert!(matches!(err, VerificationError::DeliveryFailed { .. }));

    // The record survives the failed delivery and remains matchable
    assert_eq!(h.codes.record_count().await, 1);
    let code = issued_code(&h.codes, PHONE).await;
    h.service.validate_code(PHONE, &code).await.unwrap();
}

#[tokio::test]
async fn test_validate_code_happy_path() {
    let h = harness();

    h.service.request_code(PHONE).await.unwrap();
    let code = issued_code(&h.codes, PHONE).await;

    h.service.validate_code(PHONE, &code).await.unwrap();

    let records = h.codes.records_for(PHONE).await;
    assert!(records[0].consumed);
}

#[tokio::test]
async fn test_validate_code_is_single_use() {
    let h = harness();

    h.service.request_code(PHONE).await.unwrap();
    let code = issued_code(&h.codes, PHONE).await;

    h.service.validate_code(PHONE, &code).await.unwrap();
    let err = h.service.validate_code(PHONE, &code).await.unwrap_err();
    assert!(matches!(err, VerificationError::InvalidOrExpiredCode));
}

#[tokio::test]
async fn test_validate_code_without_record() {
    let h = harness();

    let err = h.service.validate_code(PHONE, "000000").await.unwrap_err();
    assert!(matches!(err, VerificationError::InvalidOrExpiredCode));
}

#[tokio::test]
async fn test_validate_code_rejects_wrong_code() {
    let h = harness();

    h.service.request_code(PHONE).await.unwrap();
    let code = issued_code(&h.codes, PHONE).await;
    // Guaranteed mismatch within the 6-digit space
    let wrong = if code == "999999" { "999998" } else { "999999" };

    let err = h.service.validate_code(PHONE, wrong).await.unwrap_err();
    assert!(matches!(err, VerificationError::InvalidOrExpiredCode));

    // The record is untouched and the right code still works
    h.service.validate_code(PHONE, &code).await.unwrap();
}

#[tokio::test]
async fn test_validate_code_rejects_expired_code() {
    let h = harness();

    h.service.request_code(PHONE).await.unwrap();
    let code = issued_code(&h.codes, PHONE).await;

    h.clock.advance(Duration::minutes(11));

    let err = h.service.validate_code(PHONE, &code).await.unwrap_err();
    assert!(matches!(err, VerificationError::InvalidOrExpiredCode));
}

#[tokio::test]
async fn test_validate_code_rejects_malformed_input() {
    let h = harness();
    h.service.request_code(PHONE).await.unwrap();

    let err = h.service.validate_code("0812345678", "123456").await.unwrap_err();
    assert!(matches!(err, VerificationError::InvalidPhoneFormat { .. }));

    let err = h.service.validate_code(PHONE, "").await.unwrap_err();
    assert!(matches!(err, VerificationError::MissingFields));

    for code in ["12345", "1234567", "12345a", "abcdef"] {
        let err = h.service.validate_code(PHONE, code).await.unwrap_err();
        assert!(matches!(err, VerificationError::InvalidOrExpiredCode));
    }
}

#[tokio::test]
async fn test_rerequest_supersedes_previous_code() {
    let h = harness();

    h.service.request_code(PHONE).await.unwrap();
    let first = issued_code(&h.codes, PHONE).await;

    h.clock.advance(Duration::minutes(1));
    h.service.request_code(PHONE).await.unwrap();
    let second = issued_code(&h.codes, PHONE).await;

    assert_eq!(h.codes.record_count().await, 2);

    if first != second {
        // The superseded code no longer validates
        let err = h.service.validate_code(PHONE, &first).await.unwrap_err();
        assert!(matches!(err, VerificationError::InvalidOrExpiredCode));
    }

    // The newer code does
    h.service.validate_code(PHONE, &second).await.unwrap();
}
