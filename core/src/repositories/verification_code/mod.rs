//! Verification code persistence (the OTP store)

mod mock;
mod repository;


pub use mock::MockVerificationCodeRepository;
pub use repository::VerificationCodeRepository;
