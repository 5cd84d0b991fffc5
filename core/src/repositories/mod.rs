//! Repository interfaces for domain persistence
//!
//! Traits live here in the domain layer; concrete database-backed
//! implementations live in the infrastructure crate. In-memory mocks are
//! provided alongside each trait for testing.

pub mod account;
pub mod verification_code;

pub use account::{AccountRepository, MockAccountRepository};
pub use verification_code::{MockVerificationCodeRepository, VerificationCodeRepository};
