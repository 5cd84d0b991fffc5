//! SMS service module - external SMS providers
//!
//! Production delivery goes through SUBMAIL; the mock gateway logs codes
//! locally for development environments without provider credentials.

mod mock_sms;
mod submail;

pub use mock_sms::MockSmsGateway;
pub use submail::{SubmailConfig, SubmailSmsGateway};
