//! Business services orchestrating the verification flow

pub mod registration;
pub mod verification;

pub use registration::RegistrationGate;
pub use verification::{SmsGateway, VerificationService};
