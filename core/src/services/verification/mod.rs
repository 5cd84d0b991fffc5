//! Verification service module for SMS-based phone verification
//!
//! This module provides the code request and validation workflow:
//! - Code generation and persistence
//! - SMS delivery through a pluggable gateway
//! - Single-use validation with atomic consumption

mod service;
mod traits;

#[cfg(test)]
mod tests;

pub use service::VerificationService;
pub use traits::SmsGateway;
