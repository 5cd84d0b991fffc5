//! Account repository trait.
//!
//! The verification subsystem treats the portal's user accounts as an
//! external collaborator: the only question it ever asks is whether a
//! phone number is already bound to an account. Account creation itself
//! is handled elsewhere.

use async_trait::async_trait;

use crate::errors::VerificationError;

/// Read-only view of the account store keyed by phone number
#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Check whether an account already exists for the given phone number
    async fn exists_by_phone(&self, phone: &str) -> Result<bool, VerificationError>;
}
