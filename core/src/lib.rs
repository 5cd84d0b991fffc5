//! # RongTai Express Core
//!
//! Core business logic and domain layer for the RongTai Express backend.
//! This crate contains the phone verification domain entities, business
//! services, repository interfaces, and error types on which the customer
//! portal's registration flow is built.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::*;
pub use errors::*;
pub use repositories::*;
pub use services::*;
