//! Shared utilities and common types for the RongTai Express server
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types
//! - Utility functions (phone validation, E.164 conversion, etc.)

pub mod config;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{DatabaseConfig, VerificationConfig};
pub use utils::phone;
