//! # Infrastructure Layer
//!
//! Concrete implementations of the core crate's persistence and delivery
//! interfaces:
//! - **Database**: MySQL repositories using SQLx
//! - **SMS**: SUBMAIL delivery gateway plus a mock for development

pub mod database;
pub mod sms;

/// Load environment variables from a `.env` file if one is present.
///
/// Call once at startup before constructing configs with `from_env`.
pub fn load_env() {
    dotenvy::dotenv().ok();
}

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database connection error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// HTTP request error for external services
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// SMS service error
    #[error("SMS service error: {0}")]
    Sms(String),
}
