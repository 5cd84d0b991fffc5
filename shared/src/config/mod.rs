//! Configuration types shared across server modules
//!
//! Each config struct is constructed explicitly (from the environment or
//! by hand in tests) and passed into the component that needs it, so
//! multiple configurations can coexist side by side.

pub mod database;
pub mod verification;

pub use database::DatabaseConfig;
pub use verification::VerificationConfig;
