//! MySQL repository implementations

mod account_repository_impl;
mod verification_code_repository_impl;

pub use account_repository_impl::MySqlAccountRepository;
pub use verification_code_repository_impl::MySqlVerificationCodeRepository;
