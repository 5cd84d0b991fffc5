//! Account existence checks against the portal's user store

mod mock;
mod repository;

pub use mock::MockAccountRepository;
pub use repository::AccountRepository;
