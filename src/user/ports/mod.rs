//! Port contracts for user account management.

pub mod repository;

pub use repository::{UserFilter, UserRepository, UserRepositoryError, UserRepositoryResult};
