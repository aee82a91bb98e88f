//! Application services for account registration and administration.

mod accounts;

pub use accounts::{
    AuthenticatedSession, RegisterUserRequest, UpdateUserRequest, UserAccountError,
    UserAccountResult, UserAccountService,
};
