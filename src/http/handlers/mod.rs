//! Request handlers grouped by resource.

pub mod accounts;
pub mod reports;
pub mod tasks;
