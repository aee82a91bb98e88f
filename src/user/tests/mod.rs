//! Unit tests for the user account context.

mod service_tests;
