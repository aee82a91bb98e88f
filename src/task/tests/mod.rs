//! Unit tests for the task lifecycle context.
