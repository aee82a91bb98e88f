//! Step definitions for task progression and reopen scenarios.

pub mod given;
pub mod then;
pub mod when;
pub mod world;
