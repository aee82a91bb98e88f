//! Task lifecycle and reopen-request workflow.
//!
//! Team-leaders create tasks for collaborators. Collaborators advance them
//! along a fixed set of status edges and may ask to reopen finalized work,
//! which the creating team-leader approves or rejects. The module follows
//! hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
