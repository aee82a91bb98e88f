//! Flowment: task assignment and reporting backend.
//!
//! Team-leaders assign tasks to collaborators, collaborators move them
//! through a fixed set of statuses, and finalized work can be reopened through
//! a request that the creating team-leader approves or rejects. User, collaborator
//! and task listings export to spreadsheets.
//!
//! # Architecture
//!
//! Flowment follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (database, workbook)
//!
//! # Modules
//!
//! - [`user`]: Accounts, roles and organizations
//! - [`task`]: Task lifecycle and reopen requests
//! - [`report`]: Spreadsheet exports
//! - [`auth`]: Password hashing and bearer tokens
//! - [`http`]: JSON API over axum
//! - [`config`]: Server settings

pub mod auth;
pub mod config;
pub mod http;
pub mod report;
pub mod task;
pub mod user;
