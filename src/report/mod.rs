//! Spreadsheet exports of users, collaborators and tasks.
//!
//! Services load records through the user and task ports, tally the summary
//! block and hand everything to a [`ports::ReportRenderer`]. The shipped
//! renderer writes `.xlsx` workbooks.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
