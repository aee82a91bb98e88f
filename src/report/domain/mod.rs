//! Report domain: summary tallies and rendered documents.

mod document;
mod summary;

pub use document::{ReportDocument, ReportKind, XLSX_CONTENT_TYPE};
pub use summary::{CollaboratorTally, TaskTally, UserTally};
