//! Application services for report export.

mod export;

pub use export::{ReportError, ReportResult, ReportService, TaskReportRequest};
