//! Adapter implementations of the report ports.

pub mod xlsx;

pub use xlsx::XlsxReportRenderer;
