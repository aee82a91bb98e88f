//! Port contracts for report export.

pub mod renderer;

pub use renderer::{RenderError, RenderResult, ReportRenderer};
