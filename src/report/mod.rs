//! Emission report generation
//!
//! Turns an activity and usage value into a rendered Word document and
//! hands it to a [`ReportStore`](crate::storage::ReportStore).

pub mod document;
pub mod generator;

pub use document::{render_docx, report_lines, ReportLine};
pub use generator::{report_file_name, GeneratedReport, ReportError, ReportGenerator};
