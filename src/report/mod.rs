//! Draft and report generation.

pub mod generator;
pub mod minuta;

pub use generator::{
    generate_json_report, generate_markdown_report, write_output, Report, ReportMetadata,
};
pub use minuta::generate_draft;
