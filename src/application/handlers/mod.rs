//! Application handlers.
//!
//! Command handlers that orchestrate domain operations.

pub mod analysis;
pub mod dashboard;

pub use analysis::{
    AnalysisError, GenerateReportCommand, GenerateReportHandler, ReportMode, ReportSettings,
};
pub use dashboard::SubmitAnalysisHandler;
