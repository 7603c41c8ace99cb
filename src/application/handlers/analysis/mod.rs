//! Report generation handlers.

mod generate_report;

pub use generate_report::{
    AnalysisError, GenerateReportCommand, GenerateReportHandler, ReportMode, ReportSettings,
};
