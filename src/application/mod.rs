//! Application layer - Commands and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.

pub mod dashboard_store;
pub mod handlers;

pub use dashboard_store::DashboardStore;
pub use handlers::{
    AnalysisError, GenerateReportCommand, GenerateReportHandler, ReportMode, ReportSettings,
    SubmitAnalysisHandler,
};
