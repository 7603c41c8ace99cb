//! Analysis HTTP adapter module.
//!
//! Report generation plus the simulated risk and market endpoints.

pub mod handlers;
pub mod routes;

pub use handlers::AnalysisAppState;
pub use routes::analysis_routes;
