//! Dashboard command handlers.

mod submit_analysis;

pub use submit_analysis::SubmitAnalysisHandler;
