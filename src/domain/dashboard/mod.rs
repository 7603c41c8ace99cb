//! Dashboard module - the single state blob behind every dashboard page.
//!
//! State changes only through [`DashboardState::apply`] with a named
//! [`DashboardAction`].

mod features;
mod history;
mod quick;
mod state;
mod status;

pub use features::{AiFeature, AiFeatures};
pub use history::{AnalysisHistory, AnalysisStatus, HistoryEntry, HISTORY_CAPACITY};
pub use quick::{quick_report, QUICK_MODEL_LABEL};
pub use state::{DashboardAction, DashboardState};
pub use status::{parse_processing_ms, AiStatus};
