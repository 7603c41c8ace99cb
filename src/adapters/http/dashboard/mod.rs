//! Dashboard HTTP adapter module.
//!
//! Exposes the dashboard state and its actions over REST.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use dto::QuickAnalysisRequest;
pub use handlers::DashboardAppState;
pub use routes::dashboard_routes;
