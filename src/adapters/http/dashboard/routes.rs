//! HTTP routes for dashboard endpoints.

use axum::routing::{get, patch, post};
use axum::Router;

use super::handlers::{
    clear_analysis, get_ai_status, get_dashboard, get_history, quick_analysis, submit_analysis,
    toggle_feature, update_inputs, DashboardAppState,
};

/// Creates the dashboard router with all routes.
pub fn dashboard_routes(state: DashboardAppState) -> Router {
    Router::new()
        .route("/api/ai-status", get(get_ai_status))
        .route("/api/dashboard", get(get_dashboard))
        .route("/api/dashboard/inputs", patch(update_inputs))
        .route(
            "/api/dashboard/analysis",
            post(submit_analysis).delete(clear_analysis),
        )
        .route("/api/dashboard/features/:feature/toggle", post(toggle_feature))
        .route("/api/dashboard/quick-analysis", post(quick_analysis))
        .route("/api/dashboard/history", get(get_history))
        .with_state(state)
}
