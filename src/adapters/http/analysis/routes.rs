//! HTTP routes for analysis endpoints.

use axum::routing::{get, post};
use axum::Router;

use super::handlers::{
    analyze_market, analyze_molecule, get_risk_snapshot, rerun_risk_analysis, AnalysisAppState,
};

/// Creates the analysis router with all routes.
pub fn analysis_routes(state: AnalysisAppState) -> Router {
    Router::new()
        .route("/api/ai-analysis", post(analyze_molecule))
        .route(
            "/api/risk-analysis",
            get(get_risk_snapshot).post(rerun_risk_analysis),
        )
        .route("/api/market-analysis", post(analyze_market))
        .with_state(state)
}
