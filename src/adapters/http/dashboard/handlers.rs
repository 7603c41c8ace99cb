//! HTTP handlers for dashboard endpoints.
//!
//! Every mutating endpoint dispatches one dashboard action and answers with
//! the resulting state.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Json, Path, State};

use crate::application::{AnalysisError, DashboardStore, SubmitAnalysisHandler};
use crate::domain::dashboard::{
    quick_report, AiFeature, AiStatus, AnalysisHistory, DashboardAction, DashboardState,
};
use crate::domain::molecule::MoleculeInputDraft;
use crate::ports::AIProvider;

use super::super::error::ApiError;
use super::dto::QuickAnalysisRequest;

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Shared state for the dashboard endpoints.
#[derive(Clone)]
pub struct DashboardAppState {
    pub store: DashboardStore,
    pub submit_handler: Arc<SubmitAnalysisHandler<dyn AIProvider>>,
}

impl DashboardAppState {
    pub fn new(store: DashboardStore, submit_handler: Arc<SubmitAnalysisHandler<dyn AIProvider>>) -> Self {
        Self {
            store,
            submit_handler,
        }
    }
}

fn bad_body(rejection: JsonRejection) -> ApiError {
    ApiError::BadRequest(rejection.body_text())
}

// ════════════════════════════════════════════════════════════════════════════════
// Handlers
// ════════════════════════════════════════════════════════════════════════════════

/// GET /api/ai-status
pub async fn get_ai_status(State(state): State<DashboardAppState>) -> Json<AiStatus> {
    Json(state.store.read(|s| s.ai_status.clone()).await)
}

/// GET /api/dashboard
pub async fn get_dashboard(State(state): State<DashboardAppState>) -> Json<DashboardState> {
    Json(state.store.snapshot().await)
}

/// PATCH /api/dashboard/inputs
pub async fn update_inputs(
    State(state): State<DashboardAppState>,
    body: Result<Json<MoleculeInputDraft>, JsonRejection>,
) -> Result<Json<DashboardState>, ApiError> {
    let Json(patch) = body.map_err(bad_body)?;
    Ok(Json(
        state.store.dispatch(DashboardAction::UpdateInputs(patch)).await,
    ))
}

/// POST /api/dashboard/analysis
///
/// Submits the stored inputs. A validation failure is recorded in the
/// dashboard and returned as 400.
pub async fn submit_analysis(
    State(state): State<DashboardAppState>,
) -> Result<Json<DashboardState>, ApiError> {
    let dashboard = state.submit_handler.handle().await.map_err(|e| match e {
        AnalysisError::Validation(v) => ApiError::from(v),
    })?;
    Ok(Json(dashboard))
}

/// DELETE /api/dashboard/analysis
pub async fn clear_analysis(State(state): State<DashboardAppState>) -> Json<DashboardState> {
    Json(state.store.dispatch(DashboardAction::Clear).await)
}

/// POST /api/dashboard/features/:feature/toggle
pub async fn toggle_feature(
    State(state): State<DashboardAppState>,
    Path(feature): Path<String>,
) -> Result<Json<DashboardState>, ApiError> {
    let feature: AiFeature = feature.parse()?;
    Ok(Json(
        state.store.dispatch(DashboardAction::ToggleFeature(feature)).await,
    ))
}

/// POST /api/dashboard/quick-analysis
pub async fn quick_analysis(
    State(state): State<DashboardAppState>,
    body: Result<Json<QuickAnalysisRequest>, JsonRejection>,
) -> Result<Json<DashboardState>, ApiError> {
    let Json(request) = body.map_err(bad_body)?;
    let report = quick_report(request.drug_name()?);
    Ok(Json(
        state
            .store
            .dispatch(DashboardAction::QuickAnalysis(Box::new(report)))
            .await,
    ))
}

/// GET /api/dashboard/history
pub async fn get_history(State(state): State<DashboardAppState>) -> Json<AnalysisHistory> {
    Json(state.store.read(|s| s.analysis_history.clone()).await)
}
