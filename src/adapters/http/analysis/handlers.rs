//! HTTP handlers for analysis endpoints.
//!
//! These handlers connect Axum routes to the report handler and the
//! simulated risk and market analyses.

use std::sync::Arc;
use std::time::Duration;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Json, State};
use rand::Rng;
use tracing::warn;

use crate::application::{AnalysisError, GenerateReportCommand, GenerateReportHandler};
use crate::domain::analysis::{
    generate_market_analysis, reanalyze, risk_snapshot, MarketAnalysisRequest, MarketReport,
    Reanalysis, ReanalysisRequest, RiskSnapshot,
};
use crate::domain::molecule::MoleculeInputDraft;
use crate::domain::report::DrugAnalysisReport;
use crate::ports::AIProvider;

use super::super::error::ApiError;

const SNAPSHOT_LATENCY: Duration = Duration::from_millis(500);
const REANALYSIS_LATENCY: Duration = Duration::from_millis(1000);

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Shared state for the analysis endpoints.
#[derive(Clone)]
pub struct AnalysisAppState {
    pub report_handler: Arc<GenerateReportHandler<dyn AIProvider>>,
    /// Add artificial latency to the simulated endpoints.
    pub simulate_latency: bool,
}

impl AnalysisAppState {
    pub fn new(report_handler: Arc<GenerateReportHandler<dyn AIProvider>>) -> Self {
        Self {
            report_handler,
            simulate_latency: true,
        }
    }

    pub fn with_simulated_latency(mut self, enabled: bool) -> Self {
        self.simulate_latency = enabled;
        self
    }

    async fn pause(&self, duration: Duration) {
        if self.simulate_latency {
            tokio::time::sleep(duration).await;
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Handlers
// ════════════════════════════════════════════════════════════════════════════════

/// POST /api/ai-analysis
///
/// Always answers with a report unless a required field is missing; an
/// unreadable body is reported as the generic analysis failure.
pub async fn analyze_molecule(
    State(state): State<AnalysisAppState>,
    body: Result<Json<MoleculeInputDraft>, JsonRejection>,
) -> Result<Json<DrugAnalysisReport>, ApiError> {
    let Json(inputs) = body.map_err(|rejection| {
        warn!(error = %rejection, "unreadable ai-analysis body");
        ApiError::AnalysisUnavailable
    })?;

    let report = state
        .report_handler
        .handle(GenerateReportCommand::new(inputs))
        .await
        .map_err(|e| match e {
            AnalysisError::Validation(v) => ApiError::from(v),
        })?;

    Ok(Json(report))
}

/// GET /api/risk-analysis
pub async fn get_risk_snapshot(State(state): State<AnalysisAppState>) -> Json<RiskSnapshot> {
    state.pause(SNAPSHOT_LATENCY).await;
    Json(risk_snapshot())
}

/// POST /api/risk-analysis
pub async fn rerun_risk_analysis(
    State(state): State<AnalysisAppState>,
    body: Result<Json<ReanalysisRequest>, JsonRejection>,
) -> Result<Json<Reanalysis>, ApiError> {
    let Json(request) = body.map_err(|rejection| {
        warn!(error = %rejection, "unreadable risk-analysis body");
        ApiError::ReanalysisRejected
    })?;

    state.pause(REANALYSIS_LATENCY).await;
    Ok(Json(reanalyze(request, &mut rand::thread_rng())))
}

/// POST /api/market-analysis
pub async fn analyze_market(
    State(state): State<AnalysisAppState>,
    body: Result<Json<MarketAnalysisRequest>, JsonRejection>,
) -> Result<Json<MarketReport>, ApiError> {
    let Json(request) = body.map_err(|rejection| {
        warn!(error = %rejection, "unreadable market-analysis body");
        ApiError::MarketAnalysisFailed
    })?;

    let latency_ms = rand::thread_rng().gen_range(500..1500);
    state.pause(Duration::from_millis(latency_ms)).await;
    Ok(Json(generate_market_analysis(&request, &mut rand::thread_rng())))
}
