//! Dashboard state and its reducer.

use serde::Serialize;

use crate::domain::foundation::NOT_SPECIFIED;
use crate::domain::molecule::MoleculeInputDraft;
use crate::domain::report::DrugAnalysisReport;

use super::features::{AiFeature, AiFeatures};
use super::history::{AnalysisHistory, HistoryEntry};
use super::status::{parse_processing_ms, AiStatus};

/// Everything the dashboard pages render.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardState {
    pub inputs: MoleculeInputDraft,
    pub analysis: Option<DrugAnalysisReport>,
    pub is_loading: bool,
    pub error: Option<String>,
    pub ai_status: AiStatus,
    pub analysis_history: AnalysisHistory,
    #[serde(rename = "isAIActive")]
    pub is_ai_active: bool,
    pub ai_features: AiFeatures,
}

/// Named state transitions.
#[derive(Debug, Clone)]
pub enum DashboardAction {
    UpdateInputs(MoleculeInputDraft),
    SubmitStarted,
    SubmitSucceeded(Box<DrugAnalysisReport>),
    SubmitFailed(String),
    Clear,
    ToggleFeature(AiFeature),
    QuickAnalysis(Box<DrugAnalysisReport>),
    StatusChecked { online: bool, response_time_ms: u64 },
    StatusCheckFailed,
}

impl DashboardAction {
    pub fn name(&self) -> &'static str {
        match self {
            DashboardAction::UpdateInputs(_) => "update_inputs",
            DashboardAction::SubmitStarted => "submit_started",
            DashboardAction::SubmitSucceeded(_) => "submit_succeeded",
            DashboardAction::SubmitFailed(_) => "submit_failed",
            DashboardAction::Clear => "clear",
            DashboardAction::ToggleFeature(_) => "toggle_feature",
            DashboardAction::QuickAnalysis(_) => "quick_analysis",
            DashboardAction::StatusChecked { .. } => "status_checked",
            DashboardAction::StatusCheckFailed => "status_check_failed",
        }
    }
}

impl DashboardState {
    pub fn new(model_version: impl Into<String>) -> Self {
        Self {
            inputs: MoleculeInputDraft::default(),
            analysis: None,
            is_loading: false,
            error: None,
            ai_status: AiStatus::new(model_version),
            analysis_history: AnalysisHistory::default(),
            is_ai_active: true,
            ai_features: AiFeatures::default(),
        }
    }

    /// Applies one action. A new report always replaces the current one.
    pub fn apply(&mut self, action: DashboardAction) {
        match action {
            DashboardAction::UpdateInputs(patch) => self.inputs.merge(patch),
            DashboardAction::SubmitStarted => {
                self.is_loading = true;
                self.error = None;
            }
            DashboardAction::SubmitSucceeded(report) => {
                self.is_loading = false;
                self.error = None;
                self.ai_status
                    .record_call(parse_processing_ms(&report.processing_time));
                self.analysis_history.record(HistoryEntry::from_report(&report));
                self.analysis = Some(*report);
            }
            DashboardAction::SubmitFailed(message) => {
                self.is_loading = false;
                self.error = Some(message);
                self.ai_status.record_error();
                let drug = self
                    .inputs
                    .gene_symbol
                    .clone()
                    .filter(|s| !s.trim().is_empty())
                    .unwrap_or_else(|| NOT_SPECIFIED.to_string());
                self.analysis_history.record(HistoryEntry::failed(drug));
            }
            DashboardAction::Clear => {
                self.analysis = None;
                self.error = None;
            }
            DashboardAction::ToggleFeature(feature) => {
                self.ai_features.toggle(feature);
                self.is_ai_active = self.ai_features.any_enabled();
            }
            DashboardAction::QuickAnalysis(report) => {
                self.analysis = Some(*report);
            }
            DashboardAction::StatusChecked {
                online,
                response_time_ms,
            } => self.ai_status.record_check(online, response_time_ms),
            DashboardAction::StatusCheckFailed => self.ai_status.record_check_failure(),
        }
    }
}
