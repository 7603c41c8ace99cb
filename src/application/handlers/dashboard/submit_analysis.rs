//! SubmitAnalysis command handler.
//!
//! Runs report generation for the inputs currently held in the dashboard
//! and records the outcome through dashboard actions.

use std::sync::Arc;

use crate::application::dashboard_store::DashboardStore;
use crate::application::handlers::analysis::{
    AnalysisError, GenerateReportCommand, GenerateReportHandler,
};
use crate::domain::dashboard::{DashboardAction, DashboardState};
use crate::ports::AIProvider;

/// Handler for submitting the dashboard's current inputs.
pub struct SubmitAnalysisHandler<A>
where
    A: AIProvider + ?Sized,
{
    store: DashboardStore,
    generator: Arc<GenerateReportHandler<A>>,
}

impl<A> SubmitAnalysisHandler<A>
where
    A: AIProvider + ?Sized,
{
    pub fn new(store: DashboardStore, generator: Arc<GenerateReportHandler<A>>) -> Self {
        Self { store, generator }
    }

    /// Submits the stored inputs.
    ///
    /// A validation error is recorded as `SubmitFailed` and returned; any
    /// report (live or mock) is recorded as `SubmitSucceeded`.
    pub async fn handle(&self) -> Result<DashboardState, AnalysisError> {
        let inputs = self.store.read(|s| s.inputs.clone()).await;
        self.store.dispatch(DashboardAction::SubmitStarted).await;

        match self.generator.handle(GenerateReportCommand::new(inputs)).await {
            Ok(report) => Ok(self
                .store
                .dispatch(DashboardAction::SubmitSucceeded(Box::new(report)))
                .await),
            Err(err) => {
                self.store
                    .dispatch(DashboardAction::SubmitFailed(err.to_string()))
                    .await;
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::MockAIProvider;
    use crate::application::handlers::analysis::ReportSettings;
    use crate::domain::dashboard::AnalysisStatus;
    use crate::domain::molecule::fixtures::pde3a_draft;
    use crate::domain::molecule::MoleculeInputDraft;
    use crate::ports::AIError;

    fn handler(provider: MockAIProvider, store: &DashboardStore) -> SubmitAnalysisHandler<MockAIProvider> {
        SubmitAnalysisHandler::new(
            store.clone(),
            Arc::new(GenerateReportHandler::new(
                Arc::new(provider),
                ReportSettings::default(),
            )),
        )
    }

    #[tokio::test]
    async fn fallback_report_is_recorded_as_mock() {
        let store = DashboardStore::new("gemini-1.5-flash");
        store
            .dispatch(DashboardAction::UpdateInputs(pde3a_draft()))
            .await;

        let state = handler(MockAIProvider::new().with_error(AIError::network("reset")), &store)
            .handle()
            .await
            .unwrap();

        assert!(!state.is_loading);
        assert!(state.analysis.unwrap().is_mock_response);
        assert_eq!(state.analysis_history.entries()[0].status, AnalysisStatus::Mock);
        assert_eq!(state.ai_status.api_calls, 1);
    }

    #[tokio::test]
    async fn missing_inputs_are_recorded_as_error() {
        let store = DashboardStore::new("m");
        store
            .dispatch(DashboardAction::UpdateInputs(MoleculeInputDraft {
                gene_symbol: Some("KRAS".to_string()),
                ..Default::default()
            }))
            .await;
        let provider = MockAIProvider::new();

        let err = handler(provider.clone(), &store).handle().await.unwrap_err();

        assert_eq!(err.to_string(), "Missing required field: uniprotId");
        let state = store.snapshot().await;
        assert_eq!(state.error.as_deref(), Some("Missing required field: uniprotId"));
        assert!(!state.is_loading);
        assert_eq!(state.analysis_history.entries()[0].drug_name, "KRAS");
        assert_eq!(state.analysis_history.entries()[0].status, AnalysisStatus::Error);
        assert_eq!(provider.call_count(), 0);
    }
}
