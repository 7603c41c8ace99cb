//! GenerateReport command handler.
//!
//! Validates molecule inputs, asks the AI provider for a report and turns
//! the reply into a [`DrugAnalysisReport`]. Any failure after validation
//! falls back to a mock report, so the only error a caller sees is a
//! validation error.

use std::sync::Arc;
use std::time::{Duration, Instant};

use thiserror::Error;
use tracing::{info, warn};
use uuid::Uuid;

use crate::domain::analysis::{
    build_prompt, generate_mock_report, normalize_response, redact_sensitive_fields,
    NormalizeError, SYSTEM_PROMPT,
};
use crate::domain::foundation::ValidationError;
use crate::domain::molecule::{MoleculeInput, MoleculeInputDraft};
use crate::domain::report::{DrugAnalysisReport, Provenance};
use crate::ports::{AIError, AIProvider, CompletionRequest, MessageRole};

/// How reports are produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportMode {
    /// Call the AI provider, falling back to a mock report on failure.
    Live,
    /// Never call out; every submission is a demo report.
    Offline,
}

/// Tuning for live report generation.
#[derive(Debug, Clone)]
pub struct ReportSettings {
    pub mode: ReportMode,
    /// Upper bound on the whole completion call.
    pub timeout: Duration,
    pub max_output_tokens: u32,
    pub temperature: f32,
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self {
            mode: ReportMode::Live,
            timeout: Duration::from_secs(45),
            max_output_tokens: 8192,
            temperature: 0.4,
        }
    }
}

/// Command to generate a report.
#[derive(Debug, Clone)]
pub struct GenerateReportCommand {
    pub inputs: MoleculeInputDraft,
}

impl GenerateReportCommand {
    pub fn new(inputs: MoleculeInputDraft) -> Self {
        Self { inputs }
    }
}

/// Errors surfaced to callers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalysisError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// Why a live report could not be produced.
#[derive(Debug, Error)]
enum LiveReportError {
    #[error("{0}")]
    Provider(#[from] AIError),

    #[error("AI request exceeded {0}s")]
    TimedOut(u64),

    #[error("could not read model reply: {0}")]
    Unreadable(#[from] NormalizeError),
}

/// Handler for GenerateReport commands.
pub struct GenerateReportHandler<A>
where
    A: AIProvider + ?Sized,
{
    ai_provider: Arc<A>,
    settings: ReportSettings,
}

impl<A> GenerateReportHandler<A>
where
    A: AIProvider + ?Sized,
{
    pub fn new(ai_provider: Arc<A>, settings: ReportSettings) -> Self {
        Self {
            ai_provider,
            settings,
        }
    }

    /// Produces a report for the command's inputs.
    ///
    /// Returns `Err` only for missing required inputs, in which case the
    /// provider is never called.
    pub async fn handle(
        &self,
        cmd: GenerateReportCommand,
    ) -> Result<DrugAnalysisReport, AnalysisError> {
        let input = cmd.inputs.validate()?;

        if self.settings.mode == ReportMode::Offline {
            info!(drug = %input.gene_symbol, "offline mode, returning demo report");
            return Ok(generate_mock_report(&input, None));
        }

        let trace_id = Uuid::new_v4().to_string();
        let started = Instant::now();

        match self.live_report(&input, &trace_id).await {
            Ok(report) => {
                let elapsed = started.elapsed();
                info!(
                    trace_id = %trace_id,
                    drug = %report.drug_name,
                    risk_score = report.risk_score(),
                    elapsed_ms = elapsed.as_millis() as u64,
                    "live report generated"
                );
                Ok(report.stamp(Provenance::live(
                    self.ai_provider.provider_info().display_name,
                    format!("{:.1} seconds", elapsed.as_secs_f64()),
                )))
            }
            Err(err) => {
                warn!(
                    trace_id = %trace_id,
                    drug = %input.gene_symbol,
                    error = %err,
                    "AI report failed, falling back to mock report"
                );
                Ok(self.fallback_report(&input, &err.to_string()))
            }
        }
    }

    async fn live_report(
        &self,
        input: &MoleculeInput,
        trace_id: &str,
    ) -> Result<DrugAnalysisReport, LiveReportError> {
        let request = CompletionRequest::new(trace_id)
            .with_system_prompt(SYSTEM_PROMPT)
            .with_message(MessageRole::User, build_prompt(input))
            .with_max_tokens(self.settings.max_output_tokens)
            .with_temperature(self.settings.temperature);

        let response = tokio::time::timeout(self.settings.timeout, self.ai_provider.complete(request))
            .await
            .map_err(|_| LiveReportError::TimedOut(self.settings.timeout.as_secs()))??;

        info!(
            trace_id = %trace_id,
            model = %response.model,
            prompt_tokens = response.usage.prompt_tokens,
            completion_tokens = response.usage.completion_tokens,
            finish_reason = ?response.finish_reason,
            "AI reply received"
        );

        let value = normalize_response(&response.content)?;
        let mut report =
            DrugAnalysisReport::from_normalized(value).with_drug_name_fallback(&input.gene_symbol);
        report.blurred_data = redact_sensitive_fields(&report);
        Ok(report)
    }

    fn fallback_report(&self, input: &MoleculeInput, reason: &str) -> DrugAnalysisReport {
        let mut report = generate_mock_report(input, Some(reason));
        report.model_used = format!(
            "Mock Response ({} failed)",
            self.ai_provider.provider_info().display_name
        );
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::MockAIProvider;
    use crate::domain::analysis::REDACTED;
    use crate::domain::molecule::fixtures::pde3a_draft;
    use crate::ports::ProviderInfo;

    fn gemini_like(provider: MockAIProvider) -> MockAIProvider {
        provider.with_provider_info(ProviderInfo::new(
            "gemini",
            "gemini-1.5-flash",
            "Gemini 1.5 Flash",
        ))
    }

    fn handler(provider: &MockAIProvider) -> GenerateReportHandler<MockAIProvider> {
        GenerateReportHandler::new(Arc::new(provider.clone()), ReportSettings::default())
    }

    const LIVE_REPLY: &str = r#"Here you go:
```json
{
  "drugName": "PDE3A Modulator",
  "molecularDetails": {"drugName": "PDE3A Modulator", "molecularWeight": "412.5 g/mol"},
  "riskAssessment": {"overallScore": 64, "components": [
    {"name": "API Supply", "score": 70, "description": "Single source"},
  ]},
  "clinicalInfo": {"protocolNumber": "PDE-2024-001"},
}
```"#;

    #[tokio::test]
    async fn live_reply_becomes_report() {
        let provider = gemini_like(MockAIProvider::new().with_response(LIVE_REPLY));

        let report = handler(&provider)
            .handle(GenerateReportCommand::new(pde3a_draft()))
            .await
            .unwrap();

        assert!(!report.is_mock_response);
        assert_eq!(report.gemini_error, None);
        assert_eq!(report.model_used, "Gemini 1.5 Flash");
        assert_eq!(report.drug_name, "PDE3A Modulator");
        assert_eq!(report.risk_score(), 64);
        assert!(report.processing_time.ends_with(" seconds"));
        assert_eq!(provider.call_count(), 1);
    }

    #[tokio::test]
    async fn live_request_carries_prompt_and_settings() {
        let provider = MockAIProvider::new().with_response(LIVE_REPLY);

        handler(&provider)
            .handle(GenerateReportCommand::new(pde3a_draft()))
            .await
            .unwrap();

        let request = provider.last_request().unwrap();
        assert_eq!(request.system_prompt.as_deref(), Some(SYSTEM_PROMPT));
        assert_eq!(request.max_tokens, Some(8192));
        assert!(request.user_text().contains("PDE3A"));
        assert!(!request.trace_id.is_empty());
    }

    #[tokio::test]
    async fn live_report_gets_redacted_blurred_data() {
        let provider = MockAIProvider::new().with_response(LIVE_REPLY);

        let report = handler(&provider)
            .handle(GenerateReportCommand::new(pde3a_draft()))
            .await
            .unwrap();

        assert_eq!(report.blurred_data.get("protocolNumber").map(String::as_str), Some(REDACTED));
    }

    #[tokio::test]
    async fn provider_failure_falls_back_to_mock() {
        let provider =
            gemini_like(MockAIProvider::new().with_error(AIError::unavailable("503 from upstream")));

        let report = handler(&provider)
            .handle(GenerateReportCommand::new(pde3a_draft()))
            .await
            .unwrap();

        assert!(report.is_mock_response);
        assert_eq!(report.model_used, "Mock Response (Gemini 1.5 Flash failed)");
        assert!(report
            .gemini_error
            .as_deref()
            .unwrap()
            .contains("503 from upstream"));
        assert!(report.risk_score() <= 100);
        assert!(!report.risk_assessment.components.is_empty());
    }

    #[tokio::test]
    async fn unreadable_reply_falls_back_to_mock() {
        let provider = MockAIProvider::new().with_response("I cannot help with that.");

        let report = handler(&provider)
            .handle(GenerateReportCommand::new(pde3a_draft()))
            .await
            .unwrap();

        assert!(report.is_mock_response);
        assert!(report.gemini_error.is_some());
    }

    #[tokio::test]
    async fn slow_provider_times_out_into_mock() {
        let provider = MockAIProvider::new()
            .with_response(LIVE_REPLY)
            .with_delay(Duration::from_millis(200));
        let handler = GenerateReportHandler::new(
            Arc::new(provider),
            ReportSettings {
                timeout: Duration::from_millis(20),
                ..Default::default()
            },
        );

        let report = handler
            .handle(GenerateReportCommand::new(pde3a_draft()))
            .await
            .unwrap();

        assert!(report.is_mock_response);
        assert!(report.gemini_error.unwrap().contains("exceeded"));
    }

    #[tokio::test]
    async fn missing_gene_symbol_never_calls_provider() {
        let provider = MockAIProvider::new().with_response(LIVE_REPLY);
        let mut draft = pde3a_draft();
        draft.gene_symbol = None;

        let err = handler(&provider)
            .handle(GenerateReportCommand::new(draft))
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Missing required field: geneSymbol");
        assert_eq!(provider.call_count(), 0);
    }

    #[tokio::test]
    async fn offline_mode_returns_demo_report_without_calling() {
        let provider = MockAIProvider::new();
        let handler = GenerateReportHandler::new(
            Arc::new(provider.clone()),
            ReportSettings {
                mode: ReportMode::Offline,
                ..Default::default()
            },
        );

        let report = handler
            .handle(GenerateReportCommand::new(pde3a_draft()))
            .await
            .unwrap();

        assert!(report.is_mock_response);
        assert_eq!(report.gemini_error, None);
        assert_eq!(provider.call_count(), 0);
    }
}
