//! Analysis module - pure services that produce and post-process reports.
//!
//! # Components
//!
//! - `prompt` - renders molecule inputs into the report request
//! - `normalizer` - turns the model's free text into a JSON object
//! - `repair` - the ordered syntactic repair rules used by the normalizer
//! - `mock_report` - structure-aware fallback reports
//! - `redaction` - masks sensitive report fields
//! - `risk_snapshot`, `market` - simulated analyses for the dashboard pages
//!
//! Nothing here performs I/O; randomness is injected where results vary.

mod market;
mod mock_report;
mod normalizer;
mod prompt;
mod redaction;
pub mod repair;
mod risk_snapshot;

pub use market::{generate_market_analysis, MarketAnalysisRequest, MarketReport, MARKET_MODEL_LABEL};
pub use mock_report::{generate_mock_report, DEMO_MODEL_LABEL, FALLBACK_MODEL_LABEL};
pub use normalizer::{
    isolate_object, normalize_response, strip_fences, NormalizeError, NormalizeStage, StageAttempt,
};
pub use prompt::{build_prompt, SYSTEM_PROMPT};
pub use redaction::{redact_sensitive_fields, REDACTED};
pub use risk_snapshot::{
    reanalyze, risk_snapshot, Reanalysis, ReanalysisRequest, ReanalysisResult, RiskFactor,
    RiskFactors, RiskSnapshot, TieredRecommendations, REFERENCE_TRIAL_ID, SNAPSHOT_MODEL_VERSION,
};
