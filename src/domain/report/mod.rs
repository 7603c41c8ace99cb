//! Report module - the structured risk report and its lenient schema.

pub mod lenient;
mod macros;
#[allow(clippy::module_inception)]
mod report;
mod sections;

pub use report::{DrugAnalysisReport, Provenance};
pub use sections::{
    AiInsight, ClinicalInfo, CroAnalysis, ExternalFactors, Manufacturing, MarketAnalysis,
    MolecularDetails, RiskAssessment, RiskComponent, SiteReadiness, TrialDesign, TrialMetrics,
};
