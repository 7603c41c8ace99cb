//! Masks report fields that would be proprietary if real.

use std::collections::BTreeMap;

use crate::domain::foundation::NOT_SPECIFIED;
use crate::domain::report::DrugAnalysisReport;

pub const REDACTED: &str = "***REDACTED***";

/// Markers the model uses when it has no real figure for a field.
const PLACEHOLDER_TOKENS: [&str; 2] = ["Calculate", "Generate"];

/// Lists the sensitive fields present in `report`, each mapped to
/// [`REDACTED`].
///
/// Registry identifiers and the budget are masked whenever populated.
/// Molecular weight, market size, timeline and cost estimates are masked only
/// when they still read like an instruction ("Calculate ...", "Generate ...").
pub fn redact_sensitive_fields(report: &DrugAnalysisReport) -> BTreeMap<String, String> {
    let always = [
        ("protocolNumber", report.clinical_info.protocol_number.as_str()),
        ("clinicalTrialsGov", report.clinical_info.clinical_trials_gov.as_str()),
        ("exactBudget", report.trial_metrics.budget.as_str()),
    ];

    let if_placeholder = [
        ("exactMolecularSpecs", Some(report.molecular_details.molecular_weight.as_str())),
        ("exactMarketSize", Some(report.market_analysis.market_size.as_str())),
        ("exactTimeline", Some(report.market_analysis.timeline.as_str())),
        ("manufacturingCosts", report.manufacturing.cost_estimates.as_deref()),
    ];

    let mut redacted = BTreeMap::new();

    for (key, value) in always {
        if is_populated(value) {
            redacted.insert(key.to_string(), REDACTED.to_string());
        }
    }

    for (key, value) in if_placeholder {
        if value.is_some_and(|v| is_populated(v) && has_placeholder_token(v)) {
            redacted.insert(key.to_string(), REDACTED.to_string());
        }
    }

    redacted
}

fn is_populated(value: &str) -> bool {
    let trimmed = value.trim();
    !trimmed.is_empty() && trimmed != NOT_SPECIFIED
}

fn has_placeholder_token(value: &str) -> bool {
    PLACEHOLDER_TOKENS.iter().any(|token| value.contains(token))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn report(value: serde_json::Value) -> DrugAnalysisReport {
        DrugAnalysisReport::from_normalized(value)
    }

    #[test]
    fn empty_report_redacts_nothing() {
        assert!(redact_sensitive_fields(&report(json!({}))).is_empty());
    }

    #[test]
    fn registry_ids_and_budget_always_redacted_when_present() {
        let redacted = redact_sensitive_fields(&report(json!({
            "clinicalInfo": {"protocolNumber": "VER-202-301", "clinicalTrialsGov": "NCT04636671"},
            "trialMetrics": {"budget": "$78,000,000"}
        })));

        assert_eq!(redacted.len(), 3);
        assert_eq!(redacted["protocolNumber"], REDACTED);
        assert_eq!(redacted["clinicalTrialsGov"], REDACTED);
        assert_eq!(redacted["exactBudget"], REDACTED);
    }

    #[test]
    fn placeholder_value_counts_as_absent() {
        let redacted = redact_sensitive_fields(&report(json!({
            "clinicalInfo": {"protocolNumber": "Not specified", "clinicalTrialsGov": ""}
        })));
        assert!(redacted.is_empty());
    }

    #[test]
    fn estimates_redacted_only_with_instruction_tokens() {
        let redacted = redact_sensitive_fields(&report(json!({
            "molecularDetails": {"molecularWeight": "Calculate from structure"},
            "marketAnalysis": {"marketSize": "$3.2B", "timeline": "Generate based on phase"},
            "manufacturing": {"costEstimates": "Calculate COGS per dose"}
        })));

        assert!(redacted.contains_key("exactMolecularSpecs"));
        assert!(!redacted.contains_key("exactMarketSize"));
        assert!(redacted.contains_key("exactTimeline"));
        assert!(redacted.contains_key("manufacturingCosts"));
    }

    #[test]
    fn token_match_is_case_sensitive() {
        let redacted = redact_sensitive_fields(&report(json!({
            "marketAnalysis": {"marketSize": "calculated at $2B"}
        })));
        assert!(redacted.is_empty());
    }
}
