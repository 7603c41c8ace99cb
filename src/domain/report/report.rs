//! The drug analysis report aggregate.

use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::foundation::{Timestamp, NOT_SPECIFIED};

use super::lenient;
use super::sections::{
    ClinicalInfo, CroAnalysis, ExternalFactors, Manufacturing, MarketAnalysis, MolecularDetails,
    RiskAssessment, SiteReadiness, TrialDesign, TrialMetrics,
};

/// Full risk report for one molecule submission.
///
/// Every section is always present. Reports are replaced wholesale on each
/// submission and never merged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DrugAnalysisReport {
    #[serde(default = "lenient::not_specified", deserialize_with = "lenient::text")]
    pub drug_name: String,
    #[serde(default)]
    pub molecular_details: MolecularDetails,
    #[serde(default)]
    pub clinical_info: ClinicalInfo,
    #[serde(default)]
    pub risk_assessment: RiskAssessment,
    #[serde(default)]
    pub manufacturing: Manufacturing,
    #[serde(default)]
    pub market_analysis: MarketAnalysis,
    #[serde(default)]
    pub cro_analysis: CroAnalysis,
    #[serde(default)]
    pub external_factors: ExternalFactors,
    #[serde(default)]
    pub trial_metrics: TrialMetrics,
    #[serde(default)]
    pub trial_design: TrialDesign,
    #[serde(default)]
    pub site_readiness: SiteReadiness,
    #[serde(default, deserialize_with = "lenient::text_map")]
    pub blurred_data: BTreeMap<String, String>,

    #[serde(default)]
    pub model_used: String,
    #[serde(default)]
    pub processing_time: String,
    #[serde(default)]
    pub timestamp: Timestamp,
    #[serde(default)]
    pub is_mock_response: bool,
    /// Serialized as `null` when the report did not come from a failure path.
    #[serde(default)]
    pub gemini_error: Option<String>,
}

/// Where a report came from and how long it took.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Provenance {
    pub model_used: String,
    pub processing_time: String,
    pub timestamp: Timestamp,
    pub is_mock_response: bool,
    pub gemini_error: Option<String>,
}

impl Provenance {
    pub fn live(model_used: impl Into<String>, processing_time: impl Into<String>) -> Self {
        Self {
            model_used: model_used.into(),
            processing_time: processing_time.into(),
            timestamp: Timestamp::now(),
            is_mock_response: false,
            gemini_error: None,
        }
    }

    pub fn mock(
        model_used: impl Into<String>,
        processing_time: impl Into<String>,
        reason: Option<&str>,
    ) -> Self {
        Self {
            model_used: model_used.into(),
            processing_time: processing_time.into(),
            timestamp: Timestamp::now(),
            is_mock_response: true,
            gemini_error: reason.map(str::to_string),
        }
    }
}

impl DrugAnalysisReport {
    /// Builds a report from a normalized model reply.
    ///
    /// Each top-level section is read on its own; a section that cannot be
    /// read at all is replaced by its defaults and the rest are kept.
    /// Provenance fields are reset and must be set with [`stamp`](Self::stamp).
    pub fn from_normalized(value: Value) -> Self {
        let mut object = match value {
            Value::Object(map) => map,
            other => {
                tracing::warn!(kind = json_kind(&other), "normalized reply is not an object");
                Map::new()
            }
        };

        let drug_name = object
            .remove("drugName")
            .map(|v| lenient::value_to_text(&v))
            .unwrap_or_else(lenient::not_specified);

        let risk_assessment: RiskAssessment = section(&mut object, "riskAssessment");

        Self {
            drug_name,
            molecular_details: section(&mut object, "molecularDetails"),
            clinical_info: section(&mut object, "clinicalInfo"),
            risk_assessment: risk_assessment.with_derived_level(),
            manufacturing: section(&mut object, "manufacturing"),
            market_analysis: section(&mut object, "marketAnalysis"),
            cro_analysis: section(&mut object, "croAnalysis"),
            external_factors: section(&mut object, "externalFactors"),
            trial_metrics: section(&mut object, "trialMetrics"),
            trial_design: section(&mut object, "trialDesign"),
            site_readiness: section(&mut object, "siteReadiness"),
            blurred_data: BTreeMap::new(),
            model_used: String::new(),
            processing_time: String::new(),
            timestamp: Timestamp::now(),
            is_mock_response: false,
            gemini_error: None,
        }
    }

    /// Applies provenance, replacing any previous values.
    pub fn stamp(mut self, provenance: Provenance) -> Self {
        self.model_used = provenance.model_used;
        self.processing_time = provenance.processing_time;
        self.timestamp = provenance.timestamp;
        self.is_mock_response = provenance.is_mock_response;
        self.gemini_error = provenance.gemini_error;
        self
    }

    /// Uses `fallback` when the model did not name the drug.
    pub fn with_drug_name_fallback(mut self, fallback: &str) -> Self {
        if self.drug_name == NOT_SPECIFIED {
            self.drug_name = fallback.to_string();
        }
        self
    }

    pub fn risk_score(&self) -> u8 {
        self.risk_assessment.overall_score.value()
    }
}

fn section<T>(object: &mut Map<String, Value>, key: &str) -> T
where
    T: DeserializeOwned + Default,
{
    match object.remove(key) {
        None | Some(Value::Null) => T::default(),
        Some(value) => serde_json::from_value(value).unwrap_or_else(|e| {
            tracing::warn!(section = key, error = %e, "unreadable report section, using defaults");
            T::default()
        }),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn missing_sections_are_filled_with_defaults() {
        let report = DrugAnalysisReport::from_normalized(json!({
            "drugName": "PDE3A Inhibitor",
            "riskAssessment": {"overallScore": 81}
        }));

        assert_eq!(report.drug_name, "PDE3A Inhibitor");
        assert_eq!(report.risk_score(), 81);
        assert_eq!(report.risk_assessment.risk_level, "High Risk");
        assert_eq!(report.trial_design, TrialDesign::default());
        assert_eq!(report.site_readiness.site_selection, NOT_SPECIFIED);
        assert!(report.blurred_data.is_empty());
    }

    #[test]
    fn malformed_section_does_not_discard_others() {
        let report = DrugAnalysisReport::from_normalized(json!({
            "trialMetrics": "lots of sites",
            "croAnalysis": {"selectedCRO": "Parexel"}
        }));

        assert_eq!(report.trial_metrics, TrialMetrics::default());
        assert_eq!(report.cro_analysis.selected_cro, "Parexel");
    }

    #[test]
    fn non_object_reply_gives_default_report() {
        let report = DrugAnalysisReport::from_normalized(json!([1, 2, 3]));
        assert_eq!(report.drug_name, NOT_SPECIFIED);
        assert_eq!(report.risk_score(), 0);
    }

    #[test]
    fn stamp_sets_provenance() {
        let report = DrugAnalysisReport::from_normalized(json!({}))
            .stamp(Provenance::mock("Mock Response (Gemini failed)", "1500ms", Some("quota")));

        assert!(report.is_mock_response);
        assert_eq!(report.gemini_error.as_deref(), Some("quota"));
        assert_eq!(report.processing_time, "1500ms");
    }

    #[test]
    fn wire_format_keeps_null_error_and_all_sections() {
        let report = DrugAnalysisReport::from_normalized(json!({}))
            .stamp(Provenance::live("Gemini 1.5 Flash", "2.3 seconds"));
        let wire = serde_json::to_value(&report).unwrap();

        assert!(wire["geminiError"].is_null());
        assert_eq!(wire["isMockResponse"], false);
        for key in [
            "drugName",
            "molecularDetails",
            "clinicalInfo",
            "riskAssessment",
            "manufacturing",
            "marketAnalysis",
            "croAnalysis",
            "externalFactors",
            "trialMetrics",
            "trialDesign",
            "siteReadiness",
            "blurredData",
            "modelUsed",
            "processingTime",
            "timestamp",
        ] {
            assert!(wire.get(key).is_some(), "missing {key}");
        }
    }

    #[test]
    fn drug_name_fallback_only_replaces_placeholder() {
        let unnamed = DrugAnalysisReport::from_normalized(json!({}));
        assert_eq!(unnamed.with_drug_name_fallback("PDE3A").drug_name, "PDE3A");

        let named = DrugAnalysisReport::from_normalized(json!({"drugName": "Ensifentrine"}));
        assert_eq!(named.with_drug_name_fallback("PDE3A").drug_name, "Ensifentrine");
    }
}
