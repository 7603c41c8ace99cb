//! Static risk snapshot for the reference trial and the simulated re-analysis.

use std::collections::BTreeMap;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{Score, Timestamp};

use super::redaction::REDACTED;

pub const REFERENCE_TRIAL_ID: &str = "OHT-202";
pub const SNAPSHOT_MODEL_VERSION: &str = "Convexia-AI-v2.1";
const DEFAULT_ANALYSIS_TYPE: &str = "comprehensive";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskFactor {
    pub score: Score,
    pub analysis: String,
    pub recommendations: Vec<String>,
    pub data_source: String,
    pub confidence: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskFactors {
    pub api_supply_risk: RiskFactor,
    pub site_activation_risk: RiskFactor,
    pub geographic_risk: RiskFactor,
    pub protocol_complexity: RiskFactor,
    pub external_risk: RiskFactor,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TieredRecommendations {
    pub critical: Vec<String>,
    pub high: Vec<String>,
    pub medium: Vec<String>,
}

/// Precomputed risk overview served by the risk analysis endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskSnapshot {
    pub success: bool,
    pub timestamp: Timestamp,
    pub trial_id: String,
    pub overall_risk_score: Score,
    pub risk_level: String,
    pub analysis: RiskFactors,
    pub blurred_data: BTreeMap<String, String>,
    pub model_version: String,
    pub processing_time: String,
    pub data_sources: Vec<String>,
    pub recommendations: TieredRecommendations,
}

/// Body of a re-analysis request; both fields are optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReanalysisRequest {
    pub trial_id: Option<String>,
    pub analysis_type: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReanalysisResult {
    pub risk_score: Score,
    pub confidence: f64,
    pub analysis: String,
    pub recommendations: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Reanalysis {
    pub success: bool,
    pub trial_id: String,
    pub analysis_type: String,
    pub timestamp: Timestamp,
    pub result: ReanalysisResult,
    pub model_used: String,
    pub processing_time: String,
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn factor(score: u8, analysis: &str, recommendations: &[&str], source: &str, confidence: f64) -> RiskFactor {
    RiskFactor {
        score: Score::new(score),
        analysis: analysis.to_string(),
        recommendations: strings(recommendations),
        data_source: source.to_string(),
        confidence,
    }
}

/// The fixed five-factor snapshot for the reference trial.
pub fn risk_snapshot() -> RiskSnapshot {
    let overall = Score::new(72);

    RiskSnapshot {
        success: true,
        timestamp: Timestamp::now(),
        trial_id: REFERENCE_TRIAL_ID.to_string(),
        overall_risk_score: overall,
        risk_level: overall.risk_level().to_string(),
        analysis: RiskFactors {
            api_supply_risk: factor(
                78,
                "A single primary API supplier with a 16-week lead time leaves supply exposed",
                &[
                    "Qualify a secondary API supplier within 30 days",
                    "Negotiate backup supply agreements",
                    "Build an inventory buffer",
                ],
                "Supply chain analytics model",
                0.89,
            ),
            site_activation_risk: factor(
                71,
                "IRB/EC approvals average 75 days and only 18 of 85 planned sites are active",
                &[
                    "Submit to ethics committees in parallel",
                    "Bring in regulatory consultants for complex sites",
                    "Track site readiness on a shared dashboard",
                ],
                "Site activation tracking system",
                0.92,
            ),
            geographic_risk: factor(
                65,
                "Dropout is expected to run higher in Eastern Europe and APAC",
                &[
                    "Tailor retention strategies by region",
                    "Strengthen patient support programs",
                    "Watch regional compliance trends",
                ],
                "Digital twin simulation",
                0.85,
            ),
            protocol_complexity: factor(
                58,
                "The FEV1 endpoint is sound but visits and spirometry burden patients",
                &[
                    "Simplify the visit schedule where possible",
                    "Offer remote monitoring",
                    "Improve patient education materials",
                ],
                "Protocol complexity analysis",
                0.78,
            ),
            external_risk: factor(
                23,
                "External risk is low; APAC geopolitical tension is being watched",
                &[
                    "Keep monitoring APAC",
                    "Maintain supply chain contingency plans",
                    "Refresh the risk assessment regularly",
                ],
                "External risk monitoring system",
                0.95,
            ),
        },
        blurred_data: [
            "supplierDetails",
            "specificSiteNames",
            "exactBudgetBreakdown",
            "internalProcesses",
        ]
        .into_iter()
        .map(|k| (k.to_string(), REDACTED.to_string()))
        .collect(),
        model_version: SNAPSHOT_MODEL_VERSION.to_string(),
        processing_time: "2.3 seconds".to_string(),
        data_sources: strings(&[
            "Clinical trial management system",
            "Supply chain analytics",
            "Digital twin simulation",
            "External risk monitoring",
            "Historical trial data",
        ]),
        recommendations: TieredRecommendations {
            critical: strings(&[
                "Establish a secondary API supplier",
                "Add supply chain redundancy",
            ]),
            high: strings(&[
                "Optimize the site activation strategy",
                "Strengthen patient retention programs",
            ]),
            medium: strings(&["Simplify protocol requirements", "Introduce remote monitoring"]),
        },
    }
}

/// Simulated re-analysis: score in 50..=79, confidence in [0.85, 0.95).
pub fn reanalyze<R: Rng + ?Sized>(request: ReanalysisRequest, rng: &mut R) -> Reanalysis {
    Reanalysis {
        success: true,
        trial_id: request
            .trial_id
            .unwrap_or_else(|| REFERENCE_TRIAL_ID.to_string()),
        analysis_type: request
            .analysis_type
            .unwrap_or_else(|| DEFAULT_ANALYSIS_TYPE.to_string()),
        timestamp: Timestamp::now(),
        result: ReanalysisResult {
            risk_score: Score::new(rng.gen_range(50..80)),
            confidence: rng.gen_range(0.85..0.95),
            analysis: "Risk model analysis completed successfully".to_string(),
            recommendations: strings(&[
                "Implement risk mitigation strategies",
                "Monitor key performance indicators",
                "Refresh the risk assessment regularly",
            ]),
        },
        model_used: "Clinical trial risk model".to_string(),
        processing_time: "1.2 seconds".to_string(),
    }
}
