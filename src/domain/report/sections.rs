//! Report sections.
//!
//! Every section deserializes leniently: missing or malformed fields fall back
//! to `"Not specified"`, zero or an empty list rather than failing.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{Score, NOT_SPECIFIED};
use crate::text_section;

use super::lenient;

text_section! {
    /// Molecular descriptors echoed back by the model.
    pub struct MolecularDetails {
        gene_symbol,
        uniprot_id,
        structure_type,
        mechanism,
        route,
        molecular_weight,
        solubility,
        target_receptor,
        half_life,
    }
}

text_section! {
    pub struct ClinicalInfo {
        indication,
        phase,
        #[serde(rename = "type")]
        drug_type,
        study_design,
        primary_endpoint,
        patient_population,
        protocol_number,
        clinical_trials_gov,
    }
}

text_section! {
    pub struct MarketAnalysis {
        competitive_landscape,
        market_size,
        regulatory_pathway,
        timeline,
    }
}

text_section! {
    pub struct TrialDesign {
        study_design,
        primary_endpoint,
        patient_population,
        statistical_analysis,
        safety_monitoring,
    }
}

text_section! {
    pub struct SiteReadiness {
        site_selection,
        infrastructure_requirements,
        training_requirements,
        regulatory_compliance,
        timeline_considerations,
    }
}

text_section! {
    /// A single categorized observation with its suggested action.
    pub struct AiInsight {
        category,
        insight,
        impact,
        recommendation,
    }
}

/// One scored risk dimension.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RiskComponent {
    #[serde(deserialize_with = "lenient::text")]
    pub name: String,
    pub score: Score,
    #[serde(deserialize_with = "lenient::text")]
    pub description: String,
    #[serde(deserialize_with = "lenient::text")]
    pub detailed_analysis: String,
    #[serde(deserialize_with = "lenient::text")]
    pub operational_impact: String,
    #[serde(deserialize_with = "lenient::text_list")]
    pub recommendations: Vec<String>,
    #[serde(deserialize_with = "lenient::text_list")]
    pub data_sources: Vec<String>,
}

impl Default for RiskComponent {
    fn default() -> Self {
        Self {
            name: NOT_SPECIFIED.to_string(),
            score: Score::default(),
            description: NOT_SPECIFIED.to_string(),
            detailed_analysis: NOT_SPECIFIED.to_string(),
            operational_impact: NOT_SPECIFIED.to_string(),
            recommendations: Vec::new(),
            data_sources: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RiskAssessment {
    pub overall_score: Score,
    #[serde(deserialize_with = "lenient::text")]
    pub risk_level: String,
    #[serde(deserialize_with = "lenient::items")]
    pub components: Vec<RiskComponent>,
}

impl RiskAssessment {
    /// Fills a missing risk level from the overall score band.
    pub fn with_derived_level(mut self) -> Self {
        if self.risk_level == NOT_SPECIFIED {
            self.risk_level = self.overall_score.risk_level().to_string();
        }
        self
    }
}

impl Default for RiskAssessment {
    fn default() -> Self {
        Self {
            overall_score: Score::default(),
            risk_level: NOT_SPECIFIED.to_string(),
            components: Vec::new(),
        }
    }
}

/// Chemistry, manufacturing and controls analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Manufacturing {
    #[serde(deserialize_with = "lenient::text")]
    pub analysis: String,
    #[serde(deserialize_with = "lenient::text")]
    pub competitive_landscape: String,
    #[serde(deserialize_with = "lenient::text")]
    pub regulatory_pathway: String,
    #[serde(deserialize_with = "lenient::text")]
    pub quality_control: String,
    #[serde(
        deserialize_with = "lenient::optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub cost_estimates: Option<String>,
    #[serde(deserialize_with = "lenient::items")]
    pub ai_insights: Vec<AiInsight>,
}

impl Default for Manufacturing {
    fn default() -> Self {
        Self {
            analysis: NOT_SPECIFIED.to_string(),
            competitive_landscape: NOT_SPECIFIED.to_string(),
            regulatory_pathway: NOT_SPECIFIED.to_string(),
            quality_control: NOT_SPECIFIED.to_string(),
            cost_estimates: None,
            ai_insights: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CroAnalysis {
    #[serde(rename = "selectedCRO", deserialize_with = "lenient::text")]
    pub selected_cro: String,
    #[serde(deserialize_with = "lenient::text")]
    pub cro_strengths: String,
    #[serde(deserialize_with = "lenient::text")]
    pub cro_experience: String,
    #[serde(deserialize_with = "lenient::text")]
    pub cro_risk_factors: String,
    #[serde(deserialize_with = "lenient::items")]
    pub ai_recommendations: Vec<AiInsight>,
}

impl Default for CroAnalysis {
    fn default() -> Self {
        Self {
            selected_cro: NOT_SPECIFIED.to_string(),
            cro_strengths: NOT_SPECIFIED.to_string(),
            cro_experience: NOT_SPECIFIED.to_string(),
            cro_risk_factors: NOT_SPECIFIED.to_string(),
            ai_recommendations: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExternalFactors {
    pub external_risk_score: Score,
    #[serde(deserialize_with = "lenient::count")]
    pub countries_monitored: u32,
    #[serde(deserialize_with = "lenient::count")]
    pub active_alerts: u32,
    #[serde(deserialize_with = "lenient::text")]
    pub disruption_risk: String,
    #[serde(deserialize_with = "lenient::text")]
    pub geopolitical_risk: String,
    #[serde(deserialize_with = "lenient::text")]
    pub supply_chain_risk: String,
    #[serde(deserialize_with = "lenient::text")]
    pub regulatory_risk: String,
    #[serde(deserialize_with = "lenient::text")]
    pub fda_updates: String,
    #[serde(deserialize_with = "lenient::text")]
    pub ema_updates: String,
    #[serde(deserialize_with = "lenient::items")]
    pub ai_insights: Vec<AiInsight>,
}

impl Default for ExternalFactors {
    fn default() -> Self {
        Self {
            external_risk_score: Score::default(),
            countries_monitored: 0,
            active_alerts: 0,
            disruption_risk: NOT_SPECIFIED.to_string(),
            geopolitical_risk: NOT_SPECIFIED.to_string(),
            supply_chain_risk: NOT_SPECIFIED.to_string(),
            regulatory_risk: NOT_SPECIFIED.to_string(),
            fda_updates: NOT_SPECIFIED.to_string(),
            ema_updates: NOT_SPECIFIED.to_string(),
            ai_insights: Vec::new(),
        }
    }
}

/// Headline trial footprint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TrialMetrics {
    #[serde(deserialize_with = "lenient::count")]
    pub countries: u32,
    #[serde(deserialize_with = "lenient::count")]
    pub sites: u32,
    #[serde(deserialize_with = "lenient::text")]
    pub duration: String,
    #[serde(deserialize_with = "lenient::text")]
    pub budget: String,
}

impl Default for TrialMetrics {
    fn default() -> Self {
        Self {
            countries: 0,
            sites: 0,
            duration: NOT_SPECIFIED.to_string(),
            budget: NOT_SPECIFIED.to_string(),
        }
    }
}
