//! Placeholder report for the quick-analysis demo.

use crate::domain::foundation::{Score, Timestamp};
use crate::domain::report::{
    ClinicalInfo, CroAnalysis, DrugAnalysisReport, ExternalFactors, Manufacturing, MarketAnalysis,
    MolecularDetails, Provenance, RiskAssessment, SiteReadiness, TrialDesign, TrialMetrics,
};

pub const QUICK_MODEL_LABEL: &str = "Quick Analysis (demo)";

/// A minimal report for `drug_name`: medium risk, no components or insights.
pub fn quick_report(drug_name: &str) -> DrugAnalysisReport {
    let q = |s: &str| format!("Quick {s}");
    let score = Score::new(65);

    DrugAnalysisReport {
        drug_name: drug_name.to_string(),
        molecular_details: MolecularDetails {
            gene_symbol: "QUICK".to_string(),
            uniprot_id: "P00000".to_string(),
            structure_type: "Small molecule".to_string(),
            mechanism: "Quick analysis".to_string(),
            route: "Oral".to_string(),
            molecular_weight: "450".to_string(),
            solubility: "Moderate".to_string(),
            target_receptor: q("target"),
            half_life: "8 hours".to_string(),
        },
        clinical_info: ClinicalInfo {
            indication: q("indication"),
            phase: "Phase I".to_string(),
            drug_type: q("type"),
            study_design: q("design"),
            primary_endpoint: q("endpoint"),
            patient_population: q("population"),
            protocol_number: "QUICK-001".to_string(),
            clinical_trials_gov: "NCT00000000".to_string(),
        },
        risk_assessment: RiskAssessment {
            overall_score: score,
            risk_level: score.risk_level().to_string(),
            components: Vec::new(),
        },
        manufacturing: Manufacturing {
            analysis: q("manufacturing analysis"),
            competitive_landscape: q("competitive landscape"),
            regulatory_pathway: q("regulatory pathway"),
            quality_control: q("quality control"),
            cost_estimates: None,
            ai_insights: Vec::new(),
        },
        market_analysis: MarketAnalysis {
            competitive_landscape: q("market analysis"),
            market_size: "$1B market".to_string(),
            regulatory_pathway: q("pathway"),
            timeline: "2-3 years".to_string(),
        },
        cro_analysis: CroAnalysis {
            selected_cro: q("CRO"),
            cro_strengths: q("strengths"),
            cro_experience: q("experience"),
            cro_risk_factors: q("risks"),
            ai_recommendations: Vec::new(),
        },
        external_factors: ExternalFactors {
            external_risk_score: Score::new(45),
            countries_monitored: 10,
            active_alerts: 2,
            disruption_risk: "Low".to_string(),
            geopolitical_risk: "Low".to_string(),
            supply_chain_risk: "Medium".to_string(),
            regulatory_risk: "Low".to_string(),
            fda_updates: q("FDA updates"),
            ema_updates: q("EMA updates"),
            ai_insights: Vec::new(),
        },
        trial_metrics: TrialMetrics {
            countries: 8,
            sites: 50,
            duration: "18 months".to_string(),
            budget: "$25M".to_string(),
        },
        trial_design: TrialDesign {
            study_design: q("study design"),
            primary_endpoint: q("endpoint"),
            patient_population: q("population"),
            statistical_analysis: q("statistical analysis"),
            safety_monitoring: q("safety monitoring"),
        },
        site_readiness: SiteReadiness {
            site_selection: q("site selection"),
            infrastructure_requirements: q("infrastructure"),
            training_requirements: q("training"),
            regulatory_compliance: q("compliance"),
            timeline_considerations: q("timeline"),
        },
        blurred_data: Default::default(),
        model_used: String::new(),
        processing_time: String::new(),
        timestamp: Timestamp::now(),
        is_mock_response: true,
        gemini_error: None,
    }
    .stamp(Provenance::mock(QUICK_MODEL_LABEL, "0.5 seconds", None))
}
