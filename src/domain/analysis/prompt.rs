//! Prompt construction for the risk report request.

use std::fmt::Write;

use crate::domain::molecule::MoleculeInput;

/// System instruction sent alongside the prompt.
pub const SYSTEM_PROMPT: &str =
    "You are a clinical trial risk analyst. You answer with a single JSON object and nothing else.";

/// The report skeleton the model is asked to fill in.
const REPORT_SCHEMA: &str = r#"{
  "drugName": "string",
  "molecularDetails": {"geneSymbol": "string", "uniprotId": "string", "structureType": "string", "mechanism": "string", "route": "string", "molecularWeight": "string", "solubility": "string", "targetReceptor": "string", "halfLife": "string"},
  "clinicalInfo": {"indication": "string", "phase": "string", "type": "string", "studyDesign": "string", "primaryEndpoint": "string", "patientPopulation": "string", "protocolNumber": "string", "clinicalTrialsGov": "string"},
  "riskAssessment": {"overallScore": 0, "riskLevel": "Low Risk | Medium Risk | High Risk", "components": [{"name": "string", "score": 0, "description": "string", "detailedAnalysis": "string", "operationalImpact": "string", "recommendations": ["string"], "dataSources": ["string"]}]},
  "trialMetrics": {"countries": 0, "sites": 0, "duration": "string", "budget": "string"},
  "externalFactors": {"externalRiskScore": 0, "countriesMonitored": 0, "activeAlerts": 0, "disruptionRisk": "Low | Moderate | High", "geopoliticalRisk": "string", "supplyChainRisk": "string", "regulatoryRisk": "string", "fdaUpdates": "string", "emaUpdates": "string", "aiInsights": [{"category": "string", "insight": "string", "impact": "string", "recommendation": "string"}]},
  "croAnalysis": {"selectedCRO": "string", "croStrengths": "string", "croExperience": "string", "croRiskFactors": "string", "aiRecommendations": [{"category": "string", "insight": "string", "impact": "string", "recommendation": "string"}]},
  "manufacturing": {"analysis": "string", "competitiveLandscape": "string", "regulatoryPathway": "string", "qualityControl": "string", "costEstimates": "string", "aiInsights": [{"category": "string", "insight": "string", "impact": "string", "recommendation": "string"}]},
  "marketAnalysis": {"competitiveLandscape": "string", "marketSize": "string", "regulatoryPathway": "string", "timeline": "string"},
  "trialDesign": {"studyDesign": "string", "primaryEndpoint": "string", "patientPopulation": "string", "statisticalAnalysis": "string", "safetyMonitoring": "string"},
  "siteReadiness": {"siteSelection": "string", "infrastructureRequirements": "string", "trainingRequirements": "string", "regulatoryCompliance": "string", "timelineConsiderations": "string"}
}"#;

const SECTIONS: [(&str, &str); 8] = [
    (
        "Risk Assessment",
        "overall score from 0 to 100, a risk level, and scored components each with a description, \
         detailed analysis, operational impact, recommendations and data sources",
    ),
    (
        "Trial Metrics",
        "number of countries and sites, expected duration and budget implied by the molecule",
    ),
    (
        "Clinical Information",
        "study design, primary endpoint and patient population suited to the molecule",
    ),
    (
        "External Factors",
        "external risk score, countries monitored, active alerts, disruption risk, and separate \
         analyses of geopolitical risk, supply chain disruption, regulatory environment changes, \
         recent FDA updates and recent EMA updates, plus categorized insights",
    ),
    (
        "CRO Analysis",
        "a recommended CRO with its strengths, relevant experience, risk factors and recommendations",
    ),
    (
        "CMC Analysis",
        "manufacturing considerations, competitive landscape, regulatory pathway, quality control \
         and supply chain",
    ),
    (
        "Trial Design",
        "study design, patient population, endpoints, statistical analysis and safety monitoring",
    ),
    (
        "Site Readiness",
        "site selection, infrastructure, staff training, regulatory compliance and activation timeline",
    ),
];

/// Renders the report request for a validated molecule.
///
/// Absent optional fields are written as `"Not specified"`. Output depends
/// only on the input.
pub fn build_prompt(input: &MoleculeInput) -> String {
    let mut prompt = String::with_capacity(REPORT_SCHEMA.len() + 4096);

    prompt.push_str(
        "Analyze the molecule below and produce a clinical trial risk and operations report.\n\n",
    );

    prompt.push_str("Molecule (required fields):\n");
    let labels = [
        "Gene Symbol",
        "UniProt ID",
        "Structure Type",
        "Mechanism",
        "Route",
        "Indication",
        "Phase",
        "Drug Type",
    ];
    for (label, (_, value)) in labels.iter().zip(input.required_values()) {
        let _ = writeln!(prompt, "- {label}: {value}");
    }

    prompt.push_str("\nMolecular properties (optional, use them in every risk estimate):\n");
    let _ = writeln!(prompt, "- Molecular Weight: {}", input.molecular_weight_or_default());
    let _ = writeln!(prompt, "- Solubility: {}", input.solubility_or_default());
    let _ = writeln!(prompt, "- Target Receptor: {}", input.target_receptor_or_default());
    let _ = writeln!(prompt, "- Half-Life: {}", input.half_life_or_default());

    prompt.push_str("\nCover each of these sections with analysis specific to this molecule:\n");
    for (i, (title, detail)) in SECTIONS.iter().enumerate() {
        let _ = writeln!(prompt, "{}. {title}: {detail}.", i + 1);
    }

    prompt.push_str(
        "\nWrite a separate, specific summary for every component rather than one overall \
         narrative. Give actionable recommendations and name data sources.\n\n",
    );
    prompt.push_str("Use exactly this JSON structure:\n");
    prompt.push_str(REPORT_SCHEMA);
    prompt.push_str("\n\nReturn ONLY valid JSON.");

    prompt
}
