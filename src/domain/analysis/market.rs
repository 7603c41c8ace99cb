//! Simulated market analysis keyed on the structure class.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{Timestamp, NOT_SPECIFIED};
use crate::domain::molecule::StructureClass;
use crate::domain::report::AiInsight;

pub const MARKET_MODEL_LABEL: &str = "Mock Response (Market Analysis)";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MarketAnalysisRequest {
    pub drug_name: String,
    pub indication: String,
    pub phase: String,
    pub structure_type: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketReport {
    pub drug_name: String,
    pub indication: String,
    pub market_size: String,
    pub growth_rate: String,
    pub competitive_landscape: String,
    pub key_competitors: Vec<String>,
    pub regulatory_pathway: String,
    pub timeline: String,
    pub risk_factors: Vec<String>,
    pub opportunities: Vec<String>,
    pub ai_insights: Vec<AiInsight>,
    pub model_used: String,
    pub processing_time: String,
    pub timestamp: Timestamp,
    pub is_mock_response: bool,
}

struct MarketProfile {
    market_sizes: [&'static str; 3],
    growth_rates: [&'static str; 3],
    competitors: [&'static str; 5],
    competitive_landscape: &'static str,
    regulatory_pathway: &'static str,
    timeline: &'static str,
    risk_factors: [&'static str; 5],
    opportunities: [&'static str; 5],
    dynamics: &'static str,
    positioning: &'static str,
}

const RADIOLIGAND: MarketProfile = MarketProfile {
    market_sizes: [
        "$3.2B global radioligand therapy market",
        "$2.8B targeted radiotherapy market",
        "$4.1B nuclear medicine market",
    ],
    growth_rates: ["12% CAGR", "15% annual growth", "18% market expansion"],
    competitors: [
        "Novartis (Lutathera)",
        "Advanced Accelerator Applications",
        "Curium Pharma",
        "GE Healthcare",
        "IBA Molecular",
    ],
    competitive_landscape: "Specialised market with few competitors and high barriers to entry. \
        Novartis, Advanced Accelerator Applications and Curium Pharma lead; technical and \
        regulatory demands are steep.",
    regulatory_pathway: "FDA Breakthrough Therapy with accelerated approval; EMA PRIME for \
        innovative nuclear medicine.",
    timeline: "2-3 years to market on accelerated pathways, 4-5 years on the standard route",
    risk_factors: [
        "Thin nuclear medicine infrastructure worldwide",
        "Regulatory complexity of radioligand therapies",
        "Dependence on radioisotope supply",
        "High manufacturing and distribution cost",
        "Patchy reimbursement in some markets",
    ],
    opportunities: [
        "Expanding nuclear medicine infrastructure",
        "Rising demand for targeted therapies",
        "Better imaging technology",
        "Growing cancer prevalence",
        "Regulatory support for novel approaches",
    ],
    dynamics: "Rapid growth driven by cancer prevalence and nuclear medicine advances",
    positioning: "Few competitors leave room for a first mover, at a high infrastructure cost",
};

const BIOLOGIC: MarketProfile = MarketProfile {
    market_sizes: [
        "$450B global biologics market",
        "$380B monoclonal antibodies market",
        "$520B protein therapeutics market",
    ],
    growth_rates: ["8% CAGR", "10% annual growth", "12% market expansion"],
    competitors: ["Roche", "Amgen", "AbbVie", "Johnson & Johnson", "Novartis"],
    competitive_landscape: "Competitive market with entrenched players and high entry barriers. \
        Roche, Amgen and AbbVie lead; development and manufacturing costs are high.",
    regulatory_pathway: "FDA BLA with possible accelerated approval; EMA centralised procedure \
        with conditional authorisation.",
    timeline: "3-4 years to market on accelerated pathways, 5-7 years on the standard route",
    risk_factors: [
        "Complex and costly manufacturing",
        "Patent expiry and biosimilar entry",
        "Demanding regulatory requirements",
        "Access limited by high prices",
        "Immunogenicity concerns",
    ],
    opportunities: [
        "Growing biologics demand",
        "Manufacturing technology advances",
        "Indication expansion",
        "Emerging market growth",
        "Personalised medicine",
    ],
    dynamics: "Steady expansion on demand for targeted and personalised therapies",
    positioning: "Incumbents dominate but novel mechanisms and formulations still find room",
};

const SMALL_MOLECULE: MarketProfile = MarketProfile {
    market_sizes: [
        "$1.2T global pharmaceutical market",
        "$850B small molecule market",
        "$1.5T drug discovery market",
    ],
    growth_rates: ["6% CAGR", "7% annual growth", "9% market expansion"],
    competitors: ["Pfizer", "Merck", "GSK", "AstraZeneca", "Bristol-Myers Squibb"],
    competitive_landscape: "Crowded market across therapeutic areas where large pharma competes \
        with generics; patent cliffs and pricing pressure shape it.",
    regulatory_pathway: "FDA NDA with possible Fast Track; EMA centralised procedure with \
        conditional authorisation.",
    timeline: "2-3 years to market on accelerated pathways, 4-6 years on the standard route",
    risk_factors: [
        "Generic entry after patent expiry",
        "Approval delays",
        "Saturated indications",
        "Payer pricing pressure",
        "Clinical trial failure",
    ],
    opportunities: [
        "Large addressable markets",
        "Established manufacturing",
        "Broad patient populations",
        "Cost-effective development",
        "Multiple indication potential",
    ],
    dynamics: "Stable market with openings in niche indications and combinations",
    positioning: "Crowded field rewards clear differentiation and lean development",
};

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn insight(category: &str, insight: &str, impact: &str, recommendation: &str) -> AiInsight {
    AiInsight {
        category: category.to_string(),
        insight: insight.to_string(),
        impact: impact.to_string(),
        recommendation: recommendation.to_string(),
    }
}

/// Builds a mock market report; market size and growth rate are random picks.
pub fn generate_market_analysis<R: Rng + ?Sized>(
    request: &MarketAnalysisRequest,
    rng: &mut R,
) -> MarketReport {
    let class = StructureClass::classify(&request.structure_type);
    let profile = class.pick(&RADIOLIGAND, &BIOLOGIC, &SMALL_MOLECULE);

    let market_size = profile.market_sizes.choose(rng).copied().unwrap_or(NOT_SPECIFIED);
    let growth_rate = profile.growth_rates.choose(rng).copied().unwrap_or(NOT_SPECIFIED);
    let jitter_ms: u32 = rng.gen_range(1000..3000);

    MarketReport {
        drug_name: request.drug_name.clone(),
        indication: request.indication.clone(),
        market_size: market_size.to_string(),
        growth_rate: growth_rate.to_string(),
        competitive_landscape: profile.competitive_landscape.to_string(),
        key_competitors: strings(&profile.competitors),
        regulatory_pathway: profile.regulatory_pathway.to_string(),
        timeline: profile.timeline.to_string(),
        risk_factors: strings(&profile.risk_factors),
        opportunities: strings(&profile.opportunities),
        ai_insights: vec![
            insight(
                "Market Dynamics",
                profile.dynamics,
                "High",
                "Differentiate through delivery innovation and new indications",
            ),
            insight(
                "Competitive Positioning",
                profile.positioning,
                "Medium",
                "Pursue partnerships and underserved patient groups",
            ),
            insight(
                "Regulatory Environment",
                "Agencies are receptive to innovative therapies and offer expedited pathways",
                "High",
                "Engage regulators early and use expedited programs",
            ),
            insight(
                "Market Access",
                "Pricing and reimbursement pressure is rising in every therapeutic area",
                "High",
                "Build the market access case and value story early",
            ),
        ],
        model_used: MARKET_MODEL_LABEL.to_string(),
        processing_time: format!("{jitter_ms}ms"),
        timestamp: Timestamp::now(),
        is_mock_response: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn request(structure_type: &str) -> MarketAnalysisRequest {
        MarketAnalysisRequest {
            drug_name: "PDE3A".to_string(),
            indication: "COPD".to_string(),
            phase: "Phase III".to_string(),
            structure_type: structure_type.to_string(),
        }
    }

    #[test]
    fn biologic_profile_selected() {
        let report = generate_market_analysis(&request("Biologic"), &mut StdRng::seed_from_u64(1));

        assert_eq!(report.key_competitors[0], "Roche");
        assert!(BIOLOGIC.market_sizes.contains(&report.market_size.as_str()));
        assert!(BIOLOGIC.growth_rates.contains(&report.growth_rate.as_str()));
        assert_eq!(report.ai_insights.len(), 4);
        assert!(report.is_mock_response);
    }

    #[test]
    fn radioligand_profile_selected() {
        let report =
            generate_market_analysis(&request("Radioligand"), &mut StdRng::seed_from_u64(2));
        assert_eq!(report.key_competitors[0], "Novartis (Lutathera)");
        assert_eq!(report.risk_factors.len(), 5);
    }

    #[test]
    fn unknown_structure_uses_small_molecule_profile() {
        let report = generate_market_analysis(&request(""), &mut StdRng::seed_from_u64(3));
        assert_eq!(report.key_competitors[0], "Pfizer");
        assert_eq!(report.drug_name, "PDE3A");
        assert_eq!(report.indication, "COPD");
    }
}
