//! Hand-authored fallback reports.
//!
//! Used when the AI service is unavailable or its reply cannot be read, and
//! for deliberate demo calls. Content branches on the structure class; every
//! section is populated.

use std::collections::BTreeMap;

use rand::Rng;

use crate::domain::foundation::Score;
use crate::domain::molecule::{MoleculeInput, StructureClass};
use crate::domain::report::{
    AiInsight, ClinicalInfo, CroAnalysis, DrugAnalysisReport, ExternalFactors, Manufacturing,
    MarketAnalysis, MolecularDetails, Provenance, RiskAssessment, RiskComponent, SiteReadiness,
    TrialDesign, TrialMetrics,
};

/// `modelUsed` for a deliberate demo report.
pub const DEMO_MODEL_LABEL: &str = "Mock Response";

/// `modelUsed` for a report produced because the AI service failed.
pub const FALLBACK_MODEL_LABEL: &str = "Mock Response (AI service failed)";

const OVERALL_SCORE: u8 = 72;

/// Builds a complete mock report for `input`.
///
/// `reason` is the failure that triggered the fallback and ends up in
/// `geminiError`; pass `None` for a demo call. Processing time is a random
/// value between 1000 and 2999 ms.
pub fn generate_mock_report(input: &MoleculeInput, reason: Option<&str>) -> DrugAnalysisReport {
    let class = input.structure_class();
    let jitter_ms: u32 = rand::thread_rng().gen_range(1000..3000);
    let model_used = if reason.is_some() {
        FALLBACK_MODEL_LABEL
    } else {
        DEMO_MODEL_LABEL
    };

    DrugAnalysisReport {
        drug_name: input.gene_symbol.clone(),
        molecular_details: molecular_details(input),
        clinical_info: clinical_info(input),
        risk_assessment: RiskAssessment {
            overall_score: Score::new(OVERALL_SCORE),
            risk_level: Score::new(OVERALL_SCORE).risk_level().to_string(),
            components: risk_components(class),
        },
        manufacturing: manufacturing(class),
        market_analysis: market_analysis(class),
        cro_analysis: cro_analysis(class),
        external_factors: external_factors(),
        trial_metrics: TrialMetrics {
            countries: 15,
            sites: 85,
            duration: "24 months".to_string(),
            budget: "$78,000,000".to_string(),
        },
        trial_design: trial_design(),
        site_readiness: site_readiness(),
        blurred_data: blurred_data(),
        model_used: String::new(),
        processing_time: String::new(),
        timestamp: Default::default(),
        is_mock_response: true,
        gemini_error: None,
    }
    .stamp(Provenance::mock(model_used, format!("{jitter_ms}ms"), reason))
}

fn text(s: &str) -> String {
    s.to_string()
}

fn insight(category: &str, insight: &str, impact: &str, recommendation: &str) -> AiInsight {
    AiInsight {
        category: text(category),
        insight: text(insight),
        impact: text(impact),
        recommendation: text(recommendation),
    }
}

struct ComponentText<'a> {
    name: &'a str,
    score: u8,
    description: &'a str,
    detailed_analysis: &'a str,
    operational_impact: &'a str,
    recommendations: [&'a str; 3],
    data_sources: [&'a str; 3],
}

impl From<ComponentText<'_>> for RiskComponent {
    fn from(c: ComponentText<'_>) -> Self {
        RiskComponent {
            name: text(c.name),
            score: Score::new(c.score),
            description: text(c.description),
            detailed_analysis: text(c.detailed_analysis),
            operational_impact: text(c.operational_impact),
            recommendations: c.recommendations.iter().map(|s| text(s)).collect(),
            data_sources: c.data_sources.iter().map(|s| text(s)).collect(),
        }
    }
}

fn molecular_details(input: &MoleculeInput) -> MolecularDetails {
    MolecularDetails {
        gene_symbol: input.gene_symbol.clone(),
        uniprot_id: input.uniprot_id.clone(),
        structure_type: input.structure_type.clone(),
        mechanism: input.mechanism.clone(),
        route: input.route.clone(),
        molecular_weight: input
            .molecular_weight
            .clone()
            .unwrap_or_else(|| text("450.5 g/mol")),
        solubility: input
            .solubility
            .clone()
            .unwrap_or_else(|| text("Moderate aqueous solubility")),
        target_receptor: input
            .target_receptor
            .clone()
            .unwrap_or_else(|| text("PDE3A, PDE4D")),
        half_life: input.half_life.clone().unwrap_or_else(|| text("8-12 hours")),
    }
}

fn clinical_info(input: &MoleculeInput) -> ClinicalInfo {
    ClinicalInfo {
        indication: input.indication.clone(),
        phase: input.phase.clone(),
        drug_type: input.drug_type.clone(),
        study_design: text("Randomized, double-blind, placebo-controlled"),
        primary_endpoint: text("FEV1 AUC0-12h at Week 12"),
        patient_population: text("Moderate-to-severe COPD patients"),
        protocol_number: text("VER-202-301"),
        clinical_trials_gov: text("NCT04636671"),
    }
}

fn risk_components(class: StructureClass) -> Vec<RiskComponent> {
    let radio = class.is_radioligand();

    let api_supply = ComponentText {
        name: "Critical API Supply Risk",
        score: class.pick(85, 78, 72),
        description: if radio {
            "Radiolabelled synthesis depends on specialised facilities and a fragile Lu-177 isotope supply"
        } else {
            "A single primary API supplier with a 16-week lead time leaves supply exposed"
        },
        detailed_analysis: if radio {
            "Isotope supply is a single point of failure and GMP radiolabelling capacity is scarce \
             worldwide. Disruption modelling points to a 6-8 month delay if isotope deliveries stop."
        } else {
            "All API comes from one supplier. Disruption modelling points to a 4-6 month slip in \
             trial start if that supplier stops delivering."
        },
        operational_impact: if radio {
            "Production halts once the isotope buffer is used up; restarting with re-qualification \
             takes 8-12 months."
        } else {
            "Supply stops once the inventory buffer is used up; restarting with re-qualification \
             takes 6-12 months."
        },
        recommendations: if radio {
            [
                "Contract a secondary Lu-177 supplier within 90 days",
                "Raise the isotope buffer to 8 months of supply",
                "Qualify an alternative radiolabelling facility",
            ]
        } else {
            [
                "Start qualifying a secondary API supplier within 60 days",
                "Raise the inventory buffer to 6 months of supply",
                "Shorten the synthetic route to cut intermediates",
            ]
        },
        data_sources: [
            "EudraGMDP: EU GMP inspection records",
            "Internal supply chain review of supplier dependencies and lead times",
            "Reaxys: synthesis route complexity and alternatives",
        ],
    };

    let site_activation = ComponentText {
        name: "Site Activation Delays",
        score: if radio { 78 } else { 71 },
        description: if radio {
            "Nuclear medicine facility and radiation safety requirements slow site activation"
        } else {
            "IRB/EC approvals average 75 days and only 18 of 85 planned sites were active at the inflection point"
        },
        detailed_analysis: if radio {
            "Only 22 of 100 planned sites have nuclear medicine capability. Radiation safety \
             training and approvals add 30-45 days per site."
        } else {
            "Ethics approval times vary widely, most of all in Eastern Europe and APAC. Forecasts \
             expected only 18 of 85 sites to be active at the inflection point."
        },
        operational_impact: if radio {
            "Enrollment could slip 4-8 months, and clustering of nuclear medicine centres limits patient access."
        } else {
            "Enrollment could slip 3-6 months, with delays concentrated in high-enrolling regions."
        },
        recommendations: if radio {
            [
                "Prioritise sites with nuclear medicine infrastructure in place",
                "Run radiation safety training ahead of activation",
                "Use mobile nuclear medicine units for remote sites",
            ]
        } else {
            [
                "Move site selection toward jurisdictions with predictable approvals",
                "Give investigators targeted training on the inhaled protocol",
                "Deploy mobile spirometry units to sites lacking equipment",
            ]
        },
        data_sources: [
            "Global registry of nuclear medicine facilities",
            "Radiation safety requirements for radioligand trials",
            "Site activation tracking of regulatory approvals",
        ],
    };

    let geographic = ComponentText {
        name: "Geographic Enrollment Risk",
        score: if radio { 72 } else { 65 },
        description: if radio {
            "Uneven access to nuclear medicine makes some regions hard to enroll"
        } else {
            "Dropout is expected to run higher in Eastern Europe and APAC"
        },
        detailed_analysis: if radio {
            "Travel to nuclear medicine centres raises dropout risk. Simulation projects 28% \
             overall dropout, above typical oncology trials."
        } else {
            "Simulation against EudraCT and EvaluatePharma benchmarks projects 22% overall \
             dropout, with higher attrition in Eastern Europe and parts of APAC."
        },
        operational_impact: if radio {
            "Regional imbalance threatens statistical power; oversampling would extend the timeline and add 15-20% cost."
        } else {
            "Regional imbalance threatens statistical power; oversampling would extend the timeline and add cost."
        },
        recommendations: if radio {
            [
                "Concentrate enrollment where nuclear medicine capacity exists",
                "Offer patient travel support",
                "Set up satellite nuclear medicine facilities",
            ]
        } else {
            [
                "Front-load enrollment in North America and Western Europe",
                "Strengthen patient engagement in high-dropout regions",
                "Hold contingency sites in stable jurisdictions",
            ]
        },
        data_sources: [
            "Nuclear medicine access registry",
            "Studies on travel burden and trial retention",
            "Regional stability intelligence",
        ],
    };

    let protocol = ComponentText {
        name: "Protocol Complexity Burden",
        score: if radio { 68 } else { 58 },
        description: if radio {
            "Imaging at each visit and radiation safety steps weigh heavily on patients"
        } else {
            "The FEV1 endpoint is sound but the visit and spirometry schedule burdens patients"
        },
        detailed_analysis: if radio {
            "Per-visit imaging and radiation safety procedures lengthen visits and drive fatigue, \
             feeding the projected 28% dropout."
        } else {
            "FEV1 and exacerbation rate were compared as endpoints; FEV1 was kept for its power \
             and lower variability over 24 weeks."
        },
        operational_impact: if radio {
            "Frequent imaging is hardest on elderly patients with limited mobility."
        } else {
            "Frequent spirometry is hardest on elderly COPD patients and feeds the projected 22% dropout."
        },
        recommendations: if radio {
            [
                "Use mobile imaging where feasible",
                "Thin out the imaging schedule",
                "Provide transport to imaging visits",
            ]
        } else {
            [
                "Offer home spirometry where feasible",
                "Thin out the visit schedule",
                "Provide transport to clinic visits",
            ]
        },
        data_sources: [
            "Protocol burden benchmarks",
            "Patient experience surveys on visit fatigue",
            "Historical dropout analysis by protocol complexity",
        ],
    };

    let external = ComponentText {
        name: "External Disruption Risk",
        score: 23,
        description: "External risk is low; APAC geopolitical tension is being watched",
        detailed_analysis: "Overall disruption potential is low. APAC tensions are monitored but \
                            pose no immediate threat, and supply chain contingencies are in place.",
        operational_impact: "Minimal operational risk with contingency plans ready for supply or regulatory shocks.",
        recommendations: [
            "Keep monitoring APAC developments",
            "Maintain supply chain contingency plans",
            "Review external risk factors on a regular cadence",
        ],
        data_sources: [
            "Regional stability monitoring",
            "Global supply chain disruption tracking",
            "Regulatory change monitoring",
        ],
    };

    vec![
        api_supply.into(),
        site_activation.into(),
        geographic.into(),
        protocol.into(),
        external.into(),
    ]
}

fn manufacturing(class: StructureClass) -> Manufacturing {
    Manufacturing {
        analysis: text(class.pick(
            "Radioligand production needs GMP facilities with nuclear capability, complex \
             radiolabelling and strict release testing. Isotope supply is a critical dependency.",
            "Biologic production relies on bioreactors and multi-step purification. Cell culture \
             and expression consistency drive quality, and scale-up is technically demanding.",
            "Small molecule production follows an established 8-step synthetic route with several \
             purification steps and well-characterised controls.",
        )),
        competitive_landscape: text(class.pick(
            "Few competitors; Novartis leads with Lutathera. Regulatory and infrastructure \
             barriers are high.",
            "Crowded field led by Roche, Amgen and AbbVie, with biosimilars growing after patent expiry.",
            "Crowded field with heavy generic pressure after patent expiry; low-cost manufacturing is an edge.",
        )),
        regulatory_pathway: text(class.pick(
            "FDA Breakthrough Therapy with accelerated approval; EMA PRIME. Radiation safety rules apply.",
            "FDA BLA with possible accelerated approval; EMA centralised procedure with conditional authorisation.",
            "FDA NDA with possible Fast Track; EMA centralised procedure with conditional authorisation.",
        )),
        quality_control: text(class.pick(
            "Radiochemical purity, specific activity and sterility testing with shielded equipment \
             and trained staff.",
            "Potency, purity and immunogenicity testing with advanced protein characterisation.",
            "Standard purity, potency and stability testing with established methods.",
        )),
        cost_estimates: None,
        ai_insights: vec![
            insight(
                "Manufacturing Optimization",
                class.pick(
                    "Automated synthesis modules could raise radioligand throughput by 25%",
                    "Cell line and bioreactor tuning could raise yield by 30%",
                    "Route optimisation and better crystallisation could cut cost by 20%",
                ),
                "High",
                "Prioritise process optimisation to improve efficiency and cost",
            ),
            insight(
                "Supply Chain Risk",
                class.pick(
                    "Lu-177 supply is a single point of failure needing immediate mitigation",
                    "Culture media and bioreactor consumables are supply chain weak points",
                    "Starting materials and key intermediates are supply chain weak points",
                ),
                "High",
                "Add secondary suppliers and larger buffers for critical materials",
            ),
            insight(
                "Regulatory Strategy",
                "Agencies are receptive to novel manufacturing approaches, with accelerated options available",
                "Medium",
                "Engage regulators early on the manufacturing strategy",
            ),
        ],
    }
}

fn market_analysis(class: StructureClass) -> MarketAnalysis {
    MarketAnalysis {
        competitive_landscape: text(class.pick(
            "Fast-growing radioligand market with few entrants and high barriers.",
            "Mature biologics market; delivery and formulation innovation differentiate.",
            "Highly competitive small molecule market under generic pressure.",
        )),
        market_size: text(class.pick(
            "$3.2B global radioligand therapy market growing at 12% CAGR",
            "$450B global biologics market growing at 8% CAGR",
            "$1.2T global pharmaceutical market growing at 6% CAGR",
        )),
        regulatory_pathway: text(class.pick(
            "FDA Breakthrough Therapy; EMA PRIME.",
            "FDA BLA with accelerated approval potential; EMA centralised procedure.",
            "FDA NDA with Fast Track potential; EMA centralised procedure.",
        )),
        timeline: text(class.pick(
            "2-3 years to market on accelerated pathways, 4-5 years on the standard route",
            "3-4 years to market on accelerated pathways, 5-7 years on the standard route",
            "2-3 years to market on accelerated pathways, 4-6 years on the standard route",
        )),
    }
}

fn cro_analysis(class: StructureClass) -> CroAnalysis {
    let selected = class.pick(
        "Advanced Accelerator Applications",
        "Parexel International",
        "Medpace Holdings Inc",
    );

    CroAnalysis {
        selected_cro: text(selected),
        cro_strengths: text(class.pick(
            "Nuclear medicine trial specialist with a global facility network and radioligand approval record.",
            "Deep biologics experience with in-house immunogenicity testing and a global site network.",
            "Respiratory specialist with pulmonary function testing capability and inhaled drug approvals.",
        )),
        cro_experience: text(class.pick(
            "15+ radioligand trials including VISION, with established radiation safety procedures.",
            "50+ biologic trials across therapeutic areas with established immunogenicity monitoring.",
            "30+ respiratory trials in COPD and asthma with established spirometry procedures.",
        )),
        cro_risk_factors: text(class.pick(
            "Scarce qualified nuclear medicine sites and radiation training may slow activation.",
            "Complex supply and immunogenicity testing add cost and trial complexity.",
            "Spirometry requirements narrow site choice and device training adds patient burden.",
        )),
        ai_recommendations: vec![
            insight(
                "CRO Selection",
                &format!("{selected} is the best fit given its specialist capabilities"),
                "High",
                "Proceed with the selected CRO",
            ),
            insight(
                "Risk Mitigation",
                "Backup CRO options and closer monitoring reduce vendor risk",
                "Medium",
                "Set up contingency plans and enhanced oversight",
            ),
            insight(
                "Performance Optimization",
                "Regular KPI reviews keep CRO delivery on track",
                "Medium",
                "Schedule periodic performance reviews",
            ),
        ],
    }
}

fn external_factors() -> ExternalFactors {
    ExternalFactors {
        external_risk_score: Score::new(23),
        countries_monitored: 15,
        active_alerts: 2,
        disruption_risk: text("Low"),
        geopolitical_risk: text("Low overall with moderate tensions in APAC"),
        supply_chain_risk: text("Low with contingency plans in place"),
        regulatory_risk: text("Low in a stable regulatory environment"),
        fda_updates: text(
            "Updated FDA guidance on inhaled drug development standardises pulmonary function \
             testing; accelerated approval remains open to novel respiratory therapies.",
        ),
        ema_updates: text(
            "Updated EMA COPD guidance adds exacerbation rate assessment; conditional \
             authorisation remains available.",
        ),
        ai_insights: vec![
            insight(
                "Geopolitical Risk",
                "Low overall, with APAC tension under watch",
                "Low",
                "Keep monitoring; no action needed now",
            ),
            insight(
                "Supply Chain Risk",
                "Low thanks to multiple suppliers and contingency plans",
                "Low",
                "Maintain current contingency plans",
            ),
            insight(
                "Regulatory Risk",
                "Stable and supportive of innovative therapies",
                "Low",
                "Continue regular agency engagement",
            ),
        ],
    }
}

fn trial_design() -> TrialDesign {
    TrialDesign {
        study_design: text(
            "Randomized, double-blind, placebo-controlled, parallel-group study with a 24-week treatment period",
        ),
        primary_endpoint: text("FEV1 AUC0-12h at Week 12 versus placebo"),
        patient_population: text(
            "Moderate-to-severe COPD (FEV1 30-70% predicted) with chronic bronchitis",
        ),
        statistical_analysis: text(
            "MMRM with treatment, visit and treatment-by-visit interaction as fixed effects",
        ),
        safety_monitoring: text(
            "Adverse events, vital signs, laboratory values and pulmonary function tests",
        ),
    }
}

fn site_readiness() -> SiteReadiness {
    SiteReadiness {
        site_selection: text(
            "Respiratory expertise, pulmonary function testing capability and patient availability",
        ),
        infrastructure_requirements: text(
            "Certified spirometry equipment and respiratory therapy support",
        ),
        training_requirements: text(
            "Inhaler technique, spirometry protocol and respiratory safety monitoring",
        ),
        regulatory_compliance: text("Local requirements for respiratory trials and spirometry"),
        timeline_considerations: text(
            "3-6 months per site including approvals, training and equipment certification",
        ),
    }
}

fn blurred_data() -> BTreeMap<String, String> {
    [
        (
            "proprietaryManufacturingCosts",
            "Manufacturing cost data withheld",
        ),
        (
            "confidentialProtocolDetails",
            "Protocol details and registry numbers withheld",
        ),
        (
            "exactMarketSizeFigures",
            "Exact market sizing and competitive intelligence withheld",
        ),
        (
            "specificCROVendorDetails",
            "CRO vendor details and proprietary risk metrics withheld",
        ),
        (
            "exactMolecularSpecifications",
            "Exact molecular specifications withheld",
        ),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::NOT_SPECIFIED;
    use crate::domain::molecule::fixtures::{pde3a, with_structure};
    use proptest::prelude::*;

    fn processing_ms(report: &DrugAnalysisReport) -> u32 {
        report
            .processing_time
            .trim_end_matches("ms")
            .parse()
            .unwrap()
    }

    #[test]
    fn fallback_report_carries_reason() {
        let report = generate_mock_report(&pde3a(), Some("429 Too Many Requests"));

        assert!(report.is_mock_response);
        assert_eq!(report.gemini_error.as_deref(), Some("429 Too Many Requests"));
        assert_eq!(report.model_used, FALLBACK_MODEL_LABEL);
    }

    #[test]
    fn demo_report_has_no_error() {
        let report = generate_mock_report(&pde3a(), None);
        assert!(report.is_mock_response);
        assert_eq!(report.gemini_error, None);
        assert_eq!(report.model_used, DEMO_MODEL_LABEL);
    }

    #[test]
    fn processing_time_is_jittered_within_range() {
        for _ in 0..50 {
            let ms = processing_ms(&generate_mock_report(&pde3a(), None));
            assert!((1000..3000).contains(&ms), "{ms}");
        }
    }

    #[test]
    fn small_molecule_content() {
        let report = generate_mock_report(&pde3a(), None);

        assert_eq!(report.drug_name, "PDE3A");
        assert_eq!(report.risk_score(), 72);
        assert_eq!(report.risk_assessment.risk_level, "High Risk");
        assert_eq!(report.risk_assessment.components.len(), 5);
        assert_eq!(report.risk_assessment.components[0].score.value(), 72);
        assert_eq!(report.cro_analysis.selected_cro, "Medpace Holdings Inc");
        assert_eq!(report.trial_metrics.sites, 85);
        assert_eq!(report.trial_metrics.budget, "$78,000,000");
        assert_eq!(report.blurred_data.len(), 5);
    }

    #[test]
    fn radioligand_content() {
        let report = generate_mock_report(&with_structure("Lu-177 radioligand"), None);
        let scores: Vec<u8> = report
            .risk_assessment
            .components
            .iter()
            .map(|c| c.score.value())
            .collect();

        assert_eq!(scores, [85, 78, 72, 68, 23]);
        assert_eq!(report.cro_analysis.selected_cro, "Advanced Accelerator Applications");
        assert!(report.market_analysis.market_size.contains("radioligand"));
    }

    #[test]
    fn biologic_content() {
        let report = generate_mock_report(&with_structure("Biologic"), None);
        assert_eq!(report.risk_assessment.components[0].score.value(), 78);
        assert_eq!(report.risk_assessment.components[1].score.value(), 71);
        assert_eq!(report.cro_analysis.selected_cro, "Parexel International");
    }

    #[test]
    fn unspecified_structure_uses_small_molecule_content() {
        let peptide = generate_mock_report(&with_structure("Peptide"), None);
        let small = generate_mock_report(&pde3a(), None);

        assert_eq!(peptide.manufacturing, small.manufacturing);
        assert_eq!(peptide.cro_analysis, small.cro_analysis);
    }

    #[test]
    fn optional_inputs_flow_into_molecular_details() {
        let mut input = pde3a();
        input.half_life = Some("6 hours".to_string());

        let report = generate_mock_report(&input, None);
        assert_eq!(report.molecular_details.half_life, "6 hours");
        assert_eq!(report.molecular_details.molecular_weight, "450.5 g/mol");
    }

    proptest! {
        #[test]
        fn every_structure_type_yields_complete_report(structure in "\\PC{1,40}") {
            let report = generate_mock_report(&with_structure(&structure), Some("down"));
            let wire = serde_json::to_value(&report).unwrap();

            for key in [
                "molecularDetails", "clinicalInfo", "riskAssessment", "manufacturing",
                "marketAnalysis", "croAnalysis", "externalFactors", "trialMetrics",
                "trialDesign", "siteReadiness", "blurredData",
            ] {
                prop_assert!(wire[key].is_object(), "section {} missing", key);
            }
            prop_assert!(!report.risk_assessment.components.is_empty());
            prop_assert!(report.risk_score() <= 100);
            prop_assert_ne!(report.trial_design.study_design.as_str(), NOT_SPECIFIED);
            prop_assert!(report.is_mock_response);
        }
    }
}
