//! Switchable AI features.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::foundation::ValidationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AiFeature {
    RealTimeAnalysis,
    PredictiveModeling,
    RiskAssessment,
    MarketAnalysis,
    RegulatoryMonitoring,
}

impl AiFeature {
    pub const ALL: [AiFeature; 5] = [
        AiFeature::RealTimeAnalysis,
        AiFeature::PredictiveModeling,
        AiFeature::RiskAssessment,
        AiFeature::MarketAnalysis,
        AiFeature::RegulatoryMonitoring,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AiFeature::RealTimeAnalysis => "realTimeAnalysis",
            AiFeature::PredictiveModeling => "predictiveModeling",
            AiFeature::RiskAssessment => "riskAssessment",
            AiFeature::MarketAnalysis => "marketAnalysis",
            AiFeature::RegulatoryMonitoring => "regulatoryMonitoring",
        }
    }
}

impl fmt::Display for AiFeature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AiFeature {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AiFeature::ALL
            .into_iter()
            .find(|f| f.as_str() == s)
            .ok_or_else(|| ValidationError::invalid_format("feature", format!("unknown feature '{s}'")))
    }
}

/// On/off switches for each [`AiFeature`]; all enabled initially.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AiFeatures {
    pub real_time_analysis: bool,
    pub predictive_modeling: bool,
    pub risk_assessment: bool,
    pub market_analysis: bool,
    pub regulatory_monitoring: bool,
}

impl Default for AiFeatures {
    fn default() -> Self {
        Self {
            real_time_analysis: true,
            predictive_modeling: true,
            risk_assessment: true,
            market_analysis: true,
            regulatory_monitoring: true,
        }
    }
}

impl AiFeatures {
    fn slot(&mut self, feature: AiFeature) -> &mut bool {
        match feature {
            AiFeature::RealTimeAnalysis => &mut self.real_time_analysis,
            AiFeature::PredictiveModeling => &mut self.predictive_modeling,
            AiFeature::RiskAssessment => &mut self.risk_assessment,
            AiFeature::MarketAnalysis => &mut self.market_analysis,
            AiFeature::RegulatoryMonitoring => &mut self.regulatory_monitoring,
        }
    }

    /// Flips `feature` and returns its new state.
    pub fn toggle(&mut self, feature: AiFeature) -> bool {
        let slot = self.slot(feature);
        *slot = !*slot;
        *slot
    }

    pub fn is_enabled(&self, feature: AiFeature) -> bool {
        match feature {
            AiFeature::RealTimeAnalysis => self.real_time_analysis,
            AiFeature::PredictiveModeling => self.predictive_modeling,
            AiFeature::RiskAssessment => self.risk_assessment,
            AiFeature::MarketAnalysis => self.market_analysis,
            AiFeature::RegulatoryMonitoring => self.regulatory_monitoring,
        }
    }

    pub fn any_enabled(&self) -> bool {
        AiFeature::ALL.into_iter().any(|f| self.is_enabled(f))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_wire_names() {
        assert_eq!("marketAnalysis".parse::<AiFeature>().unwrap(), AiFeature::MarketAnalysis);
        assert!("MarketAnalysis".parse::<AiFeature>().is_err());
    }

    #[test]
    fn toggle_flips_one_feature() {
        let mut features = AiFeatures::default();
        assert!(!features.toggle(AiFeature::PredictiveModeling));
        assert!(!features.predictive_modeling);
        assert!(features.risk_assessment);
        assert!(features.toggle(AiFeature::PredictiveModeling));
    }

    #[test]
    fn any_enabled_false_only_when_all_off() {
        let mut features = AiFeatures::default();
        for f in AiFeature::ALL {
            assert!(features.any_enabled());
            features.toggle(f);
        }
        assert!(!features.any_enabled());
    }
}
