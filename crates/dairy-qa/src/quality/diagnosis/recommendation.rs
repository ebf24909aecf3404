use super::super::domain::{Band, BatchSample, Parameter};
use serde::Serialize;

const FAT_TARGET: Band = Band::new(3.8, 4.3);
const SNF_TARGET: Band = Band::new(8.6, 8.9);
const MICROBIAL_TARGET_MAX: u32 = 15_000;
const TEMP_TARGET: Band = Band::new(75.0, 82.0);
const PH_TARGET: Band = Band::new(6.65, 6.75);

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationImpact {
    Low,
    Medium,
    High,
}

impl RecommendationImpact {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }
}

/// Target adjustment for one factor.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    pub parameter: Parameter,
    pub parameter_label: &'static str,
    pub current_value: String,
    pub recommended_value: &'static str,
    pub rationale: &'static str,
    pub impact: RecommendationImpact,
}

/// Propose adjustments for factors outside the (tighter) target bands.
///
/// An empty result means no adjustment is needed.
pub fn recommend(sample: &BatchSample) -> Vec<Recommendation> {
    let mut recommendations = Vec::new();
    let mut push = |parameter: Parameter,
                    label: &'static str,
                    recommended_value: &'static str,
                    rationale: &'static str,
                    impact: RecommendationImpact| {
        recommendations.push(Recommendation {
            parameter,
            parameter_label: label,
            current_value: sample.formatted_value(parameter),
            recommended_value,
            rationale,
            impact,
        });
    };

    if !FAT_TARGET.contains(sample.fat_content()) {
        push(
            Parameter::FatContent,
            Parameter::FatContent.label(),
            "4.0-4.2%",
            "Optimal fat content improves texture and nutritional value",
            RecommendationImpact::Medium,
        );
    }

    if !SNF_TARGET.contains(sample.snf()) {
        push(
            Parameter::Snf,
            Parameter::Snf.label(),
            "8.7-8.8%",
            "Target SNF range maximizes protein and lactose content",
            RecommendationImpact::Medium,
        );
    }

    if sample.microbial_load() > MICROBIAL_TARGET_MAX {
        push(
            Parameter::MicrobialLoad,
            Parameter::MicrobialLoad.label(),
            "< 10,000 CFU/ml",
            "Reduce microbial load through better hygiene practices and cold chain management",
            RecommendationImpact::High,
        );
    }

    if !TEMP_TARGET.contains(sample.processing_temp()) {
        push(
            Parameter::ProcessingTemp,
            Parameter::ProcessingTemp.label(),
            "78-80°C",
            "Optimal pasteurization temperature ensures safety while preserving nutrients",
            RecommendationImpact::High,
        );
    }

    if !PH_TARGET.contains(sample.ph_level()) {
        push(
            Parameter::PhLevel,
            Parameter::PhLevel.label(),
            "6.7-6.8",
            "Target pH range indicates optimal freshness and processing conditions",
            RecommendationImpact::Low,
        );
    }

    if sample.adulterants_detected() {
        push(
            Parameter::Adulterants,
            "Adulterant Control",
            "Zero tolerance",
            "Implement stricter supplier verification and incoming material testing",
            RecommendationImpact::High,
        );
    }

    recommendations
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn on_target_batch_needs_no_adjustment() {
        let sample = BatchSample::new(4.1, 8.75, 8_500, false, 79.0, 6.7).expect("valid");
        assert!(recommend(&sample).is_empty());
    }

    #[test]
    fn target_bands_are_tighter_than_scoring_bands() {
        // Every reading here scores as optimal, yet fat and pH miss their targets.
        let sample = BatchSample::new(4.4, 8.8, 8_500, false, 78.5, 6.6).expect("valid");
        let recommendations = recommend(&sample);
        let parameters: Vec<_> = recommendations.iter().map(|r| r.parameter).collect();
        assert_eq!(parameters, vec![Parameter::FatContent, Parameter::PhLevel]);
        assert_eq!(recommendations[0].current_value, "4.4%");
        assert_eq!(recommendations[0].recommended_value, "4.0-4.2%");
        assert_eq!(recommendations[1].impact, RecommendationImpact::Low);
    }

    #[test]
    fn contamination_yields_high_impact_actions() {
        let sample = BatchSample::new(4.1, 8.75, 85_000, true, 79.0, 6.7).expect("valid");
        let recommendations = recommend(&sample);
        assert_eq!(recommendations.len(), 2);
        assert_eq!(recommendations[0].current_value, "85,000 CFU/ml");
        assert_eq!(recommendations[1].parameter_label, "Adulterant Control");
        assert_eq!(recommendations[1].current_value, "Detected");
        assert!(recommendations
            .iter()
            .all(|r| r.impact == RecommendationImpact::High));
    }

    #[test]
    fn microbial_threshold_is_exclusive() {
        let sample = BatchSample::new(4.1, 8.75, 15_000, false, 79.0, 6.7).expect("valid");
        assert!(recommend(&sample).is_empty());
    }
}
