use super::super::domain::{
    BatchSample, Parameter, Prediction, FAT_OPTIMAL, MICROBIAL_HIGH_RISK_ABOVE, PH_OPTIMAL,
    SNF_OPTIMAL, TEMP_OPTIMAL,
};
use serde::Serialize;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CauseImpact {
    Primary,
    Secondary,
    Minor,
}

impl CauseImpact {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Primary => "Primary",
            Self::Secondary => "Secondary",
            Self::Minor => "Minor",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RootCause {
    pub parameter: Parameter,
    pub factor: &'static str,
    /// Independent percent weight; causes are not normalized to 100.
    pub contribution: u8,
    pub impact: CauseImpact,
    pub explanation: &'static str,
}

struct CauseRule {
    parameter: Parameter,
    factor: &'static str,
    contribution: u8,
    impact: CauseImpact,
    explanation: &'static str,
    applies: fn(&BatchSample) -> bool,
}

const CAUSE_RULES: [CauseRule; 6] = [
    CauseRule {
        parameter: Parameter::MicrobialLoad,
        factor: "Microbial Contamination",
        contribution: 45,
        impact: CauseImpact::Primary,
        explanation: "Extremely high microbial load indicates severe hygiene issues or cold chain failure",
        applies: |sample| sample.microbial_load() > MICROBIAL_HIGH_RISK_ABOVE,
    },
    CauseRule {
        parameter: Parameter::Adulterants,
        factor: "Adulterant Presence",
        contribution: 40,
        impact: CauseImpact::Primary,
        explanation: "Detection of adulterants compromises both safety and quality standards",
        applies: |sample| sample.adulterants_detected(),
    },
    CauseRule {
        parameter: Parameter::ProcessingTemp,
        factor: "Processing Temperature",
        contribution: 25,
        impact: CauseImpact::Secondary,
        explanation: "Sub-optimal pasteurization temperature affects pathogen elimination and nutrient retention",
        applies: |sample| !TEMP_OPTIMAL.contains(sample.processing_temp()),
    },
    CauseRule {
        parameter: Parameter::Snf,
        factor: "Low SNF Content",
        contribution: 20,
        impact: CauseImpact::Secondary,
        explanation: "Insufficient solids-non-fat indicates potential dilution or poor milk quality",
        applies: |sample| sample.snf() < SNF_OPTIMAL.min,
    },
    CauseRule {
        parameter: Parameter::FatContent,
        factor: "Fat Content Deviation",
        contribution: 15,
        impact: CauseImpact::Minor,
        explanation: "Fat content outside optimal range affects texture and nutritional profile",
        applies: |sample| !FAT_OPTIMAL.contains(sample.fat_content()),
    },
    CauseRule {
        parameter: Parameter::PhLevel,
        factor: "pH Imbalance",
        contribution: 10,
        impact: CauseImpact::Minor,
        explanation: "pH deviation suggests freshness issues or processing anomalies",
        applies: |sample| !PH_OPTIMAL.contains(sample.ph_level()),
    },
];

/// Rank deviating factors by fixed contribution, largest first.
///
/// Each rule emits at most one cause; equal contributions keep rule order.
pub fn rank_root_causes(sample: &BatchSample, prediction: &Prediction) -> Vec<RootCause> {
    let mut causes: Vec<RootCause> = CAUSE_RULES
        .iter()
        .filter(|rule| (rule.applies)(sample))
        .map(|rule| RootCause {
            parameter: rule.parameter,
            factor: rule.factor,
            contribution: rule.contribution,
            impact: rule.impact,
            explanation: rule.explanation,
        })
        .collect();

    causes.sort_by(|a, b| b.contribution.cmp(&a.contribution));

    debug!(
        grade = prediction.quality.label(),
        causes = causes.len(),
        "ranked root causes"
    );

    causes
}
