use super::super::domain::{Prediction, QualityGrade};
use super::{BatchVolume, RiskLevel};
use serde::Serialize;

const RAW_MATERIAL_PER_LITER: f64 = 45.0;
const PROCESSING_PER_LITER: f64 = 8.0;
const REJECTION_COST: f64 = 30_000.0;
const REWORK_COST: f64 = 15_000.0;
const DOWNTIME_COST: f64 = 50_000.0;
const DOWNTIME_SHARE_ON_REJECTION: f64 = 0.3;
const BRAND_DAMAGE_AVOIDED: f64 = 100_000.0;
const ACCEPTABLE_VALUE_PRESERVED: f64 = 0.1;
const GOOD_PREMIUM_MULTIPLIER: f64 = 1.15;

/// Confidence-weighted loss/savings view of a batch verdict.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CostImpact {
    pub batch_value: f64,
    pub potential_loss: f64,
    pub savings: f64,
    pub net_impact: f64,
    pub risk_level: RiskLevel,
    pub recommendations: Vec<&'static str>,
}

/// Loss and savings scale with `confidence / 100`, so uncertain verdicts
/// shrink toward zero.
pub fn estimate_cost(prediction: &Prediction, volume: BatchVolume) -> CostImpact {
    let batch_value = volume.liters() * (RAW_MATERIAL_PER_LITER + PROCESSING_PER_LITER);

    let (potential_loss, savings, risk_level) = match prediction.quality {
        QualityGrade::Poor => (
            batch_value + REJECTION_COST + DOWNTIME_COST * DOWNTIME_SHARE_ON_REJECTION,
            BRAND_DAMAGE_AVOIDED,
            RiskLevel::High,
        ),
        QualityGrade::Acceptable => (
            REWORK_COST,
            batch_value * ACCEPTABLE_VALUE_PRESERVED,
            RiskLevel::Medium,
        ),
        QualityGrade::Good => (0.0, batch_value * GOOD_PREMIUM_MULTIPLIER, RiskLevel::Low),
    };

    let weight = f64::from(prediction.confidence) / 100.0;
    let potential_loss = potential_loss * weight;
    let savings = savings * weight;

    CostImpact {
        batch_value,
        potential_loss,
        savings,
        net_impact: savings - potential_loss,
        risk_level,
        recommendations: cost_recommendations(prediction.quality),
    }
}

fn cost_recommendations(grade: QualityGrade) -> Vec<&'static str> {
    match grade {
        QualityGrade::Poor => vec![
            "Immediate batch rejection recommended",
            "Investigate root cause before processing similar batches",
            "Implement enhanced quality controls",
        ],
        QualityGrade::Acceptable => vec![
            "Consider rework to improve quality grade",
            "Monitor closely during processing",
            "Implement process adjustments",
        ],
        QualityGrade::Good => vec![
            "Proceed with standard processing",
            "Maintain current quality standards",
            "Document best practices for replication",
        ],
    }
}
