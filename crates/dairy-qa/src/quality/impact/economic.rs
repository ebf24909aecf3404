use super::super::domain::{Prediction, QualityGrade};
use super::BatchVolume;
use serde::Serialize;

const COST_PER_LITER: f64 = 50.0;
const REJECTION_SAVINGS: f64 = 25_000.0;

/// Market-value view: a flat price multiplier per grade, independent of
/// confidence.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EconomicImpact {
    pub base_value: f64,
    pub quality_adjusted_value: f64,
    pub potential_savings: f64,
    pub net_impact: f64,
    pub recommendation: &'static str,
}

pub fn estimate_economic(prediction: &Prediction, volume: BatchVolume) -> EconomicImpact {
    let base_value = volume.liters() * COST_PER_LITER;
    let quality_adjusted_value = base_value * premium_multiplier(prediction.quality);
    let potential_savings = if prediction.quality == QualityGrade::Poor {
        REJECTION_SAVINGS
    } else {
        0.0
    };

    EconomicImpact {
        base_value,
        quality_adjusted_value,
        potential_savings,
        net_impact: quality_adjusted_value - base_value + potential_savings,
        recommendation: economic_recommendation(prediction.quality),
    }
}

const fn premium_multiplier(grade: QualityGrade) -> f64 {
    match grade {
        QualityGrade::Good => 1.2,
        QualityGrade::Acceptable => 1.0,
        QualityGrade::Poor => 0.6,
    }
}

const fn economic_recommendation(grade: QualityGrade) -> &'static str {
    match grade {
        QualityGrade::Good => "Process immediately for premium pricing",
        QualityGrade::Acceptable => "Process as standard grade product",
        QualityGrade::Poor => "Consider rejection to avoid downstream costs",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-6
    }

    #[test]
    fn grades_map_to_flat_multipliers() {
        let volume = BatchVolume::default();
        let cases = [
            (QualityGrade::Good, 60_000.0, 0.0, 10_000.0),
            (QualityGrade::Acceptable, 50_000.0, 0.0, 0.0),
            (QualityGrade::Poor, 30_000.0, 25_000.0, 5_000.0),
        ];

        for (quality, adjusted, savings, net) in cases {
            let impact = estimate_economic(
                &Prediction {
                    quality,
                    confidence: 50,
                },
                volume,
            );
            assert!(close(impact.base_value, 50_000.0));
            assert!(close(impact.quality_adjusted_value, adjusted), "{quality:?}");
            assert!(close(impact.potential_savings, savings), "{quality:?}");
            assert!(close(impact.net_impact, net), "{quality:?}");
        }
    }

    #[test]
    fn confidence_does_not_scale_economic_view() {
        let volume = BatchVolume::default();
        let low = estimate_economic(
            &Prediction {
                quality: QualityGrade::Good,
                confidence: 10,
            },
            volume,
        );
        let high = estimate_economic(
            &Prediction {
                quality: QualityGrade::Good,
                confidence: 95,
            },
            volume,
        );
        assert_eq!(low, high);
        assert_eq!(low.recommendation, "Process immediately for premium pricing");
    }
}
