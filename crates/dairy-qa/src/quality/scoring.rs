use super::domain::{
    BatchSample, Prediction, QualityGrade, FAT_OPTIMAL, MICROBIAL_HIGH_RISK_ABOVE,
    MICROBIAL_OPTIMAL_BELOW, PH_OPTIMAL, SNF_OPTIMAL, TEMP_OPTIMAL,
};
use tracing::debug;

const OPTIMAL_BAND_POINTS: i32 = 1;
const ADULTERANT_FREE_POINTS: i32 = 2;
const CONTAMINATION_PENALTY: i32 = 5;

/// Score a sample and map it to a grade with confidence.
///
/// Total and deterministic: out-of-domain readings are scored, never rejected.
/// The simulator reuses this exact function for synthetic batches.
pub fn score(sample: &BatchSample) -> Prediction {
    let points = composite_score(sample);
    let prediction = grade_for(points);
    debug!(
        points,
        grade = prediction.quality.label(),
        confidence = prediction.confidence,
        "scored batch sample"
    );
    prediction
}

/// Raw composite score in `[-5, 7]`.
pub fn composite_score(sample: &BatchSample) -> i32 {
    let mut points = 0;

    if FAT_OPTIMAL.contains(sample.fat_content()) {
        points += OPTIMAL_BAND_POINTS;
    }
    if SNF_OPTIMAL.contains(sample.snf()) {
        points += OPTIMAL_BAND_POINTS;
    }
    if sample.microbial_load() < MICROBIAL_OPTIMAL_BELOW {
        points += OPTIMAL_BAND_POINTS;
    }
    if !sample.adulterants_detected() {
        points += ADULTERANT_FREE_POINTS;
    }
    if TEMP_OPTIMAL.contains(sample.processing_temp()) {
        points += OPTIMAL_BAND_POINTS;
    }
    if PH_OPTIMAL.contains(sample.ph_level()) {
        points += OPTIMAL_BAND_POINTS;
    }

    // Either trigger applies the penalty once; they never stack.
    if sample.microbial_load() > MICROBIAL_HIGH_RISK_ABOVE || sample.adulterants_detected() {
        points -= CONTAMINATION_PENALTY;
    }

    points
}

/// First matching tier wins: Good, then Acceptable, then Poor.
pub(crate) fn grade_for(points: i32) -> Prediction {
    let (quality, confidence) = if points >= 4 {
        (QualityGrade::Good, (80 + points * 3).min(95))
    } else if points >= 2 {
        (QualityGrade::Acceptable, (70 + points * 2).min(85))
    } else {
        (QualityGrade::Poor, (60 + points.abs() * 5).min(90))
    };

    Prediction {
        quality,
        confidence: confidence.clamp(0, 100) as u8,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(fat: f64, snf: f64, microbial: u32, adulterants: bool, temp: f64, ph: f64) -> BatchSample {
        BatchSample::new(fat, snf, microbial, adulterants, temp, ph).expect("valid sample")
    }

    #[test]
    fn clean_batch_scores_seven_and_grades_good() {
        let batch = sample(4.2, 8.8, 8_500, false, 78.5, 6.7);
        assert_eq!(composite_score(&batch), 7);
        assert_eq!(
            score(&batch),
            Prediction {
                quality: QualityGrade::Good,
                confidence: 95
            }
        );
    }

    #[test]
    fn contamination_penalty_applies_once() {
        let batch = sample(3.2, 8.1, 85_000, true, 75.0, 6.4);
        assert_eq!(composite_score(&batch), -4);
        assert_eq!(
            score(&batch),
            Prediction {
                quality: QualityGrade::Poor,
                confidence: 80
            }
        );
    }

    #[test]
    fn microbial_count_between_thresholds_earns_nothing() {
        let batch = sample(3.8, 8.5, 15_000, false, 82.0, 6.6);
        assert_eq!(composite_score(&batch), 6);
        assert_eq!(score(&batch).quality, QualityGrade::Good);
        assert_eq!(score(&batch).confidence, 95);
    }

    #[test]
    fn grade_tiers_and_confidence_caps() {
        assert_eq!(grade_for(4), Prediction { quality: QualityGrade::Good, confidence: 92 });
        assert_eq!(grade_for(5), Prediction { quality: QualityGrade::Good, confidence: 95 });
        assert_eq!(grade_for(3), Prediction { quality: QualityGrade::Acceptable, confidence: 76 });
        assert_eq!(grade_for(2), Prediction { quality: QualityGrade::Acceptable, confidence: 74 });
        assert_eq!(grade_for(1), Prediction { quality: QualityGrade::Poor, confidence: 65 });
        assert_eq!(grade_for(0), Prediction { quality: QualityGrade::Poor, confidence: 60 });
        assert_eq!(grade_for(-5), Prediction { quality: QualityGrade::Poor, confidence: 85 });
        assert_eq!(grade_for(-7), Prediction { quality: QualityGrade::Poor, confidence: 90 });
    }

    #[test]
    fn band_edges_are_inclusive() {
        let batch = sample(3.5, 9.0, 9_999, false, 85.0, 6.6);
        assert_eq!(composite_score(&batch), 7);

        let batch = sample(4.5, 8.5, 10_000, false, 72.0, 6.8);
        assert_eq!(composite_score(&batch), 6);
    }

    #[test]
    fn high_microbial_alone_triggers_penalty() {
        let batch = sample(4.0, 8.7, 50_001, false, 80.0, 6.7);
        assert_eq!(composite_score(&batch), 1);
        assert_eq!(score(&batch).quality, QualityGrade::Poor);
    }
}
