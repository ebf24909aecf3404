use super::diagnosis::{
    explain, rank_root_causes, recommend, ExplanationItem, Recommendation, RootCause,
};
use super::domain::{BatchSample, Prediction};
use super::impact::{
    estimate_cost, estimate_economic, BatchVolume, CostImpact, EconomicImpact, ImpactEstimate,
    ImpactModel,
};
use super::scoring::score;
use super::screening::{
    detect_anomalies, validate_outliers, Anomaly, DeviationCheck, DeviationReport, OutlierIssue,
};
use serde::Serialize;
use tracing::debug;

/// Stateless analyzer that scores a sample once and derives every view from it.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnalysisEngine {
    batch_volume: BatchVolume,
}

impl AnalysisEngine {
    pub fn new(batch_volume: BatchVolume) -> Self {
        Self { batch_volume }
    }

    pub fn batch_volume(&self) -> BatchVolume {
        self.batch_volume
    }

    pub fn analyze(&self, sample: &BatchSample) -> BatchAnalysis {
        let prediction = score(sample);

        let analysis = BatchAnalysis {
            sample: *sample,
            prediction,
            batch_volume: self.batch_volume,
            explanations: explain(sample, &prediction),
            anomalies: detect_anomalies(sample),
            outliers: validate_outliers(sample),
            root_causes: rank_root_causes(sample, &prediction),
            recommendations: recommend(sample),
            cost_impact: estimate_cost(&prediction, self.batch_volume),
            economic_impact: estimate_economic(&prediction, self.batch_volume),
        };

        debug!(
            grade = prediction.quality.label(),
            confidence = prediction.confidence,
            anomalies = analysis.anomalies.len(),
            outliers = analysis.outliers.len(),
            root_causes = analysis.root_causes.len(),
            recommendations = analysis.recommendations.len(),
            "analyzed batch sample"
        );

        analysis
    }
}

/// Every derived view for one sample, all computed from the same prediction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchAnalysis {
    #[serde(rename = "inputs")]
    pub sample: BatchSample,
    pub prediction: Prediction,
    pub batch_volume: BatchVolume,
    pub explanations: Vec<ExplanationItem>,
    pub anomalies: Vec<Anomaly>,
    pub outliers: Vec<OutlierIssue>,
    pub root_causes: Vec<RootCause>,
    pub recommendations: Vec<Recommendation>,
    pub cost_impact: CostImpact,
    pub economic_impact: EconomicImpact,
}

impl BatchAnalysis {
    pub fn deviation_report(&self, check: DeviationCheck) -> DeviationReport {
        match check {
            DeviationCheck::Anomaly => DeviationReport::Anomalies(self.anomalies.clone()),
            DeviationCheck::Outlier => DeviationReport::Outliers(self.outliers.clone()),
        }
    }

    pub fn impact_estimate(&self, model: ImpactModel) -> ImpactEstimate {
        match model {
            ImpactModel::Cost => ImpactEstimate::Cost(self.cost_impact.clone()),
            ImpactModel::Economic => ImpactEstimate::Economic(self.economic_impact.clone()),
        }
    }
}

pub fn analyze(sample: &BatchSample, batch_volume: BatchVolume) -> BatchAnalysis {
    AnalysisEngine::new(batch_volume).analyze(sample)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quality::domain::QualityGrade;

    fn contaminated() -> BatchSample {
        BatchSample::new(3.2, 8.1, 85_000, true, 75.0, 6.4).expect("valid sample")
    }

    #[test]
    fn every_view_shares_one_prediction() {
        let sample = contaminated();
        let analysis = analyze(&sample, BatchVolume::default());

        assert_eq!(analysis.prediction, score(&sample));
        assert_eq!(analysis.prediction.quality, QualityGrade::Poor);
        assert_eq!(analysis.explanations.len(), 6);
        assert!(!analysis.anomalies.is_empty());
        assert!(!analysis.outliers.is_empty());
        assert!(!analysis.root_causes.is_empty());
        assert!(!analysis.recommendations.is_empty());
        assert_eq!(analysis.cost_impact.batch_value, 53_000.0);
    }

    #[test]
    fn strategy_views_match_direct_calls() {
        let sample = contaminated();
        let analysis = AnalysisEngine::default().analyze(&sample);

        for check in DeviationCheck::ordered() {
            assert_eq!(analysis.deviation_report(check), check.run(&sample));
        }
        for model in ImpactModel::ordered() {
            assert_eq!(
                analysis.impact_estimate(model),
                model.estimate(&analysis.prediction, analysis.batch_volume)
            );
        }
    }

    #[test]
    fn serializes_sample_under_inputs() {
        let analysis = analyze(&contaminated(), BatchVolume::default());
        let value = serde_json::to_value(&analysis).expect("serializes");
        assert_eq!(value["inputs"]["microbial_load"], 85_000);
        assert_eq!(value["prediction"]["quality"], "poor");
        assert_eq!(value["batch_volume"], 1_000.0);
    }
}
