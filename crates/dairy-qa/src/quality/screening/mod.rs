//! Deviation screening.
//!
//! Two independent bound tables exist: the anomaly detector's statistical and
//! operational limits, and the outlier validator's instrument-validated
//! ranges. They overlap but disagree (fat 3.2-5.0 versus 3.0-5.5, for
//! example), so they stay separate strategies selected by the caller.

mod anomaly;
mod outlier;

pub use anomaly::{detect_anomalies, Anomaly, AnomalyKind, AnomalySeverity};
pub use outlier::{validate_outliers, OutlierIssue, OutlierSeverity, OutlierSubject};

use super::domain::BatchSample;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DeviationCheck {
    Anomaly,
    Outlier,
}

impl DeviationCheck {
    pub const fn ordered() -> [Self; 2] {
        [Self::Anomaly, Self::Outlier]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Anomaly => "Anomaly detection",
            Self::Outlier => "Outlier validation",
        }
    }

    pub fn run(self, sample: &BatchSample) -> DeviationReport {
        match self {
            Self::Anomaly => DeviationReport::Anomalies(detect_anomalies(sample)),
            Self::Outlier => DeviationReport::Outliers(validate_outliers(sample)),
        }
    }
}

/// Result of one screening strategy.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case", tag = "check", content = "findings")]
pub enum DeviationReport {
    Anomalies(Vec<Anomaly>),
    Outliers(Vec<OutlierIssue>),
}

impl DeviationReport {
    pub fn check(&self) -> DeviationCheck {
        match self {
            Self::Anomalies(_) => DeviationCheck::Anomaly,
            Self::Outliers(_) => DeviationCheck::Outlier,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Self::Anomalies(items) => items.len(),
            Self::Outliers(items) => items.len(),
        }
    }

    /// No findings: every reading is within this strategy's bounds.
    pub fn is_clear(&self) -> bool {
        self.len() == 0
    }

    /// One line per finding, for plain-text rendering.
    pub fn summary_lines(&self) -> Vec<String> {
        match self {
            Self::Anomalies(items) => items
                .iter()
                .map(|anomaly| {
                    format!(
                        "[{} / {}] {} = {}: {}",
                        anomaly.kind.label(),
                        anomaly.severity.label(),
                        anomaly.parameter_label,
                        anomaly.value,
                        anomaly.description
                    )
                })
                .collect(),
            Self::Outliers(items) => items
                .iter()
                .map(|issue| {
                    format!(
                        "[{}] {} = {}: {}",
                        issue.severity.label(),
                        issue.subject_label,
                        issue.value,
                        issue.issue
                    )
                })
                .collect(),
        }
    }
}
