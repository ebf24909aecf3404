//! Financial impact of a verdict.
//!
//! Two cost models exist with different constants and branch structure.
//! They are kept as separate strategies; merging them would change figures.

mod cost;
mod economic;

pub use cost::{estimate_cost, CostImpact};
pub use economic::{estimate_economic, EconomicImpact};

use super::domain::Prediction;
use serde::Serialize;

pub const DEFAULT_BATCH_VOLUME_LITERS: f64 = 1_000.0;

/// Batch volume in liters; always finite and positive.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct BatchVolume(f64);

impl BatchVolume {
    pub fn new(liters: f64) -> Result<Self, ImpactError> {
        if liters.is_finite() && liters > 0.0 {
            Ok(Self(liters))
        } else {
            Err(ImpactError::InvalidBatchVolume(liters))
        }
    }

    pub fn liters(self) -> f64 {
        self.0
    }
}

impl Default for BatchVolume {
    fn default() -> Self {
        Self(DEFAULT_BATCH_VOLUME_LITERS)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ImpactModel {
    Cost,
    Economic,
}

impl ImpactModel {
    pub const fn ordered() -> [Self; 2] {
        [Self::Cost, Self::Economic]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Cost => "Cost impact",
            Self::Economic => "Economic impact",
        }
    }

    pub fn estimate(self, prediction: &Prediction, volume: BatchVolume) -> ImpactEstimate {
        match self {
            Self::Cost => ImpactEstimate::Cost(estimate_cost(prediction, volume)),
            Self::Economic => ImpactEstimate::Economic(estimate_economic(prediction, volume)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case", tag = "model", content = "estimate")]
pub enum ImpactEstimate {
    Cost(CostImpact),
    Economic(EconomicImpact),
}

impl ImpactEstimate {
    pub fn model(&self) -> ImpactModel {
        match self {
            Self::Cost(_) => ImpactModel::Cost,
            Self::Economic(_) => ImpactModel::Economic,
        }
    }

    pub fn net_impact(&self) -> f64 {
        match self {
            Self::Cost(impact) => impact.net_impact,
            Self::Economic(impact) => impact.net_impact,
        }
    }

    pub fn recommendations(&self) -> Vec<&'static str> {
        match self {
            Self::Cost(impact) => impact.recommendations.clone(),
            Self::Economic(impact) => vec![impact.recommendation],
        }
    }

    /// Labelled monetary figures, for plain-text rendering.
    pub fn figures(&self) -> Vec<(&'static str, f64)> {
        match self {
            Self::Cost(impact) => vec![
                ("Batch value", impact.batch_value),
                ("Potential loss", impact.potential_loss),
                ("Savings", impact.savings),
                ("Net impact", impact.net_impact),
            ],
            Self::Economic(impact) => vec![
                ("Base value", impact.base_value),
                ("Quality-adjusted value", impact.quality_adjusted_value),
                ("Potential savings", impact.potential_savings),
                ("Net impact", impact.net_impact),
            ],
        }
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ImpactError {
    #[error("batch volume must be a positive number of liters (got {0})")]
    InvalidBatchVolume(f64),
}
