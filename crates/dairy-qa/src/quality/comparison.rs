use super::domain::{BatchSample, Parameter, Prediction};
use super::ledger::LedgerBatch;
use super::scoring::score;
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::HashSet;
use tracing::debug;

pub const MAX_COMPARED_BATCHES: usize = 3;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparedBatch {
    pub batch_id: String,
    pub name: String,
    pub date: NaiveDate,
    pub sample: BatchSample,
    pub prediction: Prediction,
}

/// Spread of one numeric parameter across the compared batches.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ParameterSpread {
    pub parameter: Parameter,
    pub parameter_label: &'static str,
    pub min: f64,
    pub max: f64,
    pub avg: f64,
    pub range: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchComparison {
    pub batches: Vec<ComparedBatch>,
    pub spreads: Vec<ParameterSpread>,
}

impl BatchComparison {
    pub fn spread(&self, parameter: Parameter) -> Option<&ParameterSpread> {
        self.spreads
            .iter()
            .find(|spread| spread.parameter == parameter)
    }
}

/// Re-score up to three distinct batches and summarize each numeric parameter.
///
/// Predictions are recomputed from the readings; any grade stored alongside
/// a ledger row is never trusted.
pub fn compare_batches(batches: &[LedgerBatch]) -> Result<BatchComparison, ComparisonError> {
    if batches.is_empty() {
        return Err(ComparisonError::NoBatches);
    }
    if batches.len() > MAX_COMPARED_BATCHES {
        return Err(ComparisonError::TooManyBatches(batches.len()));
    }

    let mut seen = HashSet::new();
    for batch in batches {
        if !seen.insert(batch.batch_id.to_ascii_uppercase()) {
            return Err(ComparisonError::DuplicateBatch(batch.batch_id.clone()));
        }
    }

    let compared: Vec<ComparedBatch> = batches
        .iter()
        .map(|batch| ComparedBatch {
            batch_id: batch.batch_id.clone(),
            name: batch.name.clone(),
            date: batch.date,
            sample: batch.sample,
            prediction: score(&batch.sample),
        })
        .collect();

    let spreads = Parameter::numeric()
        .into_iter()
        .filter_map(|parameter| {
            let values: Vec<f64> = compared
                .iter()
                .filter_map(|batch| batch.sample.numeric_value(parameter))
                .collect();
            spread_of(parameter, &values)
        })
        .collect();

    debug!(batches = compared.len(), "compared batches");

    Ok(BatchComparison {
        batches: compared,
        spreads,
    })
}

fn spread_of(parameter: Parameter, values: &[f64]) -> Option<ParameterSpread> {
    let first = *values.first()?;
    let (min, max) = values
        .iter()
        .fold((first, first), |(min, max), &value| (min.min(value), max.max(value)));
    let avg = values.iter().sum::<f64>() / values.len() as f64;

    Some(ParameterSpread {
        parameter,
        parameter_label: parameter.label(),
        min,
        max,
        avg,
        range: max - min,
    })
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ComparisonError {
    #[error("select at least one batch to compare")]
    NoBatches,
    #[error("at most 3 batches can be compared (got {0})")]
    TooManyBatches(usize),
    #[error("batch {0} was selected more than once")]
    DuplicateBatch(String),
}
