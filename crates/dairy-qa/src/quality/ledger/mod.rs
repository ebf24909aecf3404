//! Batch ledger: historical batch records kept as CSV.
//!
//! Rows use the columns `batch_id,name,date,fat_content,snf,microbial_load,
//! adulterants_detected,processing_temp,ph_level`. Every row goes through the
//! same intake parse as operator input, so ledger samples are scored exactly
//! like form entries.

mod export;
mod parser;

pub use export::write_simulation_csv;

use super::domain::BatchSample;
use super::intake::SampleError;
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::HashSet;
use std::io::Read;
use std::path::Path;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LedgerBatch {
    pub batch_id: String,
    pub name: String,
    pub date: NaiveDate,
    pub sample: BatchSample,
}

#[derive(Debug, Clone, Default)]
pub struct BatchLedger {
    batches: Vec<LedgerBatch>,
}

impl BatchLedger {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, LedgerError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, LedgerError> {
        let batches = parser::parse_batches(reader)?;

        let mut seen = HashSet::new();
        for batch in &batches {
            if !seen.insert(batch.batch_id.to_ascii_uppercase()) {
                return Err(LedgerError::DuplicateBatchId(batch.batch_id.clone()));
            }
        }

        debug!(batches = batches.len(), "loaded batch ledger");
        Ok(Self { batches })
    }

    pub fn batches(&self) -> &[LedgerBatch] {
        &self.batches
    }

    pub fn find(&self, batch_id: &str) -> Option<&LedgerBatch> {
        self.batches
            .iter()
            .find(|batch| batch.batch_id.eq_ignore_ascii_case(batch_id.trim()))
    }

    /// Resolve ids in the order given, failing on the first unknown id.
    pub fn select(&self, batch_ids: &[String]) -> Result<Vec<LedgerBatch>, LedgerError> {
        batch_ids
            .iter()
            .map(|id| {
                self.find(id)
                    .cloned()
                    .ok_or_else(|| LedgerError::UnknownBatch(id.clone()))
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.batches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.batches.is_empty()
    }
}

#[derive(Debug)]
pub enum LedgerError {
    Io(std::io::Error),
    Csv(csv::Error),
    InvalidRow {
        batch_id: String,
        source: SampleError,
    },
    InvalidFlag {
        batch_id: String,
        raw: String,
    },
    DuplicateBatchId(String),
    UnknownBatch(String),
}

impl std::fmt::Display for LedgerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LedgerError::Io(err) => write!(f, "failed to access batch ledger: {}", err),
            LedgerError::Csv(err) => write!(f, "invalid batch ledger CSV data: {}", err),
            LedgerError::InvalidRow { batch_id, source } => {
                write!(f, "batch {} has invalid readings: {}", batch_id, source)
            }
            LedgerError::InvalidFlag { batch_id, raw } => write!(
                f,
                "batch {} has an unrecognized adulterant flag '{}'",
                batch_id, raw
            ),
            LedgerError::DuplicateBatchId(id) => {
                write!(f, "batch id {} appears more than once in the ledger", id)
            }
            LedgerError::UnknownBatch(id) => write!(f, "batch {} is not in the ledger", id),
        }
    }
}

impl std::error::Error for LedgerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LedgerError::Io(err) => Some(err),
            LedgerError::Csv(err) => Some(err),
            LedgerError::InvalidRow { source, .. } => Some(source),
            LedgerError::InvalidFlag { .. }
            | LedgerError::DuplicateBatchId(_)
            | LedgerError::UnknownBatch(_) => None,
        }
    }
}

impl From<std::io::Error> for LedgerError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for LedgerError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}
