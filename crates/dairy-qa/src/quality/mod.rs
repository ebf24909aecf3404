//! Batch quality inference.
//!
//! Operator input is parsed once by [`intake`] into an immutable
//! [`BatchSample`]. [`scoring`] grades it, and every other module reads that
//! same sample and prediction without re-deriving either.

pub mod analysis;
pub mod comparison;
pub mod diagnosis;
pub mod domain;
pub mod extrapolation;
pub mod impact;
pub mod intake;
pub mod ledger;
pub mod report;
pub mod scoring;
pub mod screening;

pub use analysis::{analyze, AnalysisEngine, BatchAnalysis};
pub use comparison::{compare_batches, BatchComparison, ComparisonError, ParameterSpread};
pub use domain::{BatchSample, Parameter, Prediction, QualityGrade};
pub use extrapolation::{
    simulate, GradeDistribution, SimulatedBatch, SimulationError, SimulationOutcome,
    SimulationRequest, VariabilityTier,
};
pub use impact::{BatchVolume, ImpactError, ImpactEstimate, ImpactModel};
pub use intake::{RawBatchInput, SampleError};
pub use ledger::{write_simulation_csv, BatchLedger, LedgerBatch, LedgerError};
pub use report::BatchReport;
pub use scoring::score;
pub use screening::{DeviationCheck, DeviationReport};
