//! Rule-based quality inference for dairy production batches.
//!
//! A [`quality::BatchSample`] is scored once by [`quality::score`]; the
//! resulting [`quality::Prediction`] and the untouched sample are then fanned
//! out to the derived views (explanation, deviation screening, root causes,
//! recommendations, financial impact). [`quality::simulate`] extrapolates
//! synthetic batches from a baseline using an injected random source.

pub mod config;
pub mod error;
pub mod quality;
pub mod telemetry;
