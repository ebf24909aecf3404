use super::domain::{
    Band, BatchSample, Prediction, QualityGrade, FAT_VALIDATED, PH_VALIDATED, SNF_VALIDATED,
    TEMP_VALIDATED,
};
use super::scoring::score;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::debug;

pub const MIN_SIMULATED_BATCHES: u8 = 1;
pub const MAX_SIMULATED_BATCHES: u8 = 50;

const SNF_BASELINE: f64 = 8.7;
const TEMP_BASELINE: f64 = 80.0;
const PH_BASELINE: f64 = 6.7;
const ADULTERANT_PROBABILITY: f64 = 0.02;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VariabilityTier {
    Low,
    #[default]
    Medium,
    High,
}

impl VariabilityTier {
    /// Maximum relative perturbation applied to each baseline.
    pub const fn factor(self) -> f64 {
        match self {
            Self::Low => 0.05,
            Self::Medium => 0.15,
            Self::High => 0.25,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl FromStr for VariabilityTier {
    type Err = SimulationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            other => Err(SimulationError::UnknownVariability(other.to_string())),
        }
    }
}

/// Validated simulation parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SimulationRequest {
    count: u8,
    baseline_fat: f64,
    variability: VariabilityTier,
}

impl SimulationRequest {
    pub fn new(
        count: u32,
        baseline_fat: f64,
        variability: VariabilityTier,
    ) -> Result<Self, SimulationError> {
        let count = u8::try_from(count)
            .ok()
            .filter(|count| (MIN_SIMULATED_BATCHES..=MAX_SIMULATED_BATCHES).contains(count))
            .ok_or(SimulationError::CountOutOfRange(count))?;

        if !FAT_VALIDATED.contains(baseline_fat) {
            return Err(SimulationError::BaselineFatOutOfRange(baseline_fat));
        }

        Ok(Self {
            count,
            baseline_fat,
            variability,
        })
    }

    pub fn count(&self) -> u8 {
        self.count
    }

    pub fn baseline_fat(&self) -> f64 {
        self.baseline_fat
    }

    pub fn variability(&self) -> VariabilityTier {
        self.variability
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulatedBatch {
    pub batch_number: u32,
    pub sample: BatchSample,
    pub prediction: Prediction,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct GradeDistribution {
    pub good: usize,
    pub acceptable: usize,
    pub poor: usize,
}

impl GradeDistribution {
    pub fn record(&mut self, grade: QualityGrade) {
        match grade {
            QualityGrade::Good => self.good += 1,
            QualityGrade::Acceptable => self.acceptable += 1,
            QualityGrade::Poor => self.poor += 1,
        }
    }

    pub fn count(&self, grade: QualityGrade) -> usize {
        match grade {
            QualityGrade::Good => self.good,
            QualityGrade::Acceptable => self.acceptable,
            QualityGrade::Poor => self.poor,
        }
    }

    pub fn total(&self) -> usize {
        self.good + self.acceptable + self.poor
    }

    /// Percentage of batches in `grade`; 0 when nothing was recorded.
    pub fn share(&self, grade: QualityGrade) -> f64 {
        let total = self.total();
        if total == 0 {
            return 0.0;
        }
        self.count(grade) as f64 / total as f64 * 100.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationOutcome {
    pub request: SimulationRequest,
    pub batches: Vec<SimulatedBatch>,
    pub distribution: GradeDistribution,
}

/// Synthesize `request.count()` batches around the baseline and score each.
///
/// All randomness comes from `rng`; a seeded generator reproduces a run.
/// Draw order per batch: fat, SNF, microbial, adulterant, temperature, pH.
pub fn simulate<R>(request: &SimulationRequest, rng: &mut R) -> SimulationOutcome
where
    R: Rng + ?Sized,
{
    let factor = request.variability.factor();
    let mut batches = Vec::with_capacity(usize::from(request.count));
    let mut distribution = GradeDistribution::default();

    for batch_number in 1..=u32::from(request.count) {
        let fat_content = perturb(rng, request.baseline_fat, factor, FAT_VALIDATED);
        let snf = perturb(rng, SNF_BASELINE, factor, SNF_VALIDATED);
        let microbial_load = draw_microbial_load(rng);
        let adulterants_detected = rng.gen::<f64>() < ADULTERANT_PROBABILITY;
        let processing_temp = perturb(rng, TEMP_BASELINE, factor, TEMP_VALIDATED);
        let ph_level = perturb(rng, PH_BASELINE, factor, PH_VALIDATED);

        let sample = BatchSample::from_parts(
            fat_content,
            snf,
            microbial_load,
            adulterants_detected,
            processing_temp,
            ph_level,
        );
        let prediction = score(&sample);
        distribution.record(prediction.quality);

        batches.push(SimulatedBatch {
            batch_number,
            sample,
            prediction,
        });
    }

    debug!(
        count = request.count,
        variability = request.variability.label(),
        good = distribution.good,
        acceptable = distribution.acceptable,
        poor = distribution.poor,
        "simulated batch extrapolation"
    );

    SimulationOutcome {
        request: *request,
        batches,
        distribution,
    }
}

/// `baseline + U(-1, 1) * factor * baseline`, clamped to `band`.
fn perturb<R>(rng: &mut R, baseline: f64, factor: f64, band: Band) -> f64
where
    R: Rng + ?Sized,
{
    let variation = (rng.gen::<f64>() - 0.5) * 2.0 * factor * baseline;
    band.clamp(baseline + variation)
}

/// Log-normal-like count: `round(exp(U(0, 1) * 5 + 5))`, i.e. 148..=22026.
fn draw_microbial_load<R>(rng: &mut R) -> u32
where
    R: Rng + ?Sized,
{
    (rng.gen::<f64>() * 5.0 + 5.0).exp().round() as u32
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SimulationError {
    #[error("batch count must be between 1 and 50 (got {0})")]
    CountOutOfRange(u32),
    #[error("baseline fat content must be between 3.0% and 5.5% (got {0})")]
    BaselineFatOutOfRange(f64),
    #[error("variability must be one of low, medium, high (got '{0}')")]
    UnknownVariability(String),
}
