use crate::config::ConfigError;
use crate::quality::{
    ComparisonError, ImpactError, LedgerError, SampleError, SimulationError,
};
use crate::telemetry::TelemetryError;
use std::fmt;

#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    Io(std::io::Error),
    Sample(SampleError),
    Simulation(SimulationError),
    Impact(ImpactError),
    Comparison(ComparisonError),
    Ledger(LedgerError),
    Report(serde_json::Error),
}

impl AppError {
    /// Whether the operator can fix this by correcting their input.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            AppError::Sample(_)
                | AppError::Simulation(_)
                | AppError::Impact(_)
                | AppError::Comparison(_)
                | AppError::Ledger(_)
        )
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            AppError::Io(err) => write!(f, "io error: {}", err),
            AppError::Sample(err) => write!(f, "invalid batch sample: {}", err),
            AppError::Simulation(err) => write!(f, "invalid simulation request: {}", err),
            AppError::Impact(err) => write!(f, "invalid impact request: {}", err),
            AppError::Comparison(err) => write!(f, "invalid batch comparison: {}", err),
            AppError::Ledger(err) => write!(f, "batch ledger error: {}", err),
            AppError::Report(err) => write!(f, "report serialization error: {}", err),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::Io(err) => Some(err),
            AppError::Sample(err) => Some(err),
            AppError::Simulation(err) => Some(err),
            AppError::Impact(err) => Some(err),
            AppError::Comparison(err) => Some(err),
            AppError::Ledger(err) => Some(err),
            AppError::Report(err) => Some(err),
        }
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<TelemetryError> for AppError {
    fn from(value: TelemetryError) -> Self {
        Self::Telemetry(value)
    }
}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<SampleError> for AppError {
    fn from(value: SampleError) -> Self {
        Self::Sample(value)
    }
}

impl From<SimulationError> for AppError {
    fn from(value: SimulationError) -> Self {
        Self::Simulation(value)
    }
}

impl From<ImpactError> for AppError {
    fn from(value: ImpactError) -> Self {
        Self::Impact(value)
    }
}

impl From<ComparisonError> for AppError {
    fn from(value: ComparisonError) -> Self {
        Self::Comparison(value)
    }
}

impl From<LedgerError> for AppError {
    fn from(value: LedgerError) -> Self {
        Self::Ledger(value)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(value: serde_json::Error) -> Self {
        Self::Report(value)
    }
}
