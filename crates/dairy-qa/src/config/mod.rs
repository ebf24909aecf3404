use crate::quality::extrapolation::{SimulationError, SimulationRequest, VariabilityTier};
use crate::quality::impact::{BatchVolume, DEFAULT_BATCH_VOLUME_LITERS};
use std::env;
use std::fmt;

/// Distinguishes runtime behavior for different stages of the tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub telemetry: TelemetryConfig,
    pub analysis: AnalysisConfig,
    pub simulation: SimulationConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let batch_volume = match env::var("DAIRY_BATCH_VOLUME") {
            Ok(raw) => raw
                .trim()
                .parse::<f64>()
                .ok()
                .and_then(|liters| BatchVolume::new(liters).ok())
                .ok_or(ConfigError::InvalidBatchVolume { value: raw })?,
            Err(_) => BatchVolume::default(),
        };

        let count = env::var("DAIRY_SIM_COUNT").unwrap_or_else(|_| "10".to_string());
        let count = count
            .trim()
            .parse::<u32>()
            .map_err(|_| ConfigError::InvalidSimulationCount {
                value: count.clone(),
            })?;

        let baseline_fat =
            env::var("DAIRY_SIM_BASELINE_FAT").unwrap_or_else(|_| "4.0".to_string());
        let baseline_fat = baseline_fat.trim().parse::<f64>().map_err(|_| {
            ConfigError::InvalidBaselineFat {
                value: baseline_fat.clone(),
            }
        })?;

        let variability =
            env::var("DAIRY_SIM_VARIABILITY").unwrap_or_else(|_| "medium".to_string());
        let variability = variability
            .parse::<VariabilityTier>()
            .map_err(|_| ConfigError::InvalidVariability {
                value: variability.clone(),
            })?;

        let defaults = SimulationRequest::new(count, baseline_fat, variability).map_err(
            |source| match source {
                SimulationError::CountOutOfRange(_) => ConfigError::InvalidSimulationCount {
                    value: count.to_string(),
                },
                SimulationError::BaselineFatOutOfRange(_) => ConfigError::InvalidBaselineFat {
                    value: baseline_fat.to_string(),
                },
                SimulationError::UnknownVariability(value) => {
                    ConfigError::InvalidVariability { value }
                }
            },
        )?;

        Ok(Self {
            environment,
            telemetry: TelemetryConfig { log_level },
            analysis: AnalysisConfig { batch_volume },
            simulation: SimulationConfig { defaults },
        })
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Defaults for single-batch analysis.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnalysisConfig {
    pub batch_volume: BatchVolume,
}

/// Defaults for batch extrapolation; already validated.
#[derive(Debug, Clone, Copy)]
pub struct SimulationConfig {
    pub defaults: SimulationRequest,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    InvalidBatchVolume { value: String },
    InvalidSimulationCount { value: String },
    InvalidBaselineFat { value: String },
    InvalidVariability { value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidBatchVolume { value } => write!(
                f,
                "DAIRY_BATCH_VOLUME must be a positive number of liters (got '{}', default {})",
                value, DEFAULT_BATCH_VOLUME_LITERS
            ),
            ConfigError::InvalidSimulationCount { value } => write!(
                f,
                "DAIRY_SIM_COUNT must be an integer between 1 and 50 (got '{}')",
                value
            ),
            ConfigError::InvalidBaselineFat { value } => write!(
                f,
                "DAIRY_SIM_BASELINE_FAT must be between 3.0 and 5.5 (got '{}')",
                value
            ),
            ConfigError::InvalidVariability { value } => write!(
                f,
                "DAIRY_SIM_VARIABILITY must be one of low, medium, high (got '{}')",
                value
            ),
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::{Mutex, OnceLock};

    fn env_guard() -> &'static Mutex<()> {
        static GUARD: OnceLock<Mutex<()>> = OnceLock::new();
        GUARD.get_or_init(|| Mutex::new(()))
    }

    fn reset_env() {
        env::remove_var("APP_ENV");
        env::remove_var("APP_LOG_LEVEL");
        env::remove_var("DAIRY_BATCH_VOLUME");
        env::remove_var("DAIRY_SIM_COUNT");
        env::remove_var("DAIRY_SIM_BASELINE_FAT");
        env::remove_var("DAIRY_SIM_VARIABILITY");
    }

    #[test]
    fn load_uses_defaults_when_env_missing() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        let config = AppConfig::load().expect("config loads with defaults");
        assert_eq!(config.environment, AppEnvironment::Development);
        assert_eq!(config.telemetry.log_level, "info");
        assert_eq!(config.analysis.batch_volume.liters(), 1_000.0);
        assert_eq!(config.simulation.defaults.count(), 10);
        assert_eq!(config.simulation.defaults.baseline_fat(), 4.0);
        assert_eq!(
            config.simulation.defaults.variability(),
            VariabilityTier::Medium
        );
    }

    #[test]
    fn reads_overrides_from_env() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_ENV", "ci");
        env::set_var("DAIRY_BATCH_VOLUME", "2500");
        env::set_var("DAIRY_SIM_COUNT", "25");
        env::set_var("DAIRY_SIM_VARIABILITY", "High");
        let config = AppConfig::load().expect("config loads");
        reset_env();

        assert_eq!(config.environment, AppEnvironment::Test);
        assert_eq!(config.analysis.batch_volume.liters(), 2_500.0);
        assert_eq!(config.simulation.defaults.count(), 25);
        assert_eq!(
            config.simulation.defaults.variability(),
            VariabilityTier::High
        );
    }

    #[test]
    fn rejects_out_of_range_defaults() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();

        env::set_var("DAIRY_SIM_COUNT", "80");
        assert_eq!(
            AppConfig::load().expect_err("count too high"),
            ConfigError::InvalidSimulationCount {
                value: "80".to_string()
            }
        );
        reset_env();

        env::set_var("DAIRY_SIM_BASELINE_FAT", "6.1");
        assert!(matches!(
            AppConfig::load(),
            Err(ConfigError::InvalidBaselineFat { .. })
        ));
        reset_env();

        env::set_var("DAIRY_BATCH_VOLUME", "-10");
        let err = AppConfig::load().expect_err("negative volume");
        assert!(err.to_string().starts_with("DAIRY_BATCH_VOLUME"));
        reset_env();
    }
}
