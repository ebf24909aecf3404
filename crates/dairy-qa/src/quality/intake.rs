use super::domain::{
    BatchSample, Parameter, FAT_VALIDATED, MICROBIAL_VALIDATED, PH_VALIDATED, SNF_VALIDATED,
    TEMP_VALIDATED,
};
use serde::Deserialize;

/// Raw form values as entered by an operator, before any parsing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RawBatchInput {
    pub fat_content: String,
    pub snf: String,
    pub microbial_load: String,
    #[serde(default)]
    pub adulterants_detected: bool,
    pub processing_temp: String,
    pub ph_level: String,
}

impl RawBatchInput {
    /// Parse every field exactly once into an immutable sample.
    pub fn parse(&self) -> Result<BatchSample, SampleError> {
        let fat_content = parse_decimal(Parameter::FatContent, &self.fat_content)?;
        let snf = parse_decimal(Parameter::Snf, &self.snf)?;
        let microbial_load = parse_count(Parameter::MicrobialLoad, &self.microbial_load)?;
        let processing_temp = parse_decimal(Parameter::ProcessingTemp, &self.processing_temp)?;
        let ph_level = parse_decimal(Parameter::PhLevel, &self.ph_level)?;

        Ok(BatchSample::from_parts(
            fat_content,
            snf,
            microbial_load,
            self.adulterants_detected,
            processing_temp,
            ph_level,
        ))
    }

    /// Parse and then enforce the validated measurement ranges.
    pub fn parse_strict(&self) -> Result<BatchSample, SampleError> {
        let sample = self.parse()?;
        ensure_validated_ranges(&sample)?;
        Ok(sample)
    }
}

/// Reject readings outside the instrument-validated ranges (bounds inclusive).
pub fn ensure_validated_ranges(sample: &BatchSample) -> Result<(), SampleError> {
    let decimal_checks = [
        (Parameter::FatContent, sample.fat_content(), FAT_VALIDATED, "%"),
        (Parameter::Snf, sample.snf(), SNF_VALIDATED, "%"),
        (
            Parameter::ProcessingTemp,
            sample.processing_temp(),
            TEMP_VALIDATED,
            "°C",
        ),
        (Parameter::PhLevel, sample.ph_level(), PH_VALIDATED, ""),
    ];

    for (parameter, value, band, unit) in decimal_checks {
        if !band.contains(value) {
            return Err(SampleError::OutOfRange {
                parameter,
                value: value.to_string(),
                range: format!("{:.1}{unit} to {:.1}{unit}", band.min, band.max),
            });
        }
    }

    let (min, max) = MICROBIAL_VALIDATED;
    let microbial = sample.microbial_load();
    if microbial < min || microbial > max {
        return Err(SampleError::OutOfRange {
            parameter: Parameter::MicrobialLoad,
            value: microbial.to_string(),
            range: format!("{min} to {max} CFU/ml"),
        });
    }

    Ok(())
}

fn parse_decimal(parameter: Parameter, raw: &str) -> Result<f64, SampleError> {
    let trimmed = required(parameter, raw)?;
    let value: f64 = trimmed.parse().map_err(|_| SampleError::Unparseable {
        parameter,
        raw: trimmed.to_string(),
    })?;
    if !value.is_finite() {
        return Err(SampleError::NonFinite { parameter });
    }
    Ok(value)
}

/// Counts accept any whole, non-negative number (`85000`, `85000.0`, `8.5e4`).
/// Values beyond `u32::MAX` saturate so extreme readings still score.
fn parse_count(parameter: Parameter, raw: &str) -> Result<u32, SampleError> {
    let value = parse_decimal(parameter, raw)?;
    if value < 0.0 || value.fract() != 0.0 {
        return Err(SampleError::NotWholeCount {
            parameter,
            raw: raw.trim().to_string(),
        });
    }
    Ok(value.min(f64::from(u32::MAX)) as u32)
}

fn required(parameter: Parameter, raw: &str) -> Result<&str, SampleError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        Err(SampleError::Missing { parameter })
    } else {
        Ok(trimmed)
    }
}

/// Malformed input: the caller must fix the form before any scoring runs.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SampleError {
    #[error("{} is required", .parameter.label())]
    Missing { parameter: Parameter },
    #[error("{} value '{raw}' is not a number", .parameter.label())]
    Unparseable { parameter: Parameter, raw: String },
    #[error("{} must be a finite number", .parameter.label())]
    NonFinite { parameter: Parameter },
    #[error("{} value '{raw}' must be a whole, non-negative count", .parameter.label())]
    NotWholeCount { parameter: Parameter, raw: String },
    #[error("{} value {value} is outside the validated range {range}", .parameter.label())]
    OutOfRange {
        parameter: Parameter,
        value: String,
        range: String,
    },
}

impl SampleError {
    pub fn parameter(&self) -> Parameter {
        match self {
            SampleError::Missing { parameter }
            | SampleError::Unparseable { parameter, .. }
            | SampleError::NonFinite { parameter }
            | SampleError::NotWholeCount { parameter, .. }
            | SampleError::OutOfRange { parameter, .. } => *parameter,
        }
    }
}
