use super::intake::SampleError;
use serde::{Deserialize, Serialize};

/// Inclusive numeric band used by every rule table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Band {
    pub min: f64,
    pub max: f64,
}

impl Band {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn contains(self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    pub fn clamp(self, value: f64) -> f64 {
        value.clamp(self.min, self.max)
    }
}

pub const FAT_OPTIMAL: Band = Band::new(3.5, 4.5);
pub const SNF_OPTIMAL: Band = Band::new(8.5, 9.0);
pub const TEMP_OPTIMAL: Band = Band::new(72.0, 85.0);
pub const PH_OPTIMAL: Band = Band::new(6.6, 6.8);
/// Counts strictly below this are optimal.
pub const MICROBIAL_OPTIMAL_BELOW: u32 = 10_000;
/// Counts strictly above this are high-risk.
pub const MICROBIAL_HIGH_RISK_ABOVE: u32 = 50_000;

pub const FAT_VALIDATED: Band = Band::new(3.0, 5.5);
pub const SNF_VALIDATED: Band = Band::new(8.0, 9.5);
pub const MICROBIAL_VALIDATED: (u32, u32) = (1_000, 500_000);
pub const TEMP_VALIDATED: Band = Band::new(70.0, 95.0);
pub const PH_VALIDATED: Band = Band::new(6.5, 6.9);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Parameter {
    FatContent,
    Snf,
    MicrobialLoad,
    Adulterants,
    ProcessingTemp,
    PhLevel,
}

impl Parameter {
    pub const fn ordered() -> [Self; 6] {
        [
            Self::FatContent,
            Self::Snf,
            Self::MicrobialLoad,
            Self::Adulterants,
            Self::ProcessingTemp,
            Self::PhLevel,
        ]
    }

    /// The five measured quantities, in sample order.
    pub const fn numeric() -> [Self; 5] {
        [
            Self::FatContent,
            Self::Snf,
            Self::MicrobialLoad,
            Self::ProcessingTemp,
            Self::PhLevel,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::FatContent => "Fat Content",
            Self::Snf => "SNF",
            Self::MicrobialLoad => "Microbial Load",
            Self::Adulterants => "Adulterants",
            Self::ProcessingTemp => "Processing Temperature",
            Self::PhLevel => "pH Level",
        }
    }
}

/// Measured attributes of one production batch.
///
/// Fields are private: once constructed a sample cannot change, so every
/// derived view reads identical numbers. Construction only rejects
/// non-finite decimals; domain-extreme values are accepted and scored.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "BatchSampleFields")]
pub struct BatchSample {
    fat_content: f64,
    snf: f64,
    microbial_load: u32,
    adulterants_detected: bool,
    processing_temp: f64,
    ph_level: f64,
}

impl BatchSample {
    pub fn new(
        fat_content: f64,
        snf: f64,
        microbial_load: u32,
        adulterants_detected: bool,
        processing_temp: f64,
        ph_level: f64,
    ) -> Result<Self, SampleError> {
        for (parameter, value) in [
            (Parameter::FatContent, fat_content),
            (Parameter::Snf, snf),
            (Parameter::ProcessingTemp, processing_temp),
            (Parameter::PhLevel, ph_level),
        ] {
            if !value.is_finite() {
                return Err(SampleError::NonFinite { parameter });
            }
        }

        Ok(Self::from_parts(
            fat_content,
            snf,
            microbial_load,
            adulterants_detected,
            processing_temp,
            ph_level,
        ))
    }

    /// Caller guarantees every decimal is finite.
    pub(crate) fn from_parts(
        fat_content: f64,
        snf: f64,
        microbial_load: u32,
        adulterants_detected: bool,
        processing_temp: f64,
        ph_level: f64,
    ) -> Self {
        Self {
            fat_content,
            snf,
            microbial_load,
            adulterants_detected,
            processing_temp,
            ph_level,
        }
    }

    pub fn fat_content(&self) -> f64 {
        self.fat_content
    }

    pub fn snf(&self) -> f64 {
        self.snf
    }

    pub fn microbial_load(&self) -> u32 {
        self.microbial_load
    }

    pub fn adulterants_detected(&self) -> bool {
        self.adulterants_detected
    }

    pub fn processing_temp(&self) -> f64 {
        self.processing_temp
    }

    pub fn ph_level(&self) -> f64 {
        self.ph_level
    }

    /// Numeric reading for a parameter; `None` for the adulterant flag.
    pub fn numeric_value(&self, parameter: Parameter) -> Option<f64> {
        match parameter {
            Parameter::FatContent => Some(self.fat_content),
            Parameter::Snf => Some(self.snf),
            Parameter::MicrobialLoad => Some(f64::from(self.microbial_load)),
            Parameter::Adulterants => None,
            Parameter::ProcessingTemp => Some(self.processing_temp),
            Parameter::PhLevel => Some(self.ph_level),
        }
    }

    /// Display form of a reading, with its unit.
    pub fn formatted_value(&self, parameter: Parameter) -> String {
        match parameter {
            Parameter::FatContent => format_percent(self.fat_content),
            Parameter::Snf => format_percent(self.snf),
            Parameter::MicrobialLoad => format_cfu(self.microbial_load),
            Parameter::Adulterants => {
                if self.adulterants_detected {
                    "Detected".to_string()
                } else {
                    "Not detected".to_string()
                }
            }
            Parameter::ProcessingTemp => format_celsius(self.processing_temp),
            Parameter::PhLevel => self.ph_level.to_string(),
        }
    }
}

#[derive(Deserialize)]
struct BatchSampleFields {
    fat_content: f64,
    snf: f64,
    microbial_load: u32,
    #[serde(default)]
    adulterants_detected: bool,
    processing_temp: f64,
    ph_level: f64,
}

impl TryFrom<BatchSampleFields> for BatchSample {
    type Error = SampleError;

    fn try_from(fields: BatchSampleFields) -> Result<Self, Self::Error> {
        BatchSample::new(
            fields.fat_content,
            fields.snf,
            fields.microbial_load,
            fields.adulterants_detected,
            fields.processing_temp,
            fields.ph_level,
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QualityGrade {
    Good,
    Acceptable,
    Poor,
}

impl QualityGrade {
    pub const fn ordered() -> [Self; 3] {
        [Self::Good, Self::Acceptable, Self::Poor]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Good => "Good",
            Self::Acceptable => "Acceptable",
            Self::Poor => "Poor",
        }
    }
}

/// Grade plus integer confidence percent, produced once per sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prediction {
    pub quality: QualityGrade,
    pub confidence: u8,
}

impl Prediction {
    pub fn summary(&self) -> String {
        format!(
            "{} quality with {}% confidence",
            self.quality.label(),
            self.confidence
        )
    }
}

pub(crate) fn format_percent(value: f64) -> String {
    format!("{value}%")
}

pub(crate) fn format_celsius(value: f64) -> String {
    format!("{value}°C")
}

pub(crate) fn format_cfu(value: u32) -> String {
    format!("{} CFU/ml", group_thousands(value))
}

pub(crate) fn group_thousands(value: u32) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}
