use super::super::domain::{
    group_thousands, BatchSample, Parameter, FAT_VALIDATED, PH_VALIDATED, SNF_VALIDATED,
    TEMP_VALIDATED,
};
use serde::Serialize;

const MICROBIAL_EXTREME_ABOVE: u32 = 100_000;
const COMBINATION_FAT_ABOVE: f64 = 4.5;
const COMBINATION_MICROBIAL_ABOVE: u32 = 50_000;

/// What an outlier issue refers to: one reading or a cross-field pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "parameter")]
pub enum OutlierSubject {
    Reading(Parameter),
    FatMicrobialCombination,
}

impl OutlierSubject {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Reading(parameter) => parameter.label(),
            Self::FatMicrobialCombination => "Fat-Microbial Combination",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OutlierSeverity {
    Warning,
    Error,
}

impl OutlierSeverity {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Warning => "Warning",
            Self::Error => "Error",
        }
    }
}

/// Reading outside the validated range, or an implausible field combination.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutlierIssue {
    pub subject: OutlierSubject,
    pub subject_label: &'static str,
    pub value: String,
    pub issue: &'static str,
    pub severity: OutlierSeverity,
}

impl OutlierIssue {
    fn reading(
        sample: &BatchSample,
        parameter: Parameter,
        issue: &'static str,
        severity: OutlierSeverity,
    ) -> Self {
        let subject = OutlierSubject::Reading(parameter);
        Self {
            subject,
            subject_label: subject.label(),
            value: sample.formatted_value(parameter),
            issue,
            severity,
        }
    }
}

/// Check readings against the validated ranges plus the fat/microbial rule.
///
/// The combination rule is independent of the single-field checks and may
/// fire alongside them.
pub fn validate_outliers(sample: &BatchSample) -> Vec<OutlierIssue> {
    let mut issues = Vec::new();

    if !FAT_VALIDATED.contains(sample.fat_content()) {
        issues.push(OutlierIssue::reading(
            sample,
            Parameter::FatContent,
            "Outside validated range (3.0-5.5%)",
            OutlierSeverity::Error,
        ));
    }

    if !SNF_VALIDATED.contains(sample.snf()) {
        issues.push(OutlierIssue::reading(
            sample,
            Parameter::Snf,
            "Outside validated range (8.0-9.5%)",
            OutlierSeverity::Error,
        ));
    }

    if sample.microbial_load() > MICROBIAL_EXTREME_ABOVE {
        issues.push(OutlierIssue::reading(
            sample,
            Parameter::MicrobialLoad,
            "Extremely high microbial count detected",
            OutlierSeverity::Error,
        ));
    }

    if !TEMP_VALIDATED.contains(sample.processing_temp()) {
        issues.push(OutlierIssue::reading(
            sample,
            Parameter::ProcessingTemp,
            "Outside safe processing range (70-95°C)",
            OutlierSeverity::Error,
        ));
    }

    if !PH_VALIDATED.contains(sample.ph_level()) {
        issues.push(OutlierIssue::reading(
            sample,
            Parameter::PhLevel,
            "Outside normal pH range (6.5-6.9)",
            OutlierSeverity::Warning,
        ));
    }

    if sample.fat_content() > COMBINATION_FAT_ABOVE
        && sample.microbial_load() > COMBINATION_MICROBIAL_ABOVE
    {
        let subject = OutlierSubject::FatMicrobialCombination;
        issues.push(OutlierIssue {
            subject,
            subject_label: subject.label(),
            value: format!(
                "Fat: {}%, Microbial: {}",
                sample.fat_content(),
                group_thousands(sample.microbial_load())
            ),
            issue: "High fat with high microbial load - unusual pattern",
            severity: OutlierSeverity::Warning,
        });
    }

    issues
}
