use super::super::domain::{BatchSample, Band, Parameter};
use serde::Serialize;

const FAT_STATISTICAL: Band = Band::new(3.2, 5.0);
const SNF_STATISTICAL: Band = Band::new(8.2, 9.2);
const MICROBIAL_OPERATIONAL_ABOVE: u32 = 100_000;
const TEMP_OPERATIONAL: Band = Band::new(72.0, 90.0);
const PH_SAFETY: Band = Band::new(6.5, 6.9);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AnomalyKind {
    Statistical,
    Operational,
    Safety,
}

impl AnomalyKind {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Statistical => "Statistical",
            Self::Operational => "Operational",
            Self::Safety => "Safety",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AnomalySeverity {
    Low,
    Medium,
    High,
}

impl AnomalySeverity {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }
}

/// Deviation from the statistical/operational bounds of normal production.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Anomaly {
    pub parameter: Parameter,
    pub parameter_label: &'static str,
    pub value: String,
    #[serde(rename = "type")]
    pub kind: AnomalyKind,
    pub severity: AnomalySeverity,
    pub description: &'static str,
}

impl Anomaly {
    fn new(
        sample: &BatchSample,
        parameter: Parameter,
        kind: AnomalyKind,
        severity: AnomalySeverity,
        description: &'static str,
    ) -> Self {
        Self {
            parameter,
            parameter_label: parameter.label(),
            value: sample.formatted_value(parameter),
            kind,
            severity,
            description,
        }
    }
}

/// Flag every field that leaves its bound, in fixed evaluation order.
///
/// An empty result means every reading is within bounds.
pub fn detect_anomalies(sample: &BatchSample) -> Vec<Anomaly> {
    let mut anomalies = Vec::new();

    if !FAT_STATISTICAL.contains(sample.fat_content()) {
        anomalies.push(Anomaly::new(
            sample,
            Parameter::FatContent,
            AnomalyKind::Statistical,
            AnomalySeverity::Medium,
            "Value falls outside 95% confidence interval of normal operations",
        ));
    }

    if !SNF_STATISTICAL.contains(sample.snf()) {
        anomalies.push(Anomaly::new(
            sample,
            Parameter::Snf,
            AnomalyKind::Statistical,
            AnomalySeverity::Medium,
            "Unusual SNF levels may indicate measurement error or process deviation",
        ));
    }

    if sample.microbial_load() > MICROBIAL_OPERATIONAL_ABOVE {
        anomalies.push(Anomaly::new(
            sample,
            Parameter::MicrobialLoad,
            AnomalyKind::Operational,
            AnomalySeverity::High,
            "Extreme microbial count suggests critical hygiene failure",
        ));
    }

    if !TEMP_OPERATIONAL.contains(sample.processing_temp()) {
        anomalies.push(Anomaly::new(
            sample,
            Parameter::ProcessingTemp,
            AnomalyKind::Operational,
            AnomalySeverity::High,
            "Temperature outside safe operational bounds",
        ));
    }

    if sample.adulterants_detected() {
        anomalies.push(Anomaly::new(
            sample,
            Parameter::Adulterants,
            AnomalyKind::Safety,
            AnomalySeverity::High,
            "Presence of adulterants poses immediate safety risk",
        ));
    }

    if !PH_SAFETY.contains(sample.ph_level()) {
        anomalies.push(Anomaly::new(
            sample,
            Parameter::PhLevel,
            AnomalyKind::Safety,
            AnomalySeverity::Low,
            "pH deviation may indicate spoilage or contamination",
        ));
    }

    anomalies
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nominal_batch_has_no_anomalies() {
        let sample = BatchSample::new(4.2, 8.8, 8_500, false, 78.5, 6.7).expect("valid");
        assert!(detect_anomalies(&sample).is_empty());
    }

    #[test]
    fn flags_follow_evaluation_order() {
        let sample = BatchSample::new(5.1, 8.1, 150_000, true, 91.0, 6.4).expect("valid");
        let anomalies = detect_anomalies(&sample);

        let parameters: Vec<_> = anomalies.iter().map(|a| a.parameter).collect();
        assert_eq!(
            parameters,
            vec![
                Parameter::FatContent,
                Parameter::Snf,
                Parameter::MicrobialLoad,
                Parameter::ProcessingTemp,
                Parameter::Adulterants,
                Parameter::PhLevel,
            ]
        );
        assert_eq!(anomalies[2].value, "150,000 CFU/ml");
        assert_eq!(anomalies[3].value, "91°C");
        assert_eq!(anomalies[4].value, "Detected");
        assert_eq!(anomalies[5].severity, AnomalySeverity::Low);
    }

    #[test]
    fn statistical_bounds_are_tighter_than_validated_ones() {
        let sample = BatchSample::new(3.1, 8.8, 8_500, false, 78.5, 6.7).expect("valid");
        let anomalies = detect_anomalies(&sample);
        assert_eq!(anomalies.len(), 1);
        assert_eq!(anomalies[0].kind, AnomalyKind::Statistical);
        assert_eq!(anomalies[0].severity, AnomalySeverity::Medium);
    }

    #[test]
    fn temperature_above_ninety_is_operational() {
        let sample = BatchSample::new(4.2, 8.8, 8_500, false, 90.5, 6.7).expect("valid");
        let anomalies = detect_anomalies(&sample);
        assert_eq!(anomalies.len(), 1);
        assert_eq!(anomalies[0].kind, AnomalyKind::Operational);
        assert_eq!(anomalies[0].severity, AnomalySeverity::High);
    }
}
