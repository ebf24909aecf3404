use super::super::domain::{
    group_thousands, BatchSample, Parameter, Prediction, FAT_OPTIMAL, MICROBIAL_HIGH_RISK_ABOVE,
    MICROBIAL_OPTIMAL_BELOW, PH_OPTIMAL, SNF_OPTIMAL, TEMP_OPTIMAL,
};
use serde::Serialize;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FactorImpact {
    Positive,
    Negative,
    Neutral,
}

impl FactorImpact {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Positive => "Positive",
            Self::Negative => "Negative",
            Self::Neutral => "Neutral",
        }
    }
}

/// One factor's contribution to the verdict, in plain language.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExplanationItem {
    pub parameter: Parameter,
    pub factor: &'static str,
    pub impact: FactorImpact,
    pub message: String,
    /// 1 (minor) to 5 (critical).
    pub severity: u8,
}

impl ExplanationItem {
    fn new(
        parameter: Parameter,
        factor: &'static str,
        impact: FactorImpact,
        severity: u8,
        message: String,
    ) -> Self {
        Self {
            parameter,
            factor,
            impact,
            message,
            severity,
        }
    }
}

/// Explain the grade with exactly one item per factor, most severe first.
///
/// Ties keep the factor order fat, SNF, microbial, adulterant, temperature, pH.
pub fn explain(sample: &BatchSample, prediction: &Prediction) -> Vec<ExplanationItem> {
    let mut items = vec![
        explain_fat(sample.fat_content()),
        explain_snf(sample.snf()),
        explain_microbial(sample.microbial_load()),
        explain_adulterants(sample.adulterants_detected()),
        explain_temperature(sample.processing_temp()),
        explain_ph(sample.ph_level()),
    ];

    items.sort_by(|a, b| b.severity.cmp(&a.severity));

    debug!(
        grade = prediction.quality.label(),
        negative = items
            .iter()
            .filter(|item| item.impact == FactorImpact::Negative)
            .count(),
        "explained batch verdict"
    );

    items
}

fn explain_fat(fat: f64) -> ExplanationItem {
    let factor = "Fat Content";
    if FAT_OPTIMAL.contains(fat) {
        ExplanationItem::new(
            Parameter::FatContent,
            factor,
            FactorImpact::Positive,
            2,
            format!("Optimal fat content ({fat}%) contributes positively to quality. This falls within the ideal range for dairy products."),
        )
    } else if fat < FAT_OPTIMAL.min {
        ExplanationItem::new(
            Parameter::FatContent,
            factor,
            FactorImpact::Negative,
            1,
            format!("Low fat content ({fat}%) may indicate dilution or poor milk quality, negatively affecting the batch score."),
        )
    } else {
        ExplanationItem::new(
            Parameter::FatContent,
            factor,
            FactorImpact::Neutral,
            1,
            format!("Fat content ({fat}%) is above optimal range but still acceptable for processing."),
        )
    }
}

fn explain_snf(snf: f64) -> ExplanationItem {
    let factor = "Solids-Non-Fat (SNF)";
    if SNF_OPTIMAL.contains(snf) {
        ExplanationItem::new(
            Parameter::Snf,
            factor,
            FactorImpact::Positive,
            2,
            format!("Excellent SNF content ({snf}%) indicates high protein and lactose levels, enhancing nutritional quality."),
        )
    } else {
        ExplanationItem::new(
            Parameter::Snf,
            factor,
            FactorImpact::Neutral,
            1,
            format!("SNF content ({snf}%) is within acceptable range but not optimal for premium quality."),
        )
    }
}

fn explain_microbial(count: u32) -> ExplanationItem {
    let factor = "Microbial Load";
    let grouped = group_thousands(count);
    if count < MICROBIAL_OPTIMAL_BELOW {
        ExplanationItem::new(
            Parameter::MicrobialLoad,
            factor,
            FactorImpact::Positive,
            3,
            format!("Low microbial count ({grouped} CFU/ml) indicates excellent hygiene and safety standards."),
        )
    } else if count <= MICROBIAL_HIGH_RISK_ABOVE {
        ExplanationItem::new(
            Parameter::MicrobialLoad,
            factor,
            FactorImpact::Neutral,
            2,
            format!("Moderate microbial count ({grouped} CFU/ml) is acceptable but requires monitoring."),
        )
    } else {
        ExplanationItem::new(
            Parameter::MicrobialLoad,
            factor,
            FactorImpact::Negative,
            4,
            format!("High microbial count ({grouped} CFU/ml) poses significant quality and safety risks."),
        )
    }
}

fn explain_adulterants(detected: bool) -> ExplanationItem {
    if detected {
        ExplanationItem::new(
            Parameter::Adulterants,
            "Adulterants",
            FactorImpact::Negative,
            5,
            "Presence of adulterants severely compromises batch quality and safety. Immediate rejection recommended.".to_string(),
        )
    } else {
        ExplanationItem::new(
            Parameter::Adulterants,
            "Adulterant Testing",
            FactorImpact::Positive,
            3,
            "No adulterants detected, confirming milk purity and authenticity.".to_string(),
        )
    }
}

fn explain_temperature(temp: f64) -> ExplanationItem {
    let factor = "Processing Temperature";
    if TEMP_OPTIMAL.contains(temp) {
        ExplanationItem::new(
            Parameter::ProcessingTemp,
            factor,
            FactorImpact::Positive,
            2,
            format!("Optimal pasteurization temperature ({temp}°C) ensures pathogen destruction while preserving nutritional value."),
        )
    } else if temp < TEMP_OPTIMAL.min {
        ExplanationItem::new(
            Parameter::ProcessingTemp,
            factor,
            FactorImpact::Negative,
            3,
            format!("Low processing temperature ({temp}°C) may not effectively eliminate harmful microorganisms."),
        )
    } else {
        ExplanationItem::new(
            Parameter::ProcessingTemp,
            factor,
            FactorImpact::Negative,
            2,
            format!("High processing temperature ({temp}°C) may damage proteins and reduce nutritional quality."),
        )
    }
}

fn explain_ph(ph: f64) -> ExplanationItem {
    let factor = "pH Level";
    if PH_OPTIMAL.contains(ph) {
        ExplanationItem::new(
            Parameter::PhLevel,
            factor,
            FactorImpact::Positive,
            2,
            format!("Ideal pH level ({ph}) indicates fresh milk with optimal acidity balance."),
        )
    } else {
        ExplanationItem::new(
            Parameter::PhLevel,
            factor,
            FactorImpact::Neutral,
            1,
            format!("pH level ({ph}) is within acceptable range but may indicate slight quality deviation."),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quality::scoring::score;

    fn explain_sample(sample: &BatchSample) -> Vec<ExplanationItem> {
        explain(sample, &score(sample))
    }

    #[test]
    fn clean_batch_orders_by_severity_then_factor() {
        let sample = BatchSample::new(4.2, 8.8, 8_500, false, 78.5, 6.7).expect("valid");
        let items = explain_sample(&sample);

        let order: Vec<_> = items.iter().map(|item| item.parameter).collect();
        assert_eq!(
            order,
            vec![
                Parameter::MicrobialLoad,
                Parameter::Adulterants,
                Parameter::FatContent,
                Parameter::Snf,
                Parameter::ProcessingTemp,
                Parameter::PhLevel,
            ]
        );
        assert!(items.iter().all(|item| item.impact == FactorImpact::Positive));
        assert_eq!(
            items[0].message,
            "Low microbial count (8,500 CFU/ml) indicates excellent hygiene and safety standards."
        );
    }

    #[test]
    fn contaminated_batch_leads_with_adulterants() {
        let sample = BatchSample::new(3.2, 8.1, 85_000, true, 75.0, 6.4).expect("valid");
        let items = explain_sample(&sample);

        assert_eq!(items.len(), 6);
        assert_eq!(items[0].factor, "Adulterants");
        assert_eq!(items[0].severity, 5);
        assert_eq!(items[1].parameter, Parameter::MicrobialLoad);
        assert_eq!(items[1].impact, FactorImpact::Negative);

        let fat = items
            .iter()
            .find(|item| item.parameter == Parameter::FatContent)
            .expect("fat explained");
        assert_eq!(fat.impact, FactorImpact::Negative);
    }

    #[test]
    fn high_fat_is_neutral_and_hot_processing_is_negative() {
        let sample = BatchSample::new(4.9, 8.8, 20_000, false, 88.0, 6.7).expect("valid");
        let items = explain_sample(&sample);

        let fat = items
            .iter()
            .find(|item| item.parameter == Parameter::FatContent)
            .expect("fat explained");
        assert_eq!(fat.impact, FactorImpact::Neutral);

        let temp = items
            .iter()
            .find(|item| item.parameter == Parameter::ProcessingTemp)
            .expect("temperature explained");
        assert_eq!(temp.impact, FactorImpact::Negative);
        assert_eq!(temp.severity, 2);
        assert!(temp.message.starts_with("High processing temperature (88°C)"));
    }

    #[test]
    fn cold_processing_outranks_other_minor_factors() {
        let sample = BatchSample::new(4.2, 8.8, 30_000, false, 65.0, 6.7).expect("valid");
        let items = explain_sample(&sample);
        let severities: Vec<_> = items.iter().map(|item| item.severity).collect();
        assert_eq!(severities, vec![3, 3, 2, 2, 2, 2]);
        assert_eq!(items[0].parameter, Parameter::Adulterants);
        assert_eq!(items[1].parameter, Parameter::ProcessingTemp);
    }
}
