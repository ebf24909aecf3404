use super::analysis::BatchAnalysis;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Exportable snapshot of one analysis, stamped with its generation time.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchReport {
    #[serde(rename = "timestamp")]
    pub generated_at: DateTime<Utc>,
    #[serde(flatten)]
    pub analysis: BatchAnalysis,
}

impl BatchReport {
    pub fn new(analysis: BatchAnalysis, generated_at: DateTime<Utc>) -> Self {
        Self {
            generated_at,
            analysis,
        }
    }

    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// `batch_prediction_<YYYY-MM-DD>.json`, dated by generation day (UTC).
    pub fn file_name(&self) -> String {
        format!(
            "batch_prediction_{}.json",
            self.generated_at.date_naive().format("%Y-%m-%d")
        )
    }

    pub fn path_in(&self, directory: &Path) -> PathBuf {
        directory.join(self.file_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quality::analysis::analyze;
    use crate::quality::domain::BatchSample;
    use crate::quality::impact::BatchVolume;
    use chrono::TimeZone;

    fn report() -> BatchReport {
        let sample = BatchSample::new(4.2, 8.8, 8_500, false, 78.5, 6.7).expect("valid sample");
        let generated_at = Utc
            .with_ymd_and_hms(2025, 1, 10, 23, 59, 0)
            .single()
            .expect("unambiguous timestamp");
        BatchReport::new(analyze(&sample, BatchVolume::default()), generated_at)
    }

    #[test]
    fn names_file_by_generation_day() {
        let report = report();
        assert_eq!(report.file_name(), "batch_prediction_2025-01-10.json");
        assert_eq!(
            report.path_in(Path::new("exports")),
            PathBuf::from("exports/batch_prediction_2025-01-10.json")
        );
    }

    #[test]
    fn json_carries_timestamp_inputs_and_prediction() {
        let json = report().to_json_pretty().expect("serializes");
        let value: serde_json::Value = serde_json::from_str(&json).expect("valid json");

        assert_eq!(value["timestamp"], "2025-01-10T23:59:00Z");
        assert_eq!(value["inputs"]["fat_content"], 4.2);
        assert_eq!(value["prediction"]["quality"], "good");
        assert_eq!(value["prediction"]["confidence"], 95);
        assert_eq!(value["explanations"].as_array().map(Vec::len), Some(6));
    }
}
