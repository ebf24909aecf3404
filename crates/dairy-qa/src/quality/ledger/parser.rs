use super::{LedgerBatch, LedgerError};
use crate::quality::intake::RawBatchInput;
use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};
use std::io::Read;

pub(crate) fn parse_batches<R: Read>(reader: R) -> Result<Vec<LedgerBatch>, LedgerError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut batches = Vec::new();

    for record in csv_reader.deserialize::<LedgerRow>() {
        let row = record?;
        batches.push(row.into_batch()?);
    }

    Ok(batches)
}

#[derive(Debug, Deserialize)]
struct LedgerRow {
    batch_id: String,
    #[serde(default)]
    name: String,
    #[serde(deserialize_with = "deserialize_date")]
    date: NaiveDate,
    fat_content: String,
    snf: String,
    microbial_load: String,
    #[serde(default)]
    adulterants_detected: String,
    processing_temp: String,
    ph_level: String,
}

impl LedgerRow {
    fn into_batch(self) -> Result<LedgerBatch, LedgerError> {
        let adulterants_detected =
            parse_flag(&self.adulterants_detected).ok_or_else(|| LedgerError::InvalidFlag {
                batch_id: self.batch_id.clone(),
                raw: self.adulterants_detected.clone(),
            })?;

        let raw = RawBatchInput {
            fat_content: self.fat_content,
            snf: self.snf,
            microbial_load: self.microbial_load,
            adulterants_detected,
            processing_temp: self.processing_temp,
            ph_level: self.ph_level,
        };
        let sample = raw.parse().map_err(|source| LedgerError::InvalidRow {
            batch_id: self.batch_id.clone(),
            source,
        })?;

        let name = if self.name.is_empty() {
            self.batch_id.clone()
        } else {
            self.name
        };

        Ok(LedgerBatch {
            batch_id: self.batch_id,
            name,
            date: self.date,
            sample,
        })
    }
}

/// Empty cells count as "not detected".
fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "" | "false" | "no" | "0" => Some(false),
        "true" | "yes" | "1" => Some(true),
        _ => None,
    }
}

fn deserialize_date<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").map_err(|err| {
        serde::de::Error::custom(format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_accept_common_spellings() {
        for raw in ["true", "TRUE", "yes", "1"] {
            assert_eq!(parse_flag(raw), Some(true), "{raw}");
        }
        for raw in ["", "false", "No", "0"] {
            assert_eq!(parse_flag(raw), Some(false), "{raw}");
        }
        assert_eq!(parse_flag("maybe"), None);
    }
}
