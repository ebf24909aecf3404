use super::LedgerError;
use crate::quality::extrapolation::SimulatedBatch;
use chrono::NaiveDate;
use serde::Serialize;
use std::io::Write;

#[derive(Serialize)]
struct SimulationRow<'a> {
    batch_id: String,
    name: String,
    date: String,
    fat_content: f64,
    snf: f64,
    microbial_load: u32,
    adulterants_detected: bool,
    processing_temp: f64,
    ph_level: f64,
    predicted_quality: &'a str,
    confidence: u8,
}

/// Write simulated batches in ledger layout plus `predicted_quality` and
/// `confidence` columns. The output loads back through [`super::BatchLedger`].
pub fn write_simulation_csv<W: Write>(
    writer: W,
    batches: &[SimulatedBatch],
    date: NaiveDate,
) -> Result<(), LedgerError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    let date = date.format("%Y-%m-%d").to_string();

    for batch in batches {
        csv_writer.serialize(SimulationRow {
            batch_id: format!("SIM-{:03}", batch.batch_number),
            name: format!("Simulated batch {}", batch.batch_number),
            date: date.clone(),
            fat_content: batch.sample.fat_content(),
            snf: batch.sample.snf(),
            microbial_load: batch.sample.microbial_load(),
            adulterants_detected: batch.sample.adulterants_detected(),
            processing_temp: batch.sample.processing_temp(),
            ph_level: batch.sample.ph_level(),
            predicted_quality: batch.prediction.quality.label(),
            confidence: batch.prediction.confidence,
        })?;
    }

    csv_writer.flush()?;
    Ok(())
}
