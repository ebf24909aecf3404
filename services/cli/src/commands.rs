use crate::render::{render_analysis, render_comparison, render_simulation};
use chrono::{Local, Utc};
use clap::Args;
use dairy_qa::config::AppConfig;
use dairy_qa::error::AppError;
use dairy_qa::quality::{
    compare_batches, simulate, write_simulation_csv, AnalysisEngine, BatchLedger, BatchReport,
    BatchVolume, RawBatchInput, SimulationRequest, VariabilityTier,
};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Args, Debug)]
pub(crate) struct AnalyzeArgs {
    /// Fat content (%)
    #[arg(long)]
    pub(crate) fat: String,
    /// Solids-not-fat (%)
    #[arg(long)]
    pub(crate) snf: String,
    /// Microbial load (CFU/ml)
    #[arg(long)]
    pub(crate) microbial: String,
    /// Adulterants were detected in the batch
    #[arg(long)]
    pub(crate) adulterants: bool,
    /// Processing temperature (°C)
    #[arg(long)]
    pub(crate) temp: String,
    /// pH level
    #[arg(long)]
    pub(crate) ph: String,
    /// Batch volume in liters for impact estimates (defaults to DAIRY_BATCH_VOLUME)
    #[arg(long)]
    pub(crate) batch_volume: Option<f64>,
    /// Reject readings outside the instrument-validated ranges
    #[arg(long)]
    pub(crate) strict: bool,
    /// Write the JSON report to this file
    #[arg(long, conflicts_with = "export_dir")]
    pub(crate) export: Option<PathBuf>,
    /// Write the JSON report into this directory as batch_prediction_<date>.json
    #[arg(long)]
    pub(crate) export_dir: Option<PathBuf>,
    /// Print the JSON report instead of the text summary
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct SimulateArgs {
    /// Number of batches to synthesize, 1-50 (defaults to DAIRY_SIM_COUNT)
    #[arg(long)]
    pub(crate) count: Option<u32>,
    /// Baseline fat content, 3.0-5.5 (defaults to DAIRY_SIM_BASELINE_FAT)
    #[arg(long)]
    pub(crate) baseline_fat: Option<f64>,
    /// low, medium or high (defaults to DAIRY_SIM_VARIABILITY)
    #[arg(long, value_parser = parse_variability)]
    pub(crate) variability: Option<VariabilityTier>,
    /// Seed for a reproducible run
    #[arg(long)]
    pub(crate) seed: Option<u64>,
    /// Also write the simulated batches to this CSV file
    #[arg(long)]
    pub(crate) csv: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub(crate) struct CompareArgs {
    /// Batch ledger CSV
    #[arg(long)]
    pub(crate) ledger: PathBuf,
    /// Batch id to compare; repeat for up to three batches
    #[arg(long, required = true)]
    pub(crate) batch: Vec<String>,
}

pub(crate) fn run_analyze(args: AnalyzeArgs, config: &AppConfig) -> Result<(), AppError> {
    let AnalyzeArgs {
        fat,
        snf,
        microbial,
        adulterants,
        temp,
        ph,
        batch_volume,
        strict,
        export,
        export_dir,
        json,
    } = args;

    let raw = RawBatchInput {
        fat_content: fat,
        snf,
        microbial_load: microbial,
        adulterants_detected: adulterants,
        processing_temp: temp,
        ph_level: ph,
    };
    let sample = if strict {
        raw.parse_strict()?
    } else {
        raw.parse()?
    };

    let batch_volume = match batch_volume {
        Some(liters) => BatchVolume::new(liters)?,
        None => config.analysis.batch_volume,
    };

    let analysis = AnalysisEngine::new(batch_volume).analyze(&sample);
    let report = BatchReport::new(analysis, Utc::now());

    if json {
        println!("{}", report.to_json_pretty()?);
    } else {
        render_analysis(&report.analysis);
    }

    let export_path = match (export, export_dir) {
        (Some(path), _) => Some(path),
        (None, Some(directory)) => {
            fs::create_dir_all(&directory)?;
            Some(report.path_in(&directory))
        }
        (None, None) => None,
    };
    if let Some(path) = export_path {
        fs::write(&path, report.to_json_pretty()?)?;
        announce_export(OutputFormat::from_json_flag(json), &path);
    }

    info!(
        grade = report.analysis.prediction.quality.label(),
        confidence = report.analysis.prediction.confidence,
        "batch analysis complete"
    );
    Ok(())
}

pub(crate) fn run_simulate(args: SimulateArgs, config: &AppConfig) -> Result<(), AppError> {
    let defaults = config.simulation.defaults;
    let request = SimulationRequest::new(
        args.count.unwrap_or_else(|| u32::from(defaults.count())),
        args.baseline_fat.unwrap_or_else(|| defaults.baseline_fat()),
        args.variability.unwrap_or_else(|| defaults.variability()),
    )?;

    let mut rng = match args.seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    };
    let outcome = simulate(&request, &mut rng);
    render_simulation(&outcome);

    if let Some(path) = args.csv {
        let file = File::create(&path)?;
        write_simulation_csv(file, &outcome.batches, Local::now().date_naive())?;
        println!("\nSimulated batches written to {}", path.display());
    }

    info!(
        count = outcome.batches.len(),
        seed = args.seed,
        "batch simulation complete"
    );
    Ok(())
}

pub(crate) fn run_compare(args: CompareArgs) -> Result<(), AppError> {
    let ledger = BatchLedger::from_path(&args.ledger)?;
    let selected = ledger.select(&args.batch)?;
    let comparison = compare_batches(&selected)?;
    render_comparison(&comparison);

    info!(batches = comparison.batches.len(), "batch comparison complete");
    Ok(())
}

/// Shape of what `analyze` prints on stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    Text,
    Json,
}

/// Where side notices go; JSON stdout must stay a single document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NoticeStream {
    Stdout,
    Stderr,
}

impl OutputFormat {
    fn from_json_flag(json: bool) -> Self {
        if json {
            Self::Json
        } else {
            Self::Text
        }
    }

    fn notice_stream(self) -> NoticeStream {
        match self {
            Self::Text => NoticeStream::Stdout,
            Self::Json => NoticeStream::Stderr,
        }
    }
}

fn export_notice(path: &Path) -> String {
    format!("Report exported to {}", path.display())
}

fn announce_export(format: OutputFormat, path: &Path) {
    let notice = export_notice(path);
    match format.notice_stream() {
        NoticeStream::Stdout => println!("\n{notice}"),
        NoticeStream::Stderr => eprintln!("{notice}"),
    }
}

fn parse_variability(raw: &str) -> Result<VariabilityTier, String> {
    raw.parse::<VariabilityTier>().map_err(|err| err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_output_sends_export_notice_to_stderr() {
        assert_eq!(
            OutputFormat::from_json_flag(true).notice_stream(),
            NoticeStream::Stderr
        );
        assert_eq!(
            OutputFormat::from_json_flag(false).notice_stream(),
            NoticeStream::Stdout
        );
    }

    #[test]
    fn export_notice_names_the_written_file() {
        let notice = export_notice(Path::new("out/batch_prediction_2025-01-10.json"));
        assert_eq!(
            notice,
            "Report exported to out/batch_prediction_2025-01-10.json"
        );
    }

    #[test]
    fn parses_variability_case_insensitively() {
        assert_eq!(parse_variability("High"), Ok(VariabilityTier::High));
        assert!(parse_variability("extreme").is_err());
    }
}
