use crate::commands::{
    run_analyze, run_compare, run_simulate, AnalyzeArgs, CompareArgs, SimulateArgs,
};
use clap::{Parser, Subcommand};
use dairy_qa::config::AppConfig;
use dairy_qa::error::AppError;
use dairy_qa::telemetry;
use tracing::info;

#[derive(Parser, Debug)]
#[command(
    name = "dairy-qa",
    about = "Grade dairy production batches and explain the verdict",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Grade one batch and print every derived view
    Analyze(AnalyzeArgs),
    /// Extrapolate synthetic batches around a baseline fat content
    Simulate(SimulateArgs),
    /// Compare up to three batches from a ledger CSV side by side
    Compare(CompareArgs),
}

pub(crate) fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;
    info!(?config.environment, "dairy-qa starting");

    match cli.command {
        Command::Analyze(args) => run_analyze(args, &config),
        Command::Simulate(args) => run_simulate(args, &config),
        Command::Compare(args) => run_compare(args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn command_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_analyze_flags() {
        let cli = Cli::try_parse_from([
            "dairy-qa",
            "analyze",
            "--fat",
            "4.2",
            "--snf",
            "8.8",
            "--microbial",
            "8500",
            "--temp",
            "78.5",
            "--ph",
            "6.7",
            "--adulterants",
            "--strict",
        ])
        .expect("analyze parses");

        match cli.command {
            Command::Analyze(args) => {
                assert_eq!(args.fat, "4.2");
                assert!(args.adulterants);
                assert!(args.strict);
                assert_eq!(args.batch_volume, None);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn export_targets_are_mutually_exclusive() {
        let result = Cli::try_parse_from([
            "dairy-qa", "analyze", "--fat", "4.2", "--snf", "8.8", "--microbial", "8500",
            "--temp", "78.5", "--ph", "6.7", "--export", "a.json", "--export-dir", "out",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn parses_simulate_and_compare() {
        let cli = Cli::try_parse_from([
            "dairy-qa",
            "simulate",
            "--count",
            "5",
            "--variability",
            "HIGH",
            "--seed",
            "7",
        ])
        .expect("simulate parses");
        assert!(matches!(cli.command, Command::Simulate(_)));

        let cli = Cli::try_parse_from([
            "dairy-qa", "compare", "--ledger", "ledger.csv", "--batch", "B001", "--batch",
            "B003",
        ])
        .expect("compare parses");
        match cli.command {
            Command::Compare(args) => assert_eq!(args.batch, vec!["B001", "B003"]),
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
