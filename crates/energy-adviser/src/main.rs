//! energy-adviser - Energy consumption diagnostics

mod cli;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use energy_adviser_core::{AdviserConfig, CoreError, Reading, Thresholds};
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

use cli::AnalysisOutput;

#[derive(Parser)]
#[command(
    name = "energy-adviser",
    version,
    about = "Energy consumption diagnostics and recommendations",
    long_about = "Analyzes a time-stamped energy consumption series and reports summary\n\
                  statistics, unusual readings, peak hours, night (idle) consumption,\n\
                  the consumption trend and prioritized recommendations.\n\
                  \n\
                  Input is a JSON array of readings, or an object with a \"data\" array:\n\
                    [{\"timestamp\": \"2024-01-01T02:00:00Z\", \"consumption\": 5.0}, ...]\n\
                  Values may also be given as \"value\", timestamps as \"date\".\n\
                  \n\
                  Examples:\n\
                    energy-adviser analyze readings.json           # Full report\n\
                    energy-adviser anomalies readings.json --json  # Outliers as JSON\n\
                    cat readings.json | energy-adviser peak-hours  # Read from stdin\n\
                  \n\
                  Environment Variables:\n\
                    ENERGY_ADVISER_CONFIG            # Thresholds config file (TOML)\n\
                    ENERGY_ADVISER_FORMAT            # Force output format: json|table\n\
                    ENERGY_ADVISER_NO_COLOR          # Disable ANSI colors (log-friendly)\n\
                    RUST_LOG                         # Log filter (default: warn)"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Thresholds config file (default: <config dir>/energy-adviser/config.toml)
    #[arg(long, global = true, env = "ENERGY_ADVISER_CONFIG")]
    config: Option<PathBuf>,

    /// Output format (json|table)
    #[arg(long, global = true, env = "ENERGY_ADVISER_FORMAT", value_parser = ["json", "table"])]
    format: Option<String>,

    /// Output as JSON (same as --format json)
    #[arg(long, global = true)]
    json: bool,

    /// Disable ANSI colors (log-friendly)
    #[arg(long, global = true, env = "ENERGY_ADVISER_NO_COLOR")]
    no_color: bool,
}

impl Cli {
    fn json_output(&self) -> bool {
        self.json || self.format.as_deref() == Some("json")
    }
}

#[derive(Args)]
struct InputArgs {
    /// Readings file (JSON). Omit or use '-' for stdin
    input: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Command {
    /// Full report: every analysis plus recommendations
    Analyze(InputArgs),
    /// Summary statistics
    Summary(InputArgs),
    /// Unusual readings (z-score outliers)
    Anomalies(InputArgs),
    /// Peak consumption window and hourly profile
    PeakHours(InputArgs),
    /// Night / day / evening split and idle consumption
    NightConsumption(InputArgs),
    /// First half vs second half trend
    Trends(InputArgs),
}

impl Command {
    fn input(&self) -> Option<&Path> {
        let args = match self {
            Command::Analyze(args)
            | Command::Summary(args)
            | Command::Anomalies(args)
            | Command::PeakHours(args)
            | Command::NightConsumption(args)
            | Command::Trends(args) => args,
        };
        args.input.as_deref().filter(|p| *p != Path::new("-"))
    }

    fn run(&self, readings: &[Reading], thresholds: &Thresholds) -> AnalysisOutput {
        use energy_adviser_core::analytics::*;

        match self {
            Command::Analyze(_) => {
                AnalysisOutput::Report(AnalysisReport::compute_with(readings, thresholds))
            }
            Command::Summary(_) => AnalysisOutput::Summary(calculate_summary(readings)),
            Command::Anomalies(_) => {
                AnalysisOutput::Anomalies(detect_outliers_with(readings, thresholds))
            }
            Command::PeakHours(_) => AnalysisOutput::PeakHours(analyze_peak_hours(readings)),
            Command::NightConsumption(_) => AnalysisOutput::NightConsumption(
                analyze_night_consumption_with(readings, thresholds),
            ),
            Command::Trends(_) => {
                AnalysisOutput::Trends(calculate_trends_with(readings, thresholds))
            }
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.no_color);

    let json = cli.json_output();

    let config = match &cli.config {
        Some(path) => AdviserConfig::load(path),
        None => AdviserConfig::load_default(),
    }
    .map_err(with_suggestion)
    .context("Failed to load configuration")?;

    let readings = match load_input(cli.command.input()) {
        Ok(readings) => readings,
        Err(e) if json => {
            println!("{}", cli::error_envelope(&e));
            std::process::exit(1);
        }
        Err(e) => return Err(with_suggestion(e)).context("Failed to load readings"),
    };

    tracing::debug!(readings = readings.len(), "Readings loaded");

    let output = cli.command.run(&readings, &config.thresholds);
    if json {
        let envelope = serde_json::to_string_pretty(&output.to_envelope())
            .context("Failed to serialize output")?;
        println!("{}", envelope);
    } else {
        println!("{}", output.to_table(cli.no_color));
    }

    Ok(())
}

/// Logs go to stderr so JSON on stdout stays parseable
fn init_tracing(no_color: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(!no_color)
        .with_target(false)
        .init();
}

fn load_input(input: Option<&Path>) -> Result<Vec<Reading>, CoreError> {
    match input {
        Some(path) => energy_adviser_core::load_readings(path),
        None => {
            let stdin = Path::new("<stdin>");
            let mut content = String::new();
            std::io::stdin()
                .read_to_string(&mut content)
                .map_err(|e| CoreError::FileRead {
                    path: stdin.to_path_buf(),
                    source: e,
                })?;
            energy_adviser_core::parse_readings(&content, stdin)
        }
    }
}

fn with_suggestion(err: CoreError) -> anyhow::Error {
    if let Some(hint) = err.suggestion() {
        eprintln!("hint: {}", hint);
    }
    anyhow::Error::new(err)
}
