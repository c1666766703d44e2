//! Workout CLI - Command-line interface for Synheart Workout
//!
//! Commands:
//! - summarize: Summarize workout records from a file or stdin (batch mode)
//! - demo: Summarize the built-in sample packages
//! - activities: List supported workout codes and their parameters

use clap::{Parser, Subcommand, ValueEnum};
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

use synheart_workout::input::InputFormat;
use synheart_workout::pipeline::{demo_packages, workout_message, WorkoutProcessor};
use synheart_workout::registry::supported_activities;
use synheart_workout::types::{BatchReport, RecordError};
use synheart_workout::{InputConfig, WorkoutError, PRODUCER_NAME, WORKOUT_VERSION};

/// Workout - Distance, speed and calorie summaries for training records
#[derive(Parser)]
#[command(name = "workout")]
#[command(author = "Synheart AI Inc")]
#[command(version = WORKOUT_VERSION)]
#[command(about = "Summarize workout readings", long_about = None)]
struct Cli {
    /// Log level filter (overrides RUST_LOG)
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Log output format
    #[arg(long, global = true, default_value = "compact")]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Summarize workout records (batch mode)
    Summarize {
        /// Input file path (use - for stdin)
        #[arg(short, long, default_value = "-")]
        input: PathBuf,

        /// Output file path (use - for stdout)
        #[arg(short, long, default_value = "-")]
        output: PathBuf,

        /// Input format
        #[arg(long, default_value = "csv")]
        input_format: InputFormatArg,

        /// Output format
        #[arg(long, default_value = "text")]
        output_format: OutputFormat,

        /// Load input settings from a JSON file
        #[arg(long)]
        config: Option<PathBuf>,

        /// Field delimiter for csv input
        #[arg(long)]
        delimiter: Option<char>,

        /// Skip the first record line as a header
        #[arg(long)]
        header: bool,

        /// Exit with failure if any record was skipped
        #[arg(long)]
        strict: bool,
    },

    /// Summarize the built-in sample packages
    Demo,

    /// List supported workout codes
    Activities {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Clone, ValueEnum)]
enum InputFormatArg {
    /// Delimited rows: CODE,v1,v2,...
    Csv,
    /// Newline-delimited JSON packages
    Ndjson,
}

impl From<InputFormatArg> for InputFormat {
    fn from(arg: InputFormatArg) -> Self {
        match arg {
            InputFormatArg::Csv => InputFormat::Csv,
            InputFormatArg::Ndjson => InputFormat::Ndjson,
        }
    }
}

#[derive(Clone, ValueEnum)]
enum OutputFormat {
    /// One summary message per line
    Text,
    /// One summary record per line
    Ndjson,
    /// Full batch report as JSON
    Json,
    /// Pretty-printed batch report
    JsonPretty,
}

#[derive(Clone, ValueEnum)]
enum LogFormat {
    Pretty,
    Compact,
    Json,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.log_level.as_deref(), &cli.log_format);

    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!(
                "{}",
                serde_json::to_string(&CliError::from(e))
                    .unwrap_or_else(|_| "Unknown error".to_string())
            );
            ExitCode::FAILURE
        }
    }
}

/// Install the stderr subscriber; `--log-level` wins over RUST_LOG
fn init_logging(level: Option<&str>, format: &LogFormat) {
    let filter = match level {
        Some(level) => EnvFilter::new(level),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false);

    let result = match format {
        LogFormat::Pretty => builder.pretty().try_init(),
        LogFormat::Compact => builder.compact().try_init(),
        LogFormat::Json => builder.json().try_init(),
    };

    if let Err(e) = result {
        eprintln!("failed to initialize logging: {e}");
    }
}

fn run(command: Commands) -> Result<(), WorkoutCliError> {
    match command {
        Commands::Summarize {
            input,
            output,
            input_format,
            output_format,
            config,
            delimiter,
            header,
            strict,
        } => {
            let config = load_config(config.as_deref(), delimiter, header)?;
            cmd_summarize(&input, &output, input_format.into(), output_format, config, strict)
        }

        Commands::Demo => cmd_demo(),

        Commands::Activities { json } => cmd_activities(json),
    }
}

fn load_config(
    path: Option<&Path>,
    delimiter: Option<char>,
    header: bool,
) -> Result<InputConfig, WorkoutCliError> {
    let mut config = match path {
        Some(path) => InputConfig::from_json(&fs::read_to_string(path)?)?,
        None => InputConfig::default(),
    };

    if let Some(delimiter) = delimiter {
        config.delimiter = delimiter;
    }
    if header {
        config.has_header = true;
    }
    config.validate()?;

    debug!(?config, "input configuration");
    Ok(config)
}

fn cmd_summarize(
    input: &Path,
    output: &Path,
    input_format: InputFormat,
    output_format: OutputFormat,
    config: InputConfig,
    strict: bool,
) -> Result<(), WorkoutCliError> {
    let input_data = if is_std_stream(input) {
        if atty::is(atty::Stream::Stdin) {
            warn!("reading records from an interactive terminal; end input with Ctrl-D");
        }
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        buffer
    } else {
        fs::read_to_string(input)?
    };

    let mut processor = WorkoutProcessor::with_config(config);
    let report = processor.process_text(&input_data, input_format);

    if report.total_records == 0 {
        return Err(WorkoutCliError::NoRecords);
    }

    for error in &report.errors {
        eprintln!(
            "{}",
            serde_json::to_string(&CliError::from_record(error))
                .unwrap_or_else(|_| error.message.clone())
        );
    }

    let output_data = format_output(&report, &output_format)?;
    if is_std_stream(output) {
        print!("{}", output_data);
    } else {
        fs::write(output, output_data)?;
    }

    if strict && report.has_errors() {
        Err(WorkoutCliError::RecordsFailed(report.errors.len()))
    } else {
        Ok(())
    }
}

fn cmd_demo() -> Result<(), WorkoutCliError> {
    for (code, data) in demo_packages() {
        println!("{}", workout_message(code, &data)?);
    }
    Ok(())
}

fn cmd_activities(json: bool) -> Result<(), WorkoutCliError> {
    let activities: Vec<ActivityInfo> = supported_activities()
        .into_iter()
        .map(|entry| ActivityInfo {
            code: entry.code,
            name: entry.kind.display_name(),
            parameters: entry.parameters.to_vec(),
        })
        .collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&activities)?);
    } else {
        println!("{} {}", PRODUCER_NAME, WORKOUT_VERSION);
        println!();
        for activity in &activities {
            println!(
                "  {}  {:<14} {}",
                activity.code,
                activity.name,
                activity.parameters.join(", ")
            );
        }
    }

    Ok(())
}

// Helper functions

fn is_std_stream(path: &Path) -> bool {
    path.to_string_lossy() == "-"
}

fn format_output(report: &BatchReport, format: &OutputFormat) -> Result<String, WorkoutCliError> {
    match format {
        OutputFormat::Text => Ok(report
            .summaries
            .iter()
            .map(|s| s.summary.message() + "\n")
            .collect()),
        OutputFormat::Ndjson => {
            let mut lines: Vec<String> = Vec::new();
            for line_summary in &report.summaries {
                lines.push(serde_json::to_string(&line_summary.summary)?);
            }
            Ok(lines.join("\n") + "\n")
        }
        OutputFormat::Json => Ok(serde_json::to_string(report)? + "\n"),
        OutputFormat::JsonPretty => Ok(serde_json::to_string_pretty(report)? + "\n"),
    }
}

// Error types

#[derive(Debug)]
enum WorkoutCliError {
    Io(io::Error),
    Workout(WorkoutError),
    Json(serde_json::Error),
    NoRecords,
    RecordsFailed(usize),
}

impl From<io::Error> for WorkoutCliError {
    fn from(e: io::Error) -> Self {
        WorkoutCliError::Io(e)
    }
}

impl From<WorkoutError> for WorkoutCliError {
    fn from(e: WorkoutError) -> Self {
        WorkoutCliError::Workout(e)
    }
}

impl From<serde_json::Error> for WorkoutCliError {
    fn from(e: serde_json::Error) -> Self {
        WorkoutCliError::Json(e)
    }
}

#[derive(serde::Serialize)]
struct CliError {
    code: String,
    message: String,
    hint: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    line: Option<usize>,
}

impl CliError {
    fn from_record(error: &RecordError) -> Self {
        CliError {
            code: "RECORD_SKIPPED".to_string(),
            message: error.message.clone(),
            hint: Some("Check the workout code and the number of values".to_string()),
            line: Some(error.line),
        }
    }
}

impl From<WorkoutCliError> for CliError {
    fn from(e: WorkoutCliError) -> Self {
        match e {
            WorkoutCliError::Io(e) => CliError {
                code: "IO_ERROR".to_string(),
                message: e.to_string(),
                hint: Some("Check file paths and permissions".to_string()),
                line: None,
            },
            WorkoutCliError::Workout(e) => CliError {
                code: "WORKOUT_ERROR".to_string(),
                message: e.to_string(),
                hint: Some("Run 'workout activities' for supported codes".to_string()),
                line: None,
            },
            WorkoutCliError::Json(e) => CliError {
                code: "JSON_ERROR".to_string(),
                message: e.to_string(),
                hint: Some("Check JSON syntax".to_string()),
                line: None,
            },
            WorkoutCliError::NoRecords => CliError {
                code: "NO_RECORDS".to_string(),
                message: "No workout records found in input".to_string(),
                hint: Some("Ensure input file is not empty".to_string()),
                line: None,
            },
            WorkoutCliError::RecordsFailed(count) => CliError {
                code: "RECORDS_FAILED".to_string(),
                message: format!("{} records were skipped", count),
                hint: Some("Fix the reported records and retry".to_string()),
                line: None,
            },
        }
    }
}

// Report types

#[derive(serde::Serialize)]
struct ActivityInfo {
    code: &'static str,
    name: &'static str,
    parameters: Vec<&'static str>,
}
