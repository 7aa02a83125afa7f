mod logging;
mod run;
mod settings;
mod vars;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use rjg_core::TemplateError;
use rjg_generate::GenerationError;
use thiserror::Error;

use logging::init_logging;
use run::{RunOptions, execute};
use settings::load_settings;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid settings file: {0}")]
    Settings(#[from] toml::de::Error),
    #[error("invalid template: {0}")]
    Template(#[from] TemplateError),
    #[error("generation failed: {0}")]
    Generation(#[from] GenerationError),
    #[error("invalid variable argument: {0}")]
    InvalidVariable(String),
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("logging error: {0}")]
    Logging(String),
}

#[derive(Parser, Debug)]
#[command(
    name = "rjg",
    version,
    about = "Generate JSON values from a template",
    long_about = "Generate structured JSON values from a JSON template containing prefixed directives and user variables."
)]
pub struct Cli {
    /// JSON template.
    #[arg(value_name = "TEMPLATE")]
    template: String,
    /// Number of JSON values to generate.
    #[arg(short, long)]
    count: Option<u64>,
    /// User variables as NAME=VALUE; repeatable, comma-separated pairs allowed.
    #[arg(short = 'v', long = "var", value_name = "NAME=VALUE")]
    vars: Vec<String>,
    /// JSON-lines output file.
    #[arg(short, long)]
    out: Option<PathBuf>,
    /// Do not echo generated values to stdout.
    #[arg(long, default_value_t = false)]
    no_stdout: bool,
    /// Pretty-print values echoed to stdout.
    #[arg(long, default_value_t = false)]
    pretty: bool,
    /// Seed for reproducible output.
    #[arg(long)]
    seed: Option<u64>,
    /// Marker for directives and variables.
    #[arg(long)]
    prefix: Option<String>,
    /// Settings file (defaults to rjg.toml when present).
    #[arg(long)]
    config: Option<PathBuf>,
    /// Append JSON logs to this file.
    #[arg(long)]
    log_file: Option<PathBuf>,
    /// Write the generation report to this file.
    #[arg(long)]
    report: Option<PathBuf>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run_cli(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run_cli(cli: Cli) -> Result<(), CliError> {
    init_logging(cli.log_file.as_deref())?;
    let settings = load_settings(cli.config.as_deref())?;
    let options = RunOptions::resolve(cli, settings)?;
    let stdout = std::io::stdout();
    execute(&options, &mut stdout.lock())?;
    Ok(())
}
