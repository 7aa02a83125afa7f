use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Instant;

use chrono::Utc;
use rjg_core::{Prefix, VariableStore};
use rjg_generate::output::JsonlWriter;
use rjg_generate::{GenerationReport, RandomSource, TemplateEngine, seeded_rng};
use serde_json::Value;
use tracing::{debug, error, info};
use uuid::Uuid;

use crate::settings::Settings;
use crate::vars::parse_var_args;
use crate::{Cli, CliError};

pub const DEFAULT_OUTPUT_FILE: &str = "commands.jsonl";

/// Fully resolved options for one generation run.
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub template: String,
    pub count: u64,
    pub variables: Vec<(String, String)>,
    pub prefix: Prefix,
    pub out: PathBuf,
    pub stdout: bool,
    pub pretty: bool,
    pub seed: Option<u64>,
    pub report: Option<PathBuf>,
}

impl RunOptions {
    /// Merge command-line arguments over file settings.
    pub fn resolve(cli: Cli, settings: Settings) -> Result<Self, CliError> {
        let prefix = match cli.prefix.or(settings.prefix) {
            Some(raw) => Prefix::new(raw)?,
            None => Prefix::default(),
        };
        Ok(Self {
            count: cli.count.or(settings.count).unwrap_or(1),
            variables: parse_var_args(&cli.vars)?,
            prefix,
            out: cli
                .out
                .or(settings.out)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_FILE)),
            stdout: !cli.no_stdout && settings.stdout.unwrap_or(true),
            pretty: cli.pretty || settings.pretty.unwrap_or(false),
            seed: cli.seed.or(settings.seed),
            report: cli.report,
            template: cli.template,
        })
    }
}

/// Generate `options.count` values, writing each to the output file and,
/// unless disabled, echoing it to `stdout`.
///
/// Stops at the first failing iteration; values already written stay in the
/// output file.
pub fn execute<W: Write>(
    options: &RunOptions,
    stdout: &mut W,
) -> Result<GenerationReport, CliError> {
    let run_id = Uuid::new_v4().to_string();
    let started_at = Utc::now();
    info!(
        event = "run_started",
        run_id = %run_id,
        started_at = %started_at.to_rfc3339(),
        count = options.count,
        seed = ?options.seed,
        out = %options.out.display()
    );

    let timer = Instant::now();
    let result = generate(options, &run_id, stdout);
    let duration_ms = timer.elapsed().as_millis() as u64;

    match result {
        Ok(mut report) => {
            report.duration_ms = duration_ms;
            if let Some(path) = &options.report {
                write_report(path, &report)?;
            }
            info!(
                event = "run_finished",
                run_id = %run_id,
                iterations = report.iterations,
                bytes_written = report.bytes_written,
                duration_ms
            );
            Ok(report)
        }
        Err(err) => {
            error!(event = "run_failed", run_id = %run_id, error = %err, duration_ms);
            Err(err)
        }
    }
}

fn generate<W: Write>(
    options: &RunOptions,
    run_id: &str,
    stdout: &mut W,
) -> Result<GenerationReport, CliError> {
    let template: Value = serde_json::from_str(&options.template)?;
    let variables = VariableStore::from_raw(
        options
            .variables
            .iter()
            .map(|(name, raw)| (name.as_str(), raw.as_str())),
        options.prefix.clone(),
    )?;
    info!(
        event = "variables_loaded",
        count = variables.len(),
        names = ?variables.names().collect::<Vec<_>>()
    );
    let engine = TemplateEngine::from_json(&template, variables)?;

    let mut rng: Box<dyn RandomSource> = match options.seed {
        Some(seed) => Box::new(seeded_rng(seed)),
        None => Box::new(rand::rng()),
    };

    let mut writer = JsonlWriter::create(&options.out)?;
    let mut report = GenerationReport::new(run_id.to_string());
    for iteration in 0..options.count {
        let value = engine.generate_recorded(iteration, rng.as_mut(), &mut report)?;
        writer.write_value(&value)?;
        if options.stdout {
            if options.pretty {
                serde_json::to_writer_pretty(&mut *stdout, &value)?;
            } else {
                serde_json::to_writer(&mut *stdout, &value)?;
            }
            stdout.write_all(b"\n")?;
        }
        debug!(event = "iteration_generated", iteration);
    }
    report.bytes_written = writer.finish()?;
    stdout.flush()?;
    Ok(report)
}

fn write_report(path: &Path, report: &GenerationReport) -> Result<(), CliError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let data = serde_json::to_vec_pretty(report)?;
    std::fs::write(path, data)?;
    info!(event = "report_written", path = %path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    fn options(dir: &Path, template: &str) -> RunOptions {
        RunOptions {
            template: template.to_string(),
            count: 3,
            variables: Vec::new(),
            prefix: Prefix::default(),
            out: dir.join("out.jsonl"),
            stdout: true,
            pretty: false,
            seed: Some(7),
            report: None,
        }
    }

    fn parse_cli(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("rjg").chain(args.iter().copied()))
            .expect("parse args")
    }

    #[test]
    fn writes_file_and_echoes_to_stdout() {
        let dir = tempfile::tempdir().expect("tempdir");
        let options = options(dir.path(), r#"{"id": "$i"}"#);
        let mut stdout = Vec::new();

        let report = execute(&options, &mut stdout).expect("run");

        let file = std::fs::read_to_string(&options.out).expect("read output");
        assert_eq!(file, "{\"id\":0}\n{\"id\":1}\n{\"id\":2}\n");
        assert_eq!(String::from_utf8(stdout).expect("utf8"), file);
        assert_eq!(report.iterations, 3);
        assert_eq!(report.bytes_written, file.len() as u64);
        assert_eq!(report.directive_usage.get("i"), Some(&3));
    }

    #[test]
    fn no_stdout_leaves_stdout_empty() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut options = options(dir.path(), "\"$bool\"");
        options.stdout = false;
        let mut stdout = Vec::new();
        execute(&options, &mut stdout).expect("run");
        assert!(stdout.is_empty());
        let file = std::fs::read_to_string(&options.out).expect("read output");
        assert_eq!(file.lines().count(), 3);
    }

    #[test]
    fn pretty_echo_keeps_file_compact() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut options = options(dir.path(), r#"{"a": 1, "b": [true]}"#);
        options.count = 1;
        options.pretty = true;
        let mut stdout = Vec::new();
        execute(&options, &mut stdout).expect("run");
        let echoed = String::from_utf8(stdout).expect("utf8");
        assert!(echoed.lines().count() > 1);
        let file = std::fs::read_to_string(&options.out).expect("read output");
        assert_eq!(file, "{\"a\":1,\"b\":[true]}\n");
    }

    #[test]
    fn same_seed_writes_same_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let template = r#"{"n": {"$int": {"min": 0, "max": 1000}}, "c": "$alpha"}"#;
        let mut first = options(dir.path(), template);
        first.out = dir.path().join("first.jsonl");
        let mut second = first.clone();
        second.out = dir.path().join("second.jsonl");

        execute(&first, &mut Vec::new()).expect("first run");
        execute(&second, &mut Vec::new()).expect("second run");
        assert_eq!(
            std::fs::read_to_string(&first.out).expect("first"),
            std::fs::read_to_string(&second.out).expect("second")
        );
    }

    #[test]
    fn variables_are_passed_to_the_engine() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut options = options(dir.path(), r#"{"who": "$name", "tag": "$tag"}"#);
        options.count = 1;
        options.variables = parse_var_args(&["name=\"Alice\",tag=plain".to_string()])
            .expect("vars");
        let mut stdout = Vec::new();
        execute(&options, &mut stdout).expect("run");
        let file = std::fs::read_to_string(&options.out).expect("read output");
        assert_eq!(file, "{\"tag\":\"plain\",\"who\":\"Alice\"}\n");
    }

    #[test]
    fn invalid_template_fails_before_output() {
        let dir = tempfile::tempdir().expect("tempdir");
        let options = options(dir.path(), "{not json");
        let err = execute(&options, &mut Vec::new()).expect_err("invalid template");
        assert!(matches!(err, CliError::Json(_)));
        assert!(!options.out.exists());
    }

    #[test]
    fn generation_error_stops_the_run() {
        let dir = tempfile::tempdir().expect("tempdir");
        let options = options(dir.path(), r#"{"x": "$undefinedThing"}"#);
        let mut stdout = Vec::new();
        let err = execute(&options, &mut stdout).expect_err("undefined variable");
        assert!(matches!(err, CliError::Generation(_)));
        assert!(err.to_string().contains("$undefinedThing"));
        assert!(stdout.is_empty());
    }

    #[test]
    fn writes_report_when_requested() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut options = options(dir.path(), r#"{"v": "$n"}"#);
        options.variables = vec![("n".to_string(), "\"$digit\"".to_string())];
        options.report = Some(dir.path().join("reports/run.json"));
        execute(&options, &mut Vec::new()).expect("run");

        let raw = std::fs::read_to_string(dir.path().join("reports/run.json")).expect("report");
        let report: GenerationReport = serde_json::from_str(&raw).expect("parse report");
        assert_eq!(report.iterations, 3);
        assert_eq!(report.variable_usage.get("n"), Some(&3));
        assert_eq!(report.directive_usage.get("digit"), Some(&3));
    }

    #[test]
    fn flags_override_settings() {
        let settings = Settings {
            count: Some(10),
            prefix: Some("@".to_string()),
            out: Some(PathBuf::from("from-settings.jsonl")),
            stdout: Some(false),
            pretty: Some(true),
            seed: Some(1),
        };
        let cli = parse_cli(&["-c", "2", "--seed", "9", "--prefix", "%", "{}"]);
        let options = RunOptions::resolve(cli, settings).expect("resolve");
        assert_eq!(options.count, 2);
        assert_eq!(options.seed, Some(9));
        assert_eq!(options.prefix.as_str(), "%");
        assert_eq!(options.out, PathBuf::from("from-settings.jsonl"));
        assert!(!options.stdout);
        assert!(options.pretty);
    }

    #[test]
    fn defaults_apply_without_settings() {
        let cli = parse_cli(&["-v", "a=1,b=[1,2]", "--var", "c=x", "\"$i\""]);
        let options = RunOptions::resolve(cli, Settings::default()).expect("resolve");
        assert_eq!(options.count, 1);
        assert_eq!(options.out, PathBuf::from(DEFAULT_OUTPUT_FILE));
        assert_eq!(options.prefix.as_str(), "$");
        assert!(options.stdout);
        assert!(!options.pretty);
        assert_eq!(options.seed, None);
        assert_eq!(options.template, "\"$i\"");
        assert_eq!(options.variables.len(), 3);
        assert_eq!(options.variables[1], ("b".to_string(), "[1,2]".to_string()));
    }

    #[test]
    fn invalid_prefix_is_rejected() {
        let cli = parse_cli(&["--prefix", " ", "{}"]);
        let err = RunOptions::resolve(cli, Settings::default()).expect_err("bad prefix");
        assert!(matches!(err, CliError::Template(_)));
    }
}
