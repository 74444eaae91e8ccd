use crate::model::{AggregateConfig, Aggregation, FailurePolicy, OutputMode};
use crate::stats::SingleSamplePolicy;
use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use std::io::{BufRead, Read, Write};
use std::path::PathBuf;

#[derive(Debug, Parser, Clone)]
#[command(
    name = "latency-summarize",
    version,
    about = "Summarize benchmark frame latencies with standard errors"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Aggregate collected run records
    Summarize(SummarizeArgs),
    /// Select and rename benchmarks in a JSON summary read from stdin
    Subset {
        /// JSON file with a list of [old_name, new_name] pairs
        map: PathBuf,
    },
    /// Copy stdin to stdout, substituting `knob:` annotations into their line
    Knob,
}

#[derive(Debug, Args, Clone)]
pub struct SummarizeArgs {
    /// Directory of run records dumped by the harness
    #[arg(default_value = "collected")]
    pub dir: PathBuf,

    /// Print structured JSON (with full distributions), sorted by name
    #[arg(long, conflicts_with = "defs")]
    pub json: bool,

    /// Print `data-<name>-*` definitions
    #[arg(long)]
    pub defs: bool,

    /// Use --skip-warmup false to keep the first message of every run
    #[arg(long, default_value_t = true, action = clap::ArgAction::Set)]
    pub skip_warmup: bool,

    /// What to do with a run record that fails validation
    #[arg(long, value_enum, default_value_t = FailurePolicy::Abort)]
    pub on_error: FailurePolicy,

    /// How to treat a series with a single sample
    #[arg(long, value_enum, default_value_t = SingleSamplePolicy::Reject)]
    pub single_sample: SingleSamplePolicy,

    /// Also write structured JSON to this file
    #[arg(long)]
    pub export_json: Option<PathBuf>,
}

pub fn run(args: Cli) -> Result<()> {
    match args.command {
        Command::Summarize(summarize) => run_summarize(&summarize),
        Command::Subset { map } => run_subset(&map),
        Command::Knob => run_knob(),
    }
}

/// Build an `AggregateConfig` from CLI arguments.
pub fn build_config(args: &SummarizeArgs) -> AggregateConfig {
    let mode = if args.json {
        OutputMode::Structured
    } else if args.defs {
        OutputMode::Definitions
    } else {
        OutputMode::Text
    };
    AggregateConfig {
        skip_warmup: args.skip_warmup,
        mode,
        with_distribution: args.export_json.is_some(),
        on_error: args.on_error,
        single_sample: args.single_sample,
    }
}

fn run_summarize(args: &SummarizeArgs) -> Result<()> {
    let cfg = build_config(args);
    let runs = crate::storage::load_runs(&args.dir)?;
    let aggregation = crate::engine::aggregate(&runs, &cfg)?;

    let mut out = std::io::LineWriter::new(std::io::stdout().lock());
    match cfg.mode {
        OutputMode::Structured => {
            writeln!(out, "{}", serde_json::to_string_pretty(&aggregation.records)?)?;
        }
        OutputMode::Text => {
            for line in crate::text_summary::build_text_summary(&aggregation.records).lines {
                writeln!(out, "{line}")?;
            }
        }
        OutputMode::Definitions => {
            for line in crate::text_summary::build_definitions(&aggregation.records).lines {
                writeln!(out, "{line}")?;
            }
        }
    }
    out.flush()?;

    if let Some(path) = args.export_json.as_deref() {
        // Same records as stdout, in the structured (name) order.
        let mut structured = aggregation.records.clone();
        structured.sort_by(|a, b| a.name.cmp(&b.name));
        crate::storage::export_json(path, &structured)?;
        eprintln!("Exported JSON: {}", path.display());
    }

    report_skipped(&aggregation, runs.len())
}

/// Failures under `--on-error skip` still make the command fail, after the
/// successful records have been written.
fn report_skipped(aggregation: &Aggregation, total: usize) -> Result<()> {
    if aggregation.skipped.is_empty() {
        return Ok(());
    }
    for skipped in &aggregation.skipped {
        eprintln!("Skipped: {}", skipped.error);
    }
    bail!(
        "skipped {} of {} run records",
        aggregation.skipped.len(),
        total
    )
}

fn run_subset(map: &std::path::Path) -> Result<()> {
    let mapping = std::fs::read_to_string(map)
        .with_context(|| format!("read name mapping {}", map.display()))?;
    let mapping = crate::subset::parse_mapping(&mapping)?;

    let mut input = String::new();
    std::io::stdin()
        .read_to_string(&mut input)
        .context("read summary JSON from stdin")?;
    let benches = crate::subset::parse_benches(&input)?;

    let out = crate::subset::subset(&benches, &mapping);
    let mut stdout = std::io::stdout().lock();
    serde_json::to_writer(&mut stdout, &out)?;
    stdout.flush()?;
    Ok(())
}

fn run_knob() -> Result<()> {
    let stdin = std::io::stdin().lock();
    let mut out = std::io::BufWriter::new(std::io::stdout().lock());
    for line in stdin.lines() {
        let line = line.context("read stdin")?;
        writeln!(out, "{}", crate::knob::adjust_line(&line))?;
    }
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(argv: &[&str]) -> SummarizeArgs {
        let cli = Cli::try_parse_from(argv).unwrap();
        match cli.command {
            Command::Summarize(args) => args,
            other => panic!("unexpected command: {other:?}"),
        }
    }

    const GOOD_RUN: &str = r#"{"fn": "good.json", "messages": [
        {"ms": 20, "frames": 2, "latencies": [10, 10], "draw_latencies": [2, 2]},
        {"ms": 20, "frames": 2, "latencies": [8, 12], "draw_latencies": [1, 3]}
    ]}"#;

    const BAD_RUN: &str = r#"{"fn": "bad.json", "messages": [
        {"ms": 20, "frames": 2, "latencies": [10, 10], "draw_latencies": [2, 2]},
        {"ms": 8, "frames": 2, "latencies": [5, 3], "draw_latencies": [6, 1]}
    ]}"#;

    #[test]
    fn test_skip_writes_good_records_then_fails() {
        let dir = tempfile::tempdir().unwrap();
        let runs = dir.path().join("runs");
        std::fs::create_dir(&runs).unwrap();
        std::fs::write(runs.join("bad.json"), BAD_RUN).unwrap();
        std::fs::write(runs.join("good.json"), GOOD_RUN).unwrap();
        let export = dir.path().join("summary.json");

        let mut args = parse(&["latency-summarize", "summarize", "--on-error", "skip", "--defs"]);
        args.dir = runs;
        args.export_json = Some(export.clone());

        let err = run_summarize(&args).unwrap_err();
        assert!(err.to_string().contains("skipped 1 of 2"), "{err}");

        let exported: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&export).unwrap()).unwrap();
        let records = exported.as_array().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0]["name"], "good");
        assert_eq!(records[0]["latency"]["value"], 10.0);
        assert!(records[0]["latency"]["distribution"].is_object());
        assert!(records[0]["draw_latency"]["distribution"].is_object());
    }

    #[test]
    fn test_abort_fails_before_export() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("bad.json"), BAD_RUN).unwrap();
        let export = dir.path().join("out").join("summary.json");

        let mut args = parse(&["latency-summarize", "summarize"]);
        args.dir = dir.path().to_path_buf();
        args.export_json = Some(export.clone());

        let err = run_summarize(&args).unwrap_err();
        assert!(err.to_string().contains("bad.json"), "{err}");
        assert!(!export.exists());
    }

    #[test]
    fn test_export_requests_distribution() {
        let args = parse(&["latency-summarize", "summarize", "--export-json", "s.json"]);
        let cfg = build_config(&args);
        assert_eq!(cfg.mode, OutputMode::Text);
        assert!(cfg.with_distribution);
        assert!(!build_config(&parse(&["latency-summarize", "summarize"])).with_distribution);
    }

    #[test]
    fn test_defaults() {
        let args = parse(&["latency-summarize", "summarize"]);
        assert_eq!(args.dir, PathBuf::from("collected"));
        let cfg = build_config(&args);
        assert!(cfg.skip_warmup);
        assert_eq!(cfg.mode, OutputMode::Text);
        assert_eq!(cfg.on_error, FailurePolicy::Abort);
        assert_eq!(cfg.single_sample, SingleSamplePolicy::Reject);
    }

    #[test]
    fn test_explicit_options() {
        let args = parse(&[
            "latency-summarize",
            "summarize",
            "runs",
            "--json",
            "--skip-warmup",
            "false",
            "--on-error",
            "skip",
            "--single-sample",
            "zero-error",
        ]);
        let cfg = build_config(&args);
        assert_eq!(args.dir, PathBuf::from("runs"));
        assert!(!cfg.skip_warmup);
        assert_eq!(cfg.mode, OutputMode::Structured);
        assert_eq!(cfg.on_error, FailurePolicy::Skip);
        assert_eq!(cfg.single_sample, SingleSamplePolicy::ZeroError);
    }

    #[test]
    fn test_defs_mode() {
        let cfg = build_config(&parse(&["latency-summarize", "summarize", "--defs"]));
        assert_eq!(cfg.mode, OutputMode::Definitions);
    }

    #[test]
    fn test_json_and_defs_conflict() {
        assert!(
            Cli::try_parse_from(["latency-summarize", "summarize", "--json", "--defs"]).is_err()
        );
    }

    #[test]
    fn test_other_subcommands() {
        let cli = Cli::try_parse_from(["latency-summarize", "subset", "names.json"]).unwrap();
        assert!(matches!(cli.command, Command::Subset { map } if map == PathBuf::from("names.json")));
        let cli = Cli::try_parse_from(["latency-summarize", "knob"]).unwrap();
        assert!(matches!(cli.command, Command::Knob));
    }
}
