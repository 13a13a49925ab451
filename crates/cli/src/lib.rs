// Copyright 2025 Benchmark Leaderboard Contributors
// SPDX-License-Identifier: Apache-2.0

//! CLI for the benchmark leaderboard.
//!
//! This crate exposes the read-only query surface (tasks, datasets,
//! rankings) on the command line, plus an `export` subcommand that writes
//! every leaderboard to an output directory.

#![warn(missing_docs, rust_2018_idioms)]
#![deny(unsafe_code)]

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use leaderboard_core::{LeaderboardConfig, LogFormat, TaskKind};
use leaderboard_results::{markdown, scan_and_export, Leaderboard, ResultScanner};
use std::io::{self, Write};
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Benchmark leaderboard CLI.
#[derive(Parser, Debug)]
#[command(name = "leaderboard")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Result root, overriding the configured one.
    #[arg(long, global = true)]
    pub root: Option<PathBuf>,

    /// Log output format: pretty or json.
    #[arg(long, global = true)]
    pub log_format: Option<LogFormat>,

    /// Configuration file, extension optional. Without it,
    /// `config/leaderboard` is read when present.
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Commands,
}

/// Rendering for the `rankings` subcommand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// `[{"model", "data"}]` as pretty JSON.
    Json,
    /// A ranked markdown table.
    Markdown,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List task directories under the result root.
    Tasks,

    /// List dataset directories of a task.
    Datasets {
        /// Task directory name.
        task: String,
    },

    /// Show the rankings of one dataset.
    Rankings {
        /// Task directory name.
        task: String,

        /// Dataset directory name.
        dataset: String,

        /// Output format.
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,
    },

    /// Scan every known task and write leaderboards to an output directory.
    ///
    /// This writes:
    /// - snapshots/<task>__<dataset>.json - One JSON file per leaderboard
    /// - all_rankings.json - Combined JSON file
    /// - summary.md - Markdown summary
    Export {
        /// Output directory override.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show configuration and what the result root contains.
    Status {
        /// Show per-task dataset counts.
        #[arg(short, long)]
        detailed: bool,
    },
}

/// Run the CLI with the process arguments.
///
/// # Returns
///
/// Returns `Ok(())` on success, or an error if the command fails.
pub fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    let config = resolve_config(&cli)?;
    init_tracing(&config);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    execute(&cli.command, &config, &mut out)
}

/// Load configuration and apply command-line overrides.
pub fn resolve_config(cli: &Cli) -> anyhow::Result<LeaderboardConfig> {
    let mut config = match &cli.config {
        Some(file) => LeaderboardConfig::load_from(file)
            .with_context(|| format!("loading configuration from {}", file))?,
        None => LeaderboardConfig::load().context("loading configuration")?,
    };

    if let Some(root) = &cli.root {
        config = config.with_result_root(root.clone());
    }
    if let Some(format) = cli.log_format {
        config = config.with_log_format(format);
    }

    config.validate()?;
    Ok(config)
}

/// Install the global tracing subscriber. Logs go to stderr so stdout
/// stays machine-readable.
pub fn init_tracing(config: &LeaderboardConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));
    let registry = tracing_subscriber::registry().with(filter);

    let installed = match config.log_format {
        LogFormat::Json => registry
            .with(fmt::layer().json().with_writer(io::stderr))
            .try_init(),
        LogFormat::Pretty => registry
            .with(fmt::layer().with_writer(io::stderr))
            .try_init(),
    };

    if installed.is_err() {
        debug!("Tracing subscriber already installed");
    }
}

/// Execute one command against `config`, writing its output to `out`.
pub fn execute(
    command: &Commands,
    config: &LeaderboardConfig,
    out: &mut dyn Write,
) -> anyhow::Result<()> {
    let scanner = ResultScanner::new(config.result_root());

    match command {
        Commands::Tasks => {
            for task in scanner.list_tasks() {
                writeln!(out, "{}", task)?;
            }
            Ok(())
        }
        Commands::Datasets { task } => {
            for dataset in scanner.list_datasets(task) {
                writeln!(out, "{}", dataset)?;
            }
            Ok(())
        }
        Commands::Rankings { task, dataset, format } => {
            let rankings = scanner
                .list_rankings(task, dataset)
                .with_context(|| format!("reading rankings for {}/{}", task, dataset))?;

            match format {
                OutputFormat::Json => {
                    writeln!(out, "{}", serde_json::to_string_pretty(&rankings)?)?;
                }
                OutputFormat::Markdown => {
                    let kind: TaskKind = task.parse()?;
                    let board = Leaderboard::new(kind, dataset.as_str(), rankings);
                    write!(out, "{}", markdown::generate_leaderboard(&board))?;
                }
            }
            Ok(())
        }
        Commands::Export { output } => {
            let output = output.clone().unwrap_or_else(|| config.output_dir.clone());
            let boards = scan_and_export(config.result_root(), &output)
                .with_context(|| format!("exporting leaderboards to {}", output.display()))?;

            writeln!(out, "Exported {} leaderboards", boards.len())?;
            writeln!(out, "Results written to {}", output.display())?;
            Ok(())
        }
        Commands::Status { detailed } => {
            let root = scanner.root();
            writeln!(out, "{}", "Benchmark Leaderboard".bold())?;
            writeln!(out, "Version: {}", env!("CARGO_PKG_VERSION"))?;
            writeln!(
                out,
                "Result root: {} ({})",
                root.display(),
                if root.is_dir() { "present" } else { "missing" }
            )?;
            writeln!(out, "Output directory: {}", config.output_dir.display())?;

            let tasks = scanner.list_tasks();
            writeln!(out, "Tasks: {}", tasks.len())?;

            if *detailed {
                for task in &tasks {
                    let parser = match TaskKind::from_name(task) {
                        Some(kind) => format!("{} files", kind.extension()),
                        None => "no parser".to_string(),
                    };
                    writeln!(
                        out,
                        "  - {}: {} datasets ({})",
                        task,
                        scanner.list_datasets(task).len(),
                        parser
                    )?;
                }
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn run_command(command: Commands, config: &LeaderboardConfig) -> String {
        let mut out = Vec::new();
        execute(&command, config, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    fn fixture() -> (tempfile::TempDir, LeaderboardConfig) {
        let dir = tempdir().unwrap();
        let root = dir.path().join("result");
        fs::create_dir_all(root.join("eta/Chengdu")).unwrap();
        fs::create_dir_all(root.join("map_matching/Seattle")).unwrap();
        fs::write(
            root.join("eta/Chengdu/DeepTTE.csv"),
            "masked_MAE,masked_MAPE,masked_RMSE\n1.5,inf,2.5\n",
        )
        .unwrap();
        fs::write(
            root.join("eta/Chengdu/TTPNet.csv"),
            "masked_MAE,masked_MAPE,masked_RMSE\n1.2,0.1,2.0\n",
        )
        .unwrap();

        let config = LeaderboardConfig::default()
            .with_result_root(root)
            .with_output_dir(dir.path().join("out"));
        (dir, config)
    }

    #[test]
    fn test_cli_parses_rankings() {
        let cli = Cli::try_parse_from([
            "leaderboard",
            "--root",
            "/data/result",
            "rankings",
            "eta",
            "Chengdu",
            "--format",
            "markdown",
        ])
        .unwrap();
        assert_eq!(cli.root, Some(PathBuf::from("/data/result")));
        assert!(matches!(
            cli.command,
            Commands::Rankings { format: OutputFormat::Markdown, .. }
        ));
    }

    #[test]
    fn test_missing_explicit_config_is_an_error() {
        let dir = tempdir().unwrap();
        let absent = dir.path().join("absent");
        let cli = Cli::try_parse_from([
            "leaderboard",
            "--config",
            absent.to_str().unwrap(),
            "tasks",
        ])
        .unwrap();
        assert!(resolve_config(&cli).is_err());
    }

    #[test]
    fn test_explicit_config_is_read() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join("leaderboard.toml"),
            "output_dir = \"/srv/leaderboard\"\n",
        )
        .unwrap();
        let name = dir.path().join("leaderboard");
        let cli = Cli::try_parse_from([
            "leaderboard",
            "--config",
            name.to_str().unwrap(),
            "--root",
            "/data/result",
            "tasks",
        ])
        .unwrap();

        let config = resolve_config(&cli).unwrap();
        assert_eq!(config.output_dir, PathBuf::from("/srv/leaderboard"));
        assert_eq!(config.result_root, PathBuf::from("/data/result"));
    }

    #[test]
    fn test_cli_parses_log_format() {
        let cli = Cli::try_parse_from(["leaderboard", "tasks", "--log-format", "json"]).unwrap();
        assert_eq!(cli.log_format, Some(LogFormat::Json));
        assert!(Cli::try_parse_from(["leaderboard", "tasks", "--log-format", "xml"]).is_err());
    }

    #[test]
    fn test_tasks_and_datasets() {
        let (_dir, config) = fixture();
        assert_eq!(run_command(Commands::Tasks, &config), "eta\nmap_matching\n");
        assert_eq!(
            run_command(Commands::Datasets { task: "eta".into() }, &config),
            "Chengdu\n"
        );
    }

    #[test]
    fn test_rankings_json() {
        let (_dir, config) = fixture();
        let output = run_command(
            Commands::Rankings {
                task: "eta".into(),
                dataset: "Chengdu".into(),
                format: OutputFormat::Json,
            },
            &config,
        );
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value[0]["model"], "DeepTTE");
        assert_eq!(value[0]["data"]["masked_mape"], "inf");
        assert_eq!(value[1]["data"]["masked_mae"], 1.2);
    }

    #[test]
    fn test_rankings_markdown_is_ranked() {
        let (_dir, config) = fixture();
        let output = run_command(
            Commands::Rankings {
                task: "eta".into(),
                dataset: "Chengdu".into(),
                format: OutputFormat::Markdown,
            },
            &config,
        );
        assert!(output.contains("| 1 | TTPNet | 1.2000 | 0.1000 | 2.0000 |"));
        assert!(output.contains("| 2 | DeepTTE | 1.5000 | inf | 2.5000 |"));
    }

    #[test]
    fn test_unknown_rankings_are_empty() {
        let (_dir, config) = fixture();
        let output = run_command(
            Commands::Rankings {
                task: "unknown_task".into(),
                dataset: "unknown_dataset".into(),
                format: OutputFormat::Json,
            },
            &config,
        );
        assert_eq!(output.trim(), "[]");
    }

    #[test]
    fn test_unknown_task_markdown_is_an_error() {
        let (_dir, config) = fixture();
        let command = Commands::Rankings {
            task: "map_matching".into(),
            dataset: "Seattle".into(),
            format: OutputFormat::Markdown,
        };
        let err = execute(&command, &config, &mut Vec::new()).unwrap_err();
        assert_eq!(err.to_string(), "Unknown task: map_matching");
    }

    #[test]
    fn test_export_writes_summary() {
        let (dir, config) = fixture();
        let output = run_command(Commands::Export { output: None }, &config);
        assert!(output.contains("Exported 1 leaderboards"));
        assert!(dir.path().join("out/summary.md").exists());
        assert!(dir.path().join("out/snapshots/eta__Chengdu.json").exists());
    }

    #[test]
    fn test_status_detailed() {
        let (_dir, config) = fixture();
        let output = run_command(Commands::Status { detailed: true }, &config);
        assert!(output.contains("Tasks: 2"));
        assert!(output.contains("  - eta: 1 datasets (csv files)"));
        assert!(output.contains("  - map_matching: 1 datasets (no parser)"));
    }
}
