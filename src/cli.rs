//! CLI module - Command-line interface definitions and handlers

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::core::console::{Console, Verbosity};
use crate::core::model::Strategy;
use crate::core::render::{OutputFormat, RenderConfig};
use crate::flows::corpus::{CorpusSpec, DEFAULT_FILE_COUNT, DEFAULT_LINES_PER_FILE};

/// spacebench - compare per-file and per-line task granularity when counting spaces.
#[derive(Parser, Debug)]
#[command(name = "spacebench")]
#[command(
    author,
    version,
    about,
    long_about = r#"spacebench counts the space characters (U+0020) in a directory of text
files with two parallel strategies and compares how long each one takes:

- per-file: one concurrent task per file
- per-line: one concurrent task per line, files also processed in parallel

Both strategies must report the same total; only the task granularity differs.
Unreadable or non-UTF-8 files count as zero spaces.

Examples:
    spacebench bench
    spacebench bench --files 200 --lines 1000 --seed 7
    spacebench count ./notes --strategy per-line
    spacebench --format json bench --dir ./TestFiles --keep
"#
)]
pub struct Cli {
    /// Output format (text/json/jsonl/md).
    #[arg(
        long,
        global = true,
        default_value = "text",
        value_name = "FORMAT",
        env = "SPACEBENCH_FORMAT",
        long_help = "Select the output format for the report.\n\n\
Supported values:\n\
- text (default): human-readable console report\n\
- json: the whole report as one object\n\
- jsonl: one object per strategy, then the comparison\n\
- md (markdown)"
    )]
    pub format: String,

    /// Pretty-print JSON/JSONL output with indentation.
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Disable colored output.
    #[arg(
        long,
        global = true,
        long_help = "Disable colored output. This is useful when piping to files or when your\n\
terminal does not support ANSI colors."
    )]
    pub no_color: bool,

    /// Quiet mode (no progress lines on stderr).
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (more diagnostics on stderr).
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Number of runtime worker threads.
    #[arg(
        long,
        global = true,
        value_name = "N",
        env = "SPACEBENCH_WORKERS",
        long_help = "Number of worker threads in the task pool both strategies run on.\n\n\
Defaults to one per CPU core."
    )]
    pub workers: Option<usize>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate test files, run both strategies and compare them.
    #[command(
        long_about = "Generate a corpus of test files, count its spaces with both strategies,\n\
and print the totals, timings and their comparison.\n\n\
The corpus goes to a temporary directory unless --dir is given, and is removed\n\
afterwards unless --keep is given.\n\n\
Examples:\n\
  spacebench bench\n\
  spacebench bench --files 10 --lines 10000\n\
  spacebench bench --dir TestFiles --keep\n"
    )]
    Bench {
        /// Directory to generate the test files in.
        #[arg(long, value_name = "PATH")]
        dir: Option<PathBuf>,

        /// Number of files to generate.
        #[arg(long, default_value_t = DEFAULT_FILE_COUNT, value_name = "N", env = "SPACEBENCH_FILES")]
        files: usize,

        /// Number of lines in each generated file.
        #[arg(long, default_value_t = DEFAULT_LINES_PER_FILE, value_name = "N", env = "SPACEBENCH_LINES")]
        lines: usize,

        /// Seed for a reproducible corpus.
        #[arg(long, value_name = "SEED")]
        seed: Option<u64>,

        /// Keep the generated files after the run.
        #[arg(long)]
        keep: bool,
    },

    /// Count spaces in an existing directory.
    #[command(
        long_about = "Count spaces in the files directly inside DIR (subdirectories are not\n\
entered) with one or both strategies.\n\n\
Examples:\n\
  spacebench count ./docs\n\
  spacebench count ./docs --strategy per-file\n"
    )]
    Count {
        /// Directory to count.
        #[arg(value_name = "DIR")]
        dir: PathBuf,

        /// Strategy to run.
        #[arg(
            long,
            default_value = "both",
            value_parser = ["per-file", "per-line", "both"],
            value_name = "STRATEGY"
        )]
        strategy: String,
    },

    /// Only generate test files.
    Generate {
        /// Directory to generate the test files in.
        #[arg(value_name = "DIR")]
        dir: PathBuf,

        /// Number of files to generate.
        #[arg(long, default_value_t = DEFAULT_FILE_COUNT, value_name = "N", env = "SPACEBENCH_FILES")]
        files: usize,

        /// Number of lines in each generated file.
        #[arg(long, default_value_t = DEFAULT_LINES_PER_FILE, value_name = "N", env = "SPACEBENCH_LINES")]
        lines: usize,

        /// Seed for a reproducible corpus.
        #[arg(long, value_name = "SEED")]
        seed: Option<u64>,
    },
}

/// Strategies selected by `--strategy`
fn selected_strategies(value: &str) -> Result<Vec<Strategy>> {
    if value == "both" {
        return Ok(Strategy::ALL.to_vec());
    }
    let strategy = value.parse::<Strategy>().map_err(anyhow::Error::msg)?;
    Ok(vec![strategy])
}

fn build_runtime(workers: Option<usize>) -> Result<tokio::runtime::Runtime> {
    let mut builder = tokio::runtime::Builder::new_multi_thread();
    builder.enable_all();
    if let Some(n) = workers {
        anyhow::ensure!(n > 0, "--workers must be at least 1");
        builder.worker_threads(n);
    }
    builder.build().context("failed to start the task runtime")
}

/// Run the CLI with parsed arguments
pub fn run(cli: Cli) -> Result<()> {
    let format: OutputFormat = cli.format.parse().unwrap_or_default();
    let render_config = RenderConfig::with_pretty(format, cli.pretty);
    let console = Console::new(Verbosity::from_flags(cli.quiet, cli.verbose));

    if cli.no_color {
        colored::control::set_override(false);
    }

    let runtime = build_runtime(cli.workers)?;
    if let Some(n) = cli.workers {
        console.detail(format!("running on {} worker threads", n));
    }

    match cli.command {
        Commands::Bench {
            dir,
            files,
            lines,
            seed,
            keep,
        } => {
            let spec = CorpusSpec {
                file_count: files,
                lines_per_file: lines,
                seed,
            };
            runtime.block_on(crate::flows::bench::run_bench(
                dir,
                spec,
                keep,
                console,
                render_config,
            ))
        }

        Commands::Count { dir, strategy } => {
            let strategies = selected_strategies(&strategy)?;
            runtime.block_on(crate::flows::bench::run_count(
                &dir,
                &strategies,
                console,
                render_config,
            ))
        }

        Commands::Generate {
            dir,
            files,
            lines,
            seed,
        } => {
            let spec = CorpusSpec {
                file_count: files,
                lines_per_file: lines,
                seed,
            };
            runtime.block_on(crate::flows::corpus::run_generate(
                &dir,
                spec,
                console,
                render_config,
            ))
        }
    }
}
