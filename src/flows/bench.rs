//! Benchmark flow - times both strategies and compares them

use anyhow::{ensure, Context, Result};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tempfile::TempDir;

use crate::backends::listing::list_files;
use crate::backends::per_file::count_per_file;
use crate::backends::per_line::count_per_line;
use crate::core::console::Console;
use crate::core::error::CountError;
use crate::core::model::{
    BenchReport, Comparison, CorpusInfo, Faster, Strategy, StrategyResult,
};
use crate::core::render::{RenderConfig, Renderer};
use crate::flows::corpus::{generate_corpus, Corpus, CorpusSpec};

/// List `dir` and run one strategy over it under a wall-clock timer.
///
/// Listing happens before the timer starts. An empty directory returns a
/// zero result without timing anything, the same way for both strategies.
pub async fn run_strategy(dir: &Path, strategy: Strategy) -> Result<StrategyResult, CountError> {
    let files = list_files(dir)?;
    if files.is_empty() {
        return Ok(StrategyResult::empty(strategy));
    }

    let start = Instant::now();
    let tally = match strategy {
        Strategy::PerFile => count_per_file(&files).await,
        Strategy::PerLine => count_per_line(&files).await,
    };
    let elapsed = start.elapsed();

    Ok(StrategyResult {
        strategy,
        total: tally.total,
        elapsed,
        files: files.len(),
        units: tally.units,
        failed_files: tally.failed_files(),
        failures: tally.failures,
    })
}

/// Compare two results by total and elapsed milliseconds
pub fn compare(per_file: &StrategyResult, per_line: &StrategyResult) -> Comparison {
    let t1 = per_file.elapsed_ms();
    let t2 = per_line.elapsed_ms();
    let slowest = t1.max(t2);
    let fastest = t1.min(t2);

    let relative_percent = if slowest == 0 {
        0.0
    } else {
        t1.abs_diff(t2) as f64 / slowest as f64 * 100.0
    };

    let faster = match t1.cmp(&t2) {
        std::cmp::Ordering::Less => Faster::PerFile,
        std::cmp::Ordering::Greater => Faster::PerLine,
        std::cmp::Ordering::Equal => Faster::Tie,
    };

    let speedup = if faster == Faster::Tie || fastest == 0 {
        None
    } else {
        Some(slowest as f64 / fastest as f64)
    };

    Comparison {
        spaces_diff: per_file.total.abs_diff(per_line.total),
        relative_percent,
        faster,
        margin_ms: t1.abs_diff(t2),
        speedup,
    }
}

/// Run `strategies` in order against `dir` and fill in the report
async fn measure(
    report: &mut BenchReport,
    dir: &Path,
    strategies: &[Strategy],
    console: Console,
) -> Result<(), CountError> {
    for &strategy in strategies {
        console.progress(format!("Running {}...", strategy.title()));
        let result = run_strategy(dir, strategy).await?;
        console.detail(format!(
            "{}: {} spaces in {} ms across {} tasks",
            strategy,
            result.total,
            result.elapsed_ms(),
            result.units
        ));
        if result.failed_files > 0 {
            console.detail(format!(
                "{}: {} unreadable files counted as zero",
                strategy, result.failed_files
            ));
            for failure in &result.failures {
                console.detail(format!("{}: skipped {}", strategy, failure));
            }
        }
        report.results.push(result);
    }

    report.comparison = match (
        report.result(Strategy::PerFile),
        report.result(Strategy::PerLine),
    ) {
        (Some(a), Some(b)) => Some(compare(a, b)),
        _ => None,
    };

    Ok(())
}

/// Remove what a bench run generated, unless asked to keep it.
///
/// A caller-supplied directory only loses the generated files, and is
/// removed itself only if that leaves it empty. Failures are ignored.
fn cleanup(corpus: &Corpus, temp: Option<TempDir>, keep: bool, console: Console) {
    if keep {
        let dir = temp.map(TempDir::keep).unwrap_or_else(|| corpus.dir.clone());
        console.progress(format!("Test directory kept at '{}'", dir.display()));
        return;
    }

    let removed = match temp {
        Some(temp) => temp.close(),
        None => remove_generated(corpus),
    };

    match removed {
        Ok(()) => console.progress(format!("Test directory '{}' removed", corpus.dir.display())),
        Err(e) => console.detail(format!(
            "could not remove '{}': {}",
            corpus.dir.display(),
            e
        )),
    }
}

/// Delete every generated file, then the directory. Keeps going past
/// failures and returns the first one.
fn remove_generated(corpus: &Corpus) -> io::Result<()> {
    let mut first_err = None;
    for path in &corpus.files {
        if let Err(e) = fs::remove_file(path) {
            first_err.get_or_insert(e);
        }
    }
    if let Err(e) = fs::remove_dir(&corpus.dir) {
        first_err.get_or_insert(e);
    }
    first_err.map_or(Ok(()), Err)
}

/// A `--dir` for bench must be new or empty: generated names would
/// overwrite existing files and extra files would skew the totals.
fn ensure_fresh_dir(dir: &Path) -> Result<()> {
    match fs::read_dir(dir) {
        Ok(mut entries) => {
            ensure!(
                entries.next().is_none(),
                "test directory '{}' is not empty; pass a new or empty directory",
                dir.display()
            );
            Ok(())
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e)
            .with_context(|| format!("cannot use '{}' as the test directory", dir.display())),
    }
}

/// Run the bench command: generate a corpus, time both strategies, report
pub async fn run_bench(
    dir: Option<PathBuf>,
    spec: CorpusSpec,
    keep: bool,
    console: Console,
    config: RenderConfig,
) -> Result<()> {
    let (dir, temp) = match dir {
        Some(dir) => {
            ensure_fresh_dir(&dir)?;
            (dir, None)
        }
        None => {
            let temp = tempfile::Builder::new()
                .prefix("spacebench-")
                .tempdir()
                .context("failed to create a temporary test directory")?;
            (temp.path().to_path_buf(), Some(temp))
        }
    };

    console.progress(format!(
        "Creating {} test files of {} lines...",
        spec.file_count, spec.lines_per_file
    ));
    let corpus = generate_corpus(&dir, spec)
        .await
        .with_context(|| format!("failed to generate test files in {}", dir.display()))?;
    console.detail(format!(
        "corpus at {} holds {} spaces",
        corpus.dir.display(),
        corpus.expected_spaces
    ));

    let mut report = BenchReport::new(corpus.info());
    let measured = measure(&mut report, &corpus.dir, &Strategy::ALL, console).await;
    cleanup(&corpus, temp, keep, console);
    measured?;

    Renderer::with_config(config).render_to(&report, std::io::stdout().lock())?;
    Ok(())
}

/// Run the count command against an existing directory
pub async fn run_count(
    dir: &Path,
    strategies: &[Strategy],
    console: Console,
    config: RenderConfig,
) -> Result<()> {
    let files = list_files(dir)?;
    console.detail(format!("{} files in {}", files.len(), dir.display()));

    let mut report = BenchReport::new(CorpusInfo {
        dir: dir.to_path_buf(),
        files: files.len(),
        lines_per_file: None,
        expected_spaces: None,
    });
    measure(&mut report, dir, strategies, console).await?;

    Renderer::with_config(config).render_to(&report, std::io::stdout().lock())?;
    Ok(())
}
