//! Result Model
//!
//! Every counting run maps to these types before rendering output.

use serde::{Serialize, Serializer};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Outcome of one counting unit (a file, or a line within a file).
///
/// A failed unit is kept as a value rather than an error so the
/// "unreadable counts as zero" policy stays visible.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileCount {
    Counted(u64),
    /// Read, decode or join failure, with its message
    Failed(String),
}

impl FileCount {
    /// Spaces this unit adds to the total
    pub fn contribution(&self) -> u64 {
        match self {
            FileCount::Counted(n) => *n,
            FileCount::Failed(_) => 0,
        }
    }

    /// Why the unit failed, if it did
    pub fn failure(&self) -> Option<&str> {
        match self {
            FileCount::Counted(_) => None,
            FileCount::Failed(reason) => Some(reason),
        }
    }
}

/// What a strategy's fan-in produces, before timing is attached
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tally {
    pub total: u64,
    pub units: usize,
    /// One `path: reason` entry per file counted as zero
    pub failures: Vec<String>,
}

impl Tally {
    /// Sum per-file outcomes collected after a join, one unit per outcome.
    /// `files` and `counts` are in the same order.
    pub fn from_counts(files: &[PathBuf], counts: &[FileCount]) -> Self {
        let mut tally = Self {
            total: counts.iter().map(FileCount::contribution).sum(),
            units: counts.len(),
            failures: Vec::new(),
        };
        for (path, count) in files.iter().zip(counts) {
            if let Some(reason) = count.failure() {
                tally.record_failure(path, reason);
            }
        }
        tally
    }

    pub fn record_failure(&mut self, path: &Path, reason: &str) {
        self.failures.push(format!("{}: {}", path.display(), reason));
    }

    pub fn failed_files(&self) -> usize {
        self.failures.len()
    }
}

/// Parallelization scheme being benchmarked
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Strategy {
    /// One task per file
    PerFile,
    /// One task per line, files also in parallel
    PerLine,
}

impl Strategy {
    pub const ALL: [Strategy; 2] = [Strategy::PerFile, Strategy::PerLine];

    pub fn as_str(&self) -> &'static str {
        match self {
            Strategy::PerFile => "per-file",
            Strategy::PerLine => "per-line",
        }
    }

    /// Human title used in text output
    pub fn title(&self) -> &'static str {
        match self {
            Strategy::PerFile => "Strategy 1: one file, one task",
            Strategy::PerLine => "Strategy 2: one line, one task",
        }
    }
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Strategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "per-file" | "file" | "1" => Ok(Strategy::PerFile),
            "per-line" | "line" | "2" => Ok(Strategy::PerLine),
            _ => Err(format!("Unknown strategy: {}", s)),
        }
    }
}

fn serialize_millis<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_u64(d.as_millis() as u64)
}

/// Aggregate result of one strategy invocation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StrategyResult {
    pub strategy: Strategy,

    /// Total spaces across all files
    pub total: u64,

    /// Wall-clock time of the fan-out/fan-in, zero for an empty directory
    #[serde(rename = "elapsed_ms", serialize_with = "serialize_millis")]
    pub elapsed: Duration,

    /// Files discovered by the lister
    pub files: usize,

    /// Concurrent units spawned (files, plus lines for per-line)
    pub units: usize,

    /// Files that could not be read or decoded and counted as zero
    pub failed_files: usize,

    /// `path: reason` for each of those files
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub failures: Vec<String>,
}

impl StrategyResult {
    /// Result for a directory with nothing in it
    pub fn empty(strategy: Strategy) -> Self {
        Self {
            strategy,
            total: 0,
            elapsed: Duration::ZERO,
            files: 0,
            units: 0,
            failed_files: 0,
            failures: Vec::new(),
        }
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed.as_millis() as u64
    }

    /// Average milliseconds per file, 0.0 when there were no files
    pub fn avg_ms_per_file(&self) -> f64 {
        if self.files == 0 {
            return 0.0;
        }
        self.elapsed.as_secs_f64() * 1000.0 / self.files as f64
    }
}

/// Which strategy finished first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Faster {
    PerFile,
    PerLine,
    Tie,
}

/// Side-by-side comparison of the two strategies
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Comparison {
    /// Absolute difference of totals, 0 for a correct run
    pub spaces_diff: u64,

    /// |t1 - t2| / max(t1, t2) * 100
    pub relative_percent: f64,

    pub faster: Faster,

    /// How many ms the faster strategy saved
    pub margin_ms: u64,

    /// slower / faster, absent when the faster run took 0 ms
    #[serde(skip_serializing_if = "Option::is_none")]
    pub speedup: Option<f64>,
}

/// Description of the corpus a report was run against
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CorpusInfo {
    pub dir: PathBuf,

    pub files: usize,

    /// Lines per file, when the corpus was generated
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lines_per_file: Option<usize>,

    /// Exact number of spaces written by the generator
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected_spaces: Option<u64>,
}

/// Everything one run prints
#[derive(Debug, Clone, Serialize)]
pub struct BenchReport {
    /// RFC 3339 start time
    pub started_at: String,

    pub corpus: CorpusInfo,

    pub results: Vec<StrategyResult>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub comparison: Option<Comparison>,
}

impl BenchReport {
    pub fn new(corpus: CorpusInfo) -> Self {
        Self {
            started_at: chrono::Local::now().to_rfc3339(),
            corpus,
            results: Vec::new(),
            comparison: None,
        }
    }

    pub fn result(&self, strategy: Strategy) -> Option<&StrategyResult> {
        self.results.iter().find(|r| r.strategy == strategy)
    }

    /// Whether every result matches the generator's expected count.
    /// `None` when the corpus was not generated by this run or nothing ran.
    pub fn matches_expected(&self) -> Option<bool> {
        if self.results.is_empty() {
            return None;
        }
        self.corpus
            .expected_spaces
            .map(|expected| self.results.iter().all(|r| r.total == expected))
    }
}
