//! Synthetic corpus generation
//!
//! Writes `test_{i}.txt` files whose lines are padded with a random number
//! of spaces, and records exactly how many spaces were written.

use anyhow::{Context, Result};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tokio::task::{self, JoinHandle};

use crate::core::console::Console;
use crate::core::error::CountError;
use crate::core::model::{BenchReport, CorpusInfo};
use crate::core::render::{RenderConfig, Renderer};

/// Default number of files in a generated corpus
pub const DEFAULT_FILE_COUNT: usize = 50;

/// Default number of lines in each generated file
pub const DEFAULT_LINES_PER_FILE: usize = 100;

/// Leading padding is drawn from this range; trailing padding is half of it
const PADDING_RANGE: std::ops::Range<usize> = 5..50;

/// Shape of a corpus to generate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CorpusSpec {
    pub file_count: usize,
    pub lines_per_file: usize,
    /// Fixed seed for a reproducible corpus
    pub seed: Option<u64>,
}

impl Default for CorpusSpec {
    fn default() -> Self {
        Self {
            file_count: DEFAULT_FILE_COUNT,
            lines_per_file: DEFAULT_LINES_PER_FILE,
            seed: None,
        }
    }
}

/// A corpus written to disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Corpus {
    pub dir: PathBuf,
    pub files: Vec<PathBuf>,
    pub lines_per_file: usize,
    pub expected_spaces: u64,
}

impl Corpus {
    pub fn info(&self) -> CorpusInfo {
        CorpusInfo {
            dir: self.dir.clone(),
            files: self.files.len(),
            lines_per_file: Some(self.lines_per_file),
            expected_spaces: Some(self.expected_spaces),
        }
    }
}

/// Build one generated line and return it with its space count
fn make_line(rng: &mut impl Rng, index: usize) -> (String, u64) {
    let padding = rng.random_range(PADDING_RANGE);
    let line = format!(
        "{}Line {} {}",
        " ".repeat(padding),
        index,
        " ".repeat(padding / 2)
    );
    // two spaces inside "Line {index} "
    let spaces = (padding + 2 + padding / 2) as u64;
    (line, spaces)
}

fn write_file(path: &Path, lines: usize, mut rng: StdRng) -> Result<u64, CountError> {
    let file = File::create(path).map_err(|e| CountError::io(path, e))?;
    let mut writer = BufWriter::new(file);
    let mut spaces = 0u64;

    for j in 0..lines {
        let (line, count) = make_line(&mut rng, j);
        writeln!(writer, "{}", line).map_err(|e| CountError::io(path, e))?;
        spaces += count;
    }

    writer.flush().map_err(|e| CountError::io(path, e))?;
    Ok(spaces)
}

/// Generate a corpus in `dir`, one blocking task per file
pub async fn generate_corpus(dir: &Path, spec: CorpusSpec) -> Result<Corpus, CountError> {
    fs::create_dir_all(dir).map_err(|e| CountError::io(dir, e))?;

    let handles: Vec<(PathBuf, JoinHandle<Result<u64, CountError>>)> = (0..spec.file_count)
        .map(|i| {
            let path = dir.join(format!("test_{}.txt", i));
            let rng = match spec.seed {
                Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(i as u64)),
                None => StdRng::from_os_rng(),
            };
            let target = path.clone();
            let lines = spec.lines_per_file;
            (path, task::spawn_blocking(move || write_file(&target, lines, rng)))
        })
        .collect();

    let mut files = Vec::with_capacity(handles.len());
    let mut expected_spaces = 0u64;
    for (path, handle) in handles {
        expected_spaces += handle
            .await
            .map_err(|e| CountError::Runtime(e.to_string()))??;
        files.push(path);
    }

    Ok(Corpus {
        dir: dir.to_path_buf(),
        files,
        lines_per_file: spec.lines_per_file,
        expected_spaces,
    })
}

/// Run the generate command: write a corpus and report its expected count
pub async fn run_generate(
    dir: &Path,
    spec: CorpusSpec,
    console: Console,
    config: RenderConfig,
) -> Result<()> {
    console.progress(format!(
        "Creating {} test files of {} lines...",
        spec.file_count, spec.lines_per_file
    ));
    let corpus = generate_corpus(dir, spec)
        .await
        .with_context(|| format!("failed to generate test files in {}", dir.display()))?;
    console.detail(format!("wrote {} files", corpus.files.len()));

    let report = BenchReport::new(corpus.info());
    Renderer::with_config(config).render_to(&report, std::io::stdout().lock())?;
    Ok(())
}
