//! Strategy 2: one line, one task
//!
//! Files are processed concurrently, and inside each file every line gets
//! its own task. Lines are never batched: the task count is what this
//! strategy measures.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::task::JoinHandle;

use crate::core::model::{FileCount, Tally};
use crate::core::spaces::{count_spaces, line_ranges};

/// Count spaces in one file with one task per line.
///
/// Returns the file's outcome and the number of line tasks spawned.
pub async fn count_file_by_lines(path: &Path) -> (FileCount, usize) {
    let content: Arc<str> = match tokio::fs::read_to_string(path).await {
        Ok(c) => Arc::from(c),
        Err(e) => return (FileCount::Failed(e.to_string()), 0),
    };

    let handles: Vec<JoinHandle<u64>> = line_ranges(&content)
        .into_iter()
        .map(|range| {
            let content = Arc::clone(&content);
            tokio::spawn(async move { count_spaces(&content[range]) })
        })
        .collect();
    let lines = handles.len();

    let mut per_line = Vec::with_capacity(lines);
    for handle in handles {
        match handle.await {
            Ok(n) => per_line.push(n),
            Err(e) => return (FileCount::Failed(e.to_string()), lines),
        }
    }

    (FileCount::Counted(per_line.iter().sum()), lines)
}

/// Count spaces in every file, one task per file and one per line.
///
/// Per-file totals are folded into the run total with an atomic add.
pub async fn count_per_line(files: &[PathBuf]) -> Tally {
    let total = Arc::new(AtomicU64::new(0));

    let handles: Vec<JoinHandle<(FileCount, usize)>> = files
        .iter()
        .cloned()
        .map(|path| {
            let total = Arc::clone(&total);
            tokio::spawn(async move {
                let (count, lines) = count_file_by_lines(&path).await;
                total.fetch_add(count.contribution(), Ordering::SeqCst);
                (count, lines)
            })
        })
        .collect();

    let mut tally = Tally {
        units: files.len(),
        ..Default::default()
    };
    for (path, handle) in files.iter().zip(handles) {
        match handle.await {
            Ok((count, lines)) => {
                tally.units += lines;
                if let Some(reason) = count.failure() {
                    tally.record_failure(path, reason);
                }
            }
            Err(e) => tally.record_failure(path, &e.to_string()),
        }
    }

    tally.total = total.load(Ordering::SeqCst);
    tally
}
