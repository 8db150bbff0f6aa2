//! Strategy 1: one file, one task
//!
//! Each file is read and counted on its own blocking task. Results are
//! collected in spawn order after the join and summed sequentially, so no
//! state is shared between tasks.

use std::path::PathBuf;
use tokio::task::{self, JoinHandle};

use crate::core::model::{FileCount, Tally};
use crate::core::spaces::count_file;

/// Count spaces in every file, one concurrent task per file
pub async fn count_per_file(files: &[PathBuf]) -> Tally {
    let handles: Vec<JoinHandle<FileCount>> = files
        .iter()
        .cloned()
        .map(|path| task::spawn_blocking(move || count_file(&path)))
        .collect();

    let mut counts = Vec::with_capacity(handles.len());
    for handle in handles {
        // A panicked unit counts as zero like any other failure
        let count = handle
            .await
            .unwrap_or_else(|e| FileCount::Failed(e.to_string()));
        counts.push(count);
    }

    Tally::from_counts(files, &counts)
}
