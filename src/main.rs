//! spacebench - Task granularity benchmark for counting spaces in text files
//!
//! spacebench provides:
//! - A per-file strategy: one concurrent task per file
//! - A per-line strategy: one concurrent task per line
//! - Synthetic corpus generation with a known space count
//! - Timed comparison output (text/json/jsonl/md)

use anyhow::Result;
use clap::Parser;

mod backends;
mod cli;
mod core;
mod flows;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    cli::run(cli)
}
