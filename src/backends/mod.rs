//! Backends module - Directory listing and the two counting strategies
//!
//! Provides:
//! - listing: Non-recursive file listing with walkdir
//! - per_file: One task per file
//! - per_line: One task per line

pub mod listing;
pub mod per_file;
pub mod per_line;
