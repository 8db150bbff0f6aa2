//! Flows module - Operations combining backends into commands
//!
//! Provides:
//! - bench: Timed runs of both strategies and their comparison
//! - corpus: Synthetic test file generation

pub mod bench;
pub mod corpus;
