//! Core module - Contains the fundamental data structures and utilities
//!
//! This module provides:
//! - Result model (FileCount, StrategyResult, BenchReport)
//! - Error types
//! - Space counting primitives
//! - Rendering functions for different output formats
//! - Diagnostics on stderr

pub mod console;
pub mod error;
pub mod model;
pub mod render;
pub mod spaces;
