//! Determinism and coverage check for band stack assembly.
//!
//! This crate provides tools to:
//! - Build a synthetic ASTER scene with the native 15/30/90 m band layout
//! - Assemble it onto a target grid at several worker thread counts
//! - Verify the stacks are bit-identical across runs
//! - Report per-band coverage, value ranges and timings (console, JSON, CSV)

pub mod config;
pub mod report;
pub mod runner;

pub use config::{override_pipeline, Scenario};
pub use report::CheckReport;
pub use runner::{BandSummary, CheckResults, RunTiming, StackCheck};
