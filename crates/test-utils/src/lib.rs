//! Shared test utilities for the aster-harmonize workspace.
//!
//! This crate provides common testing infrastructure including:
//! - Synthetic digital-number and value grid generators
//! - ASTER metadata fixtures
//! - Synthetic multi-resolution scenes with a shared footprint
//!
//! # Usage
//!
//! Add to your crate's `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! test-utils = { path = "../test-utils" }
//! ```
//!
//! Then import in your tests:
//!
//! ```ignore
//! use test_utils::{fixtures, create_dn_ramp};
//! ```

pub mod fixtures;
pub mod generators;

// Re-export commonly used items at the crate root
pub use fixtures::*;
pub use generators::*;
