//! Band stack assembly for ASTER scenes.
//!
//! Takes the raw bands of one scene, calibrates each band to radiance or
//! top-of-atmosphere reflectance, resamples it onto one target grid and
//! returns the bands as one ordered stack sharing a transform and CRS.
//!
//! # Architecture
//!
//! ```text
//! raw bands (any order)
//!      │
//!      ├─► solar geometry resolved once (invalid sun elevation aborts here)
//!      │
//!      ├─► sort into canonical band order, reject duplicates
//!      │
//!      ├─► per band, in parallel:
//!      │       calibrate on the native grid ─► resample onto the target grid
//!      │
//!      └─► merge by canonical position ─► BandStack
//! ```
//!
//! Any failing band aborts the scene; there are no partial stacks.
//!
//! # Example
//!
//! ```ignore
//! use band_stack::assemble;
//! use grid_processor::ResamplingMethod;
//! use radiometry::CalibrationTable;
//!
//! let table = CalibrationTable::aster();
//! let stack = assemble(&bands, &table, &meta.scene_geometry(), &grid, ResamplingMethod::Bilinear)?;
//! assert_eq!(stack.width, grid.width);
//! ```

pub mod assemble;
pub mod config;
pub mod error;
pub mod stack;

pub use assemble::{assemble, Assembler};
pub use config::PipelineConfig;
pub use error::{AssemblyError, BandError, Result};
pub use stack::{BandStack, StackLayer};
