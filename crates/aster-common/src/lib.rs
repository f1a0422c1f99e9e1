//! Common types shared across the ASTER calibration and harmonization crates.

pub mod affine;
pub mod band;
pub mod bbox;
pub mod crs;
pub mod error;
pub mod grid;
pub mod metadata;
pub mod scene;

pub use affine::AffineTransform;
pub use band::{BandId, GainCode, RawBand, SensorSubsystem};
pub use bbox::BoundingBox;
pub use crs::CrsCode;
pub use error::{SceneError, SceneResult};
pub use grid::Grid;
pub use metadata::SceneMetadata;
pub use scene::{parse_calendar_date, SceneGeometry};
