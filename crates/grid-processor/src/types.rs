//! Core types for grid resampling.

use serde::{Deserialize, Serialize};

/// Resampling method, chosen explicitly for every call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResamplingMethod {
    /// Nearest neighbor (preserves exact values and no-data masks).
    Nearest,
    /// Bilinear interpolation (smooth, slight value changes).
    Bilinear,
    /// Bicubic Catmull-Rom interpolation (smoothest, more compute).
    Cubic,
    /// Mean of the native pixels inside each target cell (downsampling
    /// continuous data).
    Average,
    /// Most frequent native value inside each target cell (categorical data).
    Mode,
}

impl ResamplingMethod {
    /// Whether the method aggregates every native pixel of a target cell
    /// instead of sampling at its center.
    pub fn is_aggregating(&self) -> bool {
        matches!(self, Self::Average | Self::Mode)
    }

    /// Parse from string (case-insensitive).
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "nearest" => Some(Self::Nearest),
            "bilinear" | "linear" => Some(Self::Bilinear),
            "cubic" | "bicubic" => Some(Self::Cubic),
            "average" | "mean" => Some(Self::Average),
            "mode" => Some(Self::Mode),
            _ => None,
        }
    }
}

impl std::fmt::Display for ResamplingMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Nearest => write!(f, "nearest"),
            Self::Bilinear => write!(f, "bilinear"),
            Self::Cubic => write!(f, "cubic"),
            Self::Average => write!(f, "average"),
            Self::Mode => write!(f, "mode"),
        }
    }
}
