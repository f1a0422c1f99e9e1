//! Scenario loading and management.

use band_stack::PipelineConfig;
use grid_processor::ResamplingMethod;
use radiometry::Quantity;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Target CRS keyword selecting the UTM zone of the scene center.
pub const AUTO_CRS: &str = "auto";

/// One check scenario loaded from YAML.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scenario {
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Side length of the VNIR bands in pixels; SWIR and TIR scale from it.
    #[serde(default = "default_vnir_size")]
    pub vnir_size: usize,
    /// Seed for the synthetic digital numbers
    #[serde(default)]
    pub seed: u32,
    /// Target pixel size in target CRS units
    #[serde(default = "default_resolution")]
    pub resolution_m: f64,
    /// Target CRS identifier, or "auto" for the scene's UTM zone
    #[serde(default = "default_target_crs")]
    pub target_crs: String,
    /// Worker thread counts to compare; the first run is the reference
    #[serde(default = "default_thread_counts")]
    pub thread_counts: Vec<usize>,
    /// Repetitions per thread count, for timing
    #[serde(default = "default_iterations")]
    pub iterations: usize,
    #[serde(default)]
    pub pipeline: PipelineConfig,
}

fn default_vnir_size() -> usize {
    120
}

fn default_resolution() -> f64 {
    15.0
}

fn default_target_crs() -> String {
    AUTO_CRS.to_string()
}

fn default_thread_counts() -> Vec<usize> {
    vec![1, 2, 4]
}

fn default_iterations() -> usize {
    1
}

impl Default for Scenario {
    fn default() -> Self {
        Self {
            name: "default".to_string(),
            description: "Synthetic ASTER scene onto its UTM zone".to_string(),
            vnir_size: default_vnir_size(),
            seed: 0,
            resolution_m: default_resolution(),
            target_crs: default_target_crs(),
            thread_counts: default_thread_counts(),
            iterations: default_iterations(),
            pipeline: PipelineConfig::default(),
        }
    }
}

impl Scenario {
    /// Load scenario from YAML file.
    pub fn from_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let scenario: Scenario = serde_yaml::from_str(&content)?;
        Ok(scenario)
    }

    /// Validate scenario.
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.vnir_size < 6 {
            anyhow::bail!("vnir_size must be >= 6 so every subsystem has pixels");
        }
        if !(self.resolution_m.is_finite() && self.resolution_m > 0.0) {
            anyhow::bail!("resolution_m must be a positive number");
        }
        if self.thread_counts.is_empty() {
            anyhow::bail!("at least one thread count must be specified");
        }
        if self.thread_counts.contains(&0) {
            anyhow::bail!("thread counts must be > 0");
        }
        if self.iterations == 0 {
            anyhow::bail!("iterations must be > 0");
        }
        self.pipeline
            .validate()
            .map_err(|e| anyhow::anyhow!("pipeline: {}", e))?;
        Ok(())
    }
}

/// Apply command-line overrides on top of a pipeline configuration.
pub fn override_pipeline(
    mut pipeline: PipelineConfig,
    method: Option<&str>,
    quantity: Option<&str>,
) -> anyhow::Result<PipelineConfig> {
    if let Some(method) = method {
        pipeline.method = ResamplingMethod::from_str(method)
            .ok_or_else(|| anyhow::anyhow!("unknown resampling method: {}", method))?;
    }
    if let Some(quantity) = quantity {
        pipeline.quantity = Quantity::from_str(quantity)
            .ok_or_else(|| anyhow::anyhow!("unknown quantity: {}", quantity))?;
    }
    Ok(pipeline)
}
