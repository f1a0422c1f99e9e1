//! Scenario execution: assemble one synthetic scene at several thread counts.

use anyhow::Context;
use aster_common::{BoundingBox, CrsCode, Grid};
use band_stack::{Assembler, BandStack, PipelineConfig};
use projection::Projection;
use radiometry::CalibrationTable;
use serde::Serialize;
use std::time::Instant;
use test_utils::scene;
use tracing::{info, warn};

use crate::config::{Scenario, AUTO_CRS};

/// Timing of all iterations at one thread count.
#[derive(Debug, Clone, Serialize)]
pub struct RunTiming {
    pub threads: usize,
    pub iterations: usize,
    pub mean_ms: f64,
    pub min_ms: f64,
    pub max_ms: f64,
    /// Bit-identical to the reference stack
    pub identical: bool,
}

/// Value summary of one band of the reference stack.
#[derive(Debug, Clone, Serialize)]
pub struct BandSummary {
    pub band: String,
    pub coverage: f64,
    pub min: Option<f32>,
    pub max: Option<f32>,
}

/// Results of one scenario.
#[derive(Debug, Clone, Serialize)]
pub struct CheckResults {
    pub scenario: String,
    pub quantity: String,
    pub method: String,
    pub crs: String,
    pub width: usize,
    pub height: usize,
    pub runs: Vec<RunTiming>,
    pub bands: Vec<BandSummary>,
}

impl CheckResults {
    /// Whether every run reproduced the reference stack.
    pub fn deterministic(&self) -> bool {
        self.runs.iter().all(|r| r.identical)
    }
}

/// Runs scenarios against the published ASTER calibration table.
pub struct StackCheck {
    scenario: Scenario,
    table: CalibrationTable,
}

impl StackCheck {
    pub fn new(scenario: Scenario) -> Self {
        Self {
            scenario,
            table: CalibrationTable::aster(),
        }
    }

    pub fn run(&self) -> anyhow::Result<CheckResults> {
        self.scenario.validate()?;

        let (meta, bands) = scene::aster_scene(self.scenario.vnir_size, self.scenario.seed);
        let crs = resolve_target_crs(&self.scenario.target_crs, &meta.footprint())?;
        let grid = target_grid(&meta.footprint(), &crs, self.scenario.resolution_m)?;
        let geometry = meta.scene_geometry();

        info!(
            scenario = %self.scenario.name,
            bands = bands.len(),
            crs = %grid.crs,
            width = grid.width,
            height = grid.height,
            "Running stack check"
        );

        let mut reference: Option<Vec<Vec<u32>>> = None;
        let mut first_stack: Option<BandStack> = None;
        let mut runs = Vec::with_capacity(self.scenario.thread_counts.len());

        for &threads in &self.scenario.thread_counts {
            let config = PipelineConfig {
                threads: Some(threads),
                ..self.scenario.pipeline
            };
            let assembler = Assembler::new(&self.table, config)?;

            let mut timings = Vec::with_capacity(self.scenario.iterations);
            let mut identical = true;
            for _ in 0..self.scenario.iterations {
                let started = Instant::now();
                let stack = assembler
                    .assemble(&bands, &geometry, &grid)
                    .with_context(|| format!("assembly with {} threads", threads))?;
                timings.push(started.elapsed().as_secs_f64() * 1000.0);

                let bits = stack_bits(&stack);
                match &reference {
                    Some(expected) => identical &= *expected == bits,
                    None => {
                        reference = Some(bits);
                        first_stack = Some(stack);
                    }
                }
            }

            if !identical {
                warn!(threads = threads, "Stack differs from reference");
            }
            runs.push(summarize_timings(threads, &timings, identical));
        }

        let stack = first_stack.context("no stack was assembled")?;
        let bands = stack
            .layers
            .iter()
            .map(|layer| {
                let mut min: Option<f32> = None;
                let mut max: Option<f32> = None;
                for v in layer.data.iter().copied().filter(|&v| !stack.is_nodata(v)) {
                    min = Some(min.map_or(v, |m| m.min(v)));
                    max = Some(max.map_or(v, |m| m.max(v)));
                }
                BandSummary {
                    band: layer.band.to_string(),
                    coverage: stack.coverage(layer.band).unwrap_or(0.0),
                    min,
                    max,
                }
            })
            .collect();

        Ok(CheckResults {
            scenario: self.scenario.name.clone(),
            quantity: stack.quantity.to_string(),
            method: self.scenario.pipeline.method.to_string(),
            crs: stack.crs.clone(),
            width: stack.width,
            height: stack.height,
            runs,
            bands,
        })
    }
}

fn stack_bits(stack: &BandStack) -> Vec<Vec<u32>> {
    stack
        .layers
        .iter()
        .map(|l| l.data.iter().map(|v| v.to_bits()).collect())
        .collect()
}

fn summarize_timings(threads: usize, timings: &[f64], identical: bool) -> RunTiming {
    let n = timings.len().max(1) as f64;
    RunTiming {
        threads,
        iterations: timings.len(),
        mean_ms: timings.iter().sum::<f64>() / n,
        min_ms: timings.iter().copied().fold(f64::INFINITY, f64::min),
        max_ms: timings.iter().copied().fold(0.0, f64::max),
        identical,
    }
}

/// Target CRS of a scenario; "auto" picks the UTM zone of the footprint center.
pub fn resolve_target_crs(
    target_crs: &str,
    footprint: &BoundingBox,
) -> anyhow::Result<CrsCode> {
    if target_crs.eq_ignore_ascii_case(AUTO_CRS) {
        let (lon, lat) = footprint.center();
        return Ok(utm_zone_of(lon, lat));
    }
    Ok(CrsCode::parse(target_crs)?)
}

/// WGS84 UTM zone containing a point.
pub fn utm_zone_of(lon: f64, lat: f64) -> CrsCode {
    let zone = (((lon + 180.0) / 6.0).floor() as i64).rem_euclid(60) + 1;
    CrsCode::Utm {
        zone: zone as u8,
        north: lat >= 0.0,
    }
}

/// Grid of `resolution` cells covering a lon/lat footprint in `crs`.
///
/// The footprint edges are sampled densely so curved edges in the target
/// projection are still covered.
pub fn target_grid(
    footprint: &BoundingBox,
    crs: &CrsCode,
    resolution: f64,
) -> anyhow::Result<Grid> {
    const SAMPLES: usize = 16;
    let projection = Projection::from_code(*crs);

    let mut min_x = f64::INFINITY;
    let mut min_y = f64::INFINITY;
    let mut max_x = f64::NEG_INFINITY;
    let mut max_y = f64::NEG_INFINITY;

    for i in 0..=SAMPLES {
        let t = i as f64 / SAMPLES as f64;
        let lon = footprint.min_x + t * footprint.width();
        let lat = footprint.min_y + t * footprint.height();
        for (x, y) in [
            (lon, footprint.min_y),
            (lon, footprint.max_y),
            (footprint.min_x, lat),
            (footprint.max_x, lat),
        ] {
            let (px, py) = projection
                .from_geographic(x, y)
                .with_context(|| format!("footprint point ({}, {}) outside {}", x, y, crs))?;
            min_x = min_x.min(px);
            min_y = min_y.min(py);
            max_x = max_x.max(px);
            max_y = max_y.max(py);
        }
    }

    let bbox = BoundingBox::new(min_x, min_y, max_x, max_y);
    Ok(Grid::covering(&bbox, resolution, *crs)?)
}
