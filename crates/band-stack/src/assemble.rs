//! Per-band calibration and resampling, merged in canonical band order.

use aster_common::{Grid, RawBand, SceneGeometry};
use grid_processor::{resample, ResamplingMethod, SourceRaster};
use radiometry::{CalibrationTable, Calibrator, Quantity};
use rayon::prelude::*;
use std::time::Instant;
use tracing::{debug, info};

use crate::{AssemblyError, BandStack, PipelineConfig, Result, StackLayer};

/// Assembles scenes into band stacks with a fixed configuration.
///
/// Holds no per-scene state, so one assembler can serve many scenes,
/// including concurrently.
#[derive(Debug)]
pub struct Assembler<'a> {
    table: &'a CalibrationTable,
    config: PipelineConfig,
    pool: Option<rayon::ThreadPool>,
}

impl<'a> Assembler<'a> {
    /// Validate the configuration and build the worker pool, if one is requested.
    pub fn new(table: &'a CalibrationTable, config: PipelineConfig) -> Result<Self> {
        config.validate().map_err(AssemblyError::InvalidConfig)?;

        let pool = match config.threads {
            Some(threads) => Some(
                rayon::ThreadPoolBuilder::new()
                    .num_threads(threads)
                    .thread_name(|i| format!("band-stack-{}", i))
                    .build()
                    .map_err(|e| AssemblyError::ThreadPool(e.to_string()))?,
            ),
            None => None,
        };

        Ok(Self {
            table,
            config,
            pool,
        })
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Calibrate every band, resample it onto `grid` and stack the results.
    ///
    /// The scene geometry is checked before any band runs. Bands may arrive
    /// in any order; the stack is always in canonical band order. The first
    /// failing band aborts the whole scene.
    pub fn assemble(
        &self,
        bands: &[RawBand],
        scene: &SceneGeometry,
        grid: &Grid,
    ) -> Result<BandStack> {
        let started = Instant::now();
        let calibrator = Calibrator::new(self.table, scene).map_err(AssemblyError::Geometry)?;

        let selected = self.select(bands)?;
        info!(
            bands = selected.len(),
            supplied = bands.len(),
            quantity = %self.config.quantity,
            method = %self.config.method,
            width = grid.width,
            height = grid.height,
            crs = %grid.crs,
            "Assembling band stack"
        );

        let process = || -> Result<Vec<StackLayer>> {
            selected
                .par_iter()
                .map(|raw| self.process_band(&calibrator, raw, grid))
                .collect()
        };
        let layers = match &self.pool {
            Some(pool) => pool.install(process)?,
            None => process()?,
        };

        info!(
            bands = layers.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Assembled band stack"
        );

        Ok(BandStack::new(
            layers,
            grid,
            self.config.quantity,
            self.config.nodata,
        ))
    }

    /// Bands to process, in canonical order.
    fn select<'b>(&self, bands: &'b [RawBand]) -> Result<Vec<&'b RawBand>> {
        let mut sorted: Vec<&RawBand> = bands.iter().collect();
        sorted.sort_by_key(|b| b.band);

        if let Some(pair) = sorted.windows(2).find(|w| w[0].band == w[1].band) {
            return Err(AssemblyError::DuplicateBand(pair[0].band));
        }

        let selected: Vec<&RawBand> = match self.config.quantity {
            Quantity::Radiance => sorted,
            Quantity::Reflectance => sorted
                .into_iter()
                .filter(|b| {
                    let keep = b.band.is_reflective();
                    if !keep {
                        debug!(band = %b.band, "Skipping thermal band for reflectance output");
                    }
                    keep
                })
                .collect(),
        };

        if selected.is_empty() {
            return Err(AssemblyError::EmptyScene);
        }
        Ok(selected)
    }

    fn process_band(
        &self,
        calibrator: &Calibrator<'_>,
        raw: &RawBand,
        grid: &Grid,
    ) -> Result<StackLayer> {
        let calibrated = calibrator
            .calibrate(raw, self.config.quantity)
            .map_err(|e| AssemblyError::band(raw.band, e))?;

        let source = SourceRaster::new(
            &calibrated.data,
            calibrated.width,
            calibrated.height,
            calibrated.transform,
            &calibrated.crs,
        );
        let data = resample(&source, grid, self.config.method, self.config.nodata)
            .map_err(|e| AssemblyError::band(raw.band, e))?;

        debug!(
            band = %raw.band,
            native_width = raw.width,
            native_height = raw.height,
            "Band ready"
        );

        Ok(StackLayer {
            band: raw.band,
            data,
        })
    }
}

/// Assemble one scene with the default configuration and the given method.
///
/// Produces a reflectance stack of the reflective bands on the global
/// rayon pool.
pub fn assemble(
    bands: &[RawBand],
    table: &CalibrationTable,
    scene: &SceneGeometry,
    grid: &Grid,
    method: ResamplingMethod,
) -> Result<BandStack> {
    let config = PipelineConfig {
        method,
        ..PipelineConfig::default()
    };
    Assembler::new(table, config)?.assemble(bands, scene, grid)
}
