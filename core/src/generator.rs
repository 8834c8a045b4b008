use log::debug;

use crate::NoiseGenerator;
use crate::batch::{evaluate_batch, sample};
use crate::config::{NoiseConfig, NoiseRecord};
use crate::error::{NoiseError, Result};
use crate::utils::{HeightMap2D, linspace};

// Configured 2D noise field.
// Wraps an immutable `NoiseConfig` and applies its embedded domain warp to
// every query. Values are in `[0, 1]`; Ridged fractals return their raw
// bounded sum instead (roughly `[-1, 1]`).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Noise2D {
    config: NoiseConfig,
}

impl Noise2D {
    pub fn new(config: NoiseConfig) -> Self {
        Noise2D { config }
    }

    pub fn from_record(record: &NoiseRecord) -> Result<Self> {
        NoiseConfig::from_record(record).map(Noise2D::new)
    }

    pub fn to_record(&self) -> NoiseRecord {
        self.config.to_record()
    }

    pub fn config(&self) -> &NoiseConfig {
        &self.config
    }

    pub fn evaluate(&self, x: f64, y: f64) -> f64 {
        sample(&self.config, Some(self.config.domain_warp()), x, y)
    }

    pub fn evaluate_batch(&self, x: &[f64], y: &[f64]) -> Result<Vec<f64>> {
        evaluate_batch(x, y, &self.config, Some(self.config.domain_warp()))
    }

    // Sample a `width` x `height` grid spanning both ranges inclusively.
    // Returns `map[row][col]`, rows following `y_range`.
    pub fn evaluate_region(
        &self,
        x_range: (f64, f64),
        y_range: (f64, f64),
        width: usize,
        height: usize,
    ) -> Result<HeightMap2D> {
        if width == 0 || height == 0 {
            return Err(NoiseError::InvalidRegion { width, height });
        }

        debug!(
            "evaluating {}x{} region x={:?} y={:?}",
            width, height, x_range, y_range
        );

        let xs = linspace(x_range.0, x_range.1, width);
        let ys = linspace(y_range.0, y_range.1, height);

        let mut grid_x = Vec::with_capacity(width * height);
        let mut grid_y = Vec::with_capacity(width * height);
        for &y in &ys {
            grid_x.extend_from_slice(&xs);
            grid_y.extend(std::iter::repeat_n(y, width));
        }

        let values = self.evaluate_batch(&grid_x, &grid_y)?;
        Ok(values.chunks(width).map(<[f64]>::to_vec).collect())
    }

    // Where the embedded domain warp sends `(x, y)`, offsets included.
    pub fn warp_point(&self, x: f64, y: f64) -> (f64, f64) {
        let (offset_x, offset_y) = self.config.offset();
        self.config.domain_warp().warp(x + offset_x, y + offset_y)
    }
}

impl From<NoiseConfig> for Noise2D {
    fn from(config: NoiseConfig) -> Self {
        Noise2D::new(config)
    }
}

impl NoiseGenerator for Noise2D {
    fn get2(&self, x: f64, y: f64) -> f64 {
        self.evaluate(x, y)
    }
}
