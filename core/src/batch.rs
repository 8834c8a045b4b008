// Vectorized evaluation over coordinate slices.
//
// Every element runs the same pipeline: offset, domain warp, frequency,
// simplex skew, fractal sum, output mapping. Elements share nothing, so large
// batches are split across the rayon pool.

use log::trace;
use rayon::prelude::*;

use crate::config::{FractalType, NoiseConfig};
use crate::domain_warp::DomainWarpConfig;
use crate::error::{NoiseError, Result};
use crate::fractal2::gen_fractal;
use crate::simplex2::skew;

// Batches with at least this many elements are evaluated in parallel.
pub const PARALLEL_THRESHOLD: usize = 4096;

// Evaluate the configured noise at every `(x[i], y[i])`.
// `warp` is applied after the offsets when it is enabled; pass `None` to skip
// the warp stage entirely. Results are in `[0, 1]`, except for Ridged fractals
// which keep their raw bounded sum.
pub fn evaluate_batch(
    x: &[f64],
    y: &[f64],
    config: &NoiseConfig,
    warp: Option<&DomainWarpConfig>,
) -> Result<Vec<f64>> {
    map_batch(x, y, |px, py| sample(config, warp, px, py))
}

// Same pipeline as `evaluate_batch` without the output mapping.
pub fn evaluate_raw_batch(
    x: &[f64],
    y: &[f64],
    config: &NoiseConfig,
    warp: Option<&DomainWarpConfig>,
) -> Result<Vec<f64>> {
    map_batch(x, y, |px, py| sample_raw(config, warp, px, py))
}

// Run only the warp stage; returns the displaced x and y coordinates.
pub fn warp_batch(x: &[f64], y: &[f64], warp: &DomainWarpConfig) -> Result<(Vec<f64>, Vec<f64>)> {
    let points = map_batch(x, y, |px, py| warp.warp(px, py))?;
    Ok(points.into_iter().unzip())
}

// One fully mapped sample.
#[inline]
pub fn sample(config: &NoiseConfig, warp: Option<&DomainWarpConfig>, x: f64, y: f64) -> f64 {
    map_output(config.fractal_type(), sample_raw(config, warp, x, y))
}

// One sample before output mapping, roughly [−1, +1].
pub fn sample_raw(config: &NoiseConfig, warp: Option<&DomainWarpConfig>, x: f64, y: f64) -> f64 {
    let (offset_x, offset_y) = config.offset();
    let mut px = x + offset_x;
    let mut py = y + offset_y;

    if let Some(warp) = warp {
        (px, py) = warp.warp(px, py);
    }

    px *= config.frequency();
    py *= config.frequency();

    if config.noise_type().is_simplex() {
        (px, py) = skew(px, py);
    }

    gen_fractal(config, px, py)
}

// Ridged keeps its raw sum; everything else is remapped onto [0, 1]
#[inline]
fn map_output(fractal_type: FractalType, raw: f64) -> f64 {
    match fractal_type {
        FractalType::Ridged => raw,
        _ => (raw * 0.5 + 0.5).clamp(0.0, 1.0),
    }
}

fn map_batch<T, F>(x: &[f64], y: &[f64], f: F) -> Result<Vec<T>>
where
    T: Send,
    F: Fn(f64, f64) -> T + Sync,
{
    if x.len() != y.len() {
        return Err(NoiseError::LengthMismatch {
            x: x.len(),
            y: y.len(),
        });
    }

    let n = x.len();
    if n >= PARALLEL_THRESHOLD {
        trace!("evaluating {} points on the rayon pool", n);
        Ok(x.par_iter()
            .zip(y.par_iter())
            .map(|(&px, &py)| f(px, py))
            .collect())
    } else {
        trace!("evaluating {} points serially", n);
        Ok(x.iter().zip(y).map(|(&px, &py)| f(px, py)).collect())
    }
}
