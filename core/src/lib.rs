// noise2d holds the FastNoiseLite-compatible 2D samplers, fractals and domain warp
pub mod batch;
pub mod cellular2;
pub mod config;
pub mod domain_warp;
pub mod error;
pub mod fractal2;
pub mod generator;
pub mod hash;
pub mod perlin2;
pub mod simplex2;
pub mod tables;
pub mod utils;
pub mod value2;

pub use batch::{PARALLEL_THRESHOLD, evaluate_batch, evaluate_raw_batch, warp_batch};
pub use config::{
    CellularDistanceFunction, CellularReturnType, DomainWarpFractalType, DomainWarpType,
    FractalType, MAX_OCTAVES, NoiseConfig, NoiseConfigBuilder, NoiseRecord, NoiseType,
    RECORD_VERSION,
};
pub use domain_warp::{DomainWarpConfig, DomainWarpConfigBuilder};
pub use error::{NoiseError, Result};
pub use generator::Noise2D;
pub use utils::{HeightMap2D, flatten2};

// Anything that can be sampled as a 2D scalar field
pub trait NoiseGenerator {
    // Sample 2D noise at (x, y).
    fn get2(&self, x: f64, y: f64) -> f64;
}
