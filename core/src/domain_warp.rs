// Domain warp: displaces sample coordinates with an auxiliary vector field
// before the main noise is evaluated.

use std::fmt;

use log::debug;

use crate::config::{DomainWarpFractalType, DomainWarpType, check_finite, check_octaves};
use crate::error::Result;
use crate::fractal2::fractal_bounding;
use crate::hash::{grad_coord_dual, grad_coord_out, hash2};
use crate::simplex2::{G2, skew};
use crate::tables::{PRIME_X, PRIME_Y, RAND_VECS_2D};
use crate::utils::{floor_cell, interp_hermite, lerp};

// Kernel output scales that bring each warp type to a comparable amplitude
const SIMPLEX_WARP_SCALE: f64 = 38.283687591552734375;
const SIMPLEX_REDUCED_WARP_SCALE: f64 = 16.0;

// Progressive octaves rotate their delta by this (cos, sin) pair
const PROGRESSIVE_ROTATION: (f64, f64) = (0.6, 0.8);

// Validated domain-warp parameters plus the seeded permutation table used by
// the basic-grid kernel. Immutable and shareable across threads once built.
#[derive(Clone, PartialEq)]
pub struct DomainWarpConfig {
    enabled: bool,
    warp_type: DomainWarpType,
    amplitude: f64,
    frequency: f64,
    fractal_type: DomainWarpFractalType,
    octaves: u32,
    lacunarity: f64,
    gain: f64,
    seed: i32,
    fractal_bounding: f64,
    perm: [u8; 256],
}

impl DomainWarpConfig {
    pub fn builder() -> DomainWarpConfigBuilder {
        DomainWarpConfigBuilder::default()
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }

    pub fn warp_type(&self) -> DomainWarpType {
        self.warp_type
    }

    pub fn amplitude(&self) -> f64 {
        self.amplitude
    }

    pub fn frequency(&self) -> f64 {
        self.frequency
    }

    pub fn fractal_type(&self) -> DomainWarpFractalType {
        self.fractal_type
    }

    pub fn octaves(&self) -> u32 {
        self.octaves
    }

    pub fn lacunarity(&self) -> f64 {
        self.lacunarity
    }

    pub fn gain(&self) -> f64 {
        self.gain
    }

    pub fn seed(&self) -> i32 {
        self.seed
    }

    pub fn fractal_bounding(&self) -> f64 {
        self.fractal_bounding
    }

    // Warp a single coordinate. A disabled warp returns the input untouched.
    pub fn warp(&self, x: f64, y: f64) -> (f64, f64) {
        if !self.enabled {
            return (x, y);
        }

        match self.fractal_type {
            DomainWarpFractalType::None => {
                let amp = self.amplitude * self.fractal_bounding;
                let (dx, dy) = self.single_warp(self.seed, amp, self.frequency, x, y);
                (x + dx, y + dy)
            }
            DomainWarpFractalType::Progressive => self.warp_progressive(x, y),
            DomainWarpFractalType::Independent => self.warp_independent(x, y),
        }
    }

    // Every octave warps the already warped coordinate
    fn warp_progressive(&self, x: f64, y: f64) -> (f64, f64) {
        let (cos, sin) = PROGRESSIVE_ROTATION;
        let mut seed = self.seed;
        let mut amp = self.amplitude * self.fractal_bounding;
        let mut freq = self.frequency;
        let (mut wx, mut wy) = (x, y);

        for _ in 0..self.octaves {
            let (dx, dy) = self.single_warp(seed, amp, freq, wx, wy);
            wx += dx * cos - dy * sin;
            wy += dx * sin + dy * cos;

            seed = seed.wrapping_add(1);
            amp *= self.gain;
            freq *= self.lacunarity;
        }

        (wx, wy)
    }

    // Every octave warps the original coordinate; deltas are summed
    fn warp_independent(&self, x: f64, y: f64) -> (f64, f64) {
        let mut seed = self.seed;
        let mut amp = self.amplitude * self.fractal_bounding;
        let mut freq = self.frequency;
        let (mut total_dx, mut total_dy) = (0.0, 0.0);

        for _ in 0..self.octaves {
            let (dx, dy) = self.single_warp(seed, amp, freq, x, y);
            total_dx += dx;
            total_dy += dy;

            seed = seed.wrapping_add(1);
            amp *= self.gain;
            freq *= self.lacunarity;
        }

        (x + total_dx, y + total_dy)
    }

    // One kernel evaluation, returning the displacement (dx, dy)
    #[inline]
    fn single_warp(&self, seed: i32, amp: f64, freq: f64, x: f64, y: f64) -> (f64, f64) {
        match self.warp_type {
            DomainWarpType::OpenSimplex2 => {
                warp_simplex(seed, amp * SIMPLEX_WARP_SCALE, x * freq, y * freq, false)
            }
            DomainWarpType::OpenSimplex2Reduced => warp_simplex(
                seed,
                amp * SIMPLEX_REDUCED_WARP_SCALE,
                x * freq,
                y * freq,
                true,
            ),
            DomainWarpType::BasicGrid => self.warp_basic_grid(seed, amp, freq, x, y),
        }
    }

    // Hermite blend of the random vectors at the four surrounding lattice corners.
    // The vector index goes through the seeded permutation table.
    fn warp_basic_grid(&self, seed: i32, amp: f64, freq: f64, x: f64, y: f64) -> (f64, f64) {
        let xf = x * freq;
        let yf = y * freq;

        let (x0, xd) = floor_cell(xf);
        let (y0, yd) = floor_cell(yf);

        let xs = interp_hermite(xd);
        let ys = interp_hermite(yd);

        let x0 = x0.wrapping_mul(PRIME_X);
        let y0 = y0.wrapping_mul(PRIME_Y);
        let x1 = x0.wrapping_add(PRIME_X);
        let y1 = y0.wrapping_add(PRIME_Y);

        let h00 = self.vector_index(seed, x0, y0);
        let h10 = self.vector_index(seed, x1, y0);
        let lx0x = lerp(RAND_VECS_2D[h00] as f64, RAND_VECS_2D[h10] as f64, xs);
        let ly0x = lerp(RAND_VECS_2D[h00 | 1] as f64, RAND_VECS_2D[h10 | 1] as f64, xs);

        let h01 = self.vector_index(seed, x0, y1);
        let h11 = self.vector_index(seed, x1, y1);
        let lx1x = lerp(RAND_VECS_2D[h01] as f64, RAND_VECS_2D[h11] as f64, xs);
        let ly1x = lerp(RAND_VECS_2D[h01 | 1] as f64, RAND_VECS_2D[h11 | 1] as f64, xs);

        (lerp(lx0x, lx1x, ys) * amp, lerp(ly0x, ly1x, ys) * amp)
    }

    #[inline(always)]
    fn vector_index(&self, seed: i32, x_primed: i32, y_primed: i32) -> usize {
        let hash = hash2(seed, x_primed, y_primed);
        (self.perm[(hash & 255) as usize] as usize) << 1
    }
}

impl Default for DomainWarpConfig {
    fn default() -> Self {
        let builder = DomainWarpConfigBuilder::default();
        let octaves = builder.octaves as u32;
        builder.finish(octaves)
    }
}

impl fmt::Debug for DomainWarpConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DomainWarpConfig")
            .field("enabled", &self.enabled)
            .field("warp_type", &self.warp_type)
            .field("amplitude", &self.amplitude)
            .field("frequency", &self.frequency)
            .field("fractal_type", &self.fractal_type)
            .field("octaves", &self.octaves)
            .field("lacunarity", &self.lacunarity)
            .field("gain", &self.gain)
            .field("seed", &self.seed)
            .finish_non_exhaustive()
    }
}

// Simplex-lattice warp over a frequency-scaled coordinate.
// `out_grad_only` selects the reduced kernel (random vectors only).
fn warp_simplex(seed: i32, amp: f64, x: f64, y: f64, out_grad_only: bool) -> (f64, f64) {
    let (x, y) = skew(x, y);

    let (i, xi) = floor_cell(x);
    let (j, yi) = floor_cell(y);

    let t = (xi + yi) * G2;
    let x0 = xi - t;
    let y0 = yi - t;

    let i = i.wrapping_mul(PRIME_X);
    let j = j.wrapping_mul(PRIME_Y);

    let corner = |xp: i32, yp: i32, xd: f64, yd: f64| {
        if out_grad_only {
            grad_coord_out(seed, xp, yp)
        } else {
            grad_coord_dual(seed, xp, yp, xd, yd)
        }
    };

    let (mut vx, mut vy) = (0.0, 0.0);

    let a = 0.5 - x0 * x0 - y0 * y0;
    if a > 0.0 {
        let aaaa = (a * a) * (a * a);
        let (xo, yo) = corner(i, j, x0, y0);
        vx += aaaa * xo;
        vy += aaaa * yo;
    }

    let c = (2.0 * (1.0 - 2.0 * G2) * (1.0 / G2 - 2.0)) * t
        + ((-2.0 * (1.0 - 2.0 * G2) * (1.0 - 2.0 * G2)) + a);
    if c > 0.0 {
        let x2 = x0 + (2.0 * G2 - 1.0);
        let y2 = y0 + (2.0 * G2 - 1.0);
        let cccc = (c * c) * (c * c);
        let (xo, yo) = corner(i.wrapping_add(PRIME_X), j.wrapping_add(PRIME_Y), x2, y2);
        vx += cccc * xo;
        vy += cccc * yo;
    }

    if y0 > x0 {
        let x1 = x0 + G2;
        let y1 = y0 + (G2 - 1.0);
        let b = 0.5 - x1 * x1 - y1 * y1;
        if b > 0.0 {
            let bbbb = (b * b) * (b * b);
            let (xo, yo) = corner(i, j.wrapping_add(PRIME_Y), x1, y1);
            vx += bbbb * xo;
            vy += bbbb * yo;
        }
    } else {
        let x1 = x0 + (G2 - 1.0);
        let y1 = y0 + G2;
        let b = 0.5 - x1 * x1 - y1 * y1;
        if b > 0.0 {
            let bbbb = (b * b) * (b * b);
            let (xo, yo) = corner(i.wrapping_add(PRIME_X), j, x1, y1);
            vx += bbbb * xo;
            vy += bbbb * yo;
        }
    }

    (vx * amp, vy * amp)
}

// Seeded Fisher–Yates shuffle of 0..=255
fn build_permutation(seed: i32) -> [u8; 256] {
    let mut perm = [0u8; 256];
    for (i, p) in perm.iter_mut().enumerate() {
        *p = i as u8;
    }

    // Xorshift RNG; the constant keeps the state non-zero for every seed
    let mut x = (seed as u32 as u64) ^ 0xDEAD_BEEF_CAFE_BABE_u64;
    let mut rng = || {
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        x
    };

    for i in (1..256).rev() {
        let j = (rng() % (i as u64 + 1)) as usize;
        perm.swap(i, j);
    }
    perm
}

// Builder for `DomainWarpConfig`; validated in `DomainWarpConfigBuilder::build`.
#[derive(Debug, Clone)]
pub struct DomainWarpConfigBuilder {
    enabled: bool,
    warp_type: DomainWarpType,
    amplitude: f64,
    frequency: f64,
    fractal_type: DomainWarpFractalType,
    octaves: i32,
    lacunarity: f64,
    gain: f64,
    seed: i32,
}

impl Default for DomainWarpConfigBuilder {
    fn default() -> Self {
        Self {
            enabled: false,
            warp_type: DomainWarpType::OpenSimplex2,
            amplitude: 30.0,
            frequency: 0.05,
            fractal_type: DomainWarpFractalType::None,
            octaves: 5,
            lacunarity: 2.0,
            gain: 0.5,
            seed: 0,
        }
    }
}

impl DomainWarpConfigBuilder {
    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn warp_type(mut self, warp_type: DomainWarpType) -> Self {
        self.warp_type = warp_type;
        self
    }

    pub fn amplitude(mut self, amplitude: f64) -> Self {
        self.amplitude = amplitude;
        self
    }

    pub fn frequency(mut self, frequency: f64) -> Self {
        self.frequency = frequency;
        self
    }

    pub fn fractal_type(mut self, fractal_type: DomainWarpFractalType) -> Self {
        self.fractal_type = fractal_type;
        self
    }

    pub fn octaves(mut self, octaves: i32) -> Self {
        self.octaves = octaves;
        self
    }

    pub fn lacunarity(mut self, lacunarity: f64) -> Self {
        self.lacunarity = lacunarity;
        self
    }

    pub fn gain(mut self, gain: f64) -> Self {
        self.gain = gain;
        self
    }

    pub fn seed(mut self, seed: i32) -> Self {
        self.seed = seed;
        self
    }

    pub fn build(self) -> Result<DomainWarpConfig> {
        check_finite("domain_warp_amplitude", self.amplitude)?;
        check_finite("domain_warp_frequency", self.frequency)?;
        check_finite("domain_warp_fractal_lacunarity", self.lacunarity)?;
        check_finite("domain_warp_fractal_gain", self.gain)?;
        let octaves = check_octaves("domain_warp_fractal_octaves", self.octaves)?;

        let config = self.finish(octaves);
        if config.enabled {
            debug!(
                "built domain warp: {:?}/{:?} seed={} amp={} freq={}",
                config.warp_type, config.fractal_type, config.seed, config.amplitude, config.frequency
            );
        }
        Ok(config)
    }

    fn finish(self, octaves: u32) -> DomainWarpConfig {
        DomainWarpConfig {
            enabled: self.enabled,
            warp_type: self.warp_type,
            amplitude: self.amplitude,
            frequency: self.frequency,
            fractal_type: self.fractal_type,
            octaves,
            lacunarity: self.lacunarity,
            gain: self.gain,
            seed: self.seed,
            fractal_bounding: fractal_bounding(octaves, self.gain),
            perm: build_permutation(self.seed),
        }
    }
}
