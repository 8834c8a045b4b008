use crate::cellular2::single_cellular;
use crate::config::{FractalType, NoiseConfig, NoiseType};
use crate::perlin2::single_perlin;
use crate::simplex2::{single_simplex, single_simplex_smooth};
use crate::utils::{lerp, ping_pong};
use crate::value2::{single_value, single_value_cubic};

// 1 / (sum of octave amplitudes) so the largest possible octave sum stays near 1
pub fn fractal_bounding(octaves: u32, gain: f64) -> f64 {
    let gain = gain.abs();
    let mut amp = gain;
    let mut amp_fractal = 1.0;
    for _ in 1..octaves {
        amp_fractal += amp;
        amp *= gain;
    }
    1.0 / amp_fractal
}

// One octave of the configured noise family at a pre-transformed coordinate
#[inline]
pub fn single_noise(config: &NoiseConfig, seed: i32, x: f64, y: f64) -> f64 {
    match config.noise_type() {
        NoiseType::OpenSimplex2 => single_simplex(seed, x, y),
        NoiseType::OpenSimplex2S => single_simplex_smooth(seed, x, y),
        NoiseType::Cellular => single_cellular(
            seed,
            x,
            y,
            config.cellular_distance_function(),
            config.cellular_return_type(),
            config.cellular_jitter(),
        ),
        NoiseType::Perlin => single_perlin(seed, x, y),
        NoiseType::ValueCubic => single_value_cubic(seed, x, y),
        NoiseType::Value => single_value(seed, x, y),
    }
}

// Multi-octave sum at a pre-transformed coordinate, roughly [−1, +1]
pub fn gen_fractal(config: &NoiseConfig, x: f64, y: f64) -> f64 {
    match config.fractal_type() {
        FractalType::None => single_noise(config, config.seed(), x, y),
        FractalType::FBm => gen_fractal_fbm(config, x, y),
        FractalType::Ridged => gen_fractal_ridged(config, x, y),
        FractalType::PingPong => gen_fractal_ping_pong(config, x, y),
    }
}

// Fractal Brownian Motion: plain weighted sum of octaves
fn gen_fractal_fbm(config: &NoiseConfig, mut x: f64, mut y: f64) -> f64 {
    // Working copy; the stored seed is never touched
    let mut seed = config.seed();
    let mut sum = 0.0;
    let mut amp = config.fractal_bounding();

    for _ in 0..config.octaves() {
        let noise = single_noise(config, seed, x, y);
        seed = seed.wrapping_add(1);
        sum += noise * amp;
        amp *= lerp(1.0, (noise + 1.0).min(2.0) * 0.5, config.weighted_strength()) * config.gain();

        x *= config.lacunarity();
        y *= config.lacunarity();
    }

    sum
}

// Ridged multifractal: inverted absolute value builds sharp crests
fn gen_fractal_ridged(config: &NoiseConfig, mut x: f64, mut y: f64) -> f64 {
    let mut seed = config.seed();
    let mut sum = 0.0;
    let mut amp = config.fractal_bounding();

    for _ in 0..config.octaves() {
        let noise = single_noise(config, seed, x, y).abs();
        seed = seed.wrapping_add(1);
        sum += (noise * -2.0 + 1.0) * amp;
        amp *= lerp(1.0, 1.0 - noise, config.weighted_strength()) * config.gain();

        x *= config.lacunarity();
        y *= config.lacunarity();
    }

    sum
}

// Ping-pong: each octave folded through a triangle wave, giving terraces
fn gen_fractal_ping_pong(config: &NoiseConfig, mut x: f64, mut y: f64) -> f64 {
    let mut seed = config.seed();
    let mut sum = 0.0;
    let mut amp = config.fractal_bounding();

    for _ in 0..config.octaves() {
        let raw = single_noise(config, seed, x, y);
        let noise = ping_pong((raw + 1.0) * config.ping_pong_strength());
        seed = seed.wrapping_add(1);
        sum += (noise - 0.5) * 2.0 * amp;
        amp *= lerp(1.0, noise, config.weighted_strength()) * config.gain();

        x *= config.lacunarity();
        y *= config.lacunarity();
    }

    sum
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(fractal: FractalType, octaves: i32) -> NoiseConfig {
        NoiseConfig::builder()
            .noise_type(NoiseType::Perlin)
            .fractal_type(fractal)
            .seed(31)
            .octaves(octaves)
            .gain(0.5)
            .lacunarity(2.0)
            .build()
            .unwrap()
    }

    #[test]
    fn bounding_matches_geometric_sum() {
        assert_eq!(fractal_bounding(1, 0.5), 1.0);
        assert!((fractal_bounding(4, 0.5) - 1.0 / 1.875).abs() < 1e-12);
        // Sign of the gain is ignored
        assert_eq!(fractal_bounding(4, -0.5), fractal_bounding(4, 0.5));
    }

    #[test]
    fn none_is_a_single_sample() {
        let cfg = config(FractalType::None, 6);
        assert_eq!(gen_fractal(&cfg, 1.3, 2.7), single_perlin(31, 1.3, 2.7));
    }

    #[test]
    fn single_octave_fbm_is_bounded_sample() {
        // One octave: bounding is 1, so FBm equals one raw sample
        let cfg = config(FractalType::FBm, 1);
        assert_eq!(gen_fractal(&cfg, 0.4, -8.1), single_perlin(31, 0.4, -8.1));
    }

    #[test]
    fn octaves_use_incrementing_seeds() {
        let cfg = config(FractalType::FBm, 2);
        let b = cfg.fractal_bounding();
        let expected = single_perlin(31, 0.4, 0.9) * b + single_perlin(32, 0.8, 1.8) * b * 0.5;
        assert!((gen_fractal(&cfg, 0.4, 0.9) - expected).abs() < 1e-12);
    }

    #[test]
    fn ridged_single_octave_inverts_magnitude() {
        let cfg = config(FractalType::Ridged, 1);
        let raw = single_perlin(31, 5.25, 1.75).abs();
        assert!((gen_fractal(&cfg, 5.25, 1.75) - (1.0 - 2.0 * raw)).abs() < 1e-12);
    }

    #[test]
    fn ping_pong_stays_bounded() {
        let cfg = config(FractalType::PingPong, 5);
        for i in 0..500 {
            let v = gen_fractal(&cfg, i as f64 * 0.37, i as f64 * -0.11);
            assert!(v.abs() <= 1.0 + 1e-9, "ping pong {} out of range", v);
        }
    }

    #[test]
    fn seed_wraps_at_i32_max() {
        let cfg = NoiseConfig::builder()
            .seed(i32::MAX)
            .octaves(3)
            .build()
            .unwrap();
        // Must not overflow-panic in debug builds
        let _ = gen_fractal(&cfg, 3.3, 4.4);
    }
}
