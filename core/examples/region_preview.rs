use image::{GrayImage, Luma};
use noise2d::{
    DomainWarpConfig, DomainWarpFractalType, DomainWarpType, FractalType, Noise2D, NoiseConfig,
    NoiseType,
};
use std::error::Error;

const SIZE: usize = 256;

fn save_region(noise: &Noise2D, filename: &str) -> Result<(), Box<dyn Error>> {
    let map = noise.evaluate_region((0.0, SIZE as f64), (0.0, SIZE as f64), SIZE, SIZE)?;

    // Ridged values are not remapped, so stretch by the observed range
    let (min, max) = map
        .iter()
        .flatten()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        });

    let mut img = GrayImage::new(SIZE as u32, SIZE as u32);
    for (y, row) in map.iter().enumerate() {
        for (x, &v) in row.iter().enumerate() {
            let norm = if (max - min).abs() < f64::EPSILON {
                0.5
            } else {
                (v - min) / (max - min)
            };
            img.put_pixel(x as u32, y as u32, Luma([(norm * 255.0).round() as u8]));
        }
    }
    img.save(filename)?;
    println!("Saved {}", filename);
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    for &noise_type in NoiseType::ALL {
        let noise: Noise2D = NoiseConfig::builder()
            .noise_type(noise_type)
            .seed(42)
            .frequency(0.02)
            .build()?
            .into();
        save_region(&noise, &format!("{:?}.png", noise_type).to_lowercase())?;
    }

    // Ridged simplex pushed through a progressive warp
    let warp = DomainWarpConfig::builder()
        .enabled(true)
        .warp_type(DomainWarpType::OpenSimplex2)
        .fractal_type(DomainWarpFractalType::Progressive)
        .amplitude(40.0)
        .frequency(0.01)
        .octaves(3)
        .seed(42)
        .build()?;
    let warped: Noise2D = NoiseConfig::builder()
        .noise_type(NoiseType::OpenSimplex2)
        .fractal_type(FractalType::Ridged)
        .seed(42)
        .frequency(0.015)
        .domain_warp(warp)
        .build()?
        .into();
    save_region(&warped, "ridged_warped.png")?;

    Ok(())
}
