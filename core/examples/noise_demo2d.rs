use noise2d::{FractalType, Noise2D, NoiseConfig, NoiseType};

fn main() -> Result<(), noise2d::NoiseError> {
    env_logger::init();

    // Seed 2025 Perlin FBm, 5 octaves
    let noise: Noise2D = NoiseConfig::builder()
        .noise_type(NoiseType::Perlin)
        .fractal_type(FractalType::FBm)
        .seed(2025)
        .frequency(0.02)
        .octaves(5)
        .build()?
        .into();

    let map = noise.evaluate_region((0.0, 256.0), (0.0, 128.0), 64, 32)?;

    // Print the map as shaded characters
    const SHADES: &[u8] = b" .:-=+*#%@";
    for row in &map {
        let line: String = row
            .iter()
            .map(|&v| {
                let i = (v * (SHADES.len() - 1) as f64).round() as usize;
                SHADES[i.min(SHADES.len() - 1)] as char
            })
            .collect();
        println!("{}", line);
    }
    Ok(())
}
