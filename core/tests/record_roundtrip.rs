use noise2d::{
    CellularReturnType, DomainWarpConfig, DomainWarpFractalType, DomainWarpType, FractalType,
    Noise2D, NoiseConfig, NoiseError, NoiseRecord, NoiseType,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn warped_config(seed: i32) -> NoiseConfig {
    let warp = DomainWarpConfig::builder()
        .enabled(true)
        .warp_type(DomainWarpType::OpenSimplex2Reduced)
        .fractal_type(DomainWarpFractalType::Progressive)
        .amplitude(25.0)
        .frequency(0.03)
        .octaves(3)
        .lacunarity(2.2)
        .gain(0.45)
        .seed(seed)
        .build()
        .expect("valid warp");

    NoiseConfig::builder()
        .noise_type(NoiseType::OpenSimplex2S)
        .fractal_type(FractalType::Ridged)
        .seed(seed)
        .frequency(0.015)
        .offset(100.0, -250.0)
        .octaves(6)
        .lacunarity(2.1)
        .gain(0.55)
        .weighted_strength(0.25)
        .cellular_return_type(CellularReturnType::Distance2Add)
        .domain_warp(warp)
        .build()
        .expect("valid config")
}

#[test]
fn test_roundtrip_record() {
    // Build a warped generator and flatten it
    let noise = Noise2D::new(warped_config(-4242));
    let record = noise.to_record();
    assert_eq!(record.domain_warp_enabled, 1);
    assert_eq!(record.persistence, 0.55);

    // Rebuild from the record and compare at random points
    let back = Noise2D::from_record(&record).expect("record rebuilds");
    assert_eq!(back, noise);

    let mut rng = StdRng::seed_from_u64(11);
    for _ in 0..100 {
        let x = rng.gen_range(-2000.0..2000.0);
        let y = rng.gen_range(-2000.0..2000.0);
        assert_eq!(back.evaluate(x, y).to_bits(), noise.evaluate(x, y).to_bits());
    }
}

#[test]
fn test_roundtrip_json() {
    let record = Noise2D::new(warped_config(77)).to_record();

    // Serialize and read back with the stored key names
    let json = serde_json::to_string(&record).expect("serialize");
    assert!(json.contains("\"domain_warp_fractal_octaves\":3"));
    let parsed: NoiseRecord = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(parsed, record);

    let a = Noise2D::from_record(&parsed).expect("record rebuilds");
    let b = Noise2D::from_record(&record).expect("record rebuilds");
    assert_eq!(a.evaluate(1.25, -9.5), b.evaluate(1.25, -9.5));
}

#[test]
fn test_record_errors() {
    let bad_type = NoiseRecord {
        noise_type: 42,
        ..NoiseRecord::default()
    };
    assert!(matches!(
        Noise2D::from_record(&bad_type),
        Err(NoiseError::InvalidParameter { name: "noise_type", .. })
    ));

    let bad_octaves = NoiseRecord {
        domain_warp_fractal_octaves: 0,
        ..NoiseRecord::default()
    };
    assert!(matches!(
        Noise2D::from_record(&bad_octaves),
        Err(NoiseError::InvalidParameter {
            name: "domain_warp_fractal_octaves",
            ..
        })
    ));

    let bad_frequency = NoiseRecord {
        frequency: f64::NAN,
        ..NoiseRecord::default()
    };
    assert!(Noise2D::from_record(&bad_frequency).is_err());
}

#[test]
fn test_empty_record_is_default() {
    let record: NoiseRecord = serde_json::from_str("{}").expect("deserialize");
    let noise = Noise2D::from_record(&record).expect("record rebuilds");
    assert_eq!(noise, Noise2D::default());
}

#[test]
fn test_roundtrip_independent_warp_seed() {
    // Warp seeded apart from the main noise
    let warp = DomainWarpConfig::builder()
        .enabled(true)
        .warp_type(DomainWarpType::BasicGrid)
        .amplitude(35.0)
        .seed(99)
        .build()
        .expect("valid warp");
    let noise = Noise2D::new(
        NoiseConfig::builder()
            .seed(1)
            .frequency(0.02)
            .domain_warp(warp)
            .build()
            .expect("valid config"),
    );

    let json = serde_json::to_string(&noise.to_record()).expect("serialize");
    assert!(json.contains("\"domain_warp_seed\":99"));
    let record: NoiseRecord = serde_json::from_str(&json).expect("deserialize");
    let back = Noise2D::from_record(&record).expect("record rebuilds");
    assert_eq!(back.config().domain_warp().seed(), 99);

    let mut rng = StdRng::seed_from_u64(12);
    for _ in 0..100 {
        let x = rng.gen_range(-2000.0..2000.0);
        let y = rng.gen_range(-2000.0..2000.0);
        assert_eq!(back.evaluate(x, y).to_bits(), noise.evaluate(x, y).to_bits());
    }
}

#[test]
fn test_record_carries_version() {
    let record = Noise2D::default().to_record();
    assert_eq!(record.version, "1.0");
    let json = serde_json::to_string(&record).expect("serialize");
    assert!(json.contains("\"version\":\"1.0\""));
}

