// Noise parameters: typed enums, the validated NoiseConfig and its flat record form.
//
// Integer codes match FastNoiseLite's own enum ordering because stored
// configurations carry integers, not names.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::domain_warp::DomainWarpConfig;
use crate::error::{NoiseError, Result};
use crate::fractal2::fractal_bounding;

// Octave counts above this are clamped
pub const MAX_OCTAVES: u32 = 9;

// Written into every record; stored configurations carry it as a string
pub const RECORD_VERSION: &str = "1.0";

macro_rules! coded_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $field:literal {
            $($(#[$vmeta:meta])* $variant:ident = $code:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub enum $name {
            $($(#[$vmeta])* $variant = $code),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            // Integer code used in parameter records.
            pub fn code(self) -> i32 {
                self as i32
            }
        }

        impl TryFrom<i32> for $name {
            type Error = NoiseError;

            fn try_from(code: i32) -> Result<Self> {
                match code {
                    $($code => Ok($name::$variant),)+
                    other => Err(NoiseError::invalid($field, format!("unknown code {}", other))),
                }
            }
        }
    };
}

coded_enum! {
    // Single-octave noise family.
    NoiseType, "noise_type" {
        OpenSimplex2 = 0,
        OpenSimplex2S = 1,
        Cellular = 2,
        Perlin = 3,
        ValueCubic = 4,
        Value = 5,
    }
}

coded_enum! {
    // How octaves are combined.
    FractalType, "fractal_type" {
        None = 0,
        FBm = 1,
        Ridged = 2,
        PingPong = 3,
    }
}

coded_enum! {
    // Metric used by cellular noise to measure distance to a feature point.
    CellularDistanceFunction, "cellular_distance_function" {
        Euclidean = 0,
        EuclideanSquared = 1,
        Manhattan = 2,
        Hybrid = 3,
    }
}

coded_enum! {
    // Value returned by cellular noise. Ordering matters: sqrt is applied
    // for Euclidean from `Distance` upwards.
    CellularReturnType, "cellular_return_type" {
        CellValue = 0,
        Distance = 1,
        Distance2 = 2,
        Distance2Add = 3,
        Distance2Sub = 4,
        Distance2Mul = 5,
        Distance2Div = 6,
    }
}

coded_enum! {
    // Kernel used to displace coordinates.
    DomainWarpType, "domain_warp_type" {
        OpenSimplex2 = 0,
        OpenSimplex2Reduced = 1,
        BasicGrid = 2,
    }
}

coded_enum! {
    // How warp octaves are combined.
    DomainWarpFractalType, "domain_warp_fractal_type" {
        None = 0,
        Progressive = 1,
        Independent = 2,
    }
}

impl NoiseType {
    // Simplex samplers expect skewed input coordinates
    pub fn is_simplex(self) -> bool {
        matches!(self, NoiseType::OpenSimplex2 | NoiseType::OpenSimplex2S)
    }
}

pub(crate) fn check_finite(name: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(NoiseError::invalid(name, format!("must be finite, got {}", value)))
    }
}

// Reject non-positive counts, clamp large ones to MAX_OCTAVES
pub(crate) fn check_octaves(name: &'static str, octaves: i32) -> Result<u32> {
    if octaves <= 0 {
        return Err(NoiseError::invalid(
            name,
            format!("must be at least 1, got {}", octaves),
        ));
    }
    Ok((octaves as u32).min(MAX_OCTAVES))
}

// Immutable, validated parameter set for the main noise.
// Built through `NoiseConfig::builder` or `NoiseConfig::from_record`.
// Changing a parameter means building a new config.
#[derive(Debug, Clone, PartialEq)]
pub struct NoiseConfig {
    noise_type: NoiseType,
    fractal_type: FractalType,
    seed: i32,
    frequency: f64,
    offset_x: f64,
    offset_y: f64,
    octaves: u32,
    lacunarity: f64,
    gain: f64,
    weighted_strength: f64,
    ping_pong_strength: f64,
    cellular_distance_function: CellularDistanceFunction,
    cellular_return_type: CellularReturnType,
    cellular_jitter: f64,
    fractal_bounding: f64,
    domain_warp: DomainWarpConfig,
}

impl NoiseConfig {
    pub fn builder() -> NoiseConfigBuilder {
        NoiseConfigBuilder::default()
    }

    pub fn noise_type(&self) -> NoiseType {
        self.noise_type
    }

    pub fn fractal_type(&self) -> FractalType {
        self.fractal_type
    }

    pub fn seed(&self) -> i32 {
        self.seed
    }

    pub fn frequency(&self) -> f64 {
        self.frequency
    }

    pub fn offset(&self) -> (f64, f64) {
        (self.offset_x, self.offset_y)
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

    pub fn weighted_strength(&self) -> f64 {
        self.weighted_strength
    }

    pub fn ping_pong_strength(&self) -> f64 {
        self.ping_pong_strength
    }

    pub fn cellular_distance_function(&self) -> CellularDistanceFunction {
        self.cellular_distance_function
    }

    pub fn cellular_return_type(&self) -> CellularReturnType {
        self.cellular_return_type
    }

    pub fn cellular_jitter(&self) -> f64 {
        self.cellular_jitter
    }

    // Normalizes the largest possible octave sum to roughly 1.
    pub fn fractal_bounding(&self) -> f64 {
        self.fractal_bounding
    }

    pub fn domain_warp(&self) -> &DomainWarpConfig {
        &self.domain_warp
    }

    // Flatten into the key/value record used by stored configurations.
    pub fn to_record(&self) -> NoiseRecord {
        let warp = &self.domain_warp;
        NoiseRecord {
            version: RECORD_VERSION.to_string(),
            noise_type: self.noise_type.code(),
            seed: self.seed,
            frequency: self.frequency,
            offset_x: self.offset_x,
            offset_y: self.offset_y,
            fractal_type: self.fractal_type.code(),
            octaves: self.octaves as i32,
            lacunarity: self.lacunarity,
            persistence: self.gain,
            weighted_strength: self.weighted_strength,
            ping_pong_strength: self.ping_pong_strength,
            cellular_distance_function: self.cellular_distance_function.code(),
            cellular_return_type: self.cellular_return_type.code(),
            cellular_jitter: self.cellular_jitter,
            domain_warp_enabled: i32::from(warp.enabled()),
            domain_warp_type: warp.warp_type().code(),
            domain_warp_amplitude: warp.amplitude(),
            domain_warp_frequency: warp.frequency(),
            domain_warp_fractal_type: warp.fractal_type().code(),
            domain_warp_fractal_octaves: warp.octaves() as i32,
            domain_warp_fractal_lacunarity: warp.lacunarity(),
            domain_warp_fractal_gain: warp.gain(),
            // Only written when the warp does not share the main seed
            domain_warp_seed: (warp.seed() != self.seed).then_some(warp.seed()),
        }
    }

    // Build and validate a config from a flat record.
    // Without `domain_warp_seed` the warp shares the main seed.
    pub fn from_record(record: &NoiseRecord) -> Result<Self> {
        let domain_warp = DomainWarpConfig::builder()
            .enabled(record.domain_warp_enabled != 0)
            .warp_type(DomainWarpType::try_from(record.domain_warp_type)?)
            .amplitude(record.domain_warp_amplitude)
            .frequency(record.domain_warp_frequency)
            .fractal_type(DomainWarpFractalType::try_from(
                record.domain_warp_fractal_type,
            )?)
            .octaves(record.domain_warp_fractal_octaves)
            .lacunarity(record.domain_warp_fractal_lacunarity)
            .gain(record.domain_warp_fractal_gain)
            .seed(record.domain_warp_seed.unwrap_or(record.seed))
            .build()?;

        NoiseConfig::builder()
            .noise_type(NoiseType::try_from(record.noise_type)?)
            .fractal_type(FractalType::try_from(record.fractal_type)?)
            .seed(record.seed)
            .frequency(record.frequency)
            .offset(record.offset_x, record.offset_y)
            .octaves(record.octaves)
            .lacunarity(record.lacunarity)
            .gain(record.persistence)
            .weighted_strength(record.weighted_strength)
            .ping_pong_strength(record.ping_pong_strength)
            .cellular_distance_function(CellularDistanceFunction::try_from(
                record.cellular_distance_function,
            )?)
            .cellular_return_type(CellularReturnType::try_from(record.cellular_return_type)?)
            .cellular_jitter(record.cellular_jitter)
            .domain_warp(domain_warp)
            .build()
    }
}

impl Default for NoiseConfig {
    fn default() -> Self {
        let builder = NoiseConfigBuilder::default();
        let octaves = builder.octaves as u32;
        builder.finish(octaves, DomainWarpConfig::default())
    }
}

// Builder for `NoiseConfig`. Values are checked in `NoiseConfigBuilder::build`.
#[derive(Debug, Clone)]
pub struct NoiseConfigBuilder {
    noise_type: NoiseType,
    fractal_type: FractalType,
    seed: i32,
    frequency: f64,
    offset_x: f64,
    offset_y: f64,
    octaves: i32,
    lacunarity: f64,
    gain: f64,
    weighted_strength: f64,
    ping_pong_strength: f64,
    cellular_distance_function: CellularDistanceFunction,
    cellular_return_type: CellularReturnType,
    cellular_jitter: f64,
    domain_warp: Option<DomainWarpConfig>,
}

impl Default for NoiseConfigBuilder {
    fn default() -> Self {
        Self {
            noise_type: NoiseType::Perlin,
            fractal_type: FractalType::FBm,
            seed: 0,
            frequency: 0.01,
            offset_x: 0.0,
            offset_y: 0.0,
            octaves: 5,
            lacunarity: 2.0,
            gain: 0.5,
            weighted_strength: 0.0,
            ping_pong_strength: 2.0,
            cellular_distance_function: CellularDistanceFunction::EuclideanSquared,
            cellular_return_type: CellularReturnType::Distance,
            cellular_jitter: 1.0,
            domain_warp: None,
        }
    }
}

impl NoiseConfigBuilder {
    pub fn noise_type(mut self, noise_type: NoiseType) -> Self {
        self.noise_type = noise_type;
        self
    }

    pub fn fractal_type(mut self, fractal_type: FractalType) -> Self {
        self.fractal_type = fractal_type;
        self
    }

    pub fn seed(mut self, seed: i32) -> Self {
        self.seed = seed;
        self
    }

    pub fn frequency(mut self, frequency: f64) -> Self {
        self.frequency = frequency;
        self
    }

    pub fn offset(mut self, x: f64, y: f64) -> Self {
        self.offset_x = x;
        self.offset_y = y;
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

    pub fn weighted_strength(mut self, weighted_strength: f64) -> Self {
        self.weighted_strength = weighted_strength;
        self
    }

    pub fn ping_pong_strength(mut self, ping_pong_strength: f64) -> Self {
        self.ping_pong_strength = ping_pong_strength;
        self
    }

    pub fn cellular_distance_function(mut self, function: CellularDistanceFunction) -> Self {
        self.cellular_distance_function = function;
        self
    }

    pub fn cellular_return_type(mut self, return_type: CellularReturnType) -> Self {
        self.cellular_return_type = return_type;
        self
    }

    pub fn cellular_jitter(mut self, jitter: f64) -> Self {
        self.cellular_jitter = jitter;
        self
    }

    // Without an explicit warp config a disabled one seeded like the noise is used
    pub fn domain_warp(mut self, domain_warp: DomainWarpConfig) -> Self {
        self.domain_warp = Some(domain_warp);
        self
    }

    pub fn build(self) -> Result<NoiseConfig> {
        check_finite("frequency", self.frequency)?;
        check_finite("offset_x", self.offset_x)?;
        check_finite("offset_y", self.offset_y)?;
        check_finite("lacunarity", self.lacunarity)?;
        check_finite("persistence", self.gain)?;
        check_finite("weighted_strength", self.weighted_strength)?;
        check_finite("ping_pong_strength", self.ping_pong_strength)?;
        check_finite("cellular_jitter", self.cellular_jitter)?;
        let octaves = check_octaves("octaves", self.octaves)?;

        let domain_warp = match self.domain_warp.clone() {
            Some(warp) => warp,
            None => DomainWarpConfig::builder().seed(self.seed).build()?,
        };

        let config = self.finish(octaves, domain_warp);
        debug!(
            "built noise config: {:?}/{:?} seed={} freq={} octaves={} warp={}",
            config.noise_type,
            config.fractal_type,
            config.seed,
            config.frequency,
            config.octaves,
            config.domain_warp.enabled()
        );
        Ok(config)
    }

    // Assemble without validation; `octaves` is already checked
    fn finish(self, octaves: u32, domain_warp: DomainWarpConfig) -> NoiseConfig {
        NoiseConfig {
            noise_type: self.noise_type,
            fractal_type: self.fractal_type,
            seed: self.seed,
            frequency: self.frequency,
            offset_x: self.offset_x,
            offset_y: self.offset_y,
            octaves,
            lacunarity: self.lacunarity,
            gain: self.gain,
            weighted_strength: self.weighted_strength,
            ping_pong_strength: self.ping_pong_strength,
            cellular_distance_function: self.cellular_distance_function,
            cellular_return_type: self.cellular_return_type,
            cellular_jitter: self.cellular_jitter,
            fractal_bounding: fractal_bounding(octaves, self.gain),
            domain_warp,
        }
    }
}

// Flat key/value form of a `NoiseConfig`.
// Key names and integer enum codes match the stored configuration files.
// Missing keys fall back to the defaults, so any serde format can load it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NoiseRecord {
    pub version: String,
    pub noise_type: i32,
    pub seed: i32,
    pub frequency: f64,
    pub offset_x: f64,
    pub offset_y: f64,
    pub fractal_type: i32,
    pub octaves: i32,
    pub lacunarity: f64,
    pub persistence: f64,
    pub weighted_strength: f64,
    pub ping_pong_strength: f64,
    pub cellular_distance_function: i32,
    pub cellular_return_type: i32,
    pub cellular_jitter: f64,
    pub domain_warp_enabled: i32,
    pub domain_warp_type: i32,
    pub domain_warp_amplitude: f64,
    pub domain_warp_frequency: f64,
    pub domain_warp_fractal_type: i32,
    pub domain_warp_fractal_octaves: i32,
    pub domain_warp_fractal_lacunarity: f64,
    pub domain_warp_fractal_gain: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain_warp_seed: Option<i32>,
}

impl Default for NoiseRecord {
    fn default() -> Self {
        NoiseConfig::default().to_record()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enum_codes_round_trip() {
        for &t in NoiseType::ALL {
            assert_eq!(NoiseType::try_from(t.code()), Ok(t));
        }
        for &t in CellularReturnType::ALL {
            assert_eq!(CellularReturnType::try_from(t.code()), Ok(t));
        }
        assert_eq!(NoiseType::Perlin.code(), 3);
        assert_eq!(FractalType::PingPong.code(), 3);
        assert_eq!(DomainWarpType::BasicGrid.code(), 2);
    }

    #[test]
    fn unknown_enum_code_is_rejected() {
        let err = NoiseType::try_from(6).unwrap_err();
        assert!(matches!(
            err,
            NoiseError::InvalidParameter { name: "noise_type", .. }
        ));
        assert!(FractalType::try_from(-1).is_err());
        assert!(CellularReturnType::try_from(7).is_err());
    }

    #[test]
    fn octaves_are_clamped_not_rejected() {
        let cfg = NoiseConfig::builder().octaves(20).build().unwrap();
        assert_eq!(cfg.octaves(), MAX_OCTAVES);
    }

    #[test]
    fn zero_octaves_is_an_error() {
        let err = NoiseConfig::builder().octaves(0).build().unwrap_err();
        assert!(matches!(
            err,
            NoiseError::InvalidParameter { name: "octaves", .. }
        ));
        assert!(NoiseConfig::builder().octaves(-3).build().is_err());
    }

    #[test]
    fn non_finite_floats_are_rejected() {
        assert!(NoiseConfig::builder().frequency(f64::NAN).build().is_err());
        assert!(NoiseConfig::builder().gain(f64::INFINITY).build().is_err());
        assert!(
            NoiseConfig::builder()
                .lacunarity(f64::NEG_INFINITY)
                .build()
                .is_err()
        );
    }

    #[test]
    fn fractal_bounding_is_precomputed() {
        let cfg = NoiseConfig::builder()
            .octaves(3)
            .gain(0.5)
            .build()
            .unwrap();
        assert!((cfg.fractal_bounding() - 1.0 / 1.75).abs() < 1e-12);
    }

    #[test]
    fn default_matches_builder_default() {
        assert_eq!(NoiseConfig::default(), NoiseConfig::builder().build().unwrap());
    }

    #[test]
    fn record_round_trip() {
        let cfg = NoiseConfig::builder()
            .noise_type(NoiseType::Cellular)
            .fractal_type(FractalType::PingPong)
            .seed(-77)
            .frequency(0.031)
            .offset(12.5, -3.0)
            .octaves(7)
            .lacunarity(1.8)
            .gain(0.42)
            .weighted_strength(0.3)
            .ping_pong_strength(1.5)
            .cellular_distance_function(CellularDistanceFunction::Hybrid)
            .cellular_return_type(CellularReturnType::Distance2Mul)
            .cellular_jitter(0.8)
            .build()
            .unwrap();
        let back = NoiseConfig::from_record(&cfg.to_record()).unwrap();
        assert_eq!(back, cfg);
    }

    #[test]
    fn record_defaults_fill_missing_keys() {
        let record: NoiseRecord = serde_json::from_str(r#"{"noise_type": 0, "seed": 9}"#).unwrap();
        assert_eq!(record.noise_type, 0);
        assert_eq!(record.seed, 9);
        assert_eq!(record.octaves, 5);
        assert_eq!(record.domain_warp_amplitude, 30.0);
        let cfg = NoiseConfig::from_record(&record).unwrap();
        assert_eq!(cfg.noise_type(), NoiseType::OpenSimplex2);
    }

    #[test]
    fn record_with_bad_enum_fails() {
        let record = NoiseRecord {
            cellular_distance_function: 4,
            ..NoiseRecord::default()
        };
        assert!(NoiseConfig::from_record(&record).is_err());
    }

    #[test]
    fn record_keeps_distinct_warp_seed() {
        let warp = DomainWarpConfig::builder()
            .enabled(true)
            .seed(99)
            .build()
            .unwrap();
        let cfg = NoiseConfig::builder()
            .seed(1)
            .domain_warp(warp)
            .build()
            .unwrap();

        let record = cfg.to_record();
        assert_eq!(record.domain_warp_seed, Some(99));
        let back = NoiseConfig::from_record(&record).unwrap();
        assert_eq!(back.domain_warp().seed(), 99);
        assert_eq!(back, cfg);
    }

    #[test]
    fn shared_warp_seed_is_not_written() {
        let record = NoiseConfig::builder().seed(-5).build().unwrap().to_record();
        assert_eq!(record.domain_warp_seed, None);
        assert_eq!(record.version, RECORD_VERSION);

        let json = serde_json::to_string(&record).unwrap();
        assert!(json.starts_with(r#"{"version":"1.0","#));
        assert!(!json.contains("domain_warp_seed"));
    }
}
