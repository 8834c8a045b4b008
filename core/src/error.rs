use thiserror::Error;

// Errors raised while building a noise configuration or evaluating a region.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum NoiseError {
    // A configuration field holds a value the generator cannot use.
    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter { name: &'static str, reason: String },
    // A region was requested with a zero dimension.
    #[error("invalid region {width}x{height}: width and height must be positive")]
    InvalidRegion { width: usize, height: usize },
    // The x and y coordinate slices have different lengths.
    #[error("coordinate length mismatch: {x} x values, {y} y values")]
    LengthMismatch { x: usize, y: usize },
}

pub type Result<T> = std::result::Result<T, NoiseError>;

impl NoiseError {
    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        NoiseError::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}
