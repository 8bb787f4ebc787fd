//! Error types for gravlines.

use thiserror::Error;

/// Errors produced while configuring, rendering or writing an image.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Width or height was zero, overflowed, or produced an empty field grid.
    #[error("invalid dimensions: width and height must be non-zero and hold at least one field cell")]
    InvalidDimensions,

    /// More integration steps than a trajectory's point buffer can hold.
    #[error("too many iterations: {0} (at most {max})", max = crate::config::MAX_ITERATIONS)]
    TooManyIterations(usize),

    /// A color string could not be parsed.
    #[error("invalid color: {0}")]
    InvalidColor(String),

    /// A palette could not be constructed from the given colors.
    #[error("invalid palette: {0}")]
    InvalidPalette(String),

    /// The output sink could not be created or written.
    #[error("i/o error: {0}")]
    Io(String),

    /// The raster could not be encoded.
    #[error("encoding error: {0}")]
    Encode(String),
}
