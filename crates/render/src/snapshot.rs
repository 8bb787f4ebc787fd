//! PNG output for a finished [`Canvas`].
//!
//! This module is feature-gated behind `png` (default on). The image is
//! encoded fully in memory before the output file is created, so an encoding
//! failure leaves nothing on disk.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use gravlines_core::EngineError;
use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder};

use crate::canvas::Canvas;

/// Encodes the canvas as an RGBA8 PNG.
///
/// Returns `EngineError::InvalidDimensions` if a side does not fit in `u32`,
/// or `EngineError::Encode` if the encoder fails.
pub fn encode_png(canvas: &Canvas) -> Result<Vec<u8>, EngineError> {
    let w = u32::try_from(canvas.width()).map_err(|_| EngineError::InvalidDimensions)?;
    let h = u32::try_from(canvas.height()).map_err(|_| EngineError::InvalidDimensions)?;
    let mut bytes = Vec::new();
    PngEncoder::new(&mut bytes)
        .write_image(canvas.pixels(), w, h, ExtendedColorType::Rgba8)
        .map_err(|e| EngineError::Encode(e.to_string()))?;
    Ok(bytes)
}

/// Encodes the canvas and writes it to `path`.
///
/// Returns `EngineError::Io` if the file cannot be created or written.
pub fn write_png(canvas: &Canvas, path: &Path) -> Result<(), EngineError> {
    let bytes = encode_png(canvas)?;
    let mut file = File::create(path)
        .map_err(|e| EngineError::Io(format!("cannot create {}: {e}", path.display())))?;
    file.write_all(&bytes)
        .and_then(|()| file.flush())
        .map_err(|e| EngineError::Io(format!("cannot write {}: {e}", path.display())))
}
