//! Ordered trajectory colors with distance-biased selection.
//!
//! A [`Palette`] is shuffled once per run. Each trajectory then picks an
//! entry with a random index scaled by its start point's distance from the
//! canvas center, so strokes far from the center lean toward later entries.

use crate::color::Rgba;
use crate::error::EngineError;
use crate::prng::Xorshift64;
use glam::DVec2;

/// Multiplier applied to the normalized center distance before indexing.
const DISTANCE_BIAS: f64 = 2.5;

/// A non-empty ordered list of colors.
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    colors: Vec<Rgba>,
}

impl Palette {
    /// Creates a palette from a vector of colors. Requires at least one color.
    ///
    /// The renderer always uses [`Palette::default_strokes`]; this and
    /// [`Palette::from_hex`] are for library callers tracing with their own
    /// colors.
    pub fn new(colors: Vec<Rgba>) -> Result<Self, EngineError> {
        if colors.is_empty() {
            return Err(EngineError::InvalidPalette(
                "palette requires at least 1 color".to_string(),
            ));
        }
        Ok(Self { colors })
    }

    /// Creates a palette by parsing hex color strings.
    pub fn from_hex(hexes: &[&str]) -> Result<Self, EngineError> {
        let colors: Result<Vec<Rgba>, EngineError> =
            hexes.iter().map(|h| Rgba::from_hex(h)).collect();
        Self::new(colors?)
    }

    /// The five stroke colors, in their unshuffled order.
    pub fn default_strokes() -> Self {
        Self {
            colors: vec![
                Rgba::opaque(0xE8, 0xE0, 0x89),
                Rgba::opaque(0x69, 0xD4, 0xF0),
                Rgba::opaque(0xF0, 0xE3, 0x51),
                Rgba::opaque(0xF0, 0x3A, 0x79),
                Rgba::opaque(0xA3, 0x34, 0x5B),
            ],
        }
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Always false for a constructed palette.
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn colors(&self) -> &[Rgba] {
        &self.colors
    }

    /// Permutes the colors in place using the shared generator.
    pub fn shuffle(&mut self, rng: &mut Xorshift64) {
        rng.shuffle(&mut self.colors);
    }

    /// Picks the color for a trajectory starting at `start`.
    ///
    /// Consumes one draw from `rng`. See [`distance_biased_index`].
    pub fn select(&self, start: DVec2, width: f64, height: f64, rng: &mut Xorshift64) -> Rgba {
        let center = DVec2::new(width / 2.0, height / 2.0);
        let d = center.distance(start) / width;
        let draw = rng.next_f64();
        self.colors[distance_biased_index(d, draw, self.colors.len())]
    }
}

/// `floor(draw * 2.5 * d * len)` clamped to `[0, len - 1]`.
///
/// `d` is the start point's distance from the canvas center divided by the
/// canvas width; `draw` is a uniform sample in `[0, 1)`. Non-finite products
/// map to index 0.
pub fn distance_biased_index(d: f64, draw: f64, len: usize) -> usize {
    let last = len.saturating_sub(1);
    let scaled = (draw * DISTANCE_BIAS * d * len as f64).floor();
    if scaled.is_nan() || scaled <= 0.0 {
        0
    } else {
        (scaled as usize).min(last)
    }
}
