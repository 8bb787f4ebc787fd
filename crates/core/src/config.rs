//! Reproducible configuration for one render.
//!
//! A [`RenderConfig`] is built once at startup and passed by reference to
//! every component. Grid and step sizes are derived from the canvas width, so
//! two equal configs (seed included) produce bit-identical images.

use crate::color::Rgba;
use crate::error::EngineError;
use glam::DVec2;
use serde::{Deserialize, Serialize};

/// Canvas width and height in pixels.
pub const DEFAULT_SIZE: usize = 2000;
/// Number of trajectories drawn by default.
pub const DEFAULT_LINES: usize = 10_000;
/// Integration steps per trajectory by default.
pub const DEFAULT_ITERATIONS: usize = 5;
/// Number of point masses seeding the field.
pub const DEFAULT_MASS_COUNT: usize = 50;
/// Exclusive upper bound of a generated mass magnitude.
pub const DEFAULT_MAX_MASS: f64 = 3.0;
/// Gravitational-constant analog.
pub const DEFAULT_GRAVITY: f64 = 1.0;
/// Trajectory stroke width in pixels.
pub const DEFAULT_STROKE_WIDTH: f64 = 5.0;

/// Largest iteration count whose `iterations + 1` trajectory points still fit
/// in one allocation (`isize::MAX` bytes).
pub const MAX_ITERATIONS: usize = isize::MAX as usize / std::mem::size_of::<DVec2>() - 1;

/// Field cell spacing as a fraction of canvas width.
const CELL_SCALE_FACTOR: f64 = 0.008;
/// Integration step length as a fraction of canvas width.
const STEP_FACTOR: f64 = 0.01;

/// Everything needed to reproduce one image.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RenderConfig {
    pub width: usize,
    pub height: usize,
    pub lines: usize,
    pub iterations: usize,
    pub mass_count: usize,
    pub max_mass: f64,
    pub gravity: f64,
    pub stroke_width: f64,
    pub background: Rgba,
    /// Draw field-cell and point-mass markers under the trajectories.
    pub show_overlay: bool,
    pub seed: u64,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_SIZE,
            height: DEFAULT_SIZE,
            lines: DEFAULT_LINES,
            iterations: DEFAULT_ITERATIONS,
            mass_count: DEFAULT_MASS_COUNT,
            max_mass: DEFAULT_MAX_MASS,
            gravity: DEFAULT_GRAVITY,
            stroke_width: DEFAULT_STROKE_WIDTH,
            background: Rgba::BLACK,
            show_overlay: false,
            seed: 0,
        }
    }
}

impl RenderConfig {
    /// Default canvas with the given trajectory count, iteration count and seed.
    pub fn new(lines: usize, iterations: usize, seed: u64) -> Self {
        Self {
            lines,
            iterations,
            seed,
            ..Self::default()
        }
    }

    pub fn with_size(mut self, width: usize, height: usize) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_mass_count(mut self, mass_count: usize) -> Self {
        self.mass_count = mass_count;
        self
    }

    pub fn with_stroke_width(mut self, stroke_width: f64) -> Self {
        self.stroke_width = stroke_width;
        self
    }

    pub fn with_background(mut self, background: Rgba) -> Self {
        self.background = background;
        self
    }

    pub fn with_overlay(mut self, show_overlay: bool) -> Self {
        self.show_overlay = show_overlay;
        self
    }

    /// Canvas width as f64.
    pub fn width_f64(&self) -> f64 {
        self.width as f64
    }

    /// Canvas height as f64.
    pub fn height_f64(&self) -> f64 {
        self.height as f64
    }

    /// Spacing between field sample points: `0.008 * width`.
    pub fn cell_scale(&self) -> f64 {
        CELL_SCALE_FACTOR * self.width_f64()
    }

    /// Distance advanced per integration step: `0.01 * width`.
    pub fn step(&self) -> f64 {
        STEP_FACTOR * self.width_f64()
    }

    /// Field rows: `floor(height / cell_scale)`. Rows index the x axis.
    pub fn rows(&self) -> usize {
        (self.height_f64() / self.cell_scale()) as usize
    }

    /// Field columns: `floor(width / cell_scale)`. Columns index the y axis.
    pub fn cols(&self) -> usize {
        (self.width_f64() / self.cell_scale()) as usize
    }

    /// Half the side of a field-cell marker square.
    pub fn marker_half_size(&self) -> f64 {
        self.cell_scale() / 10.0
    }

    /// Checks that the canvas is non-empty, that `width * height` fits in
    /// `usize`, that the field grid has at least one row and column, and
    /// that `iterations` does not exceed [`MAX_ITERATIONS`].
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.width == 0 || self.height == 0 {
            return Err(EngineError::InvalidDimensions);
        }
        self.width
            .checked_mul(self.height)
            .and_then(|n| n.checked_mul(4))
            .ok_or(EngineError::InvalidDimensions)?;
        if self.rows() == 0 || self.cols() == 0 {
            return Err(EngineError::InvalidDimensions);
        }
        if self.iterations > MAX_ITERATIONS {
            return Err(EngineError::TooManyIterations(self.iterations));
        }
        Ok(())
    }
}
