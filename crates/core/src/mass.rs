//! Point masses that seed the direction field.

use crate::config::RenderConfig;
use crate::prng::Xorshift64;
use glam::DVec2;
use serde::{Deserialize, Serialize};

/// A point mass in canvas coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointMass {
    pub x: f64,
    pub y: f64,
    pub m: f64,
}

impl PointMass {
    pub fn new(x: f64, y: f64, m: f64) -> Self {
        Self { x, y, m }
    }

    pub fn position(&self) -> DVec2 {
        DVec2::new(self.x, self.y)
    }
}

/// Draws `config.mass_count` masses uniformly over the canvas.
///
/// Per mass, three draws in order: `x` in `[0, width)`, `y` in
/// `[0, height)`, `m` in `[0, max_mass)`.
pub fn generate_masses(config: &RenderConfig, rng: &mut Xorshift64) -> Vec<PointMass> {
    let w = config.width_f64();
    let h = config.height_f64();
    (0..config.mass_count)
        .map(|_| {
            let x = rng.next_f64() * w;
            let y = rng.next_f64() * h;
            let m = rng.next_f64() * config.max_mass;
            PointMass { x, y, m }
        })
        .collect()
}
