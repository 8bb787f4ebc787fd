//! Trajectory tracing through a direction [`Field`].
//!
//! A trajectory starts at a seed point and repeatedly advances a fixed step
//! along the angle of the grid cell it currently sits in. It never stops at
//! the canvas edge: off-canvas points read the nearest edge cell.

use glam::DVec2;

use crate::color::Rgba;
use crate::config::RenderConfig;
use crate::field::Field;
use crate::palette::Palette;
use crate::prng::Xorshift64;

/// Upper bound on the points [`integrate`] reserves before stepping.
pub const PREALLOC_POINTS: usize = 1 << 16;

/// An ordered path of points with the color it will be stroked in.
#[derive(Debug, Clone, PartialEq)]
pub struct Trajectory {
    pub points: Vec<DVec2>,
    pub color: Rgba,
}

impl Trajectory {
    /// The seed point.
    pub fn start(&self) -> DVec2 {
        self.points[0]
    }

    /// Number of integration steps taken (`points.len() - 1`).
    pub fn steps(&self) -> usize {
        self.points.len().saturating_sub(1)
    }
}

/// Integrates `iterations` steps of length `step` from `start`.
///
/// Returns `iterations + 1` points, the first being `start`. At most
/// [`PREALLOC_POINTS`] are reserved up front. `iterations` must not exceed
/// [`MAX_ITERATIONS`](crate::config::MAX_ITERATIONS), which
/// [`RenderConfig::validate`] checks.
pub fn integrate(start: DVec2, step: f64, iterations: usize, field: &Field) -> Vec<DVec2> {
    let mut points = Vec::with_capacity(iterations.saturating_add(1).min(PREALLOC_POINTS));
    let mut p = start;
    points.push(p);
    for _ in 0..iterations {
        let v = field.sample(p);
        p.x += step * v.cos();
        p.y += step * v.sin();
        points.push(p);
    }
    points
}

/// Picks a color for `start` (one draw from `rng`) and integrates its path.
pub fn trace(
    start: DVec2,
    field: &Field,
    palette: &Palette,
    config: &RenderConfig,
    rng: &mut Xorshift64,
) -> Trajectory {
    let color = palette.select(start, config.width_f64(), config.height_f64(), rng);
    let points = integrate(start, config.step(), config.iterations, field);
    Trajectory { points, color }
}

/// Draws a uniform start point on the canvas: `x` first, then `y`.
pub fn random_start(config: &RenderConfig, rng: &mut Xorshift64) -> DVec2 {
    let x = config.width_f64() * rng.next_f64();
    let y = config.height_f64() * rng.next_f64();
    DVec2::new(x, y)
}
