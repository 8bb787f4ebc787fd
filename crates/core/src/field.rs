//! Direction field induced by a set of point masses.
//!
//! A `Field` stores one angle per grid cell in row-major layout. Cell
//! `(r, c)` samples the canvas position `(r * s, c * s)`: rows run along the
//! x axis and columns along the y axis. Each value is the direction of the
//! summed pull of every mass at that position, in `(-pi, pi]`.

use std::f64::consts::PI;

use glam::DVec2;
use rayon::prelude::*;
use tracing::debug;

use crate::config::RenderConfig;
use crate::error::EngineError;
use crate::mass::PointMass;

/// An immutable `rows x cols` grid of direction angles.
#[derive(Debug, Clone)]
pub struct Field {
    rows: usize,
    cols: usize,
    cell_scale: f64,
    data: Vec<f64>,
}

impl Field {
    /// Computes the field for the grid described by `config`.
    pub fn compute(masses: &[PointMass], config: &RenderConfig) -> Result<Self, EngineError> {
        Self::from_masses(
            masses,
            config.rows(),
            config.cols(),
            config.cell_scale(),
            config.gravity,
        )
    }

    /// Computes the direction of the summed attraction at every cell.
    ///
    /// For each mass at distance `d` the contribution has magnitude
    /// `gravity * m / d` along the direction toward the mass. A mass sitting
    /// exactly on the sample point contributes nothing; a cell whose summed
    /// vector is zero gets angle 0.
    ///
    /// Rows are computed in parallel; every cell goes through the same
    /// sequential float operations, so the result does not depend on
    /// scheduling.
    ///
    /// Returns `EngineError::InvalidDimensions` if `rows` or `cols` is zero
    /// or their product overflows.
    pub fn from_masses(
        masses: &[PointMass],
        rows: usize,
        cols: usize,
        cell_scale: f64,
        gravity: f64,
    ) -> Result<Self, EngineError> {
        if rows == 0 || cols == 0 {
            return Err(EngineError::InvalidDimensions);
        }
        let len = rows
            .checked_mul(cols)
            .ok_or(EngineError::InvalidDimensions)?;

        let mut data = vec![0.0; len];
        data.par_chunks_mut(cols).enumerate().for_each(|(r, row)| {
            let x = r as f64 * cell_scale;
            for (c, cell) in row.iter_mut().enumerate() {
                let y = c as f64 * cell_scale;
                *cell = net_direction(masses, x, y, gravity);
            }
        });

        debug!(rows, cols, masses = masses.len(), "computed direction field");
        Ok(Self {
            rows,
            cols,
            cell_scale,
            data,
        })
    }

    /// Builds a field from precomputed angles, validating the length.
    pub fn from_data(
        rows: usize,
        cols: usize,
        cell_scale: f64,
        data: Vec<f64>,
    ) -> Result<Self, EngineError> {
        if rows == 0 || cols == 0 {
            return Err(EngineError::InvalidDimensions);
        }
        let expected = rows
            .checked_mul(cols)
            .ok_or(EngineError::InvalidDimensions)?;
        if data.len() != expected {
            return Err(EngineError::InvalidDimensions);
        }
        Ok(Self {
            rows,
            cols,
            cell_scale,
            data,
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn cell_scale(&self) -> f64 {
        self.cell_scale
    }

    /// Read-only access to the row-major angles.
    pub fn data(&self) -> &[f64] {
        &self.data
    }

    /// Angle stored at `(r, c)`.
    ///
    /// # Panics
    ///
    /// Panics if `r >= rows` or `c >= cols`.
    pub fn get(&self, r: usize, c: usize) -> f64 {
        assert!(r < self.rows && c < self.cols, "cell ({r}, {c}) out of bounds");
        self.data[r * self.cols + c]
    }

    /// One row of angles, indexed by column.
    ///
    /// # Panics
    ///
    /// Panics if `r >= rows`.
    pub fn row(&self, r: usize) -> &[f64] {
        &self.data[r * self.cols..(r + 1) * self.cols]
    }

    /// Grid cell containing canvas point `p`, clamped into the grid.
    ///
    /// `r = floor(x / s)` and `c = floor(y / s)`, each clamped on its own, so
    /// any point (off-canvas or NaN included) maps to a valid cell.
    pub fn cell_of(&self, p: DVec2) -> (usize, usize) {
        (
            clamp_index(p.x / self.cell_scale, self.rows),
            clamp_index(p.y / self.cell_scale, self.cols),
        )
    }

    /// Angle of the cell containing `p`.
    pub fn sample(&self, p: DVec2) -> f64 {
        let (r, c) = self.cell_of(p);
        self.data[r * self.cols + c]
    }

    /// Iterates over all cells yielding `(r, c, angle)` in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, f64)> + '_ {
        self.data
            .iter()
            .enumerate()
            .map(|(i, &v)| (i / self.cols, i % self.cols, v))
    }
}

/// Direction of the summed pull of `masses` at `(x, y)`, in `(-pi, pi]`.
pub fn net_direction(masses: &[PointMass], x: f64, y: f64, gravity: f64) -> f64 {
    let (mut gx, mut gy) = (0.0_f64, 0.0_f64);
    for mass in masses {
        let dx = mass.x - x;
        let dy = mass.y - y;
        let d = (dx * dx + dy * dy).sqrt();
        if d == 0.0 {
            continue;
        }
        let g = gravity * mass.m / d;
        let a = dy.atan2(dx);
        gx += g * a.cos();
        gy += g * a.sin();
    }
    half_open_angle(gy.atan2(gx))
}

/// Maps `atan2`'s closed range `[-pi, pi]` onto `(-pi, pi]`.
fn half_open_angle(angle: f64) -> f64 {
    if angle <= -PI {
        PI
    } else {
        angle
    }
}

/// `floor(v)` clamped to `[0, len - 1]`; NaN maps to 0.
fn clamp_index(v: f64, len: usize) -> usize {
    let f = v.floor();
    if f.is_nan() || f <= 0.0 {
        0
    } else {
        (f as usize).min(len - 1)
    }
}
