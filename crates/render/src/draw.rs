//! Scene-level drawing operations on a [`Canvas`].
//!
//! Each function builds one [`Path`] and flushes it, so no "current path"
//! state survives between calls.

use glam::DVec2;
use gravlines_core::{Field, PointMass, Rgba, Trajectory};

use crate::canvas::Canvas;
use crate::path::{Path, PathBuilder};

/// Outline width for rectangles, field markers and mass markers.
pub const HAIRLINE: f64 = 1.0;

/// Mass marker radius per unit of mass.
const MASS_RADIUS_PER_UNIT: f64 = 10.0;

/// Fills the rectangle with opposite corners `(x1, y1)` and `(x2, y2)`,
/// outlined in the same color.
pub fn fill_rect(canvas: &mut Canvas, x1: f64, y1: f64, x2: f64, y2: f64, color: Rgba) {
    let rect = PathBuilder::new()
        .rect(DVec2::new(x1, y1), DVec2::new(x2, y2))
        .build();
    canvas.fill_stroke_path(&rect, color, color, HAIRLINE);
}

/// Draws the diagnostic marker for cell `(r, c)` holding angle `v`.
///
/// A small square at the cell's sample point plus a line of one cell length
/// pointing along `v`.
pub fn render_field_cell(canvas: &mut Canvas, r: usize, c: usize, v: f64, cell_scale: f64) {
    let origin = DVec2::new(r as f64 * cell_scale, c as f64 * cell_scale);
    let half = cell_scale / 10.0;
    fill_rect(
        canvas,
        origin.x - half,
        origin.y - half,
        origin.x + half,
        origin.y + half,
        Rgba::FIELD_MARKER,
    );
    let tip = origin + cell_scale * DVec2::from_angle(v);
    let needle = PathBuilder::new().move_to(origin).line_to(tip).build();
    canvas.stroke_path(&needle, Rgba::FIELD_MARKER, HAIRLINE);
}

/// Draws a marker for every cell of `field`.
pub fn render_field(canvas: &mut Canvas, field: &Field) {
    for (r, c, v) in field.iter() {
        render_field_cell(canvas, r, c, v, field.cell_scale());
    }
}

/// Draws a mass as a filled circle whose radius grows with its magnitude.
pub fn render_mass(canvas: &mut Canvas, mass: &PointMass) {
    let disc = PathBuilder::new()
        .circle(mass.position(), MASS_RADIUS_PER_UNIT * mass.m)
        .build();
    canvas.fill_stroke_path(&disc, Rgba::MASS_FILL, Rgba::MASS_OUTLINE, HAIRLINE);
}

/// Strokes a trajectory as one continuous polyline in its own color.
pub fn render_trajectory(canvas: &mut Canvas, trajectory: &Trajectory, stroke_width: f64) {
    let path = Path::polyline(&trajectory.points);
    canvas.stroke_path(&path, trajectory.color, stroke_width);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn count_not(canvas: &Canvas, color: Rgba) -> usize {
        canvas
            .pixels()
            .chunks_exact(4)
            .filter(|px| *px != color.to_array())
            .count()
    }

    #[test]
    fn fill_rect_covers_full_canvas_with_background() {
        let white = Rgba::opaque(0xff, 0xff, 0xff);
        let mut canvas = Canvas::new(16, 16, white).unwrap();
        fill_rect(&mut canvas, 0.0, 0.0, 16.0, 16.0, Rgba::BLACK);
        assert_eq!(count_not(&canvas, Rgba::BLACK), 0);
    }

    #[test]
    fn field_cell_marker_is_drawn_at_sample_point() {
        let mut canvas = Canvas::new(64, 64, Rgba::BLACK).unwrap();
        render_field_cell(&mut canvas, 2, 1, 0.0, 16.0);
        // sample point (32, 16), needle toward +x
        assert_eq!(canvas.pixel(32, 16), Some(Rgba::FIELD_MARKER));
        assert_ne!(canvas.pixel(40, 16), Some(Rgba::BLACK));
        assert_eq!(canvas.pixel(32, 40), Some(Rgba::BLACK));
    }

    #[test]
    fn render_field_touches_every_cell_origin() {
        let field = Field::from_data(2, 2, 16.0, vec![0.0; 4]).unwrap();
        let mut canvas = Canvas::new(40, 40, Rgba::BLACK).unwrap();
        render_field(&mut canvas, &field);
        for (x, y) in [(0, 0), (16, 0), (0, 16), (16, 16)] {
            assert_eq!(canvas.pixel(x, y), Some(Rgba::FIELD_MARKER), "cell at ({x}, {y})");
        }
    }

    #[test]
    fn mass_marker_is_red_inside_with_outline() {
        let mut canvas = Canvas::new(64, 64, Rgba::BLACK).unwrap();
        // centered on a pixel center so the rightmost vertex is one too
        render_mass(&mut canvas, &PointMass::new(32.5, 32.5, 2.0));
        assert_eq!(canvas.pixel(32, 32), Some(Rgba::MASS_FILL));
        assert_eq!(canvas.pixel(52, 32), Some(Rgba::MASS_OUTLINE));
        assert_eq!(canvas.pixel(2, 2), Some(Rgba::BLACK));
    }

    #[test]
    fn trajectory_is_stroked_in_its_color() {
        let color = Rgba::opaque(0x69, 0xD4, 0xF0);
        let trajectory = Trajectory {
            points: vec![DVec2::new(10.0, 10.0), DVec2::new(30.0, 10.0)],
            color,
        };
        let mut canvas = Canvas::new(40, 20, Rgba::BLACK).unwrap();
        render_trajectory(&mut canvas, &trajectory, 5.0);
        assert_eq!(canvas.pixel(20, 10), Some(color));
        assert_eq!(canvas.pixel(20, 2), Some(Rgba::BLACK));
    }
}
