//! RGBA8 raster surface with anti-aliased path filling and stroking.
//!
//! Each fill or stroke first accumulates per-pixel coverage for the whole
//! path in a scratch buffer, then composites every touched pixel exactly
//! once (source-over). Overlapping segments of one stroke therefore never
//! darken their joins. Everything is clipped to the canvas.

use glam::DVec2;
use gravlines_core::{EngineError, Rgba};

use crate::path::Path;

/// A `width x height` RGBA8 pixel buffer in row-major order.
#[derive(Debug, Clone)]
pub struct Canvas {
    width: usize,
    height: usize,
    pixels: Vec<u8>,
    coverage: Vec<f32>,
    touched: Vec<usize>,
}

impl Canvas {
    /// Creates a canvas filled with `background`.
    ///
    /// Returns `EngineError::InvalidDimensions` if either side is zero or the
    /// byte length overflows `usize`.
    pub fn new(width: usize, height: usize, background: Rgba) -> Result<Self, EngineError> {
        if width == 0 || height == 0 {
            return Err(EngineError::InvalidDimensions);
        }
        let len = width
            .checked_mul(height)
            .ok_or(EngineError::InvalidDimensions)?;
        let bytes = len.checked_mul(4).ok_or(EngineError::InvalidDimensions)?;
        let mut canvas = Self {
            width,
            height,
            pixels: vec![0; bytes],
            coverage: vec![0.0; len],
            touched: Vec::new(),
        };
        canvas.clear(background);
        Ok(canvas)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Raw RGBA bytes, row-major.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Color at `(x, y)`, or `None` outside the canvas.
    pub fn pixel(&self, x: usize, y: usize) -> Option<Rgba> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y * self.width + x) * 4;
        Some(Rgba {
            r: self.pixels[i],
            g: self.pixels[i + 1],
            b: self.pixels[i + 2],
            a: self.pixels[i + 3],
        })
    }

    /// Overwrites every pixel with `color`.
    pub fn clear(&mut self, color: Rgba) {
        let rgba = color.to_array();
        self.pixels
            .chunks_exact_mut(4)
            .for_each(|px| px.copy_from_slice(&rgba));
    }

    /// Fills every closed sub-path of `path` using the non-zero winding rule.
    pub fn fill_path(&mut self, path: &Path, color: Rgba) {
        let Some((x0, y0, x1, y1)) = self.pixel_bounds(path, 0.0) else {
            return;
        };
        let polygons: Vec<&[DVec2]> = path.polygons().collect();
        if polygons.is_empty() {
            return;
        }
        for py in y0..y1 {
            for px in x0..x1 {
                let center = DVec2::new(px as f64 + 0.5, py as f64 + 0.5);
                let winding: i32 = polygons.iter().map(|poly| winding_number(poly, center)).sum();
                if winding != 0 {
                    self.accumulate(py * self.width + px, 1.0);
                }
            }
        }
        self.composite(color);
    }

    /// Strokes every segment of `path` as one continuous shape of the given
    /// line width, with round joins and caps.
    pub fn stroke_path(&mut self, path: &Path, color: Rgba, line_width: f64) {
        let half = line_width / 2.0;
        if half <= 0.0 {
            return;
        }
        let reach = half + 0.5;
        for (a, b) in path.segments() {
            let lo = a.min(b) - DVec2::splat(reach);
            let hi = a.max(b) + DVec2::splat(reach);
            let Some((x0, y0, x1, y1)) = self.clip(lo, hi) else {
                continue;
            };
            for py in y0..y1 {
                for px in x0..x1 {
                    let center = DVec2::new(px as f64 + 0.5, py as f64 + 0.5);
                    let cov = (reach - distance_to_segment(center, a, b)).clamp(0.0, 1.0);
                    if cov > 0.0 {
                        self.accumulate(py * self.width + px, cov as f32);
                    }
                }
            }
        }
        self.composite(color);
    }

    /// Fills `path` with `fill`, then strokes it with `stroke`.
    pub fn fill_stroke_path(&mut self, path: &Path, fill: Rgba, stroke: Rgba, line_width: f64) {
        self.fill_path(path, fill);
        self.stroke_path(path, stroke, line_width);
    }

    fn accumulate(&mut self, idx: usize, cov: f32) {
        let slot = &mut self.coverage[idx];
        if *slot == 0.0 {
            self.touched.push(idx);
        }
        *slot = slot.max(cov);
    }

    /// Blends `color` into every touched pixel by its coverage and resets
    /// the scratch buffer.
    fn composite(&mut self, color: Rgba) {
        let src = [color.r, color.g, color.b].map(f64::from);
        let src_alpha = f64::from(color.a) / 255.0;
        for idx in self.touched.drain(..) {
            let alpha = src_alpha * f64::from(self.coverage[idx]);
            self.coverage[idx] = 0.0;
            let px = &mut self.pixels[idx * 4..idx * 4 + 4];
            for (channel, s) in px.iter_mut().zip(src) {
                *channel = (s * alpha + f64::from(*channel) * (1.0 - alpha)).round() as u8;
            }
            let dst_alpha = f64::from(px[3]) / 255.0;
            px[3] = ((alpha + dst_alpha * (1.0 - alpha)) * 255.0).round() as u8;
        }
    }

    /// Pixel range covering the path's bounds grown by `margin`, clipped.
    fn pixel_bounds(&self, path: &Path, margin: f64) -> Option<(usize, usize, usize, usize)> {
        let (lo, hi) = path.bounds()?;
        self.clip(lo - DVec2::splat(margin), hi + DVec2::splat(margin))
    }

    /// Half-open pixel range `[x0, x1) x [y0, y1)` touching `[lo, hi]`,
    /// clipped to the canvas; `None` if nothing is visible.
    fn clip(&self, lo: DVec2, hi: DVec2) -> Option<(usize, usize, usize, usize)> {
        if !(lo.is_finite() && hi.is_finite()) {
            return None;
        }
        let w = self.width as f64;
        let h = self.height as f64;
        let x0 = lo.x.floor().clamp(0.0, w);
        let y0 = lo.y.floor().clamp(0.0, h);
        let x1 = (hi.x.ceil() + 1.0).clamp(0.0, w);
        let y1 = (hi.y.ceil() + 1.0).clamp(0.0, h);
        if x0 >= x1 || y0 >= y1 {
            return None;
        }
        Some((x0 as usize, y0 as usize, x1 as usize, y1 as usize))
    }
}

/// Shortest distance from `p` to segment `ab`.
fn distance_to_segment(p: DVec2, a: DVec2, b: DVec2) -> f64 {
    let ab = b - a;
    let len_sq = ab.length_squared();
    if len_sq == 0.0 {
        return p.distance(a);
    }
    let t = ((p - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    p.distance(a + ab * t)
}

/// Winding number of the closed polygon `poly` around `p`.
fn winding_number(poly: &[DVec2], p: DVec2) -> i32 {
    let n = poly.len();
    (0..n)
        .map(|i| {
            let a = poly[i];
            let b = poly[(i + 1) % n];
            let side = (b - a).perp_dot(p - a);
            if a.y <= p.y && b.y > p.y && side > 0.0 {
                1
            } else if a.y > p.y && b.y <= p.y && side < 0.0 {
                -1
            } else {
                0
            }
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::PathBuilder;

    const RED: Rgba = Rgba::opaque(0xff, 0x00, 0x00);

    fn count_color(canvas: &Canvas, color: Rgba) -> usize {
        (0..canvas.height())
            .flat_map(|y| (0..canvas.width()).map(move |x| (x, y)))
            .filter(|&(x, y)| canvas.pixel(x, y) == Some(color))
            .count()
    }

    #[test]
    fn new_fills_background() {
        let canvas = Canvas::new(4, 3, Rgba::BLACK).unwrap();
        assert_eq!(canvas.pixels().len(), 4 * 3 * 4);
        assert_eq!(count_color(&canvas, Rgba::BLACK), 12);
    }

    #[test]
    fn new_rejects_zero_and_overflowing_dimensions() {
        assert!(matches!(
            Canvas::new(0, 5, Rgba::BLACK),
            Err(EngineError::InvalidDimensions)
        ));
        assert!(Canvas::new(5, 0, Rgba::BLACK).is_err());
        assert!(Canvas::new(usize::MAX, 2, Rgba::BLACK).is_err());
    }

    #[test]
    fn pixel_outside_is_none() {
        let canvas = Canvas::new(2, 2, Rgba::BLACK).unwrap();
        assert!(canvas.pixel(2, 0).is_none());
        assert!(canvas.pixel(0, 2).is_none());
    }

    #[test]
    fn fill_rect_path_covers_pixel_centers_inside() {
        let mut canvas = Canvas::new(10, 10, Rgba::BLACK).unwrap();
        let rect = PathBuilder::new()
            .rect(DVec2::new(2.0, 3.0), DVec2::new(6.0, 5.0))
            .build();
        canvas.fill_path(&rect, RED);
        assert_eq!(count_color(&canvas, RED), 4 * 2);
        assert_eq!(canvas.pixel(2, 3), Some(RED));
        assert_eq!(canvas.pixel(5, 4), Some(RED));
        assert_eq!(canvas.pixel(6, 4), Some(Rgba::BLACK));
    }

    #[test]
    fn fill_is_independent_of_corner_order() {
        let mut a = Canvas::new(10, 10, Rgba::BLACK).unwrap();
        let mut b = Canvas::new(10, 10, Rgba::BLACK).unwrap();
        a.fill_path(
            &PathBuilder::new().rect(DVec2::new(1.0, 1.0), DVec2::new(7.0, 4.0)).build(),
            RED,
        );
        b.fill_path(
            &PathBuilder::new().rect(DVec2::new(7.0, 4.0), DVec2::new(1.0, 1.0)).build(),
            RED,
        );
        assert_eq!(a.pixels(), b.pixels());
    }

    #[test]
    fn fill_clips_to_canvas() {
        let mut canvas = Canvas::new(4, 4, Rgba::BLACK).unwrap();
        let rect = PathBuilder::new()
            .rect(DVec2::new(-100.0, -100.0), DVec2::new(100.0, 100.0))
            .build();
        canvas.fill_path(&rect, RED);
        assert_eq!(count_color(&canvas, RED), 16);
    }

    #[test]
    fn stroke_covers_line_core_fully() {
        let mut canvas = Canvas::new(20, 20, Rgba::BLACK).unwrap();
        let line = Path::polyline(&[DVec2::new(2.0, 10.0), DVec2::new(18.0, 10.0)]);
        canvas.stroke_path(&line, RED, 5.0);
        // pixel centers within 2 of y = 10 are fully covered
        for x in 3..17 {
            for y in 8..12 {
                assert_eq!(canvas.pixel(x, y), Some(RED), "pixel ({x}, {y})");
            }
        }
        assert_eq!(canvas.pixel(10, 2), Some(Rgba::BLACK));
        assert_eq!(canvas.pixel(10, 17), Some(Rgba::BLACK));
    }

    #[test]
    fn stroke_blends_each_pixel_once_at_joins() {
        let color = Rgba {
            a: 0x80,
            ..RED
        };
        let mut joined = Canvas::new(20, 20, Rgba::BLACK).unwrap();
        joined.stroke_path(
            &Path::polyline(&[
                DVec2::new(2.0, 10.0),
                DVec2::new(10.0, 10.0),
                DVec2::new(18.0, 10.0),
            ]),
            color,
            3.0,
        );
        let mut straight = Canvas::new(20, 20, Rgba::BLACK).unwrap();
        straight.stroke_path(
            &Path::polyline(&[DVec2::new(2.0, 10.0), DVec2::new(18.0, 10.0)]),
            color,
            3.0,
        );
        assert_eq!(joined.pixels(), straight.pixels());
    }

    #[test]
    fn single_point_path_draws_nothing() {
        let mut canvas = Canvas::new(8, 8, Rgba::BLACK).unwrap();
        canvas.stroke_path(&Path::polyline(&[DVec2::new(4.0, 4.0)]), RED, 5.0);
        assert_eq!(count_color(&canvas, Rgba::BLACK), 64);
    }

    #[test]
    fn off_canvas_and_non_finite_strokes_are_ignored() {
        let mut canvas = Canvas::new(8, 8, Rgba::BLACK).unwrap();
        canvas.stroke_path(
            &Path::polyline(&[DVec2::new(-50.0, -50.0), DVec2::new(-40.0, -60.0)]),
            RED,
            5.0,
        );
        canvas.stroke_path(
            &Path::polyline(&[DVec2::new(f64::NAN, 1.0), DVec2::new(2.0, 2.0)]),
            RED,
            5.0,
        );
        assert_eq!(count_color(&canvas, Rgba::BLACK), 64);
    }

    #[test]
    fn later_draws_layer_on_top() {
        let blue = Rgba::opaque(0, 0, 0xff);
        let mut canvas = Canvas::new(10, 10, Rgba::BLACK).unwrap();
        let rect = PathBuilder::new()
            .rect(DVec2::new(0.0, 0.0), DVec2::new(10.0, 10.0))
            .build();
        canvas.fill_path(&rect, RED);
        canvas.fill_path(&rect, blue);
        assert_eq!(count_color(&canvas, blue), 100);
    }

    #[test]
    fn clear_resets_every_pixel() {
        let mut canvas = Canvas::new(3, 3, Rgba::BLACK).unwrap();
        canvas.clear(RED);
        assert_eq!(count_color(&canvas, RED), 9);
    }

    #[test]
    fn distance_to_segment_handles_endpoints_and_degenerate() {
        let a = DVec2::new(0.0, 0.0);
        let b = DVec2::new(10.0, 0.0);
        assert!((distance_to_segment(DVec2::new(5.0, 3.0), a, b) - 3.0).abs() < 1e-12);
        assert!((distance_to_segment(DVec2::new(13.0, 4.0), a, b) - 5.0).abs() < 1e-12);
        assert!((distance_to_segment(DVec2::new(3.0, 4.0), a, a) - 5.0).abs() < 1e-12);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn stroke_never_panics_and_keeps_opaque_alpha(
                pts in prop::collection::vec((-50.0_f64..80.0, -50.0_f64..80.0), 0..8),
                width in 0.0_f64..12.0,
            ) {
                let points: Vec<DVec2> = pts.into_iter().map(|(x, y)| DVec2::new(x, y)).collect();
                let mut canvas = Canvas::new(32, 24, Rgba::BLACK).unwrap();
                canvas.stroke_path(&Path::polyline(&points), RED, width);
                prop_assert!(canvas.pixels().chunks_exact(4).all(|px| px[3] == 0xff));
            }
        }
    }
}
