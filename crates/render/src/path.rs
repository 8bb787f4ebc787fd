//! Vector paths accumulated with a builder and flushed onto a [`Canvas`].
//!
//! A [`PathBuilder`] collects sub-paths (`move_to`, `line_to`, `close`) and
//! produces an immutable [`Path`]. Nothing touches pixels until the path is
//! handed to [`Canvas::fill_path`] or [`Canvas::stroke_path`].
//!
//! [`Canvas`]: crate::canvas::Canvas
//! [`Canvas::fill_path`]: crate::canvas::Canvas::fill_path
//! [`Canvas::stroke_path`]: crate::canvas::Canvas::stroke_path

use std::f64::consts::TAU;

use glam::DVec2;

/// Segments used to approximate a full circle.
const CIRCLE_SEGMENTS: usize = 64;

#[derive(Debug, Clone, PartialEq)]
struct SubPath {
    points: Vec<DVec2>,
    closed: bool,
}

/// An immutable set of sub-paths.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Path {
    subpaths: Vec<SubPath>,
}

impl Path {
    /// A single open polyline through `points`.
    pub fn polyline(points: &[DVec2]) -> Self {
        match points.split_first() {
            Some((&first, rest)) => rest
                .iter()
                .fold(PathBuilder::new().move_to(first), |b, &p| b.line_to(p))
                .build(),
            None => Self::default(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.subpaths.iter().all(|s| s.points.is_empty())
    }

    /// Every straight segment to stroke, including closing segments.
    pub fn segments(&self) -> impl Iterator<Item = (DVec2, DVec2)> + '_ {
        self.subpaths.iter().flat_map(|s| {
            let closing = match (s.closed, s.points.first(), s.points.last()) {
                (true, Some(&first), Some(&last)) if s.points.len() > 1 => Some((last, first)),
                _ => None,
            };
            s.points
                .windows(2)
                .map(|w| (w[0], w[1]))
                .chain(closing)
        })
    }

    /// Sub-path outlines treated as closed polygons, for filling.
    pub fn polygons(&self) -> impl Iterator<Item = &[DVec2]> + '_ {
        self.subpaths
            .iter()
            .filter(|s| s.points.len() > 2)
            .map(|s| s.points.as_slice())
    }

    /// Axis-aligned bounds `(min, max)` of every point, or `None` if empty.
    pub fn bounds(&self) -> Option<(DVec2, DVec2)> {
        self.subpaths
            .iter()
            .flat_map(|s| s.points.iter().copied())
            .fold(None, |acc, p| match acc {
                None => Some((p, p)),
                Some((lo, hi)) => Some((lo.min(p), hi.max(p))),
            })
    }
}

/// Accumulates sub-paths; consumed by [`PathBuilder::build`].
#[derive(Debug, Clone, Default)]
pub struct PathBuilder {
    subpaths: Vec<SubPath>,
}

impl PathBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a new sub-path at `p`.
    pub fn move_to(mut self, p: DVec2) -> Self {
        self.subpaths.push(SubPath {
            points: vec![p],
            closed: false,
        });
        self
    }

    /// Extends the current sub-path to `p`, starting one at `p` if none is open.
    pub fn line_to(mut self, p: DVec2) -> Self {
        if !self.subpaths.last().is_some_and(|s| !s.closed) {
            return self.move_to(p);
        }
        if let Some(current) = self.subpaths.last_mut() {
            current.points.push(p);
        }
        self
    }

    /// Closes the current sub-path back to its first point.
    pub fn close(mut self) -> Self {
        if let Some(current) = self.subpaths.last_mut() {
            current.closed = true;
        }
        self
    }

    /// Adds a closed rectangle with opposite corners `a` and `b`.
    pub fn rect(self, a: DVec2, b: DVec2) -> Self {
        self.move_to(a)
            .line_to(DVec2::new(a.x, b.y))
            .line_to(b)
            .line_to(DVec2::new(b.x, a.y))
            .close()
    }

    /// Adds a closed polygonal circle.
    pub fn circle(self, center: DVec2, radius: f64) -> Self {
        let start = center + DVec2::new(radius, 0.0);
        (1..CIRCLE_SEGMENTS)
            .map(|i| {
                let angle = TAU * i as f64 / CIRCLE_SEGMENTS as f64;
                center + radius * DVec2::from_angle(angle)
            })
            .fold(self.move_to(start), |b, p| b.line_to(p))
            .close()
    }

    pub fn build(self) -> Path {
        Path {
            subpaths: self.subpaths,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: f64, y: f64) -> DVec2 {
        DVec2::new(x, y)
    }

    #[test]
    fn polyline_segments_connect_consecutive_points() {
        let path = Path::polyline(&[p(0.0, 0.0), p(1.0, 0.0), p(1.0, 1.0)]);
        let segs: Vec<_> = path.segments().collect();
        assert_eq!(segs, vec![(p(0.0, 0.0), p(1.0, 0.0)), (p(1.0, 0.0), p(1.0, 1.0))]);
    }

    #[test]
    fn single_point_polyline_has_no_segments() {
        let path = Path::polyline(&[p(3.0, 4.0)]);
        assert!(!path.is_empty());
        assert_eq!(path.segments().count(), 0);
    }

    #[test]
    fn empty_polyline_is_empty() {
        let path = Path::polyline(&[]);
        assert!(path.is_empty());
        assert!(path.bounds().is_none());
    }

    #[test]
    fn rect_is_closed_with_four_segments() {
        let path = PathBuilder::new().rect(p(0.0, 0.0), p(2.0, 3.0)).build();
        let segs: Vec<_> = path.segments().collect();
        assert_eq!(segs.len(), 4);
        assert_eq!(segs[3], (p(2.0, 0.0), p(0.0, 0.0)));
        assert_eq!(path.polygons().count(), 1);
    }

    #[test]
    fn line_to_after_close_starts_new_subpath() {
        let path = PathBuilder::new()
            .move_to(p(0.0, 0.0))
            .line_to(p(1.0, 0.0))
            .close()
            .line_to(p(5.0, 5.0))
            .line_to(p(6.0, 5.0))
            .build();
        let segs: Vec<_> = path.segments().collect();
        // two-point closed sub-path retraces itself, then the new one
        assert_eq!(segs.len(), 3);
        assert_eq!(segs[2], (p(5.0, 5.0), p(6.0, 5.0)));
    }

    #[test]
    fn circle_points_lie_on_radius() {
        let c = p(10.0, -4.0);
        let path = PathBuilder::new().circle(c, 3.0).build();
        assert_eq!(path.segments().count(), CIRCLE_SEGMENTS);
        for (a, _) in path.segments() {
            assert!((a.distance(c) - 3.0).abs() < 1e-9);
        }
    }

    #[test]
    fn bounds_cover_all_points() {
        let path = Path::polyline(&[p(1.0, 5.0), p(-2.0, 3.0), p(4.0, -1.0)]);
        assert_eq!(path.bounds(), Some((p(-2.0, -1.0), p(4.0, 5.0))));
    }
}
