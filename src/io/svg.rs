//! SVG path data export.
//!
//! Produces the `d` attribute of an SVG `<path>` element for centerlines,
//! pipe outlines and clip results. Each ring becomes one `M ... Z` subpath;
//! holes wind opposite to their outer ring, so the default `nonzero` fill
//! rule renders them as holes.
//!
//! # Example
//!
//! ```
//! use pipeshape::{Point2, io::polyline_to_svg_path};
//!
//! let points = vec![
//!     Point2::new(0.0, 0.0),
//!     Point2::new(10.0, 0.0),
//!     Point2::new(10.0, 10.0),
//! ];
//!
//! assert_eq!(polyline_to_svg_path(&points, false), "M 0 0 L 10 0 L 10 10");
//! ```

use crate::polygon::{PipeBoundary, Polygon, Ring};
use crate::primitives::Point2;
use num_traits::Float;
use std::fmt::{self, Write};

/// Converts a polyline to SVG path data, closing it with `Z` if requested.
pub fn polyline_to_svg_path<F: Float + fmt::Display>(points: &[Point2<F>], closed: bool) -> String {
    render(|out| write_subpath(out, points, closed))
}

/// Converts a ring to a closed subpath.
pub fn ring_to_svg_path<F: Float + fmt::Display>(ring: &Ring<F>) -> String {
    polyline_to_svg_path(&ring.vertices, true)
}

/// Converts a polygon to SVG path data: the outer ring followed by its holes.
///
/// # Example
///
/// ```
/// use pipeshape::{Point2, polygon::Polygon, io::polygon_to_svg_path};
///
/// let poly = Polygon::new(vec![
///     Point2::new(0.0, 0.0),
///     Point2::new(10.0, 0.0),
///     Point2::new(10.0, 10.0),
/// ]);
///
/// let svg = polygon_to_svg_path(&poly);
/// assert!(svg.ends_with("Z"));
/// ```
pub fn polygon_to_svg_path<F: Float + fmt::Display>(polygon: &Polygon<F>) -> String {
    polygons_to_svg_path(std::slice::from_ref(polygon))
}

/// Converts a set of polygons, e.g. a clip result, to one path.
pub fn polygons_to_svg_path<F: Float + fmt::Display>(polygons: &[Polygon<F>]) -> String {
    render(|out| {
        for ring in polygons.iter().flat_map(Polygon::rings) {
            if ring.is_empty() {
                continue;
            }
            if !out.is_empty() {
                out.push(' ');
            }
            write_subpath(out, &ring.vertices, true)?;
        }
        Ok(())
    })
}

/// Converts a pipe outline to a closed path: the upper side forward, then
/// the lower side backward.
pub fn pipe_to_svg_path<F: Float + fmt::Display>(pipe: &PipeBoundary<F>) -> String {
    ring_to_svg_path(&pipe.outer_ring())
}

fn render(build: impl FnOnce(&mut String) -> fmt::Result) -> String {
    let mut out = String::new();
    // Writing into a String does not fail.
    let _ = build(&mut out);
    out
}

fn write_subpath<F: Float + fmt::Display>(
    out: &mut String,
    points: &[Point2<F>],
    closed: bool,
) -> fmt::Result {
    let Some((first, rest)) = points.split_first() else {
        return Ok(());
    };

    write!(out, "M {} {}", first.x, first.y)?;
    for p in rest {
        write!(out, " L {} {}", p.x, p.y)?;
    }
    if closed {
        out.push_str(" Z");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::polygon::pipe_boundary;

    fn square(x: f64, y: f64, size: f64) -> Ring<f64> {
        Ring::new(vec![
            Point2::new(x, y),
            Point2::new(x + size, y),
            Point2::new(x + size, y + size),
            Point2::new(x, y + size),
        ])
    }

    #[test]
    fn test_polyline_to_svg() {
        let points = vec![Point2::new(0.0, 0.0), Point2::new(1.5, -2.0)];
        assert_eq!(polyline_to_svg_path(&points, false), "M 0 0 L 1.5 -2");
        assert_eq!(polyline_to_svg_path(&points, true), "M 0 0 L 1.5 -2 Z");
        assert_eq!(polyline_to_svg_path::<f64>(&[], true), "");
    }

    #[test]
    fn test_polygon_with_hole() {
        let hole = square(1.0, 1.0, 2.0).reversed();
        let polygon = Polygon::with_holes(square(0.0, 0.0, 4.0), vec![hole]);
        let svg = polygon_to_svg_path(&polygon);
        assert_eq!(svg.matches('M').count(), 2);
        assert_eq!(svg.matches('Z').count(), 2);
        assert!(svg.starts_with("M 0 0 L 4 0"));
        assert!(svg.contains("Z M 1 3"));
    }

    #[test]
    fn test_polygon_set() {
        let polygons = vec![
            Polygon::with_holes(square(0.0, 0.0, 1.0), vec![]),
            Polygon::with_holes(square(5.0, 5.0, 1.0), vec![]),
        ];
        let svg = polygons_to_svg_path(&polygons);
        assert_eq!(svg.matches('M').count(), 2);
        assert!(polygons_to_svg_path::<f64>(&[]).is_empty());
    }

    #[test]
    fn test_pipe_path() {
        let centerline = vec![
            Point2::new(0.0, 0.0),
            Point2::new(10.0, 0.0),
            Point2::new(20.0, 0.0),
        ];
        let svg = pipe_to_svg_path(&pipe_boundary(&centerline, 2.0));
        assert_eq!(svg, "M 0 2 L 10 2 L 10 -2 L 0 -2 Z");
    }
}
