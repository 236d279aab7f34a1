//! Catmull-Rom splines and centerline sampling.
//!
//! Catmull-Rom splines are C1-continuous interpolating splines that pass through
//! all control points. The tangent at each interior point is computed from its
//! two neighbours. The ends are clamped: the missing outer neighbour of the
//! first and last point is the point itself, so nothing outside the given
//! sequence is ever synthesized.
//!
//! # Example
//!
//! ```
//! use pipeshape::{Point2, curves::interpolate};
//!
//! let points = vec![
//!     Point2::new(0.0, 0.0),
//!     Point2::new(50.0, 20.0),
//!     Point2::new(100.0, 0.0),
//! ];
//!
//! let centerline = interpolate(&points, 70, 0.5);
//! assert_eq!(centerline.len(), 70);
//! assert_eq!(centerline[0], points[0]);
//! assert_eq!(centerline[69], points[2]);
//! ```
//!
//! # Tension
//!
//! The tension is the exponent applied to chord lengths when spacing knots:
//! - `0.0`: Uniform (standard Catmull-Rom)
//! - `0.5`: Centripetal (avoids cusps and self-intersections)
//! - `1.0`: Chordal

use crate::error::GeomError;
use crate::primitives::{Point2, Vec2};
use crate::tolerance::remove_duplicate_vertices;
use num_traits::Float;

/// A Catmull-Rom spline in 2D.
#[derive(Debug, Clone, PartialEq)]
pub struct CatmullRom2<F> {
    /// Control points the spline passes through, in order.
    points: Vec<Point2<F>>,
    /// Knot exponent (0.0 = uniform, 0.5 = centripetal, 1.0 = chordal).
    tension: F,
}

impl<F: Float> CatmullRom2<F> {
    /// Builds a spline through `points` with the given tension.
    ///
    /// Non-finite points are dropped and consecutive coincident points are
    /// collapsed into one before the spline is built.
    ///
    /// # Errors
    ///
    /// [`GeomError::InsufficientPoints`] if fewer than 2 usable points remain,
    /// [`GeomError::InvalidConfig`] if the tension is not finite.
    pub fn try_new(points: &[Point2<F>], tension: F) -> Result<Self, GeomError> {
        if !tension.is_finite() {
            return Err(GeomError::InvalidConfig("tension must be finite"));
        }

        let finite: Vec<Point2<F>> = points.iter().copied().filter(|p| p.is_finite()).collect();
        if finite.len() < points.len() {
            tracing::warn!(
                dropped = points.len() - finite.len(),
                "dropping control points with non-finite coordinates"
            );
        }

        let usable = remove_duplicate_vertices(&finite, coincidence_tolerance(&finite));
        if usable.len() < finite.len() {
            tracing::debug!(
                skipped = finite.len() - usable.len(),
                "skipping coincident consecutive control points"
            );
        }

        if usable.len() < 2 {
            return Err(GeomError::InsufficientPoints {
                found: usable.len(),
            });
        }

        Ok(Self {
            points: usable,
            tension,
        })
    }

    /// Builds a centripetal spline (tension 0.5).
    pub fn centripetal(points: &[Point2<F>]) -> Result<Self, GeomError> {
        Self::try_new(points, F::from(0.5).unwrap())
    }

    /// The control points actually used, after filtering.
    pub fn points(&self) -> &[Point2<F>] {
        &self.points
    }

    /// The knot exponent.
    pub fn tension(&self) -> F {
        self.tension
    }

    /// Returns the number of spline segments.
    pub fn num_segments(&self) -> usize {
        self.points.len().saturating_sub(1)
    }

    /// Returns the valid parameter range.
    ///
    /// Parameter t goes from 0.0 to (num_points - 1); control point `i` sits
    /// at `t = i`.
    pub fn domain(&self) -> (F, F) {
        (F::zero(), F::from(self.num_segments()).unwrap_or_else(F::zero))
    }

    /// Evaluates the spline at parameter `t` (clamped to the domain).
    pub fn eval(&self, t: F) -> Point2<F> {
        let n = self.points.len();
        let (t_min, t_max) = self.domain();
        let t = t.max(t_min).min(t_max);

        let segment = t.floor().to_usize().unwrap_or(0).min(n - 2);
        let local_t = t - F::from(segment).unwrap_or_else(F::zero);

        let p1 = self.points[segment];
        let p2 = self.points[segment + 1];

        if n == 2 {
            return p1.lerp(p2, local_t);
        }

        // Clamped neighbours at the ends.
        let p0 = if segment == 0 {
            p1
        } else {
            self.points[segment - 1]
        };
        let p3 = if segment + 2 >= n {
            p2
        } else {
            self.points[segment + 2]
        };

        if self.tension.abs() < F::epsilon() {
            eval_uniform(p0, p1, p2, p3, local_t)
        } else {
            self.eval_general(p0, p1, p2, p3, local_t)
        }
    }

    /// Barry and Goldman's pyramidal formulation with chord-length knots.
    fn eval_general(
        &self,
        p0: Point2<F>,
        p1: Point2<F>,
        p2: Point2<F>,
        p3: Point2<F>,
        t: F,
    ) -> Point2<F> {
        let knot = |a: Point2<F>, b: Point2<F>| {
            let dt = a.distance(b).powf(self.tension);
            // Zero-length intervals (clamped ends) get a unit interval.
            if dt < F::epsilon() || !dt.is_finite() {
                F::one()
            } else {
                dt
            }
        };
        let dt0 = knot(p0, p1);
        let dt1 = knot(p1, p2);
        let dt2 = knot(p2, p3);

        let t1 = dt0;
        let t2 = t1 + dt1;
        let tp = t1 + t * dt1;

        let a1 = p0.lerp(p1, tp / dt0);
        let a2 = p1.lerp(p2, (tp - t1) / dt1);
        let a3 = p2.lerp(p3, (tp - t2) / dt2);

        let b1 = a1.lerp(a2, tp / (t1 + dt1));
        let b2 = a2.lerp(a3, (tp - t1) / (dt1 + dt2));

        b1.lerp(b2, (tp - t1) / dt1)
    }

    /// Samples `count` points at evenly spaced parameter values.
    ///
    /// The first and last samples are exactly the first and last control
    /// points.
    pub fn sample(&self, count: usize) -> Vec<Point2<F>> {
        match count {
            0 => Vec::new(),
            1 => vec![self.points[0]],
            _ => {
                let (_, t_max) = self.domain();
                let last = count - 1;
                let denom = F::from(last).unwrap_or_else(F::one);
                let mut samples: Vec<Point2<F>> = (0..count)
                    .map(|j| {
                        let frac = F::from(j).unwrap_or_else(F::zero) / denom;
                        self.eval(t_max * frac)
                    })
                    .collect();
                samples[0] = self.points[0];
                samples[last] = self.points[self.points.len() - 1];
                samples
            }
        }
    }

    /// Converts the spline to a polyline using adaptive subdivision.
    pub fn to_polyline(&self, tolerance: F) -> Vec<Point2<F>> {
        let (t_min, t_max) = self.domain();
        let mut result = vec![self.eval(t_min)];

        // Subdivide per segment so control points are always kept.
        for seg in 0..self.num_segments() {
            let t0 = F::from(seg).unwrap_or_else(F::zero);
            let t1 = (t0 + F::one()).min(t_max);
            self.subdivide_recursive(t0, t1, tolerance, 0, &mut result);
        }
        result
    }

    fn subdivide_recursive(
        &self,
        t0: F,
        t1: F,
        tolerance: F,
        depth: usize,
        points: &mut Vec<Point2<F>>,
    ) {
        const MAX_DEPTH: usize = 16;

        let two = F::one() + F::one();
        let t_mid = (t0 + t1) / two;

        let p0 = self.eval(t0);
        let p1 = self.eval(t1);
        let p_mid = self.eval(t_mid);

        if depth >= MAX_DEPTH || p_mid.distance(p0.midpoint(p1)) <= tolerance {
            points.push(p1);
        } else {
            self.subdivide_recursive(t0, t_mid, tolerance, depth + 1, points);
            self.subdivide_recursive(t_mid, t1, tolerance, depth + 1, points);
        }
    }

    /// Returns the approximate arc length of the spline.
    pub fn arc_length(&self, tolerance: F) -> F {
        self.to_polyline(tolerance)
            .windows(2)
            .fold(F::zero(), |acc, w| acc + w[0].distance(w[1]))
    }

    /// Evaluates the tangent (derivative) at parameter `t` by central
    /// differences.
    pub fn tangent_at(&self, t: F) -> Vec2<F> {
        let eps = F::from(1e-6).unwrap();
        let (t_min, t_max) = self.domain();

        let t0 = (t - eps).max(t_min);
        let t1 = (t + eps).min(t_max);

        let dt = t1 - t0;
        if dt.abs() < F::epsilon() {
            return Vec2::zero();
        }

        (self.eval(t1) - self.eval(t0)) / dt
    }

    /// Returns the bounding box of the control points as (min, max).
    ///
    /// The curve itself may extend slightly beyond this box.
    pub fn control_bounds(&self) -> (Point2<F>, Point2<F>) {
        let first = self.points[0];
        self.points[1..].iter().fold((first, first), |(lo, hi), p| {
            (
                Point2::new(lo.x.min(p.x), lo.y.min(p.y)),
                Point2::new(hi.x.max(p.x), hi.y.max(p.y)),
            )
        })
    }
}

/// Uniform Catmull-Rom evaluation (basis-matrix form).
fn eval_uniform<F: Float>(
    p0: Point2<F>,
    p1: Point2<F>,
    p2: Point2<F>,
    p3: Point2<F>,
    t: F,
) -> Point2<F> {
    let t2 = t * t;
    let t3 = t2 * t;

    let half = F::from(0.5).unwrap();
    let two = F::from(2.0).unwrap();
    let three = F::from(3.0).unwrap();
    let four = F::from(4.0).unwrap();
    let five = F::from(5.0).unwrap();

    let blend = |c0: F, c1: F, c2: F, c3: F| {
        half * ((two * c1)
            + (-c0 + c2) * t
            + (two * c0 - five * c1 + four * c2 - c3) * t2
            + (-c0 + three * c1 - three * c2 + c3) * t3)
    };

    Point2::new(blend(p0.x, p1.x, p2.x, p3.x), blend(p0.y, p1.y, p2.y, p3.y))
}

/// Distance under which consecutive control points count as coincident.
fn coincidence_tolerance<F: Float>(points: &[Point2<F>]) -> F {
    let scale = points
        .iter()
        .fold(F::one(), |acc, p| acc.max(p.x.abs()).max(p.y.abs()));
    scale * F::epsilon().sqrt()
}

/// Samples a smooth centerline through `points`.
///
/// Returns `sample_count` points on a Catmull-Rom curve with the given
/// tension, or an empty centerline when fewer than two distinct control
/// points are available (a single point draws no curve).
pub fn interpolate<F: Float>(points: &[Point2<F>], sample_count: usize, tension: F) -> Vec<Point2<F>> {
    match CatmullRom2::try_new(points, tension) {
        Ok(spline) => spline.sample(sample_count),
        Err(err) => {
            tracing::debug!(%err, "no centerline for this branch");
            Vec::new()
        }
    }
}
