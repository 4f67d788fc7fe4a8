//! Convenience methods for constructing polars without a polar file.
use itertools::Itertools;

use crate::{ControlPoint, Point, Polar, PolarError};

/// Generates evenly spaced values from start to stop,
/// including the endpoint.
pub fn linspace(start: f64, stop: f64, n: usize) -> Vec<f64> {
    match n {
        0 => vec![],
        1 => vec![start],
        _ => {
            let dx = (stop - start) / (n - 1) as f64;
            (0..n).map(|i| start + i as f64 * dx).collect()
        }
    }
}

/// A classic quadratic polar, `sink = -(a v^2 + b v + c)` with `v` in km/h
/// and sink in m/s.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Quadratic {
    pub a: f64,
    pub b: f64,
    pub c: f64,
}

impl Quadratic {
    #[inline]
    pub fn sink(&self, speed: f64) -> f64 {
        -(self.a * speed * speed + self.b * speed + self.c)
    }

    /// d(sink)/d(speed)
    #[inline]
    pub fn sink_slope(&self, speed: f64) -> f64 {
        -(2.0 * self.a * speed + self.b)
    }

    fn point(&self, speed: f64) -> Point {
        Point::new(speed, self.sink(speed))
    }

    /// Handle a signed distance `dv` away from the anchor at `speed`,
    /// along the tangent.
    fn handle(&self, speed: f64, dv: f64) -> Point {
        Point::new(speed + dv, self.sink(speed) + self.sink_slope(speed) * dv)
    }
}

/// Build a polar that follows a quadratic exactly, with anchors at the
/// given speeds.
///
/// Handles sit a third of the way along each segment on the tangent, which
/// makes speed linear in the Bezier parameter and each segment the exact
/// degree elevation of the parabola between its anchors.
///
/// # Errors
/// * If fewer than two anchors are given
/// * If the anchor speeds are not strictly increasing
pub fn quadratic_polar(q: Quadratic, anchors: &[f64]) -> Result<Polar, PolarError> {
    if anchors.len() < 2 {
        return Err(PolarError::Invalid(
            "a polar needs at least two control points",
        ));
    }
    let increasing = anchors.iter().tuple_windows().all(|(a, b)| b > a);
    if !increasing {
        return Err(PolarError::Invalid("anchor speeds must be strictly increasing"));
    }

    let n = anchors.len();
    let points = (0..n)
        .map(|i| {
            let v = anchors[i];
            let h_next = if i + 1 < n { anchors[i + 1] - v } else { v - anchors[i - 1] };
            let h_prev = if i > 0 { v - anchors[i - 1] } else { h_next };
            ControlPoint::new(
                q.point(v),
                q.handle(v, -h_prev / 3.0),
                q.handle(v, h_next / 3.0),
            )
        })
        .collect();

    Polar::new(points)
}
