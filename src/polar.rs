//! Glider performance polars.
//!
//! A polar is an open piecewise-cubic Bezier curve of sink rate against
//! airspeed, ordered from the minimum-speed end to the maximum-speed end.
//! Every performance query is answered by walking the sampled curve and
//! stopping at the first sample that satisfies the query's condition:
//!
//! | Query                    | Stops when                                   | Returns             |
//! |--------------------------|----------------------------------------------|---------------------|
//! | `value_at_speed(v)`      | `v` lies between the last and current sample | midpoint of the two |
//! | `minimum_sink()`         | sink rate starts getting worse               | the previous sample |
//! | `speed_to_fly(mc, wind)` | slope from the MacCready origin decreases    | the previous sample |
//!
//! Searches find the first local extremum in traversal order, so a
//! well-formed polar is expected to have a single minimum-sink point.
//!
//! ```rust
//! use glide_polar::{ControlPoint, Point, Polar};
//!
//! let polar = Polar::new(vec![
//!     ControlPoint::new(
//!         Point::new(60.0, -0.8),
//!         Point::new(50.0, -0.9),
//!         Point::new(75.0, -0.5),
//!     ),
//!     ControlPoint::new(
//!         Point::new(180.0, -2.8),
//!         Point::new(120.0, -0.8),
//!         Point::new(200.0, -3.6),
//!     ),
//! ])
//! .unwrap();
//!
//! let best = polar.best_glide().unwrap();
//! assert!(best.speed > 60.0 && best.speed < 180.0);
//! assert_eq!(polar.minimum_speed().speed, 60.0);
//! ```
use alloc::vec::Vec;

use num_traits::Float;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::curve::{walk, Direction, Lerp, Samples, Sampling};
use crate::{ControlPoint, Point, PolarError};

/// An immutable polar curve with at least two control points.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(try_from = "PolarData", into = "PolarData")
)]
pub struct Polar {
    points: Vec<ControlPoint>,
    sampling: Sampling,
}

impl Polar {
    /// Build a polar from control points ordered by increasing speed.
    ///
    /// The curve is not checked for physical plausibility.
    ///
    /// # Errors
    /// * If fewer than two control points are given
    pub fn new(points: Vec<ControlPoint>) -> Result<Self, PolarError> {
        if points.len() < 2 {
            return Err(PolarError::Invalid(
                "a polar needs at least two control points",
            ));
        }

        Ok(Self {
            points,
            sampling: Sampling::default(),
        })
    }

    /// Use a different sampling density for queries on this polar.
    pub fn with_sampling(mut self, sampling: Sampling) -> Self {
        self.sampling = sampling;
        self
    }

    pub fn sampling(&self) -> Sampling {
        self.sampling
    }

    pub fn control_points(&self) -> &[ControlPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always false; a polar holds at least two control points.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first(&self) -> &ControlPoint {
        &self.points[0]
    }

    pub fn last(&self) -> &ControlPoint {
        &self.points[self.points.len() - 1]
    }

    /// Every sample of a walk along the curve, in traversal order.
    pub fn samples(&self, direction: Direction) -> Samples<'_> {
        Samples::new(&self.points, self.sampling, direction)
    }

    /// First sample along the curve for which `predicate` is true,
    /// or `None` if the curve is exhausted.
    pub fn walk<F>(&self, direction: Direction, predicate: F) -> Result<Option<Point>, PolarError>
    where
        F: FnMut(&Point) -> bool,
    {
        walk(&self.points, self.sampling, direction, predicate)
    }

    /// Sink rate at a speed (km/h).
    ///
    /// The result is the midpoint of the two consecutive samples that
    /// bracket `speed`, not an exact solve, so its speed is within half a
    /// sample step of the request.
    ///
    /// # Errors
    /// * If `speed` is outside of the sampled range of the curve
    pub fn value_at_speed(&self, speed: f64) -> Result<Point, PolarError> {
        let mut last: Option<Point> = None;

        let found = self.walk(Direction::Forward, |p| {
            if let Some(l) = last {
                if speed >= l.speed && speed <= p.speed {
                    return true;
                }
            }
            last = Some(*p);
            false
        })?;

        match (last, found) {
            (Some(l), Some(p)) => Ok(l.lerp(&p, 0.5)),
            _ => Err(PolarError::NotFound(
                "no value could be found on the polar at this speed",
            )),
        }
    }

    /// The point with the lowest rate of descent.
    ///
    /// # Errors
    /// * If the sink rate improves across the whole curve
    pub fn minimum_sink(&self) -> Result<Point, PolarError> {
        let mut last: Option<Point> = None;

        let found = self.walk(Direction::Forward, |p| {
            if let Some(l) = last {
                if p.sink < l.sink {
                    return true;
                }
            }
            last = Some(*p);
            false
        })?;

        match (found, last) {
            (Some(_), Some(l)) => Ok(l),
            _ => Err(PolarError::NotFound("no minimum sink rate could be found")),
        }
    }

    /// The low-speed end of the curve.
    pub fn minimum_speed(&self) -> Point {
        self.first().anchor
    }

    /// The high-speed end of the curve.
    pub fn maximum_speed(&self) -> Point {
        self.last().anchor
    }

    /// MacCready speed-to-fly.
    ///
    /// `mc` is the expected climb rate in the next thermal (m/s) and `wind`
    /// is in km/h with tailwinds positive. The result is the point where a
    /// line from `(-wind, mc)` touches the polar.
    ///
    /// # Errors
    /// * If no tangent point exists within the sampled speed range
    pub fn speed_to_fly(&self, mc: f64, wind: f64) -> Result<Point, PolarError> {
        let origin = Point::new(-wind, mc);
        let mut last_slope = f64::MIN;
        let mut last: Option<Point> = None;

        let found = self.walk(Direction::Forward, |p| {
            let slope = p.slope_from(&origin);
            if slope < last_slope {
                return true;
            }
            last_slope = slope;
            last = Some(*p);
            false
        })?;

        match (found, last) {
            (Some(_), Some(l)) => Ok(l),
            _ => Err(PolarError::NotFound("no speed-to-fly value could be found")),
        }
    }

    /// Speed-to-fly together with the glide ratio achieved in `wind`.
    pub fn speed_to_fly_with_glide(&self, mc: f64, wind: f64) -> Result<(Point, f64), PolarError> {
        let point = self.speed_to_fly(mc, wind)?;
        Ok((point, point.glide_ratio(wind)))
    }

    /// Best glide in still air, i.e. speed-to-fly for MacCready zero.
    pub fn best_glide(&self) -> Result<Point, PolarError> {
        self.speed_to_fly(0.0, 0.0)
    }

    /// The same aircraft flown at a different mass.
    ///
    /// Speed and sink rate both scale with the square root of wing loading,
    /// so every anchor and handle is scaled by `sqrt(new_mass / ref_mass)`.
    /// Glide ratios are unchanged.
    ///
    /// # Errors
    /// * If either mass is not positive and finite
    pub fn shift(&self, ref_mass: f64, new_mass: f64) -> Result<Self, PolarError> {
        let valid = |m: f64| m.is_finite() && m > 0.0;
        if !(valid(ref_mass) && valid(new_mass)) {
            return Err(PolarError::Invalid("masses must be positive and finite"));
        }

        let multiplier = Float::sqrt(new_mass / ref_mass);
        tracing::debug!(ref_mass, new_mass, multiplier, "shifting polar");

        Ok(Self {
            points: self.points.iter().map(|cp| cp.scale(multiplier)).collect(),
            sampling: self.sampling,
        })
    }
}

impl TryFrom<Vec<ControlPoint>> for Polar {
    type Error = PolarError;

    fn try_from(points: Vec<ControlPoint>) -> Result<Self, Self::Error> {
        Self::new(points)
    }
}

impl From<Polar> for Vec<ControlPoint> {
    fn from(polar: Polar) -> Self {
        polar.points
    }
}

/// Serialized form of a polar; deserializing goes back through `Polar::new`.
#[cfg(feature = "serde")]
#[derive(Serialize, Deserialize)]
struct PolarData {
    points: Vec<ControlPoint>,
    #[serde(default)]
    sampling: Sampling,
}

#[cfg(feature = "serde")]
impl TryFrom<PolarData> for Polar {
    type Error = PolarError;

    fn try_from(data: PolarData) -> Result<Self, Self::Error> {
        Ok(Self::new(data.points)?.with_sampling(data.sampling))
    }
}

#[cfg(feature = "serde")]
impl From<Polar> for PolarData {
    fn from(polar: Polar) -> Self {
        Self {
            points: polar.points,
            sampling: polar.sampling,
        }
    }
}
