//! Points on the speed / sink-rate plane and the Bezier control points
//! built from them.
//!
//! All values are in native units: speed in km/h and sink rate in m/s,
//! with descending flight negative.
use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::curve::Lerp;

/// Conversion between m/s and km/h.
pub const KMH_PER_MPS: f64 = 3.6;

/// A point on a polar chart.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Point {
    /// Airspeed (km/h)
    pub speed: f64,
    /// Sink rate (m/s), negative when descending
    pub sink: f64,
}

impl Point {
    pub const fn new(speed: f64, sink: f64) -> Self {
        Self { speed, sink }
    }

    /// Glide ratio over the ground for a given wind (km/h, tailwinds positive).
    #[inline]
    pub fn glide_ratio(&self, wind: f64) -> f64 {
        -(self.speed + wind) / (KMH_PER_MPS * self.sink)
    }

    /// Glide ratio in still air.
    #[inline]
    pub fn glide_ratio_still_air(&self) -> f64 {
        self.glide_ratio(0.0)
    }

    /// Slope of the line from `origin` to this point on the chart.
    ///
    /// This is a slope in (m/s) / (km/h), not a glide ratio.
    #[inline]
    pub fn slope_from(&self, origin: &Point) -> f64 {
        (self.sink - origin.sink) / (self.speed - origin.speed)
    }

    /// Scale both speed and sink rate by the same factor.
    #[inline]
    pub fn scale(&self, multiplier: f64) -> Self {
        Self {
            speed: self.speed * multiplier,
            sink: self.sink * multiplier,
        }
    }
}

impl Lerp<f64> for Point {
    #[inline]
    fn lerp(&self, other: &Self, t: f64) -> Self {
        Self {
            speed: Lerp::lerp(&self.speed, &other.speed, t),
            sink: Lerp::lerp(&self.sink, &other.sink, t),
        }
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:.0} km/h, {:.2} m/s, {:.1}:1",
            self.speed,
            self.sink,
            self.glide_ratio_still_air()
        )
    }
}

/// An anchor on the polar plus the handles of the Bezier segments on
/// either side of it.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ControlPoint {
    pub anchor: Point,
    /// Handle used by the segment ending at this anchor
    pub previous_handle: Point,
    /// Handle used by the segment starting at this anchor
    pub next_handle: Point,
}

impl ControlPoint {
    pub const fn new(anchor: Point, previous_handle: Point, next_handle: Point) -> Self {
        Self {
            anchor,
            previous_handle,
            next_handle,
        }
    }

    /// Scale the anchor and both handles.
    pub fn scale(&self, multiplier: f64) -> Self {
        Self {
            anchor: self.anchor.scale(multiplier),
            previous_handle: self.previous_handle.scale(multiplier),
            next_handle: self.next_handle.scale(multiplier),
        }
    }
}
