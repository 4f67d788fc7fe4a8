//! Glider performance polars, no-std compatible,
//! prioritizing reproducible results over closed-form precision.
//!
//! A polar is the curve of sink rate against airspeed for an unpowered
//! aircraft. Here it is stored as an open chain of cubic Bezier segments,
//! exactly as produced by common simulator tooling, and every performance
//! figure is found by sampling that chain at a fixed density and stopping
//! at the first sample that satisfies a condition.
//!
//! # Units
//! Speeds are km/h and sink rates are m/s, negative when descending.
//! Wind is km/h with tailwinds positive, and the MacCready setting is the
//! expected climb rate in the next thermal in m/s.
//!
//! # Cost
//! Every query walks at most `(steps_per_segment + 1) * (n - 1)` samples
//! of an `n`-point polar, with no allocation during the walk.
//!
//! | Query                         | Samples                      |
//! |-------------------------------|------------------------------|
//! | `Polar::minimum_speed`        | 0                            |
//! | `Polar::value_at_speed`       | up to the requested speed    |
//! | `Polar::minimum_sink`         | up to the minimum sink point |
//! | `Polar::speed_to_fly`         | up to the tangent point      |
//! | `Polar::shift`                | 0, O(n) copy                 |
//!
//! # Example
//! ```rust
//! use glide_polar::utils::{linspace, quadratic_polar, Quadratic};
//!
//! let q = Quadratic { a: 0.0004, b: -0.056, c: 2.56 };
//! let polar = quadratic_polar(q, &linspace(60.0, 200.0, 5)).unwrap();
//!
//! let best = polar.best_glide().unwrap();
//! let (cruise, glide) = polar.speed_to_fly_with_glide(3.2, 0.0).unwrap();
//! assert!(cruise.speed > best.speed);
//! assert!(glide < best.glide_ratio_still_air());
//!
//! // Heavier, faster, same best glide ratio
//! let ballasted = polar.shift(440.0, 600.0).unwrap();
//! let heavy_best = ballasted.best_glide().unwrap();
//! assert!(heavy_best.speed > best.speed);
//! assert!((heavy_best.glide_ratio_still_air() - best.glide_ratio_still_air()).abs() < 0.05);
//! ```
#![cfg_attr(not(feature = "std"), no_std)]
// Index loops mirror the de Casteljau recurrence directly
#![allow(clippy::needless_range_loop)]

extern crate alloc;

pub mod curve;
pub use curve::{Direction, Sampling};

mod error;
pub use error::PolarError;

pub mod point;
pub use point::{ControlPoint, Point};

pub mod polar;
pub use polar::Polar;

pub mod io;

pub mod glider;
pub use glider::{Glider, WinPilotPolar};

#[cfg(feature = "std")]
pub mod utils;

#[cfg(all(test, feature = "std"))]
pub(crate) mod testing;
