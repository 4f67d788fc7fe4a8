//! Piecewise-cubic Bezier curves over a sequence of control points.
//!
//! Every query on a polar is phrased as "find the first sample along the
//! curve that satisfies some condition". This module provides the pieces
//! that make that possible: a degree-agnostic Bezier evaluator and a
//! fixed-density walker that samples each segment in turn, in either
//! direction, and stops at the first sample accepted by a predicate.
//!
//! Sampling is deliberately brute-force. Each segment costs
//! `steps_per_segment + 1` evaluations, so a full traversal is bounded by
//! `(steps_per_segment + 1) * (n - 1)` samples and always terminates.

pub mod bezier;
pub mod walk;

pub use walk::{walk, Direction, Sampling, Samples, DEFAULT_STEPS_PER_SEGMENT};

/// Linear interpolation between two values.
///
/// Implementations must return `self` exactly at `t = 0` and `other`
/// exactly at `t = 1`, so that adjacent segments meet without drift.
pub trait Lerp<T> {
    fn lerp(&self, other: &Self, t: T) -> Self;
}

macro_rules! impl_lerp_float {
    ($($t:ty),*) => {
        $(
            impl Lerp<$t> for $t {
                #[inline]
                fn lerp(&self, other: &Self, t: $t) -> Self {
                    // Exact at t = 1, unlike `self + t * (other - self)`, so the
                    // last sample of a segment equals the next segment's first
                    (1.0 - t) * self + t * other
                }
            }
        )*
    };
}

impl_lerp_float!(f32, f64);
