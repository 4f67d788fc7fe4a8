//! Bezier curve evaluation by de Casteljau's algorithm.
//!
//! The control values are repeatedly replaced by the linear interpolation
//! between each consecutive pair until a single value remains. Evaluation
//! happens in place on a fixed-size copy of the controls, so no allocation
//! is needed for any degree.
//!
//! ```rust
//! use glide_polar::curve::bezier;
//!
//! // A cubic with evenly spaced controls is a straight line in t
//! let y = bezier::eval([0.0_f64, 1.0, 2.0, 3.0], 0.5).unwrap();
//! assert_eq!(y, 1.5);
//! ```
//!
//! References
//! * https://en.wikipedia.org/wiki/De_Casteljau%27s_algorithm
use num_traits::Float;

use super::Lerp;
use crate::PolarError;

/// Evaluate the degree `N - 1` Bezier curve with the given controls at `t`.
///
/// # Errors
/// * If `t` is outside of `[0, 1]` (including NaN)
/// * If no controls are given
#[inline]
pub fn eval<P, T, const N: usize>(controls: [P; N], t: T) -> Result<P, PolarError>
where
    P: Lerp<T> + Copy,
    T: Float,
{
    if !(t >= T::zero() && t <= T::one()) {
        return Err(PolarError::OutOfRange);
    }

    let mut c = controls;
    for k in (1..N).rev() {
        for i in 0..k {
            c[i] = c[i].lerp(&c[i + 1], t);
        }
    }

    c.first()
        .copied()
        .ok_or(PolarError::Invalid("a Bezier curve needs at least one control"))
}

/// Evaluate a cubic segment `[start, start handle, end handle, end]` at `t`.
#[inline]
pub fn cubic<P, T>(p0: P, p1: P, p2: P, p3: P, t: T) -> Result<P, PolarError>
where
    P: Lerp<T> + Copy,
    T: Float,
{
    eval([p0, p1, p2, p3], t)
}
