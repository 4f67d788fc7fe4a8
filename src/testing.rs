use rand::rngs::StdRng;
use rand::Rng;
use rand::SeedableRng;

use crate::utils::{quadratic_polar, Quadratic};
use crate::{ControlPoint, Point, Polar};

/// Fixed random seed to support repeatable testing
const SEED: [u8; 32] = [
    0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16, 15, 14, 13, 12, 11, 10, 9, 8, 7, 6,
    5, 4, 3, 2, 1,
];

/// Get a random number generator with a const seed for repeatable testing
pub fn rng_fixed_seed() -> StdRng {
    StdRng::from_seed(SEED)
}

/// Generate `n` uniformly distributed numbers in `[lo, hi)`
pub fn uniform(rng: &mut StdRng, n: usize, lo: f64, hi: f64) -> Vec<f64> {
    std::iter::repeat_with(|| rng.random_range(lo..hi))
        .take(n)
        .collect()
}

/// Two-seater-like polar with minimum sink 0.6 m/s at 70 km/h.
///
/// Tangent points are known in closed form, see `expected_speed_to_fly`.
pub const REFERENCE: Quadratic = Quadratic {
    a: 0.0004,
    b: -0.056,
    c: 2.56,
};

pub const REFERENCE_ANCHORS: [f64; 5] = [60.0, 70.0, 100.0, 140.0, 200.0];

pub const REFERENCE_MIN_SINK_SPEED: f64 = 70.0;

pub fn reference_sink(speed: f64) -> f64 {
    REFERENCE.sink(speed)
}

pub fn quadratic_reference(anchors: &[f64]) -> Polar {
    quadratic_polar(REFERENCE, anchors).unwrap()
}

pub fn reference_polar() -> Polar {
    quadratic_reference(&REFERENCE_ANCHORS)
}

/// Speed where the line from `(-wind, mc)` touches the reference polar.
///
/// Solves `f(v) + mc = f'(v) (v + wind)` for `f(v) = a v^2 + b v + c`.
pub fn expected_speed_to_fly(mc: f64, wind: f64) -> f64 {
    let Quadratic { a, b, c } = REFERENCE;
    -wind + (wind * wind - (b * wind - c - mc) / a).sqrt()
}

/// Largest speed increment between consecutive samples
pub fn max_step(polar: &Polar) -> f64 {
    let steps = polar.sampling().steps_per_segment() as f64;
    polar
        .control_points()
        .windows(2)
        .map(|w| (w[1].anchor.speed - w[0].anchor.speed) / steps)
        .fold(0.0, f64::max)
}

pub fn assert_point_close(a: &Point, b: &Point, tol: f64) {
    assert!(
        (a.speed - b.speed).abs() <= tol && (a.sink - b.sink).abs() <= tol,
        "{a:?} != {b:?}"
    );
}

pub fn assert_control_point_close(a: &ControlPoint, b: &ControlPoint, tol: f64) {
    assert_point_close(&a.anchor, &b.anchor, tol);
    assert_point_close(&a.previous_handle, &b.previous_handle, tol);
    assert_point_close(&a.next_handle, &b.next_handle, tol);
}
