//! Fixed-density traversal of a piecewise-cubic curve.
//!
//! Segment `i` of a curve walked forward is the cubic
//! `[anchor_i, next_handle_i, previous_handle_i+1, anchor_i+1]`.
//! Walked backward, segments start from the last control point and use
//! `[anchor_i, previous_handle_i, next_handle_i-1, anchor_i-1]`.
//!
//! Each segment is sampled at `t = j / steps_per_segment` for
//! `j = 0..=steps_per_segment`, so the shared anchor between two segments
//! is visited twice in a row.
use core::iter::Rev;
use core::ops::Range;

use itertools::Either;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::bezier;
use crate::{ControlPoint, Point, PolarError};

/// Samples per segment that reproduce the reference values for polar queries.
pub const DEFAULT_STEPS_PER_SEGMENT: usize = 1000;

/// Order in which the control points are traversed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Direction {
    /// From the first control point (lowest speed) to the last
    #[default]
    Forward,
    /// From the last control point to the first
    Backward,
}

/// Sampling density of a curve walk, never less than one step per segment.
///
/// Serialized as the bare step count.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(try_from = "usize", into = "usize")
)]
pub struct Sampling {
    steps_per_segment: usize,
}

impl Sampling {
    /// # Errors
    /// * If `steps_per_segment` is zero
    pub fn new(steps_per_segment: usize) -> Result<Self, PolarError> {
        if steps_per_segment == 0 {
            return Err(PolarError::Invalid(
                "at least one step per segment is required",
            ));
        }
        Ok(Self { steps_per_segment })
    }

    pub fn steps_per_segment(&self) -> usize {
        self.steps_per_segment
    }
}

impl Default for Sampling {
    fn default() -> Self {
        Self {
            steps_per_segment: DEFAULT_STEPS_PER_SEGMENT,
        }
    }
}

impl TryFrom<usize> for Sampling {
    type Error = PolarError;

    fn try_from(steps_per_segment: usize) -> Result<Self, Self::Error> {
        Self::new(steps_per_segment)
    }
}

impl From<Sampling> for usize {
    fn from(sampling: Sampling) -> Self {
        sampling.steps_per_segment
    }
}

/// The four Bezier controls of the segment starting at control point `i`.
#[inline]
fn segment(points: &[ControlPoint], i: usize, direction: Direction) -> [Point; 4] {
    match direction {
        Direction::Forward => {
            let (a, b) = (&points[i], &points[i + 1]);
            [a.anchor, a.next_handle, b.previous_handle, b.anchor]
        }
        Direction::Backward => {
            let (a, b) = (&points[i], &points[i - 1]);
            [a.anchor, a.previous_handle, b.next_handle, b.anchor]
        }
    }
}

/// Iterator over every sample of a curve walk, in traversal order.
pub struct Samples<'a> {
    points: &'a [ControlPoint],
    direction: Direction,
    steps: usize,
    segments: Either<Range<usize>, Rev<Range<usize>>>,
    current: Option<[Point; 4]>,
    j: usize,
}

impl<'a> Samples<'a> {
    pub fn new(points: &'a [ControlPoint], sampling: Sampling, direction: Direction) -> Self {
        let n = points.len();
        let segments = match direction {
            Direction::Forward => Either::Left(0..n.saturating_sub(1)),
            Direction::Backward => Either::Right((1..n.max(1)).rev()),
        };

        Self {
            points,
            direction,
            steps: sampling.steps_per_segment(),
            segments,
            current: None,
            j: 0,
        }
    }
}

impl Iterator for Samples<'_> {
    type Item = Result<Point, PolarError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(controls) = self.current {
                if self.j <= self.steps {
                    let t = self.j as f64 / self.steps as f64;
                    self.j += 1;
                    return Some(bezier::eval(controls, t));
                }
            }

            // Current segment exhausted; move to the adjacent pair
            let i = self.segments.next()?;
            self.current = Some(segment(self.points, i, self.direction));
            self.j = 0;
        }
    }
}

/// Walk the curve and return the first sample for which `predicate` is true.
///
/// Returns `Ok(None)` if the curve is exhausted without the predicate firing;
/// callers decide what that means for their query.
///
/// # Errors
/// * If a sample can not be evaluated
pub fn walk<F>(
    points: &[ControlPoint],
    sampling: Sampling,
    direction: Direction,
    mut predicate: F,
) -> Result<Option<Point>, PolarError>
where
    F: FnMut(&Point) -> bool,
{
    for sample in Samples::new(points, sampling, direction) {
        let p = sample?;
        if predicate(&p) {
            return Ok(Some(p));
        }
    }

    tracing::trace!(
        segments = points.len().saturating_sub(1),
        ?direction,
        "curve exhausted without a match"
    );
    Ok(None)
}

#[cfg(test)]
mod test {
    use super::*;

    /// Three control points on a straight line, with handles a third of
    /// the way along each segment so that speed is linear in `t`.
    fn line() -> [ControlPoint; 3] {
        let cp = |speed: f64, handle: f64| {
            ControlPoint::new(
                Point::new(speed, -speed / 100.0),
                Point::new(speed - handle, -(speed - handle) / 100.0),
                Point::new(speed + handle, -(speed + handle) / 100.0),
            )
        };
        [cp(60.0, 10.0), cp(90.0, 10.0), cp(120.0, 10.0)]
    }

    #[test]
    fn test_sample_count_and_order() {
        let points = line();
        let sampling = Sampling::new(10).unwrap();

        let forward: Vec<Point> = Samples::new(&points, sampling, Direction::Forward)
            .map(|p| p.unwrap())
            .collect();
        assert_eq!(forward.len(), 2 * 11);
        assert_eq!(forward[0], points[0].anchor);
        assert_eq!(forward[10], points[1].anchor);
        assert_eq!(forward[11], points[1].anchor);
        assert_eq!(forward[21], points[2].anchor);
        assert!(forward.windows(2).all(|w| w[1].speed >= w[0].speed));
        assert!((forward[1].speed - 63.0).abs() < 1e-12);

        let backward: Vec<Point> = Samples::new(&points, sampling, Direction::Backward)
            .map(|p| p.unwrap())
            .collect();
        assert_eq!(backward.len(), forward.len());
        assert_eq!(backward[0], points[2].anchor);
        assert_eq!(backward[21], points[0].anchor);
        assert!(backward.windows(2).all(|w| w[1].speed <= w[0].speed));
    }

    #[test]
    fn test_walk_stops_at_first_match() {
        let points = line();
        let mut visited = 0;
        let p = walk(&points, Sampling::default(), Direction::Forward, |p| {
            visited += 1;
            p.speed >= 75.0
        })
        .unwrap()
        .unwrap();

        assert!(p.speed >= 75.0 && p.speed < 75.0 + 0.031);
        // 75 km/h is half way through the first 30 km/h segment
        assert_eq!(visited, 501);

        let p = walk(&points, Sampling::default(), Direction::Backward, |p| {
            p.speed <= 75.0
        })
        .unwrap()
        .unwrap();
        assert!(p.speed <= 75.0 && p.speed > 75.0 - 0.031);
    }

    #[test]
    fn test_walk_exhausted() {
        let points = line();
        let found = walk(&points, Sampling::default(), Direction::Forward, |p| {
            p.speed > 120.0
        })
        .unwrap();
        assert!(found.is_none());

        // Degenerate curves have no segments to walk
        let found = walk(&points[..1], Sampling::default(), Direction::Backward, |_| true).unwrap();
        assert!(found.is_none());
        let found = walk(&[], Sampling::default(), Direction::Forward, |_| true).unwrap();
        assert!(found.is_none());
    }

    #[test]
    fn test_sampling_validation() {
        assert!(matches!(Sampling::new(0), Err(PolarError::Invalid(_))));
        assert!(Sampling::try_from(0).is_err());
        assert_eq!(Sampling::default().steps_per_segment(), 1000);
        assert_eq!(Sampling::new(7).unwrap().steps_per_segment(), 7);
        assert_eq!(usize::from(Sampling::try_from(7).unwrap()), 7);
    }
}
