//! A continuous piecewise linear trajectory with rational slopes, used as the walls and
//! scaffolds of a [thermograph](crate::short::partizan::thermograph).

use crate::{display, numeric::rational::Rational};
use itertools::Itertools;
use std::{cmp::Ordering, fmt::Display};

/// A continuous piecewise linear function of temperature, defined for all temperatures on the
/// interval `-1 ≤ t < ∞`.
///
/// Segment `i` lies above critical point `i` and below critical point `i - 1`; the last segment
/// reaches down to `-1` and the first one extends to infinity (the mast).
#[derive(Debug, Hash, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Trajectory {
    /// Temperatures where the slope changes, strictly decreasing and strictly above `-1`
    pub(crate) critical_points: Vec<Rational>,
    pub(crate) slopes: Vec<Rational>,
    pub(crate) x_intercepts: Vec<Rational>,
}

/// One linear piece `value(t) = slope * t + x_intercept`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Segment {
    pub(crate) slope: Rational,
    pub(crate) x_intercept: Rational,
}

impl Segment {
    pub(crate) fn vertical(value: Rational) -> Self {
        Self {
            slope: Rational::from(0),
            x_intercept: value,
        }
    }

    pub(crate) fn value_at(&self, t: Rational) -> Rational {
        t * self.slope + self.x_intercept
    }

    /// Temperature where two segments meet
    pub(crate) fn intersection(&self, other: &Self) -> Rational {
        (other.x_intercept - self.x_intercept) / (self.slope - other.slope)
    }

    /// Temperature where the segment reaches `value`
    pub(crate) fn reaching(&self, value: Rational) -> Rational {
        (value - self.x_intercept) / self.slope
    }
}

impl Trajectory {
    /// Constructs a new `Trajectory` with constant value `r`
    pub fn new_constant(r: Rational) -> Self {
        Self {
            critical_points: vec![],
            slopes: vec![Rational::from(0)],
            x_intercepts: vec![r],
        }
    }

    /// Create a new trajectory from its value at the highest critical point, the critical points
    /// and the slopes of every segment. Returns [None] if input violates the invariants.
    pub fn new(
        top_value: Rational,
        critical_points: Vec<Rational>,
        slopes: Vec<Rational>,
    ) -> Option<Self> {
        if slopes.len() != critical_points.len() + 1 {
            return None;
        }
        if critical_points
            .iter()
            .tuple_windows()
            .any(|(higher, lower)| higher <= lower)
        {
            return None;
        }
        let minus_one = Rational::from(-1);
        if critical_points.iter().any(|c| c <= &minus_one) {
            return None;
        }

        let mut x_intercepts = Vec::with_capacity(slopes.len());
        let mut value = top_value;
        for (i, critical_point) in critical_points.iter().enumerate() {
            if i > 0 {
                value -= (critical_points[i - 1] - critical_point) * slopes[i];
            }
            x_intercepts.push(value - *critical_point * slopes[i]);
        }
        let last_slope = slopes[slopes.len() - 1];
        x_intercepts.push(match critical_points.last() {
            Some(lowest) => value - *lowest * last_slope,
            None => top_value,
        });

        Some(Self {
            critical_points,
            slopes,
            x_intercepts,
        })
    }

    /// Temperatures where the slope changes, from the highest to the lowest
    pub fn critical_points(&self) -> &[Rational] {
        &self.critical_points
    }

    /// Slope of every segment, from the mast down
    pub fn slopes(&self) -> &[Rational] {
        &self.slopes
    }

    /// Intercept of the mast with the x-axis
    pub fn mast_x_intercept(&self) -> Rational {
        self.x_intercepts[0]
    }

    /// Critical points where a vertical segment above turns into a slanted one below
    pub fn vertical_breakpoints(&self) -> impl Iterator<Item = Rational> + '_ {
        self.critical_points
            .iter()
            .zip(&self.slopes)
            .filter(|(_, slope)| **slope == Rational::from(0))
            .map(|(critical_point, _)| *critical_point)
    }

    pub(crate) fn segment(&self, index: usize) -> Segment {
        Segment {
            slope: self.slopes[index],
            x_intercept: self.x_intercepts[index],
        }
    }

    /// Tilts this trajectory by `r`.
    /// If this trajectory has value `a(x)` at `x`, then the tilted trajectory has value `a(x) + rx`
    pub fn tilt(&mut self, r: Rational) {
        if self.is_infinite() {
            return;
        }
        for slope in &mut self.slopes {
            *slope += r;
        }
    }

    /// Gets the value of this trajectory at temperature `t`.
    pub fn value_at(&self, t: Rational) -> Rational {
        let i = self
            .critical_points
            .iter()
            .take_while(|critical_point| t < **critical_point)
            .count();
        if t.is_infinite() && self.slopes[i] == Rational::from(0) {
            self.x_intercepts[i]
        } else {
            self.segment(i).value_at(t)
        }
    }

    /// # Panics
    /// - When `t < -1`
    pub(crate) fn compare_to_at(&self, other: &Self, t: Rational) -> Ordering {
        assert!(t >= Rational::from(-1), "t < -1");

        if t == Rational::PositiveInfinity {
            self.slopes[0]
                .cmp(&other.slopes[0])
                .then_with(|| self.x_intercepts[0].cmp(&other.x_intercepts[0]))
        } else {
            self.value_at(t).cmp(&other.value_at(t))
        }
    }

    #[inline]
    fn is_infinite(&self) -> bool {
        self.x_intercepts[0].is_infinite()
    }

    /// Pointwise maximum
    #[inline]
    #[must_use]
    pub fn max(&self, other: &Self) -> Self {
        self.envelope::<true>(other)
    }

    /// Pointwise minimum
    #[inline]
    #[must_use]
    pub fn min(&self, other: &Self) -> Self {
        self.envelope::<false>(other)
    }

    /// Sweep both trajectories from the mast down to `-1`, following whichever is dominant
    /// (greater for `MAX`, smaller otherwise) and emitting a critical point wherever the dominant
    /// trajectory bends or the two cross.
    fn envelope<const MAX: bool>(&self, other: &Self) -> Self {
        // `Less` means `self` dominates, `Greater` means `other` dominates
        let dominance = |ordering: Ordering| if MAX { ordering.reverse() } else { ordering };
        let minus_one = Rational::from(-1);

        let mut self_next = 0;
        let mut other_next = 0;
        let mut result = Self {
            critical_points: Vec::new(),
            slopes: Vec::new(),
            x_intercepts: Vec::new(),
        };
        let push = |result: &mut Self, critical_point: Rational, segment: Segment| {
            result.critical_points.push(critical_point);
            result.slopes.push(segment.slope);
            result.x_intercepts.push(segment.x_intercept);
        };

        // Infinite masts are compared by value only, finite ones by slope first
        let mut previous = if self.is_infinite() || other.is_infinite() {
            Ordering::Equal
        } else {
            dominance(self.slopes[0].cmp(&other.slopes[0]))
        };
        if previous == Ordering::Equal {
            previous = dominance(self.x_intercepts[0].cmp(&other.x_intercepts[0]));
        }

        loop {
            // `Less`: the point belongs to `self`, `Greater`: to `other`, `Equal`: to both
            let (owner, current) = match (
                self.critical_points.get(self_next),
                other.critical_points.get(other_next),
            ) {
                (None, None) => (Ordering::Equal, minus_one),
                (None, Some(theirs)) => (Ordering::Greater, *theirs),
                (Some(ours), None) => (Ordering::Less, *ours),
                (Some(ours), Some(theirs)) => {
                    let owner = theirs.cmp(ours);
                    (owner, if owner == Ordering::Greater { *theirs } else { *ours })
                }
            };

            let ours = self.segment(self_next);
            let theirs = other.segment(other_next);
            let current_dominance = dominance(self.value_at(current).cmp(&other.value_at(current)));

            if current_dominance != Ordering::Equal
                && previous != Ordering::Equal
                && current_dominance != previous
            {
                let crossover = ours.intersection(&theirs);
                let winner = if previous == Ordering::Less { ours } else { theirs };
                push(&mut result, crossover, winner);
            }

            if current == minus_one {
                break;
            }

            match current_dominance {
                Ordering::Less if owner != Ordering::Greater => push(&mut result, current, ours),
                Ordering::Greater if owner != Ordering::Less => {
                    push(&mut result, current, theirs);
                }
                Ordering::Equal => {
                    // Both meet here: emit a point only if the dominant slope above differs
                    // from the dominant slope below
                    let above = if dominance(ours.slope.cmp(&theirs.slope)) == Ordering::Less {
                        ours
                    } else {
                        theirs
                    };
                    let ours_below = if owner == Ordering::Greater {
                        ours.slope
                    } else {
                        self.slopes[self_next + 1]
                    };
                    let theirs_below = if owner == Ordering::Less {
                        theirs.slope
                    } else {
                        other.slopes[other_next + 1]
                    };
                    let slope_below = if MAX {
                        ours_below.min(theirs_below)
                    } else {
                        ours_below.max(theirs_below)
                    };
                    if above.slope != slope_below {
                        push(&mut result, current, above);
                    }
                }
                _ => {}
            }

            if owner != Ordering::Greater {
                self_next += 1;
            }
            if owner != Ordering::Less {
                other_next += 1;
            }
            previous = current_dominance;
        }

        // Tail follows whichever dominates at -1, or just above it on a tie
        let last_ours = self.segment(self.slopes.len() - 1);
        let last_theirs = other.segment(other.slopes.len() - 1);
        let tail = match dominance(self.value_at(minus_one).cmp(&other.value_at(minus_one))) {
            Ordering::Equal => dominance(last_ours.slope.cmp(&last_theirs.slope)),
            ordering => ordering,
        };
        let tail = if tail == Ordering::Less {
            last_ours
        } else {
            last_theirs
        };
        result.slopes.push(tail.slope);
        result.x_intercepts.push(tail.x_intercept);
        result
    }
}

/// Trajectory assembled from the bottom up, one critical point at a time
#[derive(Debug, Default)]
pub(crate) struct TrajectoryBuilder {
    critical_points: Vec<Rational>,
    slopes: Vec<Rational>,
    x_intercepts: Vec<Rational>,
}

impl TrajectoryBuilder {
    /// Continue the trajectory with `segment` up to `critical_point`
    pub(crate) fn extend(&mut self, critical_point: Rational, segment: Segment) {
        if critical_point == Rational::from(-1) || self.critical_points.last() == Some(&critical_point)
        {
            return;
        }
        if self.slopes.last() == Some(&segment.slope) {
            // Connected segment with the same slope, so only the critical point moves up
            debug_assert_eq!(self.x_intercepts.last(), Some(&segment.x_intercept));
            if let Some(last) = self.critical_points.last_mut() {
                *last = critical_point;
            }
        } else {
            self.critical_points.push(critical_point);
            self.slopes.push(segment.slope);
            self.x_intercepts.push(segment.x_intercept);
        }
    }

    /// Drop the topmost (infinite) critical point and flip into top-down order
    pub(crate) fn finish(mut self) -> Trajectory {
        self.critical_points.pop();
        self.critical_points.reverse();
        self.slopes.reverse();
        self.x_intercepts.reverse();
        Trajectory {
            critical_points: self.critical_points,
            slopes: self.slopes,
            x_intercepts: self.x_intercepts,
        }
    }
}

impl Display for Trajectory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        display::call(f, "Trajectory", |f| {
            write!(f, "{}, ", self.mast_x_intercept())?;
            display::list(f, &self.critical_points)?;
            write!(f, ", ")?;
            display::list(f, &self.slopes)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn r(n: i64) -> Rational {
        Rational::from(n)
    }

    #[test]
    fn constructs_from_slopes() {
        // Vertical at 1 down to t = 2, then tilting left to the base
        let trajectory = Trajectory::new(r(1), vec![r(2)], vec![r(0), r(-1)]).unwrap();
        assert_eq!(trajectory.value_at(Rational::PositiveInfinity), r(1));
        assert_eq!(trajectory.value_at(r(2)), r(1));
        assert_eq!(trajectory.value_at(r(0)), r(3));
        assert_eq!(trajectory.vertical_breakpoints().collect::<Vec<_>>(), vec![r(2)]);
    }

    #[test]
    fn rejects_invalid_critical_points() {
        assert!(Trajectory::new(r(0), vec![r(1), r(2)], vec![r(0), r(1), r(0)]).is_none());
        assert!(Trajectory::new(r(0), vec![r(-1)], vec![r(0), r(1)]).is_none());
        assert!(Trajectory::new(r(0), vec![], vec![r(0), r(1)]).is_none());
    }

    #[test]
    fn max_of_crossing_lines() {
        let mut rising = Trajectory::new_constant(r(0));
        rising.tilt(r(1));
        let flat = Trajectory::new_constant(r(1));
        let max = rising.max(&flat);
        assert_eq!(max.critical_points(), &[r(1)]);
        assert_eq!(max.value_at(r(3)), r(3));
        assert_eq!(max.value_at(r(0)), r(1));

        let min = rising.min(&flat);
        assert_eq!(min.value_at(r(3)), r(1));
        assert_eq!(min.value_at(r(-1)), r(-1));
    }

    #[test]
    fn displays_mast_and_slopes() {
        assert_eq!(
            Trajectory::new_constant(r(5)).to_string(),
            "Trajectory(5, [], [0])"
        );
    }
}
