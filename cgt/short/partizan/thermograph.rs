//! Thermograph constructed from scaffolds
//!
//! Walls are built by sweeping the tilted scaffolds from the base at `t = -1` upwards, keeping
//! track of whether the scaffolds currently form a hill (left scaffold to the left of the right
//! one) or a cave, where the thermograph runs vertically.

use crate::{
    numeric::{dyadic_rational::DyadicRational, rational::Rational},
    short::partizan::trajectory::{Segment, Trajectory, TrajectoryBuilder},
};
use std::{cmp::Ordering, fmt::Display};

/// See [thermograph](self) header
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Thermograph {
    /// Left wall of the thermograph
    pub left_wall: Trajectory,

    /// Right wall of the thermograph
    pub right_wall: Trajectory,
}

/// Relation between the scaffolds just below the current critical point
#[derive(Debug, Clone, Copy)]
enum Region {
    /// Left scaffold is at or to the left of the right scaffold
    Hill,

    /// Scaffolds are apart, walls run vertically at the given value
    Cave(Rational),
}

/// Scaffold walked upwards from the base, one critical point at a time
struct Ascent<'a> {
    scaffold: &'a Trajectory,
    remaining: usize,
}

impl<'a> Ascent<'a> {
    fn new(scaffold: &'a Trajectory) -> Self {
        Self {
            scaffold,
            remaining: scaffold.critical_points.len(),
        }
    }

    fn next_point(&self) -> Option<Rational> {
        self.remaining
            .checked_sub(1)
            .map(|i| self.scaffold.critical_points[i])
    }

    /// Segment running up to the next critical point
    fn segment(&self) -> Segment {
        self.scaffold.segment(self.remaining)
    }

    fn advance(&mut self) {
        self.remaining = self.remaining.saturating_sub(1);
    }
}

impl Thermograph {
    /// Construct a thermograph with only a mast at given value
    pub fn with_mast(mast: Rational) -> Self {
        let t = Trajectory::new_constant(mast);
        Self {
            left_wall: t.clone(),
            right_wall: t,
        }
    }

    /// Construct thermograph from the right walls of left options and the left walls of right
    /// options
    pub fn with_trajectories<LeftIter, RightIter>(left_walls: LeftIter, right_walls: RightIter) -> Self
    where
        LeftIter: Iterator<Item = Trajectory>,
        RightIter: Iterator<Item = Trajectory>,
    {
        let mut left_scaffold = left_walls.fold(
            Trajectory::new_constant(Rational::NegativeInfinity),
            |scaffold, wall| scaffold.max(&wall),
        );
        left_scaffold.tilt(Rational::from(-1));

        let mut right_scaffold = right_walls.fold(
            Trajectory::new_constant(Rational::PositiveInfinity),
            |scaffold, wall| scaffold.min(&wall),
        );
        right_scaffold.tilt(Rational::from(1));

        Self::thermographic_intersection(&left_scaffold, &right_scaffold)
    }

    /// Temperature at which the walls merge into the mast, zero when neither wall bends
    #[allow(clippy::missing_panics_doc)]
    pub fn temperature(&self) -> DyadicRational {
        let highest = |wall: &Trajectory| wall.critical_points.first().copied();
        let temperature = match (highest(&self.left_wall), highest(&self.right_wall)) {
            (None, None) => return DyadicRational::ZERO,
            (Some(t), None) | (None, Some(t)) => t,
            (Some(left), Some(right)) => left.max(right),
        };
        DyadicRational::try_from(temperature)
            .expect("unreachable: thermograph of a short game has dyadic temperature")
    }

    /// Value of the mast
    pub fn mast(&self) -> Rational {
        self.left_wall.value_at(Rational::PositiveInfinity)
    }

    /// Value of the left wall at temperature `t`
    pub fn left_value_at(&self, t: Rational) -> Rational {
        self.left_wall.value_at(t)
    }

    /// Value of the right wall at temperature `t`
    pub fn right_value_at(&self, t: Rational) -> Rational {
        self.right_wall.value_at(t)
    }

    /// Calculate a thermograph given left and right scaffold. Note that scaffolds should be
    /// [tilted](Trajectory::tilt) before.
    pub fn thermographic_intersection(left_scaffold: &Trajectory, right_scaffold: &Trajectory) -> Self {
        if *left_scaffold == Trajectory::new_constant(Rational::PositiveInfinity)
            || *right_scaffold == Trajectory::new_constant(Rational::NegativeInfinity)
        {
            return Self {
                left_wall: left_scaffold.clone(),
                right_wall: right_scaffold.clone(),
            };
        }

        let minus_one = Rational::from(-1);
        let zero = Rational::from(0);

        let mut left_wall = TrajectoryBuilder::default();
        let mut right_wall = TrajectoryBuilder::default();
        let mut left = Ascent::new(left_scaffold);
        let mut right = Ascent::new(right_scaffold);

        let left_at_base = left_scaffold.value_at(minus_one);
        let right_at_base = right_scaffold.value_at(minus_one);
        let mut region = if left_at_base < right_at_base
            || (left_at_base == right_at_base
                && left_scaffold.slopes.last() < right_scaffold.slopes.last())
        {
            // The cave starts at 0 if 0 lies between the scaffolds, otherwise at the scaffold
            // closer to 0
            Region::Cave(if left_at_base > zero {
                left_at_base
            } else if right_at_base < zero {
                right_at_base
            } else {
                zero
            })
        } else {
            Region::Hill
        };

        loop {
            // `Less`: the point belongs to the left scaffold, `Greater`: to the right one
            let (owner, current) = match (left.next_point(), right.next_point()) {
                (None, None) => (Ordering::Equal, Rational::PositiveInfinity),
                (None, Some(r)) => (Ordering::Greater, r),
                (Some(l), None) => (Ordering::Less, l),
                (Some(l), Some(r)) => {
                    let owner = l.cmp(&r);
                    (owner, if owner == Ordering::Greater { r } else { l })
                }
            };
            let left_segment = left.segment();
            let right_segment = right.segment();
            let left_at_current = left_scaffold.value_at(current);
            let right_at_current = right_scaffold.value_at(current);
            let now_in_hill = left_scaffold.compare_to_at(right_scaffold, current) != Ordering::Less;

            let previous_region = region;
            match previous_region {
                Region::Hill if !now_in_hill => {
                    // Hill ends where the scaffolds cross, then a cave mast rises
                    let crossover = left_segment.intersection(&right_segment);
                    debug_assert_eq!(
                        left_scaffold.value_at(crossover),
                        right_scaffold.value_at(crossover),
                        "Invalid crossover point"
                    );
                    left_wall.extend(crossover, left_segment);
                    right_wall.extend(crossover, right_segment);

                    let (cave_mast, cave_value) =
                        if left_at_current > left_scaffold.value_at(crossover) {
                            (left_segment, left_at_current)
                        } else if right_at_current < right_scaffold.value_at(crossover) {
                            (right_segment, right_at_current)
                        } else {
                            let value = left_scaffold.value_at(crossover);
                            (Segment::vertical(value), value)
                        };
                    region = Region::Cave(cave_value);
                    left_wall.extend(current, cave_mast);
                    right_wall.extend(current, cave_mast);
                }
                Region::Hill => {}
                Region::Cave(cave_value) => {
                    let left_crossing = (left_at_current > cave_value)
                        .then(|| left_segment.reaching(cave_value));
                    let right_crossing = (right_at_current < cave_value)
                        .then(|| right_segment.reaching(cave_value));

                    match (left_crossing, right_crossing) {
                        (Some(l), r) if r.is_none_or(|r| l <= r) => {
                            // Left scaffold leaves the cave first
                            left_wall.extend(l, Segment::vertical(cave_value));
                            right_wall.extend(l, Segment::vertical(cave_value));
                            left_wall.extend(current, left_segment);
                            let right_end = if now_in_hill {
                                left_segment.intersection(&right_segment)
                            } else {
                                region = Region::Cave(left_at_current);
                                current
                            };
                            right_wall.extend(right_end, left_segment);
                        }
                        (_, Some(r)) => {
                            // Right scaffold leaves the cave first
                            left_wall.extend(r, Segment::vertical(cave_value));
                            right_wall.extend(r, Segment::vertical(cave_value));
                            right_wall.extend(current, right_segment);
                            let left_end = if now_in_hill {
                                left_segment.intersection(&right_segment)
                            } else {
                                region = Region::Cave(right_at_current);
                                current
                            };
                            left_wall.extend(left_end, right_segment);
                        }
                        _ => {
                            left_wall.extend(current, Segment::vertical(cave_value));
                            right_wall.extend(current, Segment::vertical(cave_value));
                        }
                    }
                }
            }

            if now_in_hill {
                if owner != Ordering::Greater {
                    left_wall.extend(current, left_segment);
                }
                if owner != Ordering::Less {
                    right_wall.extend(current, right_segment);
                }
                region = Region::Hill;
            }

            if current == Rational::PositiveInfinity {
                break;
            }
            if owner != Ordering::Greater {
                left.advance();
            }
            if owner != Ordering::Less {
                right.advance();
            }
        }

        Self {
            left_wall: left_wall.finish(),
            right_wall: right_wall.finish(),
        }
    }
}

impl Display for Thermograph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Thermograph({}, {})", self.left_wall, self.right_wall)
    }
}
