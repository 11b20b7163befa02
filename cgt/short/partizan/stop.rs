//! Stopping positions of a game

use crate::{numeric::dyadic_rational::DyadicRational, short::partizan::Player};
use std::fmt::Display;

/// Player to move when the stopping position is reached
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StopType {
    /// Left is to move at the stop
    Left,

    /// Right is to move at the stop
    Right,

    /// Optimal lines reach the same value with either player to move
    Either,
}

impl From<Player> for StopType {
    fn from(player: Player) -> Self {
        match player {
            Player::Left => StopType::Left,
            Player::Right => StopType::Right,
        }
    }
}

/// Value of the number reached under optimal alternating play, together with the player to move
/// once the play stops.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Stop {
    value: DyadicRational,
    kind: StopType,
}

impl Stop {
    /// Construct new stop
    pub const fn new(value: DyadicRational, kind: StopType) -> Self {
        Self { value, kind }
    }

    /// Stopping value
    pub const fn value(&self) -> DyadicRational {
        self.value
    }

    /// Player to move at the stop
    pub const fn kind(&self) -> StopType {
        self.kind
    }

    /// Pick the better stop for `player`: the larger value for Left and the smaller for Right.
    /// Equal values reached with different players to move merge into [`StopType::Either`].
    #[must_use]
    pub fn better_for(self, player: Player, other: Self) -> Self {
        let other_is_better = match player {
            Player::Left => other.value > self.value,
            Player::Right => other.value < self.value,
        };
        if other_is_better {
            other
        } else if other.value == self.value && other.kind != self.kind {
            Self::new(self.value, StopType::Either)
        } else {
            self
        }
    }
}

impl Display for Stop {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let kind = match self.kind {
            StopType::Left => 'L',
            StopType::Right => 'R',
            StopType::Either => 'E',
        };
        write!(f, "{}({})", kind, self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ties_merge_into_either() {
        let left = Stop::new(DyadicRational::ONE, StopType::Left);
        let right = Stop::new(DyadicRational::ONE, StopType::Right);
        assert_eq!(
            left.better_for(Player::Left, right),
            Stop::new(DyadicRational::ONE, StopType::Either)
        );
        assert_eq!(left.better_for(Player::Left, left), left);
    }

    #[test]
    fn players_prefer_opposite_extremes() {
        let low = Stop::new(DyadicRational::ZERO, StopType::Left);
        let high = Stop::new(DyadicRational::new(1, 1), StopType::Right);
        assert_eq!(low.better_for(Player::Left, high), high);
        assert_eq!(low.better_for(Player::Right, high), low);
        assert_eq!(high.to_string(), "R(1/2)");
    }
}
