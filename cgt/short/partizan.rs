//! Partizan games, where the two players may have different moves

pub mod canonical_game;
pub mod stop;
pub mod thermograph;
pub mod trajectory;
pub mod universe;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[allow(missing_docs)]
pub enum Player {
    Left,
    Right,
}

impl Player {
    /// Opposite player
    #[inline(always)]
    #[must_use]
    pub const fn opposite(self) -> Player {
        match self {
            Player::Left => Player::Right,
            Player::Right => Player::Left,
        }
    }
}

#[cfg(any(test, feature = "quickcheck"))]
impl quickcheck::Arbitrary for Player {
    fn arbitrary(g: &mut quickcheck::Gen) -> Self {
        *g.choose(&[Player::Left, Player::Right])
            .expect("unreachable: choice from a non-empty slice")
    }
}
