//! Number-up-star special case

use crate::{
    numeric::{dyadic_rational::DyadicRational, nimber::Nimber},
    parsing::{Parser, impl_from_str_via_parser, lexeme},
    short::partizan::canonical_game::CanonicalGame,
};
use auto_ops::impl_op_ex;
use std::fmt::Display;

/// A game that is a sum of a number, a multiple of up, and a nimber.
#[derive(Debug, Hash, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Nus {
    number: DyadicRational,
    up_multiple: i32,
    nimber: Nimber,
}

impl Nus {
    /// Create new number-up-star sum
    #[inline]
    pub const fn new(number: DyadicRational, up_multiple: i32, nimber: Nimber) -> Self {
        Self {
            number,
            up_multiple,
            nimber,
        }
    }

    /// Create new number-up-star game equal to an integer.
    #[inline]
    pub const fn new_integer(integer: i64) -> Self {
        Self::new_number(DyadicRational::new_integer(integer))
    }

    /// Create new number-up-star game equal to a dyadic rational.
    #[inline]
    pub const fn new_number(number: DyadicRational) -> Self {
        Self::new(number, 0, Nimber::ZERO)
    }

    /// Create new number-up-star game equal to a nimber.
    #[inline]
    pub const fn new_nimber(nimber: Nimber) -> Self {
        Self::new(DyadicRational::ZERO, 0, nimber)
    }

    /// Get number part of the NUS sum
    #[inline]
    pub const fn number(self) -> DyadicRational {
        self.number
    }

    /// Get up/down part of the NUS sum. Positive for up, negative for down.
    #[inline]
    pub const fn up_multiple(self) -> i32 {
        self.up_multiple
    }

    /// Get nimber part of the NUS sum
    #[inline]
    pub const fn nimber(self) -> Nimber {
        self.nimber
    }

    /// Check if the game has only number part (i.e. up multiple and nimber are zero).
    #[inline]
    pub const fn is_number(self) -> bool {
        self.up_multiple == 0 && self.nimber.value() == 0
    }

    /// Check if the game has only integer number part
    #[inline]
    pub const fn is_integer(self) -> bool {
        self.is_number() && self.number.is_integer()
    }

    /// Check if the game is a nimber.
    #[inline]
    pub const fn is_nimber(self) -> bool {
        self.number.eq_integer(0) && self.up_multiple == 0
    }

    /// Closed form of `<=` between two number-up-star sums.
    ///
    /// Equal numbers compare by up multiples, with a slack of one when the nimbers differ by
    /// exactly `*`.
    pub fn leq(self, other: Self) -> bool {
        self == other
            || self.number < other.number
            || (self.number == other.number
                && (self.up_multiple < other.up_multiple - 1
                    || (self.up_multiple < other.up_multiple
                        && (self.nimber + other.nimber).value() != 1)))
    }

    /// Recognize a number-up-star value from canonical options of a game.
    pub(crate) fn detect(left: &[CanonicalGame], right: &[CanonicalGame]) -> Option<Self> {
        let number = |game: &CanonicalGame| game.nus().filter(|nus| nus.is_number()).map(Self::number);

        match (left, right) {
            // {|}
            ([], []) => Some(Self::new_integer(0)),

            // {|n} = n - 1
            ([], [r]) => Some(Self::new_number(number(r)? - DyadicRational::ONE)),

            // {n|} = n + 1
            ([l], []) => Some(Self::new_number(number(l)? + DyadicRational::ONE)),

            ([l], [r]) => {
                let l = l.nus()?;
                let r = r.nus()?;
                if l.is_number() && r.is_number() {
                    if l.number < r.number {
                        // Canonical options of a dyadic are its two closest neighbours
                        Some(Self::new_number(l.number.mean(&r.number)))
                    } else if l.number == r.number {
                        // {n|n} = n*
                        Some(Self::new(l.number, 0, Nimber::STAR))
                    } else {
                        None
                    }
                } else if l.is_number() && l.number == r.number && r.up_multiple >= 0 {
                    // {n|n + G} where G is up-star-ish
                    Some(Self::new(
                        l.number,
                        r.up_multiple + 1,
                        r.nimber + Nimber::STAR,
                    ))
                } else if r.is_number() && l.number == r.number && l.up_multiple <= 0 {
                    Some(Self::new(
                        r.number,
                        l.up_multiple - 1,
                        l.nimber + Nimber::STAR,
                    ))
                } else {
                    None
                }
            }

            // {n, n*|n} = n^*
            ([l0, l1], [r]) => {
                let n = number(l0)?;
                (number(r)? == n && l1.nus()? == Self::new(n, 0, Nimber::STAR))
                    .then_some(Self::new(n, 1, Nimber::STAR))
            }

            // {n|n, n*} = nv*
            ([l], [r0, r1]) => {
                let n = number(l)?;
                (number(r0)? == n && r1.nus()? == Self::new(n, 0, Nimber::STAR))
                    .then_some(Self::new(n, -1, Nimber::STAR))
            }

            // {n, n*, ..., n*(k-1)|n, n*, ..., n*(k-1)} = n*k
            (left, right) if left.len() == right.len() => {
                let n = number(&left[0])?;
                for (i, (l, r)) in left.iter().zip(right).enumerate() {
                    let expected = Self::new(n, 0, Nimber::new(u32::try_from(i).ok()?));
                    if l != r || l.nus()? != expected {
                        return None;
                    }
                }
                Some(Self::new(n, 0, Nimber::new(u32::try_from(left.len()).ok()?)))
            }

            _ => None,
        }
    }

    /// Parse number-up-star sum, e.g. `3/4^2*3`, `v`, `*`, or `-1`
    pub(crate) fn parse(p: Parser<'_>) -> Option<(Parser<'_>, Nus)> {
        // An omitted number means zero, but empty input is not a game
        let (p, number, parsed_number) = match lexeme!(p, DyadicRational::parse) {
            Some((p, number)) => (p, number, true),
            None => (p, DyadicRational::ZERO, false),
        };

        let (p, up_multiple) = match lexeme!(p, Parser::parse_any_ascii_char) {
            Some((p, c)) if c == '^' || c == 'v' => {
                let (p, up_multiple) = match lexeme!(p, Parser::parse_u32) {
                    Some((p, up_multiple)) => (p, i32::try_from(up_multiple).ok()?),
                    None => (p, 1),
                };
                (p, if c == 'v' { -up_multiple } else { up_multiple })
            }
            _ => (p, 0),
        };

        let (p, star_multiple) = match lexeme!(p, Parser::parse_any_ascii_char) {
            Some((p, '*')) => match lexeme!(p, Parser::parse_u32) {
                Some((p, star_multiple)) => (p, star_multiple),
                None => (p, 1),
            },
            _ => (p, 0),
        };

        if !parsed_number && up_multiple == 0 && star_multiple == 0 {
            None
        } else {
            Some((p, Self::new(number, up_multiple, Nimber::new(star_multiple))))
        }
    }
}

impl_from_str_via_parser!(Nus);

impl_op_ex!(+|lhs: &Nus, rhs: &Nus| -> Nus {
    Nus {
        number: lhs.number + rhs.number,
        up_multiple: lhs.up_multiple + rhs.up_multiple,
        nimber: lhs.nimber + rhs.nimber,
    }
});

impl_op_ex!(-|lhs: &Nus| -> Nus {
    Nus {
        number: -lhs.number,
        up_multiple: -lhs.up_multiple,
        nimber: lhs.nimber,
    }
});

impl Display for Nus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.number != DyadicRational::ZERO || self.is_number() {
            write!(f, "{}", self.number)?;
        }

        match self.up_multiple {
            1 => write!(f, "^")?,
            -1 => write!(f, "v")?,
            n if n > 0 => write!(f, "^{}", n)?,
            n if n < 0 => write!(f, "v{}", -n)?,
            _ => {}
        }

        if self.nimber != Nimber::ZERO {
            write!(f, "{}", self.nimber)?;
        }

        Ok(())
    }
}

#[cfg(any(test, feature = "quickcheck"))]
impl quickcheck::Arbitrary for Nus {
    fn arbitrary(g: &mut quickcheck::Gen) -> Self {
        use quickcheck::Arbitrary;

        Self::new(
            DyadicRational::arbitrary(g),
            i32::from(i8::arbitrary(g) % 4),
            Nimber::arbitrary(g),
        )
    }

    fn shrink(&self) -> Box<dyn Iterator<Item = Self>> {
        use quickcheck::Arbitrary;

        let nus = *self;
        Box::new(
            self.number
                .shrink()
                .map(move |number| Self { number, ..nus })
                .chain((self.up_multiple != 0).then_some(Self {
                    up_multiple: 0,
                    ..nus
                }))
                .chain((self.nimber != Nimber::ZERO).then_some(Self {
                    nimber: Nimber::ZERO,
                    ..nus
                })),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn nus(s: &str) -> Nus {
        Nus::from_str(s).unwrap()
    }

    #[test]
    fn parses_and_displays() {
        for input in ["0", "1", "-3/4", "^", "v", "^3", "v2*", "*", "*7", "1/2^*3", "-2v5*2"] {
            assert_eq!(nus(input).to_string(), input);
        }
        assert_eq!(nus("0^").to_string(), "^");
        assert!(Nus::from_str("").is_err());
        assert!(Nus::from_str("1/3").is_err());
    }

    #[test]
    fn closed_form_comparison() {
        assert!(nus("0").leq(nus("^")));
        assert!(!nus("^").leq(nus("0")));
        assert!(!nus("0").leq(nus("*")));
        assert!(!nus("*").leq(nus("^")));
        assert!(nus("*").leq(nus("^2")));
        assert!(!nus("^").leq(nus("^2*")));
        assert!(nus("^").leq(nus("^2*2")));
        assert!(nus("5*3").leq(nus("11/2v7")));
        assert!(nus("^*").leq(nus("^*")));
    }

    #[test]
    fn adds_componentwise() {
        assert_eq!(nus("1/2^*") + nus("1/4v2*3"), nus("3/4v*2"));
        assert_eq!(-nus("1/2^3*2"), nus("-1/2v3*2"));
    }
}
