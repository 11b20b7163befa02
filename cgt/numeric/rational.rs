//! Rational number extended with both infinities, used as thermograph coordinates.

use crate::{
    numeric::dyadic_rational::DyadicRational,
    parsing::{Parser, impl_from_str_via_parser, lexeme, try_option},
};
use auto_ops::impl_op_ex;
use num_rational::Rational64;
use std::{
    cmp::Ordering,
    fmt::Display,
    ops::{Add, Div, Mul, Sub},
};

/// Rational number or one of the two infinities.
///
/// Thermograph walls start at `-∞`/`∞` before any option is taken into account, so the
/// infinities take part in comparisons and absorb finite values in sums. Indeterminate forms
/// (`∞ - ∞`, `0 * ∞`, `∞ / x`) never arise from walls of short games and panic.
#[derive(Debug, Hash, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Rational {
    /// Smaller than every other value
    NegativeInfinity,

    /// A finite number
    Value(Rational64),

    /// Greater than every other value
    PositiveInfinity,
}

impl Rational {
    /// Create a new finite rational
    ///
    /// # Panics
    /// - `denominator` is zero
    #[inline]
    pub fn new(numerator: i64, denominator: i64) -> Self {
        Self::Value(Rational64::new(numerator, denominator))
    }

    /// Check if value is one of the infinities
    #[inline]
    pub const fn is_infinite(&self) -> bool {
        !matches!(self, Self::Value(_))
    }

    /// Finite value, if any
    #[inline]
    pub const fn finite(&self) -> Option<Rational64> {
        match self {
            Self::Value(value) => Some(*value),
            Self::NegativeInfinity | Self::PositiveInfinity => None,
        }
    }

    /// Sign of the value, infinities included
    fn signum(&self) -> Ordering {
        match self {
            Self::NegativeInfinity => Ordering::Less,
            Self::Value(value) => value.cmp(&Rational64::from(0)),
            Self::PositiveInfinity => Ordering::Greater,
        }
    }

    /// Infinity of the given sign
    fn infinity(sign: Ordering) -> Self {
        match sign {
            Ordering::Less => Self::NegativeInfinity,
            Ordering::Greater => Self::PositiveInfinity,
            Ordering::Equal => panic!("indeterminate product of zero and infinity"),
        }
    }

    /// Parse `a/b`, `a`, `∞` or `-∞`
    fn parse(p: Parser<'_>) -> Option<(Parser<'_>, Self)> {
        let p = p.trim_whitespace();
        for (literal, infinity) in [("∞", Self::PositiveInfinity), ("-∞", Self::NegativeInfinity)] {
            if let Some(p) = p.parse_literal(literal) {
                return Some((p.trim_whitespace(), infinity));
            }
        }

        let (p, numerator) = try_option!(lexeme!(p, Parser::parse_i64));
        let Some(p) = p.parse_ascii_char('/') else {
            return Some((p, Self::from(numerator)));
        };
        let (p, denominator) = try_option!(lexeme!(p, Parser::parse_i64));
        (denominator != 0).then(|| (p, Self::new(numerator, denominator)))
    }
}

impl_from_str_via_parser!(Rational);

impl From<Rational64> for Rational {
    fn from(value: Rational64) -> Self {
        Self::Value(value)
    }
}

impl From<i64> for Rational {
    fn from(value: i64) -> Self {
        Self::Value(Rational64::from_integer(value))
    }
}

impl From<DyadicRational> for Rational {
    fn from(value: DyadicRational) -> Self {
        value.to_rational()
    }
}

impl_op_ex!(+|lhs: &Rational, rhs: &Rational| -> Rational {
    match (lhs.finite(), rhs.finite()) {
        (Some(lhs), Some(rhs)) => Rational::Value(lhs + rhs),
        (Some(_), None) => *rhs,
        (None, Some(_)) => *lhs,
        (None, None) if lhs == rhs => *lhs,
        (None, None) => panic!("indeterminate sum of opposite infinities"),
    }
});

impl_op_ex!(+=|lhs: &mut Rational, rhs: &Rational| { *lhs = lhs.add(rhs) });

impl_op_ex!(-|lhs: &Rational, rhs: &Rational| -> Rational { lhs + (-rhs) });

impl_op_ex!(-=|lhs: &mut Rational, rhs: &Rational| { *lhs = lhs.sub(rhs) });

impl_op_ex!(*|lhs: &Rational, rhs: &Rational| -> Rational {
    match (lhs.finite(), rhs.finite()) {
        (Some(lhs), Some(rhs)) => Rational::Value(lhs * rhs),
        _ => {
            let sign = match (lhs.signum(), rhs.signum()) {
                (Ordering::Equal, _) | (_, Ordering::Equal) => Ordering::Equal,
                (lhs, rhs) if lhs == rhs => Ordering::Greater,
                _ => Ordering::Less,
            };
            Rational::infinity(sign)
        }
    }
});

impl_op_ex!(*=|lhs: &mut Rational, rhs: &Rational| { *lhs = lhs.mul(rhs) });

impl_op_ex!(/|lhs: &Rational, rhs: &Rational| -> Rational {
    match (lhs.finite(), rhs.finite()) {
        (Some(lhs), Some(rhs)) => Rational::Value(lhs / rhs),
        (Some(_), None) => Rational::from(0),
        (None, _) => panic!("division of an infinity"),
    }
});

impl_op_ex!(/=|lhs: &mut Rational, rhs: &Rational| { *lhs = lhs.div(rhs) });

impl_op_ex!(-|lhs: &Rational| -> Rational {
    match lhs {
        Rational::NegativeInfinity => Rational::PositiveInfinity,
        Rational::Value(value) => Rational::Value(-value),
        Rational::PositiveInfinity => Rational::NegativeInfinity,
    }
});

impl Display for Rational {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NegativeInfinity => write!(f, "-∞"),
            Self::Value(value) => write!(f, "{}", value),
            Self::PositiveInfinity => write!(f, "∞"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn parses_and_displays() {
        for input in ["3/16", "42", "-1/2", "2/3", "∞", "-∞"] {
            let number = Rational::from_str(input).unwrap();
            assert_eq!(number.to_string(), input);
        }
        assert_eq!(Rational::from_str("6/8"), Ok(Rational::new(3, 4)));
        assert!(Rational::from_str("1/0").is_err());
    }

    #[test]
    fn infinities_absorb_values() {
        assert_eq!(
            Rational::PositiveInfinity + Rational::from(3),
            Rational::PositiveInfinity
        );
        assert_eq!(
            Rational::from(-2) * Rational::PositiveInfinity,
            Rational::NegativeInfinity
        );
        assert_eq!(
            Rational::NegativeInfinity * Rational::NegativeInfinity,
            Rational::PositiveInfinity
        );
        assert_eq!(Rational::from(5) / Rational::NegativeInfinity, Rational::from(0));
        assert!(Rational::NegativeInfinity < Rational::new(-1000, 3));
        assert_eq!(Rational::PositiveInfinity.finite(), None);
    }

    #[test]
    #[should_panic]
    fn opposite_infinities_do_not_add() {
        let _ = Rational::PositiveInfinity + Rational::NegativeInfinity;
    }
}
