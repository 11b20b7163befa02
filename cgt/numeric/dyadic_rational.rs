//! Number in form `n/2^m`

use crate::{
    Error,
    numeric::rational::Rational,
    parsing::{Parser, impl_from_str_via_parser, lexeme, try_option},
};
use auto_ops::impl_op_ex;
use std::{
    cmp::Ordering,
    fmt::Display,
    ops::{Add, Sub},
};

/// Finite number in form `n/2^m`, always kept in lowest terms.
///
/// Infinite values are expressed with [`Rational`] and rejected on conversion.
#[derive(Debug, Hash, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DyadicRational {
    numerator: i64,
    denominator_exponent: u32,
}

impl DyadicRational {
    /// Zero
    pub const ZERO: Self = Self::new_integer(0);

    /// One
    pub const ONE: Self = Self::new_integer(1);

    /// Create a new dyadic `numerator/2^denominator_exponent`
    pub fn new(numerator: i64, denominator_exponent: u32) -> Self {
        Self {
            numerator,
            denominator_exponent,
        }
        .normalized()
    }

    /// Create a new integer
    pub const fn new_integer(number: i64) -> Self {
        Self {
            numerator: number,
            denominator_exponent: 0,
        }
    }

    /// Create a new fraction `numerator/denominator`
    ///
    /// # Errors
    /// - Denominator is zero or is not a power of two
    pub fn new_fraction(numerator: i64, denominator: u64) -> Result<Self, Error> {
        if !denominator.is_power_of_two() {
            return Err(Error::NotDyadic {
                numerator,
                denominator,
            });
        }
        Ok(Self::new(numerator, denominator.trailing_zeros()))
    }

    /// Get the numerator (`n` from `n/2^m`)
    pub const fn numerator(&self) -> i64 {
        self.numerator
    }

    /// Get the denominator (`2^m` from `n/2^m`) if it fits in [u128]
    pub const fn denominator(&self) -> Option<u128> {
        if self.denominator_exponent >= u128::BITS {
            None
        } else {
            Some(1 << self.denominator_exponent)
        }
    }

    /// Get denominator exponent (`m` from `n/2^m`)
    pub const fn denominator_exponent(&self) -> u32 {
        self.denominator_exponent
    }

    fn normalized(mut self) -> Self {
        if self.numerator == 0 {
            self.denominator_exponent = 0;
        }
        while self.numerator % 2 == 0 && self.denominator_exponent != 0 {
            self.numerator >>= 1_i32;
            self.denominator_exponent -= 1;
        }
        self
    }

    /// Check if number is an integer
    pub const fn is_integer(&self) -> bool {
        self.denominator_exponent == 0
    }

    /// Convert to integer if it's an integer
    pub const fn to_integer(&self) -> Option<i64> {
        if self.is_integer() {
            Some(self.numerator)
        } else {
            None
        }
    }

    /// Check if number is equal to the given integer
    pub const fn eq_integer(&self, integer: i64) -> bool {
        self.is_integer() && self.numerator == integer
    }

    /// Greatest integer not above the number
    pub const fn floor(&self) -> i64 {
        self.numerator >> self.denominator_exponent
    }

    /// Least integer not below the number
    pub const fn ceil(&self) -> i64 {
        if self.is_integer() {
            self.numerator
        } else {
            self.floor() + 1
        }
    }

    /// Arithmetic mean of two dyadics
    #[must_use]
    pub fn mean(&self, rhs: &Self) -> Self {
        let mut res = *self + *rhs;
        res.denominator_exponent += 1;
        res.normalized()
    }

    /// `-1/2^m` where `2^m` is the denominator. Used as the temperature of numbers.
    #[must_use]
    pub fn negative_reciprocal_denominator(&self) -> Self {
        Self::new(-1, self.denominator_exponent)
    }

    /// Convert dyadic to rational
    ///
    /// # Panics
    /// - If denominator is too large to fit in [`Rational`]
    pub fn to_rational(self) -> Rational {
        let denominator = 1_i64
            .checked_shl(self.denominator_exponent)
            .filter(|d| *d > 0)
            .expect("denominator does not fit in Rational");
        Rational::new(self.numerator, denominator)
    }

    pub(crate) fn parse(p: Parser<'_>) -> Option<(Parser<'_>, Self)> {
        let (p, numerator) = try_option!(lexeme!(p, Parser::parse_i64));
        match p.parse_ascii_char('/') {
            Some(p) => {
                let (p, denominator) = try_option!(lexeme!(p, Parser::parse_u64));
                let number = try_option!(Self::new_fraction(numerator, denominator).ok());
                Some((p, number))
            }
            None => Some((p, Self::new_integer(numerator))),
        }
    }
}

impl_from_str_via_parser!(DyadicRational);

impl From<i64> for DyadicRational {
    fn from(value: i64) -> Self {
        Self::new_integer(value)
    }
}

impl TryFrom<Rational> for DyadicRational {
    type Error = Error;

    fn try_from(rational: Rational) -> Result<Self, Error> {
        match rational {
            Rational::Value(value) => {
                let denominator = *value.denom();
                Self::new_fraction(*value.numer(), denominator.unsigned_abs())
                    .map(|d| if denominator < 0 { -d } else { d })
            }
            Rational::NegativeInfinity | Rational::PositiveInfinity => Err(Error::Infinite),
        }
    }
}

impl PartialOrd for DyadicRational {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for DyadicRational {
    fn cmp(&self, other: &Self) -> Ordering {
        if self.denominator_exponent <= other.denominator_exponent {
            i64::cmp(
                &(self.numerator << (other.denominator_exponent - self.denominator_exponent)),
                &other.numerator,
            )
        } else {
            i64::cmp(
                &self.numerator,
                &(other.numerator << (self.denominator_exponent - other.denominator_exponent)),
            )
        }
    }
}

impl_op_ex!(+|lhs: &DyadicRational, rhs: &DyadicRational| -> DyadicRational {
    let (wide, narrow) = if lhs.denominator_exponent >= rhs.denominator_exponent {
        (lhs, rhs)
    } else {
        (rhs, lhs)
    };
    DyadicRational {
        numerator: wide.numerator
            + (narrow.numerator << (wide.denominator_exponent - narrow.denominator_exponent)),
        denominator_exponent: wide.denominator_exponent,
    }
    .normalized()
});

impl_op_ex!(+=|lhs: &mut DyadicRational, rhs: &DyadicRational| { *lhs = lhs.add(rhs); });

impl_op_ex!(-|lhs: &DyadicRational, rhs: &DyadicRational| -> DyadicRational { lhs + (-rhs) });

impl_op_ex!(-=|lhs: &mut DyadicRational, rhs: &DyadicRational| { *lhs = lhs.sub(rhs); });

impl_op_ex!(-|lhs: &DyadicRational| -> DyadicRational {
    DyadicRational {
        numerator: -lhs.numerator,
        denominator_exponent: lhs.denominator_exponent,
    }
});

impl Display for DyadicRational {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(int) = self.to_integer() {
            write!(f, "{}", int)
        } else if let Some(denominator) = self.denominator() {
            write!(f, "{}/{}", self.numerator(), denominator)
        } else {
            write!(f, "{}/2^{}", self.numerator(), self.denominator_exponent())
        }
    }
}

#[cfg(any(test, feature = "quickcheck"))]
impl quickcheck::Arbitrary for DyadicRational {
    fn arbitrary(g: &mut quickcheck::Gen) -> Self {
        let numerator = i64::from(i8::arbitrary(g) % 32);
        let exponent = u32::arbitrary(g) % 4;
        Self::new(numerator, exponent)
    }

    fn shrink(&self) -> Box<dyn Iterator<Item = Self>> {
        if self.is_integer() {
            Box::new(self.numerator.shrink().map(Self::new_integer))
        } else {
            Box::new(std::iter::once(Self::new_integer(self.floor())))
        }
    }
}
