//! Nimbers, the values of Nim heaps

use crate::Error;
use auto_ops::impl_op_ex;
use std::fmt::Display;

/// Value `*n` of a Nim heap of size `n`. Addition is the Nim sum.
#[repr(transparent)]
#[derive(Debug, Hash, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Nimber(u32);

impl Nimber {
    /// `*0`, equal to the zero game
    pub const ZERO: Self = Self(0);

    /// `*`, the game `{0|0}`
    pub const STAR: Self = Self(1);

    /// Construct new nimber
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Size of the Nim heap
    pub const fn value(&self) -> u32 {
        self.0
    }

    /// Smallest nimber not in `nimbers`
    pub fn mex(mut nimbers: Vec<Self>) -> Self {
        nimbers.sort_unstable();
        nimbers.dedup();
        let gap = nimbers
            .iter()
            .enumerate()
            .find(|(expected, nimber)| nimber.0 as usize != *expected);
        Self(gap.map_or(nimbers.len(), |(expected, _)| expected) as u32)
    }

    /// Smallest power of two at least `2` and no smaller than the nimber
    ///
    /// Nim sums of nimbers below it stay below it.
    pub const fn enclosing_power_of_two(&self) -> Self {
        let power = self.0.next_power_of_two();
        Self(if power < 2 { 2 } else { power })
    }
}

impl From<u32> for Nimber {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl TryFrom<i64> for Nimber {
    type Error = Error;

    fn try_from(value: i64) -> Result<Self, Error> {
        if value < 0 {
            return Err(Error::NegativeNimber(value));
        }
        u32::try_from(value)
            .map(Self)
            .map_err(|_| Error::NimberTooLarge(value))
    }
}

impl_op_ex!(+|lhs: &Nimber, rhs: &Nimber| -> Nimber { Nimber(lhs.0 ^ rhs.0) });
impl_op_ex!(+=|lhs: &mut Nimber, rhs: &Nimber| { lhs.0 ^= rhs.0 });
impl_op_ex!(-|lhs: &Nimber| -> Nimber { *lhs });

impl Display for Nimber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.0 {
            0 => write!(f, "0"),
            1 => write!(f, "*"),
            n => write!(f, "*{}", n),
        }
    }
}

#[cfg(any(test, feature = "quickcheck"))]
impl quickcheck::Arbitrary for Nimber {
    fn arbitrary(g: &mut quickcheck::Gen) -> Self {
        Self(u32::arbitrary(g) % 8)
    }

    fn shrink(&self) -> Box<dyn Iterator<Item = Self>> {
        Box::new(self.0.shrink().map(Self))
    }
}
