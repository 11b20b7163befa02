//! Canonical form of a short game
//!
//! A [`CanonicalGame`] is a copyable handle to a game stored in the process-wide
//! [universe](crate::short::partizan::universe). Every distinct game value has exactly one
//! handle, so equality and hashing never look at the game structure.

use crate::{
    Error, display,
    numeric::{dyadic_rational::DyadicRational, nimber::Nimber, rational::Rational},
    parsing::{Parser, impl_from_str_via_parser, lexeme, try_option},
    short::partizan::{
        Player,
        universe::{self, Node},
    },
};
use auto_ops::impl_op_ex;
use nus::Nus;
use simplify::Moves;
use std::{
    cmp::Ordering,
    fmt::{self, Debug, Display},
    iter::Sum,
};

mod algebra;
mod atomic_weight;
mod constructors;
pub mod nus;
mod simplify;
mod thermography;

pub use thermography::{Dissociation, HeatedComponent, Temper};

/// Dense, monotonically assigned identifier of a canonical game
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameId(pub usize);

impl Display for GameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Short game in canonical form
#[repr(transparent)]
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct CanonicalGame(GameId);

impl CanonicalGame {
    #[inline]
    pub(crate) const fn from_id_unchecked(id: GameId) -> Self {
        Self(id)
    }

    #[inline]
    fn node(self) -> &'static Node {
        universe::global().node(self.0)
    }

    /// Identifier of the game in the universe
    #[inline]
    pub const fn id(self) -> GameId {
        self.0
    }

    /// Look up a previously constructed game by its identifier
    ///
    /// # Errors
    /// - No game with this identifier has been constructed yet
    pub fn from_id(id: GameId) -> Result<Self, Error> {
        if id.0 < universe::global().len() {
            Ok(Self(id))
        } else {
            Err(Error::UnknownId(id.0))
        }
    }

    /// The game `{|}`
    #[inline]
    pub const fn zero() -> Self {
        Self(GameId(0))
    }

    /// The game `{0|0}`
    pub fn star() -> Self {
        Self::from_nimber(Nimber::STAR)
    }

    /// The game `{0|*}`
    pub fn up() -> Self {
        Self::from_nus(Nus::new(DyadicRational::ZERO, 1, Nimber::ZERO))
    }

    /// The game `{0, *|0}`
    pub fn up_star() -> Self {
        Self::from_nus(Nus::new(DyadicRational::ZERO, 1, Nimber::STAR))
    }

    /// The game `{*|0}`
    pub fn down() -> Self {
        Self::from_nus(Nus::new(DyadicRational::ZERO, -1, Nimber::ZERO))
    }

    /// The game `{0|}`
    pub fn one() -> Self {
        Self::from_integer(1)
    }

    /// The game `{1|}`
    pub fn two() -> Self {
        Self::from_integer(2)
    }

    /// The game `{|-1}`
    pub fn minus_two() -> Self {
        Self::from_integer(-2)
    }

    /// Construct an integer, building it from the closest integer constructed so far
    pub fn from_integer(integer: i64) -> Self {
        let universe = universe::global();
        let step = integer.signum();

        let mut current = integer;
        let mut game = loop {
            if let Some(game) = universe.lookup_nus(&Nus::new_integer(current)) {
                break game;
            }
            current -= step;
        };

        while current != integer {
            current += step;
            game = if step > 0 {
                universe.intern(vec![game], vec![])
            } else {
                universe.intern(vec![], vec![game])
            };
        }

        game
    }

    /// Construct a dyadic rational
    pub fn from_dyadic(number: DyadicRational) -> Self {
        Self::from_nus(Nus::new_number(number))
    }

    /// Construct a rational number
    ///
    /// # Errors
    /// - Number is infinite
    /// - Denominator is not a power of two
    pub fn from_rational(number: Rational) -> Result<Self, Error> {
        DyadicRational::try_from(number).map(Self::from_dyadic)
    }

    /// Construct a nimber
    pub fn from_nimber(nimber: Nimber) -> Self {
        Self::from_nus(Nus::new_nimber(nimber))
    }

    /// Construct a sum of a number, up multiple and a nimber
    pub fn from_number_up_star(number: DyadicRational, up_multiple: i32, nimber: Nimber) -> Self {
        Self::from_nus(Nus::new(number, up_multiple, nimber))
    }

    /// Construct a game from a number-up-star triple
    pub fn from_nus(nus: Nus) -> Self {
        if let Some(game) = universe::global().lookup_nus(&nus) {
            return game;
        }

        let number = nus.number();
        let (left, right) = if nus.is_number() {
            if let Some(integer) = number.to_integer() {
                return Self::from_integer(integer);
            }
            // k/2^n = {(k-1)/2^n | (k+1)/2^n}
            let exponent = number.denominator_exponent();
            (
                vec![Self::from_dyadic(DyadicRational::new(number.numerator() - 1, exponent))],
                vec![Self::from_dyadic(DyadicRational::new(number.numerator() + 1, exponent))],
            )
        } else if nus.up_multiple() == 0 {
            // n*k = {n, n*, ..., n*(k-1) | n, n*, ..., n*(k-1)}
            let options = (0..nus.nimber().value())
                .map(|k| Self::from_nus(Nus::new(number, 0, Nimber::new(k))))
                .collect::<Vec<_>>();
            (options.clone(), options)
        } else {
            let base = Self::from_dyadic(number);
            let star = Nimber::STAR;
            match (nus.up_multiple(), nus.nimber() == star) {
                (1, true) => (vec![base, Self::from_nus(Nus::new(number, 0, star))], vec![base]),
                (-1, true) => (vec![base], vec![base, Self::from_nus(Nus::new(number, 0, star))]),
                (up, _) if up > 0 => (
                    vec![base],
                    vec![Self::from_nus(Nus::new(number, up - 1, nus.nimber() + star))],
                ),
                (up, _) => (
                    vec![Self::from_nus(Nus::new(number, up + 1, nus.nimber() + star))],
                    vec![base],
                ),
            }
        };

        let game = Self::from_canonical_options(left, right);
        debug_assert_eq!(game.nus(), Some(nus), "Number-up-star not recognized");
        game
    }

    /// Construct a game from arbitrary options, simplifying them to canonical form
    pub fn from_options(left: Vec<Self>, right: Vec<Self>) -> Self {
        let Moves { left, right } = Moves { left, right }.canonicalize();
        Self::from_canonical_options(left, right)
    }

    /// Construct a game from options that are already free of dominated and reversible options
    pub(crate) fn from_canonical_options(mut left: Vec<Self>, mut right: Vec<Self>) -> Self {
        left.sort_by(|lhs, rhs| lhs.compare_and_order(rhs));
        right.sort_by(|lhs, rhs| lhs.compare_and_order(rhs));
        universe::global().intern(left, right)
    }

    /// Left options of the game
    #[inline]
    pub fn left_options(self) -> &'static [Self] {
        &self.node().left
    }

    /// Right options of the game
    #[inline]
    pub fn right_options(self) -> &'static [Self] {
        &self.node().right
    }

    /// Options of `player`
    #[inline]
    pub fn options(self, player: Player) -> &'static [Self] {
        match player {
            Player::Left => self.left_options(),
            Player::Right => self.right_options(),
        }
    }

    /// Birthday of the game: zero for `{|}`, otherwise one more than the oldest option
    #[inline]
    pub fn birthday(self) -> u32 {
        self.node().birthday
    }

    /// Number-up-star form of the game, if it has one
    #[inline]
    pub fn nus(self) -> Option<Nus> {
        self.node().nus
    }

    /// Check if the game is zero
    #[inline]
    pub const fn is_zero(self) -> bool {
        self.0.0 == 0
    }

    /// Check if the game is `*`
    pub fn is_star(self) -> bool {
        self.nus() == Some(Nus::new_nimber(Nimber::STAR))
    }

    /// Check if the game is a number
    pub fn is_number(self) -> bool {
        self.nus().is_some_and(Nus::is_number)
    }

    /// Check if the game is an integer
    pub fn is_integer(self) -> bool {
        self.nus().is_some_and(Nus::is_integer)
    }

    /// Check if the game is a sum of a number, a multiple of up, and a nimber
    pub fn is_number_up_star(self) -> bool {
        self.nus().is_some()
    }

    /// Check if the game is a nimber
    pub fn is_nimber(self) -> bool {
        self.nus().is_some_and(Nus::is_nimber)
    }

    /// Value of the game, if it is a number
    pub fn to_number(self) -> Option<DyadicRational> {
        self.nus().filter(|nus| nus.is_number()).map(Nus::number)
    }

    /// Value of the game, if it is an integer
    pub fn to_integer(self) -> Option<i64> {
        self.to_number().and_then(|number| number.to_integer())
    }

    fn nus_part<T>(self, query: &'static str, part: impl FnOnce(Nus) -> T) -> Result<T, Error> {
        self.nus().map(part).ok_or_else(|| Error::NotNumberUpStar {
            query,
            game: self.to_string(),
        })
    }

    /// Number part of a number-up-star game
    ///
    /// # Errors
    /// - Game is not a number-up-star
    pub fn number_part(self) -> Result<DyadicRational, Error> {
        self.nus_part("number part", Nus::number)
    }

    /// Up multiple of a number-up-star game
    ///
    /// # Errors
    /// - Game is not a number-up-star
    pub fn up_multiple_part(self) -> Result<i32, Error> {
        self.nus_part("up multiple part", Nus::up_multiple)
    }

    /// Nimber of a number-up-star game
    ///
    /// # Errors
    /// - Game is not a number-up-star
    pub fn nimber_part(self) -> Result<Nimber, Error> {
        self.nus_part("nimber part", Nus::nimber)
    }

    /// Total order used to sort options. It is unrelated to the game order given by
    /// [`PartialOrd`].
    pub fn compare_and_order(&self, other: &Self) -> Ordering {
        self.birthday()
            .cmp(&other.birthday())
            .then_with(|| self.left_options().len().cmp(&other.left_options().len()))
            .then_with(|| self.right_options().len().cmp(&other.right_options().len()))
            .then_with(|| self.0.cmp(&other.0))
    }

    /// Parse comma-separated games, ie. the underlined part:
    ///
    /// `{a,b,...|c,d,...}`
    ///
    /// ` ^^^^^^^`
    fn parse_list(mut p: Parser<'_>) -> Option<(Parser<'_>, Vec<Self>)> {
        let mut acc = Vec::new();
        loop {
            match lexeme!(p, Self::parse) {
                Some((game_p, game)) => {
                    acc.push(game);
                    match game_p.parse_ascii_char(',') {
                        Some(comma_p) => p = comma_p,
                        None => return Some((game_p, acc)),
                    }
                }
                None => return Some((p, acc)),
            }
        }
    }

    fn parse_braces(p: Parser<'_>) -> Option<(Parser<'_>, Self)> {
        let p = try_option!(p.parse_ascii_char('{'));
        let (p, left) = try_option!(Self::parse_list(p));
        let p = try_option!(p.parse_ascii_char('|'));
        let (p, right) = try_option!(Self::parse_list(p));
        let p = try_option!(p.parse_ascii_char('}'));
        Some((p, Self::from_options(left, right)))
    }

    /// Parse game using number-up-star, `xTiny(G)`, `xMiny(G)` or `{a,b,...|c,d,...}` notation
    fn parse(p: Parser<'_>) -> Option<(Parser<'_>, Self)> {
        let p = p.trim_whitespace();
        let (p, base) = match Nus::parse(p) {
            Some((p, nus)) => (p, Some(nus)),
            None => (p, None),
        };

        let subscripted: [(&str, fn(Self) -> Self); 2] =
            [("Tiny(", Self::from_tiny), ("Miny(", Self::from_miny)];
        for (prefix, constructor) in subscripted {
            if let Some(p) = p.parse_literal(prefix) {
                let (p, subscript) = try_option!(lexeme!(p, Self::parse));
                let p = try_option!(p.parse_ascii_char(')'));
                let offset = base.map_or(Self::zero(), Self::from_nus);
                return Some((p.trim_whitespace(), offset + constructor(subscript)));
            }
        }

        match base {
            Some(nus) => Some((p, Self::from_nus(nus))),
            None => lexeme!(p, Self::parse_braces),
        }
    }
}

impl_from_str_via_parser!(CanonicalGame);

impl PartialOrd for CanonicalGame {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        if self == other {
            Some(Ordering::Equal)
        } else if self.leq(*other) {
            Some(Ordering::Less)
        } else if other.leq(*self) {
            Some(Ordering::Greater)
        } else {
            None
        }
    }

    fn le(&self, other: &Self) -> bool {
        self.leq(*other)
    }

    fn ge(&self, other: &Self) -> bool {
        other.leq(*self)
    }
}

impl_op_ex!(+|g: &CanonicalGame, h: &CanonicalGame| -> CanonicalGame { g.plus(*h) });
impl_op_ex!(+=|g: &mut CanonicalGame, h: &CanonicalGame| { *g = g.plus(*h) });
impl_op_ex!(-|g: &CanonicalGame| -> CanonicalGame { g.inverse() });
impl_op_ex!(-|g: &CanonicalGame, h: &CanonicalGame| -> CanonicalGame { g.minus(*h) });
impl_op_ex!(-=|g: &mut CanonicalGame, h: &CanonicalGame| { *g = g.minus(*h) });

impl Sum for CanonicalGame {
    fn sum<I: Iterator<Item = CanonicalGame>>(iter: I) -> CanonicalGame {
        iter.fold(CanonicalGame::zero(), |acc, g| acc + g)
    }
}

impl<'a> Sum<&'a CanonicalGame> for CanonicalGame {
    fn sum<I: Iterator<Item = &'a CanonicalGame>>(iter: I) -> CanonicalGame {
        iter.fold(CanonicalGame::zero(), |acc, g| acc + g)
    }
}

impl Display for CanonicalGame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(nus) = self.nus() {
            return Display::fmt(&nus, f);
        }

        if let Some((offset, subscript)) = self.tiny_parts() {
            if !offset.is_zero() {
                write!(f, "{}", offset)?;
            }
            return write!(f, "Tiny({})", subscript);
        }

        if let Some((offset, subscript)) = self.miny_parts() {
            if !offset.is_zero() {
                write!(f, "{}", offset)?;
            }
            return write!(f, "Miny({})", subscript);
        }

        display::options(f, self.left_options(), self.right_options())
    }
}

impl Debug for CanonicalGame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CanonicalGame({}: {})", self.0, self)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for CanonicalGame {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for CanonicalGame {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use std::str::FromStr;

        Self::from_str(&String::deserialize(deserializer)?).map_err(serde::de::Error::custom)
    }
}

#[cfg(any(test, feature = "quickcheck"))]
impl CanonicalGame {
    fn arbitrary_sized(g: &mut quickcheck::Gen, depth: u8) -> Self {
        use quickcheck::Arbitrary;

        if depth == 0 || u8::arbitrary(g) % 4 == 0 {
            return Self::from_nus(Nus::arbitrary(g));
        }

        let mut options = || {
            (0..usize::arbitrary(g) % 3)
                .map(|_| Self::arbitrary_sized(g, depth - 1))
                .collect::<Vec<_>>()
        };
        let left = options();
        let right = options();
        Self::from_options(left, right)
    }
}

#[cfg(any(test, feature = "quickcheck"))]
impl quickcheck::Arbitrary for CanonicalGame {
    fn arbitrary(g: &mut quickcheck::Gen) -> Self {
        Self::arbitrary_sized(g, 2)
    }

    fn shrink(&self) -> Box<dyn Iterator<Item = Self>> {
        Box::new(
            self.left_options()
                .iter()
                .chain(self.right_options())
                .copied(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickcheck::QuickCheck;
    use std::str::FromStr;

    fn game(s: &str) -> CanonicalGame {
        CanonicalGame::from_str(s).unwrap()
    }

    #[test]
    fn constructs_integers() {
        let eight = CanonicalGame::from_integer(8);
        assert_eq!(&eight.to_string(), "8");
        assert_eq!(eight.birthday(), 8);

        let minus_forty_two = CanonicalGame::from_integer(-42);
        assert_eq!(&minus_forty_two.to_string(), "-42");
        assert_eq!(minus_forty_two.right_options(), &[CanonicalGame::from_integer(-41)]);
    }

    #[test]
    fn constructs_rationals() {
        let rational = DyadicRational::new(3, 4);
        let three_sixteenth = CanonicalGame::from_dyadic(rational);
        assert_eq!(&three_sixteenth.to_string(), "3/16");

        let duplicate = CanonicalGame::from_dyadic(rational);
        assert_eq!(three_sixteenth, duplicate);

        assert_eq!(
            CanonicalGame::from_rational(Rational::new(-5, 8)).unwrap(),
            game("-5/8")
        );
        assert_eq!(
            CanonicalGame::from_rational(Rational::new(1, 3)),
            Err(Error::NotDyadic {
                numerator: 1,
                denominator: 3
            })
        );
        assert_eq!(
            CanonicalGame::from_rational(Rational::PositiveInfinity),
            Err(Error::Infinite)
        );
    }

    #[test]
    fn constructs_nimbers() {
        let star = CanonicalGame::from_nimber(Nimber::STAR);
        assert_eq!(&star.to_string(), "*");
        assert!(star.is_star());

        let star_three = CanonicalGame::from_nimber(Nimber::new(3));
        assert_eq!(&star_three.to_string(), "*3");
        assert_eq!(star_three.left_options().len(), 3);

        let one_star_two =
            CanonicalGame::from_number_up_star(DyadicRational::ONE, 0, Nimber::new(2));
        assert_eq!(&one_star_two.to_string(), "1*2");
    }

    #[test]
    fn constructs_up() {
        assert_eq!(&CanonicalGame::up().to_string(), "^");
        assert_eq!(&CanonicalGame::up_star().to_string(), "^*");
        assert_eq!(
            &CanonicalGame::from_number_up_star(DyadicRational::ZERO, -3, Nimber::ZERO)
                .to_string(),
            "v3"
        );
        assert_eq!(CanonicalGame::up(), game("{0|*}"));
        assert_eq!(CanonicalGame::up_star(), game("{0, *|0}"));
        assert_eq!(CanonicalGame::down(), game("{*|0}"));
        assert_eq!(game("^2"), game("{0|^*}"));
        assert_eq!(game("^*2"), game("{0|*3}"));
    }

    #[test]
    fn zero_has_no_options() {
        let zero = CanonicalGame::from_integer(0);
        assert!(zero.is_zero());
        assert!(zero.left_options().is_empty() && zero.right_options().is_empty());
        assert_eq!(zero, CanonicalGame::zero());
    }

    #[test]
    fn star_has_zero_options() {
        let star = CanonicalGame::from_number_up_star(DyadicRational::ZERO, 0, Nimber::STAR);
        assert_eq!(star.left_options(), &[CanonicalGame::zero()]);
        assert_eq!(star.right_options(), &[CanonicalGame::zero()]);
        assert!(star.is_nimber());
        assert_eq!(star.nimber_part(), Ok(Nimber::STAR));
    }

    #[test]
    fn up_is_positive() {
        let up = CanonicalGame::from_number_up_star(DyadicRational::ZERO, 1, Nimber::ZERO);
        assert!(CanonicalGame::zero() <= up);
        assert!(!(up <= CanonicalGame::zero()));
        assert_eq!(up + up.inverse(), CanonicalGame::zero());
    }

    #[test]
    fn switch_stays_a_switch() {
        let one = CanonicalGame::from_integer(1);
        let minus_one = CanonicalGame::from_integer(-1);

        let switch = CanonicalGame::from_options(vec![one], vec![minus_one]);
        assert!(!switch.is_number());
        assert!(switch.is_switch());
        assert_eq!(switch.left_options(), &[one]);
        assert_eq!(switch.right_options(), &[minus_one]);
        assert_eq!(switch.to_string(), "{1|-1}");

        let zero = CanonicalGame::from_options(vec![minus_one], vec![one]);
        assert!(zero.is_zero());
        assert_eq!(zero.nus(), Some(Nus::new_integer(0)));
    }

    #[test]
    fn construction_paths_agree() {
        let two = CanonicalGame::from_integer(2);
        assert_eq!(
            CanonicalGame::from_integer(3),
            CanonicalGame::from_options(vec![two], vec![])
        );
        assert_eq!(
            CanonicalGame::from_integer(3),
            CanonicalGame::from_options(vec![CanonicalGame::one(), two], vec![])
        );
        assert_eq!(
            CanonicalGame::from_dyadic(DyadicRational::new(3, 2)),
            CanonicalGame::from_options(vec![CanonicalGame::zero()], vec![CanonicalGame::one()])
                + game("1/4")
        );
    }

    #[test]
    fn ids_round_trip() {
        let g = game("{3|{2|-1}}");
        assert_eq!(CanonicalGame::from_id(g.id()), Ok(g));
        assert_eq!(
            CanonicalGame::from_id(GameId(usize::MAX)),
            Err(Error::UnknownId(usize::MAX))
        );
    }

    #[test]
    fn nus_accessors_reject_other_games() {
        let g = game("{1|-1}");
        assert!(matches!(
            g.number_part(),
            Err(Error::NotNumberUpStar {
                query: "number part",
                ..
            })
        ));
        assert!(g.up_multiple_part().is_err());
        assert_eq!(game("1/2v3*").up_multiple_part(), Ok(-3));
    }

    macro_rules! assert_negative_eq {
        ($inp:expr, $out:expr) => {
            let inp = CanonicalGame::from_str($inp).unwrap();
            assert_eq!((-inp).to_string(), $out);
        };
    }

    #[test]
    fn negative() {
        assert_negative_eq!("0", "0");
        assert_negative_eq!("42", "-42");
        assert_negative_eq!("-42", "42");
        assert_negative_eq!("{^|*}", "{*|v}");
        assert_negative_eq!("1/2^3*2", "-1/2v3*2");
    }

    #[test]
    fn nimber_is_its_negative() {
        let star = CanonicalGame::from_nimber(Nimber::new(4));
        assert_eq!(&star.to_string(), "*4");
        assert_eq!(star, -star);
    }

    #[test]
    fn simplifies_moves() {
        let left_id = CanonicalGame::from_options(vec![game("1")], vec![game("*")]);
        assert_eq!(&left_id.to_string(), "{1|*}");

        let weird = CanonicalGame::from_options(vec![game("1v2*")], vec![game("1")]);
        assert_eq!(&weird.to_string(), "1v3");
        assert_eq!(&weird.left_options()[0].to_string(), "1v2*");

        let weird_right = CanonicalGame::from_options(vec![game("^")], vec![game("-2")]);
        assert_eq!(&weird_right.to_string(), "{^|-2}");

        let weird = CanonicalGame::from_options(vec![], vec![weird_right]);
        assert_eq!(&weird.to_string(), "0");
    }

    #[test]
    fn sum_works() {
        let zero = CanonicalGame::zero();
        let one = CanonicalGame::one();

        let one_zero = CanonicalGame::from_options(vec![one], vec![zero]);
        let zero_one = CanonicalGame::from_options(vec![zero], vec![one]);

        let sum = one_zero + zero_one;
        assert_eq!(&sum.to_string(), "{3/2|1/2}");
    }

    #[test]
    fn parse_games() {
        macro_rules! test_game_parse {
            ($inp: expr, $expected: expr) => {{
                let g = CanonicalGame::parse(Parser::new($inp))
                    .expect("Could not parse")
                    .1;
                assert_eq!($expected, g.to_string());
            }};
        }

        test_game_parse!("{|}", "0");
        test_game_parse!("{1,2|}", "3");
        test_game_parse!("{42|*}", "{42|*}");
        test_game_parse!("123", "123");
        test_game_parse!("{1/2|2}", "1");
        test_game_parse!("{3/4|7/8}", "13/16");
        test_game_parse!("{6/8|7/8}", "13/16");
        test_game_parse!("{0|2}", "1");
        test_game_parse!("{0,*,*2|0,*,*2}", "*3");
        test_game_parse!("{ 0 | { 0 | -2 } }", "Tiny(2)");
        test_game_parse!("1Tiny(2)", "1Tiny(2)");
        test_game_parse!("{{2|0}|0}", "Miny(2)");
        test_game_parse!("-1/2Miny(3)", "-1/2Miny(3)");
        assert!(CanonicalGame::from_str("{1|").is_err());
        assert!(CanonicalGame::from_str("").is_err());
    }

    #[test]
    fn ordering_works() {
        macro_rules! test_ordering {
            ($lhs:expr, $rhs:expr, $expected:expr) => {
                assert_eq!(PartialOrd::partial_cmp(&game($lhs), &game($rhs)), $expected)
            };
        }

        test_ordering!("0", "*", None);
        test_ordering!("*", "*", Some(Ordering::Equal));
        test_ordering!("*2", "*", None);
        test_ordering!("*2", "*2", Some(Ordering::Equal));
        test_ordering!("*", "*2", None);
        test_ordering!("1", "2", Some(Ordering::Less));
        test_ordering!("2", "3", Some(Ordering::Less));
        test_ordering!("3", "2", Some(Ordering::Greater));
        test_ordering!("-1", "*", Some(Ordering::Less));
        test_ordering!("1", "*", Some(Ordering::Greater));
        test_ordering!("{1|-1}", "0", None);
        test_ordering!("Tiny(1)", "0", Some(Ordering::Greater));
        test_ordering!("Tiny(1)", "^", Some(Ordering::Less));
    }

    #[test]
    fn display_round_trips() {
        fn test(g: CanonicalGame) -> bool {
            CanonicalGame::from_str(&g.to_string()) == Ok(g)
        }
        QuickCheck::new().quickcheck(test as fn(CanonicalGame) -> bool);
    }

    #[test]
    fn number_up_stars_display_in_short_form() {
        let g = CanonicalGame::from_nus(Nus::new(DyadicRational::from(1i64), 3, Nimber::STAR));
        assert_eq!(g.to_string(), "1^3*");
        assert_eq!(format!("{:?}", g), format!("CanonicalGame({}: 1^3*)", g.id()));
        assert_eq!(CanonicalGame::down().to_string(), "v");
    }

    #[test]
    fn inverse_is_involution() {
        fn test(g: CanonicalGame) -> bool {
            g.inverse().inverse() == g
        }
        QuickCheck::new().quickcheck(test as fn(CanonicalGame) -> bool);
    }

    #[test]
    fn additive_identity_and_inverse() {
        fn test(g: CanonicalGame) -> bool {
            g + CanonicalGame::zero() == g && (g + (-g)).is_zero() && (g - g).is_zero()
        }
        QuickCheck::new().quickcheck(test as fn(CanonicalGame) -> bool);
    }

    #[test]
    fn leq_is_consistent_with_numbers() {
        fn test(a: DyadicRational, b: DyadicRational) -> bool {
            (CanonicalGame::from_dyadic(a) <= CanonicalGame::from_dyadic(b)) == (a <= b)
        }
        QuickCheck::new().quickcheck(test as fn(DyadicRational, DyadicRational) -> bool);
    }

    #[test]
    fn nus_sum_matches_general_sum() {
        fn test(a: Nus, b: Nus) -> bool {
            let g = CanonicalGame::from_nus(a);
            let h = CanonicalGame::from_nus(b);

            // Sum expanded through options, bypassing the closed form
            let left = g
                .left_options()
                .iter()
                .map(|gl| *gl + h)
                .chain(h.left_options().iter().map(|hl| g + *hl))
                .collect();
            let right = g
                .right_options()
                .iter()
                .map(|gr| *gr + h)
                .chain(h.right_options().iter().map(|hr| g + *hr))
                .collect();

            CanonicalGame::from_options(left, right) == g + h
        }
        QuickCheck::new()
            .tests(30)
            .quickcheck(test as fn(Nus, Nus) -> bool);
    }
}
