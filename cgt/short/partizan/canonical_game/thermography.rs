//! Stops, thermographs and the transformations built on them

use crate::{
    Error,
    numeric::{dyadic_rational::DyadicRational, nimber::Nimber, rational::Rational},
    short::partizan::{
        Player,
        canonical_game::{CanonicalGame, nus::Nus},
        stop::{Stop, StopType},
        thermograph::Thermograph,
    },
};
use itertools::Itertools;
use std::fmt::{self, Display};

/// A game `G` even-tempered if, no matter how `G` is played, the first player will have the move
/// when `G` reaches a number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Temper {
    /// `G` is even-tempered if `G` a number, or every option of `G` is odd-tempered
    Even,

    /// `G` is odd-tempered if `G` is not a number and every option of `G` is even-tempered
    Odd,
}

/// Infinitesimal heated by a temperature, one summand of a [`Dissociation`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HeatedComponent {
    /// Infinitesimal part, the component cooled by its temperature
    pub infinitesimal: CanonicalGame,

    /// Temperature the infinitesimal is heated by
    pub temperature: DyadicRational,
}

impl HeatedComponent {
    /// Value of the component
    pub fn value(&self) -> CanonicalGame {
        self.infinitesimal
            .heat(CanonicalGame::from_dyadic(self.temperature))
    }
}

impl Display for HeatedComponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Heat({}, {})", self.infinitesimal, self.temperature)
    }
}

/// Norton thermal dissociation: the mean value plus heated infinitesimals of strictly decreasing
/// temperatures
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Dissociation {
    /// Mean value of the game
    pub mean: DyadicRational,

    /// Heated infinitesimals, hottest first
    pub components: Vec<HeatedComponent>,
}

impl Dissociation {
    /// Recombine the components into the dissociated game
    pub fn sum(&self) -> CanonicalGame {
        self.components
            .iter()
            .map(HeatedComponent::value)
            .fold(CanonicalGame::from_dyadic(self.mean), |acc, component| {
                acc + component
            })
    }
}

impl Display for Dissociation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.mean)?;
        if !self.components.is_empty() {
            write!(f, " + {}", self.components.iter().join(" + "))?;
        }
        Ok(())
    }
}

impl CanonicalGame {
    fn stop(self, player: Player) -> Stop {
        if let Some(number) = self.to_number() {
            return Stop::new(number, StopType::from(player));
        }

        self.options(player)
            .iter()
            .map(|option| option.stop(player.opposite()))
            .reduce(|best, stop| best.better_for(player, stop))
            .expect("unreachable: a game that is not a number has options on both sides")
    }

    /// The number reached when Left plays first.
    pub fn left_stop(self) -> Stop {
        self.stop(Player::Left)
    }

    /// The number reached when Right plays first.
    pub fn right_stop(self) -> Stop {
        self.stop(Player::Right)
    }

    /// Confusion interval is the region between Right and Left stops
    pub fn confusion_interval(self) -> (Stop, Stop) {
        (self.right_stop(), self.left_stop())
    }

    /// Thermograph of the game, computed once per game
    pub fn thermograph(self) -> &'static Thermograph {
        self.node().thermograph.get_or_init(|| match self.to_number() {
            Some(number) => Thermograph::with_mast(Rational::from(number)),
            None => Thermograph::with_trajectories(
                self.left_options()
                    .iter()
                    .map(|gl| gl.thermograph().right_wall.clone()),
                self.right_options()
                    .iter()
                    .map(|gr| gr.thermograph().left_wall.clone()),
            ),
        })
    }

    /// Temperature of the game. Avoids computing a thermograph if game is a NUS
    pub fn temperature(self) -> DyadicRational {
        match self.nus() {
            // It's a number k/2^n, so the temperature is -1/2^n
            Some(nus) if nus.is_number() => nus.number().negative_reciprocal_denominator(),
            // It's a number plus a nonzero infinitesimal, thus the temperature is 0
            Some(_) => DyadicRational::ZERO,
            None => self.thermograph().temperature(),
        }
    }

    /// Mean value of the game, the value of its thermograph mast
    pub fn mean(self) -> DyadicRational {
        match self.nus() {
            Some(nus) => nus.number(),
            None => DyadicRational::try_from(self.thermograph().mast())
                .expect("unreachable: mast of a short game is a finite dyadic"),
        }
    }

    /// Cool the position by `temperature`
    ///
    /// Position `G` cooled by `t` is `G_t = {G^L_t - t | G^R_t + t}` unless there exists a
    /// temperature `t' < t` for which `G_t'` is infinitesimally close to a number
    ///
    /// # Errors
    /// - `temperature` is negative
    pub fn cool(self, temperature: DyadicRational) -> Result<Self, Error> {
        if temperature < DyadicRational::ZERO {
            return Err(Error::NegativeTemperature(temperature));
        }
        Ok(self.cool_by(temperature, Self::from_dyadic(temperature)))
    }

    pub(crate) fn cool_by(self, temperature: DyadicRational, temperature_game: Self) -> Self {
        if self.is_number() {
            return self;
        }

        if self.temperature() < temperature {
            return Self::from_dyadic(self.mean());
        }

        Self::from_options(
            self.left_options()
                .iter()
                .map(|gl| gl.cool_by(temperature, temperature_game) - temperature_game)
                .collect(),
            self.right_options()
                .iter()
                .map(|gr| gr.cool_by(temperature, temperature_game) + temperature_game)
                .collect(),
        )
    }

    /// Cool the game by its own temperature
    pub fn freeze(self) -> Self {
        let temperature = self.temperature().max(DyadicRational::ZERO);
        self.cool_by(temperature, Self::from_dyadic(temperature))
    }

    /// Heat position by given `temperature`.
    ///
    /// Heating is the inverse of cooling, defined as `\int^t G = G` if `G` is a number, or
    /// `\int^t G = {\int^t G^L + t | \int^t G^R - t}` otherwise
    pub fn heat(self, temperature: Self) -> Self {
        if self.is_number() {
            return self;
        }

        Self::from_options(
            self.left_options()
                .iter()
                .map(|gl| gl.heat(temperature) + temperature)
                .collect(),
            self.right_options()
                .iter()
                .map(|gr| gr.heat(temperature) - temperature)
                .collect(),
        )
    }

    /// Overheat the game from `base` to `temperature`: integers `n` become `n.base` and other
    /// games are heated by `temperature`
    pub fn overheat(self, base: Self, temperature: Self) -> Self {
        if self.is_integer() {
            return self.norton_product(base);
        }

        Self::from_options(
            self.left_options()
                .iter()
                .map(|gl| gl.overheat(base, temperature) + temperature)
                .collect(),
            self.right_options()
                .iter()
                .map(|gr| gr.overheat(base, temperature) - temperature)
                .collect(),
        )
    }

    /// See: The Reduced Canonical Form Of a Game p. 411
    pub fn star_projection(self) -> Self {
        if self.is_number() {
            return self;
        }

        if let Some(nus) = self.nus()
            && nus.up_multiple() == 0
            && nus.nimber() == Nimber::STAR
        {
            return Self::from_dyadic(nus.number());
        }

        Self::from_options(
            self.left_options()
                .iter()
                .map(|gl| gl.star_projection())
                .collect(),
            self.right_options()
                .iter()
                .map(|gr| gr.star_projection())
                .collect(),
        )
    }

    /// A reduced canonical form of `G` is `\bar{G}`, such that `\bar{G} = \bar{H}`
    /// whenever `G - H` is infinitesimal.
    pub fn reduced_canonical_form(self) -> Self {
        match self.nus() {
            Some(nus) => Self::from_dyadic(nus.number()),
            None => self
                .heat(Self::from_nus(Nus::new_nimber(Nimber::STAR)))
                .star_projection(),
        }
    }

    /// Get temper of the game
    pub fn temper(self) -> Option<Temper> {
        if self.is_number() {
            return Some(Temper::Even);
        }

        let options = || self.left_options().iter().chain(self.right_options());
        if options().all(|option| option.temper() == Some(Temper::Even)) {
            Some(Temper::Odd)
        } else if options().all(|option| option.temper() == Some(Temper::Odd)) {
            Some(Temper::Even)
        } else {
            None
        }
    }

    /// Options of `player` that are strictly best at some relevant temperature: the temperature
    /// of `self`, zero, or a vertical breakpoint of the option's wall facing the opponent that
    /// lies strictly between the two. Options are visited from last to first and an option that
    /// is not orthodox no longer competes with the remaining ones.
    fn orthodox_options(self, options: &[Self], player: Player) -> Vec<Self> {
        let temperature = self.temperature().to_rational();
        let zero = Rational::from(0);

        let value_at = |thermograph: &Thermograph, t: Rational| match player {
            Player::Left => thermograph.right_value_at(t),
            Player::Right => thermograph.left_value_at(t),
        };

        let mut competing = options
            .iter()
            .map(|option| Some(option.thermograph()))
            .collect::<Vec<_>>();
        let mut orthodox = Vec::with_capacity(options.len());

        for i in (0..options.len()).rev() {
            let thermograph = options[i].thermograph();
            let dominant_at = |t: Rational| {
                let value = value_at(thermograph, t);
                competing.iter().enumerate().all(|(j, other)| {
                    j == i
                        || other.is_none_or(|other| match player {
                            Player::Left => value > value_at(other, t),
                            Player::Right => value < value_at(other, t),
                        })
                })
            };

            let wall = match player {
                Player::Left => &thermograph.right_wall,
                Player::Right => &thermograph.left_wall,
            };
            let is_orthodox = dominant_at(temperature)
                || dominant_at(zero)
                || wall
                    .vertical_breakpoints()
                    .any(|t| t > zero && t < temperature && dominant_at(t));

            if is_orthodox {
                orthodox.push(options[i]);
            } else {
                competing[i] = None;
            }
        }

        orthodox
    }

    /// Left options that are orthodox, in reverse order
    pub fn orthodox_left_options(self) -> Vec<Self> {
        self.orthodox_options(self.left_options(), Player::Left)
    }

    /// Right options that are orthodox, in reverse order
    pub fn orthodox_right_options(self) -> Vec<Self> {
        self.orthodox_options(self.right_options(), Player::Right)
    }

    /// Game built from orthodox forms of the options, keeping only those that are orthodox
    pub fn orthodox_form(self) -> Self {
        let left = self
            .left_options()
            .iter()
            .map(|gl| gl.orthodox_form())
            .collect::<Vec<_>>();
        let right = self
            .right_options()
            .iter()
            .map(|gr| gr.orthodox_form())
            .collect::<Vec<_>>();

        Self::from_options(
            self.orthodox_options(&left, Player::Left),
            self.orthodox_options(&right, Player::Right),
        )
    }

    /// Norton thermal dissociation of the game
    ///
    /// Every game is equal to its mean value plus a sum of heated infinitesimals, and this
    /// representation is unique.
    pub fn dissociate(self) -> Dissociation {
        let mean = self.mean();
        let mut remainder = self - Self::from_dyadic(mean);
        let mut components = Vec::new();

        while !remainder.is_zero() {
            let temperature = remainder.temperature().max(DyadicRational::ZERO);
            let temperature_game = Self::from_dyadic(temperature);
            let infinitesimal = remainder.cool_by(temperature, temperature_game);
            remainder -= infinitesimal.heat(temperature_game);
            components.push(HeatedComponent {
                infinitesimal,
                temperature,
            });
        }

        Dissociation { mean, components }
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

    fn dyadic(s: &str) -> DyadicRational {
        DyadicRational::from_str(s).unwrap()
    }

    macro_rules! assert_stops {
        ($cf:expr, $left:expr, $right:expr) => {
            let g = game($cf);
            let (right_stop, left_stop) = g.confusion_interval();
            assert_eq!(left_stop.value(), dyadic($left), "Invalid left stop");
            assert_eq!(right_stop.value(), dyadic($right), "Invalid right stop");
            assert!(
                left_stop.value() >= right_stop.value(),
                "Left stop should be geq than right stop"
            );
        };
    }

    #[test]
    fn stops_work() {
        assert_stops!("{{3|2}|0}", "2", "0");
        assert_stops!("v", "0", "0");
        assert_stops!("*", "0", "0");
        assert_stops!("^", "0", "0");
        assert_stops!("{3|{2|-1}}", "3", "2");
    }

    #[test]
    fn stops_record_player_to_move() {
        let g = game("{{3|2}|0}");
        assert_eq!(g.left_stop(), Stop::new(dyadic("2"), StopType::Left));
        assert_eq!(g.right_stop(), Stop::new(dyadic("0"), StopType::Left));

        assert_eq!(game("*").left_stop(), Stop::new(dyadic("0"), StopType::Right));
        assert_eq!(game("5/4").right_stop(), Stop::new(dyadic("5/4"), StopType::Right));

        // Right moves to {2|-1} and Left answers to 2
        let g = game("{3|{2|-1}}");
        assert_eq!(g.left_stop(), Stop::new(dyadic("3"), StopType::Right));
        assert_eq!(g.right_stop(), Stop::new(dyadic("2"), StopType::Right));

        // Left reaches 1 with either player to move
        assert_eq!(
            game("{1, {2|1}|-1}").left_stop(),
            Stop::new(dyadic("1"), StopType::Either)
        );
    }

    #[test]
    fn temperatures() {
        assert_eq!(game("{1|-1}").temperature(), dyadic("1"));
        assert_eq!(game("{2|-1}").temperature(), dyadic("3/2"));
        assert_eq!(game("2").temperature(), dyadic("-1"));
        assert_eq!(game("3/4").temperature(), dyadic("-1/4"));
        assert_eq!(game("^*").temperature(), dyadic("0"));
        assert_eq!(game("Tiny(2)").temperature(), dyadic("0"));
    }

    #[test]
    fn means() {
        assert_eq!(game("{2|-1}").mean(), dyadic("1/2"));
        assert_eq!(game("1/2v*3").mean(), dyadic("1/2"));
        assert_eq!(game("{{4|0}, 1|-1}").mean(), dyadic("0"));
    }

    #[test]
    fn thermograph_is_shared() {
        let g = game("{2|-1}");
        assert!(std::ptr::eq(g.thermograph(), g.thermograph()));
        assert_eq!(g.thermograph().mast(), Rational::new(1, 2));
    }

    macro_rules! assert_cooled {
        ($cf:expr, $temp:expr, $expected:expr) => {
            let cooled = game($cf).cool(dyadic($temp)).unwrap();
            assert_eq!(cooled.to_string(), game($expected).to_string());
        };
    }

    #[test]
    fn cooling_works() {
        assert_cooled!("{2|-1}", "0", "{2|-1}");
        assert_cooled!("{2|-1}", "1/2", "{3/2|-1/2}");
        assert_cooled!("{2|-1}", "1", "{1|0}");
        assert_cooled!("{2|-1}", "3/2", "1/2*");
        assert_cooled!("{2|-1}", "2", "1/2");
        assert_cooled!("{2|-1}", "3", "1/2");
        assert_cooled!("{2|-1}", "42", "1/2");
    }

    #[test]
    fn cooling_rejects_negative_temperature() {
        assert_eq!(
            game("{2|-1}").cool(dyadic("-1/2")),
            Err(Error::NegativeTemperature(dyadic("-1/2")))
        );
    }

    #[test]
    fn freezing() {
        assert_eq!(game("{2|-1}").freeze(), game("1/2*"));
        assert_eq!(game("3/8").freeze(), game("3/8"));
    }

    #[test]
    fn heating_numbers() {
        let g = game("42");
        let heated = g.heat(CanonicalGame::one());
        assert_eq!(g, heated);
    }

    #[test]
    fn cooling_heating_roundtrip() {
        let g = game("{2|-1}");
        let t = dyadic("3/2");
        let cooled = g.cool(t).unwrap();
        let frozen = g.cool(t + DyadicRational::ONE).unwrap();
        let particle = cooled - frozen;
        let heated = particle.heat(CanonicalGame::from_dyadic(t));
        assert_eq!(heated.to_string(), "{3/2|-3/2}");
        assert_eq!(g, frozen + heated);
    }

    #[test]
    fn overheating() {
        let one = CanonicalGame::one();
        assert_eq!(game("*").overheat(one, one), game("{1|-1}"));
        assert_eq!(game("2").overheat(game("^"), one), game("^2"));
    }

    #[test]
    fn star_projection() {
        assert_eq!(game("1*").star_projection(), game("1"));
        assert_eq!(game("{1*|0}").star_projection(), game("{1|0}"));
    }

    #[test]
    fn reduced() {
        let g = game("{{2|0}, 1*|*}");
        assert_eq!(g.reduced_canonical_form().to_string(), "{1|0}");

        let g = game("{{3/2*|1/2}|{0|-3},{-1*,{-1/2|-1*}|-5/2}}");
        assert_eq!(
            g.reduced_canonical_form().to_string(),
            "{{3/2|1/2}|{0|-3}, {{-1/2|-1}|-5/2}}"
        );

        assert_eq!(game("1/2^3*").reduced_canonical_form(), game("1/2"));
    }

    #[test]
    fn temper() {
        assert_eq!(game("2").temper(), Some(Temper::Even));
        assert_eq!(game("{2|0}").temper(), Some(Temper::Odd));
        assert_eq!(game("{2|1,{*|0}}").temper(), None);
    }

    #[test]
    fn orthodox_options() {
        // {4|0} is never strictly better for Left than 1 at temperatures up to 1
        let g = game("{{4|0}, 1|-1}");
        assert_eq!(g.orthodox_left_options(), vec![game("1")]);
        assert_eq!(g.orthodox_right_options(), vec![game("-1")]);
        assert_eq!(g.orthodox_form(), game("{1|-1}"));

        let switch = game("{2|-1}");
        assert_eq!(switch.orthodox_form(), switch);
    }

    #[test]
    fn dissociation() {
        let dissociation = game("{2|-1}").dissociate();
        assert_eq!(dissociation.mean, dyadic("1/2"));
        assert_eq!(
            dissociation.components,
            vec![HeatedComponent {
                infinitesimal: game("*"),
                temperature: dyadic("3/2"),
            }]
        );
        assert_eq!(dissociation.to_string(), "1/2 + Heat(*, 3/2)");

        assert_eq!(game("^").dissociate().to_string(), "0 + Heat(^, 0)");
        assert!(game("-3/4").dissociate().components.is_empty());

        for input in ["{2|-1}", "{3|{2|-1}}", "{{4|0}, 1|-1}", "^*2", "{1|{0|-5}}"] {
            let g = game(input);
            assert_eq!(g.dissociate().sum(), g, "{input}");
        }
    }

    #[test]
    fn mean_is_additive() {
        fn test(g: CanonicalGame, h: CanonicalGame) -> bool {
            (g + h).mean() == g.mean() + h.mean()
        }
        QuickCheck::new().quickcheck(test as fn(CanonicalGame, CanonicalGame) -> bool);
    }

    #[test]
    fn walls_start_at_stops() {
        fn test(g: CanonicalGame) -> bool {
            let zero = Rational::from(0);
            let thermograph = g.thermograph();
            thermograph.left_value_at(zero) == g.left_stop().value().to_rational()
                && thermograph.right_value_at(zero) == g.right_stop().value().to_rational()
        }
        QuickCheck::new().quickcheck(test as fn(CanonicalGame) -> bool);
    }

    #[test]
    fn temperature_ignores_negation_and_integer_shifts() {
        fn test(g: CanonicalGame, shift: i8) -> bool {
            let shifted = g + CanonicalGame::from_integer(i64::from(shift));
            (-g).temperature() == g.temperature() && shifted.temperature() == g.temperature()
        }
        QuickCheck::new().quickcheck(test as fn(CanonicalGame, i8) -> bool);
    }

    #[test]
    fn frozen_game_is_infinitesimally_close_to_mean() {
        fn test(g: CanonicalGame) -> bool {
            (g.freeze() - CanonicalGame::from_dyadic(g.mean())).is_infinitesimal()
        }
        QuickCheck::new().quickcheck(test as fn(CanonicalGame) -> bool);
    }

    #[test]
    fn orthodox_form_keeps_hot_thermograph() {
        fn test(g: CanonicalGame) -> bool {
            if g.temperature() <= DyadicRational::ZERO {
                return true;
            }
            let orthodox = g.orthodox_form();
            orthodox.mean() == g.mean() && orthodox.temperature() == g.temperature()
        }
        QuickCheck::new().quickcheck(test as fn(CanonicalGame) -> bool);
    }
}
