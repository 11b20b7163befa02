//! Atomic weight of infinitesimals

use crate::{
    Error,
    numeric::{dyadic_rational::DyadicRational, nimber::Nimber},
    short::partizan::{
        canonical_game::CanonicalGame,
        stop::StopType,
        universe::{self, Operation, OperationKey},
    },
};

impl CanonicalGame {
    /// A remote star of game `g` is a nimber `*N` if no position of `g` including `g` has value
    /// `*N`. This returns the order `N` of such a nimber.
    pub fn far_star(self) -> Nimber {
        if let Some(nus) = self.nus()
            && nus.is_nimber()
        {
            return Nimber::new(nus.nimber().value() + 1);
        }

        self.left_options()
            .iter()
            .chain(self.right_options())
            .map(|option| option.far_star())
            .fold(Nimber::STAR, Nimber::max)
    }

    /// Check if every position of the game has either no options or options for both players
    pub fn is_all_small(self) -> bool {
        match self.nus() {
            Some(nus) => nus.number() == DyadicRational::ZERO,
            None => self
                .left_options()
                .iter()
                .chain(self.right_options())
                .all(|option| option.is_all_small()),
        }
    }

    /// Check if the game is smaller than every positive number and larger than every negative
    pub fn is_infinitesimal(self) -> bool {
        match self.nus() {
            Some(nus) => nus.number() == DyadicRational::ZERO,
            None => {
                self.left_stop().value().eq_integer(0) && self.right_stop().value().eq_integer(0)
            }
        }
    }

    fn naive_atomic_weight(self) -> Self {
        if let Some(nus) = self.nus() {
            return Self::from_integer(i64::from(nus.up_multiple()));
        }

        let universe = universe::global();
        let key = OperationKey::unary(Operation::AtomicWeight, self);
        if let Some(result) = universe.operation(&key) {
            return result;
        }

        let left = self
            .left_options()
            .iter()
            .map(|gl| gl.naive_atomic_weight() + Self::minus_two())
            .collect::<Vec<_>>();
        let right = self
            .right_options()
            .iter()
            .map(|gr| gr.naive_atomic_weight() + Self::two())
            .collect::<Vec<_>>();
        let candidate = Self::from_options(left.clone(), right.clone());

        let result = if candidate.is_integer() {
            let far_star = Self::from_nimber(self.far_star());
            let leq_far_star = self.leq(far_star);
            let geq_far_star = far_star.leq(self);

            if leq_far_star && !geq_far_star {
                // Least integer n such that n |> GL for every shifted left option GL
                left.iter()
                    .map(|gl| {
                        let stop = gl.right_stop();
                        match stop.value().to_integer() {
                            Some(n) if stop.kind() == StopType::Right => n + 1,
                            _ => stop.value().ceil(),
                        }
                    })
                    .max()
                    .map_or(Self::zero(), Self::from_integer)
            } else if geq_far_star && !leq_far_star {
                // Greatest integer n such that n <| GR for every shifted right option GR
                right
                    .iter()
                    .map(|gr| {
                        let stop = gr.left_stop();
                        match stop.value().to_integer() {
                            Some(n) if stop.kind() == StopType::Left => n - 1,
                            _ => stop.value().floor(),
                        }
                    })
                    .min()
                    .map_or(Self::zero(), Self::from_integer)
            } else {
                candidate
            }
        } else {
            candidate
        };

        universe.insert_operation(key, result)
    }

    /// Atomic weight of a position, sometimes called "uppitiness"
    ///
    /// For games that are infinitesimal but not all-small the result is checked to lie within a
    /// long kite of `G.^`. A failed check is reported to the
    /// [warning sink](crate::short::partizan::universe::set_warning_sink) and the computed value
    /// is still returned.
    ///
    /// # Errors
    /// - Game is not infinitesimal
    pub fn atomic_weight(self) -> Result<Self, Error> {
        if self.is_all_small() {
            return Ok(self.naive_atomic_weight());
        }

        if !self.is_infinitesimal() {
            return Err(Error::NotInfinitesimal(self.to_string()));
        }

        let weight = self.naive_atomic_weight();
        let difference = self - weight.norton_product(Self::up());

        let red_kite = Self::from_nimber(self.far_star().enclosing_power_of_two())
            .ordinal_sum(Self::from_integer(-1));
        let tolerance = Self::up_star() + red_kite;

        if !(difference.leq(tolerance) && tolerance.inverse().leq(difference)) {
            tracing::debug!(game = %self, atomic_weight = %weight, "Long kite check failed");
            universe::warn("Atomic weight algorithm failed on a non-all-small game");
        }

        Ok(weight)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn game(s: &str) -> CanonicalGame {
        CanonicalGame::from_str(s).unwrap()
    }

    macro_rules! assert_atomic_weight_eq {
        ($inp:expr, $atomic:expr) => {
            let atomic = game($inp).atomic_weight().unwrap();
            assert_eq!(atomic.to_string(), game($atomic).to_string());
        };
    }

    #[test]
    fn atomic_weight() {
        assert_atomic_weight_eq!("*3", "0");
        assert_atomic_weight_eq!("^", "1");
        assert_atomic_weight_eq!("v", "-1");
        assert_atomic_weight_eq!("v2", "-2");
        assert_atomic_weight_eq!("^3*", "3");
        assert_atomic_weight_eq!("{^2|v}", "1/2");
        assert_atomic_weight_eq!("{^2|v2}", "*");
        assert_atomic_weight_eq!("{^3|v3}", "{1|-1}");
        assert_atomic_weight_eq!("{^2|*}", "1");
        assert_atomic_weight_eq!("{^2,{^|*}|*}", "1");
        assert_atomic_weight_eq!("{*|v2}", "-1");
    }

    #[test]
    fn atomic_weight_of_tiny() {
        assert_atomic_weight_eq!("Tiny(1)", "0");
    }

    #[test]
    fn atomic_weight_requires_infinitesimal() {
        assert_eq!(
            game("{1|-1}").atomic_weight(),
            Err(Error::NotInfinitesimal("{1|-1}".to_owned()))
        );
        assert_eq!(
            game("1/2*").atomic_weight(),
            Err(Error::NotInfinitesimal("1/2*".to_owned()))
        );
    }

    #[test]
    fn far_star() {
        assert_eq!(game("0").far_star(), Nimber::STAR);
        assert_eq!(game("*3").far_star(), Nimber::new(4));
        assert_eq!(game("^").far_star(), Nimber::new(2));
        assert_eq!(game("{*2|0}").far_star(), Nimber::new(3));
    }

    #[test]
    fn smallness() {
        assert!(game("^*").is_all_small());
        assert!(game("{^2|*}").is_all_small());
        assert!(!game("Tiny(1)").is_all_small());
        assert!(!game("1").is_all_small());

        assert!(game("0").is_infinitesimal());
        assert!(game("^").is_infinitesimal());
        assert!(game("Tiny(2)").is_infinitesimal());
        assert!(!game("1/2").is_infinitesimal());
        assert!(!game("{1|-1}").is_infinitesimal());
    }
}
