//! Comparison and arithmetic on canonical games

use crate::short::partizan::{
    Player,
    canonical_game::{CanonicalGame, simplify::Moves},
    universe::{self, Operation, OperationKey},
};

impl CanonicalGame {
    /// Less than or equals comparison on two games
    pub fn leq(self, rhs: Self) -> bool {
        if self == rhs {
            return true;
        }

        if let (Some(lhs_nus), Some(rhs_nus)) = (self.nus(), rhs.nus()) {
            return lhs_nus.leq(rhs_nus);
        }

        // Number avoidance: options of a number never need to be inspected
        if !self.is_number() && self.left_options().iter().any(|gl| rhs.leq(*gl)) {
            return false;
        }

        if !rhs.is_number() && rhs.right_options().iter().any(|hr| hr.leq(self)) {
            return false;
        }

        true
    }

    /// Negative of the game. Computed at most once per game and remembered on both sides.
    pub fn inverse(self) -> Self {
        let node = self.node();
        if let Some(inverse) = node.inverse.get() {
            return *inverse;
        }

        let inverse = match self.nus() {
            Some(nus) => Self::from_nus(-nus),
            None => Self::from_canonical_options(
                self.right_options().iter().map(|gr| gr.inverse()).collect(),
                self.left_options().iter().map(|gl| gl.inverse()).collect(),
            ),
        };

        let inverse = *node.inverse.get_or_init(|| inverse);
        if inverse != self {
            // Already set if another thread got there first
            let _ = inverse.node().inverse.set(self);
        }
        inverse
    }

    /// Sum of two games
    pub fn plus(self, rhs: Self) -> Self {
        if let (Some(lhs_nus), Some(rhs_nus)) = (self.nus(), rhs.nus()) {
            return Self::from_nus(lhs_nus + rhs_nus);
        }

        if self.is_zero() {
            return rhs;
        }
        if rhs.is_zero() {
            return self;
        }

        let universe = universe::global();
        let key = OperationKey::binary(Operation::Sum, self, rhs);
        if let Some(result) = universe.operation(&key) {
            return result;
        }

        let sum_options = |player: Player| {
            let mut options = Vec::new();
            if !self.is_number() {
                options.extend(self.options(player).iter().map(|g| g.plus(rhs)));
            }
            if !rhs.is_number() {
                options.extend(rhs.options(player).iter().map(|h| self.plus(*h)));
            }
            options
        };

        let result = Self::from_options(sum_options(Player::Left), sum_options(Player::Right));
        universe.insert_operation(key, result)
    }

    /// Difference of two games
    #[inline]
    pub fn minus(self, rhs: Self) -> Self {
        self.plus(rhs.inverse())
    }

    /// Norton product of the game by a `unit`
    ///
    /// Integer multiples are repeated sums of the unit. Otherwise
    /// `G.U = {GL.U + U + I | GR.U - (U + I)}` where `I` ranges over the incentives of `U`.
    pub fn norton_product(self, unit: Self) -> Self {
        if let Some(multiple) = self.to_integer() {
            let mut power = if multiple < 0 { unit.inverse() } else { unit };
            let mut remaining = multiple.unsigned_abs();
            let mut result = Self::zero();
            while remaining > 0 {
                if remaining & 1 == 1 {
                    result += power;
                }
                remaining >>= 1;
                if remaining > 0 {
                    power += power;
                }
            }
            return result;
        }

        let universe = universe::global();
        let key = OperationKey::binary(Operation::NortonProduct, self, unit);
        if let Some(result) = universe.operation(&key) {
            return result;
        }

        let shifted_units = unit
            .incentives()
            .into_iter()
            .map(|incentive| unit + incentive)
            .collect::<Vec<_>>();

        let mut left = Vec::with_capacity(self.left_options().len() * shifted_units.len());
        for gl in self.left_options() {
            let product = gl.norton_product(unit);
            left.extend(shifted_units.iter().map(|shifted| product + shifted));
        }

        let mut right = Vec::with_capacity(self.right_options().len() * shifted_units.len());
        for gr in self.right_options() {
            let product = gr.norton_product(unit);
            right.extend(shifted_units.iter().map(|shifted| product - shifted));
        }

        let result = Self::from_options(left, right);
        universe.insert_operation(key, result)
    }

    /// Conway product of two games
    ///
    /// With `P(A, B) = A.H + G.B - A.B` the options are
    /// `{P(GL, HL), P(GR, HR) | P(GL, HR), P(GR, HL)}`.
    pub fn conway_product(self, rhs: Self) -> Self {
        if self.is_integer() {
            return self.norton_product(rhs);
        }
        if rhs.is_integer() {
            return rhs.norton_product(self);
        }

        let universe = universe::global();
        let key = OperationKey::binary(Operation::ConwayProduct, self, rhs);
        if let Some(result) = universe.operation(&key) {
            return result;
        }

        let partial = |a: Self, b: Self| {
            a.conway_product(rhs) + self.conway_product(b) - a.conway_product(b)
        };
        let quadrant = |g_options: &[Self], h_options: &[Self], acc: &mut Vec<Self>| {
            for a in g_options {
                for b in h_options {
                    acc.push(partial(*a, *b));
                }
            }
        };

        let mut left = Vec::new();
        quadrant(self.left_options(), rhs.left_options(), &mut left);
        quadrant(self.right_options(), rhs.right_options(), &mut left);

        let mut right = Vec::new();
        quadrant(self.left_options(), rhs.right_options(), &mut right);
        quadrant(self.right_options(), rhs.left_options(), &mut right);

        let result = Self::from_options(left, right);
        universe.insert_operation(key, result)
    }

    /// Remove duplicated incentives and keep only the largest ones
    fn prune_incentives(mut incentives: Vec<Self>) -> Vec<Self> {
        Moves::eliminate_duplicates_in(&mut incentives);
        Moves::eliminate_dominated(&mut incentives, Player::Left);
        incentives
    }

    /// Dominant incentives `GL - G` of Left moves
    pub fn left_incentives(self) -> Vec<Self> {
        Self::prune_incentives(self.left_options().iter().map(|gl| *gl - self).collect())
    }

    /// Dominant incentives `G - GR` of Right moves
    pub fn right_incentives(self) -> Vec<Self> {
        Self::prune_incentives(self.right_options().iter().map(|gr| self - gr).collect())
    }

    /// Dominant incentives of both players
    pub fn incentives(self) -> Vec<Self> {
        let mut incentives = self.left_incentives();
        incentives.extend(self.right_incentives());
        Self::prune_incentives(incentives)
    }

    /// Ordinal sum `G:H = {GL, G:HL | GR, G:HR}`
    ///
    /// Unlike the disjunctive sum, the result depends on the form of `G`, here its canonical form.
    pub fn ordinal_sum(self, rhs: Self) -> Self {
        if rhs.is_zero() {
            return self;
        }

        let universe = universe::global();
        let key = OperationKey::binary(Operation::OrdinalSum, self, rhs);
        if let Some(result) = universe.operation(&key) {
            return result;
        }

        let ordinal_options = |player: Player| {
            self.options(player)
                .iter()
                .copied()
                .chain(rhs.options(player).iter().map(|h| self.ordinal_sum(*h)))
                .collect::<Vec<_>>()
        };

        let result =
            Self::from_options(ordinal_options(Player::Left), ordinal_options(Player::Right));
        universe.insert_operation(key, result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::numeric::dyadic_rational::DyadicRational;
    use quickcheck::QuickCheck;
    use std::str::FromStr;

    fn game(s: &str) -> CanonicalGame {
        CanonicalGame::from_str(s).unwrap()
    }

    #[test]
    fn switch_is_confused_with_zero() {
        let switch = game("{1|-1}");
        assert!(!switch.leq(CanonicalGame::zero()));
        assert!(!CanonicalGame::zero().leq(switch));
        assert!(switch.leq(game("2")));
        assert!(game("-2").leq(switch));
    }

    #[test]
    fn inverse_is_remembered_both_ways() {
        let g = game("{3|{2|-1}}");
        let negative = g.inverse();
        assert_eq!(negative, game("{{1|-2}|-3}"));
        assert_eq!(g.node().inverse.get(), Some(&negative));
        assert_eq!(negative.node().inverse.get(), Some(&g));
    }

    #[test]
    fn number_translates_options() {
        assert_eq!(game("1/2") + game("{1|-1}"), game("{3/2|-1/2}"));
        assert_eq!(game("{1|-1}") - game("1/2"), game("{1/2|-3/2}"));
        assert_eq!(game("^") + game("*"), game("^*"));
    }

    #[test]
    fn integer_norton_product() {
        assert_eq!(game("3").norton_product(game("^")), game("^3"));
        assert_eq!(game("-2").norton_product(game("^*")), game("v2"));
        assert_eq!(game("0").norton_product(game("{1|-1}")), CanonicalGame::zero());
        assert_eq!(
            game("5").norton_product(game("{1|-1}")),
            (0..5).map(|_| game("{1|-1}")).sum::<CanonicalGame>()
        );
    }

    #[test]
    fn norton_product_by_one_is_identity() {
        fn test(g: CanonicalGame) -> bool {
            g.norton_product(CanonicalGame::one()) == g
        }
        QuickCheck::new()
            .tests(30)
            .quickcheck(test as fn(CanonicalGame) -> bool);
    }

    #[test]
    fn conway_product_of_numbers() {
        assert_eq!(game("2").conway_product(game("3")), game("6"));
        assert_eq!(game("1/2").conway_product(game("1/2")), game("1/4"));
        assert_eq!(game("3/2").conway_product(game("-1/2")), game("-3/4"));
        assert_eq!(game("^").conway_product(game("1")), game("^"));
    }

    #[test]
    fn conway_product_commutes_on_numbers() {
        fn test(a: i8, b: i8) -> bool {
            let a = CanonicalGame::from_dyadic(DyadicRational::new(i64::from(a % 8), 1));
            let b = CanonicalGame::from_dyadic(DyadicRational::new(i64::from(b % 8), 2));
            a.conway_product(b) == b.conway_product(a)
        }
        QuickCheck::new()
            .tests(20)
            .quickcheck(test as fn(i8, i8) -> bool);
    }

    #[test]
    fn incentives_of_switch_and_number() {
        let switch = game("{1|-1}");
        assert_eq!(switch.left_incentives(), vec![game("{2|0}")]);
        assert_eq!(switch.right_incentives(), vec![game("{2|0}")]);
        assert_eq!(switch.incentives(), vec![game("{2|0}")]);

        assert_eq!(game("1/2").incentives(), vec![game("-1/2")]);
        assert_eq!(game("^").incentives(), vec![game("^*")]);
    }

    #[test]
    fn ordinal_sums() {
        assert_eq!(game("1").ordinal_sum(game("1")), game("2"));
        assert_eq!(game("1").ordinal_sum(game("-1")), game("1/2"));
        assert_eq!(game("*").ordinal_sum(game("1")), game("^*"));
        assert_eq!(game("{1|-1}").ordinal_sum(CanonicalGame::zero()), game("{1|-1}"));
    }
}
