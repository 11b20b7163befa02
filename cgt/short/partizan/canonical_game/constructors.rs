//! Named families of games: tinies, minies, uptimals and superstars

use crate::{Error, numeric::nimber::Nimber, short::partizan::canonical_game::CanonicalGame};
use itertools::Itertools;

impl CanonicalGame {
    /// Tiny-`G`, the game `{0 || 0 | -G}`
    pub fn from_tiny(subscript: Self) -> Self {
        let zero = Self::zero();
        Self::from_options(
            vec![zero],
            vec![Self::from_options(vec![zero], vec![subscript.inverse()])],
        )
    }

    /// Miny-`G`, the game `{G | 0 || 0}`
    pub fn from_miny(subscript: Self) -> Self {
        let zero = Self::zero();
        Self::from_options(
            vec![Self::from_options(vec![subscript], vec![zero])],
            vec![zero],
        )
    }

    /// Right option `H` of a game of the form `{0|H}`
    fn zero_slash_right(self) -> Result<Self, Error> {
        match (self.left_options(), self.right_options()) {
            ([left], [right]) if left.is_zero() => Ok(*right),
            _ => Err(Error::NotZeroSlashForm(self.to_string())),
        }
    }

    /// `G^n` for `G = {0|H}`: `G^0 = -H` and `G^n = {0 | H - G^(->n-1)}`
    ///
    /// # Errors
    /// - `base` is not of the form `{0|H}`
    pub fn from_g_nth(base: Self, n: u32) -> Result<Self, Error> {
        let right = base.zero_slash_right()?;
        if n == 0 {
            return Ok(right.inverse());
        }

        let previous = Self::from_g_to_nth(base, n - 1)?;
        Ok(Self::from_options(vec![Self::zero()], vec![right - previous]))
    }

    /// `G^(->n)` for `G = {0|H}`: `G^(->0) = 0` and `G^(->n) = {G^(->n-1) | H}`
    ///
    /// # Errors
    /// - `base` is not of the form `{0|H}`
    pub fn from_g_to_nth(base: Self, n: u32) -> Result<Self, Error> {
        let right = base.zero_slash_right()?;
        let mut result = Self::zero();
        for _ in 0..n {
            result = Self::from_options(vec![result], vec![right]);
        }
        Ok(result)
    }

    /// Superstar `{0, *, ..., *m | *a, *b, ...}` where `m = mex{a, b, ...}`
    ///
    /// # Errors
    /// - `exponents` is empty
    pub fn from_superstar(exponents: &[u32]) -> Result<Self, Error> {
        if exponents.is_empty() {
            return Err(Error::EmptyExponents);
        }

        let right_nimbers = exponents
            .iter()
            .copied()
            .map(Nimber::new)
            .sorted()
            .dedup()
            .collect::<Vec<_>>();
        let mex = Nimber::mex(right_nimbers.clone());

        let left = (0..=mex.value())
            .map(|k| Self::from_nimber(Nimber::new(k)))
            .collect();
        let right = right_nimbers.into_iter().map(Self::from_nimber).collect();
        Ok(Self::from_canonical_options(left, right))
    }

    /// Split `x + Tiny(G) = {x || x | x - G}` into the number `x` and the subscript `G`
    pub fn tiny_parts(self) -> Option<(Self, Self)> {
        let ([offset], [right]) = (self.left_options(), self.right_options()) else {
            return None;
        };
        let number = offset.to_number()?;
        let ([right_left], [right_right]) = (right.left_options(), right.right_options()) else {
            return None;
        };

        (right_left == offset && right_right.left_stop().value() < number)
            .then(|| (*offset, (*right_right - *offset).inverse()))
    }

    /// Split `x + Miny(G) = {x + G | x || x}` into the number `x` and the subscript `G`
    pub fn miny_parts(self) -> Option<(Self, Self)> {
        let ([left], [offset]) = (self.left_options(), self.right_options()) else {
            return None;
        };
        let number = offset.to_number()?;
        let ([left_left], [left_right]) = (left.left_options(), left.right_options()) else {
            return None;
        };

        (left_right == offset && left_left.right_stop().value() > number)
            .then(|| (*offset, *left_left - *offset))
    }

    /// Check if the game is a number plus a tiny
    pub fn is_number_tiny(self) -> bool {
        self.tiny_parts().is_some()
    }

    /// Check if the game is a number plus a miny
    pub fn is_number_miny(self) -> bool {
        self.miny_parts().is_some()
    }

    /// Check if every left option is the negative of a right option, with as many options on
    /// both sides
    pub fn is_switch(self) -> bool {
        let right = self.right_options();
        self.left_options().len() == right.len()
            && self
                .left_options()
                .iter()
                .all(|gl| right.contains(&gl.inverse()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn game(s: &str) -> CanonicalGame {
        CanonicalGame::from_str(s).unwrap()
    }

    #[test]
    fn tiny_and_miny() {
        let two = CanonicalGame::two();
        let tiny = CanonicalGame::from_tiny(two);
        let miny = CanonicalGame::from_miny(two);
        assert_eq!(tiny.to_string(), "Tiny(2)");
        assert_eq!(miny.to_string(), "Miny(2)");
        assert_eq!(tiny, game("{0|{0|-2}}"));
        assert_eq!(-tiny, miny);
        assert!((tiny + miny).is_zero());
        assert!(CanonicalGame::zero() < tiny && tiny < CanonicalGame::up());
    }

    #[test]
    fn number_tiny_parts() {
        let g = game("1/2Tiny(3)");
        assert_eq!(g.tiny_parts(), Some((game("1/2"), game("3"))));
        assert!(g.is_number_tiny());
        assert!(!g.is_number_miny());
        assert_eq!(g, game("{1/2|{1/2|-5/2}}"));

        let g = game("-1Miny(1/2)");
        assert_eq!(g.miny_parts(), Some((game("-1"), game("1/2"))));
        assert!(g.is_number_miny());
        assert!(!g.is_number_tiny());

        assert!(!game("{1|-1}").is_number_tiny());
        assert!(!game("{0|{0|1}}").is_number_tiny());
    }

    #[test]
    fn uptimals() {
        let up = CanonicalGame::up();
        assert_eq!(CanonicalGame::from_g_nth(up, 0), Ok(CanonicalGame::star()));
        assert_eq!(CanonicalGame::from_g_nth(up, 1), Ok(up));
        assert_eq!(CanonicalGame::from_g_nth(up, 2), Ok(game("{0|v*}")));

        assert_eq!(CanonicalGame::from_g_to_nth(up, 0), Ok(CanonicalGame::zero()));
        assert_eq!(CanonicalGame::from_g_to_nth(up, 1), Ok(up));
        assert_eq!(
            CanonicalGame::from_g_to_nth(up, 2).unwrap(),
            up + CanonicalGame::from_g_nth(up, 2).unwrap()
        );
        assert_eq!(CanonicalGame::from_g_to_nth(up, 2), Ok(game("{^|*}")));
    }

    #[test]
    fn uptimals_require_zero_slash_form() {
        assert_eq!(
            CanonicalGame::from_g_nth(game("{1|-1}"), 1),
            Err(Error::NotZeroSlashForm("{1|-1}".to_owned()))
        );
        assert_eq!(
            CanonicalGame::from_g_to_nth(game("^*"), 3),
            Err(Error::NotZeroSlashForm("^*".to_owned()))
        );
    }

    #[test]
    fn superstars() {
        assert_eq!(CanonicalGame::from_superstar(&[1]), Ok(CanonicalGame::up()));
        assert_eq!(CanonicalGame::from_superstar(&[0]), Ok(CanonicalGame::up_star()));
        assert_eq!(
            CanonicalGame::from_superstar(&[2, 2, 0]).map(|g| g.to_string()),
            Ok("{0, *|0, *2}".to_owned())
        );
        assert_eq!(
            CanonicalGame::from_superstar(&[]),
            Err(Error::EmptyExponents)
        );
    }

    #[test]
    fn switches() {
        assert!(game("{1|-1}").is_switch());
        assert!(game("{2|-2}").is_switch());
        assert!(game("*").is_switch());
        assert!(!game("{2|-1}").is_switch());
        assert!(!game("^").is_switch());
    }
}
