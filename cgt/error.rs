//! Errors reported by game construction and queries

use crate::numeric::dyadic_rational::DyadicRational;
use thiserror::Error;

/// Failure of a game or number operation.
///
/// Every variant is a rejected precondition: the offending input is reported back and no
/// cache is modified.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Denominator is zero or not a power of two
    #[error("{numerator}/{denominator} is not a dyadic rational")]
    NotDyadic {
        /// Rejected numerator
        numerator: i64,
        /// Rejected denominator
        denominator: u64,
    },

    /// Infinite value where a finite one is required
    #[error("value must be finite")]
    Infinite,

    /// Nimber order below zero
    #[error("nimber order must be non-negative, got {0}")]
    NegativeNimber(i64),

    /// Nimber order past the largest supported heap
    #[error("nimber order {0} is too large")]
    NimberTooLarge(i64),

    /// Operand is not of the form `{0|H}`
    #[error("game must be of the form {{0|H}}, got {0}")]
    NotZeroSlashForm(String),

    /// Superstar built from an empty exponent set
    #[error("superstar exponent set cannot be empty")]
    EmptyExponents,

    /// Number/up/nimber accessor used on a game that is not number-up-star
    #[error("{query} is undefined for {game}: not of the form number + up multiple + nimber")]
    NotNumberUpStar {
        /// Name of the rejected query
        query: &'static str,
        /// Game the query was called on
        game: String,
    },

    /// Cooling by a negative temperature
    #[error("cannot cool by negative temperature {0}")]
    NegativeTemperature(DyadicRational),

    /// Atomic weight of a game that is not infinitesimal
    #[error("atomic weight is undefined for {0}: game is not infinitesimal")]
    NotInfinitesimal(String),

    /// Id catalog lookup past the last constructed game
    #[error("no canonical game with id {0}")]
    UnknownId(usize),

    /// Textual input could not be parsed
    #[error("parse error: {0}")]
    Parse(&'static str),
}
