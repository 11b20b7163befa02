//! Canonical forms of short partizan games.
//!
//! Every game value constructed through [`CanonicalGame`](crate::short::partizan::canonical_game::CanonicalGame)
//! is kept in a process-wide [universe](crate::short::partizan::universe) that hands out exactly
//! one copyable handle per distinct value. On top of it the crate provides
//! [comparison and arithmetic](crate::short::partizan::canonical_game::CanonicalGame::leq),
//! [thermography](crate::short::partizan::thermograph::Thermograph) and
//! [atomic weights](crate::short::partizan::canonical_game::CanonicalGame::atomic_weight).

#![warn(missing_docs)]

pub mod error;
pub mod numeric;
pub mod parsing;
pub mod short;

mod display;

pub use error::Error;
