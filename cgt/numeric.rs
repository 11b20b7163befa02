//! Numeric types used by game values and thermographs

pub mod dyadic_rational;
pub mod nimber;
pub mod rational;
