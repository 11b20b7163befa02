//! Shared formatting of option sets and lists

use itertools::Itertools;
use std::fmt::{self, Display, Write};

/// Write `xs` separated by `", "`
pub fn commas(w: &mut impl Write, xs: &[impl Display]) -> fmt::Result {
    write!(w, "{}", xs.iter().format(", "))
}

/// Write `xs` as `[a, b, ...]`
pub fn list(w: &mut impl Write, xs: &[impl Display]) -> fmt::Result {
    write!(w, "[")?;
    commas(w, xs)?;
    write!(w, "]")
}

/// Write a game in brace notation, `{a, b|c, d}`
pub fn options(w: &mut impl Write, left: &[impl Display], right: &[impl Display]) -> fmt::Result {
    write!(w, "{{")?;
    commas(w, left)?;
    write!(w, "|")?;
    commas(w, right)?;
    write!(w, "}}")
}

/// Write `name(body)`
pub fn call<W>(w: &mut W, name: &str, body: impl FnOnce(&mut W) -> fmt::Result) -> fmt::Result
where
    W: Write,
{
    write!(w, "{}(", name)?;
    body(w)?;
    write!(w, ")")
}
