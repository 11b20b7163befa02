//! Parsing utilities

/// Implement [`std::str::FromStr`] using parser. Type must have `parse` method implemented.
macro_rules! impl_from_str_via_parser {
    ($t: ident) => {
        impl std::str::FromStr for $t {
            type Err = $crate::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match $t::parse($crate::parsing::Parser::new(s)) {
                    Some((p, result)) if p.input.is_empty() => Ok(result),
                    Some(_) => Err($crate::Error::Parse("leftover input")),
                    None => Err($crate::Error::Parse("parser failed")),
                }
            }
        }
    };
}
pub(crate) use impl_from_str_via_parser;

/// Unwrap an [`Option`] or return [`None`] from the enclosing parser
macro_rules! try_option {
    ($e:expr) => {
        match $e {
            Some(v) => v,
            None => return None,
        }
    };
}
pub(crate) use try_option;

/// Run parser `$f` with whitespace trimmed on both sides
macro_rules! lexeme {
    ($p:expr, $f:expr) => {{
        let p = $p.trim_whitespace();
        match $f(p) {
            None => None,
            Some((p, val)) => Some((p.trim_whitespace(), val)),
        }
    }};
}
pub(crate) use lexeme;

#[must_use]
#[derive(Debug, Clone, Copy)]
/// Backtracking string parser. Each step consumes a prefix and returns the remaining input.
pub struct Parser<'s> {
    /// Remaining unparsed input
    pub input: &'s str,
}

impl<'s> Parser<'s> {
    /// Create new parser marking the beginning of the input
    pub const fn new(input: &'s str) -> Parser<'s> {
        Parser { input }
    }

    /// Remove whitespace from the beginning of the input
    pub fn trim_whitespace(self) -> Parser<'s> {
        Parser {
            input: self.input.trim_start(),
        }
    }

    /// Parse one ascii char if input is non-empty
    pub fn parse_any_ascii_char(self) -> Option<(Parser<'s>, char)> {
        let c = self.input.chars().next().filter(char::is_ascii)?;
        Some((
            Parser {
                input: &self.input[1..],
            },
            c,
        ))
    }

    /// Parse one ascii char if input is non-empty and it matches the `expected`
    pub fn parse_ascii_char(self, expected: char) -> Option<Parser<'s>> {
        match self.parse_any_ascii_char() {
            Some((p, c)) if c == expected => Some(p),
            _ => None,
        }
    }

    /// Parse exact `literal` at the beginning of the input
    pub fn parse_literal(self, literal: &str) -> Option<Parser<'s>> {
        self.input
            .strip_prefix(literal)
            .map(|input| Parser { input })
    }

    /// Split off the longest prefix of ascii digits, failing on an empty prefix
    fn take_digits(self) -> Option<(Parser<'s>, &'s str)> {
        let end = self
            .input
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(self.input.len());
        (end != 0).then(|| {
            (
                Parser {
                    input: &self.input[end..],
                },
                &self.input[..end],
            )
        })
    }

    /// Parse signed number
    pub fn parse_i64(self) -> Option<(Parser<'s>, i64)> {
        let (p, minus) = match self.parse_ascii_char('-') {
            Some(p) => (p, true),
            None => (self, false),
        };
        let (p, digits) = try_option!(p.take_digits());
        let magnitude: i64 = try_option!(digits.parse().ok());
        Some((p, if minus { -magnitude } else { magnitude }))
    }

    /// Parse unsigned number
    pub fn parse_u32(self) -> Option<(Parser<'s>, u32)> {
        let (p, digits) = try_option!(self.take_digits());
        Some((p, try_option!(digits.parse().ok())))
    }

    /// Parse unsigned 64-bit number
    pub fn parse_u64(self) -> Option<(Parser<'s>, u64)> {
        let (p, digits) = try_option!(self.take_digits());
        Some((p, try_option!(digits.parse().ok())))
    }
}
