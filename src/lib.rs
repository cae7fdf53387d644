//! An exact rational and interval arithmetic expression parser.
//!
//! Accepts a single textual expression mixing integers, fractions, mixed
//! numbers, decimals (terminating and repeating), intervals with several
//! uncertainty notations, continued fractions, base-aware scientific
//! notation in arbitrary integer bases, and standard arithmetic,
//! factorial and exponentiation operators, and returns an exact
//! [`Value`]: an [`Integer`](rug::Integer), a [`numeric::Rational`], or a
//! closed [`numeric::Interval`] with exact rational endpoints.
//!
//! The entry point is [`parse`]; [`ParserOptions`] governs type-aware
//! promotion, the input base, and transcendental precision.

pub mod base;
pub mod decode;
pub mod error;
pub mod numeric;
pub mod options;
mod parser;
pub mod promote;
mod scan;
mod sentinel;
pub mod template;
#[cfg(test)]
mod tests;
pub mod value;

pub use error::{ErrorKind, ParseError};
pub use numeric::parse_continued_fraction;
pub use options::ParserOptions;
pub use value::{Value, ValueFlag};

/// Parses `expression` under `opts`, returning the tagged [`Value`] it
/// reduces to, or the first [`ParseError`] encountered.
///
/// ```
/// use ratex::{parse, ParserOptions, Value};
///
/// let value = parse("3/4 + 1/4", &ParserOptions::default()).unwrap();
/// assert_eq!(value, Value::integer(1));
/// ```
pub fn parse(expression: &str, opts: &ParserOptions) -> Result<Value, ParseError> {
    parser::parse(expression, opts)
}
