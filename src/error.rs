//! The error taxonomy for expression parsing.

use derive_more::Display;

/// A single flat taxonomy of everything that can go wrong while parsing an
/// expression or a literal.
///
/// Every decoder and the expression parser fail locally with one of these
/// kinds plus a short context string (the offending token). Parsing does not
/// recover: the first error short-circuits the entire parse, and there is no
/// silent coercion.
#[derive(Clone, Debug, Display, PartialEq, Eq)]
#[display("{kind} at byte {at}: {context}")]
pub struct ParseError {
    /// The kind of failure.
    pub kind: ErrorKind,
    /// The offending token or a short description of it.
    pub context: String,
    /// The byte offset into the original input where the error was detected.
    pub at: usize,
}

impl std::error::Error for ParseError {}

impl ParseError {
    /// Constructs a new parse error.
    pub fn new(kind: ErrorKind, context: impl Into<String>, at: usize) -> Self {
        ParseError {
            kind,
            context: context.into(),
            at,
        }
    }
}

/// The kind of a [`ParseError`].
#[derive(Clone, Copy, Debug, Display, PartialEq, Eq)]
pub enum ErrorKind {
    /// No non-whitespace content.
    #[display("empty input")]
    EmptyInput,
    /// A grammar violation, unbalanced parentheses, or trailing garbage.
    #[display("syntax error")]
    SyntaxError,
    /// A literal's shape is malformed for the chosen base.
    #[display("invalid number format")]
    InvalidNumberFormat,
    /// A character is not in the base alphabet.
    #[display("invalid base digit")]
    InvalidBaseDigit,
    /// `0<letter>` with a letter not in the prefix registry (and not `e`/`E`).
    #[display("invalid prefix")]
    InvalidPrefix,
    /// The legacy `value[base]` bracket-base notation.
    #[display("deprecated bracket base notation")]
    DeprecatedBracketBase,
    /// A literal `/0`, division by a point interval of zero, or rational
    /// division whose right side reduces to zero.
    #[display("division by zero")]
    DivisionByZero,
    /// An interval divisor straddles zero.
    #[display("interval division by zero")]
    IntervalDivisionByZero,
    /// `0^0` in any form.
    #[display("zero to the power of zero")]
    ZeroToZero,
    /// `n!` or `n!!` with `n < 0` or non-integer.
    #[display("factorial of a negative or non-integer value")]
    NegativeFactorial,
    /// A transcendental function called outside its domain.
    #[display("domain error")]
    DomainError,
    /// An unsupported composition of syntax, e.g. `E` inside an uncertainty
    /// center, nested intervals, or `E` after a bare fraction/mixed number.
    #[display("unsupported composition of syntax")]
    UnsupportedComposition,
}

/// A convenience alias for results produced while parsing.
pub type Result<T> = std::result::Result<T, ParseError>;
