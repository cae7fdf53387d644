//! The tagged value returned by parsing: exact integer, exact rational, or
//! closed rational interval.

use std::fmt;

use enumset::{EnumSet, EnumSetType};
use rug::Integer;

use crate::numeric::{Interval, Rational};

/// A provenance marker carried on a [`Value::Rational`] or
/// [`Value::Interval`], consulted only during the promotion step (never
/// during arithmetic itself).
#[derive(Debug, EnumSetType)]
pub enum ValueFlag {
    /// The interval was written with `:`, and must never be silently
    /// collapsed to a scalar.
    ExplicitInterval,
    /// The rational was written as `a/1`, and must not collapse to an
    /// integer.
    ExplicitFraction,
    /// The value is the result of a multiplicative power (`**`) or a
    /// transcendental, and must stay an interval regardless of width.
    SkipPromotion,
}

/// The parser's result type: a sum type dispatched on directly, not
/// through virtual calls, per the crate's tagged-value design.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Value {
    /// An arbitrary-precision signed integer.
    Integer(Integer),
    /// A rational reduced to lowest terms, with a positive denominator.
    Rational(Rational, EnumSet<ValueFlag>),
    /// A closed interval with exact rational endpoints, `lo <= hi`.
    Interval(Interval, EnumSet<ValueFlag>),
}

impl Value {
    /// Constructs an integer value.
    pub fn integer(z: impl Into<Integer>) -> Self {
        Value::Integer(z.into())
    }

    /// Constructs a plain (non-explicit) rational value.
    pub fn rational(r: Rational) -> Self {
        Value::Rational(r, EnumSet::empty())
    }

    /// Constructs a rational value carrying the given flags.
    pub fn rational_with(r: Rational, flags: EnumSet<ValueFlag>) -> Self {
        Value::Rational(r, flags)
    }

    /// Constructs a plain (non-explicit) interval value.
    pub fn interval(i: Interval) -> Self {
        Value::Interval(i, EnumSet::empty())
    }

    /// Constructs an interval value carrying the given flags.
    pub fn interval_with(i: Interval, flags: EnumSet<ValueFlag>) -> Self {
        Value::Interval(i, flags)
    }

    /// Returns the flags carried by this value, if any (`Integer` never
    /// carries flags).
    pub fn flags(&self) -> EnumSet<ValueFlag> {
        match self {
            Value::Integer(_) => EnumSet::empty(),
            Value::Rational(_, flags) | Value::Interval(_, flags) => *flags,
        }
    }

    /// Returns this value widened to an [`Interval`], for use inside
    /// operators that need a uniform representation before narrowing the
    /// result back down with [`crate::promote::promote`].
    pub fn as_interval(&self) -> Interval {
        match self {
            Value::Integer(z) => Interval::point(Rational::from_integer(z.clone())),
            Value::Rational(r, _) => Interval::point(r.clone()),
            Value::Interval(i, _) => i.clone(),
        }
    }

    /// Returns this value as an exact rational, if it is a point value
    /// (an `Integer` or `Rational`, or a point `Interval`).
    pub fn as_point_rational(&self) -> Option<Rational> {
        match self {
            Value::Integer(z) => Some(Rational::from_integer(z.clone())),
            Value::Rational(r, _) => Some(r.clone()),
            Value::Interval(i, _) if i.is_point() => Some(i.lo().clone()),
            Value::Interval(_, _) => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Integer(z) => write!(f, "{z}"),
            Value::Rational(r, _) => write!(f, "{r}"),
            Value::Interval(i, _) => write!(f, "{}:{}", i.lo(), i.hi()),
        }
    }
}
