//! Exact rational numbers.

use std::cmp::Ordering;
use std::fmt;

use rug::Integer;
use rug::ops::Pow;

/// An exact rational number, always reduced to lowest terms with a
/// positive denominator.
///
/// This wraps [`rug::Rational`], which already maintains the "reduced,
/// `q > 0`" invariant on every construction and arithmetic operation, so
/// this type adds only the operations §6 of the specification asks for
/// (`pow` with a bigint exponent, the lossy `f64` preview, and the exact
/// repeating-decimal string round-trip) without re-deriving GCD reduction
/// by hand.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Rational(rug::Rational);

impl Rational {
    /// Constructs a rational from a numerator and denominator, reducing to
    /// lowest terms. Panics if the denominator is zero; callers that may
    /// pass a zero denominator should check first (this mirrors
    /// `rug::Rational`'s own panic behavior and keeps `/0` detection in the
    /// caller, where the distinct `DivisionByZero` error kind belongs).
    pub fn new(numer: Integer, denom: Integer) -> Self {
        Rational(rug::Rational::from((numer, denom)))
    }

    /// Constructs a rational equal to the given integer.
    pub fn from_integer(z: Integer) -> Self {
        Rational(rug::Rational::from(z))
    }

    /// The rational zero, `0/1`.
    pub fn zero() -> Self {
        Rational(rug::Rational::new())
    }

    /// The rational one, `1/1`.
    pub fn one() -> Self {
        Rational::from_integer(Integer::from(1))
    }

    /// The numerator, in lowest terms.
    pub fn numer(&self) -> &Integer {
        self.0.numer()
    }

    /// The denominator, in lowest terms; always positive.
    pub fn denom(&self) -> &Integer {
        self.0.denom()
    }

    /// Whether this rational is an integer, i.e. its denominator is 1.
    pub fn is_integer(&self) -> bool {
        *self.denom() == 1
    }

    /// Converts this rational to an integer, if it is one.
    pub fn to_integer(&self) -> Option<Integer> {
        self.is_integer().then(|| self.numer().clone())
    }

    /// Returns whether this rational is zero.
    pub fn is_zero(&self) -> bool {
        *self.numer() == 0
    }

    /// Returns whether this rational is negative.
    pub fn is_negative(&self) -> bool {
        *self.numer() < 0
    }

    /// The additive inverse.
    pub fn negate(&self) -> Self {
        Rational(-self.0.clone())
    }

    /// The absolute value.
    pub fn abs(&self) -> Self {
        Rational(self.0.clone().abs())
    }

    /// Sum of `self` and `other`.
    pub fn add(&self, other: &Self) -> Self {
        Rational(self.0.clone() + &other.0)
    }

    /// Difference `self - other`.
    pub fn sub(&self, other: &Self) -> Self {
        Rational(self.0.clone() - &other.0)
    }

    /// Product of `self` and `other`.
    pub fn mul(&self, other: &Self) -> Self {
        Rational(self.0.clone() * &other.0)
    }

    /// Quotient `self / other`. Returns `None` if `other` is zero.
    pub fn div(&self, other: &Self) -> Option<Self> {
        if other.is_zero() {
            return None;
        }
        Some(Rational(self.0.clone() / &other.0))
    }

    /// Raises this rational to an integer power. `exp` may be negative
    /// (for nonzero `self`) or zero (yielding 1, including for `self ==
    /// 0`, since the `0^0` special case is handled by the caller, not
    /// here).
    pub fn pow(&self, exp: i64) -> Option<Self> {
        if exp >= 0 {
            Some(Rational(self.0.clone().pow(exp as u32)))
        } else if self.is_zero() {
            None
        } else {
            Some(Rational(
                self.0.clone().pow(exp.unsigned_abs() as u32).recip(),
            ))
        }
    }

    /// A lossy `f64` preview of this rational's value.
    pub fn to_f64(&self) -> f64 {
        self.0.to_f64()
    }

    /// Whether this rational's denominator has only 2 and 5 as prime
    /// factors, i.e. it has a terminating decimal expansion.
    pub fn has_terminating_decimal(&self) -> bool {
        let mut d = self.denom().clone().abs();
        for p in [2u32, 5] {
            while d.clone() % p == 0 {
                d /= p;
            }
        }
        d == 1
    }

    /// Formats this rational as an exact repeating-decimal literal
    /// `integer.fractional#repeat` (base 10), the inverse of
    /// [`crate::decode::repeating::decode`]. `repeat` is `"0"` when the
    /// expansion terminates.
    pub fn to_repeating_decimal_string(&self) -> String {
        let negative = self.is_negative();
        let n = self.numer().clone().abs();
        let d = self.denom().clone();
        let int_part = n.clone() / d.clone();
        let mut remainder = n - &int_part * &d;

        let mut seen = std::collections::HashMap::new();
        let mut digits = Vec::new();
        let mut pos = 0usize;
        let repeat_start = loop {
            if remainder == 0 {
                break None;
            }
            if let Some(&start) = seen.get(&remainder) {
                break Some(start);
            }
            seen.insert(remainder.clone(), pos);
            remainder *= 10;
            let digit = remainder.clone() / &d;
            digits.push(digit.to_string());
            remainder -= digit * &d;
            pos += 1;
        };

        let (fractional, repeat) = match repeat_start {
            None => (digits.join(""), "0".to_string()),
            Some(start) => (
                digits[..start].join(""),
                digits[start..].join(""),
            ),
        };

        let sign = if negative && (int_part != 0 || !fractional.is_empty() || repeat != "0") {
            "-"
        } else {
            ""
        };
        if fractional.is_empty() && repeat == "0" {
            format!("{sign}{int_part}")
        } else {
            format!("{sign}{int_part}.{fractional}#{repeat}")
        }
    }
}

impl PartialOrd for Rational {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.0.cmp(&other.0))
    }
}

impl Ord for Rational {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.cmp(&other.0)
    }
}

impl fmt::Display for Rational {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_integer() {
            write!(f, "{}", self.numer())
        } else {
            write!(f, "{}/{}", self.numer(), self.denom())
        }
    }
}

impl From<Integer> for Rational {
    fn from(z: Integer) -> Self {
        Rational::from_integer(z)
    }
}

impl From<i64> for Rational {
    fn from(n: i64) -> Self {
        Rational::from_integer(Integer::from(n))
    }
}
