//! Closed rational intervals.

use super::rational::Rational;

/// A closed interval `[lo, hi]` with exact rational endpoints, `lo <= hi`.
///
/// The constructor swaps reversed endpoints rather than rejecting them, per
/// the specification's invariant that the user writing `b:a` with `b > a`
/// is equivalent to writing `a:b`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Interval {
    lo: Rational,
    hi: Rational,
}

/// An error from interval arithmetic.
#[derive(Clone, Copy, Debug, PartialEq, Eq, derive_more::Display)]
pub enum MathError {
    /// The divisor is the point interval zero.
    #[display("division by zero")]
    DivisionByZero,
    /// The divisor interval straddles zero without being the point zero.
    #[display("interval division by zero")]
    IntervalDivisionByZero,
    /// `0^0`.
    #[display("zero to the power of zero")]
    ZeroToZero,
}

impl Interval {
    /// Constructs the interval `[lo, hi]`, swapping the endpoints if `lo >
    /// hi` was given in reversed order.
    pub fn new(lo: Rational, hi: Rational) -> Self {
        if lo <= hi {
            Interval { lo, hi }
        } else {
            Interval { lo: hi, hi: lo }
        }
    }

    /// Constructs the point interval `[r, r]`.
    pub fn point(r: Rational) -> Self {
        Interval {
            lo: r.clone(),
            hi: r,
        }
    }

    /// The lower endpoint.
    pub fn lo(&self) -> &Rational {
        &self.lo
    }

    /// The upper endpoint.
    pub fn hi(&self) -> &Rational {
        &self.hi
    }

    /// Whether this is a point interval, i.e. `lo == hi`.
    pub fn is_point(&self) -> bool {
        self.lo == self.hi
    }

    /// Whether this interval contains zero (inclusive of the endpoints).
    pub fn contains_zero(&self) -> bool {
        (self.lo.is_negative() || self.lo.is_zero()) && (self.hi.is_zero() || !self.hi.is_negative())
    }

    /// Sum of two intervals: `[a.lo+b.lo, a.hi+b.hi]`.
    pub fn add(&self, other: &Self) -> Self {
        Interval::new(self.lo.add(&other.lo), self.hi.add(&other.hi))
    }

    /// Difference `self - other`: `[a.lo-b.hi, a.hi-b.lo]`.
    pub fn sub(&self, other: &Self) -> Self {
        Interval::new(self.lo.sub(&other.hi), self.hi.sub(&other.lo))
    }

    /// Product of two intervals, taking the min/max of all four endpoint
    /// products.
    pub fn mul(&self, other: &Self) -> Self {
        let products = [
            self.lo.mul(&other.lo),
            self.lo.mul(&other.hi),
            self.hi.mul(&other.lo),
            self.hi.mul(&other.hi),
        ];
        let lo = products.iter().min().unwrap().clone();
        let hi = products.iter().max().unwrap().clone();
        Interval { lo, hi }
    }

    /// Quotient `self / other`, by multiplying by the reciprocal of
    /// `other`.
    ///
    /// Fails with [`MathError::DivisionByZero`] if `other` is the point
    /// interval zero, and [`MathError::IntervalDivisionByZero`] if `other`
    /// straddles zero without being that point.
    pub fn div(&self, other: &Self) -> Result<Self, MathError> {
        if other.is_point() && other.lo.is_zero() {
            return Err(MathError::DivisionByZero);
        }
        if other.contains_zero() {
            return Err(MathError::IntervalDivisionByZero);
        }
        let recip_lo = Rational::one().div(&other.hi).expect("other.hi is nonzero");
        let recip_hi = Rational::one().div(&other.lo).expect("other.lo is nonzero");
        Ok(self.mul(&Interval::new(recip_lo, recip_hi)))
    }

    /// Raises this interval to an integer power, preserving the standard
    /// interval semantics for even/odd exponents: for an even exponent, an
    /// interval straddling zero maps to `[0, max(lo^k, hi^k)]`; for an odd
    /// exponent, or an interval that does not straddle zero, the mapping
    /// is monotonic.
    ///
    /// `exp == 0` yields the point interval `1`, except `0^0`, which the
    /// caller must special-case (this type has no notion of "the base is
    /// exactly zero and the exponent is exactly zero" beyond what
    /// `is_point`/`is_zero` already expose).
    pub fn pow(&self, exp: i64) -> Result<Self, MathError> {
        if exp == 0 {
            if self.is_point() && self.lo.is_zero() {
                return Err(MathError::ZeroToZero);
            }
            return Ok(Interval::point(Rational::one()));
        }
        if exp < 0 {
            let positive = self.pow(-exp)?;
            return positive
                .recip()
                .ok_or(MathError::DivisionByZero);
        }
        let even = exp % 2 == 0;
        if even && self.lo.is_negative() && !self.hi.is_negative() {
            let a = self.lo.pow(exp).expect("exp is nonzero");
            let b = self.hi.pow(exp).expect("exp is nonzero");
            let hi = if a > b { a } else { b };
            Ok(Interval::new(Rational::zero(), hi))
        } else if even && self.hi.is_negative() {
            // Both endpoints negative: order reverses under an even power.
            let a = self.lo.pow(exp).expect("exp is nonzero");
            let b = self.hi.pow(exp).expect("exp is nonzero");
            Ok(Interval::new(b, a))
        } else {
            let a = self.lo.pow(exp).expect("exp is nonzero");
            let b = self.hi.pow(exp).expect("exp is nonzero");
            Ok(Interval::new(a, b))
        }
    }

    /// Raises this interval to an integer power *multiplicatively*: each
    /// endpoint is raised independently (`[lo^k, hi^k]`), the pair is
    /// reordered if needed, but the even/odd zero-straddling logic of
    /// [`Interval::pow`] is not applied. This is the `**` operator's
    /// semantics, which the specification requires to never be promoted
    /// away (see [`crate::value::ValueFlag::SkipPromotion`]).
    pub fn mpow(&self, exp: i64) -> Result<Self, MathError> {
        if exp == 0 {
            return Err(MathError::ZeroToZero);
        }
        if exp < 0 && (self.lo.is_zero() || self.hi.is_zero()) {
            return Err(MathError::DivisionByZero);
        }
        let a = self
            .lo
            .pow(exp)
            .ok_or(MathError::DivisionByZero)?;
        let b = self
            .hi
            .pow(exp)
            .ok_or(MathError::DivisionByZero)?;
        Ok(Interval::new(a, b))
    }

    /// The reciprocal interval `[1/hi, 1/lo]`, or `None` if this interval
    /// contains zero.
    pub fn recip(&self) -> Option<Self> {
        if self.contains_zero() {
            return None;
        }
        Some(Interval::new(
            Rational::one().div(&self.hi)?,
            Rational::one().div(&self.lo)?,
        ))
    }

    /// Multiplies this interval by a scalar rational.
    pub fn scale(&self, factor: &Rational) -> Self {
        let a = self.lo.mul(factor);
        let b = self.hi.mul(factor);
        Interval::new(a, b)
    }
}
