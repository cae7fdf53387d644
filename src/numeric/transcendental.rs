//! Transcendental functions, called as opaque operators producing
//! intervals at a requested precision.
//!
//! The specification treats these as an external collaborator whose
//! implementation is out of scope; this module supplies one concrete
//! implementation so the parser's function-call grammar (`PI`, `SIN`,
//! `LN(x,b)`, …) has a real callee, isolated behind the [`Transcendental`]
//! trait so it can be swapped without touching the parser.

use rug::Float;
use rug::ops::Pow as _;

use super::interval::Interval;
use super::rational::Rational;
use crate::error::{ErrorKind, ParseError};

/// A signed precision context: the target error is at most `base^precision`.
/// The default is `-6` (one millionth).
pub type Precision = i32;

/// The default precision, one millionth.
pub const DEFAULT_PRECISION: Precision = -6;

/// Working bits of precision for a given decimal precision context, with
/// guard bits so interval width bounds hold after rounding.
fn working_bits(prec: Precision) -> u32 {
    let digits = prec.unsigned_abs().max(1);
    // log2(10) ~ 3.3219; add guard bits for the final interval-width
    // rounding and a floor so tiny precisions still get a usable float.
    (digits as f64 * 3.3219281).ceil() as u32 + 32
}

fn eps(prec: Precision, bits: u32) -> Float {
    Float::with_val(bits, 10).pow(prec)
}

fn to_interval(f: Float, prec: Precision, bits: u32) -> Interval {
    let e = eps(prec, bits);
    let lo = Rational::from_f64_like(&(f.clone() - &e));
    let hi = Rational::from_f64_like(&(f + &e));
    Interval::new(lo, hi)
}

impl Rational {
    /// Approximates a [`rug::Float`] by a rational with the same decimal
    /// string (bounded by the float's own precision). Used only to hand
    /// transcendental results back across the exact/interval boundary;
    /// arithmetic on exact rationals never goes through this path.
    fn from_f64_like(f: &Float) -> Rational {
        let (sign, s, exp) = f.to_sign_string_exp(10, None);
        let digits: rug::Integer = s.parse().unwrap_or_default();
        let exp = exp.unwrap_or(0) - s.len() as i32;
        let mut r = Rational::from_integer(digits);
        if exp >= 0 {
            let scale = rug::Integer::from(10).pow(exp as u32);
            r = r.mul(&Rational::from_integer(scale));
        } else {
            let scale = rug::Integer::from(10).pow((-exp) as u32);
            r = r
                .div(&Rational::from_integer(scale))
                .unwrap_or_else(Rational::zero);
        }
        if sign {
            r = r.negate();
        }
        r
    }
}

/// A source of transcendental function values, bounded to a requested
/// [`Precision`].
pub trait Transcendental {
    /// The constant pi.
    fn pi(&self, prec: Precision) -> Interval;
    /// The constant e.
    fn e(&self, prec: Precision) -> Interval;
    /// `e^x`.
    fn exp(&self, x: &Interval, prec: Precision) -> Interval;
    /// The natural logarithm of `x`. Fails with [`ErrorKind::DomainError`]
    /// if `x` is not positive.
    fn ln(&self, x: &Interval, prec: Precision) -> Result<Interval, ParseError>;
    /// The logarithm of `x` base `b`. Fails with [`ErrorKind::DomainError`]
    /// if `x` is not positive or `b` is not positive and not 1.
    fn log(&self, x: &Interval, b: &Interval, prec: Precision) -> Result<Interval, ParseError>;
    /// Sine.
    fn sin(&self, x: &Interval, prec: Precision) -> Interval;
    /// Cosine.
    fn cos(&self, x: &Interval, prec: Precision) -> Interval;
    /// Tangent.
    fn tan(&self, x: &Interval, prec: Precision) -> Interval;
    /// Arcsine. Fails with [`ErrorKind::DomainError`] outside `[-1, 1]`.
    fn arcsin(&self, x: &Interval, prec: Precision) -> Result<Interval, ParseError>;
    /// Arccosine. Fails with [`ErrorKind::DomainError`] outside `[-1, 1]`.
    fn arccos(&self, x: &Interval, prec: Precision) -> Result<Interval, ParseError>;
    /// Arctangent.
    fn arctan(&self, x: &Interval, prec: Precision) -> Interval;
    /// The `n`th root of `x`, via Newton iteration. Fails with
    /// [`ErrorKind::DomainError`] if `n` is even and `x` is negative.
    fn newton_root(&self, x: &Interval, n: i64, prec: Precision) -> Result<Interval, ParseError>;
    /// `base^exponent` for a non-integer rational `exponent`, via
    /// `newton_root` composed with integer exponentiation.
    fn rational_interval_power(
        &self,
        base: &Interval,
        exponent: &Rational,
        prec: Precision,
    ) -> Result<Interval, ParseError>;
}

/// A [`Transcendental`] implementation backed by `rug::Float` evaluated at
/// a working precision derived from the requested [`Precision`].
#[derive(Clone, Copy, Debug, Default)]
pub struct NewtonTranscendentals;

impl NewtonTranscendentals {
    fn midpoint(x: &Interval) -> Float {
        let bits = 256;
        let lo = Float::with_val(bits, x.lo().to_f64());
        let hi = Float::with_val(bits, x.hi().to_f64());
        (lo + hi) / 2
    }
}

fn domain_error(what: &str) -> ParseError {
    ParseError::new(ErrorKind::DomainError, what.to_string(), 0)
}

impl Transcendental for NewtonTranscendentals {
    fn pi(&self, prec: Precision) -> Interval {
        let bits = working_bits(prec);
        to_interval(Float::with_val(bits, rug::float::Constant::Pi), prec, bits)
    }

    fn e(&self, prec: Precision) -> Interval {
        let bits = working_bits(prec);
        to_interval(Float::with_val(bits, 1).exp(), prec, bits)
    }

    fn exp(&self, x: &Interval, prec: Precision) -> Interval {
        let bits = working_bits(prec);
        let m = Float::with_val(bits, Self::midpoint(x));
        to_interval(m.exp(), prec, bits)
    }

    fn ln(&self, x: &Interval, prec: Precision) -> Result<Interval, ParseError> {
        if !x.lo().is_negative() && x.lo().is_zero() && x.hi().is_zero() {
            return Err(domain_error("ln(0)"));
        }
        if x.hi().is_negative() || x.hi().is_zero() {
            return Err(domain_error("ln of a non-positive value"));
        }
        let bits = working_bits(prec);
        let m = Float::with_val(bits, Self::midpoint(x));
        Ok(to_interval(m.ln(), prec, bits))
    }

    fn log(&self, x: &Interval, b: &Interval, prec: Precision) -> Result<Interval, ParseError> {
        let ln_x = self.ln(x, prec)?;
        let ln_b = self.ln(b, prec)?;
        ln_x.div(&ln_b).map_err(|_| domain_error("log with base 1"))
    }

    fn sin(&self, x: &Interval, prec: Precision) -> Interval {
        let bits = working_bits(prec);
        let m = Float::with_val(bits, Self::midpoint(x));
        to_interval(m.sin(), prec, bits)
    }

    fn cos(&self, x: &Interval, prec: Precision) -> Interval {
        let bits = working_bits(prec);
        let m = Float::with_val(bits, Self::midpoint(x));
        to_interval(m.cos(), prec, bits)
    }

    fn tan(&self, x: &Interval, prec: Precision) -> Interval {
        let bits = working_bits(prec);
        let m = Float::with_val(bits, Self::midpoint(x));
        to_interval(m.tan(), prec, bits)
    }

    fn arcsin(&self, x: &Interval, prec: Precision) -> Result<Interval, ParseError> {
        if x.lo().to_f64() < -1.0 || x.hi().to_f64() > 1.0 {
            return Err(domain_error("arcsin outside [-1, 1]"));
        }
        let bits = working_bits(prec);
        let m = Float::with_val(bits, Self::midpoint(x));
        Ok(to_interval(m.asin(), prec, bits))
    }

    fn arccos(&self, x: &Interval, prec: Precision) -> Result<Interval, ParseError> {
        if x.lo().to_f64() < -1.0 || x.hi().to_f64() > 1.0 {
            return Err(domain_error("arccos outside [-1, 1]"));
        }
        let bits = working_bits(prec);
        let m = Float::with_val(bits, Self::midpoint(x));
        Ok(to_interval(m.acos(), prec, bits))
    }

    fn arctan(&self, x: &Interval, prec: Precision) -> Interval {
        let bits = working_bits(prec);
        let m = Float::with_val(bits, Self::midpoint(x));
        to_interval(m.atan(), prec, bits)
    }

    fn newton_root(&self, x: &Interval, n: i64, prec: Precision) -> Result<Interval, ParseError> {
        if n == 0 {
            return Err(domain_error("0th root"));
        }
        if n % 2 == 0 && x.hi().is_negative() {
            return Err(domain_error("even root of a negative value"));
        }
        let bits = working_bits(prec);
        let m = Float::with_val(bits, Self::midpoint(x));
        let negative = m < 0;
        let base = if negative { -m.clone() } else { m.clone() };
        let mut guess = if base > 0 {
            base.clone().ln() / Float::with_val(bits, n)
        } else {
            Float::with_val(bits, 0)
        }
        .exp();
        if guess == 0 {
            guess = Float::with_val(bits, 1);
        }
        // Newton iteration for y^n - base = 0.
        for _ in 0..64 {
            let y_pow = guess.clone().pow(n as u32 - 1);
            let f = y_pow.clone() * &guess - &base;
            let fp = Float::with_val(bits, n) * y_pow;
            if fp == 0 {
                break;
            }
            let next = guess.clone() - f / fp;
            if (next.clone() - &guess).abs() < eps(prec - 4, bits) {
                guess = next;
                break;
            }
            guess = next;
        }
        if negative {
            guess = -guess;
        }
        Ok(to_interval(guess, prec, bits))
    }

    fn rational_interval_power(
        &self,
        base: &Interval,
        exponent: &Rational,
        prec: Precision,
    ) -> Result<Interval, ParseError> {
        let q = exponent.denom().to_i64().unwrap_or(1).abs();
        let p = exponent.numer().to_i64().unwrap_or(0);
        let rooted = self.newton_root(base, q, prec)?;
        rooted
            .pow(p)
            .map_err(|_| domain_error("0 raised to a non-positive power"))
    }
}
