//! The shared literal-body grammar: integer, fraction, mixed number,
//! decimal (exact or uncertainty), and interval — the part of §4.B.1 and
//! §4.B.2 that is identical once a [`BaseSystem`] has been chosen (either
//! from a prefix or from `input_base`).

use enumset::EnumSet;
use rug::Integer;
use rug::ops::Pow as _;

use crate::base::BaseSystem;
use crate::error::{ErrorKind, ParseError};
use crate::numeric::{Interval, Rational};
use crate::options::ParserOptions;
use crate::scan::Scanner;
use crate::value::{Value, ValueFlag};

use super::{continued, repeating, uncertainty};

/// Decodes one literal body (everything but an explicit base prefix) in
/// `base`, returning the value and the number of bytes of `s` consumed.
pub fn decode(s: &str, base: &BaseSystem, opts: &ParserOptions) -> Result<(Value, usize), ParseError> {
    let mut sc = Scanner::new(s);
    let negative = sc.bump_if(|c| c == '-');
    let int_digits = sc.bump_while(|c| base.digit_value(c).is_some());
    if int_digits.is_empty() {
        return Err(ParseError::new(ErrorKind::InvalidNumberFormat, s.to_string(), 0));
    }

    if sc.starts_with(".~") {
        // The leading sign is part of the continued fraction's `a0`, not
        // handled separately here; `continued::decode` re-reads it from `s`.
        let (r, consumed) = continued::decode(s)?;
        return finish(wrap_rational(r), s, consumed, base, opts);
    }

    if sc.starts_with("..") {
        sc.bump_str("..");
        let numer_digits = sc.bump_while(|c| base.digit_value(c).is_some());
        if !sc.bump_if(|c| c == '/') {
            return Err(ParseError::new(ErrorKind::InvalidNumberFormat, s.to_string(), 0));
        }
        let denom_digits = sc.bump_while(|c| base.digit_value(c).is_some());
        let whole = base.to_integer(int_digits).map_err(|e| invalid_digit(e, s))?;
        let numer = base.to_integer(numer_digits).map_err(|e| invalid_digit(e, s))?;
        let denom = base.to_integer(denom_digits).map_err(|e| invalid_digit(e, s))?;
        if denom == 0 {
            return Err(ParseError::new(ErrorKind::DivisionByZero, s.to_string(), 0));
        }
        let mut r = Rational::from_integer(whole).add(
            &Rational::new(numer, denom.clone()),
        );
        if negative {
            r = r.negate();
        }
        return finish(wrap_rational(r), s, sc.offset(), base, opts);
    }

    let mut has_dot = false;
    let mut frac_digits = "";
    if sc.starts_with(".") {
        let dot_pos = sc.offset();
        sc.bump();
        frac_digits = sc.bump_while(|c| base.digit_value(c).is_some());
        if sc.starts_with("#") && base.base() == 10 {
            sc.bump();
            let repeat_digits = sc.bump_while(|c| c.is_ascii_digit());
            if repeat_digits.is_empty() {
                return Err(ParseError::new(ErrorKind::InvalidNumberFormat, s.to_string(), 0));
            }
            let mut r = repeating::decode(int_digits, frac_digits, repeat_digits);
            if negative {
                r = r.negate();
            }
            return finish(wrap_rational(r), s, sc.offset(), base, opts);
        }
        if frac_digits.is_empty() {
            // A bare trailing `.` with no digits: not a valid decimal shape.
            sc.seek(dot_pos);
        } else {
            has_dot = true;
        }
    }

    if !has_dot && sc.starts_with("/") && !sc.rest()[1..].starts_with(crate::sentinel::DIV_SPACE) {
        sc.bump();
        let denom_digits = sc.bump_while(|c| base.digit_value(c).is_some());
        let numer = base.to_integer(int_digits).map_err(|e| invalid_digit(e, s))?;
        let denom = base.to_integer(denom_digits).map_err(|e| invalid_digit(e, s))?;
        if denom == 0 {
            return Err(ParseError::new(ErrorKind::DivisionByZero, s.to_string(), 0));
        }
        let explicit_fraction = denom_digits == "1";
        let mut r = Rational::new(numer, denom);
        if negative {
            r = r.negate();
        }
        let value = if explicit_fraction {
            Value::Rational(r, EnumSet::only(ValueFlag::ExplicitFraction))
        } else {
            wrap_rational(r)
        };
        return finish(value, s, sc.offset(), base, opts);
    }

    let value = if has_dot {
        decimal_value(int_digits, frac_digits, negative, base, opts)
    } else {
        let z = base.to_integer(int_digits).map_err(|e| invalid_digit(e, s))?;
        let z = if negative { -z } else { z };
        Value::Integer(z)
    };

    finish(value, s, sc.offset(), base, opts)
}

/// Handles the trailing grammar shared by every shape above: an explicit
/// interval (`:`), an uncertainty bracket (`[`), or a scientific suffix.
fn finish(
    value: Value,
    s: &str,
    mut consumed: usize,
    base: &BaseSystem,
    opts: &ParserOptions,
) -> Result<(Value, usize), ParseError> {
    let rest = &s[consumed..];

    if let Some(stripped) = rest.strip_prefix(':') {
        let lo = value
            .as_point_rational()
            .ok_or_else(|| ParseError::new(ErrorKind::UnsupportedComposition, s.to_string(), consumed))?;
        let (rhs, rhs_len) = decode(stripped, base, opts)?;
        let hi = rhs
            .as_point_rational()
            .ok_or_else(|| ParseError::new(ErrorKind::UnsupportedComposition, s.to_string(), consumed))?;
        let interval = Interval::new(lo, hi);
        consumed += 1 + rhs_len;
        return apply_scientific_checked(
            Value::Interval(interval, EnumSet::only(ValueFlag::ExplicitInterval)),
            s,
            consumed,
            base,
        );
    }

    if rest.starts_with('[') {
        let base_text = &s[..consumed];
        let center = value
            .as_point_rational()
            .ok_or_else(|| ParseError::new(ErrorKind::UnsupportedComposition, s.to_string(), consumed))?;
        let (interval, bracket_len) = uncertainty::decode(base_text, &center, rest, base)?;
        consumed += bracket_len;
        return apply_scientific_checked(
            Value::Interval(interval, EnumSet::empty()),
            s,
            consumed,
            base,
        );
    }

    apply_scientific_checked(value, s, consumed, base)
}

/// Applies a trailing scientific suffix, then rejects a composition §4.B.5
/// forbids: scientific notation immediately followed by an uncertainty
/// bracket, whether the scientific part preceded the bracket in the center
/// (`"1.23E5[6,7]"`) or trails a prefix-based literal about to meet one
/// (`"0x1A_^2[3,4]"`). A bracket is only ever valid directly on the
/// center's own digit run, handled above in `finish`, never after a
/// scientific scale factor has already been applied.
fn apply_scientific_checked(
    value: Value,
    s: &str,
    consumed: usize,
    base: &BaseSystem,
) -> Result<(Value, usize), ParseError> {
    let (value, new_consumed) = apply_scientific(value, s, consumed, base)?;
    if new_consumed > consumed && s[new_consumed..].starts_with('[') {
        return Err(ParseError::new(
            ErrorKind::UnsupportedComposition,
            s[consumed..].to_string(),
            consumed,
        ));
    }
    Ok((value, new_consumed))
}

/// Applies a trailing `E±k` (only in base 10) or `_^±k` (any base)
/// scientific suffix by multiplying by `B^k`.
pub(super) fn apply_scientific(
    value: Value,
    s: &str,
    consumed: usize,
    base: &BaseSystem,
) -> Result<(Value, usize), ParseError> {
    let rest = &s[consumed..];
    let mut sc = Scanner::new(rest);
    let exp_base: i64 = if base.base() == 10 && sc.bump_if(|c| c == 'E') {
        10
    } else if sc.bump_str("_^") {
        base.base() as i64
    } else {
        return Ok((value, consumed));
    };

    let exp_negative = sc.bump_if(|c| c == '-');
    sc.bump_if(|c| c == '+');
    let exp_digits = sc.bump_while(|c| c.is_ascii_digit());
    if exp_digits.is_empty() {
        return Err(ParseError::new(ErrorKind::InvalidNumberFormat, s.to_string(), consumed));
    }
    let mut exp: i64 = exp_digits.parse().unwrap_or(0);
    if exp_negative {
        exp = -exp;
    }
    let factor = Rational::from_integer(Integer::from(exp_base)).pow(exp);
    let Some(factor) = factor else {
        return Err(ParseError::new(ErrorKind::DivisionByZero, s.to_string(), consumed));
    };

    let consumed = consumed + sc.offset();
    let scaled = match value {
        Value::Integer(z) => wrap_rational(Rational::from_integer(z).mul(&factor)),
        Value::Rational(r, flags) if flags.contains(ValueFlag::ExplicitFraction) => {
            Value::Rational(r.mul(&factor), flags)
        }
        Value::Rational(r, _) => wrap_rational(r.mul(&factor)),
        Value::Interval(i, flags) => Value::Interval(i.scale(&factor), flags),
    };
    Ok((scaled, consumed))
}

fn decimal_value(int_digits: &str, frac_digits: &str, negative: bool, base: &BaseSystem, opts: &ParserOptions) -> Value {
    let mantissa = base
        .to_integer(&format!("{int_digits}{frac_digits}"))
        .unwrap_or_else(|_| Integer::new());
    let scale = Integer::from(base.base()).pow(frac_digits.len() as u32);
    let mut r = Rational::new(mantissa, scale);
    if negative {
        r = r.negate();
    }
    if opts.type_aware {
        wrap_rational(r)
    } else {
        let k = frac_digits.len() as u32;
        let base_z = Integer::from(base.base());
        let margin = Rational::new(base_z, Integer::from(2)).mul(&Rational::new(
            Integer::from(1),
            Integer::from(base.base()).pow(k + 1),
        ));
        let lo = r.sub(&margin);
        let hi = r.add(&margin);
        Value::Interval(Interval::new(lo, hi), EnumSet::empty())
    }
}

fn wrap_rational(r: Rational) -> Value {
    if r.is_integer() {
        Value::Integer(r.to_integer().expect("is_integer() just checked"))
    } else {
        Value::Rational(r, EnumSet::empty())
    }
}

fn invalid_digit(e: crate::base::InvalidDigit, s: &str) -> ParseError {
    ParseError::new(ErrorKind::InvalidBaseDigit, format!("{e} in {s:?}"), 0)
}
