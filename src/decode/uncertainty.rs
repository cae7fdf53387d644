//! Uncertainty bracket forms: `base[lo,hi]`, `base[+-x]`, `base[+x]`,
//! `base[-y]` (§4.B.5).

use rug::Integer;
use rug::ops::Pow as _;

use crate::base::BaseSystem;
use crate::error::{ErrorKind, ParseError};
use crate::numeric::{Interval, Rational};
use crate::scan::Scanner;

use super::repeating;

/// Decodes the `[...]` suffix following a base literal. `base_text` is the
/// literal source text of the center (e.g. `"1.23"`), `center` is its
/// already-decoded value, and `rest` starts at the `[`. Returns the
/// resulting interval and the number of bytes of `rest` consumed (the
/// bracket only; a trailing scientific suffix is handled by the caller).
pub fn decode(
    base_text: &str,
    center: &Rational,
    rest: &str,
    base: &BaseSystem,
) -> Result<(Interval, usize), ParseError> {
    let mut sc = Scanner::new(rest);
    if !sc.bump_if(|c| c == '[') {
        return Err(ParseError::new(ErrorKind::SyntaxError, rest.to_string(), 0));
    }
    let body_start = sc.offset();
    let body = sc.bump_while(|c| c != ']');
    if !sc.bump_if(|c| c == ']') {
        return Err(ParseError::new(ErrorKind::SyntaxError, rest.to_string(), 0));
    }
    let _ = body_start;
    let consumed = sc.offset();

    if body.contains('+') || body.contains('-') {
        let interval = decode_symmetric_or_relative(base_text, center, body, base)?;
        return Ok((interval, consumed));
    }

    let sep = if body.contains(',') {
        ','
    } else if body.contains(':') {
        ':'
    } else if body.chars().all(|c| c.is_ascii_alphanumeric()) {
        // A bracket with no separator and no sign, e.g. `255[16]`, is the
        // legacy "value in base" notation the uncertainty-bracket grammar
        // superseded; flag it distinctly rather than misreporting it as a
        // malformed range.
        return Err(ParseError::new(ErrorKind::DeprecatedBracketBase, body.to_string(), 0));
    } else {
        return Err(ParseError::new(ErrorKind::InvalidNumberFormat, body.to_string(), 0));
    };
    let mut parts = body.splitn(2, sep);
    let lo_run = parts.next().unwrap_or("");
    let hi_run = parts.next().unwrap_or("");
    if lo_run.is_empty() || hi_run.is_empty() {
        return Err(ParseError::new(ErrorKind::InvalidNumberFormat, body.to_string(), 0));
    }
    let lo = decode_appended(base_text, lo_run, base)?;
    let hi = decode_appended(base_text, hi_run, base)?;
    Ok((Interval::new(lo, hi), consumed))
}

/// Decodes a range endpoint formed by appending a digit run directly to
/// the center's own source text and re-decoding the whole thing as a
/// plain (non-bracketed) literal in `base`.
fn decode_appended(base_text: &str, run: &str, base: &BaseSystem) -> Result<Rational, ParseError> {
    let joined = format!("{base_text}{run}");
    let (value, consumed) = super::number::decode(&joined, base, &crate::options::ParserOptions::default())?;
    if consumed != joined.len() {
        return Err(ParseError::new(ErrorKind::InvalidNumberFormat, joined, 0));
    }
    value
        .as_point_rational()
        .ok_or_else(|| ParseError::new(ErrorKind::InvalidNumberFormat, joined, 0))
}

fn decode_symmetric_or_relative(
    base_text: &str,
    center: &Rational,
    body: &str,
    base: &BaseSystem,
) -> Result<Interval, ParseError> {
    if let Some(x) = body.strip_prefix("+-").or_else(|| body.strip_prefix("-+")) {
        let offset = decode_offset(x, base)?;
        let scaled = offset.scale(base_text, base);
        let lo = center.sub(&scaled.value);
        let hi = center.add(&scaled.value);
        return Ok(Interval::new(lo, hi));
    }

    let mut plus = None;
    let mut minus = None;
    let mut rest = body;
    while !rest.is_empty() {
        if let Some(tail) = rest.strip_prefix('+') {
            let (digits, after) = take_offset_token(tail);
            plus = Some(digits);
            rest = after;
        } else if let Some(tail) = rest.strip_prefix('-') {
            let (digits, after) = take_offset_token(tail);
            minus = Some(digits);
            rest = after;
        } else {
            return Err(ParseError::new(ErrorKind::InvalidNumberFormat, body.to_string(), 0));
        }
    }
    let plus = match plus {
        Some(text) => decode_offset(text, base)?.scale(base_text, base).value,
        None => Rational::zero(),
    };
    let minus = match minus {
        Some(text) => decode_offset(text, base)?.scale(base_text, base).value,
        None => Rational::zero(),
    };
    Ok(Interval::new(center.sub(&minus), center.add(&plus)))
}

fn take_offset_token(s: &str) -> (&str, &str) {
    let end = s.find(['+', '-']).unwrap_or(s.len());
    (&s[..end], &s[end..])
}

struct Offset {
    value: Rational,
    fractional_digits: usize,
    is_repeating: bool,
}

impl Offset {
    fn scale(&self, base_text: &str, base: &BaseSystem) -> ScaledOffset {
        let base_has_dot = base_text.contains('.');
        let base_frac_digits = base_text.split('.').nth(1).map_or(0, str::len);
        let exponent: i32 = if base_has_dot {
            if self.is_repeating {
                -(base_frac_digits as i32)
            } else {
                -(base_frac_digits as i32 + 1)
            }
        } else if self.fractional_digits > 0 {
            -(self.fractional_digits as i32)
        } else {
            -1
        };
        let base_z = Integer::from(base.base());
        let factor = if exponent >= 0 {
            Rational::from_integer(base_z.pow(exponent as u32))
        } else {
            Rational::new(Integer::from(1), base_z.pow((-exponent) as u32))
        };
        ScaledOffset {
            value: self.value.mul(&factor),
        }
    }
}

struct ScaledOffset {
    value: Rational,
}

/// Decodes the offset literal `x` in a symmetric/relative uncertainty
/// term, which may be a plain decimal, a repeating decimal, or carry a
/// scientific suffix.
fn decode_offset(text: &str, base: &BaseSystem) -> Result<Offset, ParseError> {
    let mut sc = Scanner::new(text);
    let int_digits = sc.bump_while(|c| base.digit_value(c).is_some());
    let mut frac_digits = "";
    let mut is_repeating = false;
    let mut value = if int_digits.is_empty() {
        Rational::zero()
    } else {
        Rational::from_integer(base.to_integer(int_digits).unwrap_or_default())
    };
    if sc.bump_if(|c| c == '.') {
        frac_digits = sc.bump_while(|c| base.digit_value(c).is_some());
        if sc.bump_if(|c| c == '#') {
            let repeat_digits = sc.bump_while(|c| c.is_ascii_digit());
            is_repeating = true;
            value = repeating::decode(int_digits, frac_digits, repeat_digits);
        } else {
            let mantissa = base
                .to_integer(&format!("{int_digits}{frac_digits}"))
                .unwrap_or_default();
            let scale = Integer::from(base.base()).pow(frac_digits.len() as u32);
            value = Rational::new(mantissa, scale);
        }
    }
    let (scaled, consumed) = super::number::apply_scientific(
        crate::value::Value::rational(value),
        text,
        sc.offset(),
        base,
    )?;
    let value = scaled
        .as_point_rational()
        .ok_or_else(|| ParseError::new(ErrorKind::InvalidNumberFormat, text.to_string(), 0))?;
    if consumed != text.len() {
        return Err(ParseError::new(ErrorKind::InvalidNumberFormat, text.to_string(), 0));
    }
    Ok(Offset {
        value,
        fractional_digits: frac_digits.len(),
        is_repeating,
    })
}
