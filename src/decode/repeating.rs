//! Repeating-decimal literal decoding: `integer.fractional#repeat`, base 10.

use rug::Integer;
use rug::ops::Pow as _;

use crate::numeric::Rational;

/// Decodes a repeating-decimal literal's numeric parts into the exact
/// rational it represents:
/// `(concat(int,frac,repeat) - concat(int,frac)) / (10^(len(frac)+len(repeat)) - 10^len(frac))`,
/// collapsing to the terminating rational `int.frac` when `repeat` is `"0"`.
///
/// `int_digits` and `frac_digits` must already exclude any sign; the
/// caller negates the result.
pub fn decode(int_digits: &str, frac_digits: &str, repeat_digits: &str) -> Rational {
    if repeat_digits == "0" {
        return terminating(int_digits, frac_digits);
    }
    let whole_with_repeat: Integer = format!("{int_digits}{frac_digits}{repeat_digits}")
        .parse()
        .unwrap_or_default();
    let whole: Integer = format!("{int_digits}{frac_digits}")
        .parse()
        .unwrap_or_default();
    let k = frac_digits.len() as u32;
    let r = repeat_digits.len() as u32;
    let ten = Integer::from(10);
    let denom = ten.clone().pow(k + r) - ten.pow(k);
    Rational::new(whole_with_repeat - &whole, denom)
}

fn terminating(int_digits: &str, frac_digits: &str) -> Rational {
    if frac_digits.is_empty() {
        let z: Integer = int_digits.parse().unwrap_or_default();
        return Rational::from_integer(z);
    }
    let mantissa: Integer = format!("{int_digits}{frac_digits}")
        .parse()
        .unwrap_or_default();
    let scale = Integer::from(10).pow(frac_digits.len() as u32);
    Rational::new(mantissa, scale)
}
