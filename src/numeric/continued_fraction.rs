//! Continued fractions: `[a0; a1, …, an]` with `a0` any integer and `ak >=
//! 1` for `k >= 1`.

use rug::Integer;

use super::rational::Rational;
use crate::error::{ErrorKind, ParseError};

/// Reduces a continued-fraction term sequence to the exact rational it
/// represents, via the standard recurrence
/// `p[-1]=1, p[0]=a0, p[k] = ak*p[k-1] + p[k-2]`,
/// `q[-1]=0, q[0]=1, q[k] = ak*q[k-1] + q[k-2]`,
/// returning `p[n]/q[n]`.
///
/// Panics if `terms` is empty; every continued fraction has at least `a0`.
pub fn to_rational(terms: &[Integer]) -> Rational {
    let mut p_prev2 = Integer::from(1);
    let mut p_prev1 = terms[0].clone();
    let mut q_prev2 = Integer::from(0);
    let mut q_prev1 = Integer::from(1);
    for a in &terms[1..] {
        let p = a.clone() * &p_prev1 + &p_prev2;
        let q = a.clone() * &q_prev1 + &q_prev2;
        p_prev2 = p_prev1;
        p_prev1 = p;
        q_prev2 = q_prev1;
        q_prev1 = q;
    }
    Rational::new(p_prev1, q_prev1)
}

/// Expands a rational to its canonical continued-fraction term sequence,
/// via the Euclidean algorithm. The canonical form never ends in a term
/// equal to 1 unless the sequence has only one term (`[a0]`), matching
/// [`parse_continued_fraction`]'s acceptance rule.
pub fn from_rational(r: &Rational) -> Vec<Integer> {
    let mut terms = Vec::new();
    let mut numer = r.numer().clone();
    let mut denom = r.denom().clone();
    loop {
        let (q, rem) = numer.clone().div_rem_floor(denom.clone());
        terms.push(q);
        if rem == 0 {
            break;
        }
        numer = denom;
        denom = rem;
    }
    // Canonicalize: an expansion ending in `..., 1` (with more than one
    // term) is equivalent to incrementing the previous term and dropping
    // the trailing 1.
    if terms.len() > 1 && *terms.last().unwrap() == 1 {
        terms.pop();
        let last = terms.last_mut().unwrap();
        *last += 1;
    }
    terms
}

/// Parses a continued-fraction literal's term sequence, e.g. the text
/// after `3` in `3.~7~15~1~292` is `~7~15~1~292`, or the whole literal may
/// be passed; both the leading integer and the `~`-separated tail are
/// read here. `ak` for `k >= 1` must be a positive decimal integer; there
/// must be no doubled `~~` and no trailing `~`. `x.~0` denotes the
/// integer `x` alone (an explicit empty tail).
///
/// This is the crate's one standalone public utility beyond `parse`
/// itself, per the specification's external-interfaces section.
pub fn parse_continued_fraction(text: &str) -> Result<Vec<Integer>, ParseError> {
    let (a0_text, tail) = match text.find(".~") {
        Some(idx) => (&text[..idx], &text[idx + 2..]),
        None => {
            return Err(ParseError::new(
                ErrorKind::InvalidNumberFormat,
                text.to_string(),
                0,
            ))
        }
    };
    let a0: Integer = a0_text.parse().map_err(|_| {
        ParseError::new(ErrorKind::InvalidNumberFormat, a0_text.to_string(), 0)
    })?;
    let mut terms = vec![a0];
    if tail == "0" {
        return Ok(terms);
    }
    for part in tail.split('~') {
        if part.is_empty() {
            return Err(ParseError::new(
                ErrorKind::InvalidNumberFormat,
                text.to_string(),
                0,
            ));
        }
        let a: Integer = part.parse().map_err(|_| {
            ParseError::new(ErrorKind::InvalidNumberFormat, part.to_string(), 0)
        })?;
        if a < 1 {
            return Err(ParseError::new(
                ErrorKind::InvalidNumberFormat,
                part.to_string(),
                0,
            ));
        }
        terms.push(a);
    }
    if terms.len() > 1 && *terms.last().unwrap() == 1 {
        return Err(ParseError::new(
            ErrorKind::InvalidNumberFormat,
            "continued fraction must not end in a term equal to 1".to_string(),
            0,
        ));
    }
    Ok(terms)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pi_convergent() {
        let terms = parse_continued_fraction("3.~7~15~1~292").unwrap();
        let r = to_rational(&terms);
        assert_eq!(r.numer().to_string(), "103993");
        assert_eq!(r.denom().to_string(), "33102");
    }

    #[test]
    fn trailing_zero_is_bare_integer() {
        let terms = parse_continued_fraction("5.~0").unwrap();
        assert_eq!(terms, vec![Integer::from(5)]);
    }

    #[test]
    fn round_trip() {
        let r = Rational::new(Integer::from(103993), Integer::from(33102));
        let terms = from_rational(&r);
        let back = to_rational(&terms);
        assert_eq!(r, back);
    }
}
