//! Continued-fraction literal decoding: `a0.~a1~a2~…~an`.

use crate::error::{ErrorKind, ParseError};
use crate::numeric::{parse_continued_fraction, to_rational, Rational};
use crate::scan::Scanner;

/// Decodes a continued-fraction literal starting at `s`, returning the
/// rational it represents and the number of bytes consumed. `s` must start
/// with the leading integer `a0` (the caller has already confirmed `.~`
/// appears ahead via lookahead).
pub fn decode(s: &str) -> Result<(Rational, usize), ParseError> {
    let mut sc = Scanner::new(s);
    sc.bump_if(|c| c == '-');
    sc.bump_while(|c| c.is_ascii_digit());
    if !sc.bump_str(".~") {
        return Err(ParseError::new(ErrorKind::InvalidNumberFormat, s.to_string(), 0));
    }
    // A leading `~` (empty a0 tail marker `.~0`) is handled by the term
    // loop below, which accepts the lone literal `0` there.
    let mut saw_term = false;
    loop {
        let before = sc.offset();
        sc.bump_if(|c| c == '-');
        let digits = sc.bump_while(|c| c.is_ascii_digit());
        if digits.is_empty() {
            sc.seek(before);
            break;
        }
        saw_term = true;
        if !sc.bump_str("~") {
            break;
        }
    }
    if !saw_term {
        return Err(ParseError::new(ErrorKind::InvalidNumberFormat, s.to_string(), 0));
    }
    let consumed = sc.offset();
    let terms = parse_continued_fraction(&s[..consumed])?;
    Ok((to_rational(&terms), consumed))
}
