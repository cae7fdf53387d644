//! Literal decoders: the number-literal dispatcher and the individual
//! recognizers for each literal shape in §4.B.

mod continued;
mod number;
mod repeating;
mod uncertainty;

use rug::Integer;

use crate::base::PrefixRegistry;
use crate::error::{ErrorKind, ParseError};
use crate::numeric::Rational;
use crate::options::ParserOptions;
use crate::value::Value;

/// Decodes one literal at the start of `text`, choosing a recognizer by a
/// short lookahead exactly as §4.C's dispatcher describes: `0<letter>`
/// (not `e`/`E`) selects a prefixed base and delegates the remainder to
/// [`number::decode`]; anything else is decoded directly under
/// `opts.input_base`, which itself dispatches on `.~`, `..`, `#`, `/`,
/// `:`, and `.` to choose continued fraction, mixed number, repeating
/// decimal, fraction, interval, or decimal shape.
///
/// Returns the decoded value and the number of bytes of `text` consumed.
pub fn decode_literal(
    text: &str,
    registry: &PrefixRegistry,
    opts: &ParserOptions,
) -> Result<(Value, usize), ParseError> {
    log::trace!("decode_literal: {text:?}");
    let sign_len = if text.starts_with('-') { 1 } else { 0 };
    let after_sign = &text[sign_len..];

    let result = if let Some(letter) = prefix_letter(after_sign) {
        let base = if letter.eq_ignore_ascii_case(&'d') {
            opts.input_base.clone()
        } else {
            registry
                .get(letter)
                .map(|b| (*b).clone())
                .ok_or_else(|| ParseError::new(ErrorKind::InvalidPrefix, text.to_string(), 0))?
        };
        let prefix_len = sign_len + 2;
        let body = &text[prefix_len..];
        let (value, body_len) = number::decode(body, &base, opts)?;
        let value = if sign_len == 1 { negate(value) } else { value };
        Ok((value, prefix_len + body_len))
    } else {
        number::decode(text, &opts.input_base, opts)
    };

    match &result {
        Ok((value, consumed)) => log::debug!("decode_literal: {text:?} -> {value} ({consumed} bytes)"),
        Err(e) => log::debug!("decode_literal: {text:?} failed: {e}"),
    }
    result
}

/// Returns the prefix letter of `s` if it has the shape `0<letter>` with
/// `letter` not `e`/`E` (reserved for scientific notation).
fn prefix_letter(s: &str) -> Option<char> {
    let mut chars = s.chars();
    if chars.next()? != '0' {
        return None;
    }
    let letter = chars.next()?;
    if !letter.is_ascii_alphabetic() || letter.eq_ignore_ascii_case(&'e') {
        return None;
    }
    Some(letter)
}

fn negate(value: Value) -> Value {
    match value {
        Value::Integer(z) => Value::Integer(-z),
        Value::Rational(r, flags) => Value::Rational(r.negate(), flags),
        Value::Interval(i, flags) => {
            Value::Interval(i.scale(&Rational::from_integer(Integer::from(-1))), flags)
        }
    }
}
