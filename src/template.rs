//! Template-string helpers (§4.E): two thin adapters that stitch literal
//! segments and interpolated values into one expression string, then
//! parse it — mirroring the teacher's practice of building one flat
//! buffer from heterogeneous pieces before handing it to a single parser
//! entry point.

use std::fmt::Display;

use crate::error::ParseError;
use crate::numeric::Rational;
use crate::options::ParserOptions;
use crate::parser;
use crate::value::Value;

/// Concatenates `segments` and `values` (alternating, `segments` one
/// longer) into one expression and parses it in type-aware mode,
/// returning the native `Value` tagged union directly.
///
/// This is the counterpart of a `parse!("{} + {}", a, b)`-style macro: the
/// caller supplies the literal pieces and the values to interpolate
/// between them, and gets back the same `Integer`/`Rational`/`Interval`
/// result that calling [`crate::parse`] on the fully rendered string
/// would.
pub fn parse_template(
    segments: &[&str],
    values: &[&dyn Display],
    opts: &ParserOptions,
) -> Result<Value, ParseError> {
    let expr = render(segments, values);
    parser::parse(&expr, opts)
}

/// An un-reduced fraction, the alternate domain [`parse_template_fraction`]
/// remaps results into: numerator and denominator are kept exactly as
/// they would reduce to (this crate has no notion of an actually
/// un-reduced rational internally, since [`crate::numeric::Rational`]
/// always reduces on construction), but the caller gets numerator and
/// denominator back explicitly instead of a single tagged `Value`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Fraction {
    /// A plain integer, numerator over an implicit denominator of 1.
    Integer(rug::Integer),
    /// A numerator/denominator pair.
    Ratio(rug::Integer, rug::Integer),
}

/// The alternate-domain counterpart of [`Value::Interval`]: two
/// [`Fraction`] endpoints instead of two reduced rationals.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FractionInterval {
    /// The lower endpoint.
    pub lo: Fraction,
    /// The upper endpoint.
    pub hi: Fraction,
}

/// The result type of [`parse_template_fraction`]: every [`Value`] is
/// remapped into the `Fraction`/`FractionInterval` domain instead.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FractionValue {
    /// A scalar, reported as a [`Fraction`].
    Scalar(Fraction),
    /// An interval, reported as a [`FractionInterval`].
    Interval(FractionInterval),
}

/// Concatenates `segments` and `values` into one expression, parses it in
/// non-type-aware (compatibility) mode, then remaps the result into the
/// `Fraction`/`FractionInterval` domain, for callers that want to inspect
/// numerator and denominator directly rather than a single reduced
/// [`Value`].
pub fn parse_template_fraction(
    segments: &[&str],
    values: &[&dyn Display],
    opts: &ParserOptions,
) -> Result<FractionValue, ParseError> {
    let expr = render(segments, values);
    let non_type_aware = ParserOptions {
        type_aware: false,
        ..opts.clone()
    };
    let value = parser::parse(&expr, &non_type_aware)?;
    Ok(to_fraction_value(&value))
}

fn render(segments: &[&str], values: &[&dyn Display]) -> String {
    let mut out = String::new();
    for (i, segment) in segments.iter().enumerate() {
        out.push_str(segment);
        if let Some(v) = values.get(i) {
            out.push_str(&v.to_string());
        }
    }
    out
}

fn to_fraction(r: &Rational) -> Fraction {
    if r.is_integer() {
        Fraction::Integer(r.numer().clone())
    } else {
        Fraction::Ratio(r.numer().clone(), r.denom().clone())
    }
}

fn to_fraction_value(value: &Value) -> FractionValue {
    match value {
        Value::Integer(z) => FractionValue::Scalar(Fraction::Integer(z.clone())),
        Value::Rational(r, _) => FractionValue::Scalar(to_fraction(r)),
        Value::Interval(i, _) => FractionValue::Interval(FractionInterval {
            lo: to_fraction(i.lo()),
            hi: to_fraction(i.hi()),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interpolates_values_and_parses() {
        let opts = ParserOptions::default();
        let a = 3;
        let b = 4;
        let value = parse_template(&["", " + ", ""], &[&a, &b], &opts).unwrap();
        assert_eq!(value, Value::integer(7));
    }

    #[test]
    fn fraction_domain_reports_numerator_and_denominator() {
        let opts = ParserOptions::default();
        let value = parse_template_fraction(&["1/3"], &[], &opts).unwrap();
        assert_eq!(
            value,
            FractionValue::Scalar(Fraction::Ratio(1.into(), 3.into()))
        );
    }
}
