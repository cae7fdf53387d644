//! Crate-level integration tests over the concrete scenarios and bit-exact
//! textual forms in spec §6 and §8, colocated with the library the way
//! the teacher keeps its round-trip suite at `src/tests.rs`.

use rug::Integer;

use crate::base::BaseSystem;
use crate::options::ParserOptions;
use crate::value::Value;
use crate::{parse, ParseError};

fn v(expr: &str) -> Value {
    parse(expr, &ParserOptions::default()).unwrap_or_else(|e| panic!("parse({expr:?}): {e}"))
}

fn err(expr: &str) -> ParseError {
    parse(expr, &ParserOptions::default()).expect_err(&format!("expected {expr:?} to fail"))
}

#[test]
fn concrete_scenarios_from_the_spec() {
    assert_eq!(v("3/4 + 1/4"), Value::integer(1));
    assert_eq!(
        v("2..1/3"),
        Value::rational(crate::numeric::Rational::new(7.into(), 3.into()))
    );
    assert_eq!(v("0.#3 + 0.#6"), Value::integer(1));
    assert_eq!(v("0xFF - 0b101"), Value::integer(250));
    assert_eq!(
        v("3.~7~15~1~292"),
        Value::rational(crate::numeric::Rational::new(103993.into(), 33102.into()))
    );
    assert_eq!(
        v("5E-3"),
        Value::rational(crate::numeric::Rational::new(1.into(), 200.into()))
    );
}

#[test]
fn uncertainty_bracket_range() {
    let value = v("1.23[56,67]");
    match value {
        Value::Interval(i, _) => {
            assert_eq!(
                i.lo(),
                &crate::numeric::Rational::new(3089.into(), 2500.into())
            );
            assert_eq!(
                i.hi(),
                &crate::numeric::Rational::new(12367.into(), 10000.into())
            );
        }
        other => panic!("expected an interval, got {other:?}"),
    }
}

#[test]
fn multiplicative_power_stays_interval() {
    let value = v("2**3");
    match value {
        Value::Interval(i, _) => {
            assert_eq!(i.lo(), i.hi());
            assert_eq!(i.lo().to_integer(), Some(Integer::from(8)));
        }
        other => panic!("** must not promote to a scalar, got {other:?}"),
    }
}

#[test]
fn base_prefix_and_current_base_sentinel() {
    assert_eq!(v("0xFF"), Value::integer(255));
    assert_eq!(v("0b101"), Value::integer(5));
    assert_eq!(v("0o17"), Value::integer(15));

    let opts = ParserOptions {
        input_base: BaseSystem::from_base(3).unwrap(),
        ..ParserOptions::default()
    };
    let value = parse("0D12", &opts).unwrap();
    assert_eq!(value, Value::integer(5));

    // spec concrete scenario: the pre-registered `t` (ternary) prefix,
    // independent of `0D`'s "use the current input base" sentinel.
    let value = parse("0t12", &opts).unwrap();
    assert_eq!(value, Value::integer(5));
}

#[test]
fn explicit_interval_never_collapses() {
    let value = v("2:2");
    assert!(matches!(value, Value::Interval(_, _)));
}

#[test]
fn explicit_fraction_never_collapses() {
    let value = v("4/1");
    assert!(matches!(value, Value::Rational(_, _)));
}

#[test]
fn arithmetic_precedence_and_associativity() {
    assert_eq!(v("2 + 3 * 4"), Value::integer(14));
    assert_eq!(v("2^3"), Value::integer(8));
    // a leading '-' immediately before a digit is read as part of the
    // literal itself, so "-2^2" is "(-2)^2", not "-(2^2)".
    assert_eq!(v("-2^2"), Value::integer(4));
    assert_eq!(v("5!"), Value::integer(120));
    assert_eq!(v("6!!"), Value::integer(48)); // double factorial: 6*4*2
}

#[test]
fn parenthesized_groups_and_functions() {
    assert_eq!(v("(2 + 3) * 2"), Value::integer(10));
    let pi = v("PI");
    assert!(matches!(pi, Value::Interval(_, _)));
}

#[test]
fn division_and_interval_slash_disambiguation() {
    // tight slash is a fraction literal
    assert_eq!(v("1/2"), Value::rational(crate::numeric::Rational::new(1.into(), 2.into())));
    // "/ " (slash then space) forces division, not a fraction separator
    assert_eq!(v("1/ 2"), Value::rational(crate::numeric::Rational::new(1.into(), 2.into())));
    assert_eq!(v("2/ 2"), Value::integer(1));
}

#[test]
fn empty_input_is_an_error() {
    let e = err("   ");
    assert_eq!(e.kind, crate::error::ErrorKind::EmptyInput);
}

#[test]
fn division_by_zero_is_an_error() {
    let e = err("1/0");
    assert_eq!(e.kind, crate::error::ErrorKind::DivisionByZero);
}

#[test]
fn zero_to_the_zero_is_an_error() {
    let e = err("0^0");
    assert_eq!(e.kind, crate::error::ErrorKind::ZeroToZero);
}

#[test]
fn negative_factorial_is_an_error() {
    let e = err("(-3)!");
    assert_eq!(e.kind, crate::error::ErrorKind::NegativeFactorial);
}

#[test]
fn unbalanced_parens_is_a_syntax_error() {
    let e = err("(1 + 2");
    assert_eq!(e.kind, crate::error::ErrorKind::SyntaxError);
}

#[test]
fn invalid_prefix_letter_is_an_error() {
    let e = err("0q5");
    assert_eq!(e.kind, crate::error::ErrorKind::InvalidPrefix);
}

#[test]
fn legacy_bracket_base_notation_is_flagged() {
    let e = err("255[16]");
    assert_eq!(e.kind, crate::error::ErrorKind::DeprecatedBracketBase);
}

#[test]
fn continued_fraction_rejects_trailing_one() {
    let e = err("3.~1");
    assert_eq!(e.kind, crate::error::ErrorKind::InvalidNumberFormat);
}

#[test]
fn scientific_notation_cannot_precede_an_uncertainty_bracket() {
    let e = err("1.23E5[6,7]");
    assert_eq!(e.kind, crate::error::ErrorKind::UnsupportedComposition);

    let e = err("0x1A_^2[3,4]");
    assert_eq!(e.kind, crate::error::ErrorKind::UnsupportedComposition);
}

#[test]
fn scientific_notation_after_an_uncertainty_bracket_is_fine() {
    let value = v("1.23[56,67]E1");
    match value {
        Value::Interval(i, _) => {
            assert_eq!(
                i.lo(),
                &crate::numeric::Rational::new(30890.into(), 2500.into())
            );
        }
        other => panic!("expected an interval, got {other:?}"),
    }
}

/// *Property 7*: when the mathematical sum of two operands is an integer,
/// parsing `"a + b"` with default options yields `Value::Integer`.
#[test]
fn property_arithmetic_agreement_under_promotion() {
    for (a, b) in [("1/3", "2/3"), ("0.5", "0.5"), ("-7", "7")] {
        let sum = v(&format!("{a} + {b}"));
        assert!(
            matches!(sum, Value::Integer(_)),
            "{a} + {b} should promote to an integer, got {sum:?}"
        );
    }
}

/// *Property 2*: a reversed interval literal normalizes to sorted order.
#[test]
fn property_interval_order_normalizes_reversed_endpoints() {
    let value = v("5:2");
    match value {
        Value::Interval(i, _) => {
            assert!(i.lo() <= i.hi());
            assert_eq!(i.lo().to_integer(), Some(Integer::from(2)));
            assert_eq!(i.hi().to_integer(), Some(Integer::from(5)));
        }
        other => panic!("expected an interval, got {other:?}"),
    }
}

/// *Property 4*: base round-trip for every base system toIneger/fromInteger.
#[test]
fn property_base_round_trip() {
    for base in [
        BaseSystem::binary(),
        BaseSystem::octal(),
        BaseSystem::decimal(),
        BaseSystem::hex(),
        BaseSystem::base36(),
        BaseSystem::base62(),
        BaseSystem::roman(),
    ] {
        for n in [0i64, 1, 2, 5, 42, 12345, -17] {
            let z = Integer::from(n);
            let s = base.from_integer(&z);
            let back = base.to_integer(&s).unwrap();
            assert_eq!(back, z, "base {} round-trip of {n}", base.name());
        }
    }
}

/// *Property 5*: repeating-decimal inversion for several rationals with
/// denominators coprime to 10.
#[test]
fn property_repeating_decimal_round_trip() {
    for (n, d) in [(1i64, 3i64), (2, 3), (22, 7), (1, 7), (5, 11)] {
        let r = crate::numeric::Rational::new(n.into(), d.into());
        let text = r.to_repeating_decimal_string();
        let expr = if text.contains('#') {
            text.clone()
        } else {
            format!("{text}#0")
        };
        let reparsed = v(&expr);
        let reparsed_rational = reparsed
            .as_point_rational()
            .unwrap_or_else(|| panic!("{expr} did not reparse to a scalar"));
        assert_eq!(reparsed_rational, r, "round-trip of {n}/{d} via {text:?}");
    }
}

/// *Property 6*: continued-fraction round-trip through canonical expansion.
#[test]
fn property_continued_fraction_round_trip() {
    for (n, d) in [(103993i64, 33102i64), (22, 7), (1, 2), (7, 1)] {
        let r = crate::numeric::Rational::new(n.into(), d.into());
        let terms = crate::numeric::from_rational(&r);
        let back = crate::numeric::to_rational(&terms);
        assert_eq!(back, r);
    }
}
