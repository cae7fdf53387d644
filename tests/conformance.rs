//! Black-box conformance tests against the crate's public API only,
//! covering the textual forms and error kinds enumerated in the
//! specification's scenario table.

use ratex::error::ErrorKind;
use ratex::{parse, ParserOptions, Value};

fn parses_to_integer(expr: &str, expected: i64) {
    let value = parse(expr, &ParserOptions::default()).unwrap_or_else(|e| panic!("{expr}: {e}"));
    assert_eq!(value, Value::integer(expected), "parsing {expr:?}");
}

#[test]
fn whole_number_arithmetic() {
    parses_to_integer("1 + 1", 2);
    parses_to_integer("10 - 3", 7);
    parses_to_integer("6 * 7", 42);
    parses_to_integer("100 / 4", 25);
    parses_to_integer("2^10", 1024);
    parses_to_integer("4!", 24);
}

#[test]
fn mixed_fraction_and_decimal_literals_agree() {
    let a = parse("1/2 + 1/2", &ParserOptions::default()).unwrap();
    let b = parse("0.5 + 0.5", &ParserOptions::default()).unwrap();
    assert_eq!(a, Value::integer(1));
    assert_eq!(b, Value::integer(1));
}

#[test]
fn scientific_notation_in_arbitrary_base() {
    // base-10 scientific suffix
    let a = parse("1.5E2", &ParserOptions::default()).unwrap();
    assert_eq!(a, Value::integer(150));

    // any-base scientific suffix via `_^`
    let opts = ParserOptions {
        input_base: ratex::base::BaseSystem::hex(),
        ..ParserOptions::default()
    };
    let b = parse("1_^2", &opts).unwrap();
    assert_eq!(b, Value::integer(256)); // 1 * 16^2
}

#[test]
fn error_kinds_are_distinguishable() {
    let cases: &[(&str, ErrorKind)] = &[
        ("", ErrorKind::EmptyInput),
        ("1/0", ErrorKind::DivisionByZero),
        ("0^0", ErrorKind::ZeroToZero),
        ("2**0", ErrorKind::DomainError),
        ("(-1)!", ErrorKind::NegativeFactorial),
        ("1 +", ErrorKind::SyntaxError),
        ("0z9", ErrorKind::InvalidPrefix),
    ];
    for (expr, expected) in cases {
        let e = parse(expr, &ParserOptions::default())
            .expect_err(&format!("expected {expr:?} to fail"));
        assert_eq!(&e.kind, expected, "parsing {expr:?}");
    }
}

#[test]
fn type_aware_vs_compatibility_precision_modes() {
    let type_aware = ParserOptions::default();
    let compat = ParserOptions {
        type_aware: false,
        ..ParserOptions::default()
    };
    // In type-aware mode a terminating decimal is exact.
    let exact = parse("0.1", &type_aware).unwrap();
    assert!(matches!(exact, Value::Rational(_, _)));
    // In compatibility mode the same literal widens to an interval bracketing
    // the floating-point-like last-digit uncertainty.
    let bracketed = parse("0.1", &compat).unwrap();
    assert!(matches!(bracketed, Value::Interval(_, _)));
}
