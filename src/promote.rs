//! Type-aware promotion: collapsing a point interval or an integer-valued
//! rational to the narrowest variant, unless provenance says to keep it
//! wide.

use enumset::EnumSet;

use crate::value::{Value, ValueFlag};

/// Applies the promotion ladder once, as the expression parser does after
/// every operator evaluation:
///
/// 1. A point interval whose value is an integer, carrying neither
///    `ExplicitInterval` nor `SkipPromotion`, becomes an `Integer`.
/// 2. Any other point interval becomes a `Rational`.
/// 3. A `Rational(p, 1)` without `ExplicitFraction` becomes an `Integer`.
/// 4. Otherwise the value is left unchanged.
///
/// When `type_aware` is `false`, promotion is skipped entirely and the
/// value is coerced to a point `Interval`, matching the legacy
/// uncertainty-interval-everywhere behavior described in the
/// specification's compatibility mode.
pub fn promote(value: Value, type_aware: bool) -> Value {
    if !type_aware {
        let flags = value.flags();
        return Value::interval_with(value.as_interval(), flags);
    }
    match value {
        Value::Interval(interval, flags) => {
            if interval.is_point() {
                let r = interval.lo().clone();
                let no_markers = !flags.contains(ValueFlag::ExplicitInterval)
                    && !flags.contains(ValueFlag::SkipPromotion);
                match r.to_integer() {
                    Some(z) if no_markers => {
                        log::trace!("promote: point interval {r} collapses to integer");
                        Value::Integer(z)
                    }
                    Some(_) => {
                        log::debug!("promote: point interval {r} kept wide by {flags:?}");
                        Value::Interval(interval, flags)
                    }
                    None => Value::Rational(r, EnumSet::empty()),
                }
            } else {
                Value::Interval(interval, flags)
            }
        }
        Value::Rational(r, flags) => {
            if r.is_integer() && !flags.contains(ValueFlag::ExplicitFraction) {
                Value::Integer(r.to_integer().expect("is_integer() just checked"))
            } else {
                if r.is_integer() {
                    log::debug!("promote: rational {r} kept wide by ExplicitFraction");
                }
                Value::Rational(r, flags)
            }
        }
        integer @ Value::Integer(_) => integer,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::numeric::{Interval, Rational};
    use rug::Integer;

    #[test]
    fn integer_point_interval_collapses() {
        let v = Value::interval(Interval::point(Rational::from_integer(Integer::from(5))));
        assert_eq!(promote(v, true), Value::integer(5));
    }

    #[test]
    fn explicit_interval_integer_point_stays_interval() {
        let flags = EnumSet::only(ValueFlag::ExplicitInterval);
        let v = Value::interval_with(
            Interval::point(Rational::from_integer(Integer::from(5))),
            flags,
        );
        assert!(matches!(promote(v, true), Value::Interval(_, _)));
    }

    #[test]
    fn non_integer_point_interval_becomes_rational() {
        let r = Rational::new(Integer::from(1), Integer::from(2));
        let v = Value::interval(Interval::point(r));
        assert!(matches!(promote(v, true), Value::Rational(_, _)));
    }

    #[test]
    fn explicit_fraction_does_not_collapse() {
        let flags = EnumSet::only(ValueFlag::ExplicitFraction);
        let v = Value::rational_with(Rational::from_integer(Integer::from(4)), flags);
        assert!(matches!(promote(v, true), Value::Rational(_, _)));
    }
}
