//! The recursive-descent expression parser (§4.C): the grammar that ties
//! literal decoding, arithmetic, factorials, exponentiation and named
//! function calls together into one evaluator.

use enumset::EnumSet;
use rug::Integer;

use crate::base::PrefixRegistry;
use crate::decode::decode_literal;
use crate::error::{ErrorKind, ParseError};
use crate::numeric::{Interval, NewtonTranscendentals, Precision, Rational, Transcendental};
use crate::options::ParserOptions;
use crate::promote::promote;
use crate::scan::Scanner;
use crate::sentinel::{self, DIV_SPACE, SPACED_E};
use crate::value::{Value, ValueFlag};

/// Recursion depth above which the parser gives up rather than risk stack
/// exhaustion on pathological nesting of parenthesized groups, per §5.
const MAX_DEPTH: u32 = 256;

/// Parses `expression` under `opts`, driving the full grammar in §4.C.
///
/// Applies the whitespace-sentinel rewrite once up front, then recursive-
/// descends over the rewritten text. The first error short-circuits the
/// whole parse; there is no recovery and no partial result.
pub fn parse(expression: &str, opts: &ParserOptions) -> Result<Value, ParseError> {
    if expression.trim().is_empty() {
        return Err(ParseError::new(ErrorKind::EmptyInput, "", 0));
    }
    let rewritten = sentinel::rewrite(expression);
    let registry = PrefixRegistry::snapshot();
    let mut parser = Parser {
        sc: Scanner::new(&rewritten),
        registry,
        opts,
        depth: 0,
    };
    parser.skip_ws();
    let value = parser.parse_expr()?;
    parser.skip_ws();
    if !parser.sc.eof() {
        return Err(ParseError::new(
            ErrorKind::SyntaxError,
            format!("trailing input: {:?}", parser.sc.rest()),
            parser.sc.offset(),
        ));
    }
    Ok(value)
}

struct Parser<'s> {
    sc: Scanner<'s>,
    registry: PrefixRegistry,
    opts: &'s ParserOptions,
    depth: u32,
}

impl<'s> Parser<'s> {
    fn skip_ws(&mut self) {
        self.sc.bump_while(|c| c.is_whitespace());
    }

    fn enter(&mut self) -> Result<(), ParseError> {
        self.depth += 1;
        if self.depth > MAX_DEPTH {
            return Err(ParseError::new(
                ErrorKind::SyntaxError,
                "expression nested too deeply",
                self.sc.offset(),
            ));
        }
        Ok(())
    }

    fn leave(&mut self) {
        self.depth -= 1;
    }

    /// `expr := term (('+' | '-') term)*`
    fn parse_expr(&mut self) -> Result<Value, ParseError> {
        self.enter()?;
        let mut value = self.parse_term()?;
        loop {
            self.skip_ws();
            if self.sc.bump_if(|c| c == '+') {
                self.skip_ws();
                let rhs = self.parse_term()?;
                let result = value.as_interval().add(&rhs.as_interval());
                value = promote(Value::interval(result), self.opts.type_aware);
            } else if self.sc.bump_if(|c| c == '-') {
                self.skip_ws();
                let rhs = self.parse_term()?;
                let result = value.as_interval().sub(&rhs.as_interval());
                value = promote(Value::interval(result), self.opts.type_aware);
            } else {
                break;
            }
        }
        self.leave();
        Ok(value)
    }

    /// `term := factor (('*' | '/' | 'E') factor)*`, where a bare `E` only
    /// participates here when it carries the spaced-E sentinel; a tight
    /// `E` was already consumed as scientific notation while decoding the
    /// preceding literal.
    fn parse_term(&mut self) -> Result<Value, ParseError> {
        self.enter()?;
        let mut value = self.parse_factor()?;
        loop {
            self.skip_ws();
            if self.sc.bump_if(|c| c == '*') {
                self.skip_ws();
                let rhs = self.parse_factor()?;
                value = promote(
                    mul(&value, &rhs, self.sc.offset())?,
                    self.opts.type_aware,
                );
            } else if self.sc.starts_with("/") {
                self.sc.bump();
                self.sc.bump_if(|c| c == DIV_SPACE);
                self.skip_ws();
                let rhs = self.parse_factor()?;
                value = promote(div(&value, &rhs, self.sc.offset())?, self.opts.type_aware);
            } else if self.sc.starts_with_sentinel_e() {
                self.sc.bump();
                self.sc.bump();
                self.skip_ws();
                let rhs = self.parse_factor()?;
                value = promote(
                    spaced_scientific(&value, &rhs, self.sc.offset())?,
                    self.opts.type_aware,
                );
            } else {
                break;
            }
        }
        self.leave();
        Ok(value)
    }

    /// `factor := unary ((postfix-ops | '^' exponent | '**' exponent)?)`
    fn parse_factor(&mut self) -> Result<Value, ParseError> {
        self.enter()?;
        let mut value = self.parse_unary()?;
        value = self.parse_postfix(value)?;
        self.skip_ws();
        if self.sc.bump_str("**") {
            self.skip_ws();
            let at = self.sc.offset();
            let exponent = self.parse_exponent()?;
            value = promote(mpow(&value, &exponent, at)?, self.opts.type_aware);
        } else if self.sc.bump_if(|c| c == '^') {
            self.skip_ws();
            let at = self.sc.offset();
            let exponent = self.parse_exponent()?;
            value = promote(pow(&value, &exponent, at, self.opts.precision)?, self.opts.type_aware);
        }
        self.leave();
        Ok(value)
    }

    /// `exponent := integer-literal | '(' expr ')' | factor`, preferring a
    /// bare (optionally signed) integer literal when the text allows it.
    fn parse_exponent(&mut self) -> Result<Value, ParseError> {
        let save = self.sc.offset();
        let negative = self.sc.bump_if(|c| c == '-');
        let digits = self.sc.bump_while(|c| c.is_ascii_digit());
        if !digits.is_empty() {
            let mut z: Integer = digits.parse().unwrap_or_default();
            if negative {
                z = -z;
            }
            return Ok(Value::Integer(z));
        }
        self.sc.seek(save);
        self.parse_factor()
    }

    /// `unary := '-' factor | atom`. A leading `-` belongs to the literal
    /// itself (and is handled inside [`decode_literal`]) whenever what
    /// follows looks like a number; only then does it fall back to the
    /// parser's own negation.
    fn parse_unary(&mut self) -> Result<Value, ParseError> {
        self.skip_ws();
        if self.sc.starts_with("-") && !looks_like_literal(self.sc.peek_at(1)) {
            self.sc.bump();
            self.skip_ws();
            let at = self.sc.offset();
            let value = self.parse_factor()?;
            return Ok(promote(negate(&value, at)?, self.opts.type_aware));
        }
        self.parse_atom()
    }

    /// Applies any run of postfix `!`/`!!` operators, preferring the
    /// greedy `!!` (double factorial) at each step, per §4.C.
    fn parse_postfix(&mut self, mut value: Value) -> Result<Value, ParseError> {
        loop {
            if self.sc.bump_str("!!") {
                let at = self.sc.offset();
                value = promote(double_factorial(&value, at)?, self.opts.type_aware);
            } else if self.sc.bump_if(|c| c == '!') {
                let at = self.sc.offset();
                value = promote(factorial(&value, at)?, self.opts.type_aware);
            } else {
                break;
            }
        }
        Ok(value)
    }

    /// `atom := '(' expr ')' | function-call | constant | literal`
    fn parse_atom(&mut self) -> Result<Value, ParseError> {
        self.skip_ws();
        let at = self.sc.offset();
        if self.sc.bump_if(|c| c == '(') {
            self.skip_ws();
            let value = self.parse_expr()?;
            self.skip_ws();
            if !self.sc.bump_if(|c| c == ')') {
                return Err(ParseError::new(
                    ErrorKind::SyntaxError,
                    "unbalanced parentheses",
                    self.sc.offset(),
                ));
            }
            return Ok(value);
        }
        if self.sc.peek().is_some_and(|c| c.is_ascii_alphabetic()) {
            return self.parse_function_or_constant();
        }
        let rest = self.sc.rest();
        let (value, consumed) = decode_literal(rest, &self.registry, self.opts)
            .map_err(|e| offset_error(e, at))?;
        if consumed == 0 {
            return Err(ParseError::new(
                ErrorKind::SyntaxError,
                format!("expected an expression, found {:?}", rest),
                at,
            ));
        }
        self.sc.seek(at + consumed);
        Ok(value)
    }

    fn parse_function_or_constant(&mut self) -> Result<Value, ParseError> {
        let at = self.sc.offset();
        let name_text = self.sc.bump_while(|c| c.is_ascii_alphabetic());
        let name = name_text.to_ascii_uppercase();

        let mut precision = self.opts.precision;
        if self.sc.starts_with("[") {
            precision = self.parse_precision_bracket()?;
        }

        if (name == "PI" || name == "E") && !self.sc.starts_with("(") {
            let t = NewtonTranscendentals;
            let interval = if name == "PI" { t.pi(precision) } else { t.e(precision) };
            return Ok(Value::interval_with(
                interval,
                EnumSet::only(ValueFlag::ExplicitInterval),
            ));
        }

        if !self.sc.bump_if(|c| c == '(') {
            return Err(ParseError::new(
                ErrorKind::InvalidPrefix,
                format!("unknown identifier {name_text:?}"),
                at,
            ));
        }
        let mut args = Vec::new();
        self.skip_ws();
        if !self.sc.starts_with(")") {
            loop {
                args.push(self.parse_expr()?);
                self.skip_ws();
                if self.sc.bump_if(|c| c == ',') {
                    self.skip_ws();
                    continue;
                }
                break;
            }
        }
        if !self.sc.bump_if(|c| c == ')') {
            return Err(ParseError::new(
                ErrorKind::SyntaxError,
                "unbalanced parentheses in function call",
                self.sc.offset(),
            ));
        }
        call_function(&name, &args, precision, self.sc.offset())
    }

    fn parse_precision_bracket(&mut self) -> Result<Precision, ParseError> {
        self.sc.bump(); // '['
        let negative = self.sc.bump_if(|c| c == '-');
        self.sc.bump_if(|c| c == '+');
        let digits = self.sc.bump_while(|c| c.is_ascii_digit());
        if digits.is_empty() || !self.sc.bump_if(|c| c == ']') {
            return Err(ParseError::new(
                ErrorKind::SyntaxError,
                "malformed precision bracket",
                self.sc.offset(),
            ));
        }
        let mut p: Precision = digits.parse().unwrap_or(0);
        if negative {
            p = -p;
        }
        Ok(p)
    }
}

/// Whether the character following a `-` looks like the start of a literal
/// this sign should belong to (a digit, or the `0<letter>` base prefix),
/// per §4.C's unary-minus exception.
fn looks_like_literal(next: Option<char>) -> bool {
    matches!(next, Some(c) if c.is_ascii_digit())
}

trait ScannerExt {
    fn starts_with_sentinel_e(&self) -> bool;
}

impl ScannerExt for Scanner<'_> {
    fn starts_with_sentinel_e(&self) -> bool {
        self.starts_with(&format!("{SPACED_E}E"))
    }
}

fn offset_error(e: ParseError, at: usize) -> ParseError {
    ParseError::new(e.kind, e.context, at + e.at)
}

fn mul(a: &Value, b: &Value, _at: usize) -> Result<Value, ParseError> {
    Ok(Value::interval(a.as_interval().mul(&b.as_interval())))
}

fn div(a: &Value, b: &Value, at: usize) -> Result<Value, ParseError> {
    a.as_interval()
        .div(&b.as_interval())
        .map(Value::interval)
        .map_err(|e| math_error(e, at))
}

/// `a E b` (spaced): multiply the whole accumulated term by `10^b`,
/// scaling both endpoints rather than binding only to the adjacent
/// literal, per §4.C.
fn spaced_scientific(a: &Value, b: &Value, at: usize) -> Result<Value, ParseError> {
    let exp = b.as_point_rational().and_then(|r| r.to_integer()).ok_or_else(|| {
        ParseError::new(
            ErrorKind::UnsupportedComposition,
            "scientific exponent must be an integer",
            at,
        )
    })?;
    let exp = exp.to_i64().ok_or_else(|| {
        ParseError::new(ErrorKind::UnsupportedComposition, "exponent too large", at)
    })?;
    let factor = Rational::from_integer(Integer::from(10))
        .pow(exp)
        .ok_or_else(|| ParseError::new(ErrorKind::DivisionByZero, "10 to a negative power", at))?;
    Ok(Value::interval(a.as_interval().scale(&factor)))
}

fn negate(value: &Value, _at: usize) -> Result<Value, ParseError> {
    // A Rational stays a Rational (its flags, notably ExplicitFraction,
    // would otherwise be silently lost by widening through Interval, whose
    // promotion arm only ever checks ExplicitInterval/SkipPromotion).
    if let Value::Rational(r, flags) = value {
        return Ok(Value::Rational(r.negate(), *flags));
    }
    let neg_one = Rational::from_integer(Integer::from(-1));
    Ok(Value::interval_with(
        value.as_interval().scale(&neg_one),
        value.flags(),
    ))
}

fn factorial(value: &Value, at: usize) -> Result<Value, ParseError> {
    let n = non_negative_integer(value, at)?;
    let n32 = n.to_u32().ok_or_else(|| {
        ParseError::new(ErrorKind::DomainError, "factorial argument too large", at)
    })?;
    let z = Integer::from(Integer::factorial(n32));
    Ok(Value::interval(Interval::point(Rational::from_integer(z))))
}

fn double_factorial(value: &Value, at: usize) -> Result<Value, ParseError> {
    let n = non_negative_integer(value, at)?;
    let n32 = n.to_u32().ok_or_else(|| {
        ParseError::new(ErrorKind::DomainError, "factorial argument too large", at)
    })?;
    let z = Integer::from(Integer::factorial_2(n32));
    Ok(Value::interval(Interval::point(Rational::from_integer(z))))
}

fn non_negative_integer(value: &Value, at: usize) -> Result<Integer, ParseError> {
    let r = value.as_point_rational().ok_or_else(|| {
        ParseError::new(ErrorKind::NegativeFactorial, "factorial of a non-point interval", at)
    })?;
    match r.to_integer() {
        Some(z) if z >= 0 => Ok(z),
        _ => Err(ParseError::new(
            ErrorKind::NegativeFactorial,
            "factorial requires a non-negative integer",
            at,
        )),
    }
}

/// `^`: integer exponents use repeated squaring on the widened interval;
/// non-integer exponents delegate to the transcendental power routine,
/// whose result carries `skip_promotion`.
fn pow(base: &Value, exponent: &Value, at: usize, precision: Precision) -> Result<Value, ParseError> {
    let exp_r = exponent
        .as_point_rational()
        .ok_or_else(|| ParseError::new(ErrorKind::UnsupportedComposition, "exponent must be a point value", at))?;
    if let Some(exp_z) = exp_r.to_integer() {
        let exp_i64 = exp_z.to_i64().ok_or_else(|| {
            ParseError::new(ErrorKind::UnsupportedComposition, "exponent too large", at)
        })?;
        let base_i = base.as_interval();
        return base_i.pow(exp_i64).map(Value::interval).map_err(|e| math_error(e, at));
    }
    let t = NewtonTranscendentals;
    let result = t
        .rational_interval_power(&base.as_interval(), &exp_r, precision)
        .map_err(|e| offset_error(e, at))?;
    Ok(Value::interval_with(result, EnumSet::only(ValueFlag::SkipPromotion)))
}

/// `**`: endpoint-wise multiplicative power, never promoted away.
fn mpow(base: &Value, exponent: &Value, at: usize) -> Result<Value, ParseError> {
    let exp_r = exponent
        .as_point_rational()
        .ok_or_else(|| ParseError::new(ErrorKind::UnsupportedComposition, "exponent must be a point value", at))?;
    let base_i = base.as_interval();
    if let Some(exp_z) = exp_r.to_integer() {
        let exp_i64 = exp_z.to_i64().ok_or_else(|| {
            ParseError::new(ErrorKind::UnsupportedComposition, "exponent too large", at)
        })?;
        if exp_i64 == 0 {
            return Err(ParseError::new(
                ErrorKind::DomainError,
                "** requires at least one factor (zero exponent)",
                at,
            ));
        }
        let result = base_i.mpow(exp_i64).map_err(|e| math_error(e, at))?;
        return Ok(Value::interval_with(result, EnumSet::only(ValueFlag::SkipPromotion)));
    }
    let q = exp_r.denom().to_i64().unwrap_or(0).abs();
    if !(2..=10).contains(&q) {
        return Err(ParseError::new(
            ErrorKind::DomainError,
            "** with a rational exponent needs a root degree from 2 to 10",
            at,
        ));
    }
    let p = exp_r.numer().to_i64().unwrap_or(0);
    let t = NewtonTranscendentals;
    let rooted = t
        .newton_root(&base_i, q, crate::numeric::DEFAULT_PRECISION)
        .map_err(|e| offset_error(e, at))?;
    let result = rooted.mpow(p).map_err(|e| math_error(e, at))?;
    Ok(Value::interval_with(result, EnumSet::only(ValueFlag::SkipPromotion)))
}

fn math_error(e: crate::numeric::MathError, at: usize) -> ParseError {
    use crate::numeric::MathError::*;
    let kind = match e {
        DivisionByZero => ErrorKind::DivisionByZero,
        IntervalDivisionByZero => ErrorKind::IntervalDivisionByZero,
        ZeroToZero => ErrorKind::ZeroToZero,
    };
    ParseError::new(kind, e.to_string(), at)
}

fn call_function(
    name: &str,
    args: &[Value],
    precision: Precision,
    at: usize,
) -> Result<Value, ParseError> {
    let t = NewtonTranscendentals;
    let arg = |i: usize| -> Result<Interval, ParseError> {
        args.get(i)
            .map(Value::as_interval)
            .ok_or_else(|| ParseError::new(ErrorKind::SyntaxError, format!("{name} requires an argument"), at))
    };
    let explicit = EnumSet::only(ValueFlag::ExplicitInterval);
    let result = match name {
        "EXP" => t.exp(&arg(0)?, precision),
        "LN" => t.ln(&arg(0)?, precision).map_err(|e| offset_error(e, at))?,
        "LOG" => {
            let x = arg(0)?;
            let base = if args.len() > 1 {
                arg(1)?
            } else {
                Interval::point(Rational::from_integer(Integer::from(10)))
            };
            t.log(&x, &base, precision).map_err(|e| offset_error(e, at))?
        }
        "SIN" => t.sin(&arg(0)?, precision),
        "COS" => t.cos(&arg(0)?, precision),
        "TAN" => t.tan(&arg(0)?, precision),
        "ARCSIN" => t.arcsin(&arg(0)?, precision).map_err(|e| offset_error(e, at))?,
        "ARCCOS" => t.arccos(&arg(0)?, precision).map_err(|e| offset_error(e, at))?,
        "ARCTAN" => t.arctan(&arg(0)?, precision),
        _ => {
            return Err(ParseError::new(
                ErrorKind::InvalidPrefix,
                format!("unknown function {name:?}"),
                at,
            ))
        }
    };
    Ok(Value::interval_with(result, explicit))
}
