//! Base systems: immutable digit alphabets and the process-wide prefix
//! registry that maps a single letter (`x`, `b`, `o`, …) to one.

mod presets;
mod registry;

use std::collections::HashMap;
use std::sync::Arc;

use derive_more::Display;
use rug::Integer;

pub use registry::{register_prefix, unregister_prefix, PrefixRegistry};

/// Characters that the grammar reserves for its own syntax. No digit
/// alphabet may contain one of these: `+ - * / ^ ! ( ) [ ] : . # ~`.
pub const RESERVED_SYMBOLS: &[char] = &[
    '+', '-', '*', '/', '^', '!', '(', ')', '[', ']', ':', '.', '#', '~',
];

/// A sanity threshold above which [`BaseSystem::new`] logs a warning (but
/// still constructs the system) about an unusually large base.
pub const LARGE_BASE_WARNING_THRESHOLD: usize = 1000;

/// An immutable digit alphabet: an ordered list of distinct characters,
/// a forward map from character to digit value, and a name.
///
/// A `BaseSystem` is a value type; constructing one validates the digit
/// list once, and every subsequent `to_integer`/`from_integer` call reuses
/// the precomputed forward map.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BaseSystem {
    name: String,
    digits: Vec<char>,
    forward: HashMap<char, u32>,
}

/// An error constructing a [`BaseSystem`].
#[derive(Clone, Debug, Display, PartialEq, Eq)]
pub enum BaseSystemError {
    /// Fewer than two digits were given.
    #[display("a base system needs at least 2 digits, got {_0}")]
    TooFewDigits(usize),
    /// The digit list contained one or more reserved grammar symbols.
    #[display("digit alphabet contains reserved symbols: {}", offenders.iter().collect::<String>())]
    ReservedSymbols {
        /// Every offending character, in the order they appeared.
        offenders: Vec<char>,
    },
    /// The digit list contained a duplicate character.
    #[display("duplicate digit {_0:?} in alphabet")]
    DuplicateDigit(char),
}

impl BaseSystem {
    /// Constructs a base system from an ordered list of distinct digit
    /// characters, where the digit at index `i` has value `i`.
    ///
    /// Fails if there are fewer than two digits, if any digit is a reserved
    /// grammar symbol (every offender is listed, not just the first), or if
    /// the list contains a duplicate. Logs a warning, but still succeeds,
    /// when the base is unusually large or the character range is highly
    /// non-contiguous (neither condition is a validity error, only a
    /// hint that the caller may have passed the wrong alphabet).
    ///
    /// When the resulting alphabet uses only one case per letter, digit
    /// recognition is made case-insensitive automatically (§4.B.2: "Digit
    /// recognition is case-insensitive when the base alphabet uses only one
    /// case"), rather than leaving callers to opt in per preset.
    pub fn new(name: impl Into<String>, digits: Vec<char>) -> Result<Self, BaseSystemError> {
        let name = name.into();
        if digits.len() < 2 {
            return Err(BaseSystemError::TooFewDigits(digits.len()));
        }
        let offenders: Vec<char> = digits
            .iter()
            .copied()
            .filter(|ch| RESERVED_SYMBOLS.contains(ch))
            .collect();
        if !offenders.is_empty() {
            return Err(BaseSystemError::ReservedSymbols { offenders });
        }
        let mut forward = HashMap::with_capacity(digits.len());
        for (value, &ch) in digits.iter().enumerate() {
            if forward.insert(ch, value as u32).is_some() {
                return Err(BaseSystemError::DuplicateDigit(ch));
            }
        }
        if digits.len() > LARGE_BASE_WARNING_THRESHOLD {
            log::warn!(
                "base system {name:?} has an unusually large alphabet ({} digits)",
                digits.len()
            );
        } else if !is_contiguous(&digits) {
            log::debug!("base system {name:?} has a non-contiguous digit range");
        }
        let base = BaseSystem {
            name,
            digits,
            forward,
        };
        if base.digits.iter().any(char::is_ascii_alphabetic) && base.is_single_case() {
            Ok(base.case_insensitive())
        } else {
            Ok(base)
        }
    }

    /// The base (number of digits) of this system.
    #[inline]
    pub fn base(&self) -> u32 {
        self.digits.len() as u32
    }

    /// The friendly name of this base system.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the digit value of a character, if it belongs to this
    /// alphabet.
    #[inline]
    pub fn digit_value(&self, ch: char) -> Option<u32> {
        self.forward.get(&ch).copied()
    }

    /// Returns whether every character in `s` (after an optional leading
    /// `-`) is a valid digit for this base, and `s` is non-empty past the
    /// sign. Used by decoders to peek at candidate digit runs.
    pub fn is_valid(&self, s: &str) -> bool {
        let s = s.strip_prefix('-').unwrap_or(s);
        !s.is_empty() && s.chars().all(|ch| self.forward.contains_key(&ch))
    }

    /// Parses a signed integer written in this base.
    ///
    /// Strips an optional leading `-`, rejects an empty digit run, and maps
    /// each digit through the forward table, failing with the offending
    /// character on the first invalid digit.
    pub fn to_integer(&self, s: &str) -> Result<Integer, InvalidDigit> {
        let (negative, digits) = match s.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, s),
        };
        if digits.is_empty() {
            return Err(InvalidDigit {
                ch: None,
                base: self.base(),
            });
        }
        let base = Integer::from(self.base());
        let mut value = Integer::new();
        for ch in digits.chars() {
            let Some(digit) = self.digit_value(ch) else {
                return Err(InvalidDigit {
                    ch: Some(ch),
                    base: self.base(),
                });
            };
            value = value * &base + Integer::from(digit);
        }
        if negative {
            value = -value;
        }
        Ok(value)
    }

    /// Formats an integer in this base, using repeated division. `0` always
    /// maps to the string containing only the zero digit.
    pub fn from_integer(&self, z: &Integer) -> String {
        if *z == 0 {
            return self.digits[0].to_string();
        }
        let negative = *z < 0;
        let mut n = z.clone().abs();
        let base = Integer::from(self.base());
        let mut out = Vec::new();
        while n > 0 {
            let (q, r) = n.div_rem_euc(base.clone());
            out.push(self.digits[r.to_usize().unwrap()]);
            n = q;
        }
        if negative {
            out.push('-');
        }
        out.iter().rev().collect()
    }

    /// Returns a copy of this base system with a friendly name attached.
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Returns a reduced base system keeping only one case per letter, for
    /// permissive case-insensitive parsing of hex-like alphabets. If a
    /// letter appears in both cases mapping to *different* digit values,
    /// the lowercase mapping wins and the uppercase one is dropped instead
    /// of merged, since they cannot both collapse to one digit value.
    pub fn case_insensitive(&self) -> Self {
        let mut digits = Vec::with_capacity(self.digits.len());
        let mut seen = std::collections::HashSet::new();
        for &ch in &self.digits {
            let key = ch.to_ascii_lowercase();
            if ch.is_ascii_uppercase() && self.forward.contains_key(&key) {
                continue;
            }
            if seen.insert(key) {
                digits.push(ch);
            }
        }
        let mut forward = HashMap::with_capacity(digits.len());
        for (value, &ch) in digits.iter().enumerate() {
            forward.insert(ch, value as u32);
            if ch.is_ascii_alphabetic() {
                forward.insert(flip_case(ch), value as u32);
            }
        }
        BaseSystem {
            name: format!("{} (case-insensitive)", self.name),
            digits,
            forward,
        }
    }

    /// Whether this alphabet uses only one case per letter (i.e. it has no
    /// two characters that are the same letter in different cases), which
    /// is when unprefixed literal digit recognition may be case-insensitive
    /// per §4.B.2.
    pub fn is_single_case(&self) -> bool {
        let mut seen_lower = std::collections::HashSet::new();
        for &ch in &self.digits {
            if ch.is_ascii_alphabetic() {
                let lower = ch.to_ascii_lowercase();
                if !seen_lower.insert(lower) {
                    return false;
                }
            }
        }
        true
    }
}

fn flip_case(ch: char) -> char {
    if ch.is_ascii_uppercase() {
        ch.to_ascii_lowercase()
    } else {
        ch.to_ascii_uppercase()
    }
}

fn is_contiguous(digits: &[char]) -> bool {
    digits
        .windows(2)
        .all(|w| (w[1] as u32).saturating_sub(w[0] as u32) == 1)
}

/// A single invalid digit encountered while decoding an integer in a base.
#[derive(Clone, Copy, Debug, Display, PartialEq, Eq)]
#[display("invalid character {ch:?} for base {base}")]
pub struct InvalidDigit {
    /// The offending character, or `None` if the digit run was empty.
    pub ch: Option<char>,
    /// The base being decoded in.
    pub base: u32,
}

pub use presets::{digits_for_base, ROMAN_DIGITS};

/// A shared, reference-counted base system, as stored in the prefix
/// registry.
pub type SharedBase = Arc<BaseSystem>;
