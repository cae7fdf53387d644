//! Preset digit alphabets for common bases.

use super::{BaseSystem, BaseSystemError};

/// The standard digit alphabet `0-9a-zA-Z`, usable for any base from 2 up
/// to its length (62).
const STANDARD_62: &str =
    "0123456789abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// The seven Roman numeral digits, used by [`BaseSystem::roman`]. Roman
/// numerals are not positional in the usual sense, but the reference
/// treats the digit set `IVXLCDM` as a base-7 alphabet for the purposes of
/// the `toInteger`/`fromInteger` contract; additive/subtractive grouping
/// is outside that contract.
pub const ROMAN_DIGITS: &str = "IVXLCDM";

/// Returns the first `base` characters of the standard `0-9a-zA-Z`
/// alphabet, for `base` in `2..=62`.
pub fn digits_for_base(base: u32) -> Option<Vec<char>> {
    if (2..=62).contains(&base) {
        Some(STANDARD_62.chars().take(base as usize).collect())
    } else {
        None
    }
}

impl BaseSystem {
    /// Constructs the standard base system for `base`, using digits
    /// `0-9a-zA-Z`, for any `base` in `2..=62`.
    pub fn from_base(base: u32) -> Result<Self, BaseSystemError> {
        let digits = digits_for_base(base).ok_or(BaseSystemError::TooFewDigits(base as usize))?;
        BaseSystem::new(format!("base{base}"), digits)
    }

    /// The binary (base 2) system, digits `01`.
    pub fn binary() -> Self {
        BaseSystem::from_base(2).expect("base 2 is always valid")
    }

    /// The octal (base 8) system, digits `0-7`.
    pub fn octal() -> Self {
        BaseSystem::from_base(8).expect("base 8 is always valid")
    }

    /// The decimal (base 10) system, digits `0-9`.
    pub fn decimal() -> Self {
        BaseSystem::from_base(10).expect("base 10 is always valid")
    }

    /// The ternary (base 3) system, digits `012`.
    pub fn ternary() -> Self {
        BaseSystem::from_base(3).expect("base 3 is always valid")
    }

    /// The hexadecimal (base 16) system, digits `0-9a-f` (case-insensitive).
    ///
    /// Case-insensitivity falls out of [`BaseSystem::new`] automatically,
    /// since `0-9a-f` is a single-case alphabet; no extra step is needed
    /// here.
    pub fn hex() -> Self {
        BaseSystem::new("hex", "0123456789abcdef".chars().collect())
            .expect("base 16 is always valid")
    }

    /// The base-36 system, digits `0-9a-z` (case-insensitive).
    pub fn base36() -> Self {
        BaseSystem::from_base(36).expect("base 36 is always valid")
    }

    /// The base-60 (sexagesimal) system, digits `0-9a-zA-Z` truncated to 60.
    pub fn base60() -> Self {
        BaseSystem::from_base(60).expect("base 60 is always valid")
    }

    /// The base-62 system, the full `0-9a-zA-Z` alphabet.
    pub fn base62() -> Self {
        BaseSystem::from_base(62).expect("base 62 is always valid")
    }

    /// The Roman numeral digit set `IVXLCDM`, treated as a base-7 alphabet
    /// per the `toInteger`/`fromInteger` contract.
    pub fn roman() -> Self {
        BaseSystem::new("roman", ROMAN_DIGITS.chars().collect())
            .expect("the roman digit set contains no reserved symbols or duplicates")
    }
}
