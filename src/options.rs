//! Parser configuration.

use crate::base::BaseSystem;
use crate::numeric::{Precision, DEFAULT_PRECISION};

/// Options governing a single [`crate::parse`] call.
///
/// Mirrors the teacher crate's split between "what's legal" and "how to
/// parse": here there is only one grammar, so the split collapses to a
/// flat options struct, but the fields play the same role as
/// `Syntax`/`ParseConfig` did for integer literals.
#[derive(Clone, Debug)]
pub struct ParserOptions {
    /// Whether to apply type-aware promotion (§4.D). When `false`, every
    /// result is coerced to a point `Interval`, and non-repeating decimals
    /// decode as uncertainty intervals instead of exact rationals.
    pub type_aware: bool,
    /// The base used to decode digit runs that do not carry an explicit
    /// prefix.
    pub input_base: BaseSystem,
    /// The precision context carried through transcendental calls: the
    /// target error is at most `input_base^precision`.
    pub precision: Precision,
}

impl Default for ParserOptions {
    fn default() -> Self {
        ParserOptions {
            type_aware: true,
            input_base: BaseSystem::decimal(),
            precision: DEFAULT_PRECISION,
        }
    }
}
