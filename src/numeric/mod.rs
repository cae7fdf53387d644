//! The exact-rational and interval algebra the parser builds on.
//!
//! The specification treats this as an external collaborator and only
//! specifies its contract (§6): no published crate implements exact
//! rational *interval* arithmetic with this exact contract, so it is
//! implemented here, on top of [`rug`]'s arbitrary-precision integers and
//! rationals rather than hand-rolled bignum arithmetic.

mod continued_fraction;
mod interval;
mod rational;
mod transcendental;

pub use continued_fraction::{from_rational, parse_continued_fraction, to_rational};
pub use interval::{Interval, MathError};
pub use rational::Rational;
pub use transcendental::{NewtonTranscendentals, Precision, Transcendental, DEFAULT_PRECISION};
