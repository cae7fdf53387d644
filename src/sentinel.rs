//! Whitespace-sentinel preprocessing: the two textual rewrites that
//! resolve grammar ambiguity before the character grammar ever sees the
//! input, per §4.C.
//!
//! `" E"` (a space immediately before a capital `E`) always means "this
//! `E` is the multiplicative operator", never tight scientific notation.
//! `"/ "` (a slash immediately before a space) always means "this `/` is
//! the division operator", never a fraction literal's separator. Both
//! rewrites replace the disambiguating space with a private-use sentinel
//! character so the space itself disappears (matching ordinary whitespace
//! handling elsewhere) while the distinction survives into the scanner.

/// Marks an `E` that must be read as the multiplicative operator rather
/// than tight scientific notation. Stands in for the space that preceded
/// it in the original text.
pub const SPACED_E: char = '\u{E000}';

/// Marks a `/` that must be read as the division operator rather than a
/// fraction literal's separator. Stands in for the space that followed it
/// in the original text.
pub const DIV_SPACE: char = '\u{E001}';

/// Applies both sentinel rewrites to `src`, returning an owned string with
/// the disambiguating spaces replaced. Idempotent: input already free of
/// `" E"` and `"/ "` is returned unchanged (aside from allocation).
pub fn rewrite(src: &str) -> String {
    src.replace(" E", &format!("{SPACED_E}E"))
        .replace("/ ", &format!("/{DIV_SPACE}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn marks_spaced_e() {
        let out = rewrite("2 E3");
        assert_eq!(out, format!("2{SPACED_E}E3"));
    }

    #[test]
    fn marks_division_slash() {
        let out = rewrite("1/ 2");
        assert_eq!(out, format!("1/{DIV_SPACE}2"));
    }

    #[test]
    fn leaves_tight_forms_alone() {
        assert_eq!(rewrite("2E3"), "2E3");
        assert_eq!(rewrite("1/2"), "1/2");
    }
}
