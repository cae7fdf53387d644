//! Generic character scanning over the expression source text.

/// A scanner for reading characters from UTF-8 source text, tracking a
/// byte offset alongside the current position.
///
/// This is the one stateful primitive the parser and decoders share: each
/// decoder receives a `&str` slice (the unconsumed suffix) and returns how
/// many bytes it consumed, but internally most of them drive a `Scanner`
/// over that slice to avoid re-deriving char-boundary bookkeeping by hand.
#[derive(Clone, Debug)]
pub struct Scanner<'s> {
    src: &'s str,
    /// Byte offset of the current position into `src`.
    pos: usize,
}

impl<'s> Scanner<'s> {
    /// Constructs a new scanner over the given source text.
    #[inline]
    pub fn new(src: &'s str) -> Self {
        Scanner { src, pos: 0 }
    }

    /// Returns whether the scanner is at the end of the source.
    #[inline]
    pub fn eof(&self) -> bool {
        self.pos >= self.src.len()
    }

    /// Returns the current byte offset into the source.
    #[inline]
    pub fn offset(&self) -> usize {
        self.pos
    }

    /// Returns the unconsumed remainder of the source text.
    #[inline]
    pub fn rest(&self) -> &'s str {
        &self.src[self.pos..]
    }

    /// Returns the next char without consuming it.
    #[inline]
    pub fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    /// Returns the char `n` chars ahead without consuming anything.
    #[inline]
    pub fn peek_at(&self, n: usize) -> Option<char> {
        self.rest().chars().nth(n)
    }

    /// Returns whether the unconsumed remainder starts with the given
    /// string.
    #[inline]
    pub fn starts_with(&self, s: &str) -> bool {
        self.rest().starts_with(s)
    }

    /// Consumes and returns the next char.
    #[inline]
    pub fn bump(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.pos += ch.len_utf8();
        Some(ch)
    }

    /// Consumes the next char if it matches the predicate.
    #[inline]
    pub fn bump_if<F: FnOnce(char) -> bool>(&mut self, predicate: F) -> bool {
        match self.peek() {
            Some(ch) if predicate(ch) => {
                self.pos += ch.len_utf8();
                true
            }
            _ => false,
        }
    }

    /// Consumes the given literal string if the remainder starts with it,
    /// returning whether it matched.
    #[inline]
    pub fn bump_str(&mut self, s: &str) -> bool {
        if self.starts_with(s) {
            self.pos += s.len();
            true
        } else {
            false
        }
    }

    /// Consumes chars while they match the predicate, returning the
    /// consumed slice.
    #[inline]
    pub fn bump_while<F: Fn(char) -> bool>(&mut self, predicate: F) -> &'s str {
        let start = self.pos;
        while let Some(ch) = self.peek() {
            if !predicate(ch) {
                break;
            }
            self.pos += ch.len_utf8();
        }
        &self.src[start..self.pos]
    }

    /// Rewinds (or advances) the scanner to a previously observed byte
    /// offset, for decoders that need to backtrack past a speculative
    /// lookahead.
    #[inline]
    pub fn seek(&mut self, pos: usize) {
        self.pos = pos;
    }
}
