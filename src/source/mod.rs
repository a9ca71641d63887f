//! Character sources the interpreter reads from.
//!
//! Every scanf variant differs only in where its characters come from. A
//! [`CharSource`] exposes a one-character lookahead (`peek`), consumption of
//! that character (`advance`) and push-back of characters the interpreter
//! consumed but could not use.
//!
//! ## Provided sources
//!
//! - [`StrSource`]: NUL-terminated slices (`sscanf`) and length-bounded
//!   slices (`_snscanf`)
//! - [`ReaderSource`] / [`WideReaderSource`]: buffered readers (`fscanf`,
//!   `scanf`, `fwscanf`, `wscanf`)
//! - [`ConsoleSource`]: a [`Console`] collaborator (`_cscanf`, `_cwscanf`)
//!
//! [`SharedInput`] keeps what a source left unconsumed for the next source
//! over the same stream.

mod console;
mod reader;
mod shared;

use crate::chars::{ScanChar, until_nul};

pub use console::{Console, ConsoleSource, StdConsole};
pub use reader::{ReaderSource, WideEncoding, WideReaderSource};
pub use shared::{Park, Pending, SharedInput};

/// Where the characters of a scan come from.
pub trait CharSource<C: ScanChar> {
    /// Returns the next character without consuming it, or `None` at the
    /// end of input (or after an I/O error).
    fn peek(&mut self) -> Option<C>;

    /// Consumes the character last returned by [`peek`](Self::peek).
    fn advance(&mut self);

    /// Returns a consumed character to the front of the input.
    fn pushback(&mut self, c: C);
}

/// A slice of characters ending at its first NUL, its end, or a caller
/// supplied length, whichever comes first.
#[derive(Debug, Clone)]
pub struct StrSource<'a, C> {
    data: &'a [C],
    position: usize,
}

impl<'a, C: ScanChar> StrSource<'a, C> {
    /// A C string: the input ends at the first NUL or the end of `text`.
    pub fn new(text: &'a [C]) -> Self {
        Self {
            data: until_nul(text),
            position: 0,
        }
    }

    /// A counted buffer: never reads more than `length` characters, and
    /// still stops early at a NUL.
    pub fn bounded(text: &'a [C], length: usize) -> Self {
        let end = length.min(text.len());
        Self::new(&text[..end])
    }

    /// Characters consumed so far
    pub fn position(&self) -> usize {
        self.position
    }

    /// The unconsumed rest of the input
    pub fn remaining(&self) -> &'a [C] {
        &self.data[self.position..]
    }
}

impl<C: ScanChar> CharSource<C> for StrSource<'_, C> {
    #[inline]
    fn peek(&mut self) -> Option<C> {
        self.data.get(self.position).copied()
    }

    #[inline]
    fn advance(&mut self) {
        if self.position < self.data.len() {
            self.position += 1;
        }
    }

    #[inline]
    fn pushback(&mut self, c: C) {
        debug_assert!(
            self.position > 0 && self.data[self.position - 1] == c,
            "string sources only take back the character just consumed"
        );
        self.position = self.position.saturating_sub(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_source_stops_at_nul() {
        let mut source = StrSource::new(&b"ab\0cd"[..]);
        assert_eq!(source.peek(), Some(b'a'));
        source.advance();
        source.advance();
        assert_eq!(source.peek(), None);
        source.advance();
        assert_eq!(source.position(), 2);
    }

    #[test]
    fn test_bounded_source_never_reads_past_length() {
        let mut source = StrSource::bounded(&b"12345"[..], 3);
        let mut seen = Vec::new();
        while let Some(c) = source.peek() {
            seen.push(c);
            source.advance();
        }
        assert_eq!(seen, b"123");

        let source = StrSource::bounded(&b"12"[..], 10);
        assert_eq!(source.remaining(), b"12");
    }

    #[test]
    fn test_pushback_rewinds() {
        let text: Vec<u16> = "-x".encode_utf16().collect();
        let mut source = StrSource::new(&text[..]);
        source.advance();
        source.pushback(u16::from(b'-'));
        assert_eq!(source.peek(), Some(u16::from(b'-')));
        assert_eq!(source.position(), 0);
    }
}
