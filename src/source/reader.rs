//! Buffered-reader sources for the file and stdin variants.

use std::io::{self, BufRead};

use tracing::{trace, warn};

use super::CharSource;
use super::shared::{Park, Pending};
use crate::constants::PUSHBACK_CAPACITY;
use crate::locale::CodePage;

/// Reads one byte from `reader`, retrying interrupted reads.
///
/// I/O errors end the input; the error is parked in `error`.
fn next_byte<R: BufRead>(reader: &mut R, error: &mut Option<io::Error>, consume: bool) -> Option<u8> {
    loop {
        match reader.fill_buf() {
            Ok(buf) => {
                let byte = buf.first().copied();
                if consume && byte.is_some() {
                    reader.consume(1);
                }
                return byte;
            }
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => {
                warn!("read error ends scan input: {}", e);
                *error = Some(e);
                return None;
            }
        }
    }
}

/// Narrow characters from a buffered reader (`fscanf`, `scanf`).
///
/// The lookahead stays in the reader's buffer, so a later read from the same
/// reader resumes exactly after the last consumed character. Characters the
/// scanner pushes back live in this source; keep it alive across calls the
/// way a C `FILE` is.
#[derive(Debug)]
pub struct ReaderSource<R> {
    reader: R,
    pushed: Vec<u8>,
    error: Option<io::Error>,
}

impl<R: BufRead> ReaderSource<R> {
    /// Wraps a buffered reader
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            pushed: Vec::with_capacity(PUSHBACK_CAPACITY),
            error: None,
        }
    }

    /// Continues a stream another source parked
    pub fn resume(reader: R, pending: Pending<u8>) -> Self {
        let Pending { lookahead, mut pushed } = pending;
        if let Some(c) = lookahead {
            pushed.insert(0, c);
        }
        Self {
            reader,
            pushed,
            error: None,
        }
    }

    /// Takes the I/O error that ended the input, if any
    pub fn take_error(&mut self) -> Option<io::Error> {
        self.error.take()
    }

    /// Returns the reader. Pushed-back characters are lost.
    pub fn into_inner(self) -> R {
        self.reader
    }
}

impl<R: BufRead> CharSource<u8> for ReaderSource<R> {
    fn peek(&mut self) -> Option<u8> {
        if let Some(&c) = self.pushed.last() {
            return Some(c);
        }
        if self.error.is_some() {
            return None;
        }
        next_byte(&mut self.reader, &mut self.error, false)
    }

    fn advance(&mut self) {
        if self.pushed.pop().is_none() && self.error.is_none() {
            next_byte(&mut self.reader, &mut self.error, true);
        }
    }

    fn pushback(&mut self, c: u8) {
        self.pushed.push(c);
    }
}

impl<R: BufRead> Park<u8> for ReaderSource<R> {
    fn park(self) -> Pending<u8> {
        Pending {
            lookahead: None,
            pushed: self.pushed,
        }
    }
}

/// How a wide reader turns bytes into wide characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WideEncoding {
    /// Text mode: one byte per character, widened through the code page.
    Text(CodePage),
    /// Unicode mode: little-endian UTF-16 code units.
    Utf16Le,
}

/// Wide characters from a buffered reader (`fwscanf`, `wscanf`).
#[derive(Debug)]
pub struct WideReaderSource<R> {
    reader: R,
    encoding: WideEncoding,
    peeked: Option<u16>,
    pushed: Vec<u16>,
    error: Option<io::Error>,
}

impl<R: BufRead> WideReaderSource<R> {
    /// Text-mode reader widening bytes through `page`
    pub fn text(reader: R, page: CodePage) -> Self {
        Self::with_encoding(reader, WideEncoding::Text(page))
    }

    /// Reader of little-endian UTF-16 code units
    pub fn utf16le(reader: R) -> Self {
        Self::with_encoding(reader, WideEncoding::Utf16Le)
    }

    /// Reader with an explicit encoding
    pub fn with_encoding(reader: R, encoding: WideEncoding) -> Self {
        Self {
            reader,
            encoding,
            peeked: None,
            pushed: Vec::with_capacity(PUSHBACK_CAPACITY),
            error: None,
        }
    }

    /// Continues a stream another source parked
    pub fn resume(reader: R, encoding: WideEncoding, pending: Pending<u16>) -> Self {
        Self {
            reader,
            encoding,
            peeked: pending.lookahead,
            pushed: pending.pushed,
            error: None,
        }
    }

    /// Takes the I/O error that ended the input, if any
    pub fn take_error(&mut self) -> Option<io::Error> {
        self.error.take()
    }

    fn decode(&mut self) -> Option<u16> {
        if self.error.is_some() {
            return None;
        }
        match self.encoding {
            WideEncoding::Text(page) => {
                next_byte(&mut self.reader, &mut self.error, true).map(|b| page.to_wide(b))
            }
            WideEncoding::Utf16Le => {
                let low = next_byte(&mut self.reader, &mut self.error, true)?;
                let Some(high) = next_byte(&mut self.reader, &mut self.error, true) else {
                    trace!("dropping odd trailing byte {:#04x} of UTF-16 input", low);
                    return None;
                };
                Some(u16::from_le_bytes([low, high]))
            }
        }
    }
}

impl<R: BufRead> CharSource<u16> for WideReaderSource<R> {
    fn peek(&mut self) -> Option<u16> {
        if let Some(&c) = self.pushed.last() {
            return Some(c);
        }
        if self.peeked.is_none() {
            self.peeked = self.decode();
        }
        self.peeked
    }

    fn advance(&mut self) {
        if self.pushed.pop().is_some() {
            return;
        }
        if self.peeked.take().is_none() {
            self.decode();
        }
    }

    fn pushback(&mut self, c: u16) {
        self.pushed.push(c);
    }
}

impl<R: BufRead> Park<u16> for WideReaderSource<R> {
    fn park(self) -> Pending<u16> {
        Pending {
            lookahead: self.peeked,
            pushed: self.pushed,
        }
    }
}
