//! Console input for `_cscanf` / `_cwscanf`.

use std::io::{self, Read, Write};

use super::CharSource;
use super::shared::{Park, Pending};
use crate::chars::ScanChar;
use crate::constants::PUSHBACK_CAPACITY;

/// The console collaborator: unbuffered, blocking character input.
pub trait Console<C: ScanChar> {
    /// Blocks for the next character; `None` once the console is closed.
    fn getch(&mut self) -> Option<C>;

    /// Echoes a character the scanner consumed. Does nothing by default.
    fn putch(&mut self, _c: C) {}
}

impl<C: ScanChar, K: Console<C> + ?Sized> Console<C> for &mut K {
    fn getch(&mut self) -> Option<C> {
        (**self).getch()
    }

    fn putch(&mut self, c: C) {
        (**self).putch(c);
    }
}

/// Adapts a [`Console`] to a [`CharSource`].
///
/// Each character is echoed the first time it is consumed; characters that
/// were pushed back and consumed again are not echoed twice.
#[derive(Debug)]
pub struct ConsoleSource<C, K> {
    console: K,
    peeked: Option<C>,
    pushed: Vec<C>,
}

impl<C: ScanChar, K: Console<C>> ConsoleSource<C, K> {
    /// Wraps a console
    pub fn new(console: K) -> Self {
        Self {
            console,
            peeked: None,
            pushed: Vec::with_capacity(PUSHBACK_CAPACITY),
        }
    }

    /// Continues console input another source parked. Pushed-back
    /// characters were echoed already; the lookahead was not.
    pub fn resume(console: K, pending: Pending<C>) -> Self {
        Self {
            console,
            peeked: pending.lookahead,
            pushed: pending.pushed,
        }
    }

    /// Returns the console. A pending lookahead character is lost.
    pub fn into_inner(self) -> K {
        self.console
    }
}

impl<C: ScanChar, K: Console<C>> CharSource<C> for ConsoleSource<C, K> {
    fn peek(&mut self) -> Option<C> {
        if let Some(&c) = self.pushed.last() {
            return Some(c);
        }
        if self.peeked.is_none() {
            self.peeked = self.console.getch();
        }
        self.peeked
    }

    fn advance(&mut self) {
        if self.pushed.pop().is_some() {
            return;
        }
        let c = match self.peeked.take() {
            Some(c) => Some(c),
            None => self.console.getch(),
        };
        if let Some(c) = c {
            self.console.putch(c);
        }
    }

    fn pushback(&mut self, c: C) {
        self.pushed.push(c);
    }
}

impl<C: ScanChar, K: Console<C>> Park<C> for ConsoleSource<C, K> {
    fn park(self) -> Pending<C> {
        Pending {
            lookahead: self.peeked,
            pushed: self.pushed,
        }
    }
}

/// The process console, read byte by byte from stdin.
///
/// Wide reads widen each byte (Latin-1). Echo goes to stdout when enabled.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdConsole {
    echo: bool,
}

impl StdConsole {
    /// Console without echo
    pub fn new() -> Self {
        Self::default()
    }

    /// Enables or disables echo of consumed characters
    pub fn with_echo(mut self, echo: bool) -> Self {
        self.echo = echo;
        self
    }

    fn read_byte(&mut self) -> Option<u8> {
        let mut byte = [0u8; 1];
        loop {
            match io::stdin().lock().read(&mut byte) {
                Ok(0) => return None,
                Ok(_) => return Some(byte[0]),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => {
                    tracing::warn!("console read failed: {}", e);
                    return None;
                }
            }
        }
    }

    fn echo_bytes(&self, bytes: &[u8]) {
        if self.echo {
            let mut stdout = io::stdout().lock();
            // Echo is best effort, like the console's own.
            let _ = stdout.write_all(bytes).and_then(|()| stdout.flush());
        }
    }
}

impl Console<u8> for StdConsole {
    fn getch(&mut self) -> Option<u8> {
        self.read_byte()
    }

    fn putch(&mut self, c: u8) {
        self.echo_bytes(&[c]);
    }
}

impl Console<u16> for StdConsole {
    fn getch(&mut self) -> Option<u16> {
        self.read_byte().map(u16::from)
    }

    fn putch(&mut self, c: u16) {
        let mut utf8 = [0u8; 4];
        let text = char::from_u32(u32::from(c))
            .unwrap_or(char::REPLACEMENT_CHARACTER)
            .encode_utf8(&mut utf8);
        self.echo_bytes(text.as_bytes());
    }
}
