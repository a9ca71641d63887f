//! Unconsumed input of process-wide streams, kept between scans.
//!
//! A C `FILE` or the console holds whatever a scan pushed back, so the next
//! call sees it. `scanf` and `_cscanf` build a fresh source per call; the
//! source hands its leftovers to a [`SharedInput`] when the call ends and the
//! next source starts from them.

use std::mem;
use std::sync::{Mutex, PoisonError};

use tracing::trace;

use super::CharSource;
use crate::chars::ScanChar;
use crate::locale::CodePage;

/// Characters a source took from its stream without consuming them.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Pending<C> {
    /// A character read ahead from the stream, delivered after `pushed`
    pub lookahead: Option<C>,
    /// Push-back stack; the last element is delivered first
    pub pushed: Vec<C>,
}

impl<C> Pending<C> {
    /// Nothing pending
    pub const fn new() -> Self {
        Self {
            lookahead: None,
            pushed: Vec::new(),
        }
    }

    /// Returns true if no character is pending
    pub fn is_empty(&self) -> bool {
        self.lookahead.is_none() && self.pushed.is_empty()
    }

    fn map<D>(self, f: impl Fn(C) -> D) -> Pending<D> {
        Pending {
            lookahead: self.lookahead.map(&f),
            pushed: self.pushed.into_iter().map(f).collect(),
        }
    }
}

/// A source that can give back what it has not consumed.
pub trait Park<C: ScanChar>: CharSource<C> + Sized {
    /// Ends the source, returning its unconsumed characters.
    fn park(self) -> Pending<C>;
}

/// The parked input of one process-wide stream.
///
/// Characters are kept narrow; wide scans widen them through the code page
/// they were narrowed with, so narrow and wide calls see the same stream.
/// Scans through one `SharedInput` are serialized.
#[derive(Debug, Default)]
pub struct SharedInput {
    pending: Mutex<Pending<u8>>,
}

impl SharedInput {
    /// A stream with nothing parked
    pub const fn new() -> Self {
        Self {
            pending: Mutex::new(Pending::new()),
        }
    }

    /// Opens a source on the parked input, runs `scan` over it and parks
    /// what it leaves.
    pub fn scan<C, S, T>(
        &self,
        page: CodePage,
        open: impl FnOnce(Pending<C>) -> S,
        scan: impl FnOnce(&mut S) -> T,
    ) -> T
    where
        C: ScanChar,
        S: Park<C>,
    {
        let mut parked = self.pending.lock().unwrap_or_else(PoisonError::into_inner);
        let resumed = mem::take(&mut *parked).map(|byte| C::from_narrow(byte, page));
        let mut source = open(resumed);
        let result = scan(&mut source);
        *parked = source.park().map(|c| c.to_narrow(page));
        if !parked.is_empty() {
            trace!(
                pushed = parked.pushed.len(),
                lookahead = parked.lookahead.is_some(),
                "input parked"
            );
        }
        result
    }

    /// Drops everything parked.
    pub fn clear(&self) {
        *self.pending.lock().unwrap_or_else(PoisonError::into_inner) = Pending::new();
    }
}
