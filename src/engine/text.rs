//! `%s %c %[`, in narrow and wide flavors.

use tracing::{debug, trace};

use super::{Budget, Session};
use crate::args::Arg;
use crate::chars::ScanChar;
use crate::error::{ContractViolation, Result, ScanError};
use crate::format::{CharClass, Conversion};
use crate::locale::CodePage;
use crate::policy::DestinationPolicy;
use crate::source::CharSource;

#[derive(Debug, Clone, Copy)]
pub(crate) enum TextMode<'c> {
    /// Skips leading whitespace, reads up to the next whitespace, terminates.
    String,
    /// Reads exactly `width` characters (default 1), no skip, no terminator.
    Chars,
    /// Reads the longest run accepted by the class, no skip, terminates.
    Class(&'c CharClass),
}

impl TextMode<'_> {
    fn terminated(self) -> bool {
        !matches!(self, Self::Chars)
    }
}

enum Buffer<'a> {
    Narrow(&'a mut [u8]),
    Wide(&'a mut [u16]),
}

/// Where the characters of one text conversion go. A suppressed conversion
/// has no buffer and accepts everything.
struct Sink<'a> {
    buffer: Option<Buffer<'a>>,
    capacity: usize,
    len: usize,
    page: CodePage,
}

impl Sink<'_> {
    /// Whether one more character fits, keeping room for the terminator
    /// when there is one.
    fn has_room(&self, terminated: bool) -> bool {
        if self.buffer.is_none() {
            return true;
        }
        let needed = if terminated { self.len + 2 } else { self.len + 1 };
        needed <= self.capacity
    }

    fn push<C: ScanChar>(&mut self, c: C) {
        match &mut self.buffer {
            Some(Buffer::Narrow(buffer)) => buffer[self.len] = c.to_narrow(self.page),
            Some(Buffer::Wide(buffer)) => buffer[self.len] = c.to_wide(self.page),
            None => {}
        }
        self.len += 1;
    }

    fn terminate(&mut self) {
        match &mut self.buffer {
            Some(Buffer::Narrow(buffer)) => buffer[self.len] = 0,
            Some(Buffer::Wide(buffer)) => buffer[self.len] = 0,
            None => {}
        }
    }

    /// Leaves an empty string behind after an overflow.
    fn clear(&mut self) {
        match &mut self.buffer {
            Some(Buffer::Narrow(buffer)) => {
                if let Some(first) = buffer.first_mut() {
                    *first = 0;
                }
            }
            Some(Buffer::Wide(buffer)) => {
                if let Some(first) = buffer.first_mut() {
                    *first = 0;
                }
            }
            None => {}
        }
    }
}

impl<'a, C, S, P> Session<'_, 'a, C, S, P>
where
    C: ScanChar,
    S: CharSource<C> + ?Sized,
    P: DestinationPolicy,
{
    pub(super) fn scan_text(&mut self, conversion: &Conversion, mode: TextMode<'_>, wide: bool) -> Result<()> {
        let mut sink = self.sink(conversion, wide)?;
        let terminated = mode.terminated();

        let mut budget = match mode {
            TextMode::Chars => Budget::new(Some(conversion.width.unwrap_or(1))),
            _ => Budget::new(conversion.width),
        };
        if matches!(mode, TextMode::String) {
            self.input.skip_space();
        }

        while budget.available() {
            let Some(c) = self.input.peek() else {
                break;
            };
            let accepted = match mode {
                TextMode::String => !c.is_space(),
                TextMode::Chars => true,
                TextMode::Class(class) => class.accepts(c.code()),
            };
            if !accepted {
                break;
            }
            if !sink.has_room(terminated) {
                return Err(self.overflow(&mut sink));
            }
            sink.push(c);
            self.input.bump();
            budget.spend();
        }

        match mode {
            // Fewer characters than the width means the input ran out.
            TextMode::Chars if budget.available() => {
                return Err(self.input.failure());
            }
            TextMode::String | TextMode::Class(_) if sink.len == 0 => {
                return Err(self.input.failure());
            }
            _ => {}
        }
        if terminated {
            if !sink.has_room(false) {
                return Err(self.overflow(&mut sink));
            }
            sink.terminate();
        }
        trace!(len = sink.len, wide, "text");
        Ok(())
    }

    fn sink(&mut self, conversion: &Conversion, wide: bool) -> Result<Sink<'a>> {
        let page = self.locale.code_page();
        let Some(slot) = self.destination(conversion)? else {
            return Ok(Sink {
                buffer: None,
                capacity: 0,
                len: 0,
                page,
            });
        };
        let buffer = match (slot, wide) {
            (Arg::Narrow(buffer), false) => Buffer::Narrow(buffer),
            (Arg::Wide(buffer), true) => Buffer::Wide(buffer),
            (other, _) => {
                let expected = if wide { "wide buffer" } else { "narrow buffer" };
                return Err(self.wrong_type(expected, &other));
            }
        };
        let len = match &buffer {
            Buffer::Narrow(buffer) => buffer.len(),
            Buffer::Wide(buffer) => buffer.len(),
        };
        let capacity = self.policy.buffer_capacity(&mut self.args, self.conversions, len)?;
        Ok(Sink {
            buffer: Some(buffer),
            capacity,
            len: 0,
            page,
        })
    }

    /// Only the secure variants treat a full buffer as a broken contract.
    fn overflow(&self, sink: &mut Sink<'_>) -> ScanError {
        debug!(capacity = sink.capacity, secure = P::SECURE, "destination buffer too small");
        sink.clear();
        let (index, capacity) = (self.conversions, sink.capacity);
        if !P::SECURE {
            return ScanError::DestinationFull { index, capacity };
        }
        ContractViolation::BufferTooSmall { index, capacity }.into()
    }
}
