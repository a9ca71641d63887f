//! The generic interpreter.
//!
//! One [`Scanner::scan`] walks a format directive by directive against a
//! [`CharSource`], storing into the caller's [`Arg`] slots. The same code
//! serves every member of the family: the code-unit type, the source and the
//! [`DestinationPolicy`] are type parameters.

use std::marker::PhantomData;

use tracing::{debug, trace};

use crate::args::{Arg, ArgCursor};
use crate::chars::ScanChar;
use crate::config::ScanConfig;
use crate::constants::EOF;
use crate::error::{ContractViolation, Result, ScanError};
use crate::format::{Conversion, ConversionKind, Directive, Directives};
use crate::locale::Locale;
use crate::observer::ScanEvent;
use crate::policy::DestinationPolicy;
use crate::source::CharSource;

mod float;
mod integer;
mod text;

use integer::Radix;
use text::TextMode;

/// Outcome of one scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanReport {
    assigned: usize,
    consumed: usize,
    halt: Option<ScanError>,
}

impl ScanReport {
    /// Conversions that stored a value
    pub fn assigned(&self) -> usize {
        self.assigned
    }

    /// Input characters consumed
    pub fn consumed(&self) -> usize {
        self.consumed
    }

    /// Why the scan stopped early, if it did
    pub fn halt(&self) -> Option<&ScanError> {
        self.halt.as_ref()
    }

    /// The value the C function returns: the assignment count, or [`EOF`]
    /// when the input ran out before the first assignment or the caller
    /// broke the argument contract.
    pub fn return_value(&self) -> i32 {
        return match &self.halt {
            Some(ScanError::Contract(violation)) if !violation.keeps_count() => EOF,
            Some(ScanError::InputExhausted { .. }) if self.assigned == 0 => EOF,
            _ => i32::try_from(self.assigned).unwrap_or(i32::MAX),
        };
    }
}

/// Runs scans with a fixed [`ScanConfig`].
#[derive(Debug, Clone, Default)]
pub struct Scanner {
    config: ScanConfig,
}

impl Scanner {
    /// Creates a scanner with the default config
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a scanner with the given config
    pub fn with_config(config: ScanConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ScanConfig {
        &self.config
    }

    /// Interprets `format` against `source`, storing into `args` in order.
    ///
    /// The format is read up to its first NUL. The scan stops at the first
    /// directive that fails; the report says how far it got and why.
    pub fn scan<'a, C, S, P>(
        &self,
        source: &mut S,
        format: &[C],
        args: impl IntoIterator<Item = Arg<'a>>,
        policy: P,
    ) -> ScanReport
    where
        C: ScanChar,
        S: CharSource<C> + ?Sized,
        P: DestinationPolicy,
    {
        let observer = self.config.observer_ref();
        observer.on_event(&ScanEvent::Started {
            width: C::WIDTH_NAME,
            secure: P::SECURE,
        });

        let mut session = Session {
            input: Input::new(source),
            args: ArgCursor::new(args),
            policy,
            locale: self.config.resolved_locale(),
            config: &self.config,
            assigned: 0,
            conversions: 0,
        };
        let halt = session.run(format).err();
        let assigned = session.assigned;
        let consumed = session.input.consumed;

        if let Some(error) = &halt {
            debug!(assigned, consumed, %error, "scan stopped early");
            if let ScanError::Contract(violation) = error {
                self.config.report_violation(violation);
            }
            observer.on_event(&ScanEvent::Halted { error, assigned });
        }
        observer.on_event(&ScanEvent::Finished { assigned, consumed });

        ScanReport {
            assigned,
            consumed,
            halt,
        }
    }
}

/// A source that counts what the scan consumed.
pub(crate) struct Input<'s, C, S: ?Sized> {
    source: &'s mut S,
    consumed: usize,
    _unit: PhantomData<C>,
}

impl<'s, C: ScanChar, S: CharSource<C> + ?Sized> Input<'s, C, S> {
    fn new(source: &'s mut S) -> Self {
        Self {
            source,
            consumed: 0,
            _unit: PhantomData,
        }
    }

    pub(crate) fn peek(&mut self) -> Option<C> {
        self.source.peek()
    }

    pub(crate) fn bump(&mut self) -> Option<C> {
        let c = self.source.peek()?;
        self.source.advance();
        self.consumed += 1;
        Some(c)
    }

    pub(crate) fn unread(&mut self, c: C) {
        self.source.pushback(c);
        self.consumed = self.consumed.saturating_sub(1);
    }

    /// Consumes the next character if the width allows it and it satisfies
    /// `accept`.
    pub(crate) fn next_if(&mut self, budget: &mut Budget, accept: impl FnOnce(C) -> bool) -> Option<C> {
        if !budget.available() {
            return None;
        }
        let c = self.peek().filter(|&c| accept(c))?;
        self.bump();
        budget.spend();
        Some(c)
    }

    pub(crate) fn skip_space(&mut self) {
        while self.peek().is_some_and(ScanChar::is_space) {
            self.bump();
        }
    }

    /// The error for a directive that matched nothing here.
    pub(crate) fn failure(&mut self) -> ScanError {
        if self.peek().is_none() {
            return ScanError::exhausted(self.consumed);
        }
        return ScanError::mismatch(self.consumed);
    }
}

/// Characters a conversion may still consume.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Budget(Option<usize>);

impl Budget {
    pub(crate) fn new(width: Option<usize>) -> Self {
        Self(width)
    }

    pub(crate) fn available(&self) -> bool {
        self.0 != Some(0)
    }

    pub(crate) fn spend(&mut self) {
        if let Some(left) = &mut self.0 {
            *left = left.saturating_sub(1);
        }
    }
}

/// State of one scan.
pub(crate) struct Session<'s, 'a, C, S: ?Sized, P> {
    input: Input<'s, C, S>,
    args: ArgCursor<'a>,
    policy: P,
    locale: Locale,
    config: &'s ScanConfig,
    assigned: usize,
    conversions: usize,
}

impl<'a, C, S, P> Session<'_, 'a, C, S, P>
where
    C: ScanChar,
    S: CharSource<C> + ?Sized,
    P: DestinationPolicy,
{
    fn run(&mut self, format: &[C]) -> Result<()> {
        for directive in Directives::new(format) {
            let directive = directive?;
            trace!(?directive, consumed = self.input.consumed, "directive");
            match directive {
                Directive::Whitespace => self.input.skip_space(),
                Directive::Literal(code) => self.match_literal(code)?,
                Directive::Conversion(conversion) => self.convert(&conversion)?,
            }
        }
        Ok(())
    }

    /// A literal that does not match is left unconsumed.
    fn match_literal(&mut self, code: u32) -> Result<()> {
        return match self.input.peek() {
            Some(c) if c.code() == code => {
                self.input.bump();
                Ok(())
            }
            _ => Err(self.input.failure()),
        };
    }

    fn convert(&mut self, conversion: &Conversion) -> Result<()> {
        self.conversions += 1;
        let index = self.conversions;
        let length = conversion.length;
        match &conversion.kind {
            ConversionKind::Decimal => self.scan_integer(conversion, Radix::Fixed(10), length.int_bits())?,
            ConversionKind::Integer => self.scan_integer(conversion, Radix::Detect, length.int_bits())?,
            ConversionKind::Octal => self.scan_integer(conversion, Radix::Fixed(8), length.int_bits())?,
            ConversionKind::Unsigned => self.scan_integer(conversion, Radix::Fixed(10), length.int_bits())?,
            ConversionKind::Hex => self.scan_integer(conversion, Radix::Fixed(16), length.int_bits())?,
            ConversionKind::Pointer => self.scan_integer(conversion, Radix::Fixed(16), usize::BITS)?,
            ConversionKind::Float => self.scan_float(conversion)?,
            ConversionKind::String { swapped } => {
                let wide = length.stores_wide(C::WIDE, *swapped);
                self.scan_text(conversion, TextMode::String, wide)?
            }
            ConversionKind::Chars { swapped } => {
                let wide = length.stores_wide(C::WIDE, *swapped);
                self.scan_text(conversion, TextMode::Chars, wide)?
            }
            ConversionKind::Class(class) => {
                let wide = length.stores_wide(C::WIDE, false);
                self.scan_text(conversion, TextMode::Class(class), wide)?
            }
            ConversionKind::Count => self.store_count(conversion)?,
            ConversionKind::Percent => self.match_literal(u32::from(b'%'))?,
        }
        if conversion.assigns() {
            self.assigned += 1;
        }
        self.config.observer_ref().on_event(&ScanEvent::Converted {
            index,
            conversion,
            consumed: self.input.consumed,
        });
        Ok(())
    }

    /// Takes the destination of the current conversion, or `None` if it is
    /// suppressed.
    fn destination(&mut self, conversion: &Conversion) -> Result<Option<Arg<'a>>> {
        if conversion.suppress {
            return Ok(None);
        }
        let index = self.conversions;
        let arg = self
            .args
            .next_arg()
            .ok_or(ContractViolation::MissingArgument { index })?;
        Ok(Some(arg))
    }

    fn wrong_type(&self, expected: &'static str, found: &Arg<'_>) -> ScanError {
        ContractViolation::ArgumentType {
            index: self.conversions,
            expected,
            found: found.kind(),
        }
        .into()
    }

    /// `%n`: stores the characters consumed so far. Reads no input.
    fn store_count(&mut self, conversion: &Conversion) -> Result<()> {
        let Some(slot) = self.destination(conversion)? else {
            return Ok(());
        };
        let bits = conversion.length.int_bits();
        if slot.int_bits() != Some(bits) {
            return Err(self.wrong_type(integer::int_name(bits), &slot));
        }
        self.policy.count_capacity(&mut self.args, self.conversions)?;
        slot.store_int(self.input.consumed as u64, bits);
        Ok(())
    }
}
