//! `%d %i %o %u %x %p`

use tracing::trace;

use super::{Budget, Input, Session};
use crate::chars::{ScanChar, digit_value};
use crate::error::Result;
use crate::format::Conversion;
use crate::policy::DestinationPolicy;
use crate::source::CharSource;

/// Base of an integer conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Radix {
    Fixed(u32),
    /// `%i`: `0x` means hex, a leading `0` octal, anything else decimal
    Detect,
}

/// Name of the integer type stored at `bits`, for contract violations.
pub(crate) fn int_name(bits: u32) -> &'static str {
    match bits {
        8 => "8-bit integer",
        16 => "16-bit integer",
        32 => "32-bit integer",
        _ => "64-bit integer",
    }
}

impl<C, S, P> Session<'_, '_, C, S, P>
where
    C: ScanChar,
    S: CharSource<C> + ?Sized,
    P: DestinationPolicy,
{
    pub(super) fn scan_integer(&mut self, conversion: &Conversion, radix: Radix, bits: u32) -> Result<()> {
        let slot = self.destination(conversion)?;
        if let Some(slot) = &slot {
            if slot.int_bits() != Some(bits) {
                return Err(self.wrong_type(int_name(bits), slot));
            }
        }
        self.input.skip_space();
        let value = read_integer(&mut self.input, conversion.width, radix)?;
        trace!(value, bits, "integer");
        if let Some(slot) = slot {
            slot.store_int(value, bits);
        }
        Ok(())
    }
}

/// Reads an optionally signed integer of at most `width` characters.
///
/// The magnitude accumulates modulo 2^64 and a minus sign negates it the
/// same way, so out-of-range input wraps rather than saturating. Nothing the
/// conversion could not use is left consumed.
pub(crate) fn read_integer<C, S>(input: &mut Input<'_, C, S>, width: Option<usize>, radix: Radix) -> Result<u64>
where
    C: ScanChar,
    S: CharSource<C> + ?Sized,
{
    let mut budget = Budget::new(width);
    let sign = input.next_if(&mut budget, |c| c.is(b'+') || c.is(b'-'));
    let negative = sign.is_some_and(|c| c.is(b'-'));

    let mut base = match radix {
        Radix::Fixed(base) => base,
        Radix::Detect => 0,
    };
    let mut seen_digit = false;
    let mut hex_marker = None;
    if base == 0 || base == 16 {
        if input.next_if(&mut budget, |c| c.is(b'0')).is_some() {
            seen_digit = true;
            hex_marker = input.next_if(&mut budget, |c| c.is(b'x') || c.is(b'X'));
            if hex_marker.is_some() {
                base = 16;
                seen_digit = false;
            } else if base == 0 {
                base = 8;
            }
        }
    }
    if base == 0 {
        base = 10;
    }

    let mut value: u64 = 0;
    while budget.available() {
        let Some(digit) = input.peek().and_then(|c| digit_value(c, base)) else {
            break;
        };
        input.bump();
        budget.spend();
        value = value.wrapping_mul(u64::from(base)).wrapping_add(u64::from(digit));
        seen_digit = true;
    }

    if !seen_digit {
        // "0x" with no hex digit after it: the number is the 0.
        if let Some(marker) = hex_marker {
            input.unread(marker);
            return Ok(0);
        }
        if let Some(sign) = sign {
            input.unread(sign);
        }
        return Err(input.failure());
    }
    Ok(if negative { value.wrapping_neg() } else { value })
}
