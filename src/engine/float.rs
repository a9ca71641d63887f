//! `%e %f %g %a`
//!
//! The longest decimal span the conversion allows is isolated into a small
//! ASCII buffer and handed to `str::parse::<f64>`, which rounds correctly.
//! The locale's decimal point is accepted in place of `.`.

use tracing::trace;

use super::{Budget, Input, Session};
use crate::args::Arg;
use crate::chars::ScanChar;
use crate::constants::FLOAT_SPAN_CAPACITY;
use crate::error::{Result, ScanError};
use crate::format::Conversion;
use crate::policy::DestinationPolicy;
use crate::source::CharSource;

impl<C, S, P> Session<'_, '_, C, S, P>
where
    C: ScanChar,
    S: CharSource<C> + ?Sized,
    P: DestinationPolicy,
{
    pub(super) fn scan_float(&mut self, conversion: &Conversion) -> Result<()> {
        let double = conversion.length.is_double();
        let slot = self.destination(conversion)?;
        if let Some(slot) = &slot {
            let fits = matches!((slot, double), (Arg::F32(_), false) | (Arg::F64(_), true));
            if !fits {
                let expected = if double { "f64" } else { "f32" };
                return Err(self.wrong_type(expected, slot));
            }
        }
        self.input.skip_space();
        let decimal_point = u32::from(self.locale.decimal_point());
        let value = read_float(&mut self.input, conversion.width, decimal_point)?;
        trace!(value, double, "float");
        if let Some(slot) = slot {
            slot.store_float(value);
        }
        Ok(())
    }
}

fn push_digits<C, S>(input: &mut Input<'_, C, S>, budget: &mut Budget, span: &mut String) -> usize
where
    C: ScanChar,
    S: CharSource<C> + ?Sized,
{
    let mut count = 0;
    while let Some(c) = input.next_if(budget, |c| c.ascii().is_some_and(|b| b.is_ascii_digit())) {
        span.push(char::from(c.ascii().unwrap_or(b'0')));
        count += 1;
    }
    count
}

/// Reads `[sign] digits [point digits] [e [sign] digits]`, at most `width`
/// characters, with at least one mantissa digit.
///
/// An exponent marker not followed by a digit is not part of the number and
/// is pushed back, along with its sign.
pub(crate) fn read_float<C, S>(input: &mut Input<'_, C, S>, width: Option<usize>, decimal_point: u32) -> Result<f64>
where
    C: ScanChar,
    S: CharSource<C> + ?Sized,
{
    let mut budget = Budget::new(width);
    let mut span = String::with_capacity(FLOAT_SPAN_CAPACITY);
    let mut taken = Vec::new();

    if let Some(sign) = input.next_if(&mut budget, |c| c.is(b'+') || c.is(b'-')) {
        span.push(if sign.is(b'-') { '-' } else { '+' });
        taken.push(sign);
    }
    let mut digits = push_digits(input, &mut budget, &mut span);
    if let Some(point) = input.next_if(&mut budget, |c| c.code() == decimal_point) {
        span.push('.');
        taken.push(point);
        digits += push_digits(input, &mut budget, &mut span);
    }
    if digits == 0 {
        for c in taken.into_iter().rev() {
            input.unread(c);
        }
        return Err(input.failure());
    }

    if let Some(marker) = input.next_if(&mut budget, |c| c.is(b'e') || c.is(b'E')) {
        let mut exponent = String::from("e");
        let sign = input.next_if(&mut budget, |c| c.is(b'+') || c.is(b'-'));
        if let Some(sign) = sign {
            exponent.push(if sign.is(b'-') { '-' } else { '+' });
        }
        if push_digits(input, &mut budget, &mut exponent) == 0 {
            if let Some(sign) = sign {
                input.unread(sign);
            }
            input.unread(marker);
        } else {
            span.push_str(&exponent);
        }
    }

    trace!(%span, "float span");
    span.parse::<f64>().map_err(|_| ScanError::mismatch(input.consumed))
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::source::StrSource;

    fn read(text: &str, width: Option<usize>) -> (Result<f64>, String) {
        let mut source = StrSource::new(text.as_bytes());
        let mut input = Input::new(&mut source);
        let result = read_float(&mut input, width, u32::from(b'.'));
        let rest = String::from_utf8_lossy(source.remaining()).into_owned();
        (result, rest)
    }

    #[test]
    fn test_plain_numbers() {
        assert_eq!(read("3.25rest", None), (Ok(3.25), "rest".into()));
        assert_eq!(read("-1", None), (Ok(-1.0), "".into()));
        assert_eq!(read(".5", None), (Ok(0.5), "".into()));
        assert_eq!(read("7.", None), (Ok(7.0), "".into()));
    }

    #[test]
    fn test_exponent() {
        assert_eq!(read("1e3", None), (Ok(1000.0), "".into()));
        assert_eq!(read("2.5E-1x", None), (Ok(0.25), "x".into()));
    }

    #[test]
    fn test_dangling_exponent_is_pushed_back() {
        assert_eq!(read("1e", None), (Ok(1.0), "e".into()));
        assert_eq!(read("1e+x", None), (Ok(1.0), "e+x".into()));
    }

    #[test]
    fn test_width_bounds_the_span() {
        assert_eq!(read("123.456", Some(4)), (Ok(123.0), "456".into()));
        assert_eq!(read("1.5e10", Some(4)), (Ok(1.5), "e10".into()));
    }

    #[test]
    fn test_no_digits_restores_input() {
        assert_eq!(read("-.x", None), (Err(ScanError::mismatch(0)), "-.x".into()));
        assert_eq!(read("", None), (Err(ScanError::exhausted(0)), "".into()));
    }

    #[test]
    fn test_locale_decimal_point() {
        let mut source = StrSource::new(&b"2,75"[..]);
        let mut input = Input::new(&mut source);
        assert_eq!(read_float(&mut input, None, u32::from(b',')), Ok(2.75));
    }
}
