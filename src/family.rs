//! C-style entry points.
//!
//! Every function here is a thin shim: it picks a [`CharSource`], a
//! [`DestinationPolicy`] and a locale, runs [`Scanner::scan`] and folds the
//! [`ScanReport`](crate::ScanReport) into the C return value. Each base name
//! has an `_l` sibling taking an explicit locale (`None` means the thread's
//! current locale), an `_s` sibling with capacity-checked buffers, and an
//! `_s_l` sibling with both.
//!
//! ```
//! use crt_scanf::Arg;
//! use crt_scanf::family::sscanf;
//!
//! let mut day = 0i32;
//! let mut month = [0u8; 8];
//! let assigned = sscanf(b"21 March", b"%d %7s", [Arg::from(&mut day), Arg::from(&mut month)]);
//! assert_eq!(assigned, 2);
//! assert_eq!(day, 21);
//! assert_eq!(&month[..6], b"March\0");
//! ```

use std::io::{self, BufRead};

use crate::args::Arg;
use crate::chars::ScanChar;
use crate::config::{ScanConfig, ScanOptions};
use crate::engine::Scanner;
use crate::locale::{CodePage, Locale, current_locale};
use crate::policy::{Checked, DestinationPolicy, Unchecked};
use crate::source::{
    CharSource, Console, ConsoleSource, Pending, ReaderSource, SharedInput, StdConsole, StrSource, WideEncoding,
    WideReaderSource,
};

/// What `scanf`/`wscanf` left unconsumed on stdin.
static STDIN: SharedInput = SharedInput::new();

/// What `_cscanf`/`_cwscanf` left unconsumed on the console.
static CONSOLE: SharedInput = SharedInput::new();

fn run<'a, C, S, P>(
    source: &mut S,
    format: &[C],
    locale: Option<&Locale>,
    args: impl IntoIterator<Item = Arg<'a>>,
    policy: P,
) -> i32
where
    C: ScanChar,
    S: CharSource<C> + ?Sized,
    P: DestinationPolicy,
{
    let config = ScanConfig::new().locale(locale.cloned());
    Scanner::with_config(config)
        .scan(source, format, args, policy)
        .return_value()
}

fn resolve(locale: Option<&Locale>) -> Locale {
    locale.cloned().unwrap_or_else(current_locale)
}

// ============================================================================
// NUL-terminated strings
// ============================================================================

/// Scans a NUL-terminated narrow string.
pub fn sscanf<'a>(input: &[u8], format: &[u8], args: impl IntoIterator<Item = Arg<'a>>) -> i32 {
    sscanf_l(input, format, None, args)
}

pub fn sscanf_l<'a>(
    input: &[u8],
    format: &[u8],
    locale: Option<&Locale>,
    args: impl IntoIterator<Item = Arg<'a>>,
) -> i32 {
    run(&mut StrSource::new(input), format, locale, args, Unchecked)
}

/// [`sscanf`] with an [`Arg::Capacity`] after every buffer destination.
pub fn sscanf_s<'a>(input: &[u8], format: &[u8], args: impl IntoIterator<Item = Arg<'a>>) -> i32 {
    sscanf_s_l(input, format, None, args)
}

pub fn sscanf_s_l<'a>(
    input: &[u8],
    format: &[u8],
    locale: Option<&Locale>,
    args: impl IntoIterator<Item = Arg<'a>>,
) -> i32 {
    run(&mut StrSource::new(input), format, locale, args, Checked)
}

/// Scans a NUL-terminated wide string.
pub fn swscanf<'a>(input: &[u16], format: &[u16], args: impl IntoIterator<Item = Arg<'a>>) -> i32 {
    swscanf_l(input, format, None, args)
}

pub fn swscanf_l<'a>(
    input: &[u16],
    format: &[u16],
    locale: Option<&Locale>,
    args: impl IntoIterator<Item = Arg<'a>>,
) -> i32 {
    run(&mut StrSource::new(input), format, locale, args, Unchecked)
}

pub fn swscanf_s<'a>(input: &[u16], format: &[u16], args: impl IntoIterator<Item = Arg<'a>>) -> i32 {
    swscanf_s_l(input, format, None, args)
}

pub fn swscanf_s_l<'a>(
    input: &[u16],
    format: &[u16],
    locale: Option<&Locale>,
    args: impl IntoIterator<Item = Arg<'a>>,
) -> i32 {
    run(&mut StrSource::new(input), format, locale, args, Checked)
}

/// `vsscanf`: the argument list is already an iterator, so this is [`sscanf`].
pub fn vsscanf<'a>(input: &[u8], format: &[u8], args: impl IntoIterator<Item = Arg<'a>>) -> i32 {
    sscanf(input, format, args)
}

/// `vswscanf`
pub fn vswscanf<'a>(input: &[u16], format: &[u16], args: impl IntoIterator<Item = Arg<'a>>) -> i32 {
    swscanf(input, format, args)
}

// ============================================================================
// Length-bounded strings
// ============================================================================

/// Scans at most `length` characters of `input`, stopping early at a NUL.
pub fn snscanf<'a>(input: &[u8], length: usize, format: &[u8], args: impl IntoIterator<Item = Arg<'a>>) -> i32 {
    snscanf_l(input, length, format, None, args)
}

pub fn snscanf_l<'a>(
    input: &[u8],
    length: usize,
    format: &[u8],
    locale: Option<&Locale>,
    args: impl IntoIterator<Item = Arg<'a>>,
) -> i32 {
    run(&mut StrSource::bounded(input, length), format, locale, args, Unchecked)
}

pub fn snscanf_s<'a>(input: &[u8], length: usize, format: &[u8], args: impl IntoIterator<Item = Arg<'a>>) -> i32 {
    snscanf_s_l(input, length, format, None, args)
}

pub fn snscanf_s_l<'a>(
    input: &[u8],
    length: usize,
    format: &[u8],
    locale: Option<&Locale>,
    args: impl IntoIterator<Item = Arg<'a>>,
) -> i32 {
    run(&mut StrSource::bounded(input, length), format, locale, args, Checked)
}

pub fn snwscanf<'a>(input: &[u16], length: usize, format: &[u16], args: impl IntoIterator<Item = Arg<'a>>) -> i32 {
    snwscanf_l(input, length, format, None, args)
}

pub fn snwscanf_l<'a>(
    input: &[u16],
    length: usize,
    format: &[u16],
    locale: Option<&Locale>,
    args: impl IntoIterator<Item = Arg<'a>>,
) -> i32 {
    run(&mut StrSource::bounded(input, length), format, locale, args, Unchecked)
}

pub fn snwscanf_s<'a>(input: &[u16], length: usize, format: &[u16], args: impl IntoIterator<Item = Arg<'a>>) -> i32 {
    snwscanf_s_l(input, length, format, None, args)
}

pub fn snwscanf_s_l<'a>(
    input: &[u16],
    length: usize,
    format: &[u16],
    locale: Option<&Locale>,
    args: impl IntoIterator<Item = Arg<'a>>,
) -> i32 {
    run(&mut StrSource::bounded(input, length), format, locale, args, Checked)
}

// ============================================================================
// Streams
// ============================================================================

/// Scans from a narrow stream, usually a [`ReaderSource`]. Keep the source
/// alive between calls: characters pushed back by one call are read by the
/// next.
pub fn fscanf<'a, S>(stream: &mut S, format: &[u8], args: impl IntoIterator<Item = Arg<'a>>) -> i32
where
    S: CharSource<u8> + ?Sized,
{
    fscanf_l(stream, format, None, args)
}

pub fn fscanf_l<'a, S>(
    stream: &mut S,
    format: &[u8],
    locale: Option<&Locale>,
    args: impl IntoIterator<Item = Arg<'a>>,
) -> i32
where
    S: CharSource<u8> + ?Sized,
{
    run(stream, format, locale, args, Unchecked)
}

pub fn fscanf_s<'a, S>(stream: &mut S, format: &[u8], args: impl IntoIterator<Item = Arg<'a>>) -> i32
where
    S: CharSource<u8> + ?Sized,
{
    fscanf_s_l(stream, format, None, args)
}

pub fn fscanf_s_l<'a, S>(
    stream: &mut S,
    format: &[u8],
    locale: Option<&Locale>,
    args: impl IntoIterator<Item = Arg<'a>>,
) -> i32
where
    S: CharSource<u8> + ?Sized,
{
    run(stream, format, locale, args, Checked)
}

/// Scans from a wide stream, usually a [`WideReaderSource`].
pub fn fwscanf<'a, S>(stream: &mut S, format: &[u16], args: impl IntoIterator<Item = Arg<'a>>) -> i32
where
    S: CharSource<u16> + ?Sized,
{
    fwscanf_l(stream, format, None, args)
}

pub fn fwscanf_l<'a, S>(
    stream: &mut S,
    format: &[u16],
    locale: Option<&Locale>,
    args: impl IntoIterator<Item = Arg<'a>>,
) -> i32
where
    S: CharSource<u16> + ?Sized,
{
    run(stream, format, locale, args, Unchecked)
}

pub fn fwscanf_s<'a, S>(stream: &mut S, format: &[u16], args: impl IntoIterator<Item = Arg<'a>>) -> i32
where
    S: CharSource<u16> + ?Sized,
{
    fwscanf_s_l(stream, format, None, args)
}

pub fn fwscanf_s_l<'a, S>(
    stream: &mut S,
    format: &[u16],
    locale: Option<&Locale>,
    args: impl IntoIterator<Item = Arg<'a>>,
) -> i32
where
    S: CharSource<u16> + ?Sized,
{
    run(stream, format, locale, args, Checked)
}

// ============================================================================
// Standard input
// ============================================================================

fn shared_narrow<'a, R: BufRead, P: DestinationPolicy>(
    shared: &SharedInput,
    reader: R,
    format: &[u8],
    locale: Option<&Locale>,
    args: impl IntoIterator<Item = Arg<'a>>,
    policy: P,
) -> i32 {
    shared.scan(
        CodePage::Latin1,
        |pending| ReaderSource::resume(reader, pending),
        |source| run(source, format, locale, args, policy),
    )
}

fn shared_wide<'a, R: BufRead, P: DestinationPolicy>(
    shared: &SharedInput,
    reader: R,
    format: &[u16],
    locale: Option<&Locale>,
    args: impl IntoIterator<Item = Arg<'a>>,
    policy: P,
) -> i32 {
    let page = resolve(locale).code_page();
    shared.scan(
        page,
        |pending| WideReaderSource::resume(reader, WideEncoding::Text(page), pending),
        |source| run(source, format, locale, args, policy),
    )
}

fn stdin_narrow<'a, P: DestinationPolicy>(
    format: &[u8],
    locale: Option<&Locale>,
    args: impl IntoIterator<Item = Arg<'a>>,
    policy: P,
) -> i32 {
    shared_narrow(&STDIN, io::stdin().lock(), format, locale, args, policy)
}

fn stdin_wide<'a, P: DestinationPolicy>(
    format: &[u16],
    locale: Option<&Locale>,
    args: impl IntoIterator<Item = Arg<'a>>,
    policy: P,
) -> i32 {
    shared_wide(&STDIN, io::stdin().lock(), format, locale, args, policy)
}

/// Scans from the process's standard input. Characters a call pushes back
/// are seen by the next `scanf` or `wscanf` call.
pub fn scanf<'a>(format: &[u8], args: impl IntoIterator<Item = Arg<'a>>) -> i32 {
    stdin_narrow(format, None, args, Unchecked)
}

pub fn scanf_l<'a>(format: &[u8], locale: Option<&Locale>, args: impl IntoIterator<Item = Arg<'a>>) -> i32 {
    stdin_narrow(format, locale, args, Unchecked)
}

pub fn scanf_s<'a>(format: &[u8], args: impl IntoIterator<Item = Arg<'a>>) -> i32 {
    stdin_narrow(format, None, args, Checked)
}

pub fn scanf_s_l<'a>(format: &[u8], locale: Option<&Locale>, args: impl IntoIterator<Item = Arg<'a>>) -> i32 {
    stdin_narrow(format, locale, args, Checked)
}

/// Scans wide characters from standard input, widening each byte through
/// the locale's code page.
pub fn wscanf<'a>(format: &[u16], args: impl IntoIterator<Item = Arg<'a>>) -> i32 {
    stdin_wide(format, None, args, Unchecked)
}

pub fn wscanf_l<'a>(format: &[u16], locale: Option<&Locale>, args: impl IntoIterator<Item = Arg<'a>>) -> i32 {
    stdin_wide(format, locale, args, Unchecked)
}

pub fn wscanf_s<'a>(format: &[u16], args: impl IntoIterator<Item = Arg<'a>>) -> i32 {
    stdin_wide(format, None, args, Checked)
}

pub fn wscanf_s_l<'a>(format: &[u16], locale: Option<&Locale>, args: impl IntoIterator<Item = Arg<'a>>) -> i32 {
    stdin_wide(format, locale, args, Checked)
}

// ============================================================================
// Console
// ============================================================================

/// Console keystrokes are bytes widened as Latin-1, so parked input is
/// narrowed back the same way.
fn shared_console<'a, C, K, P>(
    shared: &SharedInput,
    console: K,
    format: &[C],
    locale: Option<&Locale>,
    args: impl IntoIterator<Item = Arg<'a>>,
    policy: P,
) -> i32
where
    C: ScanChar,
    K: Console<C>,
    P: DestinationPolicy,
{
    shared.scan(
        CodePage::Latin1,
        |pending: Pending<C>| ConsoleSource::resume(console, pending),
        |source| run(source, format, locale, args, policy),
    )
}

/// Scans keystrokes from the console, echoing what it consumes.
pub fn cscanf<'a>(format: &[u8], args: impl IntoIterator<Item = Arg<'a>>) -> i32 {
    cscanf_l(format, None, args)
}

pub fn cscanf_l<'a>(format: &[u8], locale: Option<&Locale>, args: impl IntoIterator<Item = Arg<'a>>) -> i32 {
    shared_console(&CONSOLE, StdConsole::new(), format, locale, args, Unchecked)
}

pub fn cscanf_s<'a>(format: &[u8], args: impl IntoIterator<Item = Arg<'a>>) -> i32 {
    cscanf_s_l(format, None, args)
}

pub fn cscanf_s_l<'a>(format: &[u8], locale: Option<&Locale>, args: impl IntoIterator<Item = Arg<'a>>) -> i32 {
    shared_console(&CONSOLE, StdConsole::new(), format, locale, args, Checked)
}

pub fn cwscanf<'a>(format: &[u16], args: impl IntoIterator<Item = Arg<'a>>) -> i32 {
    cwscanf_l(format, None, args)
}

pub fn cwscanf_l<'a>(format: &[u16], locale: Option<&Locale>, args: impl IntoIterator<Item = Arg<'a>>) -> i32 {
    shared_console(&CONSOLE, StdConsole::new(), format, locale, args, Unchecked)
}

pub fn cwscanf_s<'a>(format: &[u16], args: impl IntoIterator<Item = Arg<'a>>) -> i32 {
    cwscanf_s_l(format, None, args)
}

pub fn cwscanf_s_l<'a>(format: &[u16], locale: Option<&Locale>, args: impl IntoIterator<Item = Arg<'a>>) -> i32 {
    shared_console(&CONSOLE, StdConsole::new(), format, locale, args, Checked)
}

// ============================================================================
// UCRT dispatchers
// ============================================================================

fn string_source<C: ScanChar>(input: &[C], length: usize) -> StrSource<'_, C> {
    if length == usize::MAX {
        return StrSource::new(input);
    }
    StrSource::bounded(input, length)
}

/// `__stdio_common_vsscanf`: `length` of `usize::MAX` means NUL-terminated.
pub fn stdio_common_vsscanf<'a>(
    options: u64,
    input: &[u8],
    length: usize,
    format: &[u8],
    locale: Option<&Locale>,
    args: impl IntoIterator<Item = Arg<'a>>,
) -> i32 {
    let options = ScanOptions::from_bits(options);
    options.report_unhandled(ScanOptions::STRING_KNOWN);
    let mut source = string_source(input, length);
    if options.is_secure() {
        return run(&mut source, format, locale, args, Checked);
    }
    run(&mut source, format, locale, args, Unchecked)
}

/// `__stdio_common_vswscanf`
pub fn stdio_common_vswscanf<'a>(
    options: u64,
    input: &[u16],
    length: usize,
    format: &[u16],
    locale: Option<&Locale>,
    args: impl IntoIterator<Item = Arg<'a>>,
) -> i32 {
    let options = ScanOptions::from_bits(options);
    options.report_unhandled(ScanOptions::STRING_KNOWN);
    let mut source = string_source(input, length);
    if options.is_secure() {
        return run(&mut source, format, locale, args, Checked);
    }
    run(&mut source, format, locale, args, Unchecked)
}

/// `__stdio_common_vfscanf`
pub fn stdio_common_vfscanf<'a, S>(
    options: u64,
    stream: &mut S,
    format: &[u8],
    locale: Option<&Locale>,
    args: impl IntoIterator<Item = Arg<'a>>,
) -> i32
where
    S: CharSource<u8> + ?Sized,
{
    let options = ScanOptions::from_bits(options);
    options.report_unhandled(ScanOptions::STREAM_KNOWN);
    if options.is_secure() {
        return run(stream, format, locale, args, Checked);
    }
    run(stream, format, locale, args, Unchecked)
}

/// `__stdio_common_vfwscanf`
pub fn stdio_common_vfwscanf<'a, S>(
    options: u64,
    stream: &mut S,
    format: &[u16],
    locale: Option<&Locale>,
    args: impl IntoIterator<Item = Arg<'a>>,
) -> i32
where
    S: CharSource<u16> + ?Sized,
{
    let options = ScanOptions::from_bits(options);
    options.report_unhandled(ScanOptions::STREAM_KNOWN);
    if options.is_secure() {
        return run(stream, format, locale, args, Checked);
    }
    run(stream, format, locale, args, Unchecked)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{EOF, SCANF_LEGACY_WIDE_SPECIFIERS, SCANF_SECURECRT};
    use crate::locale::CodePage;

    fn wide(text: &str) -> Vec<u16> {
        text.encode_utf16().collect()
    }

    #[test]
    fn test_sscanf_l_uses_the_given_decimal_point() {
        let mut value = 0f64;
        let comma = Locale::new("de_DE", b',', CodePage::Windows1252);
        assert_eq!(sscanf_l(b"1,5", b"%lf", Some(&comma), [Arg::from(&mut value)]), 1);
        assert_eq!(value, 1.5);
        assert_eq!(sscanf(b"1,5", b"%lf", [Arg::from(&mut value)]), 1);
        assert_eq!(value, 1.0);
    }

    #[test]
    fn test_va_list_forms() {
        let mut hours = 0u8;
        let mut minutes = 0u8;
        let args: Vec<Arg<'_>> = vec![Arg::from(&mut hours), Arg::from(&mut minutes)];
        assert_eq!(vsscanf(b"7:05", b"%hhu:%hhu", args), 2);
        assert_eq!((hours, minutes), (7, 5));

        let mut word = [0u16; 4];
        assert_eq!(vswscanf(&wide(" ok"), &wide("%3s"), vec![Arg::from(&mut word)]), 1);
        assert_eq!(&word[..3], &wide("ok\0")[..]);
    }

    #[test]
    fn test_snscanf_respects_length() {
        let mut value = 0i32;
        assert_eq!(snscanf(b"12345", 2, b"%d", [Arg::from(&mut value)]), 1);
        assert_eq!(value, 12);
        assert_eq!(snscanf(b"12345", 0, b"%d", [Arg::from(&mut value)]), EOF);
    }

    #[test]
    fn test_swscanf_narrow_destination() {
        let mut word = [0u8; 8];
        let input = wide("caf\u{e9} au lait");
        assert_eq!(swscanf(&input, &wide("%S"), [Arg::from(&mut word)]), 1);
        assert_eq!(&word[..5], b"caf\xe9\0");
    }

    #[test]
    fn test_snwscanf_s() {
        let mut word = [0u16; 8];
        let input = wide("abcdef");
        let assigned = snwscanf_s(&input, 3, &wide("%s"), [Arg::from(&mut word), Arg::Capacity(8)]);
        assert_eq!(assigned, 1);
        assert_eq!(&word[..4], &wide("abc\0")[..]);
    }

    #[test]
    fn test_dispatcher_selects_secure_path() {
        let mut word = [0u8; 8];
        let assigned = stdio_common_vsscanf(
            SCANF_SECURECRT | SCANF_LEGACY_WIDE_SPECIFIERS,
            b"hi",
            usize::MAX,
            b"%s",
            None,
            [Arg::from(&mut word)],
        );
        // the secure path wants a capacity after the buffer
        assert_eq!(assigned, EOF);

        let assigned = stdio_common_vsscanf(0, b"hi", usize::MAX, b"%s", None, [Arg::from(&mut word)]);
        assert_eq!(assigned, 1);
        assert_eq!(&word[..3], b"hi\0");
    }

    #[test]
    fn test_dispatcher_length_bounds_input() {
        let mut value = 0i32;
        let input = wide("987");
        let assigned = stdio_common_vswscanf(0, &input, 1, &wide("%d"), None, [Arg::from(&mut value)]);
        assert_eq!(assigned, 1);
        assert_eq!(value, 9);
    }

    #[test]
    fn test_fscanf_continues_where_it_stopped() {
        let mut source = ReaderSource::new(io::Cursor::new(b"10 -x 20".to_vec()));
        let mut value = 0i32;
        assert_eq!(fscanf(&mut source, b"%d", [Arg::from(&mut value)]), 1);
        assert_eq!(value, 10);
        assert_eq!(fscanf(&mut source, b"%d", [Arg::from(&mut value)]), 0);
        assert_eq!(fscanf(&mut source, b"-x%d", [Arg::from(&mut value)]), 1);
        assert_eq!(value, 20);
    }

    #[test]
    fn test_stdin_calls_share_pushback() {
        let stdin = SharedInput::new();
        let mut stream = io::Cursor::new(b"-x 1.5e+y".to_vec());
        let mut value = 9i32;
        let assigned = shared_narrow(&stdin, &mut stream, b"%d", None, [Arg::from(&mut value)], Unchecked);
        assert_eq!(assigned, 0);
        assert_eq!(value, 9);

        let mut word = [0u8; 8];
        let mut number = 0f64;
        let assigned = shared_narrow(
            &stdin,
            &mut stream,
            b"%s %lf",
            None,
            [Arg::from(&mut word), Arg::from(&mut number)],
            Unchecked,
        );
        assert_eq!(assigned, 2);
        assert_eq!(&word[..3], b"-x\0");
        assert_eq!(number, 1.5);

        let mut rest = [0u8; 8];
        assert_eq!(shared_narrow(&stdin, &mut stream, b"%s", None, [Arg::from(&mut rest)], Unchecked), 1);
        assert_eq!(&rest[..4], b"e+y\0");
    }

    #[test]
    fn test_wide_stdin_continues_narrow_stdin() {
        let stdin = SharedInput::new();
        let mut stream = io::Cursor::new(b"0xg".to_vec());
        let mut value = 5u32;
        let assigned = shared_narrow(&stdin, &mut stream, b"%x", None, [Arg::from(&mut value)], Unchecked);
        assert_eq!(assigned, 1);
        assert_eq!(value, 0);

        let mut rest = [0u16; 4];
        assert_eq!(shared_wide(&stdin, &mut stream, &wide("%s"), None, [Arg::from(&mut rest)], Unchecked), 1);
        assert_eq!(&rest[..3], &wide("xg\0")[..]);
    }

    #[derive(Default)]
    struct Keys {
        typed: std::collections::VecDeque<u8>,
        echoed: Vec<u8>,
    }

    impl Console<u8> for Keys {
        fn getch(&mut self) -> Option<u8> {
            self.typed.pop_front()
        }

        fn putch(&mut self, c: u8) {
            self.echoed.push(c);
        }
    }

    #[test]
    fn test_console_calls_keep_lookahead() {
        let console = SharedInput::new();
        let mut keys = Keys {
            typed: b"12x".iter().copied().collect(),
            ..Default::default()
        };
        let mut value = 0i32;
        assert_eq!(shared_console(&console, &mut keys, b"%d", None, [Arg::from(&mut value)], Unchecked), 1);
        assert_eq!(value, 12);
        assert!(keys.typed.is_empty());

        let mut letter = [0u8; 1];
        assert_eq!(shared_console(&console, &mut keys, b"%c", None, [Arg::from(&mut letter)], Unchecked), 1);
        assert_eq!(letter, *b"x");
        assert_eq!(keys.echoed, b"12x");
    }

    #[test]
    fn test_console_keeps_pushed_sign() {
        let console = SharedInput::new();
        let mut keys = Keys {
            typed: b"-q".iter().copied().collect(),
            ..Default::default()
        };
        let mut value = 0i32;
        assert_eq!(shared_console(&console, &mut keys, b"%d", None, [Arg::from(&mut value)], Unchecked), 0);

        let mut word = [0u8; 4];
        assert_eq!(shared_console(&console, &mut keys, b"%s", None, [Arg::from(&mut word)], Unchecked), 1);
        assert_eq!(&word[..3], b"-q\0");
        // the sign is echoed once, when it was first consumed
        assert_eq!(keys.echoed, b"-q");
    }
}
