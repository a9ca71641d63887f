use crt_scanf::family::{sscanf, sscanf_s};
use crt_scanf::{Arg, ContractViolation, EOF, ScanConfig, ScanError, Scanner, StrSource, Unchecked};
use pretty_assertions::assert_eq;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

fn text(buffer: &[u8]) -> &[u8] {
    let end = buffer.iter().position(|&b| b == 0).unwrap_or(buffer.len());
    &buffer[..end]
}

#[test]
fn test_decimal_strings() {
    for input in ["0", "7", "-7", "123456", "-2147483648", "2147483647", "-0"] {
        let mut value = 0i32;
        assert_eq!(sscanf(input.as_bytes(), b"%d", [Arg::from(&mut value)]), 1, "{input}");
        assert_eq!(value, input.parse::<i32>().unwrap(), "{input}");
    }
}

#[test]
fn test_eof_versus_mismatch() {
    let mut value = 99i32;
    assert_eq!(sscanf(b"", b"%d", [Arg::from(&mut value)]), EOF);
    assert_eq!(sscanf(b" \t\n", b"%d", [Arg::from(&mut value)]), EOF);
    assert_eq!(sscanf(b"abc", b"%d", [Arg::from(&mut value)]), 0);
    assert_eq!(value, 99);
}

macro_rules! round_trip {
    ($ty:ty, $format:literal) => {
        for n in [<$ty>::MIN, <$ty>::MIN / 3, 0 as $ty, 1 as $ty, <$ty>::MAX / 7, <$ty>::MAX] {
            let mut scanned: $ty = 0;
            let input = n.to_string();
            assert_eq!(sscanf(input.as_bytes(), $format, [Arg::from(&mut scanned)]), 1);
            assert_eq!(scanned, n, "{} through {}", input, stringify!($format));
        }
    };
}

#[test]
fn test_round_trip_every_width() {
    round_trip!(i8, b"%hhd");
    round_trip!(u8, b"%hhu");
    round_trip!(i16, b"%hd");
    round_trip!(u16, b"%hu");
    round_trip!(i32, b"%d");
    round_trip!(u32, b"%u");
    round_trip!(i32, b"%ld");
    round_trip!(i64, b"%lld");
    round_trip!(u64, b"%llu");
    round_trip!(i64, b"%I64d");
    round_trip!(i64, b"%jd");
    round_trip!(usize, b"%zu");
    round_trip!(isize, b"%td");
}

#[test]
fn test_round_trip_hex_and_octal() {
    for n in [0u32, 1, 0x7f, 0xdead_beef, u32::MAX] {
        let mut scanned = 0u32;
        let hex = format!("{n:#x}");
        assert_eq!(sscanf(hex.as_bytes(), b"%x", [Arg::from(&mut scanned)]), 1);
        assert_eq!(scanned, n);
        let octal = format!("{n:o}");
        assert_eq!(sscanf(octal.as_bytes(), b"%o", [Arg::from(&mut scanned)]), 1);
        assert_eq!(scanned, n);
    }
}

#[test]
fn test_round_trip_floats() {
    for x in [0.0f64, 1.5, -2.25, 1e-10, 6.02214076e23, f64::MAX, f64::MIN_POSITIVE] {
        let mut scanned = 0f64;
        let input = format!("{x:e}");
        assert_eq!(sscanf(input.as_bytes(), b"%lf", [Arg::from(&mut scanned)]), 1);
        assert_eq!(scanned, x, "{input}");
    }
}

#[test]
fn test_width_leaves_the_rest() {
    let mut first = 0i32;
    let mut second = 0i32;
    let assigned = sscanf(b"123456", b"%5d%d", [Arg::from(&mut first), Arg::from(&mut second)]);
    assert_eq!(assigned, 2);
    assert_eq!((first, second), (12345, 6));
}

#[test]
fn test_width_consumes_exactly() {
    let mut value = 0i32;
    let mut source = StrSource::new(&b"123456"[..]);
    let report = Scanner::new().scan(&mut source, b"%5d", [Arg::from(&mut value)], Unchecked);
    assert_eq!(report.return_value(), 1);
    assert_eq!(value, 12345);
    assert_eq!(source.remaining(), b"6");
}

#[test]
fn test_string_stops_at_space() {
    let mut word = [0u8; 16];
    assert_eq!(sscanf(b"  hello world", b"%s", [Arg::from(&mut word)]), 1);
    assert_eq!(text(&word), b"hello");
}

#[test]
fn test_char_classes() {
    let mut run = [0u8; 8];
    assert_eq!(sscanf(b"abcDEF", b"%[a-z]", [Arg::from(&mut run)]), 1);
    assert_eq!(text(&run), b"abc");

    let mut untouched = [b'#'; 8];
    assert_eq!(sscanf(b"abcDEF", b"%[^a-z]", [Arg::from(&mut untouched)]), 0);
    assert_eq!(untouched, [b'#'; 8]);
}

#[test]
fn test_secure_capacity_three() {
    let violations = Arc::new(Mutex::new(Vec::new()));
    let seen = Arc::clone(&violations);
    let config = ScanConfig::new().invalid_parameter_handler(move |violation| {
        seen.lock().unwrap().push(violation.clone());
    });

    let mut buffer = [b'#'; 8];
    let mut source = StrSource::new(&b"hello"[..]);
    let report = Scanner::with_config(config).scan(
        &mut source,
        b"%s",
        [Arg::from(&mut buffer), Arg::Capacity(3)],
        crt_scanf::Checked,
    );
    assert_eq!(report.return_value(), 0);
    assert_eq!(&buffer[3..], &[b'#'; 5]);
    assert_eq!(buffer[0], 0);
    assert_eq!(
        *violations.lock().unwrap(),
        vec![ContractViolation::BufferTooSmall { index: 1, capacity: 3 }]
    );

    let mut again = [b'#'; 8];
    assert_eq!(sscanf_s(b"hello", b"%s", [Arg::from(&mut again), Arg::Capacity(3)]), 0);
    assert_eq!(again[0], 0);
}

#[test]
fn test_count_reports_everything_consumed() {
    let mut value = 0i32;
    let mut count = 0i32;
    assert_eq!(sscanf(b"  42", b"%d%n", [Arg::from(&mut value), Arg::from(&mut count)]), 1);
    assert_eq!((value, count), (42, 4));
}

#[test]
fn test_literal_between_conversions() {
    let mut a = 0i32;
    let mut b = 0i32;
    assert_eq!(sscanf(b"3,4", b"%d,%d", [Arg::from(&mut a), Arg::from(&mut b)]), 2);
    assert_eq!((a, b), (3, 4));

    let mut c = 0i32;
    let mut d = 0i32;
    assert_eq!(sscanf(b"3;4", b"%d,%d", [Arg::from(&mut c), Arg::from(&mut d)]), 1);
    assert_eq!((c, d), (3, 0));
}

#[test]
fn test_lone_minus_is_pushed_back() {
    let mut value = 0i32;
    let mut source = StrSource::new(&b"-abc"[..]);
    let scanner = Scanner::new();
    let report = scanner.scan(&mut source, b"%d", [Arg::from(&mut value)], Unchecked);
    assert_eq!(report.return_value(), 0);
    assert_eq!(report.halt(), Some(&ScanError::Mismatch { offset: 0 }));

    let mut rest = [0u8; 8];
    let report = scanner.scan(&mut source, b"%s", [Arg::from(&mut rest)], Unchecked);
    assert_eq!(report.return_value(), 1);
    assert_eq!(text(&rest), b"-abc");
}

#[test]
fn test_handler_not_called_for_mismatch() {
    let calls = Arc::new(AtomicUsize::new(0));
    let seen = Arc::clone(&calls);
    let scanner = Scanner::with_config(ScanConfig::new().invalid_parameter_handler(move |_| {
        seen.fetch_add(1, Ordering::SeqCst);
    }));
    let mut value = 0i32;
    let mut source = StrSource::new(&b"x"[..]);
    scanner.scan(&mut source, b"%d", [Arg::from(&mut value)], Unchecked);
    assert_eq!(calls.load(Ordering::SeqCst), 0);

    let mut source = StrSource::new(&b"1"[..]);
    let report = scanner.scan(&mut source, b"%d", [], Unchecked);
    assert_eq!(report.return_value(), EOF);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}
