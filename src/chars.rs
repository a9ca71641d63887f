//! Character-width abstraction and digit lookup.
//!
//! The interpreter is written once over [`ScanChar`]; `u8` gives the narrow
//! (`scanf`) family and `u16` the wide (`wscanf`) family, where a wide
//! character is one UTF-16 code unit.

use std::fmt::Debug;

use crate::locale::CodePage;

/// A code unit the scanner can read from input and format strings.
pub trait ScanChar: Copy + Eq + Debug + Send + Sync + 'static {
    /// The string terminator.
    const NUL: Self;

    /// True for the wide family.
    const WIDE: bool;

    /// Human-readable width name, used in diagnostics.
    const WIDTH_NAME: &'static str;

    /// Numeric value of the code unit.
    fn code(self) -> u32;

    /// Whitespace as classified by `isspace`/`iswspace`.
    fn is_space(self) -> bool;

    /// Narrow representation, transcoding through `page` when needed.
    fn to_narrow(self, page: CodePage) -> u8;

    /// Wide representation, transcoding through `page` when needed.
    fn to_wide(self, page: CodePage) -> u16;

    /// The code unit for a narrow character, widened through `page`.
    fn from_narrow(byte: u8, page: CodePage) -> Self;

    /// Returns true if this is exactly the ASCII character `ascii`.
    #[inline]
    fn is(self, ascii: u8) -> bool {
        self.code() == u32::from(ascii)
    }

    /// The ASCII character, if this code unit is one.
    #[inline]
    fn ascii(self) -> Option<u8> {
        u8::try_from(self.code()).ok().filter(u8::is_ascii)
    }
}

impl ScanChar for u8 {
    const NUL: Self = 0;
    const WIDE: bool = false;
    const WIDTH_NAME: &'static str = "narrow";

    #[inline]
    fn code(self) -> u32 {
        u32::from(self)
    }

    #[inline]
    fn is_space(self) -> bool {
        // "C" locale isspace: space, \t, \n, \v, \f, \r
        matches!(self, b' ' | b'\t'..=b'\r')
    }

    #[inline]
    fn to_narrow(self, _page: CodePage) -> u8 {
        self
    }

    #[inline]
    fn to_wide(self, page: CodePage) -> u16 {
        page.to_wide(self)
    }

    #[inline]
    fn from_narrow(byte: u8, _page: CodePage) -> Self {
        byte
    }
}

impl ScanChar for u16 {
    const NUL: Self = 0;
    const WIDE: bool = true;
    const WIDTH_NAME: &'static str = "wide";

    #[inline]
    fn code(self) -> u32 {
        u32::from(self)
    }

    #[inline]
    fn is_space(self) -> bool {
        char::from_u32(u32::from(self)).is_some_and(char::is_whitespace)
    }

    #[inline]
    fn to_narrow(self, page: CodePage) -> u8 {
        page.to_narrow(self)
    }

    #[inline]
    fn to_wide(self, _page: CodePage) -> u16 {
        self
    }

    #[inline]
    fn from_narrow(byte: u8, page: CodePage) -> Self {
        page.to_wide(byte)
    }
}

/// Value of `c` as a digit in `base` (2–36), or `None` if it is not one.
///
/// Letters are case-insensitive: `A`/`a` is 10, up to `Z`/`z` = 35.
pub fn digit_value<C: ScanChar>(c: C, base: u32) -> Option<u32> {
    let value = match c.ascii()? {
        digit @ b'0'..=b'9' => u32::from(digit - b'0'),
        upper @ b'A'..=b'Z' => u32::from(upper - b'A') + 10,
        lower @ b'a'..=b'z' => u32::from(lower - b'a') + 10,
        _ => return None,
    };
    (value < base).then_some(value)
}

/// Slices `format` at its first NUL, if any.
pub(crate) fn until_nul<C: ScanChar>(text: &[C]) -> &[C] {
    let end = text.iter().position(|&c| c == C::NUL).unwrap_or(text.len());
    &text[..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decimal_digits() {
        assert_eq!(digit_value(b'0', 10), Some(0));
        assert_eq!(digit_value(b'9', 10), Some(9));
        assert_eq!(digit_value(b'a', 10), None);
        assert_eq!(digit_value(b'8', 8), None);
        assert_eq!(digit_value(b'1', 2), Some(1));
        assert_eq!(digit_value(b'2', 2), None);
    }

    #[test]
    fn test_letters_are_case_insensitive() {
        assert_eq!(digit_value(b'a', 16), Some(10));
        assert_eq!(digit_value(b'F', 16), Some(15));
        assert_eq!(digit_value(b'g', 16), None);
        assert_eq!(digit_value(b'z', 36), Some(35));
        assert_eq!(digit_value(b'Z', 36), Some(35));
    }

    #[test]
    fn test_wide_digits_match_narrow() {
        for base in 2..=36 {
            for byte in 0u8..=0x7F {
                assert_eq!(
                    digit_value(u16::from(byte), base),
                    digit_value(byte, base),
                    "byte {byte:#x} base {base}"
                );
            }
        }
        // Fullwidth digits are not digits.
        assert_eq!(digit_value(0xFF11u16, 10), None);
    }

    #[test]
    fn test_whitespace_classes() {
        for byte in [b' ', b'\t', b'\n', 0x0B, 0x0C, b'\r'] {
            assert!(byte.is_space());
        }
        assert!(!0xA0u8.is_space());
        assert!(0x3000u16.is_space());
        assert!(!(b'x' as u16).is_space());
    }

    #[test]
    fn test_until_nul() {
        assert_eq!(until_nul(b"%d\0junk"), b"%d");
        assert_eq!(until_nul(b"%d"), b"%d");
        let wide: [u16; 3] = [0x25, 0, 0x64];
        assert_eq!(until_nul(&wide), &[0x25]);
    }
}
