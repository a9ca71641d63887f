//! The slice of locale state the scanner reads.
//!
//! Locale lookup itself belongs to the surrounding runtime; the scanner only
//! needs the decimal point and the single-byte code page used to transcode
//! between narrow and wide destinations. Each thread carries a current
//! locale that calls without an explicit override fall back to.

use std::borrow::Cow;
use std::cell::RefCell;

/// Byte stored when a wide character has no narrow representation.
pub const DEFAULT_CHAR: u8 = b'?';

/// Windows-1252 assignments for `0x80..=0x9F`; unassigned bytes map to
/// themselves.
const CP1252_HIGH: [u16; 32] = [
    0x20AC, 0x0081, 0x201A, 0x0192, 0x201E, 0x2026, 0x2020, 0x2021, //
    0x02C6, 0x2030, 0x0160, 0x2039, 0x0152, 0x008D, 0x017D, 0x008F, //
    0x0090, 0x2018, 0x2019, 0x201C, 0x201D, 0x2022, 0x2013, 0x2014, //
    0x02DC, 0x2122, 0x0161, 0x203A, 0x0153, 0x009D, 0x017E, 0x0178, //
];

/// Single-byte code page for narrow/wide transcoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CodePage {
    /// ISO-8859-1: every byte maps to the code unit of the same value.
    /// This is what the "C" locale does.
    #[default]
    Latin1,
    /// Windows-1252 (Western European ANSI).
    Windows1252,
}

impl CodePage {
    /// Widens one narrow character.
    pub fn to_wide(self, byte: u8) -> u16 {
        match self {
            Self::Latin1 => u16::from(byte),
            Self::Windows1252 => match byte {
                0x80..=0x9F => CP1252_HIGH[usize::from(byte - 0x80)],
                _ => u16::from(byte),
            },
        }
    }

    /// Narrows one wide code unit, substituting [`DEFAULT_CHAR`] when the
    /// code page cannot represent it.
    pub fn to_narrow(self, unit: u16) -> u8 {
        match self {
            Self::Latin1 => u8::try_from(unit).unwrap_or(DEFAULT_CHAR),
            Self::Windows1252 => {
                if unit < 0x80 || (0xA0..=0xFF).contains(&unit) {
                    return unit as u8;
                }
                CP1252_HIGH
                    .iter()
                    .position(|&mapped| mapped == unit)
                    .map_or(DEFAULT_CHAR, |index| 0x80 + index as u8)
            }
        }
    }
}

/// Locale data consulted by a scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Locale {
    name: Cow<'static, str>,
    decimal_point: u8,
    code_page: CodePage,
}

impl Default for Locale {
    fn default() -> Self {
        Self::c()
    }
}

impl Locale {
    /// The "C" locale: `.` decimal point, Latin-1 transcoding.
    pub fn c() -> Self {
        Self {
            name: Cow::Borrowed("C"),
            decimal_point: b'.',
            code_page: CodePage::Latin1,
        }
    }

    /// Creates a locale with the given name, decimal point and code page.
    pub fn new(name: impl Into<Cow<'static, str>>, decimal_point: u8, code_page: CodePage) -> Self {
        Self {
            name: name.into(),
            decimal_point,
            code_page,
        }
    }

    /// Returns the locale name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the decimal point character
    pub fn decimal_point(&self) -> u8 {
        self.decimal_point
    }

    /// Returns the code page used for narrow/wide transcoding
    pub fn code_page(&self) -> CodePage {
        self.code_page
    }
}

thread_local! {
    static THREAD_LOCALE: RefCell<Locale> = RefCell::new(Locale::c());
}

/// Returns a copy of the calling thread's current locale.
pub fn current_locale() -> Locale {
    THREAD_LOCALE.with(|current| current.borrow().clone())
}

/// Replaces the calling thread's current locale, returning the previous one.
pub fn set_thread_locale(locale: Locale) -> Locale {
    THREAD_LOCALE.with(|current| current.replace(locale))
}
