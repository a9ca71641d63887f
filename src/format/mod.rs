//! Format-string directives.
//!
//! A format is read lazily, one [`Directive`] at a time, so a scan that stops
//! early never looks at the rest of the format.

use std::ops::RangeInclusive;

use crate::chars::{ScanChar, until_nul};
use crate::error::FormatError;

mod format_parser;

/// One element of a format string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Directive {
    /// A run of whitespace: skips any amount of input whitespace.
    Whitespace,
    /// A character that must match the next input character exactly.
    /// Unknown conversion characters (`%q`) are parsed as this too.
    Literal(u32),
    /// A `%` conversion.
    Conversion(Conversion),
}

/// A parsed `%[*][width][length]kind` conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conversion {
    /// `*`: read and discard, no destination
    pub suppress: bool,
    /// Maximum characters to consume; a written width of 0 means unset
    pub width: Option<usize>,
    pub length: LengthModifier,
    pub kind: ConversionKind,
}

impl Conversion {
    /// Whether a successful run counts as an assignment.
    pub fn assigns(&self) -> bool {
        !self.suppress && !matches!(self.kind, ConversionKind::Count | ConversionKind::Percent)
    }
}

/// Size prefix of a conversion.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LengthModifier {
    #[default]
    Default,
    /// `hh`
    Char,
    /// `h`
    Short,
    /// `l`
    Long,
    /// `ll`
    LongLong,
    /// `L`
    LongDouble,
    /// `j`
    IntMax,
    /// `z`
    Size,
    /// `t`
    PtrDiff,
    /// `I32`
    Int32,
    /// `I64`
    Int64,
    /// `I`
    PtrSize,
    /// `w`
    Wide,
}

impl LengthModifier {
    /// Storage width of an integer destination. `long` is 32 bits, as on
    /// Windows.
    pub fn int_bits(self) -> u32 {
        match self {
            Self::Char => 8,
            Self::Short => 16,
            Self::Default | Self::Long | Self::LongDouble | Self::Int32 | Self::Wide => 32,
            Self::LongLong | Self::Int64 | Self::IntMax => 64,
            Self::Size | Self::PtrDiff | Self::PtrSize => usize::BITS,
        }
    }

    /// Whether a float destination is `f64` rather than `f32`.
    pub fn is_double(self) -> bool {
        matches!(self, Self::Long | Self::LongLong | Self::LongDouble | Self::Int64)
    }

    /// Whether a text conversion in a `wide_call` stores wide characters.
    /// `swapped` is set for the `%S`/`%C` spellings. `h` forces narrow and
    /// `l`/`w` force wide; otherwise the call's own width applies, flipped
    /// by `swapped`.
    pub fn stores_wide(self, wide_call: bool, swapped: bool) -> bool {
        match self {
            Self::Short => false,
            Self::Long | Self::Wide => true,
            _ => wide_call != swapped,
        }
    }
}

/// What a conversion reads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConversionKind {
    /// `%d`
    Decimal,
    /// `%i`: base from the prefix
    Integer,
    /// `%o`
    Octal,
    /// `%u`
    Unsigned,
    /// `%x`, `%X`
    Hex,
    /// `%e`, `%E`, `%f`, `%F`, `%g`, `%G`, `%a`, `%A`
    Float,
    /// `%s`, or `%S` when `swapped`
    String { swapped: bool },
    /// `%c`, or `%C` when `swapped`
    Chars { swapped: bool },
    /// `%[...]`
    Class(CharClass),
    /// `%p`
    Pointer,
    /// `%n`
    Count,
    /// `%%`
    Percent,
}

/// Set of characters accepted by a `%[...]` conversion.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CharClass {
    ranges: Vec<RangeInclusive<u32>>,
    negated: bool,
}

impl CharClass {
    pub fn new(negated: bool) -> Self {
        Self {
            ranges: Vec::new(),
            negated,
        }
    }

    pub fn insert(&mut self, code: u32) {
        self.ranges.push(code..=code);
    }

    /// Adds a range; reversed bounds are swapped.
    pub fn insert_range(&mut self, from: u32, to: u32) {
        self.ranges.push(from.min(to)..=from.max(to));
    }

    pub fn is_negated(&self) -> bool {
        self.negated
    }

    /// Whether the class accepts `code`, honoring negation.
    pub fn accepts(&self, code: u32) -> bool {
        self.ranges.iter().any(|range| range.contains(&code)) != self.negated
    }
}

/// Lazy iterator over the directives of a format.
#[derive(Debug, Clone)]
pub struct Directives<'f, C> {
    rest: &'f [C],
    offset: usize,
}

impl<'f, C: ScanChar> Directives<'f, C> {
    /// Reads `format` up to its first NUL.
    pub fn new(format: &'f [C]) -> Self {
        Self {
            rest: until_nul(format),
            offset: 0,
        }
    }

    /// Position of the next directive, in code units.
    pub fn offset(&self) -> usize {
        self.offset
    }
}

impl<C: ScanChar> Iterator for Directives<'_, C> {
    type Item = Result<Directive, FormatError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.rest.is_empty() {
            return None;
        }
        return match format_parser::directive(self.rest) {
            Ok((rest, directive)) => {
                self.offset += self.rest.len() - rest.len();
                self.rest = rest;
                Some(Ok(directive))
            }
            Err(error) => {
                let error = format_parser::format_error(&error, self.offset);
                self.rest = &[];
                Some(Err(error))
            }
        };
    }
}

/// Parses a whole format eagerly.
pub fn parse_format<C: ScanChar>(format: &[C]) -> Result<Vec<Directive>, FormatError> {
    Directives::new(format).collect()
}

#[cfg(test)]
mod test {
    use super::*;
    use pretty_assertions::assert_eq;

    fn conversion(kind: ConversionKind) -> Directive {
        Directive::Conversion(Conversion {
            suppress: false,
            width: None,
            length: LengthModifier::Default,
            kind,
        })
    }

    #[test]
    fn test_simple_format() {
        let directives = parse_format(b"%d -> %s").unwrap();
        assert_eq!(
            directives,
            vec![
                conversion(ConversionKind::Decimal),
                Directive::Whitespace,
                Directive::Literal(u32::from(b'-')),
                Directive::Literal(u32::from(b'>')),
                Directive::Whitespace,
                conversion(ConversionKind::String { swapped: false }),
            ]
        );
    }

    #[test]
    fn test_prefixes() {
        let directives = parse_format(b"%*5hhd%I64x%lf%0s").unwrap();
        assert_eq!(
            directives,
            vec![
                Directive::Conversion(Conversion {
                    suppress: true,
                    width: Some(5),
                    length: LengthModifier::Char,
                    kind: ConversionKind::Decimal,
                }),
                Directive::Conversion(Conversion {
                    suppress: false,
                    width: None,
                    length: LengthModifier::Int64,
                    kind: ConversionKind::Hex,
                }),
                Directive::Conversion(Conversion {
                    suppress: false,
                    width: None,
                    length: LengthModifier::Long,
                    kind: ConversionKind::Float,
                }),
                conversion(ConversionKind::String { swapped: false }),
            ]
        );
    }

    #[test]
    fn test_char_class() {
        let directives = parse_format(b"%[]a-c-]").unwrap();
        let Directive::Conversion(Conversion {
            kind: ConversionKind::Class(class),
            ..
        }) = &directives[0]
        else {
            panic!("expected a class, got {directives:?}");
        };
        for accepted in [b']', b'a', b'b', b'c', b'-'] {
            assert!(class.accepts(u32::from(accepted)), "{}", accepted as char);
        }
        assert!(!class.accepts(u32::from(b'd')));
        assert!(!class.is_negated());
    }

    #[test]
    fn test_negated_and_reversed_class() {
        let directives = parse_format(b"%[^z-x]").unwrap();
        let Directive::Conversion(Conversion {
            kind: ConversionKind::Class(class),
            ..
        }) = &directives[0]
        else {
            panic!("expected a class, got {directives:?}");
        };
        assert!(class.is_negated());
        assert!(!class.accepts(u32::from(b'y')));
        assert!(class.accepts(u32::from(b'a')));
    }

    #[test]
    fn test_unknown_conversion_is_literal() {
        let directives = parse_format(b"%q%%").unwrap();
        assert_eq!(
            directives,
            vec![
                Directive::Literal(u32::from(b'q')),
                conversion(ConversionKind::Percent),
            ]
        );
    }

    #[test]
    fn test_format_stops_at_nul() {
        assert_eq!(parse_format(b"%d\0%s").unwrap().len(), 1);
    }

    #[test]
    fn test_wide_format() {
        let format: Vec<u16> = "%S %3c".encode_utf16().collect();
        let directives = parse_format(&format).unwrap();
        assert_eq!(directives.len(), 3);
        assert_eq!(directives[0], conversion(ConversionKind::String { swapped: true }));
    }

    #[test]
    fn test_truncated_conversion() {
        assert_eq!(
            parse_format(b"ab%5"),
            Err(FormatError::TruncatedConversion { offset: 2 })
        );
    }

    #[test]
    fn test_unterminated_class() {
        assert_eq!(
            parse_format(b" %[abc"),
            Err(FormatError::UnterminatedClass { offset: 1 })
        );
    }

    #[test]
    fn test_directives_are_lazy() {
        let mut directives = Directives::new(b"%d%");
        assert_eq!(directives.next(), Some(Ok(conversion(ConversionKind::Decimal))));
        assert_eq!(directives.offset(), 2);
        assert!(matches!(directives.next(), Some(Err(_))));
        assert_eq!(directives.next(), None);
    }

    #[test]
    fn test_text_width_resolution() {
        assert!(!LengthModifier::Default.stores_wide(false, false));
        assert!(LengthModifier::Default.stores_wide(false, true));
        assert!(LengthModifier::Default.stores_wide(true, false));
        assert!(!LengthModifier::Default.stores_wide(true, true));
        assert!(LengthModifier::Long.stores_wide(false, false));
        assert!(!LengthModifier::Short.stores_wide(true, false));
    }
}
