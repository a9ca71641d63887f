use nom::{
    IResult, Parser,
    branch::alt,
    combinator::{cut, map, opt, value},
    error::{Error, ErrorKind},
    sequence::pair,
};

use super::{CharClass, Conversion, ConversionKind, Directive, LengthModifier};
use crate::chars::{ScanChar, digit_value};
use crate::error::FormatError;

type FormatResult<'f, C, O> = IResult<&'f [C], O>;

fn reject<C, O>(input: &[C], kind: ErrorKind) -> FormatResult<'_, C, O> {
    return Err(nom::Err::Error(Error::new(input, kind)));
}

/// Matches exactly the ASCII character `ascii`.
fn unit<'f, C: ScanChar>(ascii: u8) -> impl Fn(&'f [C]) -> FormatResult<'f, C, C> {
    move |input: &'f [C]| match input.split_first() {
        Some((&c, rest)) if c.is(ascii) => Ok((rest, c)),
        _ => reject(input, ErrorKind::Char),
    }
}

fn any_unit<C: ScanChar>(input: &[C]) -> FormatResult<'_, C, C> {
    return match input.split_first() {
        Some((&c, rest)) => Ok((rest, c)),
        None => reject(input, ErrorKind::Eof),
    };
}

pub(super) fn directive<C: ScanChar>(input: &[C]) -> FormatResult<'_, C, Directive> {
    alt((whitespace::<C>, conversion::<C>, literal::<C>)).parse(input)
}

/// Maps a parser failure to the error reported for the directive starting
/// at `offset`.
pub(super) fn format_error<C>(error: &nom::Err<Error<&[C]>>, offset: usize) -> FormatError {
    return match error {
        nom::Err::Failure(Error {
            code: ErrorKind::TakeUntil,
            ..
        }) => FormatError::UnterminatedClass { offset },
        _ => FormatError::TruncatedConversion { offset },
    };
}

fn whitespace<C: ScanChar>(input: &[C]) -> FormatResult<'_, C, Directive> {
    let run = input.iter().take_while(|c| c.is_space()).count();
    if run == 0 {
        return reject(input, ErrorKind::Space);
    }
    return Ok((&input[run..], Directive::Whitespace));
}

fn literal<C: ScanChar>(input: &[C]) -> FormatResult<'_, C, Directive> {
    let (remaining, c) = any_unit(input)?;
    return Ok((remaining, Directive::Literal(c.code())));
}

fn conversion<C: ScanChar>(input: &[C]) -> FormatResult<'_, C, Directive> {
    let (remaining, _) = unit::<C>(b'%')(input)?;
    cut(conversion_body::<C>).parse(remaining)
}

fn conversion_body<C: ScanChar>(input: &[C]) -> FormatResult<'_, C, Directive> {
    let (remaining, suppress) = map(opt(unit::<C>(b'*')), |star: Option<C>| star.is_some()).parse(input)?;
    let (remaining, width) = map(opt(width::<C>), Option::flatten).parse(remaining)?;
    let (remaining, length) = map(opt(length_modifier::<C>), Option::unwrap_or_default).parse(remaining)?;
    let (mut remaining, kind_char) = any_unit(remaining)?;
    let kind = match kind_char.ascii() {
        Some(b'd') => ConversionKind::Decimal,
        Some(b'i') => ConversionKind::Integer,
        Some(b'o') => ConversionKind::Octal,
        Some(b'u') => ConversionKind::Unsigned,
        Some(b'x' | b'X') => ConversionKind::Hex,
        Some(b'e' | b'E' | b'f' | b'F' | b'g' | b'G' | b'a' | b'A') => ConversionKind::Float,
        Some(b's') => ConversionKind::String { swapped: false },
        Some(b'S') => ConversionKind::String { swapped: true },
        Some(b'c') => ConversionKind::Chars { swapped: false },
        Some(b'C') => ConversionKind::Chars { swapped: true },
        Some(b'p') => ConversionKind::Pointer,
        Some(b'n') => ConversionKind::Count,
        Some(b'%') => ConversionKind::Percent,
        Some(b'[') => {
            let (after_class, class) = char_class(remaining)?;
            remaining = after_class;
            ConversionKind::Class(class)
        }
        _ => return Ok((remaining, Directive::Literal(kind_char.code()))),
    };
    let conversion = Conversion {
        suppress,
        width,
        length,
        kind,
    };
    return Ok((remaining, Directive::Conversion(conversion)));
}

fn width<C: ScanChar>(input: &[C]) -> FormatResult<'_, C, Option<usize>> {
    let digits = input
        .iter()
        .take_while(|&&c| digit_value(c, 10).is_some())
        .count();
    if digits == 0 {
        return reject(input, ErrorKind::Digit);
    }
    let width = input[..digits].iter().fold(0usize, |width, &c| {
        let digit = digit_value(c, 10).unwrap_or(0) as usize;
        width.saturating_mul(10).saturating_add(digit)
    });
    return Ok((&input[digits..], (width > 0).then_some(width)));
}

fn length_modifier<C: ScanChar>(input: &[C]) -> FormatResult<'_, C, LengthModifier> {
    alt((
        value(LengthModifier::Char, pair(unit::<C>(b'h'), unit::<C>(b'h'))),
        value(LengthModifier::Short, unit::<C>(b'h')),
        value(LengthModifier::LongLong, pair(unit::<C>(b'l'), unit::<C>(b'l'))),
        value(LengthModifier::Long, unit::<C>(b'l')),
        value(LengthModifier::LongDouble, unit::<C>(b'L')),
        value(
            LengthModifier::Int64,
            pair(unit::<C>(b'I'), pair(unit::<C>(b'6'), unit::<C>(b'4'))),
        ),
        value(
            LengthModifier::Int32,
            pair(unit::<C>(b'I'), pair(unit::<C>(b'3'), unit::<C>(b'2'))),
        ),
        value(LengthModifier::PtrSize, unit::<C>(b'I')),
        value(LengthModifier::IntMax, unit::<C>(b'j')),
        value(LengthModifier::Size, unit::<C>(b'z')),
        value(LengthModifier::PtrDiff, unit::<C>(b't')),
        value(LengthModifier::Wide, unit::<C>(b'w')),
    ))
    .parse(input)
}

/// Members of a `%[...]` class; `input` starts right after the `[`.
fn char_class<C: ScanChar>(input: &[C]) -> FormatResult<'_, C, CharClass> {
    let (mut remaining, caret) = opt(unit::<C>(b'^')).parse(input)?;
    let mut class = CharClass::new(caret.is_some());
    // A leading `]` is a member, not the terminator.
    if let Some((&c, rest)) = remaining.split_first() {
        if c.is(b']') {
            class.insert(c.code());
            remaining = rest;
        }
    }
    loop {
        match remaining {
            [] => return Err(nom::Err::Failure(Error::new(input, ErrorKind::TakeUntil))),
            [close, rest @ ..] if close.is(b']') => return Ok((rest, class)),
            [from, dash, to, rest @ ..] if dash.is(b'-') && !to.is(b']') => {
                class.insert_range(from.code(), to.code());
                remaining = rest;
            }
            [member, rest @ ..] => {
                class.insert(member.code());
                remaining = rest;
            }
        }
    }
}
