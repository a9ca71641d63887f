//! Format string scanning at compile-time.
//!
//! This is not the runtime parser: it only finds the conversions that take
//! destination arguments and rejects formats the runtime would stop on.

use crate::constants::{MAX_FORMAT_STRING_LEN, MAX_PLACEHOLDERS, PLACEHOLDERS_INITIAL_CAPACITY};
use crate::types::Placeholder;
use syn::LitStr;

/// Length prefixes a conversion may carry, longest first. At most one is
/// taken; anything after it is the conversion character.
const LENGTH_MODIFIERS: [&str; 12] = ["hh", "h", "ll", "l", "L", "I64", "I32", "I", "j", "z", "t", "w"];

type FormatChars<'f> = std::iter::Peekable<std::str::Chars<'f>>;

/// List the placeholders of `format_str`, in order.
///
/// Enforces `MAX_FORMAT_STRING_LEN` and `MAX_PLACEHOLDERS`.
pub fn tokenize_format_string(format_str: &str, format_lit: &LitStr) -> syn::Result<Vec<Placeholder>> {
    if format_str.len() > MAX_FORMAT_STRING_LEN {
        return Err(syn::Error::new(
            format_lit.span(),
            format!(
                "Format string too long ({} bytes). Maximum allowed: {} bytes.",
                format_str.len(),
                MAX_FORMAT_STRING_LEN
            ),
        ));
    }

    let mut placeholders = Vec::with_capacity(PLACEHOLDERS_INITIAL_CAPACITY);
    let mut chars = format_str.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == '\0' {
            // The runtime stops reading the format here.
            break;
        }
        if ch != '%' {
            continue;
        }

        let suppressed = chars.next_if_eq(&'*').is_some();
        while chars.next_if(char::is_ascii_digit).is_some() {}
        skip_length_modifier(&mut chars);

        let placeholder = match chars.next() {
            None => {
                return Err(syn::Error::new(
                    format_lit.span(),
                    "Format string ends inside a conversion. Use '%%' for a literal '%'.",
                ));
            }
            Some('[') => {
                skip_char_class(&mut chars, format_lit)?;
                Some(Placeholder::Buffer)
            }
            Some('s' | 'S' | 'c' | 'C') => Some(Placeholder::Buffer),
            Some('n') => Some(Placeholder::Count),
            Some('d' | 'i' | 'o' | 'u' | 'x' | 'X' | 'e' | 'E' | 'f' | 'F' | 'g' | 'G' | 'a' | 'A' | 'p') => {
                Some(Placeholder::Value)
            }
            // `%%` and unknown conversion characters match literally.
            Some(_) => None,
        };

        if let Some(placeholder) = placeholder.filter(|_| !suppressed) {
            if placeholders.len() >= MAX_PLACEHOLDERS {
                return Err(syn::Error::new(
                    format_lit.span(),
                    format!("Too many conversions in format string. Maximum allowed: {MAX_PLACEHOLDERS}."),
                ));
            }
            placeholders.push(placeholder);
        }
    }

    Ok(placeholders)
}

fn skip_length_modifier(chars: &mut FormatChars<'_>) {
    for modifier in LENGTH_MODIFIERS {
        let mut ahead = chars.clone();
        if modifier.chars().all(|m| ahead.next_if_eq(&m).is_some()) {
            *chars = ahead;
            return;
        }
    }
}

/// Skips the members of a `%[...]` class, up to and including the `]`.
fn skip_char_class(chars: &mut FormatChars<'_>, format_lit: &LitStr) -> syn::Result<()> {
    chars.next_if_eq(&'^');
    // A leading `]` is a member.
    chars.next_if_eq(&']');
    for c in chars.by_ref() {
        if c == ']' {
            return Ok(());
        }
    }
    Err(syn::Error::new(
        format_lit.span(),
        "Unterminated '%[' character class. Close it with ']'.",
    ))
}
