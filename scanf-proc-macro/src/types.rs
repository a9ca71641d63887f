//! Core types for the scanf macro implementation.

/// A conversion of the format that takes destination arguments.
///
/// Only conversions that consume arguments are recorded: suppressed
/// conversions, `%%` and unknown conversion characters take none.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Placeholder {
    /// A number: `%d`, `%x`, `%f`, `%p`, ...
    Value,

    /// A character buffer: `%s`, `%c`, `%[...]`. Secure calls pair it with a
    /// capacity argument.
    Buffer,

    /// `%n`. Secure calls pair it with a capacity argument too.
    Count,
}

impl Placeholder {
    /// Number of macro arguments this placeholder consumes.
    pub fn arity(self, secure: bool) -> usize {
        match self {
            Self::Value => 1,
            Self::Buffer | Self::Count => {
                if secure {
                    2
                } else {
                    1
                }
            }
        }
    }
}

/// Character width of the generated call.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Flavor {
    /// `u8` input and format
    Narrow,
    /// `u16` input and format
    Wide,
}
