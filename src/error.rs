//! Error types for the scanf interpreter.
//!
//! A scan never fails as a whole: every halt reason is recorded in the
//! [`ScanReport`](crate::ScanReport) and folded into the C return value. These
//! types describe *why* the interpreter stopped.

use thiserror::Error;

/// Result type alias used inside the interpreter.
pub type Result<T> = std::result::Result<T, ScanError>;

/// Reason a scan stopped before the end of the format string.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ScanError {
    /// The next input character does not satisfy the current directive.
    #[error("input does not match the format at input offset {offset}")]
    Mismatch {
        /// Characters consumed when the mismatch was detected
        offset: usize,
    },

    /// The character source has no more data (or reported an I/O error).
    #[error("input exhausted at input offset {offset}")]
    InputExhausted {
        /// Characters consumed when the input ended
        offset: usize,
    },

    /// The input does not fit a plain (unchecked) destination slice. The
    /// slice is left holding an empty string.
    #[error("conversion #{index} stopped at the end of its {capacity}-element destination")]
    DestinationFull {
        /// 1-based index of the conversion in the format
        index: usize,
        /// Length of the destination slice
        capacity: usize,
    },

    /// The format string contains a malformed directive.
    #[error(transparent)]
    InvalidFormat(#[from] FormatError),

    /// The caller broke the argument contract of the call.
    #[error(transparent)]
    Contract(#[from] ContractViolation),
}

impl ScanError {
    /// Creates a new mismatch error
    pub fn mismatch(offset: usize) -> Self {
        Self::Mismatch { offset }
    }

    /// Creates a new input exhaustion error
    pub fn exhausted(offset: usize) -> Self {
        Self::InputExhausted { offset }
    }

    /// Returns true if the scan ended because the input ran out.
    pub fn is_exhaustion(&self) -> bool {
        matches!(self, Self::InputExhausted { .. })
    }

    /// Returns the contract violation, if this is one.
    pub fn as_violation(&self) -> Option<&ContractViolation> {
        match self {
            Self::Contract(violation) => Some(violation),
            _ => None,
        }
    }
}

/// A malformed directive in the format string.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum FormatError {
    /// `%` is the last character of the format string.
    #[error("format ends inside a conversion at format offset {offset}")]
    TruncatedConversion {
        /// Offset of the `%` in format characters
        offset: usize,
    },

    /// `%[` without its closing `]`.
    #[error("unterminated character class at format offset {offset}")]
    UnterminatedClass {
        /// Offset of the `%` in format characters
        offset: usize,
    },
}

/// A programming error on the caller's side, routed through the
/// invalid-parameter handler.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ContractViolation {
    /// The argument cursor ran out before a conversion that stores.
    #[error("conversion #{index} has no destination argument")]
    MissingArgument {
        /// 1-based index of the conversion in the format
        index: usize,
    },

    /// The destination slot does not fit the conversion.
    #[error("conversion #{index} stores {expected}, but the destination is {found}")]
    ArgumentType {
        /// 1-based index of the conversion in the format
        index: usize,
        /// What the conversion stores
        expected: &'static str,
        /// What the caller supplied
        found: &'static str,
    },

    /// A secure conversion is not followed by a capacity argument.
    #[error("conversion #{index} is missing its buffer capacity argument")]
    MissingCapacity {
        /// 1-based index of the conversion in the format
        index: usize,
    },

    /// A secure conversion declared a capacity of zero.
    #[error("conversion #{index} declared a buffer capacity of zero")]
    ZeroCapacity {
        /// 1-based index of the conversion in the format
        index: usize,
    },

    /// The input does not fit the destination buffer.
    #[error("conversion #{index} does not fit its buffer of {capacity} element(s)")]
    BufferTooSmall {
        /// 1-based index of the conversion in the format
        index: usize,
        /// Effective capacity of the destination
        capacity: usize,
    },
}

impl ContractViolation {
    /// Returns true if the scan still reports the count of prior assignments
    /// (instead of EOF) after this violation.
    pub fn keeps_count(&self) -> bool {
        matches!(self, Self::BufferTooSmall { .. })
    }
}
