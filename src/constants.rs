//! Return sentinels, option bits and sizing hints shared by the scanner.
//!
//! This module centralizes the numeric contract of the C entry points so the
//! engine and the family shims agree on it.

// ============================================================================
// Return Values
// ============================================================================

/// Value returned when the input ends (or errors) before the first
/// assignment, and on contract violations.
pub const EOF: i32 = -1;

// ============================================================================
// UCRT Option Bits
// ============================================================================

/// Selects the capacity-checked ("secure") variant.
pub const SCANF_SECURECRT: u64 = 0x0001;

/// Legacy MSVC meaning of `%s`/`%c` in wide functions. Accepted, not
/// implemented: wide functions always use the legacy meaning.
pub const SCANF_LEGACY_WIDE_SPECIFIERS: u64 = 0x0002;

/// Legacy msvcrt handling of `nan`/`inf`. Accepted, not implemented.
pub const SCANF_LEGACY_MSVCRT_COMPATIBILITY: u64 = 0x0004;

/// Every option bit the dispatchers know about.
pub const SCANF_OPTIONS_MASK: u64 =
    SCANF_SECURECRT | SCANF_LEGACY_WIDE_SPECIFIERS | SCANF_LEGACY_MSVCRT_COMPATIBILITY;

// ============================================================================
// Memory Pre-Allocation Hints
// ============================================================================

/// Initial capacity of the buffer that isolates a floating-point span.
///
/// Most numbers in scanned text are short, so this avoids reallocations.
pub const FLOAT_SPAN_CAPACITY: usize = 32;

/// Initial capacity of a source push-back stack.
///
/// The deepest push-back the scanner performs is an exponent marker plus its
/// sign, or a sign plus a decimal point.
pub const PUSHBACK_CAPACITY: usize = 4;
