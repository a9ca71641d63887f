//! Compile-time limits and capacity hints for the scanf macros.

// ============================================================================
// Security Limits (Compile-Time DoS Protection)
// ============================================================================

/// Maximum length of a format string in bytes.
pub const MAX_FORMAT_STRING_LEN: usize = 10_000;

/// Maximum number of conversions that take destinations.
///
/// Each one expands to at least one `Arg` in the generated array.
pub const MAX_PLACEHOLDERS: usize = 256;

// ============================================================================
// Memory Pre-Allocation Hints
// ============================================================================

/// Initial capacity hint for the placeholder vector.
///
/// Most format strings have 1-4 conversions.
pub const PLACEHOLDERS_INITIAL_CAPACITY: usize = 4;
