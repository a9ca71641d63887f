//! The scanf family of a C runtime, driven by one generic interpreter.
//!
//! Every variant (`sscanf`, `_snscanf`, `fscanf`, `scanf`, `_cscanf`, their
//! wide `w` forms, their `_l` locale forms and their `_s` secure forms) is a
//! thin shim in [`family`] over [`Scanner::scan`], which is generic over:
//!
//! - the code unit, [`ScanChar`]: `u8` (narrow) or `u16` (wide)
//! - where characters come from, [`CharSource`]
//! - how buffer capacities are established, [`DestinationPolicy`]
//!
//! # Architecture
//!
//! 1. **Format parsing** (`format`): the format is read lazily, one
//!    [`Directive`] at a time, with `nom`
//! 2. **Interpretation** (`engine`): each directive consumes input through
//!    a one-character lookahead with push-back
//! 3. **Storing**: values go into typed [`Arg`] slots taken in order from an
//!    [`ArgCursor`], the Rust stand-in for C varargs
//!
//! # Return values
//!
//! Shims return what the C function returns: the number of assignments, or
//! [`EOF`] (`-1`) when the input ends before the first assignment or the
//! caller breaks the argument contract. [`Scanner::scan`] returns a
//! [`ScanReport`] with the reason the scan stopped.
//!
//! # Macros
//!
//! [`sscanf!`], [`sscanf_s!`], [`swscanf!`], [`swscanf_s!`], [`scanf!`] and
//! [`scanf_s!`] check the format literal at compile time and build the
//! argument list:
//!
//! ```
//! use crt_scanf::sscanf;
//!
//! let mut hours = 0i32;
//! let mut minutes = 0i32;
//! let assigned = sscanf!("09:45", "%d:%d", &mut hours, &mut minutes);
//! assert_eq!(assigned, 2);
//! assert_eq!((hours, minutes), (9, 45));
//! ```
//!
//! # Known Limitations
//!
//! - `nan`/`inf` and hexadecimal floating-point input are not recognized
//! - the UCRT legacy option bits are accepted and logged, not implemented
//! - `long` is 32 bits, as on Windows

#![deny(unsafe_code)]
#![allow(clippy::needless_return)]

extern crate self as crt_scanf;

// ============================================================================
// Module Organization
// ============================================================================

pub mod args;
pub mod chars;
pub mod config;
pub mod constants;
mod engine;
pub mod error;
pub mod family;
pub mod format;
pub mod locale;
pub mod observer;
pub mod policy;
pub mod source;

#[cfg(test)]
mod examples;

// ============================================================================
// Re-exports for Public API
// ============================================================================

pub use args::{Arg, ArgCursor};
pub use chars::{ScanChar, digit_value};
pub use config::{InvalidParameterHandler, ScanConfig, ScanOptions, default_invalid_parameter_handler};
pub use constants::EOF;
pub use engine::{ScanReport, Scanner};
pub use error::{ContractViolation, FormatError, ScanError};
pub use format::{CharClass, Conversion, ConversionKind, Directive, Directives, LengthModifier};
pub use locale::{CodePage, Locale, current_locale, set_thread_locale};
pub use observer::{NoopObserver, ScanEvent, ScanObserver, TracingObserver};
pub use policy::{Checked, DestinationPolicy, Unchecked};
pub use source::{
    CharSource, Console, ConsoleSource, Park, Pending, ReaderSource, SharedInput, StdConsole, StrSource, WideEncoding,
    WideReaderSource,
};

pub use crt_scanf_macros::{scanf, scanf_s, sscanf, sscanf_s, swscanf, swscanf_s};
