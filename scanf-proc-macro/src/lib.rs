//! Procedural macros for the `crt-scanf` crate.
//!
//! This crate provides:
//! - `sscanf!` / `sscanf_s!`: scan a narrow string
//! - `swscanf!` / `swscanf_s!`: scan a wide (UTF-16) string
//! - `scanf!` / `scanf_s!`: scan standard input
//!
//! # Architecture
//!
//! The expansion is divided into three phases:
//! 1. **Tokenization**: the format literal is scanned at compile-time for the
//!    conversions that take destination arguments
//! 2. **Code Generation**: every destination is wrapped in `Arg::from`, every
//!    secure capacity in `Arg::Capacity`, and the format is encoded as bytes
//!    or UTF-16 units
//! 3. **Expansion**: the macro expands to a call into `crt_scanf::family`
//!
//! The implementation is organized into focused modules:
//! - `constants`: Compile-time limits and memory allocation hints
//! - `types`: Core type definitions
//! - `parsing`: Macro argument parsing
//! - `tokenization`: Format string scanning
//! - `codegen`: Code generation
//!
//! # Compile-Time Checks
//!
//! - A `%` at the end of the format is rejected
//! - An unterminated `%[` class is rejected
//! - The number of arguments must match the format
//! - Format strings are limited to 10,000 bytes and 256 conversions

#![forbid(unsafe_code)]
#![allow(clippy::needless_return)]

// ============================================================================
// Module Organization
// ============================================================================

mod codegen;
mod constants;
mod parsing;
mod tokenization;
mod types;

use proc_macro::TokenStream;
use syn::parse_macro_input;

use codegen::{Target, generate_scanf_implementation, generate_sscanf_implementation};
use parsing::{ScanfArgs, SscanfArgs};
use types::Flavor;

fn expand_sscanf(args: SscanfArgs, target: Target) -> TokenStream {
    let explicit_args: Vec<_> = args.args.iter().collect();
    return generate_sscanf_implementation(&args.input, &args.format, &explicit_args, target)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into();
}

fn expand_scanf(args: ScanfArgs, target: Target) -> TokenStream {
    let explicit_args: Vec<_> = args.args.iter().collect();
    return generate_scanf_implementation(&args.format, &explicit_args, target)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into();
}

// ============================================================================
// Public Macros
// ============================================================================

/// Scans a string according to a C format string, like C's `sscanf`.
///
/// # Syntax
///
/// ```ignore
/// sscanf!(input_expr, "format string", destinations...)
/// ```
///
/// - `input_expr`: anything that is `AsRef<[u8]>` (`&str`, `String`, `&[u8]`, ...)
/// - `format string`: a C format literal
/// - `destinations...`: one `&mut` destination per assigning conversion
///
/// # Returns
///
/// The C return value as `i32`: the number of assignments, or `-1` if the
/// input ended before the first one.
///
/// # Examples
///
/// ```ignore
/// use crt_scanf::sscanf;
///
/// let mut id = 0u32;
/// let mut name = [0u8; 16];
/// let assigned = sscanf!("42: hello", "%u: %15s", &mut id, &mut name);
/// assert_eq!(assigned, 2);
/// assert_eq!(id, 42);
/// assert_eq!(&name[..6], b"hello\0");
/// ```
#[proc_macro]
pub fn sscanf(input: TokenStream) -> TokenStream {
    let args = parse_macro_input!(input as SscanfArgs);
    expand_sscanf(args, Target { flavor: Flavor::Narrow, secure: false })
}

/// `sscanf!` with capacity-checked buffers: every `%s`, `%c`, `%[` and `%n`
/// destination is followed by its capacity.
///
/// ```ignore
/// use crt_scanf::sscanf_s;
///
/// let mut word = [0u8; 4];
/// let assigned = sscanf_s!("abc", "%s", &mut word, 4);
/// assert_eq!(assigned, 1);
/// ```
#[proc_macro]
pub fn sscanf_s(input: TokenStream) -> TokenStream {
    let args = parse_macro_input!(input as SscanfArgs);
    expand_sscanf(args, Target { flavor: Flavor::Narrow, secure: true })
}

/// Scans a wide string: the input is `AsRef<[u16]>` and the format literal
/// is encoded as UTF-16.
#[proc_macro]
pub fn swscanf(input: TokenStream) -> TokenStream {
    let args = parse_macro_input!(input as SscanfArgs);
    expand_sscanf(args, Target { flavor: Flavor::Wide, secure: false })
}

/// `swscanf!` with capacity-checked buffers.
#[proc_macro]
pub fn swscanf_s(input: TokenStream) -> TokenStream {
    let args = parse_macro_input!(input as SscanfArgs);
    expand_sscanf(args, Target { flavor: Flavor::Wide, secure: true })
}

/// Scans standard input, like C's `scanf`.
///
/// ```ignore
/// use crt_scanf::scanf;
///
/// let mut age = 0i32;
/// print!("Enter your age: ");
/// scanf!("%d", &mut age);
/// ```
#[proc_macro]
pub fn scanf(input: TokenStream) -> TokenStream {
    let args = parse_macro_input!(input as ScanfArgs);
    expand_scanf(args, Target { flavor: Flavor::Narrow, secure: false })
}

/// `scanf!` with capacity-checked buffers.
#[proc_macro]
pub fn scanf_s(input: TokenStream) -> TokenStream {
    let args = parse_macro_input!(input as ScanfArgs);
    expand_scanf(args, Target { flavor: Flavor::Narrow, secure: true })
}
