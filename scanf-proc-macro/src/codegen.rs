//! Code generation for the scanf macros.

use crate::tokenization::tokenize_format_string;
use crate::types::Flavor;
use proc_macro2::TokenStream;
use quote::quote;
use syn::{Expr, LitByteStr, LitStr};

/// Which runtime function a macro expands to.
#[derive(Debug, Clone, Copy)]
pub struct Target {
    pub flavor: Flavor,
    pub secure: bool,
}

impl Target {
    fn function(self) -> TokenStream {
        match (self.flavor, self.secure) {
            (Flavor::Narrow, false) => quote!(::crt_scanf::family::sscanf),
            (Flavor::Narrow, true) => quote!(::crt_scanf::family::sscanf_s),
            (Flavor::Wide, false) => quote!(::crt_scanf::family::swscanf),
            (Flavor::Wide, true) => quote!(::crt_scanf::family::swscanf_s),
        }
    }

    fn stdin_function(self) -> TokenStream {
        match (self.flavor, self.secure) {
            (Flavor::Narrow, false) => quote!(::crt_scanf::family::scanf),
            (Flavor::Narrow, true) => quote!(::crt_scanf::family::scanf_s),
            (Flavor::Wide, false) => quote!(::crt_scanf::family::wscanf),
            (Flavor::Wide, true) => quote!(::crt_scanf::family::wscanf_s),
        }
    }
}

/// The format literal as a `&[u8]` or `&[u16]` expression.
fn encode_format(format_lit: &LitStr, flavor: Flavor) -> TokenStream {
    let format_str = format_lit.value();
    match flavor {
        Flavor::Narrow => {
            let bytes = LitByteStr::new(format_str.as_bytes(), format_lit.span());
            quote!(&#bytes[..])
        }
        Flavor::Wide => {
            let units = format_str.encode_utf16();
            quote!(&[#(#units),*][..])
        }
    }
}

/// Wraps each destination in `Arg::from` and each capacity in
/// `Arg::Capacity`, checking the argument count against the format.
pub fn generate_argument_list(
    format_lit: &LitStr,
    explicit_args: &[&Expr],
    secure: bool,
) -> syn::Result<Vec<TokenStream>> {
    let placeholders = tokenize_format_string(&format_lit.value(), format_lit)?;
    let expected: usize = placeholders.iter().map(|p| p.arity(secure)).sum();
    if expected != explicit_args.len() {
        return Err(make_argument_count_error(expected, explicit_args.len(), secure, format_lit));
    }

    let mut remaining = explicit_args.iter();
    let mut generated = Vec::with_capacity(expected);
    for placeholder in placeholders {
        if let Some(destination) = remaining.next() {
            generated.push(quote!(::crt_scanf::Arg::from(#destination)));
        }
        if placeholder.arity(secure) == 2 {
            if let Some(capacity) = remaining.next() {
                generated.push(quote!(::crt_scanf::Arg::Capacity(#capacity)));
            }
        }
    }
    Ok(generated)
}

fn make_argument_count_error(expected: usize, found: usize, secure: bool, format_lit: &LitStr) -> syn::Error {
    let hint = if secure {
        " Secure macros take a capacity after every '%s', '%c', '%[' and '%n' destination."
    } else {
        ""
    };
    syn::Error::new(
        format_lit.span(),
        format!("Format string expects {expected} argument(s), but {found} were given.{hint}"),
    )
}

/// Expansion of `sscanf!`, `sscanf_s!`, `swscanf!` and `swscanf_s!`.
pub fn generate_sscanf_implementation(
    input_expr: &Expr,
    format_lit: &LitStr,
    explicit_args: &[&Expr],
    target: Target,
) -> syn::Result<TokenStream> {
    let arguments = generate_argument_list(format_lit, explicit_args, target.secure)?;
    let count = arguments.len();
    let format = encode_format(format_lit, target.flavor);
    let function = target.function();
    let unit = match target.flavor {
        Flavor::Narrow => quote!(u8),
        Flavor::Wide => quote!(u16),
    };

    // The block keeps `arguments` out of the caller's scope.
    Ok(quote! {{
        let arguments: [::crt_scanf::Arg<'_>; #count] = [#(#arguments),*];
        #function(::core::convert::AsRef::<[#unit]>::as_ref(&(#input_expr)), #format, arguments)
    }})
}

/// Expansion of `scanf!` and `scanf_s!`.
pub fn generate_scanf_implementation(
    format_lit: &LitStr,
    explicit_args: &[&Expr],
    target: Target,
) -> syn::Result<TokenStream> {
    let arguments = generate_argument_list(format_lit, explicit_args, target.secure)?;
    let count = arguments.len();
    let format = encode_format(format_lit, target.flavor);
    let function = target.stdin_function();

    Ok(quote! {{
        let arguments: [::crt_scanf::Arg<'_>; #count] = [#(#arguments),*];
        #function(#format, arguments)
    }})
}
