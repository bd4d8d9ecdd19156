mod target;

use proc_macro::TokenStream;
use quote::quote;
use syn::parse_macro_input;
use target::ErrorKindTarget;

/// Derives the [`ErrorKind`] trait for the given struct.
///
/// The report produced for the error is customized with the `error` attribute:
/// ```ignore
/// use deriv_attrs::ErrorKind;
/// use deriv_error::ErrorKind;
///
/// #[derive(Debug, ErrorKind)]
/// #[error(message = "empty operand", label = "add an expression here")]
/// pub struct EmptyOperand;
/// ```
///
/// The following tags are available:
///
/// | Tag         | Description                                                                  |
/// | ----------- | ---------------------------------------------------------------------------- |
/// | `message`   | The message displayed at the top of the report.                              |
/// | `label`     | The text of the label that points at the span of the error.                  |
/// | `help`      | Optional help text, describing what the user can do to fix the input.        |
///
/// Each tag accepts an expression evaluating to something that implements [`ToString`]. For
/// structs with named fields, the fields are in scope (by reference) inside the expression. Tuple
/// structs are not supported.
#[proc_macro_derive(ErrorKind, attributes(error))]
pub fn error_kind(item: TokenStream) -> TokenStream {
    let target = parse_macro_input!(item as ErrorKindTarget);
    let name = &target.name;
    quote! {
        impl ErrorKind for #name {
            fn as_any(&self) -> &dyn std::any::Any {
                self
            }

            #target
        }
    }.into()
}
