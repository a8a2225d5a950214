mod error_kind;

use error_kind::ErrorKindTarget;
use proc_macro::TokenStream;
use quote::ToTokens;
use syn::{parse_macro_input, DeriveInput};

/// Derives the `ErrorKind` trait from `eqn-error` for the given struct.
///
/// The information of the error is customized using the `error` attribute:
///
/// ```ignore
/// use eqn_attrs::ErrorKind;
///
/// #[derive(Debug, ErrorKind)]
/// #[error(
///     message = format!("unrecognized expression `{}`", text),
///     labels = ["this escape sequence is not known"],
///     help = "check the spelling of the command",
/// )]
/// pub struct UnrecognizedExpression {
///     pub text: String,
/// }
/// ```
///
/// The following tags are available:
///
/// | Tag       | Description                                                                   |
/// | --------- | ----------------------------------------------------------------------------- |
/// | `message` | Required. The message displayed at the top of the error.                      |
/// | `labels`  | An array of label texts, one for each span the error points at, in order.     |
/// | `help`    | Optional help text, describing what the user can do to fix the error.         |
///
/// Each tag accepts an expression. For structs with named fields, the expression is evaluated
/// with the fields of the struct in scope (as references). Tuple structs are not supported.
///
/// The generated code refers to the `ariadne` and `eqn_error` crates, so both must be
/// dependencies of the crate using the derive.
#[proc_macro_derive(ErrorKind, attributes(error))]
pub fn error_kind(item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    match ErrorKindTarget::from_input(input) {
        Ok(target) => target.into_token_stream().into(),
        Err(err) => err.to_compile_error().into(),
    }
}
