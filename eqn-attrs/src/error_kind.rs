use proc_macro2::TokenStream as TokenStream2;
use quote::{quote, quote_spanned, ToTokens};
use syn::{
    parse::{Parse, ParseStream},
    Data,
    DeriveInput,
    Expr,
    Fields,
    Ident,
    Result,
    Token,
};

/// The arguments that can be passed to the `error` attribute.
#[derive(Debug, Default)]
pub struct ErrorArgs {
    pub message: Option<Expr>,
    pub labels: Option<Expr>,
    pub help: Option<Expr>,
}

impl Parse for ErrorArgs {
    fn parse(input: ParseStream) -> Result<Self> {
        let mut args = ErrorArgs::default();

        while !input.is_empty() {
            let ident: Ident = input.parse()?;
            input.parse::<Token![=]>()?;

            let slot = match ident.to_string().as_str() {
                "message" => &mut args.message,
                "labels" => &mut args.labels,
                "help" => &mut args.help,
                other => return Err(syn::Error::new_spanned(&ident, format!("unknown tag `{}`", other))),
            };
            *slot = Some(input.parse()?);

            if input.is_empty() {
                break;
            }
            input.parse::<Token![,]>()?;
        }

        Ok(args)
    }
}

/// The target struct to derive [`ErrorKind`] for.
#[derive(Debug)]
pub struct ErrorKindTarget {
    pub name: Ident,
    pub fields: Fields,
    pub error_args: ErrorArgs,
}

impl ErrorKindTarget {
    /// Extracts the target from the derive input. Only structs are supported.
    pub fn from_input(input: DeriveInput) -> Result<Self> {
        let DeriveInput { ident, attrs, data, .. } = input;
        let Data::Struct(data) = data else {
            return Err(syn::Error::new_spanned(&ident, "`ErrorKind` can only be derived for structs"));
        };

        let error_args = attrs.iter()
            .find(|attr| attr.path().is_ident("error"))
            .map(|attr| attr.parse_args::<ErrorArgs>())
            .transpose()?
            .ok_or_else(|| syn::Error::new_spanned(&ident, "missing `#[error(...)]` attribute"))?;
        if error_args.message.is_none() {
            return Err(syn::Error::new_spanned(&ident, "the `error` attribute needs a `message` tag"));
        }

        Ok(Self {
            name: ident,
            fields: data.fields,
            error_args,
        })
    }

    /// Creates a `let` statement that destructures `self` into its named fields, so that the
    /// tag expressions can refer to them directly.
    fn destructure(&self) -> TokenStream2 {
        match &self.fields {
            Fields::Named(fields) => {
                let names = fields.named.iter().map(|field| field.ident.as_ref());
                quote! {
                    #[allow(unused_variables)]
                    let Self { #(#names),* } = self;
                }
            },
            Fields::Unnamed(_) => quote_spanned! { self.name.span() =>
                compile_error!("`ErrorKind` cannot be derived for tuple structs");
            },
            Fields::Unit => quote! {},
        }
    }
}

impl ToTokens for ErrorKindTarget {
    fn to_tokens(&self, tokens: &mut TokenStream2) {
        let name = &self.name;
        let destructure = self.destructure();
        let message = &self.error_args.message;
        let labels = self.error_args.labels.as_ref()
            .map(|labels| quote! { #labels })
            .unwrap_or_else(|| quote! { Vec::<String>::new() });
        let help = self.error_args.help.as_ref()
            .map(|help| quote! { builder.set_help(#help); });

        tokens.extend(quote! {
            impl eqn_error::ErrorKind for #name {
                fn as_any(&self) -> &dyn std::any::Any {
                    self
                }

                fn message(&self) -> String {
                    #destructure
                    (#message).to_string()
                }

                fn build_report<'a>(
                    &self,
                    src_id: &'a str,
                    spans: &[std::ops::Range<usize>],
                ) -> ariadne::Report<(&'a str, std::ops::Range<usize>)> {
                    #destructure
                    let offset = spans.first().map_or(0, |span| span.start);
                    #[allow(unused_mut)]
                    let mut builder = ariadne::Report::build(ariadne::ReportKind::Error, src_id, offset)
                        .with_message(eqn_error::ErrorKind::message(self))
                        .with_labels(
                            spans.iter()
                                .zip(#labels)
                                .map(|(span, text)| {
                                    let text = text.to_string();
                                    let label = ariadne::Label::new((src_id, span.clone()))
                                        .with_color(eqn_error::EXPR);
                                    if text.is_empty() {
                                        label
                                    } else {
                                        label.with_message(text)
                                    }
                                })
                                .collect::<Vec<_>>()
                        );

                    #help
                    builder.finish()
                }
            }
        });
    }
}
