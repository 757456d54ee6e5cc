//! `#[operation]`: implements `cardboard_operations::Operation` for a command struct.
//!
//! ```ignore
//! #[operation(verb = "move", noun = "card", description = "Move a card to a column and position")]
//! #[derive(Debug, Deserialize, Serialize)]
//! pub struct MoveCard {
//!     pub id: CardId,
//!     pub column: ColumnId,
//!     pub index: Option<usize>,
//! }
//! ```
//!
//! `verb` and `noun` end up joined in the activity log ("move card"), so
//! both must be a single lowercase word.

use proc_macro::TokenStream;
use proc_macro2::Span;
use quote::quote;
use syn::{meta::ParseNestedMeta, parse_macro_input, Data, DeriveInput, LitStr};

#[proc_macro_attribute]
pub fn operation(attr: TokenStream, item: TokenStream) -> TokenStream {
    let mut args = OperationArgs::default();
    let parser = syn::meta::parser(|meta| args.parse(meta));
    parse_macro_input!(attr with parser);
    let input = parse_macro_input!(item as DeriveInput);

    match expand(args, input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

fn expand(args: OperationArgs, input: DeriveInput) -> syn::Result<proc_macro2::TokenStream> {
    if !matches!(input.data, Data::Struct(_)) {
        return Err(syn::Error::new_spanned(
            &input.ident,
            "#[operation] can only be applied to structs",
        ));
    }

    let verb = word(args.verb, "verb")?;
    let noun = word(args.noun, "noun")?;
    let description = args
        .description
        .ok_or_else(|| syn::Error::new(Span::call_site(), "missing `description = \"..\"`"))?;

    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    Ok(quote! {
        #input

        impl #impl_generics cardboard_operations::Operation for #name #ty_generics #where_clause {
            fn verb(&self) -> &'static str {
                #verb
            }

            fn noun(&self) -> &'static str {
                #noun
            }

            fn description(&self) -> &'static str {
                #description
            }
        }
    })
}

/// A required single lowercase word
fn word(value: Option<LitStr>, key: &str) -> syn::Result<LitStr> {
    let lit = value.ok_or_else(|| {
        syn::Error::new(Span::call_site(), format!("missing `{} = \"..\"`", key))
    })?;
    let text = lit.value();
    if text.is_empty() || !text.chars().all(|c| c.is_ascii_lowercase() || c == '_') {
        return Err(syn::Error::new_spanned(
            &lit,
            format!("`{}` must be a single lowercase word", key),
        ));
    }
    Ok(lit)
}

#[derive(Default)]
struct OperationArgs {
    verb: Option<LitStr>,
    noun: Option<LitStr>,
    description: Option<LitStr>,
}

impl OperationArgs {
    fn parse(&mut self, meta: ParseNestedMeta) -> syn::Result<()> {
        let slot = if meta.path.is_ident("verb") {
            &mut self.verb
        } else if meta.path.is_ident("noun") {
            &mut self.noun
        } else if meta.path.is_ident("description") {
            &mut self.description
        } else {
            return Err(meta.error("expected `verb`, `noun` or `description`"));
        };

        if slot.is_some() {
            return Err(meta.error("duplicate key"));
        }
        *slot = Some(meta.value()?.parse()?);
        Ok(())
    }
}
