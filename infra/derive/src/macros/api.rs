use super::derived_trait_names;
use proc_macro2::{Span, TokenStream};
use quote::quote;
use syn::parse::Parser;
use syn::punctuated::Punctuated;
use syn::{Attribute, Expr, ExprLit, ItemFn, ItemStruct, Lit, LitStr, MetaNameValue, Token};

#[derive(Default)]
struct ModelArgs {
    rename_all: Option<LitStr>,
    deny_unknown_fields: Option<bool>,
}

#[derive(Default)]
struct SerdeAttrs {
    rename_all: Option<LitStr>,
    deny_unknown_fields: bool,
}

pub fn expand_api_model(args: TokenStream, input: ItemStruct) -> TokenStream {
    match api_model_attrs(args, &input) {
        Ok(attrs) => quote! {
            #attrs
            #input
        },
        Err(err) => err.to_compile_error(),
    }
}

pub fn expand_api_handler(args: TokenStream, input: ItemFn) -> TokenStream {
    let ItemFn { attrs, vis, sig, block } = input;

    quote! {
        #(#attrs)*
        #[allow(clippy::unused_async)]
        #[cfg_attr(feature = "server", ::utoipa::path(#args))]
        #vis #sig #block
    }
}

fn api_model_attrs(args: TokenStream, input: &ItemStruct) -> syn::Result<TokenStream> {
    let args = parse_model_args(args)?;
    let serde = existing_serde_attrs(&input.attrs)?;
    let derives = derived_trait_names(&input.attrs)?;

    let mut missing = Vec::new();
    if !derives.contains("Debug") {
        missing.push(quote!(Debug));
    }
    if !derives.contains("Serialize") {
        missing.push(quote!(::serde::Serialize));
    }
    if !derives.contains("Deserialize") {
        missing.push(quote!(::serde::Deserialize));
    }
    let derive_attr = if missing.is_empty() { quote!() } else { quote!(#[derive(#(#missing),*)]) };

    let schema_attr = if derives.contains("ToSchema") {
        quote!()
    } else {
        quote!(#[cfg_attr(feature = "server", derive(::utoipa::ToSchema))])
    };

    let rename_all =
        args.rename_all.unwrap_or_else(|| LitStr::new("camelCase", Span::call_site()));
    let rename_attr = match &serde.rename_all {
        Some(existing) if existing.value() != rename_all.value() => {
            return Err(syn::Error::new_spanned(
                existing,
                "conflicting serde rename_all; align it with api_model(rename_all = \"...\")",
            ));
        },
        Some(_) => quote!(),
        None => quote!(#[serde(rename_all = #rename_all)]),
    };

    let deny = args.deny_unknown_fields.unwrap_or(true);
    let deny_attr = match (serde.deny_unknown_fields, deny) {
        (true, false) => {
            return Err(syn::Error::new_spanned(
                &input.ident,
                "deny_unknown_fields is already set through serde",
            ));
        },
        (false, true) => quote!(#[serde(deny_unknown_fields)]),
        _ => quote!(),
    };

    Ok(quote! {
        #derive_attr
        #schema_attr
        #rename_attr
        #deny_attr
    })
}

fn parse_model_args(args: TokenStream) -> syn::Result<ModelArgs> {
    let metas = Punctuated::<MetaNameValue, Token![,]>::parse_terminated.parse2(args)?;
    let mut parsed = ModelArgs::default();

    for meta in metas {
        let Expr::Lit(ExprLit { lit, .. }) = &meta.value else {
            return Err(syn::Error::new_spanned(&meta.value, "expected a literal value"));
        };

        match lit {
            Lit::Str(value) if meta.path.is_ident("rename_all") => {
                if parsed.rename_all.replace(value.clone()).is_some() {
                    return Err(syn::Error::new_spanned(&meta, "duplicate rename_all"));
                }
            },
            Lit::Bool(value) if meta.path.is_ident("deny_unknown_fields") => {
                if parsed.deny_unknown_fields.replace(value.value).is_some() {
                    return Err(syn::Error::new_spanned(&meta, "duplicate deny_unknown_fields"));
                }
            },
            _ => {
                return Err(syn::Error::new_spanned(
                    &meta,
                    "expected `rename_all = \"...\"` or `deny_unknown_fields = <bool>`",
                ));
            },
        }
    }

    Ok(parsed)
}

fn existing_serde_attrs(attrs: &[Attribute]) -> syn::Result<SerdeAttrs> {
    let mut found = SerdeAttrs::default();

    for attr in attrs.iter().filter(|attr| attr.path().is_ident("serde")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("rename_all") {
                found.rename_all = Some(meta.value()?.parse()?);
            } else if meta.path.is_ident("deny_unknown_fields") {
                found.deny_unknown_fields = true;
            } else if meta.input.peek(Token![=]) {
                // Other key-value options are left to serde.
                let _: Expr = meta.value()?.parse()?;
            }
            Ok(())
        })?;
    }

    Ok(found)
}
