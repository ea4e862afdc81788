#![allow(unreachable_pub)]
#![allow(clippy::needless_pass_by_value)]

//! # Macros
//!
//! Procedural macros shared by the relay crates: error enums, feature slices,
//! API models/handlers and the runtime entry point.
//!
//! Examples are `ignore`d because the expansions reference downstream crates
//! (`folio_kernel`, `folio_runtime`, `utoipa`) that this crate cannot depend on.

mod macros;

use proc_macro::TokenStream;
use syn::{DeriveInput, ItemFn, ItemStruct, parse_macro_input};

/// Turns an `async fn main` into a blocking `fn main` running on a
/// pre-configured Tokio runtime.
///
/// Accepted profiles: `high_performance`, `memory_efficient`, `default`
/// (or no argument).
///
/// ```rust,ignore
/// #[folio_runtime::main(memory_efficient)]
/// async fn main() -> anyhow::Result<()> {
///     Ok(())
/// }
/// ```
#[proc_macro_attribute]
pub fn main(args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as ItemFn);
    macros::runtime::expand_main(args.into(), input).into()
}

/// Declares a wire model (request or response body).
///
/// Adds `Debug`, `Serialize` and `Deserialize` when missing, and
/// `utoipa::ToSchema` under the `server` feature. Fields are renamed with
/// `rename_all = "camelCase"` unless `rename_all = "..."` is passed.
/// Unknown fields are rejected unless `deny_unknown_fields = false`.
///
/// ```rust,ignore
/// #[api_model(deny_unknown_fields = false)]
/// pub struct ContactForm {
///     pub name: Option<String>,
/// }
/// ```
#[proc_macro_attribute]
pub fn api_model(attr: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as ItemStruct);
    macros::api::expand_api_model(attr.into(), input).into()
}

/// Registers an Axum handler with `utoipa::path` (under the `server` feature).
///
/// ```rust,ignore
/// #[api_handler(post, path = "/contact", responses((status = OK, body = RelayResponse)))]
/// pub async fn submit(/* extractors */) -> impl IntoResponse { /* ... */ }
/// ```
#[proc_macro_attribute]
pub fn api_handler(args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as ItemFn);
    macros::api::expand_api_handler(args.into(), input).into()
}

/// Declares a crate error enum.
///
/// * derives `Debug` and `thiserror::Error` when missing;
/// * generates a `<Name>Ext` trait with `.context(...)` for `Result<T, Name>`
///   and for `Result<T, Source>` of every variant carrying a `source` field;
/// * implements `From<Source>` for those variants;
/// * implements `From<&'static str>` and `From<String>` when an `Internal`
///   variant exists;
/// * emits a private `format_context` helper for the `#[error(...)]` strings.
///
/// Variants must use named fields. A variant with a `source` must also carry
/// `context: Option<Cow<'static, str>>`.
///
/// ```rust,ignore
/// #[folio_error]
/// pub enum MailError {
///     #[error("SMTP error{}: {source}", format_context(.context))]
///     Smtp { source: lettre::transport::smtp::Error, context: Option<Cow<'static, str>> },
///
///     #[error("Internal mail error{}: {message}", format_context(.context))]
///     Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
/// }
/// ```
#[proc_macro_attribute]
pub fn folio_error(_args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    macros::error::expand_derive(input).into()
}

/// Turns a struct into a shareable feature slice.
///
/// The fields move into a generated `<Name>Inner`; `<Name>` becomes a cheap
/// `Arc` handle that derefs to it and implements
/// `folio_kernel::domain::registry::FeatureSlice`.
///
/// ```rust,ignore
/// #[folio_derive::folio_slice]
/// pub struct Contact {
///     mailer: Arc<dyn Mailer>,
/// }
///
/// let slice = Contact::new(ContactInner { mailer });
/// ```
#[proc_macro_attribute]
pub fn folio_slice(_attr: TokenStream, item: TokenStream) -> TokenStream {
    let input = syn::parse_macro_input!(item as ItemStruct);
    macros::slice::expand_slice(input).into()
}
