//! Crate path resolution using proc_macro_crate
//!
//! Generated code must name the content runtime both from crates that depend
//! on `tinyblog-content` directly and from crates that only depend on the
//! `tinyblog` facade.

use proc_macro_crate::FoundCrate;
use proc_macro2::{Span, TokenStream};
use quote::quote;
use syn::Ident;

/// Resolves the path to the tinyblog_content crate.
///
/// # Strategy
///
/// 1. `tinyblog-content` itself: `::tinyblog_content` (the crate declares
///    `extern crate self as tinyblog_content`, which also covers its own
///    integration tests and doctests)
/// 2. `tinyblog-content` is a dependency: use it under its (possibly renamed) name
/// 3. Only `tinyblog` is available: `::tinyblog::content`
/// 4. Fallback: `::tinyblog_content`
pub(crate) fn get_tinyblog_content_crate() -> TokenStream {
	use proc_macro_crate::crate_name;

	resolve_content_path(
		crate_name("tinyblog-content").ok(),
		crate_name("tinyblog").ok(),
	)
}

pub(crate) fn resolve_content_path(
	content: Option<FoundCrate>,
	facade: Option<FoundCrate>,
) -> TokenStream {
	match (content, facade) {
		(Some(FoundCrate::Itself), _) => quote!(::tinyblog_content),
		(Some(FoundCrate::Name(name)), _) => {
			let ident = Ident::new(&name, Span::call_site());
			quote!(::#ident)
		}
		// The facade's own tests and doctests see `tinyblog-content` as a
		// dependency, so `Itself` is only reached from a package named `tinyblog`
		// without it
		(None, Some(FoundCrate::Itself)) => quote!(crate::content),
		(None, Some(FoundCrate::Name(name))) => {
			let ident = Ident::new(&name, Span::call_site());
			quote!(::#ident::content)
		}
		(None, None) => quote!(::tinyblog_content),
	}
}
