//! Procedural macros for tinyblog content types
//!
//! This crate provides:
//! - `#[derive(ContentType)]` - Describe a struct as a content type and link it
//!   into the global type universe

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

mod content_type;
mod crate_paths;

/// Derive a runtime content type descriptor
///
/// # Example
///
/// ```ignore
/// use tinyblog_content::{ContentType, marker};
///
/// marker!(pub SimpleEditor);
///
/// #[derive(ContentType)]
/// #[content(capability = "page-data")]
/// struct ArticlePage {
///     #[content(parent)]
///     site: SitePageData,
///
///     #[mark(SimpleEditor)]
///     main_body: XhtmlString,
///
///     #[content(skip)]
///     cached_html: String,
/// }
/// ```
///
/// # Attributes
///
/// On the struct:
/// - `#[content(capability = "...")]` - Declare a capability (repeatable)
/// - `#[content(abstract_type)]` - Mark the type as an abstract base
///
/// On fields:
/// - `#[content(parent)]` - The composed parent content type
/// - `#[content(skip)]` - Not a content property
/// - `#[content(rename = "...")]` - Property name other than the field name
/// - `#[mark(A, B)]` - Attach markers (types implementing `Marker`)
#[proc_macro_derive(ContentType, attributes(content, mark))]
pub fn derive_content_type(input: TokenStream) -> TokenStream {
	let input = parse_macro_input!(input as DeriveInput);

	content_type::derive_content_type_impl(input)
		.unwrap_or_else(|e| e.to_compile_error())
		.into()
}
