//! `#[derive(ContentType)]` implementation

use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::ext::IdentExt;
use syn::punctuated::Punctuated;
use syn::{Data, DeriveInput, Field, Fields, Ident, LitStr, Path, Result, Token, Type};

use crate::crate_paths::get_tinyblog_content_crate;

/// Struct-level `#[content(...)]` options
#[derive(Default)]
struct ContentOptions {
	capabilities: Vec<LitStr>,
	is_abstract: bool,
}

/// Field-level `#[content(...)]` options
#[derive(Default)]
struct FieldOptions {
	parent: bool,
	skip: bool,
	rename: Option<LitStr>,
}

/// A field that becomes a content property
struct PropertyField {
	ident: Ident,
	name: String,
	ty: Type,
	markers: Vec<Path>,
}

fn parse_content_options(input: &DeriveInput) -> Result<ContentOptions> {
	let mut options = ContentOptions::default();

	for attr in &input.attrs {
		if !attr.path().is_ident("content") {
			continue;
		}

		attr.parse_nested_meta(|meta| {
			if meta.path.is_ident("capability") {
				let value: LitStr = meta.value()?.parse()?;
				if value.value().is_empty() {
					return Err(meta.error("capability name must not be empty"));
				}
				options.capabilities.push(value);
				Ok(())
			} else if meta.path.is_ident("abstract_type") {
				options.is_abstract = true;
				Ok(())
			} else {
				Err(meta.error("unknown content attribute, expected `capability` or `abstract_type`"))
			}
		})?;
	}

	Ok(options)
}

fn parse_field_options(field: &Field) -> Result<FieldOptions> {
	let mut options = FieldOptions::default();

	for attr in &field.attrs {
		if !attr.path().is_ident("content") {
			continue;
		}

		attr.parse_nested_meta(|meta| {
			if meta.path.is_ident("parent") {
				options.parent = true;
				Ok(())
			} else if meta.path.is_ident("skip") {
				options.skip = true;
				Ok(())
			} else if meta.path.is_ident("rename") {
				let value: LitStr = meta.value()?.parse()?;
				if value.value().is_empty() {
					return Err(meta.error("property name must not be empty"));
				}
				options.rename = Some(value);
				Ok(())
			} else {
				Err(meta.error("unknown content attribute, expected `parent`, `skip` or `rename`"))
			}
		})?;
	}

	Ok(options)
}

fn parse_markers(field: &Field) -> Result<Vec<Path>> {
	let mut markers = Vec::new();

	for attr in &field.attrs {
		if !attr.path().is_ident("mark") {
			continue;
		}

		let paths = attr.parse_args_with(Punctuated::<Path, Token![,]>::parse_terminated)?;
		if paths.is_empty() {
			return Err(syn::Error::new_spanned(
				attr,
				"#[mark(..)] requires at least one marker type",
			));
		}
		markers.extend(paths);
	}

	Ok(markers)
}

/// Implementation of the `ContentType` derive macro
pub(crate) fn derive_content_type_impl(input: DeriveInput) -> Result<TokenStream> {
	let ident = &input.ident;
	let krate = get_tinyblog_content_crate();

	if !input.generics.params.is_empty() {
		return Err(syn::Error::new_spanned(
			&input.generics,
			"#[derive(ContentType)] does not support generic types",
		));
	}

	let fields = match &input.data {
		Data::Struct(data) => match &data.fields {
			Fields::Named(named) => named.named.iter().collect::<Vec<_>>(),
			Fields::Unit => Vec::new(),
			Fields::Unnamed(_) => {
				return Err(syn::Error::new_spanned(
					ident,
					"#[derive(ContentType)] requires named fields",
				));
			}
		},
		_ => {
			return Err(syn::Error::new_spanned(
				ident,
				"#[derive(ContentType)] can only be applied to structs",
			));
		}
	};

	let options = parse_content_options(&input)?;

	let mut parent: Option<(&Ident, &Type)> = None;
	let mut properties = Vec::new();

	for field in fields {
		let field_options = parse_field_options(field)?;
		let markers = parse_markers(field)?;
		let Some(field_ident) = field.ident.as_ref() else {
			continue;
		};

		if field_options.parent {
			if parent.is_some() {
				return Err(syn::Error::new_spanned(
					field,
					"a content type can only have one #[content(parent)] field",
				));
			}
			if field_options.skip || field_options.rename.is_some() || !markers.is_empty() {
				return Err(syn::Error::new_spanned(
					field,
					"#[content(parent)] cannot be combined with `skip`, `rename` or markers",
				));
			}
			parent = Some((field_ident, &field.ty));
			continue;
		}

		if field_options.skip {
			if !markers.is_empty() {
				return Err(syn::Error::new_spanned(
					field,
					"a skipped field cannot carry markers",
				));
			}
			continue;
		}

		let name = field_options
			.rename
			.map(|rename| rename.value())
			.unwrap_or_else(|| field_ident.unraw().to_string());

		if properties.iter().any(|p: &PropertyField| p.name == name) {
			return Err(syn::Error::new_spanned(
				field,
				format!("duplicate content property '{}'", name),
			));
		}

		properties.push(PropertyField {
			ident: field_ident.clone(),
			name,
			ty: field.ty.clone(),
			markers,
		});
	}

	let mut support_items = Vec::new();
	let mut property_entries = Vec::new();

	for property in &properties {
		let field_ident = &property.ident;
		let name = &property.name;
		let ty = &property.ty;
		let reader = format_ident!("__read_{}", field_ident.unraw());
		let markers_static = format_ident!("__MARKERS_{}", field_ident.unraw());
		let marker_count = property.markers.len();
		let marker_kinds = property.markers.iter().map(|marker| {
			quote! { <#marker as #krate::Marker>::KIND }
		});

		support_items.push(quote! {
			#[allow(non_snake_case)]
			fn #reader(instance: &dyn ::std::any::Any) -> ::std::option::Option<&dyn ::std::any::Any> {
				instance
					.downcast_ref::<#ident>()
					.map(|this| &this.#field_ident as &dyn ::std::any::Any)
			}

			#[allow(non_upper_case_globals)]
			static #markers_static: [#krate::MarkerKind; #marker_count] = [#(#marker_kinds),*];
		});

		property_entries.push(quote! {
			#krate::PropertyDescriptor::new(
				#name,
				#krate::ValueType::of::<#ty>(),
				&#markers_static,
				#reader,
			)
		});
	}

	let parent_link = match parent {
		Some((field_ident, ty)) => {
			support_items.push(quote! {
				fn __project_parent(instance: &dyn ::std::any::Any) -> ::std::option::Option<&dyn ::std::any::Any> {
					instance
						.downcast_ref::<#ident>()
						.map(|this| &this.#field_ident as &dyn ::std::any::Any)
				}
			});
			quote! {
				::std::option::Option::Some(#krate::ParentLink::new(
					<#ty as #krate::ContentData>::descriptor,
					__project_parent,
				))
			}
		}
		None => quote! { ::std::option::Option::None },
	};

	let capability_count = options.capabilities.len() + 1;
	let capabilities = options.capabilities.iter().map(|capability| {
		quote! { #krate::Capability::new(#capability) }
	});
	let property_count = property_entries.len();
	let is_abstract = options.is_abstract;
	let registration = format_ident!("__TINYBLOG_CONTENT_TYPE_{}", ident.unraw());

	Ok(quote! {
		impl #krate::ContentData for #ident {
			fn descriptor() -> &'static #krate::ContentTypeDescriptor {
				#(#support_items)*

				static CAPABILITIES: [#krate::Capability; #capability_count] = [
					#krate::Capability::CONTENT_DATA,
					#(#capabilities),*
				];

				static PROPERTIES: [#krate::PropertyDescriptor; #property_count] = [
					#(#property_entries),*
				];

				static DESCRIPTOR: #krate::ContentTypeDescriptor =
					#krate::ContentTypeDescriptor::new(
						::std::concat!(::std::module_path!(), "::", ::std::stringify!(#ident)),
						::std::any::TypeId::of::<#ident>,
						#parent_link,
						&CAPABILITIES,
						#is_abstract,
						&PROPERTIES,
					);

				&DESCRIPTOR
			}
		}

		#[cfg(not(target_arch = "wasm32"))]
		#[#krate::linkme::distributed_slice(#krate::CONTENT_TYPES)]
		#[linkme(crate = #krate::linkme)]
		#[allow(non_upper_case_globals)]
		static #registration: fn() -> &'static #krate::ContentTypeDescriptor =
			<#ident as #krate::ContentData>::descriptor;
	})
}
