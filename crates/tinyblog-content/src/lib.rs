//! # tinyblog Content
//!
//! Runtime content model for tinyblog: content type descriptors, property
//! markers, replayable property accessors, and the linked type universe.
//!
//! ## Overview
//!
//! Content types are plain structs deriving [`ContentType`]. The derive
//! implements [`ContentData`] and links a static [`ContentTypeDescriptor`]
//! into [`CONTENT_TYPES`], so every content type in the binary can be
//! enumerated at runtime without a central list.
//!
//! Inheritance is expressed by composition: a field marked
//! `#[content(parent)]` holds the parent content type, whose properties and
//! capabilities the child inherits.
//!
//! ## Quick Start
//!
//! ```rust
//! use tinyblog_content::{Accessor, Capability, ContentData, ContentType, marker};
//!
//! marker!(pub SimpleEditor);
//!
//! #[derive(ContentType, Default)]
//! #[content(capability = "page-data", abstract_type)]
//! pub struct SitePage {
//!     #[mark(SimpleEditor)]
//!     teaser: String,
//! }
//!
//! #[derive(ContentType, Default)]
//! pub struct StandardPage {
//!     #[content(parent)]
//!     site: SitePage,
//!     #[mark(SimpleEditor)]
//!     main_body: String,
//! }
//!
//! let page = StandardPage::descriptor();
//! assert!(page.has_capability(&Capability::PAGE_DATA));
//! assert_eq!(page.properties().len(), 2);
//!
//! let teaser = Accessor::for_type::<StandardPage>("teaser").unwrap();
//! assert!(teaser.is_inherited());
//! let instance = StandardPage::default();
//! assert_eq!(teaser.read_as::<String>(&instance), Some(&String::new()));
//! ```
//!
//! ## Modules
//!
//! - [`descriptor`]: [`ContentTypeDescriptor`], [`PropertyDescriptor`], [`ValueType`], [`Capability`]
//! - [`marker`]: [`MarkerKind`], [`Marker`] and the [`marker!`] macro
//! - [`accessor`]: [`Accessor`]
//! - [`registry`]: [`TypeUniverse`], [`LinkedTypeUniverse`], [`StaticTypeUniverse`]

#![warn(missing_docs)]

// Generated code refers to `::tinyblog_content`
extern crate self as tinyblog_content;

pub mod accessor;
pub mod descriptor;
pub mod error;
pub mod marker;
pub mod registry;

pub use accessor::Accessor;
pub use descriptor::{
	Ancestors, Capability, ContentData, ContentTypeDescriptor, ParentLink, ParentProjection,
	PropertyDescriptor, PropertyReader, PropertyRef, ValueType,
};
pub use error::{ContentError, ContentResult};
pub use marker::{Marker, MarkerKind};
#[cfg(not(target_arch = "wasm32"))]
pub use registry::CONTENT_TYPES;
pub use registry::{LinkedTypeUniverse, StaticTypeUniverse, TypeUniverse, find_content_type};

pub use tinyblog_content_macros::ContentType;

// Re-export linkme for macro usage
#[doc(hidden)]
pub use linkme;
