//! # tinyblog
//!
//! Attribute-driven rich-text editor configuration for content types.
//!
//! Content types are plain structs deriving [`ContentType`]. Fields carrying
//! a marker (`#[mark(SimpleEditor)]`) opt into an editor settings override;
//! at startup the binder discovers every marked property across the linked
//! content types and registers the override settings for it.
//!
//! ## Crates
//!
//! - [`content`]: content type descriptors, markers, accessors and the linked type universe
//! - [`binder`]: discovery, property matching and the binding pass
//! - [`editor`]: editor settings and the per-property configuration registry
//!
//! ## Feature Flags
//!
//! - `editor` - Editor host and the [`initialization`] module
//! - `full` (default) - Everything
//!
//! ## Quick Example
//!
//! ```rust
//! use tinyblog::prelude::*;
//!
//! marker!(pub SimpleEditor);
//!
//! #[derive(ContentType)]
//! #[content(capability = "block-data")]
//! struct EditorialBlock {
//!     #[mark(SimpleEditor)]
//!     main_body: XhtmlString,
//! }
//!
//! let mut config = EditorConfiguration::new();
//! let mut simple = config.default_settings().clone();
//! simple.toolbar("bold italic").disable_menubar();
//!
//! let binder = Binder::new(StaticTypeUniverse::new().with::<EditorialBlock>());
//! let report = binder
//!     .bind_marker::<SimpleEditor, _, _>(&std::sync::Arc::new(simple), &mut config)
//!     .unwrap();
//!
//! assert!(report.is_clean());
//! let settings = config.settings_for::<EditorialBlock>("main_body").unwrap();
//! assert_eq!(settings.menubar_enabled(), Some(false));
//! ```

#![warn(missing_docs)]

pub use tinyblog_binder as binder;
pub use tinyblog_content as content;
#[cfg(feature = "editor")]
pub use tinyblog_editor as editor;

#[cfg(feature = "editor")]
pub mod initialization;

// Re-export inventory for `register_configurator!`
#[doc(hidden)]
pub use inventory;

pub use tinyblog_binder::{
	BaseCapability, BindError, Binder, BinderSettings, BindingReport, DiagnosticSink,
	RegistrationOutcome, RegistrationSink, Scanner,
};
pub use tinyblog_content::{
	Accessor, Capability, ContentData, ContentType, ContentTypeDescriptor, LinkedTypeUniverse,
	Marker, MarkerKind, StaticTypeUniverse, TypeUniverse, ValueType, marker,
};
#[cfg(feature = "editor")]
pub use tinyblog_editor::{EditorConfiguration, EditorError, EditorSettings, XhtmlString};

/// Commonly used items
pub mod prelude {
	pub use crate::{
		Accessor, BaseCapability, BindError, Binder, BinderSettings, BindingReport, Capability,
		ContentData, ContentType, Marker, MarkerKind, RegistrationSink, StaticTypeUniverse,
		marker,
	};

	#[cfg(feature = "editor")]
	pub use crate::initialization::{EditorConfigurator, EditorInitialization};
	#[cfg(feature = "editor")]
	pub use crate::{EditorConfiguration, EditorSettings, XhtmlString};
}
