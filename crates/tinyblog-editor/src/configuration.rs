//! The editor configuration registry
//!
//! [`EditorConfiguration`] holds the default editor settings and per-property
//! overrides. Overrides are added by hand with
//! [`for_property`](EditorConfiguration::for_property) or registered by the
//! binder through the [`RegistrationSink`] implementation, which accepts
//! shared settings for [`XhtmlString`] properties only.
//!
//! # Examples
//!
//! ```rust
//! use tinyblog_content::ContentType;
//! use tinyblog_editor::{EditorConfiguration, XhtmlString};
//!
//! #[derive(ContentType)]
//! struct ArticlePage {
//!     main_body: XhtmlString,
//! }
//!
//! let mut config = EditorConfiguration::new();
//! config.default_settings_mut().unwrap().content_css("/static/css/editor.css");
//! config
//!     .for_property::<ArticlePage>("main_body")
//!     .unwrap()
//!     .block_formats("Paragraph=p;Header 1=h1");
//!
//! let main_body = config.settings_for::<ArticlePage>("main_body").unwrap();
//! assert_eq!(main_body.content_css_files(), ["/static/css/editor.css"]);
//! assert_eq!(main_body.block_format_entries().len(), 2);
//! ```

use crate::error::{EditorError, EditorResult};
use crate::settings::EditorSettings;
use crate::xhtml::XhtmlString;
use indexmap::IndexMap;
use indexmap::map::Entry;
use std::any::TypeId;
use std::fmt;
use std::sync::Arc;
use tinyblog_binder::RegistrationSink;
use tinyblog_content::{Accessor, ContentData, ValueType};
use tracing::debug;

/// Identity of a per-property override
///
/// Keyed by the content type instances are read from, so an inherited
/// property can be configured differently on each derived type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PropertyKey {
	type_id: TypeId,
	content_type: &'static str,
	property: &'static str,
}

impl PropertyKey {
	/// Key of the property read by `accessor`
	pub fn of(accessor: &Accessor) -> Self {
		Self {
			type_id: accessor.content_type().type_id(),
			content_type: accessor.content_type().qualified_name(),
			property: accessor.property_name(),
		}
	}

	/// The content type's [`TypeId`]
	pub fn type_id(&self) -> TypeId {
		self.type_id
	}

	/// Qualified name of the content type
	pub fn content_type(&self) -> &'static str {
		self.content_type
	}

	/// Property name
	pub fn property(&self) -> &'static str {
		self.property
	}
}

impl fmt::Display for PropertyKey {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}.{}", self.content_type, self.property)
	}
}

/// Default editor settings plus per-property overrides
#[derive(Debug, Clone, Default)]
pub struct EditorConfiguration {
	default: EditorSettings,
	overrides: IndexMap<PropertyKey, Arc<EditorSettings>>,
	frozen: bool,
}

impl EditorConfiguration {
	/// Empty configuration
	pub fn new() -> Self {
		Self::default()
	}

	/// Configuration starting from `default`
	pub fn with_default(default: EditorSettings) -> Self {
		Self {
			default,
			..Self::default()
		}
	}

	/// Settings used by properties without an override
	pub fn default_settings(&self) -> &EditorSettings {
		&self.default
	}

	/// Mutable default settings
	///
	/// # Errors
	///
	/// Returns [`EditorError::Frozen`] after [`freeze`](Self::freeze).
	pub fn default_settings_mut(&mut self) -> EditorResult<&mut EditorSettings> {
		if self.frozen {
			return Err(EditorError::Frozen("default settings".to_string()));
		}
		Ok(&mut self.default)
	}

	/// Settings with nothing set, as a base for
	/// [`for_property_with`](Self::for_property_with)
	pub fn empty(&self) -> EditorSettings {
		EditorSettings::default()
	}

	/// Override for property `name` of `T`, starting from the default
	/// settings
	///
	/// An existing override is returned as is for further changes.
	///
	/// # Errors
	///
	/// Returns [`EditorError::Content`] for an unknown property,
	/// [`EditorError::NotRichText`] for a property that is not an
	/// [`XhtmlString`] and [`EditorError::Frozen`] after
	/// [`freeze`](Self::freeze).
	pub fn for_property<T: ContentData>(&mut self, name: &str) -> EditorResult<&mut EditorSettings> {
		let accessor = self.editable::<T>(name)?;
		let default = &self.default;
		let settings = self
			.overrides
			.entry(PropertyKey::of(&accessor))
			.or_insert_with(|| Arc::new(default.clone()));
		Ok(Arc::make_mut(settings))
	}

	/// Override for property `name` of `T`, replacing any existing one with
	/// a copy of `base`
	///
	/// # Errors
	///
	/// Same as [`for_property`](Self::for_property).
	pub fn for_property_with<T: ContentData>(
		&mut self,
		name: &str,
		base: EditorSettings,
	) -> EditorResult<&mut EditorSettings> {
		let accessor = self.editable::<T>(name)?;
		let settings = match self.overrides.entry(PropertyKey::of(&accessor)) {
			Entry::Occupied(mut entry) => {
				entry.insert(Arc::new(base));
				entry.into_mut()
			}
			Entry::Vacant(entry) => entry.insert(Arc::new(base)),
		};
		Ok(Arc::make_mut(settings))
	}

	/// Effective settings for property `name` of `T`
	///
	/// # Errors
	///
	/// Returns [`EditorError::Content`] for an unknown property.
	pub fn settings_for<T: ContentData>(&self, name: &str) -> EditorResult<&EditorSettings> {
		let accessor = Accessor::for_type::<T>(name)?;
		Ok(self.resolve(&accessor))
	}

	/// Effective settings for the property read by `accessor`
	pub fn resolve(&self, accessor: &Accessor) -> &EditorSettings {
		self.override_for(accessor)
			.map(Arc::as_ref)
			.unwrap_or(&self.default)
	}

	/// The override registered for `accessor`, if any
	pub fn override_for(&self, accessor: &Accessor) -> Option<&Arc<EditorSettings>> {
		self.overrides.get(&PropertyKey::of(accessor))
	}

	/// Whether property `name` of `T` has an override
	pub fn has_override<T: ContentData>(&self, name: &str) -> bool {
		Accessor::for_type::<T>(name)
			.map(|accessor| self.override_for(&accessor).is_some())
			.unwrap_or(false)
	}

	/// Overrides in registration order
	pub fn overrides(&self) -> impl Iterator<Item = (&PropertyKey, &Arc<EditorSettings>)> {
		self.overrides.iter()
	}

	/// Number of overrides
	pub fn override_count(&self) -> usize {
		self.overrides.len()
	}

	/// Stop accepting changes
	pub fn freeze(&mut self) {
		self.frozen = true;
	}

	/// Whether [`freeze`](Self::freeze) was called
	pub fn is_frozen(&self) -> bool {
		self.frozen
	}

	fn editable<T: ContentData>(&self, name: &str) -> EditorResult<Accessor> {
		let accessor = Accessor::for_type::<T>(name)?;
		self.check_editable(&accessor)?;
		Ok(accessor)
	}

	fn check_editable(&self, accessor: &Accessor) -> EditorResult<()> {
		if self.frozen {
			return Err(EditorError::Frozen(PropertyKey::of(accessor).to_string()));
		}
		if !accessor.value_type().is::<XhtmlString>() {
			return Err(EditorError::NotRichText {
				content_type: accessor.content_type().qualified_name().to_string(),
				property: accessor.property_name().to_string(),
				actual: accessor.value_type().name().to_string(),
			});
		}
		Ok(())
	}
}

impl RegistrationSink<Arc<EditorSettings>> for EditorConfiguration {
	type Error = EditorError;

	fn expected_value_type(&self) -> Option<ValueType> {
		Some(ValueType::of::<XhtmlString>())
	}

	fn register(&mut self, accessor: Accessor, value: &Arc<EditorSettings>) -> EditorResult<()> {
		self.check_editable(&accessor)?;
		let key = PropertyKey::of(&accessor);
		debug!(
			content_type = key.content_type(),
			property = key.property(),
			"editor settings override registered"
		);
		self.overrides.insert(key, Arc::clone(value));
		Ok(())
	}
}
