//! Property accessors
//!
//! An [`Accessor`] describes "read property `P` off an instance of content
//! type `T`". It is plain metadata: building one never touches an instance,
//! and the same accessor can be replayed against any number of instances.
//!
//! For inherited properties the accessor walks the parent projections from
//! `T` down to the type that declares `P`.

use crate::descriptor::{ContentData, ContentTypeDescriptor, PropertyRef, ValueType};
use crate::error::{ContentError, ContentResult};
use std::any::Any;
use std::fmt;

/// Replayable reader for one property of one content type
#[derive(Clone, Copy)]
pub struct Accessor {
	content_type: &'static ContentTypeDescriptor,
	property: PropertyRef,
}

impl Accessor {
	/// Build an accessor for an own or inherited property of `content_type`
	///
	/// # Errors
	///
	/// Returns [`ContentError::UnknownProperty`] if no such property exists.
	pub fn new(content_type: &'static ContentTypeDescriptor, property: &str) -> ContentResult<Self> {
		let found = content_type
			.property(property)
			.ok_or_else(|| ContentError::UnknownProperty {
				content_type: content_type.qualified_name().to_string(),
				property: property.to_string(),
			})?;
		Ok(Self::from_ref(content_type, found))
	}

	/// Build an accessor for a property of `T`
	///
	/// # Examples
	///
	/// ```rust
	/// use tinyblog_content::{Accessor, ContentType};
	///
	/// #[derive(ContentType)]
	/// struct Teaser {
	///     heading: String,
	/// }
	///
	/// let accessor = Accessor::for_type::<Teaser>("heading").unwrap();
	/// let teaser = Teaser { heading: "Hello".to_string() };
	/// assert_eq!(accessor.read_as::<String>(&teaser).map(String::as_str), Some("Hello"));
	/// assert!(Accessor::for_type::<Teaser>("missing").is_err());
	/// ```
	///
	/// # Errors
	///
	/// Returns [`ContentError::UnknownProperty`] if `T` has no such property.
	pub fn for_type<T: ContentData>(property: &str) -> ContentResult<Self> {
		Self::new(T::descriptor(), property)
	}

	/// Build an accessor from an already resolved property
	pub const fn from_ref(
		content_type: &'static ContentTypeDescriptor,
		property: PropertyRef,
	) -> Self {
		Self {
			content_type,
			property,
		}
	}

	/// The content type instances are read from
	pub const fn content_type(&self) -> &'static ContentTypeDescriptor {
		self.content_type
	}

	/// The content type declaring the property
	pub const fn declared_in(&self) -> &'static ContentTypeDescriptor {
		self.property.declared_in
	}

	/// Property name
	pub fn property_name(&self) -> &'static str {
		self.property.property.name()
	}

	/// Declared value type of the property
	pub fn value_type(&self) -> ValueType {
		self.property.property.value_type()
	}

	/// Whether the property is inherited from an ancestor
	pub fn is_inherited(&self) -> bool {
		self.content_type != self.property.declared_in
	}

	/// Read the property off `instance`
	///
	/// Returns `None` if `instance` is not of the accessor's content type.
	pub fn read<'a>(&self, instance: &'a dyn Any) -> Option<&'a dyn Any> {
		let mut current = self.content_type;
		let mut value = instance;
		while current != self.property.declared_in {
			value = current.project_parent(value)?;
			current = current.parent()?;
		}
		self.property.property.read(value)
	}

	/// Read the property off `instance` as `V`
	pub fn read_as<'a, V: Any>(&self, instance: &'a dyn Any) -> Option<&'a V> {
		self.read(instance)?.downcast_ref::<V>()
	}
}

impl fmt::Debug for Accessor {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Accessor")
			.field("content_type", &self.content_type.qualified_name())
			.field("property", &self.property_name())
			.field("declared_in", &self.declared_in().qualified_name())
			.field("value_type", &self.value_type())
			.finish()
	}
}

impl fmt::Display for Accessor {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}.{}", self.content_type.name(), self.property_name())
	}
}
