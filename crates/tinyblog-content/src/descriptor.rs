//! Runtime descriptors for content types and their properties
//!
//! A [`ContentTypeDescriptor`] is the runtime view of a content type: its
//! qualified name, the capabilities it declares, the parent type it is
//! composed from, and its declared [`PropertyDescriptor`]s. Descriptors are
//! `'static` and are normally produced by `#[derive(ContentType)]`.
//!
//! # Examples
//!
//! ```rust
//! use tinyblog_content::{Capability, ContentData, ContentType, ValueType};
//!
//! #[derive(ContentType)]
//! #[content(capability = "page-data")]
//! struct NewsPage {
//!     title: String,
//! }
//!
//! let descriptor = NewsPage::descriptor();
//! assert_eq!(descriptor.name(), "NewsPage");
//! assert!(descriptor.has_capability(&Capability::PAGE_DATA));
//! assert_eq!(descriptor.declared_properties()[0].value_type(), ValueType::of::<String>());
//! ```

use crate::marker::MarkerKind;
use std::any::{Any, TypeId};
use std::collections::HashSet;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Reads a property off an instance of its declaring type
pub type PropertyReader = fn(&dyn Any) -> Option<&dyn Any>;

/// Projects an instance of a content type onto its parent content type
pub type ParentProjection = fn(&dyn Any) -> Option<&dyn Any>;

/// Runtime identity of a property's declared value type
///
/// Two value types are equal when their [`TypeId`]s are equal. The type name
/// is kept for diagnostics only.
#[derive(Clone, Copy)]
pub struct ValueType {
	id: fn() -> TypeId,
	name: fn() -> &'static str,
}

impl ValueType {
	/// Value type of `T`
	pub const fn of<T: ?Sized + 'static>() -> Self {
		Self {
			id: TypeId::of::<T>,
			name: std::any::type_name::<T>,
		}
	}

	/// The [`TypeId`] of the value type
	pub fn type_id(&self) -> TypeId {
		(self.id)()
	}

	/// Fully qualified type name, as reported by [`std::any::type_name`]
	pub fn name(&self) -> &'static str {
		(self.name)()
	}

	/// Last path segment of the type name, without generic arguments
	///
	/// # Examples
	///
	/// ```rust
	/// use tinyblog_content::ValueType;
	///
	/// assert_eq!(ValueType::of::<String>().short_name(), "String");
	/// assert_eq!(ValueType::of::<Option<String>>().short_name(), "Option");
	/// ```
	pub fn short_name(&self) -> &'static str {
		let name = self.name();
		let head = name.split('<').next().unwrap_or(name);
		head.rsplit("::").next().unwrap_or(head)
	}

	/// Whether this is the value type of `T`
	pub fn is<T: ?Sized + 'static>(&self) -> bool {
		self.type_id() == TypeId::of::<T>()
	}
}

impl PartialEq for ValueType {
	fn eq(&self, other: &Self) -> bool {
		self.type_id() == other.type_id()
	}
}

impl Eq for ValueType {}

impl Hash for ValueType {
	fn hash<H: Hasher>(&self, state: &mut H) {
		self.type_id().hash(state);
	}
}

impl fmt::Debug for ValueType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_tuple("ValueType").field(&self.name()).finish()
	}
}

impl fmt::Display for ValueType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.short_name())
	}
}

/// A named capability of the content model
///
/// A content type satisfies a capability when it, or any of its ancestors,
/// declares it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Capability(&'static str);

impl Capability {
	/// Every derived content type declares this capability
	pub const CONTENT_DATA: Self = Self("content-data");
	/// Page types
	pub const PAGE_DATA: Self = Self("page-data");
	/// Block types
	pub const BLOCK_DATA: Self = Self("block-data");

	/// Create a custom capability
	pub const fn new(name: &'static str) -> Self {
		Self(name)
	}

	/// The capability name
	pub const fn name(&self) -> &'static str {
		self.0
	}
}

impl fmt::Display for Capability {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.0)
	}
}

/// A declared property of a content type
#[derive(Clone, Copy)]
pub struct PropertyDescriptor {
	name: &'static str,
	value_type: ValueType,
	markers: &'static [MarkerKind],
	read: PropertyReader,
}

impl PropertyDescriptor {
	/// Create a property descriptor
	pub const fn new(
		name: &'static str,
		value_type: ValueType,
		markers: &'static [MarkerKind],
		read: PropertyReader,
	) -> Self {
		Self {
			name,
			value_type,
			markers,
			read,
		}
	}

	/// Property name
	pub const fn name(&self) -> &'static str {
		self.name
	}

	/// Declared value type
	pub const fn value_type(&self) -> ValueType {
		self.value_type
	}

	/// Markers attached to the property, in declaration order
	pub const fn markers(&self) -> &'static [MarkerKind] {
		self.markers
	}

	/// Whether a marker of the given kind is attached
	pub fn has_marker(&self, kind: &MarkerKind) -> bool {
		self.markers.iter().any(|marker| marker == kind)
	}

	/// Read the property off an instance of its declaring type
	///
	/// Returns `None` when `instance` is not of the declaring type.
	pub fn read<'a>(&self, instance: &'a dyn Any) -> Option<&'a dyn Any> {
		(self.read)(instance)
	}
}

impl fmt::Debug for PropertyDescriptor {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("PropertyDescriptor")
			.field("name", &self.name)
			.field("value_type", &self.value_type)
			.field("markers", &self.markers)
			.finish_non_exhaustive()
	}
}

/// Link from a content type to the parent it is composed from
#[derive(Clone, Copy)]
pub struct ParentLink {
	descriptor: fn() -> &'static ContentTypeDescriptor,
	project: ParentProjection,
}

impl ParentLink {
	/// Create a parent link
	pub const fn new(
		descriptor: fn() -> &'static ContentTypeDescriptor,
		project: ParentProjection,
	) -> Self {
		Self {
			descriptor,
			project,
		}
	}
}

/// A property together with the content type that declares it
#[derive(Debug, Clone, Copy)]
pub struct PropertyRef {
	/// The property
	pub property: &'static PropertyDescriptor,
	/// The content type the property is declared on
	pub declared_in: &'static ContentTypeDescriptor,
}

/// Runtime descriptor of a content type
pub struct ContentTypeDescriptor {
	qualified_name: &'static str,
	type_id: fn() -> TypeId,
	parent: Option<ParentLink>,
	capabilities: &'static [Capability],
	is_abstract: bool,
	properties: &'static [PropertyDescriptor],
}

impl ContentTypeDescriptor {
	/// Create a content type descriptor
	pub const fn new(
		qualified_name: &'static str,
		type_id: fn() -> TypeId,
		parent: Option<ParentLink>,
		capabilities: &'static [Capability],
		is_abstract: bool,
		properties: &'static [PropertyDescriptor],
	) -> Self {
		Self {
			qualified_name,
			type_id,
			parent,
			capabilities,
			is_abstract,
			properties,
		}
	}

	/// Qualified name (`module::path::Type`)
	pub const fn qualified_name(&self) -> &'static str {
		self.qualified_name
	}

	/// Type name without its module path
	pub fn name(&self) -> &'static str {
		self.qualified_name
			.rsplit("::")
			.next()
			.unwrap_or(self.qualified_name)
	}

	/// The [`TypeId`] of the described Rust type
	pub fn type_id(&self) -> TypeId {
		(self.type_id)()
	}

	/// Identity of the described type: its [`TypeId`] and qualified name
	pub fn identity(&self) -> (TypeId, &'static str) {
		(self.type_id(), self.qualified_name)
	}

	/// Whether this describes `T`
	pub fn is<T: Any>(&self) -> bool {
		self.type_id() == TypeId::of::<T>()
	}

	/// Whether the type is abstract (a base other types are composed from)
	pub const fn is_abstract(&self) -> bool {
		self.is_abstract
	}

	/// Capabilities declared directly on this type
	pub const fn declared_capabilities(&self) -> &'static [Capability] {
		self.capabilities
	}

	/// Properties declared directly on this type, in declaration order
	pub const fn declared_properties(&self) -> &'static [PropertyDescriptor] {
		self.properties
	}

	/// The parent content type, if any
	pub fn parent(&self) -> Option<&'static ContentTypeDescriptor> {
		self.parent.map(|link| (link.descriptor)())
	}

	/// Ancestors, nearest first
	pub fn ancestors(&self) -> Ancestors {
		Ancestors {
			next: self.parent(),
		}
	}

	/// Whether this type or any ancestor declares `capability`
	pub fn has_capability(&self, capability: &Capability) -> bool {
		self.capabilities.contains(capability)
			|| self
				.ancestors()
				.any(|ancestor| ancestor.capabilities.contains(capability))
	}

	/// Whether this type is, or is composed from, the type named `qualified_name`
	pub fn derives_from(&self, qualified_name: &str) -> bool {
		self.qualified_name == qualified_name
			|| self
				.ancestors()
				.any(|ancestor| ancestor.qualified_name == qualified_name)
	}

	/// Own and inherited properties
	///
	/// Own properties come first in declaration order, followed by each
	/// ancestor's properties (nearest ancestor first). A property declared
	/// under the same name closer to this type shadows the inherited one.
	pub fn properties(&'static self) -> Vec<PropertyRef> {
		let mut seen = HashSet::new();
		let mut properties = Vec::new();

		for declared_in in std::iter::once(self).chain(self.ancestors()) {
			for property in declared_in.properties {
				if seen.insert(property.name) {
					properties.push(PropertyRef {
						property,
						declared_in,
					});
				}
			}
		}

		properties
	}

	/// Look up an own or inherited property by name
	pub fn property(&'static self, name: &str) -> Option<PropertyRef> {
		std::iter::once(self)
			.chain(self.ancestors())
			.find_map(|declared_in| {
				declared_in
					.properties
					.iter()
					.find(|property| property.name == name)
					.map(|property| PropertyRef {
						property,
						declared_in,
					})
			})
	}

	/// Project an instance of this type onto its parent
	pub fn project_parent<'a>(&self, instance: &'a dyn Any) -> Option<&'a dyn Any> {
		self.parent.and_then(|link| (link.project)(instance))
	}
}

/// Descriptors are equal when they describe the same Rust type under the same
/// qualified name; same-named types in one module (function-local types, for
/// instance) stay distinct.
impl PartialEq for ContentTypeDescriptor {
	fn eq(&self, other: &Self) -> bool {
		self.identity() == other.identity()
	}
}

impl Eq for ContentTypeDescriptor {}

impl Hash for ContentTypeDescriptor {
	fn hash<H: Hasher>(&self, state: &mut H) {
		self.identity().hash(state);
	}
}

impl fmt::Debug for ContentTypeDescriptor {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("ContentTypeDescriptor")
			.field("qualified_name", &self.qualified_name)
			.field("parent", &self.parent().map(|parent| parent.qualified_name))
			.field("capabilities", &self.capabilities)
			.field("is_abstract", &self.is_abstract)
			.field("properties", &self.properties)
			.finish()
	}
}

impl fmt::Display for ContentTypeDescriptor {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.qualified_name)
	}
}

/// Iterator over a content type's ancestors
#[derive(Debug, Clone)]
pub struct Ancestors {
	next: Option<&'static ContentTypeDescriptor>,
}

impl Iterator for Ancestors {
	type Item = &'static ContentTypeDescriptor;

	fn next(&mut self) -> Option<Self::Item> {
		let current = self.next?;
		self.next = current.parent();
		Some(current)
	}
}

/// A Rust type that participates in the content model
///
/// Implemented by `#[derive(ContentType)]`.
pub trait ContentData: Any {
	/// The runtime descriptor of this type
	fn descriptor() -> &'static ContentTypeDescriptor
	where
		Self: Sized;
}
