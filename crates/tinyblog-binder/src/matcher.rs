//! Property matcher
//!
//! Finds the properties of a content type that carry a given marker kind.
//! Own properties come first in declaration order, then inherited ones,
//! nearest ancestor first. A property re-declared on a child shadows the
//! parent's declaration, markers included.

use crate::outcome::PropertyTarget;
use tinyblog_content::{Accessor, ContentTypeDescriptor, MarkerKind, PropertyRef, ValueType};

/// A marked property of a scanned content type
#[derive(Debug, Clone, Copy)]
pub struct PropertyMatch {
	content_type: &'static ContentTypeDescriptor,
	property: PropertyRef,
}

impl PropertyMatch {
	/// The scanned content type
	pub fn content_type(&self) -> &'static ContentTypeDescriptor {
		self.content_type
	}

	/// The matched property and its declaring type
	pub fn property(&self) -> PropertyRef {
		self.property
	}

	/// Property name
	pub fn property_name(&self) -> &'static str {
		self.property.property.name()
	}

	/// Declared value type of the property
	pub fn value_type(&self) -> ValueType {
		self.property.property.value_type()
	}

	/// Accessor reading the property off instances of the scanned type
	pub fn accessor(&self) -> Accessor {
		Accessor::from_ref(self.content_type, self.property)
	}

	/// The (type, property) target of a registration
	pub fn target(&self) -> PropertyTarget {
		PropertyTarget {
			content_type: self.content_type.qualified_name(),
			property: self.property_name(),
			declared_in: self.property.declared_in.qualified_name(),
		}
	}
}

/// Classification of a marked property
#[derive(Debug, Clone, Copy)]
pub enum MarkedProperty {
	/// The property can be registered
	Eligible(PropertyMatch),
	/// The property is marked but its value type is not the expected one
	WrongValueType {
		/// The marked property
		property: PropertyMatch,
		/// The value type that was expected
		expected: ValueType,
	},
}

impl MarkedProperty {
	/// The marked property, regardless of classification
	pub fn property(&self) -> &PropertyMatch {
		match self {
			Self::Eligible(property) | Self::WrongValueType { property, .. } => property,
		}
	}

	/// Whether the property can be registered
	pub fn is_eligible(&self) -> bool {
		matches!(self, Self::Eligible(_))
	}
}

/// Find the properties of `content_type` carrying a `marker` marker
///
/// With `expected` set, properties of another value type are returned as
/// [`MarkedProperty::WrongValueType`] instead of being dropped.
pub fn match_properties(
	content_type: &'static ContentTypeDescriptor,
	marker: &MarkerKind,
	expected: Option<&ValueType>,
) -> Vec<MarkedProperty> {
	content_type
		.properties()
		.into_iter()
		.filter(|property| property.property.has_marker(marker))
		.map(|property| {
			let found = PropertyMatch {
				content_type,
				property,
			};
			match expected {
				Some(expected) if found.value_type() != *expected => MarkedProperty::WrongValueType {
					property: found,
					expected: *expected,
				},
				_ => MarkedProperty::Eligible(found),
			}
		})
		.collect()
}
