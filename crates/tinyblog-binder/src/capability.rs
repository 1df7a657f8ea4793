//! Base capability filters for discovery

use std::fmt;
use tinyblog_content::{Capability, ContentData, ContentTypeDescriptor};

/// The capability a candidate type must satisfy to be scanned
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BaseCapability {
	/// The type or one of its ancestors declares the capability
	Declares(Capability),
	/// The type is, or is composed from, the named content type
	DerivesFrom(&'static str),
}

impl BaseCapability {
	/// Types that are, or are composed from, `T`
	pub fn derives_from<T: ContentData>() -> Self {
		Self::DerivesFrom(T::descriptor().qualified_name())
	}

	/// Whether `descriptor` satisfies this capability
	pub fn is_satisfied_by(&self, descriptor: &ContentTypeDescriptor) -> bool {
		match self {
			Self::Declares(capability) => descriptor.has_capability(capability),
			Self::DerivesFrom(qualified_name) => descriptor.derives_from(qualified_name),
		}
	}
}

impl Default for BaseCapability {
	fn default() -> Self {
		Self::Declares(Capability::CONTENT_DATA)
	}
}

impl From<Capability> for BaseCapability {
	fn from(capability: Capability) -> Self {
		Self::Declares(capability)
	}
}

impl fmt::Display for BaseCapability {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Declares(capability) => write!(f, "declares {}", capability),
			Self::DerivesFrom(qualified_name) => write!(f, "derives from {}", qualified_name),
		}
	}
}
