//! The type universe
//!
//! Every `#[derive(ContentType)]` adds its descriptor to the [`CONTENT_TYPES`]
//! distributed slice at link time, so the set of content types is the set of
//! types linked into the running binary. [`TypeUniverse`] abstracts over
//! where the candidate types come from: [`LinkedTypeUniverse`] reads the
//! slice, [`StaticTypeUniverse`] is an explicit list.
//!
//! # Examples
//!
//! ```rust
//! use tinyblog_content::{ContentType, StaticTypeUniverse, TypeUniverse};
//!
//! #[derive(ContentType)]
//! struct LandingPage {
//!     heading: String,
//! }
//!
//! let universe = StaticTypeUniverse::new().with::<LandingPage>();
//! assert_eq!(universe.enumerate().unwrap().len(), 1);
//! ```

use crate::descriptor::{ContentData, ContentTypeDescriptor};
#[cfg(target_arch = "wasm32")]
use crate::error::ContentError;
use crate::error::ContentResult;

/// Global distributed slice of content type descriptors
///
/// Populated by `#[derive(ContentType)]`. Link sections are not available
/// on `wasm32`, where the slice does not exist and [`LinkedTypeUniverse`]
/// reports discovery as unavailable.
#[cfg(not(target_arch = "wasm32"))]
#[linkme::distributed_slice]
pub static CONTENT_TYPES: [fn() -> &'static ContentTypeDescriptor];

/// Source of candidate content types
pub trait TypeUniverse: Send + Sync {
	/// Enumerate every content type in the universe
	///
	/// The result may contain the same type more than once; callers
	/// de-duplicate by qualified name.
	fn enumerate(&self) -> ContentResult<Vec<&'static ContentTypeDescriptor>>;
}

/// Content types linked into the running binary
#[derive(Debug, Clone, Copy, Default)]
pub struct LinkedTypeUniverse;

impl TypeUniverse for LinkedTypeUniverse {
	#[cfg(not(target_arch = "wasm32"))]
	fn enumerate(&self) -> ContentResult<Vec<&'static ContentTypeDescriptor>> {
		Ok(CONTENT_TYPES.iter().map(|descriptor| descriptor()).collect())
	}

	#[cfg(target_arch = "wasm32")]
	fn enumerate(&self) -> ContentResult<Vec<&'static ContentTypeDescriptor>> {
		Err(ContentError::DiscoveryUnavailable(
			"link-time content type registration is not supported on wasm32".to_string(),
		))
	}
}

/// Find a linked content type by qualified name
pub fn find_content_type(qualified_name: &str) -> Option<&'static ContentTypeDescriptor> {
	LinkedTypeUniverse
		.enumerate()
		.ok()?
		.into_iter()
		.find(|descriptor| descriptor.qualified_name() == qualified_name)
}

/// An explicit list of content types
#[derive(Debug, Clone, Default)]
pub struct StaticTypeUniverse {
	types: Vec<&'static ContentTypeDescriptor>,
}

impl StaticTypeUniverse {
	/// Create an empty universe
	pub fn new() -> Self {
		Self::default()
	}

	/// Add `T`
	#[must_use]
	pub fn with<T: ContentData>(mut self) -> Self {
		self.types.push(T::descriptor());
		self
	}

	/// Add a descriptor
	#[must_use]
	pub fn with_descriptor(mut self, descriptor: &'static ContentTypeDescriptor) -> Self {
		self.types.push(descriptor);
		self
	}

	/// Add a descriptor in place
	pub fn push(&mut self, descriptor: &'static ContentTypeDescriptor) {
		self.types.push(descriptor);
	}

	/// Number of entries, duplicates included
	pub fn len(&self) -> usize {
		self.types.len()
	}

	/// Whether the universe is empty
	pub fn is_empty(&self) -> bool {
		self.types.is_empty()
	}
}

impl FromIterator<&'static ContentTypeDescriptor> for StaticTypeUniverse {
	fn from_iter<I: IntoIterator<Item = &'static ContentTypeDescriptor>>(iter: I) -> Self {
		Self {
			types: iter.into_iter().collect(),
		}
	}
}

impl TypeUniverse for StaticTypeUniverse {
	fn enumerate(&self) -> ContentResult<Vec<&'static ContentTypeDescriptor>> {
		Ok(self.types.clone())
	}
}
