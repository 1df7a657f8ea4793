//! Type universe scanner
//!
//! The [`Scanner`] enumerates a [`TypeUniverse`] and keeps the content types
//! satisfying a [`BaseCapability`]. A type linked more than once is kept
//! once (same [`TypeId`](std::any::TypeId) and qualified name); distinct types
//! sharing a name are all kept. Results are sorted by qualified name, so link
//! order never shows up in binding outcomes.
//! Successful lookups are memoized per capability; failures never are.

use crate::capability::BaseCapability;
use crate::error::BindResult;
use once_cell::sync::Lazy;
use parking_lot::RwLock;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tinyblog_content::{ContentTypeDescriptor, LinkedTypeUniverse, TypeUniverse};
use tracing::debug;

/// Candidate content types, sorted by qualified name
pub type Candidates = Arc<[&'static ContentTypeDescriptor]>;

static LINKED_SCANNER: Lazy<Arc<Scanner<LinkedTypeUniverse>>> =
	Lazy::new(|| Arc::new(Scanner::new(LinkedTypeUniverse)));

/// Discovers candidate content types in a type universe
pub struct Scanner<U: TypeUniverse = LinkedTypeUniverse> {
	universe: U,
	cache: RwLock<HashMap<BaseCapability, Candidates>>,
}

impl<U: TypeUniverse> Scanner<U> {
	/// Create a scanner over `universe` with an empty cache
	pub fn new(universe: U) -> Self {
		Self {
			universe,
			cache: RwLock::new(HashMap::new()),
		}
	}

	/// The scanned universe
	pub fn universe(&self) -> &U {
		&self.universe
	}

	/// Content types satisfying `capability`, memoized
	///
	/// # Errors
	///
	/// Returns [`BindError::DiscoveryUnavailable`](crate::BindError::DiscoveryUnavailable)
	/// if the universe cannot be enumerated.
	pub fn discover(&self, capability: &BaseCapability) -> BindResult<Candidates> {
		if let Some(cached) = self.cache.read().get(capability) {
			return Ok(Arc::clone(cached));
		}

		let discovered = self.rescan(capability)?;
		let mut cache = self.cache.write();
		let entry = cache.entry(*capability).or_insert_with(|| {
			debug!(
				capability = %capability,
				types = discovered.len(),
				"cached content type discovery"
			);
			discovered
		});
		Ok(Arc::clone(entry))
	}

	/// Content types satisfying `capability`, bypassing the cache
	///
	/// # Errors
	///
	/// Returns [`BindError::DiscoveryUnavailable`](crate::BindError::DiscoveryUnavailable)
	/// if the universe cannot be enumerated.
	pub fn rescan(&self, capability: &BaseCapability) -> BindResult<Candidates> {
		let mut seen = HashSet::new();
		let mut types: Vec<_> = self
			.universe
			.enumerate()?
			.into_iter()
			.filter(|descriptor| seen.insert(descriptor.identity()))
			.filter(|descriptor| capability.is_satisfied_by(descriptor))
			.collect();
		types.sort_by_key(|descriptor| (descriptor.qualified_name(), descriptor.type_id()));
		Ok(types.into())
	}

	/// Whether a discovery result for `capability` is cached
	pub fn is_cached(&self, capability: &BaseCapability) -> bool {
		self.cache.read().contains_key(capability)
	}

	/// Drop every cached discovery result
	pub fn clear_cache(&self) {
		self.cache.write().clear();
	}
}

impl Scanner<LinkedTypeUniverse> {
	/// The process-wide scanner over the linked type universe
	pub fn linked() -> Arc<Self> {
		Arc::clone(&LINKED_SCANNER)
	}
}

impl<U: TypeUniverse> std::fmt::Debug for Scanner<U> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Scanner")
			.field("cached", &self.cache.read().len())
			.finish_non_exhaustive()
	}
}
