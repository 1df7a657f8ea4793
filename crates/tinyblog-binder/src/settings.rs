//! Binder settings
//!
//! # Examples
//!
//! ```rust
//! use tinyblog_binder::BinderSettings;
//!
//! let settings = BinderSettings::from_toml_str("strict = true").unwrap();
//! assert!(settings.strict);
//! assert!(settings.catch_panics);
//! ```

use crate::error::BindResult;
use serde::Deserialize;

/// Behaviour switches for a [`Binder`](crate::Binder)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BinderSettings {
	/// Fail the pass when any marked property is skipped or fails
	pub strict: bool,
	/// Memoize discovery results per capability
	pub cache_discovery: bool,
	/// Record panics inside the registration sink as failed registrations
	pub catch_panics: bool,
	/// Scan abstract content types as well
	pub include_abstract: bool,
}

impl Default for BinderSettings {
	fn default() -> Self {
		Self {
			strict: false,
			cache_discovery: true,
			catch_panics: true,
			include_abstract: true,
		}
	}
}

impl BinderSettings {
	/// Parse settings from TOML; missing keys keep their defaults
	///
	/// # Errors
	///
	/// Returns [`BindError::Settings`](crate::BindError::Settings) for
	/// malformed input or unknown keys.
	pub fn from_toml_str(input: &str) -> BindResult<Self> {
		Ok(toml::from_str(input)?)
	}

	/// Set strict mode
	#[must_use]
	pub fn with_strict(mut self, strict: bool) -> Self {
		self.strict = strict;
		self
	}

	/// Enable or disable the discovery cache
	#[must_use]
	pub fn with_cache_discovery(mut self, cache_discovery: bool) -> Self {
		self.cache_discovery = cache_discovery;
		self
	}

	/// Enable or disable catching sink panics
	#[must_use]
	pub fn with_catch_panics(mut self, catch_panics: bool) -> Self {
		self.catch_panics = catch_panics;
		self
	}

	/// Include or exclude abstract content types
	#[must_use]
	pub fn with_include_abstract(mut self, include_abstract: bool) -> Self {
		self.include_abstract = include_abstract;
		self
	}
}
