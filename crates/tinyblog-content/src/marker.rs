//! Property markers
//!
//! A marker flags a content property as opted into a configuration override.
//! Markers carry no payload: presence is the opt-in. A marker kind may carry
//! a discriminator to tell override groups apart.
//!
//! # Examples
//!
//! ```rust
//! use tinyblog_content::{Marker, MarkerKind, marker};
//!
//! marker! {
//!     /// Compact editor for short rich-text fields
//!     pub SimpleEditor
//! }
//!
//! marker! {
//!     pub NarrowEditor, group = "narrow"
//! }
//!
//! assert_eq!(SimpleEditor::KIND.short_name(), "SimpleEditor");
//! assert_eq!(NarrowEditor::KIND.discriminator(), Some("narrow"));
//! assert_ne!(MarkerKind::of::<SimpleEditor>(), MarkerKind::of::<NarrowEditor>());
//! ```

use std::fmt;

/// Identity of a marker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MarkerKind {
	name: &'static str,
	discriminator: Option<&'static str>,
}

impl MarkerKind {
	/// Create a marker kind without discriminator
	pub const fn new(name: &'static str) -> Self {
		Self {
			name,
			discriminator: None,
		}
	}

	/// The same marker kind with a discriminator
	pub const fn with_discriminator(self, discriminator: &'static str) -> Self {
		Self {
			name: self.name,
			discriminator: Some(discriminator),
		}
	}

	/// Kind of the marker type `M`
	pub const fn of<M: Marker>() -> Self {
		M::KIND
	}

	/// Marker name, usually the qualified path of the marker type
	pub const fn name(&self) -> &'static str {
		self.name
	}

	/// Marker name without its module path
	pub fn short_name(&self) -> &'static str {
		self.name.rsplit("::").next().unwrap_or(self.name)
	}

	/// Discriminator, if any
	pub const fn discriminator(&self) -> Option<&'static str> {
		self.discriminator
	}
}

impl fmt::Display for MarkerKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self.discriminator {
			Some(discriminator) => write!(f, "{}[{}]", self.short_name(), discriminator),
			None => f.write_str(self.short_name()),
		}
	}
}

/// A marker type usable in `#[mark(..)]` field attributes
pub trait Marker: 'static {
	/// Kind attached to properties carrying this marker
	const KIND: MarkerKind;
}

/// Declare a unit marker type
///
/// The marker name is the qualified path of the declared type. An optional
/// `group = "..."` sets the discriminator.
#[macro_export]
macro_rules! marker {
	($(#[$meta:meta])* $vis:vis $name:ident, group = $group:literal) => {
		$(#[$meta])*
		#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
		$vis struct $name;

		impl $crate::Marker for $name {
			const KIND: $crate::MarkerKind = $crate::MarkerKind::new(::std::concat!(
				::std::module_path!(),
				"::",
				::std::stringify!($name)
			))
			.with_discriminator($group);
		}
	};
	($(#[$meta:meta])* $vis:vis $name:ident) => {
		$(#[$meta])*
		#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
		$vis struct $name;

		impl $crate::Marker for $name {
			const KIND: $crate::MarkerKind = $crate::MarkerKind::new(::std::concat!(
				::std::module_path!(),
				"::",
				::std::stringify!($name)
			));
		}
	};
}
