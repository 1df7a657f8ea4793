//! Rich-text property values

use std::fmt;

/// XHTML markup edited with the rich-text editor
///
/// Content properties of this type are the only ones the editor
/// configuration accepts overrides for.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct XhtmlString(String);

impl XhtmlString {
	/// Wrap markup
	pub fn new(markup: impl Into<String>) -> Self {
		Self(markup.into())
	}

	/// The markup
	pub fn as_str(&self) -> &str {
		&self.0
	}

	/// Whether the markup is empty
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	/// Unwrap into the markup
	pub fn into_string(self) -> String {
		self.0
	}
}

impl From<&str> for XhtmlString {
	fn from(markup: &str) -> Self {
		Self::new(markup)
	}
}

impl From<String> for XhtmlString {
	fn from(markup: String) -> Self {
		Self(markup)
	}
}

impl AsRef<str> for XhtmlString {
	fn as_ref(&self) -> &str {
		&self.0
	}
}

impl fmt::Display for XhtmlString {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}
