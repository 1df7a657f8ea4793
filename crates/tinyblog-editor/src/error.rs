//! Editor configuration error types

use thiserror::Error;
use tinyblog_content::ContentError;

/// Result type for editor configuration operations
pub type EditorResult<T> = Result<T, EditorError>;

/// Editor configuration errors
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum EditorError {
	/// Property lookup failed
	#[error(transparent)]
	Content(#[from] ContentError),

	/// Overrides only apply to rich-text properties
	#[error("property '{property}' of '{content_type}' is {actual}, not XhtmlString")]
	NotRichText {
		/// Qualified name of the content type
		content_type: String,
		/// Property name
		property: String,
		/// Declared value type of the property
		actual: String,
	},

	/// The configuration no longer accepts changes
	#[error("editor configuration is frozen, cannot change settings for {0}")]
	Frozen(String),
}
