//! Content model error types

use thiserror::Error;

/// Result type for content model operations
pub type ContentResult<T> = Result<T, ContentError>;

/// Content model errors
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ContentError {
	/// The type universe cannot be enumerated in this environment
	#[error("type universe cannot be enumerated: {0}")]
	DiscoveryUnavailable(String),

	/// A property name does not exist on a content type
	#[error("content type '{content_type}' has no property '{property}'")]
	UnknownProperty {
		/// Qualified name of the content type
		content_type: String,
		/// Requested property name
		property: String,
	},
}
