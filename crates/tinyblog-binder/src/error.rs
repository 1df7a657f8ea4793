//! Binder error types

use thiserror::Error;
use tinyblog_content::{ContentError, MarkerKind};

/// Result type for binder operations
pub type BindResult<T> = Result<T, BindError>;

/// Errors that abort a binding pass
///
/// Per-property problems are recorded as outcomes in the
/// [`BindingReport`](crate::BindingReport), not raised here.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum BindError {
	/// The type universe cannot be enumerated
	#[error("content type discovery unavailable: {0}")]
	DiscoveryUnavailable(String),

	/// Strict mode found properties that were not applied
	#[error("binding for marker '{marker}' incomplete: {skipped} skipped, {failed} failed")]
	Incomplete {
		/// Marker kind of the pass
		marker: MarkerKind,
		/// Number of properties skipped for their value type
		skipped: usize,
		/// Number of properties whose registration failed
		failed: usize,
	},

	/// Binder settings could not be parsed
	#[error("invalid binder settings: {0}")]
	Settings(#[from] toml::de::Error),
}

impl From<ContentError> for BindError {
	fn from(error: ContentError) -> Self {
		match error {
			ContentError::DiscoveryUnavailable(reason) => Self::DiscoveryUnavailable(reason),
			other => Self::DiscoveryUnavailable(other.to_string()),
		}
	}
}

/// A registration sink panicked
///
/// Recorded as the error of a failed registration when panics are caught.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("registration sink panicked: {0}")]
pub struct SinkPanicked(pub String);

impl SinkPanicked {
	/// Build from a panic payload
	pub(crate) fn from_payload(payload: &(dyn std::any::Any + Send)) -> Self {
		let message = payload
			.downcast_ref::<&'static str>()
			.map(|message| (*message).to_string())
			.or_else(|| payload.downcast_ref::<String>().cloned())
			.unwrap_or_else(|| "non-string panic payload".to_string());
		Self(message)
	}
}
