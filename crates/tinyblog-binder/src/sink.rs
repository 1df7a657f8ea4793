//! Registration sinks
//!
//! A [`RegistrationSink`] is the host's registration entry point: the binder
//! hands it one [`Accessor`] per marked property together with the shared
//! configuration value.

use tinyblog_content::{Accessor, ValueType};

/// Host entry point receiving (accessor, value) registrations
pub trait RegistrationSink<C: ?Sized> {
	/// Error returned by a failed registration
	type Error: std::error::Error + Send + Sync + 'static;

	/// The only property value type this sink accepts, if restricted
	///
	/// Marked properties of any other value type are skipped without calling
	/// [`register`](Self::register).
	fn expected_value_type(&self) -> Option<ValueType> {
		None
	}

	/// Register `value` for the property read by `accessor`
	fn register(&mut self, accessor: Accessor, value: &C) -> Result<(), Self::Error>;
}

impl<C: ?Sized, S: RegistrationSink<C> + ?Sized> RegistrationSink<C> for &mut S {
	type Error = S::Error;

	fn expected_value_type(&self) -> Option<ValueType> {
		(**self).expected_value_type()
	}

	fn register(&mut self, accessor: Accessor, value: &C) -> Result<(), Self::Error> {
		(**self).register(accessor, value)
	}
}
