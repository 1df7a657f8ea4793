//! Diagnostic sinks for non-applied registrations

use crate::outcome::RegistrationOutcome;
use parking_lot::Mutex;
use std::sync::Arc;
use tinyblog_content::MarkerKind;
use tracing::{trace, warn};

/// Receives every outcome that was not applied
pub trait DiagnosticSink: Send + Sync {
	/// Report `outcome` of a pass for `marker`
	fn emit(&self, marker: &MarkerKind, outcome: &RegistrationOutcome);
}

impl<D: DiagnosticSink + ?Sized> DiagnosticSink for Arc<D> {
	fn emit(&self, marker: &MarkerKind, outcome: &RegistrationOutcome) {
		(**self).emit(marker, outcome);
	}
}

/// Emits outcomes as `tracing` events
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingDiagnostics;

impl DiagnosticSink for TracingDiagnostics {
	fn emit(&self, marker: &MarkerKind, outcome: &RegistrationOutcome) {
		match outcome {
			RegistrationOutcome::Applied { target } => {
				trace!(
					content_type = target.content_type,
					property = target.property,
					marker = %marker,
					"registration applied"
				);
			}
			RegistrationOutcome::SkippedWrongValueType {
				target,
				expected,
				actual,
			} => {
				warn!(
					content_type = target.content_type,
					property = target.property,
					marker = %marker,
					expected = %expected,
					actual = %actual,
					"marked property skipped: value type not accepted by the registration sink"
				);
			}
			RegistrationOutcome::FailedHostCall { target, error } => {
				warn!(
					content_type = target.content_type,
					property = target.property,
					marker = %marker,
					error = %error,
					"registration of marked property failed"
				);
			}
		}
	}
}

/// Keeps outcomes in memory
#[derive(Debug, Default)]
pub struct CollectedDiagnostics {
	events: Mutex<Vec<(MarkerKind, RegistrationOutcome)>>,
}

impl CollectedDiagnostics {
	/// Create an empty collector
	pub fn new() -> Self {
		Self::default()
	}

	/// Collected events, oldest first
	pub fn events(&self) -> Vec<(MarkerKind, RegistrationOutcome)> {
		self.events.lock().clone()
	}

	/// Remove and return the collected events
	pub fn take(&self) -> Vec<(MarkerKind, RegistrationOutcome)> {
		std::mem::take(&mut *self.events.lock())
	}

	/// Number of collected events
	pub fn len(&self) -> usize {
		self.events.lock().len()
	}

	/// Whether nothing was collected
	pub fn is_empty(&self) -> bool {
		self.events.lock().is_empty()
	}
}

impl DiagnosticSink for CollectedDiagnostics {
	fn emit(&self, marker: &MarkerKind, outcome: &RegistrationOutcome) {
		self.events.lock().push((*marker, outcome.clone()));
	}
}

/// Discards outcomes
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentDiagnostics;

impl DiagnosticSink for SilentDiagnostics {
	fn emit(&self, _marker: &MarkerKind, _outcome: &RegistrationOutcome) {}
}
