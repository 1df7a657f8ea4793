//! Per-property registration outcomes and the binding report

use crate::error::{BindError, BindResult};
use std::error::Error;
use std::fmt;
use std::sync::Arc;
use tinyblog_content::{MarkerKind, ValueType};

/// Shared, type-erased registration error
pub type SharedError = Arc<dyn Error + Send + Sync>;

/// The (content type, property) pair a registration is about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PropertyTarget {
	/// Qualified name of the scanned content type
	pub content_type: &'static str,
	/// Property name
	pub property: &'static str,
	/// Qualified name of the content type declaring the property
	pub declared_in: &'static str,
}

impl PropertyTarget {
	/// Whether the property is inherited from an ancestor
	pub fn is_inherited(&self) -> bool {
		self.content_type != self.declared_in
	}
}

impl fmt::Display for PropertyTarget {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let name = self
			.content_type
			.rsplit("::")
			.next()
			.unwrap_or(self.content_type);
		write!(f, "{}.{}", name, self.property)
	}
}

/// Discriminant of a [`RegistrationOutcome`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutcomeKind {
	/// Registered
	Applied,
	/// Skipped for its value type
	SkippedWrongValueType,
	/// The registration sink failed
	FailedHostCall,
}

/// What happened to one marked property
#[derive(Debug, Clone)]
pub enum RegistrationOutcome {
	/// The configuration value was registered for the property
	Applied {
		/// The property
		target: PropertyTarget,
	},
	/// The property's value type is not the one the sink accepts
	SkippedWrongValueType {
		/// The property
		target: PropertyTarget,
		/// Value type the sink accepts
		expected: ValueType,
		/// Declared value type of the property
		actual: ValueType,
	},
	/// The registration sink returned an error or panicked
	FailedHostCall {
		/// The property
		target: PropertyTarget,
		/// The sink's error
		error: SharedError,
	},
}

impl RegistrationOutcome {
	/// The property this outcome is about
	pub fn target(&self) -> &PropertyTarget {
		match self {
			Self::Applied { target }
			| Self::SkippedWrongValueType { target, .. }
			| Self::FailedHostCall { target, .. } => target,
		}
	}

	/// The outcome discriminant
	pub fn kind(&self) -> OutcomeKind {
		match self {
			Self::Applied { .. } => OutcomeKind::Applied,
			Self::SkippedWrongValueType { .. } => OutcomeKind::SkippedWrongValueType,
			Self::FailedHostCall { .. } => OutcomeKind::FailedHostCall,
		}
	}

	/// Whether the value was registered
	pub fn is_applied(&self) -> bool {
		matches!(self, Self::Applied { .. })
	}
}

impl PartialEq for RegistrationOutcome {
	fn eq(&self, other: &Self) -> bool {
		match (self, other) {
			(Self::Applied { target: a }, Self::Applied { target: b }) => a == b,
			(
				Self::SkippedWrongValueType {
					target: a,
					expected: expected_a,
					actual: actual_a,
				},
				Self::SkippedWrongValueType {
					target: b,
					expected: expected_b,
					actual: actual_b,
				},
			) => a == b && expected_a == expected_b && actual_a == actual_b,
			(
				Self::FailedHostCall {
					target: a,
					error: error_a,
				},
				Self::FailedHostCall {
					target: b,
					error: error_b,
				},
			) => a == b && error_a.to_string() == error_b.to_string(),
			_ => false,
		}
	}
}

impl fmt::Display for RegistrationOutcome {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Applied { target } => write!(f, "{}: applied", target),
			Self::SkippedWrongValueType {
				target,
				expected,
				actual,
			} => write!(
				f,
				"{}: skipped, expected {} but found {}",
				target, expected, actual
			),
			Self::FailedHostCall { target, error } => write!(f, "{}: failed, {}", target, error),
		}
	}
}

/// Outcomes of one binding pass, in processing order
#[derive(Debug, Clone, PartialEq)]
pub struct BindingReport {
	marker: MarkerKind,
	outcomes: Vec<RegistrationOutcome>,
}

impl BindingReport {
	/// Create an empty report for `marker`
	pub fn new(marker: MarkerKind) -> Self {
		Self {
			marker,
			outcomes: Vec::new(),
		}
	}

	pub(crate) fn push(&mut self, outcome: RegistrationOutcome) {
		self.outcomes.push(outcome);
	}

	/// Marker kind of the pass
	pub fn marker(&self) -> MarkerKind {
		self.marker
	}

	/// All outcomes in processing order
	pub fn outcomes(&self) -> &[RegistrationOutcome] {
		&self.outcomes
	}

	/// Consume the report into its outcomes
	pub fn into_outcomes(self) -> Vec<RegistrationOutcome> {
		self.outcomes
	}

	/// Number of marked properties seen
	pub fn len(&self) -> usize {
		self.outcomes.len()
	}

	/// Whether no marked property was found
	pub fn is_empty(&self) -> bool {
		self.outcomes.is_empty()
	}

	fn count(&self, kind: OutcomeKind) -> usize {
		self.outcomes.iter().filter(|o| o.kind() == kind).count()
	}

	/// Number of applied registrations
	pub fn applied_count(&self) -> usize {
		self.count(OutcomeKind::Applied)
	}

	/// Number of properties skipped for their value type
	pub fn skipped_count(&self) -> usize {
		self.count(OutcomeKind::SkippedWrongValueType)
	}

	/// Number of failed registrations
	pub fn failed_count(&self) -> usize {
		self.count(OutcomeKind::FailedHostCall)
	}

	/// Whether every marked property was applied
	pub fn is_clean(&self) -> bool {
		self.outcomes.iter().all(RegistrationOutcome::is_applied)
	}

	/// Outcomes that were not applied
	pub fn failures(&self) -> impl Iterator<Item = &RegistrationOutcome> {
		self.outcomes.iter().filter(|o| !o.is_applied())
	}

	/// Targets that were applied
	pub fn applied_targets(&self) -> impl Iterator<Item = &PropertyTarget> {
		self.outcomes
			.iter()
			.filter(|o| o.is_applied())
			.map(RegistrationOutcome::target)
	}

	/// The outcome for a content type (qualified or short name) and property
	pub fn outcome_for(&self, content_type: &str, property: &str) -> Option<&RegistrationOutcome> {
		self.outcomes.iter().find(|outcome| {
			let target = outcome.target();
			target.property == property
				&& (target.content_type == content_type
					|| target
						.content_type
						.rsplit("::")
						.next()
						.is_some_and(|name| name == content_type))
		})
	}

	/// Turn a report with skipped or failed properties into an error
	///
	/// # Errors
	///
	/// Returns [`BindError::Incomplete`] unless every outcome is applied.
	pub fn ensure_clean(self) -> BindResult<Self> {
		if self.is_clean() {
			return Ok(self);
		}
		Err(BindError::Incomplete {
			marker: self.marker,
			skipped: self.skipped_count(),
			failed: self.failed_count(),
		})
	}
}
