//! The dynamic binder
//!
//! A [`Binder`] runs one pass per call: discover the candidate types, match
//! their marked properties and hand each eligible one to the registration
//! sink as an [`Accessor`](tinyblog_content::Accessor). A failing property
//! never stops the pass; its outcome is recorded in the report and sent to
//! the diagnostic sink.

use crate::capability::BaseCapability;
use crate::diagnostics::{DiagnosticSink, TracingDiagnostics};
use crate::error::{BindResult, SinkPanicked};
use crate::matcher::{MarkedProperty, PropertyMatch, match_properties};
use crate::outcome::{BindingReport, RegistrationOutcome, SharedError};
use crate::scanner::Scanner;
use crate::settings::BinderSettings;
use crate::sink::RegistrationSink;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use tinyblog_content::{LinkedTypeUniverse, Marker, MarkerKind, TypeUniverse};
use tracing::debug;

/// Binds a configuration value to every property carrying a marker
///
/// # Examples
///
/// ```rust
/// use std::convert::Infallible;
/// use tinyblog_binder::{Binder, RegistrationSink};
/// use tinyblog_content::{Accessor, ContentType, StaticTypeUniverse, marker};
///
/// marker!(pub Compact);
///
/// #[derive(ContentType)]
/// struct NewsPage {
///     #[mark(Compact)]
///     lead: String,
///     body: String,
/// }
///
/// #[derive(Default)]
/// struct Recorder(Vec<String>);
///
/// impl RegistrationSink<u32> for Recorder {
///     type Error = Infallible;
///
///     fn register(&mut self, accessor: Accessor, value: &u32) -> Result<(), Infallible> {
///         self.0.push(format!("{}={}", accessor, value));
///         Ok(())
///     }
/// }
///
/// let binder = Binder::new(StaticTypeUniverse::new().with::<NewsPage>());
/// let mut recorder = Recorder::default();
/// let report = binder.bind_marker::<Compact, _, _>(&125u32, &mut recorder).unwrap();
///
/// assert_eq!(report.applied_count(), 1);
/// assert_eq!(recorder.0, vec!["NewsPage.lead=125".to_string()]);
/// ```
pub struct Binder<U: TypeUniverse = LinkedTypeUniverse> {
	scanner: Arc<Scanner<U>>,
	capability: BaseCapability,
	settings: BinderSettings,
	diagnostics: Arc<dyn DiagnosticSink>,
}

impl<U: TypeUniverse> Binder<U> {
	/// Create a binder with its own scanner over `universe`
	pub fn new(universe: U) -> Self {
		Self::with_scanner(Arc::new(Scanner::new(universe)))
	}

	/// Create a binder sharing `scanner` (and its discovery cache)
	pub fn with_scanner(scanner: Arc<Scanner<U>>) -> Self {
		Self {
			scanner,
			capability: BaseCapability::default(),
			settings: BinderSettings::default(),
			diagnostics: Arc::new(TracingDiagnostics),
		}
	}

	/// Restrict candidates to types satisfying `capability`
	#[must_use]
	pub fn with_capability(mut self, capability: impl Into<BaseCapability>) -> Self {
		self.capability = capability.into();
		self
	}

	/// Replace the settings
	#[must_use]
	pub fn with_settings(mut self, settings: BinderSettings) -> Self {
		self.settings = settings;
		self
	}

	/// Send non-applied outcomes to `diagnostics`
	#[must_use]
	pub fn with_diagnostics(mut self, diagnostics: impl DiagnosticSink + 'static) -> Self {
		self.diagnostics = Arc::new(diagnostics);
		self
	}

	/// The scanner used for discovery
	pub fn scanner(&self) -> &Arc<Scanner<U>> {
		&self.scanner
	}

	/// The base capability candidates must satisfy
	pub fn capability(&self) -> BaseCapability {
		self.capability
	}

	/// The active settings
	pub fn settings(&self) -> BinderSettings {
		self.settings
	}

	/// Bind `value` to every property carrying a `marker` marker
	///
	/// # Errors
	///
	/// Returns [`BindError::DiscoveryUnavailable`](crate::BindError::DiscoveryUnavailable)
	/// if the universe cannot be enumerated, and, in strict mode,
	/// [`BindError::Incomplete`](crate::BindError::Incomplete) if any marked
	/// property was not applied.
	pub fn bind_all<C, S>(
		&self,
		marker: &MarkerKind,
		value: &C,
		sink: &mut S,
	) -> BindResult<BindingReport>
	where
		C: ?Sized,
		S: RegistrationSink<C> + ?Sized,
	{
		let candidates = if self.settings.cache_discovery {
			self.scanner.discover(&self.capability)?
		} else {
			self.scanner.rescan(&self.capability)?
		};
		let expected = sink.expected_value_type();
		let mut report = BindingReport::new(*marker);

		for content_type in candidates.iter().copied() {
			if content_type.is_abstract() && !self.settings.include_abstract {
				continue;
			}

			for marked in match_properties(content_type, marker, expected.as_ref()) {
				let outcome = match marked {
					MarkedProperty::Eligible(found) => self.register(found, value, sink),
					MarkedProperty::WrongValueType { property, expected } => {
						RegistrationOutcome::SkippedWrongValueType {
							target: property.target(),
							expected,
							actual: property.value_type(),
						}
					}
				};

				if !outcome.is_applied() {
					self.diagnostics.emit(marker, &outcome);
				}
				report.push(outcome);
			}
		}

		debug!(
			marker = %marker,
			candidates = candidates.len(),
			applied = report.applied_count(),
			skipped = report.skipped_count(),
			failed = report.failed_count(),
			"binding pass finished"
		);

		if self.settings.strict {
			report.ensure_clean()
		} else {
			Ok(report)
		}
	}

	/// Bind `value` to every property carrying the marker type `M`
	///
	/// # Errors
	///
	/// See [`bind_all`](Self::bind_all).
	pub fn bind_marker<M, C, S>(&self, value: &C, sink: &mut S) -> BindResult<BindingReport>
	where
		M: Marker,
		C: ?Sized,
		S: RegistrationSink<C> + ?Sized,
	{
		self.bind_all(&M::KIND, value, sink)
	}

	fn register<C, S>(&self, found: PropertyMatch, value: &C, sink: &mut S) -> RegistrationOutcome
	where
		C: ?Sized,
		S: RegistrationSink<C> + ?Sized,
	{
		let target = found.target();
		let accessor = found.accessor();

		let result: Result<(), SharedError> = if self.settings.catch_panics {
			match panic::catch_unwind(AssertUnwindSafe(|| sink.register(accessor, value))) {
				Ok(result) => result.map_err(|error| Arc::new(error) as SharedError),
				Err(payload) => {
					Err(Arc::new(SinkPanicked::from_payload(payload.as_ref())) as SharedError)
				}
			}
		} else {
			sink
				.register(accessor, value)
				.map_err(|error| Arc::new(error) as SharedError)
		};

		match result {
			Ok(()) => RegistrationOutcome::Applied { target },
			Err(error) => RegistrationOutcome::FailedHostCall { target, error },
		}
	}
}

impl Binder<LinkedTypeUniverse> {
	/// Binder over the process-wide linked scanner
	pub fn linked() -> Self {
		Self::with_scanner(Scanner::linked())
	}
}

impl<U: TypeUniverse> std::fmt::Debug for Binder<U> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Binder")
			.field("capability", &self.capability)
			.field("settings", &self.settings)
			.finish_non_exhaustive()
	}
}
