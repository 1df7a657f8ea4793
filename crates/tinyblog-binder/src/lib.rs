//! # tinyblog Binder
//!
//! Marker-driven configuration binding for tinyblog content types.
//!
//! Given a marker kind and a configuration value, the binder finds every
//! property in the type universe that carries the marker and registers the
//! value for that (content type, property) pair with a host
//! [`RegistrationSink`].
//!
//! ## Components
//!
//! - [`Scanner`]: enumerates the [`TypeUniverse`](tinyblog_content::TypeUniverse)
//!   and filters by [`BaseCapability`], memoized per capability
//! - [`match_properties`]: own and inherited properties carrying a marker
//! - [`Binder`]: drives the pass and collects a [`BindingReport`]
//! - [`DiagnosticSink`]: receives every outcome that was not applied
//!
//! ## Outcomes
//!
//! A pass never stops on a single property. Each marked property yields one
//! [`RegistrationOutcome`]:
//!
//! - `Applied`: the sink accepted the registration
//! - `SkippedWrongValueType`: the sink does not accept the property's value type
//! - `FailedHostCall`: the sink returned an error or panicked
//!
//! Only [`BindError::DiscoveryUnavailable`] aborts a pass. In strict mode a
//! report with skipped or failed properties becomes [`BindError::Incomplete`].

#![warn(missing_docs)]

pub mod binder;
pub mod capability;
pub mod diagnostics;
pub mod error;
pub mod matcher;
pub mod outcome;
pub mod scanner;
pub mod settings;
pub mod sink;

pub use binder::Binder;
pub use capability::BaseCapability;
pub use diagnostics::{CollectedDiagnostics, DiagnosticSink, SilentDiagnostics, TracingDiagnostics};
pub use error::{BindError, BindResult, SinkPanicked};
pub use matcher::{MarkedProperty, PropertyMatch, match_properties};
pub use outcome::{
	BindingReport, OutcomeKind, PropertyTarget, RegistrationOutcome, SharedError,
};
pub use scanner::{Candidates, Scanner};
pub use settings::BinderSettings;
pub use sink::RegistrationSink;
