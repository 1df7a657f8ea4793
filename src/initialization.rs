//! Editor initialization
//!
//! [`EditorInitialization`] configures an [`EditorConfiguration`] at startup:
//!
//! 1. default-settings hooks run against the configuration's defaults
//! 2. every registered [`EditorConfigurator`] runs, ordered by `(order, name)`,
//!    followed by configurators added to the builder
//! 3. one binding pass runs per marker override rule; the override settings
//!    are derived from the defaults as they stand after steps 1 and 2
//! 4. the configuration is frozen
//!
//! The steps run on a copy of the configuration, so a failed initialization
//! leaves it as it was.
//!
//! # Examples
//!
//! ```rust
//! use tinyblog::initialization::EditorInitialization;
//! use tinyblog::prelude::*;
//!
//! marker!(pub SimpleEditor);
//!
//! #[derive(ContentType)]
//! #[content(capability = "page-data")]
//! struct StandardPage {
//!     #[mark(SimpleEditor)]
//!     main_body: XhtmlString,
//! }
//!
//! let mut config = EditorConfiguration::new();
//! let report = EditorInitialization::with_universe(StaticTypeUniverse::new().with::<StandardPage>())
//!     .without_registered_configurators()
//!     .default_settings(|settings| {
//!         settings.content_css("/static/css/editor.css");
//!     })
//!     .override_marked::<SimpleEditor, _>(|settings| {
//!         settings.add_plugin("wordcount").height(125);
//!     })
//!     .configure(&mut config)
//!     .unwrap();
//!
//! assert_eq!(report.applied_count(), 1);
//! let main_body = config.settings_for::<StandardPage>("main_body").unwrap();
//! assert_eq!(main_body.content_css_files(), ["/static/css/editor.css"]);
//! assert_eq!(main_body.editor_height(), Some(125));
//! assert!(config.is_frozen());
//! ```

use std::sync::Arc;
use thiserror::Error;
use tinyblog_binder::{
	BaseCapability, BindError, Binder, BinderSettings, BindingReport, DiagnosticSink, Scanner,
};
use tinyblog_content::{LinkedTypeUniverse, Marker, MarkerKind, TypeUniverse};
use tinyblog_editor::{EditorConfiguration, EditorError, EditorResult, EditorSettings};
use tracing::{debug, info};

/// Contributed editor configuration
///
/// Implementations are registered with [`register_configurator!`](crate::register_configurator)
/// or added to an [`EditorInitialization`] directly.
pub trait EditorConfigurator: Send + Sync {
	/// Name used in reports and logs
	fn name(&self) -> &str {
		std::any::type_name::<Self>()
	}

	/// Adjust `config`
	fn configure(&self, config: &mut EditorConfiguration) -> EditorResult<()>;
}

/// A configurator registered at link time
pub struct ConfiguratorRegistration {
	/// Name used in reports and logs
	pub name: &'static str,
	/// Run order, lowest first
	pub order: i32,
	/// Creates the configurator
	pub factory: fn() -> Box<dyn EditorConfigurator>,
}

inventory::collect!(ConfiguratorRegistration);

/// Register an [`EditorConfigurator`] for every [`EditorInitialization`]
///
/// # Example
///
/// ```rust,ignore
/// use tinyblog::register_configurator;
///
/// register_configurator!("site-defaults", || Box::new(SiteDefaults));
/// register_configurator!("campaign-pages", 10, || Box::new(CampaignPages));
/// ```
#[macro_export]
macro_rules! register_configurator {
	($name:expr, $factory:expr) => {
		$crate::register_configurator!($name, 0, $factory);
	};
	($name:expr, $order:expr, $factory:expr) => {
		$crate::inventory::submit! {
			$crate::initialization::ConfiguratorRegistration {
				name: $name,
				order: $order,
				factory: $factory,
			}
		}
	};
}

/// Registered configurators in run order
pub fn registered_configurators() -> Vec<&'static ConfiguratorRegistration> {
	let mut registrations: Vec<_> = inventory::iter::<ConfiguratorRegistration>
		.into_iter()
		.collect();
	registrations.sort_by_key(|registration| (registration.order, registration.name));
	registrations
}

/// Errors aborting an initialization
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum InitializationError {
	/// A binding pass failed
	#[error(transparent)]
	Bind(#[from] BindError),

	/// The default settings could not be changed
	#[error(transparent)]
	Editor(#[from] EditorError),

	/// A configurator failed
	#[error("editor configurator '{name}' failed: {source}")]
	Configurator {
		/// Configurator name
		name: String,
		/// The configurator's error
		#[source]
		source: EditorError,
	},
}

type SettingsHook = Box<dyn Fn(&mut EditorSettings) + Send + Sync>;

enum OverrideSettings {
	Fixed(EditorSettings),
	FromDefault(SettingsHook),
}

struct OverrideRule {
	marker: MarkerKind,
	settings: OverrideSettings,
}

/// Startup configuration of the rich-text editor
pub struct EditorInitialization<U: TypeUniverse = LinkedTypeUniverse> {
	scanner: Arc<Scanner<U>>,
	capability: BaseCapability,
	binder_settings: BinderSettings,
	diagnostics: Option<Arc<dyn DiagnosticSink>>,
	default_hooks: Vec<SettingsHook>,
	configurators: Vec<Box<dyn EditorConfigurator>>,
	use_registered: bool,
	rules: Vec<OverrideRule>,
}

impl EditorInitialization<LinkedTypeUniverse> {
	/// Initialization over every content type linked into the binary
	pub fn new() -> Self {
		Self::with_scanner(Scanner::linked())
	}
}

impl Default for EditorInitialization<LinkedTypeUniverse> {
	fn default() -> Self {
		Self::new()
	}
}

impl<U: TypeUniverse> EditorInitialization<U> {
	/// Initialization over an explicit universe
	pub fn with_universe(universe: U) -> Self {
		Self::with_scanner(Arc::new(Scanner::new(universe)))
	}

	/// Initialization sharing `scanner`
	pub fn with_scanner(scanner: Arc<Scanner<U>>) -> Self {
		Self {
			scanner,
			capability: BaseCapability::default(),
			binder_settings: BinderSettings::default(),
			diagnostics: None,
			default_hooks: Vec::new(),
			configurators: Vec::new(),
			use_registered: true,
			rules: Vec::new(),
		}
	}

	/// Adjust the default settings
	#[must_use]
	pub fn default_settings<F>(mut self, hook: F) -> Self
	where
		F: Fn(&mut EditorSettings) + Send + Sync + 'static,
	{
		self.default_hooks.push(Box::new(hook));
		self
	}

	/// Override properties marked with `M`, starting from the defaults
	#[must_use]
	pub fn override_marked<M, F>(mut self, hook: F) -> Self
	where
		M: Marker,
		F: Fn(&mut EditorSettings) + Send + Sync + 'static,
	{
		self.rules.push(OverrideRule {
			marker: M::KIND,
			settings: OverrideSettings::FromDefault(Box::new(hook)),
		});
		self
	}

	/// Override properties marked with `M` with fixed settings
	#[must_use]
	pub fn override_marked_with<M: Marker>(mut self, settings: EditorSettings) -> Self {
		self.rules.push(OverrideRule {
			marker: M::KIND,
			settings: OverrideSettings::Fixed(settings),
		});
		self
	}

	/// Run `configurator` after the registered ones
	#[must_use]
	pub fn configurator(mut self, configurator: impl EditorConfigurator + 'static) -> Self {
		self.configurators.push(Box::new(configurator));
		self
	}

	/// Skip configurators registered with [`register_configurator!`](crate::register_configurator)
	#[must_use]
	pub fn without_registered_configurators(mut self) -> Self {
		self.use_registered = false;
		self
	}

	/// Candidate capability for the binding passes
	#[must_use]
	pub fn with_capability(mut self, capability: impl Into<BaseCapability>) -> Self {
		self.capability = capability.into();
		self
	}

	/// Settings for the binding passes
	#[must_use]
	pub fn with_binder_settings(mut self, settings: BinderSettings) -> Self {
		self.binder_settings = settings;
		self
	}

	/// Diagnostic sink for the binding passes
	#[must_use]
	pub fn with_diagnostics(mut self, diagnostics: impl DiagnosticSink + 'static) -> Self {
		self.diagnostics = Some(Arc::new(diagnostics));
		self
	}

	fn binder(&self) -> Binder<U> {
		let binder = Binder::with_scanner(Arc::clone(&self.scanner))
			.with_capability(self.capability)
			.with_settings(self.binder_settings);
		match &self.diagnostics {
			Some(diagnostics) => binder.with_diagnostics(Arc::clone(diagnostics)),
			None => binder,
		}
	}

	/// Configure `config` and freeze it
	///
	/// All steps run against a working copy that replaces `config` only once
	/// every step succeeded.
	///
	/// # Errors
	///
	/// Returns [`InitializationError::Configurator`] if a configurator fails,
	/// [`InitializationError::Bind`] if discovery is unavailable or, in
	/// strict mode, a binding pass is incomplete. `config` is left untouched
	/// on error.
	pub fn configure(
		&self,
		config: &mut EditorConfiguration,
	) -> Result<InitializationReport, InitializationError> {
		let mut working = config.clone();
		let report = self.configure_into(&mut working)?;
		*config = working;
		Ok(report)
	}

	fn configure_into(
		&self,
		config: &mut EditorConfiguration,
	) -> Result<InitializationReport, InitializationError> {
		let defaults = config.default_settings_mut()?;
		for hook in &self.default_hooks {
			hook(defaults);
		}

		let mut report = InitializationReport::default();

		if self.use_registered {
			for registration in registered_configurators() {
				let configurator = (registration.factory)();
				run_configurator(registration.name, configurator.as_ref(), config)?;
				report.configurators.push(registration.name.to_string());
			}
		}
		for configurator in &self.configurators {
			run_configurator(configurator.name(), configurator.as_ref(), config)?;
			report.configurators.push(configurator.name().to_string());
		}

		let binder = self.binder();
		for rule in &self.rules {
			let settings = match &rule.settings {
				OverrideSettings::Fixed(settings) => settings.clone(),
				OverrideSettings::FromDefault(hook) => {
					let mut settings = config.default_settings().clone();
					hook(&mut settings);
					settings
				}
			};
			let settings = Arc::new(settings);
			let binding = binder.bind_all(&rule.marker, &settings, config)?;
			info!(
				marker = %rule.marker,
				applied = binding.applied_count(),
				skipped = binding.skipped_count(),
				failed = binding.failed_count(),
				"editor overrides bound"
			);
			report.bindings.push(binding);
		}

		config.freeze();
		info!(
			configurators = report.configurators.len(),
			overrides = config.override_count(),
			"editor configuration initialized"
		);
		Ok(report)
	}
}

fn run_configurator(
	name: &str,
	configurator: &dyn EditorConfigurator,
	config: &mut EditorConfiguration,
) -> Result<(), InitializationError> {
	debug!(configurator = name, "running editor configurator");
	configurator
		.configure(config)
		.map_err(|source| InitializationError::Configurator {
			name: name.to_string(),
			source,
		})
}

/// What an initialization did
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InitializationReport {
	configurators: Vec<String>,
	bindings: Vec<BindingReport>,
}

impl InitializationReport {
	/// Names of the configurators that ran, in order
	pub fn configurators(&self) -> &[String] {
		&self.configurators
	}

	/// One report per override rule, in rule order
	pub fn bindings(&self) -> &[BindingReport] {
		&self.bindings
	}

	/// The first binding report for `marker`
	pub fn binding_for(&self, marker: &MarkerKind) -> Option<&BindingReport> {
		self.bindings.iter().find(|binding| binding.marker() == *marker)
	}

	/// Applied registrations across all passes
	pub fn applied_count(&self) -> usize {
		self.bindings.iter().map(BindingReport::applied_count).sum()
	}

	/// Whether every marked property was applied
	pub fn is_clean(&self) -> bool {
		self.bindings.iter().all(BindingReport::is_clean)
	}
}
