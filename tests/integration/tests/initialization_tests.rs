//! End-to-end editor initialization

use rstest::rstest;
use serial_test::serial;
use std::sync::Arc;
use tinyblog::binder::{CollectedDiagnostics, SilentDiagnostics};
use tinyblog::editor::{EditorError, EditorResult};
use tinyblog::initialization::{
	EditorConfigurator, EditorInitialization, InitializationError, registered_configurators,
};
use tinyblog::prelude::*;
use tinyblog::register_configurator;
use tinyblog_integration_tests::markers::{NarrowEditor, SimpleEditor};

#[derive(ContentType)]
#[content(capability = "page-data", abstract_type)]
pub struct SitePageData {
	#[mark(SimpleEditor)]
	teaser_text: XhtmlString,
}

#[derive(ContentType)]
#[content(capability = "page-data")]
pub struct StandardPage {
	#[content(parent)]
	site: SitePageData,
	#[mark(SimpleEditor)]
	main_body: XhtmlString,
	#[mark(SimpleEditor)]
	heading: String,
}

#[derive(ContentType)]
#[content(capability = "page-data")]
pub struct ArticlePage {
	#[content(parent)]
	site: SitePageData,
	main_body: XhtmlString,
	#[mark(NarrowEditor)]
	sidebar: XhtmlString,
}

#[derive(ContentType)]
#[content(capability = "block-data")]
pub struct EditorialBlock {
	main_body: XhtmlString,
}

/// Per-type settings, the way a site would contribute them
struct SiteConfigurator;

impl EditorConfigurator for SiteConfigurator {
	fn name(&self) -> &str {
		"site"
	}

	fn configure(&self, config: &mut EditorConfiguration) -> EditorResult<()> {
		config
			.for_property::<ArticlePage>("main_body")?
			.block_formats("Paragraph=p;Header 1=h1;Header 2=h2;Header 3=h3");

		let empty = config.empty();
		config
			.for_property_with::<EditorialBlock>("main_body", empty)?
			.disable_menubar()
			.toolbar("bold italic underline strikethrough");
		Ok(())
	}
}

struct BrokenConfigurator;

impl EditorConfigurator for BrokenConfigurator {
	fn configure(&self, config: &mut EditorConfiguration) -> EditorResult<()> {
		config.for_property::<StandardPage>("heading")?;
		Ok(())
	}
}

struct LinkedDefaults;

impl EditorConfigurator for LinkedDefaults {
	fn configure(&self, config: &mut EditorConfiguration) -> EditorResult<()> {
		config.default_settings_mut()?.height(400);
		Ok(())
	}
}

fn linked_defaults() -> Box<dyn EditorConfigurator> {
	Box::new(LinkedDefaults)
}

fn late_linked_defaults() -> Box<dyn EditorConfigurator> {
	Box::new(LinkedDefaults)
}

register_configurator!("linked-defaults", linked_defaults);
register_configurator!("late-linked-defaults", 10, late_linked_defaults);

fn universe() -> StaticTypeUniverse {
	StaticTypeUniverse::new()
		.with::<SitePageData>()
		.with::<StandardPage>()
		.with::<ArticlePage>()
		.with::<EditorialBlock>()
}

fn site_initialization() -> EditorInitialization<StaticTypeUniverse> {
	EditorInitialization::with_universe(universe())
		.without_registered_configurators()
		.default_settings(|settings| {
			settings
				.content_css("/static/css/editor.css")
				.add_plugin("lists image epi-image-editor")
				.toolbar("bold italic | image");
		})
		.configurator(SiteConfigurator)
		.override_marked::<SimpleEditor, _>(|settings| {
			settings
				.add_plugin("wordcount code")
				.append_toolbar("code")
				.remove_plugin("image")
				.remove_plugin("epi-image-editor")
				.height(125);
		})
}

#[rstest]
fn test_site_initialization() {
	// Arrange
	let mut config = EditorConfiguration::new();
	let diagnostics = Arc::new(CollectedDiagnostics::new());

	// Act
	let report = site_initialization()
		.with_diagnostics(Arc::clone(&diagnostics))
		.configure(&mut config)
		.unwrap();

	// Assert
	assert_eq!(report.configurators(), ["site"]);
	let simple = report.binding_for(&SimpleEditor::KIND).unwrap();
	// StandardPage.main_body, StandardPage.teaser_text, SitePageData.teaser_text, ArticlePage.teaser_text
	assert_eq!(simple.applied_count(), 4);
	assert_eq!(simple.skipped_count(), 1);
	assert_eq!(diagnostics.len(), 1);
	assert!(config.is_frozen());

	let page_body = config.settings_for::<StandardPage>("main_body").unwrap();
	assert_eq!(page_body.content_css_files(), ["/static/css/editor.css"]);
	assert_eq!(page_body.plugins(), ["lists", "wordcount", "code"]);
	assert_eq!(page_body.toolbar_items(), ["bold", "italic", "|", "image", "code"]);
	assert_eq!(page_body.editor_height(), Some(125));

	let teaser = config.settings_for::<ArticlePage>("teaser_text").unwrap();
	assert_eq!(teaser, page_body);

	let article_body = config.settings_for::<ArticlePage>("main_body").unwrap();
	assert_eq!(article_body.block_format_entries().len(), 4);
	assert!(article_body.has_plugin("image"));

	let block_body = config.settings_for::<EditorialBlock>("main_body").unwrap();
	assert!(block_body.content_css_files().is_empty());
	assert_eq!(block_body.menubar_enabled(), Some(false));
	assert_eq!(
		block_body.toolbar_items(),
		["bold", "italic", "underline", "strikethrough"]
	);
}

#[rstest]
fn test_grouped_marker_binds_fixed_settings() {
	// Arrange
	let mut narrow = EditorSettings::new();
	narrow.height(80).disable_menubar();
	let mut config = EditorConfiguration::new();

	// Act
	let report = EditorInitialization::with_universe(universe())
		.without_registered_configurators()
		.override_marked_with::<NarrowEditor>(narrow.clone())
		.configure(&mut config)
		.unwrap();

	// Assert
	assert_eq!(report.applied_count(), 1);
	assert!(report.binding_for(&SimpleEditor::KIND).is_none());
	assert_eq!(config.settings_for::<ArticlePage>("sidebar").unwrap(), &narrow);
	assert!(!config.has_override::<StandardPage>("main_body"));
}

#[rstest]
fn test_strict_mode_rejects_misapplied_marker() {
	// Arrange
	let mut config = EditorConfiguration::new();

	// Act
	let result = site_initialization()
		.with_binder_settings(BinderSettings::default().with_strict(true))
		.with_diagnostics(SilentDiagnostics)
		.configure(&mut config);

	// Assert
	assert!(matches!(
		result,
		Err(InitializationError::Bind(BindError::Incomplete { skipped: 1, .. }))
	));
	assert!(!config.is_frozen());
}

#[rstest]
fn test_failing_configurator_aborts() {
	let mut config = EditorConfiguration::new();

	let result = EditorInitialization::with_universe(universe())
		.without_registered_configurators()
		.configurator(BrokenConfigurator)
		.configure(&mut config);

	match result {
		Err(InitializationError::Configurator { name, source }) => {
			assert!(name.ends_with("BrokenConfigurator"));
			assert!(matches!(source, EditorError::NotRichText { .. }));
		}
		other => panic!("unexpected result: {:?}", other.map(|r| r.applied_count())),
	}
}

#[rstest]
fn test_failed_initialization_leaves_configuration_untouched() {
	// Arrange
	let mut config = EditorConfiguration::new();
	let initialization = |broken: bool| {
		let initialization = EditorInitialization::with_universe(universe())
			.without_registered_configurators()
			.default_settings(|settings| {
				settings.append_toolbar("code");
			})
			.override_marked::<SimpleEditor, _>(|settings| {
				settings.height(125);
			});
		if broken {
			initialization.configurator(BrokenConfigurator)
		} else {
			initialization
		}
	};

	// Act
	let failed = initialization(true).configure(&mut config);

	// Assert
	assert!(matches!(failed, Err(InitializationError::Configurator { .. })));
	assert!(config.default_settings().toolbar_items().is_empty());
	assert_eq!(config.override_count(), 0);
	assert!(!config.is_frozen());

	// Act
	initialization(false).configure(&mut config).unwrap();

	// Assert
	assert_eq!(config.default_settings().toolbar_items(), ["code"]);
	let page_body = config.settings_for::<StandardPage>("main_body").unwrap();
	assert_eq!(page_body.toolbar_items(), ["code"]);
	assert!(config.is_frozen());
}

#[rstest]
fn test_failed_strict_binding_registers_no_overrides() {
	// Arrange
	let mut config = EditorConfiguration::new();

	// Act
	let result = site_initialization()
		.with_binder_settings(BinderSettings::default().with_strict(true))
		.with_diagnostics(SilentDiagnostics)
		.configure(&mut config);

	// Assert
	assert!(result.is_err());
	assert_eq!(config.override_count(), 0);
	assert_eq!(config.default_settings(), &EditorSettings::new());
}

#[rstest]
fn test_frozen_configuration_cannot_be_initialized_again() {
	let mut config = EditorConfiguration::new();
	site_initialization().configure(&mut config).unwrap();

	let result = site_initialization().configure(&mut config);

	assert!(matches!(
		result,
		Err(InitializationError::Editor(EditorError::Frozen(_)))
	));
}

#[rstest]
fn test_registered_configurators_run_in_order() {
	// Act
	let names: Vec<_> = registered_configurators()
		.iter()
		.map(|registration| registration.name)
		.collect();

	// Assert
	assert_eq!(names, vec!["linked-defaults", "late-linked-defaults"]);
}

#[rstest]
#[serial(linked_scanner)]
fn test_linked_initialization_runs_registered_configurators() {
	// Arrange
	tinyblog::Scanner::linked().clear_cache();
	let mut config = EditorConfiguration::new();

	// Act
	let report = EditorInitialization::new()
		.with_capability(Capability::PAGE_DATA)
		.override_marked::<SimpleEditor, _>(|settings| {
			settings.add_plugin("wordcount");
		})
		.with_diagnostics(SilentDiagnostics)
		.configure(&mut config)
		.unwrap();

	// Assert
	assert_eq!(
		report.configurators(),
		["linked-defaults", "late-linked-defaults"]
	);
	let page_body = config.settings_for::<StandardPage>("main_body").unwrap();
	assert_eq!(page_body.editor_height(), Some(400));
	assert!(page_body.has_plugin("wordcount"));
	assert!(!config.has_override::<EditorialBlock>("main_body"));
}
