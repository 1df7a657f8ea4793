//! Content types derived in a crate that only depends on the facade

use rstest::rstest;
use serial_test::serial;
use std::sync::Arc;
use tinyblog::content::find_content_type;
use tinyblog::prelude::*;
use tinyblog::{ContentTypeDescriptor, LinkedTypeUniverse, TypeUniverse};
use tinyblog_integration_tests::markers::{NarrowEditor, SimpleEditor};

#[derive(ContentType)]
#[content(capability = "page-data", abstract_type)]
pub struct SitePageData {
	#[mark(SimpleEditor)]
	teaser_text: XhtmlString,
}

#[derive(ContentType)]
#[content(capability = "page-data")]
pub struct LandingPage {
	#[content(parent)]
	site: SitePageData,
	#[mark(SimpleEditor, NarrowEditor)]
	#[content(rename = "MainBody")]
	main_body: XhtmlString,
	title: String,
}

fn landing() -> &'static ContentTypeDescriptor {
	LandingPage::descriptor()
}

#[rstest]
fn test_derive_through_facade_builds_descriptor() {
	// Act
	let descriptor = landing();

	// Assert
	assert!(descriptor.is::<LandingPage>());
	assert!(descriptor.has_capability(&Capability::PAGE_DATA));
	assert_eq!(
		descriptor.parent().map(|parent| parent.name()),
		Some("SitePageData")
	);
	let names: Vec<_> = descriptor
		.declared_properties()
		.iter()
		.map(|property| property.name())
		.collect();
	assert_eq!(names, ["MainBody", "title"]);
	assert_eq!(
		descriptor.declared_properties()[0].markers(),
		&[SimpleEditor::KIND, NarrowEditor::KIND]
	);
}

#[rstest]
fn test_facade_binder_registers_marked_properties() {
	// Arrange
	let mut config = EditorConfiguration::new();
	let mut simple = EditorSettings::new();
	simple.toolbar("bold italic").disable_menubar();
	let binder = Binder::new(
		StaticTypeUniverse::new()
			.with::<SitePageData>()
			.with::<LandingPage>(),
	);

	// Act
	let report = binder
		.bind_marker::<SimpleEditor, _, _>(&Arc::new(simple.clone()), &mut config)
		.unwrap();

	// Assert
	assert!(report.is_clean());
	// LandingPage.MainBody, LandingPage.teaser_text, SitePageData.teaser_text
	assert_eq!(report.applied_count(), 3);
	assert_eq!(config.settings_for::<LandingPage>("MainBody").unwrap(), &simple);
	assert!(!config.has_override::<LandingPage>("title"));
}

#[rstest]
#[serial(linked_scanner)]
fn test_facade_derive_registers_with_linked_universe() {
	// Act
	let linked = LinkedTypeUniverse.enumerate().unwrap();

	// Assert
	assert!(linked.iter().any(|descriptor| descriptor.is::<LandingPage>()));
	assert!(linked.iter().any(|descriptor| descriptor.is::<SitePageData>()));
	assert_eq!(
		find_content_type(landing().qualified_name()).map(ContentTypeDescriptor::type_id),
		Some(landing().type_id())
	);
}
