//! Binding against the process-wide linked type universe

use rstest::rstest;
use serial_test::serial;
use std::convert::Infallible;
use std::sync::Arc;
use tinyblog_binder::{BaseCapability, Binder, RegistrationSink, Scanner};
use tinyblog_content::{Accessor, Capability, ContentData, ContentType, ValueType, marker};

marker!(pub LinkedOnly);

#[derive(ContentType)]
#[content(capability = "page-data")]
pub struct LinkedLandingPage {
	#[mark(LinkedOnly)]
	hero: String,
}

#[derive(ContentType)]
#[content(capability = "block-data")]
pub struct LinkedCalloutBlock {
	#[mark(LinkedOnly)]
	callout: String,
}

#[derive(Default)]
struct NameSink(Vec<String>);

impl RegistrationSink<()> for NameSink {
	type Error = Infallible;

	fn expected_value_type(&self) -> Option<ValueType> {
		Some(ValueType::of::<String>())
	}

	fn register(&mut self, accessor: Accessor, _value: &()) -> Result<(), Infallible> {
		self.0.push(accessor.to_string());
		Ok(())
	}
}

#[rstest]
#[serial(linked_scanner)]
fn test_linked_scanner_is_shared() {
	assert!(Arc::ptr_eq(&Scanner::linked(), &Scanner::linked()));
}

#[rstest]
#[serial(linked_scanner)]
fn test_linked_discovery_is_cached() {
	// Arrange
	let scanner = Scanner::linked();
	scanner.clear_cache();
	let capability = BaseCapability::Declares(Capability::PAGE_DATA);

	// Act
	let first = scanner.discover(&capability).unwrap();
	let second = scanner.discover(&capability).unwrap();

	// Assert
	assert!(Arc::ptr_eq(&first, &second));
	assert!(first.contains(&LinkedLandingPage::descriptor()));
	assert!(!first.contains(&LinkedCalloutBlock::descriptor()));
}

#[rstest]
#[serial(linked_scanner)]
fn test_linked_binder_reaches_derived_types() {
	// Arrange
	Scanner::linked().clear_cache();
	let binder = Binder::linked();
	let mut sink = NameSink::default();

	// Act
	let report = binder.bind_marker::<LinkedOnly, _, _>(&(), &mut sink).unwrap();

	// Assert
	assert_eq!(report.applied_count(), 2);
	assert_eq!(
		sink.0,
		vec![
			"LinkedCalloutBlock.callout".to_string(),
			"LinkedLandingPage.hero".to_string()
		]
	);
}
