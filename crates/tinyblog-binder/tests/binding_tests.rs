//! Binding pass scenarios over explicit type universes

use rstest::{fixture, rstest};
use std::collections::HashMap;
use std::sync::Arc;
use tinyblog_binder::{
	BaseCapability, BindError, Binder, BinderSettings, CollectedDiagnostics, OutcomeKind,
	RegistrationOutcome, RegistrationSink, SinkPanicked,
};
use tinyblog_content::{
	Accessor, Capability, ContentData, ContentError, ContentResult, ContentType,
	ContentTypeDescriptor, Marker, StaticTypeUniverse, TypeUniverse, ValueType, marker,
};

marker!(pub Compact);
marker!(pub Unused);

#[derive(ContentType, Default)]
#[content(capability = "page-data")]
pub struct PageA {
	#[mark(Compact)]
	body: String,
}

#[derive(ContentType, Default)]
#[content(capability = "page-data")]
pub struct PageB {
	#[mark(Compact)]
	summary: i64,
}

#[derive(ContentType, Default)]
#[content(capability = "page-data")]
pub struct PageC {
	title: String,
}

#[derive(ContentType, Default)]
#[content(capability = "page-data")]
pub struct PageD {
	#[mark(Compact)]
	intro: String,
	#[mark(Compact)]
	outro: String,
}

#[derive(ContentType, Default)]
#[content(capability = "block-data")]
pub struct QuoteBlock {
	#[mark(Compact)]
	text: String,
}

#[derive(ContentType, Default)]
#[content(capability = "page-data", abstract_type)]
pub struct BasePage {
	#[mark(Compact)]
	teaser: String,
}

#[derive(ContentType, Default)]
pub struct ArticlePage {
	#[content(parent)]
	base: BasePage,
	#[mark(Compact)]
	main_body: String,
}

#[derive(Debug, thiserror::Error)]
#[error("host rejected {0}")]
struct HostError(String);

/// Records every registration it receives
#[derive(Default)]
struct RecordingSink {
	expected: Option<ValueType>,
	fail_for: Option<&'static str>,
	panic_for: Option<&'static str>,
	calls: Vec<String>,
	accessors: Vec<Accessor>,
}

impl RecordingSink {
	fn text_only() -> Self {
		Self {
			expected: Some(ValueType::of::<String>()),
			..Self::default()
		}
	}

	fn calls_per_property(&self) -> HashMap<&str, usize> {
		let mut counts = HashMap::new();
		for call in &self.calls {
			*counts.entry(call.as_str()).or_insert(0) += 1;
		}
		counts
	}
}

impl RegistrationSink<Arc<String>> for RecordingSink {
	type Error = HostError;

	fn expected_value_type(&self) -> Option<ValueType> {
		self.expected
	}

	fn register(&mut self, accessor: Accessor, value: &Arc<String>) -> Result<(), HostError> {
		let call = accessor.to_string();
		if self.panic_for == Some(call.as_str()) {
			panic!("sink exploded on {}", call);
		}
		if self.fail_for == Some(call.as_str()) {
			return Err(HostError(format!("{} = {}", call, value)));
		}
		self.calls.push(call);
		self.accessors.push(accessor);
		Ok(())
	}
}

struct UnavailableUniverse;

impl TypeUniverse for UnavailableUniverse {
	fn enumerate(&self) -> ContentResult<Vec<&'static ContentTypeDescriptor>> {
		Err(ContentError::DiscoveryUnavailable("module set is sealed".to_string()))
	}
}

#[fixture]
fn universe() -> StaticTypeUniverse {
	StaticTypeUniverse::new()
		.with::<PageC>()
		.with::<PageB>()
		.with::<PageA>()
		.with::<QuoteBlock>()
		.with::<PageA>()
}

#[fixture]
fn value() -> Arc<String> {
	Arc::new("compact-settings".to_string())
}

fn page_binder(universe: StaticTypeUniverse) -> Binder<StaticTypeUniverse> {
	Binder::new(universe).with_capability(Capability::PAGE_DATA)
}

#[rstest]
fn test_scenario_applied_skipped_and_unmarked(universe: StaticTypeUniverse, value: Arc<String>) {
	// Arrange
	let binder = page_binder(universe);
	let mut sink = RecordingSink::text_only();

	// Act
	let report = binder.bind_marker::<Compact, _, _>(&value, &mut sink).unwrap();

	// Assert
	assert_eq!(report.len(), 2);
	assert_eq!(
		report.outcome_for("PageA", "body").map(|o| o.kind()),
		Some(OutcomeKind::Applied)
	);
	match report.outcome_for("PageB", "summary") {
		Some(RegistrationOutcome::SkippedWrongValueType {
			expected, actual, ..
		}) => {
			assert!(expected.is::<String>());
			assert!(actual.is::<i64>());
		}
		other => panic!("unexpected outcome for PageB.summary: {:?}", other),
	}
	assert!(report.outcomes().iter().all(|o| !o.target().content_type.ends_with("PageC")));
	assert_eq!(sink.calls, vec!["PageA.body".to_string()]);
}

#[rstest]
fn test_types_without_capability_are_never_registered(
	universe: StaticTypeUniverse,
	value: Arc<String>,
) {
	// Arrange
	let binder = page_binder(universe.clone());
	let mut sink = RecordingSink::default();

	// Act
	binder.bind_marker::<Compact, _, _>(&value, &mut sink).unwrap();

	// Assert
	assert!(!sink.calls.iter().any(|call| call.starts_with("QuoteBlock")));

	// The block is picked up once its capability is requested
	let mut sink = RecordingSink::default();
	Binder::new(universe)
		.with_capability(Capability::BLOCK_DATA)
		.bind_marker::<Compact, _, _>(&value, &mut sink)
		.unwrap();
	assert_eq!(sink.calls, vec!["QuoteBlock.text".to_string()]);
}

#[rstest]
fn test_duplicate_types_register_once(universe: StaticTypeUniverse, value: Arc<String>) {
	// Arrange
	let binder = page_binder(universe);
	let mut sink = RecordingSink::text_only();

	// Act
	binder.bind_marker::<Compact, _, _>(&value, &mut sink).unwrap();

	// Assert
	assert_eq!(sink.calls_per_property().get("PageA.body"), Some(&1));
}

#[rstest]
fn test_failing_registration_does_not_stop_the_pass(value: Arc<String>) {
	// Arrange
	let universe = StaticTypeUniverse::new().with::<PageA>().with::<PageD>();
	let diagnostics = Arc::new(CollectedDiagnostics::new());
	let binder = page_binder(universe).with_diagnostics(Arc::clone(&diagnostics));
	let mut sink = RecordingSink {
		fail_for: Some("PageA.body"),
		..RecordingSink::text_only()
	};

	// Act
	let report = binder.bind_marker::<Compact, _, _>(&value, &mut sink).unwrap();

	// Assert
	match report.outcome_for("PageA", "body") {
		Some(RegistrationOutcome::FailedHostCall { error, .. }) => {
			assert_eq!(error.to_string(), "host rejected PageA.body = compact-settings");
		}
		other => panic!("unexpected outcome for PageA.body: {:?}", other),
	}
	assert_eq!(report.applied_count(), 2);
	assert_eq!(sink.calls, vec!["PageD.intro".to_string(), "PageD.outro".to_string()]);

	let events = diagnostics.events();
	assert_eq!(events.len(), 1);
	assert_eq!(events[0].0, Compact::KIND);
	assert_eq!(events[0].1.kind(), OutcomeKind::FailedHostCall);
}

#[rstest]
fn test_sink_panic_is_recorded_as_failure(value: Arc<String>) {
	// Arrange
	let universe = StaticTypeUniverse::new().with::<PageA>().with::<PageD>();
	let binder = page_binder(universe);
	let mut sink = RecordingSink {
		panic_for: Some("PageD.intro"),
		..RecordingSink::default()
	};

	// Act
	let report = binder.bind_marker::<Compact, _, _>(&value, &mut sink).unwrap();

	// Assert
	match report.outcome_for("PageD", "intro") {
		Some(RegistrationOutcome::FailedHostCall { error, .. }) => {
			let panicked = error.downcast_ref::<SinkPanicked>().unwrap();
			assert_eq!(panicked.0, "sink exploded on PageD.intro");
		}
		other => panic!("unexpected outcome for PageD.intro: {:?}", other),
	}
	assert_eq!(sink.calls, vec!["PageA.body".to_string(), "PageD.outro".to_string()]);
}

#[rstest]
#[should_panic(expected = "sink exploded on PageA.body")]
fn test_sink_panic_propagates_when_not_caught(value: Arc<String>) {
	let binder = page_binder(StaticTypeUniverse::new().with::<PageA>())
		.with_settings(BinderSettings::default().with_catch_panics(false));
	let mut sink = RecordingSink {
		panic_for: Some("PageA.body"),
		..RecordingSink::default()
	};

	let _ = binder.bind_marker::<Compact, _, _>(&value, &mut sink);
}

#[rstest]
fn test_discovery_unavailable_aborts_without_registering(value: Arc<String>) {
	// Arrange
	let binder = Binder::new(UnavailableUniverse);
	let mut sink = RecordingSink::default();

	// Act
	let result = binder.bind_marker::<Compact, _, _>(&value, &mut sink);

	// Assert
	assert!(matches!(
		result,
		Err(BindError::DiscoveryUnavailable(ref reason)) if reason == "module set is sealed"
	));
	assert!(sink.calls.is_empty());
}

#[rstest]
fn test_rerun_produces_identical_outcomes(universe: StaticTypeUniverse, value: Arc<String>) {
	// Arrange
	let binder = page_binder(universe);
	let mut first_sink = RecordingSink {
		fail_for: Some("PageA.body"),
		..RecordingSink::text_only()
	};
	let mut second_sink = RecordingSink {
		fail_for: Some("PageA.body"),
		..RecordingSink::text_only()
	};

	// Act
	let first = binder.bind_marker::<Compact, _, _>(&value, &mut first_sink).unwrap();
	let second = binder.bind_marker::<Compact, _, _>(&value, &mut second_sink).unwrap();

	// Assert
	assert_eq!(first, second);
	assert_eq!(first_sink.calls, second_sink.calls);
}

#[rstest]
fn test_unused_marker_yields_empty_report(universe: StaticTypeUniverse, value: Arc<String>) {
	let binder = page_binder(universe);
	let mut sink = RecordingSink::default();

	let report = binder.bind_marker::<Unused, _, _>(&value, &mut sink).unwrap();

	assert!(report.is_empty());
	assert_eq!(report.marker(), Unused::KIND);
	assert!(sink.calls.is_empty());
}

#[rstest]
#[case::abstract_included(true, vec!["ArticlePage.main_body", "ArticlePage.teaser", "BasePage.teaser"])]
#[case::abstract_excluded(false, vec!["ArticlePage.main_body", "ArticlePage.teaser"])]
fn test_inherited_properties_and_abstract_types(
	#[case] include_abstract: bool,
	#[case] expected: Vec<&str>,
	value: Arc<String>,
) {
	// Arrange
	let universe = StaticTypeUniverse::new()
		.with::<ArticlePage>()
		.with::<BasePage>();
	let binder = page_binder(universe)
		.with_settings(BinderSettings::default().with_include_abstract(include_abstract));
	let mut sink = RecordingSink::text_only();

	// Act
	let report = binder.bind_marker::<Compact, _, _>(&value, &mut sink).unwrap();

	// Assert
	assert_eq!(sink.calls, expected);
	let teaser = report.outcome_for("ArticlePage", "teaser").unwrap().target();
	assert!(teaser.is_inherited());
	assert_eq!(teaser.declared_in, BasePage::descriptor().qualified_name());
}

#[rstest]
fn test_registered_accessors_replay_against_instances(value: Arc<String>) {
	// Arrange
	let universe = StaticTypeUniverse::new().with::<ArticlePage>();
	let binder = page_binder(universe);
	let mut sink = RecordingSink::text_only();
	let page = ArticlePage {
		base: BasePage {
			teaser: "Short teaser".to_string(),
		},
		main_body: "<p>Long body</p>".to_string(),
	};

	// Act
	binder.bind_marker::<Compact, _, _>(&value, &mut sink).unwrap();

	// Assert
	let read: Vec<_> = sink
		.accessors
		.iter()
		.map(|accessor| accessor.read_as::<String>(&page).cloned())
		.collect();
	assert_eq!(
		read,
		vec![
			Some("<p>Long body</p>".to_string()),
			Some("Short teaser".to_string())
		]
	);
}

#[rstest]
fn test_strict_mode_turns_skips_into_error(universe: StaticTypeUniverse, value: Arc<String>) {
	// Arrange
	let binder = page_binder(universe)
		.with_settings(BinderSettings::default().with_strict(true));
	let mut sink = RecordingSink::text_only();

	// Act
	let result = binder.bind_marker::<Compact, _, _>(&value, &mut sink);

	// Assert
	assert!(matches!(
		result,
		Err(BindError::Incomplete {
			skipped: 1,
			failed: 0,
			..
		})
	));
	// Applied registrations are kept by the sink
	assert_eq!(sink.calls, vec!["PageA.body".to_string()]);
}

#[rstest]
fn test_derives_from_capability(value: Arc<String>) {
	// Arrange
	let universe = StaticTypeUniverse::new()
		.with::<ArticlePage>()
		.with::<BasePage>()
		.with::<PageA>();
	let binder = Binder::new(universe).with_capability(BaseCapability::derives_from::<BasePage>());
	let mut sink = RecordingSink::text_only();

	// Act
	binder.bind_marker::<Compact, _, _>(&value, &mut sink).unwrap();

	// Assert
	assert!(!sink.calls.contains(&"PageA.body".to_string()));
	assert!(sink.calls.contains(&"ArticlePage.main_body".to_string()));
}

#[rstest]
fn test_uncached_discovery_leaves_cache_empty(universe: StaticTypeUniverse, value: Arc<String>) {
	let binder = page_binder(universe)
		.with_settings(BinderSettings::default().with_cache_discovery(false));
	let mut sink = RecordingSink::default();

	binder.bind_marker::<Compact, _, _>(&value, &mut sink).unwrap();

	assert!(!binder.scanner().is_cached(&binder.capability()));
}

fn first_local_page() -> &'static ContentTypeDescriptor {
	#[derive(ContentType)]
	#[content(capability = "page-data")]
	struct LocalPage {
		#[mark(Compact)]
		body: String,
	}

	LocalPage::descriptor()
}

fn second_local_page() -> &'static ContentTypeDescriptor {
	#[derive(ContentType)]
	#[content(capability = "page-data")]
	struct LocalPage {
		#[mark(Compact)]
		body: String,
	}

	LocalPage::descriptor()
}

#[rstest]
fn test_same_named_local_types_are_bound_separately(value: Arc<String>) {
	// Arrange
	let first = first_local_page();
	let second = second_local_page();
	let universe: StaticTypeUniverse = [first, second, first].into_iter().collect();
	let binder = Binder::new(universe);
	let mut sink = RecordingSink::text_only();

	// Act
	let report = binder.bind_marker::<Compact, _, _>(&value, &mut sink).unwrap();

	// Assert
	assert_eq!(first.qualified_name(), second.qualified_name());
	assert_ne!(first, second);
	assert_eq!(report.applied_count(), 2);
	assert_eq!(sink.calls, vec!["LocalPage.body", "LocalPage.body"]);
	let mut type_ids: Vec<_> = sink
		.accessors
		.iter()
		.map(|accessor| accessor.content_type().type_id())
		.collect();
	type_ids.dedup();
	assert_eq!(type_ids.len(), 2);
}
