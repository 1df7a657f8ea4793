//! Integration test utilities for tinyblog
//!
//! This crate depends on the `tinyblog` facade alone, so derives and
//! registration macros expanded here resolve every path through it.

pub mod markers {
	//! Markers shared by the integration tests

	use tinyblog::marker;

	marker! {
		/// Compact editor for short rich-text fields
		pub SimpleEditor
	}

	marker!(pub NarrowEditor, group = "narrow");
}
