//! # tinyblog Editor
//!
//! Rich-text editor settings and the per-property configuration registry.
//!
//! - [`XhtmlString`]: value type of rich-text content properties
//! - [`EditorSettings`]: stylesheets, block formats, toolbar, plugins, menu bar and height
//! - [`EditorConfiguration`]: default settings plus per-property overrides;
//!   a [`RegistrationSink`](tinyblog_binder::RegistrationSink) for shared
//!   `Arc<EditorSettings>` values

#![warn(missing_docs)]

pub mod configuration;
pub mod error;
pub mod settings;
pub mod xhtml;

pub use configuration::{EditorConfiguration, PropertyKey};
pub use error::{EditorError, EditorResult};
pub use settings::EditorSettings;
pub use xhtml::XhtmlString;
