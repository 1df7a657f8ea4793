//! Editor settings
//!
//! [`EditorSettings`] is a plain cloneable value. Setters take `&mut self`
//! and return `&mut Self` so a settings object borrowed from an
//! [`EditorConfiguration`](crate::EditorConfiguration) can be extended in
//! one chain.
//!
//! List-valued settings accept whitespace separated names, the way the
//! editor itself spells them (`"wordcount code"`).
//!
//! # Examples
//!
//! ```rust
//! use tinyblog_editor::EditorSettings;
//!
//! let mut settings = EditorSettings::default();
//! settings
//!     .toolbar("bold italic")
//!     .add_plugin("wordcount code")
//!     .append_toolbar("code")
//!     .remove_plugin("wordcount")
//!     .height(125);
//!
//! assert_eq!(settings.toolbar_items(), ["bold", "italic", "code"]);
//! assert_eq!(settings.plugins(), ["code"]);
//! assert_eq!(settings.editor_height(), Some(125));
//! ```

/// Settings of one rich-text editor instance
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditorSettings {
	content_css: Vec<String>,
	block_formats: Option<String>,
	toolbar: Vec<String>,
	plugins: Vec<String>,
	menubar: Option<bool>,
	height: Option<u32>,
}

fn words(list: &str) -> impl Iterator<Item = &str> {
	list.split_whitespace()
}

impl EditorSettings {
	/// Empty settings
	pub fn new() -> Self {
		Self::default()
	}

	/// Replace the content stylesheets with a comma separated list
	pub fn content_css(&mut self, stylesheets: &str) -> &mut Self {
		self.content_css = stylesheets
			.split(',')
			.map(str::trim)
			.filter(|css| !css.is_empty())
			.map(str::to_string)
			.collect();
		self
	}

	/// Set the block format list (`"Paragraph=p;Header 1=h1"`)
	pub fn block_formats(&mut self, formats: &str) -> &mut Self {
		self.block_formats = Some(formats.to_string());
		self
	}

	/// Replace the toolbar
	pub fn toolbar(&mut self, items: &str) -> &mut Self {
		self.toolbar = words(items).map(str::to_string).collect();
		self
	}

	/// Append items to the toolbar
	pub fn append_toolbar(&mut self, items: &str) -> &mut Self {
		self.toolbar.extend(words(items).map(str::to_string));
		self
	}

	/// Add plugins, keeping existing ones and their order
	pub fn add_plugin(&mut self, plugins: &str) -> &mut Self {
		for plugin in words(plugins) {
			if !self.has_plugin(plugin) {
				self.plugins.push(plugin.to_string());
			}
		}
		self
	}

	/// Remove plugins
	pub fn remove_plugin(&mut self, plugins: &str) -> &mut Self {
		let removed: Vec<&str> = words(plugins).collect();
		self.plugins.retain(|plugin| !removed.contains(&plugin.as_str()));
		self
	}

	/// Hide the menu bar
	pub fn disable_menubar(&mut self) -> &mut Self {
		self.menubar = Some(false);
		self
	}

	/// Show the menu bar
	pub fn enable_menubar(&mut self) -> &mut Self {
		self.menubar = Some(true);
		self
	}

	/// Set the editor height in pixels
	pub fn height(&mut self, pixels: u32) -> &mut Self {
		self.height = Some(pixels);
		self
	}

	/// Content stylesheets
	pub fn content_css_files(&self) -> &[String] {
		&self.content_css
	}

	/// Raw block format list
	pub fn block_format_spec(&self) -> Option<&str> {
		self.block_formats.as_deref()
	}

	/// Block formats as `(label, element)` pairs
	///
	/// Entries without `=` are ignored.
	pub fn block_format_entries(&self) -> Vec<(&str, &str)> {
		self.block_formats
			.as_deref()
			.map(|formats| {
				formats
					.split(';')
					.filter_map(|entry| entry.split_once('='))
					.map(|(label, element)| (label.trim(), element.trim()))
					.collect()
			})
			.unwrap_or_default()
	}

	/// Toolbar items in order
	pub fn toolbar_items(&self) -> &[String] {
		&self.toolbar
	}

	/// Enabled plugins in order
	pub fn plugins(&self) -> &[String] {
		&self.plugins
	}

	/// Whether `plugin` is enabled
	pub fn has_plugin(&self, plugin: &str) -> bool {
		self.plugins.iter().any(|enabled| enabled == plugin)
	}

	/// Whether the menu bar is shown, `None` if never set
	pub fn menubar_enabled(&self) -> Option<bool> {
		self.menubar
	}

	/// Editor height in pixels, if set
	pub fn editor_height(&self) -> Option<u32> {
		self.height
	}
}
