//! Configuration types for gouml.
//!
//! This module provides configuration structures that control which Go files
//! are loaded and how the class diagram is rendered. All types implement
//! [`serde::Deserialize`] for flexible loading from external sources.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level application configuration combining source and render settings.
//! - [`SourceConfig`] - Controls directory traversal and test-file filtering.
//! - [`RenderConfig`] - Controls ordering and which member groups are printed.
//!
//! # Example
//!
//! ```
//! # use gouml::config::{AppConfig, Ordering};
//! // Use default configuration
//! let config = AppConfig::default();
//! assert!(!config.source().recursive());
//! assert_eq!(config.source().test_suffix(), "_test.go");
//! assert_eq!(config.render().ordering(), Ordering::Declaration);
//! ```

use serde::Deserialize;

/// Suffix of Go test files, which never contribute to the diagram.
pub const DEFAULT_TEST_SUFFIX: &str = "_test.go";

/// Directory names skipped while walking unless the config says otherwise.
pub const DEFAULT_IGNORE: &[&str] = &["vendor"];

/// Top-level application configuration combining source and render settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Source loading configuration section.
    #[serde(default)]
    source: SourceConfig,

    /// Rendering configuration section.
    #[serde(default)]
    render: RenderConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] with the specified source and render configurations.
    pub fn new(source: SourceConfig, render: RenderConfig) -> Self {
        Self { source, render }
    }

    /// Returns the source loading configuration.
    pub fn source(&self) -> &SourceConfig {
        &self.source
    }

    /// Returns the rendering configuration.
    pub fn render(&self) -> &RenderConfig {
        &self.render
    }

    /// Returns a mutable reference to the source configuration, for command
    /// line overrides.
    pub fn source_mut(&mut self) -> &mut SourceConfig {
        &mut self.source
    }
}

/// Directory traversal and file filtering settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// Walk subdirectories instead of only the top level.
    recursive: bool,

    /// Files whose name ends with this suffix are skipped.
    test_suffix: String,

    /// Directory names skipped while walking.
    ignore: Vec<String>,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            recursive: false,
            test_suffix: DEFAULT_TEST_SUFFIX.to_string(),
            ignore: DEFAULT_IGNORE.iter().map(|name| name.to_string()).collect(),
        }
    }
}

impl SourceConfig {
    pub fn recursive(&self) -> bool {
        self.recursive
    }

    pub fn test_suffix(&self) -> &str {
        &self.test_suffix
    }

    pub fn ignore(&self) -> &[String] {
        &self.ignore
    }

    pub fn set_recursive(&mut self, recursive: bool) {
        self.recursive = recursive;
    }

    pub fn with_recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    pub fn with_test_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.test_suffix = suffix.into();
        self
    }

    pub fn with_ignore(mut self, names: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.ignore = names.into_iter().map(Into::into).collect();
        self
    }

    /// Returns `true` if a file with this name is a test file.
    ///
    /// An empty suffix disables test filtering.
    pub fn is_test_file(&self, file_name: &str) -> bool {
        !self.test_suffix.is_empty() && file_name.ends_with(&self.test_suffix)
    }

    /// Returns `true` if a directory with this name is skipped.
    pub fn is_ignored_dir(&self, dir_name: &str) -> bool {
        self.ignore.iter().any(|ignored| ignored == dir_name)
    }
}

/// Order in which namespaces and types are printed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Ordering {
    /// The order types were first seen in the sources.
    #[default]
    Declaration,
    /// Sorted by name.
    Alphabetical,
}

/// Diagram rendering settings.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    ordering: Ordering,

    /// Omit both field groups.
    hide_fields: bool,

    /// Omit both method groups.
    hide_methods: bool,
}

impl RenderConfig {
    pub fn ordering(&self) -> Ordering {
        self.ordering
    }

    pub fn hide_fields(&self) -> bool {
        self.hide_fields
    }

    pub fn hide_methods(&self) -> bool {
        self.hide_methods
    }

    pub fn with_ordering(mut self, ordering: Ordering) -> Self {
        self.ordering = ordering;
        self
    }

    pub fn with_hide_fields(mut self, hide: bool) -> Self {
        self.hide_fields = hide;
        self
    }

    pub fn with_hide_methods(mut self, hide: bool) -> Self {
        self.hide_methods = hide;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_full_config() {
        let config: AppConfig = toml::from_str(
            r#"
            [source]
            recursive = true
            test_suffix = "_spec.go"
            ignore = ["vendor", "testdata"]

            [render]
            ordering = "alphabetical"
            hide_fields = true
            "#,
        )
        .expect("valid config");

        assert!(config.source().recursive());
        assert_eq!(config.source().test_suffix(), "_spec.go");
        assert!(config.source().is_ignored_dir("vendor"));
        assert!(!config.source().is_ignored_dir("internal"));
        assert_eq!(config.render().ordering(), Ordering::Alphabetical);
        assert!(config.render().hide_fields());
        assert!(!config.render().hide_methods());
    }

    #[test]
    fn test_empty_ignore_list_overrides_default() {
        let config: AppConfig = toml::from_str("[source]\nignore = []\n").expect("valid");

        assert!(config.source().ignore().is_empty());
        assert!(!config.source().is_ignored_dir("vendor"));
    }

    #[test]
    fn test_missing_sections_use_defaults() {
        let config: AppConfig = toml::from_str("[render]\nhide_methods = true\n").expect("valid");

        assert_eq!(config.source().test_suffix(), DEFAULT_TEST_SUFFIX);
        assert_eq!(config.source().ignore(), ["vendor"]);
        assert!(config.render().hide_methods());
        assert_eq!(config.render().ordering(), Ordering::Declaration);
    }

    #[test]
    fn test_unknown_ordering_is_rejected() {
        let result: Result<AppConfig, _> = toml::from_str("[render]\nordering = \"random\"\n");

        assert!(result.is_err());
    }

    #[test]
    fn test_is_test_file() {
        let config = SourceConfig::default();

        assert!(config.is_test_file("car_test.go"));
        assert!(!config.is_test_file("car.go"));
        assert!(!config.is_test_file("testing.go"));

        let disabled = SourceConfig::default().with_test_suffix("");
        assert!(!disabled.is_test_file("car_test.go"));
    }
}
